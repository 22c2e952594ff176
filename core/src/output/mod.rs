pub(crate) mod error;
pub(crate) mod local;
pub(crate) mod sink;
