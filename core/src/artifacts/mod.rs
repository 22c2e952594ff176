pub(crate) mod collection;
pub(crate) mod error;
pub(crate) mod os;
