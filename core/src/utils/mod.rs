pub(crate) mod error;
pub(crate) mod ishinobu_toml;
pub(crate) mod logging;
pub(crate) mod time;
pub(crate) mod uuid;
