pub(crate) mod files;
pub(crate) mod metadata;
pub(crate) mod attributes;
