pub(crate) mod artifact;
mod error;
mod listfiles;
mod metadata;
mod policy;
mod signature;
