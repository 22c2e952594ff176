use std::fmt;

#[derive(Debug)]
pub(crate) enum CollectionError {
    Listfiles,
}

impl std::error::Error for CollectionError {}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::Listfiles => write!(f, "Failed to collect file listing"),
        }
    }
}
