use std::fmt;

#[derive(Debug)]
pub(crate) enum IshinobuError {
    BadToml,
    CreateDirectory,
    LogFile,
}

impl std::error::Error for IshinobuError {}

impl fmt::Display for IshinobuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IshinobuError::BadToml => write!(f, "Failed to parse TOML data"),
            IshinobuError::CreateDirectory => write!(f, "Could not create directory(ies)"),
            IshinobuError::LogFile => write!(f, "Could not create log file"),
        }
    }
}
