use std::fmt;

#[derive(Debug)]
pub(crate) enum FormatError {
    Serialize,
    Write,
    Finish,
    Finished,
    UnknownFormat,
    Local,
}

impl std::error::Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Serialize => write!(f, "Could not serialize record"),
            FormatError::Write => write!(f, "Could not write record"),
            FormatError::Finish => write!(f, "Could not finish output"),
            FormatError::Finished => write!(f, "Output already finished"),
            FormatError::UnknownFormat => write!(f, "Unknown output format"),
            FormatError::Local => write!(f, "Could not create local output"),
        }
    }
}

#[derive(Debug)]
pub(crate) enum LocalError {
    CreateDirectory,
    CreateFile,
}

impl std::error::Error for LocalError {}

impl fmt::Display for LocalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalError::CreateDirectory => write!(f, "Could not create output directory"),
            LocalError::CreateFile => write!(f, "Could not create output file"),
        }
    }
}
