use std::fmt;

#[derive(Debug, PartialEq)]
pub(crate) enum FileError {
    Stat,
    Digest,
    UnsupportedType,
    Signature,
    NotSigned,
    OutputSink,
}

impl std::error::Error for FileError {}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Stat => write!(f, "Could not stat path"),
            FileError::Digest => write!(f, "Could not hash file"),
            FileError::UnsupportedType => write!(f, "Not a file or directory"),
            FileError::Signature => write!(f, "Could not get code signature"),
            FileError::NotSigned => write!(f, "File is not signed"),
            FileError::OutputSink => write!(f, "Could not write file listing output"),
        }
    }
}
