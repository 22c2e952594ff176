use super::error::FileError;
use log::debug;
use std::{path::Path, process::Command};

/// Lookup the code signing identifier for a file
pub(crate) trait SignatureLookup: Sync {
    fn identifier(&self, path: &Path) -> Result<String, FileError>;
}

/// Get code signing identifiers using the `codesign` binary. Only supported on macOS
pub(crate) struct Codesign {
    binary: String,
    enabled: bool,
}

impl Codesign {
    pub(crate) fn new(enabled: bool) -> Codesign {
        Codesign {
            binary: String::from("/usr/bin/codesign"),
            enabled: enabled && cfg!(target_os = "macos"),
        }
    }
}

impl SignatureLookup for Codesign {
    fn identifier(&self, path: &Path) -> Result<String, FileError> {
        if !self.enabled {
            return Err(FileError::Signature);
        }

        let output = match Command::new(&self.binary)
            .args(["-d", "-v"])
            .arg(path)
            .output()
        {
            Ok(result) => result,
            Err(err) => {
                debug!("[listfiles] Could not execute {}: {err:?}", self.binary);
                return Err(FileError::Signature);
            }
        };

        if !output.status.success() {
            return Err(FileError::NotSigned);
        }

        // codesign writes signature details to stderr
        let details = String::from_utf8_lossy(&output.stderr);
        parse_identifier(&details).ok_or(FileError::NotSigned)
    }
}

/// Extract the value of the `Identifier=` line from `codesign -d -v` output
fn parse_identifier(details: &str) -> Option<String> {
    details
        .lines()
        .find_map(|line| line.strip_prefix("Identifier="))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
