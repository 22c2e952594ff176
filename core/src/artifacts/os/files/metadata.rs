use super::{error::FileError, signature::SignatureLookup};
use crate::filesystem::{
    attributes::download_attributes,
    files::{get_filename, hash_file},
    metadata::{get_ownership, get_timestamps},
};
use common::files::{FileMode, FileRecord};
use log::{debug, warn};
use std::{fs::Metadata, path::Path};

/// Build a `FileRecord` from a path and its already fetched `lstat` metadata.
/// Only a hashing failure fails the record, all other lookups fall back to empty values.
/// The path is only converted to a string for the record itself
pub(crate) fn file_metadata<S: SignatureLookup + ?Sized>(
    path: &Path,
    meta: &Metadata,
    signer: &S,
) -> Result<FileRecord, FileError> {
    let mode = if meta.is_dir() {
        FileMode::Directory
    } else if meta.is_file() {
        FileMode::File
    } else {
        return Err(FileError::UnsupportedType);
    };

    let display_path = path.to_string_lossy().to_string();
    let timestamps = get_timestamps(meta);
    let (uid, gid) = get_ownership(meta);
    let attributes = download_attributes(path);
    let mut where_from = attributes.where_from.into_iter();

    let mut record = FileRecord {
        name: get_filename(&display_path),
        path: display_path,
        size: 0,
        mode,
        uid,
        gid,
        modified: timestamps.modified,
        accessed: timestamps.accessed,
        changed: timestamps.changed,
        created: timestamps.created,
        md5: String::new(),
        sha256: String::new(),
        quarantine: attributes.quarantine,
        where_from_1: where_from.next(),
        where_from_2: where_from.next(),
        downloaded_date: attributes.downloaded_date,
        signature: String::new(),
    };

    if mode == FileMode::Directory {
        return Ok(record);
    }

    record.size = meta.len();
    // Zero byte files are not hashed
    if record.size > 0 {
        let hashes = match hash_file(path) {
            Ok(result) => result,
            Err(err) => {
                warn!("[listfiles] Failed to hash {}: {err:?}", path.display());
                return Err(FileError::Digest);
            }
        };
        record.md5 = hashes.md5;
        record.sha256 = hashes.sha256;
    }

    record.signature = match signer.identifier(path) {
        Ok(result) => result,
        Err(err) => {
            debug!("[listfiles] No code signature for {}: {err}", path.display());
            String::new()
        }
    };

    Ok(record)
}
