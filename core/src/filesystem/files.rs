use log::warn;
use md5::{Digest, Md5};
use sha2::Sha256;
use std::{
    fs::File,
    io::{Error, ErrorKind, Read},
    path::{absolute, Path, PathBuf},
};

/// MD5 and SHA256 of file contents as lowercase hex
#[derive(Debug, PartialEq)]
pub(crate) struct FileHashes {
    pub(crate) md5: String,
    pub(crate) sha256: String,
}

/// Open a file and hash its contents. The file is closed on every return path
pub(crate) fn hash_file(path: &Path) -> Result<FileHashes, Error> {
    let mut file = File::open(path)?;
    hash_reader(&mut file)
}

/// Read a stream in chunks and compute MD5 and SHA256 in a single pass.
/// Any read error aborts hashing, partial hashes are never returned
pub(crate) fn hash_reader<R: Read>(reader: &mut R) -> Result<FileHashes, Error> {
    let mut md5 = Md5::new();
    let mut sha256 = Sha256::new();

    // Read file in chunks so we do not read large files all into memory
    let mut buffer = vec![0u8; 65536];
    loop {
        let bytes = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(result) => result,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        md5.update(&buffer[..bytes]);
        sha256.update(&buffer[..bytes]);
    }

    let md5_hash = md5.finalize();
    let sha256_hash = sha256.finalize();
    Ok(FileHashes {
        md5: format!("{md5_hash:x}"),
        sha256: format!("{sha256_hash:x}"),
    })
}

/// Make a path absolute against the current directory without resolving symlinks
pub(crate) fn absolute_path(path: &str) -> PathBuf {
    match absolute(path) {
        Ok(result) => result,
        Err(err) => {
            warn!("[core] Could not make {path} absolute: {err:?}");
            PathBuf::from(path)
        }
    }
}

/// Get the lowercase extension of a file if any
pub(crate) fn file_extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Get last component of provided path. Returns the path itself if there is no final component
pub(crate) fn get_filename(path: &str) -> String {
    match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.to_string(),
    }
}
