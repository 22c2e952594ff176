use serde::{Deserialize, Serialize};

/// Kind of filesystem entry described by a `FileRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    File,
    Directory,
}

/// Metadata collected for one file or directory.
/// Timestamps are ISO8601 strings in UTC and are `None` if the platform does not expose them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub mode: FileMode,
    pub uid: u32,
    pub gid: u32,
    pub modified: Option<String>,
    pub accessed: Option<String>,
    pub changed: Option<String>,
    pub created: Option<String>,
    /**Empty for directories and zero byte files */
    pub md5: String,
    /**Empty for directories and zero byte files */
    pub sha256: String,
    /**Value of the `com.apple.quarantine` extended attribute */
    pub quarantine: Option<String>,
    /**First two entries of the `kMDItemWhereFroms` extended attribute */
    pub where_from_1: Option<String>,
    pub where_from_2: Option<String>,
    pub downloaded_date: Option<String>,
    /**Code signing identifier. Empty if unsigned or lookup failed */
    pub signature: String,
}

impl FileRecord {
    pub fn is_directory(&self) -> bool {
        self.mode == FileMode::Directory
    }
}
