use crate::utils::time::systemtime_to_iso;
use std::fs::{symlink_metadata, Metadata};
use std::io::Error;
use std::path::Path;

/// Timestamps as ISO8601 strings. `None` if the platform does not provide the timestamp
#[derive(Debug, Default)]
pub(crate) struct StandardTimestamps {
    pub(crate) created: Option<String>,
    pub(crate) modified: Option<String>,
    pub(crate) accessed: Option<String>,
    pub(crate) changed: Option<String>,
}

/// Get the metadata associated with provided path. Symlinks are not followed
pub(crate) fn get_metadata(path: &Path) -> Result<Metadata, Error> {
    symlink_metadata(path)
}

/// Get standard timestamps (created, modified, accessed, changed (if supported)) from already read metadata
pub(crate) fn get_timestamps(meta: &Metadata) -> StandardTimestamps {
    StandardTimestamps {
        created: meta.created().ok().map(systemtime_to_iso),
        modified: meta.modified().ok().map(systemtime_to_iso),
        accessed: meta.accessed().ok().map(systemtime_to_iso),
        changed: changed_time(meta),
    }
}

/// Inode change time. Only available on unix
fn changed_time(meta: &Metadata) -> Option<String> {
    #[cfg(target_family = "unix")]
    {
        use crate::utils::time::unixepoch_to_iso;
        use std::os::unix::fs::MetadataExt;

        unixepoch_to_iso(meta.ctime(), meta.ctime_nsec())
    }

    #[cfg(not(target_family = "unix"))]
    {
        let _ = meta;
        None
    }
}

/// Get the owning user and group IDs. Platforms without unix ownership return 0
pub(crate) fn get_ownership(meta: &Metadata) -> (u32, u32) {
    #[cfg(target_family = "unix")]
    {
        use std::os::unix::fs::MetadataExt;
        (meta.uid(), meta.gid())
    }

    #[cfg(not(target_family = "unix"))]
    {
        let _ = meta;
        (0, 0)
    }
}
