use serde::{Deserialize, Serialize};

/// Options for the `listfiles` collector. Any option not provided uses the builtin macOS policy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileOptions {
    /**Directories to walk */
    pub roots: Option<Vec<String>>,
    /**Collect exactly these paths instead of walking `roots`. No filtering is applied */
    pub paths: Option<Vec<String>>,
    /**Path prefixes whose entire subtree is skipped */
    pub skip_prefixes: Option<Vec<String>>,
    /**Extensions that are never collected */
    pub skip_extensions: Option<Vec<String>>,
    /**Only files with these extensions are collected. Directories are always collected */
    pub interesting_extensions: Option<Vec<String>>,
    /**Files larger than this many bytes are skipped */
    pub max_size: Option<u64>,
    /**Number of worker threads hashing files */
    pub workers: Option<usize>,
    /**Capacity of the job and result queues */
    pub queue_size: Option<usize>,
    /**Lookup code signing identifiers with `codesign` */
    pub codesign: Option<bool>,
}
