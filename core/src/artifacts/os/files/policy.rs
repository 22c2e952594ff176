use crate::filesystem::files::{absolute_path, file_extension};
use crate::structs::artifacts::os::files::FileOptions;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use walkdir::DirEntry;

/// Files larger than 100MB are not collected
pub(crate) const DEFAULT_MAX_SIZE: u64 = 104857600;

const DEFAULT_ROOTS: [&str; 7] = [
    "/Applications",
    "/Library",
    "/Users",
    "/private/etc",
    "/private/tmp",
    "/private/var/root",
    "/usr/local",
];

const DEFAULT_SKIP_PREFIXES: [&str; 9] = [
    "/System",
    "/Library/Caches",
    "/Library/Developer",
    "/Library/Updates",
    "/private/var/db",
    "/private/var/folders",
    "/private/var/vm",
    "/usr/local/Homebrew",
    "/usr/local/Cellar",
];

const DEFAULT_SKIP_EXTENSIONS: [&str; 8] = [
    "tmp", "swp", "lock", "cache", "db-wal", "db-shm", "nib", "strings",
];

const DEFAULT_INTERESTING_EXTENSIONS: [&str; 24] = [
    "app", "dylib", "so", "kext", "plugin", "bundle", "sh", "bash", "zsh", "command", "py",
    "pl", "rb", "js", "scpt", "applescript", "plist", "mobileconfig", "pkg", "dmg", "zip",
    "jar", "log", "db",
];

/// Type of entry yielded by the directory walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    pub(crate) fn from_entry(entry: &DirEntry) -> EntryKind {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum SkipReason {
    /**Under an excluded prefix. Skipped silently */
    Excluded,
    FileType,
    Extension,
    NotInteresting,
    TooLarge,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Verdict {
    Queue,
    /**Directory under an excluded prefix. Do not descend */
    Prune,
    Skip(SkipReason),
}

/// Rules deciding which entries are collected. Never changes during a walk
#[derive(Debug, Clone)]
pub(crate) struct WalkPolicy {
    /**Always absolute so every record path is absolute */
    pub(crate) roots: Vec<PathBuf>,
    pub(crate) skip_prefixes: Vec<String>,
    pub(crate) skip_extensions: HashSet<String>,
    /**Empty set means every file is interesting */
    pub(crate) interesting_extensions: HashSet<String>,
    pub(crate) max_size: u64,
}

impl Default for WalkPolicy {
    fn default() -> Self {
        WalkPolicy {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            skip_prefixes: DEFAULT_SKIP_PREFIXES
                .iter()
                .map(|prefix| normalize_prefix(prefix))
                .collect(),
            skip_extensions: DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            interesting_extensions: DEFAULT_INTERESTING_EXTENSIONS
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl WalkPolicy {
    /// Build a policy from TOML options. Missing options use the builtin macOS policy
    pub(crate) fn from_options(options: &FileOptions) -> WalkPolicy {
        let mut policy = WalkPolicy::default();
        if let Some(roots) = &options.roots {
            policy.roots = roots.iter().map(|root| absolute_path(root)).collect();
        }
        if let Some(prefixes) = &options.skip_prefixes {
            policy.skip_prefixes = prefixes.iter().map(|prefix| normalize_prefix(prefix)).collect();
        }
        if let Some(extensions) = &options.skip_extensions {
            policy.skip_extensions = extensions.iter().map(|ext| normalize_extension(ext)).collect();
        }
        if let Some(extensions) = &options.interesting_extensions {
            policy.interesting_extensions =
                extensions.iter().map(|ext| normalize_extension(ext)).collect();
        }
        if let Some(max_size) = options.max_size {
            policy.max_size = max_size;
        }
        policy
    }

    /// Decide what to do with a walked entry.
    /// Order: excluded prefix, file type, skip extension, interesting extension, size
    pub(crate) fn evaluate(&self, path: &str, kind: EntryKind, size: u64) -> Verdict {
        if self.is_excluded(path) {
            return match kind {
                EntryKind::Directory => Verdict::Prune,
                _ => Verdict::Skip(SkipReason::Excluded),
            };
        }
        if kind == EntryKind::Other {
            return Verdict::Skip(SkipReason::FileType);
        }

        let extension = file_extension(path);
        if !extension.is_empty() && self.skip_extensions.contains(&extension) {
            return Verdict::Skip(SkipReason::Extension);
        }
        if kind == EntryKind::Directory {
            return Verdict::Queue;
        }

        if !self.interesting_extensions.is_empty()
            && !self.interesting_extensions.contains(&extension)
        {
            return Verdict::Skip(SkipReason::NotInteresting);
        }
        if size > self.max_size {
            return Verdict::Skip(SkipReason::TooLarge);
        }
        Verdict::Queue
    }

    /// Check if path is one of the excluded prefixes or below one
    fn is_excluded(&self, path: &str) -> bool {
        self.skip_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/') || prefix.is_empty())
        })
    }
}

/// Extensions are compared lowercase without the leading dot
fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Prefixes are compared absolute and without a trailing slash
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() || Path::new(trimmed).is_absolute() {
        return trimmed.to_string();
    }
    absolute_path(trimmed)
        .to_string_lossy()
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{EntryKind, SkipReason, Verdict, WalkPolicy, DEFAULT_MAX_SIZE};
    use crate::structs::artifacts::os::files::FileOptions;
    use std::path::PathBuf;

    fn test_policy() -> WalkPolicy {
        let options = FileOptions {
            roots: Some(vec![String::from("/")]),
            skip_prefixes: Some(vec![String::from("/Library/Caches/")]),
            skip_extensions: Some(vec![String::from(".tmp")]),
            interesting_extensions: Some(vec![
                String::from(".sh"),
                String::from("PLIST"),
                String::from(".tmp"),
            ]),
            max_size: Some(1024),
            ..Default::default()
        };
        WalkPolicy::from_options(&options)
    }

    #[test]
    fn test_default_policy() {
        let policy = WalkPolicy::default();
        assert!(policy.roots.contains(&PathBuf::from("/Applications")));
        assert!(policy.interesting_extensions.contains("plist"));
        assert_eq!(policy.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(
            policy.evaluate("/System/Library", EntryKind::Directory, 0),
            Verdict::Prune
        );
    }

    #[test]
    fn test_evaluate_excluded_prefix() {
        let policy = test_policy();
        assert_eq!(
            policy.evaluate("/Library/Caches", EntryKind::Directory, 0),
            Verdict::Prune
        );
        assert_eq!(
            policy.evaluate("/Library/Caches/com.apple/run.sh", EntryKind::File, 10),
            Verdict::Skip(SkipReason::Excluded)
        );
        // Only whole path components match
        assert_eq!(
            policy.evaluate("/Library/CachesBackup", EntryKind::Directory, 0),
            Verdict::Queue
        );
    }

    #[test]
    fn test_evaluate_extensions() {
        let policy = test_policy();
        assert_eq!(
            policy.evaluate("/usr/local/bin/run.sh", EntryKind::File, 10),
            Verdict::Queue
        );
        assert_eq!(
            policy.evaluate("/Library/Preferences/a.Plist", EntryKind::File, 10),
            Verdict::Queue
        );
        assert_eq!(
            policy.evaluate("/Users/a/readme.txt", EntryKind::File, 10),
            Verdict::Skip(SkipReason::NotInteresting)
        );
        // Skip list wins even if the extension is also interesting
        assert_eq!(
            policy.evaluate("/Users/a/scratch.tmp", EntryKind::File, 10),
            Verdict::Skip(SkipReason::Extension)
        );
        assert_eq!(
            policy.evaluate("/Users/a/build.tmp", EntryKind::Directory, 0),
            Verdict::Skip(SkipReason::Extension)
        );
        assert_eq!(
            policy.evaluate("/Users/a/Documents", EntryKind::Directory, 0),
            Verdict::Queue
        );
        assert_eq!(
            policy.evaluate("/Users/a/link.sh", EntryKind::Other, 0),
            Verdict::Skip(SkipReason::FileType)
        );
    }

    #[test]
    fn test_evaluate_size() {
        let policy = test_policy();
        assert_eq!(
            policy.evaluate("/tmp/big.sh", EntryKind::File, 1025),
            Verdict::Skip(SkipReason::TooLarge)
        );
        assert_eq!(
            policy.evaluate("/tmp/limit.sh", EntryKind::File, 1024),
            Verdict::Queue
        );
        // Directories are never size checked
        assert_eq!(
            policy.evaluate("/tmp/dir", EntryKind::Directory, u64::MAX),
            Verdict::Queue
        );
    }

    #[test]
    fn test_evaluate_idempotent() {
        let policy = test_policy();
        let paths = [
            ("/Library/Caches/x", EntryKind::Directory, 0),
            ("/bin/test.sh", EntryKind::File, 20),
            ("/var/log/readme.txt", EntryKind::File, 20),
            ("/tmp/big.plist", EntryKind::File, 4096),
        ];
        for (path, kind, size) in paths {
            assert_eq!(
                policy.evaluate(path, kind, size),
                policy.evaluate(path, kind, size)
            );
        }
    }

    #[test]
    fn test_empty_interesting_set() {
        let options = FileOptions {
            interesting_extensions: Some(Vec::new()),
            skip_prefixes: Some(Vec::new()),
            ..Default::default()
        };
        let policy = WalkPolicy::from_options(&options);
        assert_eq!(
            policy.evaluate("/usr/local/bin/tool", EntryKind::File, 10),
            Verdict::Queue
        );
        assert_eq!(policy.roots, WalkPolicy::default().roots);
    }

    #[test]
    fn test_relative_roots_and_prefixes() {
        let options = FileOptions {
            roots: Some(vec![String::from("collection/root"), String::from("/Users")]),
            skip_prefixes: Some(vec![String::from("collection/root/cache/")]),
            ..Default::default()
        };
        let policy = WalkPolicy::from_options(&options);
        for root in &policy.roots {
            assert!(root.is_absolute());
        }
        assert!(policy.roots[0].ends_with("collection/root"));
        assert_eq!(policy.roots[1], PathBuf::from("/Users"));

        let cache = policy.roots[0].join("cache");
        assert_eq!(
            policy.evaluate(&cache.display().to_string(), EntryKind::Directory, 0),
            Verdict::Prune
        );
    }
}
