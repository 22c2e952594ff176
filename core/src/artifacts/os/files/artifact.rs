use super::{
    error::FileError,
    listfiles::{scan_paths, scan_roots, PoolOptions, DEFAULT_QUEUE_SIZE, DEFAULT_WORKERS},
    policy::WalkPolicy,
    signature::Codesign,
};
use crate::{
    output::sink::create_sink,
    structs::{artifacts::os::files::FileOptions, toml::Output},
    utils::{logging::collection_status, time::time_now},
};
use log::{error, info, warn};
use std::sync::atomic::AtomicBool;

/// Get a file listing with hashes based on provided options.
/// Setting `cancel` stops the walk and drops any paths not yet collected
pub(crate) fn listfiles(
    output: &Output,
    options: &FileOptions,
    cancel: &AtomicBool,
) -> Result<(), FileError> {
    let start_time = time_now();
    let policy = WalkPolicy::from_options(options);
    let pool = PoolOptions {
        workers: options.workers.unwrap_or(DEFAULT_WORKERS),
        queue_size: options.queue_size.unwrap_or(DEFAULT_QUEUE_SIZE),
    };
    if pool.workers == 0 {
        warn!("[listfiles] Worker count of 0 provided, using a single worker");
    }

    let (mut sink, filename) = match create_sink(output, "listfiles") {
        Ok(result) => result,
        Err(err) => {
            error!("[listfiles] Could not create output: {err:?}");
            return Err(FileError::OutputSink);
        }
    };

    let signer = Codesign::new(options.codesign.unwrap_or(true));
    let summary = match &options.paths {
        Some(paths) => scan_paths(paths, &pool, &signer, sink.as_mut(), cancel),
        None => scan_roots(&policy, &pool, &signer, sink.as_mut(), cancel),
    };

    if let Err(err) = sink.finish() {
        error!("[listfiles] Could not finish output {filename}: {err:?}");
        return Err(FileError::OutputSink);
    }
    if let Err(err) = collection_status("listfiles", output, &filename) {
        warn!("[listfiles] Could not update status log for {filename}: {err:?}");
    }

    info!(
        "[listfiles] Queued {} paths, wrote {} records, {} errors, {} write failures in {} seconds",
        summary.queued,
        summary.records,
        summary.errors,
        summary.write_failures,
        time_now().saturating_sub(start_time)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::listfiles;
    use crate::structs::{artifacts::os::files::FileOptions, toml::Output};
    use common::files::{FileMode, FileRecord};
    use std::{
        fs::{create_dir_all, read_to_string, write},
        sync::atomic::AtomicBool,
    };

    fn output_options(directory: &str, format: &str) -> Output {
        Output {
            name: String::from("listfiles_test"),
            directory: directory.to_string(),
            format: format.to_string(),
            compress: false,
            logging: None,
        }
    }

    #[test]
    fn test_listfiles() {
        let tree = tempfile::tempdir().unwrap();
        create_dir_all(tree.path().join("bin")).unwrap();
        write(tree.path().join("bin/test.sh"), "#!/bin/bash\necho 'Hello World'\n").unwrap();
        write(tree.path().join("bin/notes.txt"), "skip me").unwrap();

        let out = tempfile::tempdir().unwrap();
        let output = output_options(&out.path().display().to_string(), "jsonl");
        let options = FileOptions {
            roots: Some(vec![tree.path().display().to_string()]),
            skip_prefixes: Some(Vec::new()),
            interesting_extensions: Some(vec![String::from("sh")]),
            workers: Some(2),
            codesign: Some(false),
            ..Default::default()
        };

        listfiles(&output, &options, &AtomicBool::new(false)).unwrap();

        let data = read_to_string(out.path().join("listfiles_test/listfiles.jsonl")).unwrap();
        let records: Vec<FileRecord> = data
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        let script = records
            .iter()
            .find(|record| record.name == "test.sh")
            .unwrap();
        assert_eq!(script.mode, FileMode::File);
        assert_eq!(script.size, 31);
        assert!(!records.iter().any(|record| record.name == "notes.txt"));

        let status = read_to_string(out.path().join("listfiles_test/status.log")).unwrap();
        assert_eq!(status, "listfiles:listfiles.jsonl\n");
    }

    #[test]
    fn test_listfiles_paths() {
        let tree = tempfile::tempdir().unwrap();
        let script = tree.path().join("run.command");
        write(&script, "open -a Terminal").unwrap();

        let out = tempfile::tempdir().unwrap();
        let output = output_options(&out.path().display().to_string(), "csv");
        let options = FileOptions {
            paths: Some(vec![
                script.display().to_string(),
                tree.path().join("missing").display().to_string(),
            ]),
            codesign: Some(false),
            ..Default::default()
        };

        listfiles(&output, &options, &AtomicBool::new(false)).unwrap();

        let data = read_to_string(out.path().join("listfiles_test/listfiles.csv")).unwrap();
        assert_eq!(data.lines().count(), 2);
        assert!(data.contains("run.command"));
    }

    #[test]
    fn test_listfiles_bad_format() {
        let out = tempfile::tempdir().unwrap();
        let output = output_options(&out.path().display().to_string(), "xml");

        let result = listfiles(&output, &FileOptions::default(), &AtomicBool::new(false));
        assert!(result.is_err());
    }

    #[test]
    fn test_listfiles_cancelled() {
        let tree = tempfile::tempdir().unwrap();
        write(tree.path().join("run.sh"), "echo run").unwrap();

        let out = tempfile::tempdir().unwrap();
        let output = output_options(&out.path().display().to_string(), "jsonl");
        let options = FileOptions {
            roots: Some(vec![tree.path().display().to_string()]),
            skip_prefixes: Some(Vec::new()),
            codesign: Some(false),
            ..Default::default()
        };

        listfiles(&output, &options, &AtomicBool::new(true)).unwrap();

        // Output is still finished and registered, just without records
        let data = read_to_string(out.path().join("listfiles_test/listfiles.jsonl")).unwrap();
        assert!(data.is_empty());
        let status = read_to_string(out.path().join("listfiles_test/status.log")).unwrap();
        assert_eq!(status, "listfiles:listfiles.jsonl\n");
    }
}
