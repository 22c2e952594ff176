/**
 * Walk directories and collect metadata for every interesting file and directory.
 *
 * A single walker thread applies the `WalkPolicy` and queues paths on a bounded channel.
 * A fixed pool of workers stats each path, hashes regular files, and sends the `FileRecord`
 * to a single writer thread that owns the output sink. Per path failures go to a separate
 * error channel and never stop the walk.
 *
 * Shutdown order: walker drops the job sender, workers exit once the job channel is drained,
 * all workers are joined, then the record and error senders are dropped so the writer and
 * error drain can finish
 */
use super::{
    error::FileError,
    metadata::file_metadata,
    policy::{EntryKind, SkipReason, Verdict, WalkPolicy},
    signature::SignatureLookup,
};
use crate::{
    filesystem::{files::absolute_path, metadata::get_metadata},
    output::sink::RecordSink,
};
use common::files::FileRecord;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, warn};
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};
use walkdir::WalkDir;

pub(crate) const DEFAULT_WORKERS: usize = 4;
pub(crate) const DEFAULT_QUEUE_SIZE: usize = 100;

/// Worker pool sizing
#[derive(Debug, Clone, Copy)]
pub(crate) struct PoolOptions {
    pub(crate) workers: usize,
    /**Capacity of the job, record, and error channels */
    pub(crate) queue_size: usize,
}

impl Default for PoolOptions {
    fn default() -> Self {
        PoolOptions {
            workers: DEFAULT_WORKERS,
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }
}

/// A path that could not be collected
#[derive(Debug)]
pub(crate) struct PathFailure {
    pub(crate) path: PathBuf,
    pub(crate) error: FileError,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct ScanSummary {
    /**Paths sent to the workers */
    pub(crate) queued: u64,
    /**Records accepted by the sink */
    pub(crate) records: u64,
    /**Paths that failed to stat or hash */
    pub(crate) errors: u64,
    /**Records the sink rejected */
    pub(crate) write_failures: u64,
}

/// Walk every root in the policy and write a record for each queued entry
pub(crate) fn scan_roots<W, S>(
    policy: &WalkPolicy,
    pool: &PoolOptions,
    signer: &S,
    sink: &mut W,
    cancel: &AtomicBool,
) -> ScanSummary
where
    W: RecordSink + Send + ?Sized,
    S: SignatureLookup + ?Sized,
{
    run_pool(pool, signer, sink, cancel, |jobs| {
        walk_roots(policy, jobs, cancel)
    })
}

/// Collect an explicit list of paths. No policy is applied. Relative paths are made absolute
pub(crate) fn scan_paths<W, S>(
    paths: &[String],
    pool: &PoolOptions,
    signer: &S,
    sink: &mut W,
    cancel: &AtomicBool,
) -> ScanSummary
where
    W: RecordSink + Send + ?Sized,
    S: SignatureLookup + ?Sized,
{
    run_pool(pool, signer, sink, cancel, |jobs| {
        let mut queued = 0;
        for path in paths {
            if cancel.load(Ordering::Relaxed) || jobs.send(absolute_path(path)).is_err() {
                break;
            }
            queued += 1;
        }
        queued
    })
}

/// Start the writer, error drain, and workers, then run the producer on the current thread.
/// Returns once every queued path is written or reported as an error
fn run_pool<W, S, P>(
    pool: &PoolOptions,
    signer: &S,
    sink: &mut W,
    cancel: &AtomicBool,
    producer: P,
) -> ScanSummary
where
    W: RecordSink + Send + ?Sized,
    S: SignatureLookup + ?Sized,
    P: FnOnce(&Sender<PathBuf>) -> u64,
{
    let workers = pool.workers.max(1);
    let capacity = pool.queue_size.max(1);

    let (job_tx, job_rx) = bounded::<PathBuf>(capacity);
    let (record_tx, record_rx) = bounded::<FileRecord>(capacity);
    let (error_tx, error_rx) = bounded::<PathFailure>(capacity);

    thread::scope(|scope| {
        let writer = scope.spawn(move || write_records(&record_rx, sink));
        let drain = scope.spawn(move || drain_errors(&error_rx));

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let jobs = job_rx.clone();
            let records = record_tx.clone();
            let errors = error_tx.clone();
            handles.push(scope.spawn(move || worker_loop(&jobs, &records, &errors, signer, cancel)));
        }
        drop(job_rx);

        let queued = producer(&job_tx);
        drop(job_tx);

        for handle in handles {
            if handle.join().is_err() {
                error!("[listfiles] Worker thread panicked");
            }
        }
        // Workers are done sending. Closing these lets the writer and drain finish
        drop(record_tx);
        drop(error_tx);

        let (records, write_failures) = writer.join().unwrap_or_else(|_| {
            error!("[listfiles] Writer thread panicked");
            (0, 0)
        });
        let errors = drain.join().unwrap_or_else(|_| {
            error!("[listfiles] Error drain thread panicked");
            0
        });

        ScanSummary {
            queued,
            records,
            errors,
            write_failures,
        }
    })
}

/// Walk the policy roots and queue every path the policy accepts. Returns number of queued paths
fn walk_roots(policy: &WalkPolicy, jobs: &Sender<PathBuf>, cancel: &AtomicBool) -> u64 {
    let mut queued = 0;
    for root in &policy.roots {
        let mut walker = WalkDir::new(root).follow_links(false).into_iter();

        while let Some(entries) = walker.next() {
            if cancel.load(Ordering::Relaxed) {
                info!("[listfiles] Walk cancelled after queuing {queued} paths");
                return queued;
            }

            let entry = match entries {
                Ok(result) => result,
                Err(err) => {
                    warn!(
                        "[listfiles] Failed to walk entry under {}: {err:?}",
                        root.display()
                    );
                    continue;
                }
            };

            // Policy matching works on a lossy string. The job keeps the exact path bytes
            let path = entry.path().to_string_lossy().to_string();
            let kind = EntryKind::from_entry(&entry);
            // A failed lstat here is queued anyway so the worker reports it
            let size = if kind == EntryKind::File {
                entry.metadata().map(|meta| meta.len()).unwrap_or(0)
            } else {
                0
            };

            match policy.evaluate(&path, kind, size) {
                Verdict::Queue => {}
                Verdict::Prune => {
                    walker.skip_current_dir();
                    continue;
                }
                Verdict::Skip(SkipReason::Excluded) => continue,
                Verdict::Skip(SkipReason::TooLarge) => {
                    debug!(
                        "[listfiles] Skipping {path}, size {size} is larger than {}",
                        policy.max_size
                    );
                    continue;
                }
                Verdict::Skip(reason) => {
                    debug!("[listfiles] Skipping {path}: {reason:?}");
                    continue;
                }
            }

            if jobs.send(entry.into_path()).is_err() {
                error!("[listfiles] Job queue closed, stopping walk");
                return queued;
            }
            queued += 1;
        }
    }
    queued
}

/// Pull paths until the job channel is closed and drained
fn worker_loop<S: SignatureLookup + ?Sized>(
    jobs: &Receiver<PathBuf>,
    records: &Sender<FileRecord>,
    errors: &Sender<PathFailure>,
    signer: &S,
    cancel: &AtomicBool,
) {
    for path in jobs.iter() {
        // Keep draining when cancelled so the walker never blocks on a full queue
        if cancel.load(Ordering::Relaxed) {
            continue;
        }

        match collect_path(&path, signer) {
            Ok(record) => {
                if records.send(record).is_err() {
                    error!(
                        "[listfiles] Record queue closed, dropping {}",
                        path.display()
                    );
                }
            }
            Err(error) => {
                if errors.send(PathFailure { path, error }).is_err() {
                    error!("[listfiles] Error queue closed");
                }
            }
        }
    }
}

/// Stat a queued path and build its record
fn collect_path<S: SignatureLookup + ?Sized>(
    path: &Path,
    signer: &S,
) -> Result<FileRecord, FileError> {
    let meta = match get_metadata(path) {
        Ok(result) => result,
        Err(err) => {
            debug!("[listfiles] Could not stat {}: {err:?}", path.display());
            return Err(FileError::Stat);
        }
    };
    file_metadata(path, &meta, signer)
}

/// Write records in the order they arrive. Returns written and failed counts
fn write_records<W: RecordSink + ?Sized>(records: &Receiver<FileRecord>, sink: &mut W) -> (u64, u64) {
    let mut written = 0;
    let mut failures = 0;
    for record in records.iter() {
        match sink.write_record(&record) {
            Ok(_) => written += 1,
            Err(err) => {
                warn!("[listfiles] Failed to write record for {}: {err}", record.path);
                failures += 1;
            }
        }
    }
    (written, failures)
}

/// Log every path failure. Returns number of failures
fn drain_errors(errors: &Receiver<PathFailure>) -> u64 {
    let mut count = 0;
    for failure in errors.iter() {
        warn!(
            "[listfiles] Failed to collect {}: {}",
            failure.path.display(),
            failure.error
        );
        count += 1;
    }
    count
}
