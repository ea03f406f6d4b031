use std::{
    collections::HashMap,
    mem,
    path::PathBuf,
    time::{Duration, Instant},
};

use log::{debug, warn};

use assetlink_shared::{Request, RequestKey};

use crate::{FenceConfig, FenceDirectory, FenceId};

/// A request held back until its fence has been observed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceEntry {
    pub key: RequestKey,
    pub request: Request,
    pub platform: String,
}

/// What became of a request handed to `FenceManager::begin()`
#[derive(Debug, PartialEq, Eq)]
pub enum FenceOutcome {
    /// Fence file was created and deleted, the request waits for
    /// `take_detected()` with this id
    Parked(FenceId),
    /// Fence file was created but could not be deleted yet. Deletion is
    /// retried from `retry_deletions()`.
    Deleting(FenceId),
    /// No fence could be established, the request is handed back for
    /// dispatch without ordering guarantees
    Failed(FenceEntry),
}

struct PendingDeletion {
    fence_id: FenceId,
    path: PathBuf,
    entry: FenceEntry,
    attempts: u32,
    retry_at: Instant,
}

/// Orders requests behind the file events that were already queued when they
/// arrived. A fence file is created and deleted right away, and the request
/// is parked until the filesystem watcher reports that fence. The watcher
/// reports events in order, so everything the client wrote before the
/// request has been seen by then.
pub struct FenceManager {
    directory: Box<dyn FenceDirectory>,
    config: FenceConfig,
    last_fence_id: FenceId,
    parked: HashMap<FenceId, FenceEntry>,
    pending_deletions: Vec<PendingDeletion>,
}

impl FenceManager {
    pub fn new(directory: Box<dyn FenceDirectory>, config: FenceConfig) -> Self {
        Self {
            directory,
            config,
            last_fence_id: 0,
            parked: HashMap::new(),
            pending_deletions: Vec::new(),
        }
    }

    /// Establishes a fence for `entry`
    pub fn begin(&mut self, entry: FenceEntry, now: Instant) -> FenceOutcome {
        let Some((fence_id, path)) = self.create_fence_file() else {
            warn!(
                "unable to create a fence file for request {} after {} attempts",
                entry.key, self.config.creation_attempts
            );
            return FenceOutcome::Failed(entry);
        };

        match self.directory.delete_fence_file(&path) {
            Ok(()) => {
                self.park(fence_id, entry);
                FenceOutcome::Parked(fence_id)
            }
            Err(error) => {
                if self.deletion_attempts() <= 1 {
                    warn!(
                        "unable to delete fence file {:?} for request {}: {}",
                        path, entry.key, error
                    );
                    return FenceOutcome::Failed(entry);
                }
                debug!("fence {} not deleted yet, retrying: {}", fence_id, error);
                self.pending_deletions.push(PendingDeletion {
                    fence_id,
                    path,
                    entry,
                    attempts: 1,
                    retry_at: now + self.config.deletion_retry_interval,
                });
                FenceOutcome::Deleting(fence_id)
            }
        }
    }

    /// Retries every deletion that is due. Returns the requests whose fence
    /// could not be deleted within the configured attempts.
    pub fn retry_deletions(&mut self, now: Instant) -> Vec<FenceEntry> {
        let (due, waiting): (Vec<_>, Vec<_>) = mem::take(&mut self.pending_deletions)
            .into_iter()
            .partition(|deletion| deletion.retry_at <= now);
        self.pending_deletions = waiting;

        let mut exhausted = Vec::new();
        for mut deletion in due {
            match self.directory.delete_fence_file(&deletion.path) {
                Ok(()) => self.park(deletion.fence_id, deletion.entry),
                Err(error) => {
                    deletion.attempts += 1;
                    if deletion.attempts >= self.deletion_attempts() {
                        warn!(
                            "unable to delete fence file {:?} for request {} after {} attempts: {}",
                            deletion.path, deletion.entry.key, deletion.attempts, error
                        );
                        exhausted.push(deletion.entry);
                    } else {
                        debug!(
                            "fence {} not deleted yet, retrying: {}",
                            deletion.fence_id, error
                        );
                        deletion.retry_at = now + self.config.deletion_retry_interval;
                        self.pending_deletions.push(deletion);
                    }
                }
            }
        }
        exhausted
    }

    /// Removes and returns the request parked behind `fence_id`. `None` for
    /// stale or repeated notifications.
    pub fn take_detected(&mut self, fence_id: FenceId) -> Option<FenceEntry> {
        self.parked.remove(&fence_id)
    }

    /// When the next deletion retry is due
    pub fn next_retry_at(&self) -> Option<Instant> {
        self.pending_deletions
            .iter()
            .map(|deletion| deletion.retry_at)
            .min()
    }

    pub fn retry_interval(&self) -> Duration {
        self.config.deletion_retry_interval
    }

    /// Requests parked or waiting on a deletion retry
    pub fn pending_count(&self) -> usize {
        self.parked.len() + self.pending_deletions.len()
    }

    pub fn parked_count(&self) -> usize {
        self.parked.len()
    }

    /// Drops every pending request. Fence ids keep counting up.
    pub fn clear(&mut self) {
        self.parked.clear();
        self.pending_deletions.clear();
    }

    fn create_fence_file(&mut self) -> Option<(FenceId, PathBuf)> {
        for _ in 0..self.config.creation_attempts {
            self.last_fence_id += 1;
            let fence_id = self.last_fence_id;
            match self.directory.create_fence_file(fence_id) {
                Ok(path) => return Some((fence_id, path)),
                Err(error) => debug!("fence {} could not be created: {}", fence_id, error),
            }
        }
        None
    }

    fn park(&mut self, fence_id: FenceId, entry: FenceEntry) {
        debug!("request {} parked behind fence {}", entry.key, fence_id);
        self.parked.insert(fence_id, entry);
    }

    // a created file is always deleted at least once
    fn deletion_attempts(&self) -> u32 {
        self.config.deletion_attempts.max(1)
    }
}
