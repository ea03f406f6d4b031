use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the FenceManager
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceConfig {
    /// How many fence files to try, each with a fresh fence id, before the
    /// request is dispatched without fencing
    pub creation_attempts: u32,
    /// How many times in total to try deleting a created fence file. The
    /// first attempt happens right away, the rest are spaced by
    /// `deletion_retry_interval`.
    pub deletion_attempts: u32,
    /// Delay between two deletion attempts
    pub deletion_retry_interval: Duration,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            creation_attempts: 3,
            deletion_attempts: 3,
            deletion_retry_interval: Duration::from_millis(100),
        }
    }
}
