mod error;
mod fence_config;
mod fence_directory;
mod fence_manager;

pub use error::FenceError;
pub use fence_config::FenceConfig;
pub use fence_directory::{
    fence_file_name, parse_fence_file_name, FenceDirectory, FileFenceDirectory,
    FENCE_FILE_EXTENSION,
};
pub use fence_manager::{FenceEntry, FenceManager, FenceOutcome};

/// Identifies one fence file. Allocated from a counter that only ever grows,
/// the first id handed out is 1.
pub type FenceId = u64;
