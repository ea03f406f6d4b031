use std::{io, path::PathBuf};

use thiserror::Error;

use crate::FenceId;

/// Errors that can occur while creating or deleting a fence file
#[derive(Debug, Error)]
pub enum FenceError {
    /// The directory locator could not produce a fence directory
    #[error("Fence directory could not be located")]
    DirectoryUnavailable,

    /// The fence directory did not exist and could not be created
    #[error("Failed to create fence directory {path:?}: {source}")]
    CreateDirectory { path: PathBuf, source: io::Error },

    /// A file with the fence's name already exists. Fence ids must not collide
    #[error("Fence file for fence {fence_id} already exists at {path:?}")]
    AlreadyExists { fence_id: FenceId, path: PathBuf },

    /// The fence file could not be opened for writing
    #[error("Failed to create fence file {path:?}: {source}")]
    CreateFile { path: PathBuf, source: io::Error },

    /// The fence file could not be removed, often a transient lock held by
    /// another process
    #[error("Failed to delete fence file {path:?}: {source}")]
    DeleteFile { path: PathBuf, source: io::Error },
}
