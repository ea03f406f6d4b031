use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use crate::{FenceError, FenceId};

/// Extension given to fence files unless the directory is configured
/// otherwise
pub const FENCE_FILE_EXTENSION: &str = "fence";

const FENCE_FILE_PREFIX: &str = "fenceFile~";

/// Where fence files are created and deleted. The filesystem watcher that
/// reports `AssetRequestServer::on_fence_file_detected()` must observe this
/// location.
pub trait FenceDirectory {
    /// Creates an empty fence file for `fence_id` and returns its absolute path
    fn create_fence_file(&mut self, fence_id: FenceId) -> Result<PathBuf, FenceError>;

    fn delete_fence_file(&mut self, path: &Path) -> Result<(), FenceError>;
}

/// Name of the fence file for `fence_id`, e.g. `fenceFile~12.fence`
pub fn fence_file_name(fence_id: FenceId, extension: &str) -> String {
    format!("{}{}.{}", FENCE_FILE_PREFIX, fence_id, extension)
}

/// Reverse of `fence_file_name()`, for watchers mapping an observed file back
/// to its fence. Returns `None` for anything that is not a fence file.
pub fn parse_fence_file_name(file_name: &str, extension: &str) -> Option<FenceId> {
    let id = file_name
        .strip_prefix(FENCE_FILE_PREFIX)?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    if id.is_empty() || !id.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

enum FenceLocator {
    Fixed(PathBuf),
    Dynamic(Box<dyn Fn() -> Option<PathBuf>>),
}

/// Fence files on the local filesystem
pub struct FileFenceDirectory {
    locator: FenceLocator,
    extension: String,
}

impl FileFenceDirectory {
    /// Fence files are created in `directory`
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            locator: FenceLocator::Fixed(directory.into()),
            extension: FENCE_FILE_EXTENSION.to_string(),
        }
    }

    /// The directory is resolved through `locator` each time a fence file is
    /// created. A locator returning `None` fails the creation.
    pub fn with_locator<F: Fn() -> Option<PathBuf> + 'static>(locator: F) -> Self {
        Self {
            locator: FenceLocator::Dynamic(Box::new(locator)),
            extension: FENCE_FILE_EXTENSION.to_string(),
        }
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn file_extension(&self) -> &str {
        &self.extension
    }

    fn locate(&self) -> Option<PathBuf> {
        match &self.locator {
            FenceLocator::Fixed(directory) => Some(directory.clone()),
            FenceLocator::Dynamic(locator) => locator(),
        }
    }
}

impl FenceDirectory for FileFenceDirectory {
    fn create_fence_file(&mut self, fence_id: FenceId) -> Result<PathBuf, FenceError> {
        let directory = self.locate().ok_or(FenceError::DirectoryUnavailable)?;

        if !directory.is_dir() {
            fs::create_dir_all(&directory).map_err(|source| FenceError::CreateDirectory {
                path: directory.clone(),
                source,
            })?;
        }

        let path = directory.join(fence_file_name(fence_id, &self.extension));

        // create_new refuses to open a file that is already there
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => FenceError::AlreadyExists {
                    fence_id,
                    path: path.clone(),
                },
                _ => FenceError::CreateFile {
                    path: path.clone(),
                    source,
                },
            })?;

        Ok(std::path::absolute(&path).unwrap_or(path))
    }

    fn delete_fence_file(&mut self, path: &Path) -> Result<(), FenceError> {
        fs::remove_file(path).map_err(|source| FenceError::DeleteFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
