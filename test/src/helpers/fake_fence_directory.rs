use std::{
    cell::RefCell,
    io,
    path::{Path, PathBuf},
    rc::Rc,
};

use assetlink_server::{fence_file_name, FenceDirectory, FenceError, FenceId, FENCE_FILE_EXTENSION};

#[derive(Default)]
struct Script {
    failing_creations: usize,
    failing_deletions: usize,
    created: Vec<FenceId>,
    creation_calls: usize,
    deletion_calls: usize,
    deleted: Vec<PathBuf>,
}

/// In-memory fence directory that fails on demand
pub struct FakeFenceDirectory {
    script: Rc<RefCell<Script>>,
}

/// Test side of a `FakeFenceDirectory`
#[derive(Clone)]
pub struct FenceScript {
    script: Rc<RefCell<Script>>,
}

impl FakeFenceDirectory {
    pub fn new() -> (Self, FenceScript) {
        let script = Rc::new(RefCell::new(Script::default()));
        (
            Self {
                script: script.clone(),
            },
            FenceScript { script },
        )
    }
}

impl FenceDirectory for FakeFenceDirectory {
    fn create_fence_file(&mut self, fence_id: FenceId) -> Result<PathBuf, FenceError> {
        let mut script = self.script.borrow_mut();
        script.creation_calls += 1;
        if script.failing_creations > 0 {
            script.failing_creations -= 1;
            return Err(FenceError::CreateFile {
                path: PathBuf::from("/fences"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        script.created.push(fence_id);
        Ok(Path::new("/fences").join(fence_file_name(fence_id, FENCE_FILE_EXTENSION)))
    }

    fn delete_fence_file(&mut self, path: &Path) -> Result<(), FenceError> {
        let mut script = self.script.borrow_mut();
        script.deletion_calls += 1;
        if script.failing_deletions > 0 {
            script.failing_deletions -= 1;
            return Err(FenceError::DeleteFile {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        script.deleted.push(path.to_path_buf());
        Ok(())
    }
}

impl FenceScript {
    /// The next `count` creations fail
    pub fn fail_creations(&self, count: usize) {
        self.script.borrow_mut().failing_creations = count;
    }

    /// The next `count` deletions fail
    pub fn fail_deletions(&self, count: usize) {
        self.script.borrow_mut().failing_deletions = count;
    }

    /// Fence ids of the files created so far
    pub fn created(&self) -> Vec<FenceId> {
        self.script.borrow().created.clone()
    }

    pub fn last_created(&self) -> Option<FenceId> {
        self.script.borrow().created.last().copied()
    }

    pub fn creation_calls(&self) -> usize {
        self.script.borrow().creation_calls
    }

    pub fn deletion_calls(&self) -> usize {
        self.script.borrow().deletion_calls
    }

    pub fn deleted(&self) -> Vec<PathBuf> {
        self.script.borrow().deleted.clone()
    }
}
