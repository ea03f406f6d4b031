use std::{fs, path::PathBuf};

use assetlink_server::{
    fence_file_name, parse_fence_file_name, FenceDirectory, FenceError, FileFenceDirectory,
    FENCE_FILE_EXTENSION,
};

#[test]
fn creates_and_deletes_fence_files() {
    let temp = tempfile::tempdir().unwrap();
    let mut directory = FileFenceDirectory::new(temp.path());

    let path = directory.create_fence_file(1).unwrap();

    assert!(path.is_absolute());
    assert!(path.is_file());
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("fenceFile~1.fence")
    );
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);

    directory.delete_fence_file(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn missing_directory_is_created() {
    let temp = tempfile::tempdir().unwrap();
    let nested = temp.path().join("cache").join("fences");
    let mut directory = FileFenceDirectory::new(&nested);

    let path = directory.create_fence_file(5).unwrap();

    assert!(nested.is_dir());
    assert_eq!(path.parent(), Some(std::path::absolute(&nested).unwrap().as_path()));
}

#[test]
fn existing_fence_file_is_not_reused() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join(fence_file_name(3, FENCE_FILE_EXTENSION)), b"").unwrap();
    let mut directory = FileFenceDirectory::new(temp.path());

    let error = directory.create_fence_file(3).unwrap_err();

    assert!(matches!(error, FenceError::AlreadyExists { fence_id: 3, .. }));
    assert!(directory.create_fence_file(4).is_ok());
}

#[test]
fn deleting_a_missing_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut directory = FileFenceDirectory::new(temp.path());

    let error = directory
        .delete_fence_file(&temp.path().join("fenceFile~9.fence"))
        .unwrap_err();

    assert!(matches!(error, FenceError::DeleteFile { .. }));
}

#[test]
fn locator_is_consulted_for_every_fence() {
    let temp = tempfile::tempdir().unwrap();
    let root: PathBuf = temp.path().to_path_buf();
    let mut directory = FileFenceDirectory::with_locator(move || Some(root.join("fences")));

    directory.create_fence_file(1).unwrap();
    directory.create_fence_file(2).unwrap();

    let mut names: Vec<_> = fs::read_dir(temp.path().join("fences"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["fenceFile~1.fence", "fenceFile~2.fence"]);
}

#[test]
fn unavailable_directory_fails_creation() {
    let mut directory = FileFenceDirectory::with_locator(|| None);

    let error = directory.create_fence_file(1).unwrap_err();

    assert!(matches!(error, FenceError::DirectoryUnavailable));
}

#[test]
fn custom_extension_is_used_and_parsed() {
    let temp = tempfile::tempdir().unwrap();
    let mut directory = FileFenceDirectory::new(temp.path()).extension("tmpfence");
    assert_eq!(directory.file_extension(), "tmpfence");

    let path = directory.create_fence_file(27).unwrap();
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap();

    assert_eq!(file_name, "fenceFile~27.tmpfence");
    assert_eq!(
        parse_fence_file_name(file_name, directory.file_extension()),
        Some(27)
    );
    assert_eq!(parse_fence_file_name(file_name, FENCE_FILE_EXTENSION), None);
}
