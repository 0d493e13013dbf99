#![cfg(test)]

use super::*;

#[test]
fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data");

    let file = File::create(&path).unwrap();
    file.write_all(b"hello, ").unwrap();
    file.write_all(b"file").unwrap();
    file.close().unwrap();

    let file = File::open(&path).unwrap();
    assert_eq!(file.size(), Ok(11));

    let mut buf = [0_u8; 16];
    assert_eq!(file.read_exact_or_eof(&mut buf), Ok(11));
    assert_eq!(&buf[..11], b"hello, file");
    assert_eq!(file.read(&mut buf), Ok(0));
}

#[test]
fn test_create_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data");
    std::fs::write(&path, b"previous contents").unwrap();

    let file = File::create(&path).unwrap();
    file.write_all(b"new").unwrap();
    drop(file);

    assert_eq!(std::fs::read(&path).unwrap(), b"new");
}

#[test]
fn test_open_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = File::open(dir.path().join("missing"));
    assert!(missing.unwrap_err().is_missing_component());

    let nested = File::open(dir.path().join("missing/child"));
    assert!(nested.unwrap_err().is_missing_component());

    let as_dir = File::create(dir.path());
    assert!(as_dir.unwrap_err().is_is_directory());

    let nul = File::open("bad\0path");
    assert_eq!(nul.unwrap_err(), OpenError::InvalidPath(InvalidPathError));

    let file_path = dir.path().join("file");
    std::fs::write(&file_path, b"").unwrap();
    let through_file = File::open(file_path.join("child"));
    assert!(through_file.unwrap_err().is_non_dir_component());
}

#[test]
fn test_read_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = File::open(dir.path()).unwrap();

    let mut buf = [0_u8; 4];
    assert_eq!(file.read(&mut buf), Err(ReadError::IsDirectory(IsDirectoryError)));
}

#[cfg(feature = "bytes")]
#[test]
fn test_read_all() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large");
    let contents: Vec<u8> = (0..10_000_u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, &contents).unwrap();

    let file = File::open(&path).unwrap();
    let bytes = file.read_all().unwrap();
    assert_eq!(bytes.as_slice(), contents.as_slice());
}

#[test]
fn test_error_messages() {
    let error = ReadFileError::from(OpenError::from(AccessError));
    assert_eq!(
        error.to_string(),
        "failed to open file: access to the file, or a directory in its path, was denied"
    );
    assert_eq!(
        WriteFileError::from(WriteError::from(UnexpectedError(5))).to_string(),
        "failed to write file: unexpected OS error with code: 5"
    );
}
