//! Recoverable file system errors.
//!
//! Each OS error condition is a unit struct, so that every operation's error enum lists exactly
//! the conditions it can report. Conditions that indicate a bug rather than a problem with the
//! environment are panics instead, see [`panic`](super::panic).

use derive_more::{Display, Error, From, IsVariant};
use libc::c_int;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("interrupted by signal")]
pub struct InterruptError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("error during I/O")]
pub struct IOError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("available storage space exhausted")]
pub struct StorageExhaustedError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("out of memory")]
pub struct OOMError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("exceeded open file limit")]
pub struct FileCountError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("path contains too many symlinks")]
pub struct ExcessiveLinksError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("path is too long")]
pub struct PathLengthError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("a component of the provided path does not exist")]
pub struct MissingComponentError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("a component of the provided path is not a directory")]
pub struct NonDirComponentError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("access to the file, or a directory in its path, was denied")]
pub struct AccessError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("the provided path refers to a directory")]
pub struct IsDirectoryError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("write access requested on a read-only file system")]
pub struct ReadOnlyFSError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("file is too large")]
pub struct FileTooLargeError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("path contains an interior nul byte")]
pub struct InvalidPathError;

/// An OS error that none of the other conditions describe, holding the raw errno value.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("unexpected OS error with code: {_0}")]
pub struct UnexpectedError(#[error(not(source))] pub c_int);

#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum OpenError {
    Access(AccessError),
    Interrupt(InterruptError),
    IsDirectory(IsDirectoryError),
    ExcessiveLinks(ExcessiveLinksError),
    FileCount(FileCountError),
    FileTooLarge(FileTooLargeError),
    InvalidPath(InvalidPathError),
    PathLength(PathLengthError),
    MissingComponent(MissingComponentError),
    NonDirComponent(NonDirComponentError),
    OOM(OOMError),
    ReadOnlyFS(ReadOnlyFSError),
    StorageExhausted(StorageExhaustedError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum MetadataError {
    OOM(OOMError),
    FileTooLarge(FileTooLargeError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    IO(IOError),
    IsDirectory(IsDirectoryError),
    OOM(OOMError),
    FileTooLarge(FileTooLargeError),
    Unexpected(UnexpectedError),
}

impl From<MetadataError> for ReadError {
    fn from(value: MetadataError) -> Self {
        match value {
            MetadataError::OOM(e) => e.into(),
            MetadataError::FileTooLarge(e) => e.into(),
            MetadataError::Unexpected(e) => e.into(),
        }
    }
}

#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
    FileTooLarge(FileTooLargeError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum CloseError {
    Interrupt(InterruptError),
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
    Unexpected(UnexpectedError),
}

/// The ways reading a whole file into memory can fail.
#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum ReadFileError {
    #[display("failed to open file: {_0}")]
    Open(OpenError),
    #[display("failed to read file: {_0}")]
    Read(ReadError),
}

/// The ways writing a whole file from memory can fail.
#[derive(Debug, Display, Error, From, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum WriteFileError {
    #[display("failed to create file: {_0}")]
    Open(OpenError),
    #[display("failed to write file: {_0}")]
    Write(WriteError),
    #[display("failed to close file: {_0}")]
    Close(CloseError),
}
