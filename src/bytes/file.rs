use std::path::Path;

use super::ByteVector;
use crate::fs::{File, ReadFileError, WriteFileError};

impl ByteVector {
    /// Appends the entire contents of the file at `path`, returning the number of bytes read.
    ///
    /// On failure, the bytes already in the buffer are kept and anything partially read is
    /// discarded.
    ///
    /// # Examples
    /// ```no_run
    /// # use fst::bytes::{ByteRead, ByteVector};
    /// let mut bytes = ByteVector::new();
    /// let read = bytes.read_file("sound.wav")?;
    /// assert_eq!(read, bytes.len());
    /// assert_eq!(bytes.find(b"RIFF"), Some(0));
    /// # Ok::<(), fst::fs::ReadFileError>(())
    /// ```
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ReadFileError> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(ReadFileError::from)
            .and_then(|file| file.read_to_end(self).map_err(ReadFileError::from));

        match &result {
            Ok(size) => log::debug!("read {size} bytes from {}", path.display()),
            Err(e) => log::warn!("failed to read {}: {e}", path.display()),
        }
        result
    }

    /// Creates a ByteVector holding the entire contents of the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ByteVector, ReadFileError> {
        let mut bytes = ByteVector::new();
        bytes.read_file(path)?;
        Ok(bytes)
    }

    /// Writes the contents to the file at `path`, replacing whatever it held before.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteFileError> {
        let path = path.as_ref();
        let result = File::create(path)
            .map_err(WriteFileError::from)
            .and_then(|file| {
                file.write_all(self.as_slice())?;
                file.close().map_err(WriteFileError::from)
            });

        match &result {
            Ok(()) => log::debug!("wrote {} bytes to {}", self.len(), path.display()),
            Err(e) => log::warn!("failed to write {}: {e}", path.display()),
        }
        result
    }
}
