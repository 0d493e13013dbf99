use std::path::Path;

use libc::{
    EBADF, EDQUOT, EFAULT, EFBIG, EINTR, EIO, EISDIR, ENOSPC, EPIPE, O_CLOEXEC, O_CREAT,
    O_RDONLY, O_TRUNC, O_WRONLY, c_void,
};

use crate::fs::error::*;
use crate::fs::fd::Fd;
use crate::fs::panic::{BadBufferPanic, BadFdPanic, Panic};
use crate::util::syscall::err_no;

const CREATE_MODE: libc::mode_t = 0o644;

/// An open file, read or written sequentially through a file descriptor that is closed on drop.
///
/// Interrupted reads and writes are retried, so [`InterruptError`] is only ever reported by
/// [`open`](File::open), [`create`](File::create) and [`close`](File::close).
#[derive(Debug)]
pub struct File {
    fd: Fd,
}

impl File {
    /// Opens an existing file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<File, OpenError> {
        Ok(File {
            fd: Fd::open(path.as_ref(), O_RDONLY | O_CLOEXEC, 0)?,
        })
    }

    /// Opens a file for writing, creating it if it doesn't exist and truncating it if it does.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<File, OpenError> {
        Ok(File {
            fd: Fd::open(
                path.as_ref(),
                O_WRONLY | O_CREAT | O_TRUNC | O_CLOEXEC,
                CREATE_MODE,
            )?,
        })
    }

    /// Returns the current size of the file in bytes.
    pub fn size(&self) -> Result<u64, MetadataError> {
        self.fd.size()
    }

    /// Reads up to `size` bytes into `buf`, returning how many were read.
    ///
    /// # Safety
    /// `buf` must be valid for writes of `size` bytes. The bytes don't need to be initialized.
    pub(crate) unsafe fn read_raw(&self, buf: *mut u8, size: usize) -> Result<usize, ReadError> {
        loop {
            // SAFETY: The caller guarantees that buf is valid for writes of size bytes.
            match unsafe { libc::read(*self.fd, buf.cast::<c_void>(), size) } {
                -1 => match err_no() {
                    EINTR =>  continue,
                    EBADF =>  BadFdPanic.panic(),
                    EFAULT => BadBufferPanic.panic(),
                    EIO =>    Err(IOError)?,
                    EISDIR => Err(IsDirectoryError)?,
                    e =>      Err(UnexpectedError(e))?,
                },
                count => return Ok(count as usize),
            }
        }
    }

    /// Reads up to `buf.len()` bytes, returning how many were read. Zero means end of file.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ReadError> {
        // SAFETY: buf is valid for writes of buf.len() bytes.
        unsafe { self.read_raw(buf.as_mut_ptr(), buf.len()) }
    }

    /// Reads until `buf` is full or the end of the file is reached, returning the number of bytes
    /// read.
    pub fn read_exact_or_eof(&self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..])? {
                0 => break,
                count => filled += count,
            }
        }
        Ok(filled)
    }

    /// Writes up to `buf.len()` bytes, returning how many were written.
    pub fn write(&self, buf: &[u8]) -> Result<usize, WriteError> {
        loop {
            // SAFETY: buf is valid for reads of buf.len() bytes.
            match unsafe { libc::write(*self.fd, buf.as_ptr().cast::<c_void>(), buf.len()) } {
                -1 => match err_no() {
                    EINTR =>           continue,
                    EBADF =>           BadFdPanic.panic(),
                    EFAULT =>          BadBufferPanic.panic(),
                    EIO | EPIPE =>     Err(IOError)?,
                    ENOSPC | EDQUOT => Err(StorageExhaustedError)?,
                    EFBIG =>           Err(FileTooLargeError)?,
                    e =>               Err(UnexpectedError(e))?,
                },
                count => return Ok(count as usize),
            }
        }
    }

    /// Writes the whole of `buf`, retrying short writes.
    pub fn write_all(&self, mut buf: &[u8]) -> Result<(), WriteError> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => Err(IOError)?,
                count => buf = &buf[count..],
            }
        }
        Ok(())
    }

    /// Closes the file, reporting any error that a drop would only log.
    pub fn close(self) -> Result<(), CloseError> {
        self.fd.close()
    }
}

#[cfg(feature = "bytes")]
mod bytes {
    use super::File;
    use crate::bytes::ByteVector;
    use crate::fs::error::ReadError;

    const EOF_CHECK_LEN: usize = 32;

    impl File {
        /// Appends the rest of the file to `buf`, returning the number of bytes read.
        ///
        /// The file's reported size is reserved up front and read straight into the spare
        /// capacity. Once that is full, a read into a small stack buffer checks for the end of the
        /// file before the buffer is grown, so a file that doesn't change size is read without reallocating.
        ///
        /// On failure, everything read by this call is discarded.
        pub fn read_to_end(&self, buf: &mut ByteVector) -> Result<usize, ReadError> {
            let start = buf.len();
            match self.read_into_spare(buf) {
                Ok(()) => Ok(buf.len() - start),
                Err(e) => {
                    buf.truncate(start);
                    Err(e)
                },
            }
        }

        fn read_into_spare(&self, buf: &mut ByteVector) -> Result<(), ReadError> {
            let hint = usize::try_from(self.size()?).unwrap_or(0);
            buf.reserve(hint);

            loop {
                if buf.len() == buf.capacity() {
                    let mut scratch = [0_u8; EOF_CHECK_LEN];
                    match self.read(&mut scratch)? {
                        0 => return Ok(()),
                        count => buf.extend_from_slice(&scratch[..count]),
                    }
                    continue;
                }

                let spare = buf.spare_capacity_mut();
                // SAFETY: The spare capacity is valid for writes of its whole length.
                let count = unsafe { self.read_raw(spare.as_mut_ptr().cast(), spare.len())? };
                if count == 0 {
                    return Ok(());
                }
                // SAFETY: The read initialized count bytes directly after len, within capacity.
                unsafe { buf.set_len(buf.len() + count) };
            }
        }

        /// Reads the rest of the file into a new ByteVector.
        pub fn read_all(&self) -> Result<ByteVector, ReadError> {
            let mut buf = ByteVector::new();
            self.read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
