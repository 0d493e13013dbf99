use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::mem::MaybeUninit;
use std::ops::Deref;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{
    EACCES, EBADF, EDQUOT, EFBIG, EINTR, EIO, EISDIR, ELOOP, EMFILE, ENAMETOOLONG, ENFILE,
    ENOENT, ENOMEM, ENOSPC, ENOTDIR, EOVERFLOW, EPERM, EROFS, c_int, mode_t, stat as Stat,
};

use crate::fs::error::*;
use crate::fs::panic::{BadFdPanic, Panic};
use crate::util::syscall::err_no;

/// An owned file descriptor, closed when dropped.
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(path: &Path, flags: c_int, mode: mode_t) -> Result<Fd, OpenError> {
        let pathname = CString::new(path.as_os_str().as_bytes()).map_err(|_| InvalidPathError)?;

        // SAFETY: pathname is a valid, nul terminated string that outlives the call.
        match unsafe { libc::open(pathname.as_ptr(), flags, libc::c_uint::from(mode)) } {
            -1 => Err(match err_no() {
                EACCES | EPERM =>    AccessError.into(),
                EDQUOT | ENOSPC =>   StorageExhaustedError.into(),
                EFBIG | EOVERFLOW => FileTooLargeError.into(),
                EINTR =>             InterruptError.into(),
                EISDIR =>            IsDirectoryError.into(),
                ELOOP =>             ExcessiveLinksError.into(),
                EMFILE | ENFILE =>   FileCountError.into(),
                ENAMETOOLONG =>      PathLengthError.into(),
                ENOENT =>            MissingComponentError.into(),
                ENOMEM =>            OOMError.into(),
                ENOTDIR =>           NonDirComponentError.into(),
                EROFS =>             ReadOnlyFSError.into(),
                e =>                 UnexpectedError(e).into(),
            }),
            fd => Ok(Fd(fd)),
        }
    }

    /// Returns the size of the file in bytes.
    pub fn size(&self) -> Result<u64, MetadataError> {
        let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
        // SAFETY: raw_meta is valid for writes of a stat struct.
        if unsafe { libc::fstat(self.0, raw_meta.as_mut_ptr()) } == -1 {
            return Err(match err_no() {
                EBADF =>     BadFdPanic.panic(),
                ENOMEM =>    OOMError.into(),
                EOVERFLOW => FileTooLargeError.into(),
                e =>         UnexpectedError(e).into(),
            });
        }
        // SAFETY: fstat initializes raw_meta when it succeeds.
        let raw = unsafe { raw_meta.assume_init() };

        Ok(u64::try_from(raw.st_size).unwrap_or(0))
    }

    pub fn close(self) -> Result<(), CloseError> {
        let fd = self.0;
        // Closing invalidates the descriptor whatever the outcome, so Drop mustn't close it again.
        std::mem::forget(self);
        // SAFETY: fd is owned by this Fd and is closed exactly once.
        if unsafe { libc::close(fd) } == -1 {
            return Err(match err_no() {
                EBADF =>           BadFdPanic.panic(),
                EINTR =>           InterruptError.into(),
                EIO =>             IOError.into(),
                ENOSPC | EDQUOT => StorageExhaustedError.into(),
                e =>               UnexpectedError(e).into(),
            });
        }
        Ok(())
    }
}

impl Deref for Fd {
    type Target = c_int;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: The descriptor is owned and, because close forgets self, still open.
        if unsafe { libc::close(self.0) } == -1 {
            let errno = err_no();
            if errno == EBADF {
                log::error!("{BadFdPanic} while dropping fd {}", self.0);
            } else {
                log::warn!("error while dropping fd {}: {}", self.0, UnexpectedError(errno));
            }
        }
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}
