use libc::c_int;

/// Returns the errno value left behind by the last failing libc call on this thread.
pub fn err_no() -> c_int {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
