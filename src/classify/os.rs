//! Transient OS-level failures.
//!
//! The errno table is wider than what networking code usually retries: a
//! generic `EIO` and `EAGAIN` are treated as transient too. Errors without a
//! raw OS code fall back to the equivalent `io::ErrorKind` table.

use std::error::Error as StdError;
use std::io;

#[cfg(unix)]
const TRANSIENT_ERRNOS: &[i32] = &[
    libc::EIO,
    libc::EAGAIN,
    libc::EWOULDBLOCK,
    libc::EINTR,
    libc::EMFILE,
    libc::ENFILE,
    libc::ECONNRESET,
    libc::ECONNABORTED,
    libc::ETIMEDOUT,
];

const TRANSIENT_KINDS: &[io::ErrorKind] = &[
    io::ErrorKind::WouldBlock,
    io::ErrorKind::Interrupted,
    io::ErrorKind::TimedOut,
    io::ErrorKind::ConnectionReset,
    io::ErrorKind::ConnectionAborted,
];

/// Returns true only for I/O errors found in the transient tables.
///
/// Anything else is "no match", never a permanent verdict.
pub(crate) fn is_transient(err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(is_transient_io)
}

fn is_transient_io(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        if let Some(code) = err.raw_os_error() {
            return TRANSIENT_ERRNOS.contains(&code);
        }
    }
    TRANSIENT_KINDS.contains(&err.kind())
}
