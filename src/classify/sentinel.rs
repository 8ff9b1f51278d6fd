//! Cancellation and deadline signals from the async ecosystems.
//!
//! Two families produce these errors with unrelated types:
//!
//! | Condition         | tokio                             | futures / std                          |
//! |-------------------|-----------------------------------|----------------------------------------|
//! | canceled          | `tokio::task::JoinError` (cancelled) | `futures::future::Aborted`          |
//! | deadline exceeded | `tokio::time::error::Elapsed`     | `std::sync::mpsc::RecvTimeoutError::Timeout` |
//!
//! All of them classify as temporary. The tokio half requires the `tokio` feature.

use std::error::Error as StdError;
use std::sync::mpsc::RecvTimeoutError;

/// Which condition a sentinel signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Canceled,
    DeadlineExceeded,
}

pub(crate) fn signal(err: &(dyn StdError + 'static)) -> Option<Signal> {
    if is_canceled(err) {
        Some(Signal::Canceled)
    } else if is_deadline_exceeded(err) {
        Some(Signal::DeadlineExceeded)
    } else {
        None
    }
}

fn is_canceled(err: &(dyn StdError + 'static)) -> bool {
    #[cfg(feature = "tokio")]
    {
        if err
            .downcast_ref::<tokio::task::JoinError>()
            .is_some_and(tokio::task::JoinError::is_cancelled)
        {
            return true;
        }
    }
    err.is::<futures::future::Aborted>()
}

fn is_deadline_exceeded(err: &(dyn StdError + 'static)) -> bool {
    #[cfg(feature = "tokio")]
    {
        if err.is::<tokio::time::error::Elapsed>() {
            return true;
        }
    }
    matches!(
        err.downcast_ref::<RecvTimeoutError>(),
        Some(RecvTimeoutError::Timeout)
    )
}
