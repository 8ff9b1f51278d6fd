//! Capabilities an error type can expose to the classifier.
//!
//! Rust has no structural typing over `dyn Error`, so each capability is a trait
//! and each implementing type is registered on a [`Classifier`](crate::Classifier).
//! The classifier then probes every chain node with `downcast_ref` for the
//! registered types.
//!
//! # Examples
//!
//! ```
//! use std::fmt;
//! use transience::{Classifier, StatusCoded};
//!
//! #[derive(Debug)]
//! struct ApiError {
//!     code: u16,
//! }
//!
//! impl fmt::Display for ApiError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "api returned {}", self.code)
//!     }
//! }
//!
//! impl std::error::Error for ApiError {}
//!
//! impl StatusCoded for ApiError {
//!     fn status_code(&self) -> u16 {
//!         self.code
//!     }
//! }
//!
//! let classifier = Classifier::new().with_status::<ApiError>();
//! assert!(classifier.is_temporary(&ApiError { code: 503 }));
//! assert!(!classifier.is_temporary(&ApiError { code: 404 }));
//! ```

use std::error::Error as StdError;

/// An error that knows whether the failure it represents is transient.
///
/// The answer is read every time the error is classified, so types whose
/// state can change (a shared flag, a connection status) report the current
/// value rather than a snapshot.
pub trait Transient {
    /// Returns true if the failure is transient.
    fn is_transient(&self) -> bool;
}

/// An error carrying an HTTP-style status code from a remote API.
///
/// Codes `>= 500` and `429` classify as temporary; every other code is a
/// final permanent verdict for the chain.
pub trait StatusCoded {
    /// The status code returned by the remote side.
    fn status_code(&self) -> u16;
}

/// A wrapper exposing its inner error through a dedicated accessor instead
/// of (or in addition to) [`Error::source`](std::error::Error::source).
///
/// The classifier only follows this relation when `source()` returns `None`.
pub trait Cause {
    /// The wrapped error, if any.
    fn cause(&self) -> Option<&(dyn StdError + 'static)>;
}

pub(crate) type TransientProbe = fn(&(dyn StdError + 'static)) -> Option<bool>;
pub(crate) type StatusProbe = fn(&(dyn StdError + 'static)) -> Option<u16>;
pub(crate) type CauseProbe =
    for<'a> fn(&'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)>;

pub(crate) fn probe_transient<T>(err: &(dyn StdError + 'static)) -> Option<bool>
where
    T: Transient + StdError + 'static,
{
    err.downcast_ref::<T>().map(Transient::is_transient)
}

pub(crate) fn probe_status<T>(err: &(dyn StdError + 'static)) -> Option<u16>
where
    T: StatusCoded + StdError + 'static,
{
    err.downcast_ref::<T>().map(StatusCoded::status_code)
}

pub(crate) fn probe_cause<'a, T>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a (dyn StdError + 'static)>
where
    T: Cause + StdError + 'static,
{
    err.downcast_ref::<T>().and_then(Cause::cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Flaky(bool);

    impl fmt::Display for Flaky {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("flaky")
        }
    }

    impl StdError for Flaky {}

    impl Transient for Flaky {
        fn is_transient(&self) -> bool {
            self.0
        }
    }

    #[derive(Debug)]
    struct Other;

    impl fmt::Display for Other {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("other")
        }
    }

    impl StdError for Other {}

    #[test]
    fn test_probe_matches_registered_type() {
        let probe: TransientProbe = probe_transient::<Flaky>;
        assert_eq!(probe(&Flaky(true)), Some(true));
        assert_eq!(probe(&Flaky(false)), Some(false));
    }

    #[test]
    fn test_probe_ignores_other_types() {
        let probe: TransientProbe = probe_transient::<Flaky>;
        assert_eq!(probe(&Other), None);
    }
}
