//! Explicit temporary/permanent overrides.
//!
//! [`make_temporary`] and [`make_permanent`] wrap an error in a [`Marked`] node
//! carrying a fixed [`Verdict`]. The classifier stops at the outermost `Marked`
//! it meets, so an override hides every signal below it:
//!
//! ```
//! use std::io;
//! use transience::{is_temporary, make_permanent, make_temporary};
//!
//! let timeout = io::Error::from(io::ErrorKind::TimedOut);
//! assert!(is_temporary(&timeout));
//!
//! // This call site never retries, even on timeouts.
//! let err = make_permanent(make_temporary(timeout));
//! assert!(!is_temporary(&err));
//! assert_eq!(err.to_string(), "timed out");
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::capability::Cause;
use crate::classify;
use crate::verdict::Verdict;

/// Owned, thread-safe error trait object.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error pinned to a fixed [`Verdict`].
///
/// The verdict is chosen at construction and never derived from the wrapped
/// error. Display output is the wrapped error's, and the wrapped error stays
/// reachable through [`Error::source`](std::error::Error::source), so generic
/// wrappers layered on top (`anyhow` contexts and the like) keep working.
#[derive(Debug)]
pub struct Marked {
    verdict: Verdict,
    inner: Option<BoxError>,
}

impl Marked {
    /// Create an override node. `inner` may be absent; the verdict still applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use transience::{is_temporary, Marked, Verdict};
    ///
    /// let err = Marked::new(Verdict::Temporary, None);
    /// assert!(is_temporary(&err));
    /// assert_eq!(err.to_string(), "temporary error");
    /// ```
    pub fn new(verdict: Verdict, inner: Option<BoxError>) -> Self {
        Marked { verdict, inner }
    }

    /// The pinned verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The wrapped error, if any.
    pub fn get_ref(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.as_deref()
    }

    /// Consume the override and return the wrapped error.
    pub fn into_inner(self) -> Option<BoxError> {
        self.inner
    }
}

impl fmt::Display for Marked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => fmt::Display::fmt(inner, f),
            None => write!(f, "{} error", self.verdict),
        }
    }
}

impl StdError for Marked {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn StdError + 'static))
    }
}

impl Cause for Marked {
    fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }
}

/// Wrap `err` so it always classifies as temporary.
///
/// # Examples
///
/// ```
/// use transience::{is_temporary, make_temporary};
///
/// let err = make_temporary("backend busy");
/// assert!(is_temporary(&err));
/// assert_eq!(err.to_string(), "backend busy");
/// ```
pub fn make_temporary<E>(err: E) -> Marked
where
    E: Into<BoxError>,
{
    Marked::new(Verdict::Temporary, Some(err.into()))
}

/// Wrap `err` so it always classifies as permanent.
///
/// # Examples
///
/// ```
/// use std::io;
/// use transience::{is_temporary, make_permanent};
///
/// let err = make_permanent(io::Error::from(io::ErrorKind::WouldBlock));
/// assert!(!is_temporary(&err));
/// ```
pub fn make_permanent<E>(err: E) -> Marked
where
    E: Into<BoxError>,
{
    Marked::new(Verdict::Permanent, Some(err.into()))
}

/// Annotation and classification helpers on `Result`.
///
/// # Examples
///
/// ```
/// use transience::ResultExt;
///
/// fn fetch() -> Result<u32, String> {
///     Err("connection dropped".to_string())
/// }
///
/// let res = fetch().mark_temporary();
/// assert!(res.is_temporary_err());
///
/// let ok: Result<u32, std::io::Error> = Ok(1);
/// assert!(!ok.is_temporary_err());
/// ```
pub trait ResultExt<T, E> {
    /// Pin the error, if any, as temporary.
    fn mark_temporary(self) -> Result<T, Marked>
    where
        E: Into<BoxError>;

    /// Pin the error, if any, as permanent.
    fn mark_permanent(self) -> Result<T, Marked>
    where
        E: Into<BoxError>;

    /// Classify the error side with the default classifier; `Ok` is never temporary.
    fn is_temporary_err(&self) -> bool
    where
        E: StdError + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn mark_temporary(self) -> Result<T, Marked>
    where
        E: Into<BoxError>,
    {
        self.map_err(make_temporary)
    }

    fn mark_permanent(self) -> Result<T, Marked>
    where
        E: Into<BoxError>,
    {
        self.map_err(make_permanent)
    }

    fn is_temporary_err(&self) -> bool
    where
        E: StdError + 'static,
    {
        let err = self.as_ref().err().map(|e| e as &(dyn StdError + 'static));
        classify::temporary(err)
    }
}
