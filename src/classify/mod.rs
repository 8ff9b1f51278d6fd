//! Deciding whether an error is worth retrying.
//!
//! The classifier walks an error chain from the outermost error inwards. At
//! each node it tries, in order:
//!
//! 1. an explicit [`Marked`] override
//! 2. the node's own [`Transient`] signal
//! 3. cancellation and deadline sentinels
//! 4. transient OS error codes and I/O error kinds
//! 5. the [`StatusCoded`] policy (`>= 500` and `429` retry, anything else is final)
//!
//! The first rule that applies settles the verdict and nothing deeper in the
//! chain is looked at. If no node matches, the error is not temporary.
//!
//! # Examples
//!
//! ```
//! use std::io;
//! use transience::{is_temporary, make_temporary, temporary};
//!
//! assert!(!temporary(None));
//! assert!(!is_temporary(&io::Error::from(io::ErrorKind::NotFound)));
//! assert!(is_temporary(&make_temporary("try again later")));
//!
//! // Wrapping does not hide the signal.
//! let wrapped = anyhow::Error::new(make_temporary("try again later"))
//!     .context("syncing inventory");
//! assert!(is_temporary(&*wrapped));
//! ```

mod chain;
mod os;
mod remote;
mod sentinel;

use std::error::Error as StdError;
use std::fmt;

use crate::annotate::Marked;
use crate::capability::{
    probe_cause, probe_status, probe_transient, Cause, CauseProbe, StatusCoded, StatusProbe,
    Transient, TransientProbe,
};
use crate::verdict::{Decision, Rule, Verdict};

pub use chain::Chain;

static DEFAULT: Classifier = Classifier::new();

/// Classifies errors, with optional support for caller-defined error types.
///
/// `Classifier::new()` recognizes the built-in rules only. Register your own
/// types with the `with_*` builder methods; each registration is a plain
/// function pointer, so a classifier is cheap to clone and share.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use transience::{Classifier, Transient};
///
/// #[derive(Debug)]
/// struct PoolExhausted;
///
/// impl fmt::Display for PoolExhausted {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("connection pool exhausted")
///     }
/// }
///
/// impl std::error::Error for PoolExhausted {}
///
/// impl Transient for PoolExhausted {
///     fn is_transient(&self) -> bool {
///         true
///     }
/// }
///
/// let classifier = Classifier::new().with_transient::<PoolExhausted>();
/// assert!(classifier.is_temporary(&PoolExhausted));
/// assert!(!Classifier::new().is_temporary(&PoolExhausted));
/// ```
#[derive(Clone, Default)]
pub struct Classifier {
    transient: Vec<TransientProbe>,
    status: Vec<StatusProbe>,
    causes: Vec<CauseProbe>,
}

impl Classifier {
    /// Create a classifier with only the built-in rules.
    pub const fn new() -> Self {
        Classifier {
            transient: Vec::new(),
            status: Vec::new(),
            causes: Vec::new(),
        }
    }

    /// Trust `T`'s own [`Transient`] signal wherever it appears in a chain.
    pub fn with_transient<T>(mut self) -> Self
    where
        T: Transient + StdError + 'static,
    {
        self.transient.push(probe_transient::<T>);
        self
    }

    /// Apply the status code policy to `T` wherever it appears in a chain.
    pub fn with_status<T>(mut self) -> Self
    where
        T: StatusCoded + StdError + 'static,
    {
        self.status.push(probe_status::<T>);
        self
    }

    /// Follow `T`'s [`Cause`] accessor when its `source()` is empty.
    pub fn with_cause<T>(mut self) -> Self
    where
        T: Cause + StdError + 'static,
    {
        self.causes.push(probe_cause::<T>);
        self
    }

    /// Iterate over the chain the way the classifier walks it.
    pub fn chain<'a>(&'a self, err: &'a (dyn StdError + 'static)) -> Chain<'a> {
        Chain::new(err, &self.causes)
    }

    /// Walk the chain and report which rule settled it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use transience::{make_permanent, Classifier, Rule, Verdict};
    ///
    /// let (_tx, rx) = std::sync::mpsc::channel::<()>();
    /// let timeout = rx
    ///     .recv_timeout(std::time::Duration::from_millis(1))
    ///     .unwrap_err();
    ///
    /// let classifier = Classifier::new();
    /// let decision = classifier.decide(&timeout).unwrap();
    /// assert_eq!(decision.rule, Rule::Sentinel);
    /// assert_eq!(decision.verdict, Verdict::Temporary);
    ///
    /// let pinned = make_permanent(timeout);
    /// let decision = classifier.decide(&pinned).unwrap();
    /// assert_eq!(decision.rule, Rule::Marker);
    /// assert_eq!(decision.depth, 0);
    /// ```
    pub fn decide(&self, err: &(dyn StdError + 'static)) -> Option<Decision> {
        let decision = self.chain(err).enumerate().find_map(|(depth, node)| {
            self.check(node)
                .map(|(verdict, rule)| Decision {
                    verdict,
                    rule,
                    depth,
                })
        });

        #[cfg(feature = "tracing")]
        match &decision {
            Some(decision) => tracing::trace!(
                error = %err,
                verdict = %decision.verdict,
                rule = ?decision.rule,
                depth = decision.depth,
                "classified error chain"
            ),
            None => tracing::trace!(error = %err, "no classification in error chain"),
        }

        decision
    }

    /// Returns true if `err` is worth retrying.
    pub fn is_temporary(&self, err: &(dyn StdError + 'static)) -> bool {
        self.decide(err).is_some_and(|decision| decision.is_temporary())
    }

    /// Like [`Classifier::is_temporary`], treating an absent error as not temporary.
    pub fn temporary(&self, err: Option<&(dyn StdError + 'static)>) -> bool {
        err.is_some_and(|err| self.is_temporary(err))
    }

    fn check(&self, node: &(dyn StdError + 'static)) -> Option<(Verdict, Rule)> {
        if let Some(marked) = node.downcast_ref::<Marked>() {
            return Some((marked.verdict(), Rule::Marker));
        }
        if let Some(transient) = self.native(node) {
            return Some((Verdict::from(transient), Rule::Native));
        }
        if let Some(_signal) = sentinel::signal(node) {
            #[cfg(feature = "tracing")]
            tracing::trace!(signal = ?_signal, "cancellation sentinel");
            return Some((Verdict::Temporary, Rule::Sentinel));
        }
        if os::is_transient(node) {
            return Some((Verdict::Temporary, Rule::OsCode));
        }
        if let Some(code) = self.status_code(node) {
            return Some((
                Verdict::from(remote::is_retryable_status(code)),
                Rule::Status,
            ));
        }
        None
    }

    fn native(&self, node: &(dyn StdError + 'static)) -> Option<bool> {
        #[cfg(feature = "reqwest")]
        {
            if let Some(transient) = remote::reqwest_transient(node) {
                return Some(transient);
            }
        }
        self.transient.iter().find_map(|probe| probe(node))
    }

    fn status_code(&self, node: &(dyn StdError + 'static)) -> Option<u16> {
        #[cfg(feature = "reqwest")]
        {
            if let Some(code) = remote::reqwest_status(node) {
                return Some(code);
            }
        }
        self.status.iter().find_map(|probe| probe(node))
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("transient", &self.transient.len())
            .field("status", &self.status.len())
            .field("causes", &self.causes.len())
            .finish()
    }
}

/// Returns true if `err` is worth retrying, using the built-in rules.
///
/// # Examples
///
/// ```
/// use transience::{is_temporary, make_permanent};
///
/// assert!(is_temporary(&futures::future::Aborted));
/// assert!(!is_temporary(&make_permanent(futures::future::Aborted)));
/// ```
pub fn is_temporary(err: &(dyn StdError + 'static)) -> bool {
    DEFAULT.is_temporary(err)
}

/// Returns true if `err` is present and worth retrying.
///
/// # Examples
///
/// ```
/// use transience::{make_temporary, temporary};
///
/// assert!(!temporary(None));
/// assert!(temporary(Some(&make_temporary("flaky"))));
/// ```
pub fn temporary(err: Option<&(dyn StdError + 'static)>) -> bool {
    DEFAULT.temporary(err)
}

/// Walk `err` with the built-in rules and report which rule settled it.
pub fn decide(err: &(dyn StdError + 'static)) -> Option<Decision> {
    DEFAULT.decide(err)
}

/// Method-call form of [`is_temporary`].
///
/// Implemented for every `'static` error type and for the usual error trait
/// objects, so it also works through `Box<dyn Error>` and `anyhow::Error`.
///
/// # Examples
///
/// ```
/// use std::io;
/// use transience::Classify;
///
/// let err: Box<dyn std::error::Error + Send + Sync> =
///     Box::new(io::Error::from(io::ErrorKind::Interrupted));
/// assert!(err.is_temporary());
/// ```
pub trait Classify {
    /// Returns true if the error is worth retrying.
    fn is_temporary(&self) -> bool;
}

impl<E: StdError + 'static> Classify for E {
    fn is_temporary(&self) -> bool {
        is_temporary(self)
    }
}

impl Classify for dyn StdError + 'static {
    fn is_temporary(&self) -> bool {
        is_temporary(self)
    }
}

impl Classify for dyn StdError + Send + 'static {
    fn is_temporary(&self) -> bool {
        is_temporary(self)
    }
}

impl Classify for dyn StdError + Send + Sync + 'static {
    fn is_temporary(&self) -> bool {
        is_temporary(self)
    }
}
