//! The temporary/permanent verdict and the rules that produce it.

use std::fmt;

/// Whether a failure is worth retrying.
///
/// # Examples
///
/// ```
/// use transience::Verdict;
///
/// assert!(Verdict::from_temporary(true).is_temporary());
/// assert_eq!(Verdict::Permanent.to_string(), "permanent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// The failure is transient; retrying may succeed.
    Temporary,
    /// The failure is permanent; retrying is pointless.
    Permanent,
}

impl Verdict {
    /// Build a verdict from a boolean temporariness signal.
    pub fn from_temporary(temporary: bool) -> Self {
        if temporary {
            Verdict::Temporary
        } else {
            Verdict::Permanent
        }
    }

    /// Returns true for [`Verdict::Temporary`].
    pub fn is_temporary(self) -> bool {
        matches!(self, Verdict::Temporary)
    }

    /// Returns true for [`Verdict::Permanent`].
    pub fn is_permanent(self) -> bool {
        matches!(self, Verdict::Permanent)
    }
}

impl From<bool> for Verdict {
    fn from(temporary: bool) -> Self {
        Verdict::from_temporary(temporary)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Temporary => f.write_str("temporary"),
            Verdict::Permanent => f.write_str("permanent"),
        }
    }
}

/// The check that settled a classification.
///
/// Rules are listed in the order the classifier tries them on each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rule {
    /// An explicit [`Marked`](crate::Marked) override.
    Marker,
    /// The node's own temporariness signal.
    Native,
    /// A cancellation or deadline-exceeded signal.
    Sentinel,
    /// A transient OS error code or I/O error kind.
    OsCode,
    /// A status code from a remote API.
    Status,
}

/// The outcome of walking an error chain.
///
/// `depth` counts nodes skipped before the match; the outermost error has depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// The verdict reached.
    pub verdict: Verdict,
    /// The rule that produced it.
    pub rule: Rule,
    /// Position of the matching node in the chain.
    pub depth: usize,
}

impl Decision {
    /// Returns true if the decision is [`Verdict::Temporary`].
    pub fn is_temporary(&self) -> bool {
        self.verdict.is_temporary()
    }
}
