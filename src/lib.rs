//! # Transience
//!
//! Decide whether a failure is worth retrying.
//!
//! Errors reach retry loops wrapped in contexts, boxed, converted to
//! `io::Error` payloads, or produced by runtimes and clients that each have
//! their own way of saying "try again". This crate walks the whole error chain
//! and gives one answer:
//!
//! - explicit overrides made with [`make_temporary`] / [`make_permanent`]
//! - errors that report their own transience ([`Transient`])
//! - cancellation and deadline errors from tokio, futures and `std::sync::mpsc`
//! - transient OS error codes (`EIO`, `EAGAIN`, `EINTR`, ...)
//! - remote-API status codes ([`StatusCoded`]: `5xx` and `429` retry)
//!
//! ## Quick Example
//!
//! ```rust
//! use std::io;
//! use transience::{is_temporary, make_permanent};
//!
//! fn read_block() -> Result<Vec<u8>, io::Error> {
//!     Err(io::Error::from(io::ErrorKind::Interrupted))
//! }
//!
//! let err = read_block().unwrap_err();
//! assert!(is_temporary(&err));
//!
//! // Callers can pin a verdict for their own call site.
//! let err = make_permanent(err);
//! assert!(!is_temporary(&err));
//! ```
//!
//! ## Async runtimes
//!
//! ```rust
//! use std::time::Duration;
//! use transience::is_temporary;
//!
//! # #[cfg(feature = "tokio")]
//! # fn main() {
//! # tokio_test::block_on(async {
//! let elapsed = tokio::time::timeout(Duration::from_millis(1), std::future::pending::<()>())
//!     .await
//!     .unwrap_err();
//! assert!(is_temporary(&elapsed));
//! # });
//! # }
//! # #[cfg(not(feature = "tokio"))]
//! # fn main() {}
//! ```
//!
//! ## Cargo features
//!
//! - `tokio` (default): recognize `tokio::time::error::Elapsed` and cancelled
//!   `tokio::task::JoinError`.
//! - `tracing`: emit a `trace` event for every classification.
//! - `serde`: serialize [`Verdict`], [`Rule`] and [`Decision`].
//! - `reqwest`: classify `reqwest::Error` timeouts, connect failures and statuses.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod annotate;
pub mod capability;
pub mod classify;
pub mod verdict;

// Re-exports
pub use annotate::{make_permanent, make_temporary, BoxError, Marked, ResultExt};
pub use capability::{Cause, StatusCoded, Transient};
pub use classify::{decide, is_temporary, temporary, Chain, Classifier, Classify};
pub use verdict::{Decision, Rule, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::annotate::{make_permanent, make_temporary, Marked, ResultExt};
    pub use crate::capability::{Cause, StatusCoded, Transient};
    pub use crate::classify::{is_temporary, temporary, Classifier, Classify};
    pub use crate::verdict::Verdict;
}
