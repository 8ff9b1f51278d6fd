//! Remote-API failures: status code policy and `reqwest` support.

#[cfg(feature = "reqwest")]
use std::error::Error as StdError;

/// Server errors and rate limiting are worth retrying; nothing else is.
pub(crate) fn is_retryable_status(code: u16) -> bool {
    code >= 500 || code == 429
}

/// `reqwest` timeouts and connect failures report themselves as temporary.
/// Other `reqwest` errors carry no signal of their own.
#[cfg(feature = "reqwest")]
pub(crate) fn reqwest_transient(err: &(dyn StdError + 'static)) -> Option<bool> {
    let err = err.downcast_ref::<reqwest::Error>()?;
    (err.is_timeout() || err.is_connect()).then_some(true)
}

#[cfg(feature = "reqwest")]
pub(crate) fn reqwest_status(err: &(dyn StdError + 'static)) -> Option<u16> {
    err.downcast_ref::<reqwest::Error>()?
        .status()
        .map(|status| status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_policy() {
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(428));
        assert!(is_retryable_status(429));
        assert!(!is_retryable_status(430));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(599));
    }

    #[cfg(feature = "reqwest")]
    mod reqwest_errors {
        use crate::annotate::make_permanent;
        use crate::classify::{decide, is_temporary};
        use crate::verdict::{Rule, Verdict};

        fn status_error(code: u16) -> reqwest::Error {
            let response = http::Response::builder()
                .status(code)
                .body("")
                .unwrap();
            reqwest::Response::from(response)
                .error_for_status()
                .unwrap_err()
        }

        async fn refused_connection() -> reqwest::Error {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            reqwest::get(format!("http://{addr}/")).await.unwrap_err()
        }

        #[test]
        fn test_status_errors_follow_policy() {
            for (code, expected) in [(404, false), (429, true), (503, true)] {
                let err = status_error(code);
                assert_eq!(err.status().map(|s| s.as_u16()), Some(code));

                let decision = decide(&err).unwrap();
                assert_eq!(decision.rule, Rule::Status, "status {code}");
                assert_eq!(decision.is_temporary(), expected, "status {code}");
            }
        }

        #[test]
        fn test_client_error_status_is_final() {
            let err = anyhow::Error::new(status_error(404)).context("fetching manifest");
            let decision = decide(&*err).unwrap();
            assert_eq!(decision.rule, Rule::Status);
            assert_eq!(decision.verdict, Verdict::Permanent);
            assert_eq!(decision.depth, 1);
        }

        #[test]
        fn test_marker_overrides_server_error() {
            assert!(!is_temporary(&make_permanent(status_error(503))));
        }

        #[tokio::test]
        async fn test_connect_failure_is_native_temporary() {
            let err = refused_connection().await;
            assert!(err.is_connect());

            let decision = decide(&err).unwrap();
            assert_eq!(decision.rule, Rule::Native);
            assert!(is_temporary(&err));
        }
    }
}
