//! Error types for geocoding.
//!
//! `NotFound` is the one error kind the caching layer treats specially: it is
//! a well-formed answer ("no result") and is cached. Every other kind is a
//! failure and passes through uncached.

use thiserror::Error;

/// Result type alias using `GeocodeError`.
pub type Result<T> = std::result::Result<T, GeocodeError>;

/// Main error type for all geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NEGATIVE RESULTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The query was well-formed but no result exists.
    #[error("no result found")]
    NotFound,

    // ═══════════════════════════════════════════════════════════════════════════
    // PROVIDER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The underlying provider failed.
    #[error("Provider '{provider}' failed: {reason}")]
    Provider { provider: String, reason: String },

    /// HTTP request to a provider failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Provider did not answer in time.
    #[error("Provider timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Provider quota exhausted.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider answered with something we could not interpret.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl GeocodeError {
    /// Creates a provider error tagged with the provider's name.
    pub fn provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        GeocodeError::Provider {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is the "no result" sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound)
    }

    /// Returns true if this error is transient (the caller may retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeocodeError::Http(_) | GeocodeError::Timeout { .. } | GeocodeError::RateLimited(_)
        )
    }

    /// Returns true if the underlying provider failed.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            GeocodeError::Provider { .. }
                | GeocodeError::Http(_)
                | GeocodeError::Timeout { .. }
                | GeocodeError::RateLimited(_)
                | GeocodeError::InvalidResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(GeocodeError::NotFound, true, false, false ; "not found")]
    #[test_case(GeocodeError::provider("nominatim", "boom"), false, false, true ; "provider")]
    #[test_case(GeocodeError::Http("502".into()), false, true, true ; "http")]
    #[test_case(GeocodeError::Timeout { seconds: 5 }, false, true, true ; "timeout")]
    #[test_case(GeocodeError::RateLimited("quota".into()), false, true, true ; "rate limited")]
    #[test_case(GeocodeError::InvalidResponse("html".into()), false, false, true ; "bad response")]
    fn test_error_classification(
        err: GeocodeError,
        not_found: bool,
        recoverable: bool,
        provider: bool,
    ) {
        assert_eq!(err.is_not_found(), not_found);
        assert_eq!(err.is_recoverable(), recoverable);
        assert_eq!(err.is_provider_error(), provider);
    }

    #[test]
    fn test_error_display() {
        let err = GeocodeError::provider("google", "quota exceeded");
        assert!(err.to_string().contains("google"));
        assert!(err.to_string().contains("quota exceeded"));

        assert_eq!(GeocodeError::NotFound.to_string(), "no result found");
    }
}
