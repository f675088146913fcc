/// Classified failure for one generation request.
///
/// Each variant is one category of the error taxonomy, and the `Display`
/// string is the user-safe message surfaced to the caller. Raw upstream
/// detail (status lines, response bodies, missing variable names) is
/// logged server-side at the classification site and never carried here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Caller supplied insufficient or invalid input; recoverable by the caller.
    #[error("Bad input: {0}")]
    BadInput(String),

    /// Deployment misconfiguration; fatal until an operator fixes it.
    #[error("The generation service is not configured")]
    ConfigMissing,

    /// Upstream rejected the configured credential.
    #[error("The completion service rejected the configured credential")]
    Unauthorized,

    /// Upstream is throttling; not retried automatically.
    #[error("The completion service is rate limiting requests, try again shortly")]
    RateLimited,

    /// Upstream transport failure or 5xx response.
    #[error("The completion service is currently unavailable")]
    UpstreamUnavailable,

    /// The upstream call succeeded but produced no usable text.
    #[error("The completion service returned an empty response")]
    UpstreamEmpty,

    /// Anything uncategorized, including malformed payloads.
    #[error("Internal error")]
    Internal,
}

impl Error {
    /// HTTP status the inbound boundary maps this category to.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::BadInput(_) => 400,
            Error::Unauthorized => 401,
            Error::RateLimited => 429,
            Error::ConfigMissing
            | Error::UpstreamUnavailable
            | Error::UpstreamEmpty
            | Error::Internal => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_table() {
        assert_eq!(Error::BadInput("x".to_string()).status_code(), 400);
        assert_eq!(Error::Unauthorized.status_code(), 401);
        assert_eq!(Error::RateLimited.status_code(), 429);
        assert_eq!(Error::ConfigMissing.status_code(), 500);
        assert_eq!(Error::UpstreamUnavailable.status_code(), 500);
        assert_eq!(Error::UpstreamEmpty.status_code(), 500);
        assert_eq!(Error::Internal.status_code(), 500);
    }

    #[test]
    fn test_bad_input_message_carries_reason() {
        let err = Error::BadInput("codeText must be non-empty".to_string());
        assert_eq!(err.to_string(), "Bad input: codeText must be non-empty");
    }

    #[test]
    fn test_config_missing_message_stays_generic() {
        // The caller-facing message must not leak which variable is unset.
        assert!(!Error::ConfigMissing.to_string().contains("OPENAI_API_KEY"));
    }
}
