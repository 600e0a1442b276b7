//! Errors that can occur when talking to Cronometer

use thiserror::Error;

/// Errors produced by the login handshake and token minting.
///
/// Callers are expected to branch on the variant: `Authentication` means the
/// credentials or session are at fault, `ProtocolVersion` means this crate's
/// built-in GWT constants have drifted from the server and need updating.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials were rejected, the login page was unusable, or no
    /// authenticated session is available.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A GWT response could not be decoded. Cronometer has likely redeployed
    /// and the permutation/header values no longer match the server build.
    #[error("GWT values may be outdated; could not decode {operation} response: {response_prefix}")]
    ProtocolVersion {
        /// The RPC method whose response was undecodable.
        operation: &'static str,
        /// Prefix of the raw server response, for diagnosis.
        response_prefix: String,
    },

    /// Transport-level failure from the underlying HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Truncate a raw server response for inclusion in an error message.
pub(crate) fn response_prefix(text: &str) -> String {
    text.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_message_carries_response_prefix() {
        let err = AuthError::ProtocolVersion {
            operation: "authenticate",
            response_prefix: response_prefix("<html>scheduled maintenance</html>"),
        };
        let message = err.to_string();
        assert!(message.contains("authenticate"));
        assert!(message.contains("scheduled maintenance"));
    }

    #[test]
    fn test_response_prefix_truncates_to_200_chars() {
        let long = "x".repeat(500);
        assert_eq!(response_prefix(&long).chars().count(), 200);
        assert_eq!(response_prefix("short"), "short");
    }
}
