//! Secret redaction for sensitive data in logs, serialization, and display.
//!
//! Use [`Redacted`] to wrap values that must never appear in logs, error messages,
//! or serialized output. The wrapped value is never exposed through `Debug`,
//! `Display`, or `Serialize`; all output as `"<redacted>"`.

use std::fmt::{self, Debug, Display};

/// Wrapper that redacts its inner value when formatted or serialized.
///
/// Used for the wallet private key and the relay API key.
///
/// # Example
///
/// ```ignore
/// use tokenswap_rs::redact::Redacted;
///
/// let infura_id = Redacted("0123abcd".to_string());
/// tracing::info!(infura_id = %infura_id, "Building RPC URL");
/// // Logs: infura_id = <redacted>
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Redacted<T>(pub T);

impl<T> Redacted<T> {
    /// Access the secret. Keep the result out of logs.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> serde::Serialize for Redacted<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        "<redacted>".serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_formats_inner_value() {
        let secret = Redacted("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");
        assert_eq!(format!("{}", secret), "<redacted>");
        assert_eq!(format!("{:?}", secret), "<redacted>");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"<redacted>\"");
        assert!(secret.expose().starts_with("0xac09"));
    }
}
