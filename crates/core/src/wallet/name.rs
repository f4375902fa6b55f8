//! Wallet naming rules.

use thiserror::Error;

/// Why a wallet name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletNameError {
    /// The name is empty or whitespace-only.
    #[error("Empty wallet name provided.")]
    Empty,

    /// The name contains characters outside the allowed set.
    #[error("Invalid wallet name format.")]
    InvalidFormat,
}

impl WalletNameError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "INVALID_WALLET_NAME_EMPTY",
            Self::InvalidFormat => "INVALID_WALLET_NAME_FORMAT",
        }
    }

    /// Human-readable explanation for API responses.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "Wallet name cannot be empty.",
            Self::InvalidFormat => {
                "Only letters, numbers, spaces, underscores, and dashes are allowed."
            }
        }
    }

    /// HTTP status code the API maps this error to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }
}

/// Validates a wallet name.
///
/// Names may contain ASCII letters, digits, spaces, underscores, and
/// dashes, and must contain at least one non-whitespace character.
///
/// # Errors
///
/// Returns [`WalletNameError::Empty`] for blank names and
/// [`WalletNameError::InvalidFormat`] for disallowed characters.
pub fn validate_name(name: &str) -> Result<(), WalletNameError> {
    if name.trim().is_empty() {
        return Err(WalletNameError::Empty);
    }
    if !name.chars().all(is_allowed_char) {
        return Err(WalletNameError::InvalidFormat);
    }
    Ok(())
}

const fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-') || c.is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Main Wallet")]
    #[case("savings")]
    #[case("wallet_1")]
    #[case("emergency-fund")]
    #[case("A")]
    #[case("  padded  ")]
    fn test_accepts_allowed_names(#[case] name: &str) {
        assert_eq!(validate_name(name), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_rejects_blank_names(#[case] name: &str) {
        assert_eq!(validate_name(name), Err(WalletNameError::Empty));
    }

    #[rstest]
    #[case("wallet!")]
    #[case("wallet@home")]
    #[case("café")]
    #[case("50%")]
    #[case("a/b")]
    fn test_rejects_disallowed_characters(#[case] name: &str) {
        assert_eq!(validate_name(name), Err(WalletNameError::InvalidFormat));
    }

    #[test]
    fn test_error_metadata_is_stable() {
        assert_eq!(
            WalletNameError::Empty.error_code(),
            "INVALID_WALLET_NAME_EMPTY"
        );
        assert_eq!(
            WalletNameError::Empty.reason(),
            "Wallet name cannot be empty."
        );
        assert_eq!(WalletNameError::Empty.status_code(), 400);

        assert_eq!(
            WalletNameError::InvalidFormat.error_code(),
            "INVALID_WALLET_NAME_FORMAT"
        );
        assert_eq!(
            WalletNameError::InvalidFormat.to_string(),
            "Invalid wallet name format."
        );
        assert_eq!(WalletNameError::InvalidFormat.status_code(), 400);
    }
}
