use thiserror::Error;

/// Errors raised while building key material or generating a vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required request field (`op` or `secretKey`) is absent or empty.
    #[error("missing required parameters: {0}")]
    MissingParameter(&'static str),

    /// A field could not be decoded as hex.
    #[error("{field} is not valid hex: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    /// `op` or `secretKey` did not decode to 16 bytes.
    #[error("{field} must be 16 bytes (32 hex chars), got {len} bytes")]
    InvalidKeyLength { field: &'static str, len: usize },

    /// `sqn`, `rand` or `autn` did not decode to its fixed size.
    #[error("{field} must be {expected} bytes, got {len} bytes")]
    InvalidInputLength {
        field: &'static str,
        expected: usize,
        len: usize,
    },

    /// The MAC-A carried in an AUTN does not match the recomputed one.
    #[error("AUTN MAC-A verification failed")]
    MacMismatch,

    /// The cipher or keyed-hash backend failed.
    #[error("crypto backend error: {0}")]
    Crypto(String),
}

impl Error {
    /// True when the failure was caused by the caller's input rather than by
    /// the crate itself. Transports map these to a 400-style response.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::Crypto(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classes() {
        assert!(Error::MissingParameter("op").is_validation());
        assert!(Error::InvalidKeyLength { field: "op", len: 2 }.is_validation());
        assert!(Error::MacMismatch.is_validation());
        assert!(!Error::Crypto("boom".into()).is_validation());
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = Error::InvalidInputLength {
            field: "sqn",
            expected: 6,
            len: 3,
        };
        assert_eq!(err.to_string(), "sqn must be 6 bytes, got 3 bytes");

        let err = Error::InvalidKeyLength {
            field: "secretKey",
            len: 2,
        };
        assert!(err.to_string().starts_with("secretKey must be 16 bytes"));
    }
}
