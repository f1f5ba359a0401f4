//! Error types.

use core::fmt;

/// Result type with the `seed-ca` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classes of failure.
///
/// Rejected nonce candidates never surface here: they are retried inside the
/// signing loop.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The caller passed a value outside the documented domain of an
    /// operation. Indicates a programming defect, never normal operation.
    ContractViolation,

    /// The signing loop ran out of nonce candidates. Indicates a broken curve
    /// or hash implementation.
    Exhaustion,

    /// A signature could not be serialized.
    Encoding,
}

/// Errors produced by this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Integer does not fit in the requested number of octets.
    IntegerTooLarge {
        /// Bit length of the integer.
        bits: u64,
        /// Requested output length in bytes.
        len: usize,
    },

    /// Secret scalar is not in `[1, n-1]`.
    InvalidSecretScalar,

    /// Scalar was rejected by the curve backend.
    InvalidScalar,

    /// Signature component is zero.
    InvalidSignature,

    /// Key material stream ended before a scalar could be drawn from it.
    InsufficientKeyMaterial {
        /// Number of bytes required.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Seed derivation parameters were rejected by the KDF.
    #[cfg(feature = "seed")]
    InvalidSeedParams(argon2::Error),

    /// No acceptable nonce was found within the attempt bound.
    Exhausted {
        /// Number of candidates drawn.
        attempts: u32,
    },

    /// ASN.1 DER encoding failed.
    Der(der::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Exhausted { .. } => ErrorKind::Exhaustion,
            Self::Der(_) => ErrorKind::Encoding,
            _ => ErrorKind::ContractViolation,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerTooLarge { bits, len } => {
                write!(f, "{bits}-bit integer does not fit in {len} bytes")
            }
            Self::InvalidSecretScalar => f.write_str("secret scalar out of range"),
            Self::InvalidScalar => f.write_str("scalar rejected by curve backend"),
            Self::InvalidSignature => f.write_str("signature component is zero"),
            Self::InsufficientKeyMaterial { needed, available } => write!(
                f,
                "key material too short: need {needed} bytes, have {available}"
            ),
            #[cfg(feature = "seed")]
            Self::InvalidSeedParams(err) => write!(f, "invalid seed parameters: {err}"),
            Self::Exhausted { attempts } => {
                write!(f, "no valid nonce after {attempts} candidates")
            }
            Self::Der(err) => write!(f, "DER encoding error: {err}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Der(err)
    }
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}

#[cfg(feature = "seed")]
impl From<argon2::Error> for Error {
    fn from(err: argon2::Error) -> Error {
        Error::InvalidSeedParams(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            Error::IntegerTooLarge { bits: 9, len: 1 }.kind(),
            ErrorKind::ContractViolation
        );
        assert_eq!(Error::InvalidSecretScalar.kind(), ErrorKind::ContractViolation);
        assert_eq!(Error::Exhausted { attempts: 3 }.kind(), ErrorKind::Exhaustion);
    }

    #[test]
    fn display() {
        let err = Error::IntegerTooLarge { bits: 257, len: 32 };
        assert_eq!(
            alloc::format!("{err}"),
            "257-bit integer does not fit in 32 bytes"
        );
        assert_eq!(
            alloc::format!("{}", Error::InvalidSignature),
            "signature component is zero"
        );
    }
}
