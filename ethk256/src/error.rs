//! Error type

use core::fmt::{self, Display};

/// Result type with the `ethk256` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// secp256k1/ECDSA errors
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed input: wrong length, bad tag byte or bad hex.
    InvalidEncoding,

    /// Field element or scalar outside of its valid interval.
    OutOfRange,

    /// Coordinates do not satisfy `y² = x³ + 7`.
    PointNotOnCurve,

    /// Structurally invalid `r`/`s`, or the verification/recovery equation
    /// did not hold.
    InvalidSignature,

    /// Operation with no defined result, e.g. inverting zero.
    UndefinedOperation,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidEncoding => "invalid encoding",
            Error::OutOfRange => "value out of range",
            Error::PointNotOnCurve => "point not on curve",
            Error::InvalidSignature => "invalid signature",
            Error::UndefinedOperation => "undefined operation",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            std::format!("{}", Error::InvalidSignature),
            "invalid signature"
        );
        assert_eq!(
            std::format!("{}", Error::UndefinedOperation),
            "undefined operation"
        );
    }
}
