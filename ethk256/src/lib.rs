#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Logging
//!
//! With the `tracing` feature enabled, rejected inputs and signing retries are
//! reported as `DEBUG` events. Secret values are never logged.

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

pub mod arithmetic;
pub mod ecdsa;
pub mod keccak;

mod error;

#[cfg(any(feature = "test-vectors", test))]
pub mod test_vectors;

pub use crate::{
    arithmetic::{AffinePoint, ProjectivePoint, Scalar},
    ecdsa::{recover_public_key, sign, verify},
    error::{Error, Result},
    keccak::keccak256,
};

#[cfg(feature = "expose-field")]
pub use arithmetic::FieldElement;

#[cfg(feature = "rand_core")]
pub use rand_core;

pub use subtle;

#[cfg(feature = "zeroize")]
pub use zeroize;

/// Big-endian encoding of a field element or scalar: 32 bytes.
pub type FieldBytes = [u8; 32];

/// Order of the secp256k1 group, `n`, big endian.
pub const ORDER: FieldBytes = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Prime modulus of the secp256k1 base field, `p`, big endian.
pub const FIELD_MODULUS: FieldBytes = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

#[cfg(test)]
mod tests {
    use super::{FieldBytes, Scalar, FIELD_MODULUS, ORDER};
    use crate::arithmetic::FieldElement;

    #[test]
    fn moduli_are_out_of_range() {
        assert!(bool::from(Scalar::from_bytes(&ORDER).is_none()));
        assert_eq!(Scalar::from_bytes_reduced(&ORDER), Scalar::ZERO);
        assert!(bool::from(FieldElement::from_bytes(&FIELD_MODULUS).is_none()));

        let mut n_minus_one: FieldBytes = ORDER;
        n_minus_one[31] -= 1;
        assert_eq!(Scalar::from_bytes(&n_minus_one).unwrap(), -Scalar::ONE);
    }
}
