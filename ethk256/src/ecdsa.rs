//! Elliptic Curve Digital Signature Algorithm (ECDSA) over secp256k1 with
//! Ethereum conventions: Keccak-256 message digests, RFC 6979 nonces,
//! low-s normalization and public-key recovery.
//!
//! ## Signing/Recovery Example
//!
//! ```
//! use ethk256::ecdsa::{SigningKey, VerifyingKey};
//!
//! let signing_key = SigningKey::from_bytes(&[0x11; 32])?;
//! let message = b"ECDSA proves knowledge of a secret number in the context of a single message";
//!
//! let (signature, recovery_id) = signing_key.sign_message(message);
//! signing_key.verifying_key().verify_message(message, &signature)?;
//!
//! let recovered_key = VerifyingKey::recover_from_message(message, &signature, recovery_id)?;
//! assert_eq!(signing_key.verifying_key(), &recovered_key);
//! # Ok::<(), ethk256::Error>(())
//! ```

pub(crate) mod rfc6979;

mod recoverable;
mod sign;
mod verify;

pub use self::{
    recoverable::{RecoverableSignature, RecoveryId},
    sign::SigningKey,
    verify::VerifyingKey,
};

use crate::{arithmetic::Scalar, Error, FieldBytes, Result};

/// Size of a fixed-width `r || s` signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// ECDSA/secp256k1 signature (fixed-size).
///
/// Both components are guaranteed to lie in `[1, n - 1]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Creates a signature from its scalar components, rejecting zeros.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Result<Self> {
        if bool::from(r.is_zero() | s.is_zero()) {
            debug!("signature component is zero");
            return Err(Error::InvalidSignature);
        }

        Ok(Self { r, s })
    }

    /// Parses the big-endian `r` and `s` components.
    ///
    /// Values outside `[1, n - 1]` fail with [`Error::InvalidSignature`].
    pub fn from_components(r: &FieldBytes, s: &FieldBytes) -> Result<Self> {
        let r = Option::<Scalar>::from(Scalar::from_bytes(r)).ok_or(Error::InvalidSignature)?;
        let s = Option::<Scalar>::from(Scalar::from_bytes(s)).ok_or(Error::InvalidSignature)?;
        Self::from_scalars(r, s)
    }

    /// Parses a 64-byte `r || s` signature.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Result<Self> {
        let (r, s) = bytes.split_at(32);
        Self::from_slice_parts(r, s)
    }

    /// Parses a `r || s` signature from a slice, which must be exactly
    /// 64 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_SIZE {
            debug!(len = bytes.len(), "signature has wrong length");
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = bytes.split_at(32);
        Self::from_slice_parts(r, s)
    }

    fn from_slice_parts(r: &[u8], s: &[u8]) -> Result<Self> {
        let r: FieldBytes = r.try_into().map_err(|_| Error::InvalidEncoding)?;
        let s: FieldBytes = s.try_into().map_err(|_| Error::InvalidEncoding)?;
        Self::from_components(&r, &s)
    }

    /// Serializes as 64-byte `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// The `r` component.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// The `s` component.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Is `s` in the lower half of the scalar range?
    pub fn is_low_s(&self) -> bool {
        !bool::from(self.s.is_high())
    }

    /// Normalize signature into "low S" form as described in
    /// [BIP 0062: Dealing with Malleability][1].
    ///
    /// Returns `None` if `s` is already low.
    ///
    /// [1]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki
    pub fn normalize_s(&self) -> Option<Self> {
        if self.s.is_high().into() {
            Some(Self {
                r: self.r,
                s: -self.s,
            })
        } else {
            None
        }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_SIZE] {
    fn from(signature: Signature) -> Self {
        signature.to_bytes()
    }
}

/// Signs a 32-byte digest with a raw 32-byte private key.
///
/// Returns the low-s signature and its recovery id. The key must be in
/// `[1, n - 1]`.
pub fn sign(secret_key: &FieldBytes, digest: &FieldBytes) -> Result<(Signature, RecoveryId)> {
    Ok(SigningKey::from_bytes(secret_key)?.sign_prehash(digest))
}

/// Verifies a signature given as raw `r` and `s` over a 32-byte digest.
///
/// The public key may use any encoding accepted by
/// [`VerifyingKey::from_sec1_bytes`]. Any malformed input yields `false`.
pub fn verify(public_key: &[u8], digest: &FieldBytes, r: &FieldBytes, s: &FieldBytes) -> bool {
    let check = || -> Result<()> {
        let verifying_key = VerifyingKey::from_sec1_bytes(public_key)?;
        let signature = Signature::from_components(r, s)?;
        verifying_key.verify_prehash(digest, &signature)
    };

    check().is_ok()
}

/// Recovers the public key that produced `(r, s)` over `digest`.
///
/// `recovery_id` is the raw 2-bit id in `0..=3`; subtract 27 from an
/// Ethereum `v` first (or use [`RecoveryId::from_eth_v`]).
pub fn recover_public_key(
    digest: &FieldBytes,
    r: &FieldBytes,
    s: &FieldBytes,
    recovery_id: u8,
) -> Result<VerifyingKey> {
    let recovery_id = RecoveryId::try_from(recovery_id)?;
    let signature = Signature::from_components(r, s)?;
    VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
}
