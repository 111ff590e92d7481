//! Ethereum-style "recoverable signatures".
//!
//! These signatures carry an additional [`RecoveryId`] which allows the
//! [`VerifyingKey`] that produced them to be reconstructed from the
//! signature and the message alone.
//!
//! On the wire the id travels as `v = recovery_id + 27`, following the
//! Ethereum convention.

use super::{Signature, VerifyingKey, SIGNATURE_SIZE};
use crate::{keccak::keccak256, Error, FieldBytes, Result};

/// Size of an Ethereum-style recoverable signature in bytes
pub const RECOVERABLE_SIGNATURE_SIZE: usize = 65;

/// Offset added to the recovery id to form the Ethereum `v` byte.
pub const ETHEREUM_V_OFFSET: u8 = 27;

/// Recovery IDs, a.k.a. "recid".
///
/// This is an integer value `0`, `1`, `2`, or `3` included along with a
/// signature which is used during the recovery process to select the correct
/// public key from the signature.
///
/// It consists of two bits of information:
///
/// - low bit (0/1): was the y-coordinate of the affine point resulting from
///   the fixed-base multiplication 𝑘×𝑮 odd? This part of the algorithm
///   functions similar to point decompression.
/// - hi bit (2/3): did the affine x-coordinate of 𝑘×𝑮 overflow the order of
///   the scalar field, requiring a reduction when computing `r`?
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Maximum supported value for the recovery ID (inclusive).
    pub const MAX: u8 = 3;

    /// Create a new [`RecoveryId`] from the following 1-bit arguments:
    ///
    /// - `is_y_odd`: is the affine y-coordinate of 𝑘×𝑮 odd?
    /// - `is_x_reduced`: did the affine x-coordinate of 𝑘×𝑮 overflow the curve order?
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self(((is_x_reduced as u8) << 1) | (is_y_odd as u8))
    }

    /// Did the affine x-coordinate of 𝑘×𝑮 overflow the curve order?
    pub const fn is_x_reduced(self) -> bool {
        (self.0 & 0b10) != 0
    }

    /// Is the affine y-coordinate of 𝑘×𝑮 odd?
    pub const fn is_y_odd(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Convert a `u8` into a [`RecoveryId`].
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte <= Self::MAX {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// Convert this [`RecoveryId`] into a `u8`.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Parse an Ethereum `v` value (`27..=30`).
    pub fn from_eth_v(v: u8) -> Result<Self> {
        v.checked_sub(ETHEREUM_V_OFFSET)
            .and_then(Self::from_byte)
            .ok_or(Error::InvalidSignature)
    }

    /// The Ethereum `v` value: this id plus 27.
    pub const fn to_eth_v(self) -> u8 {
        self.0 + ETHEREUM_V_OFFSET
    }

    /// Flips the y-parity bit, as needed when `s` is negated.
    pub(crate) const fn flip_y(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::InvalidSignature)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

/// [`Signature`] paired with the [`RecoveryId`] that selects its signer.
///
/// Serialized as 65 bytes:
///
/// - `r`: 32-byte integer, big endian
/// - `s`: 32-byte integer, big endian
/// - `v`: recovery id plus 27
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Pairs a signature with a recovery id.
    ///
    /// This is an "unchecked" conversion and assumes the provided id is
    /// valid for this signature.
    pub const fn new(signature: Signature, recovery_id: RecoveryId) -> Self {
        Self {
            signature,
            recovery_id,
        }
    }

    /// The `(r, s)` part.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The recovery id.
    pub const fn recovery_id(&self) -> RecoveryId {
        self.recovery_id
    }

    /// Parses `r || s || v` where `v` is in `27..=30`.
    pub fn from_bytes(bytes: &[u8; RECOVERABLE_SIGNATURE_SIZE]) -> Result<Self> {
        let recovery_id = RecoveryId::from_eth_v(bytes[SIGNATURE_SIZE])?;
        let signature = Signature::from_slice(&bytes[..SIGNATURE_SIZE])?;
        Ok(Self::new(signature, recovery_id))
    }

    /// Parses `r || s || v` from a slice, which must be exactly 65 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; RECOVERABLE_SIGNATURE_SIZE] = bytes.try_into().map_err(|_| {
            debug!(len = bytes.len(), "recoverable signature has wrong length");
            Error::InvalidEncoding
        })?;
        Self::from_bytes(bytes)
    }

    /// Serializes as `r || s || v` with `v = recovery_id + 27`.
    pub fn to_bytes(&self) -> [u8; RECOVERABLE_SIGNATURE_SIZE] {
        let mut out = [0u8; RECOVERABLE_SIGNATURE_SIZE];
        out[..SIGNATURE_SIZE].copy_from_slice(&self.signature.to_bytes());
        out[SIGNATURE_SIZE] = self.recovery_id.to_eth_v();
        out
    }

    /// Recovers the signer's key from a 32-byte message digest.
    pub fn recover_from_prehash(&self, digest: &FieldBytes) -> Result<VerifyingKey> {
        VerifyingKey::recover_from_prehash(digest, &self.signature, self.recovery_id)
    }

    /// Recovers the signer's key from a message, hashed with Keccak-256.
    pub fn recover_from_message(&self, msg: &[u8]) -> Result<VerifyingKey> {
        self.recover_from_prehash(&keccak256(msg))
    }

    /// Given a public key, message digest, and signature, use trial recovery
    /// to determine if a suitable recovery ID exists, or return an error
    /// otherwise.
    ///
    /// A high-s signature is normalized first, so the result always carries
    /// the low-s form.
    pub fn trial_recovery_from_prehash(
        verifying_key: &VerifyingKey,
        digest: &FieldBytes,
        signature: &Signature,
    ) -> Result<Self> {
        let signature = signature.normalize_s().unwrap_or(*signature);

        for is_x_reduced in [false, true] {
            for is_y_odd in [false, true] {
                let recovery_id = RecoveryId::new(is_y_odd, is_x_reduced);
                let recovered = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id);

                if recovered.as_ref() == Ok(verifying_key) {
                    return Ok(Self::new(signature, recovery_id));
                }
            }
        }

        Err(Error::InvalidSignature)
    }

    /// [`RecoverableSignature::trial_recovery_from_prehash`] over a message
    /// hashed with Keccak-256.
    pub fn trial_recovery_from_message(
        verifying_key: &VerifyingKey,
        msg: &[u8],
        signature: &Signature,
    ) -> Result<Self> {
        Self::trial_recovery_from_prehash(verifying_key, &keccak256(msg), signature)
    }
}

impl From<RecoverableSignature> for Signature {
    fn from(signature: RecoverableSignature) -> Signature {
        signature.signature
    }
}

impl TryFrom<&[u8]> for RecoverableSignature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{RecoverableSignature, RecoveryId};
    use crate::{
        ecdsa::{Signature, VerifyingKey},
        test_vectors::ecdsa::{KNOWN_ANSWER, RECOVERY_TEST_VECTORS},
        Error,
    };

    #[test]
    fn new() {
        assert_eq!(RecoveryId::new(false, false).to_byte(), 0);
        assert_eq!(RecoveryId::new(true, false).to_byte(), 1);
        assert_eq!(RecoveryId::new(false, true).to_byte(), 2);
        assert_eq!(RecoveryId::new(true, true).to_byte(), 3);
    }

    #[test]
    fn try_from() {
        for n in 0u8..=3 {
            assert_eq!(RecoveryId::try_from(n).unwrap().to_byte(), n);
        }

        for n in 4u8..=255 {
            assert_eq!(RecoveryId::try_from(n), Err(Error::InvalidSignature));
        }
    }

    #[test]
    fn is_x_reduced() {
        assert!(!RecoveryId::try_from(0).unwrap().is_x_reduced());
        assert!(!RecoveryId::try_from(1).unwrap().is_x_reduced());
        assert!(RecoveryId::try_from(2).unwrap().is_x_reduced());
        assert!(RecoveryId::try_from(3).unwrap().is_x_reduced());
    }

    #[test]
    fn is_y_odd() {
        assert!(!RecoveryId::try_from(0).unwrap().is_y_odd());
        assert!(RecoveryId::try_from(1).unwrap().is_y_odd());
        assert!(!RecoveryId::try_from(2).unwrap().is_y_odd());
        assert!(RecoveryId::try_from(3).unwrap().is_y_odd());
    }

    #[test]
    fn eth_v_offset() {
        for v in 27u8..=30 {
            let id = RecoveryId::from_eth_v(v).unwrap();
            assert_eq!(id.to_byte(), v - 27);
            assert_eq!(id.to_eth_v(), v);
        }

        for v in [0u8, 1, 26, 31, 37, 38] {
            assert_eq!(RecoveryId::from_eth_v(v), Err(Error::InvalidSignature));
        }
    }

    #[test]
    fn bytes_round_trip() {
        let signature = Signature::from_components(&KNOWN_ANSWER.r, &KNOWN_ANSWER.s).unwrap();
        let recovery_id = RecoveryId::try_from(KNOWN_ANSWER.recovery_id).unwrap();
        let recoverable = RecoverableSignature::new(signature, recovery_id);

        let bytes = recoverable.to_bytes();
        assert_eq!(bytes[64], KNOWN_ANSWER.recovery_id + 27);
        assert_eq!(RecoverableSignature::from_bytes(&bytes), Ok(recoverable));
        assert_eq!(RecoverableSignature::try_from(&bytes[..]), Ok(recoverable));
        assert_eq!(
            RecoverableSignature::from_slice(&bytes[..64]),
            Err(Error::InvalidEncoding)
        );

        let mut raw_id = bytes;
        raw_id[64] = KNOWN_ANSWER.recovery_id;
        assert_eq!(
            RecoverableSignature::from_bytes(&raw_id),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn trial_recovery() {
        for vector in RECOVERY_TEST_VECTORS {
            let verifying_key = VerifyingKey::from_sec1_bytes(&vector.public_key).unwrap();
            let signature = Signature::from_components(&vector.r, &vector.s).unwrap();

            let recoverable = RecoverableSignature::trial_recovery_from_prehash(
                &verifying_key,
                &vector.digest,
                &signature,
            )
            .unwrap();

            assert_eq!(recoverable.recovery_id().to_byte(), vector.recovery_id);
            assert_eq!(
                recoverable.recover_from_prehash(&vector.digest),
                Ok(verifying_key)
            );
        }
    }

    #[test]
    fn trial_recovery_normalizes_high_s() {
        let vector = &RECOVERY_TEST_VECTORS[0];
        let verifying_key = VerifyingKey::from_sec1_bytes(&vector.public_key).unwrap();
        let signature = Signature::from_components(&vector.r, &vector.s).unwrap();
        let high_s = Signature::from_scalars(signature.r(), -signature.s()).unwrap();
        assert!(!high_s.is_low_s());

        let recoverable =
            RecoverableSignature::trial_recovery_from_prehash(&verifying_key, &vector.digest, &high_s)
                .unwrap();
        assert_eq!(recoverable.signature(), &signature);
        assert_eq!(recoverable.recovery_id().to_byte(), vector.recovery_id);
    }

    #[test]
    fn trial_recovery_wrong_key() {
        let vector = &RECOVERY_TEST_VECTORS[0];
        let other_key = VerifyingKey::from_sec1_bytes(&RECOVERY_TEST_VECTORS[1].public_key).unwrap();
        let signature = Signature::from_components(&vector.r, &vector.s).unwrap();

        assert_eq!(
            RecoverableSignature::trial_recovery_from_prehash(&other_key, &vector.digest, &signature),
            Err(Error::InvalidSignature)
        );
    }
}
