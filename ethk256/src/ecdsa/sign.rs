//! ECDSA signing key

use super::{rfc6979::NonceGenerator, RecoverableSignature, RecoveryId, Signature, VerifyingKey};
use crate::{
    arithmetic::{ProjectivePoint, Scalar},
    keccak::keccak256,
    Error, FieldBytes, Result,
};
use core::fmt::{self, Debug};

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// ECDSA/secp256k1 signing key (i.e. secret key).
///
/// The secret scalar is always in `[1, n - 1]`. Signing is deterministic:
/// nonces are derived per RFC 6979 and every signature is normalized to
/// low-s form.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar value
    secret_scalar: Scalar,

    /// Verifying key which corresponds to this signing key
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a cryptographically random [`SigningKey`].
    #[cfg(feature = "rand_core")]
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let scalar = Scalar::random(rng);
            if let Ok(signing_key) = Self::from_scalar(scalar) {
                return signing_key;
            }
        }
    }

    /// Parse a raw 32-byte big-endian secret key.
    ///
    /// Zero and values `>= n` fail with [`Error::OutOfRange`].
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::from_scalar(Scalar::try_from_bytes(bytes)?)
    }

    /// Parse a raw secret key from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &FieldBytes = bytes.try_into().map_err(|_| {
            debug!(len = bytes.len(), "secret key has wrong length");
            Error::InvalidEncoding
        })?;
        Self::from_bytes(bytes)
    }

    fn from_scalar(secret_scalar: Scalar) -> Result<Self> {
        if bool::from(secret_scalar.is_zero()) {
            return Err(Error::OutOfRange);
        }

        let public = ProjectivePoint::mul_by_generator(&secret_scalar).to_affine();
        let verifying_key = VerifyingKey::from_affine(public)?;

        Ok(Self {
            secret_scalar,
            verifying_key,
        })
    }

    /// Serialize this [`SigningKey`] as 32 big-endian bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_scalar.to_bytes()
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign a 32-byte message digest, returning a low-s signature and the
    /// id needed to recover the verifying key from it.
    pub fn sign_prehash(&self, digest: &FieldBytes) -> (Signature, RecoveryId) {
        let z = Scalar::from_bytes_reduced(digest);
        let mut nonces = NonceGenerator::new(&self.secret_scalar, digest);

        loop {
            let k = nonces.next_nonce();
            if let Some(signed) = self.try_sign_with_nonce(&k, &z) {
                return signed;
            }

            debug!("nonce produced a zero signature component, retrying");
        }
    }

    /// Sign a message, hashed with Keccak-256.
    pub fn sign_message(&self, msg: &[u8]) -> (Signature, RecoveryId) {
        self.sign_prehash(&keccak256(msg))
    }

    /// Sign a 32-byte message digest, returning a [`RecoverableSignature`].
    pub fn sign_prehash_recoverable(&self, digest: &FieldBytes) -> RecoverableSignature {
        let (signature, recovery_id) = self.sign_prehash(digest);
        RecoverableSignature::new(signature, recovery_id)
    }

    /// Sign a message hashed with Keccak-256, returning a
    /// [`RecoverableSignature`].
    pub fn sign_message_recoverable(&self, msg: &[u8]) -> RecoverableSignature {
        self.sign_prehash_recoverable(&keccak256(msg))
    }

    /// One signing attempt with nonce `k`. Returns `None` if `r` or `s` is
    /// zero.
    #[allow(non_snake_case)]
    fn try_sign_with_nonce(&self, k: &Scalar, z: &Scalar) -> Option<(Signature, RecoveryId)> {
        let k_inv = Option::<Scalar>::from(k.invert())?;

        // Compute 𝐑 = 𝑘×𝑮
        let R = ProjectivePoint::mul_by_generator(k).to_affine();

        // Lift x-coordinate of 𝐑 (element of base field) into a serialized big
        // integer, then reduce it into an element of the scalar field
        let x = R.x();
        let r = Scalar::from_bytes_reduced(&x);
        let is_x_reduced = bool::from(Scalar::from_bytes(&x).is_none());

        // Compute `s` as a signature over `r` and `z`.
        let s = k_inv * &(*z + &(r * &self.secret_scalar));

        let signature = Signature::from_scalars(r, s).ok()?;
        let recovery_id = RecoveryId::new(bool::from(R.y_is_odd()), is_x_reduced);

        Some(match signature.normalize_s() {
            Some(normalized) => (normalized, recovery_id.flip_y()),
            None => (signature, recovery_id),
        })
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Eq for SigningKey {}

impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        use subtle::ConstantTimeEq;
        self.secret_scalar.ct_eq(&other.secret_scalar).into()
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}
