//! ECDSA verifying key and public-key recovery.

use super::{RecoveryId, Signature};
use crate::{
    arithmetic::{
        affine::{COMPRESSED_POINT_SIZE, SEC1_UNCOMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE},
        scalar::MODULUS,
        util::{adc, u64x4_to_be_bytes},
        AffinePoint, ProjectivePoint, Scalar,
    },
    keccak::keccak256,
    Error, FieldBytes, Result,
};
use subtle::Choice;

/// ECDSA/secp256k1 verifying key (i.e. public key).
///
/// Always a valid, non-identity point on the curve.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    inner: AffinePoint,
}

impl VerifyingKey {
    /// Wraps an affine point, rejecting the identity and off-curve points.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if bool::from(point.is_identity()) {
            debug!("identity is not a valid public key");
            return Err(Error::InvalidEncoding);
        }

        if !bool::from(point.is_on_curve()) {
            return Err(Error::PointNotOnCurve);
        }

        Ok(Self { inner: point })
    }

    /// Parses a 33-byte compressed, 64-byte `x || y` or 65-byte
    /// `0x04 || x || y` public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        AffinePoint::from_slice(bytes).and_then(Self::from_affine)
    }

    /// The underlying curve point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.inner
    }

    /// Serializes as 65-byte SEC1 `0x04 || x || y`.
    pub fn to_encoded_point(&self) -> [u8; SEC1_UNCOMPRESSED_POINT_SIZE] {
        let mut out = [0u8; SEC1_UNCOMPRESSED_POINT_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.inner.x());
        out[33..].copy_from_slice(&self.inner.y());
        out
    }

    /// Serializes as 64-byte `x || y`, the form Ethereum hashes into addresses.
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_POINT_SIZE];
        out[..32].copy_from_slice(&self.inner.x());
        out[32..].copy_from_slice(&self.inner.y());
        out
    }

    /// Serializes as 33-byte compressed SEC1.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let mut out = [0u8; COMPRESSED_POINT_SIZE];
        out[0] = 0x02 | self.inner.y_is_odd().unwrap_u8();
        out[1..].copy_from_slice(&self.inner.x());
        out
    }

    /// Verifies `signature` over a 32-byte message digest.
    ///
    /// Both low-s and high-s signatures are accepted.
    #[allow(non_snake_case)]
    pub fn verify_prehash(&self, digest: &FieldBytes, signature: &Signature) -> Result<()> {
        let z = Scalar::from_bytes_reduced(digest);
        let r = signature.r();
        let s_inv =
            Option::<Scalar>::from(signature.s().invert()).ok_or(Error::InvalidSignature)?;

        let u1 = z * &s_inv;
        let u2 = r * &s_inv;

        let R = ProjectivePoint::from(self.inner).lincomb_with_generator(&u1, &u2);
        if bool::from(R.is_identity()) {
            debug!("verification produced the identity");
            return Err(Error::InvalidSignature);
        }

        if Scalar::from_bytes_reduced(&R.to_affine().x()) == r {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// Verifies `signature` over a message, hashed with Keccak-256.
    pub fn verify_message(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        self.verify_prehash(&keccak256(msg), signature)
    }

    /// Recovers the verifying key which produced `signature` over a 32-byte
    /// message digest.
    ///
    /// The recovered key is checked against the signature before it is
    /// returned.
    #[allow(non_snake_case)]
    pub fn recover_from_prehash(
        digest: &FieldBytes,
        signature: &Signature,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        let r = signature.r();
        let s = signature.s();
        let z = Scalar::from_bytes_reduced(digest);

        let x = if recovery_id.is_x_reduced() {
            r_plus_n(&r)?
        } else {
            r.to_bytes()
        };

        let R = Option::<AffinePoint>::from(AffinePoint::decompress(
            &x,
            Choice::from(recovery_id.is_y_odd() as u8),
        ))
        .ok_or(Error::InvalidSignature)?;

        let r_inv = Option::<Scalar>::from(r.invert()).ok_or(Error::InvalidSignature)?;
        let u1 = -(r_inv * &z);
        let u2 = r_inv * &s;

        let pk = ProjectivePoint::from(R).lincomb_with_generator(&u1, &u2);
        let vk = Self::from_affine(pk.to_affine()).map_err(|_| Error::InvalidSignature)?;

        vk.verify_prehash(digest, signature)?;
        Ok(vk)
    }

    /// Recovers the verifying key from a message, hashed with Keccak-256.
    pub fn recover_from_message(
        msg: &[u8],
        signature: &Signature,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        Self::recover_from_prehash(&keccak256(msg), signature, recovery_id)
    }
}

/// Lifts `r` back to the x-coordinate `r + n`, which must still fit in 256
/// bits. Values `>= p` are rejected later by decompression.
fn r_plus_n(r: &Scalar) -> Result<FieldBytes> {
    let mut limbs = [0u64; 4];
    let mut carry = 0;
    for i in 0..4 {
        (limbs[i], carry) = adc(r.0[i], MODULUS[i], carry);
    }

    if carry != 0 {
        debug!("r + n overflows 256 bits");
        return Err(Error::InvalidSignature);
    }

    Ok(u64x4_to_be_bytes(&limbs))
}

impl From<VerifyingKey> for AffinePoint {
    fn from(verifying_key: VerifyingKey) -> AffinePoint {
        verifying_key.inner
    }
}

impl From<&VerifyingKey> for ProjectivePoint {
    fn from(verifying_key: &VerifyingKey) -> ProjectivePoint {
        verifying_key.inner.into()
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes(bytes)
    }
}

impl TryFrom<AffinePoint> for VerifyingKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}

#[cfg(test)]
mod tests {
    use super::{r_plus_n, VerifyingKey};
    use crate::{
        arithmetic::{AffinePoint, ProjectivePoint, Scalar},
        ecdsa::{RecoveryId, Signature},
        test_vectors::ecdsa::{RECOVERY_TEST_VECTORS, VERIFICATION_TEST_VECTORS},
        Error,
    };
    use hex_literal::hex;

    fn public_key(x: &[u8; 32], y: &[u8; 32]) -> VerifyingKey {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(x);
        bytes[32..].copy_from_slice(y);
        VerifyingKey::from_sec1_bytes(&bytes).unwrap()
    }

    #[test]
    fn verify_vectors() {
        for vector in VERIFICATION_TEST_VECTORS {
            let vk = public_key(&vector.public_key_x, &vector.public_key_y);
            let sig = Signature::from_components(&vector.r, &vector.s).unwrap();
            assert_eq!(vk.verify_prehash(&vector.digest, &sig), Ok(()));

            let mut digest = vector.digest;
            digest[0] ^= 1;
            assert_eq!(
                vk.verify_prehash(&digest, &sig),
                Err(Error::InvalidSignature)
            );
        }
    }

    #[test]
    fn verify_accepts_high_s() {
        let vector = &VERIFICATION_TEST_VECTORS[0];
        let vk = public_key(&vector.public_key_x, &vector.public_key_y);
        let sig = Signature::from_components(&vector.r, &vector.s).unwrap();
        let flipped = Signature::from_scalars(sig.r(), -sig.s()).unwrap();
        assert_eq!(vk.verify_prehash(&vector.digest, &flipped), Ok(()));
    }

    #[test]
    fn recovery_vectors() {
        for vector in RECOVERY_TEST_VECTORS {
            let sig = Signature::from_components(&vector.r, &vector.s).unwrap();
            let recovery_id = RecoveryId::try_from(vector.recovery_id).unwrap();
            let vk = VerifyingKey::recover_from_prehash(&vector.digest, &sig, recovery_id).unwrap();
            assert_eq!(&vk.to_compressed_bytes(), &vector.public_key);
        }
    }

    #[test]
    fn recovery_with_wrong_parity_yields_other_key() {
        let vector = &RECOVERY_TEST_VECTORS[0];
        let sig = Signature::from_components(&vector.r, &vector.s).unwrap();
        let recovery_id = RecoveryId::try_from(vector.recovery_id ^ 1).unwrap();
        let vk = VerifyingKey::recover_from_prehash(&vector.digest, &sig, recovery_id).unwrap();
        assert_ne!(&vk.to_compressed_bytes(), &vector.public_key);
    }

    #[test]
    fn recovery_rejects_x_at_or_above_p() {
        // r + n == p is not a valid field element
        let r = hex!("000000000000000000000000000000014551231950b75fc4402da1722fc9baee");
        let sig = Signature::from_components(&r, &Scalar::ONE.to_bytes()).unwrap();

        for id in [2, 3] {
            assert_eq!(
                VerifyingKey::recover_from_prehash(
                    &[0x42; 32],
                    &sig,
                    RecoveryId::try_from(id).unwrap()
                ),
                Err(Error::InvalidSignature)
            );
        }
    }

    #[test]
    fn r_plus_n_overflow() {
        let big_r = Scalar::from_bytes(&hex!(
            "ce53abb3721bafc561408ce8ff99c909f7f0b18a2f788649d6470162ab1aa032"
        ))
        .unwrap();
        assert_eq!(r_plus_n(&big_r), Err(Error::InvalidSignature));

        assert_eq!(
            r_plus_n(&Scalar::from(2u64)),
            Ok(hex!(
                "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364143"
            ))
        );
    }

    #[test]
    fn rejects_identity() {
        assert_eq!(
            VerifyingKey::from_affine(AffinePoint::IDENTITY),
            Err(Error::InvalidEncoding)
        );
    }

    #[test]
    fn encodings() {
        let vk = VerifyingKey::from_affine(AffinePoint::GENERATOR).unwrap();
        let encoded = vk.to_encoded_point();
        assert_eq!(encoded[0], 0x04);
        assert_eq!(&encoded[1..], &vk.to_uncompressed_bytes()[..]);

        for bytes in [
            &encoded[..],
            &vk.to_uncompressed_bytes()[..],
            &vk.to_compressed_bytes()[..],
        ] {
            assert_eq!(VerifyingKey::try_from(bytes), Ok(vk));
        }

        assert_eq!(ProjectivePoint::from(&vk), ProjectivePoint::GENERATOR);
        assert_eq!(AffinePoint::from(vk), AffinePoint::GENERATOR);
    }
}
