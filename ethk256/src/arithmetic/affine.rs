//! Affine points

#![allow(clippy::op_ref)]

use super::{FieldElement, ProjectivePoint, Scalar, CURVE_EQUATION_B};
use crate::{Error, FieldBytes, Result};
use core::ops::{Mul, Neg};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Size of a compressed point: `0x02`/`0x03` tag followed by x.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of an uncompressed point without a tag: `x || y`.
pub const UNCOMPRESSED_POINT_SIZE: usize = 64;

/// Size of a SEC1 uncompressed point: `0x04 || x || y`.
pub const SEC1_UNCOMPRESSED_POINT_SIZE: usize = 65;

const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// secp256k1 curve point expressed in affine coordinates.
///
/// Non-identity values produced by this crate always satisfy the curve
/// equation `y² = x³ + 7`.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// x-coordinate
    pub(crate) x: FieldElement,

    /// y-coordinate
    pub(crate) y: FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead to permit `const`
    /// constructors for `IDENTITY` and `GENERATOR`.
    pub(super) infinity: u8,
}

impl AffinePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of secp256k1.
    ///
    /// ```text
    /// Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    pub const GENERATOR: Self = Self {
        x: FieldElement::from_bytes_unchecked(&[
            0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
            0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b,
            0x16, 0xf8, 0x17, 0x98,
        ]),
        y: FieldElement::from_bytes_unchecked(&[
            0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11,
            0x08, 0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f,
            0xfb, 0x10, 0xd4, 0xb8,
        ]),
        infinity: 0,
    };

    /// Create a new [`AffinePoint`] with the given coordinates.
    pub(crate) const fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y, infinity: 0 }
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Big-endian encoding of the x-coordinate.
    pub fn x(&self) -> FieldBytes {
        self.x.to_bytes()
    }

    /// Big-endian encoding of the y-coordinate.
    pub fn y(&self) -> FieldBytes {
        self.y.to_bytes()
    }

    /// Is the y-coordinate odd?
    pub fn y_is_odd(&self) -> Choice {
        self.y.is_odd()
    }

    /// Does this point satisfy `y² = x³ + 7`? The identity is considered on
    /// the curve.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = self.x.square() * &self.x + &CURVE_EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }

    /// Recovers the point with the given x-coordinate and y parity.
    ///
    /// Returns none if `x >= p` or if `x³ + 7` has no square root.
    pub fn decompress(x_bytes: &FieldBytes, y_is_odd: Choice) -> CtOption<Self> {
        FieldElement::from_bytes(x_bytes).and_then(|x| Self::decompress_x(x, y_is_odd))
    }

    pub(crate) fn decompress_x(x: FieldElement, y_is_odd: Choice) -> CtOption<Self> {
        let alpha = (x.square() * &x) + &CURVE_EQUATION_B;
        alpha.sqrt().map(|beta| {
            let y = FieldElement::conditional_select(
                &beta.negate(),
                &beta,
                beta.is_odd().ct_eq(&y_is_odd),
            );
            Self::new(x, y)
        })
    }

    /// Parses a 64-byte `x || y` encoding.
    pub fn from_uncompressed_bytes(bytes: &[u8; UNCOMPRESSED_POINT_SIZE]) -> Result<Self> {
        let (x_bytes, y_bytes) = bytes.split_at(32);
        let x = FieldElement::try_from_bytes(&field_bytes(x_bytes)?)?;
        let y = FieldElement::try_from_bytes(&field_bytes(y_bytes)?)?;

        let point = Self::new(x, y);
        if bool::from(point.is_on_curve()) {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }

    /// Serializes as 64-byte `x || y`. The identity has no such encoding.
    pub fn to_uncompressed_bytes(&self) -> Result<[u8; UNCOMPRESSED_POINT_SIZE]> {
        if bool::from(self.is_identity()) {
            return Err(Error::InvalidEncoding);
        }

        let mut out = [0u8; UNCOMPRESSED_POINT_SIZE];
        out[..32].copy_from_slice(&self.x.to_bytes());
        out[32..].copy_from_slice(&self.y.to_bytes());
        Ok(out)
    }

    /// Parses a 33-byte compressed encoding: `0x02` (even y) or `0x03` (odd y)
    /// followed by x.
    pub fn from_compressed_bytes(bytes: &[u8; COMPRESSED_POINT_SIZE]) -> Result<Self> {
        let y_is_odd = match bytes[0] {
            TAG_EVEN => Choice::from(0),
            TAG_ODD => Choice::from(1),
            _ => return Err(Error::InvalidEncoding),
        };

        let x = FieldElement::try_from_bytes(&field_bytes(&bytes[1..])?)?;
        Option::from(Self::decompress_x(x, y_is_odd)).ok_or(Error::PointNotOnCurve)
    }

    /// Serializes as 33-byte compressed form. The identity has no such encoding.
    pub fn to_compressed_bytes(&self) -> Result<[u8; COMPRESSED_POINT_SIZE]> {
        if bool::from(self.is_identity()) {
            return Err(Error::InvalidEncoding);
        }

        let mut out = [0u8; COMPRESSED_POINT_SIZE];
        out[0] = TAG_EVEN | self.y.is_odd().unwrap_u8();
        out[1..].copy_from_slice(&self.x.to_bytes());
        Ok(out)
    }

    /// Parses a point from any of the supported encodings, dispatching on length:
    /// 33-byte compressed, 64-byte `x || y` or 65-byte SEC1 `0x04 || x || y`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            COMPRESSED_POINT_SIZE => {
                Self::from_compressed_bytes(bytes.try_into().map_err(|_| Error::InvalidEncoding)?)
            }
            UNCOMPRESSED_POINT_SIZE => {
                Self::from_uncompressed_bytes(bytes.try_into().map_err(|_| Error::InvalidEncoding)?)
            }
            SEC1_UNCOMPRESSED_POINT_SIZE if bytes[0] == TAG_UNCOMPRESSED => {
                Self::from_uncompressed_bytes(
                    bytes[1..].try_into().map_err(|_| Error::InvalidEncoding)?,
                )
            }
            _ => Err(Error::InvalidEncoding),
        }
    }
}

fn field_bytes(slice: &[u8]) -> Result<FieldBytes> {
    slice.try_into().map_err(|_| Error::InvalidEncoding)
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &AffinePoint, b: &AffinePoint, choice: Choice) -> AffinePoint {
        AffinePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

impl Mul<Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: Scalar) -> ProjectivePoint {
        ProjectivePoint::from(self) * scalar
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        ProjectivePoint::from(self) * scalar
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> Self::Output {
        AffinePoint {
            x: self.x,
            y: self.y.negate(),
            infinity: self.infinity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AffinePoint;
    use crate::Error;
    use hex_literal::hex;
    use subtle::Choice;

    const UNCOMPRESSED_BASEPOINT: [u8; 64] = hex!(
        "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    );
    const SEC1_BASEPOINT: [u8; 65] = hex!(
        "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    );
    const COMPRESSED_BASEPOINT: [u8; 33] =
        hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

    #[test]
    fn generator_is_on_curve() {
        assert!(bool::from(AffinePoint::GENERATOR.is_on_curve()));
        assert!(bool::from(AffinePoint::IDENTITY.is_on_curve()));
    }

    #[test]
    fn uncompressed_round_trip() {
        let point = AffinePoint::from_uncompressed_bytes(&UNCOMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point, AffinePoint::GENERATOR);
        assert_eq!(point.to_uncompressed_bytes().unwrap(), UNCOMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_round_trip() {
        let point = AffinePoint::from_compressed_bytes(&COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point, AffinePoint::GENERATOR);
        assert_eq!(point.to_compressed_bytes().unwrap(), COMPRESSED_BASEPOINT);
    }

    #[test]
    fn uncompressed_to_compressed() {
        let res = AffinePoint::from_uncompressed_bytes(&UNCOMPRESSED_BASEPOINT)
            .unwrap()
            .to_compressed_bytes()
            .unwrap();

        assert_eq!(res, COMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_to_uncompressed() {
        let res = AffinePoint::from_compressed_bytes(&COMPRESSED_BASEPOINT)
            .unwrap()
            .to_uncompressed_bytes()
            .unwrap();

        assert_eq!(res, UNCOMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_odd_y() {
        let negated = -AffinePoint::GENERATOR;
        let encoded = negated.to_compressed_bytes().unwrap();
        assert_eq!(encoded[0], 0x03);
        assert_eq!(AffinePoint::from_compressed_bytes(&encoded), Ok(negated));
    }

    #[test]
    fn from_slice_lengths() {
        assert_eq!(
            AffinePoint::from_slice(&COMPRESSED_BASEPOINT),
            Ok(AffinePoint::GENERATOR)
        );
        assert_eq!(
            AffinePoint::from_slice(&UNCOMPRESSED_BASEPOINT),
            Ok(AffinePoint::GENERATOR)
        );
        assert_eq!(
            AffinePoint::from_slice(&SEC1_BASEPOINT),
            Ok(AffinePoint::GENERATOR)
        );

        let mut bad_tag = SEC1_BASEPOINT;
        bad_tag[0] = 0x05;
        assert_eq!(AffinePoint::from_slice(&bad_tag), Err(Error::InvalidEncoding));
        assert_eq!(
            AffinePoint::from_slice(&SEC1_BASEPOINT[..40]),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(AffinePoint::from_slice(&[]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_bad_tag() {
        let mut bytes = COMPRESSED_BASEPOINT;
        bytes[0] = 0x04;
        assert_eq!(
            AffinePoint::from_compressed_bytes(&bytes),
            Err(Error::InvalidEncoding)
        );
    }

    #[test]
    fn rejects_x_out_of_range() {
        let mut bytes = [0xffu8; 33];
        bytes[0] = 0x02;
        assert_eq!(
            AffinePoint::from_compressed_bytes(&bytes),
            Err(Error::OutOfRange)
        );

        let mut bytes = UNCOMPRESSED_BASEPOINT;
        bytes[32..].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            AffinePoint::from_uncompressed_bytes(&bytes),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn rejects_off_curve() {
        // 0³ + 7 is not a square
        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        assert_eq!(
            AffinePoint::from_compressed_bytes(&compressed),
            Err(Error::PointNotOnCurve)
        );
        assert!(bool::from(
            AffinePoint::decompress(&[0u8; 32], Choice::from(0)).is_none()
        ));

        let mut bytes = UNCOMPRESSED_BASEPOINT;
        bytes[63] ^= 1;
        assert_eq!(
            AffinePoint::from_uncompressed_bytes(&bytes),
            Err(Error::PointNotOnCurve)
        );
    }

    #[test]
    fn decompress_parity() {
        let x = AffinePoint::GENERATOR.x();
        let even = AffinePoint::decompress(&x, Choice::from(0)).unwrap();
        let odd = AffinePoint::decompress(&x, Choice::from(1)).unwrap();
        assert_eq!(even, AffinePoint::GENERATOR);
        assert_eq!(odd, -AffinePoint::GENERATOR);
    }

    #[test]
    fn affine_negation() {
        let basepoint = AffinePoint::GENERATOR;
        assert_eq!((-(-basepoint)), basepoint);
        assert!(bool::from((-basepoint).is_on_curve()));
    }

    #[test]
    fn identity_encoding() {
        assert_eq!(
            AffinePoint::IDENTITY.to_uncompressed_bytes(),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(
            AffinePoint::IDENTITY.to_compressed_bytes(),
            Err(Error::InvalidEncoding)
        );
    }
}
