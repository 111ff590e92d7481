//! A pure-Rust implementation of group operations on secp256k1.

pub(crate) mod affine;
pub(crate) mod field;
mod mul;
pub(crate) mod projective;
pub(crate) mod scalar;
pub(crate) mod util;

pub use self::{
    affine::{
        AffinePoint, COMPRESSED_POINT_SIZE, SEC1_UNCOMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE,
    },
    projective::ProjectivePoint,
    scalar::Scalar,
};

#[cfg(feature = "expose-field")]
pub use self::field::FieldElement;

#[cfg(not(feature = "expose-field"))]
pub(crate) use self::field::FieldElement;

/// b = 7 in the curve equation y² = x³ + 7.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u64(7);

/// 3b, as used by the complete addition formulas.
pub(crate) const CURVE_EQUATION_B3: FieldElement = FieldElement::from_u64(21);
