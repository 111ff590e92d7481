//! Projective points

#![allow(clippy::op_ref)]

use super::{AffinePoint, FieldElement, CURVE_EQUATION_B3};
use core::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point on the secp256k1 curve in projective coordinates.
///
/// `(X : Y : Z)` represents the affine point `(X/Z, Y/Z)`; the identity is
/// any point with `Z = 0`.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    pub(super) z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: AffinePoint::GENERATOR.x,
        y: AffinePoint::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Returns the affine representation of this point.
    ///
    /// Costs a single field inversion.
    pub fn to_affine(&self) -> AffinePoint {
        self.z
            .invert()
            .map(|zinv| AffinePoint::new(self.x * &zinv, self.y * &zinv))
            .unwrap_or(AffinePoint::IDENTITY)
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns `-self`.
    fn neg(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y.negate(),
            z: self.z,
        }
    }

    /// Returns `self + other`.
    fn add(&self, other: &ProjectivePoint) -> ProjectivePoint {
        // We implement the complete addition formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 7).

        let xx = self.x * &other.x;
        let yy = self.y * &other.y;
        let zz = self.z * &other.z;

        let xy_pairs = ((self.x + &self.y) * &(other.x + &other.y)) - &(xx + &yy);
        let yz_pairs = ((self.y + &self.z) * &(other.y + &other.z)) - &(yy + &zz);
        let xz_pairs = ((self.x + &self.z) * &(other.x + &other.z)) - &(xx + &zz);

        let bzz3 = zz * &CURVE_EQUATION_B3;

        let yy_m_bzz3 = yy - &bzz3;
        let yy_p_bzz3 = yy + &bzz3;

        let byz3 = yz_pairs * &CURVE_EQUATION_B3;

        let xx3 = xx.double() + &xx;
        let bxx9 = xx3 * &CURVE_EQUATION_B3;

        ProjectivePoint {
            x: (xy_pairs * &yy_m_bzz3) - &(byz3 * &xz_pairs),
            y: (yy_p_bzz3 * &yy_m_bzz3) + &(bxx9 * &xz_pairs),
            z: (yz_pairs * &yy_p_bzz3) + &(xx3 * &xy_pairs),
        }
    }

    /// Returns `self + other`.
    fn add_mixed(&self, other: &AffinePoint) -> ProjectivePoint {
        // We implement the complete addition formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 8).

        let xx = self.x * &other.x;
        let yy = self.y * &other.y;
        let xy_pairs = ((self.x + &self.y) * &(other.x + &other.y)) - &(xx + &yy);
        let yz_pairs = (other.y * &self.z) + &self.y;
        let xz_pairs = (other.x * &self.z) + &self.x;

        let bzz3 = self.z * &CURVE_EQUATION_B3;

        let yy_m_bzz3 = yy - &bzz3;
        let yy_p_bzz3 = yy + &bzz3;

        let byz3 = yz_pairs * &CURVE_EQUATION_B3;

        let xx3 = xx.double() + &xx;
        let bxx9 = xx3 * &CURVE_EQUATION_B3;

        let mut ret = ProjectivePoint {
            x: (xy_pairs * &yy_m_bzz3) - &(byz3 * &xz_pairs),
            y: (yy_p_bzz3 * &yy_m_bzz3) + &(bxx9 * &xz_pairs),
            z: (yz_pairs * &yy_p_bzz3) + &(xx3 * &xy_pairs),
        };
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Doubles this point.
    #[inline]
    pub fn double(&self) -> ProjectivePoint {
        // We implement the complete addition formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 9).

        let yy = self.y.square();
        let zz = self.z.square();
        let xy2 = (self.x * &self.y).double();

        let bzz3 = zz * &CURVE_EQUATION_B3;
        let bzz9 = bzz3.double() + &bzz3;

        let yy_m_bzz9 = yy - &bzz9;
        let yy_p_bzz3 = yy + &bzz3;

        let yy_zz8 = (yy * &zz).double().double().double();
        let t = yy_zz8 * &CURVE_EQUATION_B3;

        ProjectivePoint {
            x: xy2 * &yy_m_bzz9,
            y: (yy_m_bzz9 * &yy_p_bzz3) + &t,
            z: ((yy * &self.y) * &self.z).double().double().double(),
        }
    }

    /// Returns `self - other`.
    fn sub(&self, other: &ProjectivePoint) -> ProjectivePoint {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    fn sub_mixed(&self, other: &AffinePoint) -> ProjectivePoint {
        self.add_mixed(&other.neg())
    }

    /// Check whether `self` is equal to an affine point.
    ///
    /// Avoids the inversion needed to convert `self` to affine form.
    pub fn eq_affine(&self, other: &AffinePoint) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let rhs_identity = other.is_identity();
        let x_eq = (other.x * &self.z).ct_eq(&self.x);
        let y_eq = (other.y * &self.z).ct_eq(&self.y);

        both_identity | (!rhs_identity & x_eq & y_eq)
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from(*p)
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Cross-multiply by the opposing z: (x₁z₂, y₁z₂) == (x₂z₁, y₂z₁).
        //
        // The identity has the form (0, y, 0) with y ≠ 0, so two identities
        // compare equal, while identity vs. a finite point compares y₁z₂ ≠ 0
        // against 0.
        let x_eq = (self.x * &other.z).ct_eq(&(other.x * &self.z));
        let y_eq = (self.y * &other.z).ct_eq(&(other.y * &self.z));
        x_eq & y_eq
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl PartialEq<AffinePoint> for ProjectivePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.eq_affine(other).into()
    }
}

impl PartialEq<ProjectivePoint> for AffinePoint {
    fn eq(&self, other: &ProjectivePoint) -> bool {
        other.eq_affine(self).into()
    }
}

impl Eq for ProjectivePoint {}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl Add<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, other)
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, &other)
    }
}

impl Add<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(self, other)
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl AddAssign<AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, &rhs);
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl Sum for ProjectivePoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ProjectivePoint::IDENTITY, |a, b| a + b)
    }
}

impl<'a> Sum<&'a ProjectivePoint> for ProjectivePoint {
    fn sum<I: Iterator<Item = &'a ProjectivePoint>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl Sub<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(self, other)
    }
}

impl Sub<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, other)
    }
}

impl SubAssign<ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl Sub<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl Neg for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, ProjectivePoint};
    use crate::{
        arithmetic::Scalar,
        test_vectors::group::{ADD_TEST_VECTORS, MUL_TEST_VECTORS},
    };
    use proptest::prelude::*;

    #[test]
    fn affine_to_projective() {
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(
            ProjectivePoint::from(basepoint_affine),
            basepoint_projective,
        );
        assert_eq!(basepoint_projective.to_affine(), basepoint_affine);
        assert!(!bool::from(basepoint_projective.to_affine().is_identity()));

        assert!(bool::from(
            ProjectivePoint::IDENTITY.to_affine().is_identity()
        ));
        assert!(bool::from(
            ProjectivePoint::from(AffinePoint::IDENTITY).is_identity()
        ));
    }

    #[test]
    fn projective_identity_addition() {
        let identity = ProjectivePoint::IDENTITY;
        let generator = ProjectivePoint::GENERATOR;

        assert_eq!(identity + &generator, generator);
        assert_eq!(generator + &identity, generator);
        assert_eq!(identity + &identity, identity);
        assert_eq!(identity.double(), identity);
    }

    #[test]
    fn projective_mixed_addition() {
        let identity = ProjectivePoint::IDENTITY;
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(identity + &basepoint_affine, basepoint_projective);
        assert_eq!(
            basepoint_projective + &basepoint_affine,
            basepoint_projective + &basepoint_projective
        );
    }

    #[test]
    fn test_vector_repeated_add() {
        let generator = ProjectivePoint::GENERATOR;
        let mut p = generator;

        for (expected_x, expected_y) in ADD_TEST_VECTORS.iter() {
            let affine = p.to_affine();
            assert_eq!(&affine.x.to_bytes(), expected_x);
            assert_eq!(&affine.y.to_bytes(), expected_y);

            p += &generator;
        }
    }

    #[test]
    fn test_vector_repeated_add_mixed() {
        let generator = AffinePoint::GENERATOR;
        let mut p = ProjectivePoint::GENERATOR;

        for (expected_x, expected_y) in ADD_TEST_VECTORS.iter() {
            let affine = p.to_affine();
            assert_eq!(&affine.x.to_bytes(), expected_x);
            assert_eq!(&affine.y.to_bytes(), expected_y);

            p += &generator;
        }
    }

    #[test]
    fn test_vector_add_mixed_identity() {
        let generator = ProjectivePoint::GENERATOR;
        let p0 = generator + ProjectivePoint::IDENTITY;
        let p1 = generator + AffinePoint::IDENTITY;
        assert_eq!(p0, p1);
    }

    #[test]
    fn test_vector_double_generator() {
        let generator = ProjectivePoint::GENERATOR;
        let mut p = generator;

        for i in 0..2 {
            let affine = p.to_affine();

            let (expected_x, expected_y) = ADD_TEST_VECTORS[(1 << i) - 1];
            assert_eq!(affine.x.to_bytes(), expected_x);
            assert_eq!(affine.y.to_bytes(), expected_y);

            p = p.double();
        }
    }

    #[test]
    fn projective_add_vs_double() {
        let generator = ProjectivePoint::GENERATOR;

        let r1 = generator + &generator;
        let r2 = generator.double();
        assert_eq!(r1, r2);

        let r1 = (generator + &generator) + &(generator + &generator);
        let r2 = generator.double().double();
        assert_eq!(r1, r2);
    }

    #[test]
    fn projective_add_and_sub() {
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(
            (basepoint_projective + &basepoint_projective) - &basepoint_projective,
            basepoint_projective
        );
        assert_eq!(
            (basepoint_projective + &basepoint_affine) - &basepoint_affine,
            basepoint_projective
        );
        assert_eq!(
            basepoint_projective - &basepoint_projective,
            ProjectivePoint::IDENTITY
        );
    }

    #[test]
    fn projective_double_and_sub() {
        let generator = ProjectivePoint::GENERATOR;
        assert_eq!(generator.double() - &generator, generator);
    }

    #[test]
    fn test_vector_scalar_mult() {
        let generator = ProjectivePoint::GENERATOR;

        for (k, coords) in ADD_TEST_VECTORS
            .iter()
            .enumerate()
            .map(|(k, coords)| (Scalar::from(k as u64 + 1), *coords))
            .chain(
                MUL_TEST_VECTORS
                    .iter()
                    .cloned()
                    .map(|(k, x, y)| (Scalar::from_bytes(&k).unwrap(), (x, y))),
            )
        {
            let res = (generator * &k).to_affine();
            assert_eq!(res.x.to_bytes(), coords.0);
            assert_eq!(res.y.to_bytes(), coords.1);
        }
    }

    #[test]
    fn scalar_mult_edge_cases() {
        let generator = ProjectivePoint::GENERATOR;
        assert_eq!(generator * Scalar::ZERO, ProjectivePoint::IDENTITY);
        assert_eq!(generator * Scalar::ONE, generator);
        assert_eq!(
            generator * -Scalar::ONE + &generator,
            ProjectivePoint::IDENTITY
        );
        assert_eq!(ProjectivePoint::IDENTITY * Scalar::from(5u64), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn projective_equality() {
        assert_ne!(ProjectivePoint::GENERATOR, ProjectivePoint::IDENTITY);
        assert_ne!(ProjectivePoint::IDENTITY, ProjectivePoint::GENERATOR);
        assert_eq!(ProjectivePoint::IDENTITY, ProjectivePoint::IDENTITY);
        assert_eq!(-ProjectivePoint::IDENTITY, ProjectivePoint::IDENTITY);
        assert_eq!(ProjectivePoint::GENERATOR, ProjectivePoint::GENERATOR);
        assert_ne!(ProjectivePoint::GENERATOR, -ProjectivePoint::GENERATOR);

        assert_ne!(ProjectivePoint::GENERATOR, AffinePoint::IDENTITY);
        assert_ne!(ProjectivePoint::IDENTITY, AffinePoint::GENERATOR);
        assert_eq!(ProjectivePoint::IDENTITY, AffinePoint::IDENTITY);
        assert_eq!(-ProjectivePoint::IDENTITY, AffinePoint::IDENTITY);
        assert_eq!(ProjectivePoint::GENERATOR, AffinePoint::GENERATOR);
        assert_ne!(-ProjectivePoint::GENERATOR, AffinePoint::GENERATOR);
        assert_eq!(-ProjectivePoint::GENERATOR, -AffinePoint::GENERATOR);
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
            Scalar::from_bytes_reduced(&bytes)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn fuzzy_multiples_are_on_curve(k in scalar()) {
            let p = (ProjectivePoint::GENERATOR * &k).to_affine();
            prop_assert!(bool::from(p.is_on_curve()));
        }

        #[test]
        fn fuzzy_scalar_mul_distributes(a in scalar(), b in scalar()) {
            let g = ProjectivePoint::GENERATOR;
            prop_assert_eq!(g * &a + &(g * &b), g * &(a + &b));
        }

        #[test]
        fn fuzzy_double_matches_add(k in scalar()) {
            let p = ProjectivePoint::GENERATOR * &k;
            prop_assert_eq!(p.double(), p + &p);
        }
    }
}
