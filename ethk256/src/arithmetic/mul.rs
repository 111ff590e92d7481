//! Constant-time scalar multiplication.
//!
//! Fixed-window (radix 16) signed-digit multiplication: 64 rounds of four
//! doublings and one table addition, independent of the scalar's value.

use crate::arithmetic::{ProjectivePoint, Scalar};
use core::ops::{Mul, MulAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Lookup table containing precomputed values `[p, 2p, 3p, ..., 8p]`
struct LookupTable([ProjectivePoint; 8]);

impl From<&ProjectivePoint> for LookupTable {
    fn from(p: &ProjectivePoint) -> Self {
        let mut points = [*p; 8];
        for j in 0..7 {
            points[j + 1] = p + &points[j];
        }
        LookupTable(points)
    }
}

impl LookupTable {
    /// Given -8 <= x <= 8, returns x * p in constant time.
    fn select(&self, x: i8) -> ProjectivePoint {
        debug_assert!(x >= -8);
        debug_assert!(x <= 8);

        // Compute xabs = |x|
        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        // Every entry is touched regardless of x
        let mut t = ProjectivePoint::IDENTITY;
        for j in 1..9 {
            let c = (xabs as u8).ct_eq(&(j as u8));
            t.conditional_assign(&self.0[j - 1], c);
        }

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_assign(&-t, neg_mask);

        t
    }
}

/// Returns `[a_0, ..., a_64]` such that `sum(a_j * 2^(j * 4)) == x`,
/// and `-8 <= a_j <= 7`.
fn to_radix_16(x: &Scalar) -> [i8; 65] {
    // `x` can have up to 256 bits, so we need an additional byte to store the carry.
    let mut output = [0i8; 65];

    // Convert from radix 256 (bytes) to radix 16 (nibbles)
    let bytes = x.to_bytes();
    for i in 0..32 {
        output[2 * i] = (bytes[31 - i] & 0xf) as i8;
        output[2 * i + 1] = ((bytes[31 - i] >> 4) & 0xf) as i8;
    }

    // Recenter coefficients from [0,16) to [-8,8)
    for i in 0..64 {
        let carry = (output[i] + 8) >> 4;
        output[i] -= carry << 4;
        output[i + 1] += carry;
    }

    output
}

fn mul_windowed(x: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let scalar_digits = to_radix_16(k);
    let lookup_table = LookupTable::from(x);
    let mut acc = lookup_table.select(scalar_digits[64]);
    for i in (0..64).rev() {
        for _j in 0..4 {
            acc = acc.double();
        }
        acc += &lookup_table.select(scalar_digits[i]);
    }
    acc
}

impl ProjectivePoint {
    /// Computes `k * G`.
    pub fn mul_by_generator(k: &Scalar) -> ProjectivePoint {
        mul_windowed(&ProjectivePoint::GENERATOR, k)
    }

    /// Computes `a * G + b * self`.
    ///
    /// Used only with public scalars during verification and recovery.
    pub fn lincomb_with_generator(&self, a: &Scalar, b: &Scalar) -> ProjectivePoint {
        Self::mul_by_generator(a) + &mul_windowed(self, b)
    }
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: Scalar) -> ProjectivePoint {
        mul_windowed(&self, &other)
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        mul_windowed(self, other)
    }
}

impl Mul<&Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        mul_windowed(&self, other)
    }
}

impl MulAssign<Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = mul_windowed(self, &rhs);
    }
}

impl MulAssign<&Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = mul_windowed(self, rhs);
    }
}
