//! Scalar field arithmetic modulo n = 115792089237316195423570985008687907852837564279074904382605163141518161494337

mod wide64;

pub(crate) use wide64::WideScalar;

use crate::{
    arithmetic::util::{adc, sbb, u64x4_from_be_bytes, u64x4_to_be_bytes},
    Error, FieldBytes, Result,
};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[cfg(test)]
use num_bigint::{BigUint, ToBigUint};

/// The number of 64-bit limbs used to represent a [`Scalar`].
const LIMBS: usize = 4;

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub(crate) const MODULUS: [u64; LIMBS] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// Constant representing the modulus / 2
const FRAC_MODULUS_2: [u64; LIMBS] = [
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
];

/// n - 2, the inversion exponent
const MODULUS_MINUS_TWO: [u64; LIMBS] = [MODULUS[0] - 2, MODULUS[1], MODULUS[2], MODULUS[3]];

/// Subtracts a (little-endian) multi-limb number from another multi-limb number,
/// returning the result and the resulting borrow as a single-limb value.
/// The borrow can be either `0` or `<u64>::MAX`.
#[inline(always)]
const fn sbb_array(lhs: &[u64; LIMBS], rhs: &[u64; LIMBS]) -> ([u64; LIMBS], u64) {
    let (r0, borrow) = sbb(lhs[0], rhs[0], 0);
    let (r1, borrow) = sbb(lhs[1], rhs[1], borrow);
    let (r2, borrow) = sbb(lhs[2], rhs[2], borrow);
    let (r3, borrow) = sbb(lhs[3], rhs[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Adds a (little-endian) multi-limb number to another multi-limb number,
/// returning the result and the resulting carry as a single-limb value.
/// The carry can be either `0` or `1`.
#[inline(always)]
const fn adc_array(lhs: &[u64; LIMBS], rhs: &[u64; LIMBS]) -> ([u64; LIMBS], u64) {
    let (r0, carry) = adc(lhs[0], rhs[0], 0);
    let (r1, carry) = adc(lhs[1], rhs[1], carry);
    let (r2, carry) = adc(lhs[2], rhs[2], carry);
    let (r3, carry) = adc(lhs[3], rhs[3], carry);
    ([r0, r1, r2, r3], carry)
}

/// Returns `a` if `mask == u64::MAX` and `b` if `mask == 0`.
#[inline(always)]
const fn select_by_mask(a: &[u64; LIMBS], b: &[u64; LIMBS], mask: u64) -> [u64; LIMBS] {
    [
        (a[0] & mask) | (b[0] & !mask),
        (a[1] & mask) | (b[1] & !mask),
        (a[2] & mask) | (b[2] & !mask),
        (a[3] & mask) | (b[3] & !mask),
    ]
}

/// An element in the finite field modulo n.
///
/// Represented as 4 64-bit limbs (little-endian), always fully reduced.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar(pub(crate) [u64; LIMBS]);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Creates a scalar from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Attempts to parse the given byte array as an SEC1-encoded scalar.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in the range
    /// [0, n).
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let w = u64x4_from_be_bytes(bytes);

        // If w is in the range [0, n) then w - n will underflow
        let (_, borrow) = sbb_array(&w, &MODULUS);
        CtOption::new(Self(w), Choice::from((borrow >> 63) as u8))
    }

    /// Same as [`Scalar::from_bytes`], failing with [`Error::OutOfRange`]
    /// for values `>= n`.
    pub fn try_from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Option::from(Self::from_bytes(bytes)).ok_or(Error::OutOfRange)
    }

    /// Parses the given byte array as a scalar.
    ///
    /// Subtracts the modulus when the byte array is larger than the modulus.
    pub fn from_bytes_reduced(bytes: &FieldBytes) -> Self {
        let w = u64x4_from_be_bytes(bytes);

        // 2^256 < 2n, so one subtraction is enough
        let (r, borrow) = sbb_array(&w, &MODULUS);
        Self(select_by_mask(&w, &r, borrow))
    }

    /// Returns the SEC1 encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        u64x4_to_be_bytes(&self.0)
    }

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// If odd, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Is this scalar greater than n / 2?
    pub fn is_high(&self) -> Choice {
        let (_, borrow) = sbb_array(&FRAC_MODULUS_2, &self.0);
        Choice::from((borrow >> 63) as u8)
    }

    /// Negates the scalar.
    pub const fn negate(&self) -> Self {
        let (res, _) = sbb_array(&MODULUS, &self.0);
        let is_zero = (self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0;

        // mask is u64::MAX for a non-zero input
        let mask = (is_zero as u64).wrapping_sub(1);
        Self(select_by_mask(&res, &[0; LIMBS], mask))
    }

    /// Sums two scalars.
    pub const fn add(&self, rhs: &Self) -> Self {
        let (sum, carry) = adc_array(&self.0, &rhs.0);
        let (diff, borrow) = sbb_array(&sum, &MODULUS);
        let (_, borrow) = sbb(carry, 0, borrow);
        Self(select_by_mask(&sum, &diff, borrow))
    }

    /// Subtracts one scalar from the other.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = sbb_array(&self.0, &rhs.0);
        let (wrapped, _) = adc_array(&diff, &MODULUS);
        Self(select_by_mask(&wrapped, &diff, borrow))
    }

    /// Returns 2*self.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Multiplies two scalars.
    pub const fn mul(&self, rhs: &Self) -> Self {
        WideScalar::mul_wide(self, rhs).reduce()
    }

    /// Returns self * self.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    ///
    /// Computes `self^(n - 2)` with a fixed 4-bit window. The exponent is a
    /// public constant, so the sequence of operations does not depend on `self`.
    pub fn invert(&self) -> CtOption<Self> {
        let mut table = [Self::ONE; 16];
        for i in 1..16 {
            table[i] = table[i - 1].mul(self);
        }

        let mut res = Self::ONE;
        for limb in MODULUS_MINUS_TWO.iter().rev() {
            for nibble in (0..16).rev() {
                res = res.square().square().square().square();
                res = res.mul(&table[((limb >> (nibble * 4)) & 0xf) as usize]);
            }
        }

        CtOption::new(res, !self.is_zero())
    }

    /// Returns the multiplicative inverse of self.
    ///
    /// Inverting zero fails with [`Error::UndefinedOperation`].
    pub fn try_invert(&self) -> Result<Self> {
        Option::from(self.invert()).ok_or(Error::UndefinedOperation)
    }

    /// Returns a uniformly random non-zero scalar.
    #[cfg(feature = "rand_core")]
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = FieldBytes::default();

        // Rejection sampling; the loop runs more than once with probability ~2^-128.
        loop {
            rng.fill_bytes(&mut bytes);
            let candidate = Self::from_bytes(&bytes);
            if bool::from(candidate.is_some()) {
                let scalar = candidate.unwrap_or(Self::ZERO);
                if !bool::from(scalar.is_zero()) {
                    return scalar;
                }
            }
        }
    }

    #[cfg(test)]
    pub fn modulus_as_biguint() -> BigUint {
        Self::ONE.negate().to_biguint().unwrap() + 1.to_biguint().unwrap()
    }
}

impl From<u64> for Scalar {
    fn from(k: u64) -> Self {
        Self::from_u64(k)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(self, other)
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(&self, other)
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar::add(&self, &other)
    }
}

impl AddAssign<Scalar> for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = Scalar::add(self, &rhs);
    }
}

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(self, other)
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(&self, other)
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: Scalar) -> Scalar {
        Scalar::sub(&self, &other)
    }
}

impl SubAssign<Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = Scalar::sub(self, &rhs);
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(self, other)
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(&self, other)
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: Scalar) -> Scalar {
        Scalar::mul(&self, &other)
    }
}

impl MulAssign<Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = Scalar::mul(self, &rhs);
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.as_mut().zeroize()
    }
}
