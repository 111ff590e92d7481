//! Field element modulo the curve internal modulus using 64-bit limbs.
//!
//! Values are kept fully reduced, i.e. in `[0, p)`, after every operation.

use crate::arithmetic::util::{adc, mac, sbb, u64x4_from_be_bytes, u64x4_to_be_bytes};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Constant representing the modulus
/// p = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
pub(crate) const MODULUS: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 mod p = 2^32 + 977
const R: u64 = 0x1_0000_03D1;

/// Low part of `R`, the high half of a 512-bit product is multiplied by it
/// after having been shifted left by 32 bits.
const R_LOW: u64 = 977;

/// Scalars modulo SECP256k1 modulus (2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1).
/// Uses 4 64-bit limbs (little-endian).
#[derive(Clone, Copy, Debug)]
pub struct FieldElement4x64(pub(crate) [u64; 4]);

impl FieldElement4x64 {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Decodes a field element from a big-endian byte array without range checks.
    pub const fn from_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        Self(u64x4_from_be_bytes(bytes))
    }

    /// Attempts to parse the given byte array as an SEC1-encoded field element.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in the range
    /// [0, p).
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let res = Self::from_bytes_unchecked(bytes);
        let overflow = res.get_overflow();
        CtOption::new(res, !overflow)
    }

    /// Creates a field element from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        // `w < 2^64 < p`, no reduction required
        Self([w, 0, 0, 0])
    }

    /// Returns the SEC1 encoding of this field element.
    pub fn to_bytes(&self) -> [u8; 32] {
        u64x4_to_be_bytes(&self.0)
    }

    /// Checks if the value is `>= p`.
    fn get_overflow(&self) -> Choice {
        let (_, borrow) = sbb_array(&self.0, &MODULUS);
        // no borrow means `self >= p`
        Choice::from(((borrow >> 63) as u8) ^ 1)
    }

    /// Determine if this `FieldElement4x64` is zero.
    pub fn is_zero(&self) -> Choice {
        (self.0[0] | self.0[1] | self.0[2] | self.0[3]).ct_eq(&0)
    }

    /// Determine if this `FieldElement4x64` is odd in the SEC1 sense: `self mod 2 == 1`.
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Returns self + rhs mod p
    pub const fn add(&self, rhs: &Self) -> Self {
        let (w, carry) = adc_array(&self.0, &rhs.0);
        Self(sub_modulus_if_necessary(&w, carry))
    }

    /// Returns self - rhs mod p
    pub const fn sub(&self, rhs: &Self) -> Self {
        let (w, borrow) = sbb_array(&self.0, &rhs.0);

        // borrow is either 0 or u64::MAX; add the modulus back on underflow
        let (r0, carry) = adc(w[0], MODULUS[0] & borrow, 0);
        let (r1, carry) = adc(w[1], MODULUS[1] & borrow, carry);
        let (r2, carry) = adc(w[2], MODULUS[2] & borrow, carry);
        let (r3, _) = adc(w[3], MODULUS[3] & borrow, carry);

        Self([r0, r1, r2, r3])
    }

    /// Returns -self mod p
    pub const fn negate(&self) -> Self {
        Self::ZERO.sub(self)
    }

    /// Returns 2*self mod p
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns self * rhs mod p
    pub const fn mul(&self, rhs: &Self) -> Self {
        reduce_wide(&mul_wide(&self.0, &rhs.0))
    }

    /// Returns self * self mod p
    pub const fn square(&self) -> Self {
        reduce_wide(&square_wide(&self.0))
    }
}

impl Default for FieldElement4x64 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConditionallySelectable for FieldElement4x64 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement4x64 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement4x64 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Adds two 4-limb numbers, returning the sum and the carry (`0` or `1`).
#[inline(always)]
const fn adc_array(lhs: &[u64; 4], rhs: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, carry) = adc(lhs[0], rhs[0], 0);
    let (r1, carry) = adc(lhs[1], rhs[1], carry);
    let (r2, carry) = adc(lhs[2], rhs[2], carry);
    let (r3, carry) = adc(lhs[3], rhs[3], carry);
    ([r0, r1, r2, r3], carry)
}

/// Subtracts two 4-limb numbers, returning the difference and the borrow
/// (`0` or `u64::MAX`).
#[inline(always)]
const fn sbb_array(lhs: &[u64; 4], rhs: &[u64; 4]) -> ([u64; 4], u64) {
    let (r0, borrow) = sbb(lhs[0], rhs[0], 0);
    let (r1, borrow) = sbb(lhs[1], rhs[1], borrow);
    let (r2, borrow) = sbb(lhs[2], rhs[2], borrow);
    let (r3, borrow) = sbb(lhs[3], rhs[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Maps `carry * 2^256 + w`, which must be less than `2p`, into `[0, p)`.
#[inline(always)]
const fn sub_modulus_if_necessary(w: &[u64; 4], carry: u64) -> [u64; 4] {
    let (d, borrow) = sbb_array(w, &MODULUS);
    let (_, borrow) = sbb(carry, 0, borrow);

    // borrow = u64::MAX iff the subtraction underflowed, i.e. the input was already < p
    [
        (w[0] & borrow) | (d[0] & !borrow),
        (w[1] & borrow) | (d[1] & !borrow),
        (w[2] & borrow) | (d[2] & !borrow),
        (w[3] & borrow) | (d[3] & !borrow),
    ]
}

/// Schoolbook multiplication producing the full 512-bit product.
#[inline(always)]
const fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let (w0, carry) = mac(0, a[0], b[0], 0);
    let (w1, carry) = mac(0, a[0], b[1], carry);
    let (w2, carry) = mac(0, a[0], b[2], carry);
    let (w3, w4) = mac(0, a[0], b[3], carry);

    let (w1, carry) = mac(w1, a[1], b[0], 0);
    let (w2, carry) = mac(w2, a[1], b[1], carry);
    let (w3, carry) = mac(w3, a[1], b[2], carry);
    let (w4, w5) = mac(w4, a[1], b[3], carry);

    let (w2, carry) = mac(w2, a[2], b[0], 0);
    let (w3, carry) = mac(w3, a[2], b[1], carry);
    let (w4, carry) = mac(w4, a[2], b[2], carry);
    let (w5, w6) = mac(w5, a[2], b[3], carry);

    let (w3, carry) = mac(w3, a[3], b[0], 0);
    let (w4, carry) = mac(w4, a[3], b[1], carry);
    let (w5, carry) = mac(w5, a[3], b[2], carry);
    let (w6, w7) = mac(w6, a[3], b[3], carry);

    [w0, w1, w2, w3, w4, w5, w6, w7]
}

/// Squaring producing the full 512-bit product. Cross terms are computed
/// once and doubled.
#[inline(always)]
const fn square_wide(a: &[u64; 4]) -> [u64; 8] {
    let (w1, carry) = mac(0, a[0], a[1], 0);
    let (w2, carry) = mac(0, a[0], a[2], carry);
    let (w3, w4) = mac(0, a[0], a[3], carry);

    let (w3, carry) = mac(w3, a[1], a[2], 0);
    let (w4, w5) = mac(w4, a[1], a[3], carry);

    let (w5, w6) = mac(w5, a[2], a[3], 0);

    let w7 = w6 >> 63;
    let w6 = (w6 << 1) | (w5 >> 63);
    let w5 = (w5 << 1) | (w4 >> 63);
    let w4 = (w4 << 1) | (w3 >> 63);
    let w3 = (w3 << 1) | (w2 >> 63);
    let w2 = (w2 << 1) | (w1 >> 63);
    let w1 = w1 << 1;

    let (w0, carry) = mac(0, a[0], a[0], 0);
    let (w1, carry) = adc(w1, 0, carry);
    let (w2, carry) = mac(w2, a[1], a[1], carry);
    let (w3, carry) = adc(w3, 0, carry);
    let (w4, carry) = mac(w4, a[2], a[2], carry);
    let (w5, carry) = adc(w5, 0, carry);
    let (w6, carry) = mac(w6, a[3], a[3], carry);
    let (w7, _) = adc(w7, 0, carry);

    [w0, w1, w2, w3, w4, w5, w6, w7]
}

/// Reduces a 512-bit value modulo p using `2^256 ≡ 2^32 + 977 (mod p)`.
///
/// With `t = H * 2^256 + L` this computes `L + (H << 32) + H * 977`, folds the
/// (at most 33-bit) overflow back in through the same identity, and finishes
/// with a single conditional subtraction of p.
#[inline(always)]
const fn reduce_wide(t: &[u64; 8]) -> FieldElement4x64 {
    let (l0, l1, l2, l3) = (t[0], t[1], t[2], t[3]);
    let (h0, h1, h2, h3) = (t[4], t[5], t[6], t[7]);

    // L + (H << 32)
    let (r0, carry) = adc(l0, h0 << 32, 0);
    let (r1, carry) = adc(l1, (h1 << 32) | (h0 >> 32), carry);
    let (r2, carry) = adc(l2, (h2 << 32) | (h1 >> 32), carry);
    let (r3, carry) = adc(l3, (h3 << 32) | (h2 >> 32), carry);
    let r4 = (h3 >> 32) + carry;

    // + H * 977
    let (r0, carry) = mac(r0, h0, R_LOW, 0);
    let (r1, carry) = mac(r1, h1, R_LOW, carry);
    let (r2, carry) = mac(r2, h2, R_LOW, carry);
    let (r3, carry) = mac(r3, h3, R_LOW, carry);
    let r4 = r4 + carry;

    // Fold the fifth limb: r4 * 2^256 ≡ r4 * R
    let folded = (r4 as u128) * (R as u128);
    let (r0, carry) = adc(r0, folded as u64, 0);
    let (r1, carry) = adc(r1, (folded >> 64) as u64, carry);
    let (r2, carry) = adc(r2, 0, carry);
    let (r3, carry) = adc(r3, 0, carry);

    // A carry out of the fold leaves a value below 2^67 in the low limbs,
    // so adding R once more can not overflow.
    let (r0, c) = adc(r0, R * carry, 0);
    let (r1, c) = adc(r1, 0, c);
    let (r2, c) = adc(r2, 0, c);
    let (r3, _) = adc(r3, 0, c);

    FieldElement4x64(sub_modulus_if_necessary(&[r0, r1, r2, r3], 0))
}
