//! Wide scalar (64-bit limbs)

use super::{Scalar, MODULUS};
use crate::arithmetic::util::{adc, mac, sbb};

/// MU = floor(2^512 / n)
///    = 0x1_00000000_00000000_00000000_00000001_4551231950b75fc4_402da1732fc9bec0
const MU: [u64; 5] = [
    0x402D_A173_2FC9_BEC0,
    0x4551_2319_50B7_5FC4,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0001,
];

/// Unreduced product of two scalars.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WideScalar(pub(super) [u64; 8]);

impl WideScalar {
    /// Interprets 64 big-endian bytes as a 512-bit integer.
    #[cfg(test)]
    pub const fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut w = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            let mut limb = 0u64;
            let mut j = 0;
            while j < 8 {
                limb = (limb << 8) | bytes[(7 - i) * 8 + j] as u64;
                j += 1;
            }
            w[i] = limb;
            i += 1;
        }
        Self(w)
    }

    /// Multiplies two scalars without modulo reduction, producing up to a 512-bit scalar.
    #[inline(always)] // only used in Scalar::mul(), so won't cause binary bloat
    pub const fn mul_wide(a: &Scalar, b: &Scalar) -> Self {
        let a = &a.0;
        let b = &b.0;

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

        Self([w0, w1, w2, w3, w4, w5, w6, w7])
    }

    /// Barrett Reduction
    ///
    /// The general algorithm is:
    /// ```text
    /// p = n = order of group
    /// b = 2^64 = 64bit machine word
    /// k = 4
    /// a \in [0, 2^512]
    /// mu := floor(b^{2k} / p)
    /// q1 := floor(a / b^{k - 1})
    /// q2 := q1 * mu
    /// q3 := <- floor(a / b^{k - 1})
    /// r1 := a mod b^{k + 1}
    /// r2 := q3 * m mod b^{k + 1}
    /// r := r1 - r2
    ///
    /// if r < 0: r := r + b^{k + 1}
    /// while r >= p: do r := r - p (at most twice)
    /// ```
    ///
    /// References:
    /// - Handbook of Applied Cryptography, Chapter 14
    ///   Algorithm 14.42
    ///   http://cacr.uwaterloo.ca/hac/about/chap14.pdf
    #[inline]
    pub const fn reduce(&self) -> Scalar {
        let a = &self.0;
        let q1 = [a[3], a[4], a[5], a[6], a[7]];
        let q3 = q1_times_mu_shift_five(&q1);

        let r1 = [a[0], a[1], a[2], a[3], a[4]];
        let r2 = q3_times_n_keep_five(&q3);
        let r = sub_inner_five(r1, r2);

        // Result is in range [0, 3n), two conditional subtractions suffice.
        let r = subtract_n_if_necessary(r);
        let r = subtract_n_if_necessary(r);
        Scalar([r[0], r[1], r[2], r[3]])
    }
}

const fn q1_times_mu_shift_five(q1: &[u64; 5]) -> [u64; 5] {
    // Schoolbook multiplication

    let (_w0, carry) = mac(0, q1[0], MU[0], 0);
    let (w1, carry) = mac(0, q1[0], MU[1], carry);
    let (w2, carry) = mac(0, q1[0], MU[2], carry);
    let (w3, carry) = mac(0, q1[0], MU[3], carry);
    // NOTE MU[4] == 1
    let (w4, w5) = adc(0, q1[0], carry);

    let (_w1, carry) = mac(w1, q1[1], MU[0], 0);
    let (w2, carry) = mac(w2, q1[1], MU[1], carry);
    let (w3, carry) = mac(w3, q1[1], MU[2], carry);
    let (w4, carry) = mac(w4, q1[1], MU[3], carry);
    let (w5, w6) = adc(w5, q1[1], carry);

    let (_w2, carry) = mac(w2, q1[2], MU[0], 0);
    let (w3, carry) = mac(w3, q1[2], MU[1], carry);
    let (w4, carry) = mac(w4, q1[2], MU[2], carry);
    let (w5, carry) = mac(w5, q1[2], MU[3], carry);
    let (w6, w7) = adc(w6, q1[2], carry);

    let (_w3, carry) = mac(w3, q1[3], MU[0], 0);
    let (w4, carry) = mac(w4, q1[3], MU[1], carry);
    let (w5, carry) = mac(w5, q1[3], MU[2], carry);
    let (w6, carry) = mac(w6, q1[3], MU[3], carry);
    let (w7, w8) = adc(w7, q1[3], carry);

    let (_w4, carry) = mac(w4, q1[4], MU[0], 0);
    let (w5, carry) = mac(w5, q1[4], MU[1], carry);
    let (w6, carry) = mac(w6, q1[4], MU[2], carry);
    let (w7, carry) = mac(w7, q1[4], MU[3], carry);
    let (w8, w9) = adc(w8, q1[4], carry);

    [w5, w6, w7, w8, w9]
}

const fn q3_times_n_keep_five(q3: &[u64; 5]) -> [u64; 5] {
    // Schoolbook multiplication, truncated to five limbs.

    let (w0, carry) = mac(0, q3[0], MODULUS[0], 0);
    let (w1, carry) = mac(0, q3[0], MODULUS[1], carry);
    let (w2, carry) = mac(0, q3[0], MODULUS[2], carry);
    let (w3, w4) = mac(0, q3[0], MODULUS[3], carry);

    let (w1, carry) = mac(w1, q3[1], MODULUS[0], 0);
    let (w2, carry) = mac(w2, q3[1], MODULUS[1], carry);
    let (w3, carry) = mac(w3, q3[1], MODULUS[2], carry);
    let (w4, _) = mac(w4, q3[1], MODULUS[3], carry);

    let (w2, carry) = mac(w2, q3[2], MODULUS[0], 0);
    let (w3, carry) = mac(w3, q3[2], MODULUS[1], carry);
    let (w4, _) = mac(w4, q3[2], MODULUS[2], carry);

    let (w3, carry) = mac(w3, q3[3], MODULUS[0], 0);
    let (w4, _) = mac(w4, q3[3], MODULUS[1], carry);

    let (w4, _) = mac(w4, q3[4], MODULUS[0], 0);

    [w0, w1, w2, w3, w4]
}

#[inline]
const fn sub_inner_five(l: [u64; 5], r: [u64; 5]) -> [u64; 5] {
    let (w0, borrow) = sbb(l[0], r[0], 0);
    let (w1, borrow) = sbb(l[1], r[1], borrow);
    let (w2, borrow) = sbb(l[2], r[2], borrow);
    let (w3, borrow) = sbb(l[3], r[3], borrow);
    let (w4, _borrow) = sbb(l[4], r[4], borrow);

    // If underflow occurred on the final limb - don't care (= add b^{k+1}).
    [w0, w1, w2, w3, w4]
}

#[inline]
const fn subtract_n_if_necessary(r: [u64; 5]) -> [u64; 5] {
    let (w0, borrow) = sbb(r[0], MODULUS[0], 0);
    let (w1, borrow) = sbb(r[1], MODULUS[1], borrow);
    let (w2, borrow) = sbb(r[2], MODULUS[2], borrow);
    let (w3, borrow) = sbb(r[3], MODULUS[3], borrow);
    let (w4, borrow) = sbb(r[4], 0, borrow);

    // If underflow occurred on the final limb, borrow = 0xfff...fff, otherwise
    // borrow = 0x000...000. Thus, we use it as a mask to conditionally add the
    // modulus.
    let (w0, carry) = adc(w0, MODULUS[0] & borrow, 0);
    let (w1, carry) = adc(w1, MODULUS[1] & borrow, carry);
    let (w2, carry) = adc(w2, MODULUS[2] & borrow, carry);
    let (w3, carry) = adc(w3, MODULUS[3] & borrow, carry);
    let (w4, _carry) = adc(w4, 0, carry);

    [w0, w1, w2, w3, w4]
}

#[cfg(test)]
mod tests {
    use super::WideScalar;
    use crate::arithmetic::Scalar;
    use hex_literal::hex;

    #[test]
    fn reduce_max() {
        // (2^512 - 1) mod n
        let wide = WideScalar::from_bytes(&[0xff; 64]);
        assert_eq!(
            wide.reduce().to_bytes(),
            hex!("9d671cd581c69bc5e697f5e45bcd07c6741496c20e7cf878896cf21467d7d13f")
        );
    }

    #[test]
    fn reduce_order_squared() {
        let n_minus_one = -Scalar::ONE;
        // (n - 1)^2 = 1 mod n
        assert_eq!(
            WideScalar::mul_wide(&n_minus_one, &n_minus_one).reduce(),
            Scalar::ONE
        );
    }
}
