//! Helper functions.

#[cfg(test)]
use num_bigint::{BigUint, ToBigUint};
#[cfg(test)]
use num_traits::cast::ToPrimitive;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The incoming borrow is read from its top bit, the outgoing borrow is
/// either `0` or `u64::MAX` and can be used directly as a mask.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Decodes 32 big-endian bytes into little-endian limbs.
#[inline(always)]
pub const fn u64x4_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    let mut i = 0;
    while i < 4 {
        let mut limb = 0u64;
        let mut j = 0;
        while j < 8 {
            limb = (limb << 8) | bytes[(3 - i) * 8 + j] as u64;
            j += 1;
        }
        limbs[i] = limb;
        i += 1;
    }
    limbs
}

/// Encodes little-endian limbs as 32 big-endian bytes.
#[inline(always)]
pub fn u64x4_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut ret = [0u8; 32];
    for (chunk, limb) in ret.chunks_exact_mut(8).zip(limbs.iter().rev()) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    ret
}

/// Converts a byte array (big-endian) to BigUint.
#[cfg(test)]
pub fn bytes_to_biguint(bytes: &[u8; 32]) -> BigUint {
    bytes
        .iter()
        .enumerate()
        .map(|(i, w)| w.to_biguint().unwrap() << ((31 - i) * 8))
        .sum()
}

/// Converts a BigUint to a byte array (big-endian).
#[cfg(test)]
pub fn biguint_to_bytes(x: &BigUint) -> [u8; 32] {
    let mask = BigUint::from(u8::MAX);
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = ((x >> ((31 - i) * 8)) & &mask).to_u8().unwrap();
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::{adc, mac, sbb, u64x4_from_be_bytes, u64x4_to_be_bytes};
    use hex_literal::hex;

    #[test]
    fn carries() {
        assert_eq!(adc(u64::MAX, 1, 0), (0, 1));
        assert_eq!(adc(u64::MAX, u64::MAX, 1), (u64::MAX, 1));
        assert_eq!(sbb(0, 1, 0), (u64::MAX, u64::MAX));
        assert_eq!(sbb(5, 2, u64::MAX), (2, 0));
        assert_eq!(mac(1, u64::MAX, u64::MAX, 1), (3, u64::MAX - 1));
    }

    #[test]
    fn limb_order() {
        let bytes = hex!("0102030405060708 1112131415161718 2122232425262728 3132333435363738");
        let limbs = u64x4_from_be_bytes(&bytes);
        assert_eq!(limbs[0], 0x3132333435363738);
        assert_eq!(limbs[3], 0x0102030405060708);
        assert_eq!(u64x4_to_be_bytes(&limbs), bytes);
    }
}
