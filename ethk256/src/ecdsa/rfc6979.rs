//! Deterministic nonce generation per [RFC 6979] with HMAC-SHA-256.
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

use crate::{arithmetic::Scalar, FieldBytes};
use rfc6979::HmacDrbg;
use sha2::Sha256;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Source of per-signature nonces in `[1, n - 1]`, derived from the secret
/// scalar and the message digest.
///
/// The digest is reduced modulo `n` before seeding (`bits2octets`). Each call
/// to [`NonceGenerator::next_nonce`] continues the RFC 6979 retry loop, so a
/// signer that rejects a nonce simply asks for another one.
pub(crate) struct NonceGenerator {
    drbg: HmacDrbg<Sha256>,
}

impl NonceGenerator {
    pub fn new(secret: &Scalar, digest: &FieldBytes) -> Self {
        #[allow(unused_mut)]
        let mut x = secret.to_bytes();
        let h = Scalar::from_bytes_reduced(digest).to_bytes();
        let drbg = HmacDrbg::<Sha256>::new(&x, &h, &[]);

        #[cfg(feature = "zeroize")]
        x.zeroize();

        Self { drbg }
    }

    /// Draws candidates until one lies in `[1, n - 1]`.
    ///
    /// `fill_bytes` applies the `K = HMAC_K(V || 0x00)` update after every
    /// output, so successive calls walk the same sequence as step h.3.
    pub fn next_nonce(&mut self) -> Scalar {
        loop {
            let mut candidate = FieldBytes::default();
            self.drbg.fill_bytes(&mut candidate);
            let k = Scalar::from_bytes(&candidate);

            #[cfg(feature = "zeroize")]
            candidate.zeroize();

            if let Some(k) = Option::<Scalar>::from(k) {
                if !bool::from(k.is_zero()) {
                    return k;
                }
            }

            debug!("nonce candidate out of range, drawing again");
        }
    }
}

/// First nonce RFC 6979 yields for `secret` and `digest`.
#[cfg(test)]
pub(crate) fn generate_k(secret: &Scalar, digest: &FieldBytes) -> Scalar {
    NonceGenerator::new(secret, digest).next_nonce()
}
