#![no_main]
use ethk256::{AffinePoint, ProjectivePoint, Scalar};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    // Any length is fed to the decoder; it must reject or round-trip
    let point = match AffinePoint::from_slice(data) {
        Ok(point) => {
            assert!(bool::from(point.is_on_curve()));
            if let Ok(compressed) = point.to_compressed_bytes() {
                assert_eq!(AffinePoint::from_compressed_bytes(&compressed), Ok(point));
            }
            if let Ok(uncompressed) = point.to_uncompressed_bytes() {
                assert_eq!(AffinePoint::from_uncompressed_bytes(&uncompressed), Ok(point));
            }
            ProjectivePoint::from(point)
        }
        Err(_) => ProjectivePoint::GENERATOR,
    };

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&data[..32]);
    let s = Scalar::from_bytes_reduced(&s_bytes);

    let mut t_bytes = [0u8; 32];
    t_bytes.copy_from_slice(&data[32..64]);
    let t = Scalar::from_bytes_reduced(&t_bytes);

    let sp = point * s;
    assert!(bool::from(sp.to_affine().is_on_curve()));
    assert_eq!(point.double(), point + point);
    assert_eq!(sp + sp, point * (s + s));
    assert_eq!(sp - sp, ProjectivePoint::IDENTITY);
    assert_eq!(point.lincomb_with_generator(&t, &s), ProjectivePoint::mul_by_generator(&t) + sp);
});
