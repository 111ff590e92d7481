#![no_main]
use ethk256::Scalar;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    let mut a_bytes = [0u8; 32];
    let mut b_bytes = [0u8; 32];
    a_bytes.copy_from_slice(&data[..32]);
    b_bytes.copy_from_slice(&data[32..64]);

    // Canonical parsing round-trips, reduced parsing always succeeds
    if let Some(a) = Option::<Scalar>::from(Scalar::from_bytes(&a_bytes)) {
        assert_eq!(a.to_bytes(), a_bytes);
        assert_eq!(Scalar::from_bytes_reduced(&a_bytes), a);
    }

    let a = Scalar::from_bytes_reduced(&a_bytes);
    let b = Scalar::from_bytes_reduced(&b_bytes);

    // Ring identities
    assert_eq!(a + b, b + a);
    assert_eq!(a * b, b * a);
    assert_eq!((a + b) - b, a);
    assert_eq!(a + (-a), Scalar::ZERO);
    assert_eq!(a.square(), a * a);
    assert_eq!(a.double(), a + a);

    match Option::<Scalar>::from(a.invert()) {
        Some(inv) => assert_eq!(a * inv, Scalar::ONE),
        None => assert!(bool::from(a.is_zero())),
    }

    // Exactly one of a, -a is high unless a is zero
    if !bool::from(a.is_zero()) {
        assert_ne!(bool::from(a.is_high()), bool::from((-a).is_high()));
    }
});
