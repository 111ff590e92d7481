#![no_main]
use ethk256::{
    ecdsa::{RecoverableSignature, Signature, SigningKey, VerifyingKey},
    keccak256, recover_public_key, verify,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 65 {
        return;
    }

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&data[..32]);

    // Untrusted recoverable signatures must never panic, and a recovered key
    // always verifies the signature it came from
    if let Ok(signature) = RecoverableSignature::from_slice(&data[..65]) {
        if let Ok(key) = signature.recover_from_prehash(&digest) {
            assert!(key.verify_prehash(&digest, signature.signature()).is_ok());
        }
    }

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&data[..32]);
    s.copy_from_slice(&data[32..64]);
    let _ = recover_public_key(&digest, &r, &s, data[64] & 3);
    let _ = verify(&data[64..], &digest, &r, &s);

    // Treat the input as a secret key and message
    if let Ok(key) = SigningKey::from_slice(&data[..32]) {
        let msg = &data[32..];
        let (signature, recovery_id) = key.sign_message(msg);
        assert!(signature.is_low_s());
        assert!(key.verifying_key().verify_message(msg, &signature).is_ok());
        assert_eq!(
            VerifyingKey::recover_from_message(msg, &signature, recovery_id),
            Ok(*key.verifying_key())
        );
        assert_eq!(Signature::from_bytes(&signature.to_bytes()), Ok(signature));

        let digest = keccak256(msg);
        assert!(verify(
            &key.verifying_key().to_compressed_bytes(),
            &digest,
            &signature.r().to_bytes(),
            &signature.s().to_bytes(),
        ));
    }
});
