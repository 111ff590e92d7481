//! Known-answer tests for Keccak-256 hashing, deterministic signing,
//! verification and public-key recovery.

use ethk256::{
    ecdsa::{RecoverableSignature, RecoveryId, Signature, SigningKey, VerifyingKey},
    keccak256, recover_public_key, sign, verify, Error, ORDER,
};
use hex_literal::hex;

const KEY: [u8; 32] = hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
const MESSAGE: &[u8] = b"Ethereum deterministic nonce fixture";
const DIGEST: [u8; 32] = hex!("c532791fc298f17681ae108421539e4cd072ef0aa410600e8ddebb94af59512d");
const R: [u8; 32] = hex!("cff2f298c3878e11465d3bf013b23e46a6fc9493542ce1fef4038e0dadd04f89");
const S: [u8; 32] = hex!("4f9fbc3433bb9bd242d556face66bd7951ef8c329d1349ef105d4091acc498f6");
const PUBLIC_KEY: [u8; 64] = hex!(
    "2c8c31fc9f990c6b55e3865a184a4ce50e09481f2eaeb3e60ec1cea13a6ae645"
    "64b95e4fdb6948c0386e189b006a29f686769b011704275e4459822dc3328085"
);

/// Last 20 bytes of the Keccak-256 hash of the uncompressed public key.
fn address(verifying_key: &VerifyingKey) -> [u8; 20] {
    let hash = keccak256(&verifying_key.to_uncompressed_bytes());
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    out
}

#[test]
fn keccak_digest() {
    assert_eq!(keccak256(MESSAGE), DIGEST);
}

#[test]
fn deterministic_signature() {
    let (signature, recovery_id) = sign(&KEY, &DIGEST).unwrap();
    assert_eq!(signature.r().to_bytes(), R);
    assert_eq!(signature.s().to_bytes(), S);
    assert_eq!(recovery_id.to_byte(), 0);
    assert_eq!(recovery_id.to_eth_v(), 27);

    assert!(verify(&PUBLIC_KEY, &DIGEST, &R, &S));

    let recovered = recover_public_key(&DIGEST, &R, &S, 0).unwrap();
    assert_eq!(recovered.to_uncompressed_bytes(), PUBLIC_KEY);
    assert_eq!(address(&recovered), hex!("e471a8d4e306eefa74ba35df7500a4512aeb542c"));
}

/// Legacy transaction from the web3/ethers documentation.
#[test]
fn ethers_transaction() {
    let key = SigningKey::from_bytes(&hex!(
        "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
    ))
    .unwrap();
    let rlp = hex!("e9808504e3b29200831e848094f0109fc8df283027b6285cc889f5aa624eac1f55843b9aca0080018080");

    let signature = key.sign_message_recoverable(&rlp);
    assert_eq!(
        signature.to_bytes(),
        hex!(
            "c9cf86333bcb065d140032ecaab5d9281bde80f21b9687b3e94161de42d51895"
            "727a108a0b8d101465414033c3f705a9c7b826e596766046ee1183dbc8aeaa68"
            "1b"
        )
    );
    assert_eq!(
        address(key.verifying_key()),
        hex!("2c7536e3605d9c16a7a3d7b1898e529396a65c23")
    );
}

#[test]
fn any_bit_flip_fails_verification() {
    for byte in 0..32 {
        for bit in 0..8 {
            let mut digest = DIGEST;
            digest[byte] ^= 1 << bit;
            assert!(!verify(&PUBLIC_KEY, &digest, &R, &S));

            let mut r = R;
            r[byte] ^= 1 << bit;
            assert!(!verify(&PUBLIC_KEY, &DIGEST, &r, &S));

            let mut s = S;
            s[byte] ^= 1 << bit;
            assert!(!verify(&PUBLIC_KEY, &DIGEST, &R, &s));
        }
    }
}

#[test]
fn invalid_recovery_ids() {
    for id in [4u8, 5, 27, 28, 255] {
        assert_eq!(
            recover_public_key(&DIGEST, &R, &S, id),
            Err(Error::InvalidSignature)
        );
    }

    let mut bytes = [0u8; 65];
    bytes[..32].copy_from_slice(&R);
    bytes[32..64].copy_from_slice(&S);
    for v in [0u8, 1, 26, 31] {
        bytes[64] = v;
        assert_eq!(
            RecoverableSignature::from_bytes(&bytes),
            Err(Error::InvalidSignature)
        );
    }
}

#[test]
fn out_of_range_signatures() {
    let one = {
        let mut one = [0u8; 32];
        one[31] = 1;
        one
    };

    assert!(!verify(&PUBLIC_KEY, &DIGEST, &[0; 32], &S));
    assert!(!verify(&PUBLIC_KEY, &DIGEST, &R, &[0; 32]));
    assert!(!verify(&PUBLIC_KEY, &DIGEST, &ORDER, &S));
    assert!(!verify(&PUBLIC_KEY, &DIGEST, &R, &ORDER));

    assert_eq!(
        recover_public_key(&DIGEST, &ORDER, &one, 0),
        Err(Error::InvalidSignature)
    );
    assert_eq!(sign(&ORDER, &DIGEST), Err(Error::OutOfRange));
    assert_eq!(sign(&[0; 32], &DIGEST), Err(Error::OutOfRange));
}

#[test]
fn malformed_public_keys() {
    assert!(!verify(&[], &DIGEST, &R, &S));
    assert!(!verify(&PUBLIC_KEY[..63], &DIGEST, &R, &S));

    let mut off_curve = PUBLIC_KEY;
    off_curve[63] ^= 1;
    assert_eq!(
        VerifyingKey::from_sec1_bytes(&off_curve),
        Err(Error::PointNotOnCurve)
    );
    assert!(!verify(&off_curve, &DIGEST, &R, &S));
}

#[test]
fn public_key_encodings_agree() {
    let vk = VerifyingKey::from_sec1_bytes(&PUBLIC_KEY).unwrap();

    let mut sec1 = [0x04; 65];
    sec1[1..].copy_from_slice(&PUBLIC_KEY);
    assert_eq!(vk.to_encoded_point(), sec1);

    let compressed = vk.to_compressed_bytes();
    assert_eq!(compressed[0], 0x03);
    assert_eq!(compressed[1..], PUBLIC_KEY[..32]);

    for encoding in [&PUBLIC_KEY[..], &sec1[..], &compressed[..]] {
        assert!(verify(encoding, &DIGEST, &R, &S));
    }
}

/// The ephemeral point of this signature has `x = n + 2`, so `r = 2` and the
/// recovery id carries the overflow bit.
#[test]
fn recovery_with_x_overflow() {
    let digest = keccak256(b"x-overflow recovery");
    let r = hex!("0000000000000000000000000000000000000000000000000000000000000002");
    let s = hex!("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef");
    let expected = hex!(
        "a4d649b23140ff0597c47fb1d4879e1a8955a458e9e5bfa72034ac104807a319"
        "acbe675417b994b63dbd1faf4dc8fa0a8e670ca732c480db0f387314f0367697"
    );

    let recovered = recover_public_key(&digest, &r, &s, 3).unwrap();
    assert_eq!(recovered.to_uncompressed_bytes(), expected);
    assert!(verify(&expected, &digest, &r, &s));

    let signature = Signature::from_components(&r, &s).unwrap();
    let found =
        RecoverableSignature::trial_recovery_from_prehash(&recovered, &digest, &signature).unwrap();
    assert_eq!(found.recovery_id(), RecoveryId::new(true, true));

    // Without the overflow bit the lifted x-coordinate is 2, a different point.
    if let Ok(other) = recover_public_key(&digest, &r, &s, 1) {
        assert_ne!(other, recovered);
    }
}

#[test]
fn v_offset() {
    let key = SigningKey::from_bytes(&KEY).unwrap();
    let signature = key.sign_prehash_recoverable(&DIGEST);
    let bytes = signature.to_bytes();
    assert_eq!(bytes[64], 27);

    let parsed = RecoverableSignature::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.recovery_id().to_byte(), 0);
    assert_eq!(parsed.recover_from_prehash(&DIGEST), Ok(*key.verifying_key()));
}
