//! Group operation test vectors.

use hex_literal::hex;

/// Repeated addition of the generator: `k * G` for `k` in `1..=20`.
pub const ADD_TEST_VECTORS: &[([u8; 32], [u8; 32])] = &[
    (
        hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    ),
    (
        hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
        hex!("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
    ),
    (
        hex!("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
        hex!("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
    ),
    (
        hex!("e493dbf1c10d80f3581e4904930b1404cc6c13900ee0758474fa94abe8c4cd13"),
        hex!("51ed993ea0d455b75642e2098ea51448d967ae33bfbdfe40cfe97bdc47739922"),
    ),
    (
        hex!("2f8bde4d1a07209355b4a7250a5c5128e88b84bddc619ab7cba8d569b240efe4"),
        hex!("d8ac222636e5e3d6d4dba9dda6c9c426f788271bab0d6840dca87d3aa6ac62d6"),
    ),
    (
        hex!("fff97bd5755eeea420453a14355235d382f6472f8568a18b2f057a1460297556"),
        hex!("ae12777aacfbb620f3be96017f45c560de80f0f6518fe4a03c870c36b075f297"),
    ),
    (
        hex!("5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc"),
        hex!("6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da"),
    ),
    (
        hex!("2f01e5e15cca351daff3843fb70f3c2f0a1bdd05e5af888a67784ef3e10a2a01"),
        hex!("5c4da8a741539949293d082a132d13b4c2e213d6ba5b7617b5da2cb76cbde904"),
    ),
    (
        hex!("acd484e2f0c7f65309ad178a9f559abde09796974c57e714c35f110dfc27ccbe"),
        hex!("cc338921b0a7d9fd64380971763b61e9add888a4375f8e0f05cc262ac64f9c37"),
    ),
    (
        hex!("a0434d9e47f3c86235477c7b1ae6ae5d3442d49b1943c2b752a68e2a47e247c7"),
        hex!("893aba425419bc27a3b6c7e693a24c696f794c2ed877a1593cbee53b037368d7"),
    ),
    (
        hex!("774ae7f858a9411e5ef4246b70c65aac5649980be5c17891bbec17895da008cb"),
        hex!("d984a032eb6b5e190243dd56d7b7b365372db1e2dff9d6a8301d74c9c953c61b"),
    ),
    (
        hex!("d01115d548e7561b15c38f004d734633687cf4419620095bc5b0f47070afe85a"),
        hex!("a9f34ffdc815e0d7a8b64537e17bd81579238c5dd9a86d526b051b13f4062327"),
    ),
    (
        hex!("f28773c2d975288bc7d1d205c3748651b075fbc6610e58cddeeddf8f19405aa8"),
        hex!("0ab0902e8d880a89758212eb65cdaf473a1a06da521fa91f29b5cb52db03ed81"),
    ),
    (
        hex!("499fdf9e895e719cfd64e67f07d38e3226aa7b63678949e6e49b241a60e823e4"),
        hex!("cac2f6c4b54e855190f044e4a7b3d464464279c27a3f95bcc65f40d403a13f5b"),
    ),
    (
        hex!("d7924d4f7d43ea965a465ae3095ff41131e5946f3c85f79e44adbcf8e27e080e"),
        hex!("581e2872a86c72a683842ec228cc6defea40af2bd896d3a5c504dc9ff6a26b58"),
    ),
    (
        hex!("e60fce93b59e9ec53011aabc21c23e97b2a31369b87a5ae9c44ee89e2a6dec0a"),
        hex!("f7e3507399e595929db99f34f57937101296891e44d23f0be1f32cce69616821"),
    ),
    (
        hex!("defdea4cdb677750a420fee807eacf21eb9898ae79b9768766e4faa04a2d4a34"),
        hex!("4211ab0694635168e997b0ead2a93daeced1f4a04a95c0f6cfb199f69e56eb77"),
    ),
    (
        hex!("5601570cb47f238d2b0286db4a990fa0f3ba28d1a319f5e7cf55c2a2444da7cc"),
        hex!("c136c1dc0cbeb930e9e298043589351d81d8e0bc736ae2a1f5192e5e8b061d58"),
    ),
    (
        hex!("2b4ea0a797a443d293ef5cff444f4979f06acfebd7e86d277475656138385b6c"),
        hex!("85e89bc037945d93b343083b5a1c86131a01f60c50269763b570c854e5c09b7a"),
    ),
    (
        hex!("4ce119c96e2fa357200b559b2f7dd5a5f02d5290aff74b03f3e471b273211c97"),
        hex!("12ba26dcb10ec1625da61fa10a844c676162948271d96967450288ee9233dc3a"),
    ),
];

/// Scalar multiplication of the generator by large scalars.
pub const MUL_TEST_VECTORS: &[([u8; 32], [u8; 32], [u8; 32])] = &[
    (
        hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
        hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        hex!("b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777"),
    ),
    (
        hex!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"),
        hex!("00000000000000000000003b78ce563f89a0ed9414f5aa28ad0d96d6795f9c63"),
        hex!("3f3979bf72ae8202983dc989aec7f2ff2ed91bdd69ce02fc0700ca100e59ddf3"),
    ),
    (
        hex!("aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55aa55"),
        hex!("37cf22073286de02aa037be02d7381cefe5d79a07164fb07d8028ce628eeae44"),
        hex!("a7cdb6ea7b5494e9fe45dd163b252bc854b8f87aad9814f3b33a556d12e83038"),
    ),
    (
        hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        hex!("e13f6e65283b14d25838eed8ce3353c0ff20692112eeff9d167249826bc40986"),
        hex!("9f0720b24625ec15fbd29f03598d30901061c63abe47a7d8f62e769125f022f5"),
    ),
    (
        hex!("0000000000000100000000000000000000000000000000000000000000000000"),
        hex!("1ec80fef360cbdd954160fadab352b6b92b53576a88fea4947173b9d4300bf19"),
        hex!("aeefe93756b5340d2f3a4958a7abbf5e0146e77f6295a07b671cdc1cc107cefd"),
    ),
    (
        hex!("9d6b8a3cf1b94c0e23ebd8a7f1d7402f26b0b9d451ee5d0dcbc7fc7c26e9e4b5"),
        hex!("7237fe410feefa7648740c59c0b61ea297eac9a92c6c6db337f72f8b97dc0844"),
        hex!("6685ff3e1439ceea260498cb5ce8cd366f737ce1aee4031d048e1e9a2b474fb7"),
    ),
];
