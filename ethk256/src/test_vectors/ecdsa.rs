//! ECDSA test vectors.

use hex_literal::hex;

/// Deterministic signing test vector: Keccak-256 digest, RFC 6979 nonce and
/// the resulting low-s signature.
pub struct SigningTestVector {
    /// Private key
    pub secret_key: [u8; 32],

    /// Message before hashing
    pub message: &'static [u8],

    /// Keccak-256 digest of `message`
    pub digest: [u8; 32],

    /// RFC 6979 nonce derived from `secret_key` and `digest`
    pub nonce: [u8; 32],

    /// Signature `r` component
    pub r: [u8; 32],

    /// Signature `s` component (low-s)
    pub s: [u8; 32],

    /// Raw recovery id in `0..=3`
    pub recovery_id: u8,

    /// Public key x-coordinate
    pub public_key_x: [u8; 32],

    /// Public key y-coordinate
    pub public_key_y: [u8; 32],
}

/// Pinned fixture for deterministic nonce generation.
pub const KNOWN_ANSWER: SigningTestVector = SigningTestVector {
    secret_key: hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721"),
    message: b"Ethereum deterministic nonce fixture",
    digest: hex!("c532791fc298f17681ae108421539e4cd072ef0aa410600e8ddebb94af59512d"),
    nonce: hex!("438e565cd71bf744cb692ed66df2e2d5496e64e6e1c716d3bfa88a0b344f2668"),
    r: hex!("cff2f298c3878e11465d3bf013b23e46a6fc9493542ce1fef4038e0dadd04f89"),
    s: hex!("4f9fbc3433bb9bd242d556face66bd7951ef8c329d1349ef105d4091acc498f6"),
    recovery_id: 0,
    public_key_x: hex!("2c8c31fc9f990c6b55e3865a184a4ce50e09481f2eaeb3e60ec1cea13a6ae645"),
    public_key_y: hex!("64b95e4fdb6948c0386e189b006a29f686769b011704275e4459822dc3328085"),
};

/// Legacy transaction signed by ethers-rs, matching other Ethereum libraries
/// that use HMAC-DRBG-SHA-256 for RFC 6979 and Keccak-256 for hashing.
pub const ETHERS_TRANSACTION: SigningTestVector = SigningTestVector {
    secret_key: hex!("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"),
    message: &hex!(
        "e9808504e3b29200831e848094f0109fc8df283027b6285cc889f5aa624eac1f55843b9aca0080018080"
    ),
    digest: hex!("88cfbd7e51c7a40540b233cf68b62ad1df3e92462f1c6018d6d67eae0f3b08f5"),
    nonce: hex!("f6e491ae7a763419402e41d7dcf03f65c890818f0acb5397f3408008108b41ac"),
    r: hex!("c9cf86333bcb065d140032ecaab5d9281bde80f21b9687b3e94161de42d51895"),
    s: hex!("727a108a0b8d101465414033c3f705a9c7b826e596766046ee1183dbc8aeaa68"),
    recovery_id: 0,
    public_key_x: hex!("4e3b81af9c2234cad09d679ce6035ed1392347ce64ce405f5dcd36228a25de6e"),
    public_key_y: hex!("47fd35c4215d1edf53e6f83de344615ce719bdb0fd878f6ed76f06dd277956de"),
};

/// Batch of deterministic keys and messages, cross-checked against an
/// independent implementation. Keys are `keccak256("ethk256 differential key" || i)`,
/// messages are `"differential message #i"`.
pub const DIFFERENTIAL_TEST_VECTORS: &[SigningTestVector] = &[
    SigningTestVector {
        secret_key: hex!("0352e91c4cad75b7c3944c92c1824625e2593cf13aafd4bd868e4599c78610d0"),
        message: b"differential message #0",
        digest: hex!("bc8b102894918c6d146667c85eb53473a62e727f6e297271d3657ef6feefffa8"),
        nonce: hex!("d3732f3871107a258d0c3be4f748cde9551252d4d7e3bc1613514c3d5b0c3e57"),
        r: hex!("1e34d78d87a0c504aebd5f7804223d8f2aa660edc531540fa188ccfc49c4e18a"),
        s: hex!("4ff58de710deb5899deb178c5f580d0a4e9eb4bedb78bdf912827d469874186f"),
        recovery_id: 0,
        public_key_x: hex!("374250b79defce75f84a5047ff4a853919545ca9ef312ac7457f505e5cc515e6"),
        public_key_y: hex!("5cd6e1e320ce6722d5d158a580004071bbaf6e19a7d4372a74f411fd436f793b"),
    },
    SigningTestVector {
        secret_key: hex!("725ff49cae933c0bc4f4ba1f102612a893b5a951427e83adc3d6f42e5f1f7efb"),
        message: b"differential message #1",
        digest: hex!("d422a0a32dcff321908d052d09e100a39ccc64e33d0fb175ce9735f184a062a1"),
        nonce: hex!("73c278293b20cb7c938a76cb755c58a53b5af6f0e468af64696b0c669c7064a9"),
        r: hex!("e83663bda0678a26006ef2cb02bf15dc3aa5ccfaadf6e308df96cb9e9dd429c4"),
        s: hex!("78e6eb6f2113cad33571c458f685b07755405900d7f8c822e9aaae7821243f25"),
        recovery_id: 0,
        public_key_x: hex!("4ecf8db34889782728154a89fc5f29803da375dfae836c396fb0c6013860f900"),
        public_key_y: hex!("22d735a79d8f3dee81eaab530ec53b7b6246848617163358a251a5aac231da0a"),
    },
    SigningTestVector {
        secret_key: hex!("21c9fe6299c5aef2854957d24b1dc6b65de6f1f4d9422867c52aab1c4e497945"),
        message: b"differential message #2",
        digest: hex!("8ed2b0defe67fb542039e23c5e08d45d8d3bf087de318c8dbd5eba92c9f31efc"),
        nonce: hex!("acf2b13bb617ea511accda6fa6f35c9d94ff885e597a417104611a0b9f3d6951"),
        r: hex!("bcc8c2ad74e19e3f2ff0a1b22b28b129894b40bf0b81b2d50b01f9a6a8b2dce3"),
        s: hex!("12934798f9609664b7709ea5648f73678ee584ba660baf48a653372407bc27c1"),
        recovery_id: 0,
        public_key_x: hex!("50d072af533ea1ff4c1d80f4ecbbec37515ef34f0e5e6a9a4c5704b7d4033c43"),
        public_key_y: hex!("69c875361f73614e5d9a8521efa03eebb4d453310c953b5dae53162026c12f19"),
    },
    SigningTestVector {
        secret_key: hex!("b9310d5806244567d9e9fc3daab7ceb8923262040b5d65023b8ab9cc9f92a6f5"),
        message: b"differential message #3",
        digest: hex!("efcbd08301cce13cd222eedc94188abb1122542399deaee274a4cdfcd856245b"),
        nonce: hex!("dcf4e762e2a7303c01956a7c2e3de5afbe485da4075784513034f5a8c78322d3"),
        r: hex!("59ca7c966754640b1ac6ed76e3ddb69fe723f8fe40bacc357b7ef4cdf8265964"),
        s: hex!("559836ba37811e5fc920e8580da3d7df63fdb26f3b3fa10c818238dcdf8dc2f1"),
        recovery_id: 0,
        public_key_x: hex!("44fa14f6ba85a6cf3d73b3ffcb35d8946b785e493248f270eefc572a6f3e11e3"),
        public_key_y: hex!("dd29a990333437549cb2987944320b2618d213ca2e3957f6c9c9e7ba57a703bb"),
    },
    SigningTestVector {
        secret_key: hex!("5b881e73313dba8267e8853ab1cdc66ac80e9f5c734e06b67c14a450244744bc"),
        message: b"differential message #4",
        digest: hex!("7c0a5691d57fdae2ba70d44c5227d4539059492de555de97a377f31f6efc8e98"),
        nonce: hex!("bba2ad65b96339c655c55e63787e02dd2e119a4622b6fc927d53370b94155d39"),
        r: hex!("3b2308e2ef8dd8c42fc5d4320951fd7094cd9b54f3394a94ecaf049559627ae4"),
        s: hex!("311847d8f3ed32a2111c2a99bd323199c54eb56c9af8edfbdf10783f8c24c8d3"),
        recovery_id: 1,
        public_key_x: hex!("364eea332a19792ff46aa2b1a7d07b8a3b9e61696da3d8f970ac76a4097601a1"),
        public_key_y: hex!("5751603fdbf20e9175f609ee603487acf75f5f5c0f046a44edbca20df4e87e78"),
    },
    SigningTestVector {
        secret_key: hex!("64e0c7388742691a82fe9aae8bc9edd58f3afdf70f8f827474be20c028f7e932"),
        message: b"differential message #5",
        digest: hex!("d165af47043fef6405a48fc1f4fc41cde01a548e4d013deaa61d70d64d6728f2"),
        nonce: hex!("4f50f5e52a65a46e11e7544e9b85f45e4e9c7ba9b4ccf27cafe7ea51b2531582"),
        r: hex!("2d0941c97ebdf50d2d8642d3490d3b4323a694d0d239e81a85241054b84c80ee"),
        s: hex!("1beec12a74c340da9760a52df14e9459af47566598582bbee451e390dbc2944d"),
        recovery_id: 0,
        public_key_x: hex!("3ced50ea3c0e8ffa4ef9da89f3fc9ea25bf7a5f95c50b4c9516ed91ed4a6ce6b"),
        public_key_y: hex!("7cc89b263118abacae04d7315ca58eaa77de9957a858174648ec5cde0fe366c6"),
    },
    SigningTestVector {
        secret_key: hex!("9b99d0562b8c774aa33544fc0df3efc9877b89de77ec1c6a3e9f834b1fff5af7"),
        message: b"differential message #6",
        digest: hex!("25eb8397d062dca9eb3c8c2040d781ec77e9875ce5fcf072cdd89645a4fd52fc"),
        nonce: hex!("7b76d8875c965066ee94a513a702a3c544ef516a8262ac5591c4462629e78f26"),
        r: hex!("f8c16a1c4811a8beaace14e571661e2e1981050fc936a531b1c55ff25abaa796"),
        s: hex!("777ff36b40bc26ad4c4541ecbf61f44b60521d7d73d891dd1187ccf9c0dc5cd5"),
        recovery_id: 1,
        public_key_x: hex!("9533808c983bb2eaeb393aef140fdcc670fe8bb7b493267389766f1e60b94f6e"),
        public_key_y: hex!("88861c9dbae777c31fb76e0c0ec3bbee28378d014d22b96c0b5005974a967895"),
    },
    SigningTestVector {
        secret_key: hex!("8109c1b605a6d9ca882480ba2f8532cd78999766db7488ec3268570d1026a351"),
        message: b"differential message #7",
        digest: hex!("6f9453f2b5541dc54692e54ff0be80b7286ced2f779afb490cc904695e3695a9"),
        nonce: hex!("af74a3c889beeb176cb7a654d1d724cef006ba052cadad6a6f25224843ba086c"),
        r: hex!("c304808a815aed145e24a47c90fca3bbcbdc58a7a0018ad7384cc2b20071abbc"),
        s: hex!("741a804699bb4a0a88c74a618fd4478cb8c5de7e3f50bcc3e80cda64456f3455"),
        recovery_id: 0,
        public_key_x: hex!("2d2b5a1255cbc6f64109421fc242fb2d649b5aa3a8843ace597729256596bb39"),
        public_key_y: hex!("5155020eef8b58f6e980beca00d833a0bd24da1e50e3a460106272c64597539d"),
    },
    SigningTestVector {
        secret_key: hex!("13798e4d29282f8c94ffbc0edc68b0579aa3a930353fbcadc26bb03969d163dc"),
        message: b"differential message #8",
        digest: hex!("df5ae0d033b80717e07e195d468580c750722be040339a37746cc90559c06bed"),
        nonce: hex!("fbae0a2fb701a4096c751ea8f688dfecbaeea054cc3e47cd0bce43138b1355db"),
        r: hex!("d8956255d9e0fe415f0bf63037ef9a64dca46214e45c4773a22d6dc6694c5216"),
        s: hex!("27b411efde9f893dc5618cc6a26a7bd0bc3ca0a24db8c36e9bb1582b12fe5aae"),
        recovery_id: 0,
        public_key_x: hex!("363e725189a5bd86fba6ff306a8e5319fa0f0966e6f72b1e86f25ab99bf90ae9"),
        public_key_y: hex!("a2df7a05c219dfe6d92478389ddd54195c8ea2b72f9e3662f5438aeb8d9006b1"),
    },
    SigningTestVector {
        secret_key: hex!("68f5d0c964ab98c10073436b8a652174e954a008e398eb834c2cdf7a2b47d6d4"),
        message: b"differential message #9",
        digest: hex!("9bef0c8e82ecfdf7ab510cd9ab3d1d3da29e3fcec9deea767be237a0d74476cb"),
        nonce: hex!("bb6b9dadd8fb3318b9315fbf55cd1a0a789d0f16d1ad81ef3e24fa490bd50757"),
        r: hex!("7e1bf5f00078a4ef84730d36d597e73c9006e17a94d43d828e680d8831d68276"),
        s: hex!("38049cfb386ef5bb0e8efdb3362716de20dc47b4f5c9295acd47ca5dc3dc8f92"),
        recovery_id: 0,
        public_key_x: hex!("307de56babf88875fd2ed160939308f5d551c2a22380276a8b5764dd80b0299c"),
        public_key_y: hex!("e04c644df4856f76ee37ab6dd0ddfa2c2ad79789c1c2a76ad6c57a6064cbf6a6"),
    },
    SigningTestVector {
        secret_key: hex!("62c98334dc8a4bab107f9b9b570502b2a6661baf6b2999a5bc328a6a63e24759"),
        message: b"differential message #10",
        digest: hex!("95c3829a1cee8075eadd41a6517d584c1ee1a5472b52ec5bc607f679979416ee"),
        nonce: hex!("8aae5c659a0c9f2f7f1fec58985991ec27230990d8b42a3093cbcd57e5880f22"),
        r: hex!("0b90980d7ba1d9ba1ee49a452768b03bd172835b4b1ddb9f1e71540ed290fe14"),
        s: hex!("1e7b899be117e1a4b2012c384f7610fdbd3e6f048df894253432babfcf8f1a2a"),
        recovery_id: 0,
        public_key_x: hex!("7503f4efe6df44bdb6e6acf980734783b9240004467e9fd24638e3722d44d745"),
        public_key_y: hex!("d8af7370c65525a9666522bfcd5d77942c7388ce158b988edc4f229062106d09"),
    },
    SigningTestVector {
        secret_key: hex!("1f09cb7bb1a3048b561008075e12c24c5b282fdf44722f6be441d971a580ab19"),
        message: b"differential message #11",
        digest: hex!("024a6a26276c7a1fbde1e2f8f60879641608f82dafedeceedb37172d45ff2740"),
        nonce: hex!("5843c898c9d9f6ab981752a3524c7d5f64006f326233fce44a05d6ae44d4091d"),
        r: hex!("059812a6848c01a059962290e7635c5e0cba600a2150203ea96c2901d423d806"),
        s: hex!("542b320f2e219bd69a8196aa591c219541d7abcfbe6721170c2f63245f25fbbf"),
        recovery_id: 0,
        public_key_x: hex!("f125ee7ea06c2b0115cc5180d349be48a37bbcd4092e405b5d1b2dcfe60e6f6b"),
        public_key_y: hex!("4726ca616e554532055b316cf9f922b1159881dae898c878be30e40613236f15"),
    },
];

/// Public key recovery test vector over an externally supplied digest.
pub struct RecoveryTestVector {
    /// Compressed SEC1 public key
    pub public_key: [u8; 33],

    /// Message digest
    pub digest: [u8; 32],

    /// Signature `r` component
    pub r: [u8; 32],

    /// Signature `s` component
    pub s: [u8; 32],

    /// Raw recovery id in `0..=3`
    pub recovery_id: u8,
}

/// Recovery over `SHA-256("example message")`, plus a contrived signature
/// whose ephemeral point has `x >= n`.
pub const RECOVERY_TEST_VECTORS: &[RecoveryTestVector] = &[
    RecoveryTestVector {
        public_key: hex!("021a7a569e91dbf60581509c7fc946d1003b60c7dee85299538db6353538d59574"),
        digest: hex!("ad84cd0b10fc028738971b078124aec2a0e7c6d986a381be0b386f32bee887af"),
        r: hex!("ce53abb3721bafc561408ce8ff99c909f7f0b18a2f788649d6470162ab1aa032"),
        s: hex!("3971edc523a6d6453f3fb6128d318d9db1a5ff3386feb1047d9816e780039d52"),
        recovery_id: 0,
    },
    RecoveryTestVector {
        public_key: hex!("036d6caac248af96f6afa7f904f550253a0f3ef3f5aa2fe6838a95b216691468e2"),
        digest: hex!("ad84cd0b10fc028738971b078124aec2a0e7c6d986a381be0b386f32bee887af"),
        r: hex!("46c05b6368a44b8810d79859441d819b8e7cdc8bfd371e35c53196f4bcacdb51"),
        s: hex!("35c7facce2a97b95eacba8a586d87b7958aaf8368ab29cee481f76e871dbd9cb"),
        recovery_id: 1,
    },
    RecoveryTestVector {
        public_key: hex!("03a4d649b23140ff0597c47fb1d4879e1a8955a458e9e5bfa72034ac104807a319"),
        digest: hex!("710ffa51fc19070b2bf1e03eb85a993a7a88bbef944fdb4b9ef3f5333ff1fab8"),
        r: hex!("0000000000000000000000000000000000000000000000000000000000000002"),
        s: hex!("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"),
        recovery_id: 3,
    },
];

/// Verification test vector with a non-Keccak digest.
pub struct VerificationTestVector {
    /// Public key x-coordinate
    pub public_key_x: [u8; 32],

    /// Public key y-coordinate
    pub public_key_y: [u8; 32],

    /// Message digest
    pub digest: [u8; 32],

    /// Signature `r` component
    pub r: [u8; 32],

    /// Signature `s` component
    pub s: [u8; 32],
}

/// Signature produced with a random nonce; verifies but is not reproducible
/// by deterministic signing.
pub const VERIFICATION_TEST_VECTORS: &[VerificationTestVector] = &[VerificationTestVector {
    public_key_x: hex!("779dd197a5df977ed2cf6cb31d82d43328b790dc6b3b7d4437a427bd5847dfcd"),
    public_key_y: hex!("e94b724a555b6d017bb7607c3e3281daf5b1699d6ef4124975c9237b917d426f"),
    digest: hex!("4b688df40bcedbe641ddb16ff0a1842d9c67ea1c3bf63f3e0471baa664531d1a"),
    r: hex!("241097efbf8b63bf145c8961dbdf10c310efbb3b2676bbc0f8b08505c9e2f795"),
    s: hex!("021006b7838609339e8b415a7f9acb1b661828131aef1ecbc7955dfb01f3ca0e"),
}];
