//! Keccak-256 as used by Ethereum.
//!
//! This is the original Keccak submission with the `0x01` padding byte, not
//! the FIPS 202 SHA3-256 variant (which pads with `0x06`). The two produce
//! different digests for every input.

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Size of a Keccak-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Sponge rate for a 512-bit capacity: 1088 bits.
const RATE: usize = 136;

const ROUNDS: usize = 24;

const STATE_LANES: usize = 25;

const PAD_BYTE: u8 = 0x01;

const RC: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// ρ rotation offsets, in π traversal order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// π lane traversal order.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Keccak-f\[1600\] permutation. Lane `(x, y)` lives at index `x + 5 * y`.
fn keccak_f1600(state: &mut [u64; STATE_LANES]) {
    for rc in RC {
        // θ
        let mut c = [0u64; 5];
        for (x, column) in c.iter_mut().enumerate() {
            *column = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // ρ and π
        let mut last = state[1];
        for (&j, &rot) in PI.iter().zip(RHO.iter()) {
            let next = state[j];
            state[j] = last.rotate_left(rot);
            last = next;
        }

        // χ
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[x + 5 * y] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // ι
        state[0] ^= rc;
    }
}

/// Streaming Keccak-256 hasher.
///
/// ```
/// use ethk256::keccak::{keccak256, Keccak256};
///
/// let mut hasher = Keccak256::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), keccak256(b"hello world"));
/// ```
#[derive(Clone)]
pub struct Keccak256 {
    state: [u64; STATE_LANES],
    buffer: [u8; RATE],
    pos: usize,
}

impl Keccak256 {
    /// Creates a hasher with an empty sponge.
    pub const fn new() -> Self {
        Self {
            state: [0; STATE_LANES],
            buffer: [0; RATE],
            pos: 0,
        }
    }

    /// Absorbs `data` into the sponge.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = core::cmp::min(RATE - self.pos, data.len());
            self.buffer[self.pos..self.pos + take].copy_from_slice(&data[..take]);
            self.pos += take;
            data = &data[take..];

            if self.pos == RATE {
                self.absorb_block();
            }
        }
    }

    /// Pads the final block and squeezes out the 32-byte digest.
    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        self.buffer[self.pos..].fill(0);
        self.buffer[self.pos] ^= PAD_BYTE;
        self.buffer[RATE - 1] ^= 0x80;
        self.absorb_block();

        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        out
    }

    fn absorb_block(&mut self) {
        for (lane, chunk) in self.state.iter_mut().zip(self.buffer.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(bytes);
        }
        keccak_f1600(&mut self.state);
        self.pos = 0;
    }
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Keccak256 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keccak256").finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Keccak256 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

/// Computes the Keccak-256 digest of `data` in one shot.
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize()
}
