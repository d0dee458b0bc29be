//! Fortuna-style pool-based generator backend.
//!
//! Follows the Ferguson–Schneier Fortuna design: entropy fragments are
//! routed across N accumulation pools, pool digests are periodically folded
//! into an AES-256 key, and output is AES-CTR keystream with a re-key after
//! every chunk so captured output never reveals future output.
//!
//! Construction details pinned by the known-answer tests below:
//! - explicit reseed: `key = SHA-256(SHA-256(key || seed))`, counter += 1
//! - pool fold k: pool `i` joins when `2^i` divides `k`; joined digests are
//!   appended after the old key under the same double hash
//! - output: AES-256 keystream over a 128-bit big-endian counter, re-keying
//!   with the next two keystream blocks after each chunk of at most 64 KiB
//!
//! This backend never seeds itself lazily: the first `generate` requires a
//! prior explicit `reseed` or an accumulate-triggered pool fold.

use std::collections::HashMap;

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::backend::{Accumulated, Backend};
use crate::error::RngError;
use crate::source::Source;

/// AES block size; the fixed output granularity of this backend.
pub const BLOCK_SIZE: usize = 16;

/// Default number of accumulation pools.
pub const DEFAULT_POOLS: usize = 32;

/// Upper bound on the pool count (pool `i` joins every `2^i`-th fold).
pub const MAX_POOLS: usize = 32;

/// Bytes pool 0 must hold before an internal reseed may fire.
pub const MIN_POOL_SIZE: usize = 64;

const KEY_SIZE: usize = 32;

/// Keystream emitted between re-keys.
const MAX_CHUNK: usize = 1 << 16;

/// The Fortuna pool-based backend.
pub struct Fortuna {
    key: Zeroizing<[u8; KEY_SIZE]>,
    counter: u128,
    seeded: bool,
    pools: Vec<Sha256>,
    pool_zero_bytes: usize,
    fold_count: u64,
    rotation: HashMap<Source, u32>,
}

impl Fortuna {
    /// Creates a fresh, unseeded instance with the default pool count.
    pub fn new() -> Self {
        Self::with_pools(DEFAULT_POOLS)
    }

    /// Creates a fresh, unseeded instance with `pools` accumulation pools.
    ///
    /// The count is clamped to `1..=32`.
    pub fn with_pools(pools: usize) -> Self {
        let pools = pools.clamp(1, MAX_POOLS);
        Self {
            key: Zeroizing::new([0u8; KEY_SIZE]),
            counter: 0,
            seeded: false,
            pools: (0..pools).map(|_| Sha256::new()).collect(),
            pool_zero_bytes: 0,
            fold_count: 0,
            rotation: HashMap::new(),
        }
    }

    fn rekey(&mut self, digest: &[u8]) {
        // key <- SHA-256(SHA-256(key || digest))
        let mut h = Sha256::new();
        h.update(&self.key[..]);
        h.update(digest);
        let key = Sha256::digest(h.finalize());
        self.key.copy_from_slice(&key);
        self.counter = self.counter.wrapping_add(1);
        self.seeded = true;
    }

    /// Fills `buf` with keystream blocks under `cipher`, advancing the
    /// counter. `buf.len()` must be a multiple of [`BLOCK_SIZE`].
    fn fill_keystream(&mut self, cipher: &Aes256, buf: &mut [u8]) {
        for block in buf.chunks_exact_mut(BLOCK_SIZE) {
            block.copy_from_slice(&self.counter.to_be_bytes());
            self.counter = self.counter.wrapping_add(1);
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
    }

    /// Folds due pools into the key and resets them.
    fn fold_pools(&mut self) {
        self.fold_count += 1;

        let mut h = Sha256::new();
        h.update(&self.key[..]);
        for (i, pool) in self.pools.iter_mut().enumerate() {
            if self.fold_count % (1u64 << i) == 0 {
                let digest = std::mem::take(pool).finalize();
                h.update(digest);
            }
        }
        let key = Sha256::digest(h.finalize());
        self.key.copy_from_slice(&key);
        self.counter = self.counter.wrapping_add(1);
        self.pool_zero_bytes = 0;
        self.seeded = true;

        tracing::debug!(fold = self.fold_count, "fortuna pool reseed applied");
    }
}

impl Default for Fortuna {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for Fortuna {
    fn generate_into(&mut self, buf: &mut [u8]) -> Result<(), RngError> {
        if !self.seeded {
            return Err(RngError::Unseeded);
        }
        debug_assert_eq!(buf.len() % BLOCK_SIZE, 0);

        for chunk in buf.chunks_mut(MAX_CHUNK) {
            let cipher = Aes256::new(GenericArray::from_slice(&self.key[..]));
            self.fill_keystream(&cipher, chunk);

            // Re-key with the next two keystream blocks so state captured
            // after this call cannot reproduce the chunk above.
            let mut next = Zeroizing::new([0u8; KEY_SIZE]);
            self.fill_keystream(&cipher, &mut next[..]);
            self.key.copy_from_slice(&next[..]);
        }

        Ok(())
    }

    fn reseed(&mut self, seed: &[u8]) {
        self.rekey(seed);
    }

    fn accumulate(&mut self, source: Source, data: &[u8], reseed_allowed: bool) -> Accumulated {
        let slot = self.rotation.entry(source).or_insert(0);
        let index = (*slot as usize) % self.pools.len();
        *slot = slot.wrapping_add(1);

        self.pools[index].update(data);
        if index == 0 {
            self.pool_zero_bytes += data.len();
        }

        if reseed_allowed && self.pool_zero_bytes >= MIN_POOL_SIZE {
            self.fold_pools();
            Accumulated::Reseeded
        } else {
            Accumulated::Buffered
        }
    }

    fn seeded(&self) -> bool {
        self.seeded
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn pools(&self) -> usize {
        self.pools.len()
    }
}

impl std::fmt::Debug for Fortuna {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fortuna")
            .field("key", &"[REDACTED]")
            .field("seeded", &self.seeded)
            .field("pools", &self.pools.len())
            .field("fold_count", &self.fold_count)
            .finish()
    }
}
