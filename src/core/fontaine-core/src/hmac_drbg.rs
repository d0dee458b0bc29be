//! HMAC-DRBG generator backend.
//!
//! Deterministic construction per NIST SP 800-90A (HMAC_DRBG with SHA-256).
//! Seeding is mandatory and explicit: there is no automatic internal reseed
//! from accumulated entropy. Entropy fed through `accumulate` is buffered
//! and drained into the next explicit `reseed`. Intended for reproducible
//! output (test vectors, deterministic simulation); use the Fortuna backend
//! for live entropy harvesting.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::backend::{Accumulated, Backend};
use crate::error::RngError;
use crate::source::Source;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 output size; the fixed output granularity of this backend.
pub const BLOCK_SIZE: usize = 32;

/// The HMAC-DRBG backend.
pub struct HmacDrbg {
    key: Zeroizing<[u8; BLOCK_SIZE]>,
    value: Zeroizing<[u8; BLOCK_SIZE]>,
    reseed_counter: u64,
    pending: Zeroizing<Vec<u8>>,
    seeded: bool,
}

impl HmacDrbg {
    /// Creates a fresh, unseeded instance (K = 0x00.., V = 0x01.. per
    /// SP 800-90A instantiation).
    pub fn new() -> Self {
        Self {
            key: Zeroizing::new([0x00; BLOCK_SIZE]),
            value: Zeroizing::new([0x01; BLOCK_SIZE]),
            reseed_counter: 0,
            pending: Zeroizing::new(Vec::new()),
            seeded: false,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key[..]).expect("HMAC can take key of any size")
    }

    /// The SP 800-90A update function.
    fn update(&mut self, provided: &[u8]) {
        let mut mac = self.mac();
        mac.update(&self.value[..]);
        mac.update(&[0x00]);
        mac.update(provided);
        self.key.copy_from_slice(&mac.finalize().into_bytes());

        let mut mac = self.mac();
        mac.update(&self.value[..]);
        self.value.copy_from_slice(&mac.finalize().into_bytes());

        if !provided.is_empty() {
            let mut mac = self.mac();
            mac.update(&self.value[..]);
            mac.update(&[0x01]);
            mac.update(provided);
            self.key.copy_from_slice(&mac.finalize().into_bytes());

            let mut mac = self.mac();
            mac.update(&self.value[..]);
            self.value.copy_from_slice(&mac.finalize().into_bytes());
        }
    }
}

impl Default for HmacDrbg {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HmacDrbg {
    fn generate_into(&mut self, buf: &mut [u8]) -> Result<(), RngError> {
        if !self.seeded {
            return Err(RngError::Unseeded);
        }
        debug_assert_eq!(buf.len() % BLOCK_SIZE, 0);

        for block in buf.chunks_exact_mut(BLOCK_SIZE) {
            let mut mac = self.mac();
            mac.update(&self.value[..]);
            self.value.copy_from_slice(&mac.finalize().into_bytes());
            block.copy_from_slice(&self.value[..]);
        }

        self.update(&[]);
        self.reseed_counter = self.reseed_counter.saturating_add(1);
        Ok(())
    }

    fn reseed(&mut self, seed: &[u8]) {
        if self.pending.is_empty() {
            self.update(seed);
        } else {
            let mut material = Zeroizing::new(Vec::with_capacity(seed.len() + self.pending.len()));
            material.extend_from_slice(seed);
            material.extend_from_slice(&self.pending);
            self.update(&material);
            self.pending.zeroize();
        }
        self.reseed_counter = 1;
        self.seeded = true;
    }

    fn accumulate(&mut self, _source: Source, data: &[u8], _reseed_allowed: bool) -> Accumulated {
        // No pools: fragments wait for the next explicit reseed.
        self.pending.extend_from_slice(data);
        Accumulated::Buffered
    }

    fn seeded(&self) -> bool {
        self.seeded
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn pools(&self) -> usize {
        0
    }
}

impl std::fmt::Debug for HmacDrbg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacDrbg")
            .field("key", &"[REDACTED]")
            .field("seeded", &self.seeded)
            .field("reseed_counter", &self.reseed_counter)
            .finish()
    }
}
