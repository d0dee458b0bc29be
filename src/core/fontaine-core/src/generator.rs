//! The generator handle: one backend instance plus cross-cutting policy.
//!
//! The handle enforces, uniformly across backends:
//! - unseeded-use failure (`generate` on an unseeded handle fails instead of
//!   silently emitting low-entropy output),
//! - reseed throttling (internal reseeds triggered through `accumulate`
//!   respect a minimum interval; explicit `reseed` always applies),
//! - strict-mode buffering (strict handles allocate the exact block-rounded
//!   request; non-strict handles reuse a zeroized scratch buffer; output
//!   content is identical either way).

use std::time::{SystemTime, UNIX_EPOCH};

use zeroize::{Zeroize, Zeroizing};

use crate::backend::{Accumulated, Backend};
use crate::error::RngError;
use crate::fortuna::Fortuna;
use crate::hmac_drbg::HmacDrbg;
use crate::source::Source;

/// Minimum interval between internally-triggered reseeds, in milliseconds.
///
/// Resists attacker-controlled reseed flooding: an adversary who can push
/// entropy fragments cannot force pool folds faster than once per second.
pub const RESEED_INTERVAL_MS: u64 = 1000;

/// A monotonic-ish clock returning integer milliseconds.
pub type TimeSource = Box<dyn Fn() -> u64 + Send>;

fn wall_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Creation-time configuration for a [`Generator`].
#[derive(Default)]
pub struct GeneratorConfig {
    /// Initial seed material, applied as an explicit reseed at creation.
    pub seed: Option<Vec<u8>>,
    /// Force reference allocation behavior (see [`Generator::generate`]).
    pub strict: bool,
    /// Clock used for reseed throttling; wall clock when `None`.
    pub time_source: Option<TimeSource>,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("seed", &self.seed.as_ref().map(|s| s.len()))
            .field("strict", &self.strict)
            .field("time_source", &self.time_source.is_some())
            .finish()
    }
}

/// A generator handle wrapping one exclusively-owned backend.
///
/// All operations take `&mut self`: a handle shared across concurrent tasks
/// must be protected by an external lock (the default-generator registry
/// provides one for the process-wide handle).
pub struct Generator {
    backend: Box<dyn Backend>,
    strict: bool,
    created_at: u64,
    last_reseed: Option<u64>,
    time: TimeSource,
    scratch: Zeroizing<Vec<u8>>,
}

impl Generator {
    /// Wraps `backend` with the given configuration.
    pub fn new(backend: Box<dyn Backend>, config: GeneratorConfig) -> Self {
        let time = config.time_source.unwrap_or_else(|| Box::new(wall_clock));
        let now = time();
        let mut generator = Self {
            backend,
            strict: config.strict,
            created_at: now,
            last_reseed: None,
            time,
            scratch: Zeroizing::new(Vec::new()),
        };
        if let Some(seed) = config.seed {
            generator.reseed(&seed);
        }
        generator
    }

    /// A Fortuna-backed handle with the default pool count.
    pub fn fortuna(config: GeneratorConfig) -> Self {
        Self::new(Box::new(Fortuna::new()), config)
    }

    /// An HMAC-DRBG-backed handle.
    pub fn hmac_drbg(config: GeneratorConfig) -> Self {
        Self::new(Box::new(HmacDrbg::new()), config)
    }

    /// Returns exactly `n` uniformly distributed bytes.
    ///
    /// The backend produces output in multiples of its block size; the
    /// handle trims to `n`. Strict handles allocate the block-rounded
    /// request fresh on every call, matching reference test-vector runs;
    /// non-strict handles generate into a reusable scratch buffer that grows
    /// geometrically. The returned bytes are identical in both modes.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Unseeded`] if the handle has not been seeded.
    pub fn generate(&mut self, n: usize) -> Result<Vec<u8>, RngError> {
        let block = self.backend.block_size();
        let padded = n.div_ceil(block) * block;

        if self.strict {
            let mut buf = Zeroizing::new(vec![0u8; padded]);
            self.backend.generate_into(&mut buf)?;
            return Ok(buf[..n].to_vec());
        }

        if self.scratch.len() < padded {
            let grown = padded.next_power_of_two().max(block);
            self.scratch.resize(grown, 0);
        }
        let head = &mut self.scratch[..padded];
        self.backend.generate_into(head)?;
        let out = head[..n].to_vec();
        head.zeroize();
        Ok(out)
    }

    /// Deterministically mixes `seed` into the backend state.
    ///
    /// An explicit reseed represents deliberate caller intent and always
    /// applies immediately, bypassing the automatic-reseed throttle.
    pub fn reseed(&mut self, seed: &[u8]) {
        self.backend.reseed(seed);
        let now = (self.time)();
        self.last_reseed = Some(now);
        tracing::debug!(at = now, "explicit reseed applied");
    }

    /// Feeds a small entropy fragment from `source` into the backend.
    ///
    /// Cheap enough for tight polling loops. Internally-triggered reseeds
    /// respect [`RESEED_INTERVAL_MS`]; the first automatic reseed is always
    /// allowed.
    pub fn accumulate(&mut self, source: Source, data: &[u8]) {
        let now = (self.time)();
        let allowed = match self.last_reseed {
            None => true,
            Some(at) => now.saturating_sub(at) >= RESEED_INTERVAL_MS,
        };
        if self.backend.accumulate(source, data, allowed) == Accumulated::Reseeded {
            self.last_reseed = Some(now);
        }
    }

    /// Returns a reusable sink feeding `source`, for event loops that pump
    /// many fragments from one channel.
    pub fn accumulator(&mut self, source: Source) -> Accumulator<'_> {
        Accumulator {
            generator: self,
            source,
        }
    }

    /// True iff `generate` will not fail for lack of seeding.
    pub fn seeded(&self) -> bool {
        self.backend.seeded()
    }

    /// The backend's fixed output granularity in bytes.
    pub fn block(&self) -> usize {
        self.backend.block_size()
    }

    /// Number of internal entropy pools (0 if the backend is not pool-based).
    pub fn pools(&self) -> usize {
        self.backend.pools()
    }

    /// Whether strict mode is enabled.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Timestamp of handle creation, per the handle's time source.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Timestamp of the last successful reseed, if any.
    pub fn last_reseed(&self) -> Option<u64> {
        self.last_reseed
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("strict", &self.strict)
            .field("seeded", &self.seeded())
            .field("block", &self.block())
            .field("pools", &self.pools())
            .field("last_reseed", &self.last_reseed)
            .finish()
    }
}

/// A reusable entropy sink bound to one source tag.
#[derive(Debug)]
pub struct Accumulator<'a> {
    generator: &'a mut Generator,
    source: Source,
}

impl Accumulator<'_> {
    /// Feeds one fragment.
    pub fn feed(&mut self, data: &[u8]) {
        self.generator.accumulate(self.source, data);
    }
}
