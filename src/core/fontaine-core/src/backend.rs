//! The capability contract every generator algorithm satisfies.
//!
//! A backend is a self-contained PRNG construction: it owns its private
//! state and exposes a fixed set of operations. The [`Generator`] wrapper
//! routes calls to a backend without ever inspecting which construction it
//! holds; cross-cutting policy (seeded-state checks, reseed throttling,
//! strict-mode buffering) lives in the wrapper, not here.
//!
//! [`Generator`]: crate::generator::Generator

use crate::error::RngError;
use crate::source::Source;

/// Outcome of feeding entropy into a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulated {
    /// The fragment was buffered; no reseed took place.
    Buffered,
    /// The fragment pushed an internal pool over its threshold and an
    /// internal reseed was applied.
    Reseeded,
}

/// A concrete generator algorithm.
///
/// Implementations must be forward-secure: output already produced must not
/// be recoverable from the state left behind after a `generate_into` call.
/// Construction never blocks and never reads external entropy: seeding
/// happens only through [`reseed`](Backend::reseed) and
/// [`accumulate`](Backend::accumulate).
pub trait Backend: Send {
    /// Fills `buf` with uniformly distributed bytes, advancing the state.
    ///
    /// `buf.len()` must be a multiple of [`block_size`](Backend::block_size);
    /// the wrapper sizes buffers accordingly and trims to the caller's
    /// requested length.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Unseeded`] if the backend has not been seeded.
    /// Failing does not mutate seeded-state: the call can be retried after
    /// seeding.
    fn generate_into(&mut self, buf: &mut [u8]) -> Result<(), RngError>;

    /// Deterministically mixes `seed` into the state.
    ///
    /// After exactly one call the backend is seeded.
    fn reseed(&mut self, seed: &[u8]);

    /// Routes a small entropy fragment from `source` into internal state.
    ///
    /// `reseed_allowed` carries the wrapper's throttling decision: a
    /// pool-based backend may apply an internal reseed only when it is true.
    /// The return value reports whether a reseed was actually applied so the
    /// wrapper can update its timestamp.
    fn accumulate(&mut self, source: Source, data: &[u8], reseed_allowed: bool) -> Accumulated;

    /// True iff `generate_into` will not fail for lack of seeding.
    fn seeded(&self) -> bool;

    /// The fixed output granularity in bytes.
    fn block_size(&self) -> usize;

    /// Number of internal entropy pools (0 if not pool-based).
    fn pools(&self) -> usize;
}
