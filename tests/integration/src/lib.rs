//! Integration test helpers for the Fontaine workspace.
//!
//! The behavioral tests live under `tests/`; this crate only carries the
//! shared fixtures: pre-seeded handles and a manually advanced clock for
//! exercising reseed throttling.

// Allow unwrap() in test support code.
#![allow(clippy::disallowed_methods)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fontaine_core::{Fortuna, Generator, GeneratorConfig, TimeSource};

/// A clock whose current time is advanced explicitly by the test.
pub fn manual_clock() -> (Arc<AtomicU64>, TimeSource) {
    let now = Arc::new(AtomicU64::new(0));
    let clock = now.clone();
    (now, Box::new(move || clock.load(Ordering::SeqCst)))
}

/// A Fortuna-backed handle seeded at creation.
pub fn seeded_fortuna(seed: &[u8]) -> Generator {
    Generator::fortuna(GeneratorConfig {
        seed: Some(seed.to_vec()),
        ..GeneratorConfig::default()
    })
}

/// An HMAC-DRBG-backed handle seeded at creation.
pub fn seeded_hmac_drbg(seed: &[u8]) -> Generator {
    Generator::hmac_drbg(GeneratorConfig {
        seed: Some(seed.to_vec()),
        ..GeneratorConfig::default()
    })
}

/// A small-pool Fortuna handle driven by the given clock, for throttle tests.
pub fn pooled_fortuna(pools: usize, clock: TimeSource) -> Generator {
    Generator::new(
        Box::new(Fortuna::with_pools(pools)),
        GeneratorConfig {
            time_source: Some(clock),
            ..GeneratorConfig::default()
        },
    )
}
