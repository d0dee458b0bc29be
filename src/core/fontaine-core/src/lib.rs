//! # Fontaine Core
//!
//! A pluggable cryptographically-secure random-number-generation subsystem:
//! - a uniform [`Backend`] contract over interchangeable generator
//!   algorithms,
//! - two shipped backends: pool-based [`Fortuna`] for live entropy
//!   harvesting and deterministic [`HmacDrbg`] (SP 800-90A) for
//!   reproducibility,
//! - a [`Generator`] handle enforcing seeded-state checks, reseed throttling
//!   and strict-mode buffering uniformly across backends,
//! - a one-shot process-wide default generator and free functions resolving
//!   through it.
//!
//! ## Explicit handles vs. the process default
//!
//! Operations on a handle you own are methods on [`Generator`]. The free
//! functions at the crate root ([`generate`], [`reseed`], [`accumulate`],
//! [`block`], [`seeded`]) resolve through the default generator installed
//! with [`set_default_generator`] and fail with
//! [`RngError::NoDefaultGenerator`] until one is installed.
//!
//! ```no_run
//! use fontaine_core::{Generator, GeneratorConfig};
//!
//! # fn main() -> Result<(), fontaine_core::RngError> {
//! let mut generator = Generator::fortuna(GeneratorConfig::default());
//! generator.reseed(b"entropy gathered elsewhere");
//! let key = generator.generate(32)?;
//! # let _ = key;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod fortuna;
pub mod generator;
pub mod hmac_drbg;
pub mod registry;
pub mod source;

pub use backend::{Accumulated, Backend};
pub use error::RngError;
pub use fortuna::Fortuna;
pub use generator::{Accumulator, Generator, GeneratorConfig, TimeSource, RESEED_INTERVAL_MS};
pub use hmac_drbg::HmacDrbg;
pub use registry::{default_generator, set_default_generator};
pub use source::Source;

/// Returns exactly `n` bytes from the default generator.
///
/// # Errors
///
/// [`RngError::NoDefaultGenerator`] if none is installed,
/// [`RngError::Unseeded`] if the installed generator has not been seeded.
pub fn generate(n: usize) -> Result<Vec<u8>, RngError> {
    registry::lock_default()?.generate(n)
}

/// Mixes `seed` into the default generator, bypassing the reseed throttle.
///
/// # Errors
///
/// [`RngError::NoDefaultGenerator`] if none is installed.
pub fn reseed(seed: &[u8]) -> Result<(), RngError> {
    registry::lock_default()?.reseed(seed);
    Ok(())
}

/// Feeds an entropy fragment from `source` into the default generator.
///
/// # Errors
///
/// [`RngError::NoDefaultGenerator`] if none is installed.
pub fn accumulate(source: Source, data: &[u8]) -> Result<(), RngError> {
    registry::lock_default()?.accumulate(source, data);
    Ok(())
}

/// The default generator's output granularity in bytes.
///
/// # Errors
///
/// [`RngError::NoDefaultGenerator`] if none is installed.
pub fn block() -> Result<usize, RngError> {
    Ok(registry::lock_default()?.block())
}

/// Whether the default generator is seeded.
///
/// # Errors
///
/// [`RngError::NoDefaultGenerator`] if none is installed.
pub fn seeded() -> Result<bool, RngError> {
    Ok(registry::lock_default()?.seeded())
}
