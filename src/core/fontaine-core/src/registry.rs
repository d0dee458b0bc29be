//! The process-wide default generator slot.
//!
//! A write-once cell with a one-way unset→set transition: the first
//! `set_default_generator` wins, every later call fails, and there is no way
//! back to unset. This is deliberate: swapping the process generator
//! mid-flight could desynchronize concurrent consumers.
//!
//! The installed handle is shared by every consumer in the process, so the
//! slot wraps it in a `Mutex`; explicit handles callers own themselves stay
//! plain `&mut` state with no locking.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::RngError;
use crate::generator::Generator;

static DEFAULT_GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

/// Installs `generator` as the process default.
///
/// # Errors
///
/// Returns [`RngError::DefaultGeneratorAlreadySet`] if the slot is already
/// occupied. Under concurrent calls exactly one caller wins; the losers'
/// generators are dropped.
pub fn set_default_generator(generator: Generator) -> Result<(), RngError> {
    DEFAULT_GENERATOR
        .set(Mutex::new(generator))
        .map_err(|_| RngError::DefaultGeneratorAlreadySet)?;
    tracing::debug!("default generator installed");
    Ok(())
}

/// Returns the installed default generator slot.
///
/// # Errors
///
/// Returns [`RngError::NoDefaultGenerator`] if no generator has been
/// installed yet.
pub fn default_generator() -> Result<&'static Mutex<Generator>, RngError> {
    DEFAULT_GENERATOR.get().ok_or(RngError::NoDefaultGenerator)
}

/// Locks the default generator for one operation. Poisoned locks are
/// recovered, not propagated.
pub(crate) fn lock_default() -> Result<MutexGuard<'static, Generator>, RngError> {
    Ok(default_generator()?
        .lock()
        .unwrap_or_else(PoisonError::into_inner))
}
