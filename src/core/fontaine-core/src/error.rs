//! Generator error types.

use thiserror::Error;

/// Errors that can occur during random generation.
///
/// None of these are retried internally. They are contract violations or
/// explicit preconditions, surfaced immediately so the caller can decide
/// whether to seed and retry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RngError {
    /// The generator has not been seeded yet.
    ///
    /// Raised by `generate` when `seeded()` would report false. The caller
    /// must reseed or accumulate sufficient entropy first.
    #[error("generator is not seeded")]
    Unseeded,

    /// No default generator has been installed.
    ///
    /// Signals a process-initialization ordering bug: a default-resolving
    /// call ran before `set_default_generator` succeeded.
    #[error("no default generator installed")]
    NoDefaultGenerator,

    /// A default generator is already installed.
    ///
    /// The default slot is a one-shot assignment; a second
    /// `set_default_generator` call is a lifecycle bug, never a runtime
    /// condition.
    #[error("default generator already set")]
    DefaultGeneratorAlreadySet,
}
