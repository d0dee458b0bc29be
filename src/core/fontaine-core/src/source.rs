//! Entropy source tags.

use std::fmt;

/// Identifies an independent entropy channel feeding a generator.
///
/// Pool-based backends route bytes from different sources across their
/// internal pools in rotation, so diversity guarantees survive even if one
/// source is compromised or stalls. The tag itself is opaque; callers pick
/// one value per physically independent source and stick with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Source(pub u32);

impl Source {
    /// Timer / scheduling jitter.
    pub const TIMER: Source = Source(0);

    /// The operating system CSPRNG.
    pub const OS: Source = Source(1);

    /// A hardware random number generator.
    pub const HARDWARE: Source = Source(2);
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}
