//! Default-generator registry lifecycle.
//!
//! The registry is process-wide and one-shot, so the entire lifecycle is
//! exercised by a single test function in its own test binary: the unset
//! failure must be observed before any set, and the set-race must produce
//! exactly one winner.

use std::thread;

use fontaine_core::{RngError, Source};
use fontaine_integration_tests::seeded_fortuna;

#[test]
fn default_generator_lifecycle() {
    // Before any set, every default-resolving call reports the ordering bug.
    assert_eq!(
        fontaine_core::default_generator().err(),
        Some(RngError::NoDefaultGenerator)
    );
    assert_eq!(
        fontaine_core::generate(16).unwrap_err(),
        RngError::NoDefaultGenerator
    );
    assert_eq!(
        fontaine_core::seeded().unwrap_err(),
        RngError::NoDefaultGenerator
    );
    assert_eq!(
        fontaine_core::block().unwrap_err(),
        RngError::NoDefaultGenerator
    );
    assert_eq!(
        fontaine_core::reseed(b"early").unwrap_err(),
        RngError::NoDefaultGenerator
    );
    assert_eq!(
        fontaine_core::accumulate(Source::OS, b"early").unwrap_err(),
        RngError::NoDefaultGenerator
    );

    // Concurrent installation: exactly one winner, every loser rejected.
    let winners: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    let seed = format!("contender {i}");
                    fontaine_core::set_default_generator(seeded_fortuna(seed.as_bytes())).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("setter thread panicked"))
            .filter(|&won| won)
            .count()
    });
    assert_eq!(winners, 1);

    // The transition is one-way: re-assignment is rejected forever.
    assert_eq!(
        fontaine_core::set_default_generator(seeded_fortuna(b"late")).unwrap_err(),
        RngError::DefaultGeneratorAlreadySet
    );

    // After a successful set, resolution is deterministic and operational.
    assert!(fontaine_core::default_generator().is_ok());
    assert!(fontaine_core::seeded().unwrap());
    assert_eq!(fontaine_core::block().unwrap(), 16);

    let first = fontaine_core::generate(32).unwrap();
    let second = fontaine_core::generate(32).unwrap();
    assert_eq!(first.len(), 32);
    assert_ne!(first, second);

    // Feeding and reseeding through the default path works too.
    fontaine_core::accumulate(Source::OS, &[0xab; 64]).unwrap();
    fontaine_core::reseed(b"more entropy").unwrap();
    assert_eq!(fontaine_core::generate(7).unwrap().len(), 7);
}
