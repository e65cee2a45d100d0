//! Reproducible seeding.
//!
//! Mazes are "daily" artwork: the default seed is derived from the calendar date, so every run on
//! the same day draws the same maze. The seed feeds an owned [`StdRng`] that callers thread
//! through the generator explicitly; nothing here touches a process-wide random source.

#![expect(
    clippy::module_name_repetitions,
    reason = "Seed names read better unqualified at call sites."
)]

use chrono::Local;
use log::debug;
use md5::{Digest as _, Md5};
use rand::{rngs::StdRng, SeedableRng as _};

/// Date format used to derive daily seeds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where a seed comes from.
///
/// Date-derived seeds make repeated runs on the same day draw the same maze. Explicit seeds are
/// meant for tests and for reproducing a specific maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// Derive the seed from a date string with [`daily_seed`].
    Date(String),
    /// Use the given seed as is.
    Explicit(u64),
}

impl SeedSource {
    /// Returns the seed for today's local date.
    #[must_use]
    pub fn today() -> Self {
        Self::Date(today())
    }

    /// Resolves the source into a concrete seed.
    #[must_use]
    pub fn resolve(&self) -> u64 {
        match self {
            Self::Date(date) => daily_seed(date),
            Self::Explicit(seed) => *seed,
        }
    }
}

/// Returns today's local date formatted with [`DATE_FORMAT`].
#[must_use]
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Derives a seed from a date string.
///
/// The seed is the first eight hexadecimal digits of the MD5 digest of the string, which is the
/// first four digest bytes read big-endian.
#[must_use]
pub fn daily_seed(date: &str) -> u64 {
    let digest = Md5::digest(date.as_bytes());
    let mut prefix = [0; 4];
    for (byte, digest_byte) in prefix.iter_mut().zip(digest.iter()) {
        *byte = *digest_byte;
    }
    let seed = u64::from(u32::from_be_bytes(prefix));

    debug!("Derived seed {seed} from date {date}");

    seed
}

/// Builds the owned random source for a seed.
///
/// The returned generator is passed by mutable reference into the carvers, so two mazes built from
/// the same seed draw the exact same sequence of choices.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
