//! Seed auto-selection.
//!
//! The sampler never touches process-wide randomness directly; callers hand
//! it a [`SeedSource`], drawn at most once per generation call.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::Rng;

/// Range auto-selected seeds are drawn from.
pub const AUTO_SEED_RANGE: Range<u32> = 1..100;

/// Supplies a seed when the caller did not pick one.
pub trait SeedSource {
    /// Draw one seed from [`AUTO_SEED_RANGE`].
    fn draw_seed(&mut self) -> u32;
}

/// Thread-local OS-seeded randomness; the interactive default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSeedSource;

impl SeedSource for ThreadSeedSource {
    fn draw_seed(&mut self) -> u32 {
        rand::thread_rng().gen_range(AUTO_SEED_RANGE)
    }
}

impl SeedSource for StdRng {
    fn draw_seed(&mut self) -> u32 {
        self.gen_range(AUTO_SEED_RANGE)
    }
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    fn draw_seed(&mut self) -> u32 {
        (**self).draw_seed()
    }
}
