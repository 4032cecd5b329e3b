//! Seedable random streams driving the walker.
//!
//! [`RandomSource`] owns two [`StdRng`] streams. The walk stream picks the start cell and the
//! cardinal step direction; the flight stream decides, orients and sizes flights. Keeping them
//! apart means that changing the flight chance never shifts the sequence of walk steps.
use glam::IVec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// One of the four cardinal step directions.
///
/// The discriminant order is the mapping from a uniform draw in `[0, 4)` and must not change:
/// seeded replays depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    PosX = 0,
    PosY = 1,
    NegX = 2,
    NegY = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::PosY,
        Direction::NegX,
        Direction::NegY,
    ];

    /// Maps a draw in `[0, 4)` to a direction.
    #[inline]
    pub fn from_index(index: u32) -> Direction {
        Self::ALL[(index & 3) as usize]
    }

    /// Unit offset of a single step.
    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::PosX => IVec2::X,
            Direction::PosY => IVec2::Y,
            Direction::NegX => IVec2::NEG_X,
            Direction::NegY => IVec2::NEG_Y,
        }
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Generate a random integer in `[min, max)`, or `min` when the range is empty.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let span = (max as i64 - min as i64) as f64;
    let offset = (rand01(rng) * span).floor() as i64;
    (min as i64 + offset).min(max as i64 - 1) as i32
}

/// A single uniform stream.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        rand01(&mut self.rng)
    }

    /// Uniform integer in `[min, max)`; returns `min` when `min >= max`.
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        rand_range(&mut self.rng, min, max)
    }

    /// Uniform cardinal direction.
    pub fn direction(&mut self) -> Direction {
        Direction::from_index(self.int(0, 4) as u32)
    }
}

/// Walk and flight streams used by one generation run.
#[derive(Clone, Debug)]
pub struct RandomSource {
    pub walk: RandomStream,
    pub flight: RandomStream,
}

impl RandomSource {
    /// Seeds both streams with the same value.
    ///
    /// The streams are correlated as a result; replays of a fixed seed stay identical.
    pub fn fixed(seed: u64) -> Self {
        Self {
            walk: RandomStream::from_seed(seed),
            flight: RandomStream::from_seed(seed),
        }
    }

    /// Seeds each stream independently from the thread-local OS-seeded generator.
    pub fn from_entropy() -> Self {
        let mut entropy = rand::rng();
        Self {
            walk: RandomStream::from_seed(entropy.next_u64()),
            flight: RandomStream::from_seed(entropy.next_u64()),
        }
    }

    /// Chooses [`RandomSource::fixed`] or [`RandomSource::from_entropy`].
    pub fn new(use_fixed_seed: bool, seed: u64) -> Self {
        if use_fixed_seed {
            Self::fixed(seed)
        } else {
            Self::from_entropy()
        }
    }
}
