//! Unnormalized per-direction weights.

use crate::direction::Direction;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Six non-negative weights, index-aligned with [`Direction`].
///
/// A vector whose entries are all zero means there is no viable
/// direction to grow in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityVector(pub [u32; 6]);

impl ProbabilityVector {
    pub fn zeros() -> Self {
        Self([0; 6])
    }

    pub fn from_weights(weights: [u32; 6]) -> Self {
        Self(weights)
    }

    #[inline]
    pub fn get(&self, dir: Direction) -> u32 {
        self.0[dir.index()]
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, weight: u32) {
        self.0[dir.index()] = weight;
    }

    /// Adds `bonus` on top of the current weight for `dir`.
    #[inline]
    pub fn add(&mut self, dir: Direction, bonus: u32) {
        self.0[dir.index()] += bonus;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Draws a direction with probability proportional to its weight.
    ///
    /// ### Parameters
    /// - `rng` - Random source for the draw.
    ///
    /// ### Returns
    /// `None` if every weight is zero, otherwise the sampled direction.
    /// Zero-weight directions are never returned.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<Direction> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let mut roll = rng.random_range(0..total);
        for dir in Direction::ALL {
            let w = self.get(dir);
            if roll < w {
                return Some(dir);
            }
            roll -= w;
        }
        None
    }
}

impl Index<Direction> for ProbabilityVector {
    type Output = u32;

    fn index(&self, dir: Direction) -> &u32 {
        &self.0[dir.index()]
    }
}

impl IndexMut<Direction> for ProbabilityVector {
    fn index_mut(&mut self, dir: Direction) -> &mut u32 {
        &mut self.0[dir.index()]
    }
}
