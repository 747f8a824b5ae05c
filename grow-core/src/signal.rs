//! The growth signal walked from the tree base toward a growing tip.

use crate::direction::Direction;
use glam::IVec3;

/// One in-flight growth step.
///
/// Created by the pulse driver at the start of a pulse, handed to the
/// species [`crate::bias::GrowthLogic`] at each node, and consumed when
/// the pulse grows a node or runs out of energy.
///
/// ### Fields
/// - `direction` - Current travel direction.
/// - `in_trunk` - Whether the signal is still in the trunk column.
/// - `step_count` - Steps taken so far along the current path.
/// - `turn_count` - Direction changes taken so far.
/// - `energy` - Remaining growth budget.
/// - `delta` - Offset of the signal from the tree base.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthSignal {
    pub direction: Direction,
    pub in_trunk: bool,
    pub step_count: u32,
    pub turn_count: u32,
    pub energy: f32,
    pub delta: IVec3,
}

impl GrowthSignal {
    /// A fresh signal at the tree base, travelling up the trunk.
    pub fn new(energy: f32) -> Self {
        Self {
            direction: Direction::Up,
            in_trunk: true,
            step_count: 0,
            turn_count: 0,
            energy,
            delta: IVec3::ZERO,
        }
    }

    /// Direction the signal came from.
    #[inline]
    pub fn origin_direction(&self) -> Direction {
        self.direction.opposite()
    }

    /// Changes travel direction.
    ///
    /// The first turn takes the signal out of the trunk.
    ///
    /// ### Returns
    /// `true` if the direction actually changed.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.direction {
            return false;
        }
        self.direction = dir;
        self.turn_count += 1;
        self.in_trunk = false;
        true
    }

    /// Moves one voxel along `direction` and spends one unit of energy.
    ///
    /// ### Returns
    /// `false` once the energy budget is exhausted.
    pub fn step(&mut self) -> bool {
        self.delta += self.direction.offset();
        self.step_count += 1;
        self.energy -= 1.0;
        self.energy > 0.0
    }
}
