//! Per-species direction bias applied as a growth signal passes a node.
//!
//! The pulse driver builds a default [`ProbabilityVector`] for the node,
//! hands it to the species' [`GrowthLogic`], samples a direction from
//! the result and finally reports the choice back through
//! [`GrowthLogic::on_direction_chosen`].
//!
//! [`ConicalBias`] is the conifer shape: trunk-vertical growth, lateral
//! branching only every second trunk step once the trunk has thickened,
//! and a heavy energy cost for leaving the trunk sideways.

use crate::{
    config::GrowthParams, direction::Direction, prob::ProbabilityVector, signal::GrowthSignal,
};
use std::fmt;

/// Growth callbacks a species can override.
///
/// The defaults leave the caller's map untouched and never change the
/// signal, which is the behaviour of a species without a shape of its own.
pub trait GrowthLogic: Send + Sync + fmt::Debug {
    /// Reweights the candidate directions for the signal at a node.
    ///
    /// ### Parameters
    /// - `params` - Current growth parameters of the species.
    /// - `radius` - Integer branch radius at the current node (`>= 1`).
    /// - `signal` - The signal passing through the node.
    /// - `prob_map` - Caller defaults for this node.
    ///
    /// ### Returns
    /// The adjusted weights.
    fn compute_direction_bias(
        &self,
        params: &GrowthParams,
        radius: u32,
        signal: &GrowthSignal,
        prob_map: ProbabilityVector,
    ) -> ProbabilityVector {
        let _ = (params, radius, signal);
        prob_map
    }

    /// Called once the caller has sampled `chosen`; returns it unchanged.
    fn on_direction_chosen(&self, chosen: Direction, signal: &mut GrowthSignal) -> Direction {
        let _ = signal;
        chosen
    }
}

/// Species logic that keeps the caller's defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralLogic;

impl GrowthLogic for NeutralLogic {}

/// One named step of the conical bias, applied in [`ConicalBias::RULES`]
/// order. Later rules overwrite earlier ones at the same index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiasRule {
    /// Down is never allowed.
    ZeroDown,
    /// Up gets the species' up probability inside the trunk, else 0.
    TrunkUpWeight,
    /// The four lateral entries get one shared weight, gated inside the trunk.
    LateralGate,
    /// The direction the signal came from is disabled.
    OriginZero,
    /// Current travel direction gets a bonus outside the trunk.
    ContinuationBonus,
}

impl BiasRule {
    pub fn apply(
        self,
        bias: &ConicalBias,
        up_weight: u32,
        radius: u32,
        signal: &GrowthSignal,
        probs: &mut ProbabilityVector,
    ) {
        match self {
            BiasRule::ZeroDown => probs[Direction::Down] = 0,
            BiasRule::TrunkUpWeight => {
                probs[Direction::Up] = if signal.in_trunk { up_weight } else { 0 };
            }
            BiasRule::LateralGate => {
                // In the trunk, turns are only allowed on odd steps of a non-twig.
                let open = !signal.in_trunk || (signal.step_count % 2 == 1 && radius > 1);
                let weight = if open { bias.lateral_weight } else { 0 };
                for dir in Direction::LATERAL {
                    probs[dir] = weight;
                }
            }
            BiasRule::OriginZero => probs[signal.origin_direction()] = 0,
            BiasRule::ContinuationBonus => {
                let bonus = if signal.in_trunk {
                    0
                } else if signal.turn_count == 1 {
                    bias.turn_bonus
                } else {
                    bias.travel_bonus
                };
                probs.add(signal.direction, bonus);
            }
        }
    }
}

/// Direction bias for conical, slow-growing trees.
///
/// The continue-trunk weight is read from [`GrowthParams::up_probability`]
/// on every call, so parameter overrides take effect immediately.
///
/// ### Fields
/// - `lateral_weight` - Weight of each open lateral direction.
/// - `turn_bonus` - Travel bonus right after the first turn.
/// - `travel_bonus` - Travel bonus on later branch steps.
/// - `trunk_exit_divisor` - Energy divisor when a trunk signal turns sideways.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConicalBias {
    pub lateral_weight: u32,
    pub turn_bonus: u32,
    pub travel_bonus: u32,
    pub trunk_exit_divisor: f32,
}

impl ConicalBias {
    pub const RULES: [BiasRule; 5] = [
        BiasRule::ZeroDown,
        BiasRule::TrunkUpWeight,
        BiasRule::LateralGate,
        BiasRule::OriginZero,
        BiasRule::ContinuationBonus,
    ];
}

impl Default for ConicalBias {
    fn default() -> Self {
        Self {
            lateral_weight: 2,
            turn_bonus: 2,
            travel_bonus: 1,
            trunk_exit_divisor: 3.0,
        }
    }
}

impl GrowthLogic for ConicalBias {
    fn compute_direction_bias(
        &self,
        params: &GrowthParams,
        radius: u32,
        signal: &GrowthSignal,
        prob_map: ProbabilityVector,
    ) -> ProbabilityVector {
        debug_assert!(radius >= 1, "branch radius must be at least 1");
        debug_assert_ne!(signal.direction, signal.origin_direction());

        Self::RULES.iter().fold(prob_map, |mut probs, rule| {
            rule.apply(self, params.up_probability, radius, signal, &mut probs);
            probs
        })
    }

    fn on_direction_chosen(&self, chosen: Direction, signal: &mut GrowthSignal) -> Direction {
        if signal.in_trunk && chosen != Direction::Up {
            signal.energy /= self.trunk_exit_divisor;
        }
        chosen
    }
}
