//! Growth pulse driver for a single tree.
//!
//! A pulse is one growth signal sent from the tree base:
//! 1. While the signal is in the trunk and below the lowest branch
//!    height it simply climbs.
//! 2. Above that, at every node the species' [`GrowthLogic`] reweights
//!    [`default_prob_map`], a direction is sampled and reported back
//!    through [`GrowthLogic::on_direction_chosen`].
//! 3. The signal steps one voxel, paying one unit of energy. Reaching an
//!    empty voxel grows a new node there and ends the pulse.

use crate::{
    bias::GrowthLogic,
    config::GrowthParams,
    direction::Direction,
    prob::ProbabilityVector,
    signal::GrowthSignal,
    species::Species,
    tree::Tree,
    types::NodeId,
};
use glam::IVec3;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// How a pulse ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PulseOutcome {
    /// A new node was added.
    Grew { node: NodeId, pos: IVec3 },
    /// The signal ran out of energy inside the existing tree.
    Exhausted { at: IVec3 },
    /// Every direction had zero weight.
    Blocked { at: IVec3 },
    /// The chosen voxel belongs to an unconnected part of the tree.
    Collided { at: IVec3 },
}

/// Starting weights for a node before the species adjusts them.
///
/// Never down, never back where the signal came from, `up_probability`
/// for up and 1 for each lateral.
pub fn default_prob_map(signal: &GrowthSignal, params: &GrowthParams) -> ProbabilityVector {
    let mut probs = ProbabilityVector::zeros();
    probs[Direction::Up] = params.up_probability;
    for dir in Direction::LATERAL {
        probs[dir] = 1;
    }
    probs[signal.origin_direction()] = 0;
    probs
}

/// Sends one growth pulse with the given energy through `tree`.
///
/// ### Parameters
/// - `tree` - The tree to grow; at most one node is appended.
/// - `species` - Species providing parameters and growth logic.
/// - `energy` - Pulse energy, usually from [`Species::energy`].
/// - `rng` - Random source for direction sampling.
///
/// ### Returns
/// How the pulse ended. On [`PulseOutcome::Grew`] the radii have
/// already been recomputed.
pub fn grow_pulse(
    tree: &mut Tree,
    species: &Species,
    energy: f32,
    rng: &mut impl Rng,
) -> PulseOutcome {
    let params = &species.params;
    let Some(base) = tree.base() else {
        return PulseOutcome::Blocked { at: IVec3::ZERO };
    };

    let mut signal = GrowthSignal::new(energy);
    let mut current: NodeId = 0;

    loop {
        let pos = tree.nodes[current].pos;
        debug_assert_eq!(pos, base + signal.delta);

        if signal.energy <= 0.0 {
            debug!(%pos, steps = signal.step_count, "pulse exhausted");
            return PulseOutcome::Exhausted { at: pos };
        }

        let dir = if signal.in_trunk && signal.step_count < params.lowest_branch_height {
            Direction::Up
        } else {
            let radius = tree.int_radius(current, params.max_radius);
            let probs = species.logic.compute_direction_bias(
                params,
                radius,
                &signal,
                default_prob_map(&signal, params),
            );
            let Some(chosen) = probs.sample(rng) else {
                warn!(%pos, ?probs, "no viable growth direction");
                return PulseOutcome::Blocked { at: pos };
            };
            species.logic.on_direction_chosen(chosen, &mut signal)
        };

        signal.turn(dir);
        signal.step();
        let next = pos + dir.offset();
        trace!(%next, ?dir, energy = signal.energy, "signal step");

        match tree.node_at(next) {
            Some(id) if tree.are_linked(current, id) => current = id,
            Some(_) => {
                debug!(%next, "pulse collided with another branch");
                return PulseOutcome::Collided { at: next };
            }
            None => {
                let node = tree.add_child(current, next, 0.0);
                tree.update_radii(params.tapering);
                debug!(%next, node, steps = signal.step_count, turns = signal.turn_count, "grew node");
                return PulseOutcome::Grew { node, pos: next };
            }
        }
    }
}

/// Runs one growth tick: a pulse is sent with probability `growth_rate`.
///
/// ### Returns
/// `None` if the tick was skipped.
pub fn grow_tick(
    tree: &mut Tree,
    species: &Species,
    energy: f32,
    rng: &mut impl Rng,
) -> Option<PulseOutcome> {
    let rate = f64::from(species.params.growth_rate.clamp(0.0, 1.0));
    if !rng.random_bool(rate) {
        return None;
    }
    Some(grow_pulse(tree, species, energy, rng))
}

/// Post-growth analysis: the branch ends used for podzol placement, or
/// nothing when the species does not generate podzol.
pub fn post_grow(tree: &Tree, species: &Species) -> Vec<IVec3> {
    if species.podzol {
        tree.find_ends()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bias::NeutralLogic, species::Species};
    use rand::{SeedableRng, rngs::StdRng};
    use std::sync::Arc;

    fn grow(species: &Species, pulses: usize, energy: f32, seed: u64) -> Tree {
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        tree.update_radii(species.params.tapering);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..pulses {
            grow_pulse(&mut tree, species, energy, &mut rng);
        }
        tree
    }

    #[test]
    fn default_map_excludes_down_and_origin() {
        let mut signal = GrowthSignal::new(5.0);
        signal.turn(Direction::East);
        let probs = default_prob_map(&signal, &GrowthParams::conifer());
        assert_eq!(probs, ProbabilityVector::from_weights([0, 3, 1, 1, 1, 0]));
    }

    #[test]
    fn first_pulses_build_a_straight_trunk() {
        let spruce = Species::spruce();
        let tree = grow(&spruce, 3, 16.0, 1);
        assert_eq!(tree.nodes.len(), 4);
        for (y, node) in tree.nodes.iter().enumerate() {
            assert_eq!(node.pos, IVec3::new(0, y as i32, 0));
        }
    }

    #[test]
    fn pulse_without_energy_is_exhausted_at_base() {
        let spruce = Species::spruce();
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            grow_pulse(&mut tree, &spruce, 0.0, &mut rng),
            PulseOutcome::Exhausted { at: IVec3::ZERO }
        );
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn trunk_height_is_bounded_by_energy() {
        let spruce = Species::spruce();
        let tree = grow(&spruce, 400, 8.0, 11);
        // Each pulse can climb at most `energy` voxels above the base.
        assert!(tree.height() <= 9);
        assert!(tree.nodes.iter().all(|n| n.pos.y >= 0));
    }

    #[test]
    fn spruce_never_grows_down_and_branches_stay_level() {
        let spruce = Species::spruce();
        let tree = grow(&spruce, 300, 16.0, 5);

        for node in &tree.nodes {
            let Some(parent) = node.parent else { continue };
            let step = node.pos - tree.nodes[parent].pos;
            assert_ne!(step, Direction::Down.offset());
            // Off the trunk column, branches only spread sideways.
            if node.pos.x != 0 || node.pos.z != 0 {
                assert_eq!(step.y, 0, "branch node {} climbed", node.pos);
            }
        }
    }

    #[test]
    fn spruce_tree_is_conical() {
        let spruce = Species::spruce();
        let tree = grow(&spruce, 600, 16.0, 9);

        let spread = |y: i32| {
            tree.nodes
                .iter()
                .filter(|n| n.pos.y == y)
                .map(|n| n.pos.x.abs().max(n.pos.z.abs()))
                .max()
                .unwrap_or(0)
        };
        assert!(tree.height() > 6);
        let top = tree.height() as i32 - 1;
        // Branches leaving higher up start with less energy.
        assert!(spread(top) <= 1);
        assert!((0..top).any(|y| spread(y) > spread(top)));
    }

    #[test]
    fn growth_is_deterministic_for_a_seed() {
        let spruce = Species::spruce();
        let a = grow(&spruce, 200, 16.0, 77);
        let b = grow(&spruce, 200, 16.0, 77);
        let pos = |t: &Tree| t.nodes.iter().map(|n| n.pos).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn neutral_species_may_branch_from_the_trunk_immediately() {
        let mut plain = Species::spruce();
        plain.logic = Arc::new(NeutralLogic);
        let tree = grow(&plain, 300, 12.0, 21);
        let off_column = tree
            .nodes
            .iter()
            .filter(|n| n.pos.x != 0 || n.pos.z != 0)
            .count();
        assert!(off_column > 0);
    }

    #[test]
    fn grow_tick_always_pulses_at_full_rate() {
        let mut plain = Species::spruce();
        plain.params.growth_rate = 1.0;
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..5 {
            assert!(grow_tick(&mut tree, &plain, 16.0, &mut rng).is_some());
        }
        assert_eq!(tree.nodes.len(), 6);
    }

    #[test]
    fn stepping_into_an_unlinked_branch_collides() {
        let spruce = Species::spruce();
        // A hook-shaped branch ends right above the base: (0,0,0) -> (-1,0,0) -> (-1,1,0) -> (0,1,0).
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        let west = tree.add_child(0, IVec3::new(-1, 0, 0), 0.0);
        let up = tree.add_child(west, IVec3::new(-1, 1, 0), 0.0);
        tree.add_child(up, IVec3::new(0, 1, 0), 0.0);
        tree.update_radii(spruce.params.tapering);

        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(
            grow_pulse(&mut tree, &spruce, 16.0, &mut rng),
            PulseOutcome::Collided {
                at: IVec3::new(0, 1, 0)
            }
        );
        assert_eq!(tree.nodes.len(), 4);
    }

    #[test]
    fn trunk_without_up_weight_is_blocked() {
        let mut spruce = Species::spruce();
        spruce.params.up_probability = 0;
        spruce.params.lowest_branch_height = 0;
        let mut tree = Tree::new(IVec3::new(2, 64, 2), 0.0);
        tree.update_radii(spruce.params.tapering);

        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(
            grow_pulse(&mut tree, &spruce, 16.0, &mut rng),
            PulseOutcome::Blocked {
                at: IVec3::new(2, 64, 2)
            }
        );
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn grow_tick_skips_most_ticks_at_a_tiny_rate() {
        let mut spruce = Species::spruce();
        spruce.params.growth_rate = 1e-9;
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            assert_eq!(grow_tick(&mut tree, &spruce, 16.0, &mut rng), None);
        }
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn long_runs_end_mostly_in_collisions_and_exhaustion() {
        let spruce = Species::spruce();
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        tree.update_radii(spruce.params.tapering);
        let mut rng = StdRng::seed_from_u64(5);

        let (mut grew, mut other) = (0, 0);
        for _ in 0..2000 {
            match grow_pulse(&mut tree, &spruce, 16.0, &mut rng) {
                PulseOutcome::Grew { .. } => grew += 1,
                PulseOutcome::Exhausted { .. } | PulseOutcome::Collided { .. } => other += 1,
                PulseOutcome::Blocked { at } => panic!("spruce blocked at {at}"),
            }
        }
        assert_eq!(tree.nodes.len(), 1 + grew);
        assert!(other > grew);
    }

    #[test]
    fn post_grow_reports_ends_only_with_podzol() {
        let mut spruce = Species::spruce();
        let tree = grow(&spruce, 2, 16.0, 4);
        assert_eq!(post_grow(&tree, &spruce), vec![IVec3::new(0, 2, 0)]);

        spruce.podzol = false;
        assert!(post_grow(&tree, &spruce).is_empty());
    }
}
