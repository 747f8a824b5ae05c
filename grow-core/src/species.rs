//! Species records.
//!
//! A [`Species`] owns everything that distinguishes one tree variant:
//! growth tuning, climate preferences, the leaf/branch cell tables, the
//! leaf cluster shape and the [`GrowthLogic`] strategy. It is built once
//! and then shared by reference through the
//! [`crate::registry::SpeciesRegistry`].

use crate::{
    bias::{ConicalBias, GrowthLogic},
    cell::{Cell, LeafCells, branch_cell},
    config::GrowthParams,
    direction::Direction,
    types::SpeciesId,
    voxmap::Voxmap,
};
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Game ticks in one in-game day.
pub const TICKS_PER_DAY: u64 = 24_000;
/// Days after which the per-position height jitter is reshuffled.
pub const DAYS_PER_MONTH: i32 = 30;
/// Pine foliage tint (0xRRGGBB).
pub const PINE_FOLIAGE_COLOR: u32 = 0x61_99_61;

/// Climate tags of a location, supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateTag {
    Hot,
    Cold,
    Dry,
    Wet,
    Coniferous,
    Forest,
    Plains,
}

#[derive(Clone, Debug)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub params: GrowthParams,
    pub env_factors: Vec<(ClimateTag, f32)>,
    pub perfect_climate: Option<ClimateTag>,
    pub smother_leaves_max: u32,
    pub foliage_color: u32,
    pub leaf_cells: LeafCells,
    pub leaf_cluster: Voxmap,
    /// Whether grown trees report their branch ends for podzol placement.
    pub podzol: bool,
    pub logic: Arc<dyn GrowthLogic>,
}

impl Species {
    /// Conical, thick, slow growing spruce.
    pub fn spruce() -> Self {
        let params = GrowthParams::conifer();
        Self {
            id: SpeciesId::new("spruce"),
            name: "Spruce".to_string(),
            params,
            env_factors: vec![
                (ClimateTag::Hot, 0.50),
                (ClimateTag::Dry, 0.25),
                (ClimateTag::Wet, 0.75),
            ],
            perfect_climate: Some(ClimateTag::Coniferous),
            smother_leaves_max: 3,
            foliage_color: PINE_FOLIAGE_COLOR,
            leaf_cells: LeafCells::conifer(),
            leaf_cluster: Voxmap::conifer_cluster(),
            podzol: true,
            logic: Arc::new(ConicalBias::default()),
        }
    }

    /// How well the species grows under `climate`, in `[0, 1]`.
    pub fn suitability(&self, climate: &[ClimateTag]) -> f32 {
        if let Some(perfect) = self.perfect_climate
            && climate.contains(&perfect)
        {
            return 1.0;
        }

        let s = climate.iter().fold(self.params.default_suitability, |s, tag| {
            self.env_factors
                .iter()
                .find(|(t, _)| t == tag)
                .map_or(s, |(_, f)| s * f)
        });
        s.clamp(0.0, 1.0)
    }

    /// Energy of a growth pulse for the tree based at `pos`.
    ///
    /// Trees of this species look alike, so the height is jittered by up
    /// to 4 using a position hash. The hash input moves up one block per
    /// in-game month so a tree planted in the same spot is not always the
    /// same height.
    ///
    /// ### Parameters
    /// - `pos` - Tree base position.
    /// - `world_time` - Total world age in ticks.
    /// - `climate` - Climate tags at `pos`.
    pub fn energy(&self, pos: IVec3, world_time: u64, climate: &[ClimateTag]) -> f32 {
        let day = world_time / TICKS_PER_DAY;
        let month = day as i32 / DAYS_PER_MONTH;
        let jitter = coord_hash(pos.wrapping_add(Direction::Up.offset() * month)) % 5;
        self.params.signal_energy * self.suitability(climate) + jitter as f32
    }

    pub fn cell_for_leaves(&self, hydration: u8) -> Cell {
        self.leaf_cells.for_hydration(hydration)
    }

    pub fn cell_for_branch(&self, radius: u32, below_is_same_branch: bool) -> Cell {
        branch_cell(radius, below_is_same_branch)
    }
}

/// 16-bit positional hash used for per-tree variation.
pub fn coord_hash(pos: IVec3) -> i32 {
    let hash = (pos.x.wrapping_mul(9973) ^ pos.y.wrapping_mul(8287) ^ pos.z.wrapping_mul(9721)) >> 1;
    hash & 0xFFFF
}
