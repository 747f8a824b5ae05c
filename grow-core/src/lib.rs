//! Core voxel tree growth library.
//!
//! Main components:
//! - [`direction`]: the six axis-aligned growth directions.
//! - [`prob`]: per-direction weight vectors and weighted sampling.
//! - [`signal`]: the in-flight growth signal walked through a tree.
//! - [`bias`]: per-species direction bias and trunk exit penalty.
//! - [`config`]: numeric growth parameters for a species.
//! - [`cell`]: leaf and branch cell kinds handed to the cell solver.
//! - [`voxmap`]: small fixed voxel bitmaps such as leaf clusters.
//! - [`species`]: species records tying the pieces above together.
//! - [`registry`]: species lookup by id or name.
//! - [`tree`]: voxel branch nodes and radius bookkeeping.
//! - [`phases`]: the growth pulse driver.
//! - [`types`]: shared type aliases and IDs.

pub mod bias;
pub mod cell;
pub mod config;
pub mod direction;
pub mod phases;
pub mod prob;
pub mod registry;
pub mod signal;
pub mod species;
pub mod tree;
pub mod types;
pub mod voxmap;
