//! Reference tile grid and the greedy flee-path task.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod error;
pub mod flee;
pub mod grid;

pub use actions::CalculateFleePathTask;
pub use error::GridError;
pub use flee::{best_neighbor, plan_flee_path, walk, FleeConfig, FleeFailure, FleeWalk, WalkStop};
pub use grid::TileMap;
