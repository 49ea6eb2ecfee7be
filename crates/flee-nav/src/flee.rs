//! Greedy flee walk.
//!
//! Starting from the agent's cell, repeatedly step to the neighbor with the highest capacity
//! that is not already in the path. The start cell is not part of the path, so the walk may step
//! back into it once. The walk is one-step lookahead only: no backtracking, no cost
//! accumulation. It stops after `max_steps` steps or at the first cell
//! with no eligible neighbor, and the result is accepted only if it is at least
//! `max_steps / 3` steps long.

use flee_core::{CellCoord, CellPath, Direction, GridQuery, Vec2};
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct FleeConfig {
    /// Maximum number of steps in the path.
    pub max_steps: usize,

    /// When set, only neighbors with capacity strictly above this value are eligible.
    pub capacity_floor: Option<i32>,
}

impl Default for FleeConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            capacity_floor: None,
        }
    }
}

impl FleeConfig {
    pub const DEFAULT_MAX_STEPS: usize = 8;

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_capacity_floor(mut self, floor: i32) -> Self {
        self.capacity_floor = Some(floor);
        self
    }

    /// Minimum accepted path length.
    pub fn threshold(&self) -> usize {
        self.max_steps / 3
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
    /// All `max_steps` steps were taken.
    StepCap,
    /// No eligible neighbor around `at`.
    DeadEnd { at: CellCoord },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleeWalk {
    pub path: CellPath,
    pub stop: WalkStop,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleeFailure {
    #[error("cursor at ({}, {}) does not resolve to a grid cell", .position.x, .position.y)]
    NoStartCell { position: Vec2 },
    #[error("flee path of {len} steps is below the acceptance threshold of {threshold}")]
    PathTooShort { len: usize, threshold: usize },
}

/// Pick the next step from `from`.
///
/// Neighbors are scanned in [`Direction::ALL`] order. A neighbor is eligible when it exists and
/// `visited` returns `false` for it; among eligible neighbors the highest capacity wins and ties
/// keep the earliest direction. With `capacity_floor` set, a neighbor must also exceed the floor.
pub fn best_neighbor<G, V>(
    grid: &G,
    from: CellCoord,
    capacity_floor: Option<i32>,
    mut visited: V,
) -> Option<(Direction, CellCoord)>
where
    G: GridQuery + ?Sized,
    V: FnMut(CellCoord) -> bool,
{
    let mut best: Option<(Direction, CellCoord, i32)> = None;

    for direction in Direction::ALL {
        let Some(neighbor) = grid.neighbor(from, direction) else {
            continue;
        };
        if visited(neighbor) {
            continue;
        }

        let capacity = grid.capacity(neighbor);
        let improves = match best {
            Some((_, _, best_capacity)) => capacity > best_capacity,
            None => capacity_floor.map_or(true, |floor| capacity > floor),
        };
        if improves {
            best = Some((direction, neighbor, capacity));
        }
    }

    best.map(|(direction, cell, _)| (direction, cell))
}

/// Run the greedy walk from `start`.
///
/// Only cells already in the path are excluded; the start cell is a regular candidate.
pub fn walk<G>(grid: &G, start: CellCoord, config: &FleeConfig) -> FleeWalk
where
    G: GridQuery + ?Sized,
{
    let mut path = CellPath::with_capacity(config.max_steps.min(64));
    let mut current = start;

    for _ in 0..config.max_steps {
        let next = best_neighbor(grid, current, config.capacity_floor, |cell| path.contains(cell));
        let Some((_, next)) = next else {
            debug!(steps = path.len(), at = %current, "flee search ended at a dead end");
            return FleeWalk {
                path,
                stop: WalkStop::DeadEnd { at: current },
            };
        };
        path.push(next);
        current = next;
    }

    FleeWalk {
        path,
        stop: WalkStop::StepCap,
    }
}

/// Resolve the start cell under `position`, walk, and apply the acceptance threshold.
pub fn plan_flee_path<G>(
    grid: &G,
    position: Vec2,
    config: &FleeConfig,
) -> Result<CellPath, FleeFailure>
where
    G: GridQuery + ?Sized,
{
    let start = grid
        .resolve_cell(position)
        .ok_or(FleeFailure::NoStartCell { position })?;

    let FleeWalk { path, .. } = walk(grid, start, config);
    let threshold = config.threshold();
    if path.len() < threshold {
        return Err(FleeFailure::PathTooShort {
            len: path.len(),
            threshold,
        });
    }
    Ok(path)
}
