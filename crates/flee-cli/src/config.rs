//! Scene configuration, loaded from a YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use flee_core::Vec2;
use flee_nav::{FleeConfig, TileMap};
use serde::{Deserialize, Serialize};

/// A capacity map plus the agent standing on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// World units per tile edge
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,

    /// Id stamped on trace events
    #[serde(default = "default_agent_id")]
    pub agent_id: u64,

    /// Cursor position in world units
    #[serde(default)]
    pub cursor: Vec2,

    /// Planner tuning; missing fields fall back to defaults
    #[serde(default)]
    pub planner: FleeConfig,

    /// Row-major capacities: `capacity[y][x]`
    pub capacity: Vec<Vec<i32>>,
}

fn default_tile_size() -> f32 {
    TileMap::DEFAULT_TILE_SIZE
}
fn default_agent_id() -> u64 {
    1
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scene: Self = serde_yaml::from_str(content)?;
        Ok(scene)
    }

    pub fn build_map(&self) -> Result<TileMap> {
        TileMap::from_rows(&self.capacity, self.tile_size).context("Invalid capacity grid")
    }
}
