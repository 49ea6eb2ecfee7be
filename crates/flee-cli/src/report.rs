//! Running one planning cycle for a scene and describing the result.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use flee_bt::{BehaviorTree, BtStatus, TaskNode};
use flee_core::{Blackboard, CellCoord, GridQuery, Player, Vec2};
use flee_nav::{CalculateFleePathTask, FleeConfig, TileMap};
use flee_tools::{TraceEvent, TraceLog, TRACE_LOG};
use serde::Serialize;

use crate::config::SceneConfig;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub cursor: Vec2,
    pub start: Option<CellCoord>,
    pub threshold: usize,
    pub path: Vec<CellCoord>,
    pub events: Vec<TraceEvent>,
}

/// Build the map and blackboard for `scene` and tick a single-task tree once.
pub fn run_scene(scene: &SceneConfig) -> Result<RunReport> {
    let map = Arc::new(scene.build_map()?);
    let planner: FleeConfig = scene.planner;

    let mut blackboard = Blackboard::new(map, Player::new(scene.agent_id, scene.cursor));
    blackboard.scratch_mut().set(TRACE_LOG, TraceLog::default());
    let start = blackboard.grid().resolve_cell(scene.cursor);

    let task = CalculateFleePathTask::with_config(planner);
    let mut tree: BehaviorTree<Blackboard<TileMap, Player>> =
        BehaviorTree::new(Box::new(TaskNode::new(task)));
    let status = tree.tick(&mut blackboard);
    tracing::info!(?status, ?start, "planning cycle finished");

    let events = blackboard
        .scratch_mut()
        .remove(TRACE_LOG)?
        .map(|log| log.events)
        .unwrap_or_default();
    let path = blackboard
        .take_path()
        .map(|p| p.into_vec())
        .unwrap_or_default();

    Ok(RunReport {
        success: status == BtStatus::Success,
        cursor: scene.cursor,
        start,
        threshold: planner.threshold(),
        path,
        events,
    })
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.success { "success" } else { "failure" };
        writeln!(f, "outcome: {outcome}")?;
        write!(f, "cursor:  ({}, {})", self.cursor.x, self.cursor.y)?;
        match self.start {
            Some(cell) => writeln!(f, " in cell {cell}")?,
            None => writeln!(f, " (off the map)")?,
        }
        writeln!(f, "path:    {} steps (threshold {})", self.path.len(), self.threshold)?;
        for (i, cell) in self.path.iter().enumerate() {
            writeln!(f, "  {:>2}. {cell}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(yaml: &str) -> SceneConfig {
        SceneConfig::parse(yaml).unwrap()
    }

    #[test]
    fn successful_run_reports_path_and_trace() {
        let report = run_scene(&scene(
            r#"
cursor: { x: 4, y: 4 }
capacity:
  - [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
"#,
        ))
        .unwrap();

        assert!(report.success);
        assert_eq!(report.start, Some(CellCoord::new(0, 0)));
        assert_eq!(report.path.len(), 8);
        assert_eq!(report.path.last(), Some(&CellCoord::new(8, 0)));
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].tag, "flee.success");

        let text = report.to_string();
        assert!(text.starts_with("outcome: success\n"));
        assert!(text.contains("8 steps (threshold 2)"));
    }

    #[test]
    fn failed_run_has_no_path() {
        let report = run_scene(&scene(
            r#"
cursor: { x: 400, y: 4 }
capacity:
  - [0, 1, 2]
"#,
        ))
        .unwrap();

        assert!(!report.success);
        assert_eq!(report.start, None);
        assert!(report.path.is_empty());
        assert_eq!(report.events[0].tag, "flee.no_start_cell");
        assert!(report.to_string().contains("(off the map)"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = run_scene(&scene("capacity: [[0, 5, 1]]")).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["path"], serde_json::json!([{"x": 1, "y": 0}, {"x": 2, "y": 0}]));
        assert_eq!(json["events"][0]["tag"], "flee.success");
    }
}
