//! Grid, blackboard and task lifecycle primitives for flee planning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod grid;
pub mod math;
pub mod task;

pub use agent::{Agent, Cursor, Player};
pub use blackboard::{BbKey, Blackboard, Scratch, ScratchError};
pub use grid::{CellCoord, CellPath, Direction, GridQuery};
pub use math::Vec2;
pub use task::{run_cycle, Control, CycleStatus, Task, TaskController, TaskOutcome};
