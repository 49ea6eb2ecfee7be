//! Behavior tree runtime built on `flee-core`.
//!
//! Every node completes within a single tick: leaf tasks run one full lifecycle cycle and report
//! success or failure, so there is no running state to resume.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod tree;

pub use bt::{BtNode, BtStatus};
pub use nodes::{Condition, Selector, Sequence, TaskNode};
pub use tree::BehaviorTree;
