use tracing::debug;

use crate::bt::{BtNode, BtStatus};

/// Owns the root node and ticks it once per decision cycle.
pub struct BehaviorTree<B> {
    root: Box<dyn BtNode<B>>,
    last: Option<BtStatus>,
    ticks: u64,
}

impl<B> BehaviorTree<B> {
    pub fn new(root: Box<dyn BtNode<B>>) -> Self {
        Self {
            root,
            last: None,
            ticks: 0,
        }
    }

    /// Status of the most recent tick, or `None` before the first one.
    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tick the root and reset it, since every tick runs to completion.
    pub fn tick(&mut self, blackboard: &mut B) -> BtStatus {
        let status = self.root.tick(blackboard);
        self.root.reset();
        self.ticks = self.ticks.wrapping_add(1);
        self.last = Some(status);
        debug!(tick = self.ticks, ?status, "behavior tree ticked");
        status
    }
}
