use flee_core::{run_cycle, CycleStatus, Task};
use tracing::trace;

use crate::bt::{BtNode, BtStatus};

/// Ticks children in order until one fails.
pub struct Sequence<B> {
    children: Vec<Box<dyn BtNode<B>>>,
}

impl<B> Sequence<B> {
    pub fn new(children: Vec<Box<dyn BtNode<B>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<B> BtNode<B> for Sequence<B> {
    fn tick(&mut self, blackboard: &mut B) -> BtStatus {
        for (i, child) in self.children.iter_mut().enumerate() {
            if child.tick(blackboard) == BtStatus::Failure {
                trace!(child = i, "sequence failed");
                return BtStatus::Failure;
            }
        }
        BtStatus::Success
    }

    fn reset(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Ticks children in order until one succeeds.
pub struct Selector<B> {
    children: Vec<Box<dyn BtNode<B>>>,
}

impl<B> Selector<B> {
    pub fn new(children: Vec<Box<dyn BtNode<B>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<B> BtNode<B> for Selector<B> {
    fn tick(&mut self, blackboard: &mut B) -> BtStatus {
        for (i, child) in self.children.iter_mut().enumerate() {
            if child.tick(blackboard) == BtStatus::Success {
                trace!(child = i, "selector succeeded");
                return BtStatus::Success;
            }
        }
        BtStatus::Failure
    }

    fn reset(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F, B> BtNode<B> for Condition<F>
where
    F: FnMut(&B) -> bool,
{
    fn tick(&mut self, blackboard: &mut B) -> BtStatus {
        if (self.cond)(&*blackboard) {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }

    fn reset(&mut self) {}
}

/// Leaf that runs one lifecycle cycle of a [`Task`] per tick.
///
/// A skipped or unresolved cycle reports [`BtStatus::Failure`]. The task instance is kept and
/// reused for every tick.
pub struct TaskNode<T> {
    task: T,
    last_cycle: Option<CycleStatus>,
    cycles: u64,
}

impl<T> TaskNode<T> {
    pub fn new(task: T) -> Self {
        Self {
            task,
            last_cycle: None,
            cycles: 0,
        }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    /// Result of the most recent cycle since the last reset.
    pub fn last_cycle(&self) -> Option<CycleStatus> {
        self.last_cycle
    }

    /// Total cycles run; not cleared by `reset`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn into_inner(self) -> T {
        self.task
    }
}

impl<T, B> BtNode<B> for TaskNode<T>
where
    T: Task<B>,
{
    fn tick(&mut self, blackboard: &mut B) -> BtStatus {
        let status = run_cycle(&mut self.task, blackboard);
        self.last_cycle = Some(status);
        self.cycles = self.cycles.wrapping_add(1);
        status.into()
    }

    fn reset(&mut self) {
        self.last_cycle = None;
    }
}
