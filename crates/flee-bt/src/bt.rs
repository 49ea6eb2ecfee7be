use flee_core::{CycleStatus, TaskOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_success(self) -> bool {
        self == BtStatus::Success
    }
}

impl From<TaskOutcome> for BtStatus {
    fn from(outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Success => BtStatus::Success,
            TaskOutcome::Failure => BtStatus::Failure,
        }
    }
}

/// Skipped and unresolved cycles both count as failure for the parent.
impl From<CycleStatus> for BtStatus {
    fn from(status: CycleStatus) -> Self {
        status.outcome().into()
    }
}

pub trait BtNode<B> {
    fn tick(&mut self, blackboard: &mut B) -> BtStatus;

    fn reset(&mut self);
}
