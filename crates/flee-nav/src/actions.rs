use std::borrow::Cow;

use flee_core::{Agent, Blackboard, Control, GridQuery, Task};
use flee_tools::record;
use tracing::debug;

use crate::{plan_flee_path, FleeConfig, FleeFailure};

/// Leaf task that computes an escape route from the agent's cursor and commits it to the
/// blackboard's path slot.
///
/// The task has no preconditions. On failure (no start cell, or a path shorter than
/// [`FleeConfig::threshold`]) the path slot is left untouched.
#[derive(Debug, Clone)]
pub struct CalculateFleePathTask {
    name: Cow<'static, str>,
    config: FleeConfig,
}

impl CalculateFleePathTask {
    pub fn new() -> Self {
        Self::with_config(FleeConfig::default())
    }

    pub fn with_config(config: FleeConfig) -> Self {
        Self {
            name: Cow::Borrowed("CalculateFleePath"),
            config,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &FleeConfig {
        &self.config
    }
}

impl Default for CalculateFleePathTask {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, A> Task<Blackboard<G, A>> for CalculateFleePathTask
where
    G: GridQuery + ?Sized,
    A: Agent,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check_conditions(&self, _blackboard: &Blackboard<G, A>) -> bool {
        true
    }

    fn do_action(&mut self, blackboard: &mut Blackboard<G, A>, control: &mut dyn Control) {
        let position = blackboard.agent().cursor_position();
        let threshold = self.config.threshold() as u64;

        match plan_flee_path(blackboard.grid(), position, &self.config) {
            Ok(path) => {
                debug!(task = %self.name, steps = path.len(), "flee path committed");
                record(blackboard, "flee.success", path.len() as u64, threshold);
                blackboard.set_path(path);
                control.finish_with_success();
            }
            Err(failure) => {
                debug!(task = %self.name, %failure, "flee path rejected");
                let (tag, len) = match failure {
                    FleeFailure::NoStartCell { .. } => ("flee.no_start_cell", 0),
                    FleeFailure::PathTooShort { len, .. } => ("flee.path_too_short", len as u64),
                };
                record(blackboard, tag, len, threshold);
                control.finish_with_failure();
            }
        }
    }
}
