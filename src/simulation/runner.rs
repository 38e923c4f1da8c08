//! Sequence runner
//!
//! Plays a list of actions against a session and scores the result by
//! accumulated liking (liking_score weighted by hours). The plain entry points
//! start from a fresh default subject; the `_from` variants continue an
//! existing session, e.g. one created from traits.

use crate::actions::catalog::ActionId;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::engine::{Session, SessionSnapshot};
use serde::Serialize;

/// Why a run ended before its action list did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    NotViable,
    TimeLimit,
}

/// One applied action and where it left the subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStep {
    pub action: ActionId,
    pub clock_hours: f32,
    pub liking_score: f32,
    pub anxiety: f32,
    pub energy: f32,
}

/// An entry that could not be applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedAction {
    /// Position in the submitted list
    pub index: usize,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub total_liking: f32,
    pub average_liking: f32,
    pub hours: f32,
    pub viable: bool,
    pub stopped: Option<StopReason>,
    pub steps: Vec<RunStep>,
    pub skipped: Vec<SkippedAction>,
    pub final_state: SessionSnapshot,
}

impl RunReport {
    /// Optimization target: total liking, or nothing if the subject broke down
    pub fn fitness(&self) -> f32 {
        if self.viable {
            self.total_liking
        } else {
            0.0
        }
    }
}

/// Run named actions in order; unknown or ineligible entries are skipped
pub fn run_sequence<S: AsRef<str>>(
    config: &SimulationConfig,
    actions: &[S],
    max_hours: f32,
) -> RunReport {
    run_sequence_from(Session::with_config(config.clone()), actions, max_hours)
}

/// Run already-resolved actions in order
pub fn run_actions(config: &SimulationConfig, actions: &[ActionId], max_hours: f32) -> RunReport {
    run_actions_from(Session::with_config(config.clone()), actions, max_hours)
}

/// [`run_sequence`] continuing `session`
pub fn run_sequence_from<S: AsRef<str>>(session: Session, actions: &[S], max_hours: f32) -> RunReport {
    let resolved = actions.iter().map(|name| ActionId::lookup(name.as_ref()));
    run_resolved(session, resolved, max_hours)
}

/// [`run_actions`] continuing `session`
pub fn run_actions_from(session: Session, actions: &[ActionId], max_hours: f32) -> RunReport {
    run_resolved(session, actions.iter().map(|&action| Ok(action)), max_hours)
}

fn run_resolved(
    mut session: Session,
    actions: impl Iterator<Item = Result<ActionId>>,
    max_hours: f32,
) -> RunReport {
    let mut total_liking = 0.0;
    let mut steps = Vec::new();
    let mut skipped = Vec::new();
    let mut stopped = None;

    for (index, action) in actions.enumerate() {
        if !session.is_viable() {
            stopped = Some(StopReason::NotViable);
            break;
        }
        if session.subject().clock_hours >= max_hours {
            stopped = Some(StopReason::TimeLimit);
            break;
        }

        let outcome = action.and_then(|a| session.apply_action(a));
        match outcome {
            Ok(report) => {
                let affect = &session.subject().affect;
                total_liking += affect.liking_score * report.hours;
                steps.push(RunStep {
                    action: report.action,
                    clock_hours: session.subject().clock_hours,
                    liking_score: affect.liking_score,
                    anxiety: affect.anxiety,
                    energy: affect.energy,
                });
            }
            Err(err) => {
                tracing::debug!("skipping entry {}: {}", index, err);
                skipped.push(SkippedAction {
                    index,
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }

    let hours = session.subject().clock_hours;
    let average_liking = if hours > 0.0 {
        total_liking / hours
    } else {
        session.subject().affect.liking_score
    };

    RunReport {
        total_liking,
        average_liking,
        hours,
        viable: session.is_viable(),
        stopped,
        steps,
        skipped,
        final_state: session.get_state(),
    }
}
