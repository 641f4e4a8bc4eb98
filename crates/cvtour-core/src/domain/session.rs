//! Tour lifecycle state machine and the ephemeral running session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SessionId;

/// How a tour (or the prompt in front of it) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The driver reported a full traversal.
    Completed,
    /// The user left early, or declined the prompt.
    Exited,
}

/// Controller state.
///
/// State transitions:
/// - Idle -> AwaitingPromptChoice (eligible page load)
/// - Idle -> Running (manual restart on the home page)
/// - AwaitingPromptChoice -> Running (prompt accepted)
/// - AwaitingPromptChoice -> Terminated(Exited) (prompt declined)
/// - Running -> Terminated(Completed | Exited)
/// - Terminated(_) -> Running (manual restart)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourState {
    #[default]
    Idle,
    AwaitingPromptChoice,
    Running,
    Terminated(Termination),
}

impl TourState {
    pub fn can_transition_to(self, target: TourState) -> bool {
        use TourState::*;
        matches!(
            (self, target),
            (Idle, AwaitingPromptChoice)
                | (Idle, Running)
                | (AwaitingPromptChoice, Running)
                | (AwaitingPromptChoice, Terminated(Termination::Exited))
                | (Running, Terminated(_))
                | (Terminated(_), Running)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TourState::Terminated(_))
    }
}

impl fmt::Display for TourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourState::Idle => write!(f, "idle"),
            TourState::AwaitingPromptChoice => write!(f, "awaiting_prompt_choice"),
            TourState::Running => write!(f, "running"),
            TourState::Terminated(Termination::Completed) => write!(f, "terminated(completed)"),
            TourState::Terminated(Termination::Exited) => write!(f, "terminated(exited)"),
        }
    }
}

/// Runtime bookkeeping for one running tour. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSession {
    pub id: SessionId,
    pub current_step: usize,
    pub total_steps: usize,
    pub termination: Option<Termination>,
}

impl TourSession {
    pub fn new(id: SessionId, total_steps: usize) -> Self {
        Self {
            id,
            current_step: 0,
            total_steps,
            termination: None,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.id.started_at()
    }

    /// Index of the closing step.
    pub fn final_index(&self) -> usize {
        self.total_steps.saturating_sub(1)
    }

    /// Record the step the driver is showing. Out-of-range indexes are clamped.
    pub fn advance_to(&mut self, index: usize) {
        self.current_step = index.min(self.final_index());
    }

    pub fn is_before_final(&self, index: usize) -> bool {
        index < self.final_index()
    }

    pub fn terminate(&mut self, reason: Termination) {
        self.termination = Some(reason);
    }
}
