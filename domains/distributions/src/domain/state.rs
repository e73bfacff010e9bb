//! Distribution status state machine
//!
//! ```text
//! IN_QUEUE --claim--> IN_PROGRESS --upload succeeded--> COMPLETED
//!                          |
//!                          +------upload failed-------> FAILED
//! ```
//!
//! `COMPLETED` and `FAILED` are terminal.

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionState {
    InQueue,
    InProgress,
    Completed,
    Failed,
}

impl DistributionState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [DistributionState] {
        match self {
            Self::InQueue => &[Self::InProgress],
            Self::InProgress => &[Self::Completed, Self::Failed],
            Self::Completed => &[],
            Self::Failed => &[],
        }
    }
}

impl std::fmt::Display for DistributionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InQueue => write!(f, "in_queue"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

pub struct DistributionStateMachine;

impl DistributionStateMachine {
    /// Check that `from -> to` is an edge of the machine
    pub fn validate(from: DistributionState, to: DistributionState) -> Result<(), StateError> {
        if from.is_terminal() {
            return Err(StateError::TerminalState(from.to_string()));
        }
        if !from.valid_transitions().contains(&to) {
            return Err(StateError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}
