//! Analytics event processing status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of an analytics event.
///
/// Events are recorded `Pending` and leave that state exactly once,
/// either to `Processed` or to `Failed`. Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Recorded, awaiting the processing pipeline.
    Pending,

    /// Successfully processed. Terminal.
    Processed,

    /// Processing failed. Terminal.
    Failed,
}

impl ProcessingStatus {
    /// Returns true if the event still awaits processing.
    pub fn is_pending(&self) -> bool {
        matches!(self, ProcessingStatus::Pending)
    }
}

impl StateMachine for ProcessingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ProcessingStatus::*;
        matches!((self, target), (Pending, Processed) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ProcessingStatus::*;
        match self {
            Pending => vec![Processed, Failed],
            Processed => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessingStatus::Pending => "PENDING",
            ProcessingStatus::Processed => "PROCESSED",
            ProcessingStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}
