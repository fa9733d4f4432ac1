//! Per-request evaluation lifecycle.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Decision;

/// Where a leave request stands in its evaluation lifecycle.
///
/// ```text
/// NoDecision ─begin─▶ Evaluating ─complete─▶ Decided
///                     │    ▲                   │
///                   fail   └──────begin────────┤
///                     ▼                        │
///                   Failed ──────begin─────────┘ (back to Evaluating)
/// ```
///
/// At most one evaluation is in flight per request: [`begin`](Self::begin)
/// refuses while `Evaluating`. Re-evaluating a `Decided` request replaces the
/// decision on success; a failed attempt keeps the prior decision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EvaluationState {
    /// Never evaluated.
    #[default]
    NoDecision,
    /// An evaluation is running.
    Evaluating {
        /// Decision from an earlier successful evaluation.
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Decision>,
    },
    /// The latest evaluation produced a decision.
    Decided {
        /// The current decision.
        decision: Decision,
    },
    /// The latest evaluation failed.
    Failed {
        /// Why the evaluation failed.
        error: String,
        /// Decision from an earlier successful evaluation.
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Decision>,
    },
}

impl EvaluationState {
    /// Moves into `Evaluating`, refusing a second concurrent evaluation.
    pub fn begin(&mut self, request_id: &str) -> EngineResult<()> {
        let previous = match self {
            EvaluationState::Evaluating { .. } => {
                return Err(EngineError::EvaluationInProgress {
                    request_id: request_id.to_string(),
                });
            }
            EvaluationState::NoDecision => None,
            EvaluationState::Decided { decision } => Some(decision.clone()),
            EvaluationState::Failed { previous, .. } => previous.clone(),
        };
        *self = EvaluationState::Evaluating { previous };
        Ok(())
    }

    /// Records a successful evaluation, replacing any earlier decision.
    pub fn complete(&mut self, decision: Decision) {
        *self = EvaluationState::Decided { decision };
    }

    /// Records a failed evaluation, keeping the last known decision.
    pub fn fail(&mut self, reason: impl std::fmt::Display) {
        let previous = self.current_decision().cloned();
        *self = EvaluationState::Failed {
            error: reason.to_string(),
            previous,
        };
    }

    /// The most recent successful decision, if any.
    pub fn current_decision(&self) -> Option<&Decision> {
        match self {
            EvaluationState::NoDecision => None,
            EvaluationState::Decided { decision } => Some(decision),
            EvaluationState::Evaluating { previous } | EvaluationState::Failed { previous, .. } => {
                previous.as_ref()
            }
        }
    }

    /// True while an evaluation is running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, EvaluationState::Evaluating { .. })
    }
}
