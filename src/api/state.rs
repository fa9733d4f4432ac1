//! Application state for the Leave Adjudication Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::adjudication::{Adjudicator, EvaluationState};
use crate::error::EngineResult;
use crate::models::Decision;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// adjudicator and the in-memory evaluation registry.
#[derive(Clone)]
pub struct AppState {
    adjudicator: Arc<Adjudicator>,
    evaluations: Arc<EvaluationRegistry>,
}

impl AppState {
    /// Creates a new application state around an adjudicator.
    pub fn new(adjudicator: Adjudicator) -> Self {
        Self {
            adjudicator: Arc::new(adjudicator),
            evaluations: Arc::new(EvaluationRegistry::default()),
        }
    }

    /// Returns the adjudicator.
    pub fn adjudicator(&self) -> &Adjudicator {
        &self.adjudicator
    }

    /// Returns the evaluation registry.
    pub fn evaluations(&self) -> &EvaluationRegistry {
        &self.evaluations
    }
}

/// Evaluation state per request id, held in memory.
#[derive(Debug, Default)]
pub struct EvaluationRegistry {
    states: Mutex<HashMap<String, EvaluationState>>,
}

impl EvaluationRegistry {
    /// Marks `request_id` as evaluating.
    ///
    /// Fails with `EvaluationInProgress` if another evaluation of the same
    /// request has not settled yet. Dropping the returned guard without
    /// settling it records the evaluation as failed.
    pub fn begin(&self, request_id: &str) -> EngineResult<EvaluationGuard<'_>> {
        self.lock()
            .entry(request_id.to_string())
            .or_default()
            .begin(request_id)?;
        Ok(EvaluationGuard {
            registry: self,
            request_id: request_id.to_string(),
            settled: false,
        })
    }

    /// Returns the current state of `request_id`, if it was ever evaluated.
    pub fn get(&self, request_id: &str) -> Option<EvaluationState> {
        self.lock().get(request_id).cloned()
    }

    fn settle(&self, request_id: &str, settle: impl FnOnce(&mut EvaluationState)) {
        if let Some(state) = self.lock().get_mut(request_id) {
            settle(state);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, EvaluationState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An in-flight evaluation slot in the registry.
#[derive(Debug)]
pub struct EvaluationGuard<'a> {
    registry: &'a EvaluationRegistry,
    request_id: String,
    settled: bool,
}

impl EvaluationGuard<'_> {
    /// Records the decision as the request's current one.
    pub fn complete(mut self, decision: Decision) {
        self.settled = true;
        self.registry
            .settle(&self.request_id, |state| state.complete(decision));
    }

    /// Records a failed evaluation.
    pub fn fail(mut self, reason: impl std::fmt::Display) {
        self.settled = true;
        self.registry
            .settle(&self.request_id, |state| state.fail(reason));
    }
}

impl Drop for EvaluationGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.registry.settle(&self.request_id, |state| {
                state.fail("evaluation abandoned before completion")
            });
        }
    }
}
