//! Adjudication of leave requests.
//!
//! This module turns rule facts into a prompt, calls the reasoning backend,
//! parses the narrative into a [`Decision`](crate::models::Decision) and
//! tracks each request's evaluation lifecycle.

mod orchestrator;
mod parser;
mod prompt;
mod state;

pub use orchestrator::{Adjudication, Adjudicator, PreparedEvaluation};
pub use parser::DecisionParser;
pub use prompt::{ComposedPrompt, PromptComposer, SYSTEM_PROMPT};
pub use state::EvaluationState;
