//! Reasoning backend interface.
//!
//! The reasoning backend is a generative text oracle: it receives the
//! composed system instructions and user prompt and returns free text. Its
//! output is untrusted and only ever handed to the tolerant decision parser.

mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiBackend;

/// Failures of the reasoning backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend could not be reached or answered with an error.
    #[error("Reasoning backend unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },

    /// The backend refused the call because of rate limits.
    #[error("Reasoning backend rate limited")]
    RateLimited {
        /// Seconds the backend asked to wait, if it said.
        retry_after_secs: Option<u64>,
    },

    /// The backend did not answer in time.
    #[error("Reasoning backend timed out after {seconds}s")]
    Timeout {
        /// The timeout that elapsed.
        seconds: u64,
    },
}

impl BackendError {
    /// Returns true for failures worth retrying after a backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::RateLimited { .. } | BackendError::Timeout { .. }
        )
    }
}

/// A generative text oracle.
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Produces a narrative for the given system instructions and prompt.
    async fn generate(&self, system: &str, user: &str) -> Result<String, BackendError>;
}
