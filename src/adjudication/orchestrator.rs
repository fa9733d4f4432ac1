//! Leave request adjudication.
//!
//! [`Adjudicator`] runs one evaluation end to end: validate the inputs, parse
//! the requested dates, evaluate the policy rules, compose the prompt, call the
//! reasoning backend and parse its narrative into a [`Decision`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{BackendError, ReasoningBackend};
use crate::config::{EngineConfig, RetryPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, Decision, Employee, LeaveRequest, RuleFacts};
use crate::rules::{PolicyRuleSet, RuleEvaluation, parse_date_range};

use super::{ComposedPrompt, DecisionParser, PromptComposer};

/// Everything computed for a request before the backend is called.
#[derive(Debug, Clone)]
pub struct PreparedEvaluation {
    /// Rule facts and their audit steps.
    pub evaluation: RuleEvaluation,
    /// The prompt for the reasoning backend.
    pub prompt: ComposedPrompt,
}

/// The outcome of one evaluation with its supporting evidence.
#[derive(Debug, Clone)]
pub struct Adjudication {
    /// Unique identifier of this evaluation.
    pub evaluation_id: Uuid,
    /// The evaluated request.
    pub request_id: String,
    /// The structured decision.
    pub decision: Decision,
    /// The policy facts handed to the backend.
    pub facts: RuleFacts,
    /// How each fact and the decision were reached.
    pub audit_trace: AuditTrace,
}

/// Evaluates leave requests against policy with a reasoning backend.
///
/// Holds only immutable configuration and a shared backend handle, so one
/// instance can serve concurrent evaluations of different requests.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use leave_adjudicator::adjudication::Adjudicator;
/// use leave_adjudicator::backend::OpenAiBackend;
/// use leave_adjudicator::config::ConfigLoader;
/// use leave_adjudicator::models::{Employee, LeaveRequest, Position};
/// use chrono::NaiveDate;
///
/// # async fn run() -> Result<(), leave_adjudicator::error::EngineError> {
/// let loader = ConfigLoader::load("./config/leave_policy")?;
/// let backend = OpenAiBackend::from_env(loader.config().backend())?;
/// let adjudicator = Adjudicator::new(loader.config(), Arc::new(backend));
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ayşe Yılmaz".to_string(),
///     position: Position::Uzman,
///     position_level: 2,
///     hire_date: NaiveDate::from_ymd_opt(2016, 2, 1).unwrap(),
///     remaining_days: 14,
/// };
/// let request = LeaveRequest::new("req_001", "emp_001", "22.04.2024-24.04.2024", "");
///
/// let decision = adjudicator
///     .evaluate(&request, &employee, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
///     .await?;
/// println!("{}", decision.status);
/// # Ok(())
/// # }
/// ```
pub struct Adjudicator {
    rules: PolicyRuleSet,
    composer: PromptComposer,
    backend: Arc<dyn ReasoningBackend>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl Adjudicator {
    /// Creates an adjudicator from configuration and a backend.
    pub fn new(config: &EngineConfig, backend: Arc<dyn ReasoningBackend>) -> Self {
        Self {
            rules: PolicyRuleSet::from_config(config),
            composer: PromptComposer::new(config.policy()),
            backend,
            retry: config.backend().retry.clone(),
            timeout: Duration::from_secs(config.backend().timeout_secs),
        }
    }

    /// Replaces the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the per-attempt backend timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the rule set used for evaluations.
    pub fn rules(&self) -> &PolicyRuleSet {
        &self.rules
    }

    /// Validates the inputs, evaluates the rules and composes the prompt.
    ///
    /// Performs no I/O; any error here is a validation error.
    pub fn prepare(
        &self,
        request: &LeaveRequest,
        employee: &Employee,
        evaluation_date: NaiveDate,
    ) -> EngineResult<PreparedEvaluation> {
        request.validate()?;
        employee.validate()?;

        if request.employee_id != employee.id {
            return Err(EngineError::InvalidRequest {
                field: "employee_id".to_string(),
                message: format!(
                    "request belongs to '{}' but employee is '{}'",
                    request.employee_id, employee.id
                ),
            });
        }
        if employee.hire_date > evaluation_date {
            return Err(EngineError::InvalidEmployee {
                field: "hire_date".to_string(),
                message: format!(
                    "hire date {} is after evaluation date {}",
                    employee.hire_date, evaluation_date
                ),
            });
        }

        let interval = parse_date_range(&request.date_range_text)?;
        let evaluation =
            self.rules
                .evaluate(&interval, &request.description, employee, evaluation_date);
        let prompt = self.composer.compose(request, employee, &evaluation.facts);

        Ok(PreparedEvaluation { evaluation, prompt })
    }

    /// Evaluates a request and returns its decision.
    pub async fn evaluate(
        &self,
        request: &LeaveRequest,
        employee: &Employee,
        evaluation_date: NaiveDate,
    ) -> EngineResult<Decision> {
        self.evaluate_with_trace(request, employee, evaluation_date)
            .await
            .map(|adjudication| adjudication.decision)
    }

    /// Evaluates a request and returns the decision with its evidence.
    pub async fn evaluate_with_trace(
        &self,
        request: &LeaveRequest,
        employee: &Employee,
        evaluation_date: NaiveDate,
    ) -> EngineResult<Adjudication> {
        let evaluation_id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            evaluation_id = %evaluation_id,
            request_id = %request.id,
            employee_id = %employee.id,
            "Evaluating leave request"
        );

        let PreparedEvaluation { evaluation, prompt } =
            match self.prepare(request, employee, evaluation_date) {
                Ok(prepared) => prepared,
                Err(err) => {
                    warn!(
                        evaluation_id = %evaluation_id,
                        request_id = %request.id,
                        error = %err,
                        "Leave request failed validation"
                    );
                    return Err(err);
                }
            };

        for step in &evaluation.audit_steps {
            debug!(
                evaluation_id = %evaluation_id,
                step = step.step_number,
                rule_id = %step.rule_id,
                reasoning = %step.reasoning,
                "Rule evaluated"
            );
        }

        let (narrative, attempts) = match self.generate(&prompt, evaluation_id).await {
            Ok(generated) => generated,
            Err(err) => {
                warn!(
                    evaluation_id = %evaluation_id,
                    request_id = %request.id,
                    error = %err,
                    "Reasoning backend failed"
                );
                return Err(err.into());
            }
        };

        let decision = DecisionParser::parse(&narrative, Utc::now());
        if !decision.is_determined() {
            warn!(
                evaluation_id = %evaluation_id,
                request_id = %request.id,
                "Narrative carried no recognizable status"
            );
        }

        let mut steps = evaluation.audit_steps;
        push_step(
            &mut steps,
            "reasoning",
            "Reasoning Backend",
            json!({ "system_chars": prompt.system.len(), "user_chars": prompt.user.len() }),
            json!({ "attempts": attempts, "narrative_chars": narrative.len() }),
            format!("Narrative produced after {} attempt(s)", attempts),
        );
        push_step(
            &mut steps,
            "decision",
            "Decision Extraction",
            json!({ "narrative_chars": narrative.len() }),
            json!({
                "status": decision.status,
                "justifications": decision.justifications.len(),
                "alternative_suggestion": decision.alternative_suggestion,
            }),
            if decision.is_determined() {
                format!("Recommendation extracted: {}", decision.status)
            } else {
                "No recognizable recommendation; status left undetermined".to_string()
            },
        );

        let duration = started.elapsed();
        info!(
            evaluation_id = %evaluation_id,
            request_id = %request.id,
            status = %decision.status,
            attempts,
            duration_ms = duration.as_millis() as u64,
            "Leave request evaluated"
        );

        Ok(Adjudication {
            evaluation_id,
            request_id: request.id.clone(),
            decision,
            facts: evaluation.facts,
            audit_trace: AuditTrace {
                steps,
                duration_us: duration.as_micros() as u64,
            },
        })
    }

    /// Calls the backend with a per-attempt timeout, retrying transient
    /// failures with exponential backoff.
    async fn generate(
        &self,
        prompt: &ComposedPrompt,
        evaluation_id: Uuid,
    ) -> Result<(String, u32), BackendError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let max_wait = Duration::from_millis(self.retry.max_backoff_ms);
        let mut backoff = Duration::from_millis(self.retry.initial_backoff_ms).min(max_wait);
        let mut attempt = 1;

        loop {
            let result = match tokio::time::timeout(
                self.timeout,
                self.backend.generate(&prompt.system, &prompt.user),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(BackendError::Timeout {
                    seconds: self.timeout.as_secs(),
                }),
            };

            match result {
                Ok(narrative) => return Ok((narrative, attempt)),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let retry_after = match &err {
                        BackendError::RateLimited {
                            retry_after_secs: Some(secs),
                        } => Some(Duration::from_secs(*secs)),
                        _ => None,
                    };
                    if let Some(retry_after) = retry_after.filter(|d| *d > max_wait) {
                        warn!(
                            evaluation_id = %evaluation_id,
                            attempt,
                            retry_after_secs = retry_after.as_secs(),
                            max_backoff_ms = self.retry.max_backoff_ms,
                            "Retry-After exceeds backoff cap, giving up"
                        );
                        return Err(err);
                    }
                    let wait = retry_after.map_or(backoff, |d| backoff.max(d));
                    warn!(
                        evaluation_id = %evaluation_id,
                        attempt,
                        error = %err,
                        wait_ms = wait.as_millis() as u64,
                        "Transient backend failure, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2).min(max_wait);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn push_step(
    steps: &mut Vec<AuditStep>,
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) {
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output,
        reasoning,
    });
}
