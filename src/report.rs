use crate::client::ClientError;
use crate::contract::{ExpectedStatus, Scenario};
use crate::telemetry::error_chain_fmt;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum ScenarioFailure {
    #[error("Failed to provision prerequisite entities")]
    Provisioning(#[source] ClientError),
    #[error("The request could not be completed")]
    Client(#[source] ClientError),
    #[error("Expected status {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },
}

impl std::fmt::Debug for ScenarioFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
#[error("Lifecycle step `{step}` failed")]
pub struct LifecycleFailure {
    pub step: &'static str,
    #[source]
    pub failure: ScenarioFailure,
}

impl std::fmt::Debug for LifecycleFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug)]
pub enum ScenarioResult {
    Passed { actual: u16 },
    Failed(ScenarioFailure),
    /// Not run because an earlier scenario failed in fail-fast mode.
    Skipped,
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub label: String,
    pub expected: ExpectedStatus,
    pub result: ScenarioResult,
}

impl ScenarioOutcome {
    pub fn new(scenario: &Scenario, result: ScenarioResult) -> Self {
        Self {
            label: scenario.label.clone(),
            expected: scenario.expected,
            result,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.result, ScenarioResult::Passed { .. })
    }

    pub fn failure(&self) -> Option<&ScenarioFailure> {
        match &self.result {
            ScenarioResult::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ContractReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<ScenarioOutcome>,
    /// `None` when the lifecycle walk was not run.
    pub lifecycle: Option<Result<(), LifecycleFailure>>,
}

impl ContractReport {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
            lifecycle: None,
        }
    }

    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, ScenarioResult::Skipped))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| o.failure().is_some())
    }

    pub fn lifecycle_failed(&self) -> bool {
        matches!(self.lifecycle, Some(Err(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0 && !self.lifecycle_failed()
    }

    /// Emits one event per failure and a closing summary.
    pub fn log(&self) {
        for outcome in self.failures() {
            if let Some(failure) = outcome.failure() {
                tracing::error!(
                    scenario = %outcome.label,
                    expected = outcome.expected.code(),
                    error.cause_chain = ?failure,
                    error.message = %failure,
                    "Scenario failed",
                );
            }
        }
        if let Some(Err(e)) = &self.lifecycle {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Lifecycle walk failed",
            );
        }
        tracing::info!(run_id = %self.run_id, "{}", self);
    }
}

impl std::fmt::Display for ContractReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scenarios: {} passed, {} failed, {} skipped",
            self.outcomes.len(),
            self.passed(),
            self.failed(),
            self.skipped()
        )?;
        match &self.lifecycle {
            None => write!(f, "; lifecycle not run"),
            Some(Ok(())) => write!(f, "; lifecycle passed"),
            Some(Err(e)) => write!(f, "; lifecycle failed at `{}`", e.step),
        }
    }
}
