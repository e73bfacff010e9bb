//! Mock Runner Service Implementation
//!
//! Programmable mock for testing asset deletion:
//! - `MockRunnerService`: records every delete request
//! - `MockOutcome`: Succeed, Fail, or Timeout

use crate::{DeleteFilesRequest, RunnerError, RunnerService};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// What outcome the mock should produce
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    #[default]
    Succeed,
    /// Runner answers with a non-success status
    Fail,
    /// Request never completes in time
    Timeout,
}

/// A recorded delete request for test assertions
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDeleteRequest {
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub request: DeleteFilesRequest,
}

/// Mock runner service with programmable behavior
#[derive(Debug, Clone)]
pub struct MockRunnerService {
    outcome: Arc<Mutex<MockOutcome>>,
    healthy: Arc<Mutex<bool>>,
    history: Arc<Mutex<Vec<RecordedDeleteRequest>>>,
}

impl MockRunnerService {
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(Mutex::new(MockOutcome::Succeed)),
            healthy: Arc::new(Mutex::new(true)),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the outcome of subsequent delete requests
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.lock().expect("outcome lock poisoned") = outcome;
    }

    /// Configure what `status()` reports
    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().expect("healthy lock poisoned") = healthy;
    }

    /// Get recorded delete requests
    pub fn recorded_requests(&self) -> Vec<RecordedDeleteRequest> {
        self.history
            .lock()
            .expect("history lock poisoned")
            .clone()
    }

    /// Clear history
    pub fn reset_history(&self) {
        self.history.lock().expect("history lock poisoned").clear();
    }
}

impl Default for MockRunnerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RunnerService for MockRunnerService {
    async fn delete_asset_files(
        &self,
        user_id: Uuid,
        asset_id: Uuid,
        request: &DeleteFilesRequest,
    ) -> Result<(), RunnerError> {
        tracing::info!(%user_id, %asset_id, "Mock runner: received delete request");

        self.history
            .lock()
            .map_err(|e| RunnerError::Request(format!("history lock poisoned: {e}")))?
            .push(RecordedDeleteRequest {
                user_id,
                asset_id,
                request: request.clone(),
            });

        let outcome = self
            .outcome
            .lock()
            .map_err(|e| RunnerError::Request(format!("outcome lock poisoned: {e}")))?
            .clone();

        match outcome {
            MockOutcome::Succeed => Ok(()),
            MockOutcome::Fail => Err(RunnerError::Response(
                "Runner returned 500 Internal Server Error: mock failure".to_string(),
            )),
            MockOutcome::Timeout => Err(RunnerError::Timeout(Duration::from_secs(30))),
        }
    }

    async fn status(&self) -> Result<(), RunnerError> {
        let healthy = *self
            .healthy
            .lock()
            .map_err(|e| RunnerError::Request(format!("healthy lock poisoned: {e}")))?;

        if healthy {
            Ok(())
        } else {
            Err(RunnerError::Response("Runner connection failed.".to_string()))
        }
    }
}
