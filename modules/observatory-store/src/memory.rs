use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use observatory_common::{Collection, FetchError, Risk, SeedDataset, Solution};

use crate::gateway::RiskGateway;

/// Gateway serving a fixed dataset from memory. Backs the offline
/// `--dataset` mode and tests; either collection can be made to fail.
pub struct MemoryGateway {
    dataset: SeedDataset,
    risks_failure: Option<String>,
    solutions_failure: Option<String>,
    calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn new(dataset: SeedDataset) -> Self {
        Self {
            dataset,
            risks_failure: None,
            solutions_failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_risks(mut self, message: impl Into<String>) -> Self {
        self.risks_failure = Some(message.into());
        self
    }

    pub fn failing_solutions(mut self, message: impl Into<String>) -> Self {
        self.solutions_failure = Some(message.into());
        self
    }

    /// Total number of list calls served (for test assertions).
    pub fn list_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RiskGateway for MemoryGateway {
    async fn list_risks(&self) -> Result<Vec<Risk>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.risks_failure {
            Some(msg) => Err(FetchError::new(Collection::Risks, msg.clone())),
            None => Ok(self.dataset.risks.clone()),
        }
    }

    async fn list_solutions(&self) -> Result<Vec<Solution>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.solutions_failure {
            Some(msg) => Err(FetchError::new(Collection::Solutions, msg.clone())),
            None => Ok(self.dataset.solutions.clone()),
        }
    }
}
