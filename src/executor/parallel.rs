//! Concurrent suite execution
//!
//! Optional bounded concurrency across independent suites. Cases within a
//! suite stay sequential (later cases may depend on records created by
//! earlier ones), and the merged outcome sequence is restored to suite
//! declaration order so reports stay deterministic.

#![allow(dead_code)]

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::models::{Outcome, Registry};
use crate::session::Credential;

use super::CaseExecutor;

/// Runs suites concurrently with a bounded worker pool
pub struct ParallelRunner {
    max_concurrent: usize,
}

impl ParallelRunner {
    pub fn new(max_concurrent: usize) -> Self {
        Self { max_concurrent }
    }

    /// Execute all suites; the credential must already be finalized.
    pub async fn run_suites(
        &self,
        executor: &CaseExecutor,
        registry: &Registry,
        credential: &Credential,
    ) -> Vec<Outcome> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let executor = Arc::new(executor.clone());
        let credential = Arc::new(credential.clone());

        let mut handles = Vec::new();

        for (index, suite) in registry.suites.iter().cloned().enumerate() {
            let semaphore = semaphore.clone();
            let executor = executor.clone();
            let credential = credential.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();
                debug!("Starting suite '{}'", suite.name);

                let mut outcomes = Vec::with_capacity(suite.cases.len());
                for case in &suite.cases {
                    outcomes.push(executor.execute(case, Some(&credential)).await);
                }

                (index, outcomes)
            });

            handles.push(handle);
        }

        let mut indexed: Vec<(usize, Vec<Outcome>)> = join_all(handles)
            .await
            .into_iter()
            .filter_map(|r| r.ok())
            .collect();

        // Declaration order, regardless of completion order
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().flat_map(|(_, o)| o).collect()
    }
}

impl Default for ParallelRunner {
    fn default() -> Self {
        Self::new(4)
    }
}
