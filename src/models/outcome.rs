//! Outcome and summary models
//!
//! Classified results of executed cases and the aggregate run summary.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one executed case
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    Skipped,
}

impl CaseStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            CaseStatus::Pass => "✓",
            CaseStatus::Fail => "✗",
            CaseStatus::Skipped => "○",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CaseStatus::Pass)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Pass => write!(f, "PASS"),
            CaseStatus::Fail => write!(f, "FAIL"),
            CaseStatus::Skipped => write!(f, "SKIP"),
        }
    }
}

/// Result of executing one case, immutable once produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Outcome {
    /// Case name as declared in the registry
    pub case: String,

    pub status: CaseStatus,

    /// Observed HTTP status code, if a response arrived
    pub status_code: Option<u16>,

    /// Response body or error description on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,

    /// Structured extras, e.g. the created record identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    pub duration_ms: u64,
}

impl Outcome {
    pub fn pass(case: impl Into<String>, status_code: u16, duration_ms: u64) -> Self {
        Self {
            case: case.into(),
            status: CaseStatus::Pass,
            status_code: Some(status_code),
            diagnostic: None,
            details: None,
            duration_ms,
        }
    }

    pub fn fail(
        case: impl Into<String>,
        status_code: Option<u16>,
        diagnostic: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            case: case.into(),
            status: CaseStatus::Fail,
            status_code,
            diagnostic: Some(diagnostic.into()),
            details: None,
            duration_ms,
        }
    }

    pub fn skipped(case: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            status: CaseStatus::Skipped,
            status_code: None,
            diagnostic: Some(reason.into()),
            details: None,
            duration_ms: 0,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.status.symbol(), self.status, self.case)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {code})")?;
        }
        write!(f, " [{}ms]", self.duration_ms)?;
        if self.status == CaseStatus::Fail {
            if let Some(diag) = &self.diagnostic {
                write!(f, " - {diag}")?;
            }
        }
        Ok(())
    }
}

/// Live counters updated after every case
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunStats {
    /// Record one outcome into the counters
    pub fn record(&mut self, status: CaseStatus) {
        self.total += 1;
        match status {
            CaseStatus::Pass => self.passed += 1,
            CaseStatus::Fail => self.failed += 1,
            CaseStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: RunStats) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Aggregate counts and ordered outcomes for an entire run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    /// Base URL of the verified service
    pub target: String,

    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,

    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,

    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    /// Build a summary, deriving the counts from the outcome sequence
    pub fn new(
        target: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        outcomes: Vec<Outcome>,
    ) -> Self {
        let mut stats = RunStats::default();
        for outcome in &outcomes {
            stats.record(outcome.status);
        }

        Self {
            target: target.into(),
            started_at,
            duration_ms,
            total: stats.total,
            passed: stats.passed,
            failed: stats.failed,
            skipped: stats.skipped,
            outcomes,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Run verdict: success iff nothing failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for the invoking automation
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Outcomes that failed, in report order
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == CaseStatus::Fail)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {}",
            self.total, self.passed, self.failed, self.skipped
        )?;
        write!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_creation() {
        let outcome = Outcome::pass("获取元数据版本", 200, 12);
        assert!(outcome.status.is_pass());
        assert_eq!(outcome.status_code, Some(200));

        let failed = Outcome::fail("获取元数据版本", Some(404), "not found", 8);
        assert_eq!(failed.status, CaseStatus::Fail);
        assert_eq!(failed.status_code, Some(404));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = RunStats::default();
        stats.record(CaseStatus::Pass);
        stats.record(CaseStatus::Pass);
        stats.record(CaseStatus::Fail);
        stats.record(CaseStatus::Skipped);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.passed, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_summary_counts_match_outcomes() {
        let outcomes = vec![
            Outcome::pass("a", 200, 10),
            Outcome::pass("b", 201, 10),
            Outcome::pass("c", 200, 10),
            Outcome::fail("d", Some(500), "boom", 10),
        ];

        let summary = RunSummary::new("http://localhost:9090", Utc::now(), 40, outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed + summary.failed + summary.skipped, 4);
        assert!(!summary.is_success());
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_pass_rate() {
        let outcomes = vec![
            Outcome::pass("a", 200, 1),
            Outcome::pass("b", 200, 1),
            Outcome::pass("c", 200, 1),
            Outcome::fail("d", Some(404), "missing", 1),
        ];
        let summary = RunSummary::new("t", Utc::now(), 4, outcomes);
        assert_eq!(summary.pass_rate(), 75.0);
        assert_eq!(format!("{:.1}%", summary.pass_rate()), "75.0%");
    }

    #[test]
    fn test_pass_rate_empty_run() {
        let summary = RunSummary::new("t", Utc::now(), 0, Vec::new());
        assert_eq!(summary.pass_rate(), 0.0);
        assert!(summary.is_success());
        assert_eq!(summary.exit_code(), 0);
    }
}
