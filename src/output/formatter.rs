//! Output formatters for run results
//!
//! Provides JSON, Table, CSV, and summary output formats.

#![allow(dead_code)]

use std::io::Write;

use crate::models::{CaseStatus, Outcome, RunSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single outcome
    pub fn format_outcome(&self, outcome: &Outcome) -> String {
        match self.format {
            OutputFormat::Table => self.format_outcome_line(outcome),
            OutputFormat::Json => serde_json::to_string(outcome).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(outcome).unwrap_or_default(),
            OutputFormat::Csv => self.format_outcome_csv(outcome),
            OutputFormat::Summary => self.format_outcome_line(outcome),
        }
    }

    fn status_label(&self, status: CaseStatus) -> String {
        if self.colorize {
            match status {
                CaseStatus::Pass => "\x1b[32m[PASS]\x1b[0m".to_string(),
                CaseStatus::Fail => "\x1b[31m[FAIL]\x1b[0m".to_string(),
                CaseStatus::Skipped => "\x1b[33m[SKIP]\x1b[0m".to_string(),
            }
        } else {
            format!("[{status}]")
        }
    }

    fn format_outcome_line(&self, outcome: &Outcome) -> String {
        let mut line = format!("{} {}", self.status_label(outcome.status), outcome.case);

        if let Some(code) = outcome.status_code {
            line.push_str(&format!(" (HTTP {code})"));
        }
        line.push_str(&format!(" [{}ms]", outcome.duration_ms));

        if outcome.status == CaseStatus::Fail {
            if let Some(diag) = &outcome.diagnostic {
                line.push_str(&format!("\n  Response: {diag}"));
            }
        }

        line
    }

    fn format_outcome_csv(&self, outcome: &Outcome) -> String {
        format!(
            "\"{}\",{},{},{},\"{}\"",
            outcome.case.replace('"', "\"\""),
            outcome.status,
            outcome
                .status_code
                .map(|c| c.to_string())
                .unwrap_or_default(),
            outcome.duration_ms,
            outcome
                .diagnostic
                .as_deref()
                .unwrap_or("")
                .replace('"', "\"\"")
        )
    }

    /// Format the run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_summary_csv(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        let separator = "═".repeat(70);
        let thin = "─".repeat(70);

        output.push('\n');
        output.push_str(&separator);
        output.push('\n');
        output.push_str(&format!(
            " Target: {}  |  Started: {}\n",
            summary.target,
            summary.started_at.format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&separator);
        output.push('\n');

        for outcome in &summary.outcomes {
            output.push_str(&format!(" {}\n", self.format_outcome_line(outcome)));
        }

        output.push_str(&thin);
        output.push('\n');

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            " Total: {} | Pass: {} | Fail: {} | Skip: {}\n",
            summary.total, pass_str, fail_str, summary.skipped
        ));
        output.push_str(&format!(
            " Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.duration_ms
        ));
        output.push_str(&separator);
        output.push('\n');

        if summary.is_success() {
            output.push_str(&self.verdict_line("[SUCCESS] All cases passed!", true));
        } else {
            output.push_str(&self.verdict_line(
                &format!("[FAILED] {} cases failed", summary.failed),
                false,
            ));
        }
        output.push('\n');

        output
    }

    fn verdict_line(&self, text: &str, success: bool) -> String {
        if self.colorize {
            if success {
                format!("\x1b[32m\x1b[1m{text}\x1b[0m")
            } else {
                format!("\x1b[31m\x1b[1m{text}\x1b[0m")
            }
        } else {
            text.to_string()
        }
    }

    fn format_summary_csv(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        output.push_str("case,status,http_status,duration_ms,diagnostic\n");
        for outcome in &summary.outcomes {
            output.push_str(&self.format_outcome_csv(outcome));
            output.push('\n');
        }
        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%) in {}ms",
            summary.target,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a formatted summary to a file
pub fn write_summary_to_file(
    path: &str,
    summary: &RunSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_summary() -> RunSummary {
        RunSummary::new(
            "http://localhost:9090",
            Utc::now(),
            42,
            vec![
                Outcome::pass("获取元数据版本", 200, 12),
                Outcome::fail("获取表信息", Some(404), "{\"code\":404}", 8),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("unknown"), None);
    }

    #[test]
    fn test_format_outcome_no_color() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_outcome(&Outcome::pass("获取元数据版本", 200, 12));

        assert!(output.contains("[PASS]"));
        assert!(output.contains("获取元数据版本"));
        assert!(output.contains("HTTP 200"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_fail_outcome_includes_diagnostic() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output =
            formatter.format_outcome(&Outcome::fail("获取表信息", Some(404), "{\"code\":404}", 8));

        assert!(output.contains("[FAIL]"));
        assert!(output.contains("Response: {\"code\":404}"));
    }

    #[test]
    fn test_csv_format() {
        let formatter = ResultFormatter::new(OutputFormat::Csv).no_color();
        let output = formatter.format_summary(&sample_summary());

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "case,status,http_status,duration_ms,diagnostic"
        );
        assert!(lines.next().unwrap().contains("PASS,200,12"));
    }

    #[test]
    fn test_json_format_roundtrips() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&sample_summary());

        let parsed: RunSummary = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.failed, 1);
    }

    #[test]
    fn test_table_verdict() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_summary(&sample_summary());

        assert!(output.contains("Pass Rate: 50.0%"));
        assert!(output.contains("[FAILED] 1 cases failed"));
    }
}
