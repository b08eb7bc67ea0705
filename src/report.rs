//! Run report and scenario manifest
//!
//! Failing scenarios carry a screenshot into the HTML report; the manifest
//! is a CSV listing of every collected scenario for test-management
//! consumers.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::Result;
use crate::scenarios::Scenario;

/// Outcome of one scenario run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub profile: String,
    pub description: String,
    pub passed: bool,
    /// Failure detail, including expected-vs-actual for assertion faults
    pub error: Option<String>,
    /// Screenshot captured at the moment of failure
    pub screenshot: Option<PathBuf>,
    pub duration: Duration,
}

/// Summary of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }
}

/// Write the HTML run report
pub fn write_html(path: &Path, summary: &RunSummary) -> Result<()> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\n");
    html.push_str("<title>APOS test run</title>\n<style>\n");
    html.push_str("body{font-family:sans-serif;margin:2em}\n");
    html.push_str("tr.pass td.outcome{color:#2e7d32}tr.fail td.outcome{color:#c62828}\n");
    html.push_str("table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:4px 10px}\n");
    html.push_str("img{max-width:320px;display:block;margin-top:4px}\npre{white-space:pre-wrap}\n");
    html.push_str("</style></head><body>\n");

    let _ = writeln!(
        html,
        "<h1>APOS test run</h1>\n<p>{} passed, {} failed</p>",
        summary.passed(),
        summary.failed()
    );

    html.push_str("<table>\n<tr><th>Scenario</th><th>Profile</th><th>Outcome</th><th>Detail</th></tr>\n");
    for result in &summary.results {
        let class = if result.passed { "pass" } else { "fail" };
        let outcome = if result.passed { "passed" } else { "failed" };
        let _ = writeln!(
            html,
            "<tr class=\"{}\"><td>{}<br><small>{}</small></td><td>{}</td><td class=\"outcome\">{} ({:.1}s)</td>",
            class,
            escape(&result.name),
            escape(&result.description),
            escape(&result.profile),
            outcome,
            result.duration.as_secs_f64(),
        );
        html.push_str("<td>");
        if let Some(error) = &result.error {
            let _ = write!(html, "<pre>{}</pre>", escape(error));
        }
        if let Some(shot) = &result.screenshot {
            let _ = write!(html, "<img src=\"{}\" alt=\"failure screenshot\">", shot.display());
        }
        html.push_str("</td></tr>\n");
    }
    html.push_str("</table>\n</body></html>\n");

    std::fs::write(path, html)?;
    Ok(())
}

/// Write the scenario manifest as CSV
///
/// Columns match the test-management import: No., Name, PID, Description,
/// Path.
pub fn write_manifest(path: &Path, scenarios: &[Scenario]) -> Result<()> {
    let mut csv = String::from("No.,Name,PID,Description,Path\n");
    for (index, scenario) in scenarios.iter().enumerate() {
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            index + 1,
            csv_field(scenario.name),
            csv_field(scenario.profile),
            csv_field(scenario.description),
            csv_field(scenario.source),
        );
    }
    std::fs::write(path, csv)?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios;

    #[test]
    fn csv_fields_are_quoted_when_needed() {
        assert_eq!(csv_field("sale_tip_declined"), "sale_tip_declined");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"no\""), "\"say \"\"no\"\"\"");
    }

    #[test]
    fn manifest_lists_every_scenario_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TestList.csv");
        let all = scenarios::all();

        write_manifest(&path, &all).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "No.,Name,PID,Description,Path");
        assert_eq!(lines.len(), all.len() + 1);
        assert!(lines[1].starts_with("1,sale_tip_multicurrency,APOS0015,"));
    }

    #[test]
    fn html_report_carries_failure_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        let summary = RunSummary {
            results: vec![
                ScenarioResult {
                    name: "sale_tip_declined".into(),
                    profile: "APOS0015".into(),
                    description: "decline path".into(),
                    passed: true,
                    error: None,
                    screenshot: None,
                    duration: Duration::from_secs(12),
                },
                ScenarioResult {
                    name: "sale_tip_expired_card".into(),
                    profile: "APOS0015".into(),
                    description: "expired card".into(),
                    passed: false,
                    error: Some("expected 'Prodej', got '<Servis>'".into()),
                    screenshot: Some(PathBuf::from("screenshots/sale_tip_expired_card.png")),
                    duration: Duration::from_secs(7),
                },
            ],
        };

        write_html(&path, &summary).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("1 passed, 1 failed"));
        assert!(html.contains("sale_tip_expired_card.png"));
        // Angle brackets in failure detail are escaped
        assert!(html.contains("&lt;Servis&gt;"));
    }
}
