//! Scenario runner
//!
//! Owns the whole session: automation server subprocess, driver session,
//! device display setup, per-scenario profile initialization and teardown,
//! failure screenshots and the run report. Scenarios fail independently;
//! one failure never cascades into skips.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use colored::Colorize;

use crate::access::Accessor;
use crate::cli::spawn::AutomationServer;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::device::{self, AdbShell, DeviceShell};
use crate::driver::{HttpDriver, UiDriver};
use crate::fixtures::FixtureData;
use crate::flows::settings;
use crate::profile::ProfileInitializer;
use crate::report::{self, RunSummary, ScenarioResult};
use crate::scenarios::{Scenario, ScenarioContext};

/// Run all collected scenarios (optionally filtered by substring) against
/// the device and write the HTML report
pub async fn run(config: &Config, filter: Option<&str>) -> Result<RunSummary> {
    let fixture = FixtureData::load(&config.paths.fixture)?;

    let scenarios: Vec<Scenario> = crate::scenarios::all()
        .into_iter()
        .filter(|s| filter.map_or(true, |f| s.name.contains(f)))
        .collect();

    if scenarios.is_empty() {
        return Err(Error::Config(format!(
            "no scenario matches filter '{}'",
            filter.unwrap_or_default()
        )));
    }

    reset_dir(&config.paths.temp_dir)?;
    reset_dir(&config.paths.screenshots_dir)?;

    let server = AutomationServer::start(config).await?;

    let summary = match run_session(config, &fixture, &scenarios).await {
        Ok(summary) => summary,
        Err(e) => {
            server.stop().await;
            return Err(e);
        }
    };

    server.stop().await;

    report::write_html(&config.paths.report, &summary)?;
    println!(
        "\n{} {} passed, {} failed ({})",
        "Done:".blue().bold(),
        summary.passed().to_string().green(),
        summary.failed().to_string().red(),
        config.paths.report.display()
    );

    Ok(summary)
}

async fn run_session(
    config: &Config,
    fixture: &FixtureData,
    scenarios: &[Scenario],
) -> Result<RunSummary> {
    let shell = AdbShell::new(config.adb_path()?);
    device::apply_display_settings(&shell, config.device.density, config.device.font_scale).await?;

    let driver = HttpDriver::new_session(
        &config.server.url(),
        &config.app.package,
        &config.app.activity,
    )
    .await?;
    driver
        .set_implicit_wait(Duration::from_secs(config.timeouts.implicit_wait_secs))
        .await?;

    let mut summary = RunSummary::default();

    {
        let accessor = Accessor::new(&driver)
            .with_poll_interval(Duration::from_millis(config.timeouts.poll_interval_ms));

        for scenario in scenarios {
            let result = run_scenario(config, fixture, &accessor, &shell, scenario).await;
            summary.results.push(result);
        }
    }

    driver.quit().await?;
    Ok(summary)
}

async fn run_scenario(
    config: &Config,
    fixture: &FixtureData,
    accessor: &Accessor<'_>,
    shell: &dyn DeviceShell,
    scenario: &Scenario,
) -> ScenarioResult {
    println!(
        "\n{} {} {}",
        "Running:".blue().bold(),
        scenario.name.white().bold(),
        format!("[{}]", scenario.profile).dimmed()
    );
    println!("  {}", scenario.description.dimmed());

    let started = Instant::now();

    let outcome = async {
        // Setup phase: the body never runs unless the profile is active
        ProfileInitializer::new(accessor, shell, config)
            .ensure_profile(scenario.profile)
            .await
            .map_err(|e| {
                if e.is_setup() {
                    e
                } else {
                    Error::Setup(e.to_string())
                }
            })?;

        let ctx = ScenarioContext {
            accessor,
            fixture,
            config,
        };
        (scenario.run)(&ctx).await
    }
    .await;

    // Teardown keeps the device clean for the next scenario even after a
    // failure; its own faults only warn
    if let Err(e) = settings::delete_batch(accessor).await {
        tracing::warn!(scenario = scenario.name, "batch deletion failed: {e}");
    }

    let duration = started.elapsed();

    match outcome {
        Ok(()) => {
            println!("  {} {}", "✓".green(), "passed".green());
            ScenarioResult {
                name: scenario.name.to_string(),
                profile: scenario.profile.to_string(),
                description: scenario.description.to_string(),
                passed: true,
                error: None,
                screenshot: None,
                duration,
            }
        }
        Err(e) => {
            println!("  {} {}", "✗".red(), e.to_string().red());
            let screenshot =
                capture_failure_screenshot(accessor.driver(), &config.paths.screenshots_dir, scenario.name)
                    .await;
            ScenarioResult {
                name: scenario.name.to_string(),
                profile: scenario.profile.to_string(),
                description: scenario.description.to_string(),
                passed: false,
                error: Some(e.to_string()),
                screenshot,
                duration,
            }
        }
    }
}

/// Capture a screenshot named after the failing scenario; best effort,
/// a capture failure must not mask the original fault
async fn capture_failure_screenshot(
    driver: &dyn UiDriver,
    dir: &Path,
    scenario_name: &str,
) -> Option<PathBuf> {
    let path = dir.join(format!("{}.png", scenario_name));
    match driver.screenshot().await {
        Ok(bytes) => match std::fs::write(&path, bytes) {
            Ok(()) => {
                println!("  {} {}", "screenshot:".dimmed(), path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("could not write screenshot {}: {e}", path.display());
                None
            }
        },
        Err(e) => {
            tracing::warn!("screenshot capture failed: {e}");
            None
        }
    }
}

/// Create the directory if missing and clear any previous run's content
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(entry.path())?;
            } else {
                std::fs::remove_file(entry.path())?;
            }
        }
    } else {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
