//! On-device shell interface
//!
//! The harness touches the device outside the UI in three places: display
//! density and font scale at session start, and the init configuration file
//! holding the active profile id. Everything goes through `adb`, behind the
//! `DeviceShell` trait so the profile initializer can run against a
//! scripted shell in tests.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use crate::common::config::{DisplayDensity, FontScale};
use crate::common::{Error, Result};

/// JSON key of the profile identifier inside the device init config
const PROFILE_KEY: &str = "profileId";

/// Shell boundary to the device
#[async_trait]
pub trait DeviceShell: Send + Sync {
    /// Run an adb invocation and return its trimmed stdout
    async fn run(&self, args: &[&str]) -> Result<String>;
}

/// `adb` subprocess implementation
pub struct AdbShell {
    adb: PathBuf,
}

impl AdbShell {
    pub fn new(adb: PathBuf) -> Self {
        Self { adb }
    }
}

#[async_trait]
impl DeviceShell for AdbShell {
    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(?args, "adb");
        let output = Command::new(&self.adb)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::DeviceShell(format!("failed to run adb: {}", e)))?;

        if !output.status.success() {
            return Err(Error::DeviceShell(format!(
                "adb {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Apply the configured display density and font scale
pub async fn apply_display_settings(
    shell: &dyn DeviceShell,
    density: DisplayDensity,
    font_scale: FontScale,
) -> Result<()> {
    shell
        .run(&["shell", "wm", "density", &density.dpi().to_string()])
        .await?;
    shell
        .run(&[
            "shell",
            "settings",
            "put",
            "system",
            "font_scale",
            font_scale.factor(),
        ])
        .await?;
    Ok(())
}

/// Read the active profile id from the device init config
pub async fn read_profile_id(shell: &dyn DeviceShell, config_path: &str) -> Result<String> {
    let raw = shell.run(&["exec-out", "cat", config_path]).await?;
    let config: Value = serde_json::from_str(&raw)
        .map_err(|e| Error::DeviceShell(format!("init config at {} is not JSON: {}", config_path, e)))?;

    config
        .get(PROFILE_KEY)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::DeviceShell(format!(
                "init config at {} carries no '{}' field",
                config_path, PROFILE_KEY
            ))
        })
}

/// Rewrite the profile id in the device init config
///
/// The config is read back, edited locally and pushed whole, preserving
/// every other field the application reads at startup.
pub async fn write_profile_id(
    shell: &dyn DeviceShell,
    config_path: &str,
    profile_id: &str,
) -> Result<()> {
    let raw = shell.run(&["exec-out", "cat", config_path]).await?;
    let mut config: Value = serde_json::from_str(&raw)
        .map_err(|e| Error::DeviceShell(format!("init config at {} is not JSON: {}", config_path, e)))?;

    config[PROFILE_KEY] = Value::String(profile_id.to_string());

    let local = std::env::temp_dir().join("apos_init_config.json");
    std::fs::write(&local, serde_json::to_string_pretty(&config)?)?;

    shell
        .run(&["push", &local.to_string_lossy(), config_path])
        .await?;

    tracing::info!(profile = profile_id, "device init config rewritten");
    Ok(())
}

/// Scripted shell for harness tests
#[derive(Default)]
pub struct MockShell {
    responses: std::sync::Mutex<std::collections::HashMap<String, String>>,
    calls: std::sync::Mutex<Vec<String>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the stdout for an exact adb invocation (space-joined args)
    pub fn respond(&self, invocation: &str, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(invocation.to_string(), stdout.to_string());
    }

    /// Every invocation run so far, space-joined, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeviceShell for MockShell {
    async fn run(&self, args: &[&str]) -> Result<String> {
        let invocation = args.join(" ");
        self.calls.lock().unwrap().push(invocation.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&invocation)
            .cloned()
            .unwrap_or_default())
    }
}
