//! Error types for the test harness
//!
//! Faults are split into classes with different handling policies: transient
//! UI faults (retried by the element accessor), absence lookups (a normal
//! boolean outcome), assertion mismatches (fatal to the scenario, reported
//! with expected-vs-actual detail) and setup faults (fatal before the
//! scenario body runs).

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test harness
#[derive(Error, Debug)]
pub enum Error {
    // === Automation server / session errors ===
    #[error("Automation server failed to start: timed out waiting for status endpoint after {0} seconds")]
    ServerSpawnTimeout(u64),

    #[error("Automation server failed to start: {0}")]
    ServerStartFailed(String),

    #[error("Failed to create automation session: {0}")]
    SessionCreateFailed(String),

    #[error("Automation server communication error: {0}")]
    Transport(String),

    // === Driver / element errors ===
    #[error("Stale element reference for {locator}")]
    StaleElement { locator: String },

    #[error("No such element: {locator}")]
    NoSuchElement { locator: String },

    #[error("Driver request '{command}' failed: {message}")]
    DriverRequestFailed { command: String, message: String },

    // === Timeout errors ===
    #[error("Timed out after {waited} waiting for {what}")]
    WaitTimeout { what: String, waited: String },

    // === Device shell errors ===
    #[error("Device shell command failed: {0}")]
    DeviceShell(String),

    // === Scenario errors ===
    #[error("Assertion failed for {subject}: expected '{expected}', got '{actual}'")]
    Assertion {
        subject: String,
        expected: String,
        actual: String,
    },

    #[error("Scenario setup failed: {0}")]
    Setup(String),

    // === Configuration errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid fixture dataset: {0}")]
    Fixture(String),

    // === IO errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an assertion error with expected-vs-actual detail
    pub fn assertion(subject: &str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Assertion {
            subject: subject.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a driver request error
    pub fn driver_request_failed(command: &str, message: &str) -> Self {
        Self::DriverRequestFailed {
            command: command.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a wait timeout error; the elapsed wait keeps sub-second
    /// precision in the message
    pub fn wait_timeout(what: impl Into<String>, waited: std::time::Duration) -> Self {
        Self::WaitTimeout {
            what: what.into(),
            waited: format!("{:?}", waited),
        }
    }

    /// Whether this fault is the transient stale-reference class that the
    /// element accessor absorbs with bounded retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StaleElement { .. })
    }

    /// Whether this fault is fatal to scenario setup rather than the body
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::Setup(_)
                | Self::ServerSpawnTimeout(_)
                | Self::ServerStartFailed(_)
                | Self::SessionCreateFailed(_)
        )
    }
}
