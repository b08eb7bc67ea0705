//! Automation server lifecycle
//!
//! The server is started as a local subprocess on a fixed port before the
//! session begins and stopped after. Readiness is the status endpoint
//! answering, polled within a bounded spawn timeout.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::driver::HttpDriver;

/// Poll interval while waiting for the status endpoint
const READY_POLL: Duration = Duration::from_millis(250);

/// A running automation server subprocess
pub struct AutomationServer {
    child: Child,
    base_url: String,
}

impl AutomationServer {
    /// Spawn the server and wait until it accepts requests
    pub async fn start(config: &Config) -> Result<Self> {
        let program = config.server_path()?;
        let base_url = config.server.url();

        tracing::info!(server = %program.display(), port = config.server.port, "starting automation server");

        let child = Command::new(&program)
            .arg("--port")
            .arg(config.server.port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::ServerStartFailed(format!("{}: {}", program.display(), e))
            })?;

        let mut server = Self { child, base_url };

        let timeout = config.server.spawn_timeout_secs;
        let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout);
        loop {
            if HttpDriver::server_ready(&server.base_url).await {
                tracing::debug!("automation server ready");
                return Ok(server);
            }
            if tokio::time::Instant::now() >= deadline {
                let _ = server.child.kill().await;
                return Err(Error::ServerSpawnTimeout(timeout));
            }
            tokio::time::sleep(READY_POLL).await;
        }
    }

    /// Stop the server subprocess
    pub async fn stop(mut self) {
        let _ = self.child.kill().await;
    }
}
