//! Network readiness checks for the robot controller link
//!
//! The controller sits on a direct-attached interface that may not carry the
//! expected address after boot. Three independent checks: inspect the
//! interface, add the address if missing, and probe reachability. All of them
//! shell out to host facilities (`ip`, `ping`) and report a plain boolean;
//! failures are logged and swallowed, never propagated.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::NetworkConfig;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const CONFIGURE_TIMEOUT: Duration = Duration::from_secs(10);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes sent per connectivity test
const PING_COUNT: &str = "2";
/// Per-probe reply deadline in seconds (`ping -W`)
const PING_WAIT: &str = "3";

#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command timed out after {0:?}")]
    TimedOut(Duration),

    #[error("failed to run command: {0}")]
    Spawn(String),
}

/// Seam over host command execution, so the checks are testable without
/// touching real interfaces
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError>;
}

/// Runs commands via `tokio::process` with a hard timeout
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();

        match tokio::time::timeout(timeout, output).await {
            Err(_) => Err(CommandError::TimedOut(timeout)),
            Ok(Err(err)) => Err(CommandError::Spawn(err.to_string())),
            Ok(Ok(output)) => Ok(CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}

/// Host network configuration for robot communication
pub struct NetworkManager {
    config: NetworkConfig,
    runner: Arc<dyn CommandRunner>,
}

impl NetworkManager {
    pub fn new(config: NetworkConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// True only when the interface inspection succeeds and its output
    /// carries the expected local address
    pub async fn is_configured(&self) -> bool {
        let result = self
            .runner
            .run(
                "ip",
                &["addr", "show", &self.config.interface],
                CHECK_TIMEOUT,
            )
            .await;

        match result {
            Ok(output) => output.success && output.stdout.contains(&self.config.local_ip),
            Err(err) => {
                warn!("Failed to check network configuration: {err}");
                false
            }
        }
    }

    /// Add the expected address to the interface. Idempotent: reports success
    /// without touching the interface when it is already configured. No
    /// rollback of partial state on failure.
    pub async fn configure(&self) -> bool {
        if self.is_configured().await {
            info!("Network already configured: {}", self.config.assignment);
            return true;
        }

        info!(
            "Configuring network: {} on {}",
            self.config.assignment, self.config.interface
        );

        let result = self
            .runner
            .run(
                "sudo",
                &[
                    "ip",
                    "addr",
                    "add",
                    &self.config.assignment,
                    "dev",
                    &self.config.interface,
                ],
                CONFIGURE_TIMEOUT,
            )
            .await;

        match result {
            Ok(output) if output.success => {
                info!("Network configuration successful");
                true
            }
            Ok(output) => {
                error!("Network configuration failed: {}", output.stderr.trim());
                false
            }
            Err(err) => {
                error!("Network configuration error: {err}");
                false
            }
        }
    }

    /// Ping the controller. Purely diagnostic, no side effects.
    pub async fn test_connectivity(&self) -> bool {
        info!("Testing connectivity to {}", self.config.robot_ip);

        let result = self
            .runner
            .run(
                "ping",
                &["-c", PING_COUNT, "-W", PING_WAIT, &self.config.robot_ip],
                PING_TIMEOUT,
            )
            .await;

        match result {
            Ok(output) if output.success => {
                info!("Robot is reachable");
                true
            }
            Ok(_) => {
                warn!("Robot is not reachable via ping");
                false
            }
            Err(err) => {
                warn!("Connectivity test failed: {err}");
                false
            }
        }
    }
}
