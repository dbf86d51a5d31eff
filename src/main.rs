//! deskpilot CLI
//!
//! Checks host network readiness, attaches to a running WebDriver session
//! showing the Desk control application, and runs one gripper command. The
//! browser itself is managed externally; this binary only drives it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deskpilot::params::{
    DEFAULT_CLOSE_FORCE, DEFAULT_CLOSE_LOAD, DEFAULT_CLOSE_SPEED, DEFAULT_OPEN_SPEED,
};
use deskpilot::{
    load_yaml_config, CloseParams, GripperDriver, NetworkManager, SystemCommandRunner,
    WebDriverSession,
};

#[derive(Parser)]
#[command(name = "deskpilot", version, about = "Drive the Desk gripper UI over WebDriver")]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = "deskpilot.yaml")]
    config: PathBuf,

    /// WebDriver endpoint, overriding the config file
    #[arg(long)]
    webdriver: Option<String>,

    /// Skip the network readiness step before UI commands
    #[arg(long)]
    skip_network: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report interface state, apply the address assignment if missing,
    /// and ping the controller
    NetCheck,
    /// Execute the gripper open task
    Open,
    /// Execute the gripper close task
    Close,
    /// Set the open task's speed parameter
    ConfigureOpen {
        #[arg(long, default_value_t = DEFAULT_OPEN_SPEED)]
        speed: u32,
    },
    /// Set the close task's speed, force and load parameters
    ConfigureClose {
        #[arg(long, default_value_t = DEFAULT_CLOSE_SPEED)]
        speed: u32,
        #[arg(long, default_value_t = DEFAULT_CLOSE_FORCE)]
        force: u32,
        #[arg(long, default_value_t = DEFAULT_CLOSE_LOAD)]
        load: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = load_yaml_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    if let Some(url) = cli.webdriver {
        config.webdriver_url = url;
    }

    let network = NetworkManager::new(config.network.clone(), Arc::new(SystemCommandRunner));

    if let Command::NetCheck = cli.command {
        let configured = network.is_configured().await;
        info!("Interface configured: {configured}");
        // Idempotent: reports success without touching an already-configured
        // interface.
        let applied = network.configure().await;
        let reachable = network.test_connectivity().await;
        info!("Address assignment applied: {applied}, controller reachable: {reachable}");
        if !(applied && reachable) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Best-effort readiness before touching the UI; a failure here usually
    // just means the session will fail louder a moment later.
    if !cli.skip_network {
        if !network.configure().await {
            warn!("Network configuration failed, continuing anyway");
        }
        if !network.test_connectivity().await {
            warn!("Controller not reachable, continuing anyway");
        }
    }

    let session = WebDriverSession::connect(&config.webdriver_url)
        .await
        .with_context(|| format!("failed to connect to WebDriver at {}", config.webdriver_url))?;
    let driver = GripperDriver::new(Arc::new(session));

    let ok = match cli.command {
        Command::NetCheck => unreachable!("handled above"),
        Command::Open => driver.open_gripper().await,
        Command::Close => driver.close_gripper().await,
        Command::ConfigureOpen { speed } => driver.configure_open(speed).await,
        Command::ConfigureClose { speed, force, load } => {
            driver.configure_close(CloseParams { speed, force, load }).await
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
