//! Browser automation driver for the Franka Desk gripper UI
//!
//! Drives the vendor's web control application (task selection, parameter
//! configuration, execution) over a live WebDriver session, and checks or
//! configures the host network interface used to reach the robot controller.

pub mod driver;
pub mod locator;
pub mod network;
pub mod params;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use driver::GripperDriver;
pub use locator::{Locator, WaitFor};
pub use network::{CommandRunner, NetworkManager, SystemCommandRunner};
pub use params::CloseParams;
pub use session::webdriver::WebDriverSession;
pub use session::{SessionError, UiElement, UiSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    /// WebDriver endpoint the control UI session is attached to
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// Host-side network settings for reaching the robot controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Interface the controller is wired to
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Local address expected on that interface (bare IP, matched against
    /// the interface inspection output)
    #[serde(default = "default_local_ip")]
    pub local_ip: String,

    /// Address assignment in CIDR form, added when not yet configured
    #[serde(default = "default_assignment")]
    pub assignment: String,

    /// Robot controller address used for reachability probes
    #[serde(default = "default_robot_ip")]
    pub robot_ip: String,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_interface() -> String {
    "eth0".to_string()
}

fn default_local_ip() -> String {
    "172.16.0.2".to_string()
}

fn default_assignment() -> String {
    "172.16.0.2/24".to_string()
}

fn default_robot_ip() -> String {
    "172.16.0.1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            local_ip: default_local_ip(),
            assignment: default_assignment(),
            robot_ip: default_robot_ip(),
        }
    }
}

/// Load config from a YAML file, falling back to defaults when it is absent
pub fn load_yaml_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}
