use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::domain::VehicleId;
use crate::notify::Severity;

/// Which fleet and polling cadence to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Full fleet at the production polling interval
    Normal,
    /// Small fleet at a short interval, for quick verification
    Test,
}

fn default_api_timeout_secs() -> u64 {
    30
}
fn default_normal_fleet() -> Vec<VehicleId> {
    (1..=10).map(VehicleId).collect()
}
fn default_test_fleet() -> Vec<VehicleId> {
    vec![VehicleId(11)]
}
fn default_normal_interval_secs() -> u64 {
    240
}
fn default_test_interval_secs() -> u64 {
    15
}
fn default_min_severity() -> Severity {
    Severity::Warning
}
fn default_webhook_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub fleet: Option<FleetConfig>,
    #[serde(default)]
    pub poll: Option<PollConfig>,
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// API root; required here or via --api-url
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FleetConfig {
    #[serde(default = "default_normal_fleet")]
    pub normal: Vec<VehicleId>,
    #[serde(default = "default_test_fleet")]
    pub test: Vec<VehicleId>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            normal: default_normal_fleet(),
            test: default_test_fleet(),
        }
    }
}

impl FleetConfig {
    pub fn for_mode(&self, mode: Mode) -> &[VehicleId] {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Test => &self.test,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_normal_interval_secs")]
    pub normal_interval_secs: u64,
    #[serde(default = "default_test_interval_secs")]
    pub test_interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            normal_interval_secs: default_normal_interval_secs(),
            test_interval_secs: default_test_interval_secs(),
        }
    }
}

impl PollConfig {
    pub fn interval_secs(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Normal => self.normal_interval_secs,
            Mode::Test => self.test_interval_secs,
        }
    }
}

/// Alert webhook; the section being present enables it
#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
    #[serde(default = "default_webhook_timeout_secs")]
    pub timeout_secs: u64,
}

impl FileConfig {
    /// Read and parse an explicitly named config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Search the usual locations and load the first parseable config
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fencewatch.toml"));
    paths.push(PathBuf::from(".fencewatch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fencewatch").join("config.toml"));
        paths.push(config_dir.join("fencewatch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fencewatch.toml"));
        paths.push(home.join(".config").join("fencewatch").join("config.toml"));
    }

    paths
}
