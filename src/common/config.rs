//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Automation server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Application under test
    #[serde(default)]
    pub app: AppConfig,

    /// Device settings applied at session start
    #[serde(default)]
    pub device: DeviceConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Artifact and fixture paths
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Automation server settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server executable (searched on PATH when not absolute)
    #[serde(default = "default_server_command")]
    pub command: String,

    /// Fixed port the server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Seconds to wait for the status endpoint after spawning
    #[serde(default = "default_spawn_timeout")]
    pub spawn_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_server_command(),
            port: default_server_port(),
            spawn_timeout_secs: default_spawn_timeout(),
        }
    }
}

impl ServerConfig {
    /// Base URL of the automation server
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

fn default_server_command() -> String {
    "appium".to_string()
}
fn default_server_port() -> u16 {
    4724
}
fn default_spawn_timeout() -> u64 {
    20
}

/// Application under test
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Android package of the terminal application
    #[serde(default = "default_package")]
    pub package: String,

    /// Launch activity
    #[serde(default = "default_activity")]
    pub activity: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            activity: default_activity(),
        }
    }
}

fn default_package() -> String {
    "com.payten.apos".to_string()
}
fn default_activity() -> String {
    ".gui.MainActivity".to_string()
}

/// Named display density presets
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayDensity {
    Small,
    #[default]
    Default,
    Large,
}

impl DisplayDensity {
    /// Density in dpi as passed to `wm density`
    pub fn dpi(self) -> u32 {
        match self {
            Self::Small => 180,
            Self::Default => 213,
            Self::Large => 240,
        }
    }
}

/// Named font scale presets
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontScale {
    Small,
    #[default]
    Default,
    Large,
    VeryLarge,
}

impl FontScale {
    /// Scale factor as written to the system `font_scale` setting
    pub fn factor(self) -> &'static str {
        match self {
            Self::Small => "0.85",
            Self::Default => "1",
            Self::Large => "1.15",
            Self::VeryLarge => "1.3",
        }
    }
}

/// Device settings applied at session start
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    /// adb executable (searched on PATH when not absolute)
    #[serde(default = "default_adb")]
    pub adb: String,

    /// Display density preset applied at session start
    #[serde(default)]
    pub density: DisplayDensity,

    /// Font scale preset applied at session start
    #[serde(default)]
    pub font_scale: FontScale,

    /// On-device path of the init configuration holding the profile id
    #[serde(default = "default_init_config")]
    pub init_config_path: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb: default_adb(),
            density: DisplayDensity::default(),
            font_scale: FontScale::default(),
            init_config_path: default_init_config(),
        }
    }
}

fn default_adb() -> String {
    "adb".to_string()
}
fn default_init_config() -> String {
    "/sdcard/apos/init_config.json".to_string()
}

/// Timeout settings
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Implicit wait applied to element lookups, in seconds
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_secs: u64,

    /// Bounded wait for idle screen, init success marker and dialogs
    #[serde(default = "default_ui_wait")]
    pub ui_wait_secs: u64,

    /// Poll interval for bounded waits, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            implicit_wait_secs: default_implicit_wait(),
            ui_wait_secs: default_ui_wait(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_implicit_wait() -> u64 {
    5
}
fn default_ui_wait() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    250
}

/// Artifact and fixture paths, relative to the working directory
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Fixture dataset with cards, currencies and amount sets
    #[serde(default = "default_fixture")]
    pub fixture: PathBuf,

    /// Directory for failure screenshots
    #[serde(default = "default_screenshots")]
    pub screenshots_dir: PathBuf,

    /// Scratch directory cleared at session start
    #[serde(default = "default_temp")]
    pub temp_dir: PathBuf,

    /// HTML run report
    #[serde(default = "default_report")]
    pub report: PathBuf,

    /// CSV scenario manifest
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fixture: default_fixture(),
            screenshots_dir: default_screenshots(),
            temp_dir: default_temp(),
            report: default_report(),
            manifest: default_manifest(),
        }
    }
}

fn default_fixture() -> PathBuf {
    PathBuf::from("test_data.json")
}
fn default_screenshots() -> PathBuf {
    PathBuf::from("screenshots")
}
fn default_temp() -> PathBuf {
    PathBuf::from("temp")
}
fn default_report() -> PathBuf {
    PathBuf::from("report.html")
}
fn default_manifest() -> PathBuf {
    PathBuf::from("TestList.csv")
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Resolve the adb executable, searching PATH when needed
    pub fn adb_path(&self) -> Result<PathBuf> {
        resolve_executable(&self.device.adb)
    }

    /// Resolve the automation server executable, searching PATH when needed
    pub fn server_path(&self) -> Result<PathBuf> {
        resolve_executable(&self.server.command)
    }
}

fn resolve_executable(name: &str) -> Result<PathBuf> {
    let p = PathBuf::from(name);
    if p.is_absolute() {
        return Ok(p);
    }
    which::which(name)
        .map_err(|_| super::Error::Config(format!("Executable '{}' not found on PATH", name)))
}
