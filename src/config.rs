use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Privilege-escalation command, looked up on PATH unless absolute
    pub sudo: String,
    /// smartctl command, looked up on PATH unless absolute
    pub smartctl: String,
    /// Arguments passed to smartctl before the device path
    pub smartctl_args: Vec<String>,
}

/// Which prefixes the "Data written" block shows.
///
/// Both chains are always computed; this only selects what gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitScheme {
    /// MB/GB/TB (powers of 1000) alongside MiB/GiB/TiB (powers of 1024)
    Both,
    /// MB/GB/TB only
    Decimal,
    /// MiB/GiB/TiB only
    Binary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub units: UnitScheme,
    /// num-format locale used for thousands grouping ("en", "de", "fr", ...)
    pub locale: String,
    /// Emit ANSI colour escapes
    pub color: bool,
    /// Health below this is shown in the alert colour
    pub health_alert_below: u64,
    /// Health below this (and not alerting) is shown in the caution colour
    pub health_caution_below: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            sudo:          "sudo".into(),
            smartctl:      "smartctl".into(),
            smartctl_args: vec!["-x".into()],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            units:                UnitScheme::Both,
            locale:               "en".into(),
            color:                true,
            health_alert_below:   30,
            health_caution_below: 60,
        }
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Load the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None       => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(t)  => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ssdlife").join("ssdlife.toml"))
    }
}
