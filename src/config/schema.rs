/// Configuration schema and defaults for mockboard.
///
/// Sections: `[server]`, `[data]`, `[display]`, `[retention]` and
/// `[telemetry]`. Every field has a built-in default, so a config file only
/// needs the values it overrides.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level mockboard configuration.
///
/// Maps to `~/.mockboard/config.toml` and `.mockboard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockboardConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub retention: RetentionConfig,
    pub telemetry: TelemetryConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `mockboard serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [data]
// ---------------------------------------------------------------------------

/// Mock data generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Fixed RNG seed. Unset means a fresh dataset every session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Probability that a month in a series is a spike.
    pub spike_chance: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spike_chance: crate::series::DEFAULT_SPIKE_CHANCE,
        }
    }
}

// ---------------------------------------------------------------------------
// [display] / [retention]
// ---------------------------------------------------------------------------

/// Display settings shown on the Settings tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub refresh_interval_minutes: u32,
    pub realtime_updates: bool,
    pub notifications: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 5,
            realtime_updates: true,
            notifications: true,
        }
    }
}

/// Retention choices offered on the Settings tab.
pub const RETENTION_CHOICES: [u32; 3] = [7, 30, 90];

/// Data settings shown on the Settings tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// One of [`RETENTION_CHOICES`]; other values fall back to 30.
    pub days: u32,
    pub data_export: bool,
    pub advanced_metrics: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: 30,
            data_export: true,
            advanced_metrics: false,
        }
    }
}

impl RetentionConfig {
    pub fn effective_days(&self) -> u32 {
        if RETENTION_CHOICES.contains(&self.days) {
            self.days
        } else {
            30
        }
    }
}

// ---------------------------------------------------------------------------
// [telemetry]
// ---------------------------------------------------------------------------

/// Placeholder application id; telemetry refuses to start with it.
pub const PLACEHOLDER_APPLICATION_ID: &str = "<YOUR APP MONITOR ID>";

/// Placeholder endpoint; telemetry refuses to start with it.
pub const PLACEHOLDER_ENDPOINT: &str = "<YOUR ENDPOINT URL>";

/// Real-user-monitoring client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub application_id: String,
    pub endpoint: String,
    pub version: String,
    pub region: String,
    /// Fraction of sessions recorded (0.0–1.0).
    pub session_sample_rate: f64,
    /// Maximum events per session; 0 means unlimited.
    pub session_event_limit: u32,
    pub telemetries: Vec<String>,
    pub allow_cookies: bool,
    pub enable_xray: bool,
    pub signing: bool,
    pub timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            application_id: PLACEHOLDER_APPLICATION_ID.to_string(),
            endpoint: PLACEHOLDER_ENDPOINT.to_string(),
            version: "1.0.0".to_string(),
            region: "eu-west-1".to_string(),
            session_sample_rate: 1.0,
            session_event_limit: 0,
            telemetries: vec![
                "performance".to_string(),
                "errors".to_string(),
                "http".to_string(),
            ],
            allow_cookies: true,
            enable_xray: false,
            signing: false,
            timeout_ms: 2000,
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl MockboardConfig {
    /// The annotated TOML written by `mockboard config init`.
    pub fn default_toml() -> String {
        r#"# mockboard configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (MOCKBOARD_*)
#   2. Project config (.mockboard.toml in current directory)
#   3. User global config (~/.mockboard/config.toml)
#   4. Built-in defaults

[server]
addr = "127.0.0.1:9747"
open_browser = true

[data]
# seed = 42            # Uncomment for a reproducible dataset
spike_chance = 0.3

[display]
refresh_interval_minutes = 5
realtime_updates = true
notifications = true

[retention]
days = 30              # 7 | 30 | 90
data_export = true
advanced_metrics = false

[telemetry]
enabled = true
application_id = "<YOUR APP MONITOR ID>"
endpoint = "<YOUR ENDPOINT URL>"
version = "1.0.0"
region = "eu-west-1"
session_sample_rate = 1.0
session_event_limit = 0
telemetries = ["performance", "errors", "http"]
allow_cookies = true
enable_xray = false
signing = false
timeout_ms = 2000
"#
        .to_string()
    }
}
