/// Best-effort real-user-monitoring (RUM) startup ping.
///
/// At startup the dashboard announces a session to a RUM collector. This is
/// optional and must never hold up or break the dashboard:
///
/// - [`initialize`] validates the config, decides sampling and hands the
///   HTTP call to a detached thread, then returns immediately.
/// - The result is a [`TelemetryOutcome`] the caller logs and drops.
/// - Network failures inside the thread are swallowed.
///
/// The default config carries placeholder application id and endpoint, so
/// an unconfigured install reports `Failed` and carries on.
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::config::schema::{PLACEHOLDER_APPLICATION_ID, PLACEHOLDER_ENDPOINT, TelemetryConfig};
use crate::random::{RandomSource, base36_token};

/// Telemetry categories the collector understands.
const KNOWN_TELEMETRIES: [&str; 3] = ["performance", "errors", "http"];

const SESSION_ID_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What happened when telemetry was initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryOutcome {
    /// Turned off in config.
    Disabled,
    /// Session created. `sampled` is false when the sample rate excluded
    /// this session, in which case nothing is sent.
    Started { session_id: String, sampled: bool },
    /// Setup failed; the dashboard runs without telemetry.
    Failed(String),
}

impl std::fmt::Display for TelemetryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Started {
                session_id,
                sampled: true,
            } => write!(f, "started (session {session_id})"),
            Self::Started { session_id, .. } => {
                write!(f, "started (session {session_id}, not sampled)")
            }
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A validated RUM client.
#[derive(Debug, Clone)]
pub struct RumClient {
    application_id: String,
    version: String,
    region: String,
    endpoint: String,
    telemetries: Vec<String>,
    allow_cookies: bool,
    enable_xray: bool,
    session_event_limit: u32,
    signing: bool,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStartEvent<'a> {
    application_id: &'a str,
    version: &'a str,
    region: &'a str,
    session_id: &'a str,
    timestamp: String,
    event_type: &'static str,
    telemetries: &'a [String],
    allow_cookies: bool,
    enable_xray: bool,
    session_event_limit: u32,
    signing: bool,
}

impl RumClient {
    /// Build a client, rejecting placeholder or malformed settings.
    pub fn from_config(config: &TelemetryConfig) -> Result<Self> {
        let application_id = config.application_id.trim();
        if application_id.is_empty() || application_id == PLACEHOLDER_APPLICATION_ID {
            anyhow::bail!("application id is not configured");
        }

        let endpoint = config.endpoint.trim();
        if endpoint == PLACEHOLDER_ENDPOINT {
            anyhow::bail!("endpoint is not configured");
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            anyhow::bail!("endpoint must be an http(s) URL, got '{endpoint}'");
        }

        if !(0.0..=1.0).contains(&config.session_sample_rate) {
            anyhow::bail!(
                "session_sample_rate must be between 0 and 1, got {}",
                config.session_sample_rate
            );
        }

        if config.region.trim().is_empty() {
            anyhow::bail!("region is not configured");
        }

        if let Some(unknown) = config
            .telemetries
            .iter()
            .find(|t| !KNOWN_TELEMETRIES.contains(&t.as_str()))
        {
            anyhow::bail!("unknown telemetry category '{unknown}'");
        }

        Ok(Self {
            application_id: application_id.to_string(),
            version: config.version.clone(),
            region: config.region.trim().to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            telemetries: config.telemetries.clone(),
            allow_cookies: config.allow_cookies,
            enable_xray: config.enable_xray,
            session_event_limit: config.session_event_limit,
            signing: config.signing,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Collector URL for this application.
    pub fn events_url(&self) -> String {
        format!("{}/appmonitors/{}", self.endpoint, self.application_id)
    }

    fn session_start_body(&self, session_id: &str) -> Result<String> {
        let event = SessionStartEvent {
            application_id: &self.application_id,
            version: &self.version,
            region: &self.region,
            session_id,
            timestamp: Utc::now().to_rfc3339(),
            event_type: "session_start",
            telemetries: &self.telemetries,
            allow_cookies: self.allow_cookies,
            enable_xray: self.enable_xray,
            session_event_limit: self.session_event_limit,
            signing: self.signing,
        };
        serde_json::to_string(&event).context("failed to serialize session start event")
    }

    /// Send the session start event. Blocks up to the configured timeout.
    pub fn send_session_start(&self, session_id: &str) -> Result<()> {
        let body = self.session_start_body(session_id)?;
        ureq::post(&self.events_url())
            .timeout(self.timeout)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .context("telemetry collector request failed")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Initialize telemetry without blocking.
///
/// Never panics and never returns an error; every failure is folded into
/// [`TelemetryOutcome::Failed`].
pub fn initialize(config: &TelemetryConfig, rng: &mut dyn RandomSource) -> TelemetryOutcome {
    if !config.enabled {
        return TelemetryOutcome::Disabled;
    }

    let client = match RumClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return TelemetryOutcome::Failed(e.to_string()),
    };

    let session_id = base36_token(rng, SESSION_ID_LEN);
    let sampled = rng.next_f64() < config.session_sample_rate;

    if sampled {
        let id = session_id.clone();
        let spawned = thread::Builder::new()
            .name("mockboard-telemetry".to_string())
            .spawn(move || {
                let _ = client.send_session_start(&id);
            });
        if let Err(e) = spawned {
            return TelemetryOutcome::Failed(format!("failed to spawn telemetry thread: {e}"));
        }
    }

    TelemetryOutcome::Started {
        session_id,
        sampled,
    }
}

/// Initialize telemetry, report the outcome on stderr and in the journal,
/// and discard it.
pub fn init_best_effort(config: &TelemetryConfig, rng: &mut dyn RandomSource) {
    let outcome = initialize(config, rng);
    if let TelemetryOutcome::Failed(reason) = &outcome {
        eprintln!("[mockboard] telemetry failed to initialize: {reason}");
    }
    crate::journal::record("telemetry", outcome.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ReplayRandom;
    use std::time::Instant;

    fn configured() -> TelemetryConfig {
        TelemetryConfig {
            application_id: "app-1234".to_string(),
            // Nothing listens on the discard port; the send fails fast.
            endpoint: "http://127.0.0.1:9/".to_string(),
            timeout_ms: 200,
            ..TelemetryConfig::default()
        }
    }

    #[test]
    fn disabled_config_does_nothing() {
        let config = TelemetryConfig {
            enabled: false,
            ..configured()
        };
        assert_eq!(
            initialize(&config, &mut ReplayRandom::constant(0.1)),
            TelemetryOutcome::Disabled
        );
    }

    #[test]
    fn placeholder_defaults_fail_without_panicking() {
        let outcome = initialize(&TelemetryConfig::default(), &mut ReplayRandom::constant(0.1));
        assert!(matches!(outcome, TelemetryOutcome::Failed(_)));
    }

    #[test]
    fn malformed_settings_are_rejected() {
        let bad_url = TelemetryConfig {
            endpoint: "collector.local".to_string(),
            ..configured()
        };
        assert!(RumClient::from_config(&bad_url).is_err());

        let bad_rate = TelemetryConfig {
            session_sample_rate: 1.5,
            ..configured()
        };
        assert!(RumClient::from_config(&bad_rate).is_err());

        let bad_category = TelemetryConfig {
            telemetries: vec!["keystrokes".to_string()],
            ..configured()
        };
        assert!(RumClient::from_config(&bad_category).is_err());
    }

    #[test]
    fn unreachable_collector_does_not_block_startup() {
        // Non-routable address: a blocking send would wait out the timeout.
        let config = TelemetryConfig {
            endpoint: "http://10.255.255.1".to_string(),
            timeout_ms: 5000,
            ..configured()
        };
        let start = Instant::now();
        let outcome = initialize(&config, &mut ReplayRandom::constant(0.1));
        assert!(start.elapsed() < Duration::from_secs(1));
        match outcome {
            TelemetryOutcome::Started {
                session_id,
                sampled,
            } => {
                assert_eq!(session_id.len(), SESSION_ID_LEN);
                assert!(sampled);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn zero_sample_rate_skips_sending() {
        let config = TelemetryConfig {
            session_sample_rate: 0.0,
            ..configured()
        };
        let outcome = initialize(&config, &mut ReplayRandom::constant(0.0));
        assert!(matches!(outcome, TelemetryOutcome::Started { sampled: false, .. }));
    }

    #[test]
    fn session_start_body_carries_client_settings() {
        let config = TelemetryConfig {
            session_event_limit: 200,
            signing: true,
            enable_xray: true,
            ..configured()
        };
        let client = RumClient::from_config(&config).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&client.session_start_body("abc").unwrap()).unwrap();
        assert_eq!(body["sessionEventLimit"], 200);
        assert_eq!(body["signing"], true);
        assert_eq!(body["enableXray"], true);
        assert_eq!(body["sessionId"], "abc");
        assert_eq!(body["eventType"], "session_start");

        let defaults = RumClient::from_config(&configured()).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&defaults.session_start_body("abc").unwrap()).unwrap();
        assert_eq!(body["sessionEventLimit"], 0);
        assert_eq!(body["signing"], false);
    }

    #[test]
    fn events_url_joins_endpoint_and_app() {
        let client = RumClient::from_config(&configured()).unwrap();
        assert_eq!(client.events_url(), "http://127.0.0.1:9/appmonitors/app-1234");
    }
}
