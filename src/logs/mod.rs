//! Mock system log generation.
//!
//! Produces a fixed-size batch of records, newest first, spaced 15 minutes
//! apart and anchored at the generation instant.

pub mod filter;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Serialize, Serializer};

use crate::random::{RandomSource, base36_token, pick};

/// Records produced per batch.
pub const LOG_COUNT: usize = 50;

/// Minutes between consecutive records.
pub const SPACING_MINUTES: i64 = 15;

/// Length of the base-36 event id embedded in `details`.
pub const EVENT_ID_LEN: usize = 9;

pub const ACTIONS: [&str; 10] = [
    "User login attempt",
    "Data sync completed",
    "Payment processing failed",
    "API request timeout",
    "Cache cleared successfully",
    "Database backup started",
    "Email notification sent",
    "User profile updated",
    "Security alert triggered",
    "System health check",
];

pub const USERS: [&str; 5] = ["user123", "admin", "system", "api-service", "backup-service"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 3] = [LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Status colour class used when rendering the level.
    pub fn status(self) -> &'static str {
        match self {
            Self::Info => "success",
            Self::Warn => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(serialize_with = "serialize_iso")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub level: LogLevel,
    pub action: String,
    pub details: String,
    pub user: String,
}

impl LogRecord {
    /// Timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    pub fn timestamp_iso(&self) -> String {
        iso_millis(&self.timestamp)
    }
}

/// Render an instant with millisecond precision and a `Z` suffix.
pub fn iso_millis(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn serialize_iso<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso_millis(ts))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate [`LOG_COUNT`] records anchored at `now`.
///
/// Record `i` is stamped `now - 15 * i` minutes. User, action and level are
/// drawn independently (in that order), then the event id.
pub fn generate_logs(now: DateTime<Utc>, rng: &mut dyn RandomSource) -> Vec<LogRecord> {
    let anchor = now.trunc_subsecs(3);

    (0..LOG_COUNT)
        .map(|i| {
            let timestamp = anchor - Duration::minutes(SPACING_MINUTES * i as i64);
            let user = *pick(rng, &USERS);
            let action = *pick(rng, &ACTIONS);
            let level = *pick(rng, &LogLevel::ALL);
            let details = format!("{user} - {action} - Event ID: {}", event_id(rng));

            LogRecord {
                timestamp,
                level,
                action: action.to_string(),
                details,
                user: user.to_string(),
            }
        })
        .collect()
}

/// A random base-36 token of exactly [`EVENT_ID_LEN`] characters.
pub fn event_id(rng: &mut dyn RandomSource) -> String {
    base36_token(rng, EVENT_ID_LEN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
