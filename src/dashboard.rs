//! A dashboard session: the datasets generated once at load time plus the
//! tab layout they are shown in.

use chrono::{DateTime, Utc};

use crate::config::MockboardConfig;
use crate::logs::filter::filter_logs;
use crate::logs::{LogRecord, generate_logs};
use crate::random::RandomSource;
use crate::series::catalogue::{self, NamedSeries};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Logs,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Logs, Tab::Settings];

    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Logs => "logs",
            Self::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Logs => "Logs",
            Self::Settings => "Settings",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Logs => "/logs",
            Self::Settings => "/settings",
        }
    }

    /// Exact route lookup; `None` for paths that should redirect home.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.path() == path)
    }

    /// Active tab for a path. Unknown paths show the dashboard.
    pub fn active_for(path: &str) -> Self {
        Self::from_path(path).unwrap_or(Self::Dashboard)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// In-memory datasets for one dashboard session.
#[derive(Debug, Clone)]
pub struct Session {
    pub started_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub metrics: Vec<NamedSeries>,
    pub logs: Vec<LogRecord>,
}

impl Session {
    /// Generate every metric series, then the log batch, from `rng`.
    pub fn generate(
        config: &MockboardConfig,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let metrics = catalogue::generate_all(config.data.spike_chance, rng);
        let logs = generate_logs(now, rng);
        Self {
            started_at: now,
            seed: config.data.seed,
            metrics,
            logs,
        }
    }

    /// Logs matching the filter text, in generation order.
    pub fn filtered_logs(&self, text: &str) -> Vec<&LogRecord> {
        filter_logs(&self.logs, text)
    }
}
