//! JSON API handlers for the web dashboard.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::config::schema::RETENTION_CHOICES;
use crate::dashboard::Session;
use crate::logs::LogRecord;
use crate::logs::filter::count_text;
use crate::series::MetricPoint;
use crate::series::catalogue::{self, ChartPoint, KEY_METRICS, KeyMetric};
use crate::settings::{KeyValueStore, Theme};

use super::{AppState, HttpResponse, content_type_json};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MetricsResponse<'a> {
    key_metrics: &'a [KeyMetric],
    x_domain: [NaiveDate; 2],
    y_domain: [f64; 2],
    series: Vec<SeriesResponse<'a>>,
}

#[derive(Serialize)]
struct SeriesResponse<'a> {
    key: &'a str,
    title: &'a str,
    color: &'a str,
    points: Vec<ChartPoint>,
    raw: &'a [MetricPoint],
}

#[derive(Serialize)]
struct LogsResponse<'a> {
    filter: String,
    total: usize,
    matches: usize,
    count_text: String,
    records: Vec<LogRow<'a>>,
}

/// A log record plus the status colour class for its level.
#[derive(Serialize)]
struct LogRow<'a> {
    #[serde(flatten)]
    record: &'a LogRecord,
    status: &'static str,
}

#[derive(Serialize)]
struct SettingsResponse {
    theme: Theme,
    theme_label: &'static str,
    refresh_interval_minutes: u32,
    realtime_updates: bool,
    notifications: bool,
    retention_days: u32,
    retention_choices: [u32; 3],
    data_export: bool,
    advanced_metrics: bool,
}

#[derive(Deserialize)]
struct ThemeRequest {
    theme: String,
}

#[derive(Serialize)]
struct HealthResponse {
    version: &'static str,
    started_at: String,
    seed: Option<u64>,
    metric_count: usize,
    log_count: usize,
    telemetry_enabled: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_response<T: Serialize>(data: &T) -> Result<HttpResponse> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Value of a query parameter, percent-decoded with `+` as space.
///
/// A value that doesn't decode to UTF-8 is returned as sent.
fn query_param(url: &str, name: &str) -> Option<String> {
    url.split_once('?')?.1.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == name).then(|| {
            let spaced = v.replace('+', " ");
            urlencoding::decode(&spaced)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(spaced)
        })
    })
}

fn settings_response<S: KeyValueStore>(state: &AppState<S>) -> SettingsResponse {
    let theme = state.settings.get();
    let display = &state.config.display;
    let retention = &state.config.retention;
    SettingsResponse {
        theme,
        theme_label: theme.label(),
        refresh_interval_minutes: display.refresh_interval_minutes,
        realtime_updates: display.realtime_updates,
        notifications: display.notifications,
        retention_days: retention.effective_days(),
        retention_choices: RETENTION_CHOICES,
        data_export: retention.data_export,
        advanced_metrics: retention.advanced_metrics,
    }
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/metrics` — key cards and the five chart series.
pub fn get_metrics(session: &Session) -> Result<HttpResponse> {
    let (start, end) = catalogue::x_domain();
    let resp = MetricsResponse {
        key_metrics: &KEY_METRICS,
        x_domain: [start, end],
        y_domain: [catalogue::Y_DOMAIN.0, catalogue::Y_DOMAIN.1],
        series: session
            .metrics
            .iter()
            .map(|m| SeriesResponse {
                key: m.spec.key,
                title: m.spec.title,
                color: m.spec.color,
                points: m.chart_points(),
                raw: m.series.points(),
            })
            .collect(),
    };

    json_response(&resp)
}

/// `GET /api/logs?filter=T` — the session logs matching `T`.
pub fn get_logs(session: &Session, url: &str) -> Result<HttpResponse> {
    let filter = query_param(url, "filter").unwrap_or_default();
    let records = session.filtered_logs(&filter);

    let resp = LogsResponse {
        total: session.logs.len(),
        matches: records.len(),
        count_text: count_text(records.len()),
        filter,
        records: records
            .into_iter()
            .map(|record| LogRow {
                record,
                status: record.level.status(),
            })
            .collect(),
    };

    json_response(&resp)
}

/// `GET /api/settings` — active theme and the display/data settings.
pub fn get_settings<S: KeyValueStore>(state: &AppState<S>) -> Result<HttpResponse> {
    json_response(&settings_response(state))
}

/// `PUT /api/settings/theme` — switch and persist the theme.
///
/// Expects `{ "theme": "dark" }`. Unrecognized names select light.
pub fn put_theme<S: KeyValueStore>(state: &mut AppState<S>, body: &str) -> Result<HttpResponse> {
    let req: ThemeRequest =
        serde_json::from_str(body).context("invalid JSON in theme update request")?;
    let theme = Theme::from_stored(&req.theme);

    state
        .settings
        .set(theme)
        .context("failed to persist theme preference")?;
    crate::journal::record("theme", theme.as_str());

    json_response(&settings_response(state))
}

/// `GET /api/health` — session summary.
pub fn get_health<S: KeyValueStore>(state: &AppState<S>) -> Result<HttpResponse> {
    let resp = HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        started_at: crate::logs::iso_millis(&state.session.started_at),
        seed: state.session.seed,
        metric_count: state.session.metrics.len(),
        log_count: state.session.logs.len(),
        telemetry_enabled: state.config.telemetry.enabled,
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
