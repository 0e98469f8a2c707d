//! CLI command implementations.
//!
//! - `mockboard serve` — run the web dashboard
//! - `mockboard metrics` — print the generated metric series
//! - `mockboard logs --filter T` — print (filtered) mock logs
//! - `mockboard theme show|set` — read or change the theme preference
//! - `mockboard config show|init|set|reset` — configuration management

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use crate::config::{self, MockboardConfig};
use crate::dashboard::Session;
use crate::logs::filter::count_text;
use crate::logs::{LogLevel, LogRecord};
use crate::random::{self, ThreadRandom};
use crate::series::catalogue::{KEY_METRICS, NamedSeries};
use crate::settings::{FileStore, SettingsService, Theme};
use crate::telemetry;
use crate::web::{self, AppState};

/// Output format for data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Generate a session, letting `seed` override the configured one.
fn new_session(config: &mut MockboardConfig, seed: Option<u64>) -> Session {
    if seed.is_some() {
        config.data.seed = seed;
    }
    let mut rng = random::session_source(config.data.seed);
    Session::generate(config, Utc::now(), rng.as_mut())
}

fn preferences() -> Result<SettingsService<FileStore>> {
    let store = FileStore::default_location().context("could not determine home directory")?;
    Ok(SettingsService::load(store))
}

// ---------------------------------------------------------------------------
// mockboard serve
// ---------------------------------------------------------------------------

/// Start the dashboard server.
pub fn run_serve(addr: Option<String>, no_browser: bool) -> Result<()> {
    let mut config = config::load();
    if let Some(addr) = addr {
        config.server.addr = addr;
    }
    if no_browser {
        config.server.open_browser = false;
    }

    telemetry::init_best_effort(&config.telemetry, &mut ThreadRandom::new());

    let session = new_session(&mut config, None);
    crate::journal::record(
        "session",
        match session.seed {
            Some(seed) => format!("started with seed {seed}"),
            None => "started".to_string(),
        },
    );

    let settings = preferences()?;
    println!("{} {}", "Theme:".bold(), settings.get().label());

    let addr = config.server.addr.clone();
    web::serve(
        &addr,
        AppState {
            config,
            session,
            settings,
        },
    )
}

// ---------------------------------------------------------------------------
// mockboard metrics
// ---------------------------------------------------------------------------

/// Print the generated metric series.
pub fn run_metrics(format: OutputFormat, seed: Option<u64>) -> Result<()> {
    let mut config = config::load();
    let session = new_session(&mut config, seed);

    match format {
        OutputFormat::Json => print_metrics_json(&session.metrics)?,
        OutputFormat::Csv => print_metrics_csv(&session.metrics),
        OutputFormat::Table => print_metrics_table(&session.metrics),
    }

    Ok(())
}

fn print_metrics_table(metrics: &[NamedSeries]) {
    println!("{}", "Key Metrics".bold().cyan());
    for card in &KEY_METRICS {
        println!("  {:<16} {}", format!("{}:", card.title).bold(), card.value);
    }
    println!();

    println!("{}", "Monthly Performance Metrics".bold().cyan());
    print!("  {:<12}", "Month");
    for m in metrics {
        print!(" {:>14}", truncate(m.spec.key, 14));
    }
    println!();
    println!("  {}", "-".repeat(12 + 15 * metrics.len()));

    let months = metrics.first().map(|m| m.series.len()).unwrap_or(0);
    for i in 0..months {
        let date = metrics[0].series.points()[i].date;
        let line = metrics.iter().fold(format!("  {:<12}", date.to_string()), |mut acc, m| {
            acc.push_str(&format!(" {:>14}", format_number(m.series.points()[i].value)));
            acc
        });
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_metrics_json(metrics: &[NamedSeries]) -> Result<()> {
    let mut value = serde_json::Map::new();
    for m in metrics {
        value.insert(m.spec.key.to_string(), serde_json::to_value(&m.series)?);
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_metrics_csv(metrics: &[NamedSeries]) {
    println!("metric,date,value");
    for m in metrics {
        for p in m.series.points() {
            println!("{},{},{}", m.spec.key, p.date, p.value);
        }
    }
}

// ---------------------------------------------------------------------------
// mockboard logs
// ---------------------------------------------------------------------------

/// Print the mock logs, optionally filtered.
pub fn run_logs(filter: Option<String>, format: OutputFormat, seed: Option<u64>) -> Result<()> {
    let mut config = config::load();
    let session = new_session(&mut config, seed);
    let text = filter.unwrap_or_default();
    let records = session.filtered_logs(&text);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Csv => print_logs_csv(&records),
        OutputFormat::Table => print_logs_table(&records),
    }

    Ok(())
}

fn print_logs_table(records: &[&LogRecord]) {
    println!(
        "{} {}",
        "System Logs".bold().cyan(),
        format!("({})", records.len()).dimmed()
    );
    if records.is_empty() {
        println!("  {}", "No logs match the current filter criteria".yellow());
        return;
    }

    println!(
        "  {:<24} {:<6} {:<15} {:<27} Details",
        "Timestamp", "Type", "User", "Action"
    );
    println!("  {}", "-".repeat(100));
    for r in records {
        println!(
            "  {:<24} {} {:<15} {:<27} {}",
            r.timestamp_iso(),
            colorize_level(r.level),
            r.user,
            r.action,
            r.details.dimmed(),
        );
    }
    println!();
    println!("  {}", count_text(records.len()));
}

fn print_logs_csv(records: &[&LogRecord]) {
    println!("timestamp,type,user,action,details");
    for r in records {
        println!(
            "{},{},{},{},\"{}\"",
            r.timestamp_iso(),
            r.level,
            r.user,
            r.action,
            r.details
        );
    }
}

/// Colorize a log level, padded to the widest name.
fn colorize_level(level: LogLevel) -> colored::ColoredString {
    let padded = format!("{:<6}", level.as_str());
    match level {
        LogLevel::Info => padded.green(),
        LogLevel::Warn => padded.yellow(),
        LogLevel::Error => padded.red(),
    }
}

// ---------------------------------------------------------------------------
// mockboard theme
// ---------------------------------------------------------------------------

pub fn run_theme_show() -> Result<()> {
    let settings = preferences()?;
    println!("{}", settings.get());
    Ok(())
}

pub fn run_theme_set(value: &str) -> Result<()> {
    let Some(theme) = Theme::parse(value) else {
        anyhow::bail!("unknown theme '{value}' (expected 'light' or 'dark')");
    };

    let mut settings = preferences()?;
    settings.set(theme)?;
    crate::journal::record("theme", theme.as_str());
    println!("{} {}", "Theme set to".green(), theme.label().bold());
    Ok(())
}

// ---------------------------------------------------------------------------
// mockboard config
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective configuration".bold().cyan());
    if let Some(path) = config::global_config_file() {
        println!("{}", format!("# global: {}", path.display()).dimmed());
    }
    println!();
    println!("{toml_str}");
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} {} = {}", "Set".green(), key.bold(), value);
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format an integer with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
