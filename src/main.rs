use anyhow::Result;
use clap::{Parser, Subcommand};

use mockboard::cli;

#[derive(Debug, Parser)]
#[command(name = "mockboard")]
#[command(about = "Analytics dashboard over generated mock data")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Don't open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Print the generated monthly metric series
    Metrics {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the mock system logs
    Logs {
        /// Case-insensitive text to match in any field
        #[arg(long)]
        filter: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show or change the light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    /// Print the active theme
    Show,
    /// Persist a new theme: light or dark
    Set { theme: String },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.mockboard/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `server.addr 0.0.0.0:8080`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve { addr, no_browser } => cli::run_serve(addr, no_browser),
        Commands::Metrics { format, seed } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_metrics(fmt, seed)
        }
        Commands::Logs {
            filter,
            format,
            seed,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_logs(filter, fmt, seed)
        }
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => cli::run_theme_show(),
            ThemeAction::Set { theme } => cli::run_theme_set(&theme),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
