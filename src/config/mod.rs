/// Configuration system for mockboard.
///
/// Layers, lowest to highest precedence:
///
/// 1. **Built-in defaults** — [`schema::MockboardConfig::default()`]
/// 2. **User global config** — `~/.mockboard/config.toml`
/// 3. **Project local config** — `.mockboard.toml` in the current directory
/// 4. **Environment variables** — `MOCKBOARD_*` overrides
///
/// File layers are merged key by key: a project file that only sets
/// `data.seed` keeps everything else from the global file.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::MockboardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> MockboardConfig {
    let layers = [global_config_path(), project_config_path()];
    let mut config = load_layers(layers.iter().flatten().map(PathBuf::as_path));
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Merge the given TOML files over the defaults, in order.
///
/// Missing or malformed files are skipped; the dashboard always starts.
pub fn load_layers<'a>(paths: impl IntoIterator<Item = &'a Path>) -> MockboardConfig {
    let Ok(mut merged) = toml::Value::try_from(MockboardConfig::default()) else {
        return MockboardConfig::default();
    };

    for path in paths {
        if let Some(layer) = read_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    merged.try_into().unwrap_or_default()
}

fn read_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    // Reject layers that don't fit the schema rather than half-applying them.
    value.clone().try_into::<MockboardConfig>().ok()?;
    Some(value)
}

/// Recursively overlay `overlay` onto `base`. Tables merge; everything else
/// replaces.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.mockboard/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

/// `.mockboard.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".mockboard.toml"))
}

/// `~/.mockboard`, home of config, preferences and the event journal.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mockboard"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `MOCKBOARD_*` overrides using `lookup` to read variables.
///
/// - `MOCKBOARD_ADDR` — listen address
/// - `MOCKBOARD_OPEN_BROWSER` — `1`/`true`/`yes`/`on`
/// - `MOCKBOARD_SEED` — RNG seed (`none` clears it)
/// - `MOCKBOARD_TELEMETRY` — telemetry on/off
/// - `MOCKBOARD_TELEMETRY_ENDPOINT` / `MOCKBOARD_TELEMETRY_APP_ID`
pub fn apply_env_overrides(config: &mut MockboardConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("MOCKBOARD_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = lookup("MOCKBOARD_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = lookup("MOCKBOARD_SEED") {
        if val.eq_ignore_ascii_case("none") {
            config.data.seed = None;
        } else if let Ok(seed) = val.parse::<u64>() {
            config.data.seed = Some(seed);
        }
    }
    if let Some(val) = lookup("MOCKBOARD_TELEMETRY") {
        config.telemetry.enabled = is_truthy(&val);
    }
    if let Some(val) = lookup("MOCKBOARD_TELEMETRY_ENDPOINT")
        && !val.is_empty()
    {
        config.telemetry.endpoint = val;
    }
    if let Some(val) = lookup("MOCKBOARD_TELEMETRY_APP_ID")
        && !val.is_empty()
    {
        config.telemetry.application_id = val;
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.mockboard/config.toml`.
///
/// Fails if the file exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

pub fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_file(path, &MockboardConfig::default_toml())
}

/// Set a dotted key (e.g. `server.addr`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

/// Set a dotted key in the config file at `path`, creating it from the
/// defaults if needed. The result must still deserialize as a config.
pub fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config file")?
    } else {
        toml::Value::try_from(MockboardConfig::default())
            .context("failed to serialize default config")?
    };

    // Seed missing sections from the defaults so any schema key is settable.
    let mut full = toml::Value::try_from(MockboardConfig::default())
        .context("failed to serialize default config")?;
    merge_values(&mut full, root.clone());
    set_toml_value(&mut full, key, value)?;
    full.clone()
        .try_into::<MockboardConfig>()
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    // Write back only what the file had plus the updated key.
    set_toml_value_in_place(&mut root, &full, key)?;
    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    write_file(path, &output)
}

/// Copy the value at `key` from `source` into `target`, creating parent
/// tables as needed.
fn set_toml_value_in_place(
    target: &mut toml::Value,
    source: &toml::Value,
    key: &str,
) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut src = source;
    for part in &parts {
        src = src
            .get(part)
            .with_context(|| format!("config key not found: '{key}'"))?;
    }

    let (leaf, sections) = parts.split_last().context("empty config key")?;
    let mut current = target;
    for section in sections {
        let table = current
            .as_table_mut()
            .with_context(|| format!("expected table above '{key}'"))?;
        current = table
            .entry(section.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
    current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?
        .insert(leaf.to_string(), src.clone());
    Ok(())
}

/// Set a dotted key, parsing `raw_value` by the type already stored there.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(toml::Value::Array(_)) => toml::Value::Array(
            raw_value
                .split(',')
                .map(|s| toml::Value::String(s.trim().to_string()))
                .collect(),
        ),
        Some(_) => toml::Value::String(raw_value.to_string()),
        // `data.seed` is the only optional key; it is absent by default.
        None if key == "data.seed" => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Overwrite the global config with the defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
