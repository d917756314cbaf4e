// Pipette preferences CLI - inspect and edit the persisted settings headlessly

mod exit_codes;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use serde_json::{json, Value};

use exit_codes::{prefs_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use pipette_config::{
    Color, ColorFormat, CopyColorFormat, MenuBarItemClickAction, PreferenceKey, PreferenceStore,
    Preferences, PrefsError,
};

#[derive(Parser)]
#[command(name = "pipette-prefs")]
#[command(about = "Inspect and edit Pipette color sampler preferences")]
#[command(version)]
struct Cli {
    /// Preferences file (default: <config dir>/pipette/preferences.json)
    #[arg(long, global = true, value_name = "FILE", env = "PIPETTE_PREFS_FILE")]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every preference with its current value (* = changed from default)
    List {
        /// Output as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Print the value of one preference
    #[command(after_help = "\
Examples:
  pipette-prefs get preferredColorFormat
  pipette-prefs get shownColorFormats --json")]
    Get {
        /// Preference key, e.g. stayOnTop
        key: String,

        /// Always print JSON (strings quoted, unset as null)
        #[arg(long)]
        json: bool,
    },

    /// Change one preference
    #[command(after_help = "\
Values are read as JSON first, then as a bare string.

Examples:
  pipette-prefs set stayOnTop false
  pipette-prefs set menuBarItemClickAction showColorSampler
  pipette-prefs set shownColorFormats '[\"hex\", \"lch\"]'
  pipette-prefs set pickColor cmd+shift+c
  pipette-prefs set pickColor null")]
    Set {
        /// Preference key
        key: String,

        /// New value
        value: String,
    },

    /// Restore defaults
    Reset {
        /// Preference key to reset
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        key: Option<String>,

        /// Reset every preference
        #[arg(long)]
        all: bool,
    },

    /// Recently picked colors
    #[command(subcommand)]
    Recent(RecentCommands),

    /// List color formats and menu bar click actions with their titles
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write all preferences to stdout or a file
    Export {
        /// Output format
        #[arg(long, short = 'f', default_value = "json")]
        format: DocFormat,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace all preferences with the contents of a file
    Import {
        /// JSON or TOML file
        file: PathBuf,

        /// Input format (default: by extension, .toml = toml, else json)
        #[arg(long, short = 'f')]
        format: Option<DocFormat>,
    },

    /// Print the preferences file path
    Path,
}

#[derive(Subcommand)]
enum RecentCommands {
    /// Show the remembered colors, oldest first
    List,
    /// Remember a color (hex, e.g. #3b82f6)
    Add { color: String },
    /// Forget all remembered colors
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum DocFormat {
    Json,
    Toml,
}

impl DocFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocFormat::Toml,
            _ => DocFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = cli.config;
    let result = match cli.command {
        Commands::List { json } => cmd_list(config, json),
        Commands::Get { key, json } => cmd_get(config, &key, json),
        Commands::Set { key, value } => cmd_set(config, &key, &value),
        Commands::Reset { key, all } => cmd_reset(config, key.as_deref(), all),
        Commands::Recent(recent) => cmd_recent(config, recent),
        Commands::Formats { json } => cmd_formats(json),
        Commands::Export { format, output } => cmd_export(config, format, output),
        Commands::Import { file, format } => cmd_import(config, file, format),
        Commands::Path => cmd_path(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<PrefsError> for CliError {
    fn from(err: PrefsError) -> Self {
        let code = prefs_exit_code(&err);
        let hint = match &err {
            PrefsError::UnknownKey(_) => Some("run `pipette-prefs list` to see every key".to_string()),
            PrefsError::InvalidValue { key, .. } => key
                .parse::<PreferenceKey>()
                .ok()
                .map(|k| format!("expected {}", k.value_hint())),
            PrefsError::Parse(_) => Some("fix or delete the file; defaults are used when it is missing".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

fn open_store(config: Option<PathBuf>) -> Result<PreferenceStore, CliError> {
    let store = match config {
        Some(path) => PreferenceStore::open(path)?,
        None => PreferenceStore::open_default()?,
    };
    Ok(store)
}

fn parse_key(key: &str) -> Result<PreferenceKey, CliError> {
    Ok(key.parse::<PreferenceKey>()?)
}

/// Strings print bare, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON if it parses, otherwise the raw text as a string
fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn cmd_list(config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let store = open_store(config)?;
    let prefs = store.preferences();

    if json {
        let out = serde_json::to_string_pretty(&prefs.to_json_map())
            .map_err(|e| CliError::other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    for key in PreferenceKey::ALL {
        let marker = if prefs.is_default(key) { ' ' } else { '*' };
        println!("{} {:<31} {}", marker, key.as_str(), display_value(&prefs.get(key)));
    }
    Ok(())
}

fn cmd_get(config: Option<PathBuf>, key: &str, json: bool) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let store = open_store(config)?;
    let value = store.get(key);
    if json {
        println!("{}", value);
    } else {
        println!("{}", display_value(&value));
    }
    Ok(())
}

fn cmd_set(config: Option<PathBuf>, key: &str, raw: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut store = open_store(config)?;
    store.set(key, parse_cli_value(raw))?;
    log::info!("{} = {}", key, store.get(key));
    Ok(())
}

fn cmd_reset(config: Option<PathBuf>, key: Option<&str>, all: bool) -> Result<(), CliError> {
    let mut store = open_store(config)?;
    if all {
        store.reset_all()?;
        return Ok(());
    }
    let key = key.ok_or_else(|| CliError::args("a key or --all is required"))?;
    store.reset(parse_key(key)?)?;
    Ok(())
}

fn cmd_recent(config: Option<PathBuf>, command: RecentCommands) -> Result<(), CliError> {
    let mut store = open_store(config)?;
    match command {
        RecentCommands::List => {
            for color in &store.preferences().recently_picked_colors {
                println!("{}", color.to_hex());
            }
        }
        RecentCommands::Add { color } => {
            let color = Color::parse_hex(&color).map_err(|e| CliError::args(e.to_string()))?;
            store.update(|p| p.add_recent_color(color))?;
        }
        RecentCommands::Clear => {
            store.update(Preferences::clear_recent_colors)?;
        }
    }
    Ok(())
}

fn cmd_formats(json: bool) -> Result<(), CliError> {
    if json {
        let out = json!({
            "colorFormats": ColorFormat::ALL
                .iter()
                .map(|f| json!({ "value": f.as_str(), "title": f.title() }))
                .collect::<Vec<_>>(),
            "copyColorFormats": CopyColorFormat::ALL
                .iter()
                .map(|f| json!({ "value": f.as_str(), "title": f.title() }))
                .collect::<Vec<_>>(),
            "menuBarItemClickActions": MenuBarItemClickAction::ALL
                .iter()
                .map(|a| json!({ "value": a.as_str(), "title": a.title(), "tip": a.tip() }))
                .collect::<Vec<_>>(),
        });
        let out = serde_json::to_string_pretty(&out).map_err(|e| CliError::other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Color formats ({}, {}):", PreferenceKey::PreferredColorFormat, PreferenceKey::ShownColorFormats);
    for format in ColorFormat::ALL {
        println!("  {:<8} {}", format.as_str(), format.title());
    }
    println!();
    println!("Copy after picking ({}, deprecated):", PreferenceKey::ColorFormatToCopyAfterPicking);
    for format in CopyColorFormat::ALL {
        println!("  {:<8} {}", format.as_str(), format.title());
    }
    println!();
    println!("Menu bar click actions ({}):", PreferenceKey::MenuBarItemClickAction);
    for action in MenuBarItemClickAction::ALL {
        println!("  {:<18} {:<20} {}", action.as_str(), action.title(), action.tip());
    }
    Ok(())
}

fn cmd_export(config: Option<PathBuf>, format: DocFormat, output: Option<PathBuf>) -> Result<(), CliError> {
    let store = open_store(config)?;
    let prefs = store.preferences();
    let contents = match format {
        DocFormat::Json => prefs.to_json_pretty()?,
        DocFormat::Toml => prefs.to_toml()?,
    };

    match output {
        Some(path) => {
            fs::write(&path, contents)
                .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
            log::info!("Exported preferences to {}", path.display());
        }
        None => println!("{}", contents.trim_end()),
    }
    Ok(())
}

fn cmd_import(config: Option<PathBuf>, file: PathBuf, format: Option<DocFormat>) -> Result<(), CliError> {
    let contents = fs::read_to_string(&file)
        .map_err(|e| CliError::io(format!("{}: {}", file.display(), e)))?;
    let format = format.unwrap_or_else(|| DocFormat::from_path(&file));
    let prefs = match format {
        DocFormat::Json => Preferences::from_json_lenient(&contents),
        DocFormat::Toml => Preferences::from_toml_str(&contents),
    }
    .map_err(|e| CliError::from(e).with_hint(format!("while importing {}", file.display())))?;

    let mut store = open_store(config)?;
    store.replace(prefs)?;
    Ok(())
}

fn cmd_path(config: Option<PathBuf>) -> Result<(), CliError> {
    let path = config.unwrap_or_else(PreferenceStore::config_path);
    println!("{}", path.display());
    Ok(())
}
