//! Inspects and edits the console state store from the command line.
//!
//! The store is the JSON file the GUI writes table layouts and the tab
//! session to.

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use rconsole::storage::{save_json, try_load_json};
use rconsole::table::persistence::now_millis;
use rconsole::tabs::TabSession;
use rconsole::{JsonFileStorage, KeyValueStorage, PersistOptions, PersistedTableState, TabOptions, TablePersistence};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    List,
    Show(String),
    Export { key: String, file: PathBuf },
    Import { key: String, file: PathBuf },
    Clear(String),
    Tabs,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct Config {
    store: Option<PathBuf>,
    verbose: bool,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut store = None;
    let mut verbose = false;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--store" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("--store requires an argument");
                }
                store = Some(PathBuf::from(&args[i]));
            }
            "-v" | "--verbose" => verbose = true,
            "-h" | "-help" | "--help" => positional = vec!["help".to_string()],
            arg if arg.starts_with('-') => anyhow::bail!("Unknown argument: {}", arg),
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let mut words = positional.into_iter();
    let command = match words.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("list") => Command::List,
        Some("tabs") => Command::Tabs,
        Some("show") => Command::Show(words.next().context("show requires a key")?),
        Some("clear") => Command::Clear(words.next().context("clear requires a key")?),
        Some("export") => Command::Export {
            key: words.next().context("export requires a key")?,
            file: PathBuf::from(words.next().context("export requires an output file")?),
        },
        Some("import") => Command::Import {
            key: words.next().context("import requires a key")?,
            file: PathBuf::from(words.next().context("import requires an input file")?),
        },
        Some(other) => anyhow::bail!("Unknown command: {}", other),
    };
    if let Some(extra) = words.next() {
        anyhow::bail!("Unexpected argument: {}", extra);
    }

    Ok(Config { store, verbose, command })
}

fn print_help() {
    println!("Console State Store Tool");
    println!("Usage: console-statectl [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("  list                   List stored keys");
    println!("  show <KEY>             Print the value stored under KEY");
    println!("  export <KEY> <FILE>    Write the table layout under KEY to FILE");
    println!("  import <KEY> <FILE>    Store the table layout in FILE under KEY");
    println!("  clear <KEY>            Remove KEY from the store");
    println!("  tabs                   Print the saved tab session");
    println!();
    println!("OPTIONS:");
    println!("  --store <FILE>         State file (default: platform data dir)");
    println!("  -v, --verbose          Debug logging");
    println!("  -h, -help, --help      Show this help message");
}

fn format_timestamp(timestamp_ms: Option<i64>) -> String {
    timestamp_ms
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One-line description of a stored value.
fn describe(raw: &str) -> String {
    if let Ok(session) = serde_json::from_str::<TabSession>(raw) {
        if !session.tabs.is_empty() {
            return format!(
                "tab session, {} tabs, saved {}",
                session.tabs.len(),
                format_timestamp(session.timestamp)
            );
        }
    }
    match serde_json::from_str::<PersistedTableState>(raw) {
        Ok(record) if record.version.is_some() || record.columns.is_some() => format!(
            "table layout, {} columns, saved {}",
            record.columns.map(|c| c.len()).unwrap_or(0),
            format_timestamp(record.timestamp)
        ),
        _ => format!("{} bytes", raw.len()),
    }
}

fn run(config: &Config, storage: &mut dyn KeyValueStorage) -> Result<()> {
    match &config.command {
        Command::Help => print_help(),
        Command::List => {
            for key in storage.keys()? {
                let raw = storage.get(&key)?.unwrap_or_default();
                println!("{:<40} {}", key, describe(&raw));
            }
        }
        Command::Show(key) => {
            let raw = storage.get(key)?.with_context(|| format!("no value stored under '{}'", key))?;
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(_) => println!("{}", raw),
            }
        }
        Command::Export { key, file } => {
            let persistence = TablePersistence::new(PersistOptions::enabled(key.as_str()));
            if !persistence.has_saved_state(storage) {
                anyhow::bail!("no table layout stored under '{}'", key);
            }
            let json = persistence.export_state(storage);
            fs::write(file, json).with_context(|| format!("failed to write {}", file.display()))?;
            println!("Exported '{}' to {}", key, file.display());
        }
        Command::Import { key, file } => {
            let json = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
            let mut record: PersistedTableState = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a table layout", file.display()))?;
            record.timestamp = Some(now_millis());
            save_json(storage, key, &record)?;
            println!("Imported {} into '{}'", file.display(), key);
        }
        Command::Clear(key) => {
            storage.remove(key)?;
            println!("Removed '{}'", key);
        }
        Command::Tabs => {
            let key = TabOptions::default().storage_key_for(None);
            let Some(session) = try_load_json::<TabSession>(storage, &key) else {
                println!("No saved tab session");
                return Ok(());
            };
            println!("Saved {}", format_timestamp(session.timestamp));
            for tab in &session.tabs {
                let marker = if tab.key == session.active_tab_key { "*" } else { " " };
                let flags = if tab.closable { "" } else { " [pinned]" };
                println!("{} {:<32} {}{}", marker, tab.key, tab.title, flags);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;

    let level = if config.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = TermLogger::init(level, LogConfig::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("logger already initialized: {}", e);
    }

    let mut storage = match &config.store {
        Some(path) => JsonFileStorage::open(path.clone())?,
        None => JsonFileStorage::open_default()?,
    };
    log::debug!("using store {}", storage.path().display());
    run(&config, &mut storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rconsole::MemoryStorage;

    fn args(words: &[&str]) -> Vec<String> {
        std::iter::once("console-statectl")
            .chain(words.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&args(&[])).unwrap().command, Command::Help);
        assert_eq!(parse_args(&args(&["list"])).unwrap().command, Command::List);
        assert_eq!(
            parse_args(&args(&["show", "app_tabs"])).unwrap().command,
            Command::Show("app_tabs".to_string())
        );
        assert_eq!(
            parse_args(&args(&["export", "k", "out.json"])).unwrap().command,
            Command::Export {
                key: "k".to_string(),
                file: PathBuf::from("out.json")
            }
        );
    }

    #[test]
    fn test_parse_store_option() {
        let config = parse_args(&args(&["--store", "/tmp/s.json", "-v", "tabs"])).unwrap();
        assert_eq!(config.store, Some(PathBuf::from("/tmp/s.json")));
        assert!(config.verbose);
        assert_eq!(config.command, Command::Tabs);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--store"])).is_err());
        assert!(parse_args(&args(&["show"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert!(parse_args(&args(&["clear", "a", "b"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_describe() {
        assert!(describe(r#"{"tabs":[{"key":"/","title":"Home","path":"/"}],"activeTabKey":"/"}"#)
            .starts_with("tab session, 1 tabs"));
        assert!(describe(r#"{"columns":[{"key":"id"}],"version":"1.0.0"}"#).starts_with("table layout, 1 columns"));
        assert_eq!(describe("true"), "4 bytes");
    }

    #[test]
    fn test_import_then_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"{"columns":[{"key":"id","width":90}],"selectedStyle":"compact"}"#).unwrap();

        let mut storage = MemoryStorage::new();
        let import = Config {
            store: None,
            verbose: false,
            command: Command::Import {
                key: "layout".to_string(),
                file: input,
            },
        };
        run(&import, &mut storage).unwrap();

        let export = Config {
            command: Command::Export {
                key: "layout".to_string(),
                file: output.clone(),
            },
            ..import
        };
        run(&export, &mut storage).unwrap();
        let written: PersistedTableState = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written.selected_style.as_deref(), Some("compact"));
        assert!(written.timestamp.is_some());
    }

    #[test]
    fn test_import_rejects_non_layout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, "not a layout").unwrap();
        let config = Config {
            store: None,
            verbose: false,
            command: Command::Import {
                key: "layout".to_string(),
                file: input,
            },
        };
        let mut storage = MemoryStorage::new();
        assert!(run(&config, &mut storage).is_err());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_export_without_layout_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: None,
            verbose: false,
            command: Command::Export {
                key: "missing".to_string(),
                file: dir.path().join("out.json"),
            },
        };
        assert!(run(&config, &mut MemoryStorage::new()).is_err());
    }
}
