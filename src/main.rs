use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use fern::Dispatch;
use log::LevelFilter;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use lx::{JsonSettings, KeyResolver, LocaleIndex, ScanConfig, SimpleFormatter, TreeFormatter};

/// Locale Index - Look up translation keys across locale files
#[derive(Parser, Debug)]
#[command(name = "lx")]
#[command(author, version, about, long_about = None)]
#[command(help_template = "{name} {version}\n{about}\n\nUSAGE:\n    {usage}\n\n{all-args}")]
struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Locale directory or file to scan, relative to the root (repeatable)
    #[arg(long = "path", value_name = "PATH", global = true)]
    paths: Vec<PathBuf>,

    /// Skip paths containing this marker (repeatable, added to the defaults)
    #[arg(long = "exclude", value_name = "MARKER", global = true)]
    excludes: Vec<String>,

    /// Preferred languages, most preferred first (e.g. "ko,en")
    #[arg(long = "lang", value_name = "CODE", value_delimiter = ',', global = true)]
    languages: Vec<String>,

    /// JSON settings file (localePaths, excludePatterns, languagePriority, ...)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log per-file diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, conflicts_with = "simple")]
    json: bool,

    /// Print results in simple file:line format
    #[arg(long, global = true)]
    simple: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index and print every entry
    Scan {
        /// Only print the number of entries
        #[arg(long)]
        count: bool,
    },
    /// Find the entries for a key (exact, dynamic, then language rewrite)
    Lookup {
        #[arg(value_name = "KEY", value_parser = validate_key)]
        key: String,
    },
    /// Show a key's translations ordered by language priority
    Hover {
        #[arg(value_name = "KEY", value_parser = validate_key)]
        key: String,
    },
    /// List keys starting with a prefix
    Complete {
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,

        /// Maximum number of keys to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show where a key is defined
    Definition {
        #[arg(value_name = "KEY", value_parser = validate_key)]
        key: String,
    },
}

/// Validate that a key argument is non-empty
fn validate_key(s: &str) -> Result<String, String> {
    let key = s.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }
    Ok(key.to_string())
}

fn main() {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn setup_logger(verbose: bool) {
    let logger = Dispatch::new()
        .format(move |out, message, record| {
            let (color, reset) = match record.level() {
                log::Level::Error => ("\x1b[31m", "\x1b[0m"),
                log::Level::Warn => ("\x1b[33m", "\x1b[0m"),
                log::Level::Info | log::Level::Debug | log::Level::Trace => ("", ""),
            };
            out.finish(format_args!(
                "{}{}: {}{}",
                color,
                record.level(),
                if verbose {
                    format!("({}) {}", record.target(), message)
                } else {
                    message.to_string()
                },
                reset
            ))
        })
        .level(if verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .chain(std::io::stderr());

    if let Err(e) = logger.apply() {
        eprintln!("Failed to apply logger: {:?}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("failed to read the current directory")?,
    };
    let config = load_config(&cli, &root)?;
    let preferred = config.language_priority.first().cloned();

    let index = LocaleIndex::new(&root, config);
    let (entries, stats) = index
        .scan_with_stats()
        .with_context(|| format!("failed to scan {}", root.display()))?;
    let resolver = index.resolver();

    match &cli.command {
        Command::Scan { count } => {
            if *count {
                if cli.json {
                    print_json(&stats.entries)?;
                } else {
                    println!("{} entries in {} files", stats.entries, stats.files);
                }
            } else if cli.json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                print_empty_index(&root);
            } else {
                print!("{}", SimpleFormatter::new().format_entries(&entries));
            }
        }
        Command::Lookup { key } => {
            let hits = lookup(&resolver, key);
            print_entries(&cli, key, &hits)?;
        }
        Command::Hover { key } => {
            let hits = resolver.resolve_for_display(key);
            print_entries(&cli, key, &hits)?;
        }
        Command::Complete { prefix, limit } => {
            let keys = resolver.complete(prefix, *limit);
            if cli.json {
                print_json(&keys)?;
            } else if keys.is_empty() {
                println!("No keys start with '{}'", prefix);
            } else {
                print!("{}", SimpleFormatter::new().format_keys(&keys));
            }
        }
        Command::Definition { key } => {
            let locations = resolver.locate(key, preferred.as_deref());
            if cli.json {
                print_json(&locations)?;
            } else if locations.is_empty() {
                print_no_entries(key);
            } else if cli.simple {
                print!("{}", SimpleFormatter::new().format_locations(&locations));
            } else {
                print!("{}", TreeFormatter::new().format_locations(key, &locations));
            }
        }
    }

    Ok(())
}

/// Settings file first, then command-line overrides.
fn load_config(cli: &Cli, root: &Path) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let settings = JsonSettings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            ScanConfig::from_settings(&settings)?
        }
        None => ScanConfig::default(),
    };

    if !cli.paths.is_empty() {
        config = config.with_paths(cli.paths.clone());
    }
    if !cli.excludes.is_empty() {
        let mut exclusions = config.exclusions.clone();
        exclusions.extend(cli.excludes.iter().cloned());
        config = config.with_exclusions(exclusions);
    }
    if !cli.languages.is_empty() {
        config = config.with_language_priority(cli.languages.clone());
    }
    if cli.verbose {
        config = config.with_verbose(true);
    }

    log::debug!("Scanning {} with {:?}", root.display(), config);
    Ok(config)
}

fn lookup<'a>(resolver: &'a KeyResolver, key: &str) -> Vec<&'a lx::TranslationEntry> {
    let hits = resolver.find_by_key(key);
    if !hits.is_empty() {
        return hits;
    }
    resolver.resolve_alternative(key, &resolver.known_languages())
}

fn print_entries(cli: &Cli, key: &str, entries: &[&lx::TranslationEntry]) -> Result<()> {
    if cli.json {
        print_json(&entries)?;
    } else if entries.is_empty() {
        print_no_entries(key);
    } else if cli.simple {
        print!("{}", SimpleFormatter::new().format_entries(entries.iter().copied()));
    } else {
        print!("{}", TreeFormatter::new().format_entries(key, entries));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_no_entries(key: &str) {
    println!("No entries found for '{}'", key);
}

fn print_empty_index(root: &Path) {
    println!(
        "No locale entries found under {}\nTip: use --path to point at your locale directories",
        root.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert_eq!(validate_key("user.name").unwrap(), "user.name");
        assert_eq!(validate_key("  user.name ").unwrap(), "user.name");
        assert!(validate_key("").is_err());
        assert!(validate_key("   ").is_err());
    }

    #[test]
    fn test_cli_parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lx", "hover", "user.name", "--lang", "ko,en", "--path", "locales",
        ])
        .unwrap();
        assert_eq!(cli.languages, vec!["ko", "en"]);
        assert_eq!(cli.paths, vec![PathBuf::from("locales")]);
        assert!(matches!(cli.command, Command::Hover { ref key } if key == "user.name"));
    }

    #[test]
    fn test_cli_rejects_json_with_simple() {
        assert!(Cli::try_parse_from(["lx", "--json", "--simple", "scan"]).is_err());
    }

    #[test]
    fn test_load_config_overrides() {
        let cli = Cli::try_parse_from([
            "lx", "--path", "app/locales", "--exclude", "vendor", "--lang", "KO", "scan",
        ])
        .unwrap();
        let config = load_config(&cli, Path::new(".")).unwrap();

        assert_eq!(config.paths, vec![PathBuf::from("app/locales")]);
        assert!(config.exclusions.contains(&"vendor".to_string()));
        assert!(config.exclusions.contains(&"node_modules".to_string()));
        assert_eq!(config.language_priority, vec!["ko"]);
    }
}
