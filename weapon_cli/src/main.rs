//! weapon-calc - Command line weapon stat calculator

mod app;
mod display;

use anyhow::{Context, Result};
use app::{App, ListKind, Selection};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use weapon_core::{catalog::load_toml, Settings, SlotCategory};

/// Settings file picked up from the working directory
const DEFAULT_CONFIG: &str = "weapon-calc.toml";

#[derive(Parser, Debug)]
#[command(name = "weapon-calc", version)]
#[command(about = "Resolve weapon stats under attachments, oils and scrolls")]
struct Cli {
    /// Settings file (defaults to ./weapon-calc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog data directory
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Build store directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog entries
    List {
        #[arg(value_enum)]
        kind: ListKind,
        /// Only attachments for this slot
        #[arg(long)]
        slot: Option<SlotCategory>,
    },
    /// Resolve a weapon's stats and keep the selection as the current build
    Resolve {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        json: bool,
    },
    /// Saved builds
    #[command(subcommand)]
    Builds(BuildsCommand),
    /// The build from the last `resolve`
    #[command(subcommand)]
    Current(CurrentCommand),
}

#[derive(Subcommand, Debug)]
enum BuildsCommand {
    List,
    Save {
        name: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
    Delete {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum CurrentCommand {
    Show {
        #[arg(long)]
        json: bool,
    },
    Clear,
}

#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// Weapon id
    #[arg(long)]
    weapon: String,
    /// Attachment id (repeatable, one per slot)
    #[arg(long = "attachment")]
    attachments: Vec<String>,
    /// Oil id (repeatable, applied in the given order)
    #[arg(long = "oil")]
    oils: Vec<String>,
    /// Scroll id
    #[arg(long)]
    scroll: Option<String>,
}

impl From<SelectionArgs> for Selection {
    fn from(args: SelectionArgs) -> Self {
        Selection {
            weapon: args.weapon,
            attachments: args.attachments,
            oils: args.oils,
            scroll: args.scroll,
        }
    }
}

/// Settings file, then command line overrides
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_toml(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => load_toml(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("loading settings from {}", DEFAULT_CONFIG))?,
        None => Settings::default(),
    };
    if let Some(dir) = &cli.data {
        settings.data_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.store {
        settings.store_dir = dir.clone();
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    // RUST_LOG wins over the settings file
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::open(&settings)?;

    let output = match cli.command {
        Command::List { kind, slot } => app.list(kind, slot),
        Command::Resolve { selection, json } => app.resolve(&selection.into(), json)?,
        Command::Builds(BuildsCommand::List) => app.list_builds()?,
        Command::Builds(BuildsCommand::Save { name, selection }) => {
            app.save_build(&name, &selection.into())?
        }
        Command::Builds(BuildsCommand::Show { name, json }) => app.show_build(&name, json)?,
        Command::Builds(BuildsCommand::Delete { name }) => app.delete_build(&name)?,
        Command::Current(CurrentCommand::Show { json }) => app.show_current(json)?,
        Command::Current(CurrentCommand::Clear) => app.clear_current()?,
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_selection() {
        let cli = Cli::parse_from([
            "weapon-calc",
            "--data",
            "catalog",
            "resolve",
            "--weapon",
            "1",
            "--attachment",
            "muzzle_choke",
            "--oil",
            "oil_heavy",
            "--oil",
            "oil_haste",
            "--json",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("catalog")));
        match cli.command {
            Command::Resolve { selection, json } => {
                assert!(json);
                assert_eq!(selection.oils, vec!["oil_heavy", "oil_haste"]);
                assert_eq!(selection.attachments, vec!["muzzle_choke"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_slot() {
        let cli = Cli::parse_from(["weapon-calc", "list", "attachments", "--slot", "Chamber Chisel"]);
        match cli.command {
            Command::List { kind, slot } => {
                assert_eq!(kind, ListKind::Attachments);
                assert_eq!(slot, Some(SlotCategory::Chisel));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weapon-calc.toml");
        std::fs::write(&path, "store_dir = \"from-file\"\nlog_filter = \"debug\"\n").unwrap();

        let cli = Cli::parse_from([
            "weapon-calc",
            "--config",
            path.to_str().unwrap(),
            "--store",
            "from-flag",
            "current",
            "show",
        ]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.store_dir, PathBuf::from("from-flag"));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.data_dir, None);
    }
}
