//! CLI entry point for macro-replay
//!
//! Provides the command-line interface for validating definitions,
//! managing the macro save file, and replaying macros.

use clap::{Parser, Subcommand};
use colored::*;
use macro_replay::core::library::MacroLibrary;
use macro_replay::core::types::Macro;
use macro_replay::core::validator;
use macro_replay::replay::{self, EnigoSink, TraceSink};
use macro_replay::store::MacroStore;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SAVE_FILE: &str = "~/.local/share/macro-replay/macros.txt";

#[derive(Parser)]
#[command(name = "macro-replay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a definition string without storing it
    Check {
        /// The definition to validate, e.g. '<hi>$250$\E'
        definition: String,
    },

    /// List all macros in the save file
    List {
        /// Path to the macro save file
        #[arg(short, long, default_value = DEFAULT_SAVE_FILE)]
        file: PathBuf,
    },

    /// Add a macro to the save file
    Add {
        /// Name of the new macro
        name: String,

        /// Definition string of the new macro
        definition: String,

        /// Path to the macro save file
        #[arg(short, long, default_value = DEFAULT_SAVE_FILE)]
        file: PathBuf,
    },

    /// Remove a macro from the save file
    Remove {
        /// Name of the macro to remove
        name: String,

        /// Path to the macro save file
        #[arg(short, long, default_value = DEFAULT_SAVE_FILE)]
        file: PathBuf,
    },

    /// Replay a macro against the OS input layer
    Run {
        /// Name of the macro to replay
        name: String,

        /// Path to the macro save file
        #[arg(short, long, default_value = DEFAULT_SAVE_FILE)]
        file: PathBuf,

        /// Print the key actions instead of injecting them
        #[arg(long)]
        dry_run: bool,

        /// Seconds to wait before the first key action, to give the target
        /// window time to gain focus
        #[arg(long, default_value_t = 0)]
        countdown: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { definition } => check_definition(&definition),
        Commands::List { file } => list_macros(&file)?,
        Commands::Add { name, definition, file } => add_macro(&name, &definition, &file)?,
        Commands::Remove { name, file } => remove_macro(&name, &file)?,
        Commands::Run { name, file, dry_run, countdown } => {
            run_macro(&name, &file, dry_run, countdown)?
        }
    }

    Ok(())
}

/// Expand tilde in a user-supplied path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );

    Ok(PathBuf::from(expanded.as_ref()))
}

fn open_store(file: &Path) -> anyhow::Result<MacroStore> {
    Ok(MacroStore::open(expand_path(file)?)?)
}

/// Load the library, or start empty when the save file does not exist yet
fn load_or_empty(store: &MacroStore) -> anyhow::Result<MacroLibrary> {
    if store.path().exists() {
        Ok(MacroLibrary::from_macros(store.load()?))
    } else {
        Ok(MacroLibrary::new())
    }
}

/// Validate a raw definition string
fn check_definition(definition: &str) {
    match validator::validate(definition) {
        Ok(()) => {
            println!("{} {}", "✓".green().bold(), "Definition is valid".bold());
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e);
            if let Some(position) = e.position() {
                // Point at the offending character
                println!("  {}", definition);
                println!("  {}{}", " ".repeat(position - 1), "^".red().bold());
            }
            std::process::exit(1);
        }
    }
}

/// List all macros in the save file
fn list_macros(file: &Path) -> anyhow::Result<()> {
    let store = open_store(file)?;
    let library = MacroLibrary::from_macros(store.load()?);

    println!("{}", format!("Macros from: {}\n", store.path().display()).bold());

    for macro_ in library.macros() {
        println!("{} → {}", macro_.name().cyan().bold(), macro_.definition());
    }

    println!("\n{} Total: {} macros", "✓".green(), library.len());

    for name in library.duplicate_names() {
        println!(
            "{} duplicate macro name '{}' (lookups use the first entry)",
            "⚠".yellow(),
            name
        );
    }

    Ok(())
}

/// Add a macro to the save file
fn add_macro(name: &str, definition: &str, file: &Path) -> anyhow::Result<()> {
    let store = open_store(file)?;
    let mut library = load_or_empty(&store)?;

    let macro_ = Macro::new(name, definition)?;
    library.insert(macro_)?;
    store.save(library.macros())?;

    println!(
        "{} Added '{}' ({} total)",
        "✓".green(),
        name.cyan().bold(),
        library.len()
    );

    Ok(())
}

/// Remove a macro from the save file
fn remove_macro(name: &str, file: &Path) -> anyhow::Result<()> {
    let store = open_store(file)?;
    let mut library = MacroLibrary::from_macros(store.load()?);

    library.remove(name)?;
    store.save(library.macros())?;

    println!(
        "{} Removed '{}' ({} remaining)",
        "✓".green(),
        name.cyan().bold(),
        library.len()
    );

    Ok(())
}

/// Replay a macro by name
fn run_macro(name: &str, file: &Path, dry_run: bool, countdown: u64) -> anyhow::Result<()> {
    let store = open_store(file)?;
    let library = MacroLibrary::from_macros(store.load()?);

    let macro_ = library
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("no macro named '{}'", name))?;

    if dry_run {
        println!("{} Dry run of '{}':", "→".cyan(), macro_.name().bold());
        replay::run(macro_.definition(), &mut TraceSink)?;
        return Ok(());
    }

    for remaining in (1..=countdown).rev() {
        println!("{} starting in {}…", "→".cyan(), remaining);
        std::thread::sleep(Duration::from_secs(1));
    }

    let handle = replay::spawn(macro_, EnigoSink::new);

    println!("{} Replaying '{}'", "→".cyan(), macro_.name().bold());

    // The run is fire-and-forget on its own thread; hold the process open
    // until it finishes, or exiting would cut the replay short.
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("replay thread panicked"))?;

    Ok(())
}
