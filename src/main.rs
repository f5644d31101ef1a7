use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Objective-J editor tooling for Cappuccino projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate completion tables from a Cappuccino source checkout
    Generate {
        /// Cappuccino source root (contains AppKit/ and Foundation/); defaults to the saved setting
        source: Option<PathBuf>,

        /// Write tables here instead of the configured library directory
        #[arg(long)]
        lib_dir: Option<PathBuf>,
    },

    /// Query generated completion tables for a cursor context
    Complete {
        /// First word after the enclosing `[`
        #[arg(short, long)]
        receiver: Option<String>,

        /// Cursor is inside a `[...]` message send
        #[arg(short, long)]
        bracketed: bool,

        /// Text typed so far
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Read tables from here instead of the configured library directory
        #[arg(long)]
        lib_dir: Option<PathBuf>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the snippet that balances a `]` typed on a line
    Balance {
        /// Current line text
        #[arg(long, allow_hyphen_values = true)]
        line: String,

        /// Cursor column in characters
        #[arg(long)]
        column: usize,
    },

    /// Look up documentation for the symbol under the cursor
    Lookup {
        /// Cursor syntax: implementation, call, method, class or other
        #[arg(long)]
        scope: String,

        /// Current line text
        #[arg(long, allow_hyphen_values = true)]
        line: String,

        /// Word under the cursor
        #[arg(long, default_value = "")]
        word: String,

        /// Documentation browser; defaults to the saved setting
        #[arg(long)]
        target: Option<String>,

        /// Print the search term and script instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current settings and where they live
    Show,

    /// Set a setting (cappuccino_source, lookup_target, lib_dir)
    Set { key: String, value: String },

    /// Clear a setting back to its default
    Unset { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { source, lib_dir } => {
            commands::generate::execute(source, lib_dir)?;
        }
        Commands::Complete {
            receiver,
            bracketed,
            prefix,
            lib_dir,
            json,
        } => {
            commands::complete::execute(receiver, bracketed, &prefix, lib_dir, json)?;
        }
        Commands::Balance { line, column } => {
            commands::balance::execute(&line, column)?;
        }
        Commands::Lookup {
            scope,
            line,
            word,
            target,
            dry_run,
        } => {
            commands::lookup::execute(&scope, &line, &word, target, dry_run)?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show()?,
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCommands::Unset { key } => commands::config::unset(&key)?,
        },
    }

    Ok(())
}
