//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Build forests from flat parent-referencing records and drive cascading selection
#[derive(Parser, Debug)]
#[command(name = "treeselect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Selection changes applied after seeding, `--on` first then `--off`.
#[derive(Args, Debug, Default, Clone)]
pub struct ToggleArgs {
    /// Select node and its subtree
    #[arg(long = "on", value_name = "ID")]
    pub on: Vec<String>,

    /// Deselect node and its subtree
    #[arg(long = "off", value_name = "ID")]
    pub off: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dataset as tree with selection markers
    Tree {
        /// Dataset file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        #[command(flatten)]
        toggles: ToggleArgs,

        /// Show only rows visible with these nodes expanded
        #[arg(long, value_name = "ID")]
        expand: Vec<String>,
    },

    /// List selected ids in tree order
    Selected {
        /// Dataset file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        #[command(flatten)]
        toggles: ToggleArgs,
    },

    /// List leaf ids
    Leaves {
        /// Dataset file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Validate dataset and show summary
    Check {
        /// Dataset file (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
