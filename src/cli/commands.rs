//! Command dispatch.
//!
//! Each command builds its output lines first and prints them only on
//! success, so a failed toggle never leaves half a tree on stdout.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ToggleArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::dataset::Dataset;
use crate::domain::{ExpansionState, NodeId, SelectionStore};
use crate::render::{self, ForestRender, RenderOptions};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Tree {
            file,
            toggles,
            expand,
        } => {
            // Only rendering reads settings
            let settings = Settings::load(cli.config.as_deref())?;
            debug!("settings: {:?}", settings);
            print_lines(tree_lines(file, toggles, expand, &settings)?)
        }
        Commands::Selected { file, toggles } => print_lines(selected_lines(file, toggles)?),
        Commands::Leaves { file } => print_lines(leaf_lines(file)?),
        Commands::Check { file } => check(file),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn print_lines(lines: Vec<String>) -> CliResult<()> {
    for line in lines {
        output::info(&line);
    }
    Ok(())
}

/// Load a dataset, seed selection and apply `--on` then `--off` toggles.
#[instrument(level = "debug")]
pub fn load_store(file: &Path, toggles: &ToggleArgs) -> CliResult<SelectionStore> {
    let dataset = Dataset::load(file)?;
    let mut store = SelectionStore::from_records(&dataset.records)?;

    for id in store.forest().excluded() {
        output::warning(&format!("record {} excluded: parent chain does not reach a root", id));
    }

    for id in &toggles.on {
        store.toggle(&NodeId::from(id.as_str()), true)?;
    }
    for id in &toggles.off {
        store.toggle(&NodeId::from(id.as_str()), false)?;
    }
    Ok(store)
}

pub fn tree_lines(
    file: &Path,
    toggles: &ToggleArgs,
    expand: &[String],
    settings: &Settings,
) -> CliResult<Vec<String>> {
    let store = load_store(file, toggles)?;
    let opts = RenderOptions::from_settings(settings);

    if expand.is_empty() {
        let trees = store.forest().to_tree_strings(store.state(), &opts);
        let lines = trees
            .iter()
            .map(|tree| tree.to_string().trim_end().to_string())
            .collect();
        render::release(trees);
        return Ok(lines);
    }

    let mut expansion = ExpansionState::new();
    for id in expand {
        expansion.set(store.forest(), &NodeId::from(id.as_str()), true)?;
    }
    Ok(store.forest().visible_lines(store.state(), &expansion, &opts))
}

pub fn selected_lines(file: &Path, toggles: &ToggleArgs) -> CliResult<Vec<String>> {
    let store = load_store(file, toggles)?;
    Ok(store
        .selected_ids()
        .into_iter()
        .map(|id| id.to_string())
        .collect())
}

pub fn leaf_lines(file: &Path) -> CliResult<Vec<String>> {
    let store = load_store(file, &ToggleArgs::default())?;
    Ok(store
        .forest()
        .leaf_ids()
        .into_iter()
        .map(|id| id.to_string())
        .collect())
}

fn check(file: &Path) -> CliResult<()> {
    let store = load_store(file, &ToggleArgs::default())?;
    let forest = store.forest();

    output::header(&file.display());
    output::detail(&format!("roots:    {}", forest.roots().len()));
    output::detail(&format!("nodes:    {}", forest.len()));
    output::detail(&format!("depth:    {}", forest.depth()));
    output::detail(&format!("selected: {}", store.state().len()));
    if !forest.excluded().is_empty() {
        output::detail(&format!("excluded: {}", forest.excluded().iter().join(", ")));
    }
    Ok(())
}
