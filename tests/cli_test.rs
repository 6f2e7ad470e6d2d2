//! Tests for command output and error mapping

use std::path::{Path, PathBuf};

use rstest::rstest;

use treeselect::cli::commands::{leaf_lines, load_store, selected_lines, tree_lines};
use treeselect::cli::{execute_command, Cli, CliError, Commands, ToggleArgs};
use treeselect::config::Settings;
use treeselect::domain::TreeError;
use treeselect::exitcode;

const MENU: &str = "tests/resources/menu.toml";

fn toggles(on: &[&str], off: &[&str]) -> ToggleArgs {
    ToggleArgs {
        on: on.iter().map(|s| s.to_string()).collect(),
        off: off.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn given_menu_when_rendering_tree_then_one_block_per_root() {
    let lines = tree_lines(Path::new(MENU), &ToggleArgs::default(), &[], &Settings::default()).unwrap();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[x] Menu Item 1"));
    assert!(lines[1].contains("[ ] Sub-submenu Item 2"));
}

#[test]
fn given_expanded_ids_when_rendering_tree_then_only_visible_rows_print() {
    let lines = tree_lines(
        Path::new(MENU),
        &ToggleArgs::default(),
        &["4".to_string()],
        &Settings::default(),
    )
    .unwrap();

    assert_eq!(
        lines,
        vec![
            "► [x] Menu Item 1",
            "▼ [x] Menu Item 2",
            "  ► [x] Submenu Item 3",
        ]
    );
}

#[rstest]
#[case::seed_only(vec![], vec![], vec!["1", "2", "3", "4", "5", "6"])]
#[case::select_branch(vec!["5"], vec![], vec!["1", "2", "3", "4", "5", "6", "7"])]
#[case::deselect_root(vec![], vec!["4"], vec!["1", "2", "3"])]
#[case::on_then_off(vec!["4"], vec!["5"], vec!["1", "2", "3", "4"])]
fn given_toggles_when_listing_selected_then_follows_cascade(
    #[case] on: Vec<&str>,
    #[case] off: Vec<&str>,
    #[case] expected: Vec<&str>,
) {
    let lines = selected_lines(Path::new(MENU), &toggles(&on, &off)).unwrap();
    assert_eq!(lines, expected);
}

#[test]
fn given_menu_when_listing_leaves_then_returns_preorder_leaves() {
    assert_eq!(leaf_lines(Path::new(MENU)).unwrap(), vec!["2", "3", "6", "7"]);
}

#[test]
fn given_unknown_toggle_id_when_running_then_usage_exit_code() {
    let err = selected_lines(Path::new(MENU), &toggles(&["42"], &[])).unwrap_err();

    assert!(matches!(err, CliError::Tree(TreeError::NodeNotFound(_))));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
#[case::cycle("tests/resources/cycle.toml", exitcode::DATAERR)]
#[case::parse("tests/resources/invalid.toml", exitcode::DATAERR)]
#[case::missing("tests/resources/nope.toml", exitcode::NOINPUT)]
fn given_bad_dataset_when_loading_then_maps_exit_code(#[case] file: &str, #[case] code: i32) {
    let err = load_store(Path::new(file), &ToggleArgs::default()).unwrap_err();
    assert_eq!(err.exit_code(), code);
}

fn with_missing_config(command: Commands) -> Cli {
    Cli {
        debug: 0,
        config: Some(PathBuf::from("tests/resources/no-such-config.toml")),
        command,
    }
}

#[test]
fn given_unreadable_config_when_running_command_without_rendering_then_succeeds() {
    let cli = with_missing_config(Commands::Check {
        file: PathBuf::from(MENU),
    });

    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_unreadable_config_when_rendering_tree_then_config_exit_code() {
    let cli = with_missing_config(Commands::Tree {
        file: PathBuf::from(MENU),
        toggles: ToggleArgs::default(),
        expand: Vec::new(),
    });

    let err = execute_command(&cli).unwrap_err();

    assert!(matches!(err, CliError::Config(_)));
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}
