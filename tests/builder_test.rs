//! Tests for TreeBuilder

use rstest::rstest;

use treeselect::domain::{
    build, Forest, NodeId, Record, SelectionStore, TreeBuilder, TreeError, TreeNode,
};
use treeselect::render::{self, ForestRender, RenderOptions};
use treeselect::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn labels(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.label.as_str()).collect()
}

/// Parent of every node, found by walking the built forest.
fn parent_map(forest: &Forest) -> Vec<(NodeId, Option<NodeId>)> {
    let mut pairs = Vec::new();
    let mut stack: Vec<(&TreeNode, Option<&NodeId>)> =
        forest.roots().iter().map(|n| (n, None)).collect();
    while let Some((node, parent)) = stack.pop() {
        pairs.push((node.id.clone(), parent.cloned()));
        for child in &node.children {
            stack.push((child, Some(&node.id)));
        }
    }
    pairs.sort();
    pairs
}

#[test]
fn given_parent_with_two_children_when_building_then_creates_tree() {
    // Arrange
    let records = vec![
        Record::root(1, "A"),
        Record::child(2, 1, "B"),
        Record::child(3, 1, "C").with_selected(true),
    ];

    // Act
    let forest = build(&records).unwrap();

    // Assert
    assert_eq!(labels(forest.roots()), vec!["A"]);
    assert_eq!(labels(&forest.roots()[0].children), vec!["B", "C"]);
    assert!(forest.excluded().is_empty());
}

#[test]
fn given_empty_input_when_building_then_forest_is_empty() {
    let forest = build(&[]).unwrap();
    assert!(forest.is_empty());
    assert_eq!(forest.len(), 0);
}

#[test]
fn given_unresolvable_parent_when_building_then_record_is_excluded_not_promoted() {
    let forest = build(&[Record::child(5, 99, "orphan")]).unwrap();

    assert!(forest.is_empty());
    assert_eq!(forest.excluded(), &[NodeId::from(5)]);
}

#[test]
fn given_children_before_parents_when_building_then_order_follows_input() {
    let records = vec![
        Record::child("c2", "p", "second"),
        Record::root("r2", "root two"),
        Record::child("c1", "p", "first"),
        Record::root("p", "parent"),
        Record::child("c3", "p", "third"),
    ];

    let forest = build(&records).unwrap();

    assert_eq!(labels(forest.roots()), vec!["root two", "parent"]);
    assert_eq!(
        labels(&forest.roots()[1].children),
        vec!["second", "first", "third"]
    );
}

#[test]
fn given_acyclic_records_when_building_then_every_id_appears_once_under_its_parent() {
    let records = vec![
        Record::root(1, "Menu Item 1"),
        Record::child(2, 1, "Submenu Item 1"),
        Record::child(3, 1, "Submenu Item 2"),
        Record::root(4, "Menu Item 2"),
        Record::child(5, 4, "Submenu Item 3"),
        Record::child(6, 5, "Sub-submenu Item 1"),
        Record::child(7, 5, "Sub-submenu Item 2"),
    ];

    let forest = build(&records).unwrap();

    let mut expected: Vec<(NodeId, Option<NodeId>)> = records
        .iter()
        .map(|r| (r.id.clone(), r.parent_id.clone()))
        .collect();
    expected.sort();
    assert_eq!(parent_map(&forest), expected);
    assert_eq!(forest.len(), records.len());
    assert_eq!(forest.depth(), 3);
}

#[test]
fn given_same_input_when_building_twice_then_forests_are_identical() {
    let records = vec![
        Record::root("x", "X"),
        Record::child("y", "x", "Y"),
        Record::child("z", "x", "Z"),
        Record::child("w", "z", "W"),
    ];

    let mut builder = TreeBuilder::new();
    let first = builder.build(&records).unwrap();
    let second = builder.build(&records).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.roots(), second.roots());
}

#[rstest]
#[case::self_reference(vec![Record::child("a", "a", "A")])]
#[case::two_cycle(vec![Record::child("a", "b", "A"), Record::child("b", "a", "B")])]
#[case::cycle_beside_valid_tree(vec![
    Record::root("r", "R"),
    Record::child("k", "r", "K"),
    Record::child("a", "c", "A"),
    Record::child("b", "a", "B"),
    Record::child("c", "b", "C"),
])]
#[case::branch_hanging_off_cycle(vec![
    Record::child("leaf", "a", "Leaf"),
    Record::child("a", "b", "A"),
    Record::child("b", "a", "B"),
])]
fn given_cyclic_parents_when_building_then_errors(#[case] records: Vec<Record>) {
    let result = build(&records);
    assert!(
        matches!(result, Err(TreeError::CycleDetected(_))),
        "expected cycle, got {:?}",
        result
    );
}

#[test]
fn given_two_cycle_when_building_then_error_names_a_cycle_member() {
    let err = build(&[Record::child("a", "b", "A"), Record::child("b", "a", "B")]).unwrap_err();
    match err {
        TreeError::CycleDetected(id) => assert!(id == NodeId::from("a") || id == NodeId::from("b")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_duplicate_ids_when_building_then_errors() {
    let result = build(&[Record::root(1, "A"), Record::child(1, 1, "A again")]);
    assert_eq!(result, Err(TreeError::DuplicateId(NodeId::from(1))));
}

#[test]
fn given_deep_chain_when_building_then_no_recursion_limit_is_hit() {
    const DEPTH: i32 = 10_000;
    let mut records = vec![Record::root(0, "n0")];
    records.extend((1..DEPTH).map(|i| Record::child(i, i - 1, format!("n{i}"))));

    let forest = build(&records).unwrap();

    assert_eq!(forest.len(), DEPTH as usize);
    assert_eq!(forest.depth(), DEPTH as usize);
    assert_eq!(forest.leaf_ids(), vec![&NodeId::from(DEPTH - 1)]);
}

#[test]
fn given_deep_chain_when_cloning_comparing_and_rendering_then_no_recursion_limit_is_hit() {
    const DEPTH: i32 = 10_000;
    let mut records = vec![Record::root(0, "n0")];
    records.extend((1..DEPTH).map(|i| Record::child(i, i - 1, format!("n{i}"))));
    let store = SelectionStore::from_records(&records).unwrap();

    let copy = store.clone();
    let rebuilt = build(&records).unwrap();

    assert!(copy.forest() == store.forest());
    assert!(rebuilt == *store.forest());
    assert_eq!(copy.forest().len(), DEPTH as usize);

    let trees = copy
        .forest()
        .to_tree_strings(copy.state(), &RenderOptions::default());
    assert_eq!(trees.len(), 1);
    render::release(trees);
}

#[test]
fn given_wide_level_when_building_then_children_keep_input_order() {
    let mut records = vec![Record::root("root", "root")];
    records.extend((0..2_000).map(|i| Record::child(i, "root", i.to_string())));

    let forest = build(&records).unwrap();

    let children = &forest.roots()[0].children;
    assert_eq!(children.len(), 2_000);
    assert!(children
        .iter()
        .enumerate()
        .all(|(i, node)| node.id == NodeId::from(i as i32)));
}
