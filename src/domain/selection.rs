//! Cascading selection over a forest.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::builder::TreeBuilder;
use crate::domain::entities::{NodeId, Record};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::forest::Forest;

/// Set of currently selected node ids.
///
/// Toggling a node applies the same state to its whole subtree. Seeding
/// takes per-record flags as they are, so a fresh state may hold a selected
/// parent above an unselected child until the next toggle on that branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: HashSet<NodeId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from each record's `selected` flag without cascading.
    ///
    /// Records missing from `forest` (excluded during build) are skipped.
    #[instrument(level = "debug", skip_all)]
    pub fn initialize(forest: &Forest, records: &[Record]) -> Self {
        let selected: HashSet<NodeId> = records
            .iter()
            .filter(|record| record.selected && forest.contains(&record.id))
            .map(|record| record.id.clone())
            .collect();
        debug!("initialize: {} of {} records selected", selected.len(), records.len());
        Self { selected }
    }

    /// Membership of a node known to `forest`.
    pub fn is_selected(&self, forest: &Forest, id: &NodeId) -> TreeResult<bool> {
        if !forest.contains(id) {
            return Err(TreeError::NodeNotFound(id.clone()));
        }
        Ok(self.selected.contains(id))
    }

    /// Raw membership, no forest check.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    /// Set `id` and every descendant to `selected`.
    ///
    /// The subtree is collected before anything changes, so on error the
    /// state is untouched. Returns the number of nodes in the subtree.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn toggle(&mut self, forest: &Forest, id: &NodeId, selected: bool) -> TreeResult<usize> {
        let subtree = forest.subtree_ids(id)?;
        let count = subtree.len();

        if selected {
            self.selected.extend(subtree);
        } else {
            for node in &subtree {
                self.selected.remove(node);
            }
        }

        debug!("toggle: {} -> {} ({} nodes)", id, selected, count);
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.selected.iter()
    }

    /// Selected ids in forest pre-order.
    pub fn ordered<'a>(&'a self, forest: &'a Forest) -> Vec<&'a NodeId> {
        forest
            .iter()
            .map(|(_, node)| &node.id)
            .filter(|id| self.selected.contains(*id))
            .collect()
    }
}

/// Owns a forest together with its selection, the shape a tree view drives.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    forest: Forest,
    state: SelectionState,
}

impl SelectionStore {
    /// Build the forest from `records` and seed the selection from them.
    pub fn from_records(records: &[Record]) -> TreeResult<Self> {
        let forest = TreeBuilder::new().build(records)?;
        let state = SelectionState::initialize(&forest, records);
        Ok(Self { forest, state })
    }

    pub fn new(forest: Forest, state: SelectionState) -> Self {
        Self { forest, state }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_selected(&self, id: &NodeId) -> TreeResult<bool> {
        self.state.is_selected(&self.forest, id)
    }

    pub fn toggle(&mut self, id: &NodeId, selected: bool) -> TreeResult<usize> {
        self.state.toggle(&self.forest, id, selected)
    }

    /// Label of a node, for showing the picked item.
    pub fn label(&self, id: &NodeId) -> TreeResult<&str> {
        self.forest.node(id).map(|node| node.label.as_str())
    }

    pub fn selected_ids(&self) -> Vec<&NodeId> {
        self.state.ordered(&self.forest)
    }
}
