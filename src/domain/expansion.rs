//! Per-node open/closed flags for tree views. No cascade.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::entities::NodeId;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::forest::Forest;

/// Expanded node ids; everything starts collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one node and return its new state.
    pub fn toggle(&mut self, forest: &Forest, id: &NodeId) -> TreeResult<bool> {
        let open = !self.is_expanded(id);
        self.set(forest, id, open)?;
        Ok(open)
    }

    pub fn set(&mut self, forest: &Forest, id: &NodeId, open: bool) -> TreeResult<()> {
        if !forest.contains(id) {
            return Err(TreeError::NodeNotFound(id.clone()));
        }
        trace!("expansion: {} -> {}", id, open);
        if open {
            self.expanded.insert(id.clone());
        } else {
            self.expanded.remove(id);
        }
        Ok(())
    }

    /// Expand every node that has children.
    pub fn expand_all(&mut self, forest: &Forest) {
        self.expanded.extend(
            forest
                .iter()
                .filter(|(_, node)| !node.is_leaf())
                .map(|(_, node)| node.id.clone()),
        );
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
