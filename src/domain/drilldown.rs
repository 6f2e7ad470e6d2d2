//! Level-by-level chooser: one pick per depth, each level offering the
//! children of the previous pick.

use tracing::debug;

use crate::domain::entities::{NodeId, TreeNode};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::forest::Forest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillDown {
    path: Vec<NodeId>,
}

impl DrillDown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choices at `level`: roots for level 0, otherwise the children of the
    /// pick one level up. Empty when that level has no pick yet.
    pub fn options<'a>(&self, forest: &'a Forest, level: usize) -> &'a [TreeNode] {
        if level == 0 {
            return forest.roots();
        }
        self.path
            .get(level - 1)
            .and_then(|id| forest.get(id))
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Pick `id` at `level`, dropping every deeper pick.
    pub fn choose(&mut self, forest: &Forest, level: usize, id: &NodeId) -> TreeResult<()> {
        if level > self.path.len() || !self.options(forest, level).iter().any(|n| &n.id == id) {
            return Err(TreeError::NodeNotFound(id.clone()));
        }
        self.path.truncate(level);
        self.path.push(id.clone());
        debug!("drilldown: level {} -> {}", level, id);
        Ok(())
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Deepest pick.
    pub fn leaf(&self) -> Option<&NodeId> {
        self.path.last()
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }
}
