//! Immutable forest snapshot with an id index for O(1) membership.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::domain::entities::{NodeId, TreeNode};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::expansion::ExpansionState;

/// Position of a node: its parent (if any) and its index among siblings.
#[derive(Debug, Clone)]
struct Slot {
    parent: Option<NodeId>,
    position: usize,
}

/// Ordered roots of a built hierarchy.
///
/// Nodes are owned by their parent (or by the root list). The index keeps
/// one slot per id so lookups climb to a root and descend by position
/// instead of rescanning the tree.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    roots: Vec<TreeNode>,
    index: HashMap<NodeId, Slot>,
    /// Records left out because their parent chain never reached a root
    excluded: Vec<NodeId>,
}

impl PartialEq for Forest {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots
    }
}

impl Eq for Forest {}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already nested nodes. When an id occurs more than once the
    /// first occurrence in pre-order is the one indexed.
    pub fn from_roots(roots: Vec<TreeNode>) -> Self {
        Self::with_excluded(roots, Vec::new())
    }

    pub(crate) fn with_excluded(roots: Vec<TreeNode>, excluded: Vec<NodeId>) -> Self {
        let mut index = HashMap::new();
        let mut stack: Vec<(&TreeNode, Slot)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(position, node)| {
                (
                    node,
                    Slot {
                        parent: None,
                        position,
                    },
                )
            })
            .collect();

        while let Some((node, slot)) = stack.pop() {
            for (position, child) in node.children.iter().enumerate().rev() {
                let child_slot = Slot {
                    parent: Some(node.id.clone()),
                    position,
                };
                stack.push((child, child_slot));
            }
            index.entry(node.id.clone()).or_insert(slot);
        }

        Self {
            roots,
            index,
            excluded,
        }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Ids dropped during construction, in input order.
    pub fn excluded(&self) -> &[NodeId] {
        &self.excluded
    }

    pub fn get(&self, id: &NodeId) -> Option<&TreeNode> {
        // Climb to the root collecting sibling positions, then descend
        let mut positions = Vec::new();
        let mut slot = self.index.get(id)?;
        loop {
            positions.push(slot.position);
            match &slot.parent {
                Some(parent) => slot = self.index.get(parent)?,
                None => break,
            }
        }

        let first = positions.pop()?;
        positions
            .iter()
            .rev()
            .try_fold(self.roots.get(first)?, |node, &i| node.children.get(i))
            .filter(|node| &node.id == id)
    }

    pub fn node(&self, id: &NodeId) -> TreeResult<&TreeNode> {
        self.get(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))
    }

    /// Ids of `id` and all of its descendants, pre-order.
    ///
    /// Fails with `CycleDetected` if a node is reached twice, which only a
    /// hand-assembled forest can produce.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_ids(&self, id: &NodeId) -> TreeResult<Vec<NodeId>> {
        let root = self.node(id)?;
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut ids = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if !visited.insert(&node.id) {
                return Err(TreeError::CycleDetected(node.id.clone()));
            }
            ids.push(node.id.clone());
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }

        Ok(ids)
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth 0.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, None)
    }

    /// Pre-order traversal that only descends into expanded nodes.
    pub fn visible<'a>(&'a self, expansion: &'a ExpansionState) -> PreOrderIterator<'a> {
        PreOrderIterator::new(self, Some(expansion))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Longest root-to-leaf node count; 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn leaf_ids(&self) -> Vec<&NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| &node.id)
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
    expansion: Option<&'a ExpansionState>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(forest: &'a Forest, expansion: Option<&'a ExpansionState>) -> Self {
        // Roots in reverse so the first root pops first
        let stack = forest.roots.iter().rev().map(|node| (0, node)).collect();
        Self { stack, expansion }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        let descend = self
            .expansion
            .map_or(true, |expansion| expansion.is_expanded(&node.id));
        if descend {
            for child in node.children.iter().rev() {
                self.stack.push((depth + 1, child));
            }
        }
        Some((depth, node))
    }
}

pub struct PostOrderIterator<'a> {
    stack: Vec<(usize, &'a TreeNode, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest
            .roots
            .iter()
            .rev()
            .map(|node| (0, node, false))
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, node, visited)) = self.stack.pop() {
            if visited {
                return Some((depth, node));
            }
            self.stack.push((depth, node, true));
            for child in node.children.iter().rev() {
                self.stack.push((depth + 1, child, false));
            }
        }
        None
    }
}
