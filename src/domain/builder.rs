//! Tree builder turning flat parent-referencing records into a forest.

use std::collections::HashMap;

use tracing::{debug, instrument, trace, warn};

use crate::domain::entities::{NodeId, Record, TreeNode};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::forest::Forest;

/// Where a record's parent chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    Pending,
    Root,
    Dangling,
}

enum Frame {
    Enter(usize),
    Exit(usize, usize),
}

/// Constructs forests from flat records.
///
/// Children keep the relative order of their records in the input, and so
/// do roots. Construction is linear: one pass indexes ids, one groups
/// records under their parent, one classifies parent chains, and assembly
/// is table lookup.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    positions: HashMap<NodeId, usize>,
    relationship_cache: HashMap<NodeId, Vec<usize>>,
    root_indices: Vec<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from `records`.
    ///
    /// Records whose parent chain ends at an id missing from the input are
    /// left out and listed in [`Forest::excluded`]. A parent chain that
    /// loops fails the whole build with [`TreeError::CycleDetected`].
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&mut self, records: &[Record]) -> TreeResult<Forest> {
        // Reset state for a fresh dataset
        self.positions.clear();
        self.relationship_cache.clear();
        self.root_indices.clear();

        self.index_records(records)?;
        let reach = self.classify(records)?;

        let excluded: Vec<NodeId> = records
            .iter()
            .zip(&reach)
            .filter(|(_, r)| **r == Reach::Dangling)
            .map(|(record, _)| {
                warn!(
                    id = %record.id,
                    parent = ?record.parent_id,
                    "build: excluding record, parent chain does not reach a root"
                );
                record.id.clone()
            })
            .collect();

        let roots = self
            .root_indices
            .iter()
            .map(|&root| self.assemble(records, root))
            .collect();

        let forest = Forest::with_excluded(roots, excluded);
        debug!(
            "build: {} roots, {} nodes, {} excluded",
            forest.roots().len(),
            forest.len(),
            forest.excluded().len()
        );
        Ok(forest)
    }

    fn index_records(&mut self, records: &[Record]) -> TreeResult<()> {
        for (i, record) in records.iter().enumerate() {
            if self.positions.insert(record.id.clone(), i).is_some() {
                return Err(TreeError::DuplicateId(record.id.clone()));
            }
            match &record.parent_id {
                None => self.root_indices.push(i),
                Some(parent) => self
                    .relationship_cache
                    .entry(parent.clone())
                    .or_default()
                    .push(i),
            }
        }
        Ok(())
    }

    /// Follows every parent chain once, memoising where it ends.
    fn classify(&self, records: &[Record]) -> TreeResult<Vec<Reach>> {
        let mut reach = vec![Reach::Pending; records.len()];
        let mut on_chain = vec![false; records.len()];

        for start in 0..records.len() {
            let mut chain = Vec::new();
            let mut current = start;

            let end = loop {
                if reach[current] != Reach::Pending {
                    break reach[current];
                }
                // Cycle detection
                if on_chain[current] {
                    return Err(TreeError::CycleDetected(records[current].id.clone()));
                }
                on_chain[current] = true;
                chain.push(current);

                match &records[current].parent_id {
                    None => break Reach::Root,
                    Some(parent) => match self.positions.get(parent) {
                        Some(&next) => current = next,
                        None => break Reach::Dangling,
                    },
                }
            };

            for i in chain {
                reach[i] = end;
                on_chain[i] = false;
            }
        }

        Ok(reach)
    }

    /// Assembles one root without recursion: children are entered in input
    /// order and collected on `built` until their parent exits.
    fn assemble(&self, records: &[Record], root: usize) -> TreeNode {
        let mut stack = vec![Frame::Enter(root)];
        let mut built: Vec<TreeNode> = Vec::new();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(i) => {
                    let children = self
                        .relationship_cache
                        .get(&records[i].id)
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    trace!("assemble: {} with {} children", records[i].id, children.len());
                    stack.push(Frame::Exit(i, children.len()));
                    for &child in children.iter().rev() {
                        stack.push(Frame::Enter(child));
                    }
                }
                Frame::Exit(i, count) => {
                    let children = built.split_off(built.len() - count);
                    built.push(TreeNode {
                        id: records[i].id.clone(),
                        label: records[i].label.clone(),
                        children,
                    });
                }
            }
        }

        debug_assert_eq!(built.len(), 1);
        built.pop().unwrap_or_else(|| TreeNode {
            id: records[root].id.clone(),
            label: records[root].label.clone(),
            children: Vec::new(),
        })
    }
}

/// Build a forest with a throwaway [`TreeBuilder`].
pub fn build(records: &[Record]) -> TreeResult<Forest> {
    TreeBuilder::new().build(records)
}
