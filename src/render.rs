/*
Text rendering of forests via termtree.

One termtree::Tree per root; the presentation layer decides how to join them.
 */
use termtree::Tree;
use tracing::instrument;

use crate::config::Settings;
use crate::domain::{ExpansionState, Forest, SelectionState, TreeNode};

/// Marker and label options for rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub checked: &'a str,
    pub unchecked: &'a str,
    pub show_ids: bool,
}

impl<'a> RenderOptions<'a> {
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self {
            checked: &settings.checked_marker,
            unchecked: &settings.unchecked_marker,
            show_ids: settings.show_ids,
        }
    }

    fn line(&self, node: &TreeNode, selection: &SelectionState) -> String {
        let marker = if selection.contains(&node.id) {
            self.checked
        } else {
            self.unchecked
        };
        if self.show_ids {
            format!("{} {} ({})", marker, node.label, node.id)
        } else {
            format!("{} {}", marker, node.label)
        }
    }
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            checked: "[x]",
            unchecked: "[ ]",
            show_ids: false,
        }
    }
}

pub trait ForestRender {
    fn to_tree_strings(&self, selection: &SelectionState, opts: &RenderOptions<'_>) -> Vec<Tree<String>>;

    /// Indented lines of the rows an expansion state leaves visible.
    fn visible_lines(
        &self,
        selection: &SelectionState,
        expansion: &ExpansionState,
        opts: &RenderOptions<'_>,
    ) -> Vec<String>;
}

impl ForestRender for Forest {
    /// Built bottom-up from the post-order walk: finished subtrees wait on
    /// `built` until their parent arrives, leaving one tree per root.
    #[instrument(level = "debug", skip_all)]
    fn to_tree_strings(&self, selection: &SelectionState, opts: &RenderOptions<'_>) -> Vec<Tree<String>> {
        let mut built: Vec<Tree<String>> = Vec::new();
        for (_, node) in self.iter_postorder() {
            let leaves = built.split_off(built.len() - node.children.len());
            built.push(Tree::new(opts.line(node, selection)).with_leaves(leaves));
        }
        built
    }

    fn visible_lines(
        &self,
        selection: &SelectionState,
        expansion: &ExpansionState,
        opts: &RenderOptions<'_>,
    ) -> Vec<String> {
        self.visible(expansion)
            .map(|(depth, node)| {
                let fold = if node.is_leaf() {
                    " "
                } else if expansion.is_expanded(&node.id) {
                    "▼"
                } else {
                    "►"
                };
                format!("{}{} {}", "  ".repeat(depth), fold, opts.line(node, selection))
            })
            .collect()
    }
}

/// Dispose of rendered trees one node at a time.
///
/// termtree's dropping recurses per level, which a deep hierarchy cannot afford.
pub fn release(trees: Vec<Tree<String>>) {
    let mut stack = trees;
    while let Some(mut tree) = stack.pop() {
        stack.append(&mut tree.leaves);
    }
}
