//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
///
/// Datasets may spell ids as integers or strings; integers are kept as their
/// decimal text so `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl From<RawId> for NodeId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => NodeId(n.to_string()),
            RawId::Str(s) => NodeId(s),
        }
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

/// Flat input record referencing its parent by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: NodeId,
    /// `None` marks a root.
    #[serde(
        default,
        alias = "parentId",
        deserialize_with = "parent_or_root",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<NodeId>,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, alias = "status", alias = "initial_selected", deserialize_with = "flag_or_status")]
    pub selected: bool,
}

impl Record {
    pub fn new(
        id: impl Into<NodeId>,
        parent_id: Option<NodeId>,
        label: impl Into<String>,
        selected: bool,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            label: label.into(),
            selected,
        }
    }

    /// Shorthand for a root record.
    pub fn root(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self::new(id, None, label, false)
    }

    /// Shorthand for a record below `parent`.
    pub fn child(
        id: impl Into<NodeId>,
        parent: impl Into<NodeId>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, Some(parent.into()), label, false)
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// An empty parent string is treated as "no parent".
fn parent_or_root<'de, D>(deserializer: D) -> Result<Option<NodeId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let parent = Option::<NodeId>::deserialize(deserializer)?;
    Ok(parent.filter(|id| !id.as_str().is_empty()))
}

// Accepts `true`/`false` or an integer status where 1 means checked.
fn flag_or_status<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Status(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Status(n) => n == 1,
    })
}

/// Node of a built forest. Children are owned exclusively by their parent.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` are written by hand so none of
/// them recurses once per level.
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// Iterative so dropping a deep hierarchy cannot overflow the stack.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        // Post-order: a copied subtree waits on `built` until its parent exits
        let mut built: Vec<TreeNode> = Vec::with_capacity(self.children.len());
        let mut stack: Vec<(&TreeNode, bool)> =
            self.children.iter().rev().map(|child| (child, false)).collect();

        while let Some((node, exiting)) = stack.pop() {
            if exiting {
                let children = built.split_off(built.len() - node.children.len());
                built.push(TreeNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    children,
                });
            } else {
                stack.push((node, true));
                for child in node.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        TreeNode {
            id: self.id.clone(),
            label: self.label.clone(),
            children: built,
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.id != b.id || a.label != b.label || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for TreeNode {}

// Children are summarised by count; a deep hierarchy would otherwise recurse.
impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("children", &self.children.len())
            .finish()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
