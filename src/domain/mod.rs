//! Domain layer: tree construction and selection state
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod drilldown;
pub mod entities;
pub mod error;
pub mod expansion;
pub mod forest;
pub mod selection;

pub use builder::{build, TreeBuilder};
pub use drilldown::DrillDown;
pub use entities::{NodeId, Record, TreeNode};
pub use error::{TreeError, TreeResult};
pub use expansion::ExpansionState;
pub use forest::Forest;
pub use selection::{SelectionState, SelectionStore};
