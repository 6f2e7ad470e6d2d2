//! treeselect: flat parent-referencing records to ordered forests, with
//! cascading selection.
//!
//! ```
//! use treeselect::domain::{NodeId, Record, SelectionStore};
//!
//! let records = vec![
//!     Record::root(1, "A"),
//!     Record::child(2, 1, "B"),
//!     Record::child(3, 1, "C").with_selected(true),
//! ];
//! let mut store = SelectionStore::from_records(&records).unwrap();
//! store.toggle(&NodeId::from(1), true).unwrap();
//! assert!(store.is_selected(&NodeId::from(2)).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod exitcode;
pub mod render;
pub mod util;
