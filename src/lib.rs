//! Flattening of multilevel doubly linked lists.
//!
//! Nodes live in a [`MultilevelList`] arena and refer to each other through [`NodeId`]
//! handles. A node may carry a `child` list in addition to its `next`/`prev` neighbours;
//! [`MultilevelList::flatten`] splices every child list in right after its parent,
//! depth first, leaving one flat doubly linked chain.
//!
//! ```
//! use multilevel_flatten::MultilevelList;
//!
//! let mut list = MultilevelList::new();
//! let head = list.push_chain(&[1, 2, 3]).unwrap().unwrap();
//! let two = list.next(head).unwrap().unwrap();
//! list.attach_chain(two, &[4, 5]).unwrap();
//!
//! list.flatten(Some(head)).unwrap();
//! assert_eq!(list.values_from(Some(head)).unwrap(), vec![1, 2, 4, 5, 3]);
//! ```

pub mod core;

pub use crate::core::config::FlattenConfig;
pub use crate::core::list::{ListError, MultilevelList, Node};
pub use crate::core::traverse::LevelIter;
pub use crate::core::types::{LinkField, NodeId, Strategy, Value};
