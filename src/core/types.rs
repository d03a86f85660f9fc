use serde::{Deserialize, Serialize};

pub type NodeId = u32;
pub type Value = i64;

//how a list gets flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Depth-first splice using the call stack. Stack depth equals nesting depth.
    #[default]
    Recursive,
    /// Same splice order, driven by an explicit stack of resume points on the heap.
    WorkStack,
}

//which link of a node an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkField {
    Next,
    Prev,
    Child,
}

impl std::fmt::Display for LinkField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkField::Next => write!(f, "next"),
            LinkField::Prev => write!(f, "prev"),
            LinkField::Child => write!(f, "child"),
        }
    }
}
