// node arena + construction
use thiserror::Error;

use crate::core::types::{LinkField, NodeId, Value};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {node} already has a {field} link")]
    LinkOccupied { node: NodeId, field: LinkField },

    #[error("node {0} has a prev link and cannot head a child list")]
    NotAHead(NodeId),

    #[error("visited more than {limit} nodes")]
    VisitLimitExceeded { limit: usize },

    #[error("arena is full, it holds at most {capacity} nodes")]
    ArenaFull { capacity: usize },

    #[error("list is not flat at node {node}: {reason}")]
    NotFlat { node: NodeId, reason: &'static str },

    #[error("malformed multilevel list at node {node}: {reason}")]
    Malformed { node: NodeId, reason: &'static str },

    #[error("invalid flatten config: {0}")]
    Config(String),
}

/// One element of a multilevel list.
///
/// `next`/`child` describe the structure, `prev` is a navigation back-reference only.
/// All three are handles into the owning [`MultilevelList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: Value,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub child: Option<NodeId>,
}

impl Node {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            next: None,
            prev: None,
            child: None,
        }
    }
}

/// Arena owning every node of one or more multilevel lists.
///
/// Nodes are never freed individually; a `NodeId` stays valid for the lifetime of the arena.
#[derive(Debug, Clone, Default)]
pub struct MultilevelList {
    pub(crate) nodes: Vec<Node>,
}

impl MultilevelList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    //allocate a detached node, ids are dense and assigned in insertion order
    pub fn add_node(&mut self, value: Value) -> Result<NodeId, ListError> {
        let id = id_for_index(self.nodes.len())?;
        self.nodes.push(Node::new(value));
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, ListError> {
        self.nodes.get(id as usize).ok_or(ListError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, ListError> {
        self.nodes
            .get_mut(id as usize)
            .ok_or(ListError::NodeNotFound(id))
    }

    pub fn value(&self, id: NodeId) -> Result<Value, ListError> {
        Ok(self.node(id)?.value)
    }

    pub fn next(&self, id: NodeId) -> Result<Option<NodeId>, ListError> {
        Ok(self.node(id)?.next)
    }

    pub fn prev(&self, id: NodeId) -> Result<Option<NodeId>, ListError> {
        Ok(self.node(id)?.prev)
    }

    pub fn child(&self, id: NodeId) -> Result<Option<NodeId>, ListError> {
        Ok(self.node(id)?.child)
    }

    /// Link `a -> b` on the same level (`a.next = b`, `b.prev = a`).
    ///
    /// Refuses to overwrite an existing `a.next` or `b.prev`.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<(), ListError> {
        if self.node(a)?.next.is_some() {
            return Err(ListError::LinkOccupied { node: a, field: LinkField::Next });
        }
        if self.node(b)?.prev.is_some() {
            return Err(ListError::LinkOccupied { node: b, field: LinkField::Prev });
        }

        self.node_mut(a)?.next = Some(b);
        self.node_mut(b)?.prev = Some(a);
        Ok(())
    }

    /// Hang the list headed by `head` below `parent`.
    pub fn set_child(&mut self, parent: NodeId, head: NodeId) -> Result<(), ListError> {
        if self.node(parent)?.child.is_some() {
            return Err(ListError::LinkOccupied { node: parent, field: LinkField::Child });
        }
        if self.node(head)?.prev.is_some() {
            return Err(ListError::NotAHead(head));
        }

        self.node_mut(parent)?.child = Some(head);
        Ok(())
    }

    //build one level from values, returns its head (None for an empty slice)
    pub fn push_chain(&mut self, values: &[Value]) -> Result<Option<NodeId>, ListError> {
        //the whole level has to fit, no half-built chains
        if let Some(last_index) = (self.nodes.len() + values.len()).checked_sub(1) {
            id_for_index(last_index)?;
        }

        let mut head = None;
        let mut tail: Option<NodeId> = None;

        for &value in values {
            let id = self.add_node(value)?;
            match tail {
                // both ends are fresh, so the link can be written directly
                Some(t) => {
                    self.nodes[t as usize].next = Some(id);
                    self.nodes[id as usize].prev = Some(t);
                }
                None => head = Some(id),
            }
            tail = Some(id);
        }

        Ok(head)
    }

    /// Build a level from `values` and attach it as `parent`'s child list.
    ///
    /// Returns the new child head, or `Ok(None)` if `values` is empty (nothing is attached).
    pub fn attach_chain(&mut self, parent: NodeId, values: &[Value]) -> Result<Option<NodeId>, ListError> {
        //check first so a failed attach doesn't leave orphans behind
        if self.node(parent)?.child.is_some() {
            return Err(ListError::LinkOccupied { node: parent, field: LinkField::Child });
        }

        let head = self.push_chain(values)?;
        if let Some(h) = head {
            self.set_child(parent, h)?;
        }
        Ok(head)
    }
}

fn id_for_index(index: usize) -> Result<NodeId, ListError> {
    NodeId::try_from(index).map_err(|_| ListError::ArenaFull {
        capacity: (NodeId::MAX as usize).saturating_add(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_assigns_dense_ids_and_detached_links() {
        let mut l = MultilevelList::new();
        let a = l.add_node(10).unwrap();
        let b = l.add_node(20).unwrap();

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(l.len(), 2);

        let n = l.node(b).unwrap();
        assert_eq!(n.value, 20);
        assert_eq!(n.next, None);
        assert_eq!(n.prev, None);
        assert_eq!(n.child, None);
    }

    #[test]
    fn unknown_id_is_node_not_found() {
        let l = MultilevelList::new();
        assert!(l.is_empty());
        assert_eq!(l.value(3).unwrap_err(), ListError::NodeNotFound(3));
    }

    #[test]
    fn link_sets_both_directions_and_rejects_overwrite() {
        let mut l = MultilevelList::new();
        let a = l.add_node(1).unwrap();
        let b = l.add_node(2).unwrap();
        let c = l.add_node(3).unwrap();

        l.link(a, b).unwrap();
        assert_eq!(l.next(a).unwrap(), Some(b));
        assert_eq!(l.prev(b).unwrap(), Some(a));

        let err = l.link(a, c).unwrap_err();
        match err {
            ListError::LinkOccupied { node, field } => {
                assert_eq!(node, a);
                assert_eq!(field, LinkField::Next);
            }
            other => panic!("unexpected error: {}", other),
        }

        // c -> b would steal b's prev
        let err = l.link(c, b).unwrap_err();
        assert_eq!(err, ListError::LinkOccupied { node: b, field: LinkField::Prev });
    }

    #[test]
    fn push_chain_builds_a_consistent_level() {
        let mut l = MultilevelList::new();
        let head = l.push_chain(&[1, 2, 3]).unwrap().unwrap();

        let second = l.next(head).unwrap().unwrap();
        let third = l.next(second).unwrap().unwrap();

        assert_eq!(l.prev(head).unwrap(), None);
        assert_eq!(l.prev(second).unwrap(), Some(head));
        assert_eq!(l.prev(third).unwrap(), Some(second));
        assert_eq!(l.next(third).unwrap(), None);
        assert_eq!(l.value(third).unwrap(), 3);

        assert_eq!(l.push_chain(&[]).unwrap(), None);
    }

    #[test]
    fn set_child_rejects_non_head_and_second_child() {
        let mut l = MultilevelList::new();
        let parent = l.push_chain(&[1]).unwrap().unwrap();
        let sub = l.push_chain(&[2, 3]).unwrap().unwrap();
        let sub_second = l.next(sub).unwrap().unwrap();

        assert_eq!(l.set_child(parent, sub_second).unwrap_err(), ListError::NotAHead(sub_second));

        l.set_child(parent, sub).unwrap();
        assert_eq!(l.child(parent).unwrap(), Some(sub));

        let other = l.add_node(9).unwrap();
        let err = l.set_child(parent, other).unwrap_err();
        assert!(matches!(err, ListError::LinkOccupied { field: LinkField::Child, .. }));
    }

    #[test]
    fn attach_chain_on_occupied_parent_allocates_nothing() {
        let mut l = MultilevelList::new();
        let parent = l.push_chain(&[1]).unwrap().unwrap();
        l.attach_chain(parent, &[2]).unwrap();
        let before = l.len();

        assert!(l.attach_chain(parent, &[3, 4]).is_err());
        assert_eq!(l.len(), before);

        let lone = l.add_node(5).unwrap();
        assert_eq!(l.attach_chain(lone, &[]).unwrap(), None);
        assert_eq!(l.child(lone).unwrap(), None);
    }

    #[test]
    fn visit_limit_message_only_reports_the_limit() {
        let err = ListError::VisitLimitExceeded { limit: 3 };
        assert_eq!(err.to_string(), "visited more than 3 nodes");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn index_past_u32_range_is_arena_full_not_a_reused_id() {
        let last = NodeId::MAX as usize;
        assert_eq!(id_for_index(last).unwrap(), NodeId::MAX);

        let err = id_for_index(last + 1).unwrap_err();
        match err {
            ListError::ArenaFull { capacity } => assert_eq!(capacity, last + 1),
            other => panic!("unexpected error: {}", other),
        }
    }
}
