// recursive depth-first flattening
use tracing::{debug, trace, warn};

use crate::core::list::{ListError, MultilevelList};
use crate::core::types::NodeId;

//counts visited nodes so a cyclic input fails instead of spinning forever
#[derive(Debug, Clone, Copy)]
pub(crate) struct VisitBudget {
    limit: Option<usize>,
    seen: usize,
}

impl VisitBudget {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { limit, seen: 0 }
    }

    pub(crate) fn unlimited() -> Self {
        Self::new(None)
    }

    pub(crate) fn tick(&mut self) -> Result<(), ListError> {
        self.seen += 1;
        match self.limit {
            Some(limit) if self.seen > limit => {
                warn!(limit, "visit limit exceeded while flattening");
                Err(ListError::VisitLimitExceeded { limit })
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn seen(&self) -> usize {
        self.seen
    }
}

impl MultilevelList {
    /// Flatten the multilevel list headed by `root` in place and return its head.
    ///
    /// Every reachable node ends up exactly once in a single `next`/`prev` chain, in
    /// depth-first pre-order: a node's child list comes right after the node and before
    /// the node's original successor. All `child` links are cleared. No node is created
    /// or dropped, and values are left alone.
    ///
    /// `None` in gives `None` out.
    ///
    /// The input must be acyclic. A cycle through `next`/`child` makes this loop forever;
    /// use [`MultilevelList::flatten_with`] with a `visit_limit` to fail fast instead.
    /// Stack depth grows with nesting depth, see [`MultilevelList::flatten_iterative`]
    /// for deeply nested input.
    pub fn flatten(&mut self, root: Option<NodeId>) -> Result<Option<NodeId>, ListError> {
        self.flatten_recursive(root, VisitBudget::unlimited())
    }

    pub(crate) fn flatten_recursive(
        &mut self,
        root: Option<NodeId>,
        mut budget: VisitBudget,
    ) -> Result<Option<NodeId>, ListError> {
        let Some(root) = root else {
            return Ok(None);
        };

        debug!(root, "flattening multilevel list (recursive)");
        let tail = self.splice_level(root, &mut budget)?;
        debug!(root, tail, visited = budget.seen(), "flattened multilevel list");

        Ok(Some(root))
    }

    /// Flatten the level starting at `node` and every list hanging below it.
    ///
    /// Returns the last node of the resulting chain, which the caller needs to re-attach
    /// its own successor.
    pub fn process_level(&mut self, node: NodeId) -> Result<NodeId, ListError> {
        self.splice_level(node, &mut VisitBudget::unlimited())
    }

    fn splice_level(&mut self, node: NodeId, budget: &mut VisitBudget) -> Result<NodeId, ListError> {
        let mut cur = Some(node);
        let mut last = node;

        while let Some(id) = cur {
            budget.tick()?;

            //read before splicing, node.next gets overwritten below
            let (saved_next, child) = {
                let n = self.node(id)?;
                (n.next, n.child)
            };

            if let Some(child) = child {
                let child_tail = self.splice_level(child, budget)?;
                self.splice_child(id, child, child_tail, saved_next)?;
                last = child_tail;
            } else {
                last = id;
            }

            cur = saved_next;
        }

        Ok(last)
    }

    // node -> child ... child_tail -> saved_next
    pub(crate) fn splice_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        child_tail: NodeId,
        saved_next: Option<NodeId>,
    ) -> Result<(), ListError> {
        trace!(node, child, child_tail, ?saved_next, "splicing child list");

        {
            let n = self.node_mut(node)?;
            n.next = Some(child);
            n.child = None;
        }
        self.node_mut(child)?.prev = Some(node);

        if let Some(next) = saved_next {
            self.node_mut(child_tail)?.next = Some(next);
            self.node_mut(next)?.prev = Some(child_tail);
        }

        Ok(())
    }
}
