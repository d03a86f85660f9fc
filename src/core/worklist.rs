// flattening with an explicit stack of resume points
use tracing::{debug, warn};

use crate::core::flatten::VisitBudget;
use crate::core::list::{ListError, MultilevelList};
use crate::core::types::NodeId;

//one link rewrite, with what it overwrote
#[derive(Debug, Clone, Copy)]
enum Relink {
    //node.next redirected to its child, child.prev to node
    Child {
        node: NodeId,
        old_next: Option<NodeId>,
        child: NodeId,
        child_old_prev: Option<NodeId>,
    },
    //tail of a finished level hooked onto a resume point
    Resume {
        tail: NodeId,
        next: NodeId,
        next_old_prev: Option<NodeId>,
    },
}

impl MultilevelList {
    /// Same result as [`MultilevelList::flatten`], but nesting depth costs heap instead of
    /// call stack.
    ///
    /// When a node with a child is reached the node is linked to its child straight away and
    /// its original successor is pushed as a resume point. Whenever a level runs out, its
    /// last node is linked to the most recent resume point.
    ///
    /// Every rewrite is journaled. If the walk fails partway (dangling handle, visit limit)
    /// the journal is replayed backwards, so on `Err` the list is exactly as it was passed in.
    pub fn flatten_iterative(&mut self, root: Option<NodeId>) -> Result<Option<NodeId>, ListError> {
        self.flatten_work_stack(root, VisitBudget::unlimited())
    }

    pub(crate) fn flatten_work_stack(
        &mut self,
        root: Option<NodeId>,
        mut budget: VisitBudget,
    ) -> Result<Option<NodeId>, ListError> {
        let Some(root) = root else {
            return Ok(None);
        };

        debug!(root, "flattening multilevel list (work stack)");

        let mut journal: Vec<Relink> = Vec::new();
        match self.walk_work_stack(root, &mut budget, &mut journal) {
            Ok((tail, max_depth)) => {
                debug!(root, tail, visited = budget.seen(), max_depth, "flattened multilevel list");
                Ok(Some(root))
            }
            Err(err) => {
                warn!(root, undone = journal.len(), %err, "work stack flatten failed, rolling back");
                self.roll_back(journal)?;
                Err(err)
            }
        }
    }

    //returns (tail, deepest resume stack)
    fn walk_work_stack(
        &mut self,
        root: NodeId,
        budget: &mut VisitBudget,
        journal: &mut Vec<Relink>,
    ) -> Result<(NodeId, usize), ListError> {
        let mut resume: Vec<NodeId> = Vec::new();
        let mut max_depth = 0usize;
        let mut cur = root;

        let tail = loop {
            budget.tick()?;

            let (saved_next, child) = {
                let n = self.node(cur)?;
                (n.next, n.child)
            };

            if let Some(child) = child {
                let child_old_prev = self.node(child)?.prev;
                {
                    let n = self.node_mut(cur)?;
                    n.next = Some(child);
                    n.child = None;
                }
                self.node_mut(child)?.prev = Some(cur);
                journal.push(Relink::Child { node: cur, old_next: saved_next, child, child_old_prev });

                if let Some(next) = saved_next {
                    resume.push(next);
                    max_depth = max_depth.max(resume.len());
                }
                cur = child;
                continue;
            }

            match saved_next.or_else(|| resume.pop()) {
                Some(next) if saved_next.is_none() => {
                    //end of a child level, hook its tail back onto the parent's successor
                    let next_old_prev = self.node(next)?.prev;
                    self.node_mut(cur)?.next = Some(next);
                    self.node_mut(next)?.prev = Some(cur);
                    journal.push(Relink::Resume { tail: cur, next, next_old_prev });
                    cur = next;
                }
                Some(next) => cur = next,
                None => break cur,
            }
        };

        Ok((tail, max_depth))
    }

    fn roll_back(&mut self, journal: Vec<Relink>) -> Result<(), ListError> {
        for relink in journal.into_iter().rev() {
            match relink {
                Relink::Child { node, old_next, child, child_old_prev } => {
                    {
                        let n = self.node_mut(node)?;
                        n.next = old_next;
                        n.child = Some(child);
                    }
                    self.node_mut(child)?.prev = child_old_prev;
                }
                Relink::Resume { tail, next, next_old_prev } => {
                    self.node_mut(tail)?.next = None;
                    self.node_mut(next)?.prev = next_old_prev;
                }
            }
        }
        Ok(())
    }
}
