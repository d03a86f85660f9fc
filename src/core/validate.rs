// structural checks before/after flattening
use std::collections::HashSet;

use crate::core::list::{ListError, MultilevelList};
use crate::core::types::NodeId;

impl MultilevelList {
    //post-condition of flatten:
    // - head has no prev, tail has no next
    // - a.next = b  =>  b.prev = a
    // - no child links left
    // - no node twice (a repeat means the chain loops)
    pub fn check_flat(&self, head: Option<NodeId>) -> Result<(), ListError> {
        let Some(head) = head else {
            return Ok(());
        };

        if self.node(head)?.prev.is_some() {
            return Err(ListError::NotFlat { node: head, reason: "head has a prev link" });
        }

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut cur = Some(head);

        while let Some(id) = cur {
            if !seen.insert(id) {
                return Err(ListError::NotFlat { node: id, reason: "node reached twice" });
            }

            let n = self.node(id)?;
            if n.child.is_some() {
                return Err(ListError::NotFlat { node: id, reason: "child link still set" });
            }
            if let Some(next) = n.next {
                if self.node(next)?.prev != Some(id) {
                    return Err(ListError::NotFlat { node: next, reason: "prev does not mirror next" });
                }
            }

            cur = n.next;
        }

        Ok(())
    }

    /// Check the input contract of `flatten` for the list headed by `head`.
    ///
    /// Every level must be a consistent doubly linked list whose head has no `prev`, and no
    /// node may be reachable twice through `next`/`child`. Unlike `flatten` this terminates
    /// on cyclic input.
    pub fn check_well_formed(&self, head: Option<NodeId>) -> Result<(), ListError> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        //heads of levels still to walk
        let mut levels: Vec<NodeId> = head.into_iter().collect();

        while let Some(level_head) = levels.pop() {
            if self.node(level_head)?.prev.is_some() {
                return Err(ListError::Malformed { node: level_head, reason: "level head has a prev link" });
            }

            let mut cur = Some(level_head);
            while let Some(id) = cur {
                if !seen.insert(id) {
                    return Err(ListError::Malformed { node: id, reason: "node reachable twice" });
                }

                let n = self.node(id)?;
                if let Some(next) = n.next {
                    if self.node(next)?.prev != Some(id) {
                        return Err(ListError::Malformed { node: next, reason: "prev does not mirror next" });
                    }
                }
                if let Some(child) = n.child {
                    levels.push(child);
                }

                cur = n.next;
            }
        }

        Ok(())
    }
}
