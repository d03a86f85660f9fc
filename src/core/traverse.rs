// read-only walks over a multilevel list
use std::collections::HashSet;

use crate::core::list::{ListError, MultilevelList};
use crate::core::types::{NodeId, Value};

/// Iterator over one level, following `next` links only.
///
/// Stops at the tail, or early if a `next` handle does not belong to the arena.
pub struct LevelIter<'a> {
    list: &'a MultilevelList,
    cur: Option<NodeId>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cur?;
        let node = self.list.nodes.get(id as usize)?;
        self.cur = node.next;
        Some(id)
    }
}

impl MultilevelList {
    pub fn iter_level(&self, head: Option<NodeId>) -> LevelIter<'_> {
        LevelIter { list: self, cur: head }
    }

    /// Depth-first pre-order of everything reachable from `head`, without mutating.
    ///
    /// This is the order `flatten` produces. Does not terminate on cyclic input.
    pub fn preorder(&self, head: Option<NodeId>) -> Result<Vec<NodeId>, ListError> {
        let mut out = Vec::new();
        //successors to come back to once a child list is exhausted
        let mut resume: Vec<NodeId> = Vec::new();
        let mut cur = head;

        while let Some(id) = cur.or_else(|| resume.pop()) {
            let node = self.node(id)?;
            out.push(id);

            match node.child {
                Some(child) => {
                    if let Some(next) = node.next {
                        resume.push(next);
                    }
                    cur = Some(child);
                }
                None => cur = node.next,
            }
        }

        Ok(out)
    }

    //values along next links; after flatten this is the whole list
    pub fn values_from(&self, head: Option<NodeId>) -> Result<Vec<Value>, ListError> {
        let mut out = Vec::new();
        let mut cur = head;
        while let Some(id) = cur {
            let node = self.node(id)?;
            out.push(node.value);
            cur = node.next;
        }
        Ok(out)
    }

    pub fn preorder_values(&self, head: Option<NodeId>) -> Result<Vec<Value>, ListError> {
        self.preorder(head)?
            .into_iter()
            .map(|id| self.value(id))
            .collect()
    }

    pub fn reachable(&self, head: Option<NodeId>) -> Result<HashSet<NodeId>, ListError> {
        Ok(self.preorder(head)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::list::{ListError, MultilevelList};
    use crate::core::types::NodeId;

    #[test]
    fn iter_level_ignores_children() {
        let mut l = MultilevelList::new();
        let head = l.push_chain(&[1, 2]).unwrap().unwrap();
        l.attach_chain(head, &[3]).unwrap();

        let ids: Vec<NodeId> = l.iter_level(Some(head)).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(l.iter_level(None).count(), 0);
    }

    #[test]
    fn preorder_visits_child_before_successor_and_leaves_links_alone() {
        let mut l = MultilevelList::new();
        let head = l.push_chain(&[1, 2, 3]).unwrap().unwrap();
        let two = l.next(head).unwrap().unwrap();
        let four = l.attach_chain(two, &[4, 5]).unwrap().unwrap();
        l.attach_chain(four, &[6]).unwrap();
        let snapshot = l.clone();

        assert_eq!(l.preorder_values(Some(head)).unwrap(), vec![1, 2, 4, 6, 5, 3]);
        assert_eq!(l.values_from(Some(head)).unwrap(), vec![1, 2, 3]);
        assert_eq!(l.nodes, snapshot.nodes);
    }

    #[test]
    fn preorder_of_nothing_is_empty() {
        let l = MultilevelList::new();
        assert!(l.preorder(None).unwrap().is_empty());
        assert!(l.reachable(None).unwrap().is_empty());
    }

    #[test]
    fn reachable_excludes_other_lists_in_same_arena() {
        let mut l = MultilevelList::new();
        let a = l.push_chain(&[1, 2]).unwrap().unwrap();
        l.push_chain(&[3, 4]).unwrap();

        let set = l.reachable(Some(a)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn values_from_reports_dangling_next() {
        let mut l = MultilevelList::new();
        let head = l.push_chain(&[1]).unwrap().unwrap();
        l.nodes[head as usize].next = Some(99);

        assert_eq!(l.values_from(Some(head)).unwrap_err(), ListError::NodeNotFound(99));
    }
}
