//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes live in a `SlotArena` and link to each other by `SlotId`, so the
//! list is the sole owner of its values and callers hold plain `Copy`
//! handles instead of pointers. The front is the most recently used node
//! and the back is the next eviction candidate. There are no sentinel nodes:
//! an empty list is `head == tail == None`.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail (LRU)
//! ```
//!
//! ## Performance
//! - `push_front` / `pop_back`: O(1)
//! - `move_to_front` / `remove`: O(1)
//! - `iter`: O(n)
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list ordered from MRU (front) to LRU (back).
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value at the front (MRU).
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Value at the back (LRU).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts `value` at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the back (LRU) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and frees its slot.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves `id` to the front; returns `false` if `id` is not in the list.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub fn iter(&self) -> RecencyListIter<'_, T> {
        RecencyListIter {
            list: self,
            current: self.head,
            remaining: self.len(),
        }
    }

    /// Iterates `(SlotId, &T)` from front to back.
    pub fn iter_entries(&self) -> RecencyListEntryIter<'_, T> {
        RecencyListEntryIter {
            list: self,
            current: self.head,
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) -> Option<()> {
        let old_head = self.head;
        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = old_head;

        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        Some(())
    }

    /// Walks the list and checks link symmetry, termination and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new(
                    "empty list must have neither head nor tail",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;

        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to {:?}", id)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} has prev {:?}, expected {:?}",
                    id, node.prev, prev
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("walk did not end at tail"));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from front to back.
pub struct RecencyListIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for RecencyListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RecencyListIter<'_, T> {}

/// Iterator over `(SlotId, &T)` pairs from front to back.
pub struct RecencyListEntryIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_from_each_position() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");
        // c b a

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        assert!(list.move_to_front(b));
        assert_eq!(values(&list), vec!["b", "c", "a"]);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(list.back_id(), Some(c));
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_back_drains_in_lru_order() {
        let mut list = RecencyList::new();
        for i in 0..4 {
            list.push_front(i);
        }
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_only_node_empties_list() {
        let mut list = RecencyList::new();
        let id = list.push_front(42);
        assert_eq!(list.remove(id), Some(42));
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        assert!(!list.move_to_front(id));
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_middle_relinks_neighbours() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let mid = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(values(&list), vec![3, 1]);
        assert_eq!(list.remove(mid), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn stale_id_after_reuse_is_rejected() {
        let mut list = RecencyList::new();
        let old = list.push_front('x');
        list.remove(old);
        let new = list.push_front('y');

        assert_eq!(old.index(), new.index());
        assert!(!list.contains(old));
        assert!(!list.move_to_front(old));
        assert_eq!(list.get(new), Some(&'y'));
    }

    #[test]
    fn iter_entries_pairs_ids_with_values() {
        let mut list = RecencyList::with_capacity(2);
        let a = list.push_front('a');
        let b = list.push_front('b');
        let entries: Vec<_> = list.iter_entries().collect();
        assert_eq!(entries, vec![(b, &'b'), (a, &'a')]);
        assert_eq!(list.iter().len(), 2);
    }

    #[test]
    fn clear_resets_links() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.check_invariants().unwrap();
        list.push_front(3);
        assert_eq!(values(&list), vec![3]);
    }
}
