//! Generational slot arena that owns cache entries.
//!
//! Entries are addressed by [`SlotId`], a `(index, generation)` pair. Freed
//! slots are recycled through a free list; each reuse bumps the slot's
//! generation so a handle to an evicted entry never resolves to the entry
//! that later takes over its slot.

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a freed slot if one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            SlotId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            SlotId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        };
        self.len += 1;
        id
    }

    /// Frees the slot behind `id`; stale or unknown handles return `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots allocated so far, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every value. Generations survive so old handles stay invalid.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_slot() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        assert_ne!(id1.generation(), id3.generation());
    }

    #[test]
    fn stale_handle_does_not_resolve() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);

        assert_eq!(arena.get(old), None);
        assert!(!arena.contains(old));
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn clear_invalidates_handles_and_keeps_slots() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert('a');
        let b = arena.insert('b');
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.slot_count(), 2);
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));

        arena.insert('c');
        arena.insert('d');
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.iter().count(), 2);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(String::from("x"));
        arena.get_mut(id).unwrap().push('y');
        assert_eq!(arena.get(id).map(String::as_str), Some("xy"));
    }
}
