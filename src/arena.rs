use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn vacant_slot() -> ! {
    panic!("attempted to access a vacant slot");
}

/// One live entry: the canonical key, its cached hash, the value, and the
/// links threading the entry into the insertion-order chain.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, T> {
    pub(crate) prev: Option<Ptr>,
    pub(crate) next: Option<Ptr>,
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: T,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<K, T> {
    Vacant { next_free: Option<Ptr> },
    Occupied(Node<K, T>),
}

impl<K, T> Slot<K, T> {
    pub(crate) fn node_mut(&mut self) -> &mut Node<K, T> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => vacant_slot(),
        }
    }
}

/// Slab of nodes addressed by stable [`Ptr`] handles. Vacated slots are
/// chained into a free list and re-used by later allocations, so a handle
/// only ever moves between "occupied" and "vacant"; the slot it names never
/// relocates while occupied.
#[derive(Debug)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Slot<K, T>>,
    free_head: Option<Ptr>,
}

impl<K, T> Arena<K, T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // This may not shrink anything if the arena has vacant slots: occupied
        // slots cannot be moved to compact the storage, since external Ptrs
        // may still name them.
        self.slots.shrink_to_fit();
    }

    pub(crate) fn alloc(&mut self, node: Node<K, T>) -> Ptr {
        match self.free_head {
            Some(ptr) => {
                let slot = &mut self.slots[ptr.unchecked_get()];
                match core::mem::replace(slot, Slot::Occupied(node)) {
                    Slot::Vacant { next_free } => {
                        self.free_head = next_free;
                        ptr
                    }
                    Slot::Occupied(_) => unreachable!("free list names an occupied slot"),
                }
            }
            None => {
                let ptr = Ptr::unchecked_from(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                ptr
            }
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(
            self.slots.get(ptr.unchecked_get()),
            Some(Slot::Occupied(_))
        )
    }

    /// Vacates the slot and returns its node. The handle must be occupied.
    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K, T> {
        assert!(self.is_occupied(ptr), "freed pointer must be occupied");
        let slot = &mut self.slots[ptr.unchecked_get()];
        match core::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        ) {
            Slot::Occupied(node) => {
                self.free_head = Some(ptr);
                node
            }
            Slot::Vacant { .. } => vacant_slot(),
        }
    }

    pub(crate) fn get(&self, ptr: Ptr) -> Option<&Node<K, T>> {
        match self.slots.get(ptr.unchecked_get()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, ptr: Ptr) -> Option<&mut Node<K, T>> {
        match self.slots.get_mut(ptr.unchecked_get()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut Slot<K, T> {
        self.slots.as_mut_ptr()
    }
}

impl<K, T> Index<Ptr> for Arena<K, T> {
    type Output = Node<K, T>;

    fn index(&self, index: Ptr) -> &Self::Output {
        match self.get(index) {
            Some(node) => node,
            None => vacant_slot(),
        }
    }
}

impl<K, T> IndexMut<Ptr> for Arena<K, T> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(node) => node,
            None => vacant_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;

    fn node<K, T>(key: K, value: T, hash: u64) -> Node<K, T> {
        Node {
            prev: None,
            next: None,
            hash,
            key,
            value,
        }
    }

    #[test]
    fn test_alloc_single() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(42, "hello".to_string(), 12345));

        assert!(arena.is_occupied(ptr));
        let data = &arena[ptr];
        assert_eq!(data.key, 42);
        assert_eq!(data.value, "hello");
        assert_eq!(data.hash, 12345);
    }

    #[test]
    fn test_alloc_multiple_distinct_ptrs() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, "one", 111));
        let ptr2 = arena.alloc(node(2, "two", 222));
        let ptr3 = arena.alloc(node(3, "three", 333));

        assert_ne!(ptr1, ptr2);
        assert_ne!(ptr2, ptr3);
        assert_ne!(ptr1, ptr3);

        assert_eq!(arena[ptr1].key, 1);
        assert_eq!(arena[ptr2].key, 2);
        assert_eq!(arena[ptr3].key, 3);
    }

    #[test]
    fn test_free_and_reuse() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, "one", 111));
        let ptr2 = arena.alloc(node(2, "two", 222));

        let freed = arena.free(ptr1);
        assert_eq!(freed.key, 1);
        assert_eq!(freed.value, "one");
        assert!(!arena.is_occupied(ptr1));
        assert!(arena.is_occupied(ptr2));

        // The vacated slot is recycled for the next allocation.
        let ptr3 = arena.alloc(node(3, "three", 333));
        assert_eq!(ptr3, ptr1);
        assert_eq!(arena[ptr3].key, 3);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = Arena::with_capacity(0);
        let ptrs: Vec<_> = (0..4).map(|i| arena.alloc(node(i, i, i as u64))).collect();

        arena.free(ptrs[1]);
        arena.free(ptrs[3]);

        assert_eq!(arena.alloc(node(10, 10, 10)), ptrs[3]);
        assert_eq!(arena.alloc(node(11, 11, 11)), ptrs[1]);
    }

    #[test]
    fn test_get_vacant_and_out_of_bounds() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 1));
        arena.free(ptr);

        assert!(arena.get(ptr).is_none());
        assert!(arena.get(Ptr::unchecked_from(99)).is_none());
        assert!(!arena.is_occupied(Ptr::unchecked_from(99)));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, "one".to_string(), 1));

        arena.get_mut(ptr).unwrap().value = "uno".to_string();
        assert_eq!(arena[ptr].value, "uno");

        arena[ptr].next = Some(Ptr::unchecked_from(7));
        assert_eq!(arena[ptr].next, Some(Ptr::unchecked_from(7)));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, 1, 1));
        arena.alloc(node(2, 2, 2));

        arena.clear();
        assert!(!arena.is_occupied(ptr1));

        // Allocation starts from the beginning again.
        let ptr = arena.alloc(node(3, 3, 3));
        assert_eq!(ptr.unchecked_get(), 0);
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 1));
        arena.free(ptr);
        arena.free(ptr);
    }

    #[test]
    #[should_panic]
    fn test_index_vacant_slot() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 1));
        arena.free(ptr);
        let _ = &arena[ptr];
    }
}
