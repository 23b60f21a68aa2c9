#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
pub mod linked_hash_map;

extern crate alloc;

/// The default hash builder.
///
/// Under the `std` feature this is the standard library's randomized hasher;
/// in `no_std` builds it is [`hashbrown::DefaultHashBuilder`].
#[cfg(feature = "std")]
pub type RandomState = std::hash::RandomState;
/// The default hash builder.
///
/// Under the `std` feature this is the standard library's randomized hasher;
/// in `no_std` builds it is [`hashbrown::DefaultHashBuilder`].
#[cfg(not(feature = "std"))]
pub type RandomState = hashbrown::DefaultHashBuilder;

/// A hash map that preserves insertion order, implemented as a slot arena of
/// doubly-linked nodes indexed by a hash table.
///
/// This is the main type alias using the default hasher. For custom hashers,
/// use [`linked_hash_map::LinkedHashMap`] directly.
///
/// # Examples
///
/// ```
/// use leash_map::LinkedHashMap;
///
/// let mut map = LinkedHashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// // Iteration follows insertion order
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
/// ```
pub type LinkedHashMap<K, V> = crate::linked_hash_map::LinkedHashMap<K, V, RandomState>;
use core::num::NonZeroU32;

pub use linked_hash_map::Entry;
pub use linked_hash_map::IntoIter;
pub use linked_hash_map::Iter;
pub use linked_hash_map::IterMut;
pub use linked_hash_map::OccupiedEntry;
pub use linked_hash_map::RemovedEntry;
pub use linked_hash_map::VacantEntry;
pub use linked_hash_map::ValuesMut;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
/// A handle identifying an entry in the linked hash map.
///
/// This is an opaque, stable reference that can be used to reach an entry
/// without a key lookup, in O(1). A handle stays valid until the entry it
/// names is removed; removing *other* entries never disturbs it. It is
/// **non-generational**: once an entry is removed, its handle may be re-used
/// for a later insertion.
///
/// # Examples
///
/// ```
/// use leash_map::LinkedHashMap;
///
/// let mut map = LinkedHashMap::new();
/// map.insert("key", 42);
///
/// let ptr = map.get_ptr(&"key").unwrap();
/// assert_eq!(map.ptr_get(ptr), Some(&42));
/// ```
pub struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.0.get() - 1)
    }
}

impl Ptr {
    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Ptr: {index}"
        );
        Ptr(NonZeroU32::new((index as u32).saturating_add(1)).unwrap())
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0.get() as usize - 1
    }
}
