use hashbrown::hash_table;

use crate::Ptr;
use crate::arena::Arena;
use crate::arena::Node;
use crate::linked_hash_map::unlink;

/// A view into a single entry in a map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`LinkedHashMap`].
///
/// [`entry`]: crate::linked_hash_map::LinkedHashMap::entry
/// [`LinkedHashMap`]: crate::linked_hash_map::LinkedHashMap
///
/// # Examples
///
/// ```
/// use leash_map::Entry;
/// use leash_map::LinkedHashMap;
///
/// let mut map = LinkedHashMap::new();
///
/// match map.entry("key") {
///     Entry::Vacant(entry) => {
///         entry.insert("value");
///     }
///     Entry::Occupied(entry) => {
///         println!("key already exists: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, K, T> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, T>),

    /// A vacant entry.
    Vacant(VacantEntry<'a, K, T>),
}

impl<'a, K, T> Entry<'a, K, T> {
    /// Ensures a value is in the entry by inserting the provided default if
    /// vacant, and returns a mutable reference to the value.
    ///
    /// A newly inserted entry is appended at the tail of the sequence; an
    /// existing entry keeps its value and position.
    ///
    /// # Examples
    ///
    /// ```
    /// use leash_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::new();
    /// map.entry("a").or_insert(1);
    /// map.entry("a").or_insert(99);
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// ```
    pub fn or_insert(self, default: T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the
    /// function if vacant, and returns a mutable reference to the value.
    pub fn or_insert_with<F: FnOnce() -> T>(self, default: F) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting the default value if
    /// vacant, and returns a mutable reference to the value.
    ///
    /// This is the access-or-default operation: looking up a missing key
    /// creates it with `T::default()`, and looking it up again resolves to
    /// the same value.
    ///
    /// # Examples
    ///
    /// ```
    /// use leash_map::LinkedHashMap;
    ///
    /// let mut map: LinkedHashMap<&str, u32> = LinkedHashMap::new();
    /// *map.entry("count").or_default() += 1;
    /// *map.entry("count").or_default() += 1;
    /// assert_eq!(map.get(&"count"), Some(&2));
    /// ```
    pub fn or_default(self) -> &'a mut T
    where
        T: Default,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(T::default()),
        }
    }

    /// If the entry is occupied, applies the function to the value in place.
    /// Returns the entry for further chaining.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut T),
    {
        if let Entry::Occupied(mut entry) = self {
            f(entry.get_mut());
            Entry::Occupied(entry)
        } else {
            self
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K: core::fmt::Debug, T: core::fmt::Debug> core::fmt::Debug for Entry<'a, K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Entry::Occupied(entry) => core::fmt::Debug::fmt(entry, f),
            Entry::Vacant(entry) => core::fmt::Debug::fmt(entry, f),
        }
    }
}

/// A view into an occupied entry in a map. It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, T> {
    pub(crate) entry: hash_table::OccupiedEntry<'a, Ptr>,
    pub(crate) nodes: &'a mut Arena<K, T>,
    pub(crate) head: &'a mut Option<Ptr>,
    pub(crate) tail: &'a mut Option<Ptr>,
}

impl<'a, K, T> OccupiedEntry<'a, K, T> {
    /// Returns the handle of this entry.
    pub fn ptr(&self) -> Ptr {
        *self.entry.get()
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        &self.nodes[self.ptr()].key
    }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &T {
        &self.nodes[self.ptr()].value
    }

    /// Returns a mutable reference to the entry's value.
    ///
    /// For a reference that outlives the entry view, see
    /// [`into_mut`](Self::into_mut).
    pub fn get_mut(&mut self) -> &mut T {
        let ptr = self.ptr();
        &mut self.nodes[ptr].value
    }

    /// Converts the entry view into a mutable reference to its value, bound
    /// to the map itself.
    pub fn into_mut(self) -> &'a mut T {
        let OccupiedEntry { entry, nodes, .. } = self;
        let ptr = *entry.get();
        &mut nodes[ptr].value
    }

    /// Replaces the entry's value, returning the old value.
    ///
    /// The entry keeps its position in the sequence; only the value changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use leash_map::Entry;
    /// use leash_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::new();
    /// map.insert("a", 1);
    ///
    /// if let Entry::Occupied(mut entry) = map.entry("a") {
    ///     assert_eq!(entry.insert(2), 1);
    /// }
    /// assert_eq!(map.get(&"a"), Some(&2));
    /// ```
    pub fn insert(&mut self, value: T) -> T {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning the stored key and value.
    pub fn remove_entry(self) -> (K, T) {
        let OccupiedEntry {
            entry,
            nodes,
            head,
            tail,
        } = self;
        let (ptr, _) = entry.remove();
        let node = nodes.free(ptr);
        let removed = unlink(nodes, head, tail, node);
        (removed.key, removed.value)
    }

    /// Removes the entry, returning the stored value.
    pub fn remove(self) -> T {
        self.remove_entry().1
    }
}

impl<'a, K: core::fmt::Debug, T: core::fmt::Debug> core::fmt::Debug for OccupiedEntry<'a, K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

/// A view into a vacant entry in a map. It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, T> {
    pub(crate) entry: hash_table::VacantEntry<'a, Ptr>,
    pub(crate) key: K,
    pub(crate) hash: u64,
    pub(crate) nodes: &'a mut Arena<K, T>,
    pub(crate) head: &'a mut Option<Ptr>,
    pub(crate) tail: &'a mut Option<Ptr>,
}

impl<'a, K, T> VacantEntry<'a, K, T> {
    /// Returns a reference to the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key, inserting nothing.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts a value, appending the new entry at the tail of the sequence,
    /// and returns a mutable reference to it.
    pub fn insert(self, value: T) -> &'a mut T {
        self.insert_full(value).1
    }

    /// Inserts a value, appending the new entry at the tail of the sequence,
    /// and returns its handle along with a mutable reference to the value.
    pub fn insert_full(self, value: T) -> (Ptr, &'a mut T) {
        let VacantEntry {
            entry,
            key,
            hash,
            nodes,
            head,
            tail,
        } = self;

        let ptr = nodes.alloc(Node {
            prev: *tail,
            next: None,
            hash,
            key,
            value,
        });
        match *tail {
            Some(prev) => nodes[prev].next = Some(ptr),
            None => *head = Some(ptr),
        }
        *tail = Some(ptr);
        entry.insert(ptr);

        (ptr, &mut nodes[ptr].value)
    }
}

impl<'a, K: core::fmt::Debug, T> core::fmt::Debug for VacantEntry<'a, K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VacantEntry").field("key", self.key()).finish()
    }
}
