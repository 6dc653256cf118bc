//! A separately-chained hash table keyed by strings.
//!
//! Each bucket of the backing array either is empty or owns the head of a
//! singly-linked chain of entries. Every operation hashes the key with
//! [`crate::djb2::hash`], reduces it modulo the capacity, and walks the
//! chain at that bucket. Structural inserts and removals re-evaluate the
//! load factor and may trigger a full rehash into a doubled or halved
//! backing array.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::warn;

use crate::djb2::bucket_index;

/// Load factor above which a structural mutation doubles the capacity.
const GROW_LOAD_FACTOR: f64 = 0.7;

/// Load factor below which a structural mutation halves the capacity,
/// provided the table has grown at least once.
const SHRINK_LOAD_FACTOR: f64 = 0.2;

const GROWTH_FACTOR: f64 = 2.0;
const SHRINK_FACTOR: f64 = 0.5;

/// A bucket slot: empty, or the owned head of a collision chain.
type Bucket<V> = Option<Box<Entry<V>>>;

/// One node of a bucket's collision chain.
///
/// The table owns every entry exclusively; chains are never aliased from
/// outside. `key` is immutable once the node is created, `value` is
/// replaced in place when the same key is inserted again.
struct Entry<V> {
    key: String,
    value: V,
    next: Bucket<V>,
}

/// A hash table mapping string keys to values of type `V`, resolving
/// collisions with per-bucket linked chains.
///
/// Bucket placement uses the deterministic DJB2 hash, so an entry's bucket
/// can always be recomputed; that is exactly what a rehash does. The
/// capacity adjusts itself: crossing a load factor of `0.7` doubles it,
/// and falling below `0.2` halves it once the table has grown at least
/// once. A table that never grew never shrinks.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::new(4);
/// table.insert("alpha", 1);
/// table.insert("beta", 2);
///
/// assert_eq!(table.retrieve("alpha"), Some(&1));
/// assert_eq!(table.retrieve("gamma"), None);
///
/// table.remove("alpha");
/// assert_eq!(table.retrieve("alpha"), None);
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<V> {
    storage: Vec<Bucket<V>>,
    count: usize,
    grew: bool,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.count)
            .field("capacity", &self.capacity())
            .field("grew", &self.grew)
            .finish_non_exhaustive()
    }
}

impl<V> HashTable<V> {
    /// Creates a table with `capacity` bucket slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. A zero-bucket table cannot index
    /// anything, so this is rejected at construction rather than surfacing
    /// later as a division by zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<u32> = HashTable::new(8);
    /// assert_eq!(table.capacity(), 8);
    /// assert!(table.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            storage: empty_storage(capacity),
            count: 0,
            grew: false,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current number of bucket slots.
    ///
    /// Changes only through resizing, whether load-factor triggered or via
    /// [`HashTable::resize`].
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Stores `value` under `key`.
    ///
    /// If the key is already present its value is overwritten in place:
    /// no new node is created, the length does not change, and no resize
    /// is considered. A genuinely new key is appended at the tail of its
    /// bucket's chain, after which the load factor is checked once and the
    /// table may grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new(4);
    /// table.insert("key", 1);
    /// table.insert("key", 2);
    ///
    /// // Last write wins, and the overwrite did not add an entry.
    /// assert_eq!(table.retrieve("key"), Some(&2));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        if chain_insert(&mut self.storage, key.into(), value) {
            self.count += 1;
            self.check_for_resize();
        }
    }

    /// Returns a reference to the value stored under `key`, or `None`.
    ///
    /// A pure read: walks the bucket's chain, mutates nothing, and never
    /// triggers a resize. A missing key is an ordinary outcome, not an
    /// error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new(4);
    /// table.insert("present", "here");
    ///
    /// assert_eq!(table.retrieve("present"), Some(&"here"));
    /// assert_eq!(table.retrieve("absent"), None);
    /// ```
    pub fn retrieve(&self, key: &str) -> Option<&V> {
        let index = bucket_index(key, self.capacity());

        let mut cursor = self.storage[index].as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Removes the entry stored under `key`, if any.
    ///
    /// Unlinks the matching node from its chain, decrements the length,
    /// and checks the load factor once (a grown table may shrink here).
    /// Removing a key that is not present is a no-op that emits a
    /// `tracing` warning; the table is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new(4);
    /// table.insert("key", 1);
    ///
    /// table.remove("key");
    /// assert_eq!(table.retrieve("key"), None);
    ///
    /// // Warns, but is harmless.
    /// table.remove("key");
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, key: &str) {
        let index = bucket_index(key, self.capacity());

        // Head unlink: the bucket slot itself points at the match.
        if let Some(head) = self.storage[index].take_if(|entry| entry.key == key) {
            self.storage[index] = head.next;
            self.count -= 1;
            self.check_for_resize();
            return;
        }

        // Interior unlink: walk one ahead so the predecessor is at hand
        // for splicing.
        let mut prev = self.storage[index].as_deref_mut();
        while let Some(node) = prev {
            if let Some(victim) = node.next.take_if(|next| next.key == key) {
                node.next = victim.next;
                self.count -= 1;
                self.check_for_resize();
                return;
            }
            prev = node.next.as_deref_mut();
        }

        warn!(key, "remove: key not found");
    }

    /// Forces a growth rehash, doubling the capacity.
    ///
    /// Every entry is re-chained into the larger array at its recomputed
    /// bucket. An explicit resize does not mark the table as grown for
    /// shrink gating; only a load-factor triggered growth does.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new(8);
    /// table.insert("key", 1);
    ///
    /// table.resize();
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.retrieve("key"), Some(&1));
    /// ```
    pub fn resize(&mut self) {
        self.rehash(GROWTH_FACTOR);
    }

    /// Evaluates the load-factor policy after a structural mutation.
    ///
    /// Called exactly once per structural insert or remove, and never from
    /// the rehash path, so a single mutation can trigger at most one
    /// resize.
    fn check_for_resize(&mut self) {
        let load = self.count as f64 / self.capacity() as f64;
        if load > GROW_LOAD_FACTOR {
            self.rehash(GROWTH_FACTOR);
            self.grew = true;
        } else if load < SHRINK_LOAD_FACTOR && self.grew {
            self.rehash(SHRINK_FACTOR);
        }
    }

    /// Replaces the storage with a freshly sized array and re-chains every
    /// entry at its recomputed bucket.
    fn rehash(&mut self, factor: f64) {
        // Truncation is floor for the positive factors in use. Clamp to
        // one slot so bucket_index always has a positive divisor.
        let new_capacity = ((self.capacity() as f64 * factor) as usize).max(1);

        let old = core::mem::replace(&mut self.storage, empty_storage(new_capacity));
        self.count = 0;

        for slot in old {
            let mut next = slot;
            while let Some(entry) = next {
                let Entry { key, value, next: rest } = *entry;
                next = rest;

                // Keys are unique table-wide, so every re-insert creates a
                // node; the policy stays suppressed because chain_insert
                // never evaluates it.
                let structural = chain_insert(&mut self.storage, key, value);
                debug_assert!(structural, "duplicate key surfaced during rehash");
                self.count += 1;
            }
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        // Unlink chains iteratively; dropping a long chain through Box's
        // recursive drop glue could overflow the stack.
        for slot in &mut self.storage {
            let mut next = slot.take();
            while let Some(mut entry) = next {
                next = entry.next.take();
            }
        }
    }
}

/// Allocates `capacity` empty bucket slots.
fn empty_storage<V>(capacity: usize) -> Vec<Bucket<V>> {
    let mut storage = Vec::with_capacity(capacity);
    storage.resize_with(capacity, || None);
    storage
}

/// Inserts into a bucket chain of `storage`, without any policy checks.
///
/// Returns `true` if a new node was appended at the chain tail, `false`
/// if an existing entry's value was overwritten in place. Shared between
/// the public insert path and the rehash re-insert loop; the caller owns
/// the count update and any load-factor evaluation.
fn chain_insert<V>(storage: &mut [Bucket<V>], key: String, value: V) -> bool {
    let index = bucket_index(&key, storage.len());

    let mut cursor = &mut storage[index];
    while let Some(entry) = cursor {
        if entry.key == key {
            entry.value = value;
            return false;
        }
        cursor = &mut entry.next;
    }
    *cursor = Some(Box::new(Entry {
        key,
        value,
        next: None,
    }));
    true
}
