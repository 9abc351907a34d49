use model::condition::Condition;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Bounded, thread-safe, least-recently-used map from a structural
/// signature to a previously built condition tree.
///
/// Entries live in a `Vec` arena threaded by intrusive prev/next indices;
/// the `HashMap` points from signature to slot. Hits move the entry to the
/// front, inserting at capacity evicts the tail. Lookups update recency, so
/// they take the write lock too; the lock is held only for the map
/// bookkeeping, never while a condition tree is being built.
pub struct StructuralCache<C: Condition> {
    inner: RwLock<CacheInner<C>>,
}

struct CacheInner<C> {
    map: HashMap<String, usize>,
    entries: Vec<Entry<C>>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

struct Entry<C> {
    signature: String,
    condition: C,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<C: Condition> StructuralCache<C> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "structural cache capacity must be greater than 0");
        StructuralCache {
            inner: RwLock::new(CacheInner {
                map: HashMap::with_capacity(capacity),
                entries: Vec::with_capacity(capacity),
                head: None,
                tail: None,
                capacity,
            }),
        }
    }

    /// Look up a condition by signature, marking it most recently used.
    pub fn get(&self, signature: &str) -> Option<C> {
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.map.get(signature) {
            inner.move_to_front(idx);
            Some(inner.entries[idx].condition.clone())
        } else {
            None
        }
    }

    /// Store a condition under its signature, evicting the least recently
    /// used entry if the cache is full. Returns the evicted condition.
    pub fn put(&self, signature: String, condition: C) -> Option<C> {
        let mut inner = self.inner.write();

        if let Some(&idx) = inner.map.get(&signature) {
            inner.entries[idx].condition = condition;
            inner.move_to_front(idx);
            return None;
        }

        let evicted = if inner.entries.len() >= inner.capacity {
            let dropped = inner.evict_tail();
            if dropped.is_some() {
                debug!(capacity = inner.capacity, "structural cache evicted LRU entry");
            }
            dropped
        } else {
            None
        };

        let idx = inner.entries.len();
        let old_head = inner.head;

        inner.entries.push(Entry {
            signature: signature.clone(),
            condition,
            prev: None,
            next: old_head,
        });

        if let Some(old_head_idx) = old_head {
            inner.entries[old_head_idx].prev = Some(idx);
        }
        inner.head = Some(idx);
        if inner.tail.is_none() {
            inner.tail = Some(idx);
        }

        inner.map.insert(signature, idx);
        evicted
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.map.clear();
        inner.entries.clear();
        inner.head = None;
        inner.tail = None;
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity
    }
}

impl<C> CacheInner<C> {
    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        self.entries[idx].prev = None;
        self.entries[idx].next = self.head;

        if let Some(old_head) = self.head {
            self.entries[old_head].prev = Some(idx);
        }
        self.head = Some(idx);

        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.entries[idx].prev;
        let next = self.entries[idx].next;

        if let Some(p) = prev {
            self.entries[p].next = next;
        } else {
            self.head = next;
        }

        if let Some(n) = next {
            self.entries[n].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    fn evict_tail(&mut self) -> Option<C> {
        let tail_idx = self.tail?;
        let signature = self.entries[tail_idx].signature.clone();
        let idx = self.map.remove(&signature)?;

        self.unlink(idx);
        let entry = self.entries.swap_remove(idx);

        // The slot that swapped into `idx` keeps its links; re-point its
        // neighbours and the map at the new index.
        if idx < self.entries.len() {
            let moved_signature = self.entries[idx].signature.clone();
            self.map.insert(moved_signature, idx);

            if let Some(prev) = self.entries[idx].prev {
                self.entries[prev].next = Some(idx);
            } else {
                self.head = Some(idx);
            }

            if let Some(next) = self.entries[idx].next {
                self.entries[next].prev = Some(idx);
            } else {
                self.tail = Some(idx);
            }
        }

        Some(entry.condition)
    }
}
