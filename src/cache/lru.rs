//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::HashMap;

use crate::cache::CacheKey;

/// Sentinel value for null links in the recency list.
const NIL: usize = usize::MAX;

// == List Node ==
/// A node in the arena-backed doubly-linked recency list.
///
/// `key` is None while the slot sits on the free list.
#[derive(Debug)]
struct Node {
    key: Option<CacheKey>,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly-linked list held in a `Vec` arena with index
/// links (no unsafe), plus a HashMap from key to slot index:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// `touch`, `remove` and `evict_oldest` are all O(1) amortized, so
/// promoting a hit never costs more than the map lookup. Recency is a
/// strict total order by time of touch; no tie-breaking is needed.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Key to arena slot
    index: HashMap<CacheKey, usize>,
    /// Arena of list nodes, including freed slots
    nodes: Vec<Node>,
    /// Most recently used slot, NIL when empty
    head: usize,
    /// Least recently used slot, NIL when empty
    tail: usize,
    /// Reusable freed slots
    free: Vec<usize>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If key exists, unlinks it first then relinks at the front.
    /// If key is new, allocates a slot and links it at the front.
    pub fn touch(&mut self, key: &CacheKey) {
        if let Some(&idx) = self.index.get(key) {
            self.unlink(idx);
            self.push_front(idx);
        } else {
            let idx = self.alloc(key.clone());
            self.index.insert(key.clone(), idx);
            self.push_front(idx);
        }
    }

    // == Remove ==
    /// Removes a key from the tracker. No effect if the key is untracked.
    pub fn remove(&mut self, key: &CacheKey) {
        if let Some(idx) = self.index.remove(key) {
            self.unlink(idx);
            self.release(idx);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        self.unlink(idx);
        let key = self.nodes[idx].key.take()?;
        self.index.remove(&key);
        self.free.push(idx);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&CacheKey> {
        if self.tail == NIL {
            return None;
        }
        self.nodes[self.tail].key.as_ref()
    }

    // == Clear ==
    /// Drops all tracked keys and recency state.
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.index.contains_key(key)
    }

    // == Internal: Unlink ==
    /// Detaches a slot from the list, fixing head/tail as needed.
    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    // == Internal: Push Front ==
    /// Links a detached slot in as most recently used.
    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    // == Internal: Alloc ==
    /// Takes a slot for a new key, reusing a freed slot when available.
    fn alloc(&mut self, key: CacheKey) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].key = Some(key);
                idx
            }
            None => {
                self.nodes.push(Node {
                    key: Some(key),
                    prev: NIL,
                    next: NIL,
                });
                self.nodes.len() - 1
            }
        }
    }

    // == Internal: Release ==
    /// Returns a detached slot to the free list.
    fn release(&mut self, idx: usize) {
        self.nodes[idx].key = None;
        self.free.push(idx);
    }
}
