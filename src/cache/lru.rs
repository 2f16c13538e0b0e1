//! Recency List Module
//!
//! Doubly linked list of cache entries ordered by recency of use, stored in
//! an arena of nodes addressed by index handles instead of pointers.
//!
//! Two sentinel nodes bound the chain and never hold data:
//! - `HEAD` side = least recently used
//! - `TAIL` side = most recently used

use crate::cache::CacheEntry;

/// Arena slot of the head sentinel.
const HEAD: usize = 0;
/// Arena slot of the tail sentinel.
const TAIL: usize = 1;

// == Node ==
/// A slot in the arena. Sentinels and free slots carry no entry.
#[derive(Debug)]
struct Node<V> {
    entry: Option<CacheEntry<V>>,
    prev: usize,
    next: usize,
}

impl<V> Node<V> {
    fn sentinel() -> Self {
        Self {
            entry: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

// == Recency List ==
/// Tracks access order for LRU eviction with O(1) splicing.
///
/// Handles returned by [`RecencyList::push`] stay valid until the entry is
/// removed or the list is cleared; a released slot is recycled by a later push.
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Node<V>>,
    free: Vec<usize>,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel(), Node::sentinel()],
            free: Vec::new(),
        }
    }

    // == Push ==
    /// Stores `entry` and links it as the most recently used node.
    ///
    /// Returns the handle addressing the new node.
    pub fn push(&mut self, entry: CacheEntry<V>) -> usize {
        let handle = match self.free.pop() {
            Some(handle) => {
                self.nodes[handle].entry = Some(entry);
                handle
            }
            None => {
                let handle = self.nodes.len();
                self.nodes.push(Node {
                    entry: Some(entry),
                    prev: handle,
                    next: handle,
                });
                handle
            }
        };
        self.link(handle);
        handle
    }

    // == Touch ==
    /// Moves a linked node to the most recently used position.
    pub fn touch(&mut self, handle: usize) {
        if self.is_data_node(handle) {
            self.unlink(handle);
            self.link(handle);
        }
    }

    // == Remove ==
    /// Unlinks a node, releases its slot and returns the entry it held.
    ///
    /// Returns `None` for sentinels and for slots that hold no entry.
    pub fn remove(&mut self, handle: usize) -> Option<CacheEntry<V>> {
        if !self.is_data_node(handle) {
            return None;
        }
        self.unlink(handle);
        let entry = self.nodes[handle].entry.take();
        self.free.push(handle);
        entry
    }

    // == Oldest ==
    /// Handle of the least recently used node, adjacent to the head sentinel.
    pub fn oldest(&self) -> Option<usize> {
        let handle = self.nodes[HEAD].next;
        (handle != TAIL).then_some(handle)
    }

    // == Entry Access ==
    /// Returns the entry addressed by `handle`, if the slot holds one.
    pub fn entry(&self, handle: usize) -> Option<&CacheEntry<V>> {
        self.nodes.get(handle).and_then(|node| node.entry.as_ref())
    }

    // == Clear ==
    /// Drops every entry and joins the two sentinels back together.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
    }

    /// Number of linked entries, counted by walking the chain.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            nodes: &self.nodes,
            current: self.nodes[HEAD].next,
        }
    }

    // == Splice Primitives ==
    /// Inserts a detached node immediately before the tail sentinel.
    fn link(&mut self, handle: usize) {
        let prev = self.nodes[TAIL].prev;
        self.nodes[handle].prev = prev;
        self.nodes[handle].next = TAIL;
        self.nodes[prev].next = handle;
        self.nodes[TAIL].prev = handle;
    }

    /// Splices a linked node out, joining its former neighbours.
    fn unlink(&mut self, handle: usize) {
        let Node { prev, next, .. } = self.nodes[handle];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[handle].prev = handle;
        self.nodes[handle].next = handle;
    }

    fn is_data_node(&self, handle: usize) -> bool {
        self.nodes
            .get(handle)
            .is_some_and(|node| node.entry.is_some())
    }
}

// == Iterator ==
/// Iterator over entries in recency order, least recently used first.
pub struct Iter<'a, V> {
    nodes: &'a [Node<V>],
    current: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a CacheEntry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.next;
        node.entry.as_ref()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(key: &str) -> CacheEntry<String> {
        CacheEntry::new(
            key.to_string(),
            format!("value_{}", key),
            Duration::hours(1),
            Utc::now(),
        )
    }

    fn keys(list: &RecencyList<String>) -> Vec<String> {
        list.iter().map(|e| e.key.clone()).collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<String> = RecencyList::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.oldest(), None);
        assert_eq!(list.nodes[HEAD].next, TAIL);
        assert_eq!(list.nodes[TAIL].prev, HEAD);
    }

    #[test]
    fn test_push_orders_oldest_first() {
        let mut list = RecencyList::new();

        let a = list.push(entry("a"));
        list.push(entry("b"));
        let c = list.push(entry("c"));

        assert_eq!(list.len(), 3);
        assert_eq!(list.oldest(), Some(a));
        assert_eq!(list.nodes[TAIL].prev, c);
        assert_eq!(keys(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_touch_moves_to_most_recent() {
        let mut list = RecencyList::new();

        let a = list.push(entry("a"));
        let b = list.push(entry("b"));
        list.push(entry("c"));

        list.touch(a);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        assert_eq!(list.oldest(), Some(b));
        assert_eq!(list.nodes[TAIL].prev, a);

        // Touching the newest node leaves the order unchanged
        list.touch(a);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_remove_rejoins_neighbours() {
        let mut list = RecencyList::new();

        list.push(entry("a"));
        let b = list.push(entry("b"));
        list.push(entry("c"));

        let removed = list.remove(b).unwrap();
        assert_eq!(removed.key, "b");
        assert_eq!(removed.value, "value_b");
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec!["a", "c"]);
        assert!(list.entry(b).is_none());
    }

    #[test]
    fn test_remove_twice_is_rejected() {
        let mut list = RecencyList::new();

        let a = list.push(entry("a"));
        assert!(list.remove(a).is_some());
        assert!(list.remove(a).is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_sentinels_are_never_data() {
        let mut list = RecencyList::new();
        list.push(entry("a"));

        assert!(list.entry(HEAD).is_none());
        assert!(list.entry(TAIL).is_none());
        assert!(list.remove(HEAD).is_none());
        assert!(list.remove(TAIL).is_none());
        list.touch(HEAD);
        assert_eq!(keys(&list), vec!["a"]);
    }

    #[test]
    fn test_released_slots_are_recycled() {
        let mut list = RecencyList::new();

        let a = list.push(entry("a"));
        list.push(entry("b"));
        list.remove(a);

        let c = list.push(entry("c"));
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["b", "c"]);
        assert_eq!(list.entry(c).unwrap().key, "c");
    }

    #[test]
    fn test_clear_resets_to_sentinels() {
        let mut list = RecencyList::new();

        list.push(entry("a"));
        list.push(entry("b"));
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.oldest(), None);

        // Clearing twice is harmless and the list stays usable
        list.clear();
        let d = list.push(entry("d"));
        assert_eq!(list.oldest(), Some(d));
        assert_eq!(list.nodes[TAIL].prev, d);
    }

    #[test]
    fn test_eviction_order_after_mixed_touches() {
        let mut list = RecencyList::new();

        let a = list.push(entry("a"));
        let b = list.push(entry("b"));
        let c = list.push(entry("c"));

        list.touch(a);
        list.touch(c);
        list.touch(b);

        // front=[a, c, b]=back, oldest first
        let mut evicted = Vec::new();
        while let Some(handle) = list.oldest() {
            evicted.push(list.remove(handle).unwrap().key);
        }
        assert_eq!(evicted, vec!["a", "c", "b"]);
    }
}
