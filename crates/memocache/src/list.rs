//! Doubly-linked recency list
//!
//! Nodes live in an arena and link to each other by slot index, so relinking
//! is index reassignment. Head is the most-recently-used entry, tail the least.

/// Stable handle to a node in a [`RecencyList`]
///
/// A handle stays valid until its node is removed from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// Node in the recency list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Arena-backed doubly-linked list ordered from head (MRU) to tail (LRU)
pub struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Link a new node as head. Becomes tail too if the list was empty.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let idx = self.alloc_node(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Detach a node from wherever it sits and release its slot
    ///
    /// # Panics
    /// If the handle no longer refers to a node in this list.
    pub fn remove(&mut self, handle: Handle) -> (K, V) {
        self.unlink(handle.0);
        let node = self.nodes[handle.0]
            .take()
            .expect("remove called on a detached node");
        self.free_list.push(handle.0);
        self.len -= 1;
        (node.key, node.value)
    }

    /// Relink a node as head; no-op if it already is
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle.0) {
            return;
        }
        self.unlink(handle.0);
        self.link_front(handle.0);
    }

    /// Detach and return the tail, or `None` if the list is empty
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        self.tail.map(|idx| self.remove(Handle(idx)))
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Key and value at the head
    pub fn front(&self) -> Option<(&K, &V)> {
        self.head.map(|idx| {
            let node = self.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Key and value at the tail
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tail.map(|idx| {
            let node = self.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Key and value stored under `handle`
    pub fn get(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle.0);
        (&node.key, &node.value)
    }

    /// Mutable access to the value stored under `handle`
    pub fn get_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.node_mut(handle.0).value
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate from head (most recent) to tail (least recent)
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> &Node<K, V> {
        self.nodes[idx].as_ref().expect("stale recency list handle")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.nodes[idx].as_mut().expect("stale recency list handle")
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => self.node_mut(head_idx).prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.node_mut(prev_idx).next = next,
            None => {
                assert_eq!(self.head, Some(idx), "unlink called on a detached node");
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => self.node_mut(next_idx).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn alloc_node(&mut self, node: Node<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }
}

/// Iterator over a [`RecencyList`] from head to tail
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let list = self.list;
        let node = list.node(idx);
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<u32, &str>) -> Vec<u32> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_push_front() {
        let mut list = RecencyList::new();

        list.push_front(1, "a");
        assert_eq!(list.front(), list.back());

        list.push_front(2, "b");
        list.push_front(3, "c");

        assert_eq!(keys(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some((&3, &"c")));
        assert_eq!(list.back(), Some((&1, &"a")));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_head_tail_interior() {
        let mut list = RecencyList::new();
        let a = list.push_front(1, "a");
        let b = list.push_front(2, "b");
        let c = list.push_front(3, "c");
        let d = list.push_front(4, "d");

        // Interior
        assert_eq!(list.remove(b), (2, "b"));
        assert_eq!(keys(&list), vec![4, 3, 1]);

        // Head
        assert_eq!(list.remove(d), (4, "d"));
        assert_eq!(keys(&list), vec![3, 1]);
        assert_eq!(list.front(), Some((&3, &"c")));

        // Tail
        assert_eq!(list.remove(a), (1, "a"));
        assert_eq!(keys(&list), vec![3]);
        assert_eq!(list.back(), Some((&3, &"c")));

        assert_eq!(list.remove(c), (3, "c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front(1, "a");
        let b = list.push_front(2, "b");
        let c = list.push_front(3, "c");

        // Already head
        list.move_to_front(c);
        assert_eq!(keys(&list), vec![3, 2, 1]);

        // Tail moves up, new tail is its old predecessor
        list.move_to_front(a);
        assert_eq!(keys(&list), vec![1, 3, 2]);
        assert_eq!(list.back(), Some((&2, &"b")));

        list.move_to_front(b);
        assert_eq!(keys(&list), vec![2, 1, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front_two_nodes() {
        let mut list = RecencyList::new();
        let a = list.push_front(1, "a");
        list.push_front(2, "b");

        list.move_to_front(a);
        assert_eq!(keys(&list), vec![1, 2]);
        assert_eq!(list.back(), Some((&2, &"b")));
    }

    #[test]
    fn test_remove_last() {
        let mut list = RecencyList::new();
        assert_eq!(list.remove_last(), None);

        list.push_front(1, "a");
        list.push_front(2, "b");

        assert_eq!(list.remove_last(), Some((1, "a")));
        assert_eq!(list.remove_last(), Some((2, "b")));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_slot_reuse() {
        let mut list = RecencyList::new();
        let a = list.push_front(1, "a");
        list.remove(a);

        let b = list.push_front(2, "b");
        assert_eq!(a, b);
        assert_eq!(list.get(b), (&2, &"b"));

        *list.get_mut(b) = "z";
        assert_eq!(list.front(), Some((&2, &"z")));
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();
        list.push_front(1, "a");
        list.push_front(2, "b");
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "stale recency list handle")]
    fn test_remove_detached_panics() {
        let mut list = RecencyList::new();
        let a = list.push_front(1, "a");
        list.push_front(2, "b");
        list.remove(a);
        list.remove(a);
    }
}
