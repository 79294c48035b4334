//! Splay tree used as an ordered memo store
//!
//! Every successful `find` and every `insert` splays the touched node to the
//! root through zig, zig-zig and zig-zag rotations. A miss leaves the shape
//! untouched.
//!
//! Nodes live in an arena and refer to each other by slot index. Parent links
//! are plain indices used only for rotation bookkeeping. Descent and splaying
//! are iterative, so degenerate (chain-shaped) trees cannot blow the stack.

use std::cmp::Ordering;

/// Node in the splay tree arena
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Self-adjusting binary search tree
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<usize>,
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key currently at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|idx| &self.nodes[idx].key)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// In-order iterator over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    fn splay(&mut self, x: usize) {
        while let Some(p) = self.nodes[x].parent {
            let x_is_left = self.nodes[p].left == Some(x);

            match self.nodes[p].parent {
                // Zig
                None => {
                    if x_is_left {
                        self.rotate_right(p);
                    } else {
                        self.rotate_left(p);
                    }
                }
                Some(g) => {
                    let p_is_left = self.nodes[g].left == Some(p);

                    match (x_is_left, p_is_left) {
                        // Zig-zig
                        (true, true) => {
                            self.rotate_right(g);
                            self.rotate_right(p);
                        }
                        (false, false) => {
                            self.rotate_left(g);
                            self.rotate_left(p);
                        }
                        // Zig-zag
                        (true, false) => {
                            self.rotate_right(p);
                            self.rotate_left(g);
                        }
                        (false, true) => {
                            self.rotate_left(p);
                            self.rotate_right(g);
                        }
                    }
                }
            }
        }
    }

    fn rotate_right(&mut self, pivot: usize) {
        let child = self.nodes[pivot]
            .left
            .expect("rotate_right on a node without a left child");

        let inner = self.nodes[child].right;
        self.nodes[pivot].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, pivot, child);

        self.nodes[child].right = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }

    fn rotate_left(&mut self, pivot: usize) {
        let child = self.nodes[pivot]
            .right
            .expect("rotate_left on a node without a right child");

        let inner = self.nodes[child].left;
        self.nodes[pivot].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, pivot, child);

        self.nodes[child].left = Some(pivot);
        self.nodes[pivot].parent = Some(child);
    }

    /// Point `parent`'s link (or the root) at `new` instead of `old`
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
    }

    fn alloc_node(&mut self, key: K, value: V, parent: Option<usize>) -> usize {
        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Insert or overwrite `key`, then splay it to the root
    pub fn insert(&mut self, key: K, value: V) {
        let Some(mut current) = self.root else {
            let idx = self.alloc_node(key, value, None);
            self.root = Some(idx);
            return;
        };
        let new_idx = self.nodes.len();

        loop {
            let node = &mut self.nodes[current];
            let slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    node.value = value;
                    self.splay(current);
                    return;
                }
            };

            match *slot {
                Some(child) => current = child,
                None => {
                    *slot = Some(new_idx);
                    self.alloc_node(key, value, Some(current));
                    self.splay(new_idx);
                    return;
                }
            }
        }
    }

    /// Look up `key`; a hit splays it to the root, a miss changes nothing
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let idx = self.locate(key)?;
        self.splay(idx);
        Some(&self.nodes[idx].value)
    }

    /// Check whether `key` is stored without reshaping the tree
    pub fn contains(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    fn locate(&self, key: &K) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }
}

/// In-order iterator over a [`SplayTree`]
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<usize>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(idx) = cursor {
            self.stack.push(idx);
            cursor = self.tree.nodes[idx].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[idx];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Parent links mirror child links and keys are strictly ordered
    fn assert_well_formed<K: Ord + std::fmt::Debug, V>(tree: &SplayTree<K, V>) {
        if let Some(root) = tree.root {
            assert_eq!(tree.nodes[root].parent, None);
        }

        let mut reachable = 0;
        let mut stack: Vec<usize> = tree.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            reachable += 1;
            let node = &tree.nodes[idx];
            if let Some(left) = node.left {
                assert_eq!(tree.nodes[left].parent, Some(idx));
                assert!(tree.nodes[left].key < node.key);
                stack.push(left);
            }
            if let Some(right) = node.right {
                assert_eq!(tree.nodes[right].parent, Some(idx));
                assert!(tree.nodes[right].key > node.key);
                stack.push(right);
            }
        }
        assert_eq!(reachable, tree.len());

        let keys: Vec<&K> = tree.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys out of order: {:?}", keys);
    }

    #[test]
    fn test_empty() {
        let mut tree: SplayTree<u64, u64> = SplayTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.find(&1), None);
        assert_eq!(tree.root_key(), None);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_insert_order_scenario() {
        let mut tree = SplayTree::new();

        for key in [5u64, 3, 8, 1] {
            tree.insert(key, key * 10);
            assert_eq!(tree.root_key(), Some(&key));
            assert_well_formed(&tree);
        }

        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_find_splays_to_root() {
        let mut tree = SplayTree::new();
        for key in [5u64, 3, 8, 1, 4, 7, 9] {
            tree.insert(key, key);
        }

        for key in [4u64, 9, 1, 5, 7] {
            assert_eq!(tree.find(&key), Some(&key));
            assert_eq!(tree.root_key(), Some(&key));
            assert_well_formed(&tree);
        }
    }

    #[test]
    fn test_miss_does_not_splay() {
        let mut tree = SplayTree::new();
        for key in [10u64, 20, 30] {
            tree.insert(key, key);
        }
        let height = tree.height();

        assert_eq!(tree.find(&15), None);
        assert_eq!(tree.root_key(), Some(&30));
        assert_eq!(tree.height(), height);
        assert!(!tree.contains(&15));
        assert!(tree.contains(&10));
        assert_eq!(tree.root_key(), Some(&30));
    }

    #[test]
    fn test_zig_zag() {
        let mut tree = SplayTree::new();
        tree.insert(10u64, ());
        tree.insert(20, ()); // 20 root, 10 left
        tree.insert(5, ()); // 5 root
        tree.insert(15, ()); // zig-zag: 15 is a left child, 20 a right child

        assert_eq!(tree.root_key(), Some(&15));
        assert_well_formed(&tree);

        tree.find(&10);
        assert_eq!(tree.root_key(), Some(&10));
        assert_well_formed(&tree);
    }

    #[test]
    fn test_update_overwrites_in_place() {
        let mut tree = SplayTree::new();
        tree.insert(7u64, 1u64);
        tree.insert(3, 2);
        tree.insert(7, 99);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root_key(), Some(&7));
        assert_eq!(tree.find(&7), Some(&99));
        assert_eq!(tree.find(&3), Some(&2));
        assert_well_formed(&tree);
    }

    #[test]
    fn test_degenerate_chain() {
        let mut tree = SplayTree::new();
        for key in 0..100_000u64 {
            tree.insert(key, key);
        }
        // Ascending inserts leave a left spine
        assert_eq!(tree.height(), 100_000);

        assert_eq!(tree.find(&0), Some(&0));
        assert_eq!(tree.root_key(), Some(&0));
        assert!(tree.height() <= 100_000 / 2 + 2);
    }

    #[test]
    fn test_iter_and_clear() {
        let mut tree = SplayTree::new();
        for key in [4u64, 2, 6] {
            tree.insert(key, key + 1);
        }

        let pairs: Vec<(u64, u64)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(2, 3), (4, 5), (6, 7)]);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_accessed_key_is_root_and_order_holds(
            ops in prop::collection::vec((any::<bool>(), 0u64..200, any::<u64>()), 1..300)
        ) {
            let mut tree = SplayTree::new();
            let mut model = std::collections::BTreeMap::new();

            for (is_insert, key, value) in ops {
                if is_insert {
                    tree.insert(key, value);
                    model.insert(key, value);
                    prop_assert_eq!(tree.root_key(), Some(&key));
                } else {
                    let found = tree.find(&key).copied();
                    prop_assert_eq!(found, model.get(&key).copied());
                    if found.is_some() {
                        prop_assert_eq!(tree.root_key(), Some(&key));
                    }
                }
            }

            assert_well_formed(&tree);
            prop_assert_eq!(tree.len(), model.len());
            prop_assert!(tree.keys().eq(model.keys()));
        }
    }
}
