use crate::tree::TreeOps;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

/// Unbalanced binary search tree keyed by `K`.
///
/// Adding a key that is already present does not create a second node: the
/// existing node's occurrence count goes up and its value is left untouched.
/// There is no rebalancing, so sorted input degrades the tree into a chain;
/// every walk is iterative to keep such chains off the call stack.
pub struct BinTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

pub struct Node<K, V> {
    key: K,
    value: V,
    count: usize,
    left: Link<K, V>,
    right: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

/// In-order iterator over nodes, one item per distinct key.
pub struct Nodes<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

/// In-order iterator over `(key, value)` pairs. Each pair is yielded as many
/// times as its key was added.
pub struct Iter<'a, K, V> {
    nodes: Nodes<'a, K, V>,
    current: Option<&'a Node<K, V>>,
    remaining: usize,
}

/// In-order iterator over `(key, &mut value)`, one item per distinct key.
pub struct IterMut<'a, K, V> {
    stack: Vec<Frame<'a, K, V>>,
}

struct Frame<'a, K, V> {
    key: &'a K,
    value: &'a mut V,
    right: &'a mut Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            count: 1,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// How many times this key has been added.
    pub fn count(&self) -> usize {
        self.count
    }

    // links stay where they are, only the payload moves
    fn replace_contents(&mut self, donor: Node<K, V>) {
        self.key = donor.key;
        self.value = donor.value;
        self.count = donor.count;
    }
}

impl<K, V> BinTree<K, V> {
    pub fn new() -> Self {
        BinTree { root: None, len: 0 }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        debug!(released = self.len, "cleared tree");
        self.len = 0;
    }

    pub fn iter<'a>(&'a self) -> Iter<'a, K, V> {
        Iter {
            nodes: self.nodes(),
            current: None,
            remaining: 0,
        }
    }

    pub fn nodes<'a>(&'a self) -> Nodes<'a, K, V> {
        let mut nodes = Nodes { stack: Vec::new() };
        nodes.push_left(&self.root);
        nodes
    }

    pub fn iter_mut<'a>(&'a mut self) -> IterMut<'a, K, V> {
        let mut iter = IterMut { stack: Vec::new() };
        iter.push_left(&mut self.root);
        iter
    }
}

impl<K: Ord, V> BinTree<K, V> {
    pub fn add(&mut self, key: K, value: V) {
        let slot = Self::locate_slot(&mut self.root, &key);
        match slot {
            Some(node) => {
                node.count += 1;
                trace!(count = node.count, "key already present, bumped count");
            }
            None => {
                *slot = Some(Box::new(Node::new(key, value)));
                self.len += 1;
                trace!(len = self.len, "attached new node");
            }
        }
    }

    /// Deletes the node holding `key` along with its whole occurrence count.
    /// Absent keys and empty trees are a no-op.
    pub fn remove(&mut self, key: &K) {
        let slot = Self::locate_slot(&mut self.root, key);
        let Some(node) = slot.as_deref_mut() else {
            return;
        };

        // only a node with both children gives up a donor; the in-order
        // predecessor has no right child, so unlinking it is the leaf or
        // single-child case
        let donor = if node.right.is_some() {
            Self::detach_max(&mut node.left)
        } else {
            None
        };
        match donor {
            Some(donor) => {
                node.replace_contents(*donor);
                trace!("replaced two-child node with its in-order predecessor");
            }
            None => {
                *slot = slot.take().and_then(|removed| {
                    let Node { left, right, .. } = *removed;
                    left.or(right)
                });
            }
        }
        self.len -= 1;
        trace!(len = self.len, "removed node");
    }

    /// Returns the node holding `key`, if any.
    pub fn find(&self, key: &K) -> Option<&Node<K, V>> {
        self.locate(key).filter(|node| node.key == *key)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        Self::locate_slot(&mut self.root, key).as_deref_mut()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Occurrence count of `key`, 0 when absent.
    pub fn count(&self, key: &K) -> usize {
        self.find(key).map_or(0, Node::count)
    }

    /// Walks down from the root and returns either the node holding `key` or
    /// the node a new `key` would be attached under. `None` only for an
    /// empty tree; callers compare keys to tell the two outcomes apart.
    fn locate(&self, key: &K) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_deref()?;
        loop {
            let next = match key.cmp(&cur.key) {
                Ordering::Less => cur.left.as_deref(),
                Ordering::Greater => cur.right.as_deref(),
                Ordering::Equal => return Some(cur),
            };
            match next {
                Some(node) => cur = node,
                None => return Some(cur),
            }
        }
    }

    /// Same walk as `locate`, but yields the owning slot: occupied by the
    /// node holding `key`, or the empty child slot where it belongs.
    fn locate_slot<'a>(mut link: &'a mut Link<K, V>, key: &K) -> &'a mut Link<K, V> {
        loop {
            let ordering = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return link,
            };
            link = match (ordering, link) {
                (Ordering::Less, Some(node)) => &mut node.left,
                (Ordering::Greater, Some(node)) => &mut node.right,
                (_, slot) => return slot,
            };
        }
    }

    /// Unlinks the maximum of the subtree in `link`, splicing its left child
    /// into its place. `None` only when the subtree is empty.
    fn detach_max(mut link: &mut Link<K, V>) -> Link<K, V> {
        while link.as_ref().is_some_and(|node| node.right.is_some()) {
            link = match link {
                Some(node) => &mut node.right,
                None => return None,
            };
        }
        let mut max = link.take()?;
        *link = max.left.take();
        Some(max)
    }
}

impl<K: Ord, V> TreeOps<K, V> for BinTree<K, V> {
    fn add(&mut self, key: K, value: V) {
        BinTree::add(self, key, value)
    }

    fn remove(&mut self, key: &K) {
        BinTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BinTree::contains(self, key)
    }

    fn count(&self, key: &K) -> usize {
        BinTree::count(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        BinTree::is_empty(self)
    }
}

impl<K, V> Default for BinTree<K, V> {
    fn default() -> Self {
        BinTree::new()
    }
}

impl<K, V> Drop for BinTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> Extend<(K, V)> for BinTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BinTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = BinTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a BinTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BinTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, K, V> Nodes<'a, K, V> {
    fn push_left(&mut self, link: &'a Link<K, V>) {
        let mut cur = link.as_deref();
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some(node)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current.filter(|_| self.remaining > 0) {
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            let node = self.nodes.next()?;
            self.current = Some(node);
            self.remaining = node.count;
        }
    }
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn push_left(&mut self, mut link: &'a mut Link<K, V>) {
        while let Some(node) = link {
            let Node {
                ref key,
                ref mut value,
                ref mut left,
                ref mut right,
                ..
            } = **node;
            self.stack.push(Frame { key, value, right });
            link = left;
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<Self::Item> {
        let Frame { key, value, right } = self.stack.pop()?;
        self.push_left(right);
        Some((key, value))
    }
}

/// One `[key]: value` line per occurrence, in key order.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BinTree<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(fmt, "[{key}]: {value}")?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BinTree<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        // flat in-order listing, a nested dump would recurse once per level
        fmt.debug_struct("BinTree")
            .field("len", &self.len)
            .field("nodes", &self.nodes().collect::<Vec<_>>())
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("count", &self.count)
            .finish()
    }
}
