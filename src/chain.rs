//! Chain nodes and the arena that owns them.
//!
//! Every node lives in a single `SlotMap`; chains are threaded through it by
//! `next`/`prev` keys. A node is reachable from exactly one predecessor (a
//! bucket head or the previous node), which plays the role of its owner:
//! unlinking a node hands its `next` to that predecessor and frees only the
//! node itself. `prev` is a back-reference used for splicing and is never
//! followed to free anything.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable arena index of a chain node.
    pub(crate) struct NodeKey;
}

pub(crate) struct Node<V> {
    pub(crate) key: i32,
    pub(crate) value: V,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

#[cfg(test)]
impl<V> Node<V> {
    pub(crate) fn prev(&self) -> Option<NodeKey> {
        self.prev
    }

    pub(crate) fn next(&self) -> Option<NodeKey> {
        self.next
    }
}

/// Outcome of scanning a chain for a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    Found(NodeKey),
    /// Key absent; `tail` is the last node of the chain, `None` if empty.
    Vacant { tail: Option<NodeKey> },
}

pub(crate) struct Arena<V> {
    nodes: SlotMap<NodeKey, Node<V>>,
}

impl<V> Arena<V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn node(&self, k: NodeKey) -> &Node<V> {
        &self.nodes[k]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, k: NodeKey) -> &mut Node<V> {
        &mut self.nodes[k]
    }

    /// Walks the chain starting at `head` in link order.
    pub(crate) fn walk(&self, head: Option<NodeKey>) -> ChainIter<'_, V> {
        ChainIter {
            nodes: &self.nodes,
            cur: head,
        }
    }

    pub(crate) fn find(&self, head: Option<NodeKey>, key: i32) -> Option<NodeKey> {
        self.walk(head).find(|(_, n)| n.key == key).map(|(k, _)| k)
    }

    /// Single pass that either finds `key` or reports where to append it.
    pub(crate) fn probe(&self, head: Option<NodeKey>, key: i32) -> Probe {
        let mut tail = None;
        for (k, n) in self.walk(head) {
            if n.key == key {
                return Probe::Found(k);
            }
            tail = Some(k);
        }
        Probe::Vacant { tail }
    }

    /// Links a new node after `tail`, or installs it as `head` when the
    /// chain is empty. The caller guarantees `key` is not already present.
    pub(crate) fn append(
        &mut self,
        head: &mut Option<NodeKey>,
        tail: Option<NodeKey>,
        key: i32,
        value: V,
    ) -> NodeKey {
        let k = self.nodes.insert(Node {
            key,
            value,
            prev: tail,
            next: None,
        });
        match tail {
            Some(t) => {
                debug_assert!(self.nodes[t].next.is_none(), "append after non-tail");
                self.nodes[t].next = Some(k);
            }
            None => {
                debug_assert!(head.is_none(), "append to occupied head");
                *head = Some(k);
            }
        }
        k
    }

    /// Splices `node` out of the chain rooted at `head` and frees it. The
    /// rest of the chain stays linked: the predecessor (or the head slot)
    /// takes over `node.next`, and that successor's `prev` is repointed.
    pub(crate) fn unlink(
        &mut self,
        head: &mut Option<NodeKey>,
        node: NodeKey,
    ) -> Option<Node<V>> {
        let removed = self.nodes.remove(node)?;
        match removed.prev {
            Some(p) => self.nodes[p].next = removed.next,
            None => *head = removed.next,
        }
        if let Some(n) = removed.next {
            self.nodes[n].prev = removed.prev;
        }
        Some(removed)
    }
}

impl<V: Clone> Arena<V> {
    /// Deep-copies the chain at `head` into `dst`, preserving link order,
    /// and returns the head of the copy.
    pub(crate) fn clone_chain_into(
        &self,
        head: Option<NodeKey>,
        dst: &mut Arena<V>,
    ) -> Option<NodeKey> {
        let mut new_head = None;
        let mut tail = None;
        for (_, n) in self.walk(head) {
            tail = Some(dst.append(&mut new_head, tail, n.key, n.value.clone()));
        }
        new_head
    }
}

/// Iterator over one chain, yielding each node with its arena key.
pub(crate) struct ChainIter<'a, V> {
    nodes: &'a SlotMap<NodeKey, Node<V>>,
    cur: Option<NodeKey>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (NodeKey, &'a Node<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let nodes: &'a SlotMap<NodeKey, Node<V>> = self.nodes;
        let n = &nodes[k];
        self.cur = n.next;
        Some((k, n))
    }
}
