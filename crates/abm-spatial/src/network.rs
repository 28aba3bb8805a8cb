//! Undirected graph environment: at most one item per node.
//!
//! # Data layout
//!
//! Adjacency is stored in compressed sparse row form.  The neighbors of node
//! `n` occupy
//!
//! ```text
//! adjacent[ offsets[n] .. offsets[n + 1] ]
//! ```
//!
//! sorted by id, so neighbor lookup is a slice borrow with no allocation.
//! Build with [`NetworkBuilder`]; the edge set is fixed afterwards, while
//! occupancy changes through [`set`](Network::set),
//! [`remove`](Network::remove), and [`move_item`](Network::move_item).

use std::fmt;

use crate::{NetworkError, NetworkResult};

/// Dense node index into a [`Network`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Collects nodes and undirected edges, then lays them out with
/// [`build`](Self::build).
///
/// ```
/// use abm_spatial::{NetworkBuilder, NodeId};
///
/// let mut b = NetworkBuilder::with_nodes(3);
/// b.add_edge(NodeId(0), NodeId(1)).unwrap();
/// b.add_edge(NodeId(1), NodeId(2)).unwrap();
/// let net = b.build::<char>();
/// assert_eq!(net.edge_count(), 2);
/// assert_eq!(net.neighbor_nodes(NodeId(1)), &[NodeId(0), NodeId(2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NetworkBuilder {
    node_count: u32,
    /// Both directions of every edge.
    arcs:       Vec<(NodeId, NodeId)>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with nodes `0..count` already present.
    pub fn with_nodes(count: u32) -> Self {
        Self { node_count: count, arcs: Vec::new() }
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count);
        self.node_count += 1;
        id
    }

    pub fn node_count(&self) -> usize {
        self.node_count as usize
    }

    /// Connect `a` and `b`.  Adding the same edge twice is harmless.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> NetworkResult<()> {
        for node in [a, b] {
            if node.0 >= self.node_count {
                return Err(NetworkError::UnknownNode { node, nodes: self.node_count as usize });
            }
        }
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        self.arcs.push((a, b));
        self.arcs.push((b, a));
        Ok(())
    }

    /// Lay out the adjacency arrays and return an unoccupied network.
    pub fn build<T>(mut self) -> Network<T> {
        self.arcs.sort_unstable();
        self.arcs.dedup();

        let n = self.node_count as usize;
        let mut offsets = vec![0usize; n + 1];
        for &(from, _) in &self.arcs {
            offsets[from.index() + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let mut items = Vec::with_capacity(n);
        items.resize_with(n, || None);

        Network {
            offsets,
            adjacent: self.arcs.into_iter().map(|(_, to)| to).collect(),
            items,
            occupied: 0,
        }
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A fixed undirected graph whose nodes each hold at most one `T`.
#[derive(Clone, Debug)]
pub struct Network<T> {
    /// Length `node_count + 1`.
    offsets:  Vec<usize>,
    adjacent: Vec<NodeId>,
    items:    Vec<Option<T>>,
    occupied: usize,
}

impl<T> Network<T> {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.items.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacent.len() / 2
    }

    /// Number of occupied nodes.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.items.len()
    }

    // ── Topology ──────────────────────────────────────────────────────────

    /// Nodes adjacent to `node`, ascending.  Empty for an unknown node.
    pub fn neighbor_nodes(&self, node: NodeId) -> &[NodeId] {
        if !self.contains(node) {
            return &[];
        }
        &self.adjacent[self.offsets[node.index()]..self.offsets[node.index() + 1]]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbor_nodes(node).len()
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbor_nodes(a).binary_search(&b).is_ok()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Item at `node`, `None` if the node is empty or unknown.
    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.items.get(node.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.items.get_mut(node.index()).and_then(Option::as_mut)
    }

    pub fn occupied(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Place `item` at an empty `node`.
    pub fn set(&mut self, node: NodeId, item: T) -> NetworkResult<()> {
        let i = self.index(node)?;
        if self.items[i].is_some() {
            return Err(NetworkError::Occupied(node));
        }
        self.items[i] = Some(item);
        self.occupied += 1;
        Ok(())
    }

    /// Take the item out of `node`.
    pub fn remove(&mut self, node: NodeId) -> NetworkResult<T> {
        let i = self.index(node)?;
        let item = self.items[i].take().ok_or(NetworkError::Empty(node))?;
        self.occupied -= 1;
        Ok(item)
    }

    /// Move the item at `from` to the empty node `to`.  The nodes need not be
    /// adjacent.
    ///
    /// On error the network is unchanged.
    pub fn move_item(&mut self, from: NodeId, to: NodeId) -> NetworkResult<()> {
        let src = self.index(from)?;
        let dst = self.index(to)?;
        if self.items[src].is_none() {
            return Err(NetworkError::Empty(from));
        }
        if src == dst {
            return Ok(());
        }
        if self.items[dst].is_some() {
            return Err(NetworkError::Occupied(to));
        }
        self.items[dst] = self.items[src].take();
        Ok(())
    }

    /// Items on the nodes adjacent to `node`.
    pub fn neighbors(&self, node: NodeId) -> Vec<&T> {
        self.neighbor_nodes(node).iter().filter_map(|&n| self.get(n)).collect()
    }

    /// Every unoccupied node, ascending.
    pub fn empty_nodes(&self) -> Vec<NodeId> {
        (0..self.items.len())
            .filter(|&i| self.items[i].is_none())
            .map(|i| NodeId(i as u32))
            .collect()
    }

    /// Occupied nodes and their items, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (NodeId(i as u32), item)))
    }

    fn index(&self, node: NodeId) -> NetworkResult<usize> {
        if !self.contains(node) {
            return Err(NetworkError::UnknownNode { node, nodes: self.items.len() });
        }
        Ok(node.index())
    }
}
