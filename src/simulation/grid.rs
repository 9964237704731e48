//! Grid topology: nodes, directed links, boundary classification
//!
//! Built once per run and read-only afterwards. The petgraph digraph
//! holds the structural adjacency; the dense link list fixes the
//! enumeration order every per-tick phase iterates in.

use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::{Direction, LinkId, Node, CLOCKWISE};

/// A directed, capacity-bounded channel between two adjacent nodes
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub id: LinkId,
    pub src: Node,
    pub dst: Node,
    /// Direction a car travels when using this link; equals the
    /// approach direction at `dst`.
    pub direction: Direction,
    /// True when cars enter the grid on this link
    pub is_entry: bool,
}

/// The immutable street network of one simulation run
pub struct GridTopology {
    size: usize,

    /// Structural adjacency; edge weights are link ordinals
    graph: DiGraph<Node, LinkId>,

    /// Maps nodes to their indices in the graph
    node_indices: HashMap<Node, NodeIndex>,

    /// Nodes in row-major construction order
    nodes: Vec<Node>,

    /// Links in construction order, indexed by `LinkId`
    links: Vec<Link>,

    /// Per node (row-major), the incoming approaches as
    /// (link, approach direction), in fixed enumeration order
    approaches: Vec<Vec<(LinkId, Direction)>>,
}

impl GridTopology {
    /// Build the full N x N topology.
    pub fn build(size: usize) -> Self {
        let neighbor = |node: Node, dir: Direction| neighbor_in(size, node, dir);

        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut nodes = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let node = Node::new(row, col);
                let index = graph.add_node(node);
                node_indices.insert(node, index);
                nodes.push(node);
            }
        }

        let mut links = Vec::new();
        for &src in &nodes {
            for dir in CLOCKWISE {
                let Some(dst) = neighbor(src, dir) else {
                    continue;
                };
                let id = LinkId(links.len());
                links.push(Link {
                    id,
                    src,
                    dst,
                    direction: dir,
                    is_entry: is_entry_link(size, src, dst),
                });
                graph.add_edge(node_indices[&src], node_indices[&dst], id);
            }
        }

        // Approach order per node: travel direction N, E, S, W; the
        // source sits one step opposite the travel direction.
        let mut approaches = Vec::with_capacity(nodes.len());
        for &node in &nodes {
            let mut incoming = Vec::new();
            for dir in CLOCKWISE {
                let Some(src) = neighbor(node, dir.rotated(2)) else {
                    continue;
                };
                let link = links
                    .iter()
                    .find(|l| l.src == src && l.dst == node)
                    .expect("every adjacent pair has a link by construction");
                incoming.push((link.id, dir));
            }
            approaches.push(incoming);
        }

        Self {
            size,
            graph,
            node_indices,
            nodes,
            links,
            approaches,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Nodes in row-major construction order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Links in construction order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Link metadata by ordinal; panics on an id from another topology
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// Boundary-entry links in construction order
    pub fn entry_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_entry)
    }

    /// The in-bounds neighbor one step in `dir`, if any
    pub fn neighbor(&self, node: Node, dir: Direction) -> Option<Node> {
        neighbor_in(self.size, node, dir)
    }

    /// Incoming approaches of `node` as (link, approach direction)
    pub fn approaches(&self, node: Node) -> &[(LinkId, Direction)] {
        &self.approaches[node.row * self.size + node.col]
    }

    /// Find the link connecting two nodes; errors for pairs outside
    /// the constructed topology.
    pub fn link_between(&self, src: Node, dst: Node) -> Result<LinkId> {
        let from = self
            .node_indices
            .get(&src)
            .with_context(|| format!("node {src} not in topology"))?;
        let to = self
            .node_indices
            .get(&dst)
            .with_context(|| format!("node {dst} not in topology"))?;

        self.graph
            .edges(*from)
            .find(|edge| edge.target() == *to)
            .map(|edge| *edge.weight())
            .with_context(|| format!("no link connecting {src} to {dst}"))
    }
}

fn neighbor_in(size: usize, node: Node, dir: Direction) -> Option<Node> {
    let Node { row, col } = node;
    match dir {
        Direction::North if row > 0 => Some(Node::new(row - 1, col)),
        Direction::East if col + 1 < size => Some(Node::new(row, col + 1)),
        Direction::South if row + 1 < size => Some(Node::new(row + 1, col)),
        Direction::West if col > 0 => Some(Node::new(row, col - 1)),
        _ => None,
    }
}

/// True when `src -> dst` carries cars entering the grid from outside:
/// `src` on the outer edge, `dst` the adjacent node one step inward.
fn is_entry_link(size: usize, src: Node, dst: Node) -> bool {
    let southbound = src.row == 0 && dst.row == src.row + 1 && src.col == dst.col;
    let northbound = src.row == size - 1 && dst.row + 1 == src.row && src.col == dst.col;
    let eastbound = src.col == 0 && dst.col == src.col + 1 && src.row == dst.row;
    let westbound = src.col == size - 1 && dst.col + 1 == src.col && src.row == dst.row;
    southbound || northbound || eastbound || westbound
}
