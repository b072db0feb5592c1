use core::fmt;

use fxhash::FxHashSet;

use crate::netlist::node::{Edge, EdgeId, Node, NodeId, NodeType};

/// Representation of a genetic circuit as a directed multigraph of gates and wires
///
/// Each edge has a single source and one or more destinations. The netlist owns its nodes and
/// edges; everything else refers to them through [`NodeId`] and [`EdgeId`] handles.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Netlist {
    /// Create a new, empty netlist
    pub fn new(name: &str) -> Self {
        Netlist {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Name of the netlist
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the number of nodes in the netlist
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of edges in the netlist
    pub fn nb_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the node at index i
    pub fn node(&self, i: usize) -> NodeId {
        assert!(i < self.nb_nodes());
        NodeId::from_index(i)
    }

    /// Iterate over all nodes, in index order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nb_nodes()).map(NodeId::from_index)
    }

    /// Get the data of a node
    pub fn node_data(&self, n: NodeId) -> &Node {
        &self.nodes[n.index()]
    }

    /// Get the edge at index i
    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.index()]
    }

    /// Name of a node
    pub fn node_name(&self, n: NodeId) -> &str {
        &self.node_data(n).name
    }

    /// Function computed by a node
    pub fn node_type(&self, n: NodeId) -> NodeType {
        self.node_data(n).node_type
    }

    /// Edges driving a node
    pub fn in_edges(&self, n: NodeId) -> &[EdgeId] {
        &self.node_data(n).in_edges
    }

    /// Edges driven by a node
    pub fn out_edges(&self, n: NodeId) -> &[EdgeId] {
        &self.node_data(n).out_edges
    }

    /// Nodes driving a node, in in-edge order
    pub fn fanins(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_edges(n).iter().map(|e| self.edge(*e).src)
    }

    /// Nodes driven by a node, in out-edge then destination order
    pub fn fanouts(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(n)
            .iter()
            .flat_map(|e| self.edge(*e).dst.iter().copied())
    }

    /// Find a node by name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId::from_index)
    }

    /// Primary inputs, in index order
    pub fn primary_inputs(&self) -> Vec<NodeId> {
        self.nodes_of_type(NodeType::PrimaryInput)
    }

    /// Primary outputs, in index order
    pub fn primary_outputs(&self) -> Vec<NodeId> {
        self.nodes_of_type(NodeType::PrimaryOutput)
    }

    fn nodes_of_type(&self, t: NodeType) -> Vec<NodeId> {
        self.nodes().filter(|n| self.node_type(*n) == t).collect()
    }

    /// Add a new node
    pub fn add_node(&mut self, name: &str, node_type: NodeType) -> NodeId {
        let n = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            node_type,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        });
        n
    }

    /// Add a new primary input
    pub fn add_input(&mut self, name: &str) -> NodeId {
        self.add_node(name, NodeType::PrimaryInput)
    }

    /// Add a new primary output driven by an existing node
    pub fn add_output(&mut self, name: &str, driver: NodeId) -> NodeId {
        let o = self.add_node(name, NodeType::PrimaryOutput);
        self.connect(driver, o);
        o
    }

    /// Add a gate driven by the given nodes, in order
    pub fn add_gate(&mut self, name: &str, node_type: NodeType, fanins: &[NodeId]) -> NodeId {
        let g = self.add_node(name, node_type);
        for f in fanins {
            self.connect(*f, g);
        }
        g
    }

    /// Add a new edge from one source to several destinations
    pub fn add_edge(&mut self, src: NodeId, dst: &[NodeId]) -> EdgeId {
        let e = EdgeId::from_index(self.edges.len());
        self.nodes[src.index()].out_edges.push(e);
        for d in dst {
            self.nodes[d.index()].in_edges.push(e);
        }
        self.edges.push(Edge {
            src,
            dst: dst.to_vec(),
        });
        e
    }

    /// Add a new edge with a single destination
    pub fn connect(&mut self, src: NodeId, dst: NodeId) -> EdgeId {
        self.add_edge(src, &[dst])
    }

    /// Returns whether the netlist is structurally consistent
    ///
    /// Node names must be non-empty and unique, edges must have at least one destination,
    /// and the adjacency lists of the nodes must agree with the edges.
    pub fn is_valid(&self) -> bool {
        let mut names = FxHashSet::default();
        for n in &self.nodes {
            if n.name.is_empty() || !names.insert(n.name.as_str()) {
                return false;
            }
        }
        let mut nb_in_slots = 0;
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId::from_index(i);
            if e.dst.is_empty() || !self.is_node(e.src) {
                return false;
            }
            if !self.nodes[e.src.index()].out_edges.contains(&id) {
                return false;
            }
            for d in &e.dst {
                if !self.is_node(*d) || !self.nodes[d.index()].in_edges.contains(&id) {
                    return false;
                }
            }
            nb_in_slots += e.dst.len();
        }
        let nb_out: usize = self.nodes.iter().map(|n| n.out_edges.len()).sum();
        let nb_in: usize = self.nodes.iter().map(|n| n.in_edges.len()).sum();
        let edges_ok = self
            .nodes
            .iter()
            .flat_map(|n| n.in_edges.iter().chain(n.out_edges.iter()))
            .all(|e| e.index() < self.edges.len());
        edges_ok && nb_out == self.edges.len() && nb_in == nb_in_slots
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        assert!(self.is_valid(), "Invalid netlist {}", self.name);
    }

    fn is_node(&self, n: NodeId) -> bool {
        n.index() < self.nodes.len()
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Netlist {} with {} nodes, {} edges:",
            self.name,
            self.nb_nodes(),
            self.nb_edges()
        )?;
        for n in self.nodes() {
            let fanins = self
                .fanins(n)
                .map(|f| self.node_name(f).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                f,
                "\t{} = {}({})",
                self.node_name(n),
                self.node_type(n),
                fanins
            )?;
        }
        Ok(())
    }
}
