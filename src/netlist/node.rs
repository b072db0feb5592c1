use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Handle to a node of a [`Netlist`](crate::Netlist)
///
/// Handles are only meaningful for the netlist that created them.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a handle from a vertex index
    pub fn from_index(i: usize) -> NodeId {
        NodeId(i as u32)
    }

    /// Obtain the vertex index of the node
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Handle to an edge of a [`Netlist`](crate::Netlist)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Create a handle from an edge index
    pub fn from_index(i: usize) -> EdgeId {
        EdgeId(i as u32)
    }

    /// Obtain the index of the edge
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Boolean function computed by a node
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NodeType {
    /// Value driven by the environment
    PrimaryInput,
    /// Value observed by the environment
    PrimaryOutput,
    /// Input marker, not evaluated
    Input,
    /// Output marker, not evaluated
    Output,
    /// Inverter
    Not,
    /// N-input And gate
    And,
    /// N-input Nand gate
    Nand,
    /// N-input Or gate
    Or,
    /// N-input Nor gate
    Nor,
    /// N-input Xor gate
    Xor,
    /// N-input Xnor gate
    Xnor,
}

impl NodeType {
    /// All node types, in declaration order
    pub const ALL: [NodeType; 11] = [
        NodeType::PrimaryInput,
        NodeType::PrimaryOutput,
        NodeType::Input,
        NodeType::Output,
        NodeType::Not,
        NodeType::And,
        NodeType::Nand,
        NodeType::Or,
        NodeType::Nor,
        NodeType::Xor,
        NodeType::Xnor,
    ];

    /// Name of the type, as used in netlist files
    pub fn name(&self) -> &'static str {
        use NodeType::*;
        match self {
            PrimaryInput => "primary_input",
            PrimaryOutput => "primary_output",
            Input => "input",
            Output => "output",
            Not => "NOT",
            And => "AND",
            Nand => "NAND",
            Or => "OR",
            Nor => "NOR",
            Xor => "XOR",
            Xnor => "XNOR",
        }
    }

    /// Returns whether the node is a logic gate, as opposed to a boundary or marker node
    pub fn is_gate(&self) -> bool {
        !matches!(
            self,
            NodeType::PrimaryInput | NodeType::PrimaryOutput | NodeType::Input | NodeType::Output
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnknownNodeType(s.to_string()))
    }
}

/// A node of the netlist, with its adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) node_type: NodeType,
    pub(crate) in_edges: Vec<EdgeId>,
    pub(crate) out_edges: Vec<EdgeId>,
}

impl Node {
    /// Name of the node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Function computed by the node
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Edges driving this node, one entry per destination slot
    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Edges driven by this node
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }
}

/// A wire, from one source to one or more destinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub(crate) src: NodeId,
    pub(crate) dst: Vec<NodeId>,
}

impl Edge {
    /// Node driving the edge
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// Nodes driven by the edge, in order
    pub fn dst(&self) -> &[NodeId] {
        &self.dst
    }
}
