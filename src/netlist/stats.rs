//! Compute netlist statistics
//!
//! ```
//! # use cello_logic::Netlist;
//! # let net = Netlist::new("empty");
//! use cello_logic::netlist::stats::stats;
//! let stats = stats(&net);
//!
//! // Check that there is no Nor gate
//! assert_eq!(stats.nb_of(cello_logic::NodeType::Nor), 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::{Netlist, NodeType};

/// Number of nodes of each type and number of wires in a netlist
#[derive(Clone, Debug)]
pub struct NetlistStats {
    /// Number of nodes of each type, indexed like [`NodeType::ALL`]
    pub nb_by_type: [usize; NodeType::ALL.len()],
    /// Number of edges
    pub nb_edges: usize,
    /// Number of edge destinations
    pub nb_connections: usize,
    /// Largest number of edges driving a single node
    pub max_fanin: usize,
}

impl NetlistStats {
    /// Number of nodes of the given type
    pub fn nb_of(&self, t: NodeType) -> usize {
        self.nb_by_type[type_index(t)]
    }

    /// Total number of nodes
    pub fn nb_nodes(&self) -> usize {
        self.nb_by_type.iter().sum()
    }

    /// Total number of logic gates
    pub fn nb_gates(&self) -> usize {
        NodeType::ALL
            .iter()
            .filter(|t| t.is_gate())
            .map(|t| self.nb_of(*t))
            .sum()
    }
}

fn type_index(t: NodeType) -> usize {
    NodeType::ALL.iter().position(|u| *u == t).unwrap_or_default()
}

impl fmt::Display for NetlistStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_of(NodeType::PrimaryInput))?;
        writeln!(f, "  Outputs: {}", self.nb_of(NodeType::PrimaryOutput))?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        for t in NodeType::ALL.iter().filter(|t| t.is_gate()) {
            let nb = self.nb_of(*t);
            if nb != 0 {
                writeln!(f, "      {}: {}", t, nb)?;
            }
        }
        writeln!(f, "  Edges: {}", self.nb_edges)?;
        writeln!(f, "  Connections: {}", self.nb_connections)?;
        writeln!(f, "  Max fanin: {}", self.max_fanin)?;
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the netlist
pub fn stats(net: &Netlist) -> NetlistStats {
    let mut ret = NetlistStats {
        nb_by_type: [0; NodeType::ALL.len()],
        nb_edges: net.nb_edges(),
        nb_connections: 0,
        max_fanin: 0,
    };
    for n in net.nodes() {
        ret.nb_by_type[type_index(net.node_type(n))] += 1;
        let fanin = net.in_edges(n).len();
        ret.nb_connections += fanin;
        ret.max_fanin = ret.max_fanin.max(fanin);
    }
    ret
}
