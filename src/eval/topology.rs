//! Admission of netlist topologies and recognition of NOR latches

use log::debug;

use crate::error::{Error, Result};
use crate::graph::Tarjan;
use crate::{Netlist, NodeId, NodeType};

/// Two cross-coupled NOR gates storing one bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NorLatch {
    /// First gate of the latch
    pub a: NodeId,
    /// Second gate of the latch
    pub b: NodeId,
    /// External driver of the first gate
    pub in1: Option<NodeId>,
    /// External driver of the second gate
    pub in2: Option<NodeId>,
}

/// Returns true if dst appears an odd number of times among the destinations of src
///
/// Parallel edges cancel out, so that duplicated connections are not taken for a single one.
pub fn is_upstream_once_of(net: &Netlist, src: NodeId, dst: NodeId) -> bool {
    net.fanouts(src).fold(false, |acc, n| acc ^ (n == dst))
}

/// Returns true if the component is a pair of NOR gates, each driving the other exactly once
pub fn is_nor_latch(net: &Netlist, component: &[NodeId]) -> bool {
    match component {
        [a, b] => {
            is_upstream_once_of(net, *a, *b)
                && is_upstream_once_of(net, *b, *a)
                && net.node_type(*a) == NodeType::Nor
                && net.node_type(*b) == NodeType::Nor
        }
        _ => false,
    }
}

/// The last driver of a latch gate that is not its partner
fn external_driver(net: &Netlist, node: NodeId, partner: NodeId) -> Option<NodeId> {
    net.fanins(node).filter(|n| *n != partner).last()
}

/// Sequential structure of an admitted netlist
#[derive(Debug, Clone, Default)]
pub struct Topology {
    latches: Vec<NorLatch>,
}

impl Topology {
    /// Analyze the strongly connected components of the netlist
    ///
    /// Single nodes are accepted. Components of two nodes must be NOR latches; any other
    /// component is rejected.
    pub fn analyze(net: &Netlist) -> Result<Topology> {
        let mut latches = Vec::new();
        for component in Tarjan::new(net) {
            if component.len() <= 1 {
                continue;
            }
            if !is_nor_latch(net, &component) {
                let names = component
                    .iter()
                    .map(|n| net.node_name(*n).to_string())
                    .collect();
                return Err(Error::UnsupportedTopology(names));
            }
            let (a, b) = (component[0], component[1]);
            let latch = NorLatch {
                a,
                b,
                in1: external_driver(net, a, b),
                in2: external_driver(net, b, a),
            };
            debug!(
                "NOR latch between {} and {}",
                net.node_name(a),
                net.node_name(b)
            );
            latches.push(latch);
        }
        Ok(Topology { latches })
    }

    /// NOR latches, in the order the components were found
    pub fn latches(&self) -> &[NorLatch] {
        &self.latches
    }

    /// Nodes that hold state, two per latch
    pub fn stateful_nodes(&self) -> Vec<NodeId> {
        self.latches.iter().flat_map(|l| [l.a, l.b]).collect()
    }
}
