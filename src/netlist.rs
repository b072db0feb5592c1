//! Representation of genetic circuit netlists

pub mod generators;
mod netlist;
mod node;
pub mod stats;

pub use netlist::Netlist;
pub use node::{Edge, EdgeId, Node, NodeId, NodeType};
