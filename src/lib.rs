//! Logic evaluation for genetic circuit design
//!
//! This crate computes the truth table of every node of a genetic circuit netlist, for every
//! admissible input state. It is the logic evaluation step of a genetic circuit compiler: its
//! truth tables feed technology mapping and scoring.
//!
//! # Usage
//!
//! A [`Netlist`] is a directed graph of gates, built programmatically or read from a .bench file.
//! [`Evaluation`] enumerates the input states and computes the value of each node:
//! ```
//! # use cello_logic::{Evaluation, Netlist, NodeType};
//! let mut net = Netlist::new("xor");
//! let a = net.add_input("a");
//! let b = net.add_input("b");
//! let g = net.add_gate("g", NodeType::Xor, &[a, b]);
//! let y = net.add_output("y", g);
//!
//! let eval = Evaluation::new(&net).unwrap();
//! assert_eq!(eval.values(y), vec![Some(false), Some(true), Some(true), Some(false)]);
//!
//! let mut csv = Vec::new();
//! eval.write_csv(",", &mut csv).unwrap();
//! ```
//!
//! # Sequential logic
//!
//! The only supported sequential element is the NOR latch: two NOR gates, each driving the other.
//! The outputs of the latch are treated as additional free variables, and the states that a
//! latch cannot be in are removed afterwards:
//! * states where both outputs of the latch have the same value;
//! * states where both external inputs of the latch are high.
//!
//! Any other cycle makes the evaluation fail with [`Error::UnsupportedTopology`].
//!
//! # Datastructures
//!
//! Nodes are referenced by [`NodeId`] handles into the netlist that owns them.
//! Evaluation results are expressed with the types in [`logic`]: a [`logic::State`] assigns
//! values to the free variables, [`logic::States`] enumerates them, and a [`logic::TruthTable`]
//! maps each state to the value of a node.

#![warn(missing_docs)]

pub mod error;
pub mod eval;
pub mod graph;
pub mod io;
pub mod logic;
pub mod netlist;

pub use error::{Error, Result};
pub use eval::Evaluation;
pub use netlist::{stats, Netlist, NodeId, NodeType};
