use std::fmt;
use std::io::Write;

use fxhash::FxHashSet;
use itertools::Itertools;
use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::eval::gate::compute_node;
use crate::eval::topology::{NorLatch, Topology};
use crate::graph::SinkDfs;
use crate::logic::{State, States, TruthTable};
use crate::netlist::stats::stats;
use crate::{Netlist, NodeId, NodeType};

const SEPARATOR: &str = "--------------------------------------------";

/// Truth tables of every node of a netlist
///
/// The free variables are the primary inputs and the outputs of the NOR latches. Latch outputs
/// are enumerated like inputs, then the states that violate the latch behaviour are removed:
/// states where both latch outputs have the same value, and states where both latch inputs are
/// high. The truth tables are computed over the remaining states.
///
/// ```
/// # use cello_logic::{Evaluation, Netlist, NodeType};
/// let mut net = Netlist::new("and");
/// let a = net.add_input("a");
/// let b = net.add_input("b");
/// let g = net.add_gate("g", NodeType::And, &[a, b]);
/// let y = net.add_output("y", g);
/// let eval = Evaluation::new(&net).unwrap();
/// assert_eq!(eval.states().len(), 4);
/// assert_eq!(eval.values(y), vec![Some(false), Some(false), Some(false), Some(true)]);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    net: &'a Netlist,
    latches: Vec<NorLatch>,
    states: States<NodeId>,
    truth_tables: Vec<TruthTable<NodeId, NodeId>>,
}

impl<'a> Evaluation<'a> {
    /// Evaluate all nodes of the netlist
    pub fn new(net: &'a Netlist) -> Result<Evaluation<'a>> {
        if !net.is_valid() {
            return Err(Error::InvalidNetlist(net.name().to_string()));
        }
        debug!("Evaluating netlist {}\n{}", net.name(), stats(net));
        let topology = Topology::analyze(net)?;
        let mut inputs = net.primary_inputs();
        inputs.extend(topology.stateful_nodes());
        if inputs.len() >= usize::BITS as usize {
            return Err(Error::TooManyVariables(inputs.len()));
        }
        let states = States::new(&inputs, true, false);
        debug!(
            "{} primary inputs and {} stateful nodes: {} states",
            inputs.len() - 2 * topology.latches().len(),
            2 * topology.latches().len(),
            states.len()
        );

        let mut ret = Evaluation {
            net,
            latches: topology.latches().to_vec(),
            states,
            truth_tables: Vec::new(),
        };
        ret.reset_truth_tables();
        ret.evaluate()?;

        let forbidden = ret.forbidden_states()?;
        if !forbidden.is_empty() {
            debug!("Removing {} forbidden states", forbidden.len());
            ret.states = ret.states.remove(&forbidden);
            ret.reset_truth_tables();
            ret.evaluate()?;
        }
        info!(
            "Evaluated netlist {}: {} nodes over {} states",
            net.name(),
            net.nb_nodes(),
            ret.states.len()
        );
        Ok(ret)
    }

    /// Create empty truth tables over the current states
    fn reset_truth_tables(&mut self) {
        let states = &self.states;
        self.truth_tables = self
            .net
            .nodes()
            .map(|n| TruthTable::new(states, &[n]))
            .collect();
    }

    /// Compute the truth tables, drivers first
    fn evaluate(&mut self) -> Result<()> {
        let net = self.net;
        for node in SinkDfs::new(net) {
            self.evaluate_truth_table(node)?;
        }
        Ok(())
    }

    /// Values of the drivers of a node at state i
    ///
    /// Drivers that are free variables take their value from the state itself.
    fn input_logic(&self, node: NodeId, i: usize) -> Result<Vec<Option<bool>>> {
        let state = self.states.state(i);
        self.net
            .fanins(node)
            .map(|f| -> Result<Option<bool>> {
                if let Some(v) = state.get_state(&f) {
                    return Ok(Some(v));
                }
                let output = self.truth_tables[f.index()].output_at(i);
                self.check_arity(f, output)?;
                Ok(output.get_state(&f))
            })
            .collect()
    }

    fn check_arity(&self, node: NodeId, output: &State<NodeId>) -> Result<()> {
        if output.len() != 1 {
            return Err(Error::InvalidOutputArity {
                node: self.net.node_name(node).to_string(),
                arity: output.len(),
            });
        }
        Ok(())
    }

    fn evaluate_truth_table(&mut self, node: NodeId) -> Result<()> {
        let node_type = self.net.node_type(node);
        for i in 0..self.states.len() {
            self.check_arity(node, self.truth_tables[node.index()].output_at(i))?;
            if matches!(node_type, NodeType::Input | NodeType::Output) {
                continue;
            }
            let inputs = self.input_logic(node, i)?;
            let own = self.states.state(i).get_state(&node);
            let mut result = compute_node(node_type, &inputs, own);
            // Latch outputs are free variables: the state decides
            if node_type != NodeType::PrimaryInput && own.is_some() {
                result = own;
            }
            let value = result.ok_or_else(|| Error::UnassignedOutput {
                node: self.net.node_name(node).to_string(),
                state: i,
            })?;
            trace!("{} = {} at state {}", self.net.node_name(node), value, i);
            let assigned = self.truth_tables[node.index()]
                .output_at_mut(i)
                .set_state(&node, value);
            debug_assert!(assigned);
        }
        Ok(())
    }

    /// States violating the latch invariants
    ///
    /// A state is forbidden if both outputs of a latch have the same value, or if both of its
    /// external drivers are high.
    fn forbidden_states(&self) -> Result<FxHashSet<State<NodeId>>> {
        let mut ret = FxHashSet::default();
        for latch in &self.latches {
            for state in &self.states {
                let a = self.node_value(latch.a, state)?;
                let b = self.node_value(latch.b, state)?;
                if a == b {
                    ret.insert(state.clone());
                }
                let high = Some(Some(state.one()));
                let in1 = latch.in1.map(|n| self.node_value(n, state)).transpose()?;
                let in2 = latch.in2.map(|n| self.node_value(n, state)).transpose()?;
                if in1 == high && in2 == high {
                    ret.insert(state.clone());
                }
            }
        }
        Ok(ret)
    }

    fn node_value(&self, node: NodeId, state: &State<NodeId>) -> Result<Option<bool>> {
        let output = self.truth_tables[node.index()].state_output(state)?;
        Ok(output.get_state(&node))
    }

    /// Admissible input states, after removal of the forbidden ones
    pub fn states(&self) -> &States<NodeId> {
        &self.states
    }

    /// NOR latches of the netlist
    pub fn latches(&self) -> &[NorLatch] {
        &self.latches
    }

    /// Truth table of a node
    pub fn truth_table(&self, node: NodeId) -> &TruthTable<NodeId, NodeId> {
        &self.truth_tables[node.index()]
    }

    /// Value of a node at each state, in state order; marker nodes are unassigned
    pub fn values(&self, node: NodeId) -> Vec<Option<bool>> {
        self.truth_table(node)
            .iter()
            .map(|(_, o)| o.get_state(&node))
            .collect()
    }

    /// Write the truth tables as CSV: one row per node, its name then its value at each state
    ///
    /// Unassigned values are written as empty fields. Node names are not escaped.
    pub fn write_csv<W: Write>(&self, delimiter: &str, w: &mut W) -> Result<()> {
        for node in self.net.nodes() {
            write!(w, "{}", self.net.node_name(node))?;
            for v in self.values(node) {
                write!(w, "{}{}", delimiter, format_value(v))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

fn format_value(v: Option<bool>) -> String {
    v.map(|b| b.to_string()).unwrap_or_default()
}

impl fmt::Display for Evaluation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Logic evaluation of {}", self.net.name())?;
        writeln!(f, "{SEPARATOR}")?;
        for node in self.net.nodes() {
            let values = self.values(node).into_iter().map(format_value).join("\t");
            writeln!(f, "{:<15}\t{}", self.net.node_name(node), values)?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}
