//! Netlist generators and templates

/// Simple generators to test functionality
pub mod testcases {
    use crate::{Netlist, NodeType};

    /// A single inverter between a primary input and a primary output
    pub fn inverter() -> Netlist {
        let mut ret = Netlist::new("inverter");
        let i = ret.add_input("in");
        let g = ret.add_gate("g", NodeType::Not, &[i]);
        ret.add_output("out", g);
        ret.check();
        ret
    }

    /// A single 2-input gate with inputs a, b and output y
    pub fn gate2(node_type: NodeType) -> Netlist {
        let mut ret = Netlist::new(&format!("{}2", node_type.name().to_lowercase()));
        let a = ret.add_input("a");
        let b = ret.add_input("b");
        let g = ret.add_gate("g", node_type, &[a, b]);
        ret.add_output("y", g);
        ret.check();
        ret
    }

    /// A set/reset NOR latch: q = NOR(s, qb), qb = NOR(r, q)
    pub fn nor_latch() -> Netlist {
        let mut ret = Netlist::new("nor_latch");
        let s = ret.add_input("s");
        let r = ret.add_input("r");
        let q = ret.add_node("q", NodeType::Nor);
        let qb = ret.add_node("qb", NodeType::Nor);
        ret.connect(s, q);
        ret.connect(qb, q);
        ret.connect(r, qb);
        ret.connect(q, qb);
        ret.add_output("out_q", q);
        ret.add_output("out_qb", qb);
        ret.check();
        ret
    }

    /// A ring of inverters, with a primary output tapping the first one
    pub fn not_ring(len: usize) -> Netlist {
        assert!(len > 0);
        let mut ret = Netlist::new("not_ring");
        let ring = (0..len)
            .map(|i| ret.add_node(&format!("n{i}"), NodeType::Not))
            .collect::<Vec<_>>();
        for i in 0..len {
            ret.connect(ring[i], ring[(i + 1) % len]);
        }
        ret.add_output("out", ring[0]);
        ret.check();
        ret
    }
}

/// Random generators, used to check evaluation against a reference
pub mod random {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::{Netlist, NodeId, NodeType};

    const GATE_TYPES: [NodeType; 7] = [
        NodeType::Not,
        NodeType::And,
        NodeType::Nand,
        NodeType::Or,
        NodeType::Nor,
        NodeType::Xor,
        NodeType::Xnor,
    ];

    /// Add a gate of random type, reading random drivers
    fn add_random_gate(
        net: &mut Netlist,
        rng: &mut SmallRng,
        drivers: &[NodeId],
        name: &str,
        max_fanin: usize,
    ) -> NodeId {
        let node_type = *GATE_TYPES.choose(rng).unwrap_or(&NodeType::And);
        let arity = if node_type == NodeType::Not {
            1
        } else {
            rng.gen_range(2..=max_fanin)
        };
        let fanins = (0..arity)
            .map(|_| drivers[rng.gen_range(0..drivers.len())])
            .collect::<Vec<_>>();
        net.add_gate(name, node_type, &fanins)
    }

    /// Add primary outputs on random gates; the last gate always drives one
    fn add_random_outputs(net: &mut Netlist, rng: &mut SmallRng, gates: &[NodeId]) {
        for (i, g) in gates.iter().enumerate() {
            if i + 1 == gates.len() || rng.gen_bool(0.3) {
                net.add_output(&format!("o{i}"), *g);
            }
        }
    }

    /// A random acyclic netlist
    ///
    /// Gates only take their inputs from primary inputs or earlier gates, with between 2 and
    /// `max_fanin` inputs except for inverters. Each gate may also feed a primary output.
    pub fn random_comb(nb_inputs: usize, nb_gates: usize, max_fanin: usize, seed: u64) -> Netlist {
        assert!(nb_inputs > 0);
        assert!(max_fanin >= 2);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Netlist::new(&format!("random_{seed}"));
        let mut drivers: Vec<NodeId> = (0..nb_inputs)
            .map(|i| ret.add_input(&format!("i{i}")))
            .collect();
        let mut gates = Vec::new();
        for i in 0..nb_gates {
            let g = add_random_gate(&mut ret, &mut rng, &drivers, &format!("x{i}"), max_fanin);
            drivers.push(g);
            gates.push(g);
        }
        add_random_outputs(&mut ret, &mut rng, &gates);
        ret.check();
        ret
    }

    /// A random netlist with NOR latches
    ///
    /// Half of the gates are generated first, as in [`random_comb`]. Then each latch `k` is a
    /// pair of NOR gates `q{k} = NOR(set, qb{k})` and `qb{k} = NOR(reset, q{k})`, with set and
    /// reset picked among the existing drivers, including earlier latches. The remaining gates
    /// may read the latch outputs. Each latch output drives a primary output.
    pub fn random_latches(
        nb_inputs: usize,
        nb_gates: usize,
        nb_latches: usize,
        max_fanin: usize,
        seed: u64,
    ) -> Netlist {
        assert!(nb_inputs > 0 && nb_gates > 0);
        assert!(max_fanin >= 2);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Netlist::new(&format!("random_latches_{seed}"));
        let mut drivers: Vec<NodeId> = (0..nb_inputs)
            .map(|i| ret.add_input(&format!("i{i}")))
            .collect();
        let mut gates = Vec::new();
        for i in 0..nb_gates {
            if i == nb_gates / 2 {
                for k in 0..nb_latches {
                    let set = drivers[rng.gen_range(0..drivers.len())];
                    let reset = drivers[rng.gen_range(0..drivers.len())];
                    let q = ret.add_node(&format!("q{k}"), NodeType::Nor);
                    let qb = ret.add_node(&format!("qb{k}"), NodeType::Nor);
                    ret.connect(set, q);
                    ret.connect(qb, q);
                    ret.connect(reset, qb);
                    ret.connect(q, qb);
                    ret.add_output(&format!("out_q{k}"), q);
                    drivers.push(q);
                    drivers.push(qb);
                }
            }
            let g = add_random_gate(&mut ret, &mut rng, &drivers, &format!("x{i}"), max_fanin);
            drivers.push(g);
            gates.push(g);
        }
        add_random_outputs(&mut ret, &mut rng, &gates);
        ret.check();
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{random, testcases};
    use crate::NodeType;

    #[test]
    fn test_testcases() {
        assert_eq!(testcases::inverter().nb_nodes(), 3);
        assert_eq!(testcases::gate2(NodeType::Xor).nb_nodes(), 4);
        assert_eq!(testcases::gate2(NodeType::Xor).name(), "xor2");
        assert_eq!(testcases::nor_latch().nb_edges(), 6);
        assert_eq!(testcases::not_ring(3).nb_nodes(), 4);
    }

    #[test]
    fn test_random() {
        let a = random::random_comb(3, 10, 3, 1);
        let b = random::random_comb(3, 10, 3, 1);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.primary_inputs().len(), 3);
        assert!(!a.primary_outputs().is_empty());
        for n in a.nodes() {
            for f in a.fanins(n) {
                assert!(f < n);
            }
        }
    }

    #[test]
    fn test_random_latches() {
        let a = random::random_latches(3, 10, 2, 3, 4);
        let b = random::random_latches(3, 10, 2, 3, 4);
        assert_eq!(a.to_string(), b.to_string());
        assert!(a.is_valid());
        for k in 0..2 {
            let q = a.find(&format!("q{k}")).unwrap();
            let qb = a.find(&format!("qb{k}")).unwrap();
            assert_eq!(a.node_type(q), NodeType::Nor);
            assert!(a.fanins(q).any(|n| n == qb));
            assert!(a.fanins(qb).any(|n| n == q));
            assert_eq!(a.fanins(q).count(), 2);
        }
        // Only the latches feed back
        for n in a.nodes() {
            if a.node_name(n).starts_with('q') {
                continue;
            }
            for f in a.fanins(n) {
                assert!(f < n);
            }
        }
    }
}
