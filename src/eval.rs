//! Logic evaluation of a netlist, including NOR latches
//!
//! Evaluation computes the truth table of every node over all admissible input states.
//! Only one kind of sequential element is supported: a pair of cross-coupled NOR gates.
//! Any other cycle in the netlist is rejected.
//!
//! ```
//! # use cello_logic::netlist::generators::testcases;
//! use cello_logic::Evaluation;
//! let net = testcases::nor_latch();
//! let eval = Evaluation::new(&net).unwrap();
//!
//! // Set and reset are never high together, and the latch outputs are complementary
//! assert_eq!(eval.states().len(), 6);
//! ```

mod evaluation;
pub mod gate;
pub mod topology;

pub use evaluation::Evaluation;
pub use topology::NorLatch;

#[cfg(test)]
mod tests {
    use crate::io::read_truth_csv;
    use crate::netlist::generators::{random, testcases};
    use crate::{Error, Evaluation, Netlist, NodeId, NodeType};

    const T: Option<bool> = Some(true);
    const F: Option<bool> = Some(false);

    /// Direct evaluation of a netlist where each node only reads earlier nodes or free variables
    ///
    /// Bit j of the assignment is the value of the free variable j.
    fn reference_values(net: &Netlist, free: &[NodeId], assignment: usize) -> Vec<bool> {
        let mut values = vec![false; net.nb_nodes()];
        for n in net.nodes() {
            if let Some(j) = free.iter().position(|f| *f == n) {
                values[n.index()] = (assignment >> j) & 1 != 0;
                continue;
            }
            let ins = net.fanins(n).map(|f| values[f.index()]).collect::<Vec<_>>();
            values[n.index()] = match net.node_type(n) {
                NodeType::PrimaryOutput => ins[0],
                NodeType::Not => !ins[0],
                NodeType::And => ins.iter().all(|v| *v),
                NodeType::Nand => !ins.iter().all(|v| *v),
                NodeType::Or => ins.iter().any(|v| *v),
                NodeType::Nor => !ins.iter().any(|v| *v),
                NodeType::Xor => ins.iter().filter(|v| **v).count() % 2 == 1,
                NodeType::Xnor => ins.iter().filter(|v| **v).count() % 2 == 0,
                t => panic!("Unexpected node type {t}"),
            };
        }
        values
    }

    fn node(net: &Netlist, name: &str) -> NodeId {
        net.find(name).unwrap()
    }

    #[test]
    fn test_inverter() {
        let net = testcases::inverter();
        let eval = Evaluation::new(&net).unwrap();
        let i = node(&net, "in");
        assert_eq!(eval.states().len(), 2);
        assert_eq!(eval.states().state(0).get_state(&i), Some(false));
        assert_eq!(eval.states().state(1).get_state(&i), Some(true));
        assert_eq!(eval.values(node(&net, "out")), vec![T, F]);
        assert_eq!(eval.values(i), vec![F, T]);
        assert!(eval.latches().is_empty());
    }

    #[test]
    fn test_and2() {
        let net = testcases::gate2(NodeType::And);
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.values(node(&net, "y")), vec![F, F, F, T]);
    }

    #[test]
    fn test_xor2() {
        let net = testcases::gate2(NodeType::Xor);
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.values(node(&net, "y")), vec![F, T, T, F]);
        assert_eq!(eval.values(node(&net, "a")), vec![F, T, F, T]);
        assert_eq!(eval.values(node(&net, "b")), vec![F, F, T, T]);
    }

    #[test]
    fn test_nor_latch() {
        let net = testcases::nor_latch();
        let eval = Evaluation::new(&net).unwrap();
        let (s, r) = (node(&net, "s"), node(&net, "r"));
        let (q, qb) = (node(&net, "q"), node(&net, "qb"));
        assert_eq!(eval.states().keys(), &[s, r, q, qb]);
        assert_eq!(eval.states().len(), 6);
        assert_eq!(eval.latches().len(), 1);
        let table_q = eval.truth_table(q);
        let table_qb = eval.truth_table(qb);
        for state in eval.states() {
            assert!(!(state.get_state(&s) == T && state.get_state(&r) == T));
            let vq = table_q.state_output(state).unwrap().get_state(&q);
            let vqb = table_qb.state_output(state).unwrap().get_state(&qb);
            assert_eq!(vq, vqb.map(|v| !v));
            assert_eq!(vq, state.get_state(&q));
        }
        assert_eq!(eval.values(node(&net, "out_q")), eval.values(q));
        assert_eq!(eval.values(node(&net, "out_qb")), eval.values(qb));
    }

    #[test]
    fn test_latch_with_logic() {
        // Set is a AND b, reset is NOT a: they are never high together
        let mut net = Netlist::new("gated_latch");
        let a = net.add_input("a");
        let b = net.add_input("b");
        let set = net.add_gate("set", NodeType::And, &[a, b]);
        let reset = net.add_gate("reset", NodeType::Not, &[a]);
        let q = net.add_node("q", NodeType::Nor);
        let qb = net.add_node("qb", NodeType::Nor);
        net.connect(set, q);
        net.connect(qb, q);
        net.connect(reset, qb);
        net.connect(q, qb);
        let y = net.add_gate("y", NodeType::Xor, &[q, a]);
        let out = net.add_output("out", y);

        let eval = Evaluation::new(&net).unwrap();
        let latch = eval.latches()[0];
        assert_eq!((latch.in1, latch.in2), (Some(set), Some(reset)));
        assert_eq!(eval.states().len(), 8);
        for (i, state) in eval.states().iter().enumerate() {
            let vq = state.get_state(&q).unwrap();
            let va = state.get_state(&a).unwrap();
            assert_eq!(state.get_state(&qb), Some(!vq));
            assert_eq!(eval.values(out)[i], Some(vq ^ va));
        }
    }

    #[test]
    fn test_shared_driver() {
        let mut net = Netlist::new("shared");
        let s = net.add_input("s");
        let q = net.add_node("q", NodeType::Nor);
        let qb = net.add_node("qb", NodeType::Nor);
        net.connect(s, q);
        net.connect(qb, q);
        net.connect(s, qb);
        net.connect(q, qb);
        net.add_output("out", q);
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.states().len(), 2);
        for state in eval.states() {
            assert_eq!(state.get_state(&s), F);
        }
    }

    #[test]
    fn test_state_cardinality() {
        // Two independent latches: (2^2 - 2 complementary - 0) states for each latch pair,
        // times 3 admissible set/reset pairs
        let mut net = Netlist::new("two_latches");
        for k in 0..2 {
            let s = net.add_input(&format!("s{k}"));
            let r = net.add_input(&format!("r{k}"));
            let q = net.add_node(&format!("q{k}"), NodeType::Nor);
            let qb = net.add_node(&format!("qb{k}"), NodeType::Nor);
            net.connect(s, q);
            net.connect(qb, q);
            net.connect(r, qb);
            net.connect(q, qb);
            net.add_output(&format!("out{k}"), q);
        }
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.states().keys().len(), 8);
        assert_eq!(eval.latches().len(), 2);
        // Per latch, 16 combinations of (s, r, q, qb) of which 6 survive
        assert_eq!(eval.states().len(), 36);
    }

    #[test]
    fn test_unsupported_topology() {
        let net = testcases::not_ring(3);
        assert!(matches!(
            Evaluation::new(&net),
            Err(Error::UnsupportedTopology(_))
        ));
    }

    #[test]
    fn test_invalid_netlist() {
        let mut net = Netlist::new("invalid");
        let a = net.add_input("a");
        net.add_output("a", a);
        assert!(matches!(
            Evaluation::new(&net),
            Err(Error::InvalidNetlist(name)) if name == "invalid"
        ));
    }

    #[test]
    fn test_output_arity() {
        let mut net = Netlist::new("two_drivers");
        let a = net.add_input("a");
        let b = net.add_input("b");
        let y = net.add_node("y", NodeType::PrimaryOutput);
        net.connect(a, y);
        net.connect(b, y);
        match Evaluation::new(&net) {
            Err(Error::UnassignedOutput { node, state }) => {
                assert_eq!(node, "y");
                assert_eq!(state, 0);
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_gate_arity() {
        let mut net = Netlist::new("and1");
        let a = net.add_input("a");
        let g = net.add_gate("g", NodeType::And, &[a]);
        net.add_output("y", g);
        assert!(matches!(
            Evaluation::new(&net),
            Err(Error::UnassignedOutput { node, .. }) if node == "g"
        ));
    }

    #[test]
    fn test_self_loop() {
        let mut net = Netlist::new("self_loop");
        let a = net.add_input("a");
        let g = net.add_node("g", NodeType::Or);
        net.connect(a, g);
        net.connect(g, g);
        assert!(matches!(
            Evaluation::new(&net),
            Err(Error::UnassignedOutput { .. })
        ));
    }

    #[test]
    fn test_marker_nodes() {
        let mut net = Netlist::new("markers");
        let a = net.add_input("a");
        let g = net.add_gate("g", NodeType::Not, &[a]);
        let m = net.add_gate("m", NodeType::Output, &[g]);
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.values(m), vec![None, None]);
        assert_eq!(eval.values(g), vec![T, F]);
        let mut buf = Vec::new();
        eval.write_csv(",", &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "a,false,true\ng,true,false\nm,,\n"
        );
    }

    #[test]
    fn test_driven_primary_input() {
        let mut net = Netlist::new("driven_input");
        let a = net.add_input("a");
        let b = net.add_input("b");
        let p = net.add_gate("p", NodeType::PrimaryInput, &[a, b]);
        let y = net.add_output("y", p);
        let eval = Evaluation::new(&net).unwrap();
        assert_eq!(eval.states().len(), 8);
        for (i, state) in eval.states().iter().enumerate() {
            let va = state.get_state(&a).unwrap();
            let vb = state.get_state(&b).unwrap();
            assert_eq!(eval.values(p)[i], Some(va || vb));
            // Readers of a primary input see the state value
            assert_eq!(eval.values(y)[i], state.get_state(&p));
        }
    }

    #[test]
    fn test_comb_random() {
        for seed in 0..30 {
            let net = random::random_comb(4, 25, 4, seed);
            let eval = Evaluation::new(&net).unwrap();
            assert_eq!(eval.states().len(), 16);
            let tables = net.nodes().map(|n| eval.values(n)).collect::<Vec<_>>();
            for i in 0..eval.states().len() {
                let expected = reference_values(&net, &net.primary_inputs(), i);
                for n in net.nodes() {
                    assert_eq!(
                        tables[n.index()][i],
                        Some(expected[n.index()]),
                        "Node {} at state {} for seed {}",
                        net.node_name(n),
                        i,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_latch_random() {
        for seed in 0..40 {
            let net = random::random_latches(3, 12, 2, 3, seed);
            let eval = Evaluation::new(&net).unwrap();
            let latches = eval.latches();
            assert_eq!(latches.len(), 2);
            for k in 0..2 {
                let q = node(&net, &format!("q{k}"));
                let qb = node(&net, &format!("qb{k}"));
                let set = net.fanins(q).next();
                let reset = net.fanins(qb).next();
                assert!(latches.iter().any(|l| {
                    let found = (l.a, l.b, l.in1, l.in2);
                    found == (q, qb, set, reset) || found == (qb, q, reset, set)
                }));
            }

            // Enumerate the free variables without filtering, in the order of the state keys
            let free = eval.states().keys().to_vec();
            assert_eq!(free.len(), 3 + 2 * latches.len());
            let admissible = (0..1usize << free.len())
                .map(|i| reference_values(&net, &free, i))
                .filter(|values| {
                    let high = |n: Option<NodeId>| n.map_or(false, |n| values[n.index()]);
                    latches.iter().all(|l| {
                        values[l.a.index()] != values[l.b.index()] && !(high(l.in1) && high(l.in2))
                    })
                })
                .collect::<Vec<_>>();
            assert_eq!(eval.states().len(), admissible.len(), "Seed {seed}");

            let tables = net.nodes().map(|n| eval.values(n)).collect::<Vec<_>>();
            for (i, expected) in admissible.iter().enumerate() {
                for l in latches {
                    let va = tables[l.a.index()][i];
                    assert_eq!(tables[l.b.index()][i], va.map(|v| !v), "Seed {seed}");
                    let in1 = l.in1.map(|n| tables[n.index()][i]);
                    let in2 = l.in2.map(|n| tables[n.index()][i]);
                    assert!(!(in1 == Some(T) && in2 == Some(T)), "Seed {seed}");
                }
                for n in net.nodes() {
                    assert_eq!(
                        tables[n.index()][i],
                        Some(expected[n.index()]),
                        "Node {} at state {} for seed {}",
                        net.node_name(n),
                        i,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_too_many_variables() {
        let mut net = Netlist::new("wide");
        let inputs = (0..64)
            .map(|i| net.add_input(&format!("i{i}")))
            .collect::<Vec<_>>();
        let g = net.add_gate("g", NodeType::Or, &inputs);
        net.add_output("y", g);
        assert!(matches!(
            Evaluation::new(&net),
            Err(Error::TooManyVariables(64))
        ));
    }

    #[test]
    fn test_deterministic() {
        let net = random::random_comb(3, 20, 3, 7);
        let e1 = Evaluation::new(&net).unwrap();
        let e2 = Evaluation::new(&net).unwrap();
        assert_eq!(e1.states(), e2.states());
        assert_eq!(e1.to_string(), e2.to_string());

        let net = testcases::nor_latch();
        let e1 = Evaluation::new(&net).unwrap();
        let e2 = Evaluation::new(&net).unwrap();
        assert_eq!(e1.states(), e2.states());
        for n in net.nodes() {
            assert_eq!(e1.values(n), e2.values(n));
        }
    }

    #[test]
    fn test_csv() {
        let net = testcases::gate2(NodeType::Xor);
        let eval = Evaluation::new(&net).unwrap();
        let mut buf = Vec::new();
        eval.write_csv(",", &mut buf).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        assert_eq!(txt.lines().count(), net.nb_nodes());
        assert!(txt.lines().any(|l| l == "y,false,true,true,false"));

        let rows = read_truth_csv(txt.as_bytes(), ",").unwrap();
        assert_eq!(rows.len(), net.nb_nodes());
        for (name, values) in rows {
            assert_eq!(values, eval.values(node(&net, &name)));
        }
    }

    #[test]
    fn test_display() {
        let net = testcases::inverter();
        let eval = Evaluation::new(&net).unwrap();
        let txt = eval.to_string();
        let sep = "-".repeat(44);
        assert_eq!(txt.lines().filter(|l| *l == sep).count(), 3);
        assert!(txt.contains("Logic evaluation of inverter"));
        assert!(txt.contains(&format!("{:<15}\tfalse\ttrue\n", "in")));
        assert!(txt.contains(&format!("{:<15}\ttrue\tfalse\n", "out")));
    }
}
