use crate::{Netlist, NodeId};

/// Depth-first traversal of a netlist starting from its sinks
///
/// The traversal walks the graph backwards, from the nodes without fanout to their drivers,
/// and yields each node in post-order: every node comes after all its drivers, except for drivers
/// that close a cycle. Each node is yielded exactly once.
pub struct SinkDfs<'a> {
    net: &'a Netlist,
    visited: Vec<bool>,
    /// Roots still to explore: sinks first, then every node to cover cycles without sinks
    roots: Vec<NodeId>,
    /// Current path, with the position of the next driver to explore
    path: Vec<(NodeId, usize)>,
}

impl<'a> SinkDfs<'a> {
    /// Prepare a traversal of the netlist
    pub fn new(net: &'a Netlist) -> Self {
        let mut roots: Vec<NodeId> = net
            .nodes()
            .filter(|n| net.out_edges(*n).is_empty())
            .chain(net.nodes())
            .collect();
        roots.reverse();
        SinkDfs {
            net,
            visited: vec![false; net.nb_nodes()],
            roots,
            path: Vec::new(),
        }
    }

    fn enter(&mut self, n: NodeId) {
        self.visited[n.index()] = true;
        self.path.push((n, 0));
    }
}

impl<'a> Iterator for SinkDfs<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let net = self.net;
        loop {
            if let Some((v, pos)) = self.path.last_mut() {
                let v = *v;
                let in_edges = net.in_edges(v);
                if *pos < in_edges.len() {
                    let driver = net.edge(in_edges[*pos]).src();
                    *pos += 1;
                    if !self.visited[driver.index()] {
                        self.enter(driver);
                    }
                } else {
                    self.path.pop();
                    return Some(v);
                }
            } else {
                let root = self.roots.pop()?;
                if !self.visited[root.index()] {
                    self.enter(root);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SinkDfs;
    use crate::netlist::generators::{random, testcases};
    use crate::NodeType;

    #[test]
    fn test_inverter() {
        let net = testcases::inverter();
        let order = SinkDfs::new(&net)
            .map(|n| net.node_name(n).to_string())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["in", "g", "out"]);
    }

    #[test]
    fn test_gate2() {
        let net = testcases::gate2(NodeType::Or);
        let order = SinkDfs::new(&net)
            .map(|n| net.node_name(n).to_string())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["a", "b", "g", "y"]);
    }

    #[test]
    fn test_latch_visits_all() {
        let net = testcases::nor_latch();
        let mut order = SinkDfs::new(&net).collect::<Vec<_>>();
        assert_eq!(order.len(), net.nb_nodes());
        order.sort();
        order.dedup();
        assert_eq!(order.len(), net.nb_nodes());
    }

    #[test]
    fn test_ring_without_sink() {
        let mut net = testcases::not_ring(4);
        // Ring nodes are reachable from the output; a second, isolated ring is not
        let a = net.add_node("a", NodeType::Not);
        let b = net.add_node("b", NodeType::Not);
        net.connect(a, b);
        net.connect(b, a);
        assert_eq!(SinkDfs::new(&net).count(), net.nb_nodes());
    }

    #[test]
    fn test_drivers_first() {
        for seed in 0..20 {
            let net = random::random_comb(5, 40, 4, seed);
            let order = SinkDfs::new(&net).collect::<Vec<_>>();
            assert_eq!(order.len(), net.nb_nodes());
            let mut position = vec![usize::MAX; net.nb_nodes()];
            for (i, n) in order.iter().enumerate() {
                assert_eq!(position[n.index()], usize::MAX);
                position[n.index()] = i;
            }
            for n in net.nodes() {
                for f in net.fanins(n) {
                    assert!(position[f.index()] < position[n.index()]);
                }
            }
        }
    }
}
