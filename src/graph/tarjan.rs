use crate::{Netlist, NodeId};

/// Strongly connected components of a netlist, using Tarjan's algorithm
///
/// Components are returned one at a time, in reverse topological order of the condensation:
/// a component is returned before any component that drives it.
/// Within a component, nodes are in the order they were first visited.
pub struct Tarjan {
    components: std::vec::IntoIter<Vec<NodeId>>,
}

/// Bookkeeping for a single run of the algorithm
struct TarjanState<'a> {
    net: &'a Netlist,
    index: Vec<Option<u32>>,
    lowlink: Vec<u32>,
    on_stack: Vec<bool>,
    stack: Vec<NodeId>,
    next_index: u32,
    components: Vec<Vec<NodeId>>,
}

impl<'a> TarjanState<'a> {
    fn new(net: &'a Netlist) -> Self {
        TarjanState {
            net,
            index: vec![None; net.nb_nodes()],
            lowlink: vec![0; net.nb_nodes()],
            on_stack: vec![false; net.nb_nodes()],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn visit(&mut self, v: NodeId) {
        let i = v.index();
        self.index[i] = Some(self.next_index);
        self.lowlink[i] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[i] = true;
    }

    /// Iterative version of the recursive strong_connect, to support deep netlists
    fn strong_connect(&mut self, root: NodeId) {
        let net = self.net;
        self.visit(root);
        let mut call_stack: Vec<(NodeId, Vec<NodeId>, usize)> =
            vec![(root, net.fanouts(root).collect(), 0)];
        while let Some((v, succ, pos)) = call_stack.last_mut() {
            let v = *v;
            if *pos < succ.len() {
                let w = succ[*pos];
                *pos += 1;
                match self.index[w.index()] {
                    None => {
                        self.visit(w);
                        call_stack.push((w, net.fanouts(w).collect(), 0));
                    }
                    Some(w_index) => {
                        if self.on_stack[w.index()] {
                            let low = &mut self.lowlink[v.index()];
                            *low = (*low).min(w_index);
                        }
                    }
                }
            } else {
                call_stack.pop();
                if let Some((u, _, _)) = call_stack.last() {
                    let v_low = self.lowlink[v.index()];
                    let low = &mut self.lowlink[u.index()];
                    *low = (*low).min(v_low);
                }
                if Some(self.lowlink[v.index()]) == self.index[v.index()] {
                    self.pop_component(v);
                }
            }
        }
    }

    fn pop_component(&mut self, root: NodeId) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w.index()] = false;
            component.push(w);
            if w == root {
                break;
            }
        }
        component.reverse();
        self.components.push(component);
    }
}

impl Tarjan {
    /// Compute the strongly connected components of the netlist
    pub fn new(net: &Netlist) -> Self {
        let mut state = TarjanState::new(net);
        for v in net.nodes() {
            if state.index[v.index()].is_none() {
                state.strong_connect(v);
            }
        }
        Tarjan {
            components: state.components.into_iter(),
        }
    }
}

impl Iterator for Tarjan {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Vec<NodeId>> {
        self.components.next()
    }
}

#[cfg(test)]
mod tests {
    use super::Tarjan;
    use crate::netlist::generators::{random, testcases};
    use crate::{Netlist, NodeType};

    #[test]
    fn test_comb() {
        let net = testcases::gate2(NodeType::And);
        let comps = Tarjan::new(&net).collect::<Vec<_>>();
        assert_eq!(comps.len(), net.nb_nodes());
        assert!(comps.iter().all(|c| c.len() == 1));
        // Sinks come first
        let y = net.find("y").unwrap();
        let g = net.find("g").unwrap();
        let pos = |n| comps.iter().position(|c| c[0] == n).unwrap();
        assert!(pos(y) < pos(g));
        assert!(pos(g) < pos(net.find("a").unwrap()));
        assert!(pos(g) < pos(net.find("b").unwrap()));
    }

    #[test]
    fn test_latch() {
        let net = testcases::nor_latch();
        let comps = Tarjan::new(&net).collect::<Vec<_>>();
        assert_eq!(comps.len(), 5);
        let big = comps.iter().find(|c| c.len() > 1).unwrap();
        let q = net.find("q").unwrap();
        let qb = net.find("qb").unwrap();
        assert_eq!(big, &vec![q, qb]);
    }

    #[test]
    fn test_ring() {
        let net = testcases::not_ring(3);
        let comps = Tarjan::new(&net).collect::<Vec<_>>();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].len(), 1);
        assert_eq!(comps[1].len(), 3);
    }

    #[test]
    fn test_self_loop() {
        let mut net = Netlist::new("self_loop");
        let a = net.add_input("a");
        let g = net.add_node("g", NodeType::Or);
        net.connect(a, g);
        net.connect(g, g);
        let comps = Tarjan::new(&net).collect::<Vec<_>>();
        assert_eq!(comps, vec![vec![g], vec![a]]);
    }

    #[test]
    fn test_random_acyclic() {
        for seed in 0..10 {
            let net = random::random_comb(4, 30, 3, seed);
            let nb = Tarjan::new(&net).filter(|c| c.len() == 1).count();
            assert_eq!(nb, net.nb_nodes());
        }
    }
}
