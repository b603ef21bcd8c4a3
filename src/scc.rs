// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Strongly connected components of an automaton
//!
//! The components are computed with Tarjan's algorithm on the graph of states,
//! where there's an edge from s to t if there's a transition from s to t
//! for some symbol.
//!
//! The result is a [Partition] of the state indices of the automaton: every state
//! belongs to exactly one component. A state that's not on a cycle forms a singleton
//! component.
//!

use std::hash::Hash;

use tracing::trace;

use crate::{automata::Automaton, partitions::Partition};

// marker for states not visited yet
const UNVISITED: u32 = u32::MAX;

//
// Working state for one run of Tarjan's algorithm
// - index[v] = discovery index of v or UNVISITED
// - lowlink[v] = smallest index reachable from v through
//   the DFS subtree of v and at most one back edge
// - stack = Tarjan's stack of nodes
// - calls = explicit DFS call stack: pairs (node, number of successors explored so far)
//
#[derive(Debug)]
struct Tarjan<'a> {
    successors: &'a [Vec<u32>],
    counter: u32,
    index: Vec<u32>,
    lowlink: Vec<u32>,
    on_stack: Vec<bool>,
    stack: Vec<u32>,
    calls: Vec<(u32, usize)>,
    components: Partition,
}

impl<'a> Tarjan<'a> {
    fn new(successors: &'a [Vec<u32>]) -> Self {
        let n = successors.len();
        Tarjan {
            successors,
            counter: 0,
            index: vec![UNVISITED; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            calls: Vec::new(),
            components: Partition::empty(n as u32),
        }
    }

    // assign the next index to v and push it
    fn visit(&mut self, v: u32) {
        let i = v as usize;
        self.index[i] = self.counter;
        self.lowlink[i] = self.counter;
        self.counter += 1;
        self.stack.push(v);
        self.on_stack[i] = true;
        self.calls.push((v, 0));
    }

    // v is the root of a component: pop it from the stack
    fn pop_component(&mut self, v: u32) {
        let mut k = self.stack.len();
        loop {
            k -= 1;
            let w = self.stack[k];
            self.on_stack[w as usize] = false;
            if w == v {
                break;
            }
        }
        let block = self.components.add_block(self.stack.drain(k..));
        trace!(block, size = self.components.block_size(block), "orbit found");
    }

    // depth-first exploration from root
    fn explore(&mut self, root: u32) {
        self.visit(root);
        while let Some(&(v, next)) = self.calls.last() {
            let vi = v as usize;
            if let Some(&w) = self.successors[vi].get(next) {
                if let Some(top) = self.calls.last_mut() {
                    top.1 += 1;
                }
                let wi = w as usize;
                if self.index[wi] == UNVISITED {
                    self.visit(w);
                } else if self.on_stack[wi] {
                    self.lowlink[vi] = self.lowlink[vi].min(self.index[wi]);
                }
            } else {
                // all successors of v are explored
                self.calls.pop();
                if let Some(&(u, _)) = self.calls.last() {
                    let ui = u as usize;
                    self.lowlink[ui] = self.lowlink[ui].min(self.lowlink[vi]);
                }
                if self.lowlink[vi] == self.index[vi] {
                    self.pop_component(v);
                }
            }
        }
    }

    fn run(mut self) -> Partition {
        for v in 0..self.successors.len() as u32 {
            if self.index[v as usize] == UNVISITED {
                self.explore(v);
            }
        }
        debug_assert!(self.stack.is_empty() && self.components.is_complete());
        self.components
    }
}

///
/// Strongly connected components of a graph
/// - the graph has n nodes [0 .. n-1] where n = successors.len()
/// - successors[i] lists the successors of node i
///
/// Components are added to the partition in the order Tarjan's algorithm finds them:
/// a component is added after all the components reachable from it.
///
pub fn strongly_connected_components(successors: &[Vec<u32>]) -> Partition {
    Tarjan::new(successors).run()
}

///
/// Orbits of an automaton
///
/// The partition's elements are state indices: element i is the i-th state in
/// the automaton's state table (see [Automaton::states]).
///
pub fn orbit_partition<S, A>(automaton: &Automaton<S, A>) -> Partition
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let successors = automaton.successor_graph();
    strongly_connected_components(&successors)
}

#[cfg(test)]
mod test {
    use super::*;

    // check that p is a partition of [0 .. n-1]
    fn check_partition(p: &Partition, n: u32) {
        let mut seen = vec![false; n as usize];
        for b in p.blocks() {
            for x in p.block_elements(b) {
                assert!(!seen[x as usize], "element {x} is in two blocks");
                seen[x as usize] = true;
                assert_eq!(p.block_id(x), b);
            }
        }
        assert!(seen.iter().all(|x| *x));
    }

    fn sorted_blocks(p: &mut Partition) -> Vec<Vec<u32>> {
        let ids: Vec<u32> = p.blocks().collect();
        let mut result = Vec::new();
        for b in ids {
            p.sort_block(b);
            result.push(p.block_elements(b).collect::<Vec<_>>());
        }
        result.sort();
        result
    }

    #[test]
    fn test_graph() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 -> 4 -> 3, 5 -> 5, 6
        let g = vec![
            vec![1],
            vec![2],
            vec![0, 3],
            vec![4],
            vec![3],
            vec![5],
            vec![],
        ];
        let mut p = strongly_connected_components(&g);
        println!("Components:\n{p}");
        check_partition(&p, 7);
        assert_eq!(p.index(), 4);
        assert_eq!(
            sorted_blocks(&mut p),
            vec![vec![0, 1, 2], vec![3, 4], vec![5], vec![6]]
        );
        // {3, 4} is found before {0, 1, 2}
        assert!(p.block_id(3) < p.block_id(0));
    }

    #[test]
    fn test_empty_graph() {
        let p = strongly_connected_components(&[]);
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn test_long_chain() {
        // deep enough to overflow a recursive implementation
        let n = 200_000;
        let mut g: Vec<Vec<u32>> = (0..n).map(|i| vec![i + 1]).collect();
        g.push(vec![0]);
        let p = strongly_connected_components(&g);
        assert_eq!(p.index(), 1);
        assert_eq!(p.block_size(1), n + 1);
    }

    #[test]
    fn test_automaton_orbits() {
        let mut automaton = Automaton::new(0);
        automaton.add_transition(0, 'b', 0);
        automaton.add_transition(0, 'a', 1);
        let p = orbit_partition(&automaton);
        check_partition(&p, 2);
        assert_eq!(p.index(), 2);

        automaton.add_transition(1, 'b', 0);
        automaton.add_transition(1, 'a', 1);
        let p = orbit_partition(&automaton);
        check_partition(&p, 2);
        assert_eq!(p.index(), 1);
    }
}
