// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for orbit decomposition and regular expression synthesis.
//!
//! The automata are random partial DFAs with up to six states over {a, b}.
//! States are the integers 0 .. n-1, added in increasing order, so state i
//! has index i in the automaton's state table.
//!
//! 1. **Orbit partition**: every state is in exactly one orbit, and two states are
//!    in the same orbit iff they are mutually reachable
//! 2. **Gates**: a state is a gate iff it is final or has an exit edge
//! 3. **Pruning**: removing unreachable states is idempotent and preserves the language
//! 4. **Minimization** preserves the language
//! 5. **Round trip**: when synthesis succeeds, the expression matches exactly
//!    the words accepted by the automaton
//! 6. **Determinism**: for trim automata, the expression is one-unambiguous

use aws_dre::automata::Automaton;
use aws_dre::orbits::Orbits;
use aws_dre::scc::orbit_partition;
use aws_dre::synthesis::Synthesizer;
use proptest::prelude::*;

const ALPHABET: [char; 2] = ['a', 'b'];

// Random DFA with n states: for each state and symbol, an optional successor
fn arb_automaton() -> impl Strategy<Value = Automaton<u32, char>> {
    (1usize..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::option::of(0..n as u32), 2 * n),
            prop::collection::vec(any::<bool>(), n),
        )
            .prop_map(move |(delta, finals)| {
                let mut automaton = Automaton::new(0);
                for i in 1..n as u32 {
                    automaton.add_state(i);
                }
                for (k, target) in delta.iter().enumerate() {
                    if let Some(t) = target {
                        automaton.add_transition((k / 2) as u32, ALPHABET[k % 2], *t);
                    }
                }
                for (i, f) in finals.iter().enumerate() {
                    if *f {
                        automaton.set_accepting(&(i as u32), true);
                    }
                }
                automaton
            })
    })
}

// All words of length at most n over ALPHABET
fn words(n: usize) -> Vec<Vec<char>> {
    let mut result = vec![vec![]];
    let mut start = 0;
    for _ in 0..n {
        let end = result.len();
        for i in start..end {
            for a in ALPHABET {
                let mut w = result[i].clone();
                w.push(a);
                result.push(w);
            }
        }
        start = end;
    }
    result
}

// reachable[i][j] = true if j is reachable from i (in zero or more steps)
fn reachability(automaton: &Automaton<u32, char>) -> Vec<Vec<bool>> {
    let n = automaton.num_states();
    let mut reach = vec![vec![false; n]; n];
    for (i, row) in reach.iter_mut().enumerate() {
        let mut stack = vec![i as u32];
        row[i] = true;
        while let Some(s) = stack.pop() {
            for (_, t) in automaton.transitions_from(&s) {
                if !row[*t as usize] {
                    row[*t as usize] = true;
                    stack.push(*t);
                }
            }
        }
    }
    reach
}

fn to_string(w: &[char]) -> String {
    w.iter().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn orbits_are_mutually_reachable_classes(automaton in arb_automaton()) {
        let n = automaton.num_states();
        let partition = orbit_partition(&automaton);
        prop_assert!(partition.is_complete());

        let total: u32 = partition.blocks().map(|b| partition.block_size(b)).sum();
        prop_assert_eq!(total as usize, n, "Orbits must cover every state once");

        let reach = reachability(&automaton);
        for i in 0..n {
            for j in 0..n {
                let same_orbit = partition.block_id(i as u32) == partition.block_id(j as u32);
                prop_assert_eq!(
                    same_orbit,
                    reach[i][j] && reach[j][i],
                    "States {} and {} in automaton\n{}", i, j, automaton
                );
            }
        }
    }

    #[test]
    fn gates_are_final_or_exit(automaton in arb_automaton()) {
        let orbits = Orbits::decompose(&automaton);
        for s in automaton.states() {
            let orbit = orbits.orbit_of(s).unwrap();
            let exits = automaton
                .transitions_from(s)
                .any(|(_, t)| !orbit.contains(t));
            prop_assert_eq!(orbit.is_gate(s), exits || automaton.is_accepting(s));
            prop_assert_eq!(orbit.exit_edges(s).count() > 0, exits);
        }
    }

    #[test]
    fn remove_unreachable_is_idempotent(automaton in arb_automaton()) {
        let mut pruned = automaton.clone();
        pruned.remove_unreachable();
        let once = pruned.clone();
        pruned.remove_unreachable();
        prop_assert_eq!(&pruned, &once);
        for w in words(5) {
            prop_assert_eq!(automaton.accepts(&w), pruned.accepts(&w));
        }
    }

    #[test]
    fn minimize_preserves_language(automaton in arb_automaton()) {
        let mut minimal = automaton.clone();
        minimal.minimize();
        prop_assert!(minimal.num_states() <= automaton.num_states());
        for w in words(6) {
            prop_assert_eq!(
                automaton.accepts(&w),
                minimal.accepts(&w),
                "Word {:?}\noriginal:\n{}\nminimized:\n{}", to_string(&w), automaton, minimal
            );
        }
    }

    #[test]
    fn synthesized_expression_is_equivalent(automaton in arb_automaton()) {
        if let Ok(regex) = Synthesizer::new(ALPHABET).synthesize_expr(&automaton) {
            let positions = regex.glushkov();
            for w in words(6) {
                prop_assert_eq!(
                    automaton.accepts(&w),
                    positions.matches(&w),
                    "Word {:?} for {}\n{}", to_string(&w), regex, automaton
                );
            }
        }
    }

    #[test]
    fn minimized_synthesis_is_equivalent(automaton in arb_automaton()) {
        let synthesizer = Synthesizer::new(ALPHABET).minimize_input(true);
        if let Ok(regex) = synthesizer.synthesize_expr(&automaton) {
            prop_assert!(regex.is_deterministic(), "{} is not deterministic", regex);
            for w in words(6) {
                prop_assert_eq!(automaton.accepts(&w), regex.matches(&w));
            }
        }
    }

    #[test]
    fn trim_automata_give_deterministic_expressions(automaton in arb_automaton()) {
        let mut trim = automaton.clone();
        trim.remove_unreachable();
        trim.remove_dead_states();
        if let Ok(regex) = Synthesizer::new(ALPHABET).synthesize_expr(&trim) {
            prop_assert!(regex.is_deterministic(), "{} is not deterministic\n{}", regex, trim);
            if trim.num_accepting_states() > 0 {
                prop_assert!(!regex.contains_empty(), "{} contains the empty language", regex);
            }
        }
    }
}
