// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Deterministic finite-state automata
//!
//! An [Automaton] is generic in its states (type `S`) and in its symbols (type `A`).
//! States and symbols are compared by value: two states are the same iff they are equal.
//!
//! The transition function is partial: a state may have no successor for some symbols.
//! There is at most one successor per state and symbol.
//!
//! The invariants of an automaton are maintained by all its operations:
//! - the initial state is a state of the automaton,
//! - all accepting states are states of the automaton,
//! - the source and the target of every transition are states of the automaton.
//!
//! Automata can be constructed directly (see [Automaton::new]), with an [AutomatonBuilder],
//! or from their components with [Automaton::from_parts]. The last two check that the
//! result is deterministic.
//!
//! The internal tables are ordered by insertion, so iterating over states and transitions
//! is deterministic.
//!
use std::{
    collections::BTreeSet,
    fmt::Display,
    hash::Hash,
};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;

use crate::{bfs_queues::BfsQueue, errors::AutomatonError, partitions::Partition};

///
/// Deterministic finite state automaton
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<S, A>
where
    S: Eq + Hash,
    A: Eq + Hash,
{
    // all states
    states: IndexSet<S>,
    // final states: a subset of states
    accepting: IndexSet<S>,
    // initial state
    initial: S,
    // transitions[s] = map from symbols to successors of s
    // only states with at least one successor have an entry
    transitions: IndexMap<S, IndexMap<A, S>>,
}

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    ///
    /// Create an automaton with a single, non-accepting state and no transitions
    ///
    pub fn new(initial: S) -> Self {
        let mut states = IndexSet::new();
        states.insert(initial.clone());
        Automaton {
            states,
            accepting: IndexSet::new(),
            initial,
            transitions: IndexMap::new(),
        }
    }

    ///
    /// Build an automaton from its components
    ///
    /// # Errors
    ///
    /// - [AutomatonError::UnknownInitialState] if `initial` is not in `states`
    /// - [AutomatonError::UnknownAcceptingState] if an accepting state is not in `states`
    /// - [AutomatonError::DanglingTransition] if a transition has a source or a target
    ///   that is not in `states`
    /// - [AutomatonError::NonDeterministic] if two transitions from the same state with the
    ///   same symbol have different targets
    ///
    pub fn from_parts(
        states: impl IntoIterator<Item = S>,
        initial: S,
        accepting: impl IntoIterator<Item = S>,
        transitions: impl IntoIterator<Item = (S, A, S)>,
    ) -> Result<Self, AutomatonError> {
        let states: IndexSet<S> = states.into_iter().collect();
        if !states.contains(&initial) {
            return Err(AutomatonError::UnknownInitialState);
        }
        let mut result = Automaton {
            states,
            accepting: IndexSet::new(),
            initial,
            transitions: IndexMap::new(),
        };
        for s in accepting {
            if !result.set_accepting(&s, true) {
                return Err(AutomatonError::UnknownAcceptingState);
            }
        }
        for (source, symbol, target) in transitions {
            if !result.contains_state(&source) || !result.contains_state(&target) {
                return Err(AutomatonError::DanglingTransition);
            }
            if let Some(previous) = result.add_transition(source, symbol, target.clone()) {
                if previous != target {
                    return Err(AutomatonError::NonDeterministic);
                }
            }
        }
        Ok(result)
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of final states
    pub fn num_accepting_states(&self) -> usize {
        self.accepting.len()
    }

    /// Number of transitions
    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(|succ| succ.len()).sum()
    }

    /// Check whether the automaton has at least one transition
    pub fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Get the initial state
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Iterator to go through the states, in insertion order
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    /// Iterator to list the final states
    pub fn accepting_states(&self) -> impl Iterator<Item = &S> {
        self.accepting.iter()
    }

    /// Check whether s is a state of this automaton
    pub fn contains_state(&self, s: &S) -> bool {
        self.states.contains(s)
    }

    /// Check whether a state is final
    pub fn is_accepting(&self, s: &S) -> bool {
        self.accepting.contains(s)
    }

    ///
    /// Add a state
    /// - return true if the state is new
    ///
    pub fn add_state(&mut self, s: S) -> bool {
        self.states.insert(s)
    }

    ///
    /// Set the initial state
    /// - the state is added if it's not already present
    ///
    pub fn set_initial_state(&mut self, s: S) {
        self.states.insert(s.clone());
        self.initial = s;
    }

    ///
    /// Mark or unmark a final state
    /// - return false and do nothing if s is not a state of this automaton
    /// - return true otherwise
    ///
    pub fn set_accepting(&mut self, s: &S, accepting: bool) -> bool {
        if !self.states.contains(s) {
            return false;
        }
        if accepting {
            self.accepting.insert(s.clone());
        } else {
            self.accepting.shift_remove(s);
        }
        true
    }

    ///
    /// Add a transition
    ///
    /// The source and target states are added if they're not present.
    /// If there's already a transition from source on symbol, it is replaced
    /// and the previous target is returned.
    ///
    pub fn add_transition(&mut self, source: S, symbol: A, target: S) -> Option<S> {
        self.states.insert(source.clone());
        self.states.insert(target.clone());
        self.transitions
            .entry(source)
            .or_default()
            .insert(symbol, target)
    }

    ///
    /// Remove the transition from source on symbol
    /// - return the target of the removed transition or None if there's no such transition
    ///
    pub fn remove_transition(&mut self, source: &S, symbol: &A) -> Option<S> {
        let succ = self.transitions.get_mut(source)?;
        let target = succ.shift_remove(symbol);
        if succ.is_empty() {
            self.transitions.shift_remove(source);
        }
        target
    }

    ///
    /// Remove a state and all transitions to or from this state
    /// - return false if s is not a state of this automaton
    ///
    /// # Errors
    ///
    /// The initial state can't be removed: this returns [AutomatonError::RemoveInitialState].
    ///
    pub fn remove_state(&mut self, s: &S) -> Result<bool, AutomatonError> {
        if *s == self.initial {
            return Err(AutomatonError::RemoveInitialState);
        }
        if !self.states.contains(s) {
            return Ok(false);
        }
        self.retain_states(|x| x != s);
        Ok(true)
    }

    ///
    /// Successor of a state via a symbol
    ///
    pub fn step(&self, s: &S, symbol: &A) -> Option<&S> {
        self.transitions.get(s)?.get(symbol)
    }

    ///
    /// Iterator to list the out edges of a state
    ///
    /// The iterator produces pairs (symbol, successor).
    ///
    pub fn transitions_from<'a>(&'a self, s: &S) -> impl Iterator<Item = (&'a A, &'a S)> {
        self.transitions.get(s).into_iter().flat_map(|succ| succ.iter())
    }

    ///
    /// Iterator to list all transitions as triples (source, symbol, target)
    ///
    pub fn transitions(&self) -> impl Iterator<Item = (&S, &A, &S)> {
        self.transitions
            .iter()
            .flat_map(|(s, succ)| succ.iter().map(move |(a, t)| (s, a, t)))
    }

    ///
    /// Successor of a state via a word
    /// - return None if the word leaves the automaton (i.e., a transition is undefined)
    ///
    pub fn word_next<'a>(&'a self, s: &'a S, word: impl IntoIterator<Item = &'a A>) -> Option<&'a S>
    where
        A: 'a,
    {
        word.into_iter()
            .try_fold(s, |current, symbol| self.step(current, symbol))
    }

    /// Check whether a word is accepted
    pub fn accepts<'a>(&'a self, word: impl IntoIterator<Item = &'a A>) -> bool
    where
        A: 'a,
    {
        self.word_next(&self.initial, word)
            .map_or(false, |s| self.is_accepting(s))
    }

    ///
    /// Position of a state in the state table.
    ///
    /// Indices are between 0 and num_states - 1. They remain valid until
    /// the automaton is modified.
    ///
    pub(crate) fn state_index(&self, s: &S) -> Option<u32> {
        self.states.get_index_of(s).map(|i| i as u32)
    }

    /// State of the given index
    pub(crate) fn state_at(&self, i: u32) -> &S {
        &self.states[i as usize]
    }

    ///
    /// Successor graph on state indices (symbols are ignored)
    /// - result[i] = indices of the successors of state i
    ///
    pub(crate) fn successor_graph(&self) -> Vec<Vec<u32>> {
        self.states
            .iter()
            .map(|s| {
                self.transitions_from(s)
                    .filter_map(|(_, t)| self.state_index(t))
                    .collect()
            })
            .collect()
    }

    //
    // Keep the states that satisfy keep, remove the others
    // together with their transitions.
    // keep must be true for the initial state.
    //
    fn retain_states(&mut self, keep: impl Fn(&S) -> bool) {
        debug_assert!(keep(&self.initial));
        self.states.retain(|s| keep(s));
        self.accepting.retain(|s| keep(s));
        self.transitions.retain(|s, _| keep(s));
        for succ in self.transitions.values_mut() {
            succ.retain(|_, t| keep(t));
        }
        self.transitions.retain(|_, succ| !succ.is_empty());
    }

    /// Remove unreachable states
    pub fn remove_unreachable(&mut self) {
        let mut queue = BfsQueue::new(self.initial.clone());
        while let Some(s) = queue.pop() {
            for (_, next) in self.transitions_from(&s) {
                queue.push(next.clone());
            }
        }
        let reachable = queue.visited();
        if reachable.len() < self.states.len() {
            self.retain_states(|s| reachable.contains(s));
        }
    }

    ///
    /// Copy of this automaton with initial state s, restricted to the states
    /// reachable from s
    /// - s is added if it's not a state of this automaton
    ///
    pub fn rooted_at(&self, s: &S) -> Self {
        let mut result = self.clone();
        result.set_initial_state(s.clone());
        result.remove_unreachable();
        result
    }

    ///
    /// Remove the dead states
    ///
    /// A state is dead if no final state can be reached from it.
    /// The initial state is never removed, even if it is dead.
    ///
    pub fn remove_dead_states(&mut self) {
        let live: IndexSet<S> = {
            let mut predecessors: FxHashMap<&S, Vec<&S>> = FxHashMap::default();
            for (s, _, t) in self.transitions() {
                predecessors.entry(t).or_default().push(s);
            }
            let mut finals = self.accepting.iter();
            match finals.next() {
                None => IndexSet::new(),
                Some(f) => {
                    let mut queue = BfsQueue::new(f);
                    queue.push_all(finals);
                    while let Some(s) = queue.pop() {
                        if let Some(pre) = predecessors.get(s) {
                            queue.push_all(pre.iter().copied());
                        }
                    }
                    queue.visited().into_iter().cloned().collect()
                }
            }
        };
        let initial = self.initial.clone();
        if live.len() < self.states.len() {
            self.retain_states(|s| *s == initial || live.contains(s));
        }
    }

    ///
    /// Minimize the automaton
    ///
    /// Unreachable and dead states are removed first, then equivalent states are
    /// merged. Each class of equivalent states is represented by the state of that class
    /// that comes first in the state table.
    ///
    pub fn minimize(&mut self)
    where
        A: Ord,
    {
        self.remove_unreachable();
        self.remove_dead_states();

        let alphabet: Vec<A> = self.alphabet().into_iter().collect();
        let n = self.num_states() as u32;

        // delta[i][k] = 1 + index of the successor of state i via alphabet[k]
        // or 0 if there's no successor
        let delta: Vec<Vec<u32>> = self
            .states
            .iter()
            .map(|s| {
                alphabet
                    .iter()
                    .map(|a| {
                        self.step(s, a)
                            .and_then(|t| self.state_index(t))
                            .map_or(0, |j| j + 1)
                    })
                    .collect()
            })
            .collect();

        let mut p = Partition::empty(n);
        p.add_block((0..n).filter(|&i| self.is_accepting(self.state_at(i))));
        p.add_block((0..n).filter(|&i| !self.is_accepting(self.state_at(i))));
        loop {
            let block_of: Vec<u32> = (0..n).map(|i| p.block_id(i)).collect();
            let changed = p.refine(|i| {
                delta[i as usize]
                    .iter()
                    .map(|&j| if j == 0 { 0 } else { block_of[j as usize - 1] })
                    .collect::<Vec<u32>>()
            });
            if !changed {
                break;
            }
        }

        if (p.index() as usize) < self.num_states() {
            for b in p.blocks() {
                p.sort_block(b);
            }
            let rep = |i: u32| p.pick_element(p.block_id(i));
            let mut result = Automaton::new(self.state_at(rep(self.initial_index())).clone());
            for i in (0..n).filter(|&i| rep(i) == i) {
                let s = self.state_at(i);
                result.add_state(s.clone());
                if self.is_accepting(s) {
                    result.set_accepting(s, true);
                }
                for (a, t) in self.transitions_from(s) {
                    if let Some(j) = self.state_index(t) {
                        result.add_transition(s.clone(), a.clone(), self.state_at(rep(j)).clone());
                    }
                }
            }
            *self = result;
        }
    }

    // index of the initial state
    fn initial_index(&self) -> u32 {
        // the initial state is always in the state table
        self.state_index(&self.initial).unwrap_or(0)
    }

    ///
    /// Set of symbols that label at least one transition
    ///
    pub fn alphabet(&self) -> BTreeSet<A>
    where
        A: Ord,
    {
        self.transitions().map(|(_, a, _)| a.clone()).collect()
    }
}

impl<S, A> Display for Automaton<S, A>
where
    S: Clone + Eq + Hash + Display,
    A: Clone + Eq + Hash + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn plural(n: usize) -> &'static str {
            if n == 1 {
                ""
            } else {
                "s"
            }
        }

        let n = self.num_states();
        writeln!(f, "{} state{}", n, plural(n))?;
        writeln!(f, "initial state: {}", self.initial)?;
        write!(f, "final state{}:", plural(self.num_accepting_states()))?;
        for s in self.accepting_states() {
            write!(f, " {s}")?;
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for (s, a, d) in self.transitions() {
            writeln!(f, "  \u{03B4}({s}, {a}) = {d}")?;
        }
        Ok(())
    }
}

///
/// Automaton builder
///
/// The builder collects states, final states and transitions.
/// Conflicting transitions are detected when the automaton is built.
///
#[derive(Debug)]
pub struct AutomatonBuilder<S, A> {
    initial: S,
    states: Vec<S>,
    finals: Vec<S>,
    transitions: Vec<(S, A, S)>,
}

impl<S, A> AutomatonBuilder<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    ///
    /// Create a new builder
    ///
    /// - initial_state = initial state for the resulting automaton
    ///
    pub fn new(initial_state: &S) -> Self {
        AutomatonBuilder {
            initial: initial_state.clone(),
            states: Vec::new(),
            finals: Vec::new(),
            transitions: Vec::new(),
        }
    }

    ///
    /// Add a state (needed only for states without transitions)
    ///
    pub fn add_state(&mut self, state: &S) -> &mut Self {
        self.states.push(state.clone());
        self
    }

    ///
    /// Mark a final state
    ///
    pub fn mark_final(&mut self, state: &S) -> &mut Self {
        self.finals.push(state.clone());
        self
    }

    ///
    /// Add a transition
    ///
    pub fn add_transition(&mut self, state: &S, symbol: &A, next: &S) -> &mut Self {
        self.transitions
            .push((state.clone(), symbol.clone(), next.clone()));
        self
    }

    ///
    /// Construct an automaton
    /// - fails with [AutomatonError::NonDeterministic] if a state has two transitions
    ///   with the same symbol and distinct targets.
    ///
    pub fn build(&self) -> Result<Automaton<S, A>, AutomatonError> {
        let states = std::iter::once(self.initial.clone())
            .chain(self.states.iter().cloned())
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|(s, _, t)| [s.clone(), t.clone()]),
            )
            .chain(self.finals.iter().cloned());
        Automaton::from_parts(
            states,
            self.initial.clone(),
            self.finals.iter().cloned(),
            self.transitions.iter().cloned(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    //
    // Test automaton:
    // 6 states
    // state 0 is the initial state
    // state 3 is the only final state
    // states 4 and 5 are not reachable
    //
    // transitions:
    //   0 --a--> 0
    //   0 --b--> 1
    //   0 --c--> 2
    //   1 --a--> 3
    //   1 --c--> 2
    //   2 --b--> 3
    //   2 --c--> 3
    //   3 --a--> 0
    //   3 --b--> 1
    //   3 --c--> 3
    //   4 --a--> 5
    //   5 --a--> 3
    //
    fn graph() -> Vec<(u32, char, u32)> {
        vec![
            (0, 'a', 0),
            (0, 'b', 1),
            (0, 'c', 2),
            (1, 'a', 3),
            (1, 'c', 2),
            (2, 'b', 3),
            (2, 'c', 3),
            (3, 'a', 0),
            (3, 'b', 1),
            (3, 'c', 3),
            (4, 'a', 5),
            (5, 'a', 3),
        ]
    }

    fn build_graph() -> Automaton<u32, char> {
        let mut builder = AutomatonBuilder::new(&0);
        for (source, label, dest) in &graph() {
            builder.add_transition(source, label, dest);
        }
        builder.mark_final(&3);
        builder.build().unwrap()
    }

    fn word(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_builder() {
        let automaton = build_graph();
        println!("{automaton}");

        assert_eq!(automaton.num_states(), 6);
        assert_eq!(automaton.num_transitions(), 12);
        assert_eq!(automaton.num_accepting_states(), 1);
        assert_eq!(*automaton.initial_state(), 0);

        assert_eq!(automaton.step(&0, &'a'), Some(&0));
        assert_eq!(automaton.step(&0, &'b'), Some(&1));
        assert_eq!(automaton.step(&1, &'b'), None);
        assert_eq!(automaton.step(&2, &'c'), Some(&3));
        assert!(automaton.is_accepting(&3));
        assert!(!automaton.is_accepting(&2));

        let mut out: Vec<(char, u32)> = automaton
            .transitions_from(&3)
            .map(|(a, t)| (*a, *t))
            .collect();
        out.sort_unstable();
        assert_eq!(out, vec![('a', 0), ('b', 1), ('c', 3)]);

        assert!(automaton.accepts(&word("ba")));
        assert!(automaton.accepts(&word("aacbcc")));
        assert!(!automaton.accepts(&word("")));
        assert!(!automaton.accepts(&word("bb")));
        assert!(!automaton.accepts(&word("bd")));

        let alphabet: Vec<char> = automaton.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_non_deterministic() {
        let mut builder = AutomatonBuilder::new(&0);
        builder
            .add_transition(&0, &'a', &1)
            .add_transition(&0, &'a', &1)
            .mark_final(&1);
        // a repeated transition is fine
        assert!(builder.build().is_ok());

        builder.add_transition(&0, &'a', &2);
        assert_eq!(builder.build(), Err(AutomatonError::NonDeterministic));
    }

    #[test]
    fn test_from_parts() {
        let ok = Automaton::from_parts(vec![0, 1], 0, vec![1], vec![(0, 'a', 1)]);
        assert!(ok.is_ok());

        let bad_initial = Automaton::from_parts(vec![0, 1], 2, vec![1], vec![(0, 'a', 1)]);
        assert_eq!(bad_initial, Err(AutomatonError::UnknownInitialState));

        let bad_final = Automaton::from_parts(vec![0, 1], 0, vec![3], vec![(0, 'a', 1)]);
        assert_eq!(bad_final, Err(AutomatonError::UnknownAcceptingState));

        let dangling = Automaton::from_parts(vec![0, 1], 0, vec![1], vec![(0, 'a', 2)]);
        assert_eq!(dangling, Err(AutomatonError::DanglingTransition));

        let conflict =
            Automaton::from_parts(vec![0, 1], 0, vec![1], vec![(0, 'a', 1), (0, 'a', 0)]);
        assert_eq!(conflict, Err(AutomatonError::NonDeterministic));
    }

    #[test]
    fn test_overwrite_and_remove() {
        let mut automaton = Automaton::new(0);
        assert_eq!(automaton.add_transition(0, 'a', 1), None);
        assert_eq!(automaton.add_transition(0, 'a', 2), Some(1));
        assert_eq!(automaton.step(&0, &'a'), Some(&2));
        assert_eq!(automaton.num_states(), 3);

        // unknown states can't be accepting
        assert!(!automaton.set_accepting(&7, true));
        assert!(automaton.set_accepting(&2, true));
        assert!(automaton.accepts(&['a']));
        assert!(automaton.set_accepting(&2, false));
        assert!(!automaton.accepts(&['a']));

        assert_eq!(automaton.remove_transition(&0, &'a'), Some(2));
        assert_eq!(automaton.remove_transition(&0, &'a'), None);
        assert!(!automaton.has_transitions());

        automaton.add_transition(1, 'b', 2);
        automaton.set_accepting(&2, true);
        assert_eq!(automaton.remove_state(&0), Err(AutomatonError::RemoveInitialState));
        assert_eq!(automaton.remove_state(&2), Ok(true));
        assert_eq!(automaton.remove_state(&2), Ok(false));
        assert_eq!(automaton.num_states(), 2);
        assert_eq!(automaton.num_transitions(), 0);
        assert_eq!(automaton.num_accepting_states(), 0);

        automaton.set_initial_state(5);
        assert_eq!(*automaton.initial_state(), 5);
        assert!(automaton.contains_state(&5));
    }

    #[test]
    fn test_remove_unreachable() {
        let mut automaton = build_graph();
        automaton.remove_unreachable();
        println!("After removing unreachable states:\n{automaton}");

        assert_eq!(automaton.num_states(), 4);
        assert_eq!(automaton.num_transitions(), 10);
        assert!(!automaton.contains_state(&4));
        assert!(!automaton.contains_state(&5));

        let once = automaton.clone();
        automaton.remove_unreachable();
        assert_eq!(automaton, once);

        // every state is reachable from 4
        let rooted = build_graph().rooted_at(&4);
        assert_eq!(*rooted.initial_state(), 4);
        assert_eq!(rooted.num_states(), 6);
        let rooted = build_graph().rooted_at(&2);
        assert_eq!(rooted.num_states(), 4);
        assert!(!rooted.contains_state(&4));
        assert!(rooted.accepts(&word("b")));
    }

    #[test]
    fn test_remove_dead_states() {
        // 2 and 3 can't reach the final state 1
        let mut builder = AutomatonBuilder::new(&0);
        builder
            .add_transition(&0, &'a', &1)
            .add_transition(&0, &'b', &2)
            .add_transition(&2, &'a', &3)
            .add_transition(&3, &'a', &2)
            .mark_final(&1);
        let mut automaton = builder.build().unwrap();
        automaton.remove_dead_states();
        println!("After removing dead states:\n{automaton}");

        assert_eq!(automaton.num_states(), 2);
        assert_eq!(automaton.step(&0, &'b'), None);
        assert!(automaton.accepts(&['a']));

        // the initial state is kept even when the language is empty
        let mut empty: Automaton<u32, char> = Automaton::new(0);
        empty.add_transition(0, 'a', 1);
        empty.remove_dead_states();
        assert_eq!(empty.num_states(), 1);
        assert!(!empty.has_transitions());
    }

    #[test]
    fn test_minimizer() {
        let builder = &mut AutomatonBuilder::new(&0);

        // language abc(a*)
        builder.add_transition(&0, &'a', &1);
        builder.add_transition(&1, &'b', &2);
        builder.add_transition(&2, &'c', &3);

        // states 3, 4, 5 are equivalent
        builder.add_transition(&3, &'a', &4);
        builder.mark_final(&3);

        builder.add_transition(&4, &'a', &5);
        builder.mark_final(&4);

        builder.add_transition(&5, &'a', &3);
        builder.mark_final(&5);

        // 6 is dead
        builder.add_transition(&1, &'a', &6);
        builder.add_transition(&6, &'a', &6);

        let automaton = &mut builder.build().unwrap();
        println!("{automaton}");
        let original = automaton.clone();

        automaton.minimize();
        println!("After minimization:\n{automaton}");

        assert_eq!(automaton.num_states(), 4);
        assert_eq!(automaton.num_accepting_states(), 1);
        assert_eq!(automaton.step(&3, &'a'), Some(&3));

        for w in ["", "a", "ab", "abc", "abca", "abcaaaa", "abcb", "aa", "aaa"] {
            let w = word(w);
            assert_eq!(automaton.accepts(&w), original.accepts(&w));
        }
    }
}
