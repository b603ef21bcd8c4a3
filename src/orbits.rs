// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Orbits and gates
//!
//! The orbits of an automaton are its strongly connected components:
//! two states are in the same orbit if each is reachable from the other.
//!
//! A gate of an orbit O is a state q of O such that
//! - q is a final state of the automaton, or
//! - there is a transition from q to a state outside O.
//!
//! For each orbit, we keep:
//! - the orbit automaton: the states of O with the transitions between states of O.
//!   The gates of O are the final states of this automaton.
//! - the set of gates of O
//! - the exit edges of every gate: the transitions that leave O
//!
//! The BKW algorithm requires the *orbit property*: all gates of an orbit must be
//! equivalent, that is, either all final or all non-final, and with the same exit
//! edges. See [Orbits::has_orbit_property].
//!

use std::{fmt::Display, hash::Hash};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{automata::Automaton, partitions::Partition, scc::orbit_partition};

///
/// An orbit of an automaton
///
#[derive(Debug, Clone)]
pub struct Orbit<S, A>
where
    S: Eq + Hash,
    A: Eq + Hash,
{
    // states of the orbit and internal transitions; gates are final
    automaton: Automaton<S, A>,
    // gates of the orbit
    gates: IndexSet<S>,
    // exits[q] = transitions that leave the orbit from q (as pairs symbol, target)
    // only gates with at least one exit edge have an entry
    exits: IndexMap<S, IndexSet<(A, S)>>,
}

///
/// Orbit decomposition of an automaton
///
#[derive(Debug, Clone)]
pub struct Orbits<S, A>
where
    S: Eq + Hash,
    A: Eq + Hash,
{
    orbits: Vec<Orbit<S, A>>,
    // orbit_of[s] = index of the orbit that contains s in the orbits vector
    orbit_of: FxHashMap<S, usize>,
    // index of the orbit that contains the initial state
    initial: usize,
}

impl<S, A> Orbit<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Number of states in this orbit
    pub fn len(&self) -> usize {
        self.automaton.num_states()
    }

    /// Check whether this orbit has no states
    pub fn is_empty(&self) -> bool {
        self.automaton.num_states() == 0
    }

    /// Iterator to go through the states of this orbit
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.automaton.states()
    }

    /// Check whether s belongs to this orbit
    pub fn contains(&self, s: &S) -> bool {
        self.automaton.contains_state(s)
    }

    /// Iterator to go through the gates
    pub fn gates(&self) -> impl Iterator<Item = &S> {
        self.gates.iter()
    }

    /// Check whether s is a gate of this orbit
    pub fn is_gate(&self, s: &S) -> bool {
        self.gates.contains(s)
    }

    ///
    /// Orbit automaton
    ///
    /// Its states are the states of this orbit, its transitions are the transitions
    /// between states of this orbit, and its final states are the gates.
    /// The initial state is an arbitrary state of the orbit.
    ///
    pub fn automaton(&self) -> &Automaton<S, A> {
        &self.automaton
    }

    ///
    /// Orbit automaton with initial state q
    /// - q must belong to this orbit
    ///
    pub fn rooted_at(&self, q: &S) -> Automaton<S, A> {
        debug_assert!(self.contains(q));
        let mut result = self.automaton.clone();
        result.set_initial_state(q.clone());
        result
    }

    ///
    /// Edges that leave the orbit from state q, as pairs (symbol, target)
    ///
    pub fn exit_edges<'a>(&'a self, q: &S) -> impl Iterator<Item = (&'a A, &'a S)> {
        self.exits
            .get(q)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(a, t)| (a, t)))
    }

    ///
    /// State reached by leaving this orbit via a symbol
    ///
    /// This searches the exit edges of all gates and returns the target of the first
    /// edge labeled by symbol. The result is unique if the orbit property holds.
    ///
    pub fn exit_target(&self, symbol: &A) -> Option<&S> {
        self.exits
            .values()
            .flat_map(|edges| edges.iter())
            .find(|(a, _)| a == symbol)
            .map(|(_, t)| t)
    }

    ///
    /// Check whether a gate of this orbit is a final state of automaton
    ///
    pub fn has_accepting_gate(&self, automaton: &Automaton<S, A>) -> bool {
        self.gates.iter().any(|q| automaton.is_accepting(q))
    }

    // check whether two gates have the same exit edges
    fn same_exits(&self, q1: &S, q2: &S) -> bool {
        match (self.exits.get(q1), self.exits.get(q2)) {
            (None, None) => true,
            (Some(e1), Some(e2)) => e1 == e2,
            _ => false,
        }
    }
}

impl<S, A> Orbits<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    ///
    /// Compute the orbits of an automaton
    ///
    pub fn decompose(automaton: &Automaton<S, A>) -> Self {
        let partition = orbit_partition(automaton);
        Self::build(automaton, &partition)
    }

    ///
    /// Build the orbits, gates, and orbit automata from a partition of the states
    ///
    /// The partition's elements must be the state indices of the automaton
    /// (see [orbit_partition]). Orbits are stored in the partition's block order.
    ///
    pub fn build(automaton: &Automaton<S, A>, partition: &Partition) -> Self {
        let mut orbits = Vec::with_capacity(partition.index() as usize);
        let mut orbit_of = FxHashMap::default();
        for b in partition.blocks() {
            let k = orbits.len();
            let mut states = partition.block_elements(b).map(|i| automaton.state_at(i));
            let Some(first) = states.next() else {
                continue;
            };
            let mut orbit_automaton = Automaton::new(first.clone());
            orbit_of.insert(first.clone(), k);
            for s in states {
                orbit_automaton.add_state(s.clone());
                orbit_of.insert(s.clone(), k);
            }
            orbits.push(Orbit {
                automaton: orbit_automaton,
                gates: IndexSet::new(),
                exits: IndexMap::new(),
            });
        }

        for (s, a, t) in automaton.transitions() {
            if let (Some(&k), Some(&l)) = (orbit_of.get(s), orbit_of.get(t)) {
                let orbit = &mut orbits[k];
                if k == l {
                    orbit.automaton.add_transition(s.clone(), a.clone(), t.clone());
                } else {
                    orbit.gates.insert(s.clone());
                    orbit
                        .exits
                        .entry(s.clone())
                        .or_default()
                        .insert((a.clone(), t.clone()));
                }
            }
        }

        for s in automaton.accepting_states() {
            if let Some(&k) = orbit_of.get(s) {
                orbits[k].gates.insert(s.clone());
            }
        }

        for orbit in orbits.iter_mut() {
            for q in orbit.gates.iter() {
                orbit.automaton.set_accepting(q, true);
            }
        }

        let initial = orbit_of
            .get(automaton.initial_state())
            .copied()
            .unwrap_or(0);

        Orbits {
            orbits,
            orbit_of,
            initial,
        }
    }

    /// Number of orbits
    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    /// Check whether there are no orbits
    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    /// Iterator to go through the orbits
    pub fn iter(&self) -> impl Iterator<Item = &Orbit<S, A>> {
        self.orbits.iter()
    }

    /// Orbit that contains s
    pub fn orbit_of(&self, s: &S) -> Option<&Orbit<S, A>> {
        self.orbit_of.get(s).map(|&k| &self.orbits[k])
    }

    /// Orbit that contains the initial state
    pub fn initial_orbit(&self) -> &Orbit<S, A> {
        &self.orbits[self.initial]
    }

    ///
    /// Check the orbit property
    ///
    /// For every orbit O and gates q1 and q2 of O:
    /// - q1 is final iff q2 is final
    /// - q1 and q2 have the same exit edges: for every symbol a and state q outside O,
    ///   there's a transition q1 --a--> q iff there's a transition q2 --a--> q.
    ///
    /// The conditions are equivalences, so it's enough to compare every gate with
    /// the first one.
    ///
    pub fn has_orbit_property(&self, automaton: &Automaton<S, A>) -> bool {
        for (k, orbit) in self.orbits.iter().enumerate() {
            let mut gates = orbit.gates.iter();
            if let Some(q1) = gates.next() {
                let q1_final = automaton.is_accepting(q1);
                for q2 in gates {
                    if automaton.is_accepting(q2) != q1_final || !orbit.same_exits(q1, q2) {
                        debug!(orbit = k, "gates are not equivalent");
                        return false;
                    }
                }
            }
        }
        true
    }
}

///
/// Witness state for a symbol
///
/// Return the state q such that every final state of automaton has a transition to q
/// labeled by symbol. Return None if there's no such state (because a final state has
/// no transition for symbol or because two final states have different successors),
/// or if the automaton has no final state.
///
pub fn witness_state<'a, S, A>(automaton: &'a Automaton<S, A>, symbol: &A) -> Option<&'a S>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let mut finals = automaton.accepting_states();
    let first = finals.next()?;
    let target = automaton.step(first, symbol)?;
    if finals.all(|f| automaton.step(f, symbol) == Some(target)) {
        Some(target)
    } else {
        None
    }
}

impl<S, A> Display for Orbit<S, A>
where
    S: Clone + Eq + Hash + Display,
    A: Clone + Eq + Hash + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for s in self.states() {
            write!(f, " {s}")?;
        }
        write!(f, " }} gates:")?;
        for q in self.gates() {
            write!(f, " {q}")?;
            for (a, t) in self.exit_edges(q) {
                write!(f, " [{a} -> {t}]")?;
            }
        }
        Ok(())
    }
}
