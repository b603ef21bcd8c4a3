// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Deterministic regular expressions from deterministic automata
//!
//! This implements the algorithm of Brüggemann-Klein and Wood (BKW) in the form
//! given by Bex, Gelade, Martens, and Neven. Given a DFA M, the algorithm either
//! constructs a deterministic (one-unambiguous) regular expression for the language
//! of M, or reports that no such expression exists.
//!
//! The construction is recursive:
//! - if M has a single state and no transitions, the result is ε or ∅.
//! - if M is a single orbit, let S be the set of consistent symbols: a is consistent
//!   if all final states of M have a transition labeled by a to the same state w(a).
//!   The S-cut of M is M without the transitions labeled by symbols of S that leave
//!   final states. The result is `(r0)(a(ra)+b(rb)...)*` where r0 is the result for
//!   the S-cut and ra is the result for the S-cut with initial state w(a).
//! - otherwise, let O be the orbit of the initial state. All gates of O must be
//!   equivalent (orbit property). The result is `(r0)(a(ra)+b(rb)...)` where r0 is the
//!   result for the orbit automaton of O, and ra is the result for M with initial
//!   state q(a), the state reached by leaving O via symbol a. If the gates of O
//!   are final, the alternatives are optional: `(r0)(a(ra)+b(rb)...)?`.
//!
//! Every recursive call is on an automaton with fewer states or fewer transitions.
//!
//! In the last case, M with initial state q(a) has the same orbits as M (minus
//! the ones that are not reachable from q(a)). All orbits of M are then processed
//! in one loop driven by an explicit stack, and each orbit is entered once per
//! entry state. Only the orbit automata go through recursive calls, so the
//! recursion depth is bounded by the nesting of orbits rather than by the length
//! of chains of orbits.
//!

use std::{collections::BTreeSet, fmt::Display, hash::Hash};

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    automata::Automaton,
    errors::SynthesisError,
    orbits::{witness_state, Orbits},
    regular_expressions::{Notation, Regex},
};

///
/// Configuration for the synthesis of regular expressions
///
/// - alphabet: symbols considered by the construction (sorted)
/// - notation: used to render the regular expressions as strings
/// - minimize_input: whether the input automaton is minimized first
///
/// By default, the notation is [Notation::standard] and the input is not minimized.
///
#[derive(Debug, Clone)]
pub struct Synthesizer<A> {
    alphabet: BTreeSet<A>,
    notation: Notation,
    minimize_input: bool,
}

impl<A> Synthesizer<A>
where
    A: Clone + Eq + Hash + Ord,
{
    ///
    /// Create a synthesizer for an alphabet
    ///
    /// The symbols that label transitions of an input automaton are always part
    /// of the construction, even if they are missing from this alphabet.
    /// Symbols that label no transition have no effect on the result.
    ///
    pub fn new(alphabet: impl IntoIterator<Item = A>) -> Self {
        Synthesizer {
            alphabet: alphabet.into_iter().collect(),
            notation: Notation::standard(),
            minimize_input: false,
        }
    }

    ///
    /// Create a synthesizer whose alphabet is the set of symbols used by an automaton
    ///
    pub fn for_automaton<S>(automaton: &Automaton<S, A>) -> Self
    where
        S: Clone + Eq + Hash,
    {
        Synthesizer::new(automaton.alphabet())
    }

    /// Set the notation for rendering
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Enable or disable minimization of the input
    pub fn minimize_input(mut self, flag: bool) -> Self {
        self.minimize_input = flag;
        self
    }

    /// Iterator to list the alphabet in increasing order
    pub fn alphabet(&self) -> impl Iterator<Item = &A> {
        self.alphabet.iter()
    }

    /// Notation used for rendering
    pub fn notation(&self) -> &Notation {
        &self.notation
    }

    ///
    /// Construct a deterministic regular expression equivalent to an automaton
    ///
    /// The input is not modified. The construction works on a copy restricted to
    /// the reachable states (and minimized if minimize_input is set). Its alphabet
    /// is the union of this synthesizer's alphabet and the symbols of the automaton.
    ///
    /// # Errors
    ///
    /// - [SynthesisError::NotConsistent] if an orbit has no consistent symbol
    /// - [SynthesisError::OrbitPropertyViolation] if the gates of an orbit are not
    ///   equivalent
    ///
    /// Both errors mean that the language of the automaton has no deterministic
    /// regular expression, provided the automaton is minimal.
    ///
    pub fn synthesize_expr<S>(&self, automaton: &Automaton<S, A>) -> Result<Regex<A>, SynthesisError>
    where
        S: Clone + Eq + Hash,
    {
        let mut input = automaton.clone();
        if self.minimize_input {
            input.minimize();
        } else {
            input.remove_unreachable();
        }
        let mut alphabet = input.alphabet();
        alphabet.extend(self.alphabet.iter().cloned());
        debug!(
            states = input.num_states(),
            transitions = input.num_transitions(),
            symbols = alphabet.len(),
            "synthesis start"
        );
        bkw(&input, &alphabet)
    }

    ///
    /// Construct a deterministic regular expression and render it as a string
    ///
    pub fn synthesize<S>(&self, automaton: &Automaton<S, A>) -> Result<String, SynthesisError>
    where
        S: Clone + Eq + Hash,
        A: Display,
    {
        let regex = self.synthesize_expr(automaton)?;
        Ok(regex.display_with(&self.notation).to_string())
    }
}

// main recursion: automaton must not have unreachable states
fn bkw<S, A>(automaton: &Automaton<S, A>, alphabet: &BTreeSet<A>) -> Result<Regex<A>, SynthesisError>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + Ord,
{
    if automaton.num_states() == 1 && !automaton.has_transitions() {
        let accepting = automaton.is_accepting(automaton.initial_state());
        debug!(accepting, "base case");
        return Ok(if accepting {
            Regex::Epsilon
        } else {
            Regex::Empty
        });
    }

    let orbits = Orbits::decompose(automaton);
    if orbits.len() == 1 {
        single_orbit(automaton, alphabet)
    } else {
        orbit_chain(automaton, &orbits, alphabet)
    }
}

// automaton is strongly connected
fn single_orbit<S, A>(
    automaton: &Automaton<S, A>,
    alphabet: &BTreeSet<A>,
) -> Result<Regex<A>, SynthesisError>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + Ord,
{
    if automaton.num_accepting_states() == 0 {
        debug!(states = automaton.num_states(), "orbit without final states");
        return Ok(Regex::Empty);
    }

    // consistent symbols and their witness states
    let consistent: Vec<(A, S)> = alphabet
        .iter()
        .filter_map(|a| witness_state(automaton, a).map(|w| (a.clone(), w.clone())))
        .collect();
    if consistent.is_empty() {
        debug!(states = automaton.num_states(), "no consistent symbol");
        return Err(SynthesisError::NotConsistent);
    }
    debug!(
        states = automaton.num_states(),
        transitions = automaton.num_transitions(),
        consistent = consistent.len(),
        "single orbit"
    );

    let mut cut = automaton.clone();
    for f in automaton.accepting_states() {
        for (a, _) in &consistent {
            cut.remove_transition(f, a);
        }
    }

    let r0 = bkw(&cut.rooted_at(automaton.initial_state()), alphabet)?;
    let mut alternatives = Vec::with_capacity(consistent.len());
    for (a, w) in consistent {
        let ra = bkw(&cut.rooted_at(&w), alphabet)?;
        alternatives.push(Regex::concat(Regex::symbol(a), ra));
    }
    Ok(Regex::concat(r0, Regex::star(Regex::union(alternatives))))
}

// pending work for orbit_chain
enum Step<S> {
    // compute the orbit expression for an entry state, then visit the exit targets
    Enter(S),
    // combine the orbit expression with the results of the exit targets
    Assemble(S),
}

//
// Results of entry states
// - uses[s] = number of entry states that still need the result of s
// The last use moves the result out, earlier uses get a copy.
//
struct Results<S, A> {
    done: FxHashMap<S, Regex<A>>,
    uses: FxHashMap<S, usize>,
}

impl<S: Eq + Hash, A: Clone> Results<S, A> {
    fn take(&mut self, s: &S) -> Regex<A> {
        match self.uses.get_mut(s) {
            Some(n) if *n > 1 => {
                *n -= 1;
                self.done.get(s).cloned().unwrap_or(Regex::Empty)
            }
            _ => self.done.remove(s).unwrap_or(Regex::Empty),
        }
    }
}

//
// automaton has more than one orbit
//
// An entry state is either the initial state or the target of an exit edge.
// The result for entry state q is built from the orbit O of q:
// - r0 = result for the orbit automaton of O with initial state q
// - for each symbol a that leaves O, the result for the target q(a)
// Exit targets are in orbits reachable from O, so the entry states form
// a DAG that is explored depth-first. Each entry state is computed once.
//
fn orbit_chain<S, A>(
    automaton: &Automaton<S, A>,
    orbits: &Orbits<S, A>,
    alphabet: &BTreeSet<A>,
) -> Result<Regex<A>, SynthesisError>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + Ord,
{
    if !orbits.has_orbit_property(automaton) {
        debug!(orbits = orbits.len(), "orbit property violated");
        return Err(SynthesisError::OrbitPropertyViolation);
    }

    let initial = automaton.initial_state();
    let mut entries = IndexSet::new();
    entries.insert(initial.clone());
    for orbit in orbits.iter() {
        for a in alphabet {
            if let Some(t) = orbit.exit_target(a) {
                entries.insert(t.clone());
            }
        }
    }
    debug!(
        orbits = orbits.len(),
        entries = entries.len(),
        "multiple orbits"
    );

    let mut results = Results {
        done: FxHashMap::default(),
        uses: FxHashMap::default(),
    };
    for p in entries.iter() {
        if let Some(orbit) = orbits.orbit_of(p) {
            for a in alphabet {
                if let Some(t) = orbit.exit_target(a) {
                    *results.uses.entry(t.clone()).or_default() += 1;
                }
            }
        }
    }

    // orbit expressions of the entry states being explored
    let mut pending: FxHashMap<S, Regex<A>> = FxHashMap::default();
    let mut stack = vec![Step::Enter(initial.clone())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(q) => {
                if results.done.contains_key(&q) || pending.contains_key(&q) {
                    continue;
                }
                let Some(orbit) = orbits.orbit_of(&q) else {
                    results.done.insert(q, Regex::Empty);
                    continue;
                };
                let r0 = bkw(&orbit.rooted_at(&q), alphabet)?;
                pending.insert(q.clone(), r0);
                stack.push(Step::Assemble(q));
                // reversed so that the smallest symbol is explored first
                for a in alphabet.iter().rev() {
                    if let Some(t) = orbit.exit_target(a) {
                        stack.push(Step::Enter(t.clone()));
                    }
                }
            }
            Step::Assemble(q) => {
                let r0 = pending.remove(&q).unwrap_or(Regex::Empty);
                let result = match orbits.orbit_of(&q) {
                    None => r0,
                    Some(orbit) => {
                        let mut alternatives = Vec::new();
                        for a in alphabet {
                            if let Some(t) = orbit.exit_target(a) {
                                let ra = results.take(t);
                                alternatives.push(Regex::concat(Regex::symbol(a.clone()), ra));
                            }
                        }
                        if alternatives.is_empty() {
                            // q is in a terminal orbit
                            r0
                        } else {
                            let exits = Regex::union(alternatives);
                            if orbit.has_accepting_gate(automaton) {
                                Regex::concat(r0, Regex::opt(exits))
                            } else {
                                Regex::concat(r0, exits)
                            }
                        }
                    }
                };
                results.done.insert(q, result);
            }
        }
    }
    Ok(results.take(initial))
}

///
/// Construct a deterministic regular expression for an automaton, using the
/// standard notation
///
/// See [Synthesizer::synthesize].
///
pub fn synthesize<S, A>(
    automaton: &Automaton<S, A>,
    alphabet: impl IntoIterator<Item = A>,
) -> Result<String, SynthesisError>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash + Ord + Display,
{
    Synthesizer::new(alphabet).synthesize(automaton)
}
