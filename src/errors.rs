// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Error codes
//!

use thiserror::Error;

///
/// Errors produced when an automaton is constructed or modified
///
/// These are reported before synthesis starts. A value of type
/// [Automaton](crate::automata::Automaton) always satisfies the
/// invariants checked here.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum AutomatonError {
    /// The initial state is not in the state set.
    #[error("initial state is not a state of the automaton")]
    UnknownInitialState,

    /// An accepting state is not in the state set.
    #[error("accepting state is not a state of the automaton")]
    UnknownAcceptingState,

    /// The source or the destination of a transition is not in the state set.
    #[error("transition refers to a state outside the automaton")]
    DanglingTransition,

    /// Two transitions from the same state and on the same symbol
    /// lead to different states.
    #[error("conflicting transitions for the same state and symbol")]
    NonDeterministic,

    /// Attempt to remove the initial state.
    #[error("the initial state cannot be removed")]
    RemoveInitialState,
}

///
/// Failures of the BKW synthesis
///
/// Both mean that the language of the automaton has no deterministic
/// (one-unambiguous) regular expression, provided the automaton is minimal.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum SynthesisError {
    /// An automaton with a single orbit has no consistent symbol.
    #[error("single-orbit automaton has no consistent symbol")]
    NotConsistent,

    /// Two gates of the same orbit disagree on acceptance or on their exit edges.
    #[error("automaton does not have the orbit property")]
    OrbitPropertyViolation,
}
