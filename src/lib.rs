// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Deterministic regular expressions from finite-state automata
//!
//! # Overview
//!
//! This crate converts a deterministic finite-state automaton into an equivalent
//! *deterministic* (or one-unambiguous) regular expression, using the algorithm of
//! Brüggemann-Klein and Wood. A regular expression is deterministic if every symbol
//! of a word can be matched to a unique occurrence of this symbol in the expression,
//! without looking ahead. Not all regular languages have a deterministic regular
//! expression: in that case, the construction fails with a
//! [SynthesisError](crate::errors::SynthesisError).
//!
//! Module [automata](crate::automata) provides the automaton type, construction,
//! reachability pruning, and minimization. Module [scc](crate::scc) computes the
//! strongly connected components (orbits) of an automaton, and module
//! [orbits](crate::orbits) computes the gates of each orbit and checks the
//! orbit property.
//!
//! The construction itself is in module [synthesis](crate::synthesis). It produces
//! a [Regex](crate::regular_expressions::Regex) that can be rendered as a string,
//! checked for determinism, or used to match words.
//!
//! # Example
//!
//! ```
//! use aws_dre::automata::AutomatonBuilder;
//! use aws_dre::synthesis::Synthesizer;
//!
//! // words over {a, b} that end with a
//! let mut builder = AutomatonBuilder::new(&0);
//! builder
//!     .add_transition(&0, &'b', &0)
//!     .add_transition(&0, &'a', &1)
//!     .add_transition(&1, &'b', &0)
//!     .add_transition(&1, &'a', &1)
//!     .mark_final(&1);
//! let automaton = builder.build().unwrap();
//!
//! let regex = Synthesizer::new(['a', 'b']).synthesize_expr(&automaton).unwrap();
//! assert!(regex.is_deterministic());
//! assert!(regex.matches(&['b', 'a']));
//! assert!(!regex.matches(&['a', 'b']));
//! ```
//!

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod automata;
pub mod errors;
pub mod orbits;
pub mod partitions;
pub mod regular_expressions;
pub mod scc;
pub mod synthesis;

mod bfs_queues;
