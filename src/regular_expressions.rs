// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Regular expressions
//!
//! This module defines the abstract syntax of regular expressions [Regex] produced
//! by the BKW algorithm, and their rendering as strings. The rendering uses a
//! [Notation] for the empty word, the empty language, and union.
//!
//! The output of BKW is built from fixed templates such as `(r0)(a(r1)+b(r2))*`.
//! The rendering follows these templates:
//! - an operand of a concatenation is written between parentheses unless it's a
//!   symbol, a star, or an option
//! - a star is written `(r)*` and an option `(r)?`
//! - the operands of a union are separated by the union symbol
//!
//! A regular expression can be checked with its Glushkov positions (see [Glushkov]):
//! each occurrence of a symbol is a position, and the *first*, *last*, and *follow*
//! sets define an automaton on positions. This automaton is used to check whether
//! a word matches the expression and whether the expression is deterministic
//! (one-unambiguous).
//!

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    hash::Hash,
};

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///
/// Abstract syntax for regular expressions
///
pub enum Regex<A> {
    /// Empty language
    Empty,

    /// The language that contains only the empty word
    Epsilon,

    /// A single symbol
    Symbol(A),

    /// Concatenation of two languages
    Concat(Box<Regex<A>>, Box<Regex<A>>),

    /// Union of one or more languages
    Union(Vec<Regex<A>>),

    /// Kleene star
    Star(Box<Regex<A>>),

    /// Option: (r)? is the union of r and the empty word
    Opt(Box<Regex<A>>),
}

///
/// Strings used to render the constants and union
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
    epsilon: String,
    empty: String,
    union: String,
}

impl Notation {
    ///
    /// Create a notation
    /// - epsilon = string for the empty word
    /// - empty = string for the empty language
    /// - union = separator between the operands of a union
    ///
    pub fn new(epsilon: &str, empty: &str, union: &str) -> Self {
        Notation {
            epsilon: epsilon.to_string(),
            empty: empty.to_string(),
            union: union.to_string(),
        }
    }

    /// Textbook notation: `ε`, `∅`, `+`
    pub fn standard() -> Self {
        Notation::new("\u{03B5}", "\u{2205}", "+")
    }

    /// Notation accepted by dk.brics.automaton: `()`, `#`, `|`
    pub fn brics() -> Self {
        Notation::new("()", "#", "|")
    }
}

impl Default for Notation {
    fn default() -> Self {
        Notation::standard()
    }
}

impl<A> Regex<A> {
    /// Regular expression for a single symbol
    pub fn symbol(a: A) -> Self {
        Regex::Symbol(a)
    }

    /// Concatenation r.s
    pub fn concat(r: Self, s: Self) -> Self {
        Regex::Concat(Box::new(r), Box::new(s))
    }

    ///
    /// Union of a list of operands
    /// - the union of an empty list is the empty language
    /// - a single operand is kept as a union of one element
    ///
    pub fn union(operands: Vec<Self>) -> Self {
        if operands.is_empty() {
            Regex::Empty
        } else {
            Regex::Union(operands)
        }
    }

    /// Kleene star (r)*
    pub fn star(r: Self) -> Self {
        Regex::Star(Box::new(r))
    }

    /// Option (r)?
    pub fn opt(r: Self) -> Self {
        Regex::Opt(Box::new(r))
    }

    // all nodes of the syntax tree, in prefix order
    fn nodes(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let r = stack.pop()?;
            match r {
                Regex::Empty | Regex::Epsilon | Regex::Symbol(_) => {}
                Regex::Concat(r1, r2) => {
                    stack.push(r2);
                    stack.push(r1);
                }
                Regex::Union(list) => stack.extend(list.iter().rev()),
                Regex::Star(r1) | Regex::Opt(r1) => stack.push(r1),
            }
            Some(r)
        })
    }

    /// Number of nodes in the syntax tree
    pub fn size(&self) -> usize {
        self.nodes().count()
    }

    /// Check whether the empty language occurs as a sub-expression
    pub fn contains_empty(&self) -> bool {
        self.nodes().any(|r| matches!(r, Regex::Empty))
    }

    // operands of a concatenation that don't need parentheses
    fn is_atomic_operand(&self) -> bool {
        matches!(self, Regex::Symbol(_) | Regex::Star(_) | Regex::Opt(_))
    }

    ///
    /// Object that displays this expression using a notation
    ///
    pub fn display_with<'a>(&'a self, notation: &'a Notation) -> Rendered<'a, A> {
        Rendered {
            regex: self,
            notation,
        }
    }
}

// drop without recursion: expressions built from long chains of orbits are deep
impl<A> Drop for Regex<A> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        take_children(self, &mut stack);
        while let Some(mut r) = stack.pop() {
            take_children(&mut r, &mut stack);
        }
    }
}

fn take_children<A>(r: &mut Regex<A>, stack: &mut Vec<Regex<A>>) {
    match r {
        Regex::Empty | Regex::Epsilon | Regex::Symbol(_) => {}
        Regex::Concat(r1, r2) => {
            stack.push(std::mem::replace(r1.as_mut(), Regex::Epsilon));
            stack.push(std::mem::replace(r2.as_mut(), Regex::Epsilon));
        }
        Regex::Union(list) => stack.append(list),
        Regex::Star(r1) | Regex::Opt(r1) => {
            stack.push(std::mem::replace(r1.as_mut(), Regex::Epsilon));
        }
    }
}

impl<A: Eq + Hash> Regex<A> {
    ///
    /// Compute the Glushkov positions of this expression
    ///
    pub fn glushkov(&self) -> Glushkov<'_, A> {
        let mut symbols = Vec::new();
        let mut follow = Vec::new();
        let summary = collect_positions(self, &mut symbols, &mut follow);
        Glushkov {
            symbols,
            nullable: summary.nullable,
            first: summary.first,
            last: summary.last,
            follow,
        }
    }

    ///
    /// Check whether a word belongs to the language of this expression
    ///
    pub fn matches<'b>(&self, word: impl IntoIterator<Item = &'b A>) -> bool
    where
        A: 'b,
    {
        self.glushkov().matches(word)
    }

    ///
    /// Check whether this expression is deterministic (one-unambiguous)
    ///
    pub fn is_deterministic(&self) -> bool {
        self.glushkov().is_deterministic()
    }
}

///
/// A regular expression with a notation, for display
///
#[derive(Debug)]
pub struct Rendered<'a, A> {
    regex: &'a Regex<A>,
    notation: &'a Notation,
}

impl<A: Display> Display for Rendered<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // write e or '(e)' when e is an operand of a concatenation
        fn write_operand<A: Display>(
            f: &mut Formatter<'_>,
            e: &Regex<A>,
            notation: &Notation,
        ) -> std::fmt::Result {
            if e.is_atomic_operand() {
                write_expr(f, e, notation)
            } else {
                write!(f, "(")?;
                write_expr(f, e, notation)?;
                write!(f, ")")
            }
        }

        fn write_expr<A: Display>(
            f: &mut Formatter<'_>,
            e: &Regex<A>,
            notation: &Notation,
        ) -> std::fmt::Result {
            match e {
                Regex::Empty => f.write_str(&notation.empty),
                Regex::Epsilon => f.write_str(&notation.epsilon),
                Regex::Symbol(a) => write!(f, "{a}"),
                Regex::Concat(r, s) => {
                    write_operand(f, r, notation)?;
                    write_operand(f, s, notation)
                }
                Regex::Union(list) => {
                    for (i, r) in list.iter().enumerate() {
                        if i > 0 {
                            f.write_str(&notation.union)?;
                        }
                        if matches!(r, Regex::Union(_)) {
                            write!(f, "(")?;
                            write_expr(f, r, notation)?;
                            write!(f, ")")?;
                        } else {
                            write_expr(f, r, notation)?;
                        }
                    }
                    Ok(())
                }
                Regex::Star(r) => {
                    write!(f, "(")?;
                    write_expr(f, r, notation)?;
                    write!(f, ")*")
                }
                Regex::Opt(r) => {
                    write!(f, "(")?;
                    write_expr(f, r, notation)?;
                    write!(f, ")?")
                }
            }
        }

        write_expr(f, self.regex, self.notation)
    }
}

impl<A: Display> Display for Regex<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.display_with(&Notation::standard()), f)
    }
}

///
/// Glushkov positions of a regular expression
///
/// Positions are the occurrences of symbols in the expression, numbered from
/// left to right starting from 0.
/// - first = positions that can match the first symbol of a word
/// - last = positions that can match the last symbol of a word
/// - follow\[p\] = positions that can match the symbol after position p
/// - nullable = whether the empty word is in the language
///
#[derive(Debug, Clone)]
pub struct Glushkov<'a, A> {
    symbols: Vec<&'a A>,
    nullable: bool,
    first: BTreeSet<usize>,
    last: BTreeSet<usize>,
    follow: Vec<BTreeSet<usize>>,
}

// nullable/first/last of a sub-expression
struct Summary {
    nullable: bool,
    first: BTreeSet<usize>,
    last: BTreeSet<usize>,
}

impl Summary {
    fn constant(nullable: bool) -> Self {
        Summary {
            nullable,
            first: BTreeSet::new(),
            last: BTreeSet::new(),
        }
    }
}

//
// Assign positions to the symbols of e and update the follow sets
//
fn collect_positions<'a, A>(
    e: &'a Regex<A>,
    symbols: &mut Vec<&'a A>,
    follow: &mut Vec<BTreeSet<usize>>,
) -> Summary {
    match e {
        Regex::Empty => Summary::constant(false),
        Regex::Epsilon => Summary::constant(true),
        Regex::Symbol(a) => {
            let p = symbols.len();
            symbols.push(a);
            follow.push(BTreeSet::new());
            Summary {
                nullable: false,
                first: BTreeSet::from([p]),
                last: BTreeSet::from([p]),
            }
        }
        Regex::Concat(r, s) => {
            let mut left = collect_positions(r, symbols, follow);
            let mut right = collect_positions(s, symbols, follow);
            for &p in &left.last {
                follow[p].extend(right.first.iter().copied());
            }
            if left.nullable {
                left.first.extend(right.first.iter().copied());
            }
            if right.nullable {
                right.last.append(&mut left.last);
            }
            Summary {
                nullable: left.nullable && right.nullable,
                first: left.first,
                last: right.last,
            }
        }
        Regex::Union(list) => {
            let mut result = Summary::constant(false);
            for r in list {
                let mut sub = collect_positions(r, symbols, follow);
                result.nullable |= sub.nullable;
                result.first.append(&mut sub.first);
                result.last.append(&mut sub.last);
            }
            result
        }
        Regex::Star(r) => {
            let mut sub = collect_positions(r, symbols, follow);
            for &p in &sub.last {
                follow[p].extend(sub.first.iter().copied());
            }
            sub.nullable = true;
            sub
        }
        Regex::Opt(r) => {
            let mut sub = collect_positions(r, symbols, follow);
            sub.nullable = true;
            sub
        }
    }
}

impl<'a, A: Eq + Hash> Glushkov<'a, A> {
    /// Number of positions
    pub fn num_positions(&self) -> usize {
        self.symbols.len()
    }

    /// Symbol at position p
    pub fn symbol(&self, p: usize) -> &'a A {
        self.symbols[p]
    }

    /// Check whether the language contains the empty word
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// First positions
    pub fn first(&self) -> &BTreeSet<usize> {
        &self.first
    }

    /// Last positions
    pub fn last(&self) -> &BTreeSet<usize> {
        &self.last
    }

    /// Positions that follow p
    pub fn follow(&self, p: usize) -> &BTreeSet<usize> {
        &self.follow[p]
    }

    // positions of a set labeled by a
    fn select<'s>(&self, set: impl Iterator<Item = &'s usize>, a: &A) -> BTreeSet<usize> {
        set.copied().filter(|&p| self.symbols[p] == a).collect()
    }

    ///
    /// Check whether a word matches
    ///
    /// This simulates the position automaton: its states are the positions plus an
    /// initial state, and all positions reached by a prefix are tracked.
    ///
    pub fn matches<'b>(&self, word: impl IntoIterator<Item = &'b A>) -> bool
    where
        A: 'b,
    {
        let mut current: Option<BTreeSet<usize>> = None;
        for a in word {
            let next = match &current {
                None => self.select(self.first.iter(), a),
                Some(set) => self.select(set.iter().flat_map(|&p| self.follow[p].iter()), a),
            };
            if next.is_empty() {
                return false;
            }
            current = Some(next);
        }
        match current {
            None => self.nullable,
            Some(set) => set.iter().any(|p| self.last.contains(p)),
        }
    }

    // check that distinct positions in set have distinct symbols
    fn unambiguous(&self, set: &BTreeSet<usize>) -> bool {
        let mut seen = FxHashSet::default();
        set.iter().all(|&p| seen.insert(self.symbols[p]))
    }

    ///
    /// Check whether the position automaton is deterministic
    ///
    /// This holds iff the first set and all the follow sets contain at most one
    /// position per symbol.
    ///
    pub fn is_deterministic(&self) -> bool {
        self.unambiguous(&self.first) && self.follow.iter().all(|s| self.unambiguous(s))
    }
}
