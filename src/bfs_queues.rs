// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Queue + set for breadth-first exploration of automaton states
//!

use std::hash::Hash;

use indexmap::IndexSet;

///
/// A BfsQueue is a queue that doesn't contain duplicate elements.
/// - the push operation adds an element at the end of the queue
///   if this element hasn't been seen before. Otherwise, it's a no-op.
/// - the pop operations takes the next element that hasn't been popped yet.
///
/// Popped elements are not discarded: the queue keeps all the elements
/// ever pushed, in visit order. After exploration, [visited](Self::visited)
/// is the set of reached elements.
///
// Invariant: elements in seen[0 .. next] have been popped,
// elements in seen[next ..] are waiting.
#[derive(Debug)]
pub struct BfsQueue<T> {
    seen: IndexSet<T>,
    next: usize,
}

impl<T: Eq + Hash + Clone> BfsQueue<T> {
    ///
    /// Create a new queue that contains a single root
    ///
    pub fn new(root: T) -> Self {
        let mut seen = IndexSet::new();
        seen.insert(root);
        BfsQueue { seen, next: 0 }
    }

    ///
    /// Add an element at the end of the queue if it's not been seen before
    /// - return true if this is a new element
    /// - return false otherwise
    ///
    pub fn push(&mut self, element: T) -> bool {
        self.seen.insert(element)
    }

    ///
    /// Push all elements from an iterator
    ///
    pub fn push_all(&mut self, iter: impl IntoIterator<Item = T>) {
        for x in iter {
            self.push(x);
        }
    }

    ///
    /// Get the first element in the queue
    /// - return None if the queue is empty
    ///
    pub fn pop(&mut self) -> Option<T> {
        let x = self.seen.get_index(self.next)?.clone();
        self.next += 1;
        Some(x)
    }

    ///
    /// All the elements pushed so far, in visit order
    ///
    pub fn visited(self) -> IndexSet<T> {
        self.seen
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        let mut queue = BfsQueue::new(0);
        assert!(queue.push(1));
        assert!(!queue.push(0));
        assert!(!queue.push(1));
        queue.push_all(vec![2, 1, 3]);

        let mut order = Vec::new();
        while let Some(x) = queue.pop() {
            order.push(x);
            if x == 2 {
                // pushing an element already popped is a no-op
                assert!(!queue.push(0));
            }
        }
        assert_eq!(order, vec![0, 1, 2, 3]);

        let visited = queue.visited();
        assert_eq!(visited.len(), 4);
        assert!(visited.contains(&3));
    }
}
