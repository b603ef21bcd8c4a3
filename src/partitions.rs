// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Partitions of an integer set
//!
//! We consider a set of N integers [0 ... n-1]. In this crate,
//! the integers are state indices of an automaton.
//! A partition is a division of set into K blocks for some K>=1.
//!

use std::{collections::HashMap, fmt::Display, hash::Hash};

// Implementation:
// - each block is identified by an integer between 0 and K (the block id)
// - each block is also a slice in a segments array
// - block[j] is a pair (start, end) such that 0 <= start < end <= n:
//   This means that block[j] is the set of integers in segment[start .. end].
// - block_id[x] is the id of the block that contains x
//
// Block 0 is special: it is the empty block.
// All other blocks are non-empty.
//
// A partition can be built block by block (see add_block): this is how
// strongly connected components are collected. In that mode, segment
// and block_id grow as elements are added and the partition is complete
// once every element has been added.
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockHeader {
    start: usize,
    end: usize,
}

///
/// A partition of [0 ... N-1] into disjoint, non-empty blocks,
/// with a mapping from element to block id.
///
#[derive(Debug, Clone)]
pub struct Partition {
    // number of elements
    size: usize,
    // block descriptors
    block: Vec<BlockHeader>,
    // segment = concatenation of the blocks
    segment: Vec<u32>,
    // mapping from element to block id (0 = not assigned yet)
    block_id: Box<[u32]>,
}

impl Partition {
    ///
    /// Create a partition for n elements in which no element is assigned yet
    /// - the partition has only the empty block
    /// - blocks must then be added with [add_block](Self::add_block)
    ///
    pub fn empty(n: u32) -> Self {
        let size = n as usize;
        Partition {
            size,
            block: vec![BlockHeader { start: 0, end: 0 }],
            segment: Vec::with_capacity(size),
            block_id: vec![0; size].into_boxed_slice(),
        }
    }

    ///
    /// Create a partition for n elements with all elements in a single block
    /// - if n = 0, the partition has only the empty block
    /// - otherwise, the partition has two blocks with id 0 and 1
    ///   0 --> empty block, 1 --> [0 .. n-1]
    ///
    pub fn new(n: u32) -> Self {
        let mut p = Partition::empty(n);
        if n > 0 {
            p.add_block(0..n);
        }
        p
    }

    ///
    /// Number of blocks (including the empty block)
    ///
    pub fn num_blocks(&self) -> u32 {
        self.block.len() as u32
    }

    ///
    /// Index = number of equivalence classes = number of non-empty blocks
    ///
    pub fn index(&self) -> u32 {
        self.num_blocks() - 1
    }

    ///
    /// Size of the set
    ///
    pub fn size(&self) -> u32 {
        self.size as u32
    }

    ///
    /// Check whether every element belongs to a block
    ///
    pub fn is_complete(&self) -> bool {
        self.segment.len() == self.size
    }

    ///
    /// Size of block i
    ///
    pub fn block_size(&self, i: u32) -> u32 {
        let BlockHeader { start, end } = self.block[i as usize];
        (end - start) as u32
    }

    ///
    /// Iterator to get all elements of block i
    ///
    pub fn block_elements(&self, i: u32) -> impl Iterator<Item = u32> + '_ {
        self.slice(i).iter().copied()
    }

    ///
    /// Iterator to get the ids of all non-empty blocks
    ///
    pub fn blocks(&self) -> impl Iterator<Item = u32> {
        1..self.num_blocks()
    }

    ///
    /// Pick the first element of block i
    /// - block i must not be empty so i must not be 0
    ///
    pub fn pick_element(&self, i: u32) -> u32 {
        assert!(i > 0);
        let start = self.block[i as usize].start;
        self.segment[start]
    }

    ///
    /// Block id for element x
    /// - return 0 if x has not been added to a block yet
    ///
    pub fn block_id(&self, x: u32) -> u32 {
        self.block_id[x as usize]
    }

    ///
    /// Sort elements in block i
    ///
    pub fn sort_block(&mut self, i: u32) {
        let BlockHeader { start, end } = self.block[i as usize];
        self.segment[start..end].sort_unstable()
    }

    ///
    /// Slice of self.segment corresponding to block i
    ///
    fn slice(&self, i: u32) -> &[u32] {
        let BlockHeader { start, end } = self.block[i as usize];
        &self.segment[start..end]
    }

    ///
    /// Add a new block and return its id
    /// - the elements must not belong to any block yet
    /// - return 0 and add nothing if the iterator is empty
    ///
    pub fn add_block(&mut self, elements: impl IntoIterator<Item = u32>) -> u32 {
        let start = self.segment.len();
        let id = self.num_blocks();
        for x in elements {
            debug_assert!(self.block_id[x as usize] == 0);
            self.segment.push(x);
            self.block_id[x as usize] = id;
        }
        let end = self.segment.len();
        if start == end {
            0
        } else {
            self.block.push(BlockHeader { start, end });
            id
        }
    }

    ///
    /// Refine all the blocks according to a key function
    /// - every block B is split into sub-blocks such that two elements x and y
    ///   of B stay together iff key(x) == key(y)
    /// - the first sub-block keeps the id of B, the others get new ids
    /// - the partition must be complete
    ///
    /// Return true if at least one block was split.
    ///
    pub fn refine<K, F>(&mut self, key: F) -> bool
    where
        K: Eq + Hash,
        F: Fn(u32) -> K,
    {
        debug_assert!(self.is_complete());
        let mut changed = false;
        let num_blocks = self.num_blocks();
        for b in 1..num_blocks {
            // group the elements of block b by key, keeping the order of first occurrence
            let mut groups: Vec<Vec<u32>> = Vec::new();
            let mut group_of: HashMap<K, usize> = HashMap::new();
            for x in self.block_elements(b) {
                let g = *group_of.entry(key(x)).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[g].push(x);
            }
            if groups.len() > 1 {
                changed = true;
                self.split_block(b, &groups);
            }
        }
        changed
    }

    //
    // Rewrite block b as the concatenation of groups:
    // - groups[0] stays in block b
    // - every other group becomes a new block
    //
    fn split_block(&mut self, b: u32, groups: &[Vec<u32>]) {
        let BlockHeader { start, .. } = self.block[b as usize];
        let mut pos = start;
        for (k, g) in groups.iter().enumerate() {
            let end = pos + g.len();
            self.segment[pos..end].copy_from_slice(g);
            if k == 0 {
                self.block[b as usize].end = end;
            } else {
                let id = self.num_blocks();
                self.block.push(BlockHeader { start: pos, end });
                for &x in g {
                    self.block_id[x as usize] = id;
                }
            }
            pos = end;
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in self.blocks() {
            write!(f, "block[{i}]: ")?;
            for x in self.block_elements(i) {
                write!(f, " {x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
