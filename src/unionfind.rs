// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Disjoint sets over an arbitrary set of members, with path
//! compression and union by size.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct UnionFind<T: Copy + Eq + Hash> {
    index: HashMap<T, usize>,
    members: Vec<T>,
    parent: Vec<usize>,
    size: Vec<usize>,
    sets: usize,
}

impl<T: Copy + Eq + Hash> UnionFind<T> {
    /// Every member starts out as its own representative.  Duplicates
    /// are ignored.
    pub fn new<I: IntoIterator<Item = T>>(members: I) -> Self {
        let mut uf = UnionFind {
            index: HashMap::new(),
            members: Vec::new(),
            parent: Vec::new(),
            size: Vec::new(),
            sets: 0,
        };
        for member in members {
            if !uf.index.contains_key(&member) {
                uf.index.insert(member, uf.members.len());
                uf.parent.push(uf.members.len());
                uf.size.push(1);
                uf.members.push(member);
                uf.sets += 1;
            }
        }
        uf
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// How many disjoint sets remain.
    pub fn sets(&self) -> usize {
        self.sets
    }

    fn root(&mut self, mut at: usize) -> usize {
        let mut root = at;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[at] != root {
            let next = self.parent[at];
            self.parent[at] = root;
            at = next;
        }
        root
    }

    /// The representative of the set holding `member`, or `None` if it
    /// was never added.
    pub fn find(&mut self, member: T) -> Option<T> {
        let at = *self.index.get(&member)?;
        let root = self.root(at);
        Some(self.members[root])
    }

    /// Merge the sets holding `a` and `b`.  Returns false when they
    /// were already one set, or either is unknown.
    pub fn union(&mut self, a: T, b: T) -> bool {
        let (a, b) = match (self.index.get(&a), self.index.get(&b)) {
            (Some(&a), Some(&b)) => (a, b),
            _ => return false,
        };
        let (ra, rb) = (self.root(a), self.root(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, a: T, b: T) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }
}
