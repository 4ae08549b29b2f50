// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Random spanning trees over a grid, by Kruskal's algorithm
//!
//! Every pair of horizontally or vertically adjacent cells gets an edge
//! with a random weight.  Taking edges cheapest first, and keeping each
//! one only when it joins two cells that are not yet connected, leaves a
//! minimum spanning tree: the corridors of a perfect maze.

use crate::error::{Error, Result};
use crate::unionfind::UnionFind;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Weights are drawn from `0..WEIGHT_RANGE`, times the bias multiplier.
pub const WEIGHT_RANGE: u32 = 100;

/// How much wider the weight range of the disfavoured axis becomes.
pub const BIAS_MULTIPLIER: u32 = 5;

/// A cell of the maze.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell2D {
    pub x: u32,
    pub y: u32,
}

impl Cell2D {
    pub fn new(x: u32, y: u32) -> Self {
        Cell2D { x, y }
    }

    /// True when the two cells share a side.
    pub fn is_adjacent(self, other: Cell2D) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx + dy == 1
    }
}

/// Which way an edge runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Joins a cell to its right-hand neighbor.
    Horizontal,
    /// Joins a cell to the neighbor below it.
    Vertical,
}

/// An undirected, weighted edge between two adjacent cells.  The
/// endpoints are stored in order, so the same pair always makes the
/// same edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: Cell2D,
    pub b: Cell2D,
    pub weight: u32,
}

impl Edge {
    pub fn new(a: Cell2D, b: Cell2D, weight: u32) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Edge { a, b, weight }
    }

    pub fn axis(&self) -> Axis {
        if self.a.y == self.b.y {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Does this edge join these two cells, in either order?
    pub fn joins(&self, p: Cell2D, q: Cell2D) -> bool {
        (self.a == p && self.b == q) || (self.a == q && self.b == p)
    }
}

/// Which way the corridors of a maze tend to run.  Favoring an axis
/// widens the weight range of the *other* axis, so the favored edges
/// stay cheap and are taken first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bias {
    Normal,
    Horizontal,
    Vertical,
}

impl Default for Bias {
    fn default() -> Self {
        Bias::Normal
    }
}

impl Bias {
    /// The weight range multiplier for edges along `axis`.
    pub fn multiplier(self, axis: Axis) -> u32 {
        match (self, axis) {
            (Bias::Horizontal, Axis::Vertical) | (Bias::Vertical, Axis::Horizontal) => {
                BIAS_MULTIPLIER
            }
            _ => 1,
        }
    }

    /// Draw a weight for an edge along `axis`.
    pub fn weight<R: Rng>(self, axis: Axis, rng: &mut R) -> u32 {
        rng.gen_range(0..WEIGHT_RANGE * self.multiplier(axis))
    }
}

/// Every cell of a `width` by `height` grid, row by row.
pub fn grid_cells(width: u32, height: u32) -> impl Iterator<Item = Cell2D> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Cell2D::new(x, y)))
}

pub struct SpanningTreeBuilder {
    nodes: usize,
    edges: Vec<Edge>,
    sets: UnionFind<Cell2D>,
}

impl SpanningTreeBuilder {
    /// One edge per adjacency, weighted by `weight`.  Edges are made row
    /// by row: each cell's right-hand edge, then the edge below it.
    pub fn build_with<F>(width: u32, height: u32, mut weight: F) -> Result<Self>
    where
        F: FnMut(Cell2D, Cell2D, Axis) -> u32,
    {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let mut edges = Vec::new();
        for cell in grid_cells(width, height) {
            if cell.x + 1 < width {
                let right = Cell2D::new(cell.x + 1, cell.y);
                edges.push(Edge::new(cell, right, weight(cell, right, Axis::Horizontal)));
            }
            if cell.y + 1 < height {
                let below = Cell2D::new(cell.x, cell.y + 1);
                edges.push(Edge::new(cell, below, weight(cell, below, Axis::Vertical)));
            }
        }
        Ok(SpanningTreeBuilder {
            nodes: width as usize * height as usize,
            edges,
            sets: UnionFind::new(grid_cells(width, height)),
        })
    }

    /// Random weights from `rng`, shaped by `bias`.
    pub fn build<R: Rng>(width: u32, height: u32, bias: Bias, rng: &mut R) -> Result<Self> {
        SpanningTreeBuilder::build_with(width, height, |_, _, axis| bias.weight(axis, rng))
    }

    /// The representative of the set holding `cell`.
    pub fn find(&mut self, cell: Cell2D) -> Option<Cell2D> {
        self.sets.find(cell)
    }

    /// How many disjoint sets remain.
    pub fn components(&self) -> usize {
        self.sets.sets()
    }

    /// The candidate edges, in the order they were made.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Run Kruskal's algorithm.  The sort is stable, so edges of equal
    /// weight are taken in the order they were made.  The disjoint sets
    /// are kept, so a second run finds every cell already joined and
    /// returns nothing.
    pub fn run(&mut self) -> Vec<Edge> {
        let target = self.nodes - 1;
        let mut worklist = self.edges.clone();
        worklist.sort_by_key(|edge| edge.weight);
        let mut tree = Vec::with_capacity(target);
        for edge in worklist {
            if tree.len() == target {
                break;
            }
            if self.sets.union(edge.a, edge.b) {
                trace!(?edge, "corridor");
                tree.push(edge);
            }
        }
        debug!(cells = self.nodes, corridors = tree.len(), "spanning tree complete");
        tree
    }
}

/// Who can reach whom along the tree's edges.  Every cell of the grid
/// appears, even one with no corridors.
pub fn adjacency(
    width: u32,
    height: u32,
    edges: &[Edge],
) -> BTreeMap<Cell2D, BTreeSet<Cell2D>> {
    let mut map: BTreeMap<Cell2D, BTreeSet<Cell2D>> =
        grid_cells(width, height).map(|c| (c, BTreeSet::new())).collect();
    for edge in edges {
        map.entry(edge.a).or_default().insert(edge.b);
        map.entry(edge.b).or_default().insert(edge.a);
    }
    map
}
