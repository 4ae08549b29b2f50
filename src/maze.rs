// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The maze game
//!
//! A maze is a random spanning tree over a grid of cells.  The start is
//! the top-left cell and the goal the bottom-right one.  A player can
//! walk the corridors by hand, or have the maze solved by breadth-first
//! or depth-first search.

use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::graphsearch::{search, Frontier, SearchResult};
use crate::spanningtree::{adjacency, grid_cells, Bias, Cell2D, Edge, SpanningTreeBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: u32,
    pub height: u32,
    pub bias: Bias,
    pub seed: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            width: 30,
            height: 20,
            bias: Bias::Normal,
            seed: 0,
        }
    }
}

pub struct Maze {
    width: u32,
    height: u32,
    bias: Bias,
    rng: StdRng,
    corridors: Vec<Edge>,
    adjacency: BTreeMap<Cell2D, BTreeSet<Cell2D>>,
    player: Cell2D,
}

impl Maze {
    pub fn generate(config: MazeConfig) -> Result<Self> {
        let mut maze = Maze {
            width: config.width,
            height: config.height,
            bias: config.bias,
            rng: StdRng::seed_from_u64(config.seed),
            corridors: Vec::new(),
            adjacency: BTreeMap::new(),
            player: Cell2D::new(0, 0),
        };
        maze.carve()?;
        Ok(maze)
    }

    fn carve(&mut self) -> Result<()> {
        let mut builder = SpanningTreeBuilder::build(self.width, self.height, self.bias, &mut self.rng)?;
        self.corridors = builder.run();
        self.adjacency = adjacency(self.width, self.height, &self.corridors);
        self.player = self.start();
        info!(
            width = self.width,
            height = self.height,
            bias = ?self.bias,
            "generated maze"
        );
        Ok(())
    }

    /// Throw the current maze away and build a fresh one from the same
    /// random source.
    pub fn regenerate(&mut self, bias: Bias) -> Result<()> {
        self.bias = bias;
        let reseed = self.rng.gen::<u64>();
        self.rng = StdRng::seed_from_u64(reseed);
        self.carve()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bias(&self) -> Bias {
        self.bias
    }

    pub fn start(&self) -> Cell2D {
        Cell2D::new(0, 0)
    }

    pub fn goal(&self) -> Cell2D {
        Cell2D::new(self.width - 1, self.height - 1)
    }

    pub fn contains(&self, cell: Cell2D) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// The spanning tree's edges.
    pub fn corridors(&self) -> &[Edge] {
        &self.corridors
    }

    pub fn adjacency(&self) -> &BTreeMap<Cell2D, BTreeSet<Cell2D>> {
        &self.adjacency
    }

    /// Is there a corridor between these two cells?
    pub fn is_open(&self, a: Cell2D, b: Cell2D) -> bool {
        self.adjacency
            .get(&a)
            .map_or(false, |neighbors| neighbors.contains(&b))
    }

    /// Every pair of neighboring cells with a wall between them, each
    /// pair listed once with its top-left cell first.
    pub fn walls(&self) -> Vec<(Cell2D, Cell2D)> {
        grid_cells(self.width, self.height)
            .flat_map(|cell| {
                let right = Direction::Right.step((cell.x, cell.y), self.width, self.height);
                let down = Direction::Down.step((cell.x, cell.y), self.width, self.height);
                right
                    .into_iter()
                    .chain(down)
                    .map(move |(x, y)| (cell, Cell2D::new(x, y)))
            })
            .filter(|&(a, b)| !self.is_open(a, b))
            .collect()
    }

    pub fn player(&self) -> Cell2D {
        self.player
    }

    pub fn reset_player(&mut self) {
        self.player = self.start();
    }

    /// Step the player one cell, if a corridor leads that way.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let here = self.player;
        match direction.step((here.x, here.y), self.width, self.height) {
            Some((x, y)) if self.is_open(here, Cell2D::new(x, y)) => {
                self.player = Cell2D::new(x, y);
                true
            }
            _ => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.player == self.goal()
    }

    /// Solve the maze from the start.
    pub fn search(&self, frontier: Frontier) -> Result<SearchResult<Cell2D>> {
        self.search_from(self.start(), frontier)
    }

    /// Solve the maze from any cell.
    pub fn search_from(&self, from: Cell2D, frontier: Frontier) -> Result<SearchResult<Cell2D>> {
        if !self.contains(from) {
            return Err(Error::UnknownCell {
                x: from.x,
                y: from.y,
            });
        }
        search(&self.adjacency, from, self.goal(), frontier)
    }
}
