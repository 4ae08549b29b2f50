// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving and spanning-tree mazes
//!
//! Two small engines over a rectangular grid of cells.  The first shrinks
//! an image one low-energy seam at a time; the second grows a random
//! spanning tree into a maze and solves it by breadth-first or
//! depth-first search.

extern crate failure;
extern crate image;

mod ternary;

pub mod direction;
pub mod error;
pub mod twodmap;

pub mod energy;
pub mod pixelgrid;
pub mod seamcarver;
pub mod seamfinder;

pub mod graphsearch;
pub mod maze;
pub mod spanningtree;
pub mod unionfind;

pub use direction::Direction;
pub use error::{Error, Result};
pub use pixelgrid::PixelGrid;
pub use seamcarver::{CarveMode, SeamCarver, Tick};
pub use seamfinder::{Orientation, Seam, SeamCosts, SeamFinder};

pub use graphsearch::{search, Frontier, SearchResult};
pub use maze::{Maze, MazeConfig};
pub use spanningtree::{Bias, Cell2D, Edge, SpanningTreeBuilder};
