// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! A vertical seam runs top to bottom, one pixel per row; a horizontal
//! seam runs left to right, one pixel per column.  Rather than write
//! the dynamic program twice, the cost table is kept in "seam space":
//! `along` counts steps away from the starting edge and `across` is the
//! position perpendicular to that.  For a vertical seam `along` is `y`;
//! for a horizontal seam the image is read as if flipped 90°.

use crate::cq;
use crate::energy::energy_map;
use crate::pixelgrid::PixelGrid;
use crate::twodmap::{SeamStep, TwoDimensionalMap};
use tracing::debug;

/// Which way a seam runs across the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom; removing one narrows the image.
    Vertical,
    /// Left to right; removing one shortens the image.
    Horizontal,
}

impl Orientation {
    pub fn turn(self) -> Self {
        cq!(
            self == Orientation::Vertical,
            Orientation::Horizontal,
            Orientation::Vertical
        )
    }

    /// (length, breadth) of a `width` by `height` image in seam space.
    pub fn extent(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Orientation::Vertical => (height, width),
            Orientation::Horizontal => (width, height),
        }
    }

    /// The image coordinates of a point in seam space.
    pub fn locate(self, along: u32, across: u32) -> (u32, u32) {
        match self {
            Orientation::Vertical => (across, along),
            Orientation::Horizontal => (along, across),
        }
    }

    /// The seam-space (along, across) address of an image coordinate.
    pub fn unlocate(self, x: u32, y: u32) -> (u32, u32) {
        match self {
            Orientation::Vertical => (y, x),
            Orientation::Horizontal => (x, y),
        }
    }
}

/// A complete seam.  `cells[along]` is the across-coordinate of the
/// seam at that step.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub orientation: Orientation,
    pub cells: Vec<u32>,
    pub cost: f64,
}

impl Seam {
    /// The image coordinates of every cell, from the starting edge on.
    pub fn coordinates<'a>(&'a self) -> impl Iterator<Item = (u32, u32)> + 'a {
        let orientation = self.orientation;
        self.cells
            .iter()
            .enumerate()
            .map(move |(along, across)| orientation.locate(along as u32, *across))
    }
}

/// The seam digraph: for every pixel, the cheapest seam ending there
/// and the step it came from.
#[derive(Debug, Clone)]
pub struct SeamCosts {
    orientation: Orientation,
    // Indexed (across, along).
    table: TwoDimensionalMap<SeamStep>,
}

impl SeamCosts {
    /// Fill the cost table for an energy map.  The first step of every
    /// seam costs its own energy; every later step costs its energy plus
    /// the cheapest of the (up to) three steps behind it.  On a tie the
    /// step straight behind wins, then the one to its left, then the one
    /// to its right.
    pub fn compute(energy: &TwoDimensionalMap<f64>, orientation: Orientation) -> Self {
        let (length, breadth) = orientation.extent(energy.width, energy.height);
        let mut table: TwoDimensionalMap<SeamStep> = TwoDimensionalMap::new(breadth, length);
        let erg = |along: u32, across: u32| energy[orientation.locate(along, across)];

        for across in 0..breadth {
            table[(across, 0)] = SeamStep {
                cost: erg(0, across),
                parent: None,
            };
        }

        for along in 1..length {
            for across in 0..breadth {
                let behind = |a: u32| table[(a, along - 1)].cost;
                let mut best = across;
                if across > 0 && behind(across - 1) < behind(best) {
                    best = across - 1;
                }
                if across + 1 < breadth && behind(across + 1) < behind(best) {
                    best = across + 1;
                }
                let cost = erg(along, across) + behind(best);
                table[(across, along)] = SeamStep {
                    cost,
                    parent: Some(best),
                };
            }
        }

        SeamCosts { orientation, table }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The table entry at a point in seam space.
    pub fn step(&self, along: u32, across: u32) -> SeamStep {
        self.table[(across, along)]
    }

    /// The across-coordinate of the cheapest seam on the final edge.
    /// The first of several equally cheap seams wins.
    pub fn cheapest_terminal(&self) -> u32 {
        let last = self.table.height - 1;
        (1..self.table.width).fold(0, |best, across| {
            cq!(
                self.table[(across, last)].cost < self.table[(best, last)].cost,
                across,
                best
            )
        })
    }

    /// Follow the back-pointers from a point on the final edge to the
    /// starting edge.
    pub fn seam_from(&self, terminal: u32) -> Seam {
        let last = self.table.height - 1;
        let cost = self.table[(terminal, last)].cost;
        let mut cells = Vec::with_capacity(self.table.height as usize);
        let mut at = Some(terminal);
        let mut along = self.table.height;
        while let Some(across) = at {
            along -= 1;
            cells.push(across);
            at = self.table[(across, along)].parent;
        }
        cells.reverse();
        Seam {
            orientation: self.orientation,
            cells,
            cost,
        }
    }

    pub fn cheapest_seam(&self) -> Seam {
        self.seam_from(self.cheapest_terminal())
    }

    /// Cumulative costs laid out in image coordinates, for display.
    pub fn cost_field(&self) -> TwoDimensionalMap<f64> {
        let (length, breadth) = (self.table.height, self.table.width);
        let (width, height) = self.orientation.locate(length, breadth);
        TwoDimensionalMap::from_fn(width, height, |x, y| {
            let (along, across) = self.orientation.unlocate(x, y);
            self.table[(across, along)].cost
        })
    }
}

/// Anything that can produce seams for itself.
pub trait SeamFinder {
    /// The cost table for the current picture.
    fn seam_costs(&self, orientation: Orientation) -> SeamCosts;

    /// The cheapest seam in the given orientation.
    fn find_seam(&self, orientation: Orientation) -> Seam {
        self.seam_costs(orientation).cheapest_seam()
    }
}

impl SeamFinder for PixelGrid {
    fn seam_costs(&self, orientation: Orientation) -> SeamCosts {
        let costs = SeamCosts::compute(&energy_map(self), orientation);
        debug!(
            ?orientation,
            width = self.width(),
            height = self.height(),
            "computed seam costs"
        );
        costs
    }
}
