// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the state machine
//!
//! Carving runs in two beats.  The first finds the cheapest seam and
//! paints it; the second splices the painted seam out of the grid.  The
//! axis for the next seam is picked only after a removal completes, so
//! changing the mode never splits a seam between two orientations.
//!
//! The whole seam digraph is recomputed for every seam.  It should be
//! possible to recompute only the band around the last seam, but the
//! recomputed costs are what callers see, so they stay exact.

use crate::energy::energy_map;
use crate::error::{Error, Result};
use crate::pixelgrid::PixelGrid;
use crate::seamfinder::{Orientation, Seam, SeamFinder};
use crate::twodmap::TwoDimensionalMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// How the axis of the next seam is chosen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarveMode {
    /// Always remove vertical seams.
    Vertical,
    /// Always remove horizontal seams.
    Horizontal,
    /// Flip a coin after every removal.
    Random,
}

/// What a single `tick` did.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Highlighted(Seam),
    Removed(Orientation),
}

pub struct SeamCarver {
    grid: PixelGrid,
    mode: CarveMode,
    orientation: Orientation,
    marked: Option<Seam>,
    rng: StdRng,
}

impl SeamCarver {
    /// Creates a new SeamCarver with a grid to be carved.  `seed` feeds
    /// the coin flips of `CarveMode::Random`.
    pub fn new(grid: PixelGrid, mode: CarveMode, seed: u64) -> Self {
        let orientation = match mode {
            CarveMode::Horizontal => Orientation::Horizontal,
            CarveMode::Vertical | CarveMode::Random => Orientation::Vertical,
        };
        SeamCarver {
            grid,
            mode,
            orientation,
            marked: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    pub fn mode(&self) -> CarveMode {
        self.mode
    }

    /// Takes effect after the next completed removal.
    pub fn set_mode(&mut self, mode: CarveMode) {
        self.mode = mode;
    }

    /// The axis of the seam being, or about to be, carved.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn marked(&self) -> Option<&Seam> {
        self.marked.as_ref()
    }

    /// Nothing further can be carved once either side is down to one
    /// pixel.
    pub fn is_terminal(&self) -> bool {
        self.grid.width() <= 1 || self.grid.height() <= 1
    }

    fn terminal(&self) -> Error {
        Error::Terminal {
            width: self.grid.width(),
            height: self.grid.height(),
        }
    }

    /// Find the cheapest seam along the current axis, paint it, and hold
    /// on to it for `remove_marked`.  Asking twice returns the seam that
    /// is already marked.
    pub fn highlight(&mut self) -> Result<&Seam> {
        if self.is_terminal() {
            return Err(self.terminal());
        }
        if self.marked.is_none() {
            let seam = self.grid.find_seam(self.orientation);
            debug!(orientation = ?seam.orientation, cost = seam.cost, "highlighting seam");
            self.grid.highlight(&seam);
            self.marked = Some(seam);
        }
        self.marked.as_ref().ok_or(Error::EmptyStructureAccess)
    }

    /// Splice the marked seam out of the grid and pick the axis of the
    /// next one.
    pub fn remove_marked(&mut self) -> Result<Orientation> {
        let seam = self.marked.take().ok_or(Error::EmptyStructureAccess)?;
        self.grid.remove(&seam)?;
        debug!(
            orientation = ?seam.orientation,
            width = self.grid.width(),
            height = self.grid.height(),
            "removed seam"
        );
        self.orientation = match self.mode {
            CarveMode::Vertical => Orientation::Vertical,
            CarveMode::Horizontal => Orientation::Horizontal,
            CarveMode::Random => {
                if self.rng.gen::<bool>() {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                }
            }
        };
        Ok(seam.orientation)
    }

    /// One beat of the carving cycle: remove the marked seam if there is
    /// one, otherwise mark the next.
    pub fn tick(&mut self) -> Result<Tick> {
        if self.is_terminal() {
            return Err(self.terminal());
        }
        if self.marked.is_some() {
            self.remove_marked().map(Tick::Removed)
        } else {
            self.highlight().map(|seam| Tick::Highlighted(seam.clone()))
        }
    }

    fn carve_once(&mut self, orientation: Orientation) -> Result<()> {
        let seam = self.grid.find_seam(orientation);
        self.grid.remove(&seam)
    }

    /// Carve seams until the grid is `width` by `height`, alternating
    /// axes while both sides are too large.  A pending marked seam is
    /// removed first and counts toward the target, so the target must
    /// leave room for it.
    pub fn carve_to(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let (mut have_width, mut have_height) = (self.grid.width(), self.grid.height());
        match self.marked.as_ref().map(|seam| seam.orientation) {
            Some(Orientation::Vertical) => have_width -= 1,
            Some(Orientation::Horizontal) => have_height -= 1,
            None => {}
        }
        if have_width < width || have_height < height {
            return Err(Error::CannotUpscale);
        }
        if self.marked.is_some() {
            self.remove_marked()?;
        }
        info!(
            from_width = self.grid.width(),
            from_height = self.grid.height(),
            width,
            height,
            "carving"
        );
        let mut direction = Orientation::Vertical;
        while self.grid.width() > width && self.grid.height() > height {
            self.carve_once(direction)?;
            direction = direction.turn();
        }
        while self.grid.width() > width {
            self.carve_once(Orientation::Vertical)?;
        }
        while self.grid.height() > height {
            self.carve_once(Orientation::Horizontal)?;
        }
        Ok(())
    }

    /// The energy of every remaining pixel.
    pub fn energy_field(&self) -> TwoDimensionalMap<f64> {
        energy_map(&self.grid)
    }

    /// Cumulative seam costs along the current axis, in image
    /// coordinates.
    pub fn seam_cost_field(&self) -> TwoDimensionalMap<f64> {
        self.grid.seam_costs(self.orientation).cost_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixelgrid::{highlight_color, rgb, THREE_BY_THREE};
    use image::GenericImageView;

    fn gray(v: u8) -> image::Rgb<u8> {
        rgb(v, v, v)
    }

    fn three_by_three(mode: CarveMode) -> SeamCarver {
        SeamCarver::new(PixelGrid::from_raw(3, 3, &THREE_BY_THREE).unwrap(), mode, 0)
    }

    #[test]
    fn vertical_highlight_then_remove() {
        let mut carver = three_by_three(CarveMode::Vertical);
        match carver.tick().unwrap() {
            Tick::Highlighted(seam) => {
                assert_eq!(seam.cells, [2, 1, 1]);
                assert!((seam.cost - 1.452838).abs() < 0.001);
            }
            other => panic!("expected a highlight, got {:?}", other),
        }
        assert_eq!(
            carver.grid().rows(),
            vec![
                vec![gray(10), gray(15), highlight_color()],
                vec![gray(40), highlight_color(), gray(30)],
                vec![rgb(100, 50, 0), highlight_color(), gray(60)],
            ]
        );
        assert_eq!(carver.grid().width(), 3);

        assert_eq!(carver.tick().unwrap(), Tick::Removed(Orientation::Vertical));
        assert_eq!(
            carver.grid().rows(),
            vec![
                vec![gray(10), gray(15)],
                vec![gray(40), gray(30)],
                vec![rgb(100, 50, 0), gray(60)],
            ]
        );
        assert!(carver.marked().is_none());
    }

    #[test]
    fn horizontal_highlight_then_remove() {
        let mut carver = three_by_three(CarveMode::Horizontal);
        let seam = carver.highlight().unwrap().clone();
        assert_eq!(seam.cells, [0, 0, 0]);
        assert!((seam.cost - 1.246849).abs() < 0.001);
        assert_eq!(carver.remove_marked().unwrap(), Orientation::Horizontal);
        assert_eq!(
            carver.grid().rows(),
            vec![
                vec![gray(40), gray(20), gray(30)],
                vec![rgb(100, 50, 0), gray(50), gray(60)],
            ]
        );
    }

    #[test]
    fn removal_needs_a_mark() {
        let mut carver = three_by_three(CarveMode::Vertical);
        assert_eq!(carver.remove_marked(), Err(Error::EmptyStructureAccess));
    }

    #[test]
    fn highlighting_twice_keeps_the_first_seam() {
        let mut carver = three_by_three(CarveMode::Vertical);
        let first = carver.highlight().unwrap().clone();
        let second = carver.highlight().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn mode_changes_wait_for_the_removal() {
        let mut carver = three_by_three(CarveMode::Vertical);
        carver.highlight().unwrap();
        carver.set_mode(CarveMode::Horizontal);
        assert_eq!(carver.orientation(), Orientation::Vertical);
        assert_eq!(carver.remove_marked().unwrap(), Orientation::Vertical);
        assert_eq!(carver.orientation(), Orientation::Horizontal);
        assert_eq!(carver.grid().dimensions(), (2, 3));
    }

    #[test]
    fn each_cycle_shrinks_one_side_by_one() {
        let grid = PixelGrid::from_fn(9, 7, |x, y| rgb((x * 20) as u8, (y * 30) as u8, 7)).unwrap();
        let mut carver = SeamCarver::new(grid, CarveMode::Random, 6);
        let mut seen = (false, false);
        for _ in 0..6 {
            let (w, h) = carver.grid().dimensions();
            carver.highlight().unwrap();
            match carver.remove_marked().unwrap() {
                Orientation::Vertical => {
                    seen.0 = true;
                    assert_eq!(carver.grid().dimensions(), (w - 1, h));
                }
                Orientation::Horizontal => {
                    seen.1 = true;
                    assert_eq!(carver.grid().dimensions(), (w, h - 1));
                }
            }
        }
        assert!(seen.0);
    }

    #[test]
    fn random_mode_is_reproducible() {
        let run = |seed| {
            let grid = PixelGrid::from_fn(12, 12, |x, y| rgb((x * y) as u8, x as u8, y as u8)).unwrap();
            let mut carver = SeamCarver::new(grid, CarveMode::Random, seed);
            (0..8)
                .map(|_| {
                    carver.highlight().unwrap();
                    carver.remove_marked().unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn stops_at_one_pixel() {
        let grid = PixelGrid::from_fn(2, 3, |_, _| gray(9)).unwrap();
        let mut carver = SeamCarver::new(grid, CarveMode::Vertical, 0);
        carver.tick().unwrap();
        carver.tick().unwrap();
        assert!(carver.is_terminal());
        assert_eq!(
            carver.tick(),
            Err(Error::Terminal {
                width: 1,
                height: 3
            })
        );
        assert!(carver.highlight().is_err());
    }

    #[test]
    fn carve_to_reaches_the_target() {
        let grid = PixelGrid::from_fn(10, 8, |x, y| rgb((x * 25) as u8, (y * 31) as u8, 0)).unwrap();
        let mut carver = SeamCarver::new(grid, CarveMode::Vertical, 0);
        carver.carve_to(6, 7).unwrap();
        assert_eq!(carver.grid().dimensions(), (6, 7));
        assert_eq!(carver.carve_to(7, 7), Err(Error::CannotUpscale));
        assert_eq!(
            carver.carve_to(0, 7),
            Err(Error::InvalidDimension {
                width: 0,
                height: 7
            })
        );
    }

    #[test]
    fn carve_to_counts_the_marked_seam() {
        let grid = PixelGrid::from_fn(5, 5, |x, y| rgb((x * 40) as u8, (y * 50) as u8, 3)).unwrap();
        let mut carver = SeamCarver::new(grid, CarveMode::Vertical, 0);
        carver.highlight().unwrap();
        assert_eq!(carver.carve_to(5, 5), Err(Error::CannotUpscale));
        assert_eq!(carver.grid().width(), 5);
        assert!(carver.marked().is_some());

        carver.carve_to(4, 5).unwrap();
        assert_eq!(carver.grid().dimensions(), (4, 5));
        assert!(carver.marked().is_none());

        let grid = PixelGrid::from_fn(5, 5, |x, y| rgb((x * 40) as u8, (y * 50) as u8, 3)).unwrap();
        let mut carver = SeamCarver::new(grid, CarveMode::Horizontal, 0);
        carver.highlight().unwrap();
        assert_eq!(carver.carve_to(3, 5), Err(Error::CannotUpscale));
        carver.carve_to(3, 4).unwrap();
        assert_eq!(carver.grid().dimensions(), (3, 4));
    }

    #[test]
    fn debug_fields_follow_the_grid() {
        let carver = three_by_three(CarveMode::Vertical);
        let energy = carver.energy_field();
        assert_eq!((energy.width, energy.height), (3, 3));
        let costs = carver.seam_cost_field();
        assert!((costs[(1, 2)] - 1.452838).abs() < 0.001);
    }
}
