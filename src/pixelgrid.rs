// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The mutable pixel grid
//!
//! A rectangular field of colors that shrinks one seam at a time.  The
//! cells live in a flat buffer whose stride never changes; removing a
//! seam splices one cell out of every row (or column) by shifting the
//! tail of that row (or column) over it, and then the active width (or
//! height) drops by one.  Neighbors are found arithmetically, and
//! anything that falls off the edge of the active area reads as black,
//! the way the border of the original picture would.

use crate::cq;
use crate::direction::Direction;
use crate::energy;
use crate::error::{Error, Result};
use crate::seamfinder::{Orientation, Seam};
use image::{GenericImageView, ImageBuffer, Pixel, Rgb, RgbImage};
use itertools::iproduct;
use tracing::trace;

/// Build an RGB pixel from its three channels.
pub fn rgb(r: u8, g: u8, b: u8) -> Rgb<u8> {
    Rgb::from_channels(r, g, b, 0)
}

/// The color of everything beyond the edge of the grid.
pub fn black() -> Rgb<u8> {
    rgb(0, 0, 0)
}

/// The color a seam is painted when it is marked for removal.
pub fn highlight_color() -> Rgb<u8> {
    rgb(255, 0, 0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    stride: u32,
    width: u32,
    height: u32,
    cells: Vec<Rgb<u8>>,
}

impl PixelGrid {
    /// A grid whose every cell is computed from its address.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb<u8>,
    {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let cells = iproduct!(0..height, 0..width)
            .map(|(y, x)| f(x, y))
            .collect();
        Ok(PixelGrid {
            stride: width,
            width,
            height,
            cells,
        })
    }

    /// Copy a decoded image into a fresh grid.
    pub fn from_image<I, P>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8> + 'static,
    {
        let (width, height) = image.dimensions();
        PixelGrid::from_fn(width, height, |x, y| image.get_pixel(x, y).to_rgb())
    }

    /// Build a grid from packed, row-major RGB triples.
    pub fn from_raw(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != width as usize * height as usize * 3 {
            return Err(Error::InvalidDimension { width, height });
        }
        PixelGrid::from_fn(width, height, |x, y| {
            let i = (y as usize * width as usize + x as usize) * 3;
            rgb(bytes[i], bytes[i + 1], bytes[i + 2])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    /// The color of a cell inside the active area.
    pub fn cell(&self, x: u32, y: u32) -> Rgb<u8> {
        debug_assert!(x < self.width && y < self.height);
        self.cells[self.get_index(x, y)]
    }

    pub fn set_cell(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        debug_assert!(x < self.width && y < self.height);
        let index = self.get_index(x, y);
        self.cells[index] = color;
    }

    /// The color at any signed address; outside the active area the
    /// grid reads as black.
    pub fn color_at(&self, x: i64, y: i64) -> Rgb<u8> {
        energy::color_at(self, x, y)
    }

    /// The cell one step away, or `None` at the border.
    pub fn neighbor(&self, x: u32, y: u32, direction: Direction) -> Option<(u32, u32)> {
        direction.step((x, y), self.width, self.height)
    }

    /// Paint every cell of a seam with the highlight color.
    pub fn highlight(&mut self, seam: &Seam) {
        for (x, y) in seam.coordinates() {
            if x < self.width && y < self.height {
                self.set_cell(x, y, highlight_color());
            }
        }
    }

    /// Splice a seam out of the grid, shrinking it by one along the
    /// seam's orientation.
    pub fn remove(&mut self, seam: &Seam) -> Result<()> {
        match seam.orientation {
            Orientation::Vertical => self.remove_vertical(&seam.cells),
            Orientation::Horizontal => self.remove_horizontal(&seam.cells),
        }
    }

    /// Remove one cell from every row.  `seam[y]` is the column of the
    /// cell to drop from row `y`.
    pub fn remove_vertical(&mut self, seam: &[u32]) -> Result<()> {
        self.check_breadth(self.width)?;
        check_seam(seam, self.height, self.width)?;
        for (y, &x) in seam.iter().enumerate().rev() {
            trace!(x, y, "splicing cell out of its row");
            let row = y as usize * self.stride as usize;
            let (from, to) = (row + x as usize, row + self.width as usize);
            self.cells.copy_within(from + 1..to, from);
        }
        self.width -= 1;
        Ok(())
    }

    /// Remove one cell from every column.  `seam[x]` is the row of the
    /// cell to drop from column `x`.
    pub fn remove_horizontal(&mut self, seam: &[u32]) -> Result<()> {
        self.check_breadth(self.height)?;
        check_seam(seam, self.width, self.height)?;
        for (x, &y) in seam.iter().enumerate().rev() {
            trace!(x, y, "splicing cell out of its column");
            for row in y..self.height - 1 {
                let here = self.get_index(x as u32, row);
                self.cells[here] = self.cells[here + self.stride as usize];
            }
        }
        self.height -= 1;
        Ok(())
    }

    fn check_breadth(&self, breadth: u32) -> Result<()> {
        cq!(
            breadth <= 1,
            Err(Error::Terminal {
                width: self.width,
                height: self.height
            }),
            Ok(())
        )
    }

    /// A snapshot of the active area.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| self.cell(x, y))
    }

    /// Every active cell in row-major order.
    pub fn rows(&self) -> Vec<Vec<Rgb<u8>>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.cell(x, y)).collect())
            .collect()
    }
}

// Walks the seam from its far end back to its start, the same order
// the splice runs in.  Each step's hint is the step before it, which has
// to sit straight behind or diagonally behind.  Nothing moves until the
// whole seam has passed.
fn check_seam(seam: &[u32], length: u32, breadth: u32) -> Result<()> {
    if seam.len() != length as usize {
        return Err(Error::DisconnectedSeam { step: seam.len() });
    }
    for (step, &across) in seam.iter().enumerate().rev() {
        let hint = cq!(step == 0, None, Some(seam[step - 1]));
        let adjacent = match hint {
            None => true,
            Some(prev) => (i64::from(prev) - i64::from(across)).abs() <= 1,
        };
        if across >= breadth || !adjacent {
            return Err(Error::DisconnectedSeam { step });
        }
    }
    Ok(())
}

impl GenericImageView for PixelGrid {
    type Pixel = Rgb<u8>;
    type InnerImageView = Self;

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        (0, 0, self.width, self.height)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        self.cell(x, y)
    }

    fn inner(&self) -> &Self::InnerImageView {
        self
    }
}

// The three-by-three picture used throughout the carving tests.
#[cfg(test)]
pub(crate) const THREE_BY_THREE: [u8; 27] = [
    10, 10, 10, 15, 15, 15, 5, 5, 5, //
    40, 40, 40, 20, 20, 20, 30, 30, 30, //
    100, 50, 0, 50, 50, 50, 60, 60, 60,
];
