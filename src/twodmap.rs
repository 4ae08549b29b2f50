// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::cq;
use std::ops::{Index, IndexMut};

/// One entry of the seam digraph: the cheapest cost of any seam that
/// ends here, and the across-coordinate of the entry one step closer to
/// the starting edge.  `parent` is `None` on the starting edge itself.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct SeamStep {
    pub cost: f64,
    pub parent: Option<u32>,
}

/// An addressable two-dimensional field.  It holds a plain `f64` for
/// the energy map and a `SeamStep` for the seam digraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    values: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A field full of `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            values: vec![P::default(); width as usize * height as usize],
        }
    }

    /// A field whose every point is computed from its address.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            values,
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` when the
    /// buffer does not hold exactly `width * height` values.
    pub fn from_raw(width: u32, height: u32, values: Vec<P>) -> Option<Self> {
        cq!(
            values.len() == width as usize * height as usize,
            Some(TwoDimensionalMap {
                width,
                height,
                values
            }),
            None
        )
    }

    // Keep the index math in one place and never mess with it.  Same
    // row-major layout image.rs uses.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Every value, in row-major order.
    pub fn values(&self) -> &[P] {
        &self.values
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.values[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.values[index]
    }
}
