// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Energy is the magnitude of the brightness gradient at a pixel,
//! measured with a Sobel operator over its eight neighbors.  Anything
//! beyond the edge of the image counts as black, so the border of a
//! picture always carries some energy, and a pixel with nothing but
//! black around it carries none.
//!
//! ```text
//!        Gx = (ul + 2l + dl) - (ur + 2r + dr)
//!        Gy = (ul + 2u + ur) - (dl + 2d + dr)
//!    e(x,y) = √(Gx² + Gy²)
//! ```

use crate::cq;
use crate::pixelgrid::black;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Rgb};

/// The largest energy a pixel can practically reach; used to scale
/// energy maps into grayscale.
pub const ENERGY_SCALE: f64 = 4.0;

/// Average of the three channels, normalized to [0, 1].
pub fn brightness(pixel: &Rgb<u8>) -> f64 {
    let sum: f64 = pixel.channels().iter().map(|c| f64::from(*c)).sum();
    sum / 3.0 / 255.0
}

/// The color at any signed address; beyond the edge of the image
/// everything reads as black.
pub fn color_at<I, P>(image: &I, x: i64, y: i64) -> Rgb<u8>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    cq!(
        x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height),
        black(),
        image.get_pixel(x as u32, y as u32).to_rgb()
    )
}

fn brightness_at<I, P>(image: &I, x: i64, y: i64) -> f64
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    brightness(&color_at(image, x, y))
}

/// The horizontal and vertical Sobel gradients at a single pixel.
pub fn gradients<I, P>(image: &I, x: u32, y: u32) -> (f64, f64)
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (x, y) = (i64::from(x), i64::from(y));
    let b = |dx: i64, dy: i64| brightness_at(image, x + dx, y + dy);
    let horizontal = (b(-1, -1) + 2.0 * b(-1, 0) + b(-1, 1)) - (b(1, -1) + 2.0 * b(1, 0) + b(1, 1));
    let vertical = (b(-1, -1) + 2.0 * b(0, -1) + b(1, -1)) - (b(-1, 1) + 2.0 * b(0, 1) + b(1, 1));
    (horizontal, vertical)
}

/// The energy of a single pixel.
pub fn energy_at<I, P>(image: &I, x: u32, y: u32) -> f64
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (horizontal, vertical) = gradients(image, x, y);
    (horizontal * horizontal + vertical * vertical).sqrt()
}

/// Compute the energy of every pixel in an image.
pub fn energy_map<I, P>(image: &I) -> TwoDimensionalMap<f64>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| energy_at(image, x, y))
}

/// Render a scalar field as grayscale, with `scale` mapping to white.
/// Values past `scale` saturate.
pub fn field_to_image(field: &TwoDimensionalMap<f64>, scale: f64) -> GrayImage {
    ImageBuffer::from_fn(field.width, field.height, |x, y| {
        let level = cq!(scale > 0.0, field[(x, y)] / scale, 0.0);
        let shade = (level * 255.0).max(0.0).min(255.0).round();
        Luma::from_channels(num_traits::cast::<f64, u8>(shade).unwrap_or(255), 0, 0, 0)
    })
}

/// The largest value in a field, or zero for an empty one.
pub fn field_maximum(field: &TwoDimensionalMap<f64>) -> f64 {
    field.values().iter().cloned().fold(0.0, f64::max)
}
