// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tile renderer.  Samples a square grid over one tile's bounds
//! through the escape-time evaluator and hands back the grayscale
//! pixels, row-major.

use itertools::iproduct;

use crate::config::TileConfig;
use crate::escape;
use crate::planes::{Pixel, PlaneMapper, TileBounds};

/// A square buffer of 8-bit grayscale samples, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    size: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// An all-black buffer `size` pixels on a side.
    pub fn new(size: usize) -> Self {
        PixelBuffer {
            size,
            pixels: vec![0 as u8; size * size],
        }
    }

    /// Pixels on a side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The sample at column `col` of row `row`.
    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.pixels[row * self.size + col])
    }

    /// The raw row-major bytes, ready for an encoder.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Render one tile.  Every sample is independent of every other, and
/// the whole buffer is filled.
pub fn render_tile(config: &TileConfig, bounds: TileBounds) -> PixelBuffer {
    let size = config.image_size;
    let mut buffer = PixelBuffer::new(size);
    if let Ok(plane) = PlaneMapper::new(size, bounds) {
        for (row, col) in iproduct!(0..size, 0..size) {
            let point = plane.pixel_to_point(&Pixel(col, row));
            buffer.pixels[row * size + col] = escape::intensity(point, config.max_iterations);
        }
    }
    buffer
}
