// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The immutable configuration shared by the evaluator, the tile
//! renderer and the pyramid layout.  The defaults describe the classic
//! Mandelbrot view; tests shrink the tile size and the iteration cap
//! to keep property checks fast.

use crate::error::{Result, TileError};
use num::Complex;

/// The deepest zoom level the engine will ever generate.  A level and
/// an index at that level are packed into a single 64-bit value
/// elsewhere, and 58 index bits plus 6 level bits is all that fits.
pub const MAX_ZOOM: u32 = 58;

/// Tiles are square, this many pixels on a side.
pub const IMAGE_SIZE: usize = 256;

/// Grayscale, one byte per sample.
pub const IMAGE_BIT_DEPTH: u8 = 8;

/// Iteration cap for the escape-time evaluator.  Intensities are
/// `255 - i`, so the cap can never exceed 256.
pub const MAX_ITERATIONS: usize = 256;

/// Left edge of the base viewport.
pub const MIN_X: f64 = -2.0;
/// Top edge of the base viewport.
pub const MIN_Y: f64 = -1.25;
/// Width of the base viewport.
pub const BASE_RANGE_X: f64 = 2.5;
/// Height of the base viewport.
pub const BASE_RANGE_Y: f64 = 2.5;

/// Tile configuration.  Once built, nothing in the engine mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct TileConfig {
    /// Pixels on a side of each tile.
    pub image_size: usize,
    /// Iterations before a point is presumed inside the set.
    pub max_iterations: usize,
    /// Corner of the base viewport with the smallest coordinates.
    pub origin: Complex<f64>,
    /// Width (real part) and height (imaginary part) of the base viewport.
    pub range: Complex<f64>,
    /// Extension of tile files, without the dot.
    pub extension: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            image_size: IMAGE_SIZE,
            max_iterations: MAX_ITERATIONS,
            origin: Complex::new(MIN_X, MIN_Y),
            range: Complex::new(BASE_RANGE_X, BASE_RANGE_Y),
            extension: "png".to_string(),
        }
    }
}

impl TileConfig {
    /// Same configuration, different tile size.
    pub fn with_image_size(mut self, image_size: usize) -> Self {
        self.image_size = image_size;
        self
    }

    /// Same configuration, different iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Reject configurations the engine can't render.
    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(TileError::InvalidConfig(
                "tile size must be at least one pixel".to_string(),
            ));
        }
        if self.image_size > u32::max_value() as usize {
            return Err(TileError::InvalidConfig(format!(
                "tile size {} is too large to encode",
                self.image_size
            )));
        }
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS {
            return Err(TileError::InvalidConfig(format!(
                "iteration cap must be between 1 and {}",
                MAX_ITERATIONS
            )));
        }
        let finite = |v: f64| v.is_finite();
        if !finite(self.origin.re) || !finite(self.origin.im) {
            return Err(TileError::InvalidConfig(
                "viewport origin must be finite".to_string(),
            ));
        }
        if !(finite(self.range.re) && self.range.re > 0.0)
            || !(finite(self.range.im) && self.range.im > 0.0)
        {
            return Err(TileError::InvalidConfig(
                "viewport range must be positive".to_string(),
            ));
        }
        if self.extension.is_empty() {
            return Err(TileError::InvalidConfig(
                "tile extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
