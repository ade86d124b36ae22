//! Contains the PlaneMapper struct, which describes a relationship
//! between a square of pixels with an origin at 0,0 and the rectangle
//! of the complex plane covered by a single tile.
use num::Complex;

/// The region of the complex plane covered by one tile.  `start` is
/// the corner with the smallest real and imaginary parts; `range` holds
/// the width in its real part and the height in its imaginary part.
/// The region is right-open: `start + range` belongs to the neighbour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileBounds {
    /// Corner with the smallest coordinates.
    pub start: Complex<f64>,
    /// Width (re) and height (im).
    pub range: Complex<f64>,
}

impl TileBounds {
    /// Bounds from a corner and a width/height pair.
    pub fn new(start_x: f64, start_y: f64, range_x: f64, range_y: f64) -> Self {
        TileBounds {
            start: Complex::new(start_x, start_y),
            range: Complex::new(range_x, range_y),
        }
    }

    /// The exclusive far corner.
    pub fn end(&self) -> Complex<f64> {
        self.start + self.range
    }
}

/// Describes the column and row of a pixel inside a tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps the pixels of a `size x size` tile onto the tile's bounds.
/// Samples are evenly spaced and the grid is right-open: the last
/// sample on each axis sits at `start + range * (size - 1) / size`.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Pixels on a side.
    pub size: usize,
    /// The tile's region of the complex plane.
    pub bounds: TileBounds,
    // Distance between neighbouring samples on each axis.
    step: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  A tile of zero pixels has no mapping.
    pub fn new(size: usize, bounds: TileBounds) -> Result<PlaneMapper, String> {
        if size == 0 {
            return Err("A tile must be at least one pixel wide.".to_string());
        }
        let step = (
            bounds.range.re / (size as f64),
            bounds.range.im / (size as f64),
        );
        Ok(PlaneMapper { size, bounds, step })
    }

    /// The total number of pixels in the tile.
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Never true; a mapper can't be built for an empty tile.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Given a pixel in the tile, return the point on the complex
    /// plane that it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.bounds.start.re + self.step.0 * (pixel.0 as f64),
            self.bounds.start.im + self.step.1 * (pixel.1 as f64),
        )
    }
}
