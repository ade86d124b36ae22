// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  A point `c` on the complex plane is
//! iterated through `z = z * z + c`, starting from zero, until either
//! component of `z` leaves the square `[-2, 2] x [-2, 2]` or the
//! iteration cap runs out.  The faster a point escapes, the brighter
//! its pixel.

use num::Complex;

/// Escape bound for each component of `z`.  This is a box test, not a
/// modulus test: `|re| > 2 || |im| > 2`.
pub const ESCAPE_BOUND: f64 = 2.0;

/// Intensity given to points that never escape.
pub const INTERIOR: u8 = 0;

/// Returns the iteration on which `c` escaped, or `None` if it stayed
/// bounded for `max_iterations` steps.
#[inline]
pub fn escape_iteration(c: Complex<f64>, max_iterations: usize) -> Option<usize> {
    let mut z = Complex {
        re: 0.0_f64,
        im: 0.0_f64,
    };
    for i in 0..max_iterations {
        z = z * z + c;
        if z.re.abs() > ESCAPE_BOUND || z.im.abs() > ESCAPE_BOUND {
            return Some(i);
        }
    }
    None
}

/// Maps a point to a grayscale intensity: `255 - i` for a point that
/// escapes on iteration `i`, and [`INTERIOR`] for one that doesn't.
///
/// `i` is always below `max_iterations`, which a valid configuration
/// holds to at most 256, so the subtraction can't underflow.  It
/// saturates anyway for callers that hand in a larger cap.
#[inline]
pub fn intensity(c: Complex<f64>, max_iterations: usize) -> u8 {
    match escape_iteration(c, max_iterations) {
        Some(i) => 255_usize.saturating_sub(i) as u8,
        None => INTERIOR,
    }
}
