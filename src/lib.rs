#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot tile pyramid generator
//!
//! The Mandelbrot set is drawn by taking a point on the complex plane,
//! repeatedly squaring it and adding the original point back, and
//! counting how many rounds it takes to run away.  Points that escape
//! quickly are painted bright; points that never escape are painted
//! black.
//!
//! This crate renders that picture as a zoomable pyramid of square
//! grayscale tiles, the kind a slippy-map viewer expects.  Zoom level
//! `z` cuts a fixed region of the plane into `2^z x 2^z` tiles, and
//! tile `(z, x, y)` is written to `root/z/x/y.png`.  Levels are
//! generated shallowest first by a pool of worker threads that claim
//! one column of tiles at a time from a shared cursor.

pub mod config;
pub mod cursor;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod fsops;
pub mod generator;
pub mod logging;
pub mod planes;
pub mod pyramid;
pub mod render;

pub use config::{TileConfig, MAX_ZOOM};
pub use error::{Result, TileError};
pub use generator::{RunSummary, TileGenerator};
pub use pyramid::{TileCoord, TileLayout};
