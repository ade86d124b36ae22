// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing tiles to disk.  Workers only see the [`TileEncoder`] trait,
//! so tests can count or sabotage writes without touching a real
//! image codec.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::{self, File};
use std::path::Path;

use crate::config::IMAGE_BIT_DEPTH;
use crate::error::{Result, TileError};
use crate::render::PixelBuffer;

/// Serializes a finished tile to a file.  Implementations are shared by
/// every worker thread.
pub trait TileEncoder: Send + Sync {
    /// Write `tile` to `path`.  On failure nothing at `path` may be
    /// mistaken for a finished tile.
    fn encode(&self, path: &Path, tile: &PixelBuffer) -> Result<()>;
}

/// 8-bit grayscale PNG.
#[derive(Copy, Clone, Debug, Default)]
pub struct PngTileEncoder;

impl PngTileEncoder {
    fn write(output: File, tile: &PixelBuffer) -> std::io::Result<()> {
        let encoder = PNGEncoder::new(output);
        let size = tile.size() as u32;
        encoder.encode(
            tile.as_bytes(),
            size,
            size,
            ColorType::Gray(IMAGE_BIT_DEPTH),
        )
    }
}

impl TileEncoder for PngTileEncoder {
    fn encode(&self, path: &Path, tile: &PixelBuffer) -> Result<()> {
        // Nothing was created if the open fails, so nothing to clean up.
        let output = File::create(path).map_err(|e| TileError::encode(path, e))?;
        match PngTileEncoder::write(output, tile) {
            Ok(()) => Ok(()),
            Err(cause) => {
                // Don't leave a truncated tile behind.
                let _ = fs::remove_file(path);
                Err(TileError::encode(path, cause))
            }
        }
    }
}
