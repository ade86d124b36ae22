// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tile pyramid.  Level `z` cuts the base viewport into a
//! `2^z x 2^z` grid, and tile `(z, x, y)` lives at
//! `root/<z>/<x>/<y>.<ext>`: the column is a directory, the row is the
//! file.  Map viewers find tiles by that path, so it must not change.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{TileConfig, MAX_ZOOM};
use crate::error::{Result, TileError};
use crate::fsops::{clear_tree, FileSystem};
use crate::planes::TileBounds;

/// Number of columns (and of rows) at zoom level `z`.
#[inline]
pub fn tiles_per_axis(z: u32) -> u64 {
    1_u64 << z
}

/// Number of tiles in a pyramid with levels `0..=max_zoom`.
pub fn total_tiles(max_zoom: u32) -> u128 {
    (0..=max_zoom).map(|z| 1_u128 << (2 * z)).sum()
}

/// Fails unless `zoom` is within the engine ceiling.
pub fn check_zoom(zoom: u32) -> Result<()> {
    if zoom > MAX_ZOOM {
        return Err(TileError::ZoomOutOfRange {
            zoom,
            max: MAX_ZOOM,
        });
    }
    Ok(())
}

/// One tile's address in the pyramid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level.
    pub z: u32,
    /// Column.
    pub x: u64,
    /// Row.
    pub y: u64,
}

impl TileCoord {
    /// A checked coordinate: `z <= MAX_ZOOM` and `x, y < 2^z`.
    pub fn new(z: u32, x: u64, y: u64) -> Result<Self> {
        check_zoom(z)?;
        let n = tiles_per_axis(z);
        if x >= n || y >= n {
            return Err(TileError::TileOutOfRange { zoom: z, x, y });
        }
        Ok(TileCoord { z, x, y })
    }
}

/// Where tiles go on disk, and what part of the plane each one shows.
#[derive(Clone, Debug)]
pub struct TileLayout {
    root: PathBuf,
    config: TileConfig,
}

impl TileLayout {
    /// A layout rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P, config: TileConfig) -> Self {
        TileLayout {
            root: root.into(),
            config,
        }
    }

    /// The output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The tile configuration.
    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// `root/<z>`
    pub fn level_dir(&self, z: u32) -> PathBuf {
        self.root.join(z.to_string())
    }

    /// `root/<z>/<x>`
    pub fn column_dir(&self, z: u32, x: u64) -> PathBuf {
        self.level_dir(z).join(x.to_string())
    }

    /// `root/<z>/<x>/<y>.<ext>`
    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.column_dir(coord.z, coord.x)
            .join(format!("{}.{}", coord.y, self.config.extension))
    }

    /// The cell of the base viewport covered by `coord`.
    pub fn bounds(&self, coord: TileCoord) -> TileBounds {
        let n = tiles_per_axis(coord.z) as f64;
        let range_x = self.config.range.re / n;
        let range_y = self.config.range.im / n;
        TileBounds::new(
            self.config.origin.re + range_x * (coord.x as f64),
            self.config.origin.im + range_y * (coord.y as f64),
            range_x,
            range_y,
        )
    }

    /// Wipe the previous run and lay out one directory per zoom level.
    /// Column directories are left to the workers.  Must run before any
    /// worker starts.
    pub fn reset(&self, fs: &dyn FileSystem, max_zoom: u32) -> Result<()> {
        check_zoom(max_zoom)?;
        fs.create_dir_all(&self.root)
            .map_err(|e| TileError::reset(&self.root, e))?;
        clear_tree(fs, &self.root, &self.config.extension)?;
        debug!(root = %self.root.display(), "cleared previous tiles");

        for z in 0..=max_zoom {
            let level = self.level_dir(z);
            fs.create_dir(&level)
                .map_err(|e| TileError::reset(&level, e))?;
        }
        info!(
            root = %self.root.display(),
            levels = max_zoom + 1,
            "output directory ready"
        );
        Ok(())
    }
}
