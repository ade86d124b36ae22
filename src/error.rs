// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while configuring, preparing, or rendering a tile
//! pyramid.  Configuration errors are caught before any filesystem
//! work starts; filesystem preparation errors abort before any worker
//! is dispatched; per-tile errors abort the row that owns the tile.

use failure::Fail;
use std::io;
use std::path::Path;

/// Everything that can go wrong in the tile engine.
#[derive(Debug, Fail)]
pub enum TileError {
    /// A configuration value cannot be used.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The requested zoom level is past the engine ceiling.
    #[fail(display = "Zoom level must be at most {} (got {})", max, zoom)]
    ZoomOutOfRange {
        /// The zoom level requested.
        zoom: u32,
        /// The engine ceiling.
        max: u32,
    },

    /// A tile coordinate lies outside its zoom level's grid.
    #[fail(display = "Tile {}/{}/{} is outside the pyramid", zoom, x, y)]
    TileOutOfRange {
        /// Zoom level.
        zoom: u32,
        /// Column.
        x: u64,
        /// Row.
        y: u64,
    },

    /// The output root could not be cleaned or recreated.
    #[fail(display = "Unable to clean {}", path)]
    Reset {
        /// The entry that could not be removed or created.
        path: String,
        /// Underlying filesystem error.
        #[cause]
        cause: io::Error,
    },

    /// A per-column tile directory could not be created.
    #[fail(display = "Unable to create directory {}", path)]
    CreateDir {
        /// The directory.
        path: String,
        /// Underlying filesystem error.
        #[cause]
        cause: io::Error,
    },

    /// A tile could not be written.
    #[fail(display = "Unable to write tile {}", path)]
    Encode {
        /// The tile file.
        path: String,
        /// Underlying encoder error.
        #[cause]
        cause: io::Error,
    },

    /// A worker thread died mid-run.
    #[fail(display = "A tile worker panicked")]
    WorkerPanicked,

    /// The run finished, but some rows were abandoned.
    #[fail(display = "{} tile row(s) failed to render", failed_rows)]
    Incomplete {
        /// How many claimed rows were abandoned.
        failed_rows: u64,
    },
}

impl TileError {
    /// The error followed by each of its causes, separated by `": "`.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        for cause in (self as &dyn Fail).iter_causes() {
            message.push_str(": ");
            message.push_str(&cause.to_string());
        }
        message
    }

    pub(crate) fn reset(path: &Path, cause: io::Error) -> Self {
        TileError::Reset {
            path: path.display().to_string(),
            cause,
        }
    }

    pub(crate) fn create_dir(path: &Path, cause: io::Error) -> Self {
        TileError::CreateDir {
            path: path.display().to_string(),
            cause,
        }
    }

    pub(crate) fn encode(path: &Path, cause: io::Error) -> Self {
        TileError::Encode {
            path: path.display().to_string(),
            cause,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TileError>;
