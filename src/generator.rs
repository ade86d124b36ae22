// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The worker pool.  A fixed number of scoped threads drain a single
//! [`WorkCursor`]; each claim is one column of one zoom level, and the
//! worker renders and writes every tile in it before claiming again.
//! Claims are disjoint and rendering is a pure function of the tile
//! coordinate, so the finished pyramid doesn't depend on the thread
//! count.

use crossbeam::thread::ScopedJoinHandle;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::cursor::{RowClaim, WorkCursor};
use crate::encoder::{PngTileEncoder, TileEncoder};
use crate::error::{Result, TileError};
use crate::fsops::{FileSystem, OsFileSystem};
use crate::pyramid::{check_zoom, tiles_per_axis, total_tiles, TileCoord, TileLayout};
use crate::render::render_tile;

/// What a worker, or a whole run, got done.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Tiles written in rows that completed.
    pub tiles_written: u64,
    /// Rows handed out by the cursor.
    pub rows_claimed: u64,
    /// Rows abandoned after a directory or tile failure.
    pub rows_failed: u64,
    /// Wall-clock time of the dispatch.
    pub elapsed: Duration,
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: RunSummary) {
        self.tiles_written += other.tiles_written;
        self.rows_claimed += other.rows_claimed;
        self.rows_failed += other.rows_failed;
    }
}

fn check_workload(max_zoom: u32, threads: usize) -> Result<()> {
    check_zoom(max_zoom)?;
    if threads == 0 {
        return Err(TileError::InvalidConfig(
            "at least one worker thread is required".to_string(),
        ));
    }
    Ok(())
}

/// Renders a tile pyramid into a [`TileLayout`].
pub struct TileGenerator {
    layout: TileLayout,
    encoder: Arc<dyn TileEncoder>,
    fs: Arc<dyn FileSystem>,
}

impl TileGenerator {
    /// A generator writing PNG tiles to the real filesystem.
    pub fn new(layout: TileLayout) -> Self {
        TileGenerator {
            layout,
            encoder: Arc::new(PngTileEncoder),
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Swap the tile encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn TileEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Swap the filesystem.
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// The layout tiles are written into.
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Reset the output directory, then render every level from 0 to
    /// `max_zoom` with `threads` workers.  A run with any failed row is
    /// an error.
    pub fn run(&self, max_zoom: u32, threads: usize) -> Result<RunSummary> {
        self.layout.config().validate()?;
        check_workload(max_zoom, threads)?;

        let side = (self.layout.config().image_size as u128) << max_zoom;
        info!(
            "Generating tile maps with zoom level {} using {} threads. Target resolution: {}x{} pixels",
            max_zoom, threads, side, side
        );

        self.layout.reset(self.fs.as_ref(), max_zoom)?;
        let summary = self.dispatch(max_zoom, threads)?;

        info!(
            tiles = summary.tiles_written,
            expected = %total_tiles(max_zoom),
            rows = summary.rows_claimed,
            failed = summary.rows_failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "tile generation finished"
        );
        if summary.rows_failed > 0 {
            return Err(TileError::Incomplete {
                failed_rows: summary.rows_failed,
            });
        }
        Ok(summary)
    }

    /// Start `threads` workers against a fresh cursor and wait for all
    /// of them.  The level directories must already exist.
    pub fn dispatch(&self, max_zoom: u32, threads: usize) -> Result<RunSummary> {
        check_workload(max_zoom, threads)?;
        let cursor = WorkCursor::new(max_zoom)?;
        let start = Instant::now();

        let mut summary = RunSummary::default();
        let mut panicked = false;
        crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<RunSummary>> = (0..threads)
                .map(|worker| {
                    let cursor = &cursor;
                    spawner.spawn(move |_| self.work(worker, cursor))
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(stats) => summary += stats,
                    Err(_) => panicked = true,
                }
            }
        })
        .map_err(|_| TileError::WorkerPanicked)?;

        if panicked {
            return Err(TileError::WorkerPanicked);
        }
        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    fn work(&self, worker: usize, cursor: &WorkCursor) -> RunSummary {
        let mut stats = RunSummary::default();
        while let Some(claim) = cursor.claim() {
            stats.rows_claimed += 1;
            if claim.x == 0 {
                info!("Generating level {}", claim.z);
            }
            match self.render_row(claim) {
                Ok(tiles) => {
                    stats.tiles_written += tiles;
                    debug!(worker, z = claim.z, x = claim.x, tiles, "row complete");
                }
                Err(e) => {
                    stats.rows_failed += 1;
                    error!(worker, z = claim.z, x = claim.x, "row abandoned: {}", e.chain());
                }
            }
        }
        debug!(worker, rows = stats.rows_claimed, "worker finished");
        stats
    }

    /// Render and write every tile in one claimed column, top to
    /// bottom.  The first failure abandons the rest of the column.
    pub fn render_row(&self, claim: RowClaim) -> Result<u64> {
        let column = self.layout.column_dir(claim.z, claim.x);
        self.fs
            .create_dir(&column)
            .map_err(|e| TileError::create_dir(&column, e))?;

        let config = self.layout.config();
        let rows = tiles_per_axis(claim.z);
        for y in 0..rows {
            let coord = TileCoord::new(claim.z, claim.x, y)?;
            let tile = render_tile(config, self.layout.bounds(coord));
            self.encoder.encode(&self.layout.tile_path(coord), &tile)?;
        }
        Ok(rows)
    }
}
