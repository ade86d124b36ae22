// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The work cursor hands out tile columns, one `(zoom, column)` pair
//! per claim, shallowest level first.  Every column of every level up
//! to the maximum is handed out exactly once; after that every claim
//! reports exhaustion.

use std::sync::Mutex;

use crate::error::Result;
use crate::pyramid::{check_zoom, tiles_per_axis};

/// One unit of work: every tile in column `x` of level `z`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowClaim {
    /// Zoom level.
    pub z: u32,
    /// Column within the level.
    pub x: u64,
}

#[derive(Debug)]
struct CursorState {
    depth: u32,
    row: u64,
}

/// A shared, ordered enumeration of `(zoom, column)` claims.
#[derive(Debug)]
pub struct WorkCursor {
    max_zoom: u32,
    state: Mutex<CursorState>,
}

impl WorkCursor {
    /// A fresh cursor at `(0, 0)`.  `max_zoom` is held to the engine
    /// ceiling.
    pub fn new(max_zoom: u32) -> Result<Self> {
        check_zoom(max_zoom)?;
        Ok(WorkCursor {
            max_zoom,
            state: Mutex::new(CursorState { depth: 0, row: 0 }),
        })
    }

    /// The deepest level this cursor hands out.
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Take the next unit of work, or `None` once everything has been
    /// handed out.  The lock is held only to read and advance the
    /// cursor.
    pub fn claim(&self) -> Option<RowClaim> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            // A worker panicked; the state itself is two integers and
            // is never left half-advanced.
            Err(poisoned) => poisoned.into_inner(),
        };
        if state.depth > self.max_zoom {
            return None;
        }
        let claim = RowClaim {
            z: state.depth,
            x: state.row,
        };
        state.row += 1;
        if state.row >= tiles_per_axis(state.depth) {
            state.row = 0;
            state.depth += 1;
        }
        Some(claim)
    }

    /// True once every claim has been handed out.
    pub fn is_exhausted(&self) -> bool {
        match self.state.lock() {
            Ok(state) => state.depth > self.max_zoom,
            Err(poisoned) => poisoned.into_inner().depth > self.max_zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_ZOOM;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn claim(z: u32, x: u64) -> Option<RowClaim> {
        Some(RowClaim { z, x })
    }

    #[test]
    fn hands_out_levels_in_order() {
        let cursor = WorkCursor::new(1).unwrap();
        assert_eq!(cursor.claim(), claim(0, 0));
        assert_eq!(cursor.claim(), claim(1, 0));
        assert_eq!(cursor.claim(), claim(1, 1));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.claim(), None);
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn zoom_zero_has_a_single_claim() {
        let cursor = WorkCursor::new(0).unwrap();
        assert!(!cursor.is_exhausted());
        assert_eq!(cursor.claim(), claim(0, 0));
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn refuses_levels_past_the_ceiling() {
        assert!(WorkCursor::new(MAX_ZOOM).is_ok());
        assert!(WorkCursor::new(MAX_ZOOM + 1).is_err());
        assert!(WorkCursor::new(64).is_err());
    }

    #[test]
    fn sequence_covers_every_column() {
        let cursor = WorkCursor::new(4).unwrap();
        let claims: Vec<RowClaim> = std::iter::from_fn(|| cursor.claim()).collect();
        let expected: Vec<RowClaim> = (0..=4)
            .flat_map(|z| (0..tiles_per_axis(z)).map(move |x| RowClaim { z, x }))
            .collect();
        assert_eq!(claims, expected);
    }

    #[test]
    fn concurrent_claims_are_disjoint_and_complete() {
        let cursor = Arc::new(WorkCursor::new(7).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cursor = cursor.clone();
                std::thread::spawn(move || {
                    let mut mine = vec![];
                    while let Some(c) = cursor.claim() {
                        mine.push(c);
                    }
                    mine
                })
            })
            .collect();

        let mut seen = HashSet::new();
        let mut total = 0;
        for handle in handles {
            let mine = handle.join().unwrap();
            // Each worker sees its own claims in cursor order.
            for pair in mine.windows(2) {
                assert!((pair[0].z, pair[0].x) < (pair[1].z, pair[1].x));
            }
            for c in mine {
                total += 1;
                assert!(seen.insert((c.z, c.x)), "duplicate claim {:?}", c);
            }
        }
        assert_eq!(total, (1 << 8) - 1);
        assert!(cursor.is_exhausted());
    }
}
