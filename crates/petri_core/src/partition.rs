//! Static spatial partitioning of the grid among workers.
//!
//! One axis is split into contiguous, inclusive spans; the other axis is
//! given to every worker in full. Assignment happens once, before any thread
//! exists, and never changes for the lifetime of a run.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Axis along which the grid is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartitionAxis {
    #[default]
    Rows,
    Columns,
}

impl fmt::Display for PartitionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("rows"),
            Self::Columns => f.write_str("columns"),
        }
    }
}

/// Inclusive range `[start, end]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

// Spans are never empty
#[allow(clippy::len_without_is_empty)]
impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span {start}:{end} is empty");
        Self { start, end }
    }

    /// Span covering `[0, extent - 1]`.
    #[must_use]
    pub fn full(extent: usize) -> Self {
        Self::new(0, extent - 1)
    }

    /// Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    #[must_use]
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// The rectangle of cells one worker owns for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub worker: usize,
    pub rows: Span,
    pub cols: Span,
}

impl Region {
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.contains(row) && self.cols.contains(col)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tid {}: rows: {}:{} ({}) cols: {}:{} ({})",
            self.worker,
            self.rows.start,
            self.rows.end,
            self.rows.len(),
            self.cols.start,
            self.cols.end,
            self.cols.len()
        )
    }
}

/// Splits `extent` units into `workers` contiguous spans, ordered by worker.
///
/// The first `extent % workers` spans get one extra unit. Fails when any
/// span would be empty.
pub fn partition(extent: usize, workers: usize) -> Result<Vec<Span>> {
    if workers == 0 {
        return Err(EngineError::config("worker count must be at least 1"));
    }
    if workers > extent {
        return Err(EngineError::config(format!(
            "cannot split {extent} units among {workers} workers without empty partitions"
        )));
    }

    let base = extent / workers;
    let remainder = extent % workers;
    let mut spans = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = if worker < remainder { base + 1 } else { base };
        spans.push(Span::new(start, start + len - 1));
        start += len;
    }
    debug_assert_eq!(start, extent);
    Ok(spans)
}

/// Assigns one region per worker for a `rows × cols` grid.
pub fn assign(rows: usize, cols: usize, workers: usize, axis: PartitionAxis) -> Result<Vec<Region>> {
    let extent = match axis {
        PartitionAxis::Rows => rows,
        PartitionAxis::Columns => cols,
    };
    let regions = partition(extent, workers)?
        .into_iter()
        .enumerate()
        .map(|(worker, span)| match axis {
            PartitionAxis::Rows => Region {
                worker,
                rows: span,
                cols: Span::full(cols),
            },
            PartitionAxis::Columns => Region {
                worker,
                rows: Span::full(rows),
                cols: span,
            },
        })
        .collect();
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let spans = partition(9, 3).unwrap();
        assert_eq!(spans, vec![Span::new(0, 2), Span::new(3, 5), Span::new(6, 8)]);
    }

    #[test]
    fn test_remainder_goes_to_earliest_workers() {
        let spans = partition(10, 4).unwrap();
        let lens: Vec<usize> = spans.iter().map(Span::len).collect();
        assert_eq!(lens, vec![3, 3, 2, 2]);
        assert_eq!(spans[1], Span::new(3, 5));
        assert_eq!(spans[3], Span::new(8, 9));
    }

    #[test]
    fn test_one_unit_per_worker() {
        let spans = partition(4, 4).unwrap();
        assert!(spans.iter().all(|s| s.len() == 1));
    }

    #[test]
    fn test_more_workers_than_units_fails() {
        let err = partition(3, 4).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_zero_workers_fails() {
        assert!(partition(5, 0).is_err());
    }

    #[test]
    fn test_assign_columns_gives_full_rows() {
        let regions = assign(6, 8, 3, PartitionAxis::Columns).unwrap();
        assert_eq!(regions.len(), 3);
        for region in &regions {
            assert_eq!(region.rows, Span::full(6));
        }
        assert_eq!(regions[0].cols, Span::new(0, 2));
        assert_eq!(regions[2].cols, Span::new(6, 7));
    }

    #[test]
    fn test_assign_rows_checks_row_extent() {
        // 2 rows cannot host 3 workers even though there are plenty of columns
        assert!(assign(2, 100, 3, PartitionAxis::Rows).is_err());
        assert!(assign(2, 100, 3, PartitionAxis::Columns).is_ok());
    }

    #[test]
    fn test_region_display() {
        let region = Region {
            worker: 1,
            rows: Span::new(3, 5),
            cols: Span::full(10),
        };
        assert_eq!(region.to_string(), "tid 1: rows: 3:5 (3) cols: 0:9 (10)");
    }
}
