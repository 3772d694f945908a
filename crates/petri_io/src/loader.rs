//! Board file loader.
//!
//! ## Format
//!
//! Whitespace-separated non-negative integers; line breaks are not
//! significant.
//!
//! ```text
//! rows cols iters count
//! row col
//! row col
//! ...
//! ```
//!
//! Exactly `count` coordinate pairs must follow the header. Anything after
//! the last pair is ignored.

use crate::error::{IoError, Result};
use petri_core::Board;
use std::path::Path;

struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
    remaining: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().enumerate(),
            remaining: text.split_whitespace().count(),
        }
    }

    /// Next token as a number; `None` at end of input.
    fn next_number(&mut self) -> Result<Option<usize>> {
        let Some((index, token)) = self.inner.next() else {
            return Ok(None);
        };
        self.remaining -= 1;
        token.parse::<usize>().map(Some).map_err(|e| IoError::Parse {
            index,
            token: token.to_string(),
            message: e.to_string(),
        })
    }
}

/// Parses a board from the contents of a board file.
pub fn parse_board(text: &str) -> Result<Board> {
    let mut tokens = Tokens::new(text);

    let mut header = [0usize; 4];
    for (slot, field) in header.iter_mut().zip(["rows", "cols", "iters", "count"]) {
        *slot = tokens
            .next_number()?
            .ok_or_else(|| IoError::validation(format!("missing header field `{field}`")))?;
    }
    let [rows, cols, iters, count] = header;

    if rows == 0 || cols == 0 {
        return Err(IoError::validation(format!(
            "board must have at least one row and column, got {rows}x{cols}"
        )));
    }
    if rows.checked_mul(cols).is_none() {
        return Err(IoError::resource(format!("{rows}x{cols} board overflows")));
    }

    let mut cells = Vec::with_capacity(count.min(tokens.remaining / 2));
    for i in 0..count {
        let (Some(row), Some(col)) = (tokens.next_number()?, tokens.next_number()?) else {
            return Err(IoError::validation(format!(
                "wrong number of inputs for coordinates: expected {count} pairs, found {i}"
            )));
        };
        if row >= rows || col >= cols {
            return Err(IoError::validation(format!(
                "cell {i} at ({row}, {col}) is outside the {rows}x{cols} board"
            )));
        }
        cells.push((row, col));
    }

    Ok(Board {
        rows,
        cols,
        iters: iters as u64,
        cells,
    })
}

/// Reads and parses a board file.
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let path = path.as_ref();
    let context = || format!("loading board {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from(e).with_context(context()))?;
    let board = parse_board(&text).map_err(|e| e.with_context(context()))?;
    tracing::debug!(
        path = %path.display(),
        rows = board.rows,
        cols = board.cols,
        iters = board.iters,
        cells = board.cells.len(),
        "Board loaded"
    );
    Ok(board)
}
