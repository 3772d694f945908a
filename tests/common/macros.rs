/// Asserts that a grid (as returned by `GridView::to_rows`) matches ASCII art.
#[macro_export]
macro_rules! assert_grid {
    ($cells:expr, $art:expr) => {
        let expected = $crate::common::art($art);
        assert_eq!(
            $cells, expected,
            "grid mismatch\nexpected:\n{}",
            $art.join("\n")
        );
    };
}

/// Asserts that the number of live cells in a grid matches the expected value.
#[macro_export]
macro_rules! assert_live {
    ($cells:expr, $count:expr) => {
        let live = $cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&alive| alive)
            .count();
        assert_eq!(live, $count, "live cell count mismatch");
    };
}
