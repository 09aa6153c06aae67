use crate::MIN_COLUMNS;

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub columns: usize,
    pub rows: usize,
}

impl Geometry {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Sizes a board to a window: about `approx_block` units per column, never fewer
    /// than [`MIN_COLUMNS`] columns, rows filled with square blocks. Both dimensions
    /// are clamped to at least one cell.
    pub fn fit(width: usize, height: usize, approx_block: usize) -> Self {
        let columns = (width / approx_block.max(1)).max(MIN_COLUMNS);
        let block = (width / columns).max(1);
        let rows = (height / block).max(1);
        Self { columns, rows }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(MIN_COLUMNS, 20)
    }
}
