use crate::game::{Cell, Color, ShapeType};

/// The falling piece as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub cells: Vec<(i32, i32)>,
    pub color: Color,
}

/// Read-only copy of everything a frame needs to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
    /// `None` once the game is over.
    pub active: Option<ActiveSnapshot>,
    pub next: ShapeType,
    pub score: u64,
    pub lines_cleared: u64,
    pub game_over: bool,
}

impl Snapshot {
    pub fn board_cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Board cell with the active piece drawn over it.
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x as i32, y as i32)) {
                return Cell::Occupied(active.color);
            }
        }
        self.board_cell(x, y)
    }
}
