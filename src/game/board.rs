use crate::game::{Color, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Fixed-size grid of locked blocks, row-major, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = self.idx(0, y);
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| !c.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Whether `piece` fits: every occupied cell inside the side walls and above the
    /// floor, and not on a locked block. Cells above row 0 skip the occupancy check.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        for (x, y) in piece.cells() {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return false;
            }
            if y >= 0 && !self.get(x as usize, y as usize).is_empty() {
                return false;
            }
        }
        true
    }

    /// Writes the piece into the grid and clears full rows. Returns the number of
    /// rows cleared. Cells above row 0 are dropped.
    pub fn lock(&mut self, piece: &Piece) -> usize {
        for (x, y) in piece.cells() {
            if y < 0 || x < 0 {
                continue;
            }
            let (xu, yu) = (x as usize, y as usize);
            if xu < self.width && yu < self.height {
                self.set(xu, yu, Cell::Occupied(piece.color));
            }
        }
        self.clear_lines()
    }

    /// Removes every full row, keeps the rest in order and pads the top with empty
    /// rows. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let kept: Vec<usize> = (0..self.height).filter(|&y| !self.is_row_full(y)).collect();
        let cleared = self.height - kept.len();
        if cleared == 0 {
            return 0;
        }
        let mut new_cells = vec![Cell::Empty; cleared * self.width];
        new_cells.reserve(kept.len() * self.width);
        for y in kept {
            new_cells.extend_from_slice(self.row(y));
        }
        self.cells = new_cells;
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ShapeType;

    const RED: Color = Color::rgb(255, 0, 0);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width {
            board.set(x, y, Cell::Occupied(RED));
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(10, 20);
        assert_eq!(board.cells.len(), 200);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn walls_and_floor_reject() {
        let board = Board::new(10, 20);
        let bar = Piece::new(ShapeType::I, 0, 0);
        assert!(board.is_valid(&bar));
        assert!(!board.is_valid(&bar.shifted(-1, 0)));
        assert!(board.is_valid(&bar.shifted(6, 0)));
        assert!(!board.is_valid(&bar.shifted(7, 0)));
        assert!(board.is_valid(&bar.shifted(0, 19)));
        assert!(!board.is_valid(&bar.shifted(0, 20)));
    }

    #[test]
    fn cells_above_the_top_skip_occupancy() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 0);
        let above = Piece::new(ShapeType::I, 3, -1);
        assert!(board.is_valid(&above));
        assert!(!board.is_valid(&above.shifted(0, 1)));
        // Still subject to the side walls.
        assert!(!board.is_valid(&Piece::new(ShapeType::I, -1, -3)));
    }

    #[test]
    fn collision_with_locked_block() {
        let mut board = Board::new(10, 20);
        board.set(4, 10, Cell::Occupied(RED));
        let bar = Piece::new(ShapeType::I, 3, 10);
        assert!(!board.is_valid(&bar));
        assert!(board.is_valid(&bar.shifted(0, 1)));
    }

    #[test]
    fn lock_writes_exactly_the_piece_cells() {
        let mut board = Board::new(10, 20);
        let t = Piece::new(ShapeType::T, 2, 18);
        let cleared = board.lock(&t);
        assert_eq!(cleared, 0);
        assert_eq!(board.occupied_count(), 4);
        for (x, y) in t.cells() {
            assert_eq!(board.get(x as usize, y as usize), Cell::Occupied(t.color));
        }
    }

    #[test]
    fn lock_drops_cells_above_the_board() {
        let mut board = Board::new(10, 20);
        let vertical = Piece::new(ShapeType::I, 0, -2).rotated();
        board.lock(&vertical);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.get(0, 0), Cell::Occupied(vertical.color));
        assert_eq!(board.get(0, 1), Cell::Occupied(vertical.color));
    }

    #[test]
    fn clear_lines_shifts_rows_down() {
        let mut board = Board::new(4, 5);
        board.set(1, 2, Cell::Occupied(RED));
        fill_row(&mut board, 3);
        board.set(0, 4, Cell::Occupied(RED));
        fill_row(&mut board, 1);

        let cleared = board.clear_lines();
        assert_eq!(cleared, 2);
        assert_eq!(board.cells.len(), 20);
        assert!(board.row(0).iter().all(|c| c.is_empty()));
        assert!(board.row(1).iter().all(|c| c.is_empty()));
        assert!(board.row(2).iter().all(|c| c.is_empty()));
        assert_eq!(board.get(1, 3), Cell::Occupied(RED));
        assert_eq!(board.get(0, 4), Cell::Occupied(RED));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn clear_lines_without_full_rows_is_noop() {
        let mut board = Board::new(4, 4);
        board.set(0, 3, Cell::Occupied(RED));
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn lock_completing_a_row_clears_it() {
        let mut board = Board::new(4, 3);
        for y in 1..3 {
            board.set(0, y, Cell::Occupied(RED));
            board.set(1, y, Cell::Occupied(RED));
        }
        let square = Piece::new(ShapeType::O, 2, 1);
        assert!(board.is_valid(&square));
        let cleared = board.lock(&square);
        assert_eq!(cleared, 2);
        assert_eq!(board.occupied_count(), 0);
    }
}
