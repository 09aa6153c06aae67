use std::sync::OnceLock;

/// RGB color of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rectangular occupancy grid, row-major, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Matrix {
    /// Builds a matrix from rows of 0/1 values.
    pub fn from_rows<const W: usize>(rows: &[[u8; W]]) -> Self {
        Self {
            width: W,
            height: rows.len(),
            cells: rows.iter().flatten().map(|&v| v != 0).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for col in 0..self.width {
            for row in 0..self.height {
                cells.push(self.get(row, col));
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    pub fn reverse_rows(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                cells.push(self.get(row, col));
            }
        }
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// 90° clockwise: flip upside down, then transpose.
    pub fn rotate_cw(&self) -> Self {
        self.reverse_rows().transpose()
    }

    /// `(row, col)` of every occupied cell, top to bottom, left to right.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
    }
}

/// The four rotation states of a shape, each the clockwise turn of the one before.
/// Symmetric shapes repeat states; they are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSet([Matrix; 4]);

impl RotationSet {
    pub const LEN: usize = 4;

    pub fn build(canonical: &Matrix) -> Self {
        let r0 = canonical.clone();
        let r1 = r0.rotate_cw();
        let r2 = r1.rotate_cw();
        let r3 = r2.rotate_cw();
        Self([r0, r1, r2, r3])
    }

    pub fn get(&self, rotation: usize) -> &Matrix {
        &self.0[rotation % Self::LEN]
    }

    pub fn len(&self) -> usize {
        Self::LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matrix> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

static ROTATIONS: OnceLock<[RotationSet; 7]> = OnceLock::new();

impl ShapeType {
    pub const ALL: [ShapeType; 7] = [
        ShapeType::I,
        ShapeType::J,
        ShapeType::L,
        ShapeType::O,
        ShapeType::S,
        ShapeType::T,
        ShapeType::Z,
    ];

    pub fn canonical(self) -> Matrix {
        match self {
            ShapeType::I => Matrix::from_rows(&[[1, 1, 1, 1]]),
            ShapeType::J => Matrix::from_rows(&[[1, 0, 0], [1, 1, 1]]),
            ShapeType::L => Matrix::from_rows(&[[0, 0, 1], [1, 1, 1]]),
            ShapeType::O => Matrix::from_rows(&[[1, 1], [1, 1]]),
            ShapeType::S => Matrix::from_rows(&[[0, 1, 1], [1, 1, 0]]),
            ShapeType::T => Matrix::from_rows(&[[0, 1, 0], [1, 1, 1]]),
            ShapeType::Z => Matrix::from_rows(&[[1, 1, 0], [0, 1, 1]]),
        }
    }

    pub fn color(self) -> Color {
        match self {
            ShapeType::I => Color::rgb(0, 255, 255),
            ShapeType::J => Color::rgb(0, 0, 255),
            ShapeType::L => Color::rgb(255, 165, 0),
            ShapeType::O => Color::rgb(255, 255, 0),
            ShapeType::S => Color::rgb(0, 255, 0),
            ShapeType::T => Color::rgb(128, 0, 128),
            ShapeType::Z => Color::rgb(255, 0, 0),
        }
    }

    /// Rotation states shared by every piece of this shape. Built on first use.
    pub fn rotations(self) -> &'static RotationSet {
        let table =
            ROTATIONS.get_or_init(|| ShapeType::ALL.map(|s| RotationSet::build(&s.canonical())));
        &table[self as usize]
    }
}
