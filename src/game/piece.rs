use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::{Color, Matrix, ShapeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: ShapeType,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Piece {
    pub fn new(shape: ShapeType, x: i32, y: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            x,
            y,
            color: shape.color(),
        }
    }

    /// New piece centered horizontally on a board `columns` wide, at the top row.
    pub fn spawn(shape: ShapeType, columns: usize) -> Self {
        let width = shape.rotations().get(0).width();
        let x = (columns / 2) as i32 - (width / 2) as i32;
        Self::new(shape, x, 0)
    }

    pub fn matrix(&self) -> &'static Matrix {
        self.shape.rotations().get(self.rotation)
    }

    pub fn width(&self) -> usize {
        self.matrix().width()
    }

    pub fn height(&self) -> usize {
        self.matrix().height()
    }

    /// Absolute board coordinates `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix()
            .occupied()
            .map(|(i, j)| (self.x + j as i32, self.y + i as i32))
    }

    pub fn rotated(&self) -> Self {
        let mut next = self.clone();
        next.rotation = (next.rotation + 1) % self.shape.rotations().len();
        next
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.x += dx;
        next.y += dy;
        next
    }
}

/// Uniform pick from the fixed shape set.
pub fn random_shape<R: Rng + ?Sized>(rng: &mut R) -> ShapeType {
    *ShapeType::ALL.choose(rng).unwrap_or(&ShapeType::I)
}
