pub mod board;
pub mod geometry;
pub mod piece;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod timing;

pub use board::{Board, Cell};
pub use geometry::Geometry;
pub use piece::{Piece, random_shape};
pub use shape::{Color, Matrix, RotationSet, ShapeType};
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use state::{Command, Game, Phase};
pub use timing::{Direction, Governor, HeldKeys, Tick};
