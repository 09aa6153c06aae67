use std::mem;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Settings;
use crate::game::{
    ActiveSnapshot, Board, Direction, Geometry, Governor, HeldKeys, Piece, Snapshot, Tick,
    random_shape,
};
use crate::{LINE_CLEAR_POINTS, LOCK_POINTS};

/// Discrete input events fed in by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    GameOver,
}

pub struct Game {
    pub board: Board,
    pub current: Piece,
    pub next: Piece,
    pub phase: Phase,
    pub score: u64,
    pub lines_cleared: u64,
    governor: Governor,
    rng: StdRng,
}

impl Game {
    pub fn new(geometry: Geometry, settings: &Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let governor = Governor::new(settings.fall_interval, settings.repeat_delay);
        Self::with_rng(geometry, governor, rng)
    }

    /// Default timing, deterministic piece stream.
    pub fn with_seed(geometry: Geometry, seed: u64) -> Self {
        let settings = Settings {
            seed: Some(seed),
            ..Settings::default()
        };
        Self::new(geometry, &settings)
    }

    fn with_rng(geometry: Geometry, governor: Governor, mut rng: StdRng) -> Self {
        let current = Piece::spawn(random_shape(&mut rng), geometry.columns);
        let next = Piece::spawn(random_shape(&mut rng), geometry.columns);
        let mut game = Self {
            board: Board::new(geometry.columns, geometry.rows),
            current,
            next,
            phase: Phase::Falling,
            score: 0,
            lines_cleared: 0,
            governor,
            rng,
        };
        game.check_spawn();
        game
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.board.width, self.board.height)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Clears board, score and timers and deals a fresh current/next pair.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width, self.board.height);
        self.score = 0;
        self.lines_cleared = 0;
        self.governor.reset();
        self.phase = Phase::Falling;
        self.current = self.spawn_piece();
        self.next = self.spawn_piece();
        self.check_spawn();
    }

    pub fn apply(&mut self, command: Command) {
        match (self.phase, command) {
            (Phase::GameOver, Command::Restart) => self.reset(),
            (Phase::GameOver, _) | (Phase::Falling, Command::Restart) => {}
            (Phase::Falling, Command::MoveLeft) => {
                self.move_horizontal(-1);
            }
            (Phase::Falling, Command::MoveRight) => {
                self.move_horizontal(1);
            }
            (Phase::Falling, Command::SoftDrop) => self.gravity_tick(),
            (Phase::Falling, Command::Rotate) => {
                self.rotate();
            }
            (Phase::Falling, Command::HardDrop) => self.hard_drop(),
        }
        self.debug_check();
    }

    /// One frame of timing: at most one directional command, then at most one
    /// gravity step. Time stands still while the game is over.
    pub fn update(&mut self, delta: Duration, held: HeldKeys) -> Tick {
        if self.is_over() {
            return Tick::default();
        }
        let tick = self.governor.advance(delta, held);
        match tick.direction {
            Some(Direction::Left) => {
                self.move_horizontal(-1);
            }
            Some(Direction::Right) => {
                self.move_horizontal(1);
            }
            Some(Direction::Down) => self.gravity_tick(),
            None => {}
        }
        if tick.gravity {
            self.gravity_tick();
        }
        self.debug_check();
        tick
    }

    /// Moves the current piece one row down, or locks it where it is. A lock through
    /// this path earns [`LOCK_POINTS`].
    pub fn gravity_tick(&mut self) {
        if self.is_over() {
            return;
        }
        let next = self.current.shifted(0, 1);
        if self.board.is_valid(&next) {
            self.current = next;
        } else {
            self.lock_current(LOCK_POINTS);
        }
    }

    /// Drops the current piece as far as it goes and locks it. No lock points.
    pub fn hard_drop(&mut self) {
        if self.is_over() {
            return;
        }
        loop {
            let next = self.current.shifted(0, 1);
            if !self.board.is_valid(&next) {
                break;
            }
            self.current = next;
        }
        self.lock_current(0);
    }

    pub fn move_horizontal(&mut self, dx: i32) -> bool {
        if self.is_over() {
            return false;
        }
        let new_x = self.current.x + dx;
        let max_x = self.board.width as i32 - self.current.width() as i32;
        if new_x < 0 || new_x > max_x {
            return false;
        }
        let next = self.current.shifted(dx, 0);
        if self.board.is_valid(&next) {
            self.current = next;
            true
        } else {
            false
        }
    }

    /// Next rotation state if it fits where the piece is; no kicks.
    pub fn rotate(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        let next = self.current.rotated();
        if self.board.is_valid(&next) {
            self.current = next;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let active = match self.phase {
            Phase::Falling => Some(ActiveSnapshot {
                cells: self.current.cells().collect(),
                color: self.current.color,
            }),
            Phase::GameOver => None,
        };
        Snapshot {
            width: self.board.width,
            height: self.board.height,
            cells: self.board.cells.clone(),
            active,
            next: self.next.shape,
            score: self.score,
            lines_cleared: self.lines_cleared,
            game_over: self.is_over(),
        }
    }

    fn spawn_piece(&mut self) -> Piece {
        Piece::spawn(random_shape(&mut self.rng), self.board.width)
    }

    /// Clears full rows on the board and scores them.
    pub fn clear_lines(&mut self) -> usize {
        let cleared = self.board.clear_lines();
        self.award_lines(cleared);
        cleared
    }

    fn award_lines(&mut self, cleared: usize) {
        self.lines_cleared += cleared as u64;
        self.score += LINE_CLEAR_POINTS * cleared as u64;
    }

    fn lock_current(&mut self, lock_points: u64) {
        let cleared = self.board.lock(&self.current);
        self.award_lines(cleared);
        self.score += lock_points;
        self.promote_next();
    }

    /// Next becomes current, a new next is dealt, and a blocked spawn ends the game.
    pub fn promote_next(&mut self) {
        let fresh = self.spawn_piece();
        self.current = mem::replace(&mut self.next, fresh);
        self.check_spawn();
    }

    fn check_spawn(&mut self) {
        if !self.board.is_valid(&self.current) {
            self.phase = Phase::GameOver;
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.is_over() || self.board.is_valid(&self.current),
            "active piece left in an invalid position"
        );
    }
}
