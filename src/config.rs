// Shared game/UI constants.
use std::time::Duration;

use clap::Parser;

pub const MIN_COLUMNS: usize = 10;
pub const DEFAULT_BLOCK_SIZE: usize = 2; // approximate block width, in terminal columns
pub const CELL_W: usize = 2; // render each block as two characters wide
pub const SIDEBAR_W: u16 = 24;

pub const FALL_INTERVAL_MS: u64 = 500;
pub const KEY_REPEAT_DELAY_MS: u64 = 120;
pub const FRAME_RATE: u32 = 60;
pub const GAME_OVER_BLINK_MS: u64 = 500;

pub const LINE_CLEAR_POINTS: u64 = 100;
pub const LOCK_POINTS: u64 = 1;

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "blockdrop", version, about)]
pub struct Args {
    /// RNG seed for the piece stream. Random if omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second of the main loop.
    #[arg(long, default_value_t = FRAME_RATE)]
    pub fps: u32,

    /// Time between forced gravity steps.
    #[arg(long, default_value_t = FALL_INTERVAL_MS, value_name = "ms")]
    pub fall_interval_ms: u64,

    /// Minimum time between repeats of a held direction key.
    #[arg(long, default_value_t = KEY_REPEAT_DELAY_MS, value_name = "ms")]
    pub repeat_delay_ms: u64,

    /// Approximate block width in terminal columns, used to size the board. Never
    /// narrower than one drawn block.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,
}

/// Runtime settings resolved from [`Args`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub frame: Duration,
    pub fall_interval: Duration,
    pub repeat_delay: Duration,
    pub block_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame: Duration::from_secs(1) / FRAME_RATE,
            fall_interval: Duration::from_millis(FALL_INTERVAL_MS),
            repeat_delay: Duration::from_millis(KEY_REPEAT_DELAY_MS),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            seed: args.seed,
            frame: Duration::from_secs(1) / args.fps.max(1),
            fall_interval: Duration::from_millis(args.fall_interval_ms.max(1)),
            repeat_delay: Duration::from_millis(args.repeat_delay_ms),
            block_size: args.block_size.max(CELL_W),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timing() {
        let s = Settings::default();
        assert_eq!(s.fall_interval, Duration::from_millis(500));
        assert_eq!(s.repeat_delay, Duration::from_millis(120));
        assert_eq!(s.block_size, CELL_W);
    }

    #[test]
    fn args_clamp_degenerate_values() {
        let args = Args::parse_from(["blockdrop", "--fps", "0", "--block-size", "0", "--seed", "7"]);
        let s = Settings::from(args);
        assert_eq!(s.frame, Duration::from_secs(1));
        assert_eq!(s.block_size, CELL_W);
        assert_eq!(s.seed, Some(7));
    }

    #[test]
    fn block_narrower_than_a_drawn_cell_is_widened() {
        let s = Settings::from(Args::parse_from(["blockdrop", "--block-size", "1"]));
        assert_eq!(s.block_size, CELL_W);
        let s = Settings::from(Args::parse_from(["blockdrop", "--block-size", "5"]));
        assert_eq!(s.block_size, 5);
    }
}
