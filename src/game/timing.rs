use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Which directional keys the frame driver currently sees as held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

impl HeldKeys {
    /// The direction that wins this frame: left, then right, then down.
    pub fn direction(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// What the governor lets through for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    pub direction: Option<Direction>,
    pub gravity: bool,
}

/// Turns frame deltas and held keys into gravity steps and gated key repeats.
/// Time only moves through [`Governor::advance`]; there is no wall clock.
#[derive(Debug, Clone)]
pub struct Governor {
    fall_interval: Duration,
    repeat_delay: Duration,
    clock: Duration,
    fall_accumulator: Duration,
    last_fired: Option<(Direction, Duration)>,
}

impl Governor {
    pub fn new(fall_interval: Duration, repeat_delay: Duration) -> Self {
        Self {
            fall_interval,
            repeat_delay,
            clock: Duration::ZERO,
            fall_accumulator: Duration::ZERO,
            last_fired: None,
        }
    }

    pub fn fall_accumulator(&self) -> Duration {
        self.fall_accumulator
    }

    pub fn reset(&mut self) {
        self.clock = Duration::ZERO;
        self.fall_accumulator = Duration::ZERO;
        self.last_fired = None;
    }

    pub fn advance(&mut self, delta: Duration, held: HeldKeys) -> Tick {
        self.clock += delta;
        self.fall_accumulator += delta;
        let mut tick = Tick::default();

        match held.direction() {
            Some(dir) => {
                let due = match self.last_fired {
                    Some((last, at)) if last == dir => self.clock - at > self.repeat_delay,
                    _ => true,
                };
                if due {
                    self.last_fired = Some((dir, self.clock));
                    tick.direction = Some(dir);
                    // A soft drop stands in for this frame's gravity.
                    if dir == Direction::Down {
                        self.fall_accumulator = Duration::ZERO;
                    }
                }
            }
            None => self.last_fired = None,
        }

        if self.fall_accumulator >= self.fall_interval {
            self.fall_accumulator = Duration::ZERO;
            tick.gravity = true;
        }
        tick
    }
}
