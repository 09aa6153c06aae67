use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::{Command, Direction, HeldKeys};

/// What a key event means to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Command(Command),
    Held,
    Ignored,
}

/// Held-state of the directional keys, built from terminal key events.
///
/// Terminals that report releases clear a key on release. Others only send presses
/// (and auto-repeat presses), so a key there counts as held until no event for it
/// has arrived for `release_timeout`.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    release_timeout: Option<Duration>,
    left: Option<Instant>,
    right: Option<Instant>,
    down: Option<Instant>,
}

impl KeyTracker {
    pub fn new(release_timeout: Option<Duration>) -> Self {
        Self {
            release_timeout,
            left: None,
            right: None,
            down: None,
        }
    }

    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
        self.down = None;
    }

    fn slot(&mut self, dir: Direction) -> &mut Option<Instant> {
        match dir {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
        }
    }

    pub fn press(&mut self, dir: Direction, now: Instant) {
        *self.slot(dir) = Some(now);
    }

    pub fn release(&mut self, dir: Direction) {
        *self.slot(dir) = None;
    }

    pub fn held(&self, now: Instant) -> HeldKeys {
        let live = |seen: Option<Instant>| match (seen, self.release_timeout) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(timeout)) => now.saturating_duration_since(at) <= timeout,
        };
        HeldKeys {
            left: live(self.left),
            right: live(self.right),
            down: live(self.down),
        }
    }

    /// Feeds one key event in. Directional keys update the held set; rotation,
    /// hard drop and restart fire once per press.
    pub fn handle(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        if let Some(dir) = direction_for(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.press(dir, now),
                KeyEventKind::Release => self.release(dir),
            }
            return KeyAction::Held;
        }
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignored;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Up => KeyAction::Command(Command::Rotate),
            KeyCode::Char(' ') => KeyAction::Command(Command::HardDrop),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Command(Command::Restart),
            _ => KeyAction::Ignored,
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}
