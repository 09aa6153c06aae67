use std::error::Error;
use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::{Game, Geometry, HeldKeys, Tick};
use crate::ui::{draw_game, fits};
use crate::{CELL_W, GAME_OVER_BLINK_MS, SIDEBAR_W, Settings};

mod keys;

pub use keys::{KeyAction, KeyTracker};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(settings: Settings) -> Result<(), Box<dyn Error>> {
    let mut tui = TuiGuard::new()?;
    let keys = KeyTracker::new(release_timeout(&settings, tui.release_events));
    run_loop(tui.terminal_mut(), settings, keys)
}

/// How long a key stays held without a release event. `None` when the terminal
/// reports releases. Kept within the repeat delay so a tap fires once, and at least
/// one frame so a tap is seen at all.
pub fn release_timeout(settings: &Settings, release_events: bool) -> Option<Duration> {
    if release_events {
        None
    } else {
        Some(settings.repeat_delay.max(settings.frame))
    }
}

fn run_loop(
    terminal: &mut Term,
    settings: Settings,
    mut keys: KeyTracker,
) -> Result<(), Box<dyn Error>> {
    let mut size = terminal.size()?;
    let mut game = Game::new(fit_terminal(size.width, size.height, settings.block_size), &settings);
    let mut banner = Blink::new(Duration::from_millis(GAME_OVER_BLINK_MS));
    let mut last_frame = Instant::now();

    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| draw_game(frame, &snapshot, banner.visible()))?;

        // Collect input until the next frame is due.
        let deadline = last_frame + settings.frame;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match keys.handle(key, Instant::now()) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Command(command)
                        if fits(game.geometry(), size.width, size.height) =>
                    {
                        game.apply(command)
                    }
                    KeyAction::Command(_) | KeyAction::Held | KeyAction::Ignored => {}
                },
                // A new window size means a new board; nothing carries over.
                Event::Resize(w, h) => {
                    size.width = w;
                    size.height = h;
                    game = Game::new(fit_terminal(w, h, settings.block_size), &settings);
                    keys.clear();
                    banner = Blink::new(Duration::from_millis(GAME_OVER_BLINK_MS));
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;
        let visible = fits(game.geometry(), size.width, size.height);
        step(&mut game, visible, delta, keys.held(now));
        banner.advance(delta, game.is_over());
    }
}

/// One frame of game time. The game is paused while it cannot be drawn.
fn step(game: &mut Game, visible: bool, delta: Duration, held: HeldKeys) -> Tick {
    if !visible {
        return Tick::default();
    }
    game.update(delta, held)
}

/// Board size for a terminal of `width` x `height` cells, leaving room for the
/// cabinet border, the sidebar and the well walls.
pub fn fit_terminal(width: u16, height: u16, block_size: usize) -> Geometry {
    let avail_w = width.saturating_sub(2 + SIDEBAR_W + 2) as usize;
    let avail_h = height.saturating_sub(2 + 2) as usize;
    // A terminal row is about two columns tall.
    let block = block_size.max(CELL_W);
    let mut geometry = Geometry::fit(avail_w, avail_h * CELL_W, block);
    geometry.rows = geometry.rows.min(avail_h.max(1));
    geometry
}

/// Toggles visibility every `period` while active; visible whenever inactive.
#[derive(Debug, Clone)]
pub struct Blink {
    period: Duration,
    elapsed: Duration,
    visible: bool,
}

impl Blink {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            visible: true,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn advance(&mut self, delta: Duration, active: bool) {
        if !active {
            self.elapsed = Duration::ZERO;
            self.visible = true;
            return;
        }
        self.elapsed += delta;
        if self.elapsed >= self.period {
            self.elapsed = Duration::ZERO;
            self.visible = !self.visible;
        }
    }
}

struct TuiGuard {
    terminal: Term,
    release_events: bool,
}

impl TuiGuard {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let release_events = supports_keyboard_enhancement().unwrap_or(false);
        if release_events {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            release_events,
        })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        if self.release_events {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
