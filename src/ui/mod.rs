use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::game::{self, Cell, Geometry, Snapshot};
use crate::{CELL_W, SIDEBAR_W};

const BLOCK: &str = "██";
const EMPTY: &str = "  ";

/// Well size in terminal cells, walls included.
fn well_size(geometry: Geometry) -> (u16, u16) {
    let w = geometry.columns * CELL_W + 2;
    let h = geometry.rows + 2;
    (
        u16::try_from(w).unwrap_or(u16::MAX),
        u16::try_from(h).unwrap_or(u16::MAX),
    )
}

/// Whether a board of `geometry` can be drawn in a `width` x `height` terminal.
pub fn fits(geometry: Geometry, width: u16, height: u16) -> bool {
    let (play_w, play_h) = well_size(geometry);
    u32::from(width) >= u32::from(play_w) + u32::from(SIDEBAR_W) + 2
        && u32::from(height) >= u32::from(play_h) + 2
}

pub fn draw_game(frame: &mut Frame, snapshot: &Snapshot, banner_visible: bool) {
    let area = frame.size();
    let geometry = Geometry::new(snapshot.width, snapshot.height);
    let (play_w, play_h) = well_size(geometry);

    if !fits(geometry, area.width, area.height) {
        let msg = Paragraph::new("RESIZE WINDOW")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("BLOCKDROP"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("BLOCKDROP")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    // Split into play area (left) and sidebar (right).
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(play_w), Constraint::Length(SIDEBAR_W)])
        .split(cabinet_inner);

    // Center the well within the left column.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(play_h),
            Constraint::Min(0),
        ])
        .split(cols[0]);
    let h_center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(play_w),
            Constraint::Min(0),
        ])
        .split(v_center[1]);
    let play_rect = h_center[1];

    draw_playfield(frame, snapshot, play_rect, banner_visible);
    draw_sidebar(frame, snapshot, cols[1]);
}

fn block_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Empty => Span::raw(EMPTY),
        Cell::Occupied(c) => Span::styled(BLOCK, Style::default().fg(rgb(c))),
    }
}

fn rgb(c: game::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn draw_playfield(frame: &mut Frame, snapshot: &Snapshot, play_rect: Rect, banner_visible: bool) {
    let inner_w = snapshot.width * CELL_W;
    let mut lines: Vec<Line> = Vec::with_capacity(snapshot.height + 2);

    lines.push(Line::raw(format!("┌{}┐", "─".repeat(inner_w))));
    for y in 0..snapshot.height {
        let mut spans = Vec::with_capacity(snapshot.width + 2);
        spans.push(Span::raw("│"));
        for x in 0..snapshot.width {
            spans.push(block_span(snapshot.cell_at(x, y)));
        }
        spans.push(Span::raw("│"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(format!("└{}┘", "═".repeat(inner_w))));

    frame.render_widget(Paragraph::new(lines), play_rect);

    if snapshot.game_over && banner_visible {
        let overlay_w = play_rect.width.saturating_sub(2).max(8);
        let overlay_h = 4u16;
        let popup = Rect {
            x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
            y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w,
            height: overlay_h.min(play_rect.height),
        };
        let overlay = Paragraph::new(vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::raw("r to restart"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, popup);
        frame.render_widget(overlay, popup);
    }
}

fn draw_sidebar(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(8),
        ])
        .split(area);

    let status = if snapshot.game_over { "OVER" } else { "ACTIVE" };
    let info = Paragraph::new(format!(
        "SCORE\n{}\nLINES\n{}\nSTATUS\n{}",
        snapshot.score, snapshot.lines_cleared, status
    ))
    .block(Block::default().title("INFO").borders(Borders::ALL))
    .wrap(Wrap { trim: true });
    frame.render_widget(info, chunks[0]);

    let preview = snapshot.next.rotations().get(0);
    let next_lines: Vec<Line> = (0..preview.height())
        .map(|row| {
            let spans: Vec<Span> = (0..preview.width())
                .map(|col| {
                    if preview.get(row, col) {
                        block_span(Cell::Occupied(snapshot.next.color()))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let next = Paragraph::new(next_lines).block(Block::default().title("NEXT").borders(Borders::ALL));
    frame.render_widget(next, chunks[1]);

    let controls = Paragraph::new("←/→ move\n↑ rotate\n↓ soft\nspace slam\nr restart\nq quit")
        .block(Block::default().title("CONTROLS").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(controls, chunks[3]);
}
