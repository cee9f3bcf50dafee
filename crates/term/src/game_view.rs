//! GameView: paints a `SessionSnapshot` into a framebuffer.
//!
//! Pure drawing, no terminal I/O, so it is tested against framebuffer
//! contents directly.

use crate::core::catalog;
use crate::core::SessionSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rect, Rgb, Style};
use crate::types::{Rotation, RotationMode, ShapeId};

/// Terminal size the frame is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WELL_BG: Rgb = Rgb(30, 30, 40);
const EMPTY: Style = Style::fg_on(Rgb(90, 90, 100), WELL_BG).dim();
const LOCKED: Style = Style::fg_on(Rgb(170, 170, 180), WELL_BG);
const BORDER: Style = Style::fg_on(Rgb(200, 200, 200), Rgb::BLACK);
const LABEL: Style = Style::PLAIN.bold();
const OVERLAY: Style = Style::fg_on(Rgb::WHITE, Rgb::BLACK).bold();

/// Minimum free columns right of the well before the side panel is drawn.
const PANEL_MIN_W: u16 = 10;

/// Where things go for one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Well including its border
    frame: Rect,
    /// Side panel, absent when the terminal is too narrow
    panel: Option<Rect>,
}

/// Draws the well, the falling piece and the score panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per grid cell
    cell_w: u16,
    /// Terminal rows per grid cell
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square in most fonts.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::BLANK);

        let layout = self.layout(snap, fb.area());
        draw_frame(fb, layout.frame);
        self.draw_well(fb, snap, layout.frame.inner());
        if let Some(panel) = layout.panel {
            draw_panel(fb, snap, panel);
        }

        if snap.game_over {
            draw_banner(fb, layout.frame, "GAME OVER");
        } else if !snap.started {
            draw_banner(fb, layout.frame, "PRESS R");
        }
    }

    /// Render into a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &SessionSnapshot, screen: Rect) -> Layout {
        let frame = screen.centered(
            snap.width.saturating_mul(self.cell_w).saturating_add(2),
            snap.height.saturating_mul(self.cell_h).saturating_add(2),
        );
        let panel_x = frame.right().saturating_add(2);
        let panel = (screen.right().saturating_sub(panel_x) >= PANEL_MIN_W).then(|| {
            Rect::new(panel_x, frame.y, screen.right() - panel_x, frame.h)
        });
        Layout { frame, panel }
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, well: Rect) {
        let active = Style::fg_on(
            snap.active.map_or(Rgb::WHITE, |a| shape_color(a.shape)),
            WELL_BG,
        )
        .bold();

        for y in 0..snap.height {
            for x in 0..snap.width {
                let glyph = match snap.cell(x, y) {
                    // Locked wins: a cell is only both between lock and respawn.
                    Some(c) if c.occupied => Glyph::new('█', LOCKED),
                    Some(c) if c.active => Glyph::new('█', active),
                    _ => Glyph::new('·', EMPTY),
                };
                let cell = Rect::new(
                    well.x.saturating_add(x.saturating_mul(self.cell_w)),
                    well.y.saturating_add(y.saturating_mul(self.cell_h)),
                    self.cell_w,
                    self.cell_h,
                );
                fb.fill(cell, glyph);
            }
        }
    }
}

fn draw_frame(fb: &mut FrameBuffer, r: Rect) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (right, bottom) = (r.right() - 1, r.bottom() - 1);

    for x in r.x + 1..right {
        fb.set(x, r.y, Glyph::new('─', BORDER));
        fb.set(x, bottom, Glyph::new('─', BORDER));
    }
    for y in r.y + 1..bottom {
        fb.set(r.x, y, Glyph::new('│', BORDER));
        fb.set(right, y, Glyph::new('│', BORDER));
    }
    fb.set(r.x, r.y, Glyph::new('┌', BORDER));
    fb.set(right, r.y, Glyph::new('┐', BORDER));
    fb.set(r.x, bottom, Glyph::new('└', BORDER));
    fb.set(right, bottom, Glyph::new('┘', BORDER));
}

fn draw_panel(fb: &mut FrameBuffer, snap: &SessionSnapshot, panel: Rect) {
    let (x, mut y) = (panel.x, panel.y);

    for (label, value) in [("SCORE", snap.score), ("ROWS", snap.rows_cleared)] {
        fb.text(x, y, label, LABEL);
        fb.number(x, y + 1, value, BORDER);
        y += 3;
    }

    fb.text(x, y, "NEXT", LABEL);
    draw_preview(fb, x, y + 1, snap.next_shape);
}

/// Upright layout of a shape, two columns per cell.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, shape: ShapeId) {
    let glyph = Glyph::new('█', Style::fg_on(shape_color(shape), Rgb::BLACK));
    for (dx, dy) in catalog::cells(shape, Rotation::North, RotationMode::Fixed) {
        let px = x + dx as u16 * 2;
        fb.fill(Rect::new(px, y + dy as u16, 2, 1), glyph);
    }
}

fn draw_banner(fb: &mut FrameBuffer, frame: Rect, text: &str) {
    let w = text.chars().count() as u16;
    let at = frame.centered(w, 1);
    fb.text(at.x, at.y, text, OVERLAY);
}

fn shape_color(shape: ShapeId) -> Rgb {
    match shape {
        ShapeId::L => Rgb(255, 165, 0),
        ShapeId::Z => Rgb(220, 80, 80),
        ShapeId::T => Rgb(200, 120, 220),
        ShapeId::Square => Rgb(240, 220, 80),
        ShapeId::I => Rgb(80, 220, 220),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Session, SessionConfig};

    #[test]
    fn test_empty_board_shows_dots() {
        let snap = Session::manual(SessionConfig::default()).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        assert_eq!(fb.get(1, 1).unwrap().ch, '·');
        assert_eq!(fb.get(20, 20).unwrap().ch, '·');
    }

    #[test]
    fn test_active_piece_drawn_bold() {
        let mut session = Session::manual(SessionConfig::default());
        session.start();
        let snap = session.snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(22, 22));

        let i = snap.active.unwrap().cells[0];
        let (x, y) = ((i % 10) as u16, (i / 10) as u16);
        let glyph = fb.get(1 + x * 2, 1 + y).unwrap();
        assert_eq!(glyph.ch, '█');
        assert!(glyph.style.bold);
    }

    #[test]
    fn test_narrow_terminal_skips_panel() {
        let view = GameView::default();
        let snap = Session::manual(SessionConfig::default()).snapshot();
        let screen = Rect::new(0, 0, 30, 22);
        assert!(view.layout(&snap, screen).panel.is_none());
        let wide = Rect::new(0, 0, 60, 22);
        assert_eq!(
            view.layout(&snap, wide).panel,
            Some(Rect::new(43, 0, 17, 22))
        );
    }

    #[test]
    fn test_oversized_well_does_not_overflow() {
        let snap = SessionSnapshot {
            width: u16::MAX,
            height: 4,
            cells: Vec::new(),
            active: None,
            next_shape: ShapeId::I,
            score: 0,
            rows_cleared: 0,
            started: false,
            game_over: false,
            seed: 1,
        };
        let view = GameView::default();
        let layout = view.layout(&snap, Rect::new(0, 0, 80, 24));
        assert_eq!(layout.frame.w, u16::MAX);
        assert!(layout.panel.is_none());

        let fb = view.render(&snap, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
    }
}
