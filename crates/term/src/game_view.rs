//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockKind, Pos};

/// Terminal viewport dimensions.
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

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_W: u16 = 14;

/// Two-column glyph and color for a cell
fn glyph(kind: Option<BlockKind>) -> (&'static str, Rgb) {
    match kind {
        None => (" .", Rgb::new(90, 90, 100)),
        Some(BlockKind::Plain) => ("[]", Rgb::new(200, 200, 210)),
        Some(BlockKind::Strata) => ("##", Rgb::new(255, 150, 100)),
        Some(BlockKind::Route) => ("==", Rgb::new(100, 200, 240)),
        Some(BlockKind::Summon) => ("@@", Rgb::new(240, 220, 80)),
    }
}

/// Board renderer; each board cell is two terminal columns wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let board_w = snap.board.width as u16;
        let board_h = snap.board.height as u16;
        let frame_w = board_w * 2 + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, start_x, start_y, frame_w, frame_h);

        let active: Vec<Pos> = snap
            .active
            .iter()
            .flat_map(|m| m.cells.iter().map(|(p, _)| *p))
            .collect();

        // Screen rows grow downward, board rows upward.
        for y in 0..board_h {
            let row = start_y + board_h - y;
            for x in 0..board_w {
                let (text, fg) = glyph(snap.kind_at(x as usize, y as usize));
                let mut style = CellStyle::new(fg, PLAY_BG);
                if active.contains(&Pos::new(x as i32, y as i32)) {
                    style = style.bold();
                }
                fb.put_str(start_x + 1 + x * 2, row, text, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) >= PANEL_MIN_W {
            draw_panel(fb, snap, panel_x, start_y);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let inner = w.saturating_sub(2) as usize;
    fb.put_str(x, y, &format!("┌{}┐", "─".repeat(inner)), style);
    fb.put_str(x, y + h - 1, &format!("└{}┘", "─".repeat(inner)), style);
    for dy in 1..h - 1 {
        fb.put_str(x, y + dy, "│", style);
        fb.put_str(x + w - 1, y + dy, "│", style);
    }
}

fn draw_panel(fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
    let label = CellStyle::default().bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    let episode = snap.episode_id.to_string();
    let pieces = snap.piece_id.to_string();
    let lines: [(&str, CellStyle); 12] = [
        ("EPISODE", label),
        (episode.as_str(), value),
        ("PIECES", label),
        (pieces.as_str(), value),
        ("", value),
        ("[] block", value),
        ("## strata", CellStyle::new(glyph(Some(BlockKind::Strata)).1, Rgb::new(0, 0, 0))),
        ("== route", CellStyle::new(glyph(Some(BlockKind::Route)).1, Rgb::new(0, 0, 0))),
        ("@@ summon", CellStyle::new(glyph(Some(BlockKind::Summon)).1, Rgb::new(0, 0, 0))),
        ("", value),
        ("enter drop  space turn", value),
        ("r restart  q quit", value),
    ];
    for (i, (text, style)) in lines.iter().enumerate() {
        fb.put_str(x, y.saturating_add(i as u16), text, *style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, Session};
    use crate::types::{ShapeType, UnitKind};

    fn exact_viewport(snap: &SessionSnapshot) -> Viewport {
        Viewport::new(snap.board.width as u16 * 2 + 2, snap.board.height as u16 + 2)
    }

    #[test]
    fn bottom_rows_show_strata() {
        let session = Session::new(EngineConfig::default()).unwrap();
        let snap = session.snapshot();
        let fb = GameView::new().render(&snap, exact_viewport(&snap));

        // Board row 0 is the last row inside the frame.
        let bottom = fb.row_text(17);
        assert!(bottom.starts_with('│'));
        assert_eq!(bottom.matches("##").count(), 9);
        assert_eq!(bottom.matches(" .").count(), 1);
        assert_eq!(fb.row_text(0).chars().next(), Some('┌'));
    }

    #[test]
    fn active_mino_is_bold() {
        let mut session = Session::new(EngineConfig {
            initial_strata_rows: 0,
            ..EngineConfig::default()
        })
        .unwrap();
        session.spawn(ShapeType::B, UnitKind::Default);
        let snap = session.snapshot();
        let fb = GameView::new().render(&snap, exact_viewport(&snap));

        // Cell (5, 14): column 1 + 5 * 2, row 1 + (16 - 14).
        let cell = fb.get(11, 3).unwrap();
        assert_eq!(cell.ch, '[');
        assert!(cell.style.bold);
        assert!(!fb.get(1, 3).unwrap().style.bold);
    }

    #[test]
    fn panel_drawn_when_room() {
        let session = Session::new(EngineConfig::default()).unwrap();
        let snap = session.snapshot();
        let fb = GameView::new().render(&snap, Viewport::new(80, 24));
        let text: String = (0..24).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("EPISODE"));
        assert!(text.contains("@@ summon"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let session = Session::new(EngineConfig::default()).unwrap();
        let fb = GameView::new().render(&session.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
