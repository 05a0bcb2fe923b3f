//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style, BLACK, WHITE};
use crate::types::MAX_BLOCK_KINDS;

/// Block colors by kind: red, blue, green, yellow, purple.
pub const PALETTE: [Rgb; MAX_BLOCK_KINDS as usize] = [
    Rgb::new(220, 60, 60),
    Rgb::new(70, 110, 230),
    Rgb::new(80, 200, 100),
    Rgb::new(235, 215, 70),
    Rgb::new(170, 90, 210),
];

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);

/// Color for a block kind; kinds past the palette wrap around.
pub fn block_color(kind: u8) -> Rgb {
    PALETTE[kind as usize % PALETTE.len()]
}

/// Key help shown while the legend is toggled on
const LEGEND: [&str; 7] = [
    "arrows/hjkl move",
    "space    remove",
    "s        save",
    "r        load",
    "n        new game",
    "m/esc    this help",
    "q        quit",
];

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame landed in the last layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_legend: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for the cursor brackets around a block.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_legend: false,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    pub fn set_show_legend(&mut self, show: bool) {
        self.show_legend = show;
    }

    pub fn toggle_legend(&mut self) {
        self.show_legend = !self.show_legend;
    }

    /// Frame rectangle (border included) for `snap` inside `viewport`
    pub fn board_frame(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardFrame {
        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (snap.height as u16).saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let frame = self.board_frame(snap, viewport);
        self.draw_border(fb, frame);

        for col in 0..snap.width {
            for row in 0..snap.height {
                self.draw_cell(fb, frame, snap, col, row);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(text) = snap.banner.as_deref() {
            self.draw_banner(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: BoardFrame) {
        let BoardFrame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = Style::new(Rgb::new(200, 200, 200), BLACK);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        snap: &GameSnapshot,
        col: usize,
        row: usize,
    ) {
        let px = frame.x + 1 + col as u16 * self.cell_w;
        let py = frame.y + 1 + row as u16 * self.cell_h;
        let is_cursor = snap.is_cursor(col, row) && snap.playable();

        let style = match snap.block(col, row) {
            Some(block) => Style::new(block_color(block.kind()), BOARD_BG),
            None => Style::new(Rgb::new(80, 80, 90), BOARD_BG),
        };
        let ch = if snap.block(col, row).is_some() {
            '█'
        } else {
            '·'
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);

        if !is_cursor {
            return;
        }
        let mark = Style::new(WHITE, BOARD_BG).bold();
        if self.cell_w >= 3 {
            for dy in 0..self.cell_h {
                fb.put_char(px, py + dy, '[', mark);
                fb.put_char(px + self.cell_w - 1, py + dy, ']', mark);
            }
        } else {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style.reversed());
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::default();

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("BLOCKS", snap.num_blocks as u32),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        if self.show_legend {
            for line in LEGEND {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, value);
                y = y.saturating_add(1);
            }
        } else {
            fb.put_str(panel_x, y, "m: help", value);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, frame: BoardFrame, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let y = frame.y.saturating_add(frame.h / 2);
        let style = Style::new(WHITE, BLACK).bold();
        fb.put_str(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_kind() {
        for kind in 0..MAX_BLOCK_KINDS {
            assert_eq!(block_color(kind), PALETTE[kind as usize]);
        }
        assert_eq!(block_color(MAX_BLOCK_KINDS), PALETTE[0]);
    }

    #[test]
    fn board_frame_centers() {
        let snap = GameSnapshot {
            width: 2,
            height: 2,
            cells: vec![1; 4],
            ..Default::default()
        };
        let view = GameView::default();
        let frame = view.board_frame(&snap, Viewport::new(18, 10));
        assert_eq!(
            frame,
            BoardFrame {
                x: 5,
                y: 3,
                w: 8,
                h: 4
            }
        );
    }
}
