//! SceneView: maps a `core::Scene` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Scene;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PlayField, Point2D};

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

const FIELD_BG: Rgb = Rgb::new(25, 30, 25);
const PANEL_MIN_W: u16 = 12;

/// Lays out the play field, the score panel, and the game-over overlay.
#[derive(Debug, Clone)]
pub struct SceneView {
    field: PlayField,
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl SceneView {
    pub fn new(field: PlayField) -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            field,
            cell_w: 2,
            cell_h: 1,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    /// Size of the bordered field in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.field.cols.saturating_mul(self.cell_w).saturating_add(2),
            self.field.rows.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render a scene into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport as needed.
    pub fn render_into(&self, scene: &Scene, game_over: bool, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let empty = CellStyle::new(Rgb::new(70, 80, 70), FIELD_BG).dim();

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        for p in self.field.cells() {
            self.fill_cell(fb, start_x, start_y, p, '·', empty);
        }

        let apple = CellStyle::new(Rgb::new(230, 60, 60), FIELD_BG).bold();
        for &p in scene.apples.positions() {
            self.fill_cell(fb, start_x, start_y, p, '●', apple);
        }

        let body = CellStyle::new(Rgb::new(90, 200, 110), FIELD_BG);
        for &p in scene.snake.tail_segments() {
            self.fill_cell(fb, start_x, start_y, p, '▓', body);
        }
        let head_style = if game_over {
            CellStyle::new(Rgb::new(240, 90, 90), FIELD_BG).bold()
        } else {
            CellStyle::new(Rgb::new(160, 255, 160), FIELD_BG).bold()
        };
        self.fill_cell(fb, start_x, start_y, scene.snake.head(), '█', head_style);

        self.draw_side_panel(fb, scene, viewport, start_x, start_y, frame_w);

        if game_over {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene, game_over: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, game_over, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        // Only the part that can land inside the framebuffer.
        for dx in 1..(w - 1).min(fb.width()) {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..(h - 1).min(fb.height()) {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    /// Fill one field cell. Points outside the field (a head that just left
    /// it) are not drawn.
    fn fill_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, p: Point2D, ch: char, style: CellStyle) {
        if !self.field.contains(p) {
            return;
        }
        let px = (p.x as u16).saturating_mul(self.cell_w).saturating_add(start_x).saturating_add(1);
        let py = (p.y as u16).saturating_mul(self.cell_h).saturating_add(start_y).saturating_add(1);
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, scene.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LENGTH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, scene.snake.len() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "APPLES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, scene.apples.len() as u32, value);
        y = y.saturating_add(2);

        let hint = value.dim();
        fb.put_str(panel_x, y, "arrows/wasd", hint);
        fb.put_str(panel_x, y.saturating_add(1), "q to quit", hint);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        for (i, text) in ["GAME OVER", "click to restart"].iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}
