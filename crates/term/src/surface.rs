//! Terminal presentation surface for the engine's `SceneRenderer` seam.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::terminal;

use crate::core::Scene;
use crate::engine::SceneRenderer;
use crate::fb::FrameBuffer;
use crate::game_view::{SceneView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::PlayField;

/// Where the viewport size comes from each frame.
type SizeSource = fn() -> io::Result<(u16, u16)>;

/// Draws scenes into one reused framebuffer and flushes the diff.
pub struct TermSceneRenderer<W: Write = io::Stdout> {
    view: SceneView,
    terminal: TerminalRenderer<W>,
    fb: FrameBuffer,
    size: SizeSource,
}

impl TermSceneRenderer<io::Stdout> {
    pub fn new(field: PlayField) -> Self {
        Self::with_terminal(field, TerminalRenderer::new(), terminal::size)
    }
}

impl<W: Write> TermSceneRenderer<W> {
    pub fn with_terminal(field: PlayField, terminal: TerminalRenderer<W>, size: SizeSource) -> Self {
        Self {
            view: SceneView::new(field),
            terminal,
            fb: FrameBuffer::new(0, 0),
            size,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.terminal
    }

    pub fn terminal(&self) -> &TerminalRenderer<W> {
        &self.terminal
    }

    fn present(&mut self, scene: &Scene, game_over: bool) -> Result<()> {
        let (w, h) = (self.size)().context("query terminal size")?;
        self.view
            .render_into(scene, game_over, Viewport::new(w, h), &mut self.fb);
        self.terminal.draw_swap(&mut self.fb)
    }
}

impl<W: Write> SceneRenderer for TermSceneRenderer<W> {
    fn draw_scene(&mut self, scene: &Scene) -> Result<()> {
        self.present(scene, false)
    }

    fn draw_game_over(&mut self, last: &Scene) -> Result<()> {
        self.present(last, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{generate_snake, Apples};

    fn fixed_size() -> io::Result<(u16, u16)> {
        Ok((40, 10))
    }

    fn broken_size() -> io::Result<(u16, u16)> {
        Err(io::Error::new(io::ErrorKind::Other, "no tty"))
    }

    #[test]
    fn game_over_writes_overlay() {
        let field = PlayField::new(10, 5);
        let scene = Scene::new(generate_snake(3, field), Apples::default(), 4);
        let mut surface =
            TermSceneRenderer::with_terminal(field, TerminalRenderer::with_writer(Vec::new()), fixed_size);

        surface.draw_scene(&scene).unwrap();
        let before = surface.terminal().writer().len();
        surface.draw_game_over(&scene).unwrap();

        let overlay = String::from_utf8_lossy(&surface.terminal().writer()[before..]).into_owned();
        assert!(overlay.contains("GAME OVER"));
    }

    #[test]
    fn size_errors_surface_as_draw_errors() {
        let field = PlayField::new(10, 5);
        let scene = Scene::new(generate_snake(3, field), Apples::default(), 0);
        let mut surface =
            TermSceneRenderer::with_terminal(field, TerminalRenderer::with_writer(Vec::new()), broken_size);
        assert!(surface.draw_scene(&scene).is_err());
    }
}
