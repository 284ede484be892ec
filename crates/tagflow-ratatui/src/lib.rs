use glam::{Vec2, Vec4};
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::trace;

use tagflow_render::{CommandRenderer, RenderCommand, RenderError, RenderResult, Renderer};

/// Draws render commands into a terminal, one cell per unit.
pub struct RatatuiRenderer<B: Backend> {
    pub terminal: Terminal<B>,
    background: Vec4,
}

pub struct RatatuiContext; // A simple marker context

impl<B: Backend> Renderer for RatatuiRenderer<B> {
    type Surface = B;
    type Context = RatatuiContext;

    fn initialize(surface: Self::Surface) -> RenderResult<Self> {
        let terminal = Terminal::new(surface).map_err(|e| RenderError::InitializationFailed(e.to_string()))?;
        Ok(Self {
            terminal,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
        })
    }

    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<Self::Context> {
        self.background = clear_color;
        Ok(RatatuiContext)
    }

    fn end_frame(&mut self, _context: Self::Context) -> RenderResult<()> {
        Ok(())
    }

    fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.terminal
            .resize(Rect::new(0, 0, new_size.x as u16, new_size.y as u16))
            .map_err(|e| RenderError::RenderFailed(format!("Terminal resize failed: {}", e)))
    }

    fn viewport_size(&self) -> Vec2 {
        let size = self.terminal.size().unwrap_or_default();
        Vec2::new(size.width as f32, size.height as f32)
    }
}

impl<B: Backend> CommandRenderer for RatatuiRenderer<B> {
    fn execute_commands(&mut self, _context: &mut Self::Context, commands: &[RenderCommand]) -> RenderResult<()> {
        let background = self.background;
        self.terminal
            .draw(|frame| render_commands_to_frame(commands, frame, background))
            .map_err(|e| RenderError::RenderFailed(e.to_string()))?;
        Ok(())
    }
}

fn render_commands_to_frame(commands: &[RenderCommand], frame: &mut Frame, background: Vec4) {
    let terminal_area = frame.size();
    let mut clip = terminal_area;

    for command in commands {
        match command {
            RenderCommand::SetClip { position, size } => {
                clip = translate_rect(*position, *size, terminal_area).unwrap_or_default();
            }
            RenderCommand::ClearClip => clip = terminal_area,
            RenderCommand::DrawRect {
                position,
                size,
                color,
                border_width,
                border_color,
            } => {
                if let Some(area) = translate_rect(*position, *size, clip) {
                    let mut block = Block::default().style(Style::default().bg(blend(*color, background)));
                    if *border_width > 0.0 {
                        block = block
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(blend(*border_color, background)));
                    }
                    frame.render_widget(Clear, area);
                    frame.render_widget(block, area);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                bold,
                max_width,
            } => {
                let text_width = max_width.unwrap_or(Line::from(text.as_str()).width() as f32);
                if let Some(area) = translate_rect(*position, Vec2::new(text_width, 1.0), clip) {
                    let mut style = Style::default().fg(blend(*color, background));
                    if *bold {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    frame.render_widget(Paragraph::new(text.as_str()).style(style), area);
                }
            }
        }
    }
    trace!("drew {} commands into {:?}", commands.len(), terminal_area);
}

/// Rounds a command's geometry to cells and clips it to `bounds`.
fn translate_rect(position: Vec2, size: Vec2, bounds: Rect) -> Option<Rect> {
    let left = (position.x.round() as i32).max(bounds.left() as i32);
    let top = (position.y.round() as i32).max(bounds.top() as i32);
    let right = ((position.x + size.x).round() as i32).min(bounds.right() as i32);
    let bottom = ((position.y + size.y).round() as i32).min(bounds.bottom() as i32);

    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(left as u16, top as u16, (right - left) as u16, (bottom - top) as u16))
}

/// Terminals have no alpha; translucent colors are mixed into the background.
fn blend(color: Vec4, background: Vec4) -> Color {
    if color.w < 0.1 {
        return Color::Reset;
    }
    let mixed = color.truncate() * color.w + background.truncate() * (1.0 - color.w);
    Color::Rgb(
        (mixed.x * 255.0).round() as u8,
        (mixed.y * 255.0).round() as u8,
        (mixed.z * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_rect_clips_to_bounds() {
        let bounds = Rect::new(0, 0, 20, 10);
        assert_eq!(
            translate_rect(Vec2::new(-3.0, 2.0), Vec2::new(8.0, 3.0), bounds),
            Some(Rect::new(0, 2, 5, 3))
        );
        assert_eq!(
            translate_rect(Vec2::new(18.0, 9.0), Vec2::new(8.0, 3.0), bounds),
            Some(Rect::new(18, 9, 2, 1))
        );
        assert_eq!(translate_rect(Vec2::new(25.0, 0.0), Vec2::new(4.0, 1.0), bounds), None);
    }

    #[test]
    fn blend_mixes_into_background() {
        let white = Vec4::new(1.0, 1.0, 1.0, 1.0);
        let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(blend(white, black), Color::Rgb(255, 255, 255));
        assert_eq!(blend(Vec4::new(1.0, 1.0, 1.0, 0.5), black), Color::Rgb(128, 128, 128));
        assert_eq!(blend(Vec4::new(1.0, 1.0, 1.0, 0.05), black), Color::Reset);
    }
}
