// crates/tagflow-render/src/lib.rs

use glam::{Vec2, Vec4};
use tagflow_core::{Bounds, NodeRole, SceneNode, CHIP_INSETS};
use tracing::trace;

pub mod events;
pub mod primitives;

pub use events::*;
pub use primitives::color;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Core rendering trait that all backends must implement
pub trait Renderer {
    type Surface;
    type Context;

    /// Initialize the renderer with the given surface
    fn initialize(surface: Self::Surface) -> RenderResult<Self>
    where
        Self: Sized;

    /// Begin a new frame
    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<Self::Context>;

    /// End the current frame and present it
    fn end_frame(&mut self, context: Self::Context) -> RenderResult<()>;

    /// Handle surface resize
    fn resize(&mut self, new_size: Vec2) -> RenderResult<()>;

    /// Get current viewport size
    fn viewport_size(&self) -> Vec2;
}

/// High-level rendering commands
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    DrawRect {
        position: Vec2,
        size: Vec2,
        color: Vec4,
        border_width: f32,
        border_color: Vec4,
    },
    DrawText {
        position: Vec2,
        text: String,
        color: Vec4,
        bold: bool,
        max_width: Option<f32>,
    },
    SetClip {
        position: Vec2,
        size: Vec2,
    },
    ClearClip,
}

/// Trait for backends that use command-based rendering
pub trait CommandRenderer: Renderer {
    /// Execute a batch of render commands. Backends may treat each batch as a
    /// whole frame, so callers submit one batch per frame.
    fn execute_commands(&mut self, context: &mut Self::Context, commands: &[RenderCommand]) -> RenderResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Vec4,
    pub chip_fill: Vec4,
    pub chip_border: Vec4,
    pub chip_text: Vec4,
    pub hint_text: Vec4,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: color::BLACK,
            chip_fill: color::from_hex(0x2E5C8AFF),
            chip_border: color::from_hex(0x6FA8DCFF),
            chip_text: color::WHITE,
            hint_text: color::from_hex(0x666666FF),
        }
    }
}

/// Below this opacity a node is not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.01;

/// Turns a scene into commands and hands them to a backend.
pub struct ElementRenderer<R: CommandRenderer> {
    backend: R,
    viewport_size: Vec2,
    theme: Theme,
}

impl<R: CommandRenderer> ElementRenderer<R> {
    pub fn new(backend: R) -> Self {
        let viewport_size = backend.viewport_size();
        Self {
            backend,
            viewport_size,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Draws the container area with its scene, then `overlay` unclipped.
    pub fn render_frame(&mut self, area: Bounds, scene: &[SceneNode], overlay: &[RenderCommand]) -> RenderResult<()> {
        let mut commands = self.scene_to_commands(area, scene);
        commands.extend_from_slice(overlay);
        trace!("submitting {} commands for {} nodes", commands.len(), scene.len());

        let mut context = self.backend.begin_frame(self.theme.background)?;
        self.backend.execute_commands(&mut context, &commands)?;
        self.backend.end_frame(context)
    }

    pub fn scene_to_commands(&self, area: Bounds, scene: &[SceneNode]) -> Vec<RenderCommand> {
        let origin = area.position.as_vec2();
        let mut commands = vec![RenderCommand::SetClip {
            position: origin,
            size: area.size.as_vec2(),
        }];

        for node in scene {
            if node.alpha < MIN_VISIBLE_ALPHA {
                continue;
            }
            let position = origin + node.visual_position();
            let size = node.bounds.size.as_vec2();

            match node.role {
                NodeRole::Chip | NodeRole::DisappearingChip => {
                    commands.push(RenderCommand::DrawRect {
                        position,
                        size,
                        color: color::with_opacity(self.theme.chip_fill, node.alpha),
                        border_width: 1.0,
                        border_color: color::with_opacity(self.theme.chip_border, node.alpha),
                    });
                    let inset = CHIP_INSETS.as_vec2() / 2.0;
                    commands.push(RenderCommand::DrawText {
                        position: position + inset,
                        text: node.text.clone(),
                        color: color::with_opacity(self.theme.chip_text, node.alpha),
                        bold: false,
                        max_width: Some((size.x - CHIP_INSETS.x as f32).max(0.0)),
                    });
                }
                NodeRole::Hint => {
                    commands.push(RenderCommand::DrawText {
                        position,
                        text: node.text.clone(),
                        color: color::with_opacity(self.theme.hint_text, node.alpha),
                        bold: true,
                        max_width: Some(size.x),
                    });
                }
            }
        }

        commands.push(RenderCommand::ClearClip);
        commands
    }

    pub fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.viewport_size = new_size;
        self.backend.resize(new_size)
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.backend
    }
}
