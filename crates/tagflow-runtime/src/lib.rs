// crates/tagflow-runtime/src/lib.rs

use anyhow::Context;
use glam::{IVec2, Vec2};
use std::time::Duration;
use tagflow_core::Bounds;
use tagflow_layout::MeasureSpec;
use tagflow_render::{color, CommandRenderer, ElementRenderer, InputEvent, MouseButton, RenderCommand};

pub mod animation;
pub mod config;
pub mod container;
pub mod event_system;
pub mod latch;

pub use animation::*;
pub use config::*;
pub use container::*;
pub use event_system::*;
pub use latch::*;

/// Drives one chip container against a rendering backend: input becomes
/// queued events, `update` applies them, advances animations and re-runs
/// measure and layout when asked to, `render` draws the result.
pub struct TagflowApp<R: CommandRenderer> {
    container: ChipContainer,
    renderer: ElementRenderer<R>,
    event_system: EventSystem,

    viewport_size: IVec2,
    status: Option<String>,
    needs_layout: bool,
    needs_render: bool,
    frame_count: u64,
}

impl<R: CommandRenderer> TagflowApp<R> {
    pub fn new(renderer: R, container: ChipContainer) -> Self {
        let renderer = ElementRenderer::new(renderer);
        let viewport_size = renderer.viewport_size().as_ivec2();
        Self {
            container,
            renderer,
            event_system: EventSystem::new(),
            viewport_size,
            status: None,
            needs_layout: true,
            needs_render: true,
            frame_count: 0,
        }
    }

    /// Shows `text` on the bottom row. The container gives up that row.
    pub fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.status.is_none() {
            self.needs_layout = true;
        }
        if self.status.as_deref() != Some(text.as_str()) {
            self.status = Some(text);
            self.needs_render = true;
        }
    }

    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.needs_layout = true;
            self.needs_render = true;
        }
    }

    /// Area of the viewport the container occupies.
    pub fn container_area(&self) -> Bounds {
        let status_rows = if self.status.is_some() { 1 } else { 0 };
        Bounds::new(0, 0, self.viewport_size.x, (self.viewport_size.y - status_rows).max(0))
    }

    pub fn queue_event(&mut self, event: UIEvent) {
        self.event_system.queue_event(event);
    }

    pub fn update(&mut self, delta_time: Duration) -> anyhow::Result<()> {
        if self.event_system.update(&mut self.container) > 0 {
            self.needs_render = true;
        }

        self.container.tick(delta_time);

        if self.needs_layout || self.container.layout_requested() {
            let area = self.container_area();
            self.container
                .measure(MeasureSpec::Exactly(area.size.x), MeasureSpec::Exactly(area.size.y));
            self.container.layout();
            self.needs_layout = false;
            self.needs_render = true;
        }

        if self.container.has_running_animations() {
            self.needs_render = true;
        }
        Ok(())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        if !self.needs_render {
            return Ok(());
        }

        let scene = self.container.scene();
        let mut overlay = Vec::new();
        if let Some(status) = &self.status {
            overlay.push(RenderCommand::DrawText {
                position: Vec2::new(0.0, (self.viewport_size.y - 1).max(0) as f32),
                text: status.clone(),
                color: color::WHITE,
                bold: false,
                max_width: Some(self.viewport_size.x as f32),
            });
        }

        self.renderer
            .render_frame(self.container_area(), &scene, &overlay)
            .with_context(|| format!("Failed to render frame {}", self.frame_count))?;

        self.needs_render = false;
        self.frame_count += 1;
        if self.frame_count % 600 == 0 {
            tracing::debug!("rendered {} frames", self.frame_count);
        }
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) -> anyhow::Result<()> {
        match event {
            InputEvent::Resize { size } => {
                self.viewport_size = size.as_ivec2();
                self.renderer.resize(size)?;
                self.needs_layout = true;
            }
            InputEvent::MouseRelease {
                position,
                button: MouseButton::Left,
            } => {
                let area = self.container_area();
                let point = position.as_ivec2();
                if area.contains_point(point) {
                    self.queue_event(UIEvent::Click(point - area.position));
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn container(&self) -> &ChipContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ChipContainer {
        self.needs_render = true;
        &mut self.container
    }

    pub fn mark_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn viewport_size(&self) -> IVec2 {
        self.viewport_size
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn renderer(&self) -> &ElementRenderer<R> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ElementRenderer<R> {
        &mut self.renderer
    }
}
