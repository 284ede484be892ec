// crates/tagflow-core/src/scene.rs
use glam::Vec2;

use crate::{AnimationFrame, Bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Chip,
    /// Already removed from the container, drawn until its fade-out ends.
    DisappearingChip,
    Hint,
}

/// One drawable item, with any running animation already sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub role: NodeRole,
    pub text: String,
    pub bounds: Bounds,
    pub offset: Vec2,
    pub alpha: f32,
}

impl SceneNode {
    pub fn new(role: NodeRole, text: impl Into<String>, bounds: Bounds, frame: AnimationFrame) -> Self {
        Self {
            role,
            text: text.into(),
            bounds,
            offset: frame.offset,
            alpha: frame.alpha,
        }
    }

    /// Top-left corner after the animation offset is applied.
    pub fn visual_position(&self) -> Vec2 {
        self.bounds.position.as_vec2() + self.offset
    }
}
