// crates/tagflow-core/src/animation.rs
//! Animation descriptors. Playback lives in the runtime's animation driver;
//! these types only describe what to play and how to sample it.

use glam::{IVec2, Vec2};
use std::f32::consts::PI;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Slow start and end, fast middle.
    AccelerateDecelerate,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::AccelerateDecelerate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Visual offset from the element's laid-out position.
    Translate { from: IVec2, to: IVec2 },
    /// Alpha, 0.0 transparent to 1.0 opaque.
    Fade { from: f32, to: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub kind: AnimationKind,
    pub duration: Duration,
    pub fill_after: bool,
    pub easing: Easing,
}

/// Sampled visual state of an element at some point of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub offset: Vec2,
    pub alpha: f32,
}

impl AnimationFrame {
    pub const IDENTITY: AnimationFrame = AnimationFrame {
        offset: Vec2::ZERO,
        alpha: 1.0,
    };
}

impl Default for AnimationFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AnimationSpec {
    pub fn translate(from: IVec2, to: IVec2, duration: Duration) -> Self {
        Self {
            kind: AnimationKind::Translate { from, to },
            duration,
            fill_after: false,
            easing: Easing::default(),
        }
    }

    pub fn fade_in(duration: Duration) -> Self {
        Self {
            kind: AnimationKind::Fade { from: 0.0, to: 1.0 },
            duration,
            fill_after: false,
            easing: Easing::default(),
        }
    }

    pub fn fade_out(duration: Duration) -> Self {
        Self {
            kind: AnimationKind::Fade { from: 1.0, to: 0.0 },
            duration,
            fill_after: false,
            easing: Easing::default(),
        }
    }

    pub fn with_fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in `[0, 1]` after `elapsed`. Zero-length animations are
    /// complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, progress: f32) -> AnimationFrame {
        let t = self.easing.apply(progress);
        match self.kind {
            AnimationKind::Translate { from, to } => AnimationFrame {
                offset: from.as_vec2().lerp(to.as_vec2(), t),
                alpha: 1.0,
            },
            AnimationKind::Fade { from, to } => AnimationFrame {
                offset: Vec2::ZERO,
                alpha: from + (to - from) * t,
            },
        }
    }

    /// What the element looks like once the animation has ended.
    pub fn end_frame(&self) -> AnimationFrame {
        if !self.fill_after {
            return AnimationFrame::IDENTITY;
        }
        match self.kind {
            AnimationKind::Translate { to, .. } => AnimationFrame {
                offset: to.as_vec2(),
                alpha: 1.0,
            },
            AnimationKind::Fade { to, .. } => AnimationFrame {
                offset: Vec2::ZERO,
                alpha: to,
            },
        }
    }
}
