// crates/tagflow-runtime/src/animation.rs
//! Animation playback. One animation per target; progress only moves when the
//! owner calls `tick`, so everything stays on the UI thread.

use std::collections::BTreeMap;
use std::time::Duration;
use tagflow_core::{AnimationFrame, AnimationSpec};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationTarget {
    /// A chip still owned by the container, keyed by label.
    Chip(String),
    /// A chip already detached and fading out, keyed by its removal ticket.
    Detached(u64),
}

/// What the owner must do once an animation ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    RevealChip(String),
    RemovalFinished(u64),
}

#[derive(Debug, Clone)]
pub struct RunningAnimation {
    pub spec: AnimationSpec,
    pub elapsed: Duration,
    pub completion: Completion,
}

impl RunningAnimation {
    pub fn frame(&self) -> AnimationFrame {
        self.spec.sample(self.spec.progress(self.elapsed))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.spec.duration
    }
}

#[derive(Debug, Default)]
pub struct AnimationDriver {
    running: BTreeMap<AnimationTarget, RunningAnimation>,
    /// End frames of finished `fill_after` animations, kept until the target
    /// gets a new animation or is cancelled.
    held: BTreeMap<AnimationTarget, AnimationFrame>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `spec` on `target`, replacing whatever was running there. The
    /// replaced animation's completion is handed back so the caller can apply
    /// it right away.
    pub fn start(&mut self, target: AnimationTarget, spec: AnimationSpec, completion: Completion) -> Option<Completion> {
        self.held.remove(&target);
        let replaced = self.running.insert(
            target,
            RunningAnimation {
                spec,
                elapsed: Duration::ZERO,
                completion,
            },
        );
        replaced
            .map(|animation| animation.completion)
            .filter(|completion| *completion != Completion::None)
    }

    /// Drops the animation on `target` without completing it.
    pub fn cancel(&mut self, target: &AnimationTarget) -> Option<RunningAnimation> {
        self.held.remove(target);
        self.running.remove(target)
    }

    /// Advances every animation by `dt` and returns the completions of those
    /// that ended, in target order.
    pub fn tick(&mut self, dt: Duration) -> Vec<Completion> {
        let mut finished = Vec::new();
        for (target, animation) in self.running.iter_mut() {
            animation.elapsed += dt;
            if animation.is_finished() {
                finished.push(target.clone());
            }
        }

        let mut completions = Vec::new();
        for target in finished {
            let Some(animation) = self.running.remove(&target) else {
                continue;
            };
            if animation.spec.fill_after {
                self.held.insert(target, animation.spec.end_frame());
            }
            if animation.completion != Completion::None {
                completions.push(animation.completion);
            }
        }
        completions
    }

    /// Current frame of the running animation on `target`, or the end frame
    /// it holds after finishing with `fill_after`.
    pub fn frame(&self, target: &AnimationTarget) -> Option<AnimationFrame> {
        self.running
            .get(target)
            .map(RunningAnimation::frame)
            .or_else(|| self.held.get(target).copied())
    }

    pub fn is_running(&self, target: &AnimationTarget) -> bool {
        self.running.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}
