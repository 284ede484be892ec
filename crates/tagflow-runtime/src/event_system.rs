// crates/tagflow-runtime/src/event_system.rs
use glam::IVec2;
use tagflow_core::TagChangeListener;

use crate::container::ChipContainer;

#[derive(Debug)]
pub struct EventSystem {
    event_queue: Vec<UIEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UIEvent {
    /// Pointer released at a container-relative position.
    Click(IVec2),
    AddTag(String),
    /// Another component dropped this tag; mirror it here.
    TagRemoved(String),
    SetAnimations(bool),
}

impl EventSystem {
    pub fn new() -> Self {
        Self {
            event_queue: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: UIEvent) {
        self.event_queue.push(event);
    }

    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Applies queued events in arrival order. Returns how many were handled.
    pub fn update(&mut self, container: &mut ChipContainer) -> usize {
        let events: Vec<_> = self.event_queue.drain(..).collect();
        let handled = events.len();
        for event in events {
            Self::process_event(event, container);
        }
        handled
    }

    fn process_event(event: UIEvent, container: &mut ChipContainer) {
        match event {
            UIEvent::Click(position) => {
                if let Some(label) = container.click_at(position) {
                    tracing::debug!("chip clicked: {}", label);
                }
            }
            UIEvent::AddTag(label) => container.add_tag(label),
            UIEvent::TagRemoved(label) => container.on_tag_removed(&label),
            UIEvent::SetAnimations(enabled) => container.set_animations_enabled(enabled),
        }
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}
