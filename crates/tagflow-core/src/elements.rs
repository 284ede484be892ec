// crates/tagflow-core/src/elements.rs
use glam::IVec2;
use std::time::Duration;
use tracing::trace;

use crate::{AnimationSpec, Bounds, TextMeasurer};

/// Border plus one column of padding on each side, border above and below.
pub const CHIP_INSETS: IVec2 = IVec2::new(4, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Hidden but still occupies layout space.
    Invisible,
    /// Hidden and skipped by measurement.
    Gone,
}

/// Anything the container can measure, place and draw.
pub trait Element {
    fn text(&self) -> &str;

    fn visibility(&self) -> Visibility;
    fn set_visibility(&mut self, visibility: Visibility);

    /// Natural size before any constraint is applied.
    fn desired_size(&self, measurer: &dyn TextMeasurer) -> IVec2;

    fn measured_size(&self) -> IVec2;
    fn set_measured_size(&mut self, size: IVec2);

    fn bounds(&self) -> Bounds;

    /// Commits new geometry for this element.
    fn layout(&mut self, bounds: Bounds);

    fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }
}

/// A pressable tag label that remembers where it was last placed.
#[derive(Debug, Clone)]
pub struct Chip {
    label: String,
    visibility: Visibility,
    measured_size: IVec2,
    bounds: Bounds,
    last_position: IVec2,
    first_placement: bool,
}

impl Chip {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visibility: Visibility::Visible,
            measured_size: IVec2::ZERO,
            bounds: Bounds::default(),
            last_position: IVec2::ZERO,
            first_placement: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label = text.into();
    }

    pub fn is_first_placement(&self) -> bool {
        self.first_placement
    }

    pub fn last_position(&self) -> IVec2 {
        self.last_position
    }

    /// Records a freshly committed position. Only the first commit sets the
    /// baseline; afterwards the baseline moves in `compute_move_animation`.
    pub fn on_position_committed(&mut self, x: i32, y: i32) {
        trace!("{}: dx = {} dy = {}", self.label, x, y);
        if self.first_placement {
            self.last_position = IVec2::new(x, y);
            self.first_placement = false;
        }
    }

    /// Slide from the previous position to the committed one, or `None` if
    /// the chip did not move. Must run after the new geometry is committed.
    pub fn compute_move_animation(&mut self, duration: Duration) -> Option<AnimationSpec> {
        let current = self.bounds.position;
        if current == self.last_position {
            return None;
        }

        let delta = current - self.last_position;
        self.last_position = current;

        Some(AnimationSpec::translate(-delta, IVec2::ZERO, duration).with_fill_after(true))
    }
}

impl Element for Chip {
    fn text(&self) -> &str {
        &self.label
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn desired_size(&self, measurer: &dyn TextMeasurer) -> IVec2 {
        measurer.measure_text(&self.label) + CHIP_INSETS
    }

    fn measured_size(&self) -> IVec2 {
        self.measured_size
    }

    fn set_measured_size(&mut self, size: IVec2) {
        self.measured_size = size;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn layout(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.on_position_committed(bounds.left(), bounds.top());
    }
}

/// Centered informative text shown while the container is empty.
#[derive(Debug, Clone)]
pub struct HintLabel {
    text: String,
    visibility: Visibility,
    measured_size: IVec2,
    bounds: Bounds,
}

impl HintLabel {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            visibility: Visibility::Gone,
            measured_size: IVec2::ZERO,
            bounds: Bounds::default(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Default for HintLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for HintLabel {
    fn text(&self) -> &str {
        &self.text
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn desired_size(&self, measurer: &dyn TextMeasurer) -> IVec2 {
        measurer.measure_text(&self.text)
    }

    fn measured_size(&self) -> IVec2 {
        self.measured_size
    }

    fn set_measured_size(&mut self, size: IVec2) {
        self.measured_size = size;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn layout(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}
