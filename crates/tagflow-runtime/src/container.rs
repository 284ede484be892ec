// crates/tagflow-runtime/src/container.rs
use glam::IVec2;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace, warn};

use tagflow_core::{
    AnimationFrame, AnimationSpec, Bounds, CellMeasurer, Chip, Element, HintLabel, NodeRole, ResourceId, Result,
    SceneNode, StringResources, TagChangeListener, TextMeasurer, Visibility,
};
use tagflow_layout::{center_in, measure_child, ConstraintBox, LayoutEngine, MeasureSpec, WrapLayoutEngine};

use crate::animation::{AnimationDriver, AnimationTarget, Completion};
use crate::config::ContainerConfig;
use crate::latch::{LatchState, RemovalLatch};

/// A chip that has left the container but is still fading out.
#[derive(Debug, Clone)]
pub struct DisappearingChip {
    pub ticket: u64,
    pub chip: Chip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPass {
    /// A removal fade-out is in flight; nothing moved.
    Frozen,
    Placed { chips: usize, rows: usize },
}

/// Flow-wrapping container of tag chips.
///
/// Chips are keyed and laid out by label in lexicographic order. Clicking a
/// chip removes it and notifies the registered listener. While a removal
/// fade-out plays, layout passes are suppressed so the remaining chips hold
/// still until the fade ends.
pub struct ChipContainer {
    chips: BTreeMap<String, Chip>,
    hint: HintLabel,
    hint_resource: ResourceId,
    resources: StringResources,
    config: ContainerConfig,
    engine: Box<dyn LayoutEngine>,
    measurer: Box<dyn TextMeasurer>,
    listener: Option<Box<dyn TagChangeListener>>,
    animations: AnimationDriver,
    latch: RemovalLatch,
    disappearing: Vec<DisappearingChip>,
    measured_size: IVec2,
    layout_requested: bool,
    next_ticket: u64,
}

impl ChipContainer {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ContainerConfig) -> Self {
        Self {
            chips: BTreeMap::new(),
            hint: HintLabel::new(),
            hint_resource: ResourceId::NONE,
            resources: StringResources::new(),
            engine: Box::new(WrapLayoutEngine::new(config.padding)),
            config,
            measurer: Box::new(CellMeasurer),
            listener: None,
            animations: AnimationDriver::new(),
            latch: RemovalLatch::new(),
            disappearing: Vec::new(),
            measured_size: IVec2::ZERO,
            layout_requested: false,
            next_ticket: 0,
        }
    }

    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn with_layout_engine(mut self, engine: Box<dyn LayoutEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_resources(mut self, resources: StringResources) -> Self {
        self.resources = resources;
        self
    }

    pub fn resources_mut(&mut self) -> &mut StringResources {
        &mut self.resources
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    // --- Tag lifecycle ---

    /// Adds a chip for `label`. An existing chip with the same label is
    /// dropped first, without animation and without notifying the listener.
    pub fn add_tag(&mut self, label: impl Into<String>) {
        let label = label.into();
        if self.chips.contains_key(&label) {
            debug!("tag '{}' already present, replacing it", label);
            self.chips.remove(&label);
            self.animations.cancel(&AnimationTarget::Chip(label.clone()));
        }

        let mut chip = Chip::new(label.clone());
        chip.set_visibility(Visibility::Invisible);
        self.chips.insert(label.clone(), chip);

        if self.config.animations_enabled {
            let spec = AnimationSpec::fade_in(self.config.fade_in_duration());
            let replaced = self.animations.start(
                AnimationTarget::Chip(label.clone()),
                spec,
                Completion::RevealChip(label.clone()),
            );
            if let Some(completion) = replaced {
                self.apply_completion(completion);
            }
        }

        debug!("added tag '{}' ({} total)", label, self.chips.len());
        self.request_layout();
    }

    /// Detaches the chip for `label` right away. With animations on, a copy
    /// keeps drawing while it fades out and layout stays frozen until then.
    fn remove_tag(&mut self, label: &str) -> bool {
        let Some(chip) = self.chips.remove(label) else {
            trace!("remove '{}': no such tag", label);
            return false;
        };
        self.animations.cancel(&AnimationTarget::Chip(label.to_string()));

        if self.config.animations_enabled {
            let ticket = self.next_ticket;
            self.next_ticket += 1;

            self.latch.engage();
            self.animations.start(
                AnimationTarget::Detached(ticket),
                AnimationSpec::fade_out(self.config.fade_out_duration()),
                Completion::RemovalFinished(ticket),
            );
            self.disappearing.push(DisappearingChip { ticket, chip });
        }

        debug!("removed tag '{}' ({} left)", label, self.chips.len());
        self.request_layout();
        true
    }

    /// The chip's click action: remove it, then tell the listener.
    pub fn click_tag(&mut self, label: &str) -> bool {
        if !self.remove_tag(label) {
            return false;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_tag_removed(label);
        }
        true
    }

    /// Label of the visible chip under `point`, topmost first.
    pub fn chip_at(&self, point: IVec2) -> Option<&str> {
        self.chips
            .values()
            .rev()
            .find(|chip| chip.is_visible() && chip.bounds().contains_point(point))
            .map(Chip::label)
    }

    /// Clicks whatever chip is under `point` and returns its label.
    pub fn click_at(&mut self, point: IVec2) -> Option<String> {
        let label = self.chip_at(point)?.to_string();
        self.click_tag(&label);
        Some(label)
    }

    // --- Configuration ---

    /// Registers the single removal observer, replacing any previous one.
    pub fn set_tag_removing_listener(&mut self, listener: Box<dyn TagChangeListener>) {
        self.listener = Some(listener);
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.config.animations_enabled = enabled;
    }

    pub fn animations_enabled(&self) -> bool {
        self.config.animations_enabled
    }

    /// Sets the text shown while the container is empty. `ResourceId::NONE`
    /// clears it.
    pub fn set_area_hint(&mut self, id: ResourceId) -> Result<()> {
        if id.is_none() {
            self.hint_resource = ResourceId::NONE;
            self.hint.set_text("");
        } else {
            let text = self.resources.resolve(id).map_err(|e| {
                warn!("area hint {} not set: {}", id, e);
                e
            })?;
            self.hint.set_text(text);
            self.hint_resource = id;
        }
        self.request_layout();
        Ok(())
    }

    // --- Measure and layout ---

    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    pub fn layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Sizes the container, decides hint visibility and measures every child
    /// against the container's own size.
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) {
        self.measured_size = ConstraintBox::new(width, height).default_size(IVec2::ZERO);

        // The hint is always a child, so a single child means no chips.
        let child_count = self.chips.len() + 1;
        let show_hint = child_count == 1 && !self.hint_resource.is_none();
        self.hint
            .set_visibility(if show_hint { Visibility::Visible } else { Visibility::Gone });

        let child_constraints = ConstraintBox::with_max_size(self.measured_size.x, self.measured_size.y);
        measure_child(&mut self.hint, child_constraints, &*self.measurer);
        for chip in self.chips.values_mut() {
            measure_child(chip, child_constraints, &*self.measurer);
        }
        trace!("measured container {:?} with {} chips", self.measured_size, self.chips.len());
    }

    /// Places every chip in label order and centers the hint. Does nothing
    /// while a removal fade-out is in flight.
    pub fn layout(&mut self) -> LayoutPass {
        self.layout_requested = false;
        if self.latch.is_engaged() {
            trace!("layout skipped, {} removal(s) animating", self.latch.pending());
            return LayoutPass::Frozen;
        }

        let sizes: Vec<IVec2> = self.chips.values().map(|chip| chip.measured_size()).collect();
        let result = self.engine.place(&sizes, self.measured_size);

        let animate = self.config.animations_enabled;
        let move_duration = self.config.move_duration();
        let mut deferred = Vec::new();

        for ((label, chip), position) in self.chips.iter_mut().zip(&result.positions) {
            let size = chip.measured_size();
            chip.layout(Bounds::from_position_size(*position, size));
            trace!("child({}) size - {},{} at {:?}", label, size.x, size.y, position);

            let target = AnimationTarget::Chip(label.clone());
            if animate {
                if let Some(spec) = chip.compute_move_animation(move_duration) {
                    deferred.extend(self.animations.start(target.clone(), spec, Completion::None));
                }
            }
            // Without a fade-in to reveal it, a new chip shows up on its first pass.
            if chip.visibility() == Visibility::Invisible && !self.animations.is_running(&target) {
                chip.set_visibility(Visibility::Visible);
            }
        }

        for completion in deferred {
            self.apply_completion(completion);
        }

        if self.hint.is_visible() {
            let size = self.hint.measured_size();
            let position = center_in(self.measured_size, size);
            self.hint.layout(Bounds::from_position_size(position, size));
        }

        LayoutPass::Placed {
            chips: self.chips.len(),
            rows: result.rows,
        }
    }

    // --- Animation ---

    /// Advances running animations and applies whatever finished.
    pub fn tick(&mut self, dt: Duration) {
        for completion in self.animations.tick(dt) {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::None => {}
            Completion::RevealChip(label) => {
                if let Some(chip) = self.chips.get_mut(&label) {
                    chip.set_visibility(Visibility::Visible);
                }
            }
            Completion::RemovalFinished(ticket) => {
                self.disappearing.retain(|d| d.ticket != ticket);
                self.latch.release();
                self.request_layout();
            }
        }
    }

    pub fn has_running_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// True while a removal fade-out holds layout still.
    pub fn is_animating(&self) -> bool {
        self.latch.is_engaged()
    }

    pub fn latch_state(&self) -> LatchState {
        self.latch.state()
    }

    // --- Inspection ---

    pub fn contains(&self, label: &str) -> bool {
        self.chips.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Labels in layout order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.chips.keys().map(String::as_str)
    }

    pub fn chip(&self, label: &str) -> Option<&Chip> {
        self.chips.get(label)
    }

    pub fn chips(&self) -> impl Iterator<Item = &Chip> {
        self.chips.values()
    }

    pub fn hint(&self) -> &HintLabel {
        &self.hint
    }

    pub fn disappearing(&self) -> &[DisappearingChip] {
        &self.disappearing
    }

    pub fn measured_size(&self) -> IVec2 {
        self.measured_size
    }

    /// Everything that should be drawn right now, back to front.
    pub fn scene(&self) -> Vec<SceneNode> {
        let mut nodes = Vec::with_capacity(self.chips.len() + self.disappearing.len() + 1);

        for (label, chip) in &self.chips {
            let target = AnimationTarget::Chip(label.clone());
            if chip.bounds().is_empty() || !(chip.is_visible() || self.animations.is_running(&target)) {
                continue;
            }
            let frame = self.animations.frame(&target);
            nodes.push(SceneNode::new(
                NodeRole::Chip,
                chip.label(),
                chip.bounds(),
                frame.unwrap_or_default(),
            ));
        }

        for gone in &self.disappearing {
            let frame = self
                .animations
                .frame(&AnimationTarget::Detached(gone.ticket))
                .unwrap_or_default();
            nodes.push(SceneNode::new(
                NodeRole::DisappearingChip,
                gone.chip.label(),
                gone.chip.bounds(),
                frame,
            ));
        }

        if self.hint.is_visible() && !self.hint.bounds().is_empty() {
            nodes.push(SceneNode::new(
                NodeRole::Hint,
                self.hint.text(),
                self.hint.bounds(),
                AnimationFrame::IDENTITY,
            ));
        }

        nodes
    }
}

impl Default for ChipContainer {
    fn default() -> Self {
        Self::build(ContainerConfig::default())
    }
}

impl TagChangeListener for ChipContainer {
    fn on_tag_added(&mut self, _tag: &str) {}

    fn on_tag_removed(&mut self, tag: &str) {
        if self.contains(tag) {
            self.remove_tag(tag);
        }
    }
}
