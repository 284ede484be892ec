use glam::IVec2;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use tagflow_core::{
    Element, NodeRole, ResourceId, TagChangeListener, TagflowError, TextMeasurer, Visibility, CHIP_INSETS,
};
use tagflow_layout::MeasureSpec;
use tagflow_runtime::{ChipContainer, ContainerConfig, LatchState, LayoutPass};

/// Hands out fixed chip sizes so tests can use round numbers.
struct TableMeasurer(HashMap<String, IVec2>);

impl TableMeasurer {
    fn new(chips: &[(&str, i32, i32)]) -> Self {
        Self(
            chips
                .iter()
                .map(|&(label, w, h)| (label.to_string(), IVec2::new(w, h) - CHIP_INSETS))
                .collect(),
        )
    }
}

impl TextMeasurer for TableMeasurer {
    fn measure_text(&self, text: &str) -> IVec2 {
        self.0.get(text).copied().unwrap_or(IVec2::new(text.len() as i32, 1))
    }
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl TagChangeListener for Recorder {
    fn on_tag_added(&mut self, tag: &str) {
        panic!("container never reports additions, got '{}'", tag);
    }

    fn on_tag_removed(&mut self, tag: &str) {
        self.0.borrow_mut().push(tag.to_string());
    }
}

fn scenario_container(animations: bool) -> ChipContainer {
    let config = ContainerConfig {
        animations_enabled: animations,
        ..ContainerConfig::default()
    };
    ChipContainer::new(config)
        .unwrap()
        .with_measurer(Box::new(TableMeasurer::new(&[
            ("a", 60, 20),
            ("b", 50, 20),
            ("c", 100, 20),
        ])))
}

fn relayout(container: &mut ChipContainer, width: i32, height: i32) -> LayoutPass {
    container.measure(MeasureSpec::Exactly(width), MeasureSpec::Exactly(height));
    container.layout()
}

fn position(container: &ChipContainer, label: &str) -> IVec2 {
    container.chip(label).expect("chip present").bounds().position
}

#[test]
fn reference_scenario_places_in_key_order() {
    let mut container = scenario_container(false);
    container.add_tag("b");
    container.add_tag("a");
    container.add_tag("c");

    let pass = relayout(&mut container, 200, 100);

    assert_eq!(pass, LayoutPass::Placed { chips: 3, rows: 2 });
    assert_eq!(container.labels().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(position(&container, "a"), IVec2::new(5, 5));
    assert_eq!(position(&container, "b"), IVec2::new(70, 5));
    assert_eq!(position(&container, "c"), IVec2::new(5, 5 + 20 + 5));
}

#[test]
fn chips_are_measured_at_most_container_size() {
    let mut container = ChipContainer::default();
    container.add_tag("an extremely long tag that cannot fit");
    relayout(&mut container, 20, 2);

    let chip = container.chip("an extremely long tag that cannot fit").unwrap();
    assert_eq!(chip.measured_size(), IVec2::new(20, 2));
}

#[test]
fn without_animations_new_chips_appear_on_next_layout() {
    let mut container = ChipContainer::default();
    container.add_tag("rust");

    assert_eq!(container.chip("rust").unwrap().visibility(), Visibility::Invisible);
    assert!(container.layout_requested());
    assert!(container.scene().is_empty());

    relayout(&mut container, 80, 24);
    assert!(!container.layout_requested());
    assert_eq!(container.chip("rust").unwrap().visibility(), Visibility::Visible);
    assert_eq!(container.scene().len(), 1);
}

#[test]
fn with_animations_chip_is_revealed_when_fade_in_ends() {
    let mut container = scenario_container(true);
    container.add_tag("a");
    relayout(&mut container, 200, 100);

    // Still fading in: drawn through the animation but not yet visible.
    assert_eq!(container.chip("a").unwrap().visibility(), Visibility::Invisible);
    container.tick(Duration::from_millis(150));
    let scene = container.scene();
    assert_eq!(scene.len(), 1);
    assert!(scene[0].alpha > 0.0 && scene[0].alpha < 1.0);

    container.tick(Duration::from_millis(150));
    assert_eq!(container.chip("a").unwrap().visibility(), Visibility::Visible);
    assert!(!container.has_running_animations());
    assert_eq!(container.scene()[0].alpha, 1.0);
}

#[test]
fn clicking_a_chip_removes_it_and_notifies_listener() {
    let recorder = Recorder::default();
    let mut container = scenario_container(false);
    container.set_tag_removing_listener(Box::new(recorder.clone()));
    container.add_tag("a");
    container.add_tag("b");
    relayout(&mut container, 200, 100);

    let clicked = container.click_at(IVec2::new(75, 10));
    assert_eq!(clicked.as_deref(), Some("b"));
    assert!(!container.contains("b"));
    assert_eq!(*recorder.0.borrow(), vec!["b".to_string()]);

    assert_eq!(container.click_at(IVec2::new(190, 90)), None);
    assert!(!container.click_tag("b"));
    assert_eq!(recorder.0.borrow().len(), 1);
}

#[test]
fn last_registered_listener_wins() {
    let first = Recorder::default();
    let second = Recorder::default();
    let mut container = ChipContainer::default();
    container.set_tag_removing_listener(Box::new(first.clone()));
    container.set_tag_removing_listener(Box::new(second.clone()));
    container.add_tag("x");

    container.click_tag("x");
    assert!(first.0.borrow().is_empty());
    assert_eq!(*second.0.borrow(), vec!["x".to_string()]);
}

#[test]
fn external_removal_does_not_echo_to_listener() {
    let recorder = Recorder::default();
    let mut container = ChipContainer::default();
    container.set_tag_removing_listener(Box::new(recorder.clone()));
    container.add_tag("x");

    container.on_tag_added("y");
    assert!(!container.contains("y"));

    container.on_tag_removed("x");
    assert!(container.is_empty());
    assert!(recorder.0.borrow().is_empty());
}

#[test]
fn removing_twice_is_a_no_op() {
    let mut container = scenario_container(true);
    container.add_tag("a");
    relayout(&mut container, 200, 100);

    container.on_tag_removed("a");
    assert_eq!(container.latch_state(), LatchState::RemovalAnimating);

    container.set_animations_enabled(false);
    container.on_tag_removed("a");
    assert_eq!(container.disappearing().len(), 1);
    assert!(container.is_empty());

    container.tick(Duration::from_secs(1));
    assert_eq!(container.latch_state(), LatchState::Idle);
    assert!(container.disappearing().is_empty());
}

#[test]
fn layout_is_frozen_while_removal_fades_out() {
    let mut container = scenario_container(true);
    for label in ["a", "b", "c"] {
        container.add_tag(label);
    }
    relayout(&mut container, 200, 100);
    container.tick(Duration::from_millis(300));

    container.click_tag("a");
    assert!(container.is_animating());
    assert!(!container.contains("a"));

    assert_eq!(relayout(&mut container, 200, 100), LayoutPass::Frozen);
    assert_eq!(position(&container, "b"), IVec2::new(70, 5));
    assert_eq!(position(&container, "c"), IVec2::new(5, 30));

    let disappearing: Vec<_> = container
        .scene()
        .into_iter()
        .filter(|node| node.role == NodeRole::DisappearingChip)
        .collect();
    assert_eq!(disappearing.len(), 1);
    assert_eq!(disappearing[0].text, "a");

    container.tick(Duration::from_millis(150));
    assert!(container.is_animating());
    container.tick(Duration::from_millis(150));
    assert!(!container.is_animating());
    assert!(container.layout_requested());

    assert_eq!(
        relayout(&mut container, 200, 100),
        LayoutPass::Placed { chips: 2, rows: 1 }
    );
    assert_eq!(position(&container, "b"), IVec2::new(5, 5));
    assert_eq!(position(&container, "c"), IVec2::new(60, 5));

    // Both chips slide from where they were.
    let scene = container.scene();
    let b = scene.iter().find(|node| node.text == "b").unwrap();
    assert!(b.offset.x > 60.0);
    let c = scene.iter().find(|node| node.text == "c").unwrap();
    assert!(c.offset.x < -50.0 && c.offset.y > 20.0);

    container.tick(Duration::from_millis(400));
    assert!(!container.has_running_animations());
    assert!(container.scene().iter().all(|node| node.offset == glam::Vec2::ZERO));
}

#[test]
fn overlapping_removals_hold_the_latch_until_the_last_one_ends() {
    let mut container = scenario_container(true);
    for label in ["a", "b", "c"] {
        container.add_tag(label);
    }
    relayout(&mut container, 200, 100);
    container.tick(Duration::from_millis(300));

    container.click_tag("a");
    container.tick(Duration::from_millis(200));
    container.click_tag("b");

    container.tick(Duration::from_millis(100));
    assert_eq!(container.latch_state(), LatchState::RemovalAnimating);
    assert_eq!(relayout(&mut container, 200, 100), LayoutPass::Frozen);

    container.tick(Duration::from_millis(200));
    assert_eq!(container.latch_state(), LatchState::Idle);
    relayout(&mut container, 200, 100);
    assert_eq!(position(&container, "c"), IVec2::new(5, 5));
}

#[test]
fn duplicate_add_replaces_existing_chip() {
    let recorder = Recorder::default();
    let mut container = ChipContainer::default();
    container.set_tag_removing_listener(Box::new(recorder.clone()));
    container.add_tag("same");
    relayout(&mut container, 80, 24);

    container.add_tag("same");
    assert_eq!(container.len(), 1);
    let chip = container.chip("same").unwrap();
    assert!(chip.is_first_placement());
    assert_eq!(chip.visibility(), Visibility::Invisible);
    assert!(recorder.0.borrow().is_empty());
}

#[test]
fn hint_tracks_empty_state() {
    let mut container = ChipContainer::default();
    container.resources_mut().insert(ResourceId(1), "No tags yet");

    relayout(&mut container, 80, 24);
    assert_eq!(container.hint().visibility(), Visibility::Gone);

    container.set_area_hint(ResourceId(1)).unwrap();
    relayout(&mut container, 80, 24);
    assert!(container.hint().is_visible());
    assert_eq!(container.hint().bounds().position, IVec2::new(34, 11));
    assert!(container.scene().iter().any(|node| node.role == NodeRole::Hint));

    container.add_tag("one");
    relayout(&mut container, 80, 24);
    assert_eq!(container.hint().visibility(), Visibility::Gone);
    assert!(container.scene().iter().all(|node| node.role != NodeRole::Hint));

    container.on_tag_removed("one");
    relayout(&mut container, 80, 24);
    assert!(container.hint().is_visible());

    container.set_area_hint(ResourceId::NONE).unwrap();
    relayout(&mut container, 80, 24);
    assert_eq!(container.hint().visibility(), Visibility::Gone);
}

#[test]
fn unknown_hint_resource_is_an_error() {
    let mut container = ChipContainer::default();
    let err = container.set_area_hint(ResourceId(42)).unwrap_err();
    assert!(matches!(err, TagflowError::ResourceNotFound(ResourceId(42))));

    relayout(&mut container, 80, 24);
    assert_eq!(container.hint().visibility(), Visibility::Gone);
}

#[test]
fn invalid_config_is_rejected() {
    let config = ContainerConfig {
        padding: -3,
        ..ContainerConfig::default()
    };
    assert!(ChipContainer::new(config).is_err());
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Layout,
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        Just(Op::Layout),
        (0u64..500).prop_map(Op::Tick),
    ]
}

const LABELS: [&str; 8] = ["kiwi", "apple", "fig", "banana", "cherry", "date", "grape", "elder"];

proptest! {
    #[test]
    fn settled_container_holds_exactly_the_surviving_labels(
        ops in prop::collection::vec(op_strategy(), 0..40),
        animations in any::<bool>(),
    ) {
        let mut container = ChipContainer::new(ContainerConfig {
            padding: 1,
            animations_enabled: animations,
            ..ContainerConfig::default()
        }).unwrap();
        let mut expected = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(i) => {
                    if expected.insert(LABELS[i]) {
                        container.add_tag(LABELS[i]);
                    }
                }
                Op::Remove(i) => {
                    expected.remove(LABELS[i]);
                    container.on_tag_removed(LABELS[i]);
                }
                Op::Layout => {
                    relayout(&mut container, 40, 30);
                }
                Op::Tick(ms) => container.tick(Duration::from_millis(ms)),
            }
        }

        container.tick(Duration::from_secs(2));
        prop_assert!(!container.is_animating());
        relayout(&mut container, 40, 30);
        container.tick(Duration::from_secs(2));

        let labels: Vec<&str> = container.labels().collect();
        let wanted: Vec<&str> = expected.iter().copied().collect();
        prop_assert_eq!(labels, wanted);
        prop_assert!(container.disappearing().is_empty());

        // Layout order is key order: each chip is right of, or below, the previous one.
        let positions: Vec<IVec2> = container.chips().map(|chip| chip.bounds().position).collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[1].y > pair[0].y || (pair[1].y == pair[0].y && pair[1].x > pair[0].x));
        }
        prop_assert!(container.chips().all(|chip| chip.is_visible()));
    }
}
