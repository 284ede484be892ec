// crates/tagflow-layout/src/lib.rs

use glam::IVec2;
use tagflow_core::{Element, TextMeasurer, Visibility};
use tracing::trace;

pub mod constraints;
pub mod wrap;

pub use constraints::*;
pub use wrap::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Top-left of each item, in input order.
    pub positions: Vec<IVec2>,
    pub rows: usize,
}

pub trait LayoutEngine {
    fn place(&mut self, sizes: &[IVec2], container_size: IVec2) -> LayoutResult;
}

/// Measures `element` under `constraints` and stores the result on it.
/// Gone elements keep their previous measurement.
pub fn measure_child(element: &mut dyn Element, constraints: ConstraintBox, measurer: &dyn TextMeasurer) {
    if element.visibility() == Visibility::Gone {
        return;
    }
    let desired = element.desired_size(measurer);
    let measured = constraints.resolve(desired);
    trace!("measure '{}': desired={:?} measured={:?}", element.text(), desired, measured);
    element.set_measured_size(measured);
}

/// Top-left that centers `child` inside a container of `container` size.
pub fn center_in(container: IVec2, child: IVec2) -> IVec2 {
    (container - child) / 2
}
