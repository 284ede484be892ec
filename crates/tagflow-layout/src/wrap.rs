// crates/tagflow-layout/src/wrap.rs
use glam::IVec2;
use tracing::debug;

use crate::{LayoutEngine, LayoutResult};

pub const DEFAULT_PADDING: i32 = 5;

/// Greedy row filling: left to right, wrapping to a new row whenever the next
/// item would cross the container's right edge.
///
/// A wrap advances by the height of the item placed just before it, not by the
/// tallest item of the row, so a tall item early in a row can overlap the next
/// row. Existing layouts depend on this.
#[derive(Debug, Clone)]
pub struct WrapLayoutEngine {
    padding: i32,
    debug: bool,
}

impl WrapLayoutEngine {
    pub fn new(padding: i32) -> Self {
        Self {
            padding,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn padding(&self) -> i32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding;
    }
}

impl Default for WrapLayoutEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}

impl LayoutEngine for WrapLayoutEngine {
    fn place(&mut self, sizes: &[IVec2], container_size: IVec2) -> LayoutResult {
        let padding = self.padding;
        let mut positions = Vec::with_capacity(sizes.len());
        let mut rows = if sizes.is_empty() { 0 } else { 1 };

        let mut x = padding;
        let mut y = padding;
        let mut previous_height = 0;

        for (index, size) in sizes.iter().enumerate() {
            if x + size.x > container_size.x {
                x = padding;
                // A first item too wide for the container has nothing before
                // it and advances by its own height. It still counts as one row.
                if index == 0 {
                    y += size.y + padding;
                } else {
                    y += previous_height + padding;
                    rows += 1;
                }
            }

            if self.debug {
                debug!("item {} size={:?} placed at ({}, {})", index, size, x, y);
            }
            positions.push(IVec2::new(x, y));

            x += size.x + padding;
            previous_height = size.y;
        }

        LayoutResult { positions, rows }
    }
}
