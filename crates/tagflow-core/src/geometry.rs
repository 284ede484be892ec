// crates/tagflow-core/src/geometry.rs
use glam::IVec2;

/// Axis-aligned box in container units, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub position: IVec2,
    pub size: IVec2,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn from_position_size(position: IVec2, size: IVec2) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> i32 {
        self.position.x
    }

    pub fn top(&self) -> i32 {
        self.position.y
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.y
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }
}
