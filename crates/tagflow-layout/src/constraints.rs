// crates/tagflow-layout/src/constraints.rs
use glam::IVec2;

/// Per-axis measurement request from a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    Exactly(i32),
    AtMost(i32),
    Unspecified,
}

impl MeasureSpec {
    /// Size a plain container picks for itself under this spec.
    pub fn default_size(self, suggested_minimum: i32) -> i32 {
        match self {
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => size,
            MeasureSpec::Unspecified => suggested_minimum,
        }
    }

    /// Size a child with natural size `desired` ends up with.
    pub fn resolve(self, desired: i32) -> i32 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => desired.min(size),
            MeasureSpec::Unspecified => desired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintBox {
    pub width: MeasureSpec,
    pub height: MeasureSpec,
}

impl Default for ConstraintBox {
    fn default() -> Self {
        Self {
            width: MeasureSpec::Unspecified,
            height: MeasureSpec::Unspecified,
        }
    }
}

impl ConstraintBox {
    pub fn new(width: MeasureSpec, height: MeasureSpec) -> Self {
        Self { width, height }
    }

    pub fn with_max_size(width: i32, height: i32) -> Self {
        Self::new(MeasureSpec::AtMost(width), MeasureSpec::AtMost(height))
    }

    pub fn with_fixed_size(width: i32, height: i32) -> Self {
        Self::new(MeasureSpec::Exactly(width), MeasureSpec::Exactly(height))
    }

    pub fn default_size(&self, suggested_minimum: IVec2) -> IVec2 {
        IVec2::new(
            self.width.default_size(suggested_minimum.x),
            self.height.default_size(suggested_minimum.y),
        )
    }

    pub fn resolve(&self, desired: IVec2) -> IVec2 {
        IVec2::new(self.width.resolve(desired.x), self.height.resolve(desired.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_clamps_only_oversized_children() {
        let constraints = ConstraintBox::with_max_size(20, 5);
        assert_eq!(constraints.resolve(IVec2::new(8, 3)), IVec2::new(8, 3));
        assert_eq!(constraints.resolve(IVec2::new(30, 3)), IVec2::new(20, 3));
    }

    #[test]
    fn exactly_overrides_desired_size() {
        let constraints = ConstraintBox::with_fixed_size(12, 4);
        assert_eq!(constraints.resolve(IVec2::new(1, 1)), IVec2::new(12, 4));
    }

    #[test]
    fn unspecified_container_falls_back_to_minimum() {
        let constraints = ConstraintBox::new(MeasureSpec::Unspecified, MeasureSpec::AtMost(9));
        assert_eq!(constraints.default_size(IVec2::ZERO), IVec2::new(0, 9));
    }
}
