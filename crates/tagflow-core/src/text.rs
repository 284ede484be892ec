// crates/tagflow-core/src/text.rs
use glam::IVec2;
use unicode_width::UnicodeWidthStr;

/// Measures the natural size of a piece of text in container units.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str) -> IVec2;
}

/// One unit per terminal column and one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure_text(&self, text: &str) -> IVec2 {
        let mut width = 0usize;
        let mut lines = 0usize;
        for line in text.lines() {
            width = width.max(line.width());
            lines += 1;
        }
        IVec2::new(width as i32, lines.max(1) as i32)
    }
}
