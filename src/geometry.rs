/// Axis-aligned bounding box in playfield units. Boxes are left-aligned:
/// `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Touching edges count as an overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.x + self.w < other.x || other.x + other.w < self.x {
            return false;
        }
        if self.y + self.h < other.y || other.y + other.h < self.y {
            return false;
        }
        true
    }
}

pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    val.max(min).min(max)
}
