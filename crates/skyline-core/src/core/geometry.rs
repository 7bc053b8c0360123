/// Axis-aligned rectangle in absolute pixel coordinates.
/// All world entities (platforms, hazards, citizens, the player hitbox)
/// collide through this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB overlap: touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.x >= self.x + self.w
            || other.x + other.w <= self.x
            || other.y >= self.y + self.h
            || other.y + other.h <= self.y)
    }
}
