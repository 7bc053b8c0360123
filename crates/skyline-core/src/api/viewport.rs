/// Display dimensions in pixels, sampled at level load.
/// Normalized level coordinates scale against this once per build; a window
/// resize takes effect on the next level (re)load, never mid-level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
