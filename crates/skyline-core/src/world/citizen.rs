use crate::core::geometry::Rect;

/// Width/height of a citizen's pickup box.
pub const CITIZEN_SIZE: f32 = 50.0;

/// The fixed roster spawned into every level, in priority order
/// (1 = rescue first).
pub const ROSTER: [(&str, u8); 3] = [("Kid", 1), ("Old Lady", 2), ("Girl", 3)];

/// A rescue target standing on a platform. Created at level load, flipped to
/// `rescued` exactly once, never removed before level end.
#[derive(Debug, Clone)]
pub struct Citizen {
    pub name: &'static str,
    /// Rescue priority rank, 1 = highest.
    pub priority: u8,
    pub rect: Rect,
    pub rescued: bool,
    /// Elapsed level seconds at the moment of rescue.
    pub rescued_at: u32,
    /// Points awarded live at rescue time (500 in-order, 300 otherwise).
    pub points: u32,
    /// Whether no higher-priority citizen was still waiting at rescue time.
    pub correct_order: bool,
}

impl Citizen {
    pub fn new(name: &'static str, priority: u8, rect: Rect) -> Self {
        Self {
            name,
            priority,
            rect,
            rescued: false,
            rescued_at: 0,
            points: 0,
            correct_order: false,
        }
    }
}
