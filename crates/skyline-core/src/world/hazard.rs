use crate::api::viewport::Viewport;
use crate::core::geometry::Rect;
use crate::core::rng::Rng;

/// Fall distance above which a falling drop respawns, and its respawn height.
const FALLING_RESPAWN_Y: f32 = -50.0;
/// Margin kept off the right edge when rerolling a drop's x.
const FALLING_X_MARGIN: f32 = 50.0;
/// Patrol drones share the platform phase rate.
const PATROL_PHASE_STEP: f32 = 0.02;
/// Bee vertical bob amplitude in pixels.
const BEE_BOB_AMPLITUDE: f32 = 20.0;

/// Behavior-specific state, one variant per hazard kind. The motion step
/// matches exhaustively so adding a kind without wiring its behavior is a
/// compile error.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardKind {
    Spike,
    Fire,
    Patrol {
        origin_x: f32,
        range: f32,
        phase: f32,
    },
    Bee {
        origin_x: f32,
        base_y: f32,
        range: f32,
        /// Phase increment per frame, from the level data (default 0.05).
        speed: f32,
        phase: f32,
    },
    Saw {
        origin_x: f32,
        range: f32,
        /// Phase increment per frame, from the level data (default 0.05).
        speed: f32,
        phase: f32,
    },
    Laser {
        /// Full on/off cycle length in frames.
        period: u32,
        active: bool,
    },
    /// A drop that falls forever: past the bottom edge it wraps back above
    /// the screen at a random x. Never despawned within a level.
    Falling { dy: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub rect: Rect,
    pub kind: HazardKind,
}

impl Hazard {
    /// Advance one frame of motion/activation. `frame` is the session frame
    /// counter; lasers phase against it rather than private state.
    pub fn step(&mut self, frame: u64, viewport: Viewport, rng: &mut Rng) {
        match &mut self.kind {
            HazardKind::Spike | HazardKind::Fire => {}
            HazardKind::Patrol {
                origin_x,
                range,
                phase,
            } => {
                *phase += PATROL_PHASE_STEP;
                self.rect.x = *origin_x + phase.sin() * *range;
            }
            HazardKind::Bee {
                origin_x,
                base_y,
                range,
                speed,
                phase,
            } => {
                *phase += *speed;
                self.rect.x = *origin_x + phase.sin() * *range;
                self.rect.y = *base_y + (*phase * 2.0).sin() * BEE_BOB_AMPLITUDE;
            }
            HazardKind::Saw {
                origin_x,
                range,
                speed,
                phase,
            } => {
                *phase += *speed;
                if *range > 0.0 {
                    self.rect.x = *origin_x + phase.sin() * *range;
                }
            }
            HazardKind::Laser { period, active } => {
                let cycle = frame % *period as u64;
                // Active for the first half of each period.
                *active = cycle * 2 < *period as u64;
            }
            HazardKind::Falling { dy } => {
                self.rect.y += *dy;
                if self.rect.y > viewport.height {
                    self.rect.y = FALLING_RESPAWN_Y;
                    self.rect.x = rng.range_f32(0.0, viewport.width - FALLING_X_MARGIN);
                }
            }
        }
    }

    /// Whether touching this hazard kills right now. Only lasers have an
    /// inactive window; everything else is always solid.
    pub fn is_lethal(&self) -> bool {
        match &self.kind {
            HazardKind::Laser { active, .. } => *active,
            _ => true,
        }
    }
}
