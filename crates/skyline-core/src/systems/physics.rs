//! Player integration and one-way platform resolution, one call per frame.

use crate::api::viewport::Viewport;
use crate::input::state::InputState;
use crate::world::platform::Platform;
use crate::world::player::{Player, PLAYER_SIZE};

pub const GRAVITY: f32 = 0.9;
pub const TERMINAL_VELOCITY: f32 = 20.0;
/// Horizontal inset on both platform edges so grazing a corner doesn't snap
/// the player on top.
const LANDING_INSET: f32 = 5.0;
/// Extra vertical tolerance on the landing straddle test.
const LANDING_TOLERANCE: f32 = 2.0;

/// Movement tuning sampled from the player's settings.
#[derive(Debug, Clone, Copy)]
pub struct Movement {
    /// Horizontal run speed, pixels per frame.
    pub speed: f32,
    /// Upward velocity applied on jump.
    pub jump_force: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            speed: 8.0,
            jump_force: 22.0,
        }
    }
}

/// Advance the player one frame and move every platform.
///
/// Platforms are tested in storage order (floor first, then catalog order);
/// when several qualify for landing in the same frame the last one tested
/// wins. Returns true when the player fell past the bottom of the viewport,
/// which only happens if every platform including the floor was missed.
pub fn step_player(
    player: &mut Player,
    input: &InputState,
    platforms: &mut [Platform],
    viewport: Viewport,
    movement: Movement,
) -> bool {
    // Horizontal: resolve input to a velocity, right sampled last.
    player.vel.x = 0.0;
    if input.left {
        player.vel.x = -movement.speed;
    }
    if input.right {
        player.vel.x = movement.speed;
    }
    player.pos.x += player.vel.x;
    player.pos.x = player.pos.x.clamp(0.0, viewport.width - PLAYER_SIZE);

    // Vertical: gravity, terminal velocity, displacement.
    player.vel.y = (player.vel.y + GRAVITY).min(TERMINAL_VELOCITY);
    player.pos.y += player.vel.y;

    // Jump only from the ground; on_ground reflects last frame's landing.
    if input.jump && player.on_ground {
        player.vel.y = -movement.jump_force;
        player.on_ground = false;
    }

    // One-way landing: only downward or stationary motion can catch a
    // platform top, and the straddle window scales with this frame's fall.
    player.on_ground = false;
    for p in platforms.iter_mut() {
        p.step();

        let feet = player.pos.y + PLAYER_SIZE;
        if player.vel.y >= 0.0
            && player.pos.x + PLAYER_SIZE > p.rect.x + LANDING_INSET
            && player.pos.x < p.rect.right() - LANDING_INSET
            && feet > p.rect.y
            && feet < p.rect.bottom() + player.vel.y + LANDING_TOLERANCE
        {
            player.pos.y = p.rect.y - PLAYER_SIZE;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
    }

    player.pos.y > viewport.height
}
