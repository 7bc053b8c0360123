use glam::Vec2;

use crate::api::viewport::Viewport;
use crate::core::geometry::Rect;

/// Player hitbox side length.
pub const PLAYER_SIZE: f32 = 50.0;
/// Spawn x, fixed; spawn y is measured up from the viewport bottom.
const SPAWN_X: f32 = 50.0;
const SPAWN_FROM_BOTTOM: f32 = 150.0;

/// The player-controlled character. One instance per session; repositioned
/// across levels and respawns, never recreated.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Self::spawn_point(viewport),
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    pub fn spawn_point(viewport: Viewport) -> Vec2 {
        Vec2::new(SPAWN_X, viewport.height - SPAWN_FROM_BOTTOM)
    }

    /// Reset transform and physics state to the level start. Used on level
    /// load and on every respawn.
    pub fn respawn(&mut self, viewport: Viewport) {
        self.pos = Self::spawn_point(viewport);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respawn_resets_physics_state() {
        let vp = Viewport::new(1200.0, 800.0);
        let mut p = Player::new(vp);
        p.pos = Vec2::new(600.0, 100.0);
        p.vel = Vec2::new(8.0, -15.0);
        p.on_ground = true;
        p.respawn(vp);
        assert_eq!(p.pos, Vec2::new(50.0, 650.0));
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(!p.on_ground);
    }
}
