use crate::core::geometry::Rect;

/// Runtime platform instance in absolute pixels.
///
/// Oscillating platforms swing around `origin_x` on a sine wave. The phase
/// advances by a fixed 0.02 per frame; the pixel-unit `speed` computed at
/// build time is carried for parity with the level data but is not a phase
/// increment.
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub origin_x: f32,
    pub move_x: bool,
    /// Oscillation amplitude in pixels.
    pub range: f32,
    /// Build-time speed in pixel units (see struct doc).
    pub speed: f32,
    pub phase: f32,
    pub is_floor: bool,
}

const PHASE_STEP: f32 = 0.02;

impl Platform {
    pub fn fixed(rect: Rect) -> Self {
        Self {
            origin_x: rect.x,
            rect,
            move_x: false,
            range: 0.0,
            speed: 0.0,
            phase: 0.0,
            is_floor: false,
        }
    }

    /// Top surface y, the landing height.
    pub fn top(&self) -> f32 {
        self.rect.y
    }

    /// Advance one frame of motion. Zero-range or non-moving platforms
    /// never drift.
    pub fn step(&mut self) {
        if self.move_x {
            self.phase += PHASE_STEP;
            self.rect.x = self.origin_x + self.phase.sin() * self.range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_platform_never_drifts() {
        let mut p = Platform::fixed(Rect::new(100.0, 200.0, 80.0, 20.0));
        for _ in 0..1000 {
            p.step();
        }
        assert_eq!(p.rect.x, 100.0);
        assert_eq!(p.rect.y, 200.0);
    }

    #[test]
    fn zero_range_mover_never_drifts() {
        let mut p = Platform::fixed(Rect::new(100.0, 200.0, 80.0, 20.0));
        p.move_x = true;
        for _ in 0..1000 {
            p.step();
        }
        assert_eq!(p.rect.x, 100.0);
    }

    #[test]
    fn oscillation_stays_within_amplitude() {
        let mut p = Platform::fixed(Rect::new(300.0, 200.0, 80.0, 20.0));
        p.move_x = true;
        p.range = 50.0;
        for _ in 0..2000 {
            p.step();
            assert!(
                p.rect.x >= 250.0 - 1e-3 && p.rect.x <= 350.0 + 1e-3,
                "x drifted out of band: {}",
                p.rect.x
            );
        }
    }
}
