//! Per-frame hazard advancement and player hit detection.

use crate::api::viewport::Viewport;
use crate::core::geometry::Rect;
use crate::core::rng::Rng;
use crate::world::hazard::Hazard;

/// Step every hazard and report whether the player touched a lethal one.
/// Multiple overlaps in the same frame still report a single hit; the
/// session's death throttle makes the distinction moot anyway.
pub fn step_hazards(
    hazards: &mut [Hazard],
    player_rect: &Rect,
    frame: u64,
    viewport: Viewport,
    rng: &mut Rng,
) -> bool {
    let mut hit = false;
    for h in hazards.iter_mut() {
        h.step(frame, viewport, rng);
        if h.is_lethal() && h.rect.overlaps(player_rect) {
            hit = true;
        }
    }
    hit
}
