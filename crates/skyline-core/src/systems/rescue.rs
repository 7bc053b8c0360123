//! Rescue detection and the two-phase scoring rules.
//!
//! Scoring runs twice on purpose: each rescue awards live points (instant
//! HUD feedback, order judged against who is still waiting), and the
//! full-clear recompute derives the authoritative level score and stars from
//! the positional rescue order. The two can disagree; the recompute wins.

use crate::core::geometry::Rect;
use crate::world::citizen::Citizen;

/// Points for a rescue with no higher-priority citizen still waiting.
pub const POINTS_IN_ORDER: u32 = 500;
/// Points for an out-of-order rescue.
pub const POINTS_OUT_OF_ORDER: u32 = 300;

/// Result of touching citizens this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescueTally {
    /// Live points gained this frame.
    pub points: u32,
    /// Whether any rescue happened (HUD refresh needed).
    pub rescued_any: bool,
    /// Whether every citizen is now rescued.
    pub all_rescued: bool,
}

/// Authoritative end-of-level result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub score: u32,
    pub stars: u8,
    /// Rescue-order entries that positionally matched priority order.
    pub correct_count: u32,
}

/// Mark citizens the player is touching as rescued and award live points.
/// Each citizen flips to rescued at most once, ever.
pub fn check_rescues(
    citizens: &mut [Citizen],
    player_rect: &Rect,
    elapsed_seconds: u32,
    rescue_order: &mut Vec<&'static str>,
) -> RescueTally {
    let mut tally = RescueTally {
        points: 0,
        rescued_any: false,
        all_rescued: false,
    };

    for i in 0..citizens.len() {
        if citizens[i].rescued || !citizens[i].rect.overlaps(player_rect) {
            continue;
        }

        let priority = citizens[i].priority;
        // In order means nobody of strictly higher priority is still waiting
        // at this instant.
        let missed_higher = citizens
            .iter()
            .any(|o| !o.rescued && o.priority < priority);
        let points = if missed_higher {
            POINTS_OUT_OF_ORDER
        } else {
            POINTS_IN_ORDER
        };

        let c = &mut citizens[i];
        c.rescued = true;
        c.rescued_at = elapsed_seconds;
        c.points = points;
        c.correct_order = !missed_higher;
        rescue_order.push(c.name);

        tally.points += points;
        tally.rescued_any = true;
    }

    tally.all_rescued = citizens.iter().all(|c| c.rescued);
    tally
}

/// Recompute the authoritative score from the actual rescue order: count
/// positional matches against priority-ascending order. 3 matches is a
/// perfect clear (500, three stars); everything else scores 300 with stars
/// reflecting the match count.
pub fn finalize_level(citizens: &[Citizen], rescue_order: &[&'static str]) -> LevelResult {
    let mut expected: Vec<&Citizen> = citizens.iter().collect();
    expected.sort_by_key(|c| c.priority);

    let mut correct_count = 0u32;
    for (i, name) in rescue_order.iter().enumerate() {
        let rescued = citizens.iter().find(|c| c.name == *name);
        if let (Some(c), Some(e)) = (rescued, expected.get(i)) {
            if c.priority == e.priority {
                correct_count += 1;
            }
        }
    }

    let stars = match correct_count {
        3 => 3,
        2 => 2,
        _ => 1,
    };
    let score = if correct_count == 3 {
        POINTS_IN_ORDER
    } else {
        POINTS_OUT_OF_ORDER
    };

    LevelResult {
        score,
        stars,
        correct_count,
    }
}
