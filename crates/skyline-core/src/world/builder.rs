//! Builds a runtime World from a level definition and the current viewport.
//! All normalized→absolute scaling happens here, once per level load; a
//! window resize only takes effect on the next load.

use crate::api::viewport::Viewport;
use crate::core::geometry::Rect;
use crate::core::rng::Rng;
use crate::levels::defs::{HazardSpec, LevelDef};
use crate::world::citizen::{Citizen, CITIZEN_SIZE, ROSTER};
use crate::world::hazard::{Hazard, HazardKind};
use crate::world::platform::Platform;
use crate::world::World;

/// Height of the full-width floor prepended to every level.
const FLOOR_THICKNESS: f32 = 60.0;
/// The floor's top surface sits this far above the viewport bottom.
const FLOOR_TOP_FROM_BOTTOM: f32 = 40.0;
/// Falling drop hitbox side.
const DROP_SIZE: f32 = 30.0;
/// Drops start up to this far above the top edge.
const DROP_SPAWN_BAND: f32 = 500.0;
/// Default phase increment for bee/saw specs that omit a speed.
const DEFAULT_SWEEP_SPEED: f32 = 0.05;

pub fn build_world(def: &LevelDef, viewport: Viewport, rng: &mut Rng) -> World {
    let mut platforms = Vec::with_capacity(def.platforms.len() + 1);

    let mut floor = Platform::fixed(Rect::new(
        0.0,
        viewport.height - FLOOR_TOP_FROM_BOTTOM,
        viewport.width,
        FLOOR_THICKNESS,
    ));
    floor.is_floor = true;
    platforms.push(floor);

    for spec in def.platforms {
        let rect = Rect::new(
            spec.rx * viewport.width,
            spec.ry * viewport.height,
            spec.rw * viewport.width,
            spec.rh * viewport.height,
        );
        platforms.push(Platform {
            origin_x: rect.x,
            rect,
            move_x: spec.move_x,
            range: spec.range * viewport.width,
            speed: spec.speed * viewport.width,
            phase: 0.0,
            is_floor: false,
        });
    }

    let mut hazards = Vec::new();
    for spec in def.hazards {
        build_hazard(spec, viewport, rng, &mut hazards);
    }

    let citizens = spawn_citizens(&platforms, &hazards, rng);

    World {
        platforms,
        hazards,
        citizens,
    }
}

fn build_hazard(spec: &HazardSpec, viewport: Viewport, rng: &mut Rng, out: &mut Vec<Hazard>) {
    let abs = |rx: f32, ry: f32, rw: f32, rh: f32| {
        Rect::new(
            rx * viewport.width,
            ry * viewport.height,
            rw * viewport.width,
            rh * viewport.height,
        )
    };

    match *spec {
        HazardSpec::Spike { rx, ry, rw, rh } => out.push(Hazard {
            rect: abs(rx, ry, rw, rh),
            kind: HazardKind::Spike,
        }),
        HazardSpec::Fire { rx, ry, rw, rh } => out.push(Hazard {
            rect: abs(rx, ry, rw, rh),
            kind: HazardKind::Fire,
        }),
        HazardSpec::Patrol {
            rx,
            ry,
            rw,
            rh,
            range,
            ..
        } => {
            let rect = abs(rx, ry, rw, rh);
            out.push(Hazard {
                kind: HazardKind::Patrol {
                    origin_x: rect.x,
                    range: range * viewport.width,
                    phase: 0.0,
                },
                rect,
            });
        }
        HazardSpec::Bee {
            rx,
            ry,
            rw,
            rh,
            range,
            speed,
        } => {
            let rect = abs(rx, ry, rw, rh);
            out.push(Hazard {
                kind: HazardKind::Bee {
                    origin_x: rect.x,
                    base_y: rect.y,
                    range: range * viewport.width,
                    speed: sweep_speed(speed),
                    phase: 0.0,
                },
                rect,
            });
        }
        HazardSpec::Saw {
            rx,
            ry,
            rw,
            rh,
            range,
            speed,
        } => {
            let rect = abs(rx, ry, rw, rh);
            out.push(Hazard {
                kind: HazardKind::Saw {
                    origin_x: rect.x,
                    range: range * viewport.width,
                    speed: sweep_speed(speed),
                    phase: 0.0,
                },
                rect,
            });
        }
        HazardSpec::Laser {
            rx,
            ry,
            rw,
            rh,
            period,
        } => out.push(Hazard {
            rect: abs(rx, ry, rw, rh),
            kind: HazardKind::Laser {
                period: period.max(1),
                active: false,
            },
        }),
        // One spec entry expands into `count` independent drops.
        HazardSpec::Rain { count, speed } => {
            for _ in 0..count {
                out.push(Hazard {
                    rect: Rect::new(
                        rng.range_f32(0.0, viewport.width),
                        -rng.range_f32(0.0, DROP_SPAWN_BAND),
                        DROP_SIZE,
                        DROP_SIZE,
                    ),
                    kind: HazardKind::Falling {
                        dy: speed + rng.next_f32(),
                    },
                });
            }
        }
    }
}

/// Bee/saw sweep rates are phase increments; a missing (zero) speed falls
/// back to the default rather than freezing the hazard.
fn sweep_speed(spec_speed: f32) -> f32 {
    if spec_speed > 0.0 {
        spec_speed
    } else {
        DEFAULT_SWEEP_SPEED
    }
}

/// Place the three citizens on shuffled platforms, centered on the surface.
/// A citizen that would share its spot with a hazard resting on the same
/// platform is shifted to a free margin instead.
pub fn spawn_citizens(platforms: &[Platform], hazards: &[Hazard], rng: &mut Rng) -> Vec<Citizen> {
    let non_floor: Vec<usize> = platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_floor)
        .map(|(i, _)| i)
        .collect();

    // Prefer non-floor platforms; fall back to everything (floor included)
    // when the level is too sparse. Cyclic reuse if fewer than three.
    let mut targets: Vec<usize> = if non_floor.len() >= 3 {
        non_floor
    } else {
        (0..platforms.len()).collect()
    };
    rng.shuffle(&mut targets);

    ROSTER
        .iter()
        .enumerate()
        .map(|(i, &(name, priority))| {
            let plat = &platforms[targets[i % targets.len()]];
            let mut cx = plat.rect.x + plat.rect.w / 2.0 - CITIZEN_SIZE / 2.0;
            let cy = plat.top() - CITIZEN_SIZE;

            // A hazard whose footprint rests on this platform surface and
            // overlaps the centered spot makes it unreachable or unfair.
            let blocking = hazards.iter().find(|h| {
                (h.rect.bottom() - plat.top()).abs() < 10.0
                    && h.rect.x < cx + CITIZEN_SIZE
                    && h.rect.right() > cx
            });

            if let Some(h) = blocking {
                if h.rect.x > plat.rect.x + 30.0 {
                    cx = plat.rect.x + 10.0;
                } else {
                    cx = plat.rect.x + plat.rect.w - 60.0;
                }
            }

            Citizen::new(name, priority, Rect::new(cx, cy, CITIZEN_SIZE, CITIZEN_SIZE))
        })
        .collect()
}
