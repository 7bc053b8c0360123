//! Declarative level definitions.
//! Everything is in normalized viewport fractions; the world builder scales
//! to absolute pixels at load time. Const-constructible so the catalog can
//! live in static data.

/// A platform in normalized coordinates. `range`/`speed` of zero means the
/// platform never moves; missing motion parameters are never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    pub rx: f32,
    pub ry: f32,
    pub rw: f32,
    pub rh: f32,
    pub move_x: bool,
    /// Horizontal oscillation amplitude, fraction of viewport width.
    pub range: f32,
    /// Oscillation speed, fraction of viewport width.
    pub speed: f32,
}

impl PlatformSpec {
    pub const fn fixed(rx: f32, ry: f32, rw: f32, rh: f32) -> Self {
        Self {
            rx,
            ry,
            rw,
            rh,
            move_x: false,
            range: 0.0,
            speed: 0.0,
        }
    }

    pub const fn moving(rx: f32, ry: f32, rw: f32, rh: f32, range: f32, speed: f32) -> Self {
        Self {
            rx,
            ry,
            rw,
            rh,
            move_x: true,
            range,
            speed,
        }
    }
}

/// A hazard in normalized coordinates, one variant per behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardSpec {
    /// Static spikes.
    Spike { rx: f32, ry: f32, rw: f32, rh: f32 },
    /// Stationary flame; flicker is purely visual, the hitbox is constant.
    Fire { rx: f32, ry: f32, rw: f32, rh: f32 },
    /// Horizontally patrolling drone.
    Patrol {
        rx: f32,
        ry: f32,
        rw: f32,
        rh: f32,
        range: f32,
        speed: f32,
    },
    /// Patrols horizontally while bobbing vertically.
    Bee {
        rx: f32,
        ry: f32,
        rw: f32,
        rh: f32,
        range: f32,
        speed: f32,
    },
    /// Spinning saw blade, optionally sweeping horizontally.
    Saw {
        rx: f32,
        ry: f32,
        rw: f32,
        rh: f32,
        range: f32,
        speed: f32,
    },
    /// Beam that cycles on and off with the given period (frames).
    Laser {
        rx: f32,
        ry: f32,
        rw: f32,
        rh: f32,
        period: u32,
    },
    /// Expands into `count` independent falling drops with randomized
    /// spawn positions; `speed` is the base fall rate in pixels per frame.
    Rain { count: u32, speed: f32 },
}

/// One authored level: ordered platforms and hazards.
#[derive(Debug, Clone, Copy)]
pub struct LevelDef {
    pub platforms: &'static [PlatformSpec],
    pub hazards: &'static [HazardSpec],
}
