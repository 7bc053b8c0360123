//! The authored level set, easy to hard. Constant for the process lifetime;
//! levels are addressed by 1-based number.

use super::defs::{HazardSpec, LevelDef, PlatformSpec};

/// L1: Rooftops — basics.
const L1: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.75, 0.25, 0.05),
        PlatformSpec::fixed(0.45, 0.60, 0.25, 0.05),
        PlatformSpec::fixed(0.8, 0.45, 0.15, 0.05),
    ],
    hazards: &[],
};

/// L2: First Jump — wide gaps.
const L2: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.05, 0.8, 0.2, 0.05),
        PlatformSpec::fixed(0.4, 0.65, 0.2, 0.05),
        PlatformSpec::fixed(0.75, 0.5, 0.2, 0.05),
    ],
    hazards: &[],
};

/// L3: Moving Basics — one slow moving platform.
const L3: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::moving(0.4, 0.6, 0.2, 0.05, 0.1, 0.01),
        PlatformSpec::fixed(0.8, 0.4, 0.15, 0.05),
    ],
    hazards: &[],
};

/// L4: The Foundry — fire.
const L4: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.2, 0.05),
        PlatformSpec::fixed(0.5, 0.6, 0.2, 0.05),
        PlatformSpec::fixed(0.8, 0.3, 0.15, 0.05),
    ],
    hazards: &[HazardSpec::Fire {
        rx: 0.55,
        ry: 0.56,
        rw: 0.1,
        rh: 0.04,
    }],
};

/// L5: Windy City — patrol drone.
const L5: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::fixed(0.4, 0.6, 0.2, 0.05),
        PlatformSpec::fixed(0.7, 0.4, 0.2, 0.05),
    ],
    hazards: &[HazardSpec::Patrol {
        rx: 0.6,
        ry: 0.2,
        rw: 0.08,
        rh: 0.08,
        range: 0.2,
        speed: 0.02,
    }],
};

/// L6: Clock Tower — saw.
const L6: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::fixed(0.35, 0.6, 0.15, 0.05),
        PlatformSpec::moving(0.6, 0.5, 0.15, 0.05, 0.05, 0.01),
        PlatformSpec::fixed(0.85, 0.3, 0.1, 0.05),
    ],
    hazards: &[HazardSpec::Saw {
        rx: 0.4,
        ry: 0.9,
        rw: 0.06,
        rh: 0.06,
        range: 0.3,
        speed: 0.02,
    }],
};

/// L7: Toxic Jungle — slow rain.
const L7: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.2, 0.05),
        PlatformSpec::fixed(0.4, 0.5, 0.2, 0.05),
        PlatformSpec::fixed(0.7, 0.3, 0.2, 0.05),
    ],
    hazards: &[HazardSpec::Rain { count: 5, speed: 4.0 }],
};

/// L8: High Stakes — fast platforms.
const L8: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::moving(0.3, 0.6, 0.15, 0.05, 0.15, 0.02),
        PlatformSpec::moving(0.6, 0.4, 0.15, 0.05, 0.1, 0.025),
        PlatformSpec::fixed(0.85, 0.2, 0.1, 0.05),
    ],
    hazards: &[HazardSpec::Saw {
        rx: 0.5,
        ry: 0.9,
        rw: 0.07,
        rh: 0.07,
        range: 0.4,
        speed: 0.04,
    }],
};

/// L9: Laser Lab.
const L9: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::fixed(0.4, 0.6, 0.2, 0.05),
        PlatformSpec::fixed(0.7, 0.4, 0.15, 0.05),
        PlatformSpec::fixed(0.4, 0.2, 0.2, 0.05),
    ],
    hazards: &[
        HazardSpec::Laser {
            rx: 0.45,
            ry: 0.4,
            rw: 0.1,
            rh: 0.2,
            period: 180,
        },
        HazardSpec::Laser {
            rx: 0.6,
            ry: 0.0,
            rw: 0.02,
            rh: 0.4,
            period: 120,
        },
    ],
};

/// L10: The Summit — rain plus moving platforms.
const L10: LevelDef = LevelDef {
    platforms: &[
        PlatformSpec::fixed(0.1, 0.8, 0.15, 0.05),
        PlatformSpec::moving(0.3, 0.6, 0.15, 0.05, 0.1, 0.015),
        PlatformSpec::moving(0.6, 0.4, 0.15, 0.05, 0.1, 0.015),
        PlatformSpec::fixed(0.8, 0.2, 0.15, 0.05),
    ],
    hazards: &[HazardSpec::Rain { count: 5, speed: 2.0 }],
};

const LEVELS: [LevelDef; 10] = [L1, L2, L3, L4, L5, L6, L7, L8, L9, L10];

/// Number of defined levels.
pub fn count() -> u32 {
    LEVELS.len() as u32
}

/// Look up a level by 1-based number. `None` past the end of the catalog —
/// callers treat that as final victory, never as an error.
pub fn level(number: u32) -> Option<&'static LevelDef> {
    if number == 0 {
        return None;
    }
    LEVELS.get(number as usize - 1)
}
