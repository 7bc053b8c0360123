pub mod builder;
pub mod citizen;
pub mod hazard;
pub mod platform;
pub mod player;

use self::citizen::Citizen;
use self::hazard::Hazard;
use self::platform::Platform;

/// The mutable entity set for the currently loaded level. Rebuilt wholesale
/// on every level load, never partially mutated across a level boundary.
#[derive(Debug, Default)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub citizens: Vec<Citizen>,
}
