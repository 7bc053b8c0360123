pub mod api;
pub mod core;
pub mod input;
pub mod levels;
pub mod progress;
pub mod session;
pub mod systems;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::events::{CitizenSummary, GameEvent, SoundEvent};
pub use api::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardError};
pub use api::store::{MemoryStore, ProfileStore};
pub use api::viewport::Viewport;
pub use core::geometry::Rect;
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use input::state::{Action, InputEvent, InputState};
pub use levels::catalog;
pub use levels::defs::{HazardSpec, LevelDef, PlatformSpec};
pub use progress::Settings;
pub use session::{GameSession, Phase, SchedulerState, STARTING_LIVES};
pub use systems::physics::Movement;
pub use systems::rescue::LevelResult;
pub use world::citizen::Citizen;
pub use world::hazard::{Hazard, HazardKind};
pub use world::platform::Platform;
pub use world::player::Player;
pub use world::World;
