pub mod events;
pub mod leaderboard;
pub mod store;
pub mod viewport;
