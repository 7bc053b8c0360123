pub mod hazards;
pub mod physics;
pub mod rescue;
