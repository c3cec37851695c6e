// Player character
//
// This module contains everything related to the controllable player:
// - Movement integration and tile collision
// - Size and movement tuning
// - Facing direction and walk state
// - Sprite frame selection

pub mod animation;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use player::Player;
pub use stats::PlayerStats;
