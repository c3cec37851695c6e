// Player sprite sheet layout and frame selection

use glam::UVec2;

use super::state::{Direction, WalkState};
use super::stats::PlayerStats;

/// Number of frames in the walk cycle
pub const WALK_FRAMES: u32 = 5;

/// Sprite sheet row for each pose
pub const ROW_IDLE_RIGHT: u32 = 0;
pub const ROW_WALK_RIGHT: u32 = 1;
pub const ROW_IDLE_LEFT: u32 = 4;
pub const ROW_WALK_LEFT: u32 = 5;

/// Maps player state to a frame on the sprite sheet
///
/// Frame selection depends only on direction, walk state and the current
/// time, so the same inputs always give the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    /// How long each walk frame is shown (milliseconds)
    pub walk_frame_ms: f64,
}

impl SpriteSheet {
    pub fn new(frame_width: u32, frame_height: u32, walk_frame_ms: f64) -> Self {
        Self {
            frame_width,
            frame_height,
            walk_frame_ms,
        }
    }

    /// Sheet layout matching a player's size and walk timing
    pub fn for_stats(stats: &PlayerStats) -> Self {
        Self::new(stats.width, stats.height, stats.walk_frame_ms)
    }

    /// Duration of one full walk cycle (milliseconds)
    pub fn walk_cycle_ms(&self) -> f64 {
        self.walk_frame_ms * WALK_FRAMES as f64
    }

    /// Walk cycle frame index (0..WALK_FRAMES); always 0 when idle
    pub fn walk_frame(&self, walk: WalkState, now: f64) -> u32 {
        let Some(elapsed) = walk.elapsed(now) else {
            return 0;
        };
        if self.walk_frame_ms <= 0.0 {
            return 0;
        }

        let into_cycle = elapsed.rem_euclid(self.walk_cycle_ms());
        ((into_cycle / self.walk_frame_ms).floor() as u32).min(WALK_FRAMES - 1)
    }

    /// Sheet row for a pose
    pub fn row(direction: Direction, walk: WalkState) -> u32 {
        match (walk.is_walking(), direction) {
            (true, Direction::Left) => ROW_WALK_LEFT,
            (true, Direction::Right) => ROW_WALK_RIGHT,
            (false, Direction::Left) => ROW_IDLE_LEFT,
            (false, Direction::Right) => ROW_IDLE_RIGHT,
        }
    }

    /// Pixel offset of the frame to draw
    pub fn frame_offset(&self, direction: Direction, walk: WalkState, now: f64) -> UVec2 {
        UVec2::new(
            self.walk_frame(walk, now) * self.frame_width,
            Self::row(direction, walk) * self.frame_height,
        )
    }
}
