// Player stats - size and movement tuning, fixed for the player's lifetime

/// Movement tuning and sprite dimensions for the player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    // Dimensions
    /// Bounding box width in pixels (also the sprite frame width)
    pub width: u32,
    /// Bounding box height in pixels (also the sprite frame height)
    pub height: u32,

    // Movement
    /// Horizontal speed while walking (pixels/second)
    pub walk_velocity: f32,
    /// Fall speed the moment the player leaves the ground (pixels/second)
    pub base_fall_velocity: f32,
    /// How quickly fall speed grows while airborne (pixels/second²)
    pub fall_acceleration: f32,
    /// Terminal fall speed (pixels/second)
    pub max_fall_velocity: f32,
    /// Share of walk speed kept while airborne
    pub air_control: f32,

    // Presentation
    /// Duration of one walk animation frame (milliseconds, same type as tick timestamps)
    pub walk_frame_ms: f64,
    /// Integer scale the sprite is drawn at
    pub render_scale: u32,
}

/// Default tuning for the player
pub const BASE_STATS: PlayerStats = PlayerStats {
    width: 32,
    height: 32,

    walk_velocity: 120.0,
    base_fall_velocity: 60.0,
    fall_acceleration: 600.0,
    max_fall_velocity: 480.0,
    air_control: 0.5,

    walk_frame_ms: 100.0,
    render_scale: 3,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
impl PlayerStats {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_walk_velocity(mut self, velocity: f32) -> Self {
        self.walk_velocity = velocity;
        self
    }

    /// Set base, acceleration and terminal fall speed together
    pub fn with_fall(mut self, base: f32, acceleration: f32, max: f32) -> Self {
        self.base_fall_velocity = base;
        self.fall_acceleration = acceleration;
        self.max_fall_velocity = max;
        self
    }

    pub fn with_walk_frame_ms(mut self, ms: f64) -> Self {
        self.walk_frame_ms = ms;
        self
    }
}
