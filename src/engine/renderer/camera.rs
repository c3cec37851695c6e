// Camera and viewport for 2D pixel rendering

use glam::Vec2;

/// 2D camera; `position` is the world point drawn at the top-left of the screen
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// Viewport size in world pixels
    viewport: Vec2,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Center the view on a world point
    pub fn center_on(&mut self, target: Vec2) {
        self.position = target - self.viewport / 2.0;
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos - self.position
    }
}
