// Sprite draw requests handed to the rendering backend

use glam::{UVec2, Vec2};

/// Identifier of a sprite sheet image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub &'static str);

/// Everything a backend needs to blit one sprite frame
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Sprite sheet to read from
    pub image: ImageId,
    /// Top-left of the source frame inside the sheet, in pixels
    pub source: UVec2,
    /// Size of the source frame in pixels
    pub size: UVec2,
    /// Top-left destination in screen space (before scaling)
    pub destination: Vec2,
    /// Integer upscaling factor applied by the backend
    pub scale: u32,
}

/// Consumer of draw requests; the movement core never draws directly
pub trait RenderSink {
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
}

/// Sink that only logs draw calls, used when no backend is attached
#[derive(Debug, Default)]
pub struct LogSink {
    draws: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sprites drawn so far
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl RenderSink for LogSink {
    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.draws += 1;
        log::trace!(
            "draw {} src=({}, {}) {}x{} dst=({:.1}, {:.1}) x{}",
            sprite.image.0,
            sprite.source.x,
            sprite.source.y,
            sprite.size.x,
            sprite.size.y,
            sprite.destination.x,
            sprite.destination.y,
            sprite.scale
        );
    }
}

/// Collects draw requests in order
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub draws: Vec<SpriteDraw>,
}

#[cfg(test)]
impl RenderSink for RecordingSink {
    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.draws.push(sprite.clone());
    }
}
