// Rendering boundary
//
// The simulation describes what to draw; a backend decides how.

mod camera;
mod sprite;

pub use camera::Camera;
pub use sprite::{ImageId, LogSink, RenderSink, SpriteDraw};

#[cfg(test)]
pub use sprite::RecordingSink;
