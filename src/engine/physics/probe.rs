// Incremental pixel-stepping collision probes

use glam::Vec2;

use super::collision::{CollisionSource, PixelRect};
use crate::core::math::round_to_pixel;

/// Side of an actor's bounding box that a probe advances from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Thin probe `offset` pixels beyond this edge of a `width` x `height`
    /// box whose top-left corner is at `position`.
    ///
    /// Probes are inset by one pixel at both ends so that a neighbouring tile
    /// merely sharing a corner does not register.
    pub fn probe(self, position: Vec2, width: u32, height: u32, offset: i32) -> PixelRect {
        let x = round_to_pixel(position.x);
        let y = round_to_pixel(position.y);
        let (w, h) = (width as i32, height as i32);

        match self {
            Edge::Bottom => PixelRect::new(x + 1, y + h + offset, w - 2, 0),
            Edge::Left => PixelRect::new(x - offset, y + 1, 0, h - 2),
            Edge::Right => PixelRect::new(x + w + offset, y + 1, 0, h - 2),
        }
    }

    /// Distance from this edge of a box at `position` to the whole pixel its
    /// probes start on, measured in the direction the edge advances.
    ///
    /// Lies in `(-0.5, 0.5]`; negative when the probe starts behind the edge.
    pub fn sub_pixel_gap(self, position: Vec2) -> f32 {
        match self {
            Edge::Bottom => round_to_pixel(position.y) as f32 - position.y,
            Edge::Right => round_to_pixel(position.x) as f32 - position.x,
            Edge::Left => position.x - round_to_pixel(position.x) as f32,
        }
    }
}

/// Furthest distance (up to `max_distance`) that can be travelled before the
/// probe produced by `probe_at` first hits something.
///
/// Steps one whole pixel at a time. `gap` is the edge's sub-pixel distance to
/// the pixel probed at step 0 (see [`Edge::sub_pixel_gap`]). If the probe at
/// step `k` collides, the result `k + gap` brings the real edge flush against
/// the obstruction. Once the probed pixel reaches `max_distance` the full
/// (possibly fractional) distance is returned.
pub fn clear_distance<C, F>(source: &C, max_distance: f32, gap: f32, probe_at: F) -> f32
where
    C: CollisionSource + ?Sized,
    F: Fn(i32) -> PixelRect,
{
    // Also rejects NaN
    if !(max_distance > 0.0) {
        return 0.0;
    }

    let mut step: i32 = 0;
    loop {
        let reach = step as f32 + gap;
        if reach >= max_distance {
            return max_distance;
        }
        if source.has_collision_in_rect(probe_at(step)) {
            return reach.max(0.0);
        }
        step += 1;
    }
}

/// Whether the probe touching `edge` right now reports a collision
pub fn touching<C>(source: &C, edge: Edge, position: Vec2, width: u32, height: u32) -> bool
where
    C: CollisionSource + ?Sized,
{
    source.has_collision_in_rect(edge.probe(position, width, height, 0))
}
