// Collision queries against level geometry

use parry2d::bounding_volume::Aabb;
use parry2d::math::Point;

/// Axis-aligned rectangle in whole-pixel world coordinates
///
/// A zero width or height is a valid degenerate probe: a vertical or
/// horizontal line segment (or a single point when both are zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Leftmost pixel column covered
    pub fn left(&self) -> i32 {
        self.x.min(self.x + self.width)
    }

    /// Rightmost pixel column covered (inclusive)
    pub fn right(&self) -> i32 {
        self.x.max(self.x + self.width)
    }

    /// Topmost pixel row covered
    pub fn top(&self) -> i32 {
        self.y.min(self.y + self.height)
    }

    /// Bottom pixel row covered (inclusive)
    pub fn bottom(&self) -> i32 {
        self.y.max(self.y + self.height)
    }

    /// Closed bounding box used for overlap tests
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(
            Point::new(self.left() as f32, self.top() as f32),
            Point::new(self.right() as f32, self.bottom() as f32),
        )
    }
}

/// Anything that can answer "does this rectangle touch solid geometry?"
///
/// Queries must be read-only; the integrator calls them once per probe step.
pub trait CollisionSource {
    fn has_collision_in_rect(&self, rect: PixelRect) -> bool;
}

/// A level with no solid geometry at all
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenWorld;

impl CollisionSource for OpenWorld {
    fn has_collision_in_rect(&self, _rect: PixelRect) -> bool {
        false
    }
}

// A missing source is an open world: nothing ever collides.
impl<T: CollisionSource + ?Sized> CollisionSource for Option<&T> {
    fn has_collision_in_rect(&self, rect: PixelRect) -> bool {
        match self {
            Some(source) => source.has_collision_in_rect(rect),
            None => OpenWorld.has_collision_in_rect(rect),
        }
    }
}

impl<T: CollisionSource + ?Sized> CollisionSource for &T {
    fn has_collision_in_rect(&self, rect: PixelRect) -> bool {
        (**self).has_collision_in_rect(rect)
    }
}
