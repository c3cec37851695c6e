// Tile collision: level geometry, map lookup and pixel-stepping probes

mod collision;
mod probe;
mod tilemap;
mod world;

pub use collision::{CollisionSource, OpenWorld, PixelRect};
pub use probe::{clear_distance, touching, Edge};
pub use tilemap::Tilemap;
pub use world::{MapId, MapRegistry};

/// Errors raised while building or registering level geometry
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Tile size must be greater than zero")]
    ZeroTileSize,

    #[error("Map has no tiles")]
    Empty,

    #[error("Row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown tile glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },

    #[error("Map already registered: {0}")]
    DuplicateMap(String),
}
