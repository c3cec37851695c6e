// Tile grid with solid/empty cells

use parry2d::bounding_volume::{Aabb, BoundingVolume};
use parry2d::math::Point;

use super::collision::{CollisionSource, PixelRect};
use super::MapError;

/// Glyph for a solid tile in text level layouts
pub const SOLID_GLYPH: char = '#';

/// Glyphs accepted as empty space in text level layouts
pub const EMPTY_GLYPHS: [char; 2] = ['.', ' '];

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
}

impl Tile {
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

/// A rectangular grid of square tiles placed in pixel space
///
/// Cells outside the grid are empty. A probe collides with a solid tile when
/// they overlap or merely touch, so a line lying exactly on a tile edge hits it.
#[derive(Debug, Clone)]
pub struct Tilemap {
    tiles: Vec<Tile>,
    columns: usize,
    rows: usize,
    tile_size: u32,
}

impl Tilemap {
    /// Create an empty map
    pub fn new(columns: usize, rows: usize, tile_size: u32) -> Result<Self, MapError> {
        if tile_size == 0 {
            return Err(MapError::ZeroTileSize);
        }
        if columns == 0 || rows == 0 {
            return Err(MapError::Empty);
        }

        Ok(Self {
            tiles: vec![Tile::Empty; columns * rows],
            columns,
            rows,
            tile_size,
        })
    }

    /// Build a map from text rows, `#` for solid and `.` or space for empty
    pub fn from_rows(tile_size: u32, rows: &[&str]) -> Result<Self, MapError> {
        let columns = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut map = Self::new(columns, rows.len(), tile_size)?;

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != columns {
                return Err(MapError::RaggedRow {
                    row,
                    expected: columns,
                    actual,
                });
            }

            for (column, glyph) in line.chars().enumerate() {
                let tile = match glyph {
                    SOLID_GLYPH => Tile::Solid,
                    g if EMPTY_GLYPHS.contains(&g) => Tile::Empty,
                    _ => return Err(MapError::UnknownGlyph { glyph, row, column }),
                };
                map.set_tile(column, row, tile);
            }
        }

        Ok(map)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Replace the tile at a cell; out-of-bounds cells are ignored
    pub fn set_tile(&mut self, column: usize, row: usize, tile: Tile) {
        if column < self.columns && row < self.rows {
            self.tiles[row * self.columns + column] = tile;
        }
    }

    /// Closed pixel bounds of a cell
    fn tile_aabb(&self, column: usize, row: usize) -> Aabb {
        let size = self.tile_size as f32;
        let x = column as f32 * size;
        let y = row as f32 * size;
        Aabb::new(Point::new(x, y), Point::new(x + size, y + size))
    }

    /// Inclusive range of cells whose closed span touches `[low, high]` on one axis
    fn cell_span(&self, low: i32, high: i32, count: usize) -> Option<(usize, usize)> {
        let size = self.tile_size as i32;
        // A cell starting exactly at `low` still touches it with its far edge.
        let first = (low - 1).div_euclid(size).max(0);
        let last = high.div_euclid(size).min(count as i32 - 1);
        (first <= last).then(|| (first as usize, last as usize))
    }
}

#[cfg(test)]
impl Tilemap {
    fn tile(&self, column: usize, row: usize) -> Option<Tile> {
        (column < self.columns && row < self.rows).then(|| self.tiles[row * self.columns + column])
    }

    fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_solid()).count()
    }
}

impl CollisionSource for Tilemap {
    fn has_collision_in_rect(&self, rect: PixelRect) -> bool {
        let Some((first_col, last_col)) = self.cell_span(rect.left(), rect.right(), self.columns)
        else {
            return false;
        };
        let Some((first_row, last_row)) = self.cell_span(rect.top(), rect.bottom(), self.rows)
        else {
            return false;
        };

        let probe = rect.to_aabb();
        (first_row..=last_row).any(|row| {
            (first_col..=last_col).any(|column| {
                self.tiles[row * self.columns + column].is_solid()
                    && self.tile_aabb(column, row).intersects(&probe)
            })
        })
    }
}
