//! Screen-space and tile-space rectangles.
//!
//! All screen coordinates are logical pixels with the origin at the top-left
//! corner of the 1280×720 viewport, y growing downwards.

use serde::{Deserialize, Serialize};

use crate::constants::map::TILE_SIZE;

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Hit-test with all four edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Rectangle measured in map tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TileRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_pixels(&self) -> PixelRect {
        PixelRect::new(
            (self.x * TILE_SIZE) as f32,
            (self.y * TILE_SIZE) as f32,
            (self.width * TILE_SIZE) as f32,
            (self.height * TILE_SIZE) as f32,
        )
    }

    /// Pixel centre of the top-left tile.
    pub fn anchor_center(&self) -> Point {
        Point::new(
            (self.x * TILE_SIZE + TILE_SIZE / 2) as f32,
            (self.y * TILE_SIZE + TILE_SIZE / 2) as f32,
        )
    }

    /// Every tile inside the rectangle, row by row.
    pub fn tiles(self) -> impl Iterator<Item = (i32, i32)> {
        (self.y..self.y + self.height)
            .flat_map(move |ty| (self.x..self.x + self.width).map(move |tx| (tx, ty)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_edge_inclusive() {
        let r = PixelRect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(110.0, 70.0)));
        assert!(!r.contains(Point::new(110.5, 70.0)));
        assert!(!r.contains(Point::new(9.9, 40.0)));
    }

    #[test]
    fn test_tile_rect_to_pixels() {
        let r = TileRect::new(2, 6, 4, 3).to_pixels();
        assert_eq!(r, PixelRect::new(64.0, 192.0, 128.0, 96.0));
    }

    #[test]
    fn test_anchor_center() {
        let p = TileRect::new(8, 2, 4, 3).anchor_center();
        assert_eq!(p, Point::new(272.0, 80.0));
    }

    #[test]
    fn test_tiles_iterates_row_major() {
        let tiles: Vec<_> = TileRect::new(1, 1, 2, 2).tiles().collect();
        assert_eq!(tiles, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
