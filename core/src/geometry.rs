use serde::{Deserialize, Serialize};

use crate::*;

/// Edge length of a tile sprite, in pixels.
pub const TILE_SIZE: ScreenCoord = 16;

/// Padding around the board where the outcome border is drawn.
pub const BORDER_WIDTH: ScreenCoord = 5;

/// Axis-aligned screen rectangle, `right` and `bottom` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: ScreenCoord,
    pub top: ScreenCoord,
    pub right: ScreenCoord,
    pub bottom: ScreenCoord,
}

impl ScreenRect {
    pub const fn new(
        left: ScreenCoord,
        top: ScreenCoord,
        right: ScreenCoord,
        bottom: ScreenCoord,
    ) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_top_left(
        (left, top): ScreenPos,
        width: ScreenCoord,
        height: ScreenCoord,
    ) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub const fn from_center((cx, cy): ScreenPos, width: ScreenCoord, height: ScreenCoord) -> Self {
        Self::from_top_left((cx - width / 2, cy - height / 2), width, height)
    }

    pub const fn width(&self) -> ScreenCoord {
        self.right - self.left
    }

    pub const fn height(&self) -> ScreenCoord {
        self.bottom - self.top
    }

    pub const fn top_left(&self) -> ScreenPos {
        (self.left, self.top)
    }

    pub const fn expanded(&self, by: ScreenCoord) -> Self {
        Self::new(self.left - by, self.top - by, self.right + by, self.bottom + by)
    }

    pub const fn contains(&self, (x, y): ScreenPos) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Placement of the grid on screen, and the conversions between screen pixels,
/// grid coordinates and linear tile indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    size: Coord2,
    rect: ScreenRect,
}

impl BoardGeometry {
    /// Grid of `size` tiles centered on `center`.
    pub fn from_center(center: ScreenPos, size: Coord2) -> Self {
        let (width, height) = size;
        let rect = ScreenRect::from_center(
            center,
            ScreenCoord::from(width) * TILE_SIZE,
            ScreenCoord::from(height) * TILE_SIZE,
        );
        Self { size, rect }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    pub fn total_cells(&self) -> usize {
        usize::from(self.size.0) * usize::from(self.size.1)
    }

    pub fn contains(&self, screen_pos: ScreenPos) -> bool {
        self.rect.contains(screen_pos)
    }

    pub fn contains_grid(&self, (x, y): Coord2) -> bool {
        x < self.size.0 && y < self.size.1
    }

    /// Top-left pixel of the tile at `grid_pos`.
    pub fn grid_to_screen(&self, grid_pos: Coord2) -> ScreenPos {
        let (x, y) = grid_pos;
        (
            ScreenCoord::from(x) * TILE_SIZE + self.rect.left,
            ScreenCoord::from(y) * TILE_SIZE + self.rect.top,
        )
    }

    /// Tile under `screen_pos`, `None` when the position is off the board.
    pub fn screen_to_grid(&self, screen_pos: ScreenPos) -> Option<Coord2> {
        if !self.contains(screen_pos) {
            return None;
        }
        let (x, y) = screen_pos;
        let grid_x = (x - self.rect.left) / TILE_SIZE;
        let grid_y = (y - self.rect.top) / TILE_SIZE;
        Some((grid_x as Coord, grid_y as Coord))
    }

    pub fn grid_to_index(&self, grid_pos: Coord2) -> usize {
        assert!(
            self.contains_grid(grid_pos),
            "grid position {grid_pos:?} outside of {:?}",
            self.size
        );
        let (x, y) = grid_pos;
        usize::from(y) * usize::from(self.size.0) + usize::from(x)
    }

    pub fn index_to_grid(&self, index: usize) -> Coord2 {
        assert!(
            index < self.total_cells(),
            "tile index {index} outside of {:?}",
            self.size
        );
        let width = usize::from(self.size.0);
        let y = index / width;
        let x = index - y * width;
        (x as Coord, y as Coord)
    }

    /// All grid positions in row-major order.
    pub fn iter_grid(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}
