use ndarray::Array2;

/// Single grid axis used for board width, height, and tile positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Grid coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Single screen axis, in pixels. Signed since clicks can land left of or above the board.
pub type ScreenCoord = i32;

/// Screen position `(x, y)` in pixels.
pub type ScreenPos = (ScreenCoord, ScreenCoord);

/// Converts grid coordinates into an index for the row-major tile arrays.
///
/// Arrays are shaped `(height, width)`, so `(x, y)` maps to `[y, x]` and the
/// standard layout matches `y * width + x`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Shape of a row-major array holding a `size` grid.
pub fn nd_shape((width, height): Coord2) -> [usize; 2] {
    [height.into(), width.into()]
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // shapes are built from `Coord` sizes, so they always fit
        let size = (cols as Coord, rows as Coord);
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Up-to-8 neighbours of a tile, clipped at the board edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (10, 10)).collect();
        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn far_corner_is_clipped() {
        let neighbors: Vec<_> = NeighborIter::new((9, 9), (10, 10)).collect();
        assert_eq!(neighbors, vec![(8, 8), (9, 8), (8, 9)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((4, 5), (10, 10)).count(), 8);
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn nd_index_is_row_major() {
        let mut grid: Array2<u8> = Array2::default(nd_shape((3, 2)));
        grid[(2, 1).to_nd_index()] = 7;
        let flat = grid.as_slice().unwrap();
        assert_eq!(flat[1 * 3 + 2], 7);
    }

    #[test]
    fn array_neighbors_use_width_and_height() {
        let grid: Array2<u8> = Array2::default(nd_shape((4, 1)));
        let neighbors: Vec<_> = grid.iter_neighbors((3, 0)).collect();
        assert_eq!(neighbors, vec![(2, 0)]);
    }
}
