use ndarray::Array2;

/// Single coordinate axis, 1-based, used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine counts, total-cell counts and flat cell indices.
pub type CellCount = u16;

/// Two-dimensional 1-based coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Smallest accepted number of rows or columns.
pub const MIN_SIDE: Coord = 2;

/// Largest accepted number of rows or columns.
pub const MAX_SIDE: Coord = 70;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Only valid for coordinates that already passed bounds validation.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [usize::from(self.0) - 1, usize::from(self.1) - 1]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Flat 1-based index of `(row, col)` on a board `columns` wide.
///
/// `row` and `col` must be 1-based and within the board, as returned by
/// [`crate::MinefieldEngine::index_of`] after bounds validation.
pub const fn cell_index((row, col): Coord2, columns: Coord) -> CellCount {
    (row as CellCount - 1) * columns as CellCount + col as CellCount
}

/// Inverse of [`cell_index`] for indices in `1..=rows*columns`.
pub const fn cell_coords(index: CellCount, columns: Coord) -> Coord2 {
    let columns = columns as CellCount;
    let row = index.div_ceil(columns);
    let col = match index % columns {
        0 => columns,
        rem => rem,
    };
    (row as Coord, col as Coord)
}

pub(crate) fn board_size<T>(array: &Array2<T>) -> Coord2 {
    let (rows, columns) = array.dim();
    // every array here is built from `Coord` sides, see `MineLayout::from_mine_mask`
    (rows as Coord, columns as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, board_size(self))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Applies `delta` to `coords`, returning a value only when it stays inside `1..=bounds`.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(dr)?;
    if next_row == 0 || next_row > rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col == 0 || next_col > columns {
        return None;
    }

    Some((next_row, next_col))
}

/// Moore neighbourhood of a cell, clipped to the board, no wraparound.
#[derive(Clone, Debug)]
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
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
