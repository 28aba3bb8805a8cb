//! Dense 2D occupancy map: at most one item per cell.
//!
//! Cells are stored row-major in a single `Vec<Option<T>>`, so lookups are
//! O(1) and a full scan is a linear walk over one allocation.

use std::fmt;

use crate::{GridError, GridResult};

/// A cell coordinate.  `x` is the column, `y` the row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Moore-neighborhood offsets (the 8 surrounding cells).
#[rustfmt::skip]
const MOORE: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A `width × height` grid holding at most one `T` per cell.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    width:    usize,
    height:   usize,
    cells:    Vec<Option<T>>,
    /// Cached occupied-cell count for O(1) `len()`.
    occupied: usize,
}

impl<T> Grid<T> {
    /// An empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, || None);
        Self { width, height, cells, occupied: 0 }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Item at `cell`, `None` if the cell is empty or off the grid.
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).ok().and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        match self.index(cell) {
            Ok(i) => self.cells[i].as_mut(),
            Err(_) => None,
        }
    }

    /// `true` if `cell` is on the grid and holds an item.
    pub fn occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Place `item` at an empty `cell`.
    pub fn set(&mut self, cell: Cell, item: T) -> GridResult<()> {
        let i = self.index(cell)?;
        if self.cells[i].is_some() {
            return Err(GridError::Occupied(cell));
        }
        self.cells[i] = Some(item);
        self.occupied += 1;
        Ok(())
    }

    /// Take the item out of `cell`.
    pub fn remove(&mut self, cell: Cell) -> GridResult<T> {
        let i = self.index(cell)?;
        let item = self.cells[i].take().ok_or(GridError::Empty(cell))?;
        self.occupied -= 1;
        Ok(item)
    }

    /// Move the item at `from` to the empty cell `to`.
    ///
    /// On error the grid is unchanged.
    pub fn move_item(&mut self, from: Cell, to: Cell) -> GridResult<()> {
        let src = self.index(from)?;
        let dst = self.index(to)?;
        if self.cells[src].is_none() {
            return Err(GridError::Empty(from));
        }
        if src == dst {
            return Ok(());
        }
        if self.cells[dst].is_some() {
            return Err(GridError::Occupied(to));
        }
        self.cells[dst] = self.cells[src].take();
        Ok(())
    }

    /// On-grid cells of the Moore neighborhood of `cell`, clipped at edges.
    pub fn neighbor_cells(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        MOORE.iter().filter_map(move |&(dx, dy)| {
            let x = cell.x.checked_add_signed(dx)?;
            let y = cell.y.checked_add_signed(dy)?;
            let n = Cell::new(x, y);
            self.contains(n).then_some(n)
        })
    }

    /// Items in the (up to 8) cells surrounding `cell`.
    pub fn neighbors(&self, cell: Cell) -> Vec<&T> {
        self.neighbor_cells(cell).filter_map(|n| self.get(n)).collect()
    }

    /// Every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| self.cell_at(i))
            .collect()
    }

    /// Occupied cells and their items, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|item| (self.cell_at(i), item)))
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn index(&self, cell: Cell) -> GridResult<usize> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(cell.y * self.width + cell.x)
    }

    #[inline]
    fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index % self.width, index / self.width)
    }
}
