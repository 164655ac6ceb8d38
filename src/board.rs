//! Rectangular board of cells with a precomputed adjacency table.
//!
//! Cells live in a flat arena addressed by [`CellId`] (row-major). The
//! 4-connected neighbours of every cell are computed once at construction;
//! the topology never changes afterwards, so the table needs no invalidation.

use std::fmt;
use std::ops::Range;

/// Index of a cell in the board arena (`y * width + x`).
pub type CellId = usize;

/// The two seats at the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Position of this seat in per-seat arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Character used when rendering this seat's stones.
    pub fn glyph(self) -> char {
        match self {
            Seat::First => 'X',
            Seat::Second => 'O',
        }
    }
}

/// What sits on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Owned(Seat),
}

impl Occupant {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }

    /// The owning seat, if any.
    #[inline]
    pub fn seat(self) -> Option<Seat> {
        match self {
            Occupant::Empty => None,
            Occupant::Owned(seat) => Some(seat),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Owned(seat) => seat.glyph(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Occupant>,
    adjacency: Vec<Vec<CellId>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        let mut adjacency = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                adjacency.push(Self::compute_neighbors(width, height, x, y));
            }
        }
        Self {
            width,
            height,
            cells: vec![Occupant::Empty; width * height],
            adjacency,
        }
    }

    fn compute_neighbors(width: usize, height: usize, x: usize, y: usize) -> Vec<CellId> {
        let mut v = Vec::with_capacity(4);
        if y > 0 {
            v.push((y - 1) * width + x);
        }
        if x + 1 < width {
            v.push(y * width + x + 1);
        }
        if y + 1 < height {
            v.push((y + 1) * width + x);
        }
        if x > 0 {
            v.push(y * width + x - 1);
        }
        v
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The cell at `(x, y)`, or `None` if the coordinate is off the grid.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<CellId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Coordinates `(x, y)` of a cell.
    pub fn coord(&self, id: CellId) -> (usize, usize) {
        (id % self.width, id / self.width)
    }

    /// All cell ids in row-major order.
    pub fn cells(&self) -> Range<CellId> {
        0..self.cells.len()
    }

    /// Edge-sharing neighbours of a cell (2 to 4 entries on boards of at least 2x2).
    #[inline]
    pub fn neighbors_of(&self, id: CellId) -> &[CellId] {
        &self.adjacency[id]
    }

    #[inline]
    pub fn occupant_of(&self, id: CellId) -> Occupant {
        self.cells[id]
    }

    #[inline]
    pub fn is_empty(&self, id: CellId) -> bool {
        self.cells[id].is_empty()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells().filter(|&id| self.is_empty(id))
    }

    pub fn stones_of(&self, seat: Seat) -> impl Iterator<Item = CellId> + '_ {
        self.cells()
            .filter(move |&id| self.cells[id] == Occupant::Owned(seat))
    }

    pub(crate) fn set(&mut self, id: CellId, occupant: Occupant) {
        self.cells[id] = occupant;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = self.cells[y * self.width + x].glyph();
                if x + 1 < self.width {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
