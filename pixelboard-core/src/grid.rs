//! Grid geometry: cells, cell indices and cell-space rectangles.
//!
//! Cell coordinates are signed. Pointer mapping never clamps, so a drag that
//! overshoots the board produces cells outside `0..grid_size`; those still
//! have an index and still take part in rectangle math.

/// Cells per side of the board.
pub const GRID_SIZE: u32 = 1000;

/// Edge length of one cell at zoom 1, in canvas pixels.
pub const CELL_SIZE: f64 = 5.0;

/// Cells per side of one render chunk.
pub const CHUNK_SIZE: u32 = 100;

pub const ZOOM_MIN: f64 = 1.0;
pub const ZOOM_MAX: f64 = 4.0;
pub const ZOOM_STEP: f64 = 0.5;

/// Row-major cell key: `y * grid_size + x`.
pub type CellIndex = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn index(self, grid_size: u32) -> CellIndex {
        self.y * grid_size as i64 + self.x
    }
}

/// Axis-aligned rectangle of cells. `x`/`y` is the top-left cell; the right
/// and bottom edges are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CellRect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive span between two corner cells, in any order.
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        Self {
            x: x0,
            y: y0,
            width: a.x.max(b.x) - x0 + 1,
            height: a.y.max(b.y) - y0 + 1,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() { 0 } else { self.width * self.height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    pub fn intersect(&self, other: &CellRect) -> Option<CellRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(CellRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &CellRect) -> CellRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        CellRect::new(
            x0,
            y0,
            self.right().max(other.right()) - x0,
            self.bottom().max(other.bottom()) - y0,
        )
    }

    /// Row-major walk over every cell in the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| Cell::new(x, y)))
    }
}
