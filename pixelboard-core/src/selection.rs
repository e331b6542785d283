//! Drag selection over the board.
//!
//! A press starts a drag anchored at the pressed cell and wipes the previous
//! selection. Each move rebuilds the covered-cell set from the anchor to the
//! current cell. A release from anywhere (on the board or not) ends the drag
//! and freezes the result.

use std::collections::HashSet;

use crate::grid::{Cell, CellIndex, CellRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { start: Cell, moved: bool },
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragEnd {
    pub start: Cell,
    /// False when the pointer never reached a cell other than `start`.
    pub moved: bool,
}

impl DragEnd {
    pub fn is_click(&self) -> bool {
        !self.moved
    }
}

pub struct SelectionTracker {
    grid_size: u32,
    state: DragState,
    rect: Option<CellRect>,
    cells: HashSet<CellIndex>,
}

impl SelectionTracker {
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            state: DragState::Idle,
            rect: None,
            cells: HashSet::new(),
        }
    }

    /// Start a new drag at `cell`. Returns the rectangle that was cleared.
    pub fn begin(&mut self, cell: Cell) -> Option<CellRect> {
        let cleared = self.rect.take();
        self.cells.clear();
        self.state = DragState::Dragging { start: cell, moved: false };
        log::debug!("selection started at ({}, {})", cell.x, cell.y);
        cleared
    }

    /// Extend the active drag to `cell`.
    ///
    /// Returns `(previous, current)` rectangles when the selection changed,
    /// `None` when idle or when the rectangle is unchanged.
    pub fn update(&mut self, cell: Cell) -> Option<(Option<CellRect>, CellRect)> {
        let DragState::Dragging { start, moved } = self.state else {
            return None;
        };
        self.state = DragState::Dragging { start, moved: moved || cell != start };

        let rect = CellRect::from_corners(start, cell);
        if self.rect == Some(rect) {
            return None;
        }

        self.cells.clear();
        self.cells.reserve(rect.area() as usize);
        for c in rect.cells() {
            self.cells.insert(c.index(self.grid_size));
        }
        let previous = self.rect.replace(rect);
        Some((previous, rect))
    }

    /// End the active drag. A no-op returning `None` when already idle.
    pub fn release(&mut self) -> Option<DragEnd> {
        let DragState::Dragging { start, moved } = self.state else {
            return None;
        };
        self.state = DragState::Idle;
        if let Some(r) = self.rect {
            log::debug!("selection finished: {}x{} at ({}, {})", r.width, r.height, r.x, r.y);
        }
        Some(DragEnd { start, moved })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn rect(&self) -> Option<CellRect> {
        self.rect
    }

    /// Width and height of the selection in cells, `(0, 0)` if none.
    pub fn size(&self) -> (i64, i64) {
        self.rect.map(|r| (r.width, r.height)).unwrap_or((0, 0))
    }

    /// Covered cell indices. May include indices of cells beyond the board
    /// edge when a drag overshoots.
    pub fn cells(&self) -> &HashSet<CellIndex> {
        &self.cells
    }

    pub fn contains_index(&self, index: CellIndex) -> bool {
        self.cells.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a cell on the board should be drawn highlighted. Tested
    /// against the rectangle so that overshoot indices never alias onto
    /// other rows.
    pub fn highlights(&self, cell: Cell) -> bool {
        self.rect.is_some_and(|r| r.contains(cell))
    }
}
