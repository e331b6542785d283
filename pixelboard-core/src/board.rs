//! The board controller: owns zoom, selection, placements and the repaint
//! queue, and turns pointer input into state changes.
//!
//! Pointer positions come in as viewport coordinates together with the
//! board's on-screen origin. Releasing is a separate call so the host can
//! forward releases that happen anywhere in the viewport; only a release
//! that carries the pressed cell can count as a click.
//!
//! The board owns the repaint pass: construction queues the first full pass
//! and every zoom change restarts it.

use crate::config::BoardConfig;
use crate::coords;
use crate::error::BoardError;
use crate::grid::Cell;
use crate::placement::{Placement, PlacementStore, SourceImage};
use crate::render::{self, Chunk, Repainter, Surface};
use crate::selection::SelectionTracker;

/// Something the host must do in response to input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEffect {
    /// Open this URL in a new browsing context.
    OpenLink(String),
}

pub struct Board<I> {
    config: BoardConfig,
    zoom: f64,
    selection: SelectionTracker,
    placements: PlacementStore<I>,
    repainter: Repainter,
}

impl<I: SourceImage> Board<I> {
    pub fn new(config: BoardConfig) -> Self {
        let zoom = config.clamp_zoom(config.initial_zoom);
        let mut repainter = Repainter::new(config.clone());
        repainter.restart();
        Self {
            selection: SelectionTracker::new(config.grid_size),
            placements: PlacementStore::new(),
            repainter,
            zoom,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.config.zoom_max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.config.zoom_min
    }

    /// Returns true if the zoom changed. A change restarts the repaint.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.config.zoom_in(self.zoom))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.config.zoom_out(self.zoom))
    }

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let zoom = self.config.clamp_zoom(zoom);
        if zoom == self.zoom {
            return false;
        }
        log::debug!("zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
        self.repainter.restart();
        true
    }

    /// Edge length of the board canvas at the current zoom.
    pub fn canvas_extent(&self) -> f64 {
        self.config.canvas_extent(self.zoom)
    }

    pub fn cell_at(&self, pointer_x: f64, pointer_y: f64, origin_x: f64, origin_y: f64) -> Cell {
        coords::to_cell(pointer_x, pointer_y, origin_x, origin_y, self.zoom, self.config.cell_size)
    }

    /// Press on the board: start a fresh selection.
    pub fn pointer_down(&mut self, pointer_x: f64, pointer_y: f64, origin_x: f64, origin_y: f64) {
        let cell = self.cell_at(pointer_x, pointer_y, origin_x, origin_y);
        if let Some(cleared) = self.selection.begin(cell) {
            self.repainter.invalidate(cleared);
        }
    }

    /// Pointer motion over the board. Ignored unless a drag is active.
    /// Returns true if the selection changed.
    pub fn pointer_move(&mut self, pointer_x: f64, pointer_y: f64, origin_x: f64, origin_y: f64) -> bool {
        if !self.selection.is_dragging() {
            return false;
        }
        let cell = self.cell_at(pointer_x, pointer_y, origin_x, origin_y);
        match self.selection.update(cell) {
            Some((previous, current)) => {
                let dirty = previous.map_or(current, |p| p.union(&current));
                self.repainter.invalidate(dirty);
                true
            }
            None => false,
        }
    }

    /// Pointer released. Always ends an active drag.
    ///
    /// `at` is the release cell when the release happened on the board, and
    /// `None` for releases elsewhere in the viewport. Only a release on the
    /// pressed cell, with no motion to another cell in between, is a click;
    /// a click may yield a link to open.
    pub fn release(&mut self, at: Option<Cell>) -> Option<BoardEffect> {
        let end = self.selection.release()?;
        if !end.is_click() || at != Some(end.start) {
            return None;
        }
        let hit = self.placements.hit_test(end.start);
        log::debug!(
            "click at ({}, {}): {}",
            end.start.x,
            end.start.y,
            if hit.is_some() { "placement" } else { "empty" }
        );
        hit.and_then(|p| p.link.clone()).map(BoardEffect::OpenLink)
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn selection_size(&self) -> (i64, i64) {
        self.selection.size()
    }

    /// Placing requires a non-empty selection.
    pub fn can_place(&self) -> bool {
        !self.selection.is_empty() && self.selection.rect().is_some_and(|r| !r.is_empty())
    }

    /// Fit `image` into the current selection and add it with `link`.
    pub fn place(&mut self, image: Option<I>, link: &str) -> Result<&Placement<I>, BoardError> {
        let image = image.ok_or(BoardError::MissingImage)?;
        let rect = match self.selection.rect() {
            Some(rect) if self.can_place() => rect,
            _ => return Err(BoardError::EmptySelection),
        };
        let placement = self.placements.add(image, rect, link)?;
        self.repainter.invalidate(placement.rect);
        Ok(placement)
    }

    pub fn placements(&self) -> &PlacementStore<I> {
        &self.placements
    }

    pub fn hit_test(&self, cell: Cell) -> Option<&Placement<I>> {
        self.placements.hit_test(cell)
    }

    pub fn repaint_generation(&self) -> u64 {
        self.repainter.generation()
    }

    pub fn needs_paint(&self) -> bool {
        self.repainter.has_pending()
    }

    pub fn passes_completed(&self) -> u64 {
        self.repainter.passes_completed()
    }

    /// Paint one queued chunk of pass `generation` onto `surface`.
    /// Returns the chunk painted, or `None` if nothing was left for that pass.
    pub fn paint_next<S>(&mut self, generation: u64, surface: &mut S) -> Option<Chunk>
    where
        S: Surface<Image = I>,
    {
        let chunk = self.repainter.next_chunk(generation)?;
        let span = coords::cell_span(self.config.cell_size, self.zoom);
        render::paint_chunk(surface, &chunk, span, &self.selection, &self.placements);
        Some(chunk)
    }
}
