//! Chunked repaint of the board.
//!
//! The board is split into square chunks of `chunk_size` cells, numbered
//! row-major. A repaint pass paints one chunk per animation frame so no single
//! frame walks the full million cells.
//!
//! A pass is identified by a generation number. Restarting (zoom change)
//! bumps the generation and requeues every chunk; callers holding an older
//! generation get nothing back. Selection and placement edits only requeue
//! the chunks they touch.

use std::collections::VecDeque;

use crate::config::BoardConfig;
use crate::grid::{Cell, CellRect};
use crate::placement::{Placement, PlacementStore, SourceImage};
use crate::selection::SelectionTracker;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

pub const CELL_BACKGROUND: Rgba = Rgba::new(255, 255, 255, 1.0);
/// Tailwind gray-200
pub const CELL_BORDER: Rgba = Rgba::new(0xe5, 0xe7, 0xeb, 1.0);
pub const SELECTION_HIGHLIGHT: Rgba = Rgba::new(0, 123, 255, 0.5);

/// Rectangle in canvas (or source-image) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Drawing target for `paint_chunk`.
pub trait Surface {
    type Image;

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgba);
    /// Draw the `src` region of `image` stretched over `dst`.
    fn draw_image(&mut self, image: &Self::Image, src: PixelRect, dst: PixelRect);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    /// Cells covered, clipped to the board edge.
    pub cells: CellRect,
}

/// Chunk `index` in row-major order, or `None` past the last chunk.
pub fn chunk_at(config: &BoardConfig, index: usize) -> Option<Chunk> {
    let per_side = config.chunks_per_side() as usize;
    if index >= per_side * per_side {
        return None;
    }
    let size = config.chunk_size as i64;
    let grid = config.grid_size as i64;
    let x0 = (index % per_side) as i64 * size;
    let y0 = (index / per_side) as i64 * size;
    let x1 = (x0 + size).min(grid);
    let y1 = (y0 + size).min(grid);
    Some(Chunk {
        index,
        cells: CellRect::new(x0, y0, x1 - x0, y1 - y0),
    })
}

pub fn chunk_count(config: &BoardConfig) -> usize {
    let per_side = config.chunks_per_side() as usize;
    per_side * per_side
}

/// Row-major indices of chunks that overlap `area`. Parts of `area` off the
/// board are ignored.
pub fn chunks_overlapping(config: &BoardConfig, area: CellRect) -> Vec<usize> {
    let board = CellRect::new(0, 0, config.grid_size as i64, config.grid_size as i64);
    let Some(on_board) = area.intersect(&board) else {
        return Vec::new();
    };
    let size = config.chunk_size as i64;
    let per_side = config.chunks_per_side() as usize;
    let (cx0, cx1) = (on_board.x / size, (on_board.right() - 1) / size);
    let (cy0, cy1) = (on_board.y / size, (on_board.bottom() - 1) / size);
    let mut out = Vec::with_capacity(((cx1 - cx0 + 1) * (cy1 - cy0 + 1)) as usize);
    for cy in cy0..=cy1 {
        for cx in cx0..=cx1 {
            out.push(cy as usize * per_side + cx as usize);
        }
    }
    out
}

/// Queue of chunks waiting to be painted for the current pass.
pub struct Repainter {
    config: BoardConfig,
    pending: VecDeque<usize>,
    queued: Vec<bool>,
    generation: u64,
    /// Set while the queue still holds a full pass started by `restart`.
    full_pass: bool,
    passes_completed: u64,
}

impl Repainter {
    pub fn new(config: BoardConfig) -> Self {
        let count = chunk_count(&config);
        Self {
            config,
            pending: VecDeque::with_capacity(count),
            queued: vec![false; count],
            generation: 0,
            full_pass: false,
            passes_completed: 0,
        }
    }

    /// Abandon whatever is queued and schedule every chunk in row-major order.
    /// Returns the new pass generation.
    pub fn restart(&mut self) -> u64 {
        self.generation += 1;
        self.pending.clear();
        self.pending.extend(0..self.queued.len());
        self.queued.iter_mut().for_each(|q| *q = true);
        self.full_pass = true;
        self.generation
    }

    /// Queue the chunks under `area` that are not already waiting.
    pub fn invalidate(&mut self, area: CellRect) {
        for idx in chunks_overlapping(&self.config, area) {
            if !self.queued[idx] {
                self.queued[idx] = true;
                self.pending.push_back(idx);
            }
        }
    }

    /// Next chunk for pass `generation`. `None` when the queue is empty or the
    /// caller's pass has been superseded.
    pub fn next_chunk(&mut self, generation: u64) -> Option<Chunk> {
        if generation != self.generation {
            log::debug!("dropping frame from superseded pass {generation} (current {})", self.generation);
            return None;
        }
        let idx = self.pending.pop_front()?;
        self.queued[idx] = false;
        if self.pending.is_empty() && self.full_pass {
            self.full_pass = false;
            self.passes_completed += 1;
        }
        chunk_at(&self.config, idx)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full passes painted to the end. Passes abandoned by a restart and
    /// drains of invalidated chunks alone are not counted.
    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }
}

/// Source and destination rectangles for the part of `placement` that falls
/// inside `chunk`. The image is stretched over the placement's cells using
/// the same cell span as the grid, so edges land on cell boundaries.
pub fn image_slice<I: SourceImage>(
    placement: &Placement<I>,
    chunk: CellRect,
    span: f64,
) -> Option<(PixelRect, PixelRect)> {
    let part = placement.rect.intersect(&chunk)?;
    let (iw, ih) = placement.image.dimensions();
    let sx = iw as f64 / placement.rect.width as f64;
    let sy = ih as f64 / placement.rect.height as f64;
    let src = PixelRect {
        x: (part.x - placement.rect.x) as f64 * sx,
        y: (part.y - placement.rect.y) as f64 * sy,
        w: part.width as f64 * sx,
        h: part.height as f64 * sy,
    };
    let dst = PixelRect {
        x: part.x as f64 * span,
        y: part.y as f64 * span,
        w: part.width as f64 * span,
        h: part.height as f64 * span,
    };
    Some((src, dst))
}

/// Paint every cell of `chunk` followed by the placements overlapping it.
pub fn paint_chunk<S, I>(
    surface: &mut S,
    chunk: &Chunk,
    span: f64,
    selection: &SelectionTracker,
    placements: &PlacementStore<I>,
) where
    S: Surface<Image = I>,
    I: SourceImage,
{
    for cell in chunk.cells.cells() {
        let rect = cell_pixels(cell, span);
        surface.fill_rect(rect, CELL_BACKGROUND);
        surface.stroke_rect(rect, CELL_BORDER);
        if selection.highlights(cell) {
            surface.fill_rect(rect, SELECTION_HIGHLIGHT);
        }
    }

    for placement in placements.overlapping(chunk.cells) {
        if let Some((src, dst)) = image_slice(placement, chunk.cells, span) {
            surface.draw_image(&placement.image, src, dst);
        }
    }
}

fn cell_pixels(cell: Cell, span: f64) -> PixelRect {
    PixelRect {
        x: cell.x as f64 * span,
        y: cell.y as f64 * span,
        w: span,
        h: span,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct TestImage(pub u32, pub u32);

    impl SourceImage for TestImage {
        fn dimensions(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    #[derive(Debug, PartialEq)]
    pub(crate) enum Op {
        Fill(PixelRect, Rgba),
        Stroke(PixelRect),
        Image(PixelRect, PixelRect),
    }

    /// Records draw calls instead of drawing.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        type Image = TestImage;

        fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
            self.ops.push(Op::Fill(rect, color));
        }

        fn stroke_rect(&mut self, rect: PixelRect, _color: Rgba) {
            self.ops.push(Op::Stroke(rect));
        }

        fn draw_image(&mut self, _image: &TestImage, src: PixelRect, dst: PixelRect) {
            self.ops.push(Op::Image(src, dst));
        }
    }

    fn small_config() -> BoardConfig {
        BoardConfig { grid_size: 25, chunk_size: 10, ..BoardConfig::default() }
    }

    #[test]
    fn test_default_partition_is_ten_by_ten() {
        let config = BoardConfig::default();
        assert_eq!(chunk_count(&config), 100);
        let first = chunk_at(&config, 0).unwrap();
        assert_eq!(first.cells, CellRect::new(0, 0, 100, 100));
        let eleventh = chunk_at(&config, 11).unwrap();
        assert_eq!(eleventh.cells, CellRect::new(100, 100, 100, 100));
        assert!(chunk_at(&config, 100).is_none());
    }

    #[test]
    fn test_edge_chunks_are_clipped() {
        let config = small_config();
        assert_eq!(chunk_count(&config), 9);
        assert_eq!(chunk_at(&config, 2).unwrap().cells, CellRect::new(20, 0, 5, 10));
        assert_eq!(chunk_at(&config, 8).unwrap().cells, CellRect::new(20, 20, 5, 5));
    }

    #[test]
    fn test_chunks_partition_the_grid() {
        let config = small_config();
        let total: i64 = (0..chunk_count(&config))
            .map(|i| chunk_at(&config, i).unwrap().cells.area())
            .sum();
        assert_eq!(total, 25 * 25);
    }

    #[test]
    fn test_chunks_overlapping_ignores_offboard() {
        let config = BoardConfig::default();
        assert_eq!(chunks_overlapping(&config, CellRect::new(95, 5, 10, 10)), vec![0, 1]);
        assert_eq!(chunks_overlapping(&config, CellRect::new(995, 995, 20, 20)), vec![99]);
        assert!(chunks_overlapping(&config, CellRect::new(-20, -20, 5, 5)).is_empty());
    }

    #[test]
    fn test_full_pass_is_row_major_and_finite() {
        let mut r = Repainter::new(BoardConfig::default());
        let g = r.restart();
        let order: Vec<usize> = std::iter::from_fn(|| r.next_chunk(g)).map(|c| c.index).collect();
        assert_eq!(order, (0..100).collect::<Vec<_>>());
        assert!(!r.has_pending());
        assert_eq!(r.passes_completed(), 1);
    }

    #[test]
    fn test_restart_supersedes_old_pass() {
        let mut r = Repainter::new(BoardConfig::default());
        let old = r.restart();
        r.next_chunk(old);
        r.next_chunk(old);
        let new = r.restart();
        assert_ne!(old, new);
        assert_eq!(r.next_chunk(old), None);
        assert_eq!(r.pending_len(), 100);
        assert_eq!(r.next_chunk(new).unwrap().index, 0);
    }

    #[test]
    fn test_invalidate_dedups_queued_chunks() {
        let mut r = Repainter::new(BoardConfig::default());
        let g = r.generation();
        r.invalidate(CellRect::new(150, 0, 10, 10));
        r.invalidate(CellRect::new(150, 0, 20, 20));
        assert_eq!(r.pending_len(), 1);
        assert_eq!(r.next_chunk(g).unwrap().index, 1);
        // Once painted, it can be queued again
        r.invalidate(CellRect::new(150, 0, 1, 1));
        assert_eq!(r.pending_len(), 1);
    }

    #[test]
    fn test_only_full_passes_are_counted() {
        let mut r = Repainter::new(BoardConfig::default());
        let g = r.generation();
        r.invalidate(CellRect::new(0, 0, 1, 1));
        while r.next_chunk(g).is_some() {}
        assert_eq!(r.passes_completed(), 0);

        // Abandoned pass does not count, the one that finishes does
        let old = r.restart();
        r.next_chunk(old);
        let g = r.restart();
        r.invalidate(CellRect::new(500, 500, 1, 1));
        while r.next_chunk(g).is_some() {}
        assert_eq!(r.passes_completed(), 1);

        r.invalidate(CellRect::new(500, 500, 1, 1));
        while r.next_chunk(g).is_some() {}
        assert_eq!(r.passes_completed(), 1);
    }

    #[test]
    fn test_paint_chunk_cells_and_highlight() {
        let config = small_config();
        let chunk = chunk_at(&config, 8).unwrap(); // 5x5 corner
        let mut sel = SelectionTracker::new(config.grid_size);
        sel.begin(Cell::new(20, 20));
        sel.update(Cell::new(21, 20));
        let store: PlacementStore<TestImage> = PlacementStore::new();

        let mut surface = RecordingSurface::default();
        paint_chunk(&mut surface, &chunk, 5.0, &sel, &store);

        let strokes = surface.ops.iter().filter(|op| matches!(op, Op::Stroke(_))).count();
        assert_eq!(strokes, 25);
        let highlights: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(rect, c) if *c == SELECTION_HIGHLIGHT => Some(rect.x),
                _ => None,
            })
            .collect();
        assert_eq!(highlights, vec![100.0, 105.0]);
    }

    #[test]
    fn test_placement_is_clipped_per_chunk() {
        let config = small_config();
        let mut store = PlacementStore::new();
        // 10x10 cells straddling chunks 0, 1, 3, 4
        store.add(TestImage(100, 100), CellRect::new(5, 5, 10, 10), "").unwrap();
        let sel = SelectionTracker::new(config.grid_size);

        let mut surface = RecordingSurface::default();
        let chunk = chunk_at(&config, 4).unwrap(); // cells 10..20
        paint_chunk(&mut surface, &chunk, 2.0, &sel, &store);

        let images: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(src, dst) => Some((*src, *dst)),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 1);
        let (src, dst) = images[0];
        assert_eq!(src, PixelRect { x: 50.0, y: 50.0, w: 50.0, h: 50.0 });
        assert_eq!(dst, PixelRect { x: 20.0, y: 20.0, w: 10.0, h: 10.0 });
        // Image goes on top of the cells
        assert!(matches!(surface.ops.last(), Some(Op::Image(..))));

        let mut surface = RecordingSurface::default();
        paint_chunk(&mut surface, &chunk_at(&config, 8).unwrap(), 2.0, &sel, &store);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Image(..))));
    }
}
