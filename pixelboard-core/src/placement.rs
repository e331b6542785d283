//! Uploaded images pinned onto rectangles of cells.
//!
//! The store is append-only: placements are never edited or removed, and
//! lookups walk them in insertion order.

use crate::error::BoardError;
use crate::grid::{Cell, CellRect};

/// Anything with a known pixel size that can be placed on the board.
pub trait SourceImage {
    fn dimensions(&self) -> (u32, u32);
}

#[derive(Clone, Debug)]
pub struct Placement<I> {
    pub image: I,
    /// Cells covered by the fitted image.
    pub rect: CellRect,
    pub link: Option<String>,
}

impl<I> Placement<I> {
    pub fn contains(&self, cell: Cell) -> bool {
        self.rect.contains(cell)
    }
}

/// Largest rectangle inside `area` with the image's aspect ratio, centred.
///
/// A wider area keeps the full height and narrows; otherwise the full width
/// is kept and the height shrinks. Offsets round down. Never smaller than one
/// cell per side.
pub fn fit_within(area: CellRect, image_width: u32, image_height: u32) -> CellRect {
    let (w, h) = (area.width, area.height);
    let (iw, ih) = (image_width as i64, image_height as i64);

    // area aspect > image aspect  <=>  w * ih > iw * h
    let (fit_w, fit_h) = if (w as i128) * (ih as i128) > (iw as i128) * (h as i128) {
        ((h * iw / ih).clamp(1, w), h)
    } else {
        (w, (w * ih / iw).clamp(1, h))
    };

    CellRect::new(
        area.x + (w - fit_w) / 2,
        area.y + (h - fit_h) / 2,
        fit_w,
        fit_h,
    )
}

/// Trim link text and keep it only if it is an http(s) URL.
pub fn normalize_link(raw: &str) -> Option<String> {
    let link = raw.trim();
    if link.is_empty() {
        return None;
    }
    let lower = link.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Some(link.to_string())
    } else {
        log::warn!("ignoring link with unsupported scheme: {link}");
        None
    }
}

pub struct PlacementStore<I> {
    placements: Vec<Placement<I>>,
}

impl<I> Default for PlacementStore<I> {
    fn default() -> Self {
        Self { placements: Vec::new() }
    }
}

impl<I: SourceImage> PlacementStore<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit `image` into `selection` and append it.
    pub fn add(&mut self, image: I, selection: CellRect, link: &str) -> Result<&Placement<I>, BoardError> {
        if selection.is_empty() {
            return Err(BoardError::EmptySelection);
        }
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BoardError::DegenerateImage { width, height });
        }

        let rect = fit_within(selection, width, height);
        let link = normalize_link(link);
        log::info!(
            "placed {}x{} image at ({}, {}) covering {}x{} cells",
            width, height, rect.x, rect.y, rect.width, rect.height
        );
        self.placements.push(Placement { image, rect, link });
        let idx = self.placements.len() - 1;
        Ok(&self.placements[idx])
    }
}

impl<I> PlacementStore<I> {
    /// First placement, in insertion order, covering `cell`.
    pub fn hit_test(&self, cell: Cell) -> Option<&Placement<I>> {
        self.placements.iter().find(|p| p.contains(cell))
    }

    /// Placements overlapping `area`, in insertion order.
    pub fn overlapping(&self, area: CellRect) -> impl Iterator<Item = &Placement<I>> + '_ {
        self.placements
            .iter()
            .filter(move |p| p.rect.intersect(&area).is_some())
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
