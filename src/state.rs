use leptos::prelude::*;
use pixelboard_core::{Board, BoardConfig};

use crate::canvas::frame_loop::PendingFrame;
use crate::image_loader::LoadedImage;

/// Shared app state, provided as context. The board model itself is held
/// non-reactively; the signals mirror the parts the UI displays and are
/// refreshed with `sync_from_board` after each board mutation.
#[derive(Clone, Copy)]
pub struct AppState {
    pub board: StoredValue<Board<LoadedImage>, LocalStorage>,
    /// Animation frame currently queued for the repaint, if any.
    pub frame: StoredValue<Option<PendingFrame>, LocalStorage>,
    pub canvas_ref: NodeRef<leptos::html::Canvas>,

    pub zoom_level: RwSignal<f64>,
    pub can_zoom_in: RwSignal<bool>,
    pub can_zoom_out: RwSignal<bool>,
    pub canvas_extent: RwSignal<f64>,
    pub selection_size: RwSignal<(i64, i64)>,
    pub is_selecting: RwSignal<bool>,
    pub can_place: RwSignal<bool>,
    pub placement_count: RwSignal<usize>,

    // Upload form
    pub pending_image: RwSignal<Option<LoadedImage>, LocalStorage>,
    pub image_loading: RwSignal<bool>,
    pub link_text: RwSignal<String>,
    pub status: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new(config: BoardConfig) -> Self {
        let board = Board::new(config);
        Self {
            zoom_level: RwSignal::new(board.zoom()),
            can_zoom_in: RwSignal::new(board.can_zoom_in()),
            can_zoom_out: RwSignal::new(board.can_zoom_out()),
            canvas_extent: RwSignal::new(board.canvas_extent()),
            selection_size: RwSignal::new((0, 0)),
            is_selecting: RwSignal::new(false),
            can_place: RwSignal::new(false),
            placement_count: RwSignal::new(0),
            board: StoredValue::new_local(board),
            frame: StoredValue::new_local(None),
            canvas_ref: NodeRef::new(),
            pending_image: RwSignal::new_local(None),
            image_loading: RwSignal::new(false),
            link_text: RwSignal::new(String::new()),
            status: RwSignal::new(None),
        }
    }

    /// Copy board state into the UI signals. Only signals whose value
    /// actually changed are notified.
    pub fn sync_from_board(&self) {
        let Some(snap) = self.board.try_with_value(|b| {
            (
                b.zoom(),
                b.can_zoom_in(),
                b.can_zoom_out(),
                b.canvas_extent(),
                b.selection_size(),
                b.is_selecting(),
                b.can_place(),
                b.placements().len(),
            )
        }) else {
            return;
        };
        let (zoom, zoom_in, zoom_out, extent, size, selecting, placeable, count) = snap;
        set_if_changed(self.zoom_level, zoom);
        set_if_changed(self.can_zoom_in, zoom_in);
        set_if_changed(self.can_zoom_out, zoom_out);
        set_if_changed(self.canvas_extent, extent);
        set_if_changed(self.selection_size, size);
        set_if_changed(self.is_selecting, selecting);
        set_if_changed(self.can_place, placeable);
        set_if_changed(self.placement_count, count);
    }
}

fn set_if_changed<T>(signal: RwSignal<T>, value: T)
where
    T: PartialEq + Send + Sync + 'static,
{
    if signal.with_untracked(|current| *current != value) {
        signal.set(value);
    }
}
