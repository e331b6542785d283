//! requestAnimationFrame driver for the board repaint.
//!
//! Exactly one frame is queued at a time. Each frame paints one chunk and
//! queues the next while the board still has chunks pending. Starting a new
//! pass cancels the queued frame first; a frame that fires anyway for an old
//! pass finds its generation stale and paints nothing.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::canvas::surface::{get_canvas_ctx, CanvasSurface};
use crate::state::AppState;

pub struct PendingFrame {
    handle: i32,
    generation: u64,
    _callback: Closure<dyn FnMut(f64)>,
}

/// Resize the canvas for the current zoom and drive the board's current
/// full pass from its first chunk. The board restarts the pass itself on
/// zoom changes; a frame still queued for an older pass is cancelled.
pub fn start_pass(state: AppState) {
    let Some(canvas) = state.canvas_ref.get_untracked() else { return };
    let canvas: &HtmlCanvasElement = canvas.as_ref();
    cancel_frame(state);

    let Some((extent, zoom, generation)) =
        state.board.try_with_value(|b| (b.canvas_extent(), b.zoom(), b.repaint_generation()))
    else {
        return;
    };

    // Resizing also clears the backing store
    let px = extent.round() as u32;
    canvas.set_width(px);
    canvas.set_height(px);

    log::info!("repaint pass {generation}: {px}x{px} px at zoom {zoom}");
    schedule(state, canvas.clone(), generation);
}

/// Queue a frame if the board has chunks waiting and none is queued.
pub fn request_paint(state: AppState) {
    if state.frame.with_value(|f| f.is_some()) {
        return;
    }
    let Some((needs_paint, generation)) =
        state.board.try_with_value(|b| (b.needs_paint(), b.repaint_generation()))
    else {
        return;
    };
    if !needs_paint {
        return;
    }
    let Some(canvas) = state.canvas_ref.get_untracked() else { return };
    let canvas: &HtmlCanvasElement = canvas.as_ref();
    schedule(state, canvas.clone(), generation);
}

fn cancel_frame(state: AppState) {
    let Some(pending) = state.frame.try_update_value(|f| f.take()).flatten() else {
        return;
    };
    if let Some(window) = web_sys::window() {
        let _ = window.cancel_animation_frame(pending.handle);
    }
    log::debug!("cancelled queued frame of pass {}", pending.generation);
}

fn schedule(state: AppState, canvas: HtmlCanvasElement, generation: u64) {
    let Some(window) = web_sys::window() else {
        log::error!("No window object");
        return;
    };

    let callback = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
        // Free the slot before painting so the next frame can be queued
        let _fired = state.frame.try_update_value(|f| f.take());
        paint_frame(state, &canvas, generation);
    });

    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => state.frame.set_value(Some(PendingFrame {
            handle,
            generation,
            _callback: callback,
        })),
        Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
    }
}

fn paint_frame(state: AppState, canvas: &HtmlCanvasElement, generation: u64) {
    let Some(ctx) = get_canvas_ctx(canvas) else {
        log::error!("Board canvas has no 2d context");
        return;
    };

    let Some((painted, more, passes_before, passes)) = state.board.try_update_value(|b| {
        let passes_before = b.passes_completed();
        let mut surface = CanvasSurface::new(&ctx);
        let painted = b.paint_next(generation, &mut surface);
        (painted, b.needs_paint(), passes_before, b.passes_completed())
    }) else {
        return;
    };

    // Superseded pass: hand over to whatever the current pass needs
    if painted.is_none() {
        request_paint(state);
        return;
    }
    if passes > passes_before {
        log::info!("repaint pass {generation} complete ({passes} full passes so far)");
    }
    if more {
        schedule(state, canvas.clone(), generation);
    } else if passes == passes_before {
        log::debug!("repaint queue drained");
    }
}
