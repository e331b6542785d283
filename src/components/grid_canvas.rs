use leptos::ev;
use leptos::prelude::*;
use pixelboard_core::{BoardEffect, Cell};
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::canvas::frame_loop;
use crate::state::AppState;

/// Board-space origin of the canvas in client coordinates.
fn canvas_origin(state: &AppState) -> Option<(f64, f64)> {
    let canvas_el = state.canvas_ref.get_untracked()?;
    let canvas: &HtmlCanvasElement = canvas_el.as_ref();
    let rect = canvas.get_bounding_client_rect();
    Some((rect.left(), rect.top()))
}

fn after_board_change(state: &AppState) {
    state.sync_from_board();
    frame_loop::request_paint(*state);
}

fn open_link(url: &str) {
    let Some(window) = web_sys::window() else { return };
    match window.open_with_url_and_target_and_features(url, "_blank", "noopener") {
        Ok(_) => log::info!("opened {url}"),
        Err(e) => log::error!("Failed to open {url}: {e:?}"),
    }
}

/// Board cell under the pointer of `ev`.
fn cell_under(state: &AppState, ev: &MouseEvent) -> Option<Cell> {
    let (left, top) = canvas_origin(state)?;
    state
        .board
        .try_with_value(|b| b.cell_at(ev.client_x() as f64, ev.client_y() as f64, left, top))
}

/// End any drag in progress. Wired to both the canvas and the window so a
/// release outside the board still lands here; only the canvas knows the
/// release cell, so only it can turn a press into a click.
fn release(state: &AppState, at: Option<Cell>) {
    let effect = state.board.try_update_value(|b| b.release(at)).flatten();
    after_board_change(state);
    if let Some(BoardEffect::OpenLink(url)) = effect {
        open_link(&url);
    }
}

#[component]
pub fn GridCanvas() -> impl IntoView {
    let state = expect_context::<AppState>();
    let canvas_ref = state.canvas_ref;

    // Zoom change (and first mount): resize and repaint from the top
    Effect::new(move || {
        let _zoom = state.zoom_level.get();
        if canvas_ref.get().is_none() {
            return;
        }
        frame_loop::start_pass(state);
    });

    let on_mousedown = move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let Some((left, top)) = canvas_origin(&state) else { return };
        ev.prevent_default();
        state.board.update_value(|b| {
            b.pointer_down(ev.client_x() as f64, ev.client_y() as f64, left, top);
        });
        after_board_change(&state);
    };

    let on_mousemove = move |ev: MouseEvent| {
        if !state.is_selecting.get_untracked() {
            return;
        }
        let Some((left, top)) = canvas_origin(&state) else { return };
        let changed = state
            .board
            .try_update_value(|b| b.pointer_move(ev.client_x() as f64, ev.client_y() as f64, left, top))
            .unwrap_or(false);
        if changed {
            after_board_change(&state);
        }
    };

    let on_mouseup = move |ev: MouseEvent| {
        // Handled here; keep the window listener from ending it a second time
        ev.stop_propagation();
        release(&state, cell_under(&state, &ev));
    };

    let global_release = window_event_listener(ev::mouseup, move |_ev| release(&state, None));
    on_cleanup(move || global_release.remove());

    view! {
        <div
            class=move || if state.is_selecting.get() { "board-viewport selecting" } else { "board-viewport" }
        >
            <canvas
                node_ref=canvas_ref
                class="board-canvas"
                style:width=move || format!("{}px", state.canvas_extent.get())
                style:height=move || format!("{}px", state.canvas_extent.get())
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseup=on_mouseup
            />
        </div>
    }
}
