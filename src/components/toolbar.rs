use leptos::prelude::*;
use crate::state::AppState;

fn step_zoom(state: &AppState, zoom_in: bool) {
    let changed = state
        .board
        .try_update_value(|b| if zoom_in { b.zoom_in() } else { b.zoom_out() })
        .unwrap_or(false);
    if changed {
        // zoom_level change kicks off the repaint in GridCanvas
        state.sync_from_board();
    }
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toolbar">
            <span class="toolbar-brand"><b>"pixel"</b><i>"board"</i></span>

            <button
                class="toolbar-zoom-btn"
                on:click=move |_| step_zoom(&state, false)
                disabled=move || !state.can_zoom_out.get()
                title="Zoom out"
            >"Zoom Out"</button>
            <span class="toolbar-zoom-level">
                {move || format!("{:.1}x", state.zoom_level.get())}
            </span>
            <button
                class="toolbar-zoom-btn"
                on:click=move |_| step_zoom(&state, true)
                disabled=move || !state.can_zoom_in.get()
                title="Zoom in"
            >"Zoom In"</button>

            // Spacer
            <div style="flex: 1;"></div>

            <span class="toolbar-selection">
                {move || {
                    let (w, h) = state.selection_size.get();
                    format!("Selected area: {w} x {h} pixels")
                }}
            </span>
            <span class="toolbar-placements">
                {move || match state.placement_count.get() {
                    0 => String::new(),
                    1 => "1 image placed".to_string(),
                    n => format!("{n} images placed"),
                }}
            </span>
        </div>
    }
}
