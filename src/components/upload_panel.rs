use leptos::prelude::*;
use crate::canvas::frame_loop;
use crate::image_loader;
use crate::state::AppState;

fn place_pending_image(state: &AppState) {
    let image = state.pending_image.get_untracked();
    let link = state.link_text.get_untracked();
    let Some(result) = state
        .board
        .try_update_value(|b| b.place(image, &link).map(|p| (p.rect, p.link.is_some())))
    else {
        return;
    };

    match result {
        Ok((rect, has_link)) => {
            state.pending_image.set(None);
            state.link_text.set(String::new());
            let note = if has_link || link.trim().is_empty() { "" } else { " (link ignored)" };
            state.status.set(Some(format!(
                "Placed on {} x {} cells{note}",
                rect.width, rect.height
            )));
            state.sync_from_board();
            frame_loop::request_paint(*state);
        }
        // Button is disabled in these cases; nothing changes
        Err(e) => log::warn!("placement refused: {e}"),
    }
}

#[component]
pub fn UploadPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let on_file = move |_| {
        let Some(input) = file_ref.get() else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        // Reset so choosing the same file again still fires change
        input.set_value("");
        state.image_loading.set(true);
        state.status.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match image_loader::load_image(file).await {
                Ok(image) => state.pending_image.set(Some(image)),
                Err(e) => {
                    log::error!("{e}");
                    state.status.set(Some(e));
                }
            }
            state.image_loading.set(false);
        });
    };

    let place_disabled = move || {
        !state.can_place.get()
            || state.image_loading.get()
            || state.pending_image.with(|img| img.is_none())
    };

    view! {
        <div class="upload-panel">
            <div class="upload-panel-title">"Claim your pixels"</div>
            <p class="upload-panel-hint">
                "Drag across the board to select an area, then choose an image."
            </p>
            <label class="upload-panel-row">
                <span>"Image"</span>
                <input node_ref=file_ref type="file" accept="image/*" on:change=on_file />
            </label>
            <div class="upload-panel-file">
                {move || {
                    if state.image_loading.get() {
                        "Loading…".to_string()
                    } else {
                        state
                            .pending_image
                            .with(|img| img.as_ref().map(|i| format!("{} ({}x{})", i.name, i.width, i.height)))
                            .unwrap_or_else(|| "No image chosen".to_string())
                    }
                }}
            </div>
            <label class="upload-panel-row">
                <span>"Link"</span>
                <input
                    type="url"
                    placeholder="https://"
                    prop:value=move || state.link_text.get()
                    on:input=move |ev| state.link_text.set(event_target_value(&ev))
                />
            </label>
            <button
                class="upload-panel-place"
                disabled=place_disabled
                on:click=move |_| place_pending_image(&state)
            >
                {move || {
                    let (w, h) = state.selection_size.get();
                    if w > 0 && h > 0 {
                        format!("Place on {w} x {h}")
                    } else {
                        "Select an area first".to_string()
                    }
                }}
            </button>
            {move || state.status.get().map(|msg| view! { <div class="upload-panel-status">{msg}</div> })}
        </div>
    }
}
