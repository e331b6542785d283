use leptos::prelude::*;
use crate::components::grid_canvas::GridCanvas;
use crate::components::toolbar::Toolbar;
use crate::components::upload_panel::UploadPanel;
use crate::config::load_board_config;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(load_board_config());
    provide_context(state);

    view! {
        <div class="app">
            <Toolbar />
            <div class="main">
                <GridCanvas />
                <UploadPanel />
            </div>
        </div>
    }
}
