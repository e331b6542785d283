use pixelboard_core::BoardConfig;

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "pixelboard-config";

/// Board config from the page, or defaults if absent or unusable.
pub fn load_board_config() -> BoardConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        log::info!("using default board config");
        return BoardConfig::default();
    };

    match BoardConfig::from_json(&text) {
        Ok(config) => {
            log::info!(
                "board config from #{CONFIG_ELEMENT_ID}: {} cells/side, chunk {}",
                config.grid_size, config.chunk_size
            );
            config
        }
        Err(e) => {
            log::warn!("{e}; falling back to defaults");
            BoardConfig::default()
        }
    }
}
