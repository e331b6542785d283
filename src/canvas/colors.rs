use pixelboard_core::Rgba;

/// CSS colour string for canvas fill/stroke styles.
pub fn css(color: Rgba) -> String {
    if color.a >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, color.a.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelboard_core::render::{CELL_BACKGROUND, CELL_BORDER, SELECTION_HIGHLIGHT};

    #[test]
    fn test_palette_strings() {
        assert_eq!(css(CELL_BACKGROUND), "#ffffff");
        assert_eq!(css(CELL_BORDER), "#e5e7eb");
        assert_eq!(css(SELECTION_HIGHLIGHT), "rgba(0, 123, 255, 0.5)");
    }
}
