use crate::grid::Cell;

/// On-screen edge length of one cell.
pub fn cell_span(cell_size: f64, zoom: f64) -> f64 {
    cell_size * zoom
}

/// Map a pointer position to the cell under it.
///
/// `origin` is the top-left corner of the board in the same coordinate space
/// as the pointer. Results are not clamped to the board.
pub fn to_cell(
    pointer_x: f64,
    pointer_y: f64,
    origin_x: f64,
    origin_y: f64,
    zoom: f64,
    cell_size: f64,
) -> Cell {
    let span = cell_span(cell_size, zoom);
    Cell {
        x: ((pointer_x - origin_x) / span).floor() as i64,
        y: ((pointer_y - origin_y) / span).floor() as i64,
    }
}

/// Top-left canvas pixel of a cell.
pub fn cell_origin(cell: Cell, zoom: f64, cell_size: f64) -> (f64, f64) {
    let span = cell_span(cell_size, zoom);
    (cell.x as f64 * span, cell.y as f64 * span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CELL_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

    fn zoom_levels() -> Vec<f64> {
        let steps = ((ZOOM_MAX - ZOOM_MIN) / ZOOM_STEP).round() as usize;
        (0..=steps).map(|i| ZOOM_MIN + i as f64 * ZOOM_STEP).collect()
    }

    #[test]
    fn test_every_point_of_a_cell_maps_back_to_it() {
        let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(17, 400), Cell::new(999, 999)];
        for zoom in zoom_levels() {
            let span = cell_span(CELL_SIZE, zoom);
            for &cell in &cells {
                let (px, py) = cell_origin(cell, zoom, CELL_SIZE);
                for frac in [0.0, 0.25, 0.5, 0.99] {
                    let got = to_cell(px + span * frac, py + span * frac, 0.0, 0.0, zoom, CELL_SIZE);
                    assert_eq!(got, cell, "zoom {zoom}, frac {frac}");
                }
            }
        }
    }

    #[test]
    fn test_origin_offset_is_subtracted() {
        let cell = to_cell(112.0, 57.0, 100.0, 50.0, 2.0, CELL_SIZE);
        assert_eq!(cell, Cell::new(1, 0));
    }

    #[test]
    fn test_outside_board_is_not_clamped() {
        assert_eq!(to_cell(-1.0, -1.0, 0.0, 0.0, 1.0, CELL_SIZE), Cell::new(-1, -1));
        assert_eq!(to_cell(5000.0, 0.0, 0.0, 0.0, 1.0, CELL_SIZE), Cell::new(1000, 0));
    }
}
