use pixelboard_core::render::{chunk_count, Surface};
use pixelboard_core::{Board, BoardConfig, BoardEffect, Cell, PixelRect, Rgba, SourceImage};

#[derive(Clone, Debug)]
struct Photo {
    width: u32,
    height: u32,
}

impl SourceImage for Photo {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Default)]
struct CountingSurface {
    fills: usize,
    strokes: usize,
    images: Vec<PixelRect>,
}

impl Surface for CountingSurface {
    type Image = Photo;

    fn fill_rect(&mut self, _rect: PixelRect, _color: Rgba) {
        self.fills += 1;
    }

    fn stroke_rect(&mut self, _rect: PixelRect, _color: Rgba) {
        self.strokes += 1;
    }

    fn draw_image(&mut self, _image: &Photo, _src: PixelRect, dst: PixelRect) {
        self.images.push(dst);
    }
}

fn centre(cell: (i64, i64), span: f64) -> (f64, f64) {
    ((cell.0 as f64 + 0.5) * span, (cell.1 as f64 + 0.5) * span)
}

fn click(board: &mut Board<Photo>, cell: (i64, i64)) -> Option<BoardEffect> {
    let (x, y) = centre(cell, 5.0);
    board.pointer_down(x, y, 0.0, 0.0);
    board.release(Some(Cell::new(cell.0, cell.1)))
}

#[test]
fn select_upload_and_follow_link() {
    let mut board = Board::new(BoardConfig::default());

    let (x, y) = centre((0, 0), 5.0);
    board.pointer_down(x, y, 0.0, 0.0);
    let (x, y) = centre((4, 4), 5.0);
    board.pointer_move(x, y, 0.0, 0.0);
    assert_eq!(board.release(Some(Cell::new(4, 4))), None);
    assert_eq!(board.selection().cells().len(), 25);

    let placement = board
        .place(Some(Photo { width: 640, height: 320 }), "https://x.test")
        .unwrap();
    assert_eq!(placement.rect.width, 5);
    assert!(placement.rect.height <= 5);
    let top_left = (placement.rect.x, placement.rect.y);

    assert_eq!(
        click(&mut board, top_left),
        Some(BoardEffect::OpenLink("https://x.test".to_string()))
    );
    assert_eq!(click(&mut board, (20, 20)), None);

    // Pressed on the placement but released outside the board
    let (x, y) = centre(top_left, 5.0);
    board.pointer_down(x, y, 0.0, 0.0);
    assert_eq!(board.release(None), None);
    assert!(board.hit_test(Cell::new(20, 20)).is_none());
}

#[test]
fn full_repaint_draws_every_cell_once_and_the_placement() {
    let config = BoardConfig { grid_size: 120, chunk_size: 50, ..BoardConfig::default() };
    let mut board = Board::new(config.clone());

    let (x, y) = centre((45, 45), 5.0);
    board.pointer_down(x, y, 0.0, 0.0);
    let (x, y) = centre((54, 54), 5.0);
    board.pointer_move(x, y, 0.0, 0.0);
    board.release(None);
    board.place(Some(Photo { width: 10, height: 10 }), "").unwrap();

    // The first full pass already covers the selection and the placement
    let generation = board.repaint_generation();
    let mut surface = CountingSurface::default();
    let mut frames = 0;
    while board.paint_next(generation, &mut surface).is_some() {
        frames += 1;
    }

    assert_eq!(frames, chunk_count(&config));
    assert_eq!(surface.strokes, 120 * 120);
    // Background for every cell plus the 100 highlighted ones
    assert_eq!(surface.fills, 120 * 120 + 100);
    // The 10x10 placement straddles four chunks
    assert_eq!(surface.images.len(), 4);
    let covered: f64 = surface.images.iter().map(|r| r.w * r.h).sum();
    assert_eq!(covered, 50.0 * 50.0);
    assert_eq!(board.passes_completed(), 1);
}
