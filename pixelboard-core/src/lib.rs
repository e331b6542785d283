pub mod board;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;
pub mod placement;
pub mod render;
pub mod selection;

pub use board::{Board, BoardEffect};
pub use config::BoardConfig;
pub use error::BoardError;
pub use grid::{Cell, CellIndex, CellRect};
pub use placement::{Placement, PlacementStore, SourceImage};
pub use render::{Chunk, PixelRect, Rgba, Surface};
pub use selection::SelectionTracker;
