pub mod colors;
pub mod frame_loop;
pub mod surface;
