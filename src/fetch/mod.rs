pub mod conversions;
pub mod error;
pub mod frame_source;
pub mod grid_frame;
pub mod source;
