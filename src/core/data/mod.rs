pub mod colour;
pub mod complex;
pub mod frame_size;
pub mod pixel_buffer;
pub mod point;
pub mod viewport;
