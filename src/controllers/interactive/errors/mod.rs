pub mod merge_error;
pub mod render_error;
