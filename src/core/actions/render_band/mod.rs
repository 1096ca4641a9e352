pub mod band;
pub mod render_band;
