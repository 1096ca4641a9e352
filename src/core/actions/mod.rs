pub mod render_band;
