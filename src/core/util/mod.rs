pub mod calculate_band_rows;
pub mod calculate_worker_count;
