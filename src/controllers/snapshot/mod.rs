pub mod snapshot_controller;

pub use snapshot_controller::{SnapshotController, SnapshotError};
