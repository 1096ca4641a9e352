use std::num::NonZeroU32;

/// Hardware concurrency, falling back to a single worker when it cannot be
/// queried.
#[must_use]
pub fn available_workers() -> NonZeroU32 {
    std::thread::available_parallelism()
        .ok()
        .and_then(|n| NonZeroU32::new(u32::try_from(n.get()).unwrap_or(u32::MAX)))
        .unwrap_or(NonZeroU32::MIN)
}

/// The pool size to use: the requested count capped by hardware concurrency,
/// or all of it when nothing was requested.
#[must_use]
pub fn calculate_worker_count(requested: Option<NonZeroU32>) -> NonZeroU32 {
    let available = available_workers();

    requested.map_or(available, |requested| requested.min(available))
}

/// Number of bands to cut a frame of `height` rows into, so that no worker is
/// handed an empty band.
#[must_use]
pub fn calculate_bands_for_height(workers: NonZeroU32, height: u32) -> NonZeroU32 {
    NonZeroU32::new(workers.get().min(height)).unwrap_or(NonZeroU32::MIN)
}
