use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::completion_notifier::{
    CompletionNotifier, NoopNotifier,
};
use crate::controllers::interactive::ports::render_port::RenderPort;
use crate::controllers::interactive::render_pass::{PassState, RenderPass};
use crate::core::actions::render_band::band::{BandResult, BandTask, PassId};
use crate::core::actions::render_band::render_band::render_band;
use crate::core::util::calculate_band_rows::calculate_band_rows;
use crate::core::util::calculate_worker_count::{
    calculate_bands_for_height, calculate_worker_count,
};

pub const DEFAULT_PASS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pool size. `None` uses every available hardware thread; an explicit
    /// count is still capped by what the machine has.
    pub workers: Option<NonZeroU32>,
    /// How long a pass may wait for its bands before it is reported as
    /// stalled. `None` waits forever.
    pub pass_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: None,
            pass_timeout: Some(DEFAULT_PASS_TIMEOUT),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SchedulerError {
    #[error("failed to build band worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Cuts frames into horizontal bands, renders them on a worker pool and
/// stitches the results back together.
///
/// Dispatch never blocks. Workers send finished bands back over a channel
/// and the owner of the scheduler merges them by calling [`poll`],
/// [`next_event`] or [`render_blocking`]. Passes are never cancelled: a newer
/// pass does not stop an older one, and frames are reported in the order
/// they complete.
///
/// [`poll`]: TileScheduler::poll
/// [`next_event`]: TileScheduler::next_event
/// [`render_blocking`]: TileScheduler::render_blocking
pub struct TileScheduler {
    pool: rayon::ThreadPool,
    workers: NonZeroU32,
    pass_timeout: Option<Duration>,
    notifier: Arc<dyn CompletionNotifier>,
    results_tx: Sender<BandResult>,
    results_rx: Receiver<BandResult>,
    in_flight: BTreeMap<PassId, RenderPass>,
    ready: VecDeque<RenderEvent>,
    next_pass_id: u64,
}

impl TileScheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::with_notifier(config, Arc::new(NoopNotifier))
    }

    pub fn with_notifier(
        config: SchedulerConfig,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Result<Self, SchedulerError> {
        let workers = calculate_worker_count(config.workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get() as usize)
            .thread_name(|index| format!("band-worker-{index}"))
            .panic_handler(log_worker_panic)
            .build()?;
        let (results_tx, results_rx) = channel::unbounded();

        tracing::debug!(workers = workers.get(), "band worker pool ready");

        Ok(Self {
            pool,
            workers,
            pass_timeout: config.pass_timeout,
            notifier,
            results_tx,
            results_rx,
            in_flight: BTreeMap::new(),
            ready: VecDeque::new(),
            next_pass_id: 1,
        })
    }

    #[must_use]
    pub fn workers(&self) -> NonZeroU32 {
        self.workers
    }

    #[must_use]
    pub fn pass_timeout(&self) -> Option<Duration> {
        self.pass_timeout
    }

    /// Number of passes dispatched but not yet completed or failed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts a new pass and returns immediately.
    pub fn dispatch(&mut self, request: RenderRequest) -> PassId {
        let pass_id = PassId(self.next_pass_id);
        self.next_pass_id += 1;

        let frame_size = request.frame_size;
        let band_count = calculate_bands_for_height(self.workers, frame_size.height());
        let bands = calculate_band_rows(frame_size.height(), band_count);

        tracing::debug!(
            pass = %pass_id,
            width = frame_size.width(),
            height = frame_size.height(),
            bands = bands.len(),
            max_iterations = request.max_iterations,
            "dispatching render pass"
        );

        for (index, rows) in bands.iter().copied().enumerate() {
            let task = BandTask {
                pass_id,
                index,
                rows,
                frame_size,
                viewport: request.viewport,
                max_iterations: request.max_iterations,
            };
            let results = self.results_tx.clone();
            let notifier = Arc::clone(&self.notifier);

            self.pool.spawn(move || {
                let result = render_band(&task);

                if results.send(result).is_ok() {
                    notifier.band_completed(task.pass_id);
                }
            });
        }

        self.in_flight.insert(
            pass_id,
            RenderPass::new(pass_id, frame_size, bands, Instant::now()),
        );

        pass_id
    }

    /// Merges every band result that has already arrived and returns the
    /// events that produced, without blocking.
    pub fn poll(&mut self) -> Vec<RenderEvent> {
        self.expire_stalled(Instant::now());

        while let Ok(result) = self.results_rx.try_recv() {
            self.accept(result);
        }

        self.ready.drain(..).collect()
    }

    /// Waits up to `timeout` for the next completed or failed pass.
    ///
    /// Returns `None` when the timeout elapses, or straight away when no pass
    /// is in flight and nothing is queued.
    pub fn next_event(&mut self, timeout: Duration) -> Option<RenderEvent> {
        let deadline = Instant::now().checked_add(timeout);

        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(event);
            }

            let now = Instant::now();
            self.expire_stalled(now);

            if let Some(event) = self.ready.pop_front() {
                return Some(event);
            }

            if self.in_flight.is_empty() || deadline.is_some_and(|deadline| now >= deadline) {
                return None;
            }

            let wake_at = match (deadline, self.next_deadline()) {
                (Some(deadline), Some(stall)) => Some(deadline.min(stall)),
                (deadline, stall) => deadline.or(stall),
            };

            let received = match wake_at {
                Some(wake_at) => self.results_rx.recv_deadline(wake_at),
                None => self
                    .results_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(result) => self.accept(result),
                Err(RecvTimeoutError::Timeout) => {}
                // The scheduler owns a sender, so this cannot happen while it is alive.
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Dispatches a pass and waits for it. Events belonging to other passes
    /// that arrive meanwhile stay queued for the next `poll`/`next_event`.
    #[tracing::instrument(
        level = "debug",
        skip(self, request),
        fields(
            width = request.frame_size.width(),
            height = request.frame_size.height()
        )
    )]
    pub fn render_blocking(&mut self, request: RenderRequest) -> Result<FrameData, RenderError> {
        let pass_id = self.dispatch(request);
        let mut deferred = Vec::new();

        let outcome = loop {
            let Some(event) = self.next_event(Duration::MAX) else {
                break Err(RenderError::Abandoned { pass_id });
            };

            if event.pass_id() != pass_id {
                deferred.push(event);
                continue;
            }

            break match event {
                RenderEvent::Frame(frame) => Ok(frame),
                RenderEvent::Error(error) => Err(error),
            };
        };

        for event in deferred.into_iter().rev() {
            self.ready.push_front(event);
        }

        outcome
    }

    fn accept(&mut self, result: BandResult) {
        let pass_id = result.pass_id;
        let Some(pass) = self.in_flight.get_mut(&pass_id) else {
            tracing::debug!(pass = %pass_id, band = result.index, "discarding band for finished pass");
            return;
        };

        match pass.merge(&result) {
            Ok(PassState::Complete) => {
                let Some(pass) = self.in_flight.remove(&pass_id) else {
                    return;
                };
                let band_count = pass.bands().len();
                let frame = pass.into_frame(Instant::now());

                tracing::info!(
                    pass = %pass_id,
                    width = frame.pixel_buffer.frame_size().width(),
                    height = frame.pixel_buffer.frame_size().height(),
                    bands = band_count,
                    duration_ms = frame.render_duration.as_secs_f64() * 1000.0,
                    "render pass complete"
                );

                self.ready.push_back(RenderEvent::Frame(frame));
            }
            Ok(state) => {
                tracing::trace!(pass = %pass_id, band = result.index, ?state, "band merged");
            }
            Err(source) => {
                tracing::error!(pass = %pass_id, band = result.index, error = %source, "band merge failed");

                self.in_flight.remove(&pass_id);
                self.ready
                    .push_back(RenderEvent::Error(RenderError::Merge { pass_id, source }));
            }
        }
    }

    /// Fails every pass whose deadline has passed. Deadlines are checked
    /// before queued results are drained, so a band that lands after the
    /// deadline is discarded even if it is already in the channel.
    fn expire_stalled(&mut self, now: Instant) {
        let Some(timeout) = self.pass_timeout else {
            return;
        };

        let stalled: Vec<PassId> = self
            .in_flight
            .values()
            .filter(|pass| pass.elapsed(now) >= timeout)
            .map(RenderPass::id)
            .collect();

        for pass_id in stalled {
            let Some(pass) = self.in_flight.remove(&pass_id) else {
                continue;
            };
            let missing_bands = pass.missing_bands();
            let waited = pass.elapsed(now);

            tracing::warn!(
                pass = %pass_id,
                ?missing_bands,
                waited_ms = waited.as_millis() as u64,
                "render pass stalled"
            );

            self.ready.push_back(RenderEvent::Error(RenderError::Stalled {
                pass_id,
                missing_bands,
                waited,
            }));
        }
    }

    /// Earliest instant at which an in-flight pass will be reported as
    /// stalled. Event loops that poll should wake no later than this.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let timeout = self.pass_timeout?;

        self.in_flight
            .values()
            .filter_map(|pass| pass.dispatched_at().checked_add(timeout))
            .min()
    }
}

impl RenderPort for TileScheduler {
    fn render(&mut self, request: RenderRequest) {
        self.dispatch(request);
    }
}

fn log_worker_panic(payload: Box<dyn Any + Send>) {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());

    tracing::error!(%message, "band worker panicked");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::frame_size::FrameSize;
    use crate::core::data::point::Point;
    use crate::core::data::viewport::Viewport;
    use crate::core::util::calculate_band_rows::RowRange;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const WAIT: Duration = Duration::from_secs(30);

    fn request(width: u32, height: u32, max_iterations: u32) -> RenderRequest {
        RenderRequest {
            frame_size: FrameSize::new(width, height).unwrap(),
            viewport: Viewport::default(),
            max_iterations,
        }
    }

    fn scheduler(workers: u32, pass_timeout: Option<Duration>) -> TileScheduler {
        TileScheduler::new(SchedulerConfig {
            workers: NonZeroU32::new(workers),
            pass_timeout,
        })
        .unwrap()
    }

    #[derive(Default)]
    struct CountingNotifier {
        calls: AtomicUsize,
    }

    impl CompletionNotifier for CountingNotifier {
        fn band_completed(&self, _pass_id: PassId) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn wait_for_calls(notifier: &CountingNotifier, expected: usize) {
        let deadline = Instant::now() + WAIT;
        while notifier.calls.load(Ordering::SeqCst) < expected && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_two_by_two_frame_end_to_end() {
        let mut scheduler = scheduler(2, Some(WAIT));

        let frame = scheduler.render_blocking(request(2, 2, 10)).unwrap();
        let buffer = &frame.pixel_buffer;

        assert_eq!(buffer.buffer_size(), 16);
        assert!(buffer.buffer().chunks_exact(4).all(|px| px[3] == 255));
        assert_eq!(buffer.pixel(Point { x: 0, y: 0 }).unwrap().to_rgba(), [0, 0, 0, 255]);
        assert_eq!(buffer.pixel(Point { x: 0, y: 1 }).unwrap().to_rgba(), [0, 0, 0, 255]);
        assert_eq!(buffer.pixel(Point { x: 1, y: 0 }).unwrap().to_rgba(), [241, 0, 0, 255]);
        assert_eq!(buffer.pixel(Point { x: 1, y: 1 }).unwrap().to_rgba(), [241, 0, 0, 255]);
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[test]
    fn test_banded_render_matches_single_band() {
        let mut scheduler = scheduler(4, Some(WAIT));
        let request = request(37, 23, 64);

        let frame = scheduler.render_blocking(request).unwrap();
        let serial = render_band(&BandTask {
            pass_id: frame.pass_id,
            index: 0,
            rows: RowRange { start_row: 0, end_row: 23 },
            frame_size: request.frame_size,
            viewport: request.viewport,
            max_iterations: request.max_iterations,
        });

        assert_eq!(frame.pixel_buffer.buffer(), serial.bytes.as_slice());
    }

    #[test]
    fn test_overlapping_passes_both_complete() {
        let mut scheduler = scheduler(2, Some(WAIT));

        let first = scheduler.dispatch(request(16, 12, 50));
        let second = scheduler.dispatch(request(24, 8, 80));
        assert_eq!(scheduler.in_flight(), 2);

        let mut completed = Vec::new();
        while let Some(event) = scheduler.next_event(WAIT) {
            match event {
                RenderEvent::Frame(frame) => completed.push(frame.pass_id),
                RenderEvent::Error(error) => panic!("unexpected error: {error}"),
            }
        }

        completed.sort();
        assert_eq!(completed, vec![first, second]);
        assert!(first < second);
    }

    #[test]
    fn test_zero_timeout_reports_stall() {
        let mut scheduler = scheduler(2, Some(Duration::ZERO));
        let request = request(4, 8, 10);
        let bands = calculate_bands_for_height(scheduler.workers(), 8).get() as usize;

        let Err(RenderError::Stalled {
            pass_id,
            missing_bands,
            ..
        }) = scheduler.render_blocking(request)
        else {
            panic!("expected a stalled pass");
        };

        assert_eq!(pass_id, PassId(1));
        assert_eq!(missing_bands, (0..bands).collect::<Vec<_>>());
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[test]
    fn test_late_bands_are_discarded() {
        let notifier = Arc::new(CountingNotifier::default());
        let mut scheduler = TileScheduler::with_notifier(
            SchedulerConfig {
                workers: NonZeroU32::new(2),
                pass_timeout: Some(Duration::ZERO),
            },
            Arc::clone(&notifier) as Arc<dyn CompletionNotifier>,
        )
        .unwrap();
        let bands = calculate_bands_for_height(scheduler.workers(), 6).get() as usize;

        assert!(scheduler.render_blocking(request(6, 6, 20)).is_err());

        wait_for_calls(&notifier, bands);

        assert!(scheduler.poll().is_empty());
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[test]
    fn test_notifier_called_once_per_band() {
        let notifier = Arc::new(CountingNotifier::default());
        let mut scheduler = TileScheduler::with_notifier(
            SchedulerConfig {
                workers: NonZeroU32::new(3),
                pass_timeout: Some(WAIT),
            },
            Arc::clone(&notifier) as Arc<dyn CompletionNotifier>,
        )
        .unwrap();
        let bands = calculate_bands_for_height(scheduler.workers(), 9).get() as usize;

        scheduler.render_blocking(request(5, 9, 30)).unwrap();
        wait_for_calls(&notifier, bands);

        assert_eq!(notifier.calls.load(Ordering::SeqCst), bands);
    }

    #[test]
    fn test_render_blocking_keeps_other_events_queued() {
        let mut scheduler = scheduler(2, Some(WAIT));

        let background = scheduler.dispatch(request(8, 8, 40));
        let frame = scheduler.render_blocking(request(6, 4, 40)).unwrap();
        assert_eq!(frame.pass_id, PassId(2));

        match scheduler.next_event(WAIT) {
            Some(RenderEvent::Frame(frame)) => assert_eq!(frame.pass_id, background),
            other => panic!("expected the background frame, got {other:?}"),
        }
    }

    #[test]
    fn test_idle_scheduler_has_nothing_to_report() {
        let mut scheduler = scheduler(1, None);

        assert!(scheduler.poll().is_empty());
        assert!(scheduler.next_event(Duration::from_millis(1)).is_none());
    }

    #[test]
    fn test_render_port_dispatches() {
        let mut scheduler = scheduler(1, Some(WAIT));

        RenderPort::render(&mut scheduler, request(3, 3, 5));

        assert_eq!(scheduler.in_flight(), 1);
        assert!(matches!(scheduler.next_event(WAIT), Some(RenderEvent::Frame(_))));
    }
}
