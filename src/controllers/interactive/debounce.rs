use std::time::{Duration, Instant};

/// A single pending deadline. Scheduling again cancels and replaces the
/// previous deadline, so a superseded render can never fire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clears and reports the deadline if it has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();

        debouncer.schedule(start, DELAY);

        assert_eq!(debouncer.deadline(), Some(start + DELAY));
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(299)));
        assert!(debouncer.fire_if_due(start + DELAY));
        assert!(!debouncer.fire_if_due(start + DELAY * 2));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_reschedule_supersedes_previous_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new();

        debouncer.schedule(start, DELAY);
        debouncer.schedule(start + Duration::from_millis(200), DELAY);

        assert!(!debouncer.fire_if_due(start + DELAY));
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(500))
        );
        assert!(debouncer.fire_if_due(start + Duration::from_millis(500)));
    }
}
