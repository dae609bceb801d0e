use std::time::{Duration, Instant};

/// Lets a call through at most once per `delay`. A zero delay never blocks.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    last_run: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            last_run: None,
        }
    }
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    /// Runs `f` unless the last accepted run was less than `delay` ago.
    pub fn bounce<F, T>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        self.bounce_at(Instant::now(), f)
    }

    fn bounce_at<F, T>(&mut self, now: Instant, f: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(last_run) = self.last_run {
            if now.saturating_duration_since(last_run) < self.delay {
                return None;
            }
        }
        self.last_run = Some(now);
        Some(f())
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, Instant};

    use super::Debounce;

    #[test]
    fn zero_delay_runs_every_call() {
        let mut debounce = Debounce::new(Duration::ZERO);
        let now = Instant::now();
        let runs = (0..5)
            .filter_map(|_| debounce.bounce_at(now, || ()))
            .count();
        assert_eq!(runs, 5);
    }

    #[test]
    fn skips_calls_inside_delay() {
        let mut debounce = Debounce::new(Duration::from_millis(100));
        let start = Instant::now();

        assert_eq!(debounce.bounce_at(start, || 1), Some(1));
        assert_eq!(
            debounce.bounce_at(start + Duration::from_millis(50), || 2),
            None
        );
        assert_eq!(
            debounce.bounce_at(start + Duration::from_millis(100), || 3),
            Some(3)
        );
        assert_eq!(
            debounce.bounce_at(start + Duration::from_millis(150), || 4),
            None
        );
    }
}
