use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Global pacing for outbound calls, shared by every concurrent caller.
///
/// Admission is atomic: the caller holding the lock measures the time since the
/// last admitted call, sleeps off the remainder, and stamps "now" before
/// releasing. Callers are admitted in lock acquisition order; there is no
/// priority, so a caller can wait a long time under heavy contention.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_admitted: Mutex<Instant>,
}

impl Throttle {
    /// `max_requests_per_second` is clamped to at least 1.
    pub fn per_second(max_requests_per_second: u32) -> Self {
        let rate = max_requests_per_second.max(1);
        Self::with_interval(Duration::from_secs_f64(1.0 / f64::from(rate)))
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            // Construction counts as an admission, so the first call is paced too
            last_admitted: Mutex::new(Instant::now()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub async fn wait(&self) {
        let mut last_admitted = self.last_admitted.lock().await;

        let elapsed = last_admitted.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last_admitted = Instant::now();
    }
}
