// Time source for arrival and cooldown waits
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Suspends until `deadline`. Returns immediately when the deadline has passed.
    /// Dropping the returned future cancels the wait.
    async fn sleep_until(&self, deadline: DateTime<Utc>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep_until(&self, deadline: DateTime<Utc>) {
        if let Ok(remaining) = (deadline - Utc::now()).to_std() {
            tokio::time::sleep(remaining).await;
        }
    }
}

/// Virtual clock: waits complete instantly by jumping time forward.
#[derive(Debug)]
pub struct ManualClock {
    state: Mutex<ManualState>,
}

#[derive(Debug)]
struct ManualState {
    now: DateTime<Utc>,
    waits: Vec<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(ManualState {
                now: start,
                waits: Vec::new(),
            }),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut state = self.lock();
        state.now += by;
    }

    /// Deadlines that actually required waiting, in the order they were slept on.
    pub fn waits(&self) -> Vec<DateTime<Utc>> {
        self.lock().waits.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        // A poisoned lock only means a test thread panicked; the timestamps are still valid.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.lock().now
    }

    async fn sleep_until(&self, deadline: DateTime<Utc>) {
        {
            let mut state = self.lock();
            if deadline > state.now {
                state.now = deadline;
                state.waits.push(deadline);
            }
        }
        tokio::task::yield_now().await;
    }
}
