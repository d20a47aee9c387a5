use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Central output broker that owns the console.
/// Every component logs through a [`Logger`] handle; the broker filters by
/// verbosity, batches summaries and prints from a single worker.
#[derive(Clone)]
pub struct OutputBroker {
    sender: mpsc::UnboundedSender<OutputRequest>,
}

enum OutputRequest {
    Line {
        level: OutputLevel,
        prefix: Arc<str>,
        message: String,
        at: DateTime<Utc>,
    },
    Flush(oneshot::Sender<()>),
    /// Summary interval elapsed (thread worker only)
    Tick,
}

/// Output levels for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputLevel {
    Error,   // always shown
    Summary, // always shown, batched
    Info,    // verbosity 1+
    Debug,   // verbosity 2+
    Trace,   // verbosity 2+
}

impl OutputLevel {
    pub fn visible_at(self, verbosity: u8) -> bool {
        match self {
            OutputLevel::Error | OutputLevel::Summary => true,
            OutputLevel::Info => verbosity >= 1,
            OutputLevel::Debug | OutputLevel::Trace => verbosity >= 2,
        }
    }
}

struct BrokerState {
    verbosity: u8,
    pending_summaries: VecDeque<String>,
    summary_interval: Duration,
    /// Summary blocks printed so far
    batches_printed: usize,
}

const MAX_PENDING_SUMMARIES: usize = 100;
const MIN_SUMMARY_INTERVAL: Duration = Duration::from_secs(1);

impl OutputBroker {
    /// Create a broker and start its worker. Inside a tokio runtime the worker
    /// is a task; outside one it is a plain thread.
    pub fn new(verbosity: u8, summary_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = BrokerState {
            verbosity,
            pending_summaries: VecDeque::new(),
            summary_interval: summary_interval.max(MIN_SUMMARY_INTERVAL),
            batches_printed: 0,
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(Self::broker_worker(receiver, state));
            }
            Err(_) => {
                Self::spawn_ticker(sender.downgrade(), state.summary_interval);
                std::thread::spawn(move || Self::blocking_worker(receiver, state));
            }
        }

        Self { sender }
    }

    pub fn logger(&self, prefix: impl Into<String>) -> Logger {
        Logger {
            broker: self.clone(),
            prefix: Arc::from(prefix.into()),
        }
    }

    fn submit(&self, level: OutputLevel, prefix: Arc<str>, message: String) {
        let request = OutputRequest::Line {
            level,
            prefix,
            message,
            at: Utc::now(),
        };
        // Broker gone (runtime shut down): fall back to printing errors directly
        if let Err(mpsc::error::SendError(OutputRequest::Line { level, prefix, message, at })) =
            self.sender.send(request)
        {
            if level == OutputLevel::Error {
                eprintln!("{}", render_line(at, &prefix, &message));
            }
        }
    }

    /// Flush pending summaries and wait until the worker has printed them.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(OutputRequest::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Prints requests as they arrive and pending summaries on every interval
    /// tick, even when nothing else is logged. Returns the final state once
    /// every sender is gone.
    async fn broker_worker(mut receiver: mpsc::UnboundedReceiver<OutputRequest>, mut state: BrokerState) -> BrokerState {
        let period = state.summary_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                request = receiver.recv() => match request {
                    Some(request) => state.handle(request),
                    None => break,
                },
                _ = ticker.tick() => state.flush_pending_summaries(),
            }
        }
        state.flush_pending_summaries();
        state
    }

    fn blocking_worker(mut receiver: mpsc::UnboundedReceiver<OutputRequest>, mut state: BrokerState) {
        while let Some(request) = receiver.blocking_recv() {
            state.handle(request);
        }
        state.flush_pending_summaries();
    }

    /// Timer for the thread worker. Holds only a weak sender so the worker
    /// still stops once every broker handle is dropped.
    fn spawn_ticker(sender: mpsc::WeakUnboundedSender<OutputRequest>, period: Duration) {
        std::thread::spawn(move || loop {
            std::thread::sleep(period);
            match sender.upgrade() {
                Some(sender) if sender.send(OutputRequest::Tick).is_ok() => {}
                _ => break,
            }
        });
    }
}

impl BrokerState {
    fn handle(&mut self, request: OutputRequest) {
        match request {
            OutputRequest::Flush(done) => {
                self.flush_pending_summaries();
                let _ = done.send(());
            }
            OutputRequest::Tick => self.flush_pending_summaries(),
            OutputRequest::Line { level, prefix, message, at } => {
                if let Some(line) = self.accept(level, &prefix, &message, at) {
                    if level == OutputLevel::Error {
                        eprintln!("{}", line);
                    } else {
                        println!("{}", line);
                    }
                }
            }
        }
    }

    /// Returns the line to print now, if any. Summaries are queued instead.
    fn accept(&mut self, level: OutputLevel, prefix: &str, message: &str, at: DateTime<Utc>) -> Option<String> {
        if !level.visible_at(self.verbosity) {
            return None;
        }

        let line = render_line(at, prefix, message);
        if level == OutputLevel::Summary {
            self.pending_summaries.push_back(line);
            if self.pending_summaries.len() > MAX_PENDING_SUMMARIES {
                self.pending_summaries.pop_front();
            }
            return None;
        }

        Some(line)
    }

    fn flush_pending_summaries(&mut self) {
        if !self.pending_summaries.is_empty() {
            self.batches_printed += 1;
            println!("\n🎖️ === FLEET SUMMARY #{} ===", self.batches_printed);
            while let Some(summary) = self.pending_summaries.pop_front() {
                println!("{}", summary);
            }
            println!("🎖️ === END SUMMARY ===\n");
        }
    }
}

fn render_line(at: DateTime<Utc>, prefix: &str, message: &str) -> String {
    format!("{} {} {}", at.format("%Y-%m-%d %H:%M:%S"), prefix, message)
}

/// Broker handle bound to a prefix such as `🚀 SHIP-1`.
#[derive(Clone)]
pub struct Logger {
    broker: OutputBroker,
    prefix: Arc<str>,
}

impl Logger {
    pub fn log(&self, level: OutputLevel, message: String) {
        self.broker.submit(level, self.prefix.clone(), message);
    }
}

#[macro_export]
macro_rules! o_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::output_broker::OutputLevel::Error, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_summary {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::output_broker::OutputLevel::Summary, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::output_broker::OutputLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::output_broker::OutputLevel::Debug, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::output_broker::OutputLevel::Trace, format!($($arg)*))
    };
}
