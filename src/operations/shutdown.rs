// Shutdown contract between the process and the dispatcher
use tokio::sync::oneshot;

/// Acknowledgment sent once the dispatcher has stopped and every in-flight
/// action has come home. `reported + parked + failed` covers the whole fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Ships that finished their last action and reported back
    pub reported: usize,
    /// Ships held without an action because their role has no behavior
    pub parked: usize,
    /// Ships lost to a panicked task
    pub failed: usize,
}

type Ack = oneshot::Sender<DrainReport>;

pub struct ShutdownHandle {
    request: oneshot::Sender<Ack>,
}

pub struct ShutdownSignal {
    request: Option<oneshot::Receiver<Ack>>,
}

pub fn channel() -> (ShutdownHandle, ShutdownSignal) {
    let (request, receiver) = oneshot::channel();
    (
        ShutdownHandle { request },
        ShutdownSignal {
            request: Some(receiver),
        },
    )
}

impl ShutdownHandle {
    /// Stop dispatching and wait for the drain. `None` if the dispatcher
    /// already exited.
    pub async fn shutdown(self) -> Option<DrainReport> {
        let (ack, drained) = oneshot::channel();
        self.request.send(ack).ok()?;
        drained.await.ok()
    }
}

impl ShutdownSignal {
    /// A signal nobody can trigger.
    pub fn never() -> Self {
        Self { request: None }
    }

    /// Resolves when shutdown is requested. Pends forever once the handle is
    /// dropped without requesting.
    pub(crate) async fn requested(&mut self) -> Ack {
        if let Some(receiver) = self.request.as_mut() {
            let outcome = receiver.await;
            self.request = None;
            if let Ok(ack) = outcome {
                return ack;
            }
        }
        std::future::pending().await
    }
}
