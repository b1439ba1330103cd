//! Cancellation and deadlines for a single API call

use crate::error::{CraasError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Bounds one call in time and lets another task abort it.
///
/// A context without deadline or cancel handle never fires. Contexts are cheap
/// to clone; clones share the same cancel signal.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Option<watch::Receiver<bool>>,
}

/// Aborts every call running under the context it was created with
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    pub fn background() -> Self {
        Self::default()
    }

    /// Fire after `timeout`, or earlier if an existing deadline is sooner
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The error this context would fail a call with right now, if any
    pub fn err(&self) -> Option<CraasError> {
        if self.cancelled.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(CraasError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(CraasError::DeadlineExceeded);
        }
        None
    }

    /// Drive `fut` until it completes or the context fires
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        tokio::select! {
            biased;
            _ = wait_cancelled(self.cancelled.clone()) => Err(CraasError::Cancelled),
            _ = wait_deadline(self.deadline) => Err(CraasError::DeadlineExceeded),
            result = fut => result,
        }
    }
}

async fn wait_cancelled(receiver: Option<watch::Receiver<bool>>) {
    match receiver {
        Some(mut rx) => {
            // A dropped handle can never cancel.
            if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending().await,
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
