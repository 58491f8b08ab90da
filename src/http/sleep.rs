//! Delay primitive
//!
//! Every suspension between retries and between pages goes through a
//! [`Sleeper`], so tests can swap in [`RecordingSleeper`] and run without
//! wall-clock waits.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Waits for a duration
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Resolve after `duration` has elapsed
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately and remembers every requested delay
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    calls: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn calls(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of delays requested so far
    pub fn count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
