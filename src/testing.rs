//! Scripted transport shared by the unit tests

use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted transport outcome
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this body
    Json(JsonValue),
    /// Fail with this HTTP status
    Status(u16),
    /// Respond with this body after a delay
    Slow(Duration, JsonValue),
}

/// Transport replaying a script, then repeating `fallback`
#[derive(Debug, Clone)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Reply>>>,
    fallback: Reply,
    urls: Arc<Mutex<Vec<String>>>,
    late_completion: Arc<AtomicBool>,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            fallback: Reply::Json(JsonValue::Array(Vec::new())),
            urls: Arc::new(Mutex::new(Vec::new())),
            late_completion: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Transport failing every call with `status`
    pub fn failing(status: u16) -> Self {
        Self::new([]).with_fallback(Reply::Status(status))
    }

    pub fn with_fallback(mut self, fallback: Reply) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    /// Whether a slow reply ever ran to completion
    pub fn completed_late(&self) -> bool {
        self.late_completion.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<JsonValue> {
        self.urls.lock().unwrap().push(url.to_string());
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Json(body) => Ok(body),
            Reply::Status(status) => Err(Error::http_status(status, "scripted failure")),
            Reply::Slow(delay, body) => {
                tokio::time::sleep(delay).await;
                self.late_completion.store(true, Ordering::SeqCst);
                Ok(body)
            }
        }
    }
}
