//! Hand-written doubles for the controller's seams.

use crate::clipboard::Clipboard;
use crate::clock::Clock;
use crate::error::{ClipboardError, RemoteError};
use crate::models::{RelayLogs, RelayedRequest, RelayedResponse};
use crate::relay::Relay;
use crate::view::lock;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct FixedClock(pub &'static str);

impl Clock for FixedClock {
    fn time_of_day(&self) -> String {
        self.0.to_string()
    }
}

pub enum SendOutcome {
    Reply(RelayedResponse),
    Transport(String),
}

#[derive(Default)]
pub struct MockRelay {
    pub sent: Mutex<Vec<RelayedRequest>>,
    send_outcome: Mutex<Option<SendOutcome>>,
    log_batches: Mutex<VecDeque<Result<RelayLogs, String>>>,
    pub log_calls: Mutex<usize>,
}

impl MockRelay {
    pub fn replying(reply: RelayedResponse) -> Self {
        let relay = Self::default();
        *lock(&relay.send_outcome) = Some(SendOutcome::Reply(reply));
        relay
    }

    pub fn failing(message: &str) -> Self {
        let relay = Self::default();
        *lock(&relay.send_outcome) = Some(SendOutcome::Transport(message.to_string()));
        relay
    }

    pub fn queue_logs(&self, batch: Result<Vec<&str>, &str>) {
        let batch = batch
            .map(|lines| RelayLogs {
                logs: lines.into_iter().map(str::to_string).collect(),
            })
            .map_err(str::to_string);
        lock(&self.log_batches).push_back(batch);
    }

    pub fn sent_count(&self) -> usize {
        lock(&self.sent).len()
    }
}

#[async_trait]
impl Relay for MockRelay {
    async fn send(&self, request: &RelayedRequest) -> Result<RelayedResponse, RemoteError> {
        lock(&self.sent).push(request.clone());
        match &*lock(&self.send_outcome) {
            Some(SendOutcome::Reply(reply)) => Ok(reply.clone()),
            Some(SendOutcome::Transport(message)) => Err(RemoteError::Transport(message.clone())),
            None => Err(RemoteError::Transport("no reply configured".to_string())),
        }
    }

    async fn logs(&self) -> Result<RelayLogs, RemoteError> {
        *lock(&self.log_calls) += 1;
        match lock(&self.log_batches).pop_front() {
            Some(Ok(logs)) => Ok(logs),
            Some(Err(message)) => Err(RemoteError::Transport(message)),
            None => Ok(RelayLogs::default()),
        }
    }
}

pub struct RecordingClipboard {
    primary_ok: bool,
    fallback_ok: bool,
    pub primary: Mutex<Vec<String>>,
    pub fallback: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new(primary_ok: bool, fallback_ok: bool) -> Self {
        Self {
            primary_ok,
            fallback_ok,
            primary: Mutex::new(Vec::new()),
            fallback: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.primary_ok {
            return Err(ClipboardError::Unavailable("permission denied".to_string()));
        }
        lock(&self.primary).push(text.to_string());
        Ok(())
    }

    fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.fallback_ok {
            return Err(ClipboardError::Unavailable("copy command rejected".to_string()));
        }
        lock(&self.fallback).push(text.to_string());
        Ok(())
    }
}
