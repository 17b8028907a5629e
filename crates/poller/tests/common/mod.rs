#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use hwbot_common::error::AppError;
use hwbot_notifier::MessageSender;
use hwbot_poller::client::HomeworkApi;

pub const CHAT_ID: &str = "42";

/// Canned reply of the fake status API.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Transport(&'static str),
    HttpStatus(u16),
}

impl Reply {
    fn into_result(self) -> Result<Value, AppError> {
        match self {
            Reply::Body(body) => Ok(body),
            Reply::Transport(msg) => Err(AppError::Transport(msg.to_string())),
            Reply::HttpStatus(code) => Err(AppError::HttpStatus(code)),
        }
    }
}

/// Replays scripted replies in order; the last one repeats forever.
#[derive(Clone)]
pub struct ScriptedApi {
    script: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<AtomicUsize>,
    since_seen: Arc<Mutex<Vec<i64>>>,
}

impl ScriptedApi {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
            since_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn since_seen(&self) -> Vec<i64> {
        self.since_seen.lock().unwrap().clone()
    }
}

impl HomeworkApi for ScriptedApi {
    async fn fetch(&self, since: i64) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.since_seen.lock().unwrap().push(since);

        let mut script = self.script.lock().unwrap();
        let reply = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        reply
            .expect("scripted API needs at least one reply")
            .into_result()
    }
}

/// Records every message instead of delivering it.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageSender for RecordingSender {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
        assert_eq!(chat_id, CHAT_ID);
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(AppError::NotificationSend("chat unavailable".into()));
        }
        Ok(())
    }
}

pub fn homeworks(name: &str, status: &str) -> Value {
    serde_json::json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": 1_700_000_000
    })
}
