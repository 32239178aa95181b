//! In-memory collaborators shared by the dispatch integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use booking_core::notification::NotificationPayload;
use booking_core::push::{PushError, PushSender};
use booking_core::recipient::{RecipientLookupResult, RecipientResolver, ResolverError};
use booking_core::types::Document;

/// Resolver over a fixed user table. `None` tokens model users without a
/// registered device.
#[derive(Default)]
pub struct FakeResolver {
    users: HashMap<String, Option<String>>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn with_user(mut self, id: &str, token: Option<&str>) -> Self {
        self.users.insert(id.to_string(), token.map(str::to_string));
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl RecipientResolver for FakeResolver {
    async fn lookup(&self, user_id: &str) -> Result<RecipientLookupResult, ResolverError> {
        self.lookups.lock().unwrap().push(user_id.to_string());
        Ok(match self.users.get(user_id) {
            Some(token) => RecipientLookupResult::found(token.clone()),
            None => RecipientLookupResult::not_found(),
        })
    }
}

/// A send captured by [`FakeSender`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub token: String,
    pub payload: NotificationPayload,
}

/// Sender that records every attempt and optionally rejects all of them.
#[derive(Default)]
pub struct FakeSender {
    sent: Mutex<Vec<SentMessage>>,
    reject: bool,
}

impl FakeSender {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushSender for FakeSender {
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, PushError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            token: token.to_string(),
            payload: payload.clone(),
        });
        if self.reject {
            return Err(PushError::Transport("connection reset".into()));
        }
        Ok(format!("projects/test/messages/{}", sent.len()))
    }
}

/// Build a document from a JSON object literal.
pub fn doc(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
