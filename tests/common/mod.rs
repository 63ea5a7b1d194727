#![allow(dead_code)]

use async_trait::async_trait;
use cortex_list::{HttpReply, HttpTransport, LookupError};
use std::collections::HashMap;
use std::sync::Mutex;

pub const BASE: &str = "https://hive.test/api";

/// In-memory transport that answers from a fixed table and records every URL
/// it was asked for. Unscripted URLs answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Result<HttpReply, LookupError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, path: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            format!("{}{}", BASE, path),
            Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.replies.insert(
            format!("{}{}", BASE, path),
            Err(LookupError::Transport(message.to_string())),
        );
        self
    }

    /// Requested paths, relative to [`BASE`], in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.trim_start_matches(BASE).to_string())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, LookupError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.replies.get(url).cloned().unwrap_or_else(|| {
            Ok(HttpReply {
                status: 404,
                body: "Not Found".to_string(),
            })
        })
    }
}

pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}
