//! In-memory `ContentSource` for tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use super::graphql::GraphQlRequest;
use super::{ContentError, ContentSource};

enum Reply {
    Json(Value),
    Status(u16),
}

/// Answers every request with the same canned reply and records requests
pub struct StubSource {
    reply: Reply,
    requests: Mutex<Vec<Value>>,
}

impl StubSource {
    pub fn json(value: Value) -> Self {
        Self {
            reply: Reply::Json(value),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            reply: Reply::Status(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Request bodies received so far, as JSON
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, ContentError> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request)?);
        match &self.reply {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Status(code) => Err(ContentError::Status(*code)),
        }
    }

    fn describe(&self) -> &str {
        "stub"
    }
}

pub fn sample_essay_response(slug: &str) -> Value {
    json!({
        "data": {
            "getEssay": {
                "title": "Documentation",
                "slug": slug,
                "content": "Write *docs*.\n\n- first\n- second",
                "date": "2018-06-03T12:00:00Z",
                "description": "Why documentation matters"
            }
        }
    })
}
