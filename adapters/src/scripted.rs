//! In-memory transport with canned replies.
//!
//! This file contains the second implementation of the `Transport` trait. It
//! answers from a table keyed by method and path, records every request it
//! receives, and can hold replies behind a [`Gate`] so callers can observe what
//! happens while a request is still in flight. Paths without a scripted reply
//! answer `404` the way the real service does, and stalled paths never answer.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::{
    errors::GatewayError,
    models::{ApiRequest, ApiResponse, Method},
    Transport,
};

#[derive(Debug, Clone)]
enum Reply {
    Respond { status: u16, body: Value },
    Unreachable,
    Stalled,
}

/// Holds scripted replies until opened. Once open it stays open.
#[derive(Debug, Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
}

impl Gate {
    fn closed() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    pub fn open(&self) {
        self.permits.add_permits(1);
    }

    async fn pass(&self) {
        // A closed semaphore means the gate was torn down; let the request through.
        let _ = self.permits.acquire().await;
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    calls: Mutex<Vec<ApiRequest>>,
    gate: Option<Gate>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to `method path` with `status` and a JSON body.
    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.set(method, path, Reply::Respond { status, body });
        self
    }

    /// Fails `method path` at the transport level, as if the server were down.
    pub fn unreachable(self, method: Method, path: &str) -> Self {
        self.set(method, path, Reply::Unreachable);
        self
    }

    /// Never answers `method path`, like a server that accepted the connection and hung.
    pub fn stalled(self, method: Method, path: &str) -> Self {
        self.set(method, path, Reply::Stalled);
        self
    }

    /// Replaces the reply for a path on a shared transport, e.g. to expire a session mid-test.
    pub fn set_reply(&self, method: Method, path: &str, status: u16, body: Value) {
        self.set(method, path, Reply::Respond { status, body });
    }

    /// Installs a closed gate and returns a handle to open it.
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::closed();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn set(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_string()), reply);
    }

    fn reply_for(&self, request: &ApiRequest) -> Option<Reply> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(request.method, request.path.clone()))
            .cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(gate) = &self.gate {
            gate.pass().await;
        }

        match self.reply_for(&request) {
            Some(Reply::Respond { status, body }) if (200..300).contains(&status) => {
                Ok(ApiResponse { status, body })
            }
            Some(Reply::Respond { status, body }) => Err(GatewayError::Status {
                path: request.path,
                status,
                body,
            }),
            Some(Reply::Unreachable) => Err(GatewayError::Transport {
                path: request.path,
                reason: "connection refused".to_string(),
            }),
            Some(Reply::Stalled) => std::future::pending().await,
            None => Err(GatewayError::Status {
                path: request.path,
                status: 404,
                body: json!({"detail": "Not Found"}),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unscripted_paths_answer_not_found() {
        let transport = ScriptedTransport::new();
        let err = transport
            .send(ApiRequest::new(Method::Get, "/nowhere"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn replies_are_keyed_by_method() {
        let transport = ScriptedTransport::new().on(Method::Post, "/logout", 200, json!({}));
        assert!(transport.send(ApiRequest::new(Method::Post, "/logout")).await.is_ok());
        assert!(transport.send(ApiRequest::new(Method::Get, "/logout")).await.is_err());
        assert_eq!(transport.count(Method::Post, "/logout"), 1);
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn gate_holds_replies_until_opened() {
        let (transport, gate) = ScriptedTransport::new()
            .on(Method::Get, "/me", 200, json!({"username": "asha"}))
            .gated();
        let transport = Arc::new(transport);

        let pending = tokio::spawn({
            let transport = transport.clone();
            async move { transport.send(ApiRequest::new(Method::Get, "/me")).await }
        });

        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        gate.open();
        let response = pending.await.unwrap().unwrap();
        assert_eq!(response.body["username"], "asha");
    }

    #[tokio::test]
    async fn stalled_paths_never_answer() {
        let transport = ScriptedTransport::new().stalled(Method::Get, "/me");

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            transport.send(ApiRequest::new(Method::Get, "/me")),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(transport.count(Method::Get, "/me"), 1);
    }
}
