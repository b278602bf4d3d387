//! Scripted in-memory provider for tests.
//!
//! Each operation has a FIFO of canned outcomes. When an operation's queue is
//! empty, response operations answer "unsupported" and thread creation
//! answers `{"id": "thread_stub"}`. Every call is recorded with its
//! serialized body.

use async_trait::async_trait;
use chatkit_types::protocol::{
    ResponseCreateRequest, ResponseObject, ThreadCreateRequest, ThreadObject,
};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

use super::openai::{OP_RESPONSE, OP_SESSION_RESPONSE, OP_THREAD_CREATE, OP_THREAD_RESPONSE};
use super::{ProviderCallError, ProviderCallResult, ProviderClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SessionResponse,
    CreateThread,
    ThreadResponse,
    Response,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::SessionResponse => OP_SESSION_RESPONSE,
            Self::CreateThread => OP_THREAD_CREATE,
            Self::ThreadResponse => OP_THREAD_RESPONSE,
            Self::Response => OP_RESPONSE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: Operation,
    /// Session id or thread id the call was bound to
    pub target: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<Operation, VecDeque<ProviderCallResult<Value>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for `operation`.
    pub fn respond(self, operation: Operation, outcome: ProviderCallResult<Value>) -> Self {
        self.scripts.lock().entry(operation).or_default().push_back(outcome);
        self
    }

    pub fn succeed(self, operation: Operation, body: Value) -> Self {
        self.respond(operation, Ok(body))
    }

    pub fn fail(self, operation: Operation, error: ProviderCallError) -> Self {
        self.respond(operation, Err(error))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, operation: Operation) -> Vec<RecordedCall> {
        self.calls.lock().iter().filter(|c| c.operation == operation).cloned().collect()
    }

    fn next<B, T>(&self, operation: Operation, target: Option<&str>, body: &B) -> ProviderCallResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.calls.lock().push(RecordedCall {
            operation,
            target: target.map(str::to_string),
            body: serde_json::to_value(body).unwrap_or(Value::Null),
        });

        let scripted = self.scripts.lock().get_mut(&operation).and_then(VecDeque::pop_front);
        let outcome = scripted.unwrap_or_else(|| match operation {
            Operation::CreateThread => Ok(json!({"id": "thread_stub"})),
            _ => Err(ProviderCallError::unsupported(operation.name())),
        });

        outcome.and_then(|value| {
            serde_json::from_value(value).map_err(|e| ProviderCallError::Decode(e.to_string()))
        })
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn create_session_response(
        &self,
        session_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        self.next(Operation::SessionResponse, Some(session_id), request)
    }

    async fn create_thread(&self, request: &ThreadCreateRequest) -> ProviderCallResult<ThreadObject> {
        self.next(Operation::CreateThread, Some(&request.session_id), request)
    }

    async fn create_thread_response(
        &self,
        thread_id: &str,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        self.next(Operation::ThreadResponse, Some(thread_id), request)
    }

    async fn create_response(
        &self,
        request: &ResponseCreateRequest,
    ) -> ProviderCallResult<ResponseObject> {
        self.next(Operation::Response, None, request)
    }
}
