//! Shared helpers for the facade integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use idp_facade::domain::ports::{IdentityProvider, IdentityProviderError, ProviderOperation};
use serde_json::Value;

/// In-memory provider that replays scripted replies in order and records
/// every call it receives.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Value, IdentityProviderError>>>,
    calls: Mutex<Vec<(ProviderOperation, Value)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn reply(&self, body: Value) {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(Ok(body));
    }

    /// Queue a provider failure.
    pub fn fail(&self, error: IdentityProviderError) {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(Err(error));
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<(ProviderOperation, Value)> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Payload of the most recent call.
    pub fn last_payload(&self) -> Value {
        self.calls()
            .pop()
            .map(|(_, payload)| payload)
            .expect("at least one call recorded")
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn call(
        &self,
        operation: ProviderOperation,
        payload: Value,
    ) -> Result<Value, IdentityProviderError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push((operation, payload));
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(IdentityProviderError::invalid_request(format!(
                    "no scripted reply for {operation}"
                )))
            })
    }
}
