//! Scripted transport double shared by client tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::future::LocalBoxFuture;

use super::http::{ApiRequest, ApiResponse, Transport, TransportError};

/// Returns queued outcomes in order and records every `(url, request)` sent.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    pub outcomes: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    pub sent: RefCell<Vec<(String, ApiRequest)>>,
    /// Runs while the request is "in flight", after injection.
    pub on_send: RefCell<Option<Box<dyn Fn()>>>,
}

impl ScriptedTransport {
    pub fn replying(outcome: Result<ApiResponse, TransportError>) -> Self {
        let transport = Self::default();
        transport.outcomes.borrow_mut().push_back(outcome);
        transport
    }

    pub fn then(self, outcome: Result<ApiResponse, TransportError>) -> Self {
        self.outcomes.borrow_mut().push_back(outcome);
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(url, _)| url.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        self.sent.borrow_mut().push((url, request));
        if let Some(hook) = self.on_send.borrow().as_ref() {
            hook();
        }
        let outcome = self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())));
        Box::pin(async move { outcome })
    }
}

pub(crate) fn reply(status: u16, body: &str) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse { status, body: body.to_owned() })
}
