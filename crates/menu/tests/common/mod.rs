#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`MockDispatcher`] stands in for the API collaborator: it records every
//! call and answers with a canned body or failure.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use storefront_menu::{ApiCall, ApiDispatcher, ApiError, ApiResponse, MenuModule, StoreOptions};
use storefront_menu_test_utils::{TestCategory, category_list_body};

/// Canned dispatcher reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Fail(String),
}

/// Dispatcher that records calls and returns a fixed reply.
#[derive(Debug)]
pub struct MockDispatcher {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockDispatcher {
    pub fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Dispatcher answering with a category listing.
    pub fn with_categories(categories: &[TestCategory]) -> Arc<Self> {
        Self::replying(Reply::Body(category_list_body(categories)))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::replying(Reply::Fail(message.to_string()))
    }

    /// Change the reply for subsequent calls.
    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock() = reply;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ApiDispatcher for MockDispatcher {
    async fn call(&self, request: ApiCall) -> Result<ApiResponse, ApiError> {
        self.calls.lock().push(request);
        let reply = self.reply.lock().clone();
        match reply {
            Reply::Body(data) => Ok(ApiResponse { data }),
            Reply::Fail(message) => Err(ApiError::Other(message)),
        }
    }
}

/// Build a module over a mock dispatcher.
pub fn module_with(dispatcher: &Arc<MockDispatcher>, options: StoreOptions) -> MenuModule {
    MenuModule::new(dispatcher.clone(), options)
}
