//! Mock cart client for testing.

use crate::{environment::CartClient, error::CartError, types::CartItem};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// One scripted answer from [`MockCartClient`]
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Succeed with these items
    Items(Vec<CartItem>),
    /// Fail as if the endpoint returned this status
    Status(u16),
    /// Fail as if the connection broke
    NetworkFailure,
}

impl MockResponse {
    fn into_result(self) -> Result<Vec<CartItem>, CartError> {
        match self {
            Self::Items(items) => Ok(items),
            Self::Status(status) => Err(CartError::Status { status }),
            Self::NetworkFailure => Err(CartError::Request("connection reset".to_string())),
        }
    }
}

#[derive(Debug)]
struct Step {
    response: MockResponse,
    delay: Option<Duration>,
}

/// Mock cart client.
///
/// Answers fetches from a script, in order. The last step repeats once the
/// script runs out; an empty script answers with an empty cart.
#[derive(Clone, Debug, Default)]
pub struct MockCartClient {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl MockCartClient {
    /// Create a mock with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that always returns `items`
    #[must_use]
    pub fn with_items(items: Vec<CartItem>) -> Self {
        Self::new().then(MockResponse::Items(items))
    }

    /// Create a mock that always fails with `status`
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self::new().then(MockResponse::Status(status))
    }

    /// Append a step answered immediately
    #[must_use]
    pub fn then(self, response: MockResponse) -> Self {
        self.push(response, None);
        self
    }

    /// Append a step answered after `delay`
    #[must_use]
    pub fn then_after(self, delay: Duration, response: MockResponse) -> Self {
        self.push(response, Some(delay));
        self
    }

    /// Number of fetches made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, response: MockResponse, delay: Option<Duration>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Step { response, delay });
    }

    fn next_step(&self) -> (MockResponse, Option<Duration>) {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        let step = if script.len() > 1 {
            script.pop_front()
        } else {
            None
        };

        match step {
            Some(step) => (step.response, step.delay),
            None => script.front().map_or((MockResponse::Items(Vec::new()), None), |step| {
                (step.response.clone(), step.delay)
            }),
        }
    }
}

impl CartClient for MockCartClient {
    fn fetch_cart_items(&self) -> BoxFuture<'_, Result<Vec<CartItem>, CartError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (response, delay) = self.next_step();

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response.into_result()
        })
    }
}
