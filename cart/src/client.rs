//! HTTP client for the cart items endpoint

use crate::{config::CartConfig, environment::CartClient, error::CartError, types::CartItem};
use futures::future::BoxFuture;
use reqwest::Client;

/// Loads cart items with a single `GET` against a JSON endpoint
///
/// The endpoint must answer with a JSON array of items.
#[derive(Clone, Debug)]
pub struct HttpCartClient {
    client: Client,
    url: String,
}

impl HttpCartClient {
    /// Create a client for `url` with reqwest's default settings
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Create a client from configuration, applying the request timeout
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Request`] if the HTTP client cannot be built.
    pub fn from_config(config: &CartConfig) -> Result<Self, CartError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CartError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }

    /// The endpoint this client reads from
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the cart items
    ///
    /// # Errors
    ///
    /// - [`CartError::Request`]: the request could not be completed
    /// - [`CartError::Status`]: the endpoint answered with a non-2xx status
    /// - [`CartError::Decode`]: the body was not a list of items
    pub async fn get_items(&self) -> Result<Vec<CartItem>, CartError> {
        tracing::debug!(url = %self.url, "Fetching cart items");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CartError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<CartItem>>()
            .await
            .map_err(|e| CartError::Decode(e.to_string()))
    }
}

impl CartClient for HttpCartClient {
    fn fetch_cart_items(&self) -> BoxFuture<'_, Result<Vec<CartItem>, CartError>> {
        Box::pin(self.get_items())
    }
}
