//! Runtime configuration read from the environment.
//!
//! | Variable                    | Default                                             |
//! |-----------------------------|-----------------------------------------------------|
//! | `CART_API_URL`              | `https://course-api.com/react-useReducer-cart-project` |
//! | `CART_REQUEST_TIMEOUT_SECS` | `10`                                                |
//! | `CART_LOAD_WAIT_SECS`       | `15`                                                |
//! | `RUST_LOG`                  | `cart_store=debug,cart_store_runtime=info`          |
//!
//! Unset or unparsable values fall back to the default.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint the cart is loaded from unless overridden
pub const DEFAULT_API_URL: &str = "https://course-api.com/react-useReducer-cart-project";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOAD_WAIT_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "cart_store=debug,cart_store_runtime=info";

/// Cart runtime configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Cart items endpoint
    pub api_url: String,
    /// Per-request HTTP timeout, in seconds
    pub request_timeout_secs: u64,
    /// How long callers wait for a load to settle, in seconds
    pub load_wait_secs: u64,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl CartConfig {
    /// Reads the configuration from process environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: u64| {
            lookup(key)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            api_url: lookup("CART_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            request_timeout_secs: secs("CART_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            load_wait_secs: secs("CART_LOAD_WAIT_SECS", defaults.load_wait_secs),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Per-request HTTP timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Time allowed for a load to settle
    #[must_use]
    pub const fn load_wait(&self) -> Duration {
        Duration::from_secs(self.load_wait_secs)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            load_wait_secs: DEFAULT_LOAD_WAIT_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CartConfig::from_lookup(|_| None);
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.load_wait(), Duration::from_secs(15));
    }

    #[test]
    fn overrides_are_applied() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("CART_API_URL", "http://127.0.0.1:9000/cart"),
            ("CART_REQUEST_TIMEOUT_SECS", "3"),
            ("CART_LOAD_WAIT_SECS", " 7 "),
            ("RUST_LOG", "trace"),
        ]));

        assert_eq!(config.api_url, "http://127.0.0.1:9000/cart");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.load_wait_secs, 7);
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("CART_API_URL", "  "),
            ("CART_REQUEST_TIMEOUT_SECS", "soon"),
            ("CART_LOAD_WAIT_SECS", "-1"),
        ]));

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.load_wait_secs, 15);
    }
}
