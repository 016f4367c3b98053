//! REST ability over a blocking HTTP client

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::blocking::{Client, Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use screenplay_actor::Ability;
use screenplay_core_types::{Result, ScreenplayError};
use tracing::debug;

const USER_AGENT: &str = concat!("screenplay/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One request and, when it completed, the status it got back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub method: String,
    pub url: String,
    pub status: Option<u16>,
}

/// Receives every exchange a [`CallRestApi`] performs.
pub trait Dumper: Send + Sync {
    fn dump(&self, exchange: &Exchange);
}

/// Keeps exchanges in memory for later inspection.
#[derive(Default)]
pub struct MemoryDumper {
    exchanges: Mutex<Vec<Exchange>>,
}

impl MemoryDumper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().clone()
    }

    pub fn clear(&self) {
        self.exchanges.lock().clear();
    }
}

impl Dumper for MemoryDumper {
    fn dump(&self, exchange: &Exchange) {
        self.exchanges.lock().push(exchange.clone());
    }
}

/// Lets an actor call a REST API rooted at a base URL.
pub struct CallRestApi {
    client: Client,
    base_url: String,
    dumper: Option<Arc<dyn Dumper>>,
}

impl CallRestApi {
    /// Builds a client with the default user agent and request timeout.
    pub fn at(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(ScreenplayError::interaction)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            dumper: None,
        }
    }

    pub fn dumping_to(mut self, dumper: Arc<dyn Dumper>) -> Self {
        self.dumper = Some(dumper);
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Sends `request`, handing the exchange to the dumper if one is set.
    pub fn execute(&self, request: Request) -> Result<Response> {
        let mut exchange = Exchange {
            method: request.method().to_string(),
            url: request.url().to_string(),
            status: None,
        };
        debug!(method = %exchange.method, url = %exchange.url, "sending request");
        let outcome = self.client.execute(request);
        if let Ok(response) = &outcome {
            exchange.status = Some(response.status().as_u16());
        }
        if let Some(dumper) = &self.dumper {
            dumper.dump(&exchange);
        }
        outcome.map_err(ScreenplayError::interaction)
    }

    /// GETs `path` and decodes a JSON body. Non-success statuses are errors.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self
            .client
            .get(self.url(path))
            .build()
            .map_err(ScreenplayError::interaction)?;
        self.execute(request)?
            .error_for_status()
            .map_err(ScreenplayError::interaction)?
            .json::<T>()
            .map_err(ScreenplayError::interaction)
    }
}

impl Ability for CallRestApi {}

impl fmt::Debug for CallRestApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRestApi")
            .field("base_url", &self.base_url)
            .field("dumping", &self.dumper.is_some())
            .finish()
    }
}
