//! Configuration model loaded from external sources.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::domain::resource::{Endpoints, ResourceKind};
use crate::domain::types::PageSize;

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_DASHBOARD_ENDPOINT: &str = "/dashboard/counts";

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by every list screen of the console.
pub struct ConsoleConfig {
    /// Base URL of the booking API, e.g. `https://api.example.com/api/v1/`.
    pub api_base_url: String,
    /// Quiet period after the last search keystroke before a fetch runs.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default)]
    pub page_size: PageSize,
    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_dashboard_endpoint")]
    pub dashboard_endpoint: String,
    /// Endpoint overrides for collections that do not follow `/<slug>`.
    #[serde(default)]
    pub endpoints: BTreeMap<ResourceKind, Endpoints>,
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_dashboard_endpoint() -> String {
    DEFAULT_DASHBOARD_ENDPOINT.to_string()
}

impl ConsoleConfig {
    /// Configuration with every optional setting at its default.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            page_size: PageSize::DEFAULT,
            request_timeout_secs: None,
            dashboard_endpoint: default_dashboard_endpoint(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Reads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// profile and `APP_*` environment variables, in that order. A `.env`
    /// file is the binary's business and must be loaded before this.
    pub fn load() -> Result<Self, ConfigError> {
        // Select config profile (defaults to `local`).
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Endpoints of `kind`: the configured override or `/<slug>`.
    pub fn endpoints(&self, kind: ResourceKind) -> Endpoints {
        self.endpoints
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_endpoints())
    }
}
