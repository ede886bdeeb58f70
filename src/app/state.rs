use std::sync::Arc;
use std::time::Duration;

use crate::adapter::HoneycombSink;
use crate::config::Settings;
use crate::error::RelayError;
use crate::port::EventSink;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared application state holding the sink client.
pub struct AppState {
    pub sink: Arc<dyn EventSink>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Builds the single HTTP client shared by every request-handling task;
    /// the sink client is the only state that outlives a request.
    pub fn from_settings(settings: &Settings) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RelayError::SinkInit(e.to_string()))?;

        let sink: Arc<dyn EventSink> = Arc::new(HoneycombSink::new(
            client,
            &settings.api_host,
            settings.api_key.clone(),
            &settings.dataset,
        ));

        Ok(Self { sink })
    }
}
