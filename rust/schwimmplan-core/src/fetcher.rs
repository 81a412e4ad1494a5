use reqwest::Client;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{ScheduleError, ScheduleResult};

/// Downloads the schedule document bytes.
///
/// Any failure — timeout, connection error, HTTP error status — means "no
/// document available this cycle" to the caller.
#[derive(Debug)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new(config: &SourceConfig) -> ScheduleResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.document_timeout_secs))
            .build()
            .map_err(|e| {
                ScheduleError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Fetch the raw document at `url`.
    pub async fn fetch(&self, url: &str) -> ScheduleResult<Vec<u8>> {
        debug!(url = %url, "Downloading schedule document");

        let response = self.client.get(url).send().await?;
        let bytes = response.error_for_status()?.bytes().await?;

        debug!(bytes = bytes.len(), "Schedule document downloaded");
        Ok(bytes.to_vec())
    }
}
