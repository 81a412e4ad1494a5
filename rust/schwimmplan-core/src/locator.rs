use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::error::{ScheduleError, ScheduleResult};

/// Discovers the URL of the current schedule document.
///
/// The overview page links the PDF as
/// `href="<base_url>/_files/ugd/<name>.pdf"`; the first match wins. The
/// discovery fetch carries its own timeout, shorter than the document
/// fetch.
#[derive(Debug)]
pub struct DocumentLocator {
    client: Client,
    base_url: String,
    link_pattern: Regex,
}

impl DocumentLocator {
    pub fn new(config: &SourceConfig) -> ScheduleResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.discovery_timeout_secs))
            .build()
            .map_err(|e| {
                ScheduleError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let link_pattern = Regex::new(&format!(
            r#"href="({}/_files/ugd/.+?\.pdf)""#,
            regex::escape(&base_url)
        ))
        .map_err(|e| ScheduleError::Configuration(format!("Invalid link pattern: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            link_pattern,
        })
    }

    /// Fetch the overview page and return the first schedule document link.
    pub async fn discover(&self) -> ScheduleResult<String> {
        debug!(url = %self.base_url, "Fetching overview page");

        let response = self.client.get(&self.base_url).send().await?;
        let body = response.error_for_status()?.text().await?;

        match self.find_link(&body) {
            Some(url) => {
                debug!(url = %url, "Schedule document link found");
                Ok(url)
            }
            None => {
                warn!(page = %self.base_url, "No schedule document link on overview page");
                Err(ScheduleError::LinkNotFound {
                    page: self.base_url.clone(),
                })
            }
        }
    }

    /// First schedule document link in a page body, if any.
    fn find_link(&self, body: &str) -> Option<String> {
        self.link_pattern
            .captures(body)
            .map(|caps| caps[1].to_string())
    }
}
