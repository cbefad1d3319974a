use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::source::Source;
use crate::config::Endpoints;
use crate::error::{Error, Result};

/// Blocking HTTP client for the planet and campaign endpoints
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hd2-planets-to-sqlite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::Transport {
                url: "<client setup>".to_string(),
                source,
            })?;
        Ok(Self { client, endpoints })
    }

    /// GET a document; anything other than 200 OK is a fetch failure
    pub fn fetch(&self, url: &str) -> Result<String> {
        let transport = |source: reqwest::Error| Error::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().map_err(transport)?;
        log::debug!("GET {} -> {}", url, format_bytes(text.len() as u64));
        Ok(text)
    }
}

impl Source for ApiClient {
    fn fetch_planets(&self) -> Result<String> {
        self.fetch(&self.endpoints.planets)
    }

    fn fetch_campaigns(&self) -> Result<String> {
        self.fetch(&self.endpoints.campaigns)
    }

    fn describe(&self) -> String {
        self.endpoints.planets.clone()
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}
