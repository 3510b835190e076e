use reqwest::Client;
use std::error::Error as StdError;
use std::io;
use tracing::{debug, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::utils::error::{AppError, Result};

pub struct WebScraper {
    client: Client,
    retry_on_tls_error: bool,
}

impl WebScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            retry_on_tls_error: config.retry_on_tls_error,
        })
    }

    /// Fetch the page body. A TLS failure on the first attempt gets exactly
    /// one more try; anything else is returned as is.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let result = match self.get(url).await {
            Err(e) if self.retry_on_tls_error && is_transient_tls(&e) => {
                warn!(error = %e, "TLS error fetching page, retrying once");
                self.get(url).await
            }
            other => other,
        };

        result.map_err(|source| AppError::Fetch {
            url: url.to_string(),
            source,
        })
    }

    async fn get(&self, url: &Url) -> std::result::Result<String, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            // The body may still carry the price; let extraction decide
            warn!(%status, %url, "Non-success status fetching page");
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// True when any error in the chain is a rustls failure, either directly or
/// wrapped in the `io::Error` the TLS stream reports it through.
pub fn is_transient_tls(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |&e| e.source()).any(|e| {
        if e.is::<rustls::Error>() {
            return true;
        }
        // io::Error::source skips the wrapped error, so look inside explicitly
        e.downcast_ref::<io::Error>()
            .and_then(|io_err| io_err.get_ref())
            .is_some_and(|inner| inner.is::<rustls::Error>())
    })
}
