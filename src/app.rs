use std::path::PathBuf;
use tracing::{error, info};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::core::{CheckOutcome, PriceStore, PriceWatcher};
use crate::models::TrackedItem;
use crate::plugins::notifiers::EmailNotifier;
use crate::scraper::WebScraper;
use crate::utils::error::Result;

/// A single invocation: one item, checked once.
pub struct App {
    config: AppConfig,
    item: TrackedItem,
    boundary: Option<f64>,
    store: PriceStore,
}

impl App {
    /// Load configuration from the environment, then [`App::with_config`].
    pub fn prepare(cli: Cli) -> Result<Self> {
        let config = AppConfig::load()?;
        Self::with_config(cli, config)
    }

    /// Resolve the item, apply command line overrides and make sure the
    /// item's directory exists. No network access happens here.
    pub fn with_config(cli: Cli, mut config: AppConfig) -> Result<Self> {
        let item = TrackedItem::new(cli.id, cli.url, cli.site)?;

        if let Some(email) = cli.email {
            config.notifications.smtp.recipient = Some(email);
        }

        let store = PriceStore::new(&config.storage);
        store.prepare(&item.id)?;

        Ok(Self {
            config,
            item,
            boundary: cli.boundary_price,
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn item(&self) -> &TrackedItem {
        &self.item
    }

    pub fn log_path(&self) -> PathBuf {
        self.store.log_path(&self.item.id)
    }

    pub async fn run(self) -> Result<CheckOutcome> {
        info!(item = %self.item.id, site = %self.item.site, url = %self.item.url, "Checking price");

        let scraper = WebScraper::new(&self.config.scraper)?;
        let notifier = Box::new(EmailNotifier::new(self.config.notifications.smtp.clone()));
        let watcher = PriceWatcher::new(scraper, self.store, notifier);

        watcher.check(&self.item, self.boundary).await
    }
}

/// Run a prepared invocation to completion. Failures are logged, never
/// returned: a scheduled run always ends normally.
pub async fn finish(prepared: Result<App>) -> Option<CheckOutcome> {
    let result = match prepared {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!(error = %e, "Price check failed");
            None
        }
    }
}
