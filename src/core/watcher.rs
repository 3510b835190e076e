use tracing::{error, info};

use crate::core::decision::{decide, Decision};
use crate::core::price_store::PriceStore;
use crate::extractor;
use crate::models::TrackedItem;
use crate::plugins::traits::{NotificationEvent, NotifierBox};
use crate::scraper::WebScraper;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub previous: Option<f64>,
    pub current: f64,
    pub decision: Decision,
    pub notified: bool,
}

pub struct PriceWatcher {
    scraper: WebScraper,
    store: PriceStore,
    notifier: NotifierBox,
}

impl PriceWatcher {
    pub fn new(scraper: WebScraper, store: PriceStore, notifier: NotifierBox) -> Self {
        Self {
            scraper,
            store,
            notifier,
        }
    }

    /// One full run: fetch, extract, compare, maybe notify, persist.
    pub async fn check(&self, item: &TrackedItem, boundary: Option<f64>) -> Result<CheckOutcome> {
        let markup = self.scraper.fetch(&item.url).await?;
        let current = extractor::extract(&markup, item.site)?;
        self.evaluate(item, current, boundary).await
    }

    /// Compare an already extracted price with the stored one. The new price
    /// is written whether or not a notification went out.
    pub async fn evaluate(
        &self,
        item: &TrackedItem,
        current: f64,
        boundary: Option<f64>,
    ) -> Result<CheckOutcome> {
        let previous = self.store.read(&item.id)?;
        let decision = decide(previous, current, boundary);

        match (decision, previous) {
            (Decision::FirstRun, _) => info!("First run, price {}", current),
            (Decision::Unchanged, _) => info!("Price {}", current),
            (_, Some(previous)) => info!("Price change: {} -> {}", previous, current),
            (_, None) => {}
        }

        if decision == Decision::SuppressedAboveBoundary {
            info!(?boundary, "Price still above boundary, not notifying");
        }

        let notified = if decision.should_notify() {
            let event = NotificationEvent::new(item, previous, current);
            match self.notifier.notify(&event).await {
                Ok(()) => {
                    info!("Sending email notification");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to send notification");
                    false
                }
            }
        } else {
            false
        };

        self.store.write(&item.id, current)?;

        Ok(CheckOutcome {
            previous,
            current,
            decision,
            notified,
        })
    }
}
