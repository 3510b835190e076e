// Integration tests for pricewatch
// These tests run full price checks against a local HTTP server

pub mod app_tests;

use async_trait::async_trait;
use pricewatch::{
    config::AppConfig,
    core::{PriceStore, PriceWatcher},
    models::{SiteVariant, TrackedItem},
    plugins::traits::{NotificationEvent, Notifier},
    scraper::WebScraper,
    AppError,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PRODUCT_PATH: &str = "/product";

/// Notifier that remembers every event instead of sending it
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &NotificationEvent) -> Result<(), AppError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            return Err(AppError::Notify("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Everything a test needs for one tracked item
pub struct TestHarness {
    pub server: MockServer,
    pub store: PriceStore,
    pub notifier: RecordingNotifier,
    pub watcher: PriceWatcher,
    pub item: TrackedItem,
    _dir: TempDir,
}

impl TestHarness {
    pub async fn new(site: SiteVariant) -> anyhow::Result<Self> {
        Self::with_notifier(site, RecordingNotifier::default()).await
    }

    pub async fn with_notifier(site: SiteVariant, notifier: RecordingNotifier) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let server = MockServer::start().await;

        let mut config = AppConfig::default();
        config.storage.items_dir = dir.path().join("items");

        let store = PriceStore::new(&config.storage);
        let item = TrackedItem::new(
            "test-item",
            Url::parse(&format!("{}{}", server.uri(), PRODUCT_PATH))?,
            Some(site),
        )?;
        store.prepare(&item.id)?;

        let scraper = WebScraper::new(&config.scraper)?;
        let watcher = PriceWatcher::new(scraper, store.clone(), Box::new(notifier.clone()));

        Ok(Self {
            server,
            store,
            notifier,
            watcher,
            item,
            _dir: dir,
        })
    }

    /// Serve `body` as the product page, replacing any earlier page
    pub async fn serve_page(&self, body: String) {
        self.server.reset().await;
        Mock::given(method("GET"))
            .and(path(PRODUCT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}

pub fn emag_page(price_text: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
        <div class="product-page-pricing">
            <p class="product-old-price"><s>2.499,00 лв.</s></p>
            <p class="product-new-price">{}</p>
        </div></body></html>"#,
        price_text
    )
}

pub fn ozone_page(special: Option<&str>, regular: &str) -> String {
    let special = special
        .map(|price| format!(r#"<p class="special-price"><span class="price">{}</span></p>"#, price))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html><body><div class="price-box">
        {}
        <span class="regular-price"><span class="price">{}</span></span>
        </div></body></html>"#,
        special, regular
    )
}

pub fn ardes_page(price_text: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
        <div id="price-tag"><span class="full-price">{}</span></div>
        </body></html>"#,
        price_text
    )
}
