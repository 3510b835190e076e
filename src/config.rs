use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub scraper: ScraperConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub items_dir: PathBuf,
    pub current_dir: String,
    pub price_file: String,
    pub log_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub retry_on_tls_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: Option<String>,
    pub from_name: String,
    pub recipient: Option<String>,
    pub use_tls: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                items_dir: PathBuf::from("items"),
                current_dir: "current".to_string(),
                price_file: "current_price.txt".to_string(),
                log_file: "log.log".to_string(),
            },
            scraper: ScraperConfig {
                user_agent: concat!("pricewatch/", env!("CARGO_PKG_VERSION")).to_string(),
                retry_on_tls_error: true,
            },
            notifications: NotificationsConfig {
                smtp: SmtpConfig {
                    host: "smtp.gmail.com".to_string(),
                    port: 465,
                    username: None,
                    password: None,
                    from_address: None,
                    from_name: "Price Tracker".to_string(),
                    recipient: None,
                    use_tls: true,
                },
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        let s = Self::defaults()?
            // Optional local config file
            .add_source(File::with_name("pricewatch").required(false))
            // Add environment variables with prefix "PRICEWATCH__"
            .add_source(Environment::with_prefix("PRICEWATCH").separator("__"))
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;

        // Plain variables used by existing cron setups
        let smtp = &mut config.notifications.smtp;
        if smtp.username.is_none() {
            smtp.username = env::var("SENDER_EMAIL").ok();
        }
        if smtp.from_address.is_none() {
            smtp.from_address = env::var("SENDER_EMAIL").ok();
        }
        if smtp.password.is_none() {
            smtp.password = env::var("EMAIL_PASSWORD").ok();
        }
        if smtp.recipient.is_none() {
            smtp.recipient = env::var("RECIPIENT_EMAIL").ok();
        }

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let d = AppConfig::default();

        Config::builder()
            .set_default("storage.items_dir", d.storage.items_dir.to_string_lossy().into_owned())?
            .set_default("storage.current_dir", d.storage.current_dir)?
            .set_default("storage.price_file", d.storage.price_file)?
            .set_default("storage.log_file", d.storage.log_file)?
            .set_default("scraper.user_agent", d.scraper.user_agent)?
            .set_default("scraper.retry_on_tls_error", d.scraper.retry_on_tls_error)?
            .set_default("notifications.smtp.host", d.notifications.smtp.host)?
            .set_default("notifications.smtp.port", i64::from(d.notifications.smtp.port))?
            .set_default("notifications.smtp.from_name", d.notifications.smtp.from_name)?
            .set_default("notifications.smtp.use_tls", d.notifications.smtp.use_tls)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.items_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message("storage.items_dir must not be empty".into()));
        }

        if self.storage.price_file.is_empty() || self.storage.log_file.is_empty() {
            return Err(ConfigError::Message("storage file names must not be empty".into()));
        }

        if self.storage.price_file == self.storage.log_file {
            return Err(ConfigError::Message("storage.price_file and storage.log_file must differ".into()));
        }

        if self.scraper.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("scraper.user_agent must not be empty".into()));
        }

        if self.notifications.smtp.port == 0 {
            return Err(ConfigError::Message("SMTP port must be greater than 0".into()));
        }

        if self.notifications.smtp.host.trim().is_empty() {
            return Err(ConfigError::Message("SMTP host must not be empty".into()));
        }

        Ok(())
    }
}
