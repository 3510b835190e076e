use async_trait::async_trait;

use crate::models::TrackedItem;
use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Increased,
    Decreased,
    Unchanged,
}

/// A price change worth telling someone about. Built per run, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub item_id: String,
    pub url: String,
    pub previous: Option<f64>,
    pub current: f64,
}

impl NotificationEvent {
    pub fn new(item: &TrackedItem, previous: Option<f64>, current: f64) -> Self {
        Self {
            item_id: item.id.clone(),
            url: item.url.to_string(),
            previous,
            current,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self.previous {
            Some(previous) if self.current > previous => ChangeType::Increased,
            Some(previous) if self.current < previous => ChangeType::Decreased,
            _ => ChangeType::Unchanged,
        }
    }

    pub fn formatted_previous(&self) -> String {
        self.previous
            .map(|price| price.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Delivery channel for price alerts (email, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &NotificationEvent) -> Result<(), AppError>;
}

pub type NotifierBox = Box<dyn Notifier>;
