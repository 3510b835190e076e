use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::utils::error::{AppError, Result};

/// Last known price per item, one plain-text file each:
/// `<items_dir>/<current_dir>/<item_id>/<price_file>`.
#[derive(Debug, Clone)]
pub struct PriceStore {
    root: PathBuf,
    price_file: String,
    log_file: String,
}

impl PriceStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: config.items_dir.join(&config.current_dir),
            price_file: config.price_file.clone(),
            log_file: config.log_file.clone(),
        }
    }

    pub fn item_dir(&self, item_id: &str) -> PathBuf {
        self.root.join(item_id)
    }

    pub fn record_path(&self, item_id: &str) -> PathBuf {
        self.item_dir(item_id).join(&self.price_file)
    }

    pub fn log_path(&self, item_id: &str) -> PathBuf {
        self.item_dir(item_id).join(&self.log_file)
    }

    /// Create the item directory and an empty record if they are missing.
    pub fn prepare(&self, item_id: &str) -> Result<PathBuf> {
        let dir = self.item_dir(item_id);
        fs::create_dir_all(&dir).map_err(|source| store_error(&dir, source))?;

        let record = self.record_path(item_id);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&record)
            .map_err(|source| store_error(&record, source))?;

        Ok(dir)
    }

    /// `None` until a price has been written for the item.
    pub fn read(&self, item_id: &str) -> Result<Option<f64>> {
        let path = self.record_path(item_id);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(store_error(&path, source)),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match trimmed.parse::<f64>() {
            Ok(price) if price.is_finite() => Ok(Some(price)),
            _ => Err(AppError::CorruptRecord {
                path,
                content: trimmed.to_string(),
            }),
        }
    }

    /// Replace the stored price. The item directory must already exist.
    pub fn write(&self, item_id: &str, price: f64) -> Result<()> {
        let path = self.record_path(item_id);
        fs::write(&path, price.to_string()).map_err(|source| store_error(&path, source))
    }
}

fn store_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::Store {
        path: path.to_path_buf(),
        source,
    }
}
