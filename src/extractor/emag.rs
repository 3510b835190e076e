use scraper::ElementRef;

use super::{node_text, parse_price, select_first};
use crate::utils::error::{AppError, Result};

const PRICE: &str = "p.product-new-price";

/// `1.299,99 лв.` -> 1299.99
pub fn extract(root: ElementRef<'_>) -> Result<f64> {
    let text = node_text(select_first(root, PRICE)?);

    let token = text.split_whitespace().next().ok_or_else(|| AppError::Parse {
        message: format!("empty price text in {}", PRICE),
    })?;
    let normalized = token.replace('.', "").replace(',', ".");

    parse_price(&text, &normalized)
}
