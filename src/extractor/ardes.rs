use scraper::ElementRef;

use super::{node_text, parse_price, select_first};
use crate::utils::error::{AppError, Result};

const FULL_PRICE: &str = "span.full-price";

pub fn extract(root: ElementRef<'_>) -> Result<f64> {
    let text = node_text(select_first(root, FULL_PRICE)?);

    let token = text.split_whitespace().next().ok_or_else(|| AppError::Parse {
        message: format!("empty price text in {}", FULL_PRICE),
    })?;

    parse_price(&text, token)
}
