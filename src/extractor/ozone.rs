use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

use super::{find_first, node_text, parse_price, select_first};
use crate::utils::error::Result;

const SPECIAL_PRICE: &str = "p.special-price";
const REGULAR_PRICE: &str = "span.regular-price";
const PRICE: &str = "span.price";

/// Width of the trailing currency suffix, e.g. ` лв.`
const CURRENCY_SUFFIX_CHARS: usize = 4;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Discounted price when present, otherwise the regular one.
pub fn extract(root: ElementRef<'_>) -> Result<f64> {
    let price_node = match find_first(root, SPECIAL_PRICE)? {
        Some(special) => select_first(special, PRICE)?,
        None => select_first(select_first(root, REGULAR_PRICE)?, PRICE)?,
    };
    let text = node_text(price_node);

    let without_currency = strip_currency_suffix(&text);
    let normalized = without_currency.trim().replace(',', ".");
    let normalized = WHITESPACE.replace_all(&normalized, "");

    parse_price(&text, &normalized)
}

fn strip_currency_suffix(text: &str) -> &str {
    // Counted in characters: the suffix is Cyrillic
    match text.char_indices().rev().nth(CURRENCY_SUFFIX_CHARS - 1) {
        Some((index, _)) => &text[..index],
        None => "",
    }
}
