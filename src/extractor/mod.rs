//! Site-specific price extraction.
//!
//! Each supported shop gets its own module with the selectors and text
//! normalization for its product page. Any missing node or unparseable
//! remainder is an error; no fallback price is ever produced.

pub mod ardes;
pub mod emag;
pub mod ozone;

use scraper::{ElementRef, Html, Selector};

use crate::models::SiteVariant;
use crate::utils::error::{AppError, Result};

/// Extract the current price from a product page.
pub fn extract(markup: &str, site: SiteVariant) -> Result<f64> {
    let document = Html::parse_document(markup);
    let root = document.root_element();

    let price = match site {
        SiteVariant::Emag => emag::extract(root)?,
        SiteVariant::Ozone => ozone::extract(root)?,
        SiteVariant::Ardes => ardes::extract(root)?,
    };

    tracing::debug!(%site, price, "Extracted price");
    Ok(price)
}

/// First element under `scope` matching `css`, if any.
fn find_first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = Selector::parse(css).map_err(|e| AppError::Parse {
        message: format!("invalid selector '{}': {}", css, e),
    })?;
    Ok(scope.select(&selector).next())
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    find_first(scope, css)?.ok_or_else(|| AppError::ElementNotFound {
        selector: css.to_string(),
    })
}

/// All descendant text, concatenated.
fn node_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn parse_price(raw: &str, normalized: &str) -> Result<f64> {
    match normalized.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(AppError::Parse {
            message: format!("cannot read a price from {:?}", raw),
        }),
    }
}
