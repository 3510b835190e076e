use clap::Parser;
use url::Url;

use crate::models::{validate_item_id, SiteVariant};

const SUPPORTED_SITES: &str = "Supported websites:
  - www.emag.bg
  - www.ozone.bg
  - www.ardes.bg";

/// Price tracker
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pricewatch", version, after_help = SUPPORTED_SITES)]
pub struct Cli {
    /// URL of the item to track
    #[arg(value_parser = parse_url)]
    pub url: Url,

    /// A string uniquely identifying the tracked item, in case there are multiple
    #[arg(value_parser = parse_item_id)]
    pub id: String,

    /// If set, notify only when the current price is below it; otherwise notify on every price change
    #[arg(value_parser = parse_boundary, allow_negative_numbers = true)]
    pub boundary_price: Option<f64>,

    /// Email address to send notifications to (defaults to RECIPIENT_EMAIL)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Read the page with this site's rules instead of guessing from the URL
    #[arg(long, value_enum)]
    pub site: Option<SiteVariant>,
}

fn parse_url(s: &str) -> Result<Url, String> {
    let url = Url::parse(s).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("unsupported scheme '{}'", scheme)),
    }
}

fn parse_item_id(s: &str) -> Result<String, String> {
    validate_item_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

fn parse_boundary(s: &str) -> Result<f64, String> {
    let boundary: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !boundary.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(boundary)
}
