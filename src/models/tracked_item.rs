use clap::ValueEnum;
use std::fmt;
use url::Url;

use crate::utils::error::AppError;

/// Shops whose product pages we know how to read a price from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SiteVariant {
    Emag,
    Ozone,
    Ardes,
}

impl SiteVariant {
    pub const ALL: [SiteVariant; 3] = [SiteVariant::Emag, SiteVariant::Ozone, SiteVariant::Ardes];

    pub fn domain(&self) -> &'static str {
        match self {
            SiteVariant::Emag => "emag.bg",
            SiteVariant::Ozone => "ozone.bg",
            SiteVariant::Ardes => "ardes.bg",
        }
    }

    /// Resolve the site from the URL host, accepting subdomains such as `www.`.
    pub fn from_url(url: &Url) -> Result<Self, AppError> {
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|site| {
                let domain = site.domain();
                host == domain || host.ends_with(&format!(".{}", domain))
            })
            .ok_or_else(|| AppError::UnsupportedSite {
                url: url.to_string(),
            })
    }
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItem {
    pub id: String,
    pub url: Url,
    pub site: SiteVariant,
}

impl TrackedItem {
    /// An explicit `site` wins over the one inferred from the URL.
    pub fn new(id: impl Into<String>, url: Url, site: Option<SiteVariant>) -> Result<Self, AppError> {
        let id = id.into();
        validate_item_id(&id)?;

        let site = match site {
            Some(site) => site,
            None => SiteVariant::from_url(&url)?,
        };

        Ok(Self { id, url, site })
    }
}

/// Item ids become directory names, so they must stay a single path component.
pub fn validate_item_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Argument("item id must not be empty".to_string()));
    }

    if id == "." || id == ".." {
        return Err(AppError::Argument(format!("item id '{}' is reserved", id)));
    }

    if id.contains(['/', '\\', '\0']) {
        return Err(AppError::Argument(format!(
            "item id '{}' must not contain path separators",
            id
        )));
    }

    Ok(())
}
