use super::extract::{PricePosition, extract};
use super::fetch::PageFetcher;
use crate::core::cache::{KeyValueCache, QUOTE_TTL};
use crate::core::error::LookupError;
use crate::core::number::{Locale, normalize};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// URL slug for an asset name: `"Medieval Empires"` becomes `medieval-empires`.
pub fn asset_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Spot prices scraped from the asset's public page
pub struct CryptoPriceProvider {
    url_template: String,
    locale: Locale,
    ttl: Duration,
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn KeyValueCache>,
}

impl CryptoPriceProvider {
    pub fn new(
        url_template: &str,
        locale: Locale,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn KeyValueCache>,
    ) -> Self {
        CryptoPriceProvider {
            url_template: url_template.to_string(),
            locale,
            ttl: QUOTE_TTL,
            fetcher,
            cache,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[instrument(name = "CryptoPriceFetch", skip(self))]
    pub async fn fetch_price(&self, asset_name: &str) -> Result<Decimal, LookupError> {
        let slug = asset_slug(asset_name);
        if let Some(cached) = self.cache.get(&slug).await {
            match Decimal::from_str(&cached) {
                Ok(price) => return Ok(price),
                Err(e) => debug!("Ignoring unreadable cached price '{}': {}", cached, e),
            }
        }

        let url = self.url_template.replace("{slug}", &slug);
        let page = self.fetcher.fetch(&url).await?;
        let raw = extract(&page, PricePosition::CryptoPrice)?;
        let price = normalize(&raw, &self.locale)?;

        // Asset pages always carry a price, so nothing here means the markup moved
        if price.is_zero() {
            return Err(LookupError::ExtractionEmpty { target: url });
        }

        info!("Resolved {} price {}", slug, price);
        self.cache.put(&slug, &price.to_string(), self.ttl).await;
        Ok(price)
    }
}
