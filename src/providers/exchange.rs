//! Exchange rates from the central bank's daily rate table
//!
//! The table is only published on business days, and on market holidays the
//! page exists but the rate cells are empty. A lookup therefore starts at the
//! last business day on or before the requested date and walks back one
//! calendar day at a time until a non-zero rate turns up.

use super::extract::{PricePosition, extract};
use super::fetch::PageFetcher;
use crate::core::cache::{KeyValueCache, QUOTE_TTL};
use crate::core::currency::Currency;
use crate::core::date;
use crate::core::error::LookupError;
use crate::core::number::{Locale, normalize};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 10;

pub struct RateResolver {
    url_template: String,
    locale: Locale,
    max_lookback_days: u32,
    ttl: Duration,
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn KeyValueCache>,
}

impl RateResolver {
    pub fn new(
        url_template: &str,
        locale: Locale,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn KeyValueCache>,
    ) -> Self {
        RateResolver {
            url_template: url_template.to_string(),
            locale,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
            ttl: QUOTE_TTL,
            fetcher,
            cache,
        }
    }

    /// Number of pages fetched before giving up. At least one is always fetched.
    pub fn with_max_lookback_days(mut self, days: u32) -> Self {
        self.max_lookback_days = days.max(1);
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Keyed by the date as requested, so repeated weekend lookups hit directly.
    pub fn cache_key(currency: Currency, requested: NaiveDate) -> String {
        format!("{}_{}", currency.code(), date::render(requested))
    }

    fn page_url(&self, day: NaiveDate) -> String {
        self.url_template.replace("{date}", &date::render(day))
    }

    async fn rate_on(&self, currency: Currency, day: NaiveDate) -> Result<Decimal, LookupError> {
        let page = self.fetcher.fetch(&self.page_url(day)).await?;
        let raw = extract(&page, PricePosition::RateColumn(currency))?;
        normalize(&raw, &self.locale)
    }

    /// Rate of `currency` on `requested`, or on the closest earlier day with a
    /// published rate.
    #[instrument(
        name = "ExchangeRateResolve",
        skip(self),
        fields(currency = %currency, date = %requested)
    )]
    pub async fn resolve(
        &self,
        currency: Currency,
        requested: NaiveDate,
    ) -> Result<Decimal, LookupError> {
        let key = Self::cache_key(currency, requested);
        if let Some(cached) = self.cache.get(&key).await {
            match Decimal::from_str(&cached) {
                Ok(rate) => return Ok(rate),
                Err(e) => debug!("Ignoring unreadable cached rate '{}': {}", cached, e),
            }
        }

        let no_recent_rate = |attempts| LookupError::NoRecentRate {
            currency: currency.code().to_string(),
            from: date::render(requested),
            attempts,
        };

        let mut day = date::last_business_day(requested).ok_or_else(|| no_recent_rate(0))?;
        let mut attempts = 0;
        let rate = loop {
            if attempts == self.max_lookback_days {
                return Err(no_recent_rate(attempts));
            }
            attempts += 1;

            let rate = self.rate_on(currency, day).await?;
            if !rate.is_zero() {
                break rate;
            }
            debug!(
                "No {} rate published on {}, trying the day before",
                currency,
                date::render(day)
            );
            day = date::previous_day(day).ok_or_else(|| no_recent_rate(attempts))?;
        };

        info!("Resolved {} rate {} from {}", currency, rate, date::render(day));
        self.cache.put(&key, &rate.to_string(), self.ttl).await;
        Ok(rate)
    }
}
