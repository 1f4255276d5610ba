//! The two lookups offered to callers, with their defaults
//!
//! Both can be called without arguments: the exchange rate defaults to GBP
//! today, the crypto price to bitcoin.

use crate::core::cache::KeyValueCache;
use crate::core::clock::Clock;
use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::core::date;
use crate::core::error::LookupError;
use crate::core::number::Locale;
use crate::providers::crypto::CryptoPriceProvider;
use crate::providers::exchange::RateResolver;
use crate::providers::fetch::{HttpFetcher, PageFetcher};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_ASSET: &str = "bitcoin";

pub struct Lookups {
    rates: RateResolver,
    crypto: CryptoPriceProvider,
    clock: Arc<dyn Clock>,
}

impl Lookups {
    pub fn new(rates: RateResolver, crypto: CryptoPriceProvider, clock: Arc<dyn Clock>) -> Self {
        Self {
            rates,
            crypto,
            clock,
        }
    }

    /// Wires both lookups from the config, sharing one fetcher and one cache.
    pub fn from_config(
        config: &AppConfig,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn KeyValueCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LookupError> {
        let ttl = Duration::from_secs(config.cache.ttl_seconds);

        let rates = RateResolver::new(
            &config.exchange.url_template,
            Locale::from_tag(&config.exchange.locale)?,
            Arc::clone(&fetcher),
            Arc::clone(&cache),
        )
        .with_max_lookback_days(config.exchange.max_lookback_days)
        .with_ttl(ttl);

        let crypto = CryptoPriceProvider::new(
            &config.crypto.url_template,
            Locale::from_tag(&config.crypto.locale)?,
            fetcher,
            cache,
        )
        .with_ttl(ttl);

        Ok(Self::new(rates, crypto, clock))
    }

    /// Same as [`Lookups::from_config`] with a real HTTP fetcher.
    pub fn with_http(
        config: &AppConfig,
        cache: Arc<dyn KeyValueCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LookupError> {
        let fetcher = HttpFetcher::new(
            &config.http.user_agent,
            Duration::from_secs(config.http.timeout_seconds),
        )?;
        Self::from_config(config, Arc::new(fetcher), cache, clock)
    }

    /// Units of local currency per unit of `currency`, on the day `on` (`YYYY.MM.DD.`)
    /// or the closest earlier day with a published rate.
    pub async fn exchange_rate(
        &self,
        currency: Option<Currency>,
        on: Option<&str>,
    ) -> Result<Decimal, LookupError> {
        let currency = currency.unwrap_or_default();
        let requested = match on.map(str::trim).filter(|d| !d.is_empty()) {
            Some(text) => date::parse(text)?,
            None => self.clock.today(),
        };
        self.rates.resolve(currency, requested).await
    }

    pub async fn crypto_price(&self, asset_name: Option<&str>) -> Result<Decimal, LookupError> {
        let asset_name = asset_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ASSET);
        self.crypto.fetch_price(asset_name).await
    }
}
