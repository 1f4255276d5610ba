//! Locating the price text inside a fetched page
//!
//! Neither source offers an API, so prices are read from fixed positions in
//! the markup. When the markup changes the position yields nothing and the
//! caller sees an empty string.

use crate::core::currency::Currency;
use crate::core::error::LookupError;
use scraper::{Html, Selector};

/// Price section → title → value → inner text on an asset page
pub const CRYPTO_PRICE_SELECTOR: &str = "#section-coin-overview .priceTitle .priceValue span";

/// Where a price sits on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePosition {
    /// A currency's column in the exchange's daily rate table
    RateColumn(Currency),
    CryptoPrice,
}

/// 1-based column of each currency in the rate table's row.
pub fn column_index(currency: Currency) -> usize {
    match currency {
        Currency::Gbp => 24,
        Currency::Usd => 71,
        Currency::Eur => 21,
    }
}

impl PricePosition {
    pub fn selector(&self) -> String {
        match self {
            PricePosition::RateColumn(currency) => {
                format!("table tbody tr td:nth-child({})", column_index(*currency))
            }
            PricePosition::CryptoPrice => CRYPTO_PRICE_SELECTOR.to_string(),
        }
    }
}

/// Text content of the first element matching `selector`, or an empty string.
pub fn select_text(markup: &str, selector: &str) -> Result<String, LookupError> {
    let parsed = Selector::parse(selector).map_err(|e| LookupError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;
    let document = Html::parse_document(markup);

    Ok(document
        .select(&parsed)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default())
}

pub fn extract(markup: &str, position: PricePosition) -> Result<String, LookupError> {
    select_text(markup, &position.selector())
}
