//! Error types for quote lookups

use thiserror::Error;

/// Errors raised while resolving an exchange rate or a crypto price.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A currency code outside the supported set
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// The locale does not render 0.1 as `0<separator>1`
    #[error("Locale {locale} renders 0.1 as '{rendered}', cannot derive a decimal separator")]
    LocaleFormat { locale: String, rendered: String },

    /// The locale tag is not one we know how to format numbers for
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// The request never produced a response
    #[error("Request error: {source} for URL: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("HTTP error: {status} for URL: {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The page did not contain a price at the expected position
    #[error("No price found on the page for {target}")]
    ExtractionEmpty { target: String },

    #[error("Cannot parse '{raw}' as a number")]
    NumberFormat { raw: String },

    #[error("Invalid date '{0}', expected YYYY.MM.DD.")]
    InvalidDate(String),

    /// The back-off loop ran out of attempts without finding a published rate
    #[error("No {currency} rate published in the {attempts} days up to {from}")]
    NoRecentRate {
        currency: String,
        from: String,
        attempts: u32,
    },
}
