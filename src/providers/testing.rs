//! Page fixtures and a scripted fetcher shared by the provider tests

use super::extract::column_index;
use super::fetch::PageFetcher;
use crate::core::currency::Currency;
use crate::core::error::LookupError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

const RATE_COLUMNS: usize = 80;

/// A one-day rate table with the given cells filled and every other cell empty.
pub fn rate_page(rates: &[(Currency, &str)]) -> String {
    let header: String = (1..=RATE_COLUMNS)
        .map(|i| format!("<th>C{i}</th>"))
        .collect();
    let cells: String = (1..=RATE_COLUMNS)
        .map(|i| {
            let text = if i == 1 {
                "2024.01.05."
            } else {
                rates
                    .iter()
                    .find(|(currency, _)| column_index(*currency) == i)
                    .map_or("", |(_, text)| *text)
            };
            format!("<td>{text}</td>")
        })
        .collect();

    format!(
        "<html><body><table><thead><tr>{header}</tr></thead><tbody><tr>{cells}</tr></tbody></table></body></html>"
    )
}

/// The page served for a day without published rates.
pub fn holiday_page() -> String {
    rate_page(&[])
}

pub fn crypto_page(price: &str) -> String {
    format!(
        r#"<html><body><section id="section-coin-overview"><div class="priceTitle"><div class="priceValue"><span>{price}</span></div></div></section></body></html>"#
    )
}

/// Serves queued pages in order, then `fallback` (if any), and records every URL.
pub struct ScriptedFetcher {
    pages: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(page: String) -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            fallback: Some(page),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        self.requests.lock().unwrap().push(url.to_string());
        let next = self.pages.lock().unwrap().pop_front();
        next.or_else(|| self.fallback.clone())
            .ok_or_else(|| LookupError::HttpStatus {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}
