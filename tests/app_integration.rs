use chrono::NaiveDate;
use quoteline::core::clock::ManualClock;
use quoteline::core::config::AppConfig;
use quoteline::core::currency::Currency;
use quoteline::core::error::LookupError;
use quoteline::lookup::Lookups;
use quoteline::store::memory::MemoryCache;
use rust_decimal::Decimal;
use std::fs;
use std::sync::Arc;
use tracing::info;
use wiremock::MockServer;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RATE_COLUMNS: usize = 80;

    /// A one-day rate table with `(column, text)` cells filled in.
    pub fn rate_page(cells: &[(usize, &str)]) -> String {
        let row: String = (1..=RATE_COLUMNS)
            .map(|i| {
                let text = cells
                    .iter()
                    .find(|(column, _)| *column == i)
                    .map_or("", |(_, text)| *text);
                format!("<td>{text}</td>")
            })
            .collect();
        format!("<html><body><table><tbody><tr>{row}</tr></tbody></table></body></html>")
    }

    pub fn crypto_page(price: &str) -> String {
        format!(
            r#"<html><body><div id="section-coin-overview"><div class="priceTitle"><div class="priceValue"><span>{price}</span></div></div></div></body></html>"#
        )
    }

    pub async fn mount_rate_page(mock_server: &MockServer, day: &str, body: String) {
        Mock::given(method("GET"))
            .and(path("/rates"))
            .and(query_param("day", day))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub async fn mount_crypto_page(mock_server: &MockServer, slug: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(format!("/currencies/{slug}/")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub fn config_yaml(base_url: &str, data_path: &str) -> String {
        format!(
            r#"
            exchange:
              url_template: "{base_url}/rates?day={{date}}"
            crypto:
              url_template: "{base_url}/currencies/{{slug}}/"
            data_path: "{data_path}"
            "#
        )
    }
}

fn test_config(mock_server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.exchange.url_template = format!("{}/rates?day={{date}}", mock_server.uri());
    config.crypto.url_template = format!("{}/currencies/{{slug}}/", mock_server.uri());
    config.cache.persist = false;
    config
}

fn lookups_at(config: &AppConfig, today: NaiveDate) -> Lookups {
    let clock = Arc::new(ManualClock::new(today));
    let cache = Arc::new(MemoryCache::with_clock(clock.clone()));
    Lookups::with_http(config, cache, clock).expect("Failed to build lookups")
}

#[test_log::test(tokio::test)]
async fn test_exchange_rate_walks_back_over_holiday() {
    let mock_server = MockServer::start().await;
    // Good Friday 2024 is empty, Thursday has rates
    test_utils::mount_rate_page(&mock_server, "2024.03.29.", test_utils::rate_page(&[])).await;
    test_utils::mount_rate_page(
        &mock_server,
        "2024.03.28.",
        test_utils::rate_page(&[(24, "462,08"), (71, "365,51")]),
    )
    .await;

    let config = test_config(&mock_server);
    let lookups = lookups_at(&config, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());

    // Easter Sunday rolls back to Friday, then on to Thursday
    let rate = lookups
        .exchange_rate(Some(Currency::Usd), Some("2024.03.31."))
        .await
        .expect("lookup failed");
    info!(?rate, "Resolved USD rate");

    assert_eq!(rate, Decimal::new(36551, 2));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);

    // Same request again comes from the cache
    let again = lookups
        .exchange_rate(Some(Currency::Usd), Some("2024.03.31."))
        .await
        .unwrap();
    assert_eq!(again, rate);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_exchange_rate_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    // Nothing mounted: every request gets a 404

    let config = test_config(&mock_server);
    let lookups = lookups_at(&config, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

    let result = lookups.exchange_rate(None, None).await;

    assert!(matches!(result, Err(LookupError::HttpStatus { .. })));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_crypto_price_uses_slug() {
    let mock_server = MockServer::start().await;
    test_utils::mount_crypto_page(
        &mock_server,
        "medieval-empires",
        test_utils::crypto_page("$0.002712"),
    )
    .await;

    let config = test_config(&mock_server);
    let lookups = lookups_at(&config, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

    let price = lookups
        .crypto_price(Some("Medieval Empires"))
        .await
        .expect("lookup failed");

    assert_eq!(price, Decimal::new(2712, 6));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = MockServer::start().await;
    test_utils::mount_crypto_page(&mock_server, "bitcoin", test_utils::crypto_page("$67,012.90"))
        .await;

    let data_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = test_utils::config_yaml(
        &mock_server.uri(),
        data_dir.path().to_str().unwrap(),
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = quoteline::run_command(
        quoteline::AppCommand::CryptoPrice { asset: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );

    // The quote was cached on disk under the data path
    assert!(data_dir.path().join("cache").exists());

    let result = quoteline::run_command(
        quoteline::AppCommand::ClearCache,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Clearing the cache failed: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_reports_lookup_failure() {
    let mock_server = MockServer::start().await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let mut config = test_config(&mock_server);
    config.exchange.max_lookback_days = 2;
    fs::write(config_path, serde_yaml::to_string(&config).unwrap())
        .expect("Failed to write config file");

    let result = quoteline::run_command(
        quoteline::AppCommand::ExchangeRate {
            currency: Some(Currency::Eur),
            date: Some("2024.01.05.".to_string()),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("lookup should fail");
    assert_eq!(err.to_string(), "Exchange rate lookup failed for EUR");
}
