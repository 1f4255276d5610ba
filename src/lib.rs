pub mod cli;
pub mod core;
pub mod lookup;
pub mod providers;
pub mod store;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::lookup::Lookups;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    ExchangeRate {
        currency: Option<Currency>,
        date: Option<String>,
    },
    CryptoPrice {
        asset: Option<String>,
    },
    ClearCache,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Quoteline starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = store::open_cache(&config, Arc::clone(&clock));

    let quote = match command {
        AppCommand::ClearCache => {
            cache.clear().await;
            cli::ui::print_notice("Cache cleared");
            return Ok(());
        }
        AppCommand::ExchangeRate { currency, date } => Lookups::with_http(&config, cache, clock)?
            .exchange_rate(currency, date.as_deref())
            .await
            .with_context(|| {
                format!(
                    "Exchange rate lookup failed for {}",
                    currency.unwrap_or_default()
                )
            })?,
        AppCommand::CryptoPrice { asset } => Lookups::with_http(&config, cache, clock)?
            .crypto_price(asset.as_deref())
            .await
            .context("Crypto price lookup failed")?,
    };

    cli::ui::print_quote(quote);
    Ok(())
}
