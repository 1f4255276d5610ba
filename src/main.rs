use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use quoteline::cli::{setup::setup, ui};
use quoteline::core::currency::Currency;
use quoteline::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for quoteline::AppCommand {
    fn from(cmd: Commands) -> quoteline::AppCommand {
        match cmd {
            Commands::ExchangeRate { currency, date } => {
                quoteline::AppCommand::ExchangeRate { currency, date }
            }
            Commands::CryptoPrice { name } => quoteline::AppCommand::CryptoPrice {
                asset: (!name.is_empty()).then(|| name.join(" ")),
            },
            Commands::ClearCache => quoteline::AppCommand::ClearCache,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Exchange rate of a currency on a date, or the closest earlier published one
    ExchangeRate {
        /// GBP, USD or EUR [default: GBP]
        currency: Option<Currency>,
        /// Date as YYYY.MM.DD. [default: today]
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Spot price of a cryptocurrency
    CryptoPrice {
        /// Asset name, e.g. "Medieval Empires" [default: bitcoin]
        name: Vec<String>,
    },
    /// Remove all cached quotes
    ClearCache,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => quoteline::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
    Ok(())
}
