mod forecast;
mod price;
mod tariff;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{forecast::ForecastArgs, price::PriceArgs, tariff::TariffArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub tariff: TariffArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the import price for the current hour.
    #[clap(name = "current")]
    Current(OutputArgs),

    /// Show the hourly import price forecast.
    #[clap(name = "forecast")]
    Forecast(ForecastArgs),

    /// Compose the import price for an explicit season, period, and tier.
    #[clap(name = "price")]
    Price(PriceArgs),

    /// Show the fixed daily costs and the export terms.
    #[clap(name = "fixed")]
    Fixed(OutputArgs),

    /// List the tariff periods along with their prices.
    #[clap(name = "periods")]
    Periods,

    /// Print the effective tariff configuration as TOML.
    #[clap(name = "config")]
    Config,

    /// Periodically log the current import price until terminated.
    #[clap(name = "watch")]
    Watch(WatchArgs),
}

#[derive(Copy, Clone, Parser)]
pub struct OutputArgs {
    /// Print JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}
