#![allow(clippy::doc_markdown)]

mod cli;
mod config;
mod core;
mod prelude;
mod quantity;
mod report;
mod tables;

use chrono::Local;
use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command},
    prelude::*,
    report::{CurrentPrice, FixedCosts},
    tables::{build_current_price_table, build_fixed_costs_table, build_periods_table},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let config = args.tariff.load()?;

    match args.command {
        Command::Current(output) => {
            let current = CurrentPrice::try_at(&config, Local::now())?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&current)?);
            } else {
                println!("{}", build_current_price_table(&current));
            }
        }
        Command::Forecast(args) => {
            args.run(&config)?;
        }
        Command::Price(args) => {
            args.run(&config)?;
        }
        Command::Fixed(output) => {
            let costs = FixedCosts::from(&config);
            if output.json {
                println!("{}", serde_json::to_string_pretty(&costs)?);
            } else {
                println!("{}", build_fixed_costs_table(&costs));
            }
        }
        Command::Periods => {
            println!("{}", build_periods_table(&config)?);
        }
        Command::Config => {
            print!("{}", toml::to_string(&config).context("failed to serialize the configuration")?);
        }
        Command::Watch(args) => {
            args.run(&config).await?;
        }
    }

    info!("done!");
    Ok(())
}
