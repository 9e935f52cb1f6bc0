use chrono::{DateTime, Local, Timelike};
use clap::Parser;

use crate::{
    cli::OutputArgs,
    config::TariffConfiguration,
    prelude::*,
    report::ForecastReport,
    tables::build_forecast_table,
};

#[derive(Parser)]
pub struct ForecastArgs {
    /// Forecast horizon.
    #[clap(long = "hours", default_value = "48", env = "FORECAST_HOURS")]
    pub n_hours: u32,

    /// Forecast start, for example `2024-06-10T14:00:00+02:00`. Defaults to the current hour.
    #[clap(long)]
    pub start: Option<DateTime<Local>>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

impl ForecastArgs {
    #[instrument(skip_all, fields(n_hours = self.n_hours))]
    pub fn run(&self, config: &TariffConfiguration) -> Result {
        let now = Local::now();
        let start = match self.start {
            Some(start) => start,
            None => start_of_hour(now)?,
        };
        let report = ForecastReport::try_new(config, start, self.n_hours, now)?;
        info!(
            len = report.hourly_prices.len(),
            median_price = ?report.median_price,
            "built the forecast",
        );
        if self.output.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", build_forecast_table(&report));
        }
        Ok(())
    }
}

fn start_of_hour(now: DateTime<Local>) -> Result<DateTime<Local>> {
    now.with_nanosecond(0)
        .and_then(|now| now.with_second(0))
        .and_then(|now| now.with_minute(0))
        .with_context(|| format!("failed to truncate `{now}` to the hour"))
}
