use chrono::{DateTime, Local, TimeDelta, Timelike};
use serde::Serialize;

use crate::{
    config::TariffConfiguration,
    core::{
        error::PricingError,
        period::{Period, PeriodKey, Season},
        price::compose,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// Composed import price for one forecast hour.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HourlyPricePoint {
    pub time: DateTime<Local>,
    pub hour: u32,
    pub season: Season,
    pub period: Period,
    pub price: KilowattHourRate,
}

impl HourlyPricePoint {
    pub fn try_at(config: &TariffConfiguration, time: DateTime<Local>) -> Result<Self, PricingError> {
        let key = PeriodKey::classify(&time);
        let price = compose(config, key, config.tier())?.round_to_micros();
        Ok(Self { time, hour: time.hour(), season: key.season(), period: key.period(), price })
    }
}

/// Generate `n_hours` consecutive hourly prices starting at `start`.
///
/// Nothing is cached: the configuration or the clock may change between calls.
#[instrument(skip_all, fields(start = %start, n_hours = n_hours))]
pub fn hourly_forecast(
    config: &TariffConfiguration,
    start: DateTime<Local>,
    n_hours: u32,
) -> Result<Vec<HourlyPricePoint>, PricingError> {
    let points = (0..n_hours)
        .map(|hour| HourlyPricePoint::try_at(config, start + TimeDelta::hours(i64::from(hour))))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(len = points.len(), "generated the forecast");
    Ok(points)
}
