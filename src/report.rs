//! Display records handed to whatever renders the prices: a terminal table or JSON.

use chrono::{DateTime, Local};
use comfy_table::Color;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    config::TariffConfiguration,
    core::{
        error::PricingError,
        forecast::{HourlyPricePoint, hourly_forecast},
        period::{Period, PeriodKey, Season},
    },
    quantity::{cost::DailyCost, rate::KilowattHourRate},
};

/// Import price right now along with its classification.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct CurrentPrice {
    pub price: KilowattHourRate,
    pub season: Season,
    pub period: Period,
    pub hour: u32,
    pub label: &'static str,
}

impl CurrentPrice {
    pub fn try_at(config: &TariffConfiguration, now: DateTime<Local>) -> Result<Self, PricingError> {
        let point = HourlyPricePoint::try_at(config, now)?;
        let label = PeriodKey::classify(&now).label();
        Ok(Self { price: point.price, season: point.season, period: point.period, hour: point.hour, label })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLevel {
    Low,
    High,
}

impl PriceLevel {
    /// Anything at or above the median is considered expensive.
    pub fn classify(price: KilowattHourRate, median: KilowattHourRate) -> Self {
        if price >= median { Self::High } else { Self::Low }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Low => Color::Green,
            Self::High => Color::Red,
        }
    }

    pub const fn fill_color(self) -> &'static str {
        match self {
            Self::Low => "#27ae60",
            Self::High => "#e74c3c",
        }
    }
}

/// Chart-friendly point.
#[derive(Clone, Debug, Serialize)]
pub struct ChartPoint {
    pub x: DateTime<Local>,
    pub y: KilowattHourRate,

    #[serde(rename = "fillColor")]
    pub fill_color: &'static str,
}

/// Forecast with its derived views.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct ForecastReport {
    pub hourly_prices: Vec<HourlyPricePoint>,
    pub chart: Vec<ChartPoint>,
    pub median_price: Option<KilowattHourRate>,
    pub forecast_hours: u32,
    pub last_update: DateTime<Local>,
}

impl ForecastReport {
    pub fn try_new(
        config: &TariffConfiguration,
        start: DateTime<Local>,
        n_hours: u32,
        now: DateTime<Local>,
    ) -> Result<Self, PricingError> {
        let hourly_prices = hourly_forecast(config, start, n_hours)?;
        let median_price = median(hourly_prices.iter().map(|point| point.price));
        let chart = hourly_prices
            .iter()
            .map(|point| ChartPoint {
                x: point.time,
                y: point.price,
                fill_color: median_price
                    .map_or(PriceLevel::High, |median| PriceLevel::classify(point.price, median))
                    .fill_color(),
            })
            .collect();
        Ok(Self { hourly_prices, chart, median_price, forecast_hours: n_hours, last_update: now })
    }

    pub fn level_of(&self, point: &HourlyPricePoint) -> PriceLevel {
        self.median_price.map_or(PriceLevel::High, |median| PriceLevel::classify(point.price, median))
    }
}

/// Middle element of the sorted prices, the lower one of the two middles on even lengths.
pub fn median(prices: impl IntoIterator<Item = KilowattHourRate>) -> Option<KilowattHourRate> {
    let sorted = prices.into_iter().sorted_unstable().collect_vec();
    sorted.get(sorted.len().saturating_sub(1) / 2).copied()
}

/// Values that do not depend on time.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct FixedCosts {
    pub fixed_delivery: DailyCost,
    pub fixed_tax_reduction: DailyCost,
    pub fixed_grid: DailyCost,
    pub daily_total: DailyCost,
    pub export_compensation: KilowattHourRate,
    pub export_costs: KilowattHourRate,
}

impl From<&TariffConfiguration> for FixedCosts {
    fn from(config: &TariffConfiguration) -> Self {
        Self {
            fixed_delivery: config.fixed_delivery,
            fixed_tax_reduction: config.fixed_tax_reduction,
            fixed_grid: config.fixed_grid,
            daily_total: config.daily_fixed_total(),
            export_compensation: config.export_compensation,
            export_costs: config.export_costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::prelude::Result;

    fn rates(values: &[f64]) -> Vec<KilowattHourRate> {
        values.iter().copied().map(KilowattHourRate).collect()
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(rates(&[0.3, 0.1, 0.2])), Some(KilowattHourRate(0.2)));
    }

    #[test]
    fn test_median_even_takes_the_lower_middle() {
        assert_eq!(median(rates(&[0.4, 0.1, 0.3, 0.2])), Some(KilowattHourRate(0.2)));
    }

    #[test]
    fn test_median_single() {
        assert_eq!(median(rates(&[0.5])), Some(KilowattHourRate(0.5)));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(rates(&[])), None);
    }

    #[test]
    fn test_price_level() {
        let median = KilowattHourRate(0.2);
        assert_eq!(PriceLevel::classify(KilowattHourRate(0.1), median), PriceLevel::Low);
        assert_eq!(PriceLevel::classify(KilowattHourRate(0.2), median), PriceLevel::High);
        assert_eq!(PriceLevel::classify(KilowattHourRate(0.3), median), PriceLevel::High);
    }

    #[test]
    fn test_current_price() -> Result {
        let now = Local.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap();
        let current = CurrentPrice::try_at(&TariffConfiguration::default(), now)?;
        assert_eq!(current.season, Season::Summer);
        assert_eq!(current.period, Period::OffpeakWeekday);
        assert_eq!(current.hour, 14);
        assert!(current.price > KilowattHourRate::ZERO);
        assert_eq!(current.label, "Zomer dal week (12:00-18:00)");
        Ok(())
    }

    #[test]
    fn test_forecast_report() -> Result {
        let now = Local.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap();
        let report = ForecastReport::try_new(&TariffConfiguration::default(), now, 48, now)?;
        assert_eq!(report.hourly_prices.len(), 48);
        assert_eq!(report.chart.len(), 48);
        assert_eq!(report.forecast_hours, 48);
        let median_price = report.median_price.unwrap();
        assert!(median_price > KilowattHourRate::ZERO);
        for (point, chart_point) in report.hourly_prices.iter().zip(&report.chart) {
            assert_eq!(chart_point.x, point.time);
            assert_eq!(chart_point.fill_color, report.level_of(point).fill_color());
        }
        // Cheap off-peak afternoon, expensive evening.
        assert_eq!(report.level_of(&report.hourly_prices[0]), PriceLevel::Low);
        assert_eq!(report.level_of(&report.hourly_prices[4]), PriceLevel::High);
        Ok(())
    }

    #[test]
    fn test_forecast_report_json() -> Result {
        let now = Local.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap();
        let report = ForecastReport::try_new(&TariffConfiguration::default(), now, 2, now)?;
        let json = serde_json::to_value(&report)?;
        assert_eq!(json["forecast_hours"], 2);
        assert_eq!(json["hourly_prices"][0]["period"], "offpeak_night");
        assert_eq!(json["hourly_prices"][0]["season"], "winter");
        assert!(json["chart"][0]["fillColor"].is_string());
        assert!(json["chart"][0]["y"].is_f64());
        Ok(())
    }

    #[test]
    fn test_fixed_costs() {
        let costs = FixedCosts::from(&TariffConfiguration::default());
        approx::assert_abs_diff_eq!(costs.daily_total.0, 0.30 - 1.50 + 1.20, epsilon = 1e-9);
        assert!(costs.export_compensation < KilowattHourRate::ZERO);
    }
}
