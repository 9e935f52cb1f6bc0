//! Import price composition: delivery price plus energy tax.

use serde::{Deserialize, Serialize};

use crate::{
    config::TariffConfiguration,
    core::{
        error::PricingError,
        period::{Period, PeriodKey, Season},
        tariff::{DeliveryPrice, ENERGY_TAX},
        tier::{N_TIERS, Tier, TierTable},
    },
    quantity::rate::KilowattHourRate,
};

/// User-supplied delivery price, kept as written until a price is actually composed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeliveryOverride {
    /// Same price for every tier.
    Flat(KilowattHourRate),

    /// One price per tier.
    Tiered(Vec<KilowattHourRate>),

    /// Comma-separated tier prices, for example `"0.1,0.1,0.09,0.08"`.
    Listed(String),

    /// Anything else, reported when used.
    Unsupported(toml::Value),
}

impl DeliveryOverride {
    pub fn resolve(&self, key: PeriodKey) -> Result<DeliveryPrice, PricingError> {
        match self {
            Self::Flat(rate) => Ok(DeliveryPrice::Flat(*rate)),
            Self::Tiered(rates) => Self::to_table(key, rates).map(DeliveryPrice::Tiered),
            Self::Listed(text) => {
                let rates = text
                    .split(',')
                    .map(str::trim)
                    .map(|part| {
                        part.parse::<f64>().map(KilowattHourRate).map_err(|_| {
                            PricingError::configuration(key, format!("`{part}` is not a number"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::to_table(key, &rates).map(DeliveryPrice::Tiered)
            }
            Self::Unsupported(value) => Err(PricingError::configuration(
                key,
                format!("expected a number, a list of {N_TIERS} numbers or a comma-separated string, got `{value}`"),
            )),
        }
    }

    fn to_table(
        key: PeriodKey,
        rates: &[KilowattHourRate],
    ) -> Result<TierTable<KilowattHourRate>, PricingError> {
        <[KilowattHourRate; N_TIERS]>::try_from(rates).map(TierTable).map_err(|_| {
            PricingError::configuration(
                key,
                format!("expected {N_TIERS} tier prices, got {}", rates.len()),
            )
        })
    }
}

impl From<f64> for DeliveryOverride {
    fn from(rate: f64) -> Self {
        Self::Flat(KilowattHourRate(rate))
    }
}

impl From<[f64; N_TIERS]> for DeliveryOverride {
    fn from(rates: [f64; N_TIERS]) -> Self {
        Self::Tiered(rates.into_iter().map(KilowattHourRate).collect())
    }
}

/// Compose the import price for an explicitly named season and period.
pub fn import_price(
    config: &TariffConfiguration,
    season: Season,
    period: Period,
    tier: Tier,
) -> Result<KilowattHourRate, PricingError> {
    compose(config, PeriodKey::try_new(season, period)?, tier)
}

/// Delivery price plus energy tax, not clamped: a negative delivery override may push it below zero.
pub fn compose(
    config: &TariffConfiguration,
    key: PeriodKey,
    tier: Tier,
) -> Result<KilowattHourRate, PricingError> {
    Ok(delivery_component(config, key, tier)? + ENERGY_TAX[tier])
}

/// Overridden delivery price if configured, the built-in default otherwise.
pub fn delivery_component(
    config: &TariffConfiguration,
    key: PeriodKey,
    tier: Tier,
) -> Result<KilowattHourRate, PricingError> {
    let price = match config.delivery_override(key) {
        Some(delivery_override) => delivery_override.resolve(key)?,
        None => DeliveryPrice::default_for(key),
    };
    Ok(price.at(tier))
}
