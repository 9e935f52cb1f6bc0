//! Built-in Vattenfall TijdPrijs reference data, all in euro per kilowatt-hour including VAT.

use crate::{
    core::{
        period::{Period, PeriodKey, Season},
        tier::{Tier, TierTable},
    },
    quantity::rate::KilowattHourRate,
};

/// Energy tax («belasting») per consumption tier, government-set and equal for all periods.
///
/// The rate goes down with the consumption: the first two tiers pay the same.
pub const ENERGY_TAX: TierTable<KilowattHourRate> = TierTable([
    KilowattHourRate(0.110_848),
    KilowattHourRate(0.110_848),
    KilowattHourRate(0.080_719),
    KilowattHourRate(0.045_194),
]);

/// Delivery price («levering»), either the same for every tier or one per tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeliveryPrice {
    Flat(KilowattHourRate),
    Tiered(TierTable<KilowattHourRate>),
}

impl DeliveryPrice {
    pub fn at(self, tier: Tier) -> KilowattHourRate {
        match self {
            Self::Flat(rate) => rate,
            Self::Tiered(table) => table[tier],
        }
    }

    /// Default Vattenfall delivery price for the period.
    pub const fn default_for(key: PeriodKey) -> Self {
        let rate = match (key.season(), key.period()) {
            (Season::Summer, Period::OffpeakWeekday) => 0.017_908,
            (Season::Summer, Period::OffpeakWeekend) => 0.0,
            (Season::Summer, _) => 0.115_434,
            (Season::Winter, Period::OffpeakDay) => 0.087_483,
            (Season::Winter, Period::OffpeakNight) => 0.070_785,
            (Season::Winter, _) => 0.140_723,
        };
        Self::Tiered(TierTable::uniform(KilowattHourRate(rate)))
    }
}
