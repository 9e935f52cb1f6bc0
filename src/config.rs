//! Tariff configuration: fixed charges, export terms, consumption and delivery overrides.

use std::{collections::BTreeMap, fmt::Debug, fs, path::Path};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{period::PeriodKey, price::DeliveryOverride, tier::Tier},
    prelude::*,
    quantity::{cost::DailyCost, energy::KilowattHours, rate::KilowattHourRate},
};

pub const DEFAULT_FIXED_DELIVERY: DailyCost = DailyCost(0.30);
pub const DEFAULT_FIXED_TAX_REDUCTION: DailyCost = DailyCost(-1.50);
pub const DEFAULT_FIXED_GRID: DailyCost = DailyCost(1.20);
pub const DEFAULT_EXPORT_COMPENSATION: KilowattHourRate = KilowattHourRate(-0.10);
pub const DEFAULT_EXPORT_COSTS: KilowattHourRate = KilowattHourRate(0.05);

/// Complete tariff configuration, immutable once built.
#[must_use]
#[derive(Clone, Debug, Serialize, Builder)]
#[builder(finish_fn(vis = ""))]
pub struct TariffConfiguration {
    /// Fixed delivery costs («vaste leveringskosten»).
    #[builder(default = DEFAULT_FIXED_DELIVERY)]
    pub fixed_delivery: DailyCost,

    /// Energy tax reduction («belastingvermindering»), normally negative.
    #[builder(default = DEFAULT_FIXED_TAX_REDUCTION)]
    pub fixed_tax_reduction: DailyCost,

    /// Grid operator costs («netbeheerkosten»).
    #[builder(default = DEFAULT_FIXED_GRID)]
    pub fixed_grid: DailyCost,

    /// Export compensation («terugleververgoeding»), money received, hence non-positive.
    #[builder(default = DEFAULT_EXPORT_COMPENSATION)]
    pub export_compensation: KilowattHourRate,

    /// Export costs («terugleverkosten»).
    #[builder(default = DEFAULT_EXPORT_COSTS)]
    pub export_costs: KilowattHourRate,

    /// Annual consumption, which selects the energy tax tier.
    pub annual_consumption: Option<KilowattHours>,

    /// Delivery price overrides by period key, such as `winter_offpeak_night`.
    #[builder(default)]
    #[serde(rename = "delivery")]
    pub delivery_overrides: BTreeMap<String, DeliveryOverride>,
}

impl<S: tariff_configuration_builder::IsComplete> TariffConfigurationBuilder<S> {
    /// Build and validate the configuration as a whole.
    pub fn try_build(self) -> Result<TariffConfiguration> {
        let configuration = self.build();
        configuration.validate()?;
        Ok(configuration)
    }
}

impl Default for TariffConfiguration {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TariffConfiguration {
    fn validate(&self) -> Result {
        for (name, value) in [
            ("fixed delivery costs", self.fixed_delivery.0),
            ("fixed tax reduction", self.fixed_tax_reduction.0),
            ("fixed grid costs", self.fixed_grid.0),
            ("export compensation", self.export_compensation.0),
            ("export costs", self.export_costs.0),
        ] {
            ensure!(value.is_finite(), "{name} must be a finite number, got {value}");
        }
        ensure!(
            self.export_compensation <= KilowattHourRate::ZERO,
            "export compensation is money received and must not be positive, got {}",
            self.export_compensation,
        );
        ensure!(
            self.export_costs >= KilowattHourRate::ZERO,
            "export costs must not be negative, got {}",
            self.export_costs,
        );
        if let Some(consumption) = self.annual_consumption {
            ensure!(
                consumption.0.is_finite() && consumption >= KilowattHours::ZERO,
                "annual consumption must be a non-negative number, got {consumption}",
            );
        }
        for key in self.delivery_overrides.keys() {
            if let Err(error) = key.parse::<PeriodKey>() {
                warn!(key = key.as_str(), "ignoring the delivery price override: {error}");
            }
        }
        Ok(())
    }

    /// Energy tax tier, the lowest one when the consumption is unknown.
    pub fn tier(&self) -> Tier {
        self.annual_consumption.map_or_else(Tier::default, Tier::from_annual_consumption)
    }

    #[must_use]
    pub fn delivery_override(&self, key: PeriodKey) -> Option<&DeliveryOverride> {
        self.delivery_overrides.get(&key.to_string())
    }

    /// Sum of the daily fixed charges.
    pub fn daily_fixed_total(&self) -> DailyCost {
        [self.fixed_delivery, self.fixed_tax_reduction, self.fixed_grid].into_iter().sum()
    }
}

/// Tariff settings as written in the TOML file; anything left out falls back to the defaults.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffFile {
    pub fixed_delivery: Option<DailyCost>,
    pub fixed_tax_reduction: Option<DailyCost>,
    pub fixed_grid: Option<DailyCost>,
    pub export_compensation: Option<KilowattHourRate>,
    pub export_costs: Option<KilowattHourRate>,
    pub annual_consumption: Option<KilowattHours>,

    #[serde(default)]
    pub delivery: BTreeMap<String, DeliveryOverride>,
}

impl TariffFile {
    #[instrument(name = "reading the tariff file…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }
}
