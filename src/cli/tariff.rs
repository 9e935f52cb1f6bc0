//! Tariff settings: a TOML file, overridden by the individual flags.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{TariffConfiguration, TariffFile},
    prelude::*,
    quantity::{cost::DailyCost, energy::KilowattHours, rate::KilowattHourRate},
};

#[derive(Parser)]
pub struct TariffArgs {
    /// TOML file with the tariff settings and delivery price overrides.
    #[clap(long = "config", env = "TIJDPRIJS_CONFIG")]
    pub config_path: Option<PathBuf>,

    /// Fixed delivery costs in euro per day.
    #[clap(long = "fixed-delivery-per-day", env = "FIXED_DELIVERY_PER_DAY", allow_hyphen_values = true)]
    pub fixed_delivery: Option<DailyCost>,

    /// Fixed energy tax reduction in euro per day, normally negative.
    #[clap(
        long = "fixed-tax-reduction-per-day",
        env = "FIXED_TAX_REDUCTION_PER_DAY",
        allow_hyphen_values = true
    )]
    pub fixed_tax_reduction: Option<DailyCost>,

    /// Fixed grid operator costs in euro per day.
    #[clap(long = "fixed-grid-per-day", env = "FIXED_GRID_PER_DAY", allow_hyphen_values = true)]
    pub fixed_grid: Option<DailyCost>,

    /// Export compensation in euro per kilowatt-hour, non-positive.
    #[clap(
        long = "export-compensation-per-kwh",
        env = "EXPORT_COMPENSATION_PER_KWH",
        allow_hyphen_values = true
    )]
    pub export_compensation: Option<KilowattHourRate>,

    /// Export costs in euro per kilowatt-hour.
    #[clap(long = "export-costs-per-kwh", env = "EXPORT_COSTS_PER_KWH", allow_hyphen_values = true)]
    pub export_costs: Option<KilowattHourRate>,

    /// Annual consumption, selects the energy tax tier.
    #[clap(long = "annual-consumption-kwh", env = "ANNUAL_CONSUMPTION_KWH")]
    pub annual_consumption: Option<KilowattHours>,
}

impl TariffArgs {
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<TariffConfiguration> {
        let file = match &self.config_path {
            Some(path) => TariffFile::read_from(path)?,
            None => TariffFile::default(),
        };
        let configuration = TariffConfiguration::builder()
            .maybe_fixed_delivery(self.fixed_delivery.or(file.fixed_delivery))
            .maybe_fixed_tax_reduction(self.fixed_tax_reduction.or(file.fixed_tax_reduction))
            .maybe_fixed_grid(self.fixed_grid.or(file.fixed_grid))
            .maybe_export_compensation(self.export_compensation.or(file.export_compensation))
            .maybe_export_costs(self.export_costs.or(file.export_costs))
            .maybe_annual_consumption(self.annual_consumption.or(file.annual_consumption))
            .delivery_overrides(file.delivery)
            .try_build()
            .context("invalid tariff configuration")?;
        info!(
            tier = %configuration.tier(),
            n_overrides = configuration.delivery_overrides.len(),
            "loaded the tariff",
        );
        Ok(configuration)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_flags_override_file() -> Result {
        let path = std::env::temp_dir().join(format!("tijdprijs-{}.toml", std::process::id()));
        // language=toml
        std::fs::File::create(&path)?.write_all(
            br#"
            fixed_grid = 1.0
            fixed_delivery = 0.2
            annual_consumption = 2000

            [delivery]
            summer_normal = 0.1
            "#,
        )?;
        let args = TariffArgs::try_parse_from([
            "tijdprijs",
            "--config",
            path.to_str().context("non-UTF-8 path")?,
            "--fixed-grid-per-day",
            "1.5",
            "--annual-consumption-kwh",
            "12000",
        ])?;
        let configuration = args.load();
        std::fs::remove_file(&path)?;
        let configuration = configuration?;

        assert_eq!(configuration.fixed_grid, DailyCost(1.5));
        assert_eq!(configuration.fixed_delivery, DailyCost(0.2));
        assert_eq!(configuration.tier().index(), 2);
        assert_eq!(configuration.delivery_overrides.len(), 1);
        Ok(())
    }

    #[test]
    fn test_negative_flag_value() -> Result {
        let args = TariffArgs::try_parse_from(["tijdprijs", "--fixed-tax-reduction-per-day", "-1.8"])?;
        assert_eq!(args.fixed_tax_reduction, Some(DailyCost(-1.8)));
        Ok(())
    }
}
