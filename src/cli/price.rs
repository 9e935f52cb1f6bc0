use clap::Parser;

use crate::{
    config::TariffConfiguration,
    core::{
        period::{Period, PeriodKey, Season},
        price::{delivery_component, import_price},
        tariff::ENERGY_TAX,
        tier::Tier,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct PriceArgs {
    #[clap(long)]
    pub season: Season,

    #[clap(long)]
    pub period: Period,

    /// Energy tax tier, defaults to the one matching the annual consumption.
    #[clap(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub tier: Option<u8>,
}

impl PriceArgs {
    #[instrument(skip_all, fields(season = %self.season, period = %self.period))]
    pub fn run(&self, config: &TariffConfiguration) -> Result {
        let tier = match self.tier {
            Some(index) => Tier::try_from(index)?,
            None => config.tier(),
        };
        let price = import_price(config, self.season, self.period, tier)?;
        let delivery =
            delivery_component(config, PeriodKey::try_new(self.season, self.period)?, tier)?;
        info!(
            %tier,
            %delivery,
            energy_tax = %ENERGY_TAX[tier],
            "composed",
        );
        println!("{}", price.round_to_micros());
        Ok(())
    }
}
