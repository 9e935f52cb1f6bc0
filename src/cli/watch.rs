use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use chrono::Local;
use clap::Parser;
use tokio::time::{MissedTickBehavior, interval};

use crate::{config::TariffConfiguration, prelude::*, report::CurrentPrice};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(long = "interval", env = "POLLING_INTERVAL", default_value = "1min")]
    pub interval: humantime::Duration,
}

impl WatchArgs {
    pub async fn run(&self, config: &TariffConfiguration) -> Result {
        ensure!(!self.interval.is_zero(), "the polling interval must be positive");

        // TODO: cancel the pending tick on termination instead of waiting for it.
        let should_terminate = Arc::new(AtomicBool::new(false));
        for signal in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT] {
            signal_hook::flag::register(signal, Arc::clone(&should_terminate))?;
        }

        let mut interval = interval(self.interval.into());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !should_terminate.load(Ordering::Relaxed) {
            interval.tick().await;
            let current = CurrentPrice::try_at(config, Local::now())?;
            info!(
                price = %current.price,
                season = %current.season,
                period = %current.period,
                hour = current.hour,
                "current import price",
            );
        }

        info!("terminated");
        Ok(())
    }
}
