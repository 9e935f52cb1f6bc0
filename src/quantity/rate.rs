quantity!(
    /// Euro per kilowatt-hour.
    KilowattHourRate, via: f64, suffix: "€/kWh", precision: 6
);

impl KilowattHourRate {
    /// Round the rate to micro-euros, the precision tariff sheets are published with.
    #[must_use]
    pub fn round_to_micros(self) -> Self {
        Self((self.0 * 1_000_000.0).round() / 1_000_000.0)
    }
}
