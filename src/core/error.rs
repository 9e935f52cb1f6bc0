use thiserror::Error;

/// Failures of the pricing engine.
///
/// Classification itself never fails: these only surface when a caller names a period
/// explicitly or when a delivery price override cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("`{season}` has no `{period}` period")]
    InvalidPeriod { season: String, period: String },

    #[error("unknown season `{0}`, expected `summer` or `winter`")]
    UnknownSeason(String),

    #[error("malformed delivery price override for `{key}`: {reason}")]
    Configuration { key: String, reason: String },
}

impl PricingError {
    pub fn invalid_period(season: impl Into<String>, period: impl Into<String>) -> Self {
        Self::InvalidPeriod { season: season.into(), period: period.into() }
    }

    pub fn configuration(key: impl ToString, reason: impl Into<String>) -> Self {
        Self::Configuration { key: key.to_string(), reason: reason.into() }
    }
}
