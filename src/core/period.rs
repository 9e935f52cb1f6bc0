//! Season and time-of-use period classification.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{Datelike, Timelike, Weekday};
use enumset::{EnumSet, enum_set};
use serde::Serialize;

use crate::core::error::PricingError;

#[derive(
    Copy,
    Clone,
    Debug,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    clap::ValueEnum,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// April to September.
    Summer,

    /// October to March.
    Winter,
}

impl Season {
    pub const ALL: [Self; 2] = [Self::Summer, Self::Winter];

    pub fn of(timestamp: &impl Datelike) -> Self {
        if (4..=9).contains(&timestamp.month()) { Self::Summer } else { Self::Winter }
    }

    /// Periods the tariff distinguishes in the season.
    pub const fn periods(self) -> EnumSet<Period> {
        match self {
            Self::Summer => enum_set!(Period::Normal | Period::OffpeakWeekday | Period::OffpeakWeekend),
            Self::Winter => enum_set!(Period::Normal | Period::OffpeakDay | Period::OffpeakNight),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Winter => "winter",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| PricingError::UnknownSeason(s.to_owned()))
    }
}

#[derive(Debug, Hash, Ord, PartialOrd, clap::ValueEnum, enumset::EnumSetType, Serialize)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Period {
    Normal,

    /// Summer afternoon on working days.
    OffpeakWeekday,

    /// Summer afternoon on Saturdays and Sundays.
    OffpeakWeekend,

    /// Winter afternoon.
    OffpeakDay,

    /// Winter night.
    OffpeakNight,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::OffpeakWeekday => "offpeak_weekday",
            Self::OffpeakWeekend => "offpeak_weekend",
            Self::OffpeakDay => "offpeak_day",
            Self::OffpeakNight => "offpeak_night",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valid season and period combination, for example `summer_offpeak_weekend`.
///
/// This is also the key of delivery price overrides.
#[must_use]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct PeriodKey {
    season: Season,
    period: Period,
}

impl PeriodKey {
    pub fn try_new(season: Season, period: Period) -> Result<Self, PricingError> {
        if season.periods().contains(period) {
            Ok(Self { season, period })
        } else {
            Err(PricingError::invalid_period(season.as_str(), period.as_str()))
        }
    }

    /// Classify the local timestamp.
    ///
    /// Summer off-peak runs from 12:00 until 18:00. Winter «normal» wraps around midnight
    /// until 01:00.
    pub fn classify<T: Datelike + Timelike>(timestamp: &T) -> Self {
        let season = Season::of(timestamp);
        let period = match season {
            Season::Summer => match timestamp.hour() {
                12..18 if matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun) => {
                    Period::OffpeakWeekend
                }
                12..18 => Period::OffpeakWeekday,
                _ => Period::Normal,
            },
            Season::Winter => match timestamp.hour() {
                1..6 => Period::OffpeakNight,
                12..16 => Period::OffpeakDay,
                _ => Period::Normal,
            },
        };
        Self { season, period }
    }

    /// Iterate over all valid keys, summer first.
    pub fn all() -> impl Iterator<Item = Self> {
        Season::ALL
            .into_iter()
            .flat_map(|season| season.periods().iter().map(move |period| Self { season, period }))
    }

    pub const fn season(self) -> Season {
        self.season
    }

    pub const fn period(self) -> Period {
        self.period
    }

    /// Human-readable label as shown on the tariff sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.season, self.period) {
            (Season::Summer, Period::OffpeakWeekday) => "Zomer dal week (12:00-18:00)",
            (Season::Summer, Period::OffpeakWeekend) => "Zomer dal weekend (12:00-18:00)",
            (Season::Summer, _) => "Zomer normaal (00:00-12:00, 18:00-24:00)",
            (Season::Winter, Period::OffpeakDay) => "Winter dal dag (12:00-16:00)",
            (Season::Winter, Period::OffpeakNight) => "Winter dal nacht (01:00-06:00)",
            (Season::Winter, _) => "Winter normaal (06:00-12:00, 16:00-01:00)",
        }
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.season, self.period)
    }
}

impl FromStr for PeriodKey {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (season, period) =
            s.split_once('_').ok_or_else(|| PricingError::invalid_period(s, ""))?;
        let season = season.parse::<Season>().map_err(|_| PricingError::invalid_period(season, period))?;
        let period = EnumSet::<Period>::all()
            .iter()
            .find(|candidate| candidate.as_str() == period)
            .ok_or_else(|| PricingError::invalid_period(season.as_str(), period))?;
        Self::try_new(season, period)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use itertools::Itertools;

    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_season_of() {
        assert_eq!(Season::of(&at(2024, 3, 31, 23)), Season::Winter);
        assert_eq!(Season::of(&at(2024, 4, 1, 0)), Season::Summer);
        assert_eq!(Season::of(&at(2024, 9, 30, 23)), Season::Summer);
        assert_eq!(Season::of(&at(2024, 10, 1, 0)), Season::Winter);
        assert_eq!(Season::of(&at(2024, 1, 10, 3)), Season::Winter);
    }

    #[test]
    fn test_classify_summer_weekday_afternoon() {
        // 2024-06-10 is a Monday.
        let key = PeriodKey::classify(&at(2024, 6, 10, 14));
        assert_eq!((key.season(), key.period()), (Season::Summer, Period::OffpeakWeekday));
    }

    #[test]
    fn test_classify_winter_night() {
        let key = PeriodKey::classify(&at(2024, 1, 10, 3));
        assert_eq!((key.season(), key.period()), (Season::Winter, Period::OffpeakNight));
    }

    #[test]
    fn test_classify_summer_weekend_boundaries() {
        // 2024-06-15 is a Saturday.
        assert_eq!(PeriodKey::classify(&at(2024, 6, 15, 11)).period(), Period::Normal);
        assert_eq!(PeriodKey::classify(&at(2024, 6, 15, 12)).period(), Period::OffpeakWeekend);
        assert_eq!(PeriodKey::classify(&at(2024, 6, 16, 17)).period(), Period::OffpeakWeekend);
        assert_eq!(PeriodKey::classify(&at(2024, 6, 16, 18)).period(), Period::Normal);
    }

    #[test]
    fn test_classify_winter_boundaries() {
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 0)).period(), Period::Normal);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 1)).period(), Period::OffpeakNight);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 5)).period(), Period::OffpeakNight);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 6)).period(), Period::Normal);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 12)).period(), Period::OffpeakDay);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 15)).period(), Period::OffpeakDay);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 2, 16)).period(), Period::Normal);
        assert_eq!(PeriodKey::classify(&at(2024, 12, 7, 3)).period(), Period::OffpeakNight);
    }

    /// Every hour of every weekday in both seasons maps onto exactly one valid period.
    #[test]
    fn test_classify_is_total() {
        // A summer week and a winter week, both starting on Monday.
        for start in [at(2024, 6, 10, 0), at(2024, 1, 8, 0)] {
            let keys = (0..(7 * 24))
                .map(|hour| PeriodKey::classify(&(start + Duration::hours(hour))))
                .collect_vec();
            for key in &keys {
                assert!(key.season().periods().contains(key.period()), "{key}");
                assert_eq!(PeriodKey::try_new(key.season(), key.period()).as_ref(), Ok(key));
            }
            // Each valid period of the season is reached at some point.
            let reached: EnumSet<Period> = keys.iter().map(|key| key.period()).collect();
            assert_eq!(reached, keys[0].season().periods());
        }
    }

    #[test]
    fn test_summer_weekday_split() {
        for day in 10..=16 {
            let timestamp = at(2024, 6, day, 13);
            let expected = if matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun) {
                Period::OffpeakWeekend
            } else {
                Period::OffpeakWeekday
            };
            assert_eq!(PeriodKey::classify(&timestamp).period(), expected);
        }
    }

    #[test]
    fn test_winter_ignores_weekday() {
        for day in 8..=14 {
            for hour in 0..24 {
                assert_eq!(
                    PeriodKey::classify(&at(2024, 1, day, hour)),
                    PeriodKey::classify(&at(2024, 1, 8, hour)),
                );
            }
        }
    }

    #[test]
    fn test_try_new_rejects_foreign_period() {
        assert_eq!(
            PeriodKey::try_new(Season::Summer, Period::OffpeakDay),
            Err(PricingError::invalid_period("summer", "offpeak_day")),
        );
        assert!(PeriodKey::try_new(Season::Winter, Period::OffpeakWeekend).is_err());
    }

    #[test]
    fn test_from_str_ok() -> Result<(), PricingError> {
        let key: PeriodKey = "winter_offpeak_night".parse()?;
        assert_eq!((key.season(), key.period()), (Season::Winter, Period::OffpeakNight));
        assert_eq!(key.to_string(), "winter_offpeak_night");
        Ok(())
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("summer_offpeak_night".parse::<PeriodKey>().is_err());
        assert!("autumn_normal".parse::<PeriodKey>().is_err());
        assert!("summer_peak".parse::<PeriodKey>().is_err());
        assert!("normal".parse::<PeriodKey>().is_err());
    }

    #[test]
    fn test_unknown_season() {
        let error = "autumn".parse::<Season>().unwrap_err();
        assert_eq!(error, PricingError::UnknownSeason("autumn".to_owned()));
        assert_eq!(error.to_string(), "unknown season `autumn`, expected `summer` or `winter`");
    }

    #[test]
    fn test_all_keys() {
        let keys = PeriodKey::all().map(|key| key.to_string()).collect_vec();
        assert_eq!(
            keys,
            [
                "summer_normal",
                "summer_offpeak_weekday",
                "summer_offpeak_weekend",
                "winter_normal",
                "winter_offpeak_day",
                "winter_offpeak_night",
            ],
        );
    }
}
