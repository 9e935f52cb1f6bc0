//! Consumption tiers of the energy tax.

use std::{
    fmt::{Display, Formatter},
    ops::Index,
};

use serde::Serialize;

use crate::{prelude::*, quantity::energy::KilowattHours};

pub const N_TIERS: usize = 4;

/// Consumption bracket, `0..=3`.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    /// Resolve the tier by the annual consumption. A boundary value belongs to the higher tier.
    pub fn from_annual_consumption(consumption: KilowattHours) -> Self {
        let consumption = consumption.0;
        if consumption >= 50_000.0 {
            Self(3)
        } else if consumption >= 10_000.0 {
            Self(2)
        } else if consumption >= 2_900.0 {
            Self(1)
        } else {
            Self(0)
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Tier {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        ensure!(usize::from(index) < N_TIERS, "tier must be within 0..={}, got {index}", N_TIERS - 1);
        Ok(Self(index))
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One value per tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TierTable<T>(pub [T; N_TIERS]);

impl<T: Copy> TierTable<T> {
    pub const fn uniform(value: T) -> Self {
        Self([value; N_TIERS])
    }
}

impl<T> Index<Tier> for TierTable<T> {
    type Output = T;

    fn index(&self, tier: Tier) -> &Self::Output {
        &self.0[tier.index()]
    }
}
