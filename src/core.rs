pub mod error;
pub mod forecast;
pub mod period;
pub mod price;
pub mod tariff;
pub mod tier;
