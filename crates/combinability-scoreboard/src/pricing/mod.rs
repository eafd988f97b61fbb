pub mod combinability;
pub mod domain;
pub mod fixtures;

pub use domain::{
    FareMarket, FarePath, FareUsage, OneWayRoundTrip, OpenJawSubtype, PricingUnit,
    PricingUnitType, INDUSTRY_CARRIER,
};
