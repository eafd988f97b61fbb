//! JSON documents describing pricing units and fare paths.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::domain::{FarePath, PricingUnit};

/// Errors raised while loading a pricing document.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read pricing document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pricing document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fare path has no pricing units")]
    EmptyFarePath,
}

pub fn pricing_unit_from_reader<R: Read>(reader: R) -> Result<PricingUnit, FixtureError> {
    from_reader(reader)
}

pub fn fare_path_from_reader<R: Read>(reader: R) -> Result<FarePath, FixtureError> {
    let fare_path: FarePath = from_reader(reader)?;
    if fare_path.pricing_units.is_empty() {
        return Err(FixtureError::EmptyFarePath);
    }
    Ok(fare_path)
}

pub fn load_pricing_unit(path: impl AsRef<Path>) -> Result<PricingUnit, FixtureError> {
    let file = File::open(path)?;
    pricing_unit_from_reader(BufReader::new(file))
}

pub fn load_fare_path(path: impl AsRef<Path>) -> Result<FarePath, FixtureError> {
    let file = File::open(path)?;
    fare_path_from_reader(BufReader::new(file))
}

fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, FixtureError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::combinability::{RoundTripIndicator, SamenessCode};
    use crate::pricing::domain::PricingUnitType;

    #[test]
    fn parses_unit_with_partial_rule() {
        let document = r#"{
            "shape": "round_trip",
            "fare_usages": [
                {
                    "carrier": "AB",
                    "rule_number": "1000",
                    "fare_class": "Y26",
                    "combinability_rule": {
                        "round_trip": "permitted",
                        "round_trip_sameness": { "carrier": "same_carrier" }
                    }
                },
                { "carrier": "AB", "rule_number": "1000", "fare_class": "Y26" }
            ]
        }"#;

        let pu = pricing_unit_from_reader(document.as_bytes()).expect("document parses");

        assert_eq!(pu.shape, PricingUnitType::RoundTrip);
        let rule = pu.fare_usages[0].rule().expect("rule attached");
        assert_eq!(rule.round_trip, RoundTripIndicator::Permitted);
        assert_eq!(
            rule.round_trip_sameness.carrier,
            Some(SamenessCode::SameCarrier)
        );
        assert!(pu.fare_usages[1].rule().is_none());
    }

    #[test]
    fn rejects_empty_fare_path() {
        let result = fare_path_from_reader(r#"{ "pricing_units": [] }"#.as_bytes());

        match result {
            Err(FixtureError::EmptyFarePath) => {}
            other => panic!("expected empty fare path error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_indicator() {
        let document = r#"{ "shape": "one_way", "fare_usages": [
            { "combinability_rule": { "end_on_end": "sometimes" } }
        ] }"#;

        match pricing_unit_from_reader(document.as_bytes()) {
            Err(FixtureError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
