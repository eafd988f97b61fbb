use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::combinability::CombinabilityRule;

/// Industry carrier code used by fares published for all carriers.
pub const INDUSTRY_CARRIER: &str = "YY";

/// Geometric shape of a pricing unit as built upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnitType {
    OneWay,
    RoundTrip,
    CircleTrip,
    OpenJaw,
    #[default]
    Unknown,
}

impl PricingUnitType {
    pub const fn label(self) -> &'static str {
        match self {
            PricingUnitType::OneWay => "OW",
            PricingUnitType::RoundTrip => "RT",
            PricingUnitType::CircleTrip => "CT",
            PricingUnitType::OpenJaw => "OJ",
            PricingUnitType::Unknown => "UNK",
        }
    }

    /// Shape a closed journey takes for the given number of fare components.
    pub const fn closed_for(fare_count: usize) -> Self {
        if fare_count > 2 {
            PricingUnitType::CircleTrip
        } else {
            PricingUnitType::RoundTrip
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenJawSubtype {
    OriginOpenJaw,
    DestinationOpenJaw,
    DoubleOpenJaw,
    #[default]
    Unknown,
}

impl OpenJawSubtype {
    pub const fn label(self) -> &'static str {
        match self {
            OpenJawSubtype::OriginOpenJaw => "ORIG-OJ",
            OpenJawSubtype::DestinationOpenJaw => "DEST-OJ",
            OpenJawSubtype::DoubleOpenJaw => "DOJ",
            OpenJawSubtype::Unknown => "UNK",
        }
    }
}

/// One-way/round-trip tag of the published fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneWayRoundTrip {
    OneWayMayDouble,
    OneWayMayNotDouble,
    RoundTripMayNotHalve,
    #[default]
    AllWays,
}

/// Geography of the market a fare component travels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FareMarket {
    pub board_multi_city: String,
    pub off_multi_city: String,
    pub board_nation: String,
    pub off_nation: String,
    pub governing_carrier: String,
    pub travel_date: Option<NaiveDate>,
}

impl FareMarket {
    pub fn new(board: impl Into<String>, off: impl Into<String>) -> Self {
        Self {
            board_multi_city: board.into(),
            off_multi_city: off.into(),
            ..Self::default()
        }
    }

    pub fn with_nations(mut self, board: impl Into<String>, off: impl Into<String>) -> Self {
        self.board_nation = board.into();
        self.off_nation = off.into();
        self
    }

    pub fn with_governing_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.governing_carrier = carrier.into();
        self
    }

    pub fn has_cities(&self) -> bool {
        !self.board_multi_city.is_empty() && !self.off_multi_city.is_empty()
    }

    /// Board and off points lie in different nations.
    pub fn is_international(&self) -> bool {
        !self.board_nation.is_empty()
            && !self.off_nation.is_empty()
            && self.board_nation != self.off_nation
    }
}

/// A single priced fare component inside a pricing unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FareUsage {
    pub carrier: String,
    pub rule_number: String,
    pub rule_tariff: u16,
    pub fare_class: String,
    pub fare_type: String,
    pub owrt: OneWayRoundTrip,
    pub is_inbound: bool,
    pub has_side_trip: bool,
    pub market: FareMarket,
    pub combinability_rule: Option<CombinabilityRule>,
}

impl FareUsage {
    pub fn new(
        carrier: impl Into<String>,
        rule_number: impl Into<String>,
        fare_class: impl Into<String>,
    ) -> Self {
        Self {
            carrier: carrier.into(),
            rule_number: rule_number.into(),
            fare_class: fare_class.into(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: CombinabilityRule) -> Self {
        self.combinability_rule = Some(rule);
        self
    }

    pub fn with_market(mut self, market: FareMarket) -> Self {
        self.market = market;
        self
    }

    pub fn rule(&self) -> Option<&CombinabilityRule> {
        self.combinability_rule.as_ref()
    }

    /// `<fareClass>-<ruleNumber>` as printed in diagnostics.
    pub fn display_key(&self) -> String {
        format!("{}-{}", self.fare_class, self.rule_number)
    }
}

/// Fare components priced together as one unit of travel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingUnit {
    pub shape: PricingUnitType,
    pub open_jaw_subtype: OpenJawSubtype,
    pub fare_usages: Vec<FareUsage>,
    pub is_side_trip_unit: bool,
    pub requires_no_end_on_end: bool,
    pub same_nation_open_jaw: bool,
}

impl PricingUnit {
    pub fn new(shape: PricingUnitType, fare_usages: Vec<FareUsage>) -> Self {
        Self {
            shape,
            fare_usages,
            ..Self::default()
        }
    }

    pub fn with_subtype(mut self, subtype: OpenJawSubtype) -> Self {
        self.open_jaw_subtype = subtype;
        self
    }

    pub fn with_no_end_on_end(mut self) -> Self {
        self.requires_no_end_on_end = true;
        self
    }

    /// Index of a borrowed fare component within this unit, by identity.
    pub fn position_of(&self, fare_usage: &FareUsage) -> Option<usize> {
        self.fare_usages
            .iter()
            .position(|candidate| std::ptr::eq(candidate, fare_usage))
    }
}

/// Ordered pricing units of one priced itinerary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FarePath {
    pub pricing_units: Vec<PricingUnit>,
}

impl FarePath {
    pub fn new(pricing_units: Vec<PricingUnit>) -> Self {
        Self { pricing_units }
    }

    /// Whether the unit at `index` has nothing it may be joined end-on-end with.
    ///
    /// A unit can absorb the join unless one of its fares forbids end-on-end.
    pub fn has_no_end_on_end_partner(&self, index: usize) -> bool {
        let Some(unit) = self.pricing_units.get(index) else {
            return true;
        };
        if unit.requires_no_end_on_end {
            return true;
        }
        !self
            .pricing_units
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .any(|(_, other)| accepts_end_on_end(other))
    }

    /// `(unit, fare)` indices of a borrowed fare component, by identity.
    pub fn position_of(&self, fare_usage: &FareUsage) -> Option<(usize, usize)> {
        self.pricing_units
            .iter()
            .enumerate()
            .find_map(|(unit_index, unit)| {
                unit.position_of(fare_usage)
                    .map(|fare_index| (unit_index, fare_index))
            })
    }
}

fn accepts_end_on_end(unit: &PricingUnit) -> bool {
    !unit.fare_usages.is_empty()
        && unit.fare_usages.iter().all(|fare| {
            fare.rule()
                .map_or(true, |rule| !rule.end_on_end.is_not_permitted())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::combinability::{CombinabilityRule, EndOnEndIndicator};

    fn unit_with_eoe(indicator: EndOnEndIndicator) -> PricingUnit {
        let rule = CombinabilityRule {
            end_on_end: indicator,
            ..CombinabilityRule::default()
        };
        PricingUnit::new(
            PricingUnitType::OneWay,
            vec![FareUsage::new("AB", "1000", "Y").with_rule(rule)],
        )
    }

    #[test]
    fn lone_unit_has_no_end_on_end_partner() {
        let path = FarePath::new(vec![unit_with_eoe(EndOnEndIndicator::Permitted)]);

        assert!(path.has_no_end_on_end_partner(0));
    }

    #[test]
    fn partner_forbidding_end_on_end_cannot_absorb_join() {
        let path = FarePath::new(vec![
            unit_with_eoe(EndOnEndIndicator::Required),
            unit_with_eoe(EndOnEndIndicator::NotPermittedNoSideTrip),
        ]);

        assert!(path.has_no_end_on_end_partner(0));
        assert!(!path.has_no_end_on_end_partner(1));
    }

    #[test]
    fn international_requires_both_nations() {
        let domestic = FareMarket::new("NYC", "CHI").with_nations("US", "US");
        let partial = FareMarket::new("NYC", "LON").with_nations("US", "");
        let international = FareMarket::new("NYC", "LON").with_nations("US", "GB");

        assert!(!domestic.is_international());
        assert!(!partial.is_international());
        assert!(international.is_international());
    }

    #[test]
    fn position_is_resolved_by_identity() {
        let fare = FareUsage::new("AB", "1000", "Y");
        let unit = PricingUnit::new(PricingUnitType::RoundTrip, vec![fare.clone(), fare]);

        assert_eq!(unit.position_of(&unit.fare_usages[1]), Some(1));
        assert_eq!(unit.position_of(&FareUsage::new("AB", "1000", "Y")), None);
    }
}
