use serde::{Deserialize, Serialize};

use super::indicators::{
    Applicability, CircleTripIndicator, CombinationScope, EndOnEndIndicator, OpenJawDirection,
    OpenJawIndicator, RoundTripIndicator, SamenessCode,
};

/// The three sameness slots a category carries on a Record 2.
///
/// Slot one holds the carrier requirement, slot two rule or tariff, slot
/// three fare class or fare type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamenessRequirements {
    pub carrier: Option<SamenessCode>,
    pub rule_or_tariff: Option<SamenessCode>,
    pub fare_class_or_type: Option<SamenessCode>,
}

impl SamenessRequirements {
    pub fn same_carrier() -> Self {
        Self {
            carrier: Some(SamenessCode::SameCarrier),
            ..Self::default()
        }
    }

    pub fn with(mut self, code: SamenessCode) -> Self {
        match code {
            SamenessCode::SameCarrier => self.carrier = Some(code),
            SamenessCode::SameRule | SamenessCode::SameTariff => self.rule_or_tariff = Some(code),
            SamenessCode::SameFareClass | SamenessCode::SameFareType => {
                self.fare_class_or_type = Some(code)
            }
        }
        self
    }

    pub fn codes(&self) -> impl Iterator<Item = SamenessCode> {
        [self.carrier, self.rule_or_tariff, self.fare_class_or_type]
            .into_iter()
            .flatten()
    }

    pub fn requires(&self, code: SamenessCode) -> bool {
        self.codes().any(|candidate| candidate == code)
    }
}

/// Union of sameness requirements gathered across a pricing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamenessSet {
    required: [bool; 5],
}

impl SamenessSet {
    pub fn insert(&mut self, code: SamenessCode) {
        self.required[slot(code)] = true;
    }

    pub fn extend(&mut self, requirements: &SamenessRequirements) {
        for code in requirements.codes() {
            self.insert(code);
        }
    }

    pub fn contains(&self, code: SamenessCode) -> bool {
        self.required[slot(code)]
    }

    /// Required codes in evaluation priority order.
    pub fn in_priority_order(&self) -> impl Iterator<Item = SamenessCode> + '_ {
        SamenessCode::PRIORITY
            .into_iter()
            .filter(|code| self.contains(*code))
    }
}

const fn slot(code: SamenessCode) -> usize {
    match code {
        SamenessCode::SameCarrier => 0,
        SamenessCode::SameRule => 1,
        SamenessCode::SameTariff => 2,
        SamenessCode::SameFareClass => 3,
        SamenessCode::SameFareType => 4,
    }
}

/// Record 2 Category 10 combinability rule attached to a fare.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinabilityRule {
    pub vendor: String,
    pub applicability: Applicability,
    pub end_on_end: EndOnEndIndicator,
    pub single_open_jaw: OpenJawIndicator,
    pub double_open_jaw: OpenJawIndicator,
    pub round_trip: RoundTripIndicator,
    pub circle_trip: CircleTripIndicator,
    pub open_jaw_direction: OpenJawDirection,
    pub end_on_end_sameness: SamenessRequirements,
    pub open_jaw_sameness: SamenessRequirements,
    pub round_trip_sameness: SamenessRequirements,
    pub circle_trip_sameness: SamenessRequirements,
    pub same_points_item: Option<u32>,
}

impl CombinabilityRule {
    pub fn sameness(&self, scope: CombinationScope) -> &SamenessRequirements {
        match scope {
            CombinationScope::EndOnEnd => &self.end_on_end_sameness,
            CombinationScope::OpenJaw => &self.open_jaw_sameness,
            CombinationScope::RoundTrip => &self.round_trip_sameness,
            CombinationScope::CircleTrip => &self.circle_trip_sameness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tariff_and_rule_share_a_slot() {
        let requirements = SamenessRequirements::default()
            .with(SamenessCode::SameRule)
            .with(SamenessCode::SameTariff);

        assert_eq!(requirements.rule_or_tariff, Some(SamenessCode::SameTariff));
        assert!(!requirements.requires(SamenessCode::SameRule));
    }

    #[test]
    fn union_is_reported_in_priority_order() {
        let mut set = SamenessSet::default();
        set.extend(&SamenessRequirements::default().with(SamenessCode::SameFareType));
        set.extend(&SamenessRequirements::same_carrier().with(SamenessCode::SameRule));

        let ordered: Vec<_> = set.in_priority_order().collect();

        assert_eq!(
            ordered,
            vec![
                SamenessCode::SameCarrier,
                SamenessCode::SameRule,
                SamenessCode::SameFareType
            ]
        );
    }
}
