//! Structural checks shared by the intra-unit and cross-unit passes.

use serde::{Deserialize, Serialize};

use super::indicators::SamenessCode;
use super::rule::SamenessSet;
use crate::pricing::domain::{
    FareUsage, OneWayRoundTrip, OpenJawSubtype, PricingUnit, PricingUnitType, INDUSTRY_CARRIER,
};

/// Shape and open-jaw subtype a unit is judged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveShape {
    pub shape: PricingUnitType,
    pub open_jaw_subtype: OpenJawSubtype,
}

impl EffectiveShape {
    pub fn declared(pu: &PricingUnit) -> Self {
        Self {
            shape: pu.shape,
            open_jaw_subtype: pu.open_jaw_subtype,
        }
    }
}

/// Two round-trip fares that are each other's exact reverse.
pub fn is_mirror_image(pu: &PricingUnit) -> bool {
    mirror_image(pu.shape, &pu.fare_usages)
}

pub(crate) fn mirror_image(shape: PricingUnitType, fares: &[FareUsage]) -> bool {
    let [outbound, inbound] = fares else {
        return false;
    };
    shape == PricingUnitType::RoundTrip
        && outbound.owrt == OneWayRoundTrip::RoundTripMayNotHalve
        && inbound.owrt == OneWayRoundTrip::RoundTripMayNotHalve
        && outbound.fare_class == inbound.fare_class
        && outbound.carrier == inbound.carrier
        && outbound.rule_number == inbound.rule_number
        && outbound.rule_tariff == inbound.rule_tariff
}

/// Which ends of a journey fail to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEnds {
    pub origin: bool,
    pub turnaround: bool,
}

/// `None` when fewer than two fares or any fare lacks city codes.
pub fn open_ends(fares: &[FareUsage]) -> Option<OpenEnds> {
    if fares.len() < 2 || fares.iter().any(|fare| !fare.market.has_cities()) {
        return None;
    }
    let first = fares.first()?;
    let last = fares.last()?;
    Some(OpenEnds {
        origin: first.market.board_multi_city != last.market.off_multi_city,
        turnaround: fares
            .windows(2)
            .any(|pair| pair[1].market.board_multi_city != pair[0].market.off_multi_city),
    })
}

/// Derives the open-jaw subtype from geography when upstream left it unknown.
///
/// A unit whose ends all meet is judged as a round trip or circle trip.
pub fn classify_open_jaw(pu: &PricingUnit) -> EffectiveShape {
    let declared = EffectiveShape::declared(pu);
    if pu.shape != PricingUnitType::OpenJaw || pu.open_jaw_subtype != OpenJawSubtype::Unknown {
        return declared;
    }
    let Some(ends) = open_ends(&pu.fare_usages) else {
        return declared;
    };

    let open_jaw = |subtype| EffectiveShape {
        shape: PricingUnitType::OpenJaw,
        open_jaw_subtype: subtype,
    };
    match (ends.origin, ends.turnaround) {
        (false, false) => EffectiveShape {
            shape: PricingUnitType::closed_for(pu.fare_usages.len()),
            open_jaw_subtype: OpenJawSubtype::Unknown,
        },
        (true, false) => open_jaw(OpenJawSubtype::OriginOpenJaw),
        (false, true) => open_jaw(OpenJawSubtype::DestinationOpenJaw),
        (true, true) => open_jaw(OpenJawSubtype::DoubleOpenJaw),
    }
}

/// Compares one attribute of two fares.
pub fn fares_match(code: SamenessCode, first: &FareUsage, other: &FareUsage) -> bool {
    match code {
        SamenessCode::SameCarrier => carriers_match(first, other),
        SamenessCode::SameRule => first.rule_number == other.rule_number,
        SamenessCode::SameTariff => first.rule_tariff == other.rule_tariff,
        SamenessCode::SameFareClass => first.fare_class == other.fare_class,
        SamenessCode::SameFareType => first.fare_type == other.fare_type,
    }
}

/// An industry fare counts as the carrier governing its market.
fn carriers_match(first: &FareUsage, other: &FareUsage) -> bool {
    if first.carrier == other.carrier {
        return true;
    }
    let industry_governed_by = |industry: &FareUsage, carrier: &FareUsage| {
        industry.carrier == INDUSTRY_CARRIER
            && !industry.market.governing_carrier.is_empty()
            && industry.market.governing_carrier == carrier.carrier
    };
    industry_governed_by(first, other) || industry_governed_by(other, first)
}

/// First fare, from the second onward, that differs from the first fare.
pub fn first_mismatch(code: SamenessCode, fares: &[FareUsage]) -> Option<&FareUsage> {
    let (first, rest) = fares.split_first()?;
    rest.iter().find(|fare| !fares_match(code, first, fare))
}

/// First unmet requirement in priority order, with the fare that breaks it.
pub fn first_unmet_requirement<'a>(
    required: &SamenessSet,
    fares: &'a [FareUsage],
) -> Option<(SamenessCode, &'a FareUsage)> {
    required
        .in_priority_order()
        .find_map(|code| first_mismatch(code, fares).map(|fare| (code, fare)))
}

/// Fares whose board and off nations differ.
pub fn international_fare_count(fares: &[FareUsage]) -> usize {
    fares
        .iter()
        .filter(|fare| fare.market.is_international())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::combinability::SamenessRequirements;
    use crate::pricing::domain::FareMarket;

    fn round_trip_fare(carrier: &str) -> FareUsage {
        FareUsage {
            owrt: OneWayRoundTrip::RoundTripMayNotHalve,
            rule_tariff: 3,
            ..FareUsage::new(carrier, "1000", "Y26")
        }
    }

    fn located(board: &str, off: &str) -> FareUsage {
        FareUsage::new("AB", "1000", "Y").with_market(FareMarket::new(board, off))
    }

    #[test]
    fn mirror_image_requires_identical_round_trip_fares() {
        let mirror = PricingUnit::new(
            PricingUnitType::RoundTrip,
            vec![round_trip_fare("AB"), round_trip_fare("AB")],
        );
        let other_carrier = PricingUnit::new(
            PricingUnitType::RoundTrip,
            vec![round_trip_fare("AB"), round_trip_fare("CD")],
        );
        let circle = PricingUnit::new(
            PricingUnitType::CircleTrip,
            vec![round_trip_fare("AB"), round_trip_fare("AB")],
        );

        assert!(is_mirror_image(&mirror));
        assert!(!is_mirror_image(&other_carrier));
        assert!(!is_mirror_image(&circle));
    }

    #[test]
    fn halvable_fares_are_not_mirror_images() {
        let mut fares = vec![round_trip_fare("AB"), round_trip_fare("AB")];
        fares[1].owrt = OneWayRoundTrip::AllWays;

        assert!(!is_mirror_image(&PricingUnit::new(
            PricingUnitType::RoundTrip,
            fares
        )));
    }

    #[test]
    fn classification_follows_open_ends() {
        let cases = [
            (("NYC", "LON"), ("LON", "BOS"), OpenJawSubtype::OriginOpenJaw),
            (("NYC", "LON"), ("PAR", "NYC"), OpenJawSubtype::DestinationOpenJaw),
            (("NYC", "LON"), ("PAR", "BOS"), OpenJawSubtype::DoubleOpenJaw),
        ];
        for ((b1, o1), (b2, o2), expected) in cases {
            let pu = PricingUnit::new(
                PricingUnitType::OpenJaw,
                vec![located(b1, o1), located(b2, o2)],
            );
            assert_eq!(classify_open_jaw(&pu).open_jaw_subtype, expected);
        }
    }

    #[test]
    fn closed_open_jaw_is_judged_as_round_trip() {
        let pu = PricingUnit::new(
            PricingUnitType::OpenJaw,
            vec![located("NYC", "LON"), located("LON", "NYC")],
        );

        assert_eq!(classify_open_jaw(&pu).shape, PricingUnitType::RoundTrip);
    }

    #[test]
    fn declared_subtype_is_never_reclassified() {
        let pu = PricingUnit::new(
            PricingUnitType::OpenJaw,
            vec![located("NYC", "LON"), located("LON", "NYC")],
        )
        .with_subtype(OpenJawSubtype::DoubleOpenJaw);

        assert_eq!(
            classify_open_jaw(&pu).open_jaw_subtype,
            OpenJawSubtype::DoubleOpenJaw
        );
    }

    #[test]
    fn mismatch_names_the_later_fare() {
        let fares = vec![
            FareUsage::new("AB", "1000", "Y"),
            FareUsage::new("AB", "1000", "Y"),
            FareUsage::new("CD", "1000", "Y"),
        ];

        let offender = first_mismatch(SamenessCode::SameCarrier, &fares).expect("mismatch");

        assert!(std::ptr::eq(offender, &fares[2]));
    }

    #[test]
    fn industry_fare_matches_governing_carrier() {
        let mut industry = FareUsage::new("YY", "1000", "Y");
        industry.market.governing_carrier = "AB".to_string();
        let fares = vec![FareUsage::new("AB", "1000", "Y"), industry];

        assert_eq!(first_mismatch(SamenessCode::SameCarrier, &fares), None);
    }

    #[test]
    fn carrier_is_checked_before_fare_class() {
        let mut required = SamenessSet::default();
        required.extend(
            &SamenessRequirements::same_carrier().with(SamenessCode::SameFareClass),
        );
        let fares = vec![
            FareUsage::new("AB", "1000", "Y"),
            FareUsage::new("AB", "1000", "B"),
            FareUsage::new("CD", "1000", "Y"),
        ];

        let (code, offender) = first_unmet_requirement(&required, &fares).expect("mismatch");

        assert_eq!(code, SamenessCode::SameCarrier);
        assert!(std::ptr::eq(offender, &fares[2]));
    }
}
