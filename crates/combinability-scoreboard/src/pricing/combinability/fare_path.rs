//! Cross-unit checks that need the whole fare path in view.

use tracing::{debug, info, warn};

use super::analyzers::{self, EffectiveShape};
use super::diagnostics::{self, DiagnosticSink};
use super::indicators::{OpenJawDirection, RoundTripIndicator};
use super::rule::CombinabilityRule;
use super::scoreboard::{side_trip_violation, CombinabilityScoreboard};
use super::verdict::{DiagnosticMessage, FailureReason, Outcome, Verdict};
use crate::pricing::domain::{
    FarePath, FareUsage, OpenJawSubtype, PricingUnit, PricingUnitType,
};

impl CombinabilityScoreboard {
    /// End-on-end and side-trip rules against the joins the path actually makes.
    pub fn analyze_one_way<'a>(
        &self,
        fare_path: &'a FarePath,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        let lone_one_way = matches!(
            fare_path.pricing_units.as_slice(),
            [unit] if unit.shape == PricingUnitType::OneWay
        );
        let mut assumed = false;

        'units: for (index, pu) in fare_path.pricing_units.iter().enumerate() {
            let no_partner = fare_path.has_no_end_on_end_partner(index);
            let mirror = analyzers::is_mirror_image(pu);

            for fare in &pu.fare_usages {
                if side_trip_violation(pu, fare) {
                    return self.fail_fare(FailureReason::SideTripNotPermitted, fare, diag);
                }
                let Some(rule) = fare.rule() else {
                    if mirror || lone_one_way {
                        debug!(fare_class = %fare.fare_class, "no record 2 cat 10, system assumption");
                        assumed = true;
                        continue 'units;
                    }
                    warn!(fare_class = %fare.fare_class, "no record 2 cat 10");
                    return self.fail_fare(FailureReason::NoRec2Cat10, fare, diag);
                };
                if let Some(reason) = end_on_end_violation(pu, rule, no_partner) {
                    return self.fail_fare(reason, fare, diag);
                }
            }
        }

        if assumed {
            diagnostics::write_message(diag, DiagnosticMessage::PassedSystemAssumption, None);
            Outcome::system_assumption()
        } else {
            Outcome::passed()
        }
    }

    /// Direction and country qualifiers of every open-jaw unit in the path.
    pub fn analyze_open_jaw<'a>(
        &self,
        fare_path: &'a FarePath,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        let shapes = self.unit_shapes(fare_path, diag);
        self.check_open_jaws(fare_path, &shapes, diag)
    }

    /// Mirror-image qualifiers of every round-trip unit in the path.
    pub fn analyze_round_trip<'a>(
        &self,
        fare_path: &'a FarePath,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        let shapes = self.unit_shapes(fare_path, diag);
        self.check_round_trips(fare_path, &shapes, diag)
    }

    /// One-way, open-jaw and round-trip analysis in order; first failure wins.
    pub fn analyze_fare_path<'a>(
        &self,
        fare_path: &'a FarePath,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        let one_way = self.analyze_one_way(fare_path, diag);
        if !one_way.is_pass() {
            return one_way;
        }
        let shapes = self.unit_shapes(fare_path, diag);
        let open_jaw = self.check_open_jaws(fare_path, &shapes, diag);
        if !open_jaw.is_pass() {
            return open_jaw;
        }
        let round_trip = self.check_round_trips(fare_path, &shapes, diag);
        if !round_trip.is_pass() {
            return round_trip;
        }
        if one_way.verdict == Verdict::PassedSystemAssumption {
            one_way
        } else {
            Outcome::passed()
        }
    }

    fn unit_shapes(&self, fare_path: &FarePath, diag: &mut dyn DiagnosticSink) -> Vec<EffectiveShape> {
        fare_path
            .pricing_units
            .iter()
            .map(|pu| self.effective_shape(pu, diag))
            .collect()
    }

    fn check_open_jaws<'a>(
        &self,
        fare_path: &'a FarePath,
        shapes: &[EffectiveShape],
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        for (pu, &shape) in fare_path.pricing_units.iter().zip(shapes) {
            if shape.shape != PricingUnitType::OpenJaw {
                continue;
            }
            let international = analyzers::international_fare_count(&pu.fare_usages);

            for fare in &pu.fare_usages {
                let Some(rule) = fare.rule() else {
                    continue;
                };
                if let Some(reason) = open_jaw_violation(pu, shape, rule, international) {
                    return self.fail_fare(reason, fare, diag);
                }
            }
        }
        Outcome::passed()
    }

    fn check_round_trips<'a>(
        &self,
        fare_path: &'a FarePath,
        shapes: &[EffectiveShape],
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        for (pu, &shape) in fare_path.pricing_units.iter().zip(shapes) {
            if shape.shape != PricingUnitType::RoundTrip {
                continue;
            }
            let mirror = analyzers::mirror_image(shape.shape, &pu.fare_usages);

            for fare in &pu.fare_usages {
                let Some(rule) = fare.rule() else {
                    continue;
                };
                if let Some(reason) = round_trip_violation(rule, mirror) {
                    return self.fail_fare(reason, fare, diag);
                }
            }
        }
        Outcome::passed()
    }

    fn fail_fare<'a>(
        &self,
        reason: FailureReason,
        fare: &'a FareUsage,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        info!(
            reason = reason.phrase(),
            fare_class = %fare.fare_class,
            rule = %fare.rule_number,
            "fare path combination rejected"
        );
        diagnostics::write_fares(diag, reason, Some(fare), None);
        self.report(Outcome::failed(reason, Some(fare)))
    }
}

fn end_on_end_violation(
    pu: &PricingUnit,
    rule: &CombinabilityRule,
    no_partner: bool,
) -> Option<FailureReason> {
    let indicator = rule.end_on_end;
    if pu.shape == PricingUnitType::OneWay && indicator.is_required() && no_partner {
        return Some(FailureReason::EndOnEndRequired);
    }
    if indicator.is_not_permitted() && !no_partner {
        return Some(FailureReason::EndOnEndNotPermitted);
    }
    None
}

fn open_jaw_violation(
    pu: &PricingUnit,
    shape: EffectiveShape,
    rule: &CombinabilityRule,
    international: usize,
) -> Option<FailureReason> {
    let subtype = shape.open_jaw_subtype;
    match rule.open_jaw_direction {
        OpenJawDirection::DestinationOpenJawRequired
            if subtype != OpenJawSubtype::DestinationOpenJaw =>
        {
            return Some(FailureReason::DestOpenJawRequired);
        }
        OpenJawDirection::OriginOpenJawRequired if subtype != OpenJawSubtype::OriginOpenJaw => {
            return Some(FailureReason::OriginOpenJawRequired);
        }
        _ => {}
    }

    if rule.single_open_jaw.limits_international_fares() && international > 2 {
        return Some(FailureReason::TwoMaxIntlFaresSameCountryRequired);
    }
    let different_country = rule.single_open_jaw.requires_different_country()
        || rule.double_open_jaw.requires_different_country();
    if different_country && pu.same_nation_open_jaw {
        return Some(FailureReason::OjDiffCountryRequired);
    }
    let origin_same_country = rule.single_open_jaw.requires_origin_same_country()
        || rule.double_open_jaw.requires_origin_same_country();
    if origin_same_country
        && subtype == OpenJawSubtype::OriginOpenJaw
        && !pu.same_nation_open_jaw
    {
        return Some(FailureReason::OjSameCountryRequired);
    }
    None
}

fn round_trip_violation(rule: &CombinabilityRule, mirror: bool) -> Option<FailureReason> {
    match rule.round_trip {
        indicator if indicator.admits(mirror) => None,
        RoundTripIndicator::NotPermittedMirrorImageRestricted => {
            Some(FailureReason::RoundTripNotPermitted)
        }
        _ => Some(FailureReason::MirrorImageNotPermitted),
    }
}
