use std::sync::Arc;

use tracing::{debug, info, warn};

use super::analyzers::{self, EffectiveShape};
use super::config::ScoreboardConfig;
use super::diagnostics::{self, DiagnosticSink};
use super::indicators::{
    Applicability, CircleTripIndicator, CombinationScope, OpenJawIndicator,
};
use super::rule::{CombinabilityRule, SamenessSet};
use super::same_point::{self, NoSamePoints, SamePointTable};
use super::verdict::{DiagnosticMessage, FailureReason, Outcome};
use crate::pricing::domain::{FareUsage, OpenJawSubtype, PricingUnit, PricingUnitType};

/// Category 10 validator for pricing units and fare paths.
///
/// Holds only immutable configuration and a shared read-only same-point
/// table, so one instance can serve many threads.
pub struct CombinabilityScoreboard {
    config: ScoreboardConfig,
    same_points: Arc<dyn SamePointTable>,
}

impl Default for CombinabilityScoreboard {
    fn default() -> Self {
        Self::new(ScoreboardConfig::default())
    }
}

impl CombinabilityScoreboard {
    pub fn new(config: ScoreboardConfig) -> Self {
        Self::with_same_point_table(config, Arc::new(NoSamePoints))
    }

    pub fn with_same_point_table(
        config: ScoreboardConfig,
        same_points: Arc<dyn SamePointTable>,
    ) -> Self {
        Self {
            config,
            same_points,
        }
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    /// Full intra-unit check: record presence, shape resolution, then
    /// [`invalidate`](Self::invalidate) on the resolved shape.
    pub fn validate<'a>(&self, pu: &'a PricingUnit, diag: &mut dyn DiagnosticSink) -> Outcome<'a> {
        self.validate_resolved(pu, diag).1
    }

    /// [`validate`](Self::validate), also returning the shape the unit was
    /// judged under. Units rejected before shape resolution keep their
    /// declared shape.
    pub(crate) fn validate_resolved<'a>(
        &self,
        pu: &'a PricingUnit,
        diag: &mut dyn DiagnosticSink,
    ) -> (EffectiveShape, Outcome<'a>) {
        let declared = EffectiveShape::declared(pu);
        let Some(first) = pu.fare_usages.first() else {
            warn!("pricing unit has no fare usage");
            diagnostics::write_fares(diag, FailureReason::Unspecified, None, None);
            return (declared, Outcome::failed(FailureReason::Unspecified, None));
        };
        if pu.fare_usages.len() == 1 {
            diagnostics::write_message(diag, DiagnosticMessage::Passed, Some(first));
            return (declared, Outcome::passed());
        }

        if let Some(fare) = pu.fare_usages.iter().find(|fare| record_not_applicable(pu, fare)) {
            info!(
                fare_class = %fare.fare_class,
                rule = %fare.rule_number,
                "record 2 cat 10 not applicable"
            );
            diagnostics::write_fares(diag, FailureReason::Rec2Cat10NotApplicable, Some(fare), None);
            let outcome = Outcome::failed(FailureReason::Rec2Cat10NotApplicable, Some(fare));
            return (declared, self.report(outcome));
        }

        if analyzers::is_mirror_image(pu) && pu.fare_usages.iter().any(|fare| fare.rule().is_none()) {
            debug!("mirror image without record 2 cat 10 passes by system assumption");
            diagnostics::write_message(diag, DiagnosticMessage::PassedSystemAssumption, None);
            return (declared, Outcome::system_assumption());
        }

        let shape = self.effective_shape(pu, diag);
        diagnostics::write_unit_header(diag, pu, shape);

        let outcome = self.check_unit(pu, shape, diag);
        if outcome.is_pass() {
            diagnostics::write_message(diag, DiagnosticMessage::Passed, None);
        }
        (shape, self.report(outcome))
    }

    /// Shape-keyed check of the unit as declared upstream.
    pub fn invalidate<'a>(&self, pu: &'a PricingUnit, diag: &mut dyn DiagnosticSink) -> Outcome<'a> {
        let outcome = self.check_unit(pu, EffectiveShape::declared(pu), diag);
        self.report(outcome)
    }

    /// Declared shape refined by open-jaw classification and the same-point table.
    pub fn effective_shape(&self, pu: &PricingUnit, diag: &mut dyn DiagnosticSink) -> EffectiveShape {
        let classified = analyzers::classify_open_jaw(pu);
        same_point::apply_same_points(
            classified,
            &pu.fare_usages,
            self.same_points.as_ref(),
            diag,
        )
    }

    pub(crate) fn report<'a>(&self, outcome: Outcome<'a>) -> Outcome<'a> {
        if self.config.report_failed_fare {
            outcome
        } else {
            outcome.without_offender()
        }
    }

    fn check_unit<'a>(
        &self,
        pu: &'a PricingUnit,
        shape: EffectiveShape,
        diag: &mut dyn DiagnosticSink,
    ) -> Outcome<'a> {
        let fares = &pu.fare_usages;
        match fares.len() {
            0 => {
                warn!("pricing unit has no fare usage");
                diagnostics::write_fares(diag, FailureReason::Unspecified, None, None);
                return Outcome::failed(FailureReason::Unspecified, None);
            }
            1 => return Outcome::passed(),
            _ => {}
        }

        let Some(scope) = CombinationScope::for_shape(shape.shape) else {
            warn!(shape = shape.shape.label(), "unrecognized pricing unit shape");
            diagnostics::write_message(diag, DiagnosticMessage::ScoreboardCheckFailed, fares.first());
            return Outcome::failed(FailureReason::Unspecified, None);
        };

        let mirror = analyzers::mirror_image(shape.shape, fares);
        let mut required = SamenessSet::default();
        for fare in fares {
            if scope == CombinationScope::EndOnEnd && side_trip_violation(pu, fare) {
                info!(fare_class = %fare.fare_class, "side trip not permitted");
                diagnostics::write_unit_failure(diag, pu, FailureReason::SideTripNotPermitted);
                return Outcome::failed(FailureReason::SideTripNotPermitted, Some(fare));
            }

            let Some(rule) = fare.rule() else {
                continue;
            };
            match shape_decision(scope, shape.open_jaw_subtype, pu, rule, mirror) {
                ShapeDecision::Pass => {}
                ShapeDecision::CheckSameness => required.extend(rule.sameness(scope)),
                ShapeDecision::Fail { reason, blame_fare } => {
                    info!(
                        reason = reason.phrase(),
                        fare_class = %fare.fare_class,
                        "combination rejected"
                    );
                    diagnostics::write_unit_failure(diag, pu, reason);
                    return Outcome::failed(reason, blame_fare.then_some(fare));
                }
            }
        }

        if let Some((code, fare)) = analyzers::first_unmet_requirement(&required, fares) {
            let reason = FailureReason::same_required(code, scope);
            info!(
                reason = reason.phrase(),
                fare_class = %fare.fare_class,
                "sameness requirement not met"
            );
            diagnostics::write_unit_failure(diag, pu, reason);
            return Outcome::failed(reason, Some(fare));
        }
        Outcome::passed()
    }
}

/// Per-fare outcome of the shape permission indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeDecision {
    Pass,
    CheckSameness,
    Fail {
        reason: FailureReason,
        blame_fare: bool,
    },
}

fn shape_decision(
    scope: CombinationScope,
    subtype: OpenJawSubtype,
    pu: &PricingUnit,
    rule: &CombinabilityRule,
    mirror: bool,
) -> ShapeDecision {
    let fail = |reason, blame_fare| ShapeDecision::Fail { reason, blame_fare };
    match scope {
        CombinationScope::EndOnEnd => {
            let indicator = rule.end_on_end;
            if indicator.is_not_applicable() {
                ShapeDecision::Pass
            } else if indicator.is_required() {
                if pu.requires_no_end_on_end {
                    fail(FailureReason::EndOnEndRequired, true)
                } else {
                    ShapeDecision::Pass
                }
            } else if indicator.is_not_permitted() {
                if pu.requires_no_end_on_end {
                    ShapeDecision::Pass
                } else {
                    fail(FailureReason::EndOnEndNotPermitted, false)
                }
            } else {
                ShapeDecision::CheckSameness
            }
        }
        CombinationScope::RoundTrip => {
            if !rule.round_trip.admits(mirror) {
                fail(FailureReason::RoundTripNotPermitted, false)
            } else {
                ShapeDecision::CheckSameness
            }
        }
        CombinationScope::CircleTrip => {
            if rule.circle_trip == CircleTripIndicator::NotPermitted {
                fail(FailureReason::CircleTripNotPermitted, true)
            } else {
                ShapeDecision::CheckSameness
            }
        }
        CombinationScope::OpenJaw => {
            let (indicator, reason) = match subtype {
                OpenJawSubtype::OriginOpenJaw | OpenJawSubtype::DestinationOpenJaw => {
                    (rule.single_open_jaw, FailureReason::SingleOpenJawNotPermitted)
                }
                OpenJawSubtype::DoubleOpenJaw => {
                    (rule.double_open_jaw, FailureReason::DoubleOpenJawNotPermitted)
                }
                OpenJawSubtype::Unknown => return ShapeDecision::CheckSameness,
            };
            if indicator == OpenJawIndicator::NotPermitted {
                fail(reason, true)
            } else {
                ShapeDecision::CheckSameness
            }
        }
    }
}

/// A record marked not applicable is only tolerated on a lone one-way unit.
fn record_not_applicable(pu: &PricingUnit, fare: &FareUsage) -> bool {
    fare.rule().is_some_and(|rule| {
        rule.applicability == Applicability::NotApplicable
            && !(pu.requires_no_end_on_end && pu.shape == PricingUnitType::OneWay)
    })
}

pub(crate) fn side_trip_violation(pu: &PricingUnit, fare: &FareUsage) -> bool {
    if fare.has_side_trip != pu.is_side_trip_unit {
        return true;
    }
    fare.rule().is_some_and(|rule| {
        rule.end_on_end.restricts_side_trip() && (pu.is_side_trip_unit || fare.has_side_trip)
    })
}
