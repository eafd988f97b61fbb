use super::common::*;
use crate::pricing::combinability::{
    Applicability, CombinabilityRule, DiagnosticBuffer, EndOnEndIndicator, FailureReason,
    InMemorySamePointTable, OpenJawIndicator, RoundTripIndicator, SamenessRequirements, Verdict,
};
use crate::pricing::domain::{OpenJawSubtype, PricingUnit, PricingUnitType};

fn not_applicable() -> CombinabilityRule {
    CombinabilityRule {
        applicability: Applicability::NotApplicable,
        ..rule()
    }
}

#[test]
fn empty_unit_reports_failed_combination() {
    let pu = PricingUnit::new(PricingUnitType::OneWay, Vec::new());
    let mut diag = DiagnosticBuffer::new();

    let outcome = scoreboard().validate(&pu, &mut diag);

    assert_eq!(outcome.verdict, Verdict::Failed(FailureReason::Unspecified));
    assert_eq!(diag.lines(), [" FAILED COMBINATION"]);
}

#[test]
fn passing_unit_reports_scoreboard_pass() {
    let pu = unit(
        PricingUnitType::RoundTrip,
        vec![ruled("AB", rule()), ruled("AB", rule())],
    );
    let mut diag = DiagnosticBuffer::new();

    let outcome = scoreboard().validate(&pu, &mut diag);

    assert_eq!(outcome.verdict, Verdict::Passed);
    assert!(diag.contains("RT PRICING UNIT: AB Y26-1000 / AB Y26-1000"));
    assert!(diag.contains("PASSED RECORD 2 SCOREBOARD CHECK"));
}

#[test]
fn validation_is_repeatable() {
    let permitted = CombinabilityRule {
        round_trip: RoundTripIndicator::Permitted,
        round_trip_sameness: SamenessRequirements::same_carrier(),
        ..rule()
    };
    let pu = unit(
        PricingUnitType::RoundTrip,
        vec![ruled("AB", permitted), fare("CD")],
    );
    let scoreboard = scoreboard();

    let first = scoreboard.validate(&pu, &mut DiagnosticBuffer::new());
    let second = scoreboard.validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(first.verdict, second.verdict);
    assert_eq!(offender_index(&pu, &first), offender_index(&pu, &second));
    assert_eq!(offender_index(&pu, &first), Some(1));
}

#[test]
fn record_marked_not_applicable_fails() {
    let pu = unit(
        PricingUnitType::RoundTrip,
        vec![fare("AB"), ruled("AB", not_applicable())],
    );
    let mut diag = DiagnosticBuffer::new();

    let outcome = scoreboard().validate(&pu, &mut diag);

    assert_eq!(
        outcome.verdict,
        Verdict::Failed(FailureReason::Rec2Cat10NotApplicable)
    );
    assert_eq!(offender_index(&pu, &outcome), Some(1));
    assert!(diag.contains("FAILED COMBINATION - RECORD 2 CAT 10 NOT APPLICABLE"));
}

#[test]
fn record_not_applicable_is_tolerated_on_unjoined_one_way() {
    let pu = unit(
        PricingUnitType::OneWay,
        vec![ruled("AB", not_applicable()), fare("AB")],
    )
    .with_no_end_on_end();

    let outcome = scoreboard().validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(outcome.verdict, Verdict::Passed);
}

#[test]
fn mirror_image_without_record_passes_by_system_assumption() {
    let pu = unit(
        PricingUnitType::RoundTrip,
        vec![mirror_fare(rule()), {
            let mut inbound = mirror_fare(rule());
            inbound.combinability_rule = None;
            inbound
        }],
    );
    let mut diag = DiagnosticBuffer::new();

    let outcome = scoreboard().validate(&pu, &mut diag);

    assert_eq!(outcome.verdict, Verdict::PassedSystemAssumption);
    assert!(diag.contains("PASSED COMBINATION - SYSTEM ASSUMPTION"));
}

#[test]
fn open_jaw_subtype_is_derived_from_geography() {
    let single_not_permitted = CombinabilityRule {
        single_open_jaw: OpenJawIndicator::NotPermitted,
        ..rule()
    };
    let pu = unit(
        PricingUnitType::OpenJaw,
        vec![
            located("AB", "NYC", "LON", single_not_permitted.clone()),
            located("AB", "LON", "BOS", single_not_permitted),
        ],
    );

    let outcome = scoreboard().validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(
        outcome.verdict,
        Verdict::Failed(FailureReason::SingleOpenJawNotPermitted)
    );
    assert_eq!(offender_index(&pu, &outcome), Some(0));
}

#[test]
fn closed_open_jaw_is_judged_as_round_trip() {
    let open_jaw_forbidden = CombinabilityRule {
        single_open_jaw: OpenJawIndicator::NotPermitted,
        double_open_jaw: OpenJawIndicator::NotPermitted,
        ..rule()
    };
    let pu = unit(
        PricingUnitType::OpenJaw,
        vec![
            located("AB", "NYC", "LON", open_jaw_forbidden.clone()),
            located("AB", "LON", "NYC", open_jaw_forbidden),
        ],
    );

    let outcome = scoreboard().validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(outcome.verdict, Verdict::Passed);
}

#[test]
fn same_point_table_closes_double_open_jaw() {
    let listed = CombinabilityRule {
        vendor: "ATP".to_string(),
        double_open_jaw: OpenJawIndicator::NotPermitted,
        same_points_item: Some(993),
        ..rule()
    };
    let pu = open_jaw(
        OpenJawSubtype::DoubleOpenJaw,
        vec![
            located("AB", "NYC", "LGW", listed.clone()),
            located("AB", "LON", "EWR", listed),
        ],
    );
    let mut table = InMemorySamePointTable::new();
    table
        .insert("ATP", 993, "NYC", "EWR")
        .insert("ATP", 993, "LON", "LGW");
    let mut diag = DiagnosticBuffer::new();

    let outcome = scoreboard_with_same_points(table).validate(&pu, &mut diag);

    assert_eq!(outcome.verdict, Verdict::Passed);
    assert!(diag.contains("SAMEPOINT TABLE: CONVERT TO RT"));
    assert_eq!(pu.shape, PricingUnitType::OpenJaw);
}

#[test]
fn without_same_points_double_open_jaw_stays_open() {
    let listed = CombinabilityRule {
        vendor: "ATP".to_string(),
        double_open_jaw: OpenJawIndicator::NotPermitted,
        same_points_item: Some(993),
        ..rule()
    };
    let pu = open_jaw(
        OpenJawSubtype::DoubleOpenJaw,
        vec![
            located("AB", "NYC", "LGW", listed.clone()),
            located("AB", "LON", "EWR", listed),
        ],
    );

    let outcome = scoreboard().validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(
        outcome.verdict,
        Verdict::Failed(FailureReason::DoubleOpenJawNotPermitted)
    );
}

#[test]
fn unconstrained_fares_pass_together() {
    let pu = unit(PricingUnitType::CircleTrip, vec![fare("AB"), fare("CD"), fare("EF")]);

    let outcome = scoreboard().validate(&pu, &mut DiagnosticBuffer::new());

    assert_eq!(outcome.verdict, Verdict::Passed);
}

#[test]
fn inactive_sink_does_not_change_the_verdict() {
    let forbidden = CombinabilityRule {
        end_on_end: EndOnEndIndicator::NotPermitted,
        ..rule()
    };
    let pu = unit(
        PricingUnitType::OneWay,
        vec![ruled("AB", forbidden.clone()), ruled("AB", forbidden)],
    );
    let mut quiet = DiagnosticBuffer::inactive();

    let outcome = scoreboard().validate(&pu, &mut quiet);

    assert_eq!(
        outcome.verdict,
        Verdict::Failed(FailureReason::EndOnEndNotPermitted)
    );
    assert!(quiet.lines().is_empty());
}
