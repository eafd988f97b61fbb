use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::pricing::combinability::{
    CombinabilityRule, CombinabilityScoreboard, CombinabilityService, InMemorySamePointTable,
    Outcome, SamenessCode, SamenessRequirements, ScoreboardConfig,
};
use crate::pricing::domain::{
    FareMarket, FareUsage, OneWayRoundTrip, OpenJawSubtype, PricingUnit, PricingUnitType,
};

pub(super) fn scoreboard() -> CombinabilityScoreboard {
    CombinabilityScoreboard::new(ScoreboardConfig::default())
}

pub(super) fn scoreboard_with_same_points(table: InMemorySamePointTable) -> CombinabilityScoreboard {
    CombinabilityScoreboard::with_same_point_table(ScoreboardConfig::default(), Arc::new(table))
}

pub(super) fn service() -> Arc<CombinabilityService> {
    Arc::new(CombinabilityService::new(ScoreboardConfig::default()))
}

pub(super) fn fare(carrier: &str) -> FareUsage {
    FareUsage::new(carrier, "1000", "Y26")
}

pub(super) fn ruled(carrier: &str, rule: CombinabilityRule) -> FareUsage {
    fare(carrier).with_rule(rule)
}

pub(super) fn located(carrier: &str, board: &str, off: &str, rule: CombinabilityRule) -> FareUsage {
    ruled(carrier, rule).with_market(FareMarket::new(board, off))
}

pub(super) fn international(board: &str, off: &str, rule: CombinabilityRule) -> FareUsage {
    let (board_city, board_nation) = split_point(board);
    let (off_city, off_nation) = split_point(off);
    ruled("AB", rule)
        .with_market(FareMarket::new(board_city, off_city).with_nations(board_nation, off_nation))
}

fn split_point(point: &str) -> (&str, &str) {
    point.split_once('/').unwrap_or((point, ""))
}

pub(super) fn mirror_fare(rule: CombinabilityRule) -> FareUsage {
    FareUsage {
        owrt: OneWayRoundTrip::RoundTripMayNotHalve,
        ..ruled("AB", rule)
    }
}

pub(super) fn unit(shape: PricingUnitType, fare_usages: Vec<FareUsage>) -> PricingUnit {
    PricingUnit::new(shape, fare_usages)
}

pub(super) fn open_jaw(subtype: OpenJawSubtype, fare_usages: Vec<FareUsage>) -> PricingUnit {
    PricingUnit::new(PricingUnitType::OpenJaw, fare_usages).with_subtype(subtype)
}

pub(super) fn rule() -> CombinabilityRule {
    CombinabilityRule::default()
}

pub(super) fn same(code: SamenessCode) -> SamenessRequirements {
    SamenessRequirements::default().with(code)
}

pub(super) fn offender_index(pu: &PricingUnit, outcome: &Outcome<'_>) -> Option<usize> {
    outcome.failed_fare.and_then(|fare| pu.position_of(fare))
}

pub(super) async fn read_json(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
