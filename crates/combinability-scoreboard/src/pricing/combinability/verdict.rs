use serde::{Deserialize, Serialize};

use super::indicators::{CombinationScope, SamenessCode};
use crate::pricing::domain::FareUsage;

/// Result of a scoreboard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    PassedSystemAssumption,
    Failed(FailureReason),
}

impl Verdict {
    pub const fn is_pass(self) -> bool {
        matches!(self, Verdict::Passed | Verdict::PassedSystemAssumption)
    }

    pub const fn failure(self) -> Option<FailureReason> {
        match self {
            Verdict::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn summary(self) -> String {
        match self {
            Verdict::Passed => "combination passed".to_string(),
            Verdict::PassedSystemAssumption => {
                "combination passed by system assumption".to_string()
            }
            Verdict::Failed(reason) => format!("combination failed: {}", reason.phrase()),
        }
    }
}

/// Why a combination was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Malformed input rather than a rule violation.
    Unspecified,
    NoRec2Cat10,
    Rec2Cat10NotApplicable,

    RoundTripNotPermitted,
    SameCarrierRequiredForRt,
    SameRuleRequiredForRt,
    SameTariffRequiredForRt,
    SameFareClassRequiredForRt,
    SameFareTypeRequiredForRt,

    CircleTripNotPermitted,
    SameCarrierRequiredForCt,
    SameRuleRequiredForCt,
    SameTariffRequiredForCt,
    SameFareClassRequiredForCt,
    SameFareTypeRequiredForCt,

    SingleOpenJawNotPermitted,
    DoubleOpenJawNotPermitted,
    SameCarrierRequiredForOj,
    SameRuleRequiredForOj,
    SameTariffRequiredForOj,
    SameFareClassRequiredForOj,
    SameFareTypeRequiredForOj,

    EndOnEndNotPermitted,
    SameCarrierRequiredForEoe,
    SameRuleRequiredForEoe,
    SameTariffRequiredForEoe,
    SameFareClassRequiredForEoe,
    SameFareTypeRequiredForEoe,

    DestOpenJawRequired,
    OriginOpenJawRequired,
    TwoMaxIntlFaresSameCountryRequired,
    OjDiffCountryRequired,
    OjSameCountryRequired,
    MirrorImageNotPermitted,
    SideTripNotPermitted,
    EndOnEndRequired,
}

impl FailureReason {
    pub const fn phrase(self) -> &'static str {
        match self {
            FailureReason::Unspecified => "FAILED COMBINATION",
            FailureReason::NoRec2Cat10 => "FAILED COMBINATION - NO RECORD 2 CAT 10",
            FailureReason::Rec2Cat10NotApplicable => {
                "FAILED COMBINATION - RECORD 2 CAT 10 NOT APPLICABLE"
            }
            FailureReason::RoundTripNotPermitted => "ROUND TRIP NOT PERMITTED",
            FailureReason::SameCarrierRequiredForRt => "SAME CARRIER REQ FOR RT",
            FailureReason::SameRuleRequiredForRt => "SAME RULE REQ FOR RT",
            FailureReason::SameTariffRequiredForRt => "SAME TARIFF REQ FOR RT",
            FailureReason::SameFareClassRequiredForRt => "SAME FARECLASS REQ FOR RT",
            FailureReason::SameFareTypeRequiredForRt => "SAME FARETYPE REQ FOR RT",
            FailureReason::CircleTripNotPermitted => "CIRCLE TRIP NOT PERMITTED",
            FailureReason::SameCarrierRequiredForCt => "SAME CARRIER REQ FOR CT",
            FailureReason::SameRuleRequiredForCt => "SAME RULE REQ FOR CT",
            FailureReason::SameTariffRequiredForCt => "SAME TARIFF REQ FOR CT",
            FailureReason::SameFareClassRequiredForCt => "SAME FARECLASS REQ FOR CT",
            FailureReason::SameFareTypeRequiredForCt => "SAME FARETYPE REQ FOR CT",
            FailureReason::SingleOpenJawNotPermitted => "SINGLE OJ NOT PERMITTED",
            FailureReason::DoubleOpenJawNotPermitted => "DOUBLE OJ NOT PERMITTED",
            FailureReason::SameCarrierRequiredForOj => "SAME CARRIER REQ FOR OJ",
            FailureReason::SameRuleRequiredForOj => "SAME RULE REQ FOR OJ",
            FailureReason::SameTariffRequiredForOj => "SAME TARIFF REQ FOR OJ",
            FailureReason::SameFareClassRequiredForOj => "SAME FARECLASS REQ FOR OJ",
            FailureReason::SameFareTypeRequiredForOj => "SAME FARETYPE REQ FOR OJ",
            FailureReason::EndOnEndNotPermitted => "END ON END NOT PERMITTED",
            FailureReason::SameCarrierRequiredForEoe => "SAME CARRIER REQ FOR END ON END",
            FailureReason::SameRuleRequiredForEoe => "SAME RULE REQ FOR END ON END",
            FailureReason::SameTariffRequiredForEoe => "SAME TARIFF REQ FOR END ON END",
            FailureReason::SameFareClassRequiredForEoe => "SAME FARECLASS REQ FOR END ON END",
            FailureReason::SameFareTypeRequiredForEoe => "SAME FARETYPE REQ FOR END ON END",
            FailureReason::DestOpenJawRequired => "DEST OPEN JAW REQUIRED",
            FailureReason::OriginOpenJawRequired => "ORIGIN OPEN JAW REQUIRED",
            FailureReason::TwoMaxIntlFaresSameCountryRequired => {
                "2 MAX INTL FARES SAME COUNTRY REQUIRED"
            }
            FailureReason::OjDiffCountryRequired => "OJ DIFF COUNTRY REQUIRED",
            FailureReason::OjSameCountryRequired => "OJ SAME COUNTRY REQUIRED",
            FailureReason::MirrorImageNotPermitted => "MIRROR IMAGE IS NOT PERMITTED",
            FailureReason::SideTripNotPermitted => "SIDE TRIP IS NOT PERMITTED",
            FailureReason::EndOnEndRequired => "REQUIRED EOE WITH OTHER PU",
        }
    }

    /// Malformed input and missing records are not rule violations.
    pub const fn is_rule_violation(self) -> bool {
        !matches!(
            self,
            FailureReason::Unspecified
                | FailureReason::NoRec2Cat10
                | FailureReason::Rec2Cat10NotApplicable
        )
    }

    /// Reasons rendered as stand-alone header lines rather than fare lines.
    pub const fn is_header(self) -> bool {
        !self.is_rule_violation()
    }

    pub const fn same_required(code: SamenessCode, scope: CombinationScope) -> Self {
        use CombinationScope as S;
        use SamenessCode as C;

        match (scope, code) {
            (S::RoundTrip, C::SameCarrier) => FailureReason::SameCarrierRequiredForRt,
            (S::RoundTrip, C::SameRule) => FailureReason::SameRuleRequiredForRt,
            (S::RoundTrip, C::SameTariff) => FailureReason::SameTariffRequiredForRt,
            (S::RoundTrip, C::SameFareClass) => FailureReason::SameFareClassRequiredForRt,
            (S::RoundTrip, C::SameFareType) => FailureReason::SameFareTypeRequiredForRt,
            (S::CircleTrip, C::SameCarrier) => FailureReason::SameCarrierRequiredForCt,
            (S::CircleTrip, C::SameRule) => FailureReason::SameRuleRequiredForCt,
            (S::CircleTrip, C::SameTariff) => FailureReason::SameTariffRequiredForCt,
            (S::CircleTrip, C::SameFareClass) => FailureReason::SameFareClassRequiredForCt,
            (S::CircleTrip, C::SameFareType) => FailureReason::SameFareTypeRequiredForCt,
            (S::OpenJaw, C::SameCarrier) => FailureReason::SameCarrierRequiredForOj,
            (S::OpenJaw, C::SameRule) => FailureReason::SameRuleRequiredForOj,
            (S::OpenJaw, C::SameTariff) => FailureReason::SameTariffRequiredForOj,
            (S::OpenJaw, C::SameFareClass) => FailureReason::SameFareClassRequiredForOj,
            (S::OpenJaw, C::SameFareType) => FailureReason::SameFareTypeRequiredForOj,
            (S::EndOnEnd, C::SameCarrier) => FailureReason::SameCarrierRequiredForEoe,
            (S::EndOnEnd, C::SameRule) => FailureReason::SameRuleRequiredForEoe,
            (S::EndOnEnd, C::SameTariff) => FailureReason::SameTariffRequiredForEoe,
            (S::EndOnEnd, C::SameFareClass) => FailureReason::SameFareClassRequiredForEoe,
            (S::EndOnEnd, C::SameFareType) => FailureReason::SameFareTypeRequiredForEoe,
        }
    }

    /// The sameness requirement a failure stems from, if any.
    pub const fn sameness(self) -> Option<(SamenessCode, CombinationScope)> {
        use CombinationScope as S;
        use SamenessCode as C;

        let pair = match self {
            FailureReason::SameCarrierRequiredForRt => (C::SameCarrier, S::RoundTrip),
            FailureReason::SameRuleRequiredForRt => (C::SameRule, S::RoundTrip),
            FailureReason::SameTariffRequiredForRt => (C::SameTariff, S::RoundTrip),
            FailureReason::SameFareClassRequiredForRt => (C::SameFareClass, S::RoundTrip),
            FailureReason::SameFareTypeRequiredForRt => (C::SameFareType, S::RoundTrip),
            FailureReason::SameCarrierRequiredForCt => (C::SameCarrier, S::CircleTrip),
            FailureReason::SameRuleRequiredForCt => (C::SameRule, S::CircleTrip),
            FailureReason::SameTariffRequiredForCt => (C::SameTariff, S::CircleTrip),
            FailureReason::SameFareClassRequiredForCt => (C::SameFareClass, S::CircleTrip),
            FailureReason::SameFareTypeRequiredForCt => (C::SameFareType, S::CircleTrip),
            FailureReason::SameCarrierRequiredForOj => (C::SameCarrier, S::OpenJaw),
            FailureReason::SameRuleRequiredForOj => (C::SameRule, S::OpenJaw),
            FailureReason::SameTariffRequiredForOj => (C::SameTariff, S::OpenJaw),
            FailureReason::SameFareClassRequiredForOj => (C::SameFareClass, S::OpenJaw),
            FailureReason::SameFareTypeRequiredForOj => (C::SameFareType, S::OpenJaw),
            FailureReason::SameCarrierRequiredForEoe => (C::SameCarrier, S::EndOnEnd),
            FailureReason::SameRuleRequiredForEoe => (C::SameRule, S::EndOnEnd),
            FailureReason::SameTariffRequiredForEoe => (C::SameTariff, S::EndOnEnd),
            FailureReason::SameFareClassRequiredForEoe => (C::SameFareClass, S::EndOnEnd),
            FailureReason::SameFareTypeRequiredForEoe => (C::SameFareType, S::EndOnEnd),
            _ => return None,
        };
        Some(pair)
    }
}

/// Lines the reporter writes to a diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticMessage {
    Passed,
    PassedSystemAssumption,
    TooFewFares,
    ScoreboardCheckFailed,
    FailedFare(FailureReason),
}

impl DiagnosticMessage {
    pub const FAILED_FARE: &'static str = "FAILED FARE";

    pub const fn phrase(self) -> &'static str {
        match self {
            DiagnosticMessage::Passed => "PASSED RECORD 2 SCOREBOARD CHECK",
            DiagnosticMessage::PassedSystemAssumption => "PASSED COMBINATION - SYSTEM ASSUMPTION",
            DiagnosticMessage::TooFewFares => "INVALID DIAGNOSTIC - TOO FEW FARES",
            DiagnosticMessage::ScoreboardCheckFailed => "FAILED RECORD 2 SCOREBOARD CHECK",
            DiagnosticMessage::FailedFare(reason) => reason.phrase(),
        }
    }
}

/// Verdict together with the fare component blamed for a failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome<'a> {
    pub verdict: Verdict,
    pub failed_fare: Option<&'a FareUsage>,
}

impl<'a> Outcome<'a> {
    pub const fn passed() -> Self {
        Self {
            verdict: Verdict::Passed,
            failed_fare: None,
        }
    }

    pub const fn system_assumption() -> Self {
        Self {
            verdict: Verdict::PassedSystemAssumption,
            failed_fare: None,
        }
    }

    pub const fn failed(reason: FailureReason, failed_fare: Option<&'a FareUsage>) -> Self {
        Self {
            verdict: Verdict::Failed(reason),
            failed_fare,
        }
    }

    pub const fn is_pass(&self) -> bool {
        self.verdict.is_pass()
    }

    pub(crate) fn without_offender(self) -> Self {
        Self {
            failed_fare: None,
            ..self
        }
    }
}
