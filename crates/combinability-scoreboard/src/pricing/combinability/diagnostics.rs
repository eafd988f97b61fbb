//! Diagnostic sink and the fixed-phrase reporter.

use super::analyzers::{fares_match, EffectiveShape};
use super::indicators::{CircleTripIndicator, OpenJawDirection, OpenJawIndicator};
use super::verdict::{DiagnosticMessage, FailureReason};
use crate::pricing::domain::{FareUsage, PricingUnit, PricingUnitType};

/// Append-only destination for diagnostic text.
pub trait DiagnosticSink {
    /// Callers skip formatting entirely when this is false.
    fn is_active(&self) -> bool;

    fn write_line(&mut self, line: &str);
}

/// Collects diagnostic lines in memory.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBuffer {
    lines: Vec<String>,
    inactive: bool,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer that reports itself inactive and never records.
    pub fn inactive() -> Self {
        Self {
            lines: Vec::new(),
            inactive: true,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn is_active(&self) -> bool {
        !self.inactive
    }

    fn write_line(&mut self, line: &str) {
        if !self.inactive {
            self.lines.push(line.to_string());
        }
    }
}

/// Summary line naming the unit shape and its fares.
pub fn write_unit_header(
    sink: &mut dyn DiagnosticSink,
    pu: &PricingUnit,
    shape: EffectiveShape,
) {
    if !sink.is_active() {
        return;
    }
    let label = match shape.shape {
        PricingUnitType::OpenJaw => shape.open_jaw_subtype.label(),
        other => other.label(),
    };
    let fares: Vec<String> = pu
        .fare_usages
        .iter()
        .map(|fare| format!("{} {}", fare.carrier, fare.display_key()))
        .collect();
    sink.write_line(&format!(" {label} PRICING UNIT: {}", fares.join(" / ")));
}

pub fn write_message(
    sink: &mut dyn DiagnosticSink,
    message: DiagnosticMessage,
    fare: Option<&FareUsage>,
) {
    if !sink.is_active() {
        return;
    }
    match message {
        DiagnosticMessage::FailedFare(reason) => write_fares(sink, reason, fare, None),
        DiagnosticMessage::ScoreboardCheckFailed => match fare {
            Some(fare) => sink.write_line(&format!(
                " {} - {} FARE",
                message.phrase(),
                fare.fare_class
            )),
            None => sink.write_line(&format!(" {}", message.phrase())),
        },
        other => sink.write_line(&format!(" {}", other.phrase())),
    }
}

/// Renders a failure against caller-supplied fares.
pub fn write_fares(
    sink: &mut dyn DiagnosticSink,
    reason: FailureReason,
    source: Option<&FareUsage>,
    target: Option<&FareUsage>,
) {
    if !sink.is_active() {
        return;
    }
    if reason.is_header() {
        sink.write_line(&format!(" {}", reason.phrase()));
        return;
    }

    let fares = match (source, target) {
        (Some(source), Some(target)) if !std::ptr::eq(source, target) => {
            format!(" {} - {}", source.display_key(), target.display_key())
        }
        (Some(fare), _) | (None, Some(fare)) => format!(" {}", fare.display_key()),
        (None, None) => String::new(),
    };
    sink.write_line(&format!(
        " {}{fares} - {}",
        DiagnosticMessage::FAILED_FARE,
        reason.phrase()
    ));
}

/// Renders a failure, locating the explaining fare pair inside the unit.
pub fn write_unit_failure(sink: &mut dyn DiagnosticSink, pu: &PricingUnit, reason: FailureReason) {
    if !sink.is_active() {
        return;
    }
    if reason.is_header() {
        sink.write_line(&format!(" {}", reason.phrase()));
        return;
    }
    let fares = &pu.fare_usages;
    if fares.len() < 2 {
        write_message(sink, DiagnosticMessage::TooFewFares, None);
        return;
    }

    for source in fares {
        for target in fares {
            if !std::ptr::eq(source, target) && explains(reason, pu, source, target) {
                write_fares(sink, reason, Some(source), Some(target));
                return;
            }
        }
    }
    write_fares(sink, reason, fares.first(), None);
}

fn explains(reason: FailureReason, pu: &PricingUnit, source: &FareUsage, target: &FareUsage) -> bool {
    if reason == FailureReason::SideTripNotPermitted && source.has_side_trip != pu.is_side_trip_unit {
        return true;
    }
    let Some(rule) = source.rule() else {
        return false;
    };
    if let Some((code, scope)) = reason.sameness() {
        return rule.sameness(scope).requires(code) && !fares_match(code, source, target);
    }

    let either_open_jaw = |check: fn(OpenJawIndicator) -> bool| {
        check(rule.single_open_jaw) || check(rule.double_open_jaw)
    };
    match reason {
        FailureReason::RoundTripNotPermitted | FailureReason::MirrorImageNotPermitted => {
            rule.round_trip.is_mirror_qualified()
        }
        FailureReason::CircleTripNotPermitted => {
            rule.circle_trip == CircleTripIndicator::NotPermitted
        }
        FailureReason::SingleOpenJawNotPermitted => {
            rule.single_open_jaw == OpenJawIndicator::NotPermitted
        }
        FailureReason::DoubleOpenJawNotPermitted => {
            rule.double_open_jaw == OpenJawIndicator::NotPermitted
        }
        FailureReason::EndOnEndNotPermitted => rule.end_on_end.is_not_permitted(),
        FailureReason::EndOnEndRequired => rule.end_on_end.is_required(),
        FailureReason::SideTripNotPermitted => rule.end_on_end.restricts_side_trip(),
        FailureReason::DestOpenJawRequired => {
            rule.open_jaw_direction == OpenJawDirection::DestinationOpenJawRequired
        }
        FailureReason::OriginOpenJawRequired => {
            rule.open_jaw_direction == OpenJawDirection::OriginOpenJawRequired
        }
        FailureReason::TwoMaxIntlFaresSameCountryRequired => {
            rule.single_open_jaw.limits_international_fares()
        }
        FailureReason::OjDiffCountryRequired => {
            either_open_jaw(OpenJawIndicator::requires_different_country)
        }
        FailureReason::OjSameCountryRequired => {
            either_open_jaw(OpenJawIndicator::requires_origin_same_country)
        }
        _ => false,
    }
}
