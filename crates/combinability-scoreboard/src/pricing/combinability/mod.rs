//! Category 10 combinability checks.
//!
//! The intra-unit pass ([`CombinabilityScoreboard::validate`]) judges one
//! pricing unit at a time; the cross-unit pass
//! ([`CombinabilityScoreboard::analyze_fare_path`]) judges interactions that
//! only show up once every unit of a fare path is known. Both share the
//! analyzers and the indicator vocabulary.

pub mod analyzers;
mod config;
pub mod diagnostics;
mod fare_path;
pub mod indicators;
pub mod router;
mod rule;
pub mod same_point;
mod scoreboard;
pub mod service;
mod verdict;

#[cfg(test)]
mod tests;

pub use analyzers::{is_mirror_image, EffectiveShape};
pub use config::ScoreboardConfig;
pub use diagnostics::{DiagnosticBuffer, DiagnosticSink};
pub use indicators::{
    Applicability, CircleTripIndicator, CombinationScope, EndOnEndIndicator, OpenJawDirection,
    OpenJawIndicator, RoundTripIndicator, SamenessCode,
};
pub use router::scoreboard_router;
pub use rule::{CombinabilityRule, SamenessRequirements, SamenessSet};
pub use same_point::{InMemorySamePointTable, NoSamePoints, SamePointEntry, SamePointTable};
pub use scoreboard::CombinabilityScoreboard;
pub use service::{CombinabilityService, FailedFareView, FarePathReport, UnitReport};
pub use verdict::{DiagnosticMessage, FailureReason, Outcome, Verdict};
