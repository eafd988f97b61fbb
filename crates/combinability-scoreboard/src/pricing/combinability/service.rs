use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analyzers::EffectiveShape;
use super::config::ScoreboardConfig;
use super::diagnostics::DiagnosticBuffer;
use super::scoreboard::CombinabilityScoreboard;
use super::verdict::{Outcome, Verdict};
use crate::pricing::domain::{FarePath, FareUsage, PricingUnit};

/// Service composing the scoreboard with a per-request diagnostic buffer.
pub struct CombinabilityService {
    scoreboard: Arc<CombinabilityScoreboard>,
}

impl CombinabilityService {
    pub fn new(config: ScoreboardConfig) -> Self {
        Self::with_scoreboard(Arc::new(CombinabilityScoreboard::new(config)))
    }

    pub fn with_scoreboard(scoreboard: Arc<CombinabilityScoreboard>) -> Self {
        Self { scoreboard }
    }

    pub fn scoreboard(&self) -> &CombinabilityScoreboard {
        &self.scoreboard
    }

    /// Run the intra-unit pass over a single pricing unit.
    pub fn check_pricing_unit(&self, pu: &PricingUnit) -> UnitReport {
        let mut diag = self.buffer();
        let (shape, outcome) = self.scoreboard.validate_resolved(pu, &mut diag);
        debug!(verdict = ?outcome.verdict, "pricing unit checked");

        UnitReport {
            shape,
            verdict: outcome.verdict,
            summary: outcome.verdict.summary(),
            failed_fare: FailedFareView::from_unit(pu, &outcome),
            diagnostics: diag.into_lines(),
        }
    }

    /// Validate every unit, then run the cross-unit pass when all of them pass.
    pub fn check_fare_path(&self, fare_path: &FarePath) -> FarePathReport {
        let units: Vec<UnitReport> = fare_path
            .pricing_units
            .iter()
            .map(|pu| self.check_pricing_unit(pu))
            .collect();

        if let Some((index, unit)) = units
            .iter()
            .enumerate()
            .find(|(_, unit)| !unit.verdict.is_pass())
        {
            let failed_fare = unit.failed_fare.clone().map(|view| FailedFareView {
                pricing_unit: Some(index),
                ..view
            });
            return FarePathReport {
                verdict: unit.verdict,
                summary: unit.verdict.summary(),
                failed_fare,
                diagnostics: Vec::new(),
                units,
            };
        }

        let mut diag = self.buffer();
        let outcome = self.scoreboard.analyze_fare_path(fare_path, &mut diag);
        debug!(verdict = ?outcome.verdict, "fare path checked");

        FarePathReport {
            verdict: outcome.verdict,
            summary: outcome.verdict.summary(),
            failed_fare: FailedFareView::from_path(fare_path, &outcome),
            diagnostics: diag.into_lines(),
            units,
        }
    }

    fn buffer(&self) -> DiagnosticBuffer {
        if self.scoreboard.config().diagnostics {
            DiagnosticBuffer::new()
        } else {
            DiagnosticBuffer::inactive()
        }
    }
}

/// Identifies the fare component a failure is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFareView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_unit: Option<usize>,
    pub fare_usage: usize,
    pub carrier: String,
    pub fare_class: String,
    pub rule_number: String,
}

impl FailedFareView {
    fn new(pricing_unit: Option<usize>, fare_usage: usize, fare: &FareUsage) -> Self {
        Self {
            pricing_unit,
            fare_usage,
            carrier: fare.carrier.clone(),
            fare_class: fare.fare_class.clone(),
            rule_number: fare.rule_number.clone(),
        }
    }

    fn from_unit(pu: &PricingUnit, outcome: &Outcome<'_>) -> Option<Self> {
        let fare = outcome.failed_fare?;
        let index = pu.position_of(fare)?;
        Some(Self::new(None, index, fare))
    }

    fn from_path(fare_path: &FarePath, outcome: &Outcome<'_>) -> Option<Self> {
        let fare = outcome.failed_fare?;
        let (unit, index) = fare_path.position_of(fare)?;
        Some(Self::new(Some(unit), index, fare))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    pub shape: EffectiveShape,
    pub verdict: Verdict,
    pub summary: String,
    pub failed_fare: Option<FailedFareView>,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarePathReport {
    pub verdict: Verdict,
    pub summary: String,
    pub failed_fare: Option<FailedFareView>,
    pub units: Vec<UnitReport>,
    pub diagnostics: Vec<String>,
}
