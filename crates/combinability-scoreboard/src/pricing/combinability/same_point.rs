//! Same-point table lookups that close an open jaw.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::analyzers::EffectiveShape;
use super::diagnostics::DiagnosticSink;
use crate::pricing::domain::{FareUsage, OpenJawSubtype, PricingUnitType};

/// Read-only source of same-point table (table 993) items.
pub trait SamePointTable: Send + Sync {
    fn is_same_point(
        &self,
        vendor: &str,
        item_no: u32,
        first: &str,
        second: &str,
        travel_date: Option<NaiveDate>,
    ) -> bool;
}

/// Table with no items; every open point stays open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSamePoints;

impl SamePointTable for NoSamePoints {
    fn is_same_point(&self, _: &str, _: u32, _: &str, _: &str, _: Option<NaiveDate>) -> bool {
        false
    }
}

/// One pair of market cities treated as the same point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamePointEntry {
    pub first: String,
    pub second: String,
    pub effective: Option<NaiveDate>,
    pub discontinue: Option<NaiveDate>,
}

impl SamePointEntry {
    fn matches(&self, first: &str, second: &str, travel_date: Option<NaiveDate>) -> bool {
        let same_pair = (self.first == first && self.second == second)
            || (self.first == second && self.second == first);
        if !same_pair {
            return false;
        }
        match travel_date {
            Some(date) => {
                self.effective.map_or(true, |start| date >= start)
                    && self.discontinue.map_or(true, |end| date <= end)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySamePointTable {
    items: BTreeMap<(String, u32), Vec<SamePointEntry>>,
}

impl InMemorySamePointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        vendor: impl Into<String>,
        item_no: u32,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.insert_entry(
            vendor,
            item_no,
            SamePointEntry {
                first: first.into(),
                second: second.into(),
                effective: None,
                discontinue: None,
            },
        )
    }

    pub fn insert_entry(
        &mut self,
        vendor: impl Into<String>,
        item_no: u32,
        entry: SamePointEntry,
    ) -> &mut Self {
        self.items
            .entry((vendor.into(), item_no))
            .or_default()
            .push(entry);
        self
    }
}

impl SamePointTable for InMemorySamePointTable {
    fn is_same_point(
        &self,
        vendor: &str,
        item_no: u32,
        first: &str,
        second: &str,
        travel_date: Option<NaiveDate>,
    ) -> bool {
        self.items
            .get(&(vendor.to_string(), item_no))
            .is_some_and(|entries| {
                entries
                    .iter()
                    .any(|entry| entry.matches(first, second, travel_date))
            })
    }
}

/// Closes open-jaw ends the table lists as the same point.
///
/// Only open-jaw shapes with at least two fares are affected; the returned
/// shape is a view, the unit itself is not touched.
pub fn apply_same_points(
    shape: EffectiveShape,
    fares: &[FareUsage],
    table: &dyn SamePointTable,
    diag: &mut dyn DiagnosticSink,
) -> EffectiveShape {
    if shape.shape != PricingUnitType::OpenJaw || fares.len() < 2 {
        return shape;
    }
    let (Some(first), Some(last)) = (fares.first(), fares.last()) else {
        return shape;
    };

    let origin_closes = end_closes(first, last, table, diag);
    let turnaround_closes = fares
        .windows(2)
        .any(|pair| end_closes(&pair[1], &pair[0], table, diag));

    if !origin_closes && !turnaround_closes {
        return shape;
    }

    let closed = EffectiveShape {
        shape: PricingUnitType::closed_for(fares.len()),
        open_jaw_subtype: OpenJawSubtype::Unknown,
    };
    let converted = match shape.open_jaw_subtype {
        OpenJawSubtype::DoubleOpenJaw => match (origin_closes, turnaround_closes) {
            (true, true) => closed,
            (true, false) => EffectiveShape {
                open_jaw_subtype: OpenJawSubtype::DestinationOpenJaw,
                ..shape
            },
            _ => EffectiveShape {
                open_jaw_subtype: OpenJawSubtype::OriginOpenJaw,
                ..shape
            },
        },
        _ => closed,
    };

    let target = match converted.shape {
        PricingUnitType::OpenJaw => converted.open_jaw_subtype.label(),
        other => other.label(),
    };
    debug!(target_shape = target, "same point table closed open jaw");
    if diag.is_active() {
        diag.write_line(&format!(" SAMEPOINT TABLE: CONVERT TO {target}"));
    }
    converted
}

/// Whether the board point of `current` and the off point of `previous`
/// are listed as one point by both fares' tables.
fn end_closes(
    current: &FareUsage,
    previous: &FareUsage,
    table: &dyn SamePointTable,
    diag: &mut dyn DiagnosticSink,
) -> bool {
    let board = current.market.board_multi_city.as_str();
    let off = previous.market.off_multi_city.as_str();
    if board == off {
        return false;
    }
    if diag.is_active() {
        diag.write_line(&format!("  VALIDATE POINT: {board} - {off}"));
    }

    let listed = fare_lists_same_point(current, board, off, table)
        && fare_lists_same_point(previous, board, off, table);
    if listed && diag.is_active() {
        diag.write_line(&format!("  SAME POINT: {board} - {off}"));
    }
    listed
}

fn fare_lists_same_point(
    fare: &FareUsage,
    board: &str,
    off: &str,
    table: &dyn SamePointTable,
) -> bool {
    let Some(rule) = fare.rule() else {
        return false;
    };
    match rule.same_points_item {
        Some(item_no) if item_no != 0 => {
            table.is_same_point(&rule.vendor, item_no, board, off, fare.market.travel_date)
        }
        _ => false,
    }
}
