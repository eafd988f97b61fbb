//! Record 2 Category 10 indicator vocabulary.
//!
//! Each family is a closed enum named after what the ATPCO/SITA character
//! means, so every branch over a code is matched exhaustively.

use serde::{Deserialize, Serialize};

use crate::pricing::domain::PricingUnitType;

/// End-on-end combination indicator (category 104).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOnEndIndicator {
    #[default]
    NotApplicable,
    Permitted,
    NotPermitted,
    Restrictions,
    Required,
    NotApplicableData,
    PermittedNoSideTrip,
    NotPermittedNoSideTrip,
    RestrictionsNoSideTrip,
    RequiredNoSideTrip,
}

impl EndOnEndIndicator {
    /// No end-on-end instruction at all; the fare does not constrain the join.
    pub const fn is_not_applicable(self) -> bool {
        matches!(
            self,
            EndOnEndIndicator::NotApplicable | EndOnEndIndicator::NotApplicableData
        )
    }

    /// `B` carries the same outcome as `N`.
    pub const fn is_not_permitted(self) -> bool {
        matches!(
            self,
            EndOnEndIndicator::NotPermitted | EndOnEndIndicator::NotPermittedNoSideTrip
        )
    }

    /// `D` carries the same outcome as `M`.
    pub const fn is_required(self) -> bool {
        matches!(
            self,
            EndOnEndIndicator::Required | EndOnEndIndicator::RequiredNoSideTrip
        )
    }

    /// SITA codes that forbid side trips on the fare.
    pub const fn restricts_side_trip(self) -> bool {
        matches!(
            self,
            EndOnEndIndicator::PermittedNoSideTrip
                | EndOnEndIndicator::NotPermittedNoSideTrip
                | EndOnEndIndicator::RestrictionsNoSideTrip
                | EndOnEndIndicator::RequiredNoSideTrip
        )
    }
}

/// Round-trip combination indicator (category 102).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTripIndicator {
    #[default]
    NoRestriction,
    Permitted,
    NotPermitted,
    Restrictions,
    PermittedMirrorImageRestricted,
    NotPermittedMirrorImageRestricted,
    RestrictionsMirrorImageRestricted,
}

impl RoundTripIndicator {
    /// `V`, `X` and `W` qualify the mirror-image case.
    pub const fn is_mirror_qualified(self) -> bool {
        matches!(
            self,
            RoundTripIndicator::PermittedMirrorImageRestricted
                | RoundTripIndicator::NotPermittedMirrorImageRestricted
                | RoundTripIndicator::RestrictionsMirrorImageRestricted
        )
    }

    /// Whether this code lets a round trip stand, given its mirror-image status.
    pub const fn admits(self, mirror_image: bool) -> bool {
        mirror_image || !self.is_mirror_qualified()
    }
}

/// Circle-trip combination indicator (category 103).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleTripIndicator {
    #[default]
    NoRestriction,
    Permitted,
    NotPermitted,
    Restrictions,
}

/// Single and double open-jaw combination indicator (category 101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenJawIndicator {
    #[default]
    NoRestriction,
    Permitted,
    NotPermitted,
    Restrictions,
    PermittedS,
    RestrictionsT,
    PermittedDifferentCountry,
    RestrictionsDifferentCountry,
    PermittedOriginSameCountry,
    RestrictionsOriginSameCountry,
}

impl OpenJawIndicator {
    /// `S` and `T`: at most two international fares, both in the same country.
    pub const fn limits_international_fares(self) -> bool {
        matches!(
            self,
            OpenJawIndicator::PermittedS | OpenJawIndicator::RestrictionsT
        )
    }

    /// `U` and `V`: the open segment must span two countries.
    pub const fn requires_different_country(self) -> bool {
        matches!(
            self,
            OpenJawIndicator::PermittedDifferentCountry
                | OpenJawIndicator::RestrictionsDifferentCountry
        )
    }

    /// `W` and `X`: an origin open jaw must stay within one country.
    pub const fn requires_origin_same_country(self) -> bool {
        matches!(
            self,
            OpenJawIndicator::PermittedOriginSameCountry
                | OpenJawIndicator::RestrictionsOriginSameCountry
        )
    }
}

/// Direction an open jaw is required to take (`sojorigIndestInd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenJawDirection {
    #[default]
    None,
    OriginOpenJawRequired,
    DestinationOpenJawRequired,
}

/// Whether the record applies to the fare at all (`applInd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    #[default]
    Required,
    NotApplicable,
}

/// Attribute every fare component must share with the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamenessCode {
    SameCarrier,
    SameRule,
    SameTariff,
    SameFareClass,
    SameFareType,
}

impl SamenessCode {
    /// Evaluation order: carrier, rule, tariff, fare class, fare type.
    pub const PRIORITY: [SamenessCode; 5] = [
        SamenessCode::SameCarrier,
        SamenessCode::SameRule,
        SamenessCode::SameTariff,
        SamenessCode::SameFareClass,
        SamenessCode::SameFareType,
    ];
}

/// Combination category a pricing unit shape is judged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationScope {
    OpenJaw,
    RoundTrip,
    CircleTrip,
    EndOnEnd,
}

impl CombinationScope {
    pub const fn for_shape(shape: PricingUnitType) -> Option<Self> {
        match shape {
            PricingUnitType::OneWay => Some(CombinationScope::EndOnEnd),
            PricingUnitType::RoundTrip => Some(CombinationScope::RoundTrip),
            PricingUnitType::CircleTrip => Some(CombinationScope::CircleTrip),
            PricingUnitType::OpenJaw => Some(CombinationScope::OpenJaw),
            PricingUnitType::Unknown => None,
        }
    }
}
