//! Names and shapes of the filter dimensions.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One named filter axis, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Regions,
    Coordinates,
    DateRange,
    Seasons,
    Temperature,
    Salinity,
    Depth,
    QualityFlags,
    DataCompleteness,
    FloatStatus,
    InstrumentTypes,
    FloatIds,
    Measurements,
    Profiles,
}

/// How a dimension stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    /// Ordered set of vocabulary members (or free-text ids).
    List,
    /// `min`/`max` pair, optionally with a unit.
    Range,
    /// Geographic box or calendar window; never counted as active.
    Bounds,
    /// Single number.
    Scalar,
}

impl Dimension {
    pub const ALL: [Dimension; 14] = [
        Dimension::Regions,
        Dimension::Coordinates,
        Dimension::DateRange,
        Dimension::Seasons,
        Dimension::Temperature,
        Dimension::Salinity,
        Dimension::Depth,
        Dimension::QualityFlags,
        Dimension::DataCompleteness,
        Dimension::FloatStatus,
        Dimension::InstrumentTypes,
        Dimension::FloatIds,
        Dimension::Measurements,
        Dimension::Profiles,
    ];

    /// Field name used in exported documents and edit scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Regions => "regions",
            Dimension::Coordinates => "coordinates",
            Dimension::DateRange => "dateRange",
            Dimension::Seasons => "seasons",
            Dimension::Temperature => "temperature",
            Dimension::Salinity => "salinity",
            Dimension::Depth => "depth",
            Dimension::QualityFlags => "qualityFlags",
            Dimension::DataCompleteness => "dataCompleteness",
            Dimension::FloatStatus => "floatStatus",
            Dimension::InstrumentTypes => "instrumentTypes",
            Dimension::FloatIds => "floatIds",
            Dimension::Measurements => "measurements",
            Dimension::Profiles => "profiles",
        }
    }

    /// Human-facing name for tag labels.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Regions => "Region",
            Dimension::Coordinates => "Coordinates",
            Dimension::DateRange => "Date range",
            Dimension::Seasons => "Season",
            Dimension::Temperature => "Temperature",
            Dimension::Salinity => "Salinity",
            Dimension::Depth => "Depth",
            Dimension::QualityFlags => "Quality",
            Dimension::DataCompleteness => "Data completeness",
            Dimension::FloatStatus => "Float status",
            Dimension::InstrumentTypes => "Instrument",
            Dimension::FloatIds => "Float ID",
            Dimension::Measurements => "Measurement",
            Dimension::Profiles => "Profile",
        }
    }

    pub fn kind(self) -> DimensionKind {
        match self {
            Dimension::Regions
            | Dimension::Seasons
            | Dimension::QualityFlags
            | Dimension::FloatStatus
            | Dimension::InstrumentTypes
            | Dimension::FloatIds
            | Dimension::Measurements
            | Dimension::Profiles => DimensionKind::List,
            Dimension::Temperature | Dimension::Salinity | Dimension::Depth => {
                DimensionKind::Range
            }
            Dimension::Coordinates | Dimension::DateRange => DimensionKind::Bounds,
            Dimension::DataCompleteness => DimensionKind::Scalar,
        }
    }

    /// Sub-keys accepted by a nested edit on this dimension.
    pub fn nested_keys(self) -> &'static [NestedKey] {
        match self {
            Dimension::Coordinates => &[
                NestedKey::LatMin,
                NestedKey::LatMax,
                NestedKey::LonMin,
                NestedKey::LonMax,
            ],
            Dimension::DateRange => &[NestedKey::StartDate, NestedKey::EndDate],
            Dimension::Temperature | Dimension::Depth => {
                &[NestedKey::Min, NestedKey::Max, NestedKey::Unit]
            }
            Dimension::Salinity => &[NestedKey::Min, NestedKey::Max],
            _ => &[],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter dimension: {0:?}")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

/// Key inside a nested dimension object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NestedKey {
    LatMin,
    LatMax,
    LonMin,
    LonMax,
    StartDate,
    EndDate,
    Min,
    Max,
    Unit,
}

impl NestedKey {
    pub const ALL: [NestedKey; 9] = [
        NestedKey::LatMin,
        NestedKey::LatMax,
        NestedKey::LonMin,
        NestedKey::LonMax,
        NestedKey::StartDate,
        NestedKey::EndDate,
        NestedKey::Min,
        NestedKey::Max,
        NestedKey::Unit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NestedKey::LatMin => "latMin",
            NestedKey::LatMax => "latMax",
            NestedKey::LonMin => "lonMin",
            NestedKey::LonMax => "lonMax",
            NestedKey::StartDate => "startDate",
            NestedKey::EndDate => "endDate",
            NestedKey::Min => "min",
            NestedKey::Max => "max",
            NestedKey::Unit => "unit",
        }
    }
}

impl fmt::Display for NestedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown nested key: {0:?}")]
pub struct UnknownNestedKey(pub String);

impl FromStr for NestedKey {
    type Err = UnknownNestedKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NestedKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownNestedKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for dim in Dimension::ALL {
            assert_eq!(dim.as_str().parse::<Dimension>().unwrap(), dim);
        }
        for key in NestedKey::ALL {
            assert_eq!(key.as_str().parse::<NestedKey>().unwrap(), key);
        }
    }

    #[test]
    fn declaration_order_is_ord_order() {
        let mut sorted = Dimension::ALL;
        sorted.sort();
        assert_eq!(sorted, Dimension::ALL);
    }

    #[test]
    fn only_nested_dimensions_have_keys() {
        assert!(Dimension::Regions.nested_keys().is_empty());
        assert!(Dimension::DataCompleteness.nested_keys().is_empty());
        assert!(!Dimension::Salinity.nested_keys().contains(&NestedKey::Unit));
        assert!(Dimension::Depth.nested_keys().contains(&NestedKey::Unit));
    }

    #[test]
    fn unknown_dimension_is_reported() {
        let err = "depths".parse::<Dimension>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown filter dimension: \"depths\"");
    }
}
