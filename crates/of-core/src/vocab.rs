//! Closed vocabularies for the categorical filter dimensions.
//!
//! Every member serializes as its display literal (`"Good Data"`, `"APEX"`),
//! which is also the form collaborators send back when toggling a value.

use crate::CoreError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A closed set of literals with a stable declaration order.
pub trait Vocabulary:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = CoreError> + 'static
{
    /// Human name of the vocabulary, used in error messages.
    const NAME: &'static str;
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $lit:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $lit)]
                $variant,
            )+
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $label;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::UnknownValue {
                        vocabulary: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

vocabulary! {
    /// Ocean basin a profile was collected in.
    Region, "region" {
        NorthAtlantic => "North Atlantic",
        SouthAtlantic => "South Atlantic",
        NorthPacific => "North Pacific",
        SouthPacific => "South Pacific",
        IndianOcean => "Indian Ocean",
        SouthernOcean => "Southern Ocean",
        ArcticOcean => "Arctic Ocean",
        MediterraneanSea => "Mediterranean Sea",
    }
}

vocabulary! {
    Season, "season" {
        Spring => "Spring",
        Summer => "Summer",
        Fall => "Fall",
        Winter => "Winter",
    }
}

vocabulary! {
    /// Delayed-mode quality control outcome attached to a measurement.
    QualityFlag, "quality flag" {
        GoodData => "Good Data",
        ProbablyGood => "Probably Good",
        ProbablyBad => "Probably Bad",
        BadData => "Bad Data",
        ChangedValue => "Changed Value",
        EstimatedValue => "Estimated Value",
        MissingValue => "Missing Value",
    }
}

vocabulary! {
    /// Operational state of a profiling float.
    FloatStatus, "float status" {
        Active => "Active",
        Inactive => "Inactive",
        Maintenance => "Maintenance",
        Lost => "Lost",
        Decommissioned => "Decommissioned",
    }
}

vocabulary! {
    /// Float platform model.
    InstrumentType, "instrument type" {
        Apex => "APEX",
        Solo => "SOLO",
        Nova => "NOVA",
        Provor => "PROVOR",
        Arvor => "ARVOR",
        Navis => "NAVIS",
    }
}

vocabulary! {
    /// Measured parameter carried by a profile.
    Measurement, "measurement" {
        Temperature => "Temperature",
        Salinity => "Salinity",
        Pressure => "Pressure",
        DissolvedOxygen => "Dissolved Oxygen",
        Chlorophyll => "Chlorophyll",
        Nitrate => "Nitrate",
        Ph => "pH",
        Backscatter => "Backscatter",
        Irradiance => "Irradiance",
    }
}

vocabulary! {
    /// Kind of vertical profile.
    ProfileType, "profile type" {
        Ascending => "Ascending",
        Descending => "Descending",
        Core => "Core",
        Biogeochemical => "Biogeochemical",
        Deep => "Deep",
    }
}

vocabulary! {
    TemperatureUnit, "temperature unit" {
        Celsius => "celsius",
        Fahrenheit => "fahrenheit",
    }
}

vocabulary! {
    DepthUnit, "depth unit" {
        Meters => "meters",
        Feet => "feet",
    }
}

impl Default for TemperatureUnit {
    fn default() -> Self {
        Self::Celsius
    }
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl Default for DepthUnit {
    fn default() -> Self {
        Self::Meters
    }
}

impl DepthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "ft",
        }
    }
}

/// A value that can live in a list-valued filter dimension.
///
/// Collaborators speak in display literals; `parse_member` turns one back
/// into a typed value.
pub trait ListMember: Clone + PartialEq + fmt::Display {
    fn parse_member(text: &str) -> Result<Self, CoreError>;
}

impl<V: Vocabulary> ListMember for V {
    fn parse_member(text: &str) -> Result<Self, CoreError> {
        text.parse()
    }
}

/// Free-form float identifier (WMO number or platform code).
///
/// Trimmed on construction; blank identifiers are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FloatId(String);

impl FloatId {
    pub fn new(text: &str) -> Result<Self, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Blank { what: "float id" });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FloatId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<FloatId> for String {
    fn from(id: FloatId) -> Self {
        id.0
    }
}

impl fmt::Display for FloatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ListMember for FloatId {
    fn parse_member(text: &str) -> Result<Self, CoreError> {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_sizes() {
        assert_eq!(Season::ALL.len(), 4);
        assert_eq!(QualityFlag::ALL.len(), 7);
        assert_eq!(FloatStatus::ALL.len(), 5);
        assert_eq!(InstrumentType::ALL.len(), 6);
        assert_eq!(Measurement::ALL.len(), 9);
        assert_eq!(ProfileType::ALL.len(), 5);
    }

    #[test]
    fn literals_parse_back() {
        assert_eq!("Bad Data".parse::<QualityFlag>().unwrap(), QualityFlag::BadData);
        assert_eq!("pH".parse::<Measurement>().unwrap(), Measurement::Ph);
        assert_eq!(Region::NorthPacific.to_string(), "North Pacific");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let err = "bad data".parse::<QualityFlag>().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownValue {
                vocabulary: "quality flag",
                value: "bad data".to_string(),
            }
        );
    }

    #[test]
    fn float_ids_are_trimmed_and_never_blank() {
        assert_eq!(FloatId::new("  5906512 ").unwrap().as_str(), "5906512");
        assert_eq!(
            FloatId::new("   ").unwrap_err(),
            CoreError::Blank { what: "float id" }
        );
        assert_eq!(
            FloatId::parse_member("2903456").unwrap().to_string(),
            "2903456"
        );
    }

    #[test]
    fn unit_defaults() {
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
        assert_eq!(DepthUnit::default().symbol(), "m");
    }
}
