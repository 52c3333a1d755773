//! Filter specification schema.
//!
//! Field names serialize in camelCase (`dateRange`, `qualityFlags`, ...) and
//! every field is required on input; unknown fields are rejected.

use chrono::NaiveDate;
use of_core::{
    DepthUnit, FloatId, FloatStatus, InstrumentType, Measurement, ProfileType, QualityFlag, Real,
    Region, Season, TemperatureUnit,
};
use serde::{Deserialize, Serialize};

pub const LATITUDE_LIMITS: (Real, Real) = (-90.0, 90.0);
pub const LONGITUDE_LIMITS: (Real, Real) = (-180.0, 180.0);
pub const COMPLETENESS_LIMITS: (Real, Real) = (0.0, 100.0);

pub const DEFAULT_TEMPERATURE: (Real, Real) = (-2.0, 35.0);
pub const DEFAULT_SALINITY: (Real, Real) = (0.0, 40.0);
pub const DEFAULT_DEPTH: (Real, Real) = (0.0, 6000.0);
pub const DEFAULT_DATA_COMPLETENESS: Real = 80.0;

pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};
pub const DEFAULT_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 12, 31) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// Every filter dimension an analyst can constrain.
///
/// Treated as an immutable value: edits go through [`crate::update::apply`],
/// which returns a fresh specification instead of touching this one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterSpec {
    pub regions: Vec<Region>,
    pub coordinates: Coordinates,
    pub date_range: DateRange,
    pub seasons: Vec<Season>,
    pub temperature: TemperatureRange,
    pub salinity: SalinityRange,
    pub depth: DepthRange,
    pub quality_flags: Vec<QualityFlag>,
    pub data_completeness: Real,
    pub float_status: Vec<FloatStatus>,
    pub instrument_types: Vec<InstrumentType>,
    pub float_ids: Vec<FloatId>,
    pub measurements: Vec<Measurement>,
    pub profiles: Vec<ProfileType>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            coordinates: Coordinates::default(),
            date_range: DateRange::default(),
            seasons: Vec::new(),
            temperature: TemperatureRange::default(),
            salinity: SalinityRange::default(),
            depth: DepthRange::default(),
            quality_flags: Vec::new(),
            data_completeness: DEFAULT_DATA_COMPLETENESS,
            float_status: Vec::new(),
            instrument_types: Vec::new(),
            float_ids: Vec::new(),
            measurements: Vec::new(),
            profiles: Vec::new(),
        }
    }
}

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Coordinates {
    pub lat_min: Real,
    pub lat_max: Real,
    pub lon_min: Real,
    pub lon_max: Real,
}

impl Default for Coordinates {
    fn default() -> Self {
        Self {
            lat_min: LATITUDE_LIMITS.0,
            lat_max: LATITUDE_LIMITS.1,
            lon_min: LONGITUDE_LIMITS.0,
            lon_max: LONGITUDE_LIMITS.1,
        }
    }
}

/// Inclusive calendar window, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemperatureRange {
    pub min: Real,
    pub max: Real,
    pub unit: TemperatureUnit,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_TEMPERATURE.0,
            max: DEFAULT_TEMPERATURE.1,
            unit: TemperatureUnit::Celsius,
        }
    }
}

/// Practical salinity (PSU).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SalinityRange {
    pub min: Real,
    pub max: Real,
}

impl Default for SalinityRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_SALINITY.0,
            max: DEFAULT_SALINITY.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DepthRange {
    pub min: Real,
    pub max: Real,
    pub unit: DepthUnit,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_DEPTH.0,
            max: DEFAULT_DEPTH.1,
            unit: DepthUnit::Meters,
        }
    }
}

/// A `min`/`max` pair with a declared default.
///
/// Units are not part of this view: they never make a range
/// active and survive a reset.
pub trait ValueRange {
    const DEFAULT_BOUNDS: (Real, Real);

    fn bounds(&self) -> (Real, Real);
    fn set_bounds(&mut self, min: Real, max: Real);

    fn reset_bounds(&mut self) {
        let (min, max) = Self::DEFAULT_BOUNDS;
        self.set_bounds(min, max);
    }

    /// Unit suffix for display, if the range carries one.
    fn unit_symbol(&self) -> Option<&'static str> {
        None
    }
}

impl ValueRange for TemperatureRange {
    const DEFAULT_BOUNDS: (Real, Real) = DEFAULT_TEMPERATURE;

    fn bounds(&self) -> (Real, Real) {
        (self.min, self.max)
    }

    fn set_bounds(&mut self, min: Real, max: Real) {
        self.min = min;
        self.max = max;
    }

    fn unit_symbol(&self) -> Option<&'static str> {
        Some(self.unit.symbol())
    }
}

impl ValueRange for SalinityRange {
    const DEFAULT_BOUNDS: (Real, Real) = DEFAULT_SALINITY;

    fn bounds(&self) -> (Real, Real) {
        (self.min, self.max)
    }

    fn set_bounds(&mut self, min: Real, max: Real) {
        self.min = min;
        self.max = max;
    }

    fn unit_symbol(&self) -> Option<&'static str> {
        Some("PSU")
    }
}

impl ValueRange for DepthRange {
    const DEFAULT_BOUNDS: (Real, Real) = DEFAULT_DEPTH;

    fn bounds(&self) -> (Real, Real) {
        (self.min, self.max)
    }

    fn set_bounds(&mut self, min: Real, max: Real) {
        self.min = min;
        self.max = max;
    }

    fn unit_symbol(&self) -> Option<&'static str> {
        Some(self.unit.symbol())
    }
}
