//! Filter specification validation logic.

use crate::dimension::Dimension;
use crate::schema::{
    COMPLETENESS_LIMITS, Coordinates, DateRange, FilterSpec, LATITUDE_LIMITS, LONGITUDE_LIMITS,
    ValueRange,
};
use of_core::{Real, format_real};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Inverted range: {field} min {min} is greater than max {max}")]
    InvertedRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate value: {value} in {dimension}")]
    DuplicateValue { dimension: Dimension, value: String },
}

/// Check every dimension of `spec`.
pub fn validate_spec(spec: &FilterSpec) -> Result<(), ValidationError> {
    for dimension in Dimension::ALL {
        validate_dimension(spec, dimension)?;
    }
    Ok(())
}

/// Check a single dimension of `spec`; the others are not inspected.
pub fn validate_dimension(spec: &FilterSpec, dimension: Dimension) -> Result<(), ValidationError> {
    match dimension {
        Dimension::Regions => validate_list(dimension, &spec.regions),
        Dimension::Seasons => validate_list(dimension, &spec.seasons),
        Dimension::QualityFlags => validate_list(dimension, &spec.quality_flags),
        Dimension::FloatStatus => validate_list(dimension, &spec.float_status),
        Dimension::InstrumentTypes => validate_list(dimension, &spec.instrument_types),
        Dimension::FloatIds => validate_list(dimension, &spec.float_ids),
        Dimension::Measurements => validate_list(dimension, &spec.measurements),
        Dimension::Profiles => validate_list(dimension, &spec.profiles),
        Dimension::Coordinates => validate_coordinates(&spec.coordinates),
        Dimension::DateRange => validate_date_range(&spec.date_range),
        Dimension::Temperature => validate_range(dimension, &spec.temperature),
        Dimension::Salinity => validate_range(dimension, &spec.salinity),
        Dimension::Depth => validate_range(dimension, &spec.depth),
        Dimension::DataCompleteness => validate_within(
            "dataCompleteness",
            spec.data_completeness,
            COMPLETENESS_LIMITS,
        ),
    }
}

fn validate_list<T: PartialEq + ToString>(
    dimension: Dimension,
    values: &[T],
) -> Result<(), ValidationError> {
    for (idx, value) in values.iter().enumerate() {
        if values[..idx].contains(value) {
            return Err(ValidationError::DuplicateValue {
                dimension,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_range<R: ValueRange>(dimension: Dimension, range: &R) -> Result<(), ValidationError> {
    let (min, max) = range.bounds();
    validate_finite(&format!("{dimension}.min"), min)?;
    validate_finite(&format!("{dimension}.max"), max)?;
    if min > max {
        return Err(ValidationError::InvertedRange {
            field: dimension.to_string(),
            min: format_real(min),
            max: format_real(max),
        });
    }
    Ok(())
}

fn validate_coordinates(coordinates: &Coordinates) -> Result<(), ValidationError> {
    validate_within("coordinates.latMin", coordinates.lat_min, LATITUDE_LIMITS)?;
    validate_within("coordinates.latMax", coordinates.lat_max, LATITUDE_LIMITS)?;
    validate_within("coordinates.lonMin", coordinates.lon_min, LONGITUDE_LIMITS)?;
    validate_within("coordinates.lonMax", coordinates.lon_max, LONGITUDE_LIMITS)?;

    if coordinates.lat_min > coordinates.lat_max {
        return Err(ValidationError::InvertedRange {
            field: "coordinates.lat".to_string(),
            min: format_real(coordinates.lat_min),
            max: format_real(coordinates.lat_max),
        });
    }
    // Boxes crossing the antimeridian are not representable.
    if coordinates.lon_min > coordinates.lon_max {
        return Err(ValidationError::InvertedRange {
            field: "coordinates.lon".to_string(),
            min: format_real(coordinates.lon_min),
            max: format_real(coordinates.lon_max),
        });
    }
    Ok(())
}

fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    if range.start_date > range.end_date {
        return Err(ValidationError::InvertedRange {
            field: "dateRange".to_string(),
            min: range.start_date.to_string(),
            max: range.end_date.to_string(),
        });
    }
    Ok(())
}

fn validate_finite(field: &str, value: Real) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_within(field: &str, value: Real, limits: (Real, Real)) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    let (lo, hi) = limits;
    if value < lo || value > hi {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: format_real(value),
            reason: format!("must be in [{}, {}]", format_real(lo), format_real(hi)),
        });
    }
    Ok(())
}
