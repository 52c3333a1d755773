//! Update engine: pure edits over a [`FilterSpec`].
//!
//! Every operation takes the previous specification by reference and either
//! produces a complete replacement or reports that nothing changed. A failed
//! edit never leaves a half-applied value behind because the input is never
//! touched.

use crate::dimension::{Dimension, DimensionKind, NestedKey};
use crate::schema::{
    Coordinates, DEFAULT_DATA_COMPLETENESS, DateRange, DepthRange, FilterSpec, SalinityRange,
    TemperatureRange, ValueRange,
};
use crate::validate::{ValidationError, validate_dimension};
use chrono::NaiveDate;
use of_core::{
    CoreError, DepthUnit, FloatId, FloatStatus, InstrumentType, ListMember, Measurement,
    ProfileType, QualityFlag, Real, Region, Season, TemperatureUnit, Vocabulary, ensure_finite,
    format_real, parse_real,
};
use serde::{Deserialize, Serialize};

pub type EditResult<T> = Result<T, EditError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error(transparent)]
    Value(#[from] CoreError),

    #[error("Invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("{dimension} has no nested key {key}")]
    UnknownKey {
        dimension: Dimension,
        key: NestedKey,
    },

    #[error("{dimension} does not support {operation}")]
    Unsupported {
        dimension: Dimension,
        operation: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Whole-dimension value for [`FilterEdit::SetField`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Regions(Vec<Region>),
    Coordinates(Coordinates),
    DateRange(DateRange),
    Seasons(Vec<Season>),
    Temperature(TemperatureRange),
    Salinity(SalinityRange),
    Depth(DepthRange),
    QualityFlags(Vec<QualityFlag>),
    DataCompleteness(Real),
    FloatStatus(Vec<FloatStatus>),
    InstrumentTypes(Vec<InstrumentType>),
    FloatIds(Vec<FloatId>),
    Measurements(Vec<Measurement>),
    Profiles(Vec<ProfileType>),
}

impl FieldValue {
    pub fn dimension(&self) -> Dimension {
        match self {
            FieldValue::Regions(_) => Dimension::Regions,
            FieldValue::Coordinates(_) => Dimension::Coordinates,
            FieldValue::DateRange(_) => Dimension::DateRange,
            FieldValue::Seasons(_) => Dimension::Seasons,
            FieldValue::Temperature(_) => Dimension::Temperature,
            FieldValue::Salinity(_) => Dimension::Salinity,
            FieldValue::Depth(_) => Dimension::Depth,
            FieldValue::QualityFlags(_) => Dimension::QualityFlags,
            FieldValue::DataCompleteness(_) => Dimension::DataCompleteness,
            FieldValue::FloatStatus(_) => Dimension::FloatStatus,
            FieldValue::InstrumentTypes(_) => Dimension::InstrumentTypes,
            FieldValue::FloatIds(_) => Dimension::FloatIds,
            FieldValue::Measurements(_) => Dimension::Measurements,
            FieldValue::Profiles(_) => Dimension::Profiles,
        }
    }

    /// Build a value from display literals, as sent by pickers and scripts.
    ///
    /// List dimensions take any number of literals; `dataCompleteness` takes
    /// exactly one number. Nested dimensions are edited key by key instead.
    pub fn from_literals<S: AsRef<str>>(dimension: Dimension, literals: &[S]) -> EditResult<Self> {
        Ok(match dimension {
            Dimension::Regions => FieldValue::Regions(parse_all(literals)?),
            Dimension::Seasons => FieldValue::Seasons(parse_all(literals)?),
            Dimension::QualityFlags => FieldValue::QualityFlags(parse_all(literals)?),
            Dimension::FloatStatus => FieldValue::FloatStatus(parse_all(literals)?),
            Dimension::InstrumentTypes => FieldValue::InstrumentTypes(parse_all(literals)?),
            Dimension::FloatIds => FieldValue::FloatIds(parse_all(literals)?),
            Dimension::Measurements => FieldValue::Measurements(parse_all(literals)?),
            Dimension::Profiles => FieldValue::Profiles(parse_all(literals)?),
            Dimension::DataCompleteness => match literals {
                [one] => {
                    FieldValue::DataCompleteness(parse_real(one.as_ref(), "dataCompleteness")?)
                }
                _ => {
                    return Err(EditError::Unsupported {
                        dimension,
                        operation: "more than one value",
                    });
                }
            },
            Dimension::Coordinates
            | Dimension::DateRange
            | Dimension::Temperature
            | Dimension::Salinity
            | Dimension::Depth => {
                return Err(EditError::Unsupported {
                    dimension,
                    operation: "setting from literals",
                });
            }
        })
    }
}

fn parse_all<T: ListMember, S: AsRef<str>>(literals: &[S]) -> EditResult<Vec<T>> {
    literals
        .iter()
        .map(|s| T::parse_member(s.as_ref()).map_err(EditError::from))
        .collect()
}

impl FilterSpec {
    /// Current value of one dimension.
    pub fn field(&self, dimension: Dimension) -> FieldValue {
        match dimension {
            Dimension::Regions => FieldValue::Regions(self.regions.clone()),
            Dimension::Coordinates => FieldValue::Coordinates(self.coordinates),
            Dimension::DateRange => FieldValue::DateRange(self.date_range),
            Dimension::Seasons => FieldValue::Seasons(self.seasons.clone()),
            Dimension::Temperature => FieldValue::Temperature(self.temperature),
            Dimension::Salinity => FieldValue::Salinity(self.salinity),
            Dimension::Depth => FieldValue::Depth(self.depth),
            Dimension::QualityFlags => FieldValue::QualityFlags(self.quality_flags.clone()),
            Dimension::DataCompleteness => FieldValue::DataCompleteness(self.data_completeness),
            Dimension::FloatStatus => FieldValue::FloatStatus(self.float_status.clone()),
            Dimension::InstrumentTypes => {
                FieldValue::InstrumentTypes(self.instrument_types.clone())
            }
            Dimension::FloatIds => FieldValue::FloatIds(self.float_ids.clone()),
            Dimension::Measurements => FieldValue::Measurements(self.measurements.clone()),
            Dimension::Profiles => FieldValue::Profiles(self.profiles.clone()),
        }
    }
}

/// Value for a single nested key.
///
/// Text is what a form field holds; it is parsed according to the key
/// (number, `YYYY-MM-DD` date or unit literal).
#[derive(Debug, Clone, PartialEq)]
pub enum NestedValue {
    Number(Real),
    Text(String),
}

impl From<Real> for NestedValue {
    fn from(v: Real) -> Self {
        NestedValue::Number(v)
    }
}

impl From<&str> for NestedValue {
    fn from(v: &str) -> Self {
        NestedValue::Text(v.to_string())
    }
}

impl From<String> for NestedValue {
    fn from(v: String) -> Self {
        NestedValue::Text(v)
    }
}

/// One edit instruction from a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    /// Replace one dimension wholesale.
    SetField(FieldValue),
    /// Replace one key inside a nested dimension.
    SetNested {
        dimension: Dimension,
        key: NestedKey,
        value: NestedValue,
    },
    /// Append a list member unless already present.
    AddValue { dimension: Dimension, value: String },
    /// Append a list member, or remove it when present.
    ToggleValue { dimension: Dimension, value: String },
    /// Remove one list member, or with no value reset the dimension.
    RemoveValue {
        dimension: Dimension,
        value: Option<String>,
    },
    /// Back to the default specification.
    ClearAll,
}

impl FilterEdit {
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            FilterEdit::SetField(value) => Some(value.dimension()),
            FilterEdit::SetNested { dimension, .. }
            | FilterEdit::AddValue { dimension, .. }
            | FilterEdit::ToggleValue { dimension, .. }
            | FilterEdit::RemoveValue { dimension, .. } => Some(*dimension),
            FilterEdit::ClearAll => None,
        }
    }
}

/// Outcome of a successful edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Replaced(FilterSpec),
    Unchanged,
}

impl Transition {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Transition::Replaced(_))
    }

    pub fn into_spec(self) -> Option<FilterSpec> {
        match self {
            Transition::Replaced(spec) => Some(spec),
            Transition::Unchanged => None,
        }
    }
}

/// What to do when an edit leaves `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvertedRangePolicy {
    /// Refuse the edit.
    #[default]
    Reject,
    /// Pin the edited bound to the opposite one.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditPolicy {
    pub inverted_ranges: InvertedRangePolicy,
}

/// Apply any edit instruction.
pub fn apply(spec: &FilterSpec, edit: FilterEdit, policy: EditPolicy) -> EditResult<Transition> {
    match edit {
        FilterEdit::SetField(value) => set_field(spec, value, policy),
        FilterEdit::SetNested {
            dimension,
            key,
            value,
        } => set_nested_field(spec, dimension, key, &value, policy),
        FilterEdit::AddValue { dimension, value } => add_value(spec, dimension, &value),
        FilterEdit::ToggleValue { dimension, value } => toggle_value(spec, dimension, &value),
        FilterEdit::RemoveValue { dimension, value } => {
            remove_value(spec, dimension, value.as_deref())
        }
        FilterEdit::ClearAll => Ok(clear_all()),
    }
}

/// Replace exactly one dimension; siblings are carried over unchanged.
pub fn set_field(
    spec: &FilterSpec,
    value: FieldValue,
    policy: EditPolicy,
) -> EditResult<Transition> {
    let dimension = value.dimension();
    let mut next = spec.clone();
    match value {
        FieldValue::Regions(v) => next.regions = v,
        FieldValue::Coordinates(v) => next.coordinates = v,
        FieldValue::DateRange(v) => next.date_range = v,
        FieldValue::Seasons(v) => next.seasons = v,
        FieldValue::Temperature(v) => next.temperature = v,
        FieldValue::Salinity(v) => next.salinity = v,
        FieldValue::Depth(v) => next.depth = v,
        FieldValue::QualityFlags(v) => next.quality_flags = v,
        FieldValue::DataCompleteness(v) => next.data_completeness = v,
        FieldValue::FloatStatus(v) => next.float_status = v,
        FieldValue::InstrumentTypes(v) => next.instrument_types = v,
        FieldValue::FloatIds(v) => next.float_ids = v,
        FieldValue::Measurements(v) => next.measurements = v,
        FieldValue::Profiles(v) => next.profiles = v,
    }

    if policy.inverted_ranges == InvertedRangePolicy::Clamp {
        collapse_inverted(&mut next, dimension);
    }
    validate_dimension(&next, dimension)?;
    Ok(Transition::Replaced(next))
}

/// Replace one key of a nested dimension, keeping its other keys.
pub fn set_nested_field(
    spec: &FilterSpec,
    dimension: Dimension,
    key: NestedKey,
    value: &NestedValue,
    policy: EditPolicy,
) -> EditResult<Transition> {
    if !dimension.nested_keys().contains(&key) {
        return Err(EditError::UnknownKey { dimension, key });
    }

    let mut next = spec.clone();
    match (dimension, key) {
        (Dimension::Coordinates, NestedKey::LatMin) => {
            next.coordinates.lat_min = number(value, "coordinates.latMin")?;
        }
        (Dimension::Coordinates, NestedKey::LatMax) => {
            next.coordinates.lat_max = number(value, "coordinates.latMax")?;
        }
        (Dimension::Coordinates, NestedKey::LonMin) => {
            next.coordinates.lon_min = number(value, "coordinates.lonMin")?;
        }
        (Dimension::Coordinates, NestedKey::LonMax) => {
            next.coordinates.lon_max = number(value, "coordinates.lonMax")?;
        }
        (Dimension::DateRange, NestedKey::StartDate) => {
            next.date_range.start_date = date(value)?;
        }
        (Dimension::DateRange, NestedKey::EndDate) => {
            next.date_range.end_date = date(value)?;
        }
        (Dimension::Temperature, NestedKey::Min) => {
            next.temperature.min = number(value, "temperature.min")?;
        }
        (Dimension::Temperature, NestedKey::Max) => {
            next.temperature.max = number(value, "temperature.max")?;
        }
        (Dimension::Temperature, NestedKey::Unit) => {
            next.temperature.unit = unit::<TemperatureUnit>(value)?;
        }
        (Dimension::Salinity, NestedKey::Min) => {
            next.salinity.min = number(value, "salinity.min")?;
        }
        (Dimension::Salinity, NestedKey::Max) => {
            next.salinity.max = number(value, "salinity.max")?;
        }
        (Dimension::Depth, NestedKey::Min) => {
            next.depth.min = number(value, "depth.min")?;
        }
        (Dimension::Depth, NestedKey::Max) => {
            next.depth.max = number(value, "depth.max")?;
        }
        (Dimension::Depth, NestedKey::Unit) => {
            next.depth.unit = unit::<DepthUnit>(value)?;
        }
        _ => return Err(EditError::UnknownKey { dimension, key }),
    }

    if policy.inverted_ranges == InvertedRangePolicy::Clamp {
        clamp_edited(&mut next, dimension, key);
    }
    validate_dimension(&next, dimension)?;
    Ok(Transition::Replaced(next))
}

/// Append `value` to a list dimension unless it is already a member.
pub fn add_value(spec: &FilterSpec, dimension: Dimension, value: &str) -> EditResult<Transition> {
    edit_list_dimension(spec, dimension, ListOp::Add(value))
}

/// Flip membership of `value` in a list dimension.
pub fn toggle_value(
    spec: &FilterSpec,
    dimension: Dimension,
    value: &str,
) -> EditResult<Transition> {
    edit_list_dimension(spec, dimension, ListOp::Toggle(value))
}

/// Remove a list member, or reset a dimension when `value` is `None`.
///
/// Removing something that is not there is a no-op, as is resetting a
/// dimension that already holds its default. For range dimensions only the
/// bounds are reset; the unit is kept. Range, bounds and scalar dimensions
/// have no members, so removing a value from one of them is a no-op.
pub fn remove_value(
    spec: &FilterSpec,
    dimension: Dimension,
    value: Option<&str>,
) -> EditResult<Transition> {
    match (dimension.kind(), value) {
        (DimensionKind::List, Some(value)) => {
            edit_list_dimension(spec, dimension, ListOp::Remove(value))
        }
        (DimensionKind::List, None) => edit_list_dimension(spec, dimension, ListOp::Clear),
        (_, Some(_)) => Ok(Transition::Unchanged),
        (_, None) => Ok(reset_dimension(spec, dimension)),
    }
}

/// Replace everything with the default specification.
pub fn clear_all() -> Transition {
    Transition::Replaced(FilterSpec::default())
}

#[derive(Debug, Clone, Copy)]
enum ListOp<'a> {
    Add(&'a str),
    Toggle(&'a str),
    Remove(&'a str),
    Clear,
}

impl ListOp<'_> {
    fn name(self) -> &'static str {
        match self {
            ListOp::Add(_) => "adding values",
            ListOp::Toggle(_) => "toggling values",
            ListOp::Remove(_) => "removing values",
            ListOp::Clear => "clearing values",
        }
    }
}

fn edit_list_dimension(
    spec: &FilterSpec,
    dimension: Dimension,
    op: ListOp<'_>,
) -> EditResult<Transition> {
    let mut next = spec.clone();
    let changed = match dimension {
        Dimension::Regions => edit_list(&mut next.regions, op)?,
        Dimension::Seasons => edit_list(&mut next.seasons, op)?,
        Dimension::QualityFlags => edit_list(&mut next.quality_flags, op)?,
        Dimension::FloatStatus => edit_list(&mut next.float_status, op)?,
        Dimension::InstrumentTypes => edit_list(&mut next.instrument_types, op)?,
        Dimension::FloatIds => edit_list(&mut next.float_ids, op)?,
        Dimension::Measurements => edit_list(&mut next.measurements, op)?,
        Dimension::Profiles => edit_list(&mut next.profiles, op)?,
        Dimension::Coordinates
        | Dimension::DateRange
        | Dimension::Temperature
        | Dimension::Salinity
        | Dimension::Depth
        | Dimension::DataCompleteness => {
            return Err(EditError::Unsupported {
                dimension,
                operation: op.name(),
            });
        }
    };

    Ok(if changed {
        Transition::Replaced(next)
    } else {
        Transition::Unchanged
    })
}

/// Returns whether `list` changed. Existing members never move.
fn edit_list<T: ListMember>(list: &mut Vec<T>, op: ListOp<'_>) -> EditResult<bool> {
    match op {
        ListOp::Add(text) => {
            let value = T::parse_member(text)?;
            if list.contains(&value) {
                return Ok(false);
            }
            list.push(value);
            Ok(true)
        }
        ListOp::Toggle(text) => {
            let value = T::parse_member(text)?;
            match list.iter().position(|v| *v == value) {
                Some(idx) => {
                    list.remove(idx);
                }
                None => list.push(value),
            }
            Ok(true)
        }
        ListOp::Remove(text) => {
            // A literal outside the vocabulary can't be a member.
            let Ok(value) = T::parse_member(text) else {
                return Ok(false);
            };
            match list.iter().position(|v| *v == value) {
                Some(idx) => {
                    list.remove(idx);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        ListOp::Clear => {
            if list.is_empty() {
                return Ok(false);
            }
            list.clear();
            Ok(true)
        }
    }
}

fn reset_dimension(spec: &FilterSpec, dimension: Dimension) -> Transition {
    let mut next = spec.clone();
    match dimension {
        Dimension::Coordinates => next.coordinates = Coordinates::default(),
        Dimension::DateRange => next.date_range = DateRange::default(),
        Dimension::Temperature => next.temperature.reset_bounds(),
        Dimension::Salinity => next.salinity.reset_bounds(),
        Dimension::Depth => next.depth.reset_bounds(),
        Dimension::DataCompleteness => next.data_completeness = DEFAULT_DATA_COMPLETENESS,
        Dimension::Regions => next.regions.clear(),
        Dimension::Seasons => next.seasons.clear(),
        Dimension::QualityFlags => next.quality_flags.clear(),
        Dimension::FloatStatus => next.float_status.clear(),
        Dimension::InstrumentTypes => next.instrument_types.clear(),
        Dimension::FloatIds => next.float_ids.clear(),
        Dimension::Measurements => next.measurements.clear(),
        Dimension::Profiles => next.profiles.clear(),
    }

    if next == *spec {
        Transition::Unchanged
    } else {
        Transition::Replaced(next)
    }
}

fn number(value: &NestedValue, what: &'static str) -> EditResult<Real> {
    let v = match value {
        NestedValue::Number(v) => ensure_finite(*v, what)?,
        NestedValue::Text(text) => parse_real(text, what)?,
    };
    Ok(v)
}

fn date(value: &NestedValue) -> EditResult<NaiveDate> {
    match value {
        NestedValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| EditError::InvalidDate {
                input: text.clone(),
            }),
        NestedValue::Number(v) => Err(EditError::InvalidDate {
            input: format_real(*v),
        }),
    }
}

fn unit<U: Vocabulary>(value: &NestedValue) -> EditResult<U> {
    match value {
        NestedValue::Text(text) => Ok(text.trim().parse::<U>()?),
        NestedValue::Number(v) => Err(CoreError::UnknownValue {
            vocabulary: U::NAME,
            value: format_real(*v),
        }
        .into()),
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Lower,
    Upper,
}

fn pin<T: PartialOrd + Copy>(min: &mut T, max: &mut T, edited: Edge) {
    if *min > *max {
        match edited {
            Edge::Lower => *min = *max,
            Edge::Upper => *max = *min,
        }
    }
}

fn clamp_edited(spec: &mut FilterSpec, dimension: Dimension, key: NestedKey) {
    let edge = match key {
        NestedKey::LatMin | NestedKey::LonMin | NestedKey::StartDate | NestedKey::Min => {
            Edge::Lower
        }
        NestedKey::LatMax | NestedKey::LonMax | NestedKey::EndDate | NestedKey::Max => {
            Edge::Upper
        }
        NestedKey::Unit => return,
    };

    match (dimension, key) {
        (Dimension::Coordinates, NestedKey::LatMin | NestedKey::LatMax) => {
            let c = &mut spec.coordinates;
            pin(&mut c.lat_min, &mut c.lat_max, edge);
        }
        (Dimension::Coordinates, _) => {
            let c = &mut spec.coordinates;
            pin(&mut c.lon_min, &mut c.lon_max, edge);
        }
        (Dimension::DateRange, _) => {
            let d = &mut spec.date_range;
            pin(&mut d.start_date, &mut d.end_date, edge);
        }
        (Dimension::Temperature, _) => {
            pin(&mut spec.temperature.min, &mut spec.temperature.max, edge);
        }
        (Dimension::Salinity, _) => {
            pin(&mut spec.salinity.min, &mut spec.salinity.max, edge);
        }
        (Dimension::Depth, _) => {
            pin(&mut spec.depth.min, &mut spec.depth.max, edge);
        }
        _ => {}
    }
}

/// Whole-object replacement under `Clamp`: the upper bound follows the lower.
fn collapse_inverted(spec: &mut FilterSpec, dimension: Dimension) {
    clamp_edited(spec, dimension, upper_key(dimension));
    if dimension == Dimension::Coordinates {
        clamp_edited(spec, dimension, NestedKey::LonMax);
    }
}

fn upper_key(dimension: Dimension) -> NestedKey {
    match dimension {
        Dimension::Coordinates => NestedKey::LatMax,
        Dimension::DateRange => NestedKey::EndDate,
        _ => NestedKey::Max,
    }
}
