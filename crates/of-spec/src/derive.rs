//! Derived views: active-filter count and removable tags.
//!
//! Nothing here is stored; both views are recomputed from a specification
//! whenever a collaborator asks.

use crate::dimension::{Dimension, DimensionKind};
use crate::schema::{DEFAULT_DATA_COMPLETENESS, FilterSpec, ValueRange};
use crate::update::FilterEdit;
use of_core::format_real;
use serde::Serialize;

/// A removable chip describing one active value or one active range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub category: Dimension,
    pub value: String,
    pub removable: bool,
}

impl Tag {
    /// Edit that dismisses this tag.
    pub fn remove_edit(&self) -> FilterEdit {
        let value = match self.category.kind() {
            DimensionKind::List => Some(self.value.clone()),
            _ => None,
        };
        FilterEdit::RemoveValue {
            dimension: self.category,
            value,
        }
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.category.label(), self.value)
    }
}

/// Both derived views, computed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    pub active_filter_count: usize,
    pub tags: Vec<Tag>,
}

pub fn summarize(spec: &FilterSpec) -> FilterSummary {
    FilterSummary {
        active_filter_count: active_filter_count(spec),
        tags: tags(spec),
    }
}

/// Whether `dimension` contributes to the active-filter count.
///
/// Coordinates and the date range never do.
pub fn is_active(spec: &FilterSpec, dimension: Dimension) -> bool {
    match dimension {
        Dimension::Regions => !spec.regions.is_empty(),
        Dimension::Seasons => !spec.seasons.is_empty(),
        Dimension::QualityFlags => !spec.quality_flags.is_empty(),
        Dimension::FloatStatus => !spec.float_status.is_empty(),
        Dimension::InstrumentTypes => !spec.instrument_types.is_empty(),
        Dimension::FloatIds => !spec.float_ids.is_empty(),
        Dimension::Measurements => !spec.measurements.is_empty(),
        Dimension::Profiles => !spec.profiles.is_empty(),
        Dimension::Temperature => range_is_active(&spec.temperature),
        Dimension::Salinity => range_is_active(&spec.salinity),
        Dimension::Depth => range_is_active(&spec.depth),
        Dimension::DataCompleteness => spec.data_completeness != DEFAULT_DATA_COMPLETENESS,
        Dimension::Coordinates | Dimension::DateRange => false,
    }
}

fn range_is_active<R: ValueRange>(range: &R) -> bool {
    let (min, max) = range.bounds();
    let (default_min, default_max) = R::DEFAULT_BOUNDS;
    min != default_min || max != default_max
}

pub fn active_filter_count(spec: &FilterSpec) -> usize {
    Dimension::ALL
        .iter()
        .filter(|&&dim| is_active(spec, dim))
        .count()
}

/// Tags in dimension declaration order, then list order.
pub fn tags(spec: &FilterSpec) -> Vec<Tag> {
    let mut out = Vec::new();
    for dimension in Dimension::ALL {
        if !is_active(spec, dimension) {
            continue;
        }
        match dimension {
            Dimension::Regions => push_members(&mut out, dimension, &spec.regions),
            Dimension::Seasons => push_members(&mut out, dimension, &spec.seasons),
            Dimension::QualityFlags => push_members(&mut out, dimension, &spec.quality_flags),
            Dimension::FloatStatus => push_members(&mut out, dimension, &spec.float_status),
            Dimension::InstrumentTypes => {
                push_members(&mut out, dimension, &spec.instrument_types)
            }
            Dimension::FloatIds => push_members(&mut out, dimension, &spec.float_ids),
            Dimension::Measurements => push_members(&mut out, dimension, &spec.measurements),
            Dimension::Profiles => push_members(&mut out, dimension, &spec.profiles),
            Dimension::Temperature => out.push(range_tag(dimension, &spec.temperature)),
            Dimension::Salinity => out.push(range_tag(dimension, &spec.salinity)),
            Dimension::Depth => out.push(range_tag(dimension, &spec.depth)),
            // Counted, but has no chip.
            Dimension::DataCompleteness | Dimension::Coordinates | Dimension::DateRange => {}
        }
    }
    out
}

fn push_members<T: ToString>(out: &mut Vec<Tag>, category: Dimension, values: &[T]) {
    out.extend(values.iter().map(|v| Tag {
        category,
        value: v.to_string(),
        removable: true,
    }));
}

fn range_tag<R: ValueRange>(category: Dimension, range: &R) -> Tag {
    let (min, max) = range.bounds();
    Tag {
        category,
        value: format!("{}–{}", format_real(min), format_real(max)),
        removable: true,
    }
}

/// Bounds with the range's unit, e.g. `10–20 °C`.
pub fn range_display<R: ValueRange>(range: &R) -> String {
    let (min, max) = range.bounds();
    match range.unit_symbol() {
        Some(unit) => format!("{}–{} {unit}", format_real(min), format_real(max)),
        None => format!("{}–{}", format_real(min), format_real(max)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use of_core::{FloatId, QualityFlag, Region, Season};

    #[test]
    fn default_spec_has_nothing_active() {
        let spec = FilterSpec::default();
        assert_eq!(active_filter_count(&spec), 0);
        assert!(tags(&spec).is_empty());
    }

    #[test]
    fn list_tags_follow_declaration_then_list_order() {
        let mut spec = FilterSpec::default();
        spec.quality_flags = vec![QualityFlag::BadData, QualityFlag::GoodData];
        spec.regions = vec![Region::ArcticOcean];
        spec.seasons = vec![Season::Winter];

        let values: Vec<(Dimension, String)> = tags(&spec)
            .into_iter()
            .map(|t| (t.category, t.value))
            .collect();
        assert_eq!(
            values,
            vec![
                (Dimension::Regions, "Arctic Ocean".to_string()),
                (Dimension::Seasons, "Winter".to_string()),
                (Dimension::QualityFlags, "Bad Data".to_string()),
                (Dimension::QualityFlags, "Good Data".to_string()),
            ]
        );
        assert_eq!(active_filter_count(&spec), 3);
    }

    #[test]
    fn unit_change_alone_is_not_active() {
        let mut spec = FilterSpec::default();
        spec.temperature.unit = of_core::TemperatureUnit::Fahrenheit;
        spec.depth.unit = of_core::DepthUnit::Feet;
        assert_eq!(active_filter_count(&spec), 0);
    }

    #[test]
    fn coordinates_and_dates_are_not_counted() {
        let mut spec = FilterSpec::default();
        spec.coordinates.lat_min = 10.0;
        spec.date_range.start_date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(active_filter_count(&spec), 0);
        assert!(tags(&spec).is_empty());
    }

    #[test]
    fn completeness_counts_without_tag() {
        let mut spec = FilterSpec::default();
        spec.data_completeness = 95.0;
        assert_eq!(active_filter_count(&spec), 1);
        assert!(tags(&spec).is_empty());
    }

    #[test]
    fn values_just_off_default_are_active() {
        let mut spec = FilterSpec::default();
        spec.data_completeness = 80.00000001;
        spec.temperature.min = -2.0 + 1e-10;
        assert_ne!(spec, FilterSpec::default());
        assert_eq!(active_filter_count(&spec), 2);

        let tags = tags(&spec);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].category, Dimension::Temperature);
    }

    #[test]
    fn range_tag_is_single_aggregate() {
        let mut spec = FilterSpec::default();
        spec.salinity.min = 34.0;
        spec.salinity.max = 35.5;
        let tags = tags(&spec);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].value, "34–35.5");
        assert_eq!(tags[0].label(), "Salinity: 34–35.5");
        assert_eq!(range_display(&spec.salinity), "34–35.5 PSU");
        assert_eq!(
            tags[0].remove_edit(),
            FilterEdit::RemoveValue {
                dimension: Dimension::Salinity,
                value: None,
            }
        );
    }

    #[test]
    fn list_tag_removes_its_value() {
        let mut spec = FilterSpec::default();
        spec.float_ids = vec![FloatId::new("2903456").unwrap()];
        let tag = &tags(&spec)[0];
        assert_eq!(
            tag.remove_edit(),
            FilterEdit::RemoveValue {
                dimension: Dimension::FloatIds,
                value: Some("2903456".to_string()),
            }
        );
    }
}
