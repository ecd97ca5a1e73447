//! Declarative filtering of the strategy catalog.
//!
//! A [`FilterSet`] maps filter names to caller-supplied values. Each name resolves through the
//! fixed [`FILTER_TYPES`] table to a [`FilterKind`] and the classifier key it reads. Raw values
//! are first parsed into a typed [`Filter`], then evaluated against a strategy's
//! [`Classifier`].
//!
//! ```
//! use tournament_api_core::prelude::*;
//!
//! let strategy = StrategyDescriptor::new(
//!     "tit_for_tat",
//!     "Tit For Tat",
//!     Classifier::new()
//!         .with("stochastic", false)
//!         .with("long_run_time", false)
//!         .with("memory_depth", MemoryDepth::Finite(1)),
//! );
//!
//! let filterset = FilterSet::new()
//!     .with("stochastic", "false")
//!     .with("max_memory_depth", 2);
//! assert!(passes_filterset(&strategy, &filterset).unwrap());
//! ```

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    classifier::{Classifier, ClassifierValue},
    error::FilterError,
    strategy::StrategyDescriptor,
};

/// How a filter compares its value with the classifier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Classifier flag must equal the filter value.
    Boolean,
    /// Classifier depth must be at least the filter value.
    AtLeast,
    /// Classifier depth must be at most the filter value.
    AtMost,
}

/// Entry of the filter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterType {
    /// Name used by callers.
    pub name: &'static str,
    pub kind: FilterKind,
    /// Classifier entry read by this filter.
    pub classifier_key: &'static str,
}

/// Every filter a caller may use.
///
/// Several names read the same classifier key.
pub static FILTER_TYPES: [FilterType; 7] = [
    FilterType::new("stochastic", FilterKind::Boolean, "stochastic"),
    FilterType::new("long_run_time", FilterKind::Boolean, "long_run_time"),
    FilterType::new("manipulates_state", FilterKind::Boolean, "stochastic"),
    FilterType::new("manipulates_source", FilterKind::Boolean, "stochastic"),
    FilterType::new("inspects_source", FilterKind::Boolean, "stochastic"),
    FilterType::new("min_memory_depth", FilterKind::AtLeast, "memory_depth"),
    FilterType::new("max_memory_depth", FilterKind::AtMost, "memory_depth"),
];

impl FilterType {
    const fn new(name: &'static str, kind: FilterKind, classifier_key: &'static str) -> Self {
        Self {
            name,
            kind,
            classifier_key,
        }
    }

    /// Look up a filter by name.
    pub fn lookup(name: &str) -> Result<&'static FilterType, FilterError> {
        FILTER_TYPES
            .iter()
            .find(|filter_type| filter_type.name == name)
            .ok_or_else(|| FilterError::UnknownFilter {
                name: name.to_owned(),
            })
    }
}

/// Raw filter value as received from the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parsed condition of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `None` when a native integer other than 0 or 1 was given: no flag equals it.
    Equals(Option<bool>),
    AtLeast(i64),
    AtMost(i64),
}

/// A filter whose name has been resolved and whose value has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub filter_type: &'static FilterType,
    pub condition: Condition,
}

impl Filter {
    /// Resolve `name` and parse `value` according to the filter kind.
    ///
    /// # Errors
    /// [`FilterError::UnknownFilter`] if `name` is not registered, or a value error if `value`
    /// cannot be read as the kind expects.
    pub fn parse(name: &str, value: &FilterValue) -> Result<Self, FilterError> {
        let filter_type = FilterType::lookup(name)?;
        let condition = match filter_type.kind {
            FilterKind::Boolean => Condition::Equals(parse_bool(filter_type, value)?),
            FilterKind::AtLeast => Condition::AtLeast(parse_int(filter_type, value)?),
            FilterKind::AtMost => Condition::AtMost(parse_int(filter_type, value)?),
        };
        Ok(Self {
            filter_type,
            condition,
        })
    }

    /// Check `classifier` against this filter.
    ///
    /// # Errors
    /// Fails if the classifier lacks the filter's key or holds a value of another type.
    pub fn evaluate(&self, classifier: &Classifier) -> Result<bool, FilterError> {
        let key = self.filter_type.classifier_key;
        let value = classifier
            .get(key)
            .ok_or(FilterError::MissingClassifierKey { key })?;
        match self.condition {
            Condition::Equals(expected) => passes_boolean(key, value, expected),
            Condition::AtLeast(threshold) => passes_at_least(key, value, threshold),
            Condition::AtMost(threshold) => passes_at_most(key, value, threshold),
        }
    }
}

fn passes_boolean(
    key: &'static str,
    value: &ClassifierValue,
    expected: Option<bool>,
) -> Result<bool, FilterError> {
    match value {
        ClassifierValue::Flag(flag) => Ok(Some(*flag) == expected),
        _ => Err(FilterError::ClassifierTypeMismatch {
            key,
            expected: "a boolean",
        }),
    }
}

fn passes_at_least(
    key: &'static str,
    value: &ClassifierValue,
    threshold: i64,
) -> Result<bool, FilterError> {
    match value {
        ClassifierValue::Depth(depth) => Ok(depth.at_least(threshold)),
        _ => Err(FilterError::ClassifierTypeMismatch {
            key,
            expected: "a memory depth",
        }),
    }
}

fn passes_at_most(
    key: &'static str,
    value: &ClassifierValue,
    threshold: i64,
) -> Result<bool, FilterError> {
    match value {
        ClassifierValue::Depth(depth) => Ok(depth.at_most(threshold)),
        _ => Err(FilterError::ClassifierTypeMismatch {
            key,
            expected: "a memory depth",
        }),
    }
}

/// Reads the usual yes/no spellings, case-insensitively. Native integers read as flags only
/// for 0 and 1.
fn parse_bool(
    filter_type: &FilterType,
    value: &FilterValue,
) -> Result<Option<bool>, FilterError> {
    match value {
        FilterValue::Bool(flag) => Ok(Some(*flag)),
        FilterValue::Int(0) => Ok(Some(false)),
        FilterValue::Int(1) => Ok(Some(true)),
        FilterValue::Int(_) => Ok(None),
        FilterValue::Text(text) => match text.to_ascii_lowercase().as_str() {
            "y" | "yes" | "t" | "true" | "on" | "1" => Ok(Some(true)),
            "n" | "no" | "f" | "false" | "off" | "0" => Ok(Some(false)),
            _ => Err(FilterError::InvalidBoolean {
                filter: filter_type.name,
                value: text.clone(),
            }),
        },
    }
}

fn parse_int(filter_type: &FilterType, value: &FilterValue) -> Result<i64, FilterError> {
    match value {
        FilterValue::Int(threshold) => Ok(*threshold),
        FilterValue::Text(text) => {
            text.trim()
                .parse()
                .map_err(|source| FilterError::InvalidInteger {
                    filter: filter_type.name,
                    value: text.clone(),
                    source,
                })
        }
        FilterValue::Bool(flag) => Ok(i64::from(*flag)),
    }
}

/// Caller-supplied mapping from filter name to raw value.
///
/// An empty set is satisfied by every strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    /// Create an empty filter-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a filter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FilterValue> {
        self.0.iter()
    }

    /// Parse every entry. Fails on the first unknown name or unreadable value.
    pub fn parse(&self) -> Result<Vec<Filter>, FilterError> {
        self.0
            .iter()
            .map(|(name, value)| Filter::parse(name, value))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// True if every filter of `filterset` holds for `strategy`.
///
/// The whole set is parsed before anything is evaluated, and every filter is evaluated even
/// after one has failed, so a malformed entry is always reported.
///
/// # Errors
/// See [`FilterError`]. No verdict is returned when any filter errors.
pub fn passes_filterset(
    strategy: &StrategyDescriptor,
    filterset: &FilterSet,
) -> Result<bool, FilterError> {
    let filters = filterset.parse().inspect_err(|err| {
        warn!(strategy = %strategy.name, "invalid filter-set: {err}");
    })?;
    passes_filters(strategy, &filters)
}

/// True if every already parsed filter holds for `strategy`.
pub fn passes_filters(
    strategy: &StrategyDescriptor,
    filters: &[Filter],
) -> Result<bool, FilterError> {
    let mut passes = true;
    for filter in filters {
        let verdict = filter.evaluate(&strategy.classifier).inspect_err(|err| {
            warn!(strategy = %strategy.name, "filter evaluation failed: {err}");
        })?;
        passes &= verdict;
    }
    trace!(strategy = %strategy.name, filters = filters.len(), passes);
    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classifier::MemoryDepth, error::ErrorClass};

    fn strategy(stochastic: bool, depth: MemoryDepth) -> StrategyDescriptor {
        StrategyDescriptor::new(
            "test",
            "Test",
            Classifier::new()
                .with("stochastic", stochastic)
                .with("long_run_time", false)
                .with("memory_depth", depth),
        )
    }

    fn passes(strategy: &StrategyDescriptor, name: &str, value: impl Into<FilterValue>) -> bool {
        passes_filterset(strategy, &FilterSet::new().with(name, value)).unwrap()
    }

    #[test]
    fn empty_filterset_always_passes() {
        let empty = FilterSet::new();
        assert!(passes_filterset(&strategy(true, MemoryDepth::Finite(0)), &empty).unwrap());
        assert!(passes_filterset(&strategy(false, MemoryDepth::Unbounded), &empty).unwrap());
    }

    #[test]
    fn boolean_filters_parse_strings() {
        let s = strategy(true, MemoryDepth::Finite(3));
        assert!(passes(&s, "stochastic", "true"));
        assert!(!passes(&s, "stochastic", "false"));
        assert!(passes(&s, "stochastic", "YES"));
        assert!(passes(&s, "stochastic", "on"));
        assert!(passes(&s, "stochastic", "1"));
        assert!(!passes(&s, "stochastic", "off"));
        assert!(!passes(&s, "long_run_time", "true"));
        assert!(passes(&s, "long_run_time", "no"));
    }

    #[test]
    fn boolean_filters_accept_native_values() {
        let s = strategy(false, MemoryDepth::Finite(3));
        assert!(passes(&s, "stochastic", false));
        assert!(!passes(&s, "stochastic", true));
        assert!(passes(&s, "stochastic", 0));
        assert!(!passes(&s, "stochastic", 1));
    }

    #[test]
    fn native_integer_other_than_zero_or_one_matches_no_flag() {
        for stochastic in [true, false] {
            let s = strategy(stochastic, MemoryDepth::Finite(3));
            assert!(!passes(&s, "stochastic", 2));
            assert!(!passes(&s, "inspects_source", -1));
        }
    }

    #[test]
    fn native_booleans_are_depth_thresholds_of_zero_or_one() {
        let s = strategy(true, MemoryDepth::Finite(0));
        assert!(!passes(&s, "min_memory_depth", true));
        assert!(passes(&s, "min_memory_depth", false));
        assert!(passes(&s, "max_memory_depth", true));

        let s = strategy(true, MemoryDepth::Finite(1));
        assert!(passes(&s, "min_memory_depth", true));
        assert!(!passes(&s, "max_memory_depth", false));
    }

    #[test]
    fn aliases_read_the_stochastic_entry() {
        let s = strategy(true, MemoryDepth::Finite(3));
        for name in ["manipulates_state", "manipulates_source", "inspects_source"] {
            assert!(passes(&s, name, "true"), "{name}");
            assert!(!passes(&s, name, "false"), "{name}");
        }
    }

    #[test]
    fn memory_depth_thresholds() {
        let s = strategy(true, MemoryDepth::Finite(3));
        assert!(passes(&s, "min_memory_depth", "3"));
        assert!(!passes(&s, "min_memory_depth", "4"));
        assert!(passes(&s, "min_memory_depth", 2));
        assert!(passes(&s, "max_memory_depth", "3"));
        assert!(!passes(&s, "max_memory_depth", " 2 "));
        assert!(passes(&s, "max_memory_depth", 10));
    }

    #[test]
    fn unbounded_depth_passes_every_minimum_and_no_maximum() {
        let s = strategy(false, MemoryDepth::Unbounded);
        for threshold in [0, 1, 200, i64::MAX] {
            assert!(passes(&s, "min_memory_depth", threshold));
            assert!(!passes(&s, "max_memory_depth", threshold));
        }
    }

    #[test]
    fn verdict_is_conjunction() {
        let s = strategy(true, MemoryDepth::Finite(3));
        let filterset = FilterSet::new()
            .with("stochastic", "true")
            .with("min_memory_depth", "1")
            .with("max_memory_depth", "5");
        assert!(passes_filterset(&s, &filterset).unwrap());

        let filterset = filterset.with("long_run_time", "true");
        assert!(!passes_filterset(&s, &filterset).unwrap());
    }

    #[test]
    fn unknown_filter_is_a_configuration_error() {
        let s = strategy(true, MemoryDepth::Finite(3));
        for value in [FilterValue::from("true"), FilterValue::from(3), FilterValue::from(false)] {
            let err = passes_filterset(&s, &FilterSet::new().with("cheats", value)).unwrap_err();
            assert!(matches!(err, FilterError::UnknownFilter { ref name } if name == "cheats"));
            assert_eq!(err.class(), ErrorClass::Configuration);
        }
    }

    #[test]
    fn unknown_filter_wins_over_failing_filter() {
        let s = strategy(true, MemoryDepth::Finite(3));
        let filterset = FilterSet::new()
            .with("stochastic", "false")
            .with("zzz", "1");
        assert!(passes_filterset(&s, &filterset).is_err());
    }

    #[test]
    fn unreadable_values_are_caller_errors() {
        let s = strategy(true, MemoryDepth::Finite(3));

        let err = passes_filterset(&s, &FilterSet::new().with("stochastic", "maybe")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidBoolean { filter: "stochastic", .. }));
        assert_eq!(err.class(), ErrorClass::InvalidValue);

        let err =
            passes_filterset(&s, &FilterSet::new().with("min_memory_depth", "three")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidInteger { filter: "min_memory_depth", .. }));
    }

    #[test]
    fn missing_classifier_entry_is_a_contract_violation() {
        let s = StrategyDescriptor::new("bare", "Bare", Classifier::new().with("stochastic", true));
        let err =
            passes_filterset(&s, &FilterSet::new().with("long_run_time", "false")).unwrap_err();
        assert!(matches!(err, FilterError::MissingClassifierKey { key: "long_run_time" }));
        assert_eq!(err.class(), ErrorClass::ContractViolation);
    }

    #[test]
    fn filterset_deserializes_from_query_like_json() {
        let filterset: FilterSet = serde_json::from_str(
            r#"{"stochastic": "true", "min_memory_depth": 2, "long_run_time": false}"#,
        )
        .unwrap();
        let filters = filterset.parse().unwrap();
        assert_eq!(filters.len(), 3);
        assert!(filters.contains(&Filter {
            filter_type: FilterType::lookup("min_memory_depth").unwrap(),
            condition: Condition::AtLeast(2),
        }));
    }
}
