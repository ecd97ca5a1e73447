//! Classification attributes attached to every strategy of the catalog.

use std::{
    collections::{btree_map, BTreeMap, BTreeSet},
    fmt,
};

use serde_json::Value;

/// How many past turns a strategy takes into account.
///
/// `Unbounded` compares greater than any finite depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemoryDepth {
    /// Strategy only looks at the last `n` turns.
    Finite(u32),
    /// Strategy may look at the whole history.
    Unbounded,
}

impl MemoryDepth {
    /// True if this depth is at least `threshold`.
    pub fn at_least(self, threshold: i64) -> bool {
        match self {
            Self::Finite(depth) => i64::from(depth) >= threshold,
            Self::Unbounded => true,
        }
    }

    /// True if this depth is at most `threshold`.
    pub fn at_most(self, threshold: i64) -> bool {
        match self {
            Self::Finite(depth) => i64::from(depth) <= threshold,
            Self::Unbounded => false,
        }
    }

    /// JSON form, with `sentinel` standing in for an unbounded depth.
    pub fn to_json(self, sentinel: i64) -> Value {
        match self {
            Self::Finite(depth) => Value::from(depth),
            Self::Unbounded => Value::from(sentinel),
        }
    }
}

impl fmt::Display for MemoryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(depth) => write!(f, "{depth}"),
            Self::Unbounded => write!(f, "inf"),
        }
    }
}

/// Value of a single classifier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierValue {
    /// Yes/no attribute such as `stochastic`.
    Flag(bool),
    /// The `memory_depth` attribute.
    Depth(MemoryDepth),
    /// Set-valued attribute such as `makes_use_of`.
    Tags(BTreeSet<String>),
}

impl ClassifierValue {
    /// JSON form, with `sentinel` standing in for an unbounded depth.
    pub fn to_json(&self, sentinel: i64) -> Value {
        match self {
            Self::Flag(flag) => Value::Bool(*flag),
            Self::Depth(depth) => depth.to_json(sentinel),
            Self::Tags(tags) => Value::from_iter(tags.iter().cloned()),
        }
    }
}

impl From<bool> for ClassifierValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<MemoryDepth> for ClassifierValue {
    fn from(value: MemoryDepth) -> Self {
        Self::Depth(value)
    }
}

/// Mapping from classification key to value.
///
/// Read-only once attached to a strategy descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier(BTreeMap<String, ClassifierValue>);

impl Classifier {
    /// Create an empty classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClassifierValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ClassifierValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ClassifierValue> {
        self.0.iter()
    }

    /// JSON object form, with `sentinel` standing in for an unbounded `memory_depth`.
    pub fn to_json(&self, sentinel: i64) -> serde_json::Map<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json(sentinel)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ClassifierValue>> FromIterator<(K, V)> for Classifier {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
