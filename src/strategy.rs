//! Strategy descriptors of the catalog and their transmittable form.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::{
    classifier::Classifier,
    configuration::Configuration,
    error::FilterError,
    filters::{passes_filterset, FilterSet},
};

/// Value of a strategy constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// JSON form. Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Int(value) => Value::from(*value),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Text(text) => Value::String(text.clone()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn is_unbounded(&self) -> bool {
        matches!(self, Self::Float(value) if value.is_infinite() && value.is_sign_positive())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_infinite() => {
                write!(f, "{}inf", if value.is_sign_negative() { "-" } else { "" })
            }
            Self::Float(value) if value.fract() == 0.0 => write!(f, "{value:.1}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// One strategy of the catalog, as supplied by the contest engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDescriptor {
    /// Stable identifier used in URLs.
    pub id: String,
    pub name: String,
    /// Docstring of the strategy, if any.
    pub description: Option<String>,
    pub classifier: Classifier,
    /// Constructor parameters with their default values, in declaration order.
    pub params: Vec<(String, ParamValue)>,
}

impl StrategyDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, classifier: Classifier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            classifier,
            params: vec![],
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a constructor parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Shorthand for [`passes_filterset`].
    pub fn passes(&self, filterset: &FilterSet) -> Result<bool, FilterError> {
        passes_filterset(self, filterset)
    }
}

/// Transmittable form of a [`StrategyDescriptor`].
///
/// Unbounded memory depths are replaced by the configured sentinel (see
/// [`Configuration::with_unbounded_depth_sentinel`]) in both
/// the classifier and the `memory_depth` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub classifier: Map<String, Value>,
    pub params: Map<String, Value>,
}

impl StrategyRecord {
    pub fn from_descriptor(strategy: &StrategyDescriptor, config: &Configuration) -> Self {
        let sentinel = config.unbounded_depth_sentinel;
        let params = strategy
            .params
            .iter()
            .map(|(name, value)| {
                let value = if name == "memory_depth" && value.is_unbounded() {
                    Value::from(sentinel)
                } else {
                    value.to_json()
                };
                (name.clone(), value)
            })
            .collect();

        Self {
            id: strategy.id.clone(),
            name: strategy.name.clone(),
            description: strategy.description.clone(),
            classifier: strategy.classifier.to_json(sentinel),
            params,
        }
    }
}
