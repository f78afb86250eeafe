//! Parameter resolvers: concrete bindings for circuit symbols.

use crate::parameter::ParameterExpression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A binding of symbol names to values for one execution of a circuit.
///
/// An empty resolver is valid and binds nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamResolver {
    values: BTreeMap<String, f64>,
}

impl ParamResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from `(symbol, value)` pairs.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Bind `symbol` to `value`, replacing any previous binding.
    #[must_use]
    pub fn with(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.values.insert(symbol.into(), value);
        self
    }

    /// Value bound to `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    /// Resolve an expression against this binding.
    pub fn value_of(&self, expr: &ParameterExpression) -> ParameterExpression {
        expr.resolve(self)
    }

    /// Bound symbol names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(symbol, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of bound symbols.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge two resolvers. Keys of `other` win on conflict.
    #[must_use]
    pub fn merged(&self, other: &ParamResolver) -> Self {
        let mut values = self.values.clone();
        values.extend(other.values.iter().map(|(k, v)| (k.clone(), *v)));
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParamResolver {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl fmt::Display for ParamResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}
