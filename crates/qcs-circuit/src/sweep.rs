//! Parameter sweeps and their normalization into ordered resolvers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::resolver::ParamResolver;

/// A sequence of parameter assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sweep {
    /// A single point binding nothing.
    Unit,
    /// Explicit values for one symbol.
    Points {
        /// Swept symbol.
        key: String,
        /// Values in order.
        values: Vec<f64>,
    },
    /// `length` evenly spaced values from `start` to `stop`, both inclusive.
    Linspace {
        /// Swept symbol.
        key: String,
        /// First value.
        start: f64,
        /// Last value.
        stop: f64,
        /// Number of points.
        length: usize,
    },
    /// Cartesian product. The first factor varies slowest.
    Product(Vec<Sweep>),
    /// Lockstep iteration, truncated to the shortest factor.
    Zip(Vec<Sweep>),
    /// Explicit list of resolvers.
    List(Vec<ParamResolver>),
}

impl Sweep {
    /// Explicit values for `key`.
    pub fn points(key: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Sweep::Points {
            key: key.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Evenly spaced values for `key`.
    pub fn linspace(key: impl Into<String>, start: f64, stop: f64, length: usize) -> Self {
        Sweep::Linspace {
            key: key.into(),
            start,
            stop,
            length,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        match self {
            Sweep::Unit => 1,
            Sweep::Points { values, .. } => values.len(),
            Sweep::Linspace { length, .. } => *length,
            Sweep::Product(factors) => factors.iter().map(Sweep::len).product(),
            Sweep::Zip(factors) => factors.iter().map(Sweep::len).min().unwrap_or(0),
            Sweep::List(resolvers) => resolvers.len(),
        }
    }

    /// Check whether the sweep has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols the sweep binds, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Sweep::Unit => Vec::new(),
            Sweep::Points { key, .. } | Sweep::Linspace { key, .. } => vec![key.clone()],
            Sweep::Product(factors) | Sweep::Zip(factors) => {
                factors.iter().flat_map(Sweep::keys).collect()
            }
            Sweep::List(resolvers) => {
                let keys: BTreeSet<&str> = resolvers.iter().flat_map(ParamResolver::keys).collect();
                keys.into_iter().map(str::to_string).collect()
            }
        }
    }

    /// Check that no two factors of a product or zip bind the same symbol.
    pub fn validate(&self) -> IrResult<()> {
        if let Sweep::Product(factors) | Sweep::Zip(factors) = self {
            let mut seen = BTreeSet::new();
            let mut overlapping = Vec::new();
            for factor in factors {
                factor.validate()?;
                for key in factor.keys() {
                    if !seen.insert(key.clone()) {
                        overlapping.push(key);
                    }
                }
            }
            if !overlapping.is_empty() {
                return Err(IrError::OverlappingSweepKeys(overlapping));
            }
        }
        Ok(())
    }

    /// The value of point `i` of a single-key sweep.
    fn value_at(start: f64, stop: f64, length: usize, i: usize) -> f64 {
        if length == 1 {
            return start;
        }
        #[allow(clippy::cast_precision_loss)]
        let p = i as f64 / (length - 1) as f64;
        start * (1.0 - p) + stop * p
    }

    /// Expand into ordered resolvers, one per point.
    pub fn resolvers(&self) -> IrResult<Vec<ParamResolver>> {
        self.validate()?;
        Ok(self.expand())
    }

    fn expand(&self) -> Vec<ParamResolver> {
        match self {
            Sweep::Unit => vec![ParamResolver::new()],
            Sweep::Points { key, values } => values
                .iter()
                .map(|v| ParamResolver::new().with(key.clone(), *v))
                .collect(),
            Sweep::Linspace {
                key,
                start,
                stop,
                length,
            } => (0..*length)
                .map(|i| {
                    let value = Self::value_at(*start, *stop, *length, i);
                    ParamResolver::new().with(key.clone(), value)
                })
                .collect(),
            Sweep::Product(factors) => {
                factors.iter().fold(vec![ParamResolver::new()], |acc, factor| {
                    let inner = factor.expand();
                    acc.iter()
                        .flat_map(|outer| inner.iter().map(move |r| outer.merged(r)))
                        .collect()
                })
            }
            Sweep::Zip(factors) => {
                let expanded: Vec<Vec<ParamResolver>> = factors.iter().map(Sweep::expand).collect();
                (0..self.len())
                    .map(|i| {
                        expanded
                            .iter()
                            .fold(ParamResolver::new(), |acc, points| acc.merged(&points[i]))
                    })
                    .collect()
            }
            Sweep::List(resolvers) => resolvers.clone(),
        }
    }
}

/// Anything that can be normalized into an ordered list of resolvers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Sweepable {
    /// No bindings: a single empty resolver.
    #[default]
    None,
    /// A single resolver.
    Resolver(ParamResolver),
    /// A sweep.
    Sweep(Sweep),
    /// Several sweepables, concatenated in order.
    Many(Vec<Sweepable>),
}

impl From<ParamResolver> for Sweepable {
    fn from(r: ParamResolver) -> Self {
        Sweepable::Resolver(r)
    }
}

impl From<Sweep> for Sweepable {
    fn from(s: Sweep) -> Self {
        Sweepable::Sweep(s)
    }
}

impl From<Vec<ParamResolver>> for Sweepable {
    fn from(rs: Vec<ParamResolver>) -> Self {
        Sweepable::Many(rs.into_iter().map(Sweepable::Resolver).collect())
    }
}

impl From<Vec<Sweep>> for Sweepable {
    fn from(ss: Vec<Sweep>) -> Self {
        Sweepable::Many(ss.into_iter().map(Sweepable::Sweep).collect())
    }
}

/// Normalize a sweepable into resolvers, preserving order.
///
/// `Sweepable::None` yields one empty resolver; an empty `Many` yields none.
pub fn to_resolvers(sweepable: &Sweepable) -> IrResult<Vec<ParamResolver>> {
    match sweepable {
        Sweepable::None => Ok(vec![ParamResolver::new()]),
        Sweepable::Resolver(r) => Ok(vec![r.clone()]),
        Sweepable::Sweep(s) => s.resolvers(),
        Sweepable::Many(items) => {
            let mut out = Vec::new();
            for item in items {
                out.extend(to_resolvers(item)?);
            }
            Ok(out)
        }
    }
}
