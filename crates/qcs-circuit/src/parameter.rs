//! Parameter expressions for parameterized circuits.

use crate::error::{IrError, IrResult};
use crate::resolver::ParamResolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

/// A symbolic or concrete parameter expression.
///
/// Gate exponents and rotation angles are expressions so that a circuit can
/// carry free symbols (`t`, `theta`) until a [`ParamResolver`] binds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A free symbol.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Division.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Create a symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// The constant π.
    pub fn pi() -> Self {
        Self::Pi
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Symbol(_) => true,
            Self::Constant(_) | Self::Pi => false,
            Self::Neg(e) => e.is_symbolic(),
            Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.is_symbolic() || b.is_symbolic()
            }
        }
    }

    /// Evaluate to a concrete value, if no symbols remain.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            Self::Symbol(_) => None,
            Self::Pi => Some(PI),
            Self::Neg(e) => e.as_f64().map(|v| -v),
            Self::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            Self::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            Self::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            Self::Div(a, b) => {
                let divisor = b.as_f64()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.as_f64()? / divisor)
            }
        }
    }

    /// All symbol names in this expression, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_symbols(&mut set);
        set
    }

    pub(crate) fn collect_symbols(&self, set: &mut BTreeSet<String>) {
        match self {
            Self::Constant(_) | Self::Pi => {}
            Self::Symbol(name) => {
                set.insert(name.clone());
            }
            Self::Neg(e) => e.collect_symbols(set),
            Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.collect_symbols(set);
                b.collect_symbols(set);
            }
        }
    }

    /// Rebuild the expression, replacing each symbol with `f(name)` when it
    /// returns `Some`.
    pub fn map_symbols<F>(&self, f: &F) -> Self
    where
        F: Fn(&str) -> Option<ParameterExpression>,
    {
        let rebuild = |a: &Self, b: &Self| {
            (Box::new(a.map_symbols(f)), Box::new(b.map_symbols(f)))
        };
        match self {
            Self::Symbol(name) => f(name.as_str()).unwrap_or_else(|| self.clone()),
            Self::Constant(_) | Self::Pi => self.clone(),
            Self::Neg(e) => Self::Neg(Box::new(e.map_symbols(f))),
            Self::Add(a, b) => {
                let (a, b) = rebuild(a, b);
                Self::Add(a, b)
            }
            Self::Sub(a, b) => {
                let (a, b) = rebuild(a, b);
                Self::Sub(a, b)
            }
            Self::Mul(a, b) => {
                let (a, b) = rebuild(a, b);
                Self::Mul(a, b)
            }
            Self::Div(a, b) => {
                let (a, b) = rebuild(a, b);
                Self::Div(a, b)
            }
        }
    }

    /// Bind one symbol to a value.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.map_symbols(&|n| (n == name).then_some(Self::Constant(value)))
    }

    /// Substitute every symbol the resolver binds. Unbound symbols are left
    /// in place, and the result is simplified.
    pub fn resolve(&self, resolver: &ParamResolver) -> Self {
        self.map_symbols(&|n| resolver.get(n).map(Self::Constant))
            .simplify()
    }

    /// Resolve and evaluate, failing on the first unbound symbol.
    pub fn evaluate(&self, resolver: &ParamResolver) -> IrResult<f64> {
        let resolved = self.resolve(resolver);
        match resolved.as_f64() {
            Some(v) => Ok(v),
            None => {
                let missing = resolved.symbols().into_iter().next().unwrap_or_default();
                Err(IrError::UnboundParameter(missing))
            }
        }
    }

    /// Fold constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return Self::Constant(v);
        }
        type Make = fn(Box<ParameterExpression>, Box<ParameterExpression>) -> ParameterExpression;
        let fold = |a: &Self, b: &Self, op: fn(f64, f64) -> Option<f64>, make: Make| {
            let a = a.simplify();
            let b = b.simplify();
            match (a.as_f64(), b.as_f64()) {
                (Some(av), Some(bv)) => match op(av, bv) {
                    Some(v) => Self::Constant(v),
                    None => make(Box::new(a), Box::new(b)),
                },
                _ => make(Box::new(a), Box::new(b)),
            }
        };
        match self {
            Self::Neg(e) => {
                let e = e.simplify();
                match e.as_f64() {
                    Some(v) => Self::Constant(-v),
                    None => Self::Neg(Box::new(e)),
                }
            }
            Self::Add(a, b) => fold(a, b, |x, y| Some(x + y), Self::Add),
            Self::Sub(a, b) => fold(a, b, |x, y| Some(x - y), Self::Sub),
            Self::Mul(a, b) => fold(a, b, |x, y| Some(x * y), Self::Mul),
            Self::Div(a, b) => fold(a, b, |x, y| (y != 0.0).then(|| x / y), Self::Div),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Pi => write!(f, "π"),
            Self::Neg(e) => write!(f, "-({e})"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
            Self::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        Self::Constant(f64::from(value))
    }
}

impl From<&str> for ParameterExpression {
    fn from(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Neg(Box::new(self))
    }
}
