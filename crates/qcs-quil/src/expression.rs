//! Quil rendering of parameter expressions.

use qcs_circuit::ParameterExpression;
use std::f64::consts::PI;

const EPS: f64 = 1e-10;

/// Render an expression in Quil syntax.
///
/// Constants close to a small rational multiple of π print as `pi/2`,
/// `-3*pi/4` and so on. Symbols print as bare region names, which Quil reads
/// as element 0 of that region.
pub fn format_expression(expr: &ParameterExpression) -> String {
    render(expr).0
}

/// Rendered text plus its binding strength: 1 for sums, 2 for products,
/// 3 for atoms.
fn render(expr: &ParameterExpression) -> (String, u8) {
    match expr {
        ParameterExpression::Constant(v) => format_constant(*v),
        ParameterExpression::Symbol(name) => (name.clone(), 3),
        ParameterExpression::Pi => ("pi".into(), 3),
        ParameterExpression::Neg(e) => (format!("-{}", wrap(e, 3)), 3),
        ParameterExpression::Add(a, b) => (format!("{} + {}", wrap(a, 1), wrap(b, 2)), 1),
        ParameterExpression::Sub(a, b) => (format!("{} - {}", wrap(a, 1), wrap(b, 2)), 1),
        ParameterExpression::Mul(a, b) => (format!("{}*{}", wrap(a, 2), wrap(b, 3)), 2),
        ParameterExpression::Div(a, b) => (format!("{}/{}", wrap(a, 2), wrap(b, 3)), 2),
    }
}

fn wrap(expr: &ParameterExpression, min: u8) -> String {
    let (text, strength) = render(expr);
    if strength < min {
        format!("({text})")
    } else {
        text
    }
}

fn format_constant(v: f64) -> (String, u8) {
    if v.abs() < EPS {
        return ("0".into(), 3);
    }
    if let Some((num, den)) = pi_fraction(v) {
        let sign = if num < 0 { "-" } else { "" };
        let num = num.unsigned_abs();
        let text = match (num, den) {
            (1, 1) => format!("{sign}pi"),
            (n, 1) => format!("{sign}{n}*pi"),
            (1, d) => format!("{sign}pi/{d}"),
            (n, d) => format!("{sign}{n}*pi/{d}"),
        };
        let strength = if sign.is_empty() && den == 1 && num == 1 { 3 } else { 2 };
        return (text, strength);
    }
    let text = format!("{v}");
    let strength = if v < 0.0 { 2 } else { 3 };
    (text, strength)
}

/// Find `num/den` with `den <= 8` such that `v == num*pi/den`.
fn pi_fraction(v: f64) -> Option<(i64, u64)> {
    let ratio = v / PI;
    for den in 1..=8u64 {
        #[allow(clippy::cast_precision_loss)]
        let scaled = ratio * den as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() < EPS && rounded.abs() <= 64.0 {
            #[allow(clippy::cast_possible_truncation)]
            let num = rounded as i64;
            if gcd(num.unsigned_abs(), den) == 1 {
                return Some((num, den));
            }
        }
    }
    None
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: f64) -> ParameterExpression {
        ParameterExpression::constant(v)
    }

    #[test]
    fn test_pi_fractions() {
        assert_eq!(format_expression(&c(PI)), "pi");
        assert_eq!(format_expression(&c(PI / 2.0)), "pi/2");
        assert_eq!(format_expression(&c(-PI / 2.0)), "-pi/2");
        assert_eq!(format_expression(&c(3.0 * PI / 4.0)), "3*pi/4");
        assert_eq!(format_expression(&c(2.0 * PI)), "2*pi");
        assert_eq!(format_expression(&c(0.0)), "0");
    }

    #[test]
    fn test_plain_constant() {
        assert_eq!(format_expression(&c(0.3)), "0.3");
    }

    #[test]
    fn test_symbolic_product() {
        let e = ParameterExpression::pi() * ParameterExpression::symbol("t");
        assert_eq!(format_expression(&e), "pi*t");
    }

    #[test]
    fn test_precedence() {
        let sum = ParameterExpression::symbol("a") + ParameterExpression::symbol("b");
        let e = ParameterExpression::pi() * sum;
        assert_eq!(format_expression(&e), "pi*(a + b)");

        let neg = -(ParameterExpression::symbol("a") * ParameterExpression::symbol("b"));
        assert_eq!(format_expression(&neg), "-(a*b)");
    }
}
