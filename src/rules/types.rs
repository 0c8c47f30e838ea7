//! Type checks and membership rules.

use super::support::{
    count_param, display, number_param, numeric, predicate, require_params, simple, with_params,
};
use crate::core::{RuleConstructor, RuleError};
use serde_json::Value;
use std::collections::HashSet;

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        Value::String(s) => s.trim().parse::<i128>().is_ok(),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_f64(), Some(f) if f == 0.0 || f == 1.0),
        Value::String(s) => matches!(s.as_str(), "0" | "1" | "true" | "false"),
        _ => false,
    }
}

/// Digits after the decimal point, or `None` for non-numeric values.
///
/// Numbers are measured in their shortest fixed-point form, so `10.0` has
/// no places and `1e-7` has seven. Strings are measured as written.
fn decimal_places(value: &Value) -> Option<usize> {
    let text = match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => return Some(0),
        Value::Number(n) => n.as_f64()?.to_string(),
        Value::String(s) => {
            numeric(value)?;
            let s = s.trim();
            s.split(['e', 'E']).next().unwrap_or(s).to_string()
        }
        _ => return None,
    };
    Some(
        text.split_once('.')
            .map(|(_, fraction)| fraction.len())
            .unwrap_or(0),
    )
}

fn decimal() -> RuleConstructor {
    with_params("decimal", |params| {
        require_params("decimal", params, 1)?;
        let low = count_param("decimal", &params[0])?;
        let high = match params.get(1) {
            Some(param) => count_param("decimal", param)?,
            None => low,
        };
        if low > high {
            return Err(RuleError::invalid(
                "decimal",
                &params[0],
                format!("minimum places exceed maximum {high}"),
            ));
        }
        Ok(predicate(move |ctx| {
            decimal_places(ctx.value()).is_some_and(|places| places >= low && places <= high)
        }))
    })
}

fn multiple_of() -> RuleConstructor {
    with_params("multiple_of", |params| {
        require_params("multiple_of", params, 1)?;
        let step = number_param("multiple_of", &params[0])?;
        if step == 0.0 {
            return Err(RuleError::invalid("multiple_of", &params[0], "must not be zero"));
        }
        Ok(predicate(move |ctx| {
            numeric(ctx.value()).is_some_and(|n| {
                let quotient = n / step;
                (quotient - quotient.round()).abs() < 1e-9
            })
        }))
    })
}

/// `in`/`not_in`; arrays are checked element by element.
fn membership(name: &'static str, inside: bool) -> RuleConstructor {
    with_params(name, move |params| {
        let allowed: HashSet<String> = params.iter().cloned().collect();
        Ok(predicate(move |ctx| match ctx.value() {
            Value::Array(items) => items
                .iter()
                .all(|item| allowed.contains(&display(item)) == inside),
            value => allowed.contains(&display(value)) == inside,
        }))
    })
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("string", simple("string", |ctx| ctx.value().is_string())),
        ("numeric", simple("numeric", |ctx| numeric(ctx.value()).is_some())),
        ("integer", simple("integer", |ctx| is_integer(ctx.value()))),
        ("boolean", simple("boolean", |ctx| is_boolean(ctx.value()))),
        (
            "array",
            simple("array", |ctx| ctx.value().is_array() || ctx.value().is_object()),
        ),
        ("decimal", decimal()),
        ("multiple_of", multiple_of()),
        ("in", membership("in", true)),
        ("not_in", membership("not_in", false)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{construction_error, passes};
    use serde_json::json;

    #[test]
    fn scalar_types() {
        assert!(passes("string", &[], json!({ "v": "x" }), "v"));
        assert!(!passes("string", &[], json!({ "v": 1 }), "v"));
        assert!(!passes("string", &[], json!({}), "v"));

        assert!(passes("numeric", &[], json!({ "v": "-3.5" }), "v"));
        assert!(!passes("numeric", &[], json!({ "v": "3a" }), "v"));

        assert!(passes("integer", &[], json!({ "v": 42 }), "v"));
        assert!(passes("integer", &[], json!({ "v": "-7" }), "v"));
        assert!(!passes("integer", &[], json!({ "v": 4.2 }), "v"));

        assert!(passes("boolean", &[], json!({ "v": false }), "v"));
        assert!(passes("boolean", &[], json!({ "v": "1" }), "v"));
        assert!(!passes("boolean", &[], json!({ "v": "yes" }), "v"));

        assert!(passes("array", &[], json!({ "v": [] }), "v"));
        assert!(passes("array", &[], json!({ "v": { "k": 1 } }), "v"));
        assert!(!passes("array", &[], json!({ "v": "[]" }), "v"));
    }

    #[test]
    fn decimal_places_are_counted() {
        assert_eq!(decimal_places(&json!("1.250")), Some(3));
        assert_eq!(decimal_places(&json!(10)), Some(0));
        assert_eq!(decimal_places(&json!(1.5)), Some(1));
        assert_eq!(decimal_places(&json!("abc")), None);

        assert!(passes("decimal", &["2"], json!({ "price": "9.99" }), "price"));
        assert!(!passes("decimal", &["2"], json!({ "price": "9.9" }), "price"));
        assert!(passes("decimal", &["1", "3"], json!({ "price": "9.9" }), "price"));
        assert!(!passes("decimal", &["1", "3"], json!({ "price": 9 }), "price"));
        assert!(passes("decimal", &["0"], json!({ "price": 9 }), "price"));
    }

    #[test]
    fn float_places_use_fixed_notation() {
        assert_eq!(decimal_places(&json!(10.0)), Some(0));
        assert_eq!(decimal_places(&json!(1e-7)), Some(7));
        assert_eq!(decimal_places(&json!(0.125)), Some(3));
        assert_eq!(decimal_places(&json!("2.50e3")), Some(2));

        assert!(passes("decimal", &["0"], json!({ "p": 10.0 }), "p"));
        assert!(passes("decimal", &["7"], json!({ "p": 1e-7 }), "p"));
        assert!(!passes("decimal", &["0"], json!({ "p": 1e-7 }), "p"));
    }

    #[test]
    fn multiple_of_checks_remainder() {
        assert!(passes("multiple_of", &["5"], json!({ "n": 25 }), "n"));
        assert!(passes("multiple_of", &["0.5"], json!({ "n": "1.5" }), "n"));
        assert!(!passes("multiple_of", &["5"], json!({ "n": 26 }), "n"));
        assert!(matches!(
            construction_error("multiple_of", &["0"]),
            RuleError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn membership_rules() {
        let colors = ["red", "green"];

        assert!(passes("in", &colors, json!({ "c": "red" }), "c"));
        assert!(!passes("in", &colors, json!({ "c": "blue" }), "c"));
        assert!(passes("in", &colors, json!({ "c": ["red", "green"] }), "c"));
        assert!(!passes("in", &colors, json!({ "c": ["red", "blue"] }), "c"));
        assert!(passes("in", &["1", "2"], json!({ "n": 2 }), "n"));
        assert!(!passes("in", &[], json!({ "c": "red" }), "c"));

        assert!(passes("not_in", &colors, json!({ "c": "blue" }), "c"));
        assert!(!passes("not_in", &colors, json!({ "c": "green" }), "c"));
    }

    #[test]
    fn empty_string_membership() {
        assert!(passes("in", &[""], json!({ "c": "" }), "c"));
    }
}
