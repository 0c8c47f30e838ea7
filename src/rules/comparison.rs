//! Size, ordering and cross-field equality rules.

use super::support::{
    comparable, display, number_param, predicate, require_params, simple, size_of, with_params,
};
use crate::core::{RuleConstructor, RuleError, ValidationContext};

/// Right-hand side of `gt`/`gte`/`lt`/`lte`.
#[derive(Clone, Debug)]
enum Bound {
    Fixed(f64),
    Field(String),
}

impl Bound {
    fn parse(param: &str) -> Self {
        match param.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Fixed(n),
            _ => Self::Field(param.to_string()),
        }
    }

    fn resolve(&self, ctx: &ValidationContext<'_>) -> Option<f64> {
        match self {
            Self::Fixed(n) => Some(*n),
            Self::Field(field) if ctx.data().contains_key(field.as_str()) => {
                comparable(ctx.other(field))
            }
            Self::Field(_) => None,
        }
    }
}

/// `rule:n`, comparing the value's size against `n` with `cmp`.
fn sized(name: &'static str, cmp: fn(f64, f64) -> bool) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let limit = number_param(name, &params[0])?;
        Ok(predicate(move |ctx| {
            size_of(ctx.value()).is_some_and(|size| cmp(size, limit))
        }))
    })
}

fn between() -> RuleConstructor {
    with_params("between", |params| {
        require_params("between", params, 2)?;
        let low = number_param("between", &params[0])?;
        let high = number_param("between", &params[1])?;
        if low > high {
            return Err(RuleError::invalid(
                "between",
                &params[0],
                format!("lower bound exceeds upper bound {high}"),
            ));
        }
        Ok(predicate(move |ctx| {
            size_of(ctx.value()).is_some_and(|size| size >= low && size <= high)
        }))
    })
}

/// `rule:n` or `rule:other_field`, comparing numeric strings by value.
fn ordered(name: &'static str, cmp: fn(f64, f64) -> bool) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let bound = Bound::parse(&params[0]);
        Ok(predicate(move |ctx| {
            match (comparable(ctx.value()), bound.resolve(ctx)) {
                (Some(value), Some(limit)) => cmp(value, limit),
                _ => false,
            }
        }))
    })
}

/// `rule:other_field`, comparing rendered values.
fn against_field(name: &'static str, equal: bool) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let other = params[0].clone();
        Ok(predicate(move |ctx| {
            if !ctx.data().contains_key(other.as_str()) {
                return !equal;
            }
            (display(ctx.value()) == display(ctx.other(&other))) == equal
        }))
    })
}

fn confirmed(ctx: &ValidationContext<'_>) -> bool {
    let confirmation = format!("{}_confirmation", ctx.field());
    ctx.data().contains_key(&confirmation)
        && display(ctx.value()) == display(ctx.other(&confirmation))
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("min", sized("min", |size, limit| size >= limit)),
        ("max", sized("max", |size, limit| size <= limit)),
        ("size", sized("size", |size, limit| size == limit)),
        ("between", between()),
        ("gt", ordered("gt", |a, b| a > b)),
        ("gte", ordered("gte", |a, b| a >= b)),
        ("lt", ordered("lt", |a, b| a < b)),
        ("lte", ordered("lte", |a, b| a <= b)),
        ("same", against_field("same", true)),
        ("different", against_field("different", false)),
        ("confirmed", simple("confirmed", confirmed)),
    ]
}
