//! Presence and control rules.

use super::support::{is_empty_value, simple};
use crate::core::RuleConstructor;
use serde_json::Value;

const ACCEPTED: [&str; 4] = ["yes", "on", "1", "true"];
const DECLINED: [&str; 4] = ["no", "off", "0", "false"];

/// `true`, `1`, or one of `yes`/`on`/`1`/`true` in any case.
pub(crate) fn is_accepted(value: &Value) -> bool {
    matches_state(value, true, &ACCEPTED)
}

/// `false`, `0`, or one of `no`/`off`/`0`/`false` in any case.
pub(crate) fn is_declined(value: &Value) -> bool {
    matches_state(value, false, &DECLINED)
}

fn matches_state(value: &Value, flag: bool, words: &[&str]) -> bool {
    match value {
        Value::Bool(b) => *b == flag,
        Value::Number(n) => n.as_f64() == Some(if flag { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            words.contains(&s.as_str())
        }
        _ => false,
    }
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("required", simple("required", |ctx| !is_empty_value(ctx.value()))),
        (
            "filled",
            simple("filled", |ctx| !ctx.is_present() || !is_empty_value(ctx.value())),
        ),
        ("present", simple("present", |ctx| ctx.is_present())),
        // Markers only; they never reject a value.
        ("nullable", simple("nullable", |_| true)),
        ("sometimes", simple("sometimes", |_| true)),
        (
            "prohibited",
            simple("prohibited", |ctx| !ctx.is_present() || is_empty_value(ctx.value())),
        ),
        ("accepted", simple("accepted", |ctx| is_accepted(ctx.value()))),
        ("declined", simple("declined", |ctx| is_declined(ctx.value()))),
    ]
}
