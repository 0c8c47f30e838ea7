//! Date rules.
//!
//! Values are parsed as RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS`,
//! `YYYY-MM-DDTHH:MM:SS` or plain `YYYY-MM-DD` dates, and compared in UTC.
//! Comparison rules take `rule:anchor[,format]`, where the anchor is a date,
//! one of `now`/`today`/`tomorrow`/`yesterday`, or the name of another field
//! holding a date. The optional format is a chrono `strftime` pattern used
//! for both sides.

use super::support::{predicate, require_params, simple, with_params};
use crate::core::{RuleConstructor, RuleError, ValidationContext};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

type Compare = fn(NaiveDateTime, NaiveDateTime) -> bool;

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

/// Parse `text` as a UTC timestamp, with `format` if given.
fn parse(text: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    let text = text.trim();
    match format {
        Some(format) => NaiveDateTime::parse_from_str(text, format)
            .ok()
            .or_else(|| DateTime::parse_from_str(text, format).ok().map(|d| d.naive_utc()))
            .or_else(|| NaiveDate::parse_from_str(text, format).ok().and_then(midnight)),
        None => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|d| d.naive_utc())
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
            })
            .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().and_then(midnight)),
    }
}

fn valid_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn checked_format(rule: &str, format: &str) -> Result<String, RuleError> {
    if valid_format(format) {
        Ok(format.to_string())
    } else {
        Err(RuleError::invalid(rule, format, "not a valid date format"))
    }
}

/// The date a comparison rule measures against.
#[derive(Clone, Debug)]
enum Anchor {
    Fixed(NaiveDateTime),
    Now,
    Today(i64),
    Field(String),
}

impl Anchor {
    fn parse(param: &str, format: Option<&str>) -> Self {
        match param.trim() {
            "now" => Self::Now,
            "today" => Self::Today(0),
            "tomorrow" => Self::Today(1),
            "yesterday" => Self::Today(-1),
            text => match parse(text, format) {
                Some(date) => Self::Fixed(date),
                None => Self::Field(param.to_string()),
            },
        }
    }

    fn resolve(&self, ctx: &ValidationContext<'_>, format: Option<&str>) -> Option<NaiveDateTime> {
        match self {
            Self::Fixed(date) => Some(*date),
            Self::Now => Some(Utc::now().naive_utc()),
            Self::Today(offset) => {
                midnight(Utc::now().date_naive()).map(|today| today + Duration::days(*offset))
            }
            Self::Field(field) => ctx.other(field).as_str().and_then(|s| parse(s, format)),
        }
    }
}

fn compared(name: &'static str, cmp: Compare) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let format = params
            .get(1)
            .map(|f| checked_format(name, f))
            .transpose()?;
        let anchor = Anchor::parse(&params[0], format.as_deref());
        Ok(predicate(move |ctx| {
            let format = format.as_deref();
            let value = ctx.value().as_str().and_then(|s| parse(s, format));
            match (value, anchor.resolve(ctx, format)) {
                (Some(value), Some(anchor)) => cmp(value, anchor),
                _ => false,
            }
        }))
    })
}

fn date_format() -> RuleConstructor {
    with_params("date_format", |params| {
        require_params("date_format", params, 1)?;
        let format = checked_format("date_format", &params[0])?;
        Ok(predicate(move |ctx| {
            ctx.value().as_str().is_some_and(|s| {
                parse(s, Some(&format)).is_some()
                    || NaiveTime::parse_from_str(s.trim(), &format).is_ok()
            })
        }))
    })
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        (
            "date",
            simple("date", |ctx| {
                ctx.value().as_str().is_some_and(|s| parse(s, None).is_some())
            }),
        ),
        ("date_format", date_format()),
        ("date_equals", compared("date_equals", |a, b| a.date() == b.date())),
        ("after", compared("after", |a, b| a > b)),
        ("after_or_equal", compared("after_or_equal", |a, b| a >= b)),
        ("before", compared("before", |a, b| a < b)),
        ("before_or_equal", compared("before_or_equal", |a, b| a <= b)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{construction_error, passes};
    use serde_json::json;

    #[test]
    fn parses_supported_layouts() {
        assert!(parse("2024-02-29", None).is_some());
        assert!(parse("2024-02-29 13:45:00", None).is_some());
        assert!(parse("2024-02-29T13:45:00", None).is_some());
        assert!(parse("2024-02-29T13:45:00+02:00", None).is_some());
        assert!(parse("2023-02-29", None).is_none());
        assert!(parse("29/02/2024", None).is_none());
        assert!(parse("29/02/2024", Some("%d/%m/%Y")).is_some());
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let with_offset = parse("2024-01-01T02:00:00+02:00", None).unwrap();
        let utc = parse("2024-01-01 00:00:00", None).unwrap();
        assert_eq!(with_offset, utc);
    }

    #[test]
    fn date_rule() {
        assert!(passes("date", &[], json!({ "d": "2024-05-01" }), "d"));
        assert!(!passes("date", &[], json!({ "d": "yesterday-ish" }), "d"));
        assert!(!passes("date", &[], json!({ "d": 20240501 }), "d"));
    }

    #[test]
    fn date_format_rule() {
        assert!(passes("date_format", &["%d/%m/%Y"], json!({ "d": "01/05/2024" }), "d"));
        assert!(!passes("date_format", &["%d/%m/%Y"], json!({ "d": "2024-05-01" }), "d"));
        assert!(passes("date_format", &["%H:%M"], json!({ "d": "13:45" }), "d"));
        assert!(matches!(
            construction_error("date_format", &["%Q"]),
            RuleError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn comparisons_against_literals() {
        let data = json!({ "d": "2024-05-01" });

        assert!(passes("after", &["2024-04-30"], data.clone(), "d"));
        assert!(!passes("after", &["2024-05-01"], data.clone(), "d"));
        assert!(passes("after_or_equal", &["2024-05-01"], data.clone(), "d"));
        assert!(passes("before", &["2024-05-02"], data.clone(), "d"));
        assert!(passes("before_or_equal", &["2024-05-01"], data.clone(), "d"));
        assert!(passes("date_equals", &["2024-05-01 18:30:00"], data, "d"));
    }

    #[test]
    fn comparisons_against_relative_words() {
        assert!(passes("before", &["today"], json!({ "d": "2000-01-01" }), "d"));
        assert!(passes("after", &["now"], json!({ "d": "2999-01-01" }), "d"));
        assert!(!passes("after", &["tomorrow"], json!({ "d": "2000-01-01" }), "d"));
    }

    #[test]
    fn comparisons_against_other_fields() {
        let data = json!({ "start": "2024-01-01", "end": "2024-02-01" });

        assert!(passes("after", &["start"], data.clone(), "end"));
        assert!(!passes("before", &["start"], data.clone(), "end"));
        assert!(!passes("after", &["missing"], data, "end"));
    }

    #[test]
    fn comparison_with_custom_format() {
        let data = json!({ "d": "02/05/2024" });

        assert!(passes("after", &["01/05/2024", "%d/%m/%Y"], data.clone(), "d"));
        assert!(!passes("after", &["01/05/2024"], data, "d"));
    }
}
