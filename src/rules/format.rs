//! String format rules.
//!
//! All of these reject non-string values, except `regex`/`not_regex` and the
//! affix rules, which also match numbers by their text.

use super::support::{predicate, require_params, simple, with_params};
use crate::core::{RuleConstructor, RuleError};
use regex::Regex;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;
use url::Url;
use uuid::Uuid;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
static ULID_REGEX: OnceLock<Regex> = OnceLock::new();

const EMAIL_PATTERN: &str = concat!(
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
    r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
    r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
);

fn email_regex() -> &'static Regex {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern should always compile"))
}

fn slug_regex() -> &'static Regex {
    SLUG_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern should always compile")
    })
}

fn ulid_regex() -> &'static Regex {
    ULID_REGEX.get_or_init(|| {
        Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$").expect("ulid pattern should always compile")
    })
}

/// Text of a string or number value.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Constructor for a rule over string values only.
fn text(name: &'static str, check: fn(&str) -> bool) -> RuleConstructor {
    simple(name, move |ctx| ctx.value().as_str().is_some_and(check))
}

/// Accept `/pattern/` as well as a bare pattern.
fn compile(rule: &str, param: &str) -> Result<Regex, RuleError> {
    let pattern = param
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(param);
    Regex::new(pattern).map_err(|e| RuleError::invalid(rule, param, e))
}

fn pattern(name: &'static str, should_match: bool) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let regex = compile(name, &params[0])?;
        Ok(predicate(move |ctx| {
            as_text(ctx.value()).is_some_and(|s| regex.is_match(&s) == should_match)
        }))
    })
}

/// `starts_with:a,b...` and friends: the value must (or must not) carry one
/// of the given affixes.
fn affix(name: &'static str, at_start: bool, wanted: bool) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let affixes = params.to_vec();
        Ok(predicate(move |ctx| {
            as_text(ctx.value()).is_some_and(|s| {
                let found = affixes.iter().any(|a| {
                    if at_start {
                        s.starts_with(a.as_str())
                    } else {
                        s.ends_with(a.as_str())
                    }
                });
                found == wanted
            })
        }))
    })
}

fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

fn is_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::parse_str(s).is_ok()
}

/// MAC address in `01:23:45:67:89:ab`, `01-23-45-67-89-ab` or
/// `0123.4567.89ab` form, for 48-bit, 64-bit and 20-octet addresses.
fn is_mac(s: &str) -> bool {
    fn hex_groups(s: &str, separator: char, width: usize, counts: &[usize]) -> bool {
        let groups: Vec<&str> = s.split(separator).collect();
        counts.contains(&groups.len())
            && groups
                .iter()
                .all(|g| g.len() == width && g.chars().all(|c| c.is_ascii_hexdigit()))
    }

    if s.contains('.') {
        hex_groups(s, '.', 4, &[3, 4, 10])
    } else if s.contains(':') {
        hex_groups(s, ':', 2, &[6, 8, 20])
    } else {
        hex_groups(s, '-', 2, &[6, 8, 20])
    }
}

fn is_json(s: &str) -> bool {
    serde_json::from_str::<Value>(s).is_ok()
}

fn non_empty_all(s: &str, allowed: fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(allowed)
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("email", text("email", |s| email_regex().is_match(s))),
        ("regex", pattern("regex", true)),
        ("not_regex", pattern("not_regex", false)),
        ("url", text("url", is_url)),
        ("uuid", text("uuid", is_uuid)),
        ("ip", text("ip", |s| s.parse::<IpAddr>().is_ok())),
        ("ipv4", text("ipv4", |s| s.parse::<Ipv4Addr>().is_ok())),
        ("ipv6", text("ipv6", |s| s.parse::<Ipv6Addr>().is_ok())),
        ("mac", text("mac", is_mac)),
        ("json", text("json", is_json)),
        ("alpha", text("alpha", |s| non_empty_all(s, char::is_alphabetic))),
        (
            "alpha_num",
            text("alpha_num", |s| non_empty_all(s, char::is_alphanumeric)),
        ),
        (
            "alpha_dash",
            text("alpha_dash", |s| {
                non_empty_all(s, |c| c.is_alphanumeric() || c == '-' || c == '_')
            }),
        ),
        ("lowercase", text("lowercase", |s| s == s.to_lowercase())),
        ("uppercase", text("uppercase", |s| s == s.to_uppercase())),
        ("ascii", text("ascii", |s| s.is_ascii())),
        ("slug", text("slug", |s| slug_regex().is_match(s))),
        ("ulid", text("ulid", |s| ulid_regex().is_match(s))),
        ("starts_with", affix("starts_with", true, true)),
        ("ends_with", affix("ends_with", false, true)),
        ("doesnt_start_with", affix("doesnt_start_with", true, false)),
        ("doesnt_end_with", affix("doesnt_end_with", false, false)),
    ]
}
