//! Parser for the rule-string mini-language.
//!
//! A rule string is a `|`-separated list of invocations, each `name` or
//! `name:params`, where `params` is a `,`-separated list:
//!
//! ```text
//! required|min:3|in:"a,b",c|regex:\|test
//! ```
//!
//! - `\|`, `\,` and `\"` produce the literal character; a backslash before
//!   anything else is kept as-is.
//! - A double-quoted parameter keeps its commas. Quotes do not protect `|`.
//! - Whitespace around names and unquoted parameter text is trimmed.
//! - Empty invocations (`a||b`, trailing `|`) are dropped.
//!
//! Parsing is one left-to-right pass over the input with no backtracking,
//! so its cost is linear in the length of the rule string.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Separator between invocations.
pub const RULE_SEPARATOR: char = '|';
/// Separator between a rule name and its parameter list.
pub const PARAM_START: char = ':';
/// Separator between parameters.
pub const PARAM_SEPARATOR: char = ',';

const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// One named rule call with its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInvocation {
    pub name: String,
    pub params: Vec<String>,
}

impl RuleInvocation {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Formats back to rule text that parses to the same invocation.
///
/// Formatting fails with [`fmt::Error`] when the name cannot be written
/// (see [`check_name`]); use [`ParsedRuleSet::render`] to get that as a
/// [`RenderError`] instead of a panic from `to_string`.
impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        check_name(&self.name).map_err(|_| fmt::Error)?;
        f.write_str(&escape_name(&self.name))?;
        if self.params.is_empty() {
            return Ok(());
        }
        write!(f, "{PARAM_START}")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, "{PARAM_SEPARATOR}")?;
            }
            f.write_str(&render_parameter(param))?;
        }
        Ok(())
    }
}

/// Every invocation parsed from one field's rule string, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedRuleSet {
    invocations: Vec<RuleInvocation>,
}

impl ParsedRuleSet {
    pub fn new(invocations: Vec<RuleInvocation>) -> Self {
        Self { invocations }
    }

    pub fn invocations(&self) -> &[RuleInvocation] {
        &self.invocations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleInvocation> {
        self.invocations.iter()
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Whether any invocation is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.invocations.iter().any(|inv| inv.is(name))
    }

    /// Canonical rule text for this set, such that `parse(&text) == *self`.
    ///
    /// Every set produced by [`parse`] renders; hand-built sets fail when a
    /// name is one the grammar cannot express.
    pub fn render(&self) -> Result<String, RenderError> {
        for invocation in &self.invocations {
            check_name(&invocation.name)?;
        }
        Ok(self.to_string())
    }
}

/// A rule name that has no rule-text form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("rule name must not be empty")]
    EmptyName,

    #[error("rule name '{name}' has surrounding whitespace")]
    PaddedName { name: String },

    #[error("rule name '{name}' contains ':'")]
    ParamStartInName { name: String },
}

/// Whether `name` survives a render and parse cycle: non-empty, no
/// surrounding whitespace and no `:`. Names from [`parse`] always pass.
pub fn check_name(name: &str) -> Result<(), RenderError> {
    if name.is_empty() {
        Err(RenderError::EmptyName)
    } else if name.trim() != name {
        Err(RenderError::PaddedName {
            name: name.to_string(),
        })
    } else if name.contains(PARAM_START) {
        Err(RenderError::ParamStartInName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParsedRuleSet {
    type Item = &'a RuleInvocation;
    type IntoIter = std::slice::Iter<'a, RuleInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.iter()
    }
}

impl IntoIterator for ParsedRuleSet {
    type Item = RuleInvocation;
    type IntoIter = std::vec::IntoIter<RuleInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.into_iter()
    }
}

impl fmt::Display for ParsedRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, invocation) in self.invocations.iter().enumerate() {
            if i > 0 {
                write!(f, "{RULE_SEPARATOR}")?;
            }
            write!(f, "{invocation}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ParsedRuleSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

/// Accumulates one parameter, remembering how much of it is protected
/// from trimming (quoted or escaped text).
#[derive(Default)]
struct ParamBuffer {
    text: String,
    protected: usize,
    started: bool,
}

impl ParamBuffer {
    fn push_plain(&mut self, c: char) {
        if !self.started && c.is_whitespace() {
            return;
        }
        self.started = true;
        self.text.push(c);
    }

    fn push_protected(&mut self, c: char) {
        self.started = true;
        self.text.push(c);
        self.protected = self.text.len();
    }

    fn open_quote(&mut self) {
        self.started = true;
        self.protected = self.text.len();
    }

    fn finish(&mut self) -> Option<String> {
        if !self.started {
            return None;
        }
        let tail = self.text[self.protected..].trim_end().len();
        self.text.truncate(self.protected + tail);
        self.protected = 0;
        self.started = false;
        Some(std::mem::take(&mut self.text))
    }
}

/// Scanner state for the invocation currently being read.
#[derive(Default)]
struct InvocationBuffer {
    name: String,
    in_params: bool,
    in_quotes: bool,
    params: Vec<String>,
    current: ParamBuffer,
}

impl InvocationBuffer {
    fn push_literal(&mut self, c: char) {
        if self.in_params {
            self.current.push_protected(c);
        } else {
            self.name.push(c);
        }
    }

    fn push_char(&mut self, c: char) {
        if !self.in_params {
            if c == PARAM_START {
                self.in_params = true;
            } else {
                self.name.push(c);
            }
            return;
        }

        match c {
            QUOTE => {
                self.in_quotes = !self.in_quotes;
                if self.in_quotes {
                    self.current.open_quote();
                }
            }
            PARAM_SEPARATOR if !self.in_quotes => {
                let param = self.current.finish().unwrap_or_default();
                self.params.push(param);
            }
            _ if self.in_quotes => self.current.push_protected(c),
            _ => self.current.push_plain(c),
        }
    }

    fn finish(&mut self) -> Option<RuleInvocation> {
        if let Some(last) = self.current.finish() {
            self.params.push(last);
        }
        let name = self.name.trim().to_string();
        let params = std::mem::take(&mut self.params);
        *self = Self::default();

        if name.is_empty() {
            None
        } else {
            Some(RuleInvocation { name, params })
        }
    }
}

/// Parse a rule string into its ordered invocations.
///
/// Never fails: an empty string yields an empty set, and malformed input
/// degrades to best-effort invocations that the engine later reports as
/// unknown rules or construction errors.
///
/// ```rust
/// use ruleline::parser::{parse, RuleInvocation};
///
/// let set = parse(r"regex:\|test|required");
/// assert_eq!(
///     set.invocations(),
///     [
///         RuleInvocation::new("regex", vec!["|test".to_string()]),
///         RuleInvocation::new("required", vec![]),
///     ]
/// );
/// ```
pub fn parse(rule_string: &str) -> ParsedRuleSet {
    let mut invocations = Vec::new();
    let mut current = InvocationBuffer::default();
    let mut chars = rule_string.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            match chars.peek() {
                Some(&next) if is_escapable(next) => {
                    chars.next();
                    current.push_literal(next);
                }
                _ => current.push_literal(ESCAPE),
            }
            continue;
        }

        if c == RULE_SEPARATOR {
            invocations.extend(current.finish());
            continue;
        }

        current.push_char(c);
    }
    invocations.extend(current.finish());

    ParsedRuleSet { invocations }
}

fn is_escapable(c: char) -> bool {
    matches!(c, RULE_SEPARATOR | PARAM_SEPARATOR | QUOTE)
}

/// Escape `|`, `,` and `"` so `value` parses back as a single literal
/// parameter.
///
/// ```rust
/// use ruleline::parser::{escape_parameter, parse};
///
/// let rule = format!("in:{}", escape_parameter("a|b,c"));
/// assert_eq!(parse(&rule).invocations()[0].params, ["a|b,c"]);
/// ```
pub fn escape_parameter(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if is_escapable(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// A literal backslash right before a separator would read as an escape,
/// so text ending in one gets a trailing space, which parsing trims.
fn escape_name(name: &str) -> String {
    let mut out = escape_parameter(name);
    if name.ends_with(ESCAPE) {
        out.push(' ');
    }
    out
}

/// Render a parameter so that parsing it back yields the same text.
///
/// Empty and whitespace-padded parameters are quoted. A parameter ending in
/// a backslash cannot end inside quotes, so only its leading whitespace is
/// quoted and the rest is followed by a trimmed space.
fn render_parameter(param: &str) -> String {
    if param.is_empty() {
        return format!("{QUOTE}{QUOTE}");
    }
    if param.ends_with(ESCAPE) {
        let body = param.trim_start();
        let lead = &param[..param.len() - body.len()];
        let mut out = if lead.is_empty() {
            String::new()
        } else {
            format!("{QUOTE}{lead}{QUOTE}")
        };
        out.push_str(&escape_parameter(body));
        out.push(' ');
        return out;
    }

    let escaped = escape_parameter(param);
    if param.trim() != param {
        format!("{QUOTE}{escaped}{QUOTE}")
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(name: &str, params: &[&str]) -> RuleInvocation {
        RuleInvocation::new(name, params.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn parses_names_and_parameters() {
        let set = parse("required|min:3|between:1,10");

        assert_eq!(
            set.invocations(),
            [
                inv("required", &[]),
                inv("min", &["3"]),
                inv("between", &["1", "10"]),
            ]
        );
    }

    #[test]
    fn escaped_pipe_is_literal() {
        let set = parse(r"regex:\|test|required");

        assert_eq!(
            set.invocations(),
            [inv("regex", &["|test"]), inv("required", &[])]
        );
    }

    #[test]
    fn quoted_parameter_keeps_commas() {
        let set = parse(r#"in:"value1,value2",value3"#);

        assert_eq!(set.invocations(), [inv("in", &["value1,value2", "value3"])]);
    }

    #[test]
    fn escaped_comma_and_quote_are_literal() {
        let set = parse(r#"in:a\,b,say \"hi\""#);

        assert_eq!(set.invocations(), [inv("in", &["a,b", "say \"hi\""])]);
    }

    #[test]
    fn escaped_quote_inside_quotes_is_literal() {
        let set = parse(r#"in:"a \"b\", c""#);

        assert_eq!(set.invocations(), [inv("in", &["a \"b\", c"])]);
    }

    #[test]
    fn other_backslashes_are_kept() {
        let set = parse(r"regex:^\d+$");

        assert_eq!(set.invocations(), [inv("regex", &[r"^\d+$"])]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let set = parse("  required | min : 3 ,  4  ");

        assert_eq!(
            set.invocations(),
            [inv("required", &[]), inv("min", &["3", "4"])]
        );
    }

    #[test]
    fn quoted_whitespace_is_preserved() {
        let set = parse(r#"in:" padded ", plain "#);

        assert_eq!(set.invocations(), [inv("in", &[" padded ", "plain"])]);
    }

    #[test]
    fn only_first_colon_starts_parameters() {
        let set = parse("date_format:H:i:s");

        assert_eq!(set.invocations(), [inv("date_format", &["H:i:s"])]);
    }

    #[test]
    fn empty_invocations_are_dropped() {
        let set = parse("required||min:3|");

        assert_eq!(set.invocations(), [inv("required", &[]), inv("min", &["3"])]);
    }

    #[test]
    fn empty_parameter_list_yields_no_parameters() {
        assert_eq!(parse("min:").invocations(), [inv("min", &[])]);
        assert_eq!(parse("in:a,").invocations(), [inv("in", &["a"])]);
        assert_eq!(parse("in:a,,b").invocations(), [inv("in", &["a", "", "b"])]);
        assert_eq!(parse(r#"in:"""#).invocations(), [inv("in", &[""])]);
    }

    #[test]
    fn pipe_inside_quotes_still_separates() {
        let set = parse(r#"in:"a|b""#);

        assert_eq!(set.len(), 2);
        assert_eq!(set.invocations()[0].name, "in");
        assert_eq!(set.invocations()[1].name, "b\"");
    }

    #[test]
    fn contains_detects_names() {
        let set = parse("bail|required");

        assert!(set.contains("bail"));
        assert!(!set.contains("min"));
    }

    #[test]
    fn display_round_trips() {
        let set = ParsedRuleSet::new(vec![
            inv("regex", &["|x", "a,b"]),
            inv("in", &[" spaced ", "", "q\"uote"]),
            inv("required", &[]),
        ]);

        let text = set.to_string();
        assert_eq!(parse(&text), set);
    }

    #[test]
    fn escape_parameter_escapes_specials() {
        assert_eq!(escape_parameter(r#"a|b,c"d"#), r#"a\|b\,c\"d"#);
        assert_eq!(escape_parameter("plain"), "plain");
    }

    #[test]
    fn from_str_matches_parse() {
        let set: ParsedRuleSet = "required|max:5".parse().unwrap();
        assert_eq!(set, parse("required|max:5"));
    }

    #[test]
    fn long_escape_and_quote_runs_keep_their_structure() {
        let input = r"\".repeat(10_000) + &"\"".repeat(10_000) + &",|".repeat(10_000);
        let set = parse(&input);

        // The last backslash escapes the first quote; the rest of the
        // quotes and the first comma are plain name text.
        assert_eq!(set.len(), 10_000);
        let first = &set.invocations()[0];
        assert_eq!(first.name.matches('\\').count(), 9_999);
        assert_eq!(first.name.matches('"').count(), 10_000);
        assert!(first.name.ends_with(','));
        assert!(set.iter().skip(1).all(|inv| inv.name == "," && inv.params.is_empty()));
    }

    #[test]
    fn trailing_backslash_parameter_round_trips() {
        let set = ParsedRuleSet::new(vec![inv("regex", &["a\\"]), inv("required", &[])]);
        let text = set.render().unwrap();

        assert_eq!(parse(&text), set);
        assert_eq!(parse(&text).len(), 2);

        let padded = ParsedRuleSet::new(vec![inv("in", &["  x\\", "\\", "y"])]);
        assert_eq!(parse(&padded.render().unwrap()), padded);
    }

    #[test]
    fn names_with_specials_round_trip() {
        let set = ParsedRuleSet::new(vec![
            inv("a,b", &["1"]),
            inv("say\"hi\"", &[]),
            inv("pipe|name", &[]),
            inv("slash\\", &["x"]),
        ]);

        assert_eq!(parse(&set.render().unwrap()), set);
    }

    #[test]
    fn unrenderable_names_are_rejected() {
        let colon = ParsedRuleSet::new(vec![inv("date:format", &[])]);
        assert_eq!(
            colon.render(),
            Err(RenderError::ParamStartInName {
                name: "date:format".to_string()
            })
        );

        let padded = ParsedRuleSet::new(vec![inv(" min", &["1"])]);
        assert!(matches!(padded.render(), Err(RenderError::PaddedName { .. })));
        assert_eq!(
            ParsedRuleSet::new(vec![inv("", &[])]).render(),
            Err(RenderError::EmptyName)
        );
    }
}
