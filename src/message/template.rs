//! Placeholder substitution for message templates.

/// Values available to a template.
pub(crate) struct Placeholders<'a> {
    pub attribute: &'a str,
    pub field: &'a str,
    pub params: &'a [String],
}

/// Replace `:attribute`, `:field` and `:paramN` tokens in one pass.
///
/// A token is `:` followed by the longest run of ASCII alphanumerics and
/// `_`. Tokens that name nothing (`:other`, `:param9` with two parameters)
/// are copied through untouched. Substituted text is never rescanned, so a
/// parameter containing `:attribute` is inserted literally.
pub(crate) fn render(template: &str, values: &Placeholders<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let token = &after[..len];

        match resolve(token, values) {
            Some(value) => out.push_str(value),
            None => {
                out.push(':');
                out.push_str(token);
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    out
}

fn resolve<'a>(token: &str, values: &Placeholders<'a>) -> Option<&'a str> {
    match token {
        "attribute" => Some(values.attribute),
        "field" => Some(values.field),
        _ => {
            let index = token.strip_prefix("param")?;
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index: usize = index.parse().ok()?;
            values.params.get(index).map(String::as_str)
        }
    }
}
