//! Password strength rule.
//!
//! `password` takes option parameters: `min:N` (default 8), `letters`,
//! `mixedcase`, `uppercase`, `lowercase`, `numbers` and `symbols`. The
//! parser splits only on the first `:`, so `password:min:12,symbols` reads
//! as the options `min:12` and `symbols`.

use super::support::count_param;
use crate::core::{constructor, Rule, RuleConstructor, RuleError, RuleFailure, ValidationContext};

const DEFAULT_MIN_LENGTH: usize = 8;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Strength {
    min_length: usize,
    letters: bool,
    mixed_case: bool,
    uppercase: bool,
    lowercase: bool,
    numbers: bool,
    symbols: bool,
}

impl Strength {
    fn parse(params: &[String]) -> Result<Self, RuleError> {
        let mut strength = Self {
            min_length: DEFAULT_MIN_LENGTH,
            ..Self::default()
        };
        for param in params {
            let (key, value) = match param.split_once(':') {
                Some((key, value)) => (key, Some(value)),
                None => (param.as_str(), None),
            };
            match (key.trim().to_ascii_lowercase().as_str(), value) {
                ("min", Some(value)) => strength.min_length = count_param("password", value)?,
                ("min", None) => {
                    return Err(RuleError::invalid("password", param, "expected min:N"));
                }
                ("letters", None) => strength.letters = true,
                ("mixedcase", None) => strength.mixed_case = true,
                ("uppercase", None) => strength.uppercase = true,
                ("lowercase", None) => strength.lowercase = true,
                ("numbers", None) => strength.numbers = true,
                ("symbols", None) => strength.symbols = true,
                _ => return Err(RuleError::invalid("password", param, "unknown option")),
            }
        }
        Ok(strength)
    }

    /// The first unmet requirement, if any.
    fn check(&self, password: &str) -> Result<(), String> {
        if password.chars().count() < self.min_length {
            return Err(format!(
                "password must be at least {} characters long",
                self.min_length
            ));
        }

        let (mut upper, mut lower, mut letter, mut number, mut symbol) =
            (false, false, false, false, false);
        for c in password.chars() {
            if c.is_alphabetic() {
                letter = true;
                upper |= c.is_uppercase();
                lower |= c.is_lowercase();
            } else if c.is_numeric() {
                number = true;
            } else if !c.is_whitespace() && !c.is_control() {
                symbol = true;
            }
        }

        let unmet = [
            (self.letters && !letter, "password must contain at least one letter"),
            (
                self.mixed_case && !(upper && lower),
                "password must contain both uppercase and lowercase letters",
            ),
            (self.uppercase && !upper, "password must contain at least one uppercase letter"),
            (self.lowercase && !lower, "password must contain at least one lowercase letter"),
            (self.numbers && !number, "password must contain at least one number"),
            (self.symbols && !symbol, "password must contain at least one symbol"),
        ];
        match unmet.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(reason.to_string()),
            None => Ok(()),
        }
    }
}

/// Reports the specific unmet requirement as its own message; with a
/// resolver configured the engine shows the `password` template instead.
struct Password {
    strength: Strength,
}

impl Rule for Password {
    fn name(&self) -> &str {
        "password"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure> {
        match ctx.value().as_str() {
            Some(password) if !password.is_empty() => {
                self.strength.check(password).map_err(RuleFailure::new)
            }
            _ => Err(RuleFailure::new(format!(
                "The {} is not strong enough",
                ctx.attribute(ctx.field())
            ))),
        }
    }
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![(
        "password",
        constructor(|params| {
            let strength = Strength::parse(params)?;
            Ok(Box::new(Password { strength }) as Box<dyn Rule>)
        }),
    )]
}
