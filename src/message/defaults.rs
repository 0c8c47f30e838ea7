//! Built-in message table.

use std::collections::HashMap;

/// Fallback used when neither a custom nor a default message exists.
pub const FALLBACK_MESSAGE: &str = "The :attribute field is invalid";

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    // Presence and control
    ("required", "The :attribute field is required"),
    ("filled", "The :attribute field must have a value"),
    ("present", "The :attribute field must be present"),
    ("nullable", "The :attribute field may be null"),
    ("sometimes", "The :attribute field is sometimes required"),
    ("prohibited", "The :attribute field is prohibited"),
    ("accepted", "The :attribute must be accepted"),
    ("declined", "The :attribute must be declined"),
    // Conditional
    ("required_if", "The :attribute field is required when :param0 is :param1"),
    ("required_unless", "The :attribute field is required unless :param0 is :param1"),
    ("required_with", "The :attribute field is required when :param0 is present"),
    ("required_with_all", "The :attribute field is required when :param0 are present"),
    ("required_without", "The :attribute field is required when :param0 is not present"),
    (
        "required_without_all",
        "The :attribute field is required when none of :param0 are present",
    ),
    ("prohibited_if", "The :attribute field is prohibited when :param0 is :param1"),
    ("prohibited_unless", "The :attribute field is prohibited unless :param0 is :param1"),
    ("prohibits", "The :attribute field prohibits :param0 from being present"),
    ("accepted_if", "The :attribute must be accepted when :param0 is :param1"),
    ("declined_if", "The :attribute must be declined when :param0 is :param1"),
    // Comparison and size
    ("min", "The :attribute must be at least :param0"),
    ("max", "The :attribute may not be greater than :param0"),
    ("size", "The :attribute must be :param0"),
    ("between", "The :attribute must be between :param0 and :param1"),
    ("gt", "The :attribute must be greater than :param0"),
    ("gte", "The :attribute must be greater than or equal to :param0"),
    ("lt", "The :attribute must be less than :param0"),
    ("lte", "The :attribute must be less than or equal to :param0"),
    ("same", "The :attribute and :param0 must match"),
    ("different", "The :attribute and :param0 must be different"),
    ("confirmed", "The :attribute confirmation does not match"),
    // Types
    ("string", "The :attribute must be a string"),
    ("numeric", "The :attribute must be a number"),
    ("integer", "The :attribute must be an integer"),
    ("boolean", "The :attribute must be true or false"),
    ("array", "The :attribute must be an array"),
    ("decimal", "The :attribute must have :param0 decimal places"),
    ("multiple_of", "The :attribute must be a multiple of :param0"),
    ("in", "The selected :attribute is invalid"),
    ("not_in", "The selected :attribute is invalid"),
    // Format
    ("email", "The :attribute must be a valid email address"),
    ("regex", "The :attribute format is invalid"),
    ("not_regex", "The :attribute format is invalid"),
    ("url", "The :attribute must be a valid URL"),
    ("uuid", "The :attribute must be a valid UUID"),
    ("ip", "The :attribute must be a valid IP address"),
    ("ipv4", "The :attribute must be a valid IPv4 address"),
    ("ipv6", "The :attribute must be a valid IPv6 address"),
    ("mac", "The :attribute must be a valid MAC address"),
    ("json", "The :attribute must be a valid JSON string"),
    ("alpha", "The :attribute may only contain letters"),
    ("alpha_num", "The :attribute may only contain letters and numbers"),
    (
        "alpha_dash",
        "The :attribute may only contain letters, numbers, dashes and underscores",
    ),
    ("lowercase", "The :attribute must be lowercase"),
    ("uppercase", "The :attribute must be uppercase"),
    ("ascii", "The :attribute must only contain ASCII characters"),
    ("slug", "The :attribute must be a valid slug"),
    ("ulid", "The :attribute must be a valid ULID"),
    ("starts_with", "The :attribute must start with one of the following: :param0"),
    ("ends_with", "The :attribute must end with one of the following: :param0"),
    (
        "doesnt_start_with",
        "The :attribute must not start with one of the following: :param0",
    ),
    (
        "doesnt_end_with",
        "The :attribute must not end with one of the following: :param0",
    ),
    ("password", "The :attribute is not strong enough"),
    // Dates
    ("date", "The :attribute is not a valid date"),
    ("date_format", "The :attribute does not match the format :param0"),
    ("date_equals", "The :attribute must be a date equal to :param0"),
    ("after", "The :attribute must be a date after :param0"),
    ("after_or_equal", "The :attribute must be a date after or equal to :param0"),
    ("before", "The :attribute must be a date before :param0"),
    ("before_or_equal", "The :attribute must be a date before or equal to :param0"),
    // Verifier-backed
    ("exists", "The selected :attribute is invalid"),
    ("unique", "The :attribute has already been taken"),
    ("current_password", "The :attribute is incorrect"),
];

/// Built-in template for `rule`, if there is one.
pub(crate) fn default_template(rule: &str) -> Option<&'static str> {
    DEFAULT_MESSAGES
        .iter()
        .find(|(name, _)| *name == rule)
        .map(|(_, message)| *message)
}

/// Build the default message table.
pub fn default_messages() -> HashMap<String, String> {
    DEFAULT_MESSAGES
        .iter()
        .map(|(rule, message)| (rule.to_string(), message.to_string()))
        .collect()
}
