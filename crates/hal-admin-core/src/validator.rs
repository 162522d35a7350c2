//! Field validators built from `{name, args}` declarations.

use crate::schema::{Field, ValidatorSpec};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// A form-side check attached to an input widget.
///
/// Every validator except [`Validator::Required`] accepts empty values, so
/// optional fields are only checked once filled in.
#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    MinValue(f64),
    MaxValue(f64),
    MinLength(usize),
    MaxLength(usize),
    Number,
    Email,
    Regex(Regex),
    Choices(Vec<Value>),
}

impl Validator {
    /// Builds a validator from its declaration.
    ///
    /// Returns `None` for unknown names and for arguments of the wrong shape.
    pub fn build(spec: &ValidatorSpec) -> Option<Validator> {
        let arg = spec.args.first();

        let validator = match spec.name.as_str() {
            "required" => Some(Validator::Required),
            "minValue" => arg.and_then(Value::as_f64).map(Validator::MinValue),
            "maxValue" => arg.and_then(Value::as_f64).map(Validator::MaxValue),
            "minLength" => arg.and_then(as_len).map(Validator::MinLength),
            "maxLength" => arg.and_then(as_len).map(Validator::MaxLength),
            "number" => Some(Validator::Number),
            "email" => Some(Validator::Email),
            "regex" => match arg.and_then(Value::as_str).map(Regex::new) {
                Some(Ok(re)) => Some(Validator::Regex(re)),
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "invalid `regex` validator pattern");
                    None
                }
                None => None,
            },
            "choices" => arg
                .and_then(Value::as_array)
                .map(|choices| Validator::Choices(choices.clone())),
            _ => {
                tracing::warn!(validator = %spec.name, "unknown validator; skipping");
                return None;
            }
        };

        if validator.is_none() {
            tracing::warn!(
                validator = %spec.name,
                args = ?spec.args,
                "invalid validator arguments; skipping"
            );
        }
        validator
    }

    pub fn name(&self) -> &'static str {
        match self {
            Validator::Required => "required",
            Validator::MinValue(_) => "minValue",
            Validator::MaxValue(_) => "maxValue",
            Validator::MinLength(_) => "minLength",
            Validator::MaxLength(_) => "maxLength",
            Validator::Number => "number",
            Validator::Email => "email",
            Validator::Regex(_) => "regex",
            Validator::Choices(_) => "choices",
        }
    }

    /// Checks `value`, returning the error message on failure.
    pub fn validate(&self, value: &Value) -> Option<String> {
        if is_empty(value) {
            return match self {
                Validator::Required => Some("Required".to_string()),
                _ => None,
            };
        }

        match self {
            Validator::Required => None,
            Validator::MinValue(min) => match as_number(value) {
                Some(n) if n < *min => Some(format!("Must be {} or more", min)),
                _ => None,
            },
            Validator::MaxValue(max) => match as_number(value) {
                Some(n) if n > *max => Some(format!("Must be {} or less", max)),
                _ => None,
            },
            Validator::MinLength(min) => match length(value) {
                Some(len) if len < *min => Some(format!("Must be {} characters at least", min)),
                _ => None,
            },
            Validator::MaxLength(max) => match length(value) {
                Some(len) if len > *max => Some(format!("Must be {} characters or less", max)),
                _ => None,
            },
            Validator::Number => match as_number(value) {
                Some(_) => None,
                None => Some("Must be a number".to_string()),
            },
            Validator::Email => match value.as_str() {
                Some(s) if email_regex().is_match(s) => None,
                _ => Some("Must be a valid email".to_string()),
            },
            Validator::Regex(re) => match value.as_str() {
                Some(s) if re.is_match(s) => None,
                _ => Some("Wrong format".to_string()),
            },
            Validator::Choices(choices) => {
                if choices.contains(value) {
                    None
                } else {
                    let list = choices
                        .iter()
                        .map(|choice| match choice {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    Some(format!("Must be one of: {}", list))
                }
            }
        }
    }
}

/// Builds the validators of a field, dropping unknown or malformed ones.
pub fn field_validators(field: &Field) -> Vec<Validator> {
    field.validators.iter().filter_map(Validator::build).collect()
}

/// Runs all validators against `value`, returning every failure message.
pub fn validate_all(validators: &[Validator], value: &Value) -> Vec<String> {
    validators
        .iter()
        .filter_map(|validator| validator.validate(value))
        .collect()
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_len(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is valid")
    })
}
