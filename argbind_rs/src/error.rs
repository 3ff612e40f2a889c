//! Error types for the binding engine.
//!
//! Two disjoint families: [`ConfigError`] is raised while building a schema
//! and indicates an incorrectly declared argument class (a programmer
//! error, surfaced at startup or tooling time). [`BindError`] is raised
//! while binding parsed entries and indicates bad user input. Binding fails
//! fast: one error aborts the bind call, no aggregation.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for facade operations that can hit both families
/// (schemas are built lazily, so a nested command type's configuration
/// error can surface inside a bind call).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Schema declaration errors. Always fatal; never caused by input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum ConfigError {
    /// Two members of one argument class collide on a name or alias
    /// (compared case-insensitively).
    #[error("The members '{first}' and '{second}' of the class '{class_name}' both define a name (or alias) called '{name}'")]
    DuplicateName {
        class_name: &'static str,
        first: String,
        second: String,
        name: String,
    },
}

/// Errors raised while binding parsed entries onto a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum BindError {
    /// A named argument was supplied without a value (`-name` instead of
    /// `-name=value`). Carries the name form the user actually typed.
    #[error("The value of the argument '{0}' was not specified.")]
    ArgumentWithoutValue(String),

    /// A flag-only member was supplied with a non-empty value.
    #[error("The option '{0}' was specified with a value. This is not allowed for option.")]
    OptionWithValue(String),

    /// The same logical argument was supplied under more than one of its
    /// recognized forms (primary name and/or aliases).
    #[error("The value for the argument '{0}' was specified multiple times.")]
    AmbiguousArgument(String),

    /// A required member had zero matches after binding.
    #[error("The required argument '{0}' was not specified.")]
    MissingRequiredArgument(String),

    /// A matched value could not be converted to the declared type.
    #[error("{}", conversion_message(.value, .parameter, .type_name, .valid_values))]
    TypeConversionFailure {
        value: String,
        parameter: String,
        type_name: &'static str,
        /// For enum-typed members, the full list of valid member names.
        valid_values: Option<Vec<&'static str>>,
    },

    /// A member-level validator rejected the bound value.
    #[error("The argument '{name}' is invalid: {message}")]
    ValidationFailure { name: String, message: String },
}

fn conversion_message(
    value: &str,
    parameter: &str,
    type_name: &str,
    valid_values: &Option<Vec<&'static str>>,
) -> String {
    match valid_values {
        Some(names) => format!(
            "The value {value} of parameter {parameter} can not be converted into the expected type {type_name}. Possible values are {}.",
            join_with_and(names)
        ),
        None => format!(
            "The value {value} of parameter {parameter} can not be converted into the expected type {type_name}"
        ),
    }
}

/// Joins names with commas, the last one with "and" instead of a comma.
fn join_with_and(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_two_names_with_and() {
        assert_eq!(join_with_and(&["True", "False"]), "True and False");
    }

    #[test]
    fn joins_many_names_with_commas_and_final_and() {
        assert_eq!(join_with_and(&["Red", "Green", "Blue"]), "Red, Green and Blue");
    }

    #[test]
    fn enum_conversion_message_lists_possible_values() {
        let err = BindError::TypeConversionFailure {
            value: "Null".to_string(),
            parameter: "Enum".to_string(),
            type_name: "Boolenum",
            valid_values: Some(vec!["True", "False"]),
        };
        assert_eq!(
            err.to_string(),
            "The value Null of parameter Enum can not be converted into the expected type Boolenum. Possible values are True and False."
        );
    }

    #[test]
    fn scalar_conversion_message_has_no_suffix() {
        let err = BindError::TypeConversionFailure {
            value: "TRUE".to_string(),
            parameter: "Integer".to_string(),
            type_name: "i32",
            valid_values: None,
        };
        assert_eq!(
            err.to_string(),
            "The value TRUE of parameter Integer can not be converted into the expected type i32"
        );
    }
}
