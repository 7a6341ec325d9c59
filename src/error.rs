use crate::{symbols::Symbol, value::Value};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("wrong number of arguments for `{callee}` (given {provided}, expected {expected})")]
    Arity {
        callee: String,
        expected: usize,
        provided: usize,
    },
    #[error("invalid field name {provided}, expected a symbol or a string")]
    InvalidFieldName { provided: String },
    #[error("field `{field}` declared more than once")]
    DuplicateField { field: Symbol },
    #[error("`{name}` is not a valid record type name")]
    InvalidTypeName { name: String },
    #[error("expected value of type {expected}, provided {provided}")]
    InvalidType {
        expected: &'static str,
        provided: &'static str,
    },
    #[error("undefined method `{method}` for {type_name}")]
    UndefinedMethod { type_name: String, method: String },
    #[error("`{method}` failed: {message}")]
    Method { method: String, message: String },
}

impl Error {
    pub fn wrong_num_of_args(callee: impl Into<String>, expected: usize, provided: usize) -> Self {
        Self::Arity {
            callee: callee.into(),
            expected,
            provided,
        }
    }

    pub fn invalid_field_name(provided: &Value) -> Self {
        Self::InvalidFieldName {
            provided: format!("{provided:?}"),
        }
    }

    pub fn invalid_type(expected: &'static str, provided: &'static str) -> Self {
        Self::InvalidType { expected, provided }
    }

    pub fn undefined_method(type_name: &str, method: &str) -> Self {
        Self::UndefinedMethod {
            type_name: type_name.to_string(),
            method: method.to_string(),
        }
    }

    /// For extension methods reporting their own failures.
    pub fn method(method: &str, message: impl std::fmt::Display) -> Self {
        Self::Method {
            method: method.to_string(),
            message: message.to_string(),
        }
    }
}
