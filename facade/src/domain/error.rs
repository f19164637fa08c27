//! Facade error taxonomy and presentation-only normalisation.
//!
//! Every facade operation fails with [`FacadeError`]. Whether a provider
//! rejection surfaces untouched or wrapped with the operation name is a
//! per-client [`ErrorPolicy`] chosen at construction. [`normalize_error`]
//! turns any failure shape into a three-field [`ErrorInfo`] for display and
//! never changes whether an error propagates.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::ports::IdentityProviderError;

/// Sentinel used when a failure carries no code or name.
pub const UNKNOWN_ERROR: &str = "UnknownError";

/// Uniform three-field error record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Machine-readable code, [`UNKNOWN_ERROR`] when absent.
    pub code: String,
    /// Error name or type.
    pub name: String,
    /// Human-readable description.
    pub message: String,
}

/// Any failure value handed to the normaliser.
#[derive(Debug, Clone, PartialEq)]
pub enum RawError {
    /// An error object exposing a name and a message, and maybe a code.
    Structured {
        /// Error name, for example `NotAuthorizedException`.
        name: String,
        /// Error message.
        message: String,
        /// Optional code field.
        code: Option<String>,
    },
    /// A generic structured object with arbitrary fields.
    Object(Map<String, Value>),
    /// Anything else: null, strings, numbers, booleans, arrays.
    Primitive(Value),
}

impl RawError {
    /// Convenience constructor for [`RawError::Structured`].
    pub fn structured(
        name: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self::Structured {
            name: name.into(),
            message: message.into(),
            code,
        }
    }
}

impl From<Value> for RawError {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Object(fields),
            other => Self::Primitive(other),
        }
    }
}

impl From<&IdentityProviderError> for RawError {
    fn from(error: &IdentityProviderError) -> Self {
        let code = match error {
            IdentityProviderError::Rejected { name, .. } => Some(name.clone()),
            _ => None,
        };
        Self::structured(error.name(), error.message(), code)
    }
}

/// Normalise any failure into an [`ErrorInfo`].
///
/// Total over [`RawError`]: it never fails and always fills all three
/// fields.
///
/// # Examples
/// ```
/// use idp_facade::domain::{RawError, normalize_error};
/// use serde_json::json;
///
/// let info = normalize_error(&RawError::from(json!("boom")));
/// assert_eq!(info.code, "UnknownError");
/// assert_eq!(info.message, "boom");
/// ```
pub fn normalize_error(raw: &RawError) -> ErrorInfo {
    match raw {
        RawError::Structured {
            name,
            message,
            code,
        } => ErrorInfo {
            code: code
                .as_deref()
                .filter(|code| !code.is_empty())
                .unwrap_or(UNKNOWN_ERROR)
                .to_owned(),
            name: name.clone(),
            message: message.clone(),
        },
        RawError::Object(fields) => ErrorInfo {
            code: field_text(fields, "code").unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            name: field_text(fields, "name").unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            message: field_text(fields, "message")
                .unwrap_or_else(|| Value::Object(fields.clone()).to_string()),
        },
        RawError::Primitive(value) => ErrorInfo {
            code: UNKNOWN_ERROR.to_owned(),
            name: UNKNOWN_ERROR.to_owned(),
            message: primitive_text(value),
        },
    }
}

fn field_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn primitive_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Failure categories every facade error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A provider response lacked a field the contract requires.
    Validation,
    /// The provider rejected the call or could not be reached.
    Remote,
    /// Caller input was unusable before any remote call.
    Input,
}

/// Error returned by every facade operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacadeError {
    /// A required field was missing from the provider response.
    #[error("invalid provider response: {message}")]
    InvalidResponse {
        /// What was missing or malformed.
        message: String,
    },
    /// Caller-supplied input was unusable.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },
    /// Provider failure propagated unchanged.
    #[error(transparent)]
    Provider(IdentityProviderError),
    /// Provider failure wrapped with the facade operation name.
    #[error("{operation} error: {}", .source.message())]
    Operation {
        /// Facade operation label, for example `SignIn`.
        operation: &'static str,
        /// Original provider failure.
        #[source]
        source: IdentityProviderError,
    },
}

impl FacadeError {
    /// Convenience constructor for [`FacadeError::InvalidResponse`].
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`FacadeError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidResponse { .. } => FailureKind::Validation,
            Self::InvalidInput { .. } => FailureKind::Input,
            Self::Provider(_) | Self::Operation { .. } => FailureKind::Remote,
        }
    }

    /// Underlying provider failure, when the error came from the provider.
    pub fn provider_error(&self) -> Option<&IdentityProviderError> {
        match self {
            Self::Provider(source) | Self::Operation { source, .. } => Some(source),
            Self::InvalidResponse { .. } | Self::InvalidInput { .. } => None,
        }
    }

    /// Normalised presentation of this error.
    ///
    /// Wrapped errors keep the provider's code and name but report the
    /// operation-prefixed message the caller sees.
    pub fn info(&self) -> ErrorInfo {
        match self {
            Self::InvalidResponse { message } => {
                normalize_error(&RawError::structured("InvalidResponse", message, None))
            }
            Self::InvalidInput { message } => {
                normalize_error(&RawError::structured("InvalidInput", message, None))
            }
            Self::Provider(source) => normalize_error(&RawError::from(source)),
            Self::Operation { source, .. } => ErrorInfo {
                message: self.to_string(),
                ..normalize_error(&RawError::from(source))
            },
        }
    }
}

/// How provider failures surface from a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Wrap with an operation-name prefix, e.g. `SignIn error: <message>`.
    #[default]
    WrapWithOperation,
    /// Propagate the provider failure unchanged.
    PassThrough,
}

impl ErrorPolicy {
    /// Select a policy from a boolean toggle.
    pub fn from_wrap_flag(wrap: bool) -> Self {
        if wrap {
            Self::WrapWithOperation
        } else {
            Self::PassThrough
        }
    }

    /// Apply this policy to a provider failure raised by `operation`.
    pub fn apply(self, operation: &'static str, error: IdentityProviderError) -> FacadeError {
        match self {
            Self::WrapWithOperation => FacadeError::Operation {
                operation,
                source: error,
            },
            Self::PassThrough => FacadeError::Provider(error),
        }
    }
}

#[cfg(test)]
mod tests;
