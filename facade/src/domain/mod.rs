//! Domain primitives shared by both facades.
//!
//! Purpose: hold the provider-agnostic pieces: attribute-name mapping,
//! the error taxonomy with its normaliser, application records, flat
//! parameter records and the driven port to the identity provider.
//!
//! Public surface:
//! - AttributeMap / ProviderAttribute: application and wire attribute forms.
//! - FacadeError, ErrorPolicy, ErrorInfo, normalize_error: failure handling.
//! - AuthResult, UserRecord, DeviceRecord, GroupRecord and friends.

pub mod attributes;
mod auth;
pub mod error;
pub mod params;
pub mod ports;
pub mod records;

pub use self::attributes::{AttributeMap, ProviderAttribute};
pub use self::auth::{access_token_from_header, extract_bearer_token};
pub use self::error::{
    ErrorInfo, ErrorPolicy, FacadeError, FailureKind, RawError, UNKNOWN_ERROR, normalize_error,
};
pub use self::records::{
    AuthChallenge, AuthEvent, AuthResult, CodeDelivery, DEFAULT_TOKEN_TYPE, DeviceRecord,
    GroupRecord, MfaOption, Page, SignInStep, SignUpResult, SoftwareTokenAssociation,
    SoftwareTokenVerification, UserRecord,
};

/// Result alias used by every facade operation.
pub type FacadeResult<T> = Result<T, FacadeError>;
