//! Application-facing response records.
//!
//! Every record is built once from a provider response and never mutated.
//! Serialisation uses camelCase field names and RFC 3339 timestamps.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AttributeMap;

/// Token type reported when the provider omits one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Tokens issued by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    /// Access token for user-scoped calls.
    pub access_token: String,
    /// OpenID Connect ID token.
    pub id_token: String,
    /// Refresh token for renewing the session.
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: u64,
    /// Token type, `Bearer` unless the provider says otherwise.
    pub token_type: String,
}

/// Challenge the provider raised instead of issuing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthChallenge {
    /// Challenge name, for example `SOFTWARE_TOKEN_MFA`.
    pub name: String,
    /// Opaque session to echo back when responding.
    pub session: Option<String>,
    /// Challenge parameters supplied by the provider.
    pub parameters: BTreeMap<String, String>,
}

/// Outcome of one step of an authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "step")]
pub enum SignInStep {
    /// Tokens were issued.
    Authenticated(AuthResult),
    /// Another challenge must be answered first.
    Challenge(AuthChallenge),
}

/// One legacy MFA option on a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaOption {
    /// Delivery medium, `SMS` or `EMAIL`.
    pub delivery_medium: String,
    /// Attribute the code is delivered to.
    pub attribute_name: String,
}

/// A user as seen by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Provider username.
    pub username: String,
    /// Creation time, when reported.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time, when reported.
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Whether the account is enabled; `false` when unreported.
    pub enabled: bool,
    /// Account status such as `CONFIRMED`; empty when unreported.
    pub status: String,
    /// Application-form attributes.
    pub attributes: AttributeMap,
    /// Legacy MFA options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_options: Option<Vec<MfaOption>>,
    /// Preferred MFA setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_mfa_setting: Option<String>,
    /// Enabled MFA setting names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_settings: Option<Vec<String>>,
}

/// A remembered device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Device key; empty when unreported.
    pub device_key: String,
    /// Application-form device attributes.
    pub attributes: AttributeMap,
    /// Creation time; the current time when unreported.
    pub created_at: DateTime<Utc>,
    /// Last modification time; the current time when unreported.
    pub last_modified_at: DateTime<Utc>,
    /// Last authentication time, when reported.
    pub last_authenticated_at: Option<DateTime<Utc>>,
}

/// A user-pool group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    /// Group name; empty when unreported.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning user-pool identifier.
    pub user_pool_id: Option<String>,
    /// Precedence used when a user belongs to several groups.
    pub precedence: Option<i64>,
    /// Role reference attached to the group.
    pub role_arn: Option<String>,
    /// Last modification time.
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Where a verification or reset code was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDelivery {
    /// Masked destination, for example `a***@b.com`.
    pub destination: String,
    /// Delivery medium.
    pub delivery_medium: String,
    /// Attribute the code was sent to.
    pub attribute_name: String,
}

/// Result of a self-service registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResult {
    /// Provider-assigned subject identifier.
    pub user_sub: String,
    /// Whether the user is already confirmed.
    pub user_confirmed: bool,
    /// Where the confirmation code went, if one was sent.
    pub code_delivery: Option<CodeDelivery>,
}

/// Secret issued when enrolling a software token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareTokenAssociation {
    /// Shared secret to load into an authenticator app.
    pub secret_code: String,
    /// Session to continue a challenge flow.
    pub session: Option<String>,
}

/// Outcome of verifying a software-token code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareTokenVerification {
    /// `SUCCESS` or `ERROR`; empty when unreported.
    pub status: String,
    /// Session to continue a challenge flow.
    pub session: Option<String>,
}

/// One authentication event from a user's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEvent {
    /// Event identifier; empty when unreported.
    pub event_id: String,
    /// Event type such as `SignIn`; empty when unreported.
    pub event_type: String,
    /// When the event happened.
    pub created_at: Option<DateTime<Utc>>,
    /// `Pass`, `Fail` or `InProgress`.
    pub event_response: Option<String>,
    /// Risk decision taken for the event.
    pub risk_decision: Option<String>,
    /// Assessed risk level.
    pub risk_level: Option<String>,
    /// Challenge names mapped to their responses.
    pub challenge_responses: BTreeMap<String, String>,
    /// Caller IP address.
    pub ip_address: Option<String>,
    /// Caller device name.
    pub device_name: Option<String>,
    /// Caller city.
    pub city: Option<String>,
    /// Caller country.
    pub country: Option<String>,
}

/// One page of a listing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Token for the next page, absent on the last page.
    pub next_token: Option<String>,
}
