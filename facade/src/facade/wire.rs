//! Provider wire records.
//!
//! Responses decode into these PascalCase DTOs first, with every field
//! optional, and are then mapped into application records in one pass by
//! [`super::mapping`]. Requests borrow from the caller's parameter records
//! and serialise straight into the provider's request shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ProviderAttribute;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Raw authentication result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthenticationResultDto {
    /// Access token.
    pub access_token: Option<String>,
    /// ID token.
    pub id_token: Option<String>,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// Access-token lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Token type.
    pub token_type: Option<String>,
}

/// Raw response of `InitiateAuth`, `AdminInitiateAuth` and
/// `RespondToAuthChallenge`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthFlowResponseDto {
    /// Pending challenge, if any.
    pub challenge_name: Option<String>,
    /// Session for answering the challenge.
    pub session: Option<String>,
    /// Challenge parameters.
    pub challenge_parameters: Option<BTreeMap<String, String>>,
    /// Tokens, when authentication completed.
    pub authentication_result: Option<AuthenticationResultDto>,
}

/// Raw legacy MFA option.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MfaOptionDto {
    /// Delivery medium.
    pub delivery_medium: Option<String>,
    /// Attribute name.
    pub attribute_name: Option<String>,
}

/// Raw user record.
///
/// `GetUser` and `AdminGetUser` report attributes as `UserAttributes`;
/// listings report them as `Attributes`. Both land in `user_attributes`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserDto {
    /// Username.
    pub username: Option<String>,
    /// Provider-form attributes.
    #[serde(alias = "Attributes")]
    pub user_attributes: Option<Vec<ProviderAttribute>>,
    /// Creation time in epoch seconds.
    pub user_create_date: Option<f64>,
    /// Last modification time in epoch seconds.
    pub user_last_modified_date: Option<f64>,
    /// Enabled flag.
    pub enabled: Option<bool>,
    /// Account status.
    pub user_status: Option<String>,
    /// Legacy MFA options.
    #[serde(rename = "MFAOptions")]
    pub mfa_options: Option<Vec<MfaOptionDto>>,
    /// Preferred MFA setting.
    pub preferred_mfa_setting: Option<String>,
    /// Enabled MFA settings.
    #[serde(rename = "UserMFASettingList")]
    pub user_mfa_setting_list: Option<Vec<String>>,
}

/// Raw response wrapping a single user, as returned by `AdminCreateUser`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserEnvelopeDto {
    /// The user.
    pub user: Option<UserDto>,
}

/// Raw user listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserListDto {
    /// Users on this page.
    pub users: Vec<UserDto>,
    /// `ListUsers` continuation token.
    pub pagination_token: Option<String>,
    /// `ListUsersInGroup` continuation token.
    pub next_token: Option<String>,
}

/// Raw device record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceDto {
    /// Device key.
    pub device_key: Option<String>,
    /// Provider-form device attributes.
    pub device_attributes: Option<Vec<ProviderAttribute>>,
    /// Creation time in epoch seconds.
    pub device_create_date: Option<f64>,
    /// Last modification time in epoch seconds.
    pub device_last_modified_date: Option<f64>,
    /// Last authentication time in epoch seconds.
    pub device_last_authenticated_date: Option<f64>,
}

/// Raw response wrapping one device.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceEnvelopeDto {
    /// The device container.
    pub device: Option<DeviceDto>,
}

/// Raw device listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceListDto {
    /// Devices on this page.
    pub devices: Vec<DeviceDto>,
    /// Continuation token.
    pub pagination_token: Option<String>,
}

/// Raw group record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GroupDto {
    /// Group name.
    pub group_name: Option<String>,
    /// Owning pool.
    pub user_pool_id: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Role reference.
    pub role_arn: Option<String>,
    /// Precedence.
    pub precedence: Option<i64>,
    /// Last modification time in epoch seconds.
    pub last_modified_date: Option<f64>,
    /// Creation time in epoch seconds.
    pub creation_date: Option<f64>,
}

/// Raw response wrapping one group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GroupEnvelopeDto {
    /// The group container.
    pub group: Option<GroupDto>,
}

/// Raw group listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GroupListDto {
    /// Groups on this page.
    pub groups: Vec<GroupDto>,
    /// Continuation token.
    pub next_token: Option<String>,
}

/// Raw code-delivery details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CodeDeliveryDetailsDto {
    /// Masked destination.
    pub destination: Option<String>,
    /// Delivery medium.
    pub delivery_medium: Option<String>,
    /// Attribute name.
    pub attribute_name: Option<String>,
}

/// Raw response carrying code-delivery details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CodeDeliveryEnvelopeDto {
    /// Delivery details.
    pub code_delivery_details: Option<CodeDeliveryDetailsDto>,
}

/// Raw `SignUp` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SignUpResponseDto {
    /// Subject identifier.
    pub user_sub: Option<String>,
    /// Confirmation flag.
    pub user_confirmed: Option<bool>,
    /// Delivery details.
    pub code_delivery_details: Option<CodeDeliveryDetailsDto>,
}

/// Raw `AssociateSoftwareToken` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AssociateSoftwareTokenResponseDto {
    /// Shared secret.
    pub secret_code: Option<String>,
    /// Challenge session.
    pub session: Option<String>,
}

/// Raw `VerifySoftwareToken` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VerifySoftwareTokenResponseDto {
    /// Verification status.
    pub status: Option<String>,
    /// Challenge session.
    pub session: Option<String>,
}

/// Raw `ConfirmDevice` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConfirmDeviceResponseDto {
    /// Whether the user must confirm the device before it is remembered.
    pub user_confirmation_necessary: Option<bool>,
}

/// Raw risk assessment of an authentication event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventRiskDto {
    /// Risk decision.
    pub risk_decision: Option<String>,
    /// Risk level.
    pub risk_level: Option<String>,
}

/// Raw challenge outcome of an authentication event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChallengeResponseDto {
    /// Challenge name.
    pub challenge_name: Option<String>,
    /// `Success` or `Failure`.
    pub challenge_response: Option<String>,
}

/// Raw caller context of an authentication event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventContextDataDto {
    /// Caller IP address.
    pub ip_address: Option<String>,
    /// Caller device name.
    pub device_name: Option<String>,
    /// Caller city.
    pub city: Option<String>,
    /// Caller country.
    pub country: Option<String>,
}

/// Raw authentication event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthEventDto {
    /// Event identifier.
    pub event_id: Option<String>,
    /// Event type.
    pub event_type: Option<String>,
    /// Event time in epoch seconds.
    pub creation_date: Option<f64>,
    /// Event outcome.
    pub event_response: Option<String>,
    /// Risk assessment.
    pub event_risk: Option<EventRiskDto>,
    /// Challenge outcomes.
    pub challenge_responses: Vec<ChallengeResponseDto>,
    /// Caller context.
    pub event_context_data: Option<EventContextDataDto>,
}

/// Raw authentication-event listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthEventListDto {
    /// Events on this page.
    pub auth_events: Vec<AuthEventDto>,
    /// Continuation token.
    pub next_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InitiateAuthRequest<'a> {
    pub(crate) auth_flow: &'static str,
    pub(crate) client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_pool_id: Option<&'a str>,
    pub(crate) auth_parameters: BTreeMap<&'static str, &'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RespondToAuthChallengeRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) challenge_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) session: Option<&'a str>,
    pub(crate) challenge_responses: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignUpRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
    pub(crate) user_attributes: Vec<ProviderAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) validation_data: Vec<ProviderAttribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConfirmSignUpRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) confirmation_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) force_alias_creation: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ClientUsernameRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) username: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConfirmForgotPasswordRequest<'a> {
    pub(crate) client_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) confirmation_code: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ChangePasswordRequest<'a> {
    pub(crate) access_token: &'a str,
    pub(crate) previous_password: &'a str,
    pub(crate) proposed_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AccessTokenRequest<'a> {
    pub(crate) access_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UpdateUserAttributesRequest<'a> {
    pub(crate) access_token: &'a str,
    pub(crate) user_attributes: Vec<ProviderAttribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DeleteUserAttributesRequest<'a> {
    pub(crate) access_token: &'a str,
    pub(crate) user_attribute_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttributeVerificationRequest<'a> {
    pub(crate) access_token: &'a str,
    pub(crate) attribute_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SoftwareTokenRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) access_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) session: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) friendly_device_name: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MfaSettingsDto {
    pub(crate) enabled: bool,
    pub(crate) preferred_mfa: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MfaPreferenceRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) access_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_pool_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<&'a str>,
    #[serde(rename = "SMSMfaSettings", skip_serializing_if = "Option::is_none")]
    pub(crate) sms_mfa_settings: Option<MfaSettingsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) software_token_mfa_settings: Option<MfaSettingsDto>,
}

/// Device-scoped request shared by the self-service and admin variants.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DeviceRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) access_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_pool_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) device_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) device_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) device_remembered_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pagination_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RevokeTokenRequest<'a> {
    pub(crate) token: &'a str,
    pub(crate) client_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AdminUserRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AdminCreateUserRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temporary_password: Option<&'a str>,
    pub(crate) user_attributes: Vec<ProviderAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message_action: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) desired_delivery_mediums: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AdminUserAttributesRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) user_attributes: Vec<ProviderAttribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AdminDeleteUserAttributesRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) user_attribute_names: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AdminSetUserPasswordRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
    pub(crate) permanent: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListUsersRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pagination_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) attributes_to_get: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GroupRequest<'a> {
    pub(crate) group_name: &'a str,
    pub(crate) user_pool_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) precedence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role_arn: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GroupMembershipRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) username: &'a str,
    pub(crate) group_name: &'a str,
}

/// Paged listing request; unused scoping fields are skipped.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PagedRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) group_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) next_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProviderUserIdentifierDto<'a> {
    pub(crate) provider_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) provider_attribute_name: Option<&'a str>,
    pub(crate) provider_attribute_value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LinkProviderRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) destination_user: ProviderUserIdentifierDto<'a>,
    pub(crate) source_user: ProviderUserIdentifierDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DisableProviderRequest<'a> {
    pub(crate) user_pool_id: &'a str,
    pub(crate) user: ProviderUserIdentifierDto<'a>,
}
