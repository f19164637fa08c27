//! Flat parameter records accepted by facade operations.
//!
//! Single-value operations take plain `&str` arguments instead. Secrets are
//! held in [`Zeroizing`] buffers so they are wiped once a call completes.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use super::AttributeMap;

/// Username and password for a password sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInParams {
    /// Username or alias.
    pub username: String,
    /// Account password.
    pub password: Zeroizing<String>,
}

/// Answer to an authentication challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeResponseParams {
    /// Name of the challenge being answered.
    pub challenge_name: String,
    /// Session returned with the challenge.
    pub session: Option<String>,
    /// Provider challenge responses, e.g. `USERNAME` and `SOFTWARE_TOKEN_MFA_CODE`.
    pub responses: BTreeMap<String, String>,
}

/// Self-service registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpParams {
    /// Desired username.
    pub username: String,
    /// Initial password.
    pub password: Zeroizing<String>,
    /// Application-form user attributes.
    pub attributes: AttributeMap,
    /// Application-form validation data for pre-sign-up triggers.
    pub validation_data: AttributeMap,
}

/// Registration confirmation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmSignUpParams {
    /// Username being confirmed.
    pub username: String,
    /// Code delivered to the user.
    pub confirmation_code: String,
    /// Move an alias already held by another user onto this one.
    pub force_alias_creation: Option<bool>,
}

/// Password-reset completion input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmForgotPasswordParams {
    /// Username being reset.
    pub username: String,
    /// Code delivered to the user.
    pub confirmation_code: String,
    /// Replacement password.
    pub new_password: Zeroizing<String>,
}

/// Password change for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordParams {
    /// Caller's access token.
    pub access_token: String,
    /// Current password.
    pub previous_password: Zeroizing<String>,
    /// Replacement password.
    pub proposed_password: Zeroizing<String>,
}

/// Attribute update for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAttributesParams {
    /// Caller's access token.
    pub access_token: String,
    /// Application-form attributes to write.
    pub attributes: AttributeMap,
}

/// Attribute removal for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAttributesParams {
    /// Caller's access token.
    pub access_token: String,
    /// Application-form attribute keys to remove.
    pub attribute_names: Vec<String>,
}

/// Request for an attribute verification code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeVerificationParams {
    /// Caller's access token.
    pub access_token: String,
    /// Application-form attribute key, e.g. `email`.
    pub attribute_name: String,
}

/// Attribute verification with a delivered code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyAttributeParams {
    /// Caller's access token.
    pub access_token: String,
    /// Application-form attribute key.
    pub attribute_name: String,
    /// Code delivered to the attribute.
    pub code: String,
}

/// Start of software-token enrolment; one of the two fields is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociateSoftwareTokenParams {
    /// Caller's access token.
    pub access_token: Option<String>,
    /// Session from an `MFA_SETUP` challenge.
    pub session: Option<String>,
}

/// Software-token code verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifySoftwareTokenParams {
    /// Caller's access token.
    pub access_token: Option<String>,
    /// Session from an `MFA_SETUP` challenge.
    pub session: Option<String>,
    /// Code shown by the authenticator app.
    pub user_code: String,
    /// Label stored for the enrolled authenticator.
    pub friendly_device_name: Option<String>,
}

/// Enablement of one MFA factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MfaSettings {
    /// Whether the factor is enabled.
    pub enabled: bool,
    /// Whether the factor is preferred.
    pub preferred: bool,
}

/// MFA preference for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MfaPreferenceParams {
    /// Caller's access token.
    pub access_token: String,
    /// SMS factor settings.
    pub sms: Option<MfaSettings>,
    /// Software-token factor settings.
    pub software_token: Option<MfaSettings>,
}

/// One device of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceParams {
    /// Caller's access token.
    pub access_token: String,
    /// Device key.
    pub device_key: String,
}

/// Device listing for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDevicesParams {
    /// Caller's access token.
    pub access_token: String,
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub pagination_token: Option<String>,
}

/// Device tracking confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmDeviceParams {
    /// Caller's access token.
    pub access_token: String,
    /// Device key from the authentication result.
    pub device_key: String,
    /// Human-readable device name.
    pub device_name: Option<String>,
}

/// Remembered-status change for a device of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDeviceStatusParams {
    /// Caller's access token.
    pub access_token: String,
    /// Device key.
    pub device_key: String,
    /// Whether the device should be remembered.
    pub remembered: bool,
}

/// Administrative user creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCreateUserParams {
    /// Username to create.
    pub username: String,
    /// Temporary password; the provider generates one when absent.
    pub temporary_password: Option<Zeroizing<String>>,
    /// Application-form user attributes.
    pub attributes: AttributeMap,
    /// Skip the welcome message.
    pub suppress_message: bool,
    /// Delivery media for the welcome message, e.g. `EMAIL`.
    pub desired_delivery_mediums: Vec<String>,
}

/// Administrative attribute update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUpdateAttributesParams {
    /// Target username.
    pub username: String,
    /// Application-form attributes to write.
    pub attributes: AttributeMap,
}

/// Administrative attribute removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDeleteAttributesParams {
    /// Target username.
    pub username: String,
    /// Application-form attribute keys to remove.
    pub attribute_names: Vec<String>,
}

/// Administrative password set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSetPasswordParams {
    /// Target username.
    pub username: String,
    /// New password.
    pub password: Zeroizing<String>,
    /// Whether the password is permanent or must be changed at next sign-in.
    pub permanent: bool,
}

/// Administrative MFA preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminMfaPreferenceParams {
    /// Target username.
    pub username: String,
    /// SMS factor settings.
    pub sms: Option<MfaSettings>,
    /// Software-token factor settings.
    pub software_token: Option<MfaSettings>,
}

/// One device of a named user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDeviceParams {
    /// Target username.
    pub username: String,
    /// Device key.
    pub device_key: String,
}

/// Device listing for a named user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminListDevicesParams {
    /// Target username.
    pub username: String,
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub pagination_token: Option<String>,
}

/// Remembered-status change for a device of a named user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUpdateDeviceStatusParams {
    /// Target username.
    pub username: String,
    /// Device key.
    pub device_key: String,
    /// Whether the device should be remembered.
    pub remembered: bool,
}

/// User listing with an optional provider filter expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersParams {
    /// Filter such as `email ^= "a"`.
    pub filter: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub pagination_token: Option<String>,
    /// Application-form attribute keys to return; all when empty.
    pub attributes_to_get: Vec<String>,
}

/// Group creation or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupParams {
    /// Group name.
    pub group_name: String,
    /// Description.
    pub description: Option<String>,
    /// Precedence.
    pub precedence: Option<i64>,
    /// Role reference.
    pub role_arn: Option<String>,
}

/// Group membership change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembershipParams {
    /// Member username.
    pub username: String,
    /// Group name.
    pub group_name: String,
}

/// Group listing for the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupsParams {
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// Group listing for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupsForUserParams {
    /// Target username.
    pub username: String,
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// Member listing for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersInGroupParams {
    /// Group name.
    pub group_name: String,
    /// Page size.
    pub limit: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// Authentication-event listing for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAuthEventsParams {
    /// Target username.
    pub username: String,
    /// Page size.
    pub max_results: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// Identity of a user at a federated or native provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderUserIdentifier {
    /// Provider name, `Cognito` for native users.
    pub provider_name: String,
    /// Attribute naming the identity at the provider, e.g. `Cognito_Subject`.
    pub provider_attribute_name: Option<String>,
    /// Attribute value identifying the user.
    pub provider_attribute_value: String,
}

/// Link a federated identity to an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkProviderParams {
    /// Existing pool user receiving the link.
    pub destination_user: ProviderUserIdentifier,
    /// Federated identity being linked.
    pub source_user: ProviderUserIdentifier,
}
