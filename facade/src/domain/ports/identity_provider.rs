//! Driven port for calling the remote identity provider.
//!
//! Facades build PascalCase request payloads and hand them to this port
//! together with the operation they target. Adapters own transport,
//! signing and status mapping; the facade owns request shaping and
//! response mapping.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

macro_rules! provider_operations {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $wire:literal, $privileged:literal;
        )*
    ) => {
        /// Remote provider operations reachable through the port.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ProviderOperation {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl ProviderOperation {
            /// Every operation, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Operation name used on the wire.
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }

            /// Whether the call must be signed with pool credentials.
            pub const fn is_privileged(self) -> bool {
                match self {
                    $(Self::$variant => $privileged,)*
                }
            }
        }
    };
}

provider_operations! {
    /// Start an authentication flow.
    InitiateAuth => "InitiateAuth", false;
    /// Answer an authentication challenge.
    RespondToAuthChallenge => "RespondToAuthChallenge", false;
    /// Register a new user.
    SignUp => "SignUp", false;
    /// Confirm a registration with a delivered code.
    ConfirmSignUp => "ConfirmSignUp", false;
    /// Re-send the registration confirmation code.
    ResendConfirmationCode => "ResendConfirmationCode", false;
    /// Start a password reset.
    ForgotPassword => "ForgotPassword", false;
    /// Complete a password reset.
    ConfirmForgotPassword => "ConfirmForgotPassword", false;
    /// Change the signed-in user's password.
    ChangePassword => "ChangePassword", false;
    /// Fetch the signed-in user.
    GetUser => "GetUser", false;
    /// Update the signed-in user's attributes.
    UpdateUserAttributes => "UpdateUserAttributes", false;
    /// Delete attributes from the signed-in user.
    DeleteUserAttributes => "DeleteUserAttributes", false;
    /// Delete the signed-in user.
    DeleteUser => "DeleteUser", false;
    /// Send an attribute verification code.
    GetUserAttributeVerificationCode => "GetUserAttributeVerificationCode", false;
    /// Verify an attribute with a delivered code.
    VerifyUserAttribute => "VerifyUserAttribute", false;
    /// Begin software-token MFA enrolment.
    AssociateSoftwareToken => "AssociateSoftwareToken", false;
    /// Verify a software-token MFA code.
    VerifySoftwareToken => "VerifySoftwareToken", false;
    /// Set the signed-in user's MFA preference.
    SetUserMfaPreference => "SetUserMFAPreference", false;
    /// Fetch one remembered device.
    GetDevice => "GetDevice", false;
    /// Forget a remembered device.
    ForgetDevice => "ForgetDevice", false;
    /// List remembered devices.
    ListDevices => "ListDevices", false;
    /// Confirm device tracking.
    ConfirmDevice => "ConfirmDevice", false;
    /// Change a device's remembered status.
    UpdateDeviceStatus => "UpdateDeviceStatus", false;
    /// Sign the user out everywhere.
    GlobalSignOut => "GlobalSignOut", false;
    /// Revoke a refresh token.
    RevokeToken => "RevokeToken", false;
    /// Create a user as an administrator.
    AdminCreateUser => "AdminCreateUser", true;
    /// Fetch a user by name.
    AdminGetUser => "AdminGetUser", true;
    /// Update a user's attributes.
    AdminUpdateUserAttributes => "AdminUpdateUserAttributes", true;
    /// Delete attributes from a user.
    AdminDeleteUserAttributes => "AdminDeleteUserAttributes", true;
    /// Delete a user.
    AdminDeleteUser => "AdminDeleteUser", true;
    /// Enable a user.
    AdminEnableUser => "AdminEnableUser", true;
    /// Disable a user.
    AdminDisableUser => "AdminDisableUser", true;
    /// Force a password reset.
    AdminResetUserPassword => "AdminResetUserPassword", true;
    /// Set a user's password.
    AdminSetUserPassword => "AdminSetUserPassword", true;
    /// Confirm a registration without a code.
    AdminConfirmSignUp => "AdminConfirmSignUp", true;
    /// Authenticate on a user's behalf.
    AdminInitiateAuth => "AdminInitiateAuth", true;
    /// Sign a user out everywhere.
    AdminUserGlobalSignOut => "AdminUserGlobalSignOut", true;
    /// Set a user's MFA preference.
    AdminSetUserMfaPreference => "AdminSetUserMFAPreference", true;
    /// Fetch one of a user's devices.
    AdminGetDevice => "AdminGetDevice", true;
    /// Forget one of a user's devices.
    AdminForgetDevice => "AdminForgetDevice", true;
    /// List a user's devices.
    AdminListDevices => "AdminListDevices", true;
    /// Change the remembered status of a user's device.
    AdminUpdateDeviceStatus => "AdminUpdateDeviceStatus", true;
    /// List users in the pool.
    ListUsers => "ListUsers", true;
    /// Create a group.
    CreateGroup => "CreateGroup", true;
    /// Fetch a group.
    GetGroup => "GetGroup", true;
    /// Update a group.
    UpdateGroup => "UpdateGroup", true;
    /// Delete a group.
    DeleteGroup => "DeleteGroup", true;
    /// List groups in the pool.
    ListGroups => "ListGroups", true;
    /// Add a user to a group.
    AdminAddUserToGroup => "AdminAddUserToGroup", true;
    /// Remove a user from a group.
    AdminRemoveUserFromGroup => "AdminRemoveUserFromGroup", true;
    /// List the groups a user belongs to.
    AdminListGroupsForUser => "AdminListGroupsForUser", true;
    /// List the members of a group.
    ListUsersInGroup => "ListUsersInGroup", true;
    /// List a user's authentication events.
    AdminListUserAuthEvents => "AdminListUserAuthEvents", true;
    /// Link an external provider identity to a user.
    AdminLinkProviderForUser => "AdminLinkProviderForUser", true;
    /// Unlink an external provider identity.
    AdminDisableProviderForUser => "AdminDisableProviderForUser", true;
}

impl fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

define_port_error! {
    /// Errors surfaced while calling the identity provider.
    pub enum IdentityProviderError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "identity provider transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "identity provider timed out: {message}",
        /// The provider answered with a typed rejection.
        Rejected { name: String, message: String } =>
            "{name}: {message}",
        /// The provider response could not be decoded.
        Decode { message: String } =>
            "identity provider response decode failed: {message}",
        /// The request could not be signed.
        Signing { message: String } =>
            "identity provider request signing failed: {message}",
        /// The adapter refused the request before sending it.
        InvalidRequest { message: String } =>
            "identity provider request invalid: {message}",
    }
}

impl IdentityProviderError {
    /// Error name: the provider's exception type for rejections, a fixed
    /// label otherwise.
    pub fn name(&self) -> &str {
        match self {
            Self::Transport { .. } => "TransportError",
            Self::Timeout { .. } => "TimeoutError",
            Self::Rejected { name, .. } => name.as_str(),
            Self::Decode { .. } => "DecodeError",
            Self::Signing { .. } => "SigningError",
            Self::InvalidRequest { .. } => "InvalidRequestError",
        }
    }

    /// Bare message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Timeout { message }
            | Self::Rejected { message, .. }
            | Self::Decode { message }
            | Self::Signing { message }
            | Self::InvalidRequest { message } => message.as_str(),
        }
    }
}

/// Port for sending one operation to the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Send `payload` as `operation` and return the decoded JSON response.
    ///
    /// Successful calls with an empty body resolve to an empty JSON object.
    async fn call(
        &self,
        operation: ProviderOperation,
        payload: Value,
    ) -> Result<Value, IdentityProviderError>;
}
