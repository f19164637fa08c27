//! Self-service facade for ordinary-privilege operations.
//!
//! Every call is scoped by the application client identifier and, where
//! the provider requires it, the caller's access token. Nothing here needs
//! pool credentials.

use std::collections::BTreeMap;
use std::sync::Arc;

use mockable::Clock;

use super::call::FacadeCore;
use super::mapping::{
    to_auth_result, to_code_delivery, to_device_record, to_sign_in_step, to_user_record,
};
use super::wire::{
    AccessTokenRequest, AssociateSoftwareTokenResponseDto, AttributeVerificationRequest,
    AuthFlowResponseDto, ChangePasswordRequest, ClientUsernameRequest, CodeDeliveryEnvelopeDto,
    ConfirmDeviceResponseDto, ConfirmForgotPasswordRequest, ConfirmSignUpRequest,
    DeleteUserAttributesRequest, DeviceEnvelopeDto, DeviceListDto, DeviceRequest,
    InitiateAuthRequest, MfaPreferenceRequest, MfaSettingsDto, RespondToAuthChallengeRequest,
    RevokeTokenRequest, SignUpRequest, SignUpResponseDto, SoftwareTokenRequest,
    UpdateUserAttributesRequest, UserDto, VerifySoftwareTokenResponseDto,
};
use crate::domain::attributes::{to_provider_attributes, to_provider_name, to_provider_names};
use crate::domain::params::{
    AssociateSoftwareTokenParams, AttributeVerificationParams, ChallengeResponseParams,
    ChangePasswordParams, ConfirmDeviceParams, ConfirmForgotPasswordParams, ConfirmSignUpParams,
    DeleteAttributesParams, DeviceParams, ListDevicesParams, MfaPreferenceParams, MfaSettings,
    SignInParams, SignUpParams, UpdateAttributesParams, UpdateDeviceStatusParams,
    VerifyAttributeParams, VerifySoftwareTokenParams,
};
use crate::domain::ports::{IdentityProvider, ProviderOperation};
use crate::domain::{
    AttributeMap, AuthResult, CodeDelivery, DeviceRecord, ErrorPolicy, FacadeError,
    FacadeResult, Page, SignInStep, SignUpResult, SoftwareTokenAssociation,
    SoftwareTokenVerification, UserRecord, access_token_from_header,
};

const USER_PASSWORD_AUTH: &str = "USER_PASSWORD_AUTH";
const REFRESH_TOKEN_AUTH: &str = "REFRESH_TOKEN_AUTH";

pub(super) fn remembered_status(remembered: bool) -> &'static str {
    if remembered {
        "remembered"
    } else {
        "not_remembered"
    }
}

pub(super) fn mfa_settings(settings: Option<MfaSettings>) -> Option<MfaSettingsDto> {
    settings.map(|settings| MfaSettingsDto {
        enabled: settings.enabled,
        preferred_mfa: settings.preferred,
    })
}

pub(super) fn require_auth_result(raw: AuthFlowResponseDto) -> FacadeResult<AuthResult> {
    let result = raw
        .authentication_result
        .ok_or_else(|| FacadeError::invalid_response("missing AuthenticationResult"))?;
    to_auth_result(result)
}

/// Facade over the provider's self-service operations.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use idp_facade::domain::params::SignInParams;
/// use idp_facade::facade::UserClient;
/// # async fn demo(provider: Arc<dyn idp_facade::domain::ports::IdentityProvider>)
/// #     -> Result<(), idp_facade::domain::FacadeError> {
/// let client = UserClient::new(provider, "eu-west-1_pool", "app-client");
/// let tokens = client
///     .sign_in(&SignInParams {
///         username: "alice".into(),
///         password: String::from("correct horse").into(),
///     })
///     .await?;
/// println!("{}", tokens.token_type);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct UserClient {
    core: FacadeCore,
    user_pool_id: String,
    client_id: String,
}

impl UserClient {
    /// Create a client with the default wrap-with-operation error policy.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            core: FacadeCore::new(provider, ErrorPolicy::default()),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
        }
    }

    /// Select how provider failures surface.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.core.set_policy(policy);
        self
    }

    /// Replace the clock used for timestamp fallbacks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.core.set_clock(clock);
        self
    }

    /// Configured error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.core.policy()
    }

    /// Pool this client belongs to.
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    /// Application client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    // -- authentication -----------------------------------------------------

    /// Sign in with username and password.
    ///
    /// # Errors
    ///
    /// Fails with [`FacadeError::InvalidResponse`] when the provider answers
    /// with a challenge instead of tokens; use [`Self::start_sign_in`] for
    /// flows that may be challenged.
    pub async fn sign_in(&self, params: &SignInParams) -> FacadeResult<AuthResult> {
        let raw: AuthFlowResponseDto = self
            .core
            .invoke(
                "SignIn",
                ProviderOperation::InitiateAuth,
                &self.password_auth(params),
            )
            .await?;
        require_auth_result(raw)
    }

    /// Start a password sign-in that may end in a challenge.
    pub async fn start_sign_in(&self, params: &SignInParams) -> FacadeResult<SignInStep> {
        let raw = self
            .core
            .invoke(
                "StartSignIn",
                ProviderOperation::InitiateAuth,
                &self.password_auth(params),
            )
            .await?;
        to_sign_in_step(raw)
    }

    fn password_auth<'a>(&'a self, params: &'a SignInParams) -> InitiateAuthRequest<'a> {
        InitiateAuthRequest {
            auth_flow: USER_PASSWORD_AUTH,
            client_id: &self.client_id,
            user_pool_id: None,
            auth_parameters: BTreeMap::from([
                ("USERNAME", params.username.as_str()),
                ("PASSWORD", params.password.as_str()),
            ]),
        }
    }

    /// Answer a challenge raised by a previous step.
    pub async fn respond_to_auth_challenge(
        &self,
        params: &ChallengeResponseParams,
    ) -> FacadeResult<SignInStep> {
        let request = RespondToAuthChallengeRequest {
            client_id: &self.client_id,
            challenge_name: &params.challenge_name,
            session: params.session.as_deref(),
            challenge_responses: &params.responses,
        };
        let raw = self
            .core
            .invoke(
                "RespondToAuthChallenge",
                ProviderOperation::RespondToAuthChallenge,
                &request,
            )
            .await?;
        to_sign_in_step(raw)
    }

    /// Exchange a refresh token for fresh tokens.
    ///
    /// The provider does not reissue the refresh token, so the one supplied
    /// is carried into the result.
    pub async fn refresh_session(&self, refresh_token: &str) -> FacadeResult<AuthResult> {
        let request = InitiateAuthRequest {
            auth_flow: REFRESH_TOKEN_AUTH,
            client_id: &self.client_id,
            user_pool_id: None,
            auth_parameters: BTreeMap::from([("REFRESH_TOKEN", refresh_token)]),
        };
        let mut raw: AuthFlowResponseDto = self
            .core
            .invoke("RefreshSession", ProviderOperation::InitiateAuth, &request)
            .await?;
        if let Some(result) = raw.authentication_result.as_mut() {
            result
                .refresh_token
                .get_or_insert_with(|| refresh_token.to_owned());
        }
        require_auth_result(raw)
    }

    // -- registration and recovery ------------------------------------------

    /// Register a new user.
    pub async fn sign_up(&self, params: &SignUpParams) -> FacadeResult<SignUpResult> {
        let request = SignUpRequest {
            client_id: &self.client_id,
            username: &params.username,
            password: &params.password,
            user_attributes: to_provider_attributes(&params.attributes),
            validation_data: to_provider_attributes(&params.validation_data),
        };
        let raw: SignUpResponseDto = self
            .core
            .invoke("SignUp", ProviderOperation::SignUp, &request)
            .await?;
        Ok(SignUpResult {
            user_sub: raw.user_sub.unwrap_or_default(),
            user_confirmed: raw.user_confirmed.unwrap_or(false),
            code_delivery: raw.code_delivery_details.map(to_code_delivery),
        })
    }

    /// Confirm a registration with the delivered code.
    pub async fn confirm_sign_up(&self, params: &ConfirmSignUpParams) -> FacadeResult<bool> {
        let request = ConfirmSignUpRequest {
            client_id: &self.client_id,
            username: &params.username,
            confirmation_code: &params.confirmation_code,
            force_alias_creation: params.force_alias_creation,
        };
        self.core
            .invoke_unit("ConfirmSignUp", ProviderOperation::ConfirmSignUp, &request)
            .await
    }

    /// Send the registration code again.
    pub async fn resend_confirmation_code(&self, username: &str) -> FacadeResult<CodeDelivery> {
        self.code_delivery(
            "ResendConfirmationCode",
            ProviderOperation::ResendConfirmationCode,
            username,
        )
        .await
    }

    /// Start a password reset.
    pub async fn forgot_password(&self, username: &str) -> FacadeResult<CodeDelivery> {
        self.code_delivery("ForgotPassword", ProviderOperation::ForgotPassword, username)
            .await
    }

    async fn code_delivery(
        &self,
        label: &'static str,
        operation: ProviderOperation,
        username: &str,
    ) -> FacadeResult<CodeDelivery> {
        let request = ClientUsernameRequest {
            client_id: &self.client_id,
            username,
        };
        let raw: CodeDeliveryEnvelopeDto = self.core.invoke(label, operation, &request).await?;
        Ok(to_code_delivery(raw.code_delivery_details.unwrap_or_default()))
    }

    /// Complete a password reset with the delivered code.
    pub async fn confirm_forgot_password(
        &self,
        params: &ConfirmForgotPasswordParams,
    ) -> FacadeResult<bool> {
        let request = ConfirmForgotPasswordRequest {
            client_id: &self.client_id,
            username: &params.username,
            confirmation_code: &params.confirmation_code,
            password: &params.new_password,
        };
        self.core
            .invoke_unit(
                "ConfirmForgotPassword",
                ProviderOperation::ConfirmForgotPassword,
                &request,
            )
            .await
    }

    /// Change the signed-in user's password.
    pub async fn change_password(&self, params: &ChangePasswordParams) -> FacadeResult<bool> {
        let request = ChangePasswordRequest {
            access_token: &params.access_token,
            previous_password: &params.previous_password,
            proposed_password: &params.proposed_password,
        };
        self.core
            .invoke_unit("ChangePassword", ProviderOperation::ChangePassword, &request)
            .await
    }

    // -- the signed-in user -------------------------------------------------

    /// Fetch the user owning `access_token`.
    pub async fn get_user(&self, access_token: &str) -> FacadeResult<UserRecord> {
        let raw: UserDto = self
            .core
            .invoke(
                "GetUser",
                ProviderOperation::GetUser,
                &AccessTokenRequest { access_token },
            )
            .await?;
        to_user_record(raw)
    }

    /// Write attributes on the signed-in user.
    pub async fn update_user_attributes(
        &self,
        params: &UpdateAttributesParams,
    ) -> FacadeResult<bool> {
        self.update_attributes_with(&params.access_token, &params.attributes)
            .await
    }

    async fn update_attributes_with(
        &self,
        access_token: &str,
        attributes: &AttributeMap,
    ) -> FacadeResult<bool> {
        let request = UpdateUserAttributesRequest {
            access_token,
            user_attributes: to_provider_attributes(attributes),
        };
        self.core
            .invoke_unit(
                "UpdateUserAttributes",
                ProviderOperation::UpdateUserAttributes,
                &request,
            )
            .await
    }

    /// Remove attributes from the signed-in user.
    ///
    /// Names are given in application form and translated with the
    /// custom-namespace transform.
    pub async fn delete_user_attributes(
        &self,
        params: &DeleteAttributesParams,
    ) -> FacadeResult<bool> {
        let request = DeleteUserAttributesRequest {
            access_token: &params.access_token,
            user_attribute_names: to_provider_names(&params.attribute_names),
        };
        self.core
            .invoke_unit(
                "DeleteUserAttributes",
                ProviderOperation::DeleteUserAttributes,
                &request,
            )
            .await
    }

    /// Delete the signed-in user.
    pub async fn delete_user(&self, access_token: &str) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "DeleteUser",
                ProviderOperation::DeleteUser,
                &AccessTokenRequest { access_token },
            )
            .await
    }

    /// Send a verification code to one of the user's attributes.
    pub async fn get_user_attribute_verification_code(
        &self,
        params: &AttributeVerificationParams,
    ) -> FacadeResult<CodeDelivery> {
        let request = AttributeVerificationRequest {
            access_token: &params.access_token,
            attribute_name: to_provider_name(&params.attribute_name),
            code: None,
        };
        let raw: CodeDeliveryEnvelopeDto = self
            .core
            .invoke(
                "GetUserAttributeVerificationCode",
                ProviderOperation::GetUserAttributeVerificationCode,
                &request,
            )
            .await?;
        Ok(to_code_delivery(raw.code_delivery_details.unwrap_or_default()))
    }

    /// Verify an attribute with the delivered code.
    pub async fn verify_user_attribute(&self, params: &VerifyAttributeParams) -> FacadeResult<bool> {
        let request = AttributeVerificationRequest {
            access_token: &params.access_token,
            attribute_name: to_provider_name(&params.attribute_name),
            code: Some(params.code.as_str()),
        };
        self.core
            .invoke_unit(
                "VerifyUserAttribute",
                ProviderOperation::VerifyUserAttribute,
                &request,
            )
            .await
    }

    // -- current-user conveniences ------------------------------------------

    /// Fetch the user identified by an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Fails with [`FacadeError::InvalidInput`] before any remote call when
    /// the header holds no token.
    pub async fn get_current_user(&self, authorization: &str) -> FacadeResult<UserRecord> {
        let token = access_token_from_header(authorization)?;
        self.get_user(&token).await
    }

    /// Write attributes on the user identified by an `Authorization` header.
    pub async fn update_current_user(
        &self,
        authorization: &str,
        attributes: &AttributeMap,
    ) -> FacadeResult<bool> {
        let token = access_token_from_header(authorization)?;
        self.update_attributes_with(&token, attributes).await
    }

    /// Delete the user identified by an `Authorization` header.
    pub async fn delete_current_user(&self, authorization: &str) -> FacadeResult<bool> {
        let token = access_token_from_header(authorization)?;
        self.delete_user(&token).await
    }

    // -- MFA ----------------------------------------------------------------

    /// Begin software-token enrolment.
    pub async fn associate_software_token(
        &self,
        params: &AssociateSoftwareTokenParams,
    ) -> FacadeResult<SoftwareTokenAssociation> {
        let request = SoftwareTokenRequest {
            access_token: params.access_token.as_deref(),
            session: params.session.as_deref(),
            user_code: None,
            friendly_device_name: None,
        };
        let raw: AssociateSoftwareTokenResponseDto = self
            .core
            .invoke(
                "AssociateSoftwareToken",
                ProviderOperation::AssociateSoftwareToken,
                &request,
            )
            .await?;
        let secret_code = raw
            .secret_code
            .ok_or_else(|| FacadeError::invalid_response("missing SecretCode"))?;
        Ok(SoftwareTokenAssociation {
            secret_code,
            session: raw.session,
        })
    }

    /// Verify a code from the enrolled authenticator.
    pub async fn verify_software_token(
        &self,
        params: &VerifySoftwareTokenParams,
    ) -> FacadeResult<SoftwareTokenVerification> {
        let request = SoftwareTokenRequest {
            access_token: params.access_token.as_deref(),
            session: params.session.as_deref(),
            user_code: Some(params.user_code.as_str()),
            friendly_device_name: params.friendly_device_name.as_deref(),
        };
        let raw: VerifySoftwareTokenResponseDto = self
            .core
            .invoke(
                "VerifySoftwareToken",
                ProviderOperation::VerifySoftwareToken,
                &request,
            )
            .await?;
        Ok(SoftwareTokenVerification {
            status: raw.status.unwrap_or_default(),
            session: raw.session,
        })
    }

    /// Set the signed-in user's MFA preference.
    pub async fn set_user_mfa_preference(&self, params: &MfaPreferenceParams) -> FacadeResult<bool> {
        let request = MfaPreferenceRequest {
            access_token: Some(params.access_token.as_str()),
            user_pool_id: None,
            username: None,
            sms_mfa_settings: mfa_settings(params.sms),
            software_token_mfa_settings: mfa_settings(params.software_token),
        };
        self.core
            .invoke_unit(
                "SetUserMfaPreference",
                ProviderOperation::SetUserMfaPreference,
                &request,
            )
            .await
    }

    // -- devices ------------------------------------------------------------

    /// Fetch one device of the signed-in user.
    pub async fn get_device(&self, params: &DeviceParams) -> FacadeResult<DeviceRecord> {
        let raw: DeviceEnvelopeDto = self
            .core
            .invoke(
                "GetDevice",
                ProviderOperation::GetDevice,
                &device_request(params),
            )
            .await?;
        to_device_record(raw.device, self.core.clock())
    }

    /// Stop tracking a device of the signed-in user.
    pub async fn forget_device(&self, params: &DeviceParams) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "ForgetDevice",
                ProviderOperation::ForgetDevice,
                &device_request(params),
            )
            .await
    }

    /// List the signed-in user's devices.
    pub async fn list_devices(&self, params: &ListDevicesParams) -> FacadeResult<Page<DeviceRecord>> {
        let request = DeviceRequest {
            access_token: Some(params.access_token.as_str()),
            limit: params.limit,
            pagination_token: params.pagination_token.as_deref(),
            ..DeviceRequest::default()
        };
        let raw: DeviceListDto = self
            .core
            .invoke("ListDevices", ProviderOperation::ListDevices, &request)
            .await?;
        let clock = self.core.clock();
        let items = raw
            .devices
            .into_iter()
            .map(|device| to_device_record(Some(device), clock))
            .collect::<FacadeResult<Vec<_>>>()?;
        Ok(Page {
            items,
            next_token: raw.pagination_token,
        })
    }

    /// Confirm tracking of a newly seen device.
    ///
    /// Returns whether the user must still confirm the device before it is
    /// remembered.
    pub async fn confirm_device(&self, params: &ConfirmDeviceParams) -> FacadeResult<bool> {
        let request = DeviceRequest {
            access_token: Some(params.access_token.as_str()),
            device_key: Some(params.device_key.as_str()),
            device_name: params.device_name.as_deref(),
            ..DeviceRequest::default()
        };
        let raw: ConfirmDeviceResponseDto = self
            .core
            .invoke("ConfirmDevice", ProviderOperation::ConfirmDevice, &request)
            .await?;
        Ok(raw.user_confirmation_necessary.unwrap_or(false))
    }

    /// Change whether a device of the signed-in user is remembered.
    pub async fn update_device_status(
        &self,
        params: &UpdateDeviceStatusParams,
    ) -> FacadeResult<bool> {
        let request = DeviceRequest {
            access_token: Some(params.access_token.as_str()),
            device_key: Some(params.device_key.as_str()),
            device_remembered_status: Some(remembered_status(params.remembered)),
            ..DeviceRequest::default()
        };
        self.core
            .invoke_unit(
                "UpdateDeviceStatus",
                ProviderOperation::UpdateDeviceStatus,
                &request,
            )
            .await
    }

    // -- sessions -----------------------------------------------------------

    /// Invalidate every token issued to the signed-in user.
    pub async fn global_sign_out(&self, access_token: &str) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "GlobalSignOut",
                ProviderOperation::GlobalSignOut,
                &AccessTokenRequest { access_token },
            )
            .await
    }

    /// Revoke a refresh token and the access tokens issued from it.
    pub async fn revoke_token(&self, refresh_token: &str) -> FacadeResult<bool> {
        let request = RevokeTokenRequest {
            token: refresh_token,
            client_id: &self.client_id,
        };
        self.core
            .invoke_unit("RevokeToken", ProviderOperation::RevokeToken, &request)
            .await
    }
}

fn device_request(params: &DeviceParams) -> DeviceRequest<'_> {
    DeviceRequest {
        access_token: Some(params.access_token.as_str()),
        device_key: Some(params.device_key.as_str()),
        ..DeviceRequest::default()
    }
}

#[cfg(test)]
mod tests;
