//! Administrative facade for privileged user-pool operations.
//!
//! Every request carries the pool identifier. The adapter behind the port
//! signs these calls with the pool credentials.

use std::collections::BTreeMap;
use std::sync::Arc;

use mockable::Clock;

use super::call::FacadeCore;
use super::mapping::{
    to_auth_event, to_device_record, to_group_record, to_sign_in_step, to_user_record,
};
use super::user::{mfa_settings, remembered_status};
use super::wire::{
    AdminCreateUserRequest, AdminDeleteUserAttributesRequest, AdminSetUserPasswordRequest,
    AdminUserAttributesRequest, AdminUserRequest, AuthEventListDto, DeviceEnvelopeDto,
    DeviceListDto, DeviceRequest, DisableProviderRequest, GroupEnvelopeDto, GroupListDto,
    GroupMembershipRequest, GroupRequest, InitiateAuthRequest, LinkProviderRequest,
    ListUsersRequest, MfaPreferenceRequest, PagedRequest, ProviderUserIdentifierDto,
    UserDto, UserEnvelopeDto, UserListDto,
};
use crate::domain::attributes::{to_provider_attributes, to_provider_names};
use crate::domain::params::{
    AdminCreateUserParams, AdminDeleteAttributesParams, AdminDeviceParams,
    AdminListDevicesParams, AdminMfaPreferenceParams, AdminSetPasswordParams,
    AdminUpdateAttributesParams, AdminUpdateDeviceStatusParams, GroupMembershipParams,
    GroupParams, LinkProviderParams, ListAuthEventsParams, ListGroupsForUserParams,
    ListGroupsParams, ListUsersInGroupParams, ListUsersParams, ProviderUserIdentifier,
    SignInParams,
};
use crate::domain::ports::{IdentityProvider, ProviderOperation};
use crate::domain::{
    AuthEvent, DeviceRecord, ErrorPolicy, FacadeError, FacadeResult, GroupRecord, Page,
    SignInStep, UserRecord,
};

const ADMIN_USER_PASSWORD_AUTH: &str = "ADMIN_USER_PASSWORD_AUTH";
const SUPPRESS_MESSAGE: &str = "SUPPRESS";

/// Facade over the provider's administrative operations.
#[derive(Clone)]
pub struct AdminClient {
    core: FacadeCore,
    user_pool_id: String,
    client_id: Option<String>,
}

impl AdminClient {
    /// Create a client scoped to `user_pool_id` with the default error
    /// policy.
    pub fn new(provider: Arc<dyn IdentityProvider>, user_pool_id: impl Into<String>) -> Self {
        Self {
            core: FacadeCore::new(provider, ErrorPolicy::default()),
            user_pool_id: user_pool_id.into(),
            client_id: None,
        }
    }

    /// Attach the application client used by [`Self::admin_sign_in`].
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
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

    /// Pool every call is scoped to.
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    fn user_request<'a>(&'a self, username: &'a str) -> AdminUserRequest<'a> {
        AdminUserRequest {
            user_pool_id: &self.user_pool_id,
            username,
        }
    }

    async fn user_action(
        &self,
        label: &'static str,
        operation: ProviderOperation,
        username: &str,
    ) -> FacadeResult<bool> {
        self.core
            .invoke_unit(label, operation, &self.user_request(username))
            .await
    }

    // -- users --------------------------------------------------------------

    /// Create a user, optionally suppressing the welcome message.
    pub async fn admin_create_user(
        &self,
        params: &AdminCreateUserParams,
    ) -> FacadeResult<UserRecord> {
        let request = AdminCreateUserRequest {
            user_pool_id: &self.user_pool_id,
            username: &params.username,
            temporary_password: params.temporary_password.as_deref().map(String::as_str),
            user_attributes: to_provider_attributes(&params.attributes),
            message_action: params.suppress_message.then_some(SUPPRESS_MESSAGE),
            desired_delivery_mediums: params.desired_delivery_mediums.clone(),
        };
        let raw: UserEnvelopeDto = self
            .core
            .invoke("AdminCreateUser", ProviderOperation::AdminCreateUser, &request)
            .await?;
        let user = raw
            .user
            .ok_or_else(|| FacadeError::invalid_response("missing User"))?;
        to_user_record(user)
    }

    /// Fetch a user by name.
    pub async fn admin_get_user(&self, username: &str) -> FacadeResult<UserRecord> {
        let raw: UserDto = self
            .core
            .invoke(
                "AdminGetUser",
                ProviderOperation::AdminGetUser,
                &self.user_request(username),
            )
            .await?;
        to_user_record(raw)
    }

    /// Write attributes on a user.
    pub async fn admin_update_user_attributes(
        &self,
        params: &AdminUpdateAttributesParams,
    ) -> FacadeResult<bool> {
        let request = AdminUserAttributesRequest {
            user_pool_id: &self.user_pool_id,
            username: &params.username,
            user_attributes: to_provider_attributes(&params.attributes),
        };
        self.core
            .invoke_unit(
                "AdminUpdateUserAttributes",
                ProviderOperation::AdminUpdateUserAttributes,
                &request,
            )
            .await
    }

    /// Remove attributes from a user; names are given in application form.
    pub async fn admin_delete_user_attributes(
        &self,
        params: &AdminDeleteAttributesParams,
    ) -> FacadeResult<bool> {
        let request = AdminDeleteUserAttributesRequest {
            user_pool_id: &self.user_pool_id,
            username: &params.username,
            user_attribute_names: to_provider_names(&params.attribute_names),
        };
        self.core
            .invoke_unit(
                "AdminDeleteUserAttributes",
                ProviderOperation::AdminDeleteUserAttributes,
                &request,
            )
            .await
    }

    /// Delete a user.
    pub async fn admin_delete_user(&self, username: &str) -> FacadeResult<bool> {
        self.user_action("AdminDeleteUser", ProviderOperation::AdminDeleteUser, username)
            .await
    }

    /// Enable a disabled user.
    pub async fn admin_enable_user(&self, username: &str) -> FacadeResult<bool> {
        self.user_action("AdminEnableUser", ProviderOperation::AdminEnableUser, username)
            .await
    }

    /// Disable a user without deleting it.
    pub async fn admin_disable_user(&self, username: &str) -> FacadeResult<bool> {
        self.user_action("AdminDisableUser", ProviderOperation::AdminDisableUser, username)
            .await
    }

    /// Force a password reset at next sign-in.
    pub async fn admin_reset_user_password(&self, username: &str) -> FacadeResult<bool> {
        self.user_action(
            "AdminResetUserPassword",
            ProviderOperation::AdminResetUserPassword,
            username,
        )
        .await
    }

    /// Set a user's password.
    pub async fn admin_set_user_password(
        &self,
        params: &AdminSetPasswordParams,
    ) -> FacadeResult<bool> {
        let request = AdminSetUserPasswordRequest {
            user_pool_id: &self.user_pool_id,
            username: &params.username,
            password: &params.password,
            permanent: params.permanent,
        };
        self.core
            .invoke_unit(
                "AdminSetUserPassword",
                ProviderOperation::AdminSetUserPassword,
                &request,
            )
            .await
    }

    /// Confirm a registration without a code.
    pub async fn admin_confirm_sign_up(&self, username: &str) -> FacadeResult<bool> {
        self.user_action(
            "AdminConfirmSignUp",
            ProviderOperation::AdminConfirmSignUp,
            username,
        )
        .await
    }

    /// Sign a user in server-side.
    ///
    /// Admin-created users typically answer a `NEW_PASSWORD_REQUIRED`
    /// challenge first, so the next step is returned rather than tokens.
    ///
    /// # Errors
    ///
    /// Fails with [`FacadeError::InvalidInput`] before any remote call when
    /// the client was built without a client id.
    pub async fn admin_sign_in(&self, params: &SignInParams) -> FacadeResult<SignInStep> {
        let client_id = self.client_id.as_deref().ok_or_else(|| {
            FacadeError::invalid_input("admin sign-in requires an application client id")
        })?;
        let request = InitiateAuthRequest {
            auth_flow: ADMIN_USER_PASSWORD_AUTH,
            client_id,
            user_pool_id: Some(self.user_pool_id.as_str()),
            auth_parameters: BTreeMap::from([
                ("USERNAME", params.username.as_str()),
                ("PASSWORD", params.password.as_str()),
            ]),
        };
        let raw = self
            .core
            .invoke("AdminSignIn", ProviderOperation::AdminInitiateAuth, &request)
            .await?;
        to_sign_in_step(raw)
    }

    /// Invalidate every token issued to a user.
    pub async fn admin_user_global_sign_out(&self, username: &str) -> FacadeResult<bool> {
        self.user_action(
            "AdminUserGlobalSignOut",
            ProviderOperation::AdminUserGlobalSignOut,
            username,
        )
        .await
    }

    /// Set a user's MFA preference.
    pub async fn admin_set_user_mfa_preference(
        &self,
        params: &AdminMfaPreferenceParams,
    ) -> FacadeResult<bool> {
        let request = MfaPreferenceRequest {
            access_token: None,
            user_pool_id: Some(self.user_pool_id.as_str()),
            username: Some(params.username.as_str()),
            sms_mfa_settings: mfa_settings(params.sms),
            software_token_mfa_settings: mfa_settings(params.software_token),
        };
        self.core
            .invoke_unit(
                "AdminSetUserMfaPreference",
                ProviderOperation::AdminSetUserMfaPreference,
                &request,
            )
            .await
    }

    // -- devices ------------------------------------------------------------

    fn device_request<'a>(&'a self, username: &'a str, device_key: &'a str) -> DeviceRequest<'a> {
        DeviceRequest {
            user_pool_id: Some(self.user_pool_id.as_str()),
            username: Some(username),
            device_key: Some(device_key),
            ..DeviceRequest::default()
        }
    }

    /// Fetch one device of a user.
    pub async fn admin_get_device(&self, params: &AdminDeviceParams) -> FacadeResult<DeviceRecord> {
        let raw: DeviceEnvelopeDto = self
            .core
            .invoke(
                "AdminGetDevice",
                ProviderOperation::AdminGetDevice,
                &self.device_request(&params.username, &params.device_key),
            )
            .await?;
        to_device_record(raw.device, self.core.clock())
    }

    /// Stop tracking a device of a user.
    pub async fn admin_forget_device(&self, params: &AdminDeviceParams) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "AdminForgetDevice",
                ProviderOperation::AdminForgetDevice,
                &self.device_request(&params.username, &params.device_key),
            )
            .await
    }

    /// List a user's devices.
    pub async fn admin_list_devices(
        &self,
        params: &AdminListDevicesParams,
    ) -> FacadeResult<Page<DeviceRecord>> {
        let request = DeviceRequest {
            user_pool_id: Some(self.user_pool_id.as_str()),
            username: Some(params.username.as_str()),
            limit: params.limit,
            pagination_token: params.pagination_token.as_deref(),
            ..DeviceRequest::default()
        };
        let raw: DeviceListDto = self
            .core
            .invoke("AdminListDevices", ProviderOperation::AdminListDevices, &request)
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

    /// Change whether a user's device is remembered.
    pub async fn admin_update_device_status(
        &self,
        params: &AdminUpdateDeviceStatusParams,
    ) -> FacadeResult<bool> {
        let request = DeviceRequest {
            device_remembered_status: Some(remembered_status(params.remembered)),
            ..self.device_request(&params.username, &params.device_key)
        };
        self.core
            .invoke_unit(
                "AdminUpdateDeviceStatus",
                ProviderOperation::AdminUpdateDeviceStatus,
                &request,
            )
            .await
    }

    // -- listings -----------------------------------------------------------

    /// List pool users, optionally filtered.
    pub async fn list_users(&self, params: &ListUsersParams) -> FacadeResult<Page<UserRecord>> {
        let request = ListUsersRequest {
            user_pool_id: &self.user_pool_id,
            filter: params.filter.as_deref(),
            limit: params.limit,
            pagination_token: params.pagination_token.as_deref(),
            attributes_to_get: to_provider_names(&params.attributes_to_get),
        };
        let raw: UserListDto = self
            .core
            .invoke("ListUsers", ProviderOperation::ListUsers, &request)
            .await?;
        user_page(raw.users, raw.pagination_token)
    }

    /// List the members of a group.
    pub async fn list_users_in_group(
        &self,
        params: &ListUsersInGroupParams,
    ) -> FacadeResult<Page<UserRecord>> {
        let request = PagedRequest {
            user_pool_id: &self.user_pool_id,
            group_name: Some(params.group_name.as_str()),
            limit: params.limit,
            next_token: params.next_token.as_deref(),
            ..PagedRequest::default()
        };
        let raw: UserListDto = self
            .core
            .invoke("ListUsersInGroup", ProviderOperation::ListUsersInGroup, &request)
            .await?;
        user_page(raw.users, raw.next_token)
    }

    /// List a user's authentication history.
    pub async fn admin_list_user_auth_events(
        &self,
        params: &ListAuthEventsParams,
    ) -> FacadeResult<Page<AuthEvent>> {
        let request = PagedRequest {
            user_pool_id: &self.user_pool_id,
            username: Some(params.username.as_str()),
            max_results: params.max_results,
            next_token: params.next_token.as_deref(),
            ..PagedRequest::default()
        };
        let raw: AuthEventListDto = self
            .core
            .invoke(
                "AdminListUserAuthEvents",
                ProviderOperation::AdminListUserAuthEvents,
                &request,
            )
            .await?;
        Ok(Page {
            items: raw.auth_events.into_iter().map(to_auth_event).collect(),
            next_token: raw.next_token,
        })
    }

    // -- groups -------------------------------------------------------------

    fn group_request<'a>(&'a self, params: &'a GroupParams) -> GroupRequest<'a> {
        GroupRequest {
            group_name: &params.group_name,
            user_pool_id: &self.user_pool_id,
            description: params.description.as_deref(),
            precedence: params.precedence,
            role_arn: params.role_arn.as_deref(),
        }
    }

    fn group_name_request<'a>(&'a self, group_name: &'a str) -> GroupRequest<'a> {
        GroupRequest {
            group_name,
            user_pool_id: &self.user_pool_id,
            description: None,
            precedence: None,
            role_arn: None,
        }
    }

    /// Create a group.
    pub async fn create_group(&self, params: &GroupParams) -> FacadeResult<GroupRecord> {
        let raw: GroupEnvelopeDto = self
            .core
            .invoke(
                "CreateGroup",
                ProviderOperation::CreateGroup,
                &self.group_request(params),
            )
            .await?;
        to_group_record(raw.group)
    }

    /// Fetch a group by name.
    pub async fn get_group(&self, group_name: &str) -> FacadeResult<GroupRecord> {
        let raw: GroupEnvelopeDto = self
            .core
            .invoke(
                "GetGroup",
                ProviderOperation::GetGroup,
                &self.group_name_request(group_name),
            )
            .await?;
        to_group_record(raw.group)
    }

    /// Update a group's description, precedence or role.
    pub async fn update_group(&self, params: &GroupParams) -> FacadeResult<GroupRecord> {
        let raw: GroupEnvelopeDto = self
            .core
            .invoke(
                "UpdateGroup",
                ProviderOperation::UpdateGroup,
                &self.group_request(params),
            )
            .await?;
        to_group_record(raw.group)
    }

    /// Delete a group.
    pub async fn delete_group(&self, group_name: &str) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "DeleteGroup",
                ProviderOperation::DeleteGroup,
                &self.group_name_request(group_name),
            )
            .await
    }

    /// List the pool's groups.
    pub async fn list_groups(&self, params: &ListGroupsParams) -> FacadeResult<Page<GroupRecord>> {
        let request = PagedRequest {
            user_pool_id: &self.user_pool_id,
            limit: params.limit,
            next_token: params.next_token.as_deref(),
            ..PagedRequest::default()
        };
        let raw: GroupListDto = self
            .core
            .invoke("ListGroups", ProviderOperation::ListGroups, &request)
            .await?;
        group_page(raw)
    }

    fn membership_request<'a>(
        &'a self,
        params: &'a GroupMembershipParams,
    ) -> GroupMembershipRequest<'a> {
        GroupMembershipRequest {
            user_pool_id: &self.user_pool_id,
            username: &params.username,
            group_name: &params.group_name,
        }
    }

    /// Add a user to a group.
    pub async fn admin_add_user_to_group(
        &self,
        params: &GroupMembershipParams,
    ) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "AdminAddUserToGroup",
                ProviderOperation::AdminAddUserToGroup,
                &self.membership_request(params),
            )
            .await
    }

    /// Remove a user from a group.
    pub async fn admin_remove_user_from_group(
        &self,
        params: &GroupMembershipParams,
    ) -> FacadeResult<bool> {
        self.core
            .invoke_unit(
                "AdminRemoveUserFromGroup",
                ProviderOperation::AdminRemoveUserFromGroup,
                &self.membership_request(params),
            )
            .await
    }

    /// List the groups a user belongs to.
    pub async fn admin_list_groups_for_user(
        &self,
        params: &ListGroupsForUserParams,
    ) -> FacadeResult<Page<GroupRecord>> {
        let request = PagedRequest {
            user_pool_id: &self.user_pool_id,
            username: Some(params.username.as_str()),
            limit: params.limit,
            next_token: params.next_token.as_deref(),
            ..PagedRequest::default()
        };
        let raw: GroupListDto = self
            .core
            .invoke(
                "AdminListGroupsForUser",
                ProviderOperation::AdminListGroupsForUser,
                &request,
            )
            .await?;
        group_page(raw)
    }

    // -- federation ---------------------------------------------------------

    /// Link a federated identity to an existing pool user.
    pub async fn admin_link_provider_for_user(
        &self,
        params: &LinkProviderParams,
    ) -> FacadeResult<bool> {
        let request = LinkProviderRequest {
            user_pool_id: &self.user_pool_id,
            destination_user: identifier(&params.destination_user),
            source_user: identifier(&params.source_user),
        };
        self.core
            .invoke_unit(
                "AdminLinkProviderForUser",
                ProviderOperation::AdminLinkProviderForUser,
                &request,
            )
            .await
    }

    /// Unlink a federated identity and disable its user.
    pub async fn admin_disable_provider_for_user(
        &self,
        user: &ProviderUserIdentifier,
    ) -> FacadeResult<bool> {
        let request = DisableProviderRequest {
            user_pool_id: &self.user_pool_id,
            user: identifier(user),
        };
        self.core
            .invoke_unit(
                "AdminDisableProviderForUser",
                ProviderOperation::AdminDisableProviderForUser,
                &request,
            )
            .await
    }
}

fn identifier(user: &ProviderUserIdentifier) -> ProviderUserIdentifierDto<'_> {
    ProviderUserIdentifierDto {
        provider_name: &user.provider_name,
        provider_attribute_name: user.provider_attribute_name.as_deref(),
        provider_attribute_value: &user.provider_attribute_value,
    }
}

fn user_page(users: Vec<UserDto>, next_token: Option<String>) -> FacadeResult<Page<UserRecord>> {
    let items = users
        .into_iter()
        .map(to_user_record)
        .collect::<FacadeResult<Vec<_>>>()?;
    Ok(Page { items, next_token })
}

fn group_page(raw: GroupListDto) -> FacadeResult<Page<GroupRecord>> {
    let items = raw
        .groups
        .into_iter()
        .map(|group| to_group_record(Some(group)))
        .collect::<FacadeResult<Vec<_>>>()?;
    Ok(Page {
        items,
        next_token: raw.next_token,
    })
}
