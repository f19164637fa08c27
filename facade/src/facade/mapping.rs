//! Validation and reshaping of raw provider records.
//!
//! Each mapper consumes a wire DTO and yields an application record, failing
//! with [`FacadeError::InvalidResponse`] only when a field the contract
//! requires is absent. Apart from the device timestamp fallback, which reads
//! the injected clock, every mapper is a pure function of its input.

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::warn;

use super::wire::{
    AuthEventDto, AuthFlowResponseDto, AuthenticationResultDto, CodeDeliveryDetailsDto,
    DeviceDto, GroupDto, MfaOptionDto, UserDto,
};
use crate::domain::attributes::to_application_attributes;
use crate::domain::{
    AuthChallenge, AuthEvent, AuthResult, CodeDelivery, DEFAULT_TOKEN_TYPE, DeviceRecord,
    FacadeError, FacadeResult, GroupRecord, MfaOption, SignInStep, UserRecord,
};

/// Map a raw authentication result into [`AuthResult`].
///
/// # Errors
///
/// Returns [`FacadeError::InvalidResponse`] naming the first missing field
/// when any of the access token, ID token, refresh token or expiry is absent.
///
/// # Examples
/// ```
/// use idp_facade::facade::mapping::to_auth_result;
/// use idp_facade::facade::wire::AuthenticationResultDto;
///
/// let raw: AuthenticationResultDto = serde_json::from_value(serde_json::json!({
///     "AccessToken": "t1", "IdToken": "t2", "RefreshToken": "t3", "ExpiresIn": 3600
/// }))?;
/// let result = to_auth_result(raw)?;
/// assert_eq!(result.token_type, "Bearer");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_auth_result(raw: AuthenticationResultDto) -> FacadeResult<AuthResult> {
    let AuthenticationResultDto {
        access_token,
        id_token,
        refresh_token,
        expires_in,
        token_type,
    } = raw;
    Ok(AuthResult {
        access_token: required(access_token, "AccessToken")?,
        id_token: required(id_token, "IdToken")?,
        refresh_token: required(refresh_token, "RefreshToken")?,
        expires_in: required(expires_in, "ExpiresIn")?,
        token_type: token_type.unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_owned()),
    })
}

/// Map an authentication-flow response into the next [`SignInStep`].
///
/// Tokens win over a challenge when the provider reports both.
///
/// # Errors
///
/// Returns [`FacadeError::InvalidResponse`] when the response carries
/// neither an authentication result nor a challenge, or when the
/// authentication result is incomplete.
pub fn to_sign_in_step(raw: AuthFlowResponseDto) -> FacadeResult<SignInStep> {
    if let Some(result) = raw.authentication_result {
        return to_auth_result(result).map(SignInStep::Authenticated);
    }
    let Some(name) = raw.challenge_name else {
        return Err(FacadeError::invalid_response(
            "missing AuthenticationResult and ChallengeName",
        ));
    };
    Ok(SignInStep::Challenge(AuthChallenge {
        name,
        session: raw.session,
        parameters: raw.challenge_parameters.unwrap_or_default(),
    }))
}

/// Map a raw user into [`UserRecord`].
///
/// # Errors
///
/// Returns [`FacadeError::InvalidResponse`] when the username is absent.
pub fn to_user_record(raw: UserDto) -> FacadeResult<UserRecord> {
    let username = required(raw.username, "Username")?;
    Ok(UserRecord {
        username,
        created_at: raw.user_create_date.and_then(epoch_seconds),
        last_modified_at: raw.user_last_modified_date.and_then(epoch_seconds),
        enabled: raw.enabled.unwrap_or(false),
        status: raw.user_status.unwrap_or_default(),
        attributes: to_application_attributes(raw.user_attributes.iter().flatten()),
        mfa_options: raw
            .mfa_options
            .map(|options| options.into_iter().map(to_mfa_option).collect()),
        preferred_mfa_setting: raw.preferred_mfa_setting,
        mfa_settings: raw.user_mfa_setting_list,
    })
}

fn to_mfa_option(raw: MfaOptionDto) -> MfaOption {
    MfaOption {
        delivery_medium: raw.delivery_medium.unwrap_or_default(),
        attribute_name: raw.attribute_name.unwrap_or_default(),
    }
}

/// Map a raw device container into [`DeviceRecord`].
///
/// Missing creation and modification times fall back to `clock.utc()`.
///
/// # Errors
///
/// Returns [`FacadeError::InvalidResponse`] only when the container itself
/// is absent.
pub fn to_device_record(raw: Option<DeviceDto>, clock: &dyn Clock) -> FacadeResult<DeviceRecord> {
    let raw = raw.ok_or_else(|| FacadeError::invalid_response("missing Device"))?;
    let device_key = raw.device_key.unwrap_or_default();
    let created_at = timestamp_or_now(raw.device_create_date, clock, &device_key, "created_at");
    let last_modified_at = timestamp_or_now(
        raw.device_last_modified_date,
        clock,
        &device_key,
        "last_modified_at",
    );
    Ok(DeviceRecord {
        attributes: to_application_attributes(raw.device_attributes.iter().flatten()),
        created_at,
        last_modified_at,
        last_authenticated_at: raw.device_last_authenticated_date.and_then(epoch_seconds),
        device_key,
    })
}

fn timestamp_or_now(
    raw: Option<f64>,
    clock: &dyn Clock,
    device_key: &str,
    field: &'static str,
) -> DateTime<Utc> {
    if let Some(timestamp) = raw.and_then(epoch_seconds) {
        return timestamp;
    }
    warn!(device_key, field, "device timestamp missing; using current time");
    clock.utc()
}

/// Map a raw group container into [`GroupRecord`].
///
/// # Errors
///
/// Returns [`FacadeError::InvalidResponse`] when the container is absent.
pub fn to_group_record(raw: Option<GroupDto>) -> FacadeResult<GroupRecord> {
    let raw = raw.ok_or_else(|| FacadeError::invalid_response("missing Group"))?;
    Ok(GroupRecord {
        name: raw.group_name.unwrap_or_default(),
        description: raw.description,
        user_pool_id: raw.user_pool_id,
        precedence: raw.precedence,
        role_arn: raw.role_arn,
        last_modified_at: raw.last_modified_date.and_then(epoch_seconds),
        created_at: raw.creation_date.and_then(epoch_seconds),
    })
}

/// Map raw code-delivery details, defaulting missing fields to empty text.
pub fn to_code_delivery(raw: CodeDeliveryDetailsDto) -> CodeDelivery {
    CodeDelivery {
        destination: raw.destination.unwrap_or_default(),
        delivery_medium: raw.delivery_medium.unwrap_or_default(),
        attribute_name: raw.attribute_name.unwrap_or_default(),
    }
}

/// Map a raw authentication event.
pub fn to_auth_event(raw: AuthEventDto) -> AuthEvent {
    let risk = raw.event_risk.unwrap_or_default();
    let context = raw.event_context_data.unwrap_or_default();
    AuthEvent {
        event_id: raw.event_id.unwrap_or_default(),
        event_type: raw.event_type.unwrap_or_default(),
        created_at: raw.creation_date.and_then(epoch_seconds),
        event_response: raw.event_response,
        risk_decision: risk.risk_decision,
        risk_level: risk.risk_level,
        challenge_responses: raw
            .challenge_responses
            .into_iter()
            .filter_map(|entry| Some((entry.challenge_name?, entry.challenge_response?)))
            .collect(),
        ip_address: context.ip_address,
        device_name: context.device_name,
        city: context.city,
        country: context.country,
    }
}

/// Convert fractional epoch seconds to a UTC timestamp with millisecond
/// precision. Non-finite or out-of-range values yield `None`.
pub(crate) fn epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn required<T>(value: Option<T>, field: &str) -> FacadeResult<T> {
    value.ok_or_else(|| FacadeError::invalid_response(format!("missing {field}")))
}
