//! Tests for the self-service facade.

use super::*;
use crate::domain::FailureKind;
use crate::domain::ports::{IdentityProviderError, MockIdentityProvider};
use crate::test_support::FixedClock;
use mockall::predicate::{always, eq};
use rstest::rstest;
use serde_json::{Value, json};

fn client(mock: MockIdentityProvider) -> UserClient {
    UserClient::new(Arc::new(mock), "pool-1", "client-1")
}

fn expect_call(mock: &mut MockIdentityProvider, operation: ProviderOperation, payload: Value, reply: Value) {
    mock.expect_call()
        .with(eq(operation), eq(payload))
        .times(1)
        .return_once(move |_, _| Ok(reply));
}

fn tokens() -> Value {
    json!({
        "AccessToken": "access",
        "IdToken": "id",
        "RefreshToken": "refresh",
        "ExpiresIn": 3600
    })
}

fn sign_in_params() -> SignInParams {
    SignInParams {
        username: "alice".to_owned(),
        password: String::from("hunter2").into(),
    }
}

#[rstest]
#[tokio::test]
async fn sign_in_sends_password_flow_and_maps_tokens() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::InitiateAuth,
        json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": "client-1",
            "AuthParameters": { "PASSWORD": "hunter2", "USERNAME": "alice" }
        }),
        json!({ "AuthenticationResult": tokens() }),
    );

    let result = client(mock).sign_in(&sign_in_params()).await.expect("sign-in succeeds");
    assert_eq!(result.access_token, "access");
    assert_eq!(result.token_type, "Bearer");
}

#[rstest]
#[tokio::test]
async fn sign_in_without_result_is_validation_failure() {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call()
        .return_once(|_, _| Ok(json!({ "ChallengeName": "NEW_PASSWORD_REQUIRED" })));

    let error = client(mock).sign_in(&sign_in_params()).await.expect_err("must fail");
    assert_eq!(error, FacadeError::invalid_response("missing AuthenticationResult"));
}

#[rstest]
#[case(ErrorPolicy::WrapWithOperation, "SignIn error: Incorrect username or password.")]
#[case(ErrorPolicy::PassThrough, "NotAuthorizedException: Incorrect username or password.")]
#[tokio::test]
async fn sign_in_rejections_follow_configured_policy(
    #[case] policy: ErrorPolicy,
    #[case] expected: &str,
) {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call().return_once(|_, _| {
        Err(IdentityProviderError::rejected(
            "NotAuthorizedException",
            "Incorrect username or password.",
        ))
    });

    let error = client(mock)
        .with_error_policy(policy)
        .sign_in(&sign_in_params())
        .await
        .expect_err("rejection propagates");
    assert_eq!(error.to_string(), expected);
    assert_eq!(error.info().code, "NotAuthorizedException");
}

#[rstest]
#[tokio::test]
async fn start_sign_in_surfaces_challenge() {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call().return_once(|_, _| {
        Ok(json!({ "ChallengeName": "SOFTWARE_TOKEN_MFA", "Session": "sess" }))
    });

    let step = client(mock).start_sign_in(&sign_in_params()).await.expect("step maps");
    let SignInStep::Challenge(challenge) = step else {
        panic!("expected a challenge");
    };
    assert_eq!(challenge.name, "SOFTWARE_TOKEN_MFA");
}

#[rstest]
#[tokio::test]
async fn respond_to_challenge_forwards_session() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::RespondToAuthChallenge,
        json!({
            "ClientId": "client-1",
            "ChallengeName": "SOFTWARE_TOKEN_MFA",
            "Session": "sess",
            "ChallengeResponses": { "SOFTWARE_TOKEN_MFA_CODE": "123456", "USERNAME": "alice" }
        }),
        json!({ "AuthenticationResult": tokens() }),
    );
    let params = ChallengeResponseParams {
        challenge_name: "SOFTWARE_TOKEN_MFA".to_owned(),
        session: Some("sess".to_owned()),
        responses: BTreeMap::from([
            ("USERNAME".to_owned(), "alice".to_owned()),
            ("SOFTWARE_TOKEN_MFA_CODE".to_owned(), "123456".to_owned()),
        ]),
    };

    let step = client(mock)
        .respond_to_auth_challenge(&params)
        .await
        .expect("challenge answered");
    assert!(matches!(step, SignInStep::Authenticated(_)));
}

#[rstest]
#[tokio::test]
async fn refresh_session_carries_refresh_token() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::InitiateAuth,
        json!({
            "AuthFlow": "REFRESH_TOKEN_AUTH",
            "ClientId": "client-1",
            "AuthParameters": { "REFRESH_TOKEN": "r-0" }
        }),
        json!({ "AuthenticationResult": {
            "AccessToken": "a-1", "IdToken": "i-1", "ExpiresIn": 3600
        }}),
    );

    let result = client(mock).refresh_session("r-0").await.expect("refresh succeeds");
    assert_eq!(result.access_token, "a-1");
    assert_eq!(result.refresh_token, "r-0");
}

#[rstest]
#[tokio::test]
async fn sign_up_maps_attributes_and_delivery() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::SignUp,
        json!({
            "ClientId": "client-1",
            "Username": "alice",
            "Password": "hunter2",
            "UserAttributes": [
                { "Name": "email", "Value": "a@b.com" },
                { "Name": "custom:role", "Value": "admin" }
            ]
        }),
        json!({
            "UserSub": "sub-1",
            "UserConfirmed": false,
            "CodeDeliveryDetails": { "Destination": "a***@b.com", "DeliveryMedium": "EMAIL" }
        }),
    );
    let params = SignUpParams {
        username: "alice".to_owned(),
        password: String::from("hunter2").into(),
        attributes: [("email", "a@b.com"), ("customRole", "admin")]
            .into_iter()
            .collect(),
        validation_data: AttributeMap::new(),
    };

    let result = client(mock).sign_up(&params).await.expect("sign-up succeeds");
    assert_eq!(result.user_sub, "sub-1");
    assert!(!result.user_confirmed);
    let delivery = result.code_delivery.expect("delivery reported");
    assert_eq!(delivery.delivery_medium, "EMAIL");
    assert_eq!(delivery.attribute_name, "");
}

#[rstest]
#[tokio::test]
async fn forgot_password_reports_delivery() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::ForgotPassword,
        json!({ "ClientId": "client-1", "Username": "alice" }),
        json!({ "CodeDeliveryDetails": { "Destination": "+1***99", "DeliveryMedium": "SMS", "AttributeName": "phone_number" } }),
    );

    let delivery = client(mock).forgot_password("alice").await.expect("reset starts");
    assert_eq!(delivery.destination, "+1***99");
    assert_eq!(delivery.attribute_name, "phone_number");
}

#[rstest]
#[tokio::test]
async fn get_user_maps_record() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::GetUser,
        json!({ "AccessToken": "tok" }),
        json!({
            "Username": "alice",
            "UserAttributes": [{ "Name": "custom:tier", "Value": "gold" }]
        }),
    );

    let user = client(mock).get_user("tok").await.expect("user maps");
    assert_eq!(user.username, "alice");
    assert_eq!(user.attributes.get("customTier"), Some("gold"));
}

#[rstest]
#[tokio::test]
async fn current_user_strips_bearer_scheme() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::GetUser,
        json!({ "AccessToken": "abc123" }),
        json!({ "Username": "alice" }),
    );

    let user = client(mock)
        .get_current_user("Bearer abc123")
        .await
        .expect("user maps");
    assert_eq!(user.username, "alice");
}

#[rstest]
#[case("")]
#[case("Bearer ")]
#[case("   ")]
#[tokio::test]
async fn empty_authorization_fails_before_any_call(#[case] header: &str) {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call().with(always(), always()).times(0);
    let facade = client(mock);

    let error = facade.delete_current_user(header).await.expect_err("must fail");
    assert_eq!(error.kind(), FailureKind::Input);
    let error = facade
        .update_current_user(header, &AttributeMap::new())
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), FailureKind::Input);
}

#[rstest]
#[tokio::test]
async fn update_current_user_translates_attribute_names() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::UpdateUserAttributes,
        json!({
            "AccessToken": "tok",
            "UserAttributes": [{ "Name": "custom:role", "Value": "editor" }]
        }),
        json!({}),
    );
    let attributes: AttributeMap = [("customRole", "editor")].into_iter().collect();

    let done = client(mock)
        .update_current_user("bearer tok", &attributes)
        .await
        .expect("update succeeds");
    assert!(done);
}

#[rstest]
#[tokio::test]
async fn delete_user_attributes_translates_custom_names() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::DeleteUserAttributes,
        json!({
            "AccessToken": "tok",
            "UserAttributeNames": ["custom:role", "phoneNumber"]
        }),
        json!({}),
    );
    let params = DeleteAttributesParams {
        access_token: "tok".to_owned(),
        attribute_names: vec!["customRole".to_owned(), "phoneNumber".to_owned()],
    };

    assert!(client(mock).delete_user_attributes(&params).await.expect("deleted"));
}

#[rstest]
#[tokio::test]
async fn verify_software_token_reports_status() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::VerifySoftwareToken,
        json!({ "AccessToken": "tok", "UserCode": "654321", "FriendlyDeviceName": "phone" }),
        json!({ "Status": "SUCCESS" }),
    );
    let params = VerifySoftwareTokenParams {
        access_token: Some("tok".to_owned()),
        session: None,
        user_code: "654321".to_owned(),
        friendly_device_name: Some("phone".to_owned()),
    };

    let outcome = client(mock).verify_software_token(&params).await.expect("verified");
    assert_eq!(outcome.status, "SUCCESS");
    assert_eq!(outcome.session, None);
}

#[rstest]
#[tokio::test]
async fn associate_software_token_requires_secret() {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call().return_once(|_, _| Ok(json!({ "Session": "s" })));
    let params = AssociateSoftwareTokenParams {
        access_token: Some("tok".to_owned()),
        session: None,
    };

    let error = client(mock)
        .associate_software_token(&params)
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), FailureKind::Validation);
}

#[rstest]
#[tokio::test]
async fn mfa_preference_uses_provider_field_names() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::SetUserMfaPreference,
        json!({
            "AccessToken": "tok",
            "SoftwareTokenMfaSettings": { "Enabled": true, "PreferredMfa": true }
        }),
        json!({}),
    );
    let params = MfaPreferenceParams {
        access_token: "tok".to_owned(),
        sms: None,
        software_token: Some(MfaSettings {
            enabled: true,
            preferred: true,
        }),
    };

    assert!(client(mock).set_user_mfa_preference(&params).await.expect("set"));
}

#[rstest]
#[tokio::test]
async fn get_device_without_container_is_validation_failure() {
    let mut mock = MockIdentityProvider::new();
    mock.expect_call().return_once(|_, _| Ok(json!({})));
    let params = DeviceParams {
        access_token: "tok".to_owned(),
        device_key: "dev-1".to_owned(),
    };

    let error = client(mock).get_device(&params).await.expect_err("must fail");
    assert_eq!(error, FacadeError::invalid_response("missing Device"));
}

#[rstest]
#[tokio::test]
async fn list_devices_pages_with_clock_fallback() {
    let clock = FixedClock::pinned();
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::ListDevices,
        json!({ "AccessToken": "tok", "Limit": 10 }),
        json!({
            "Devices": [
                { "DeviceKey": "dev-1" },
                { "DeviceKey": "dev-2", "DeviceCreateDate": 1_600_000_000 }
            ],
            "PaginationToken": "next"
        }),
    );
    let params = ListDevicesParams {
        access_token: "tok".to_owned(),
        limit: Some(10),
        pagination_token: None,
    };

    let page = client(mock)
        .with_clock(Arc::new(clock))
        .list_devices(&params)
        .await
        .expect("devices list");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].created_at, clock.0);
    assert_ne!(page.items[1].created_at, clock.0);
    assert_eq!(page.next_token.as_deref(), Some("next"));
}

#[rstest]
#[case(true, "remembered")]
#[case(false, "not_remembered")]
#[tokio::test]
async fn device_status_uses_wire_values(#[case] remembered: bool, #[case] wire: &str) {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::UpdateDeviceStatus,
        json!({ "AccessToken": "tok", "DeviceKey": "dev-1", "DeviceRememberedStatus": wire }),
        json!({}),
    );
    let params = UpdateDeviceStatusParams {
        access_token: "tok".to_owned(),
        device_key: "dev-1".to_owned(),
        remembered,
    };

    assert!(client(mock).update_device_status(&params).await.expect("updated"));
}

#[rstest]
#[tokio::test]
async fn revoke_token_scopes_by_client() {
    let mut mock = MockIdentityProvider::new();
    expect_call(
        &mut mock,
        ProviderOperation::RevokeToken,
        json!({ "Token": "r-0", "ClientId": "client-1" }),
        json!({}),
    );

    assert!(client(mock).revoke_token("r-0").await.expect("revoked"));
}
