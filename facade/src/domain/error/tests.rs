//! Tests for error normalisation and the facade error policy.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn rejection() -> IdentityProviderError {
    IdentityProviderError::rejected("NotAuthorizedException", "Incorrect username or password.")
}

#[rstest]
fn structured_errors_keep_name_and_message() {
    let info = normalize_error(&RawError::structured(
        "UserNotFoundException",
        "User does not exist.",
        Some("UserNotFoundException".to_owned()),
    ));
    assert_eq!(
        info,
        ErrorInfo {
            code: "UserNotFoundException".to_owned(),
            name: "UserNotFoundException".to_owned(),
            message: "User does not exist.".to_owned(),
        }
    );
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
fn structured_errors_without_code_use_sentinel(#[case] code: Option<String>) {
    let info = normalize_error(&RawError::structured("TypeError", "boom", code));
    assert_eq!(info.code, UNKNOWN_ERROR);
    assert_eq!(info.name, "TypeError");
}

#[rstest]
fn object_fields_are_extracted_independently() {
    let info = normalize_error(&RawError::from(json!({ "code": "E42", "message": "bad" })));
    assert_eq!(info.code, "E42");
    assert_eq!(info.name, UNKNOWN_ERROR);
    assert_eq!(info.message, "bad");
}

#[rstest]
fn object_without_message_uses_serialised_form() {
    let info = normalize_error(&RawError::from(json!({ "status": 500 })));
    assert_eq!(info.code, UNKNOWN_ERROR);
    assert_eq!(info.name, UNKNOWN_ERROR);
    assert_eq!(info.message, r#"{"status":500}"#);
}

#[rstest]
fn object_non_string_fields_are_stringified() {
    let info = normalize_error(&RawError::from(json!({ "code": 429, "name": "Throttle" })));
    assert_eq!(info.code, "429");
    assert_eq!(info.name, "Throttle");
}

#[rstest]
#[case(json!(null), "null")]
#[case(json!("plain failure"), "plain failure")]
#[case(json!(42), "42")]
#[case(json!(true), "true")]
#[case(json!([1, 2]), "[1,2]")]
fn primitives_are_stringified(#[case] value: serde_json::Value, #[case] message: &str) {
    let info = normalize_error(&RawError::from(value));
    assert_eq!(info.code, UNKNOWN_ERROR);
    assert_eq!(info.name, UNKNOWN_ERROR);
    assert_eq!(info.message, message);
}

#[rstest]
fn provider_rejections_normalise_with_their_type(rejection: IdentityProviderError) {
    let info = normalize_error(&RawError::from(&rejection));
    assert_eq!(info.code, "NotAuthorizedException");
    assert_eq!(info.name, "NotAuthorizedException");
    assert_eq!(info.message, "Incorrect username or password.");
}

#[rstest]
fn transport_failures_have_unknown_code() {
    let info = normalize_error(&RawError::from(&IdentityProviderError::transport(
        "connection reset",
    )));
    assert_eq!(info.code, UNKNOWN_ERROR);
    assert_eq!(info.name, "TransportError");
}

#[rstest]
fn wrap_policy_prefixes_operation_name(rejection: IdentityProviderError) {
    let error = ErrorPolicy::WrapWithOperation.apply("SignIn", rejection.clone());
    assert_eq!(error.to_string(), "SignIn error: Incorrect username or password.");
    assert_eq!(error.kind(), FailureKind::Remote);
    assert_eq!(error.provider_error(), Some(&rejection));

    let info = error.info();
    assert_eq!(info.code, "NotAuthorizedException");
    assert_eq!(info.message, "SignIn error: Incorrect username or password.");
}

#[rstest]
fn pass_through_policy_keeps_original_failure(rejection: IdentityProviderError) {
    let error = ErrorPolicy::PassThrough.apply("SignIn", rejection.clone());
    assert_eq!(error, FacadeError::Provider(rejection.clone()));
    assert_eq!(error.to_string(), rejection.to_string());
    assert_eq!(error.info().message, "Incorrect username or password.");
}

#[rstest]
#[case(true, ErrorPolicy::WrapWithOperation)]
#[case(false, ErrorPolicy::PassThrough)]
fn policy_selected_from_flag(#[case] wrap: bool, #[case] expected: ErrorPolicy) {
    assert_eq!(ErrorPolicy::from_wrap_flag(wrap), expected);
}

#[rstest]
fn validation_failures_normalise_with_fixed_name() {
    let error = FacadeError::invalid_response("missing AuthenticationResult");
    assert_eq!(error.kind(), FailureKind::Validation);
    let info = error.info();
    assert_eq!(info.name, "InvalidResponse");
    assert_eq!(info.code, UNKNOWN_ERROR);
    assert_eq!(info.message, "missing AuthenticationResult");
}

#[rstest]
fn input_failures_are_distinct() {
    let error = FacadeError::invalid_input("authorization header does not contain an access token");
    assert_eq!(error.kind(), FailureKind::Input);
    assert!(error.provider_error().is_none());
    assert_eq!(
        error.to_string(),
        "invalid input: authorization header does not contain an access token"
    );
}
