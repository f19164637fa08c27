//! SigV4 signing for privileged provider calls.

use std::fmt;
use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use zeroize::Zeroizing;

use crate::domain::ports::IdentityProviderError;

/// Service name used in the credential scope.
pub(super) const SIGNING_SERVICE: &str = "cognito-idp";

/// Static access-key pair used to sign privileged calls.
#[derive(Clone)]
pub struct StaticCredentials {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
}

impl StaticCredentials {
    /// Wrap an access-key pair.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: Zeroizing<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key,
        }
    }

    /// Public half of the pair.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    fn identity(&self) -> Identity {
        Credentials::new(
            self.access_key_id.as_str(),
            self.secret_access_key.as_str(),
            None,
            None,
            "idp-facade-static",
        )
        .into()
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Compute the headers that sign one request.
///
/// `headers` lists the request headers to cover; the host is derived from
/// `url`.
pub(super) fn signature_headers(
    credentials: &StaticCredentials,
    region: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: &[u8],
    time: SystemTime,
) -> Result<Vec<(String, String)>, IdentityProviderError> {
    let identity = credentials.identity();
    let params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SIGNING_SERVICE)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(|error| IdentityProviderError::signing(error.to_string()))?
        .into();
    let request = SignableRequest::new(
        "POST",
        url,
        headers.iter().copied(),
        SignableBody::Bytes(body),
    )
    .map_err(|error| IdentityProviderError::signing(error.to_string()))?;
    let (instructions, _signature) = sign(request, &params)
        .map_err(|error| IdentityProviderError::signing(error.to_string()))?
        .into_parts();
    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect())
}

#[cfg(test)]
mod tests {
    //! Signing coverage with a fixed clock.

    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    fn credentials() -> StaticCredentials {
        StaticCredentials::new(
            "AKIDEXAMPLE",
            Zeroizing::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_owned()),
        )
    }

    #[rstest]
    fn signs_with_service_scope() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let headers = signature_headers(
            &credentials(),
            "eu-west-1",
            "https://cognito-idp.eu-west-1.amazonaws.com/",
            &[
                ("content-type", "application/x-amz-json-1.1"),
                ("x-amz-target", "AWSCognitoIdentityProviderService.ListUsers"),
            ],
            br#"{"UserPoolId":"pool-1"}"#,
            time,
        )
        .expect("signing succeeds");

        let authorization = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
            .expect("authorization header present");
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20231114/eu-west-1/cognito-idp/aws4_request"
        ));
        assert!(authorization.contains("x-amz-target"));
        assert!(
            headers
                .iter()
                .any(|(name, value)| name.eq_ignore_ascii_case("x-amz-date")
                    && value == "20231114T221320Z")
        );
    }

    #[rstest]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("EXAMPLEKEY"));
    }
}
