//! Shared call path for both facades.
//!
//! Encodes a request, forwards it through the provider port, applies the
//! configured [`ErrorPolicy`] to rejections and decodes the response DTO.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;

use crate::domain::ports::{IdentityProvider, ProviderOperation};
use crate::domain::{ErrorPolicy, FacadeError, FacadeResult};

#[derive(Clone)]
pub(crate) struct FacadeCore {
    provider: Arc<dyn IdentityProvider>,
    policy: ErrorPolicy,
    clock: Arc<dyn Clock>,
}

impl FacadeCore {
    pub(crate) fn new(provider: Arc<dyn IdentityProvider>, policy: ErrorPolicy) -> Self {
        Self {
            provider,
            policy,
            clock: Arc::new(DefaultClock),
        }
    }

    pub(crate) fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub(crate) fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub(crate) fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Perform one provider round trip.
    ///
    /// `label` names the facade operation in wrapped errors, for example
    /// `SignIn`, and may differ from the wire operation.
    pub(crate) async fn invoke<Req, Resp>(
        &self,
        label: &'static str,
        operation: ProviderOperation,
        request: &Req,
    ) -> FacadeResult<Resp>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_value(request).map_err(|err| {
            FacadeError::invalid_input(format!("{label} request could not be encoded: {err}"))
        })?;
        debug!(operation = %operation, label, "calling identity provider");
        let raw = match self.provider.call(operation, payload).await {
            Ok(raw) => raw,
            Err(error) => {
                debug!(operation = %operation, label, error = %error, "identity provider rejected call");
                return Err(self.policy.apply(label, error));
            }
        };
        serde_json::from_value(raw).map_err(|err| {
            FacadeError::invalid_response(format!("{label} response could not be decoded: {err}"))
        })
    }

    /// Perform a round trip whose response carries nothing of interest.
    pub(crate) async fn invoke_unit<Req>(
        &self,
        label: &'static str,
        operation: ProviderOperation,
        request: &Req,
    ) -> FacadeResult<bool>
    where
        Req: Serialize + Sync + ?Sized,
    {
        let _: IgnoredAny = self.invoke(label, operation, request).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the shared call path.

    use super::*;
    use crate::domain::ports::{IdentityProviderError, MockIdentityProvider};
    use crate::domain::FailureKind;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;

    fn core_with(mock: MockIdentityProvider, policy: ErrorPolicy) -> FacadeCore {
        FacadeCore::new(Arc::new(mock), policy)
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_encoded_payload() {
        let mut mock = MockIdentityProvider::new();
        mock.expect_call()
            .with(eq(ProviderOperation::GetUser), eq(json!({ "AccessToken": "tok" })))
            .times(1)
            .return_once(|_, _| Ok(json!({})));
        let core = core_with(mock, ErrorPolicy::default());

        let done = core
            .invoke_unit("GetUser", ProviderOperation::GetUser, &json!({ "AccessToken": "tok" }))
            .await
            .expect("call succeeds");
        assert!(done);
    }

    #[rstest]
    #[case(ErrorPolicy::WrapWithOperation, "DeleteUser error: denied")]
    #[case(ErrorPolicy::PassThrough, "NotAuthorizedException: denied")]
    #[tokio::test]
    async fn rejections_follow_policy(#[case] policy: ErrorPolicy, #[case] expected: &str) {
        let mut mock = MockIdentityProvider::new();
        mock.expect_call().return_once(|_, _| {
            Err(IdentityProviderError::rejected("NotAuthorizedException", "denied"))
        });
        let core = core_with(mock, policy);

        let error = core
            .invoke_unit("DeleteUser", ProviderOperation::DeleteUser, &json!({}))
            .await
            .expect_err("rejection propagates");
        assert_eq!(error.kind(), FailureKind::Remote);
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn undecodable_response_is_validation_failure() {
        let mut mock = MockIdentityProvider::new();
        mock.expect_call()
            .return_once(|_, _| Ok(json!({ "Username": 42 })));
        let core = core_with(mock, ErrorPolicy::default());

        let error = core
            .invoke::<_, crate::facade::wire::UserDto>(
                "GetUser",
                ProviderOperation::GetUser,
                &json!({}),
            )
            .await
            .expect_err("decode fails");
        assert_eq!(error.kind(), FailureKind::Validation);
    }
}
