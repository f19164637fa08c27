//! Wiring from [`ProviderSettings`] to ready-to-use facades.

use std::sync::Arc;

use crate::config::{ProviderSettings, SettingsError};
use crate::domain::ports::IdentityProvider;
use crate::facade::{AdminClient, UserClient};
use crate::outbound::user_pool::{HttpIdentityProvider, StaticCredentials};

fn build_provider(
    settings: &ProviderSettings,
    credentials: Option<StaticCredentials>,
) -> Result<Arc<dyn IdentityProvider>, SettingsError> {
    let region = settings.region()?;
    let endpoint = settings.endpoint()?;
    let provider = HttpIdentityProvider::new(endpoint, region, settings.timeout()).map_err(
        |error| SettingsError::Client {
            message: error.to_string(),
        },
    )?;
    let provider = match credentials {
        Some(credentials) => provider.with_credentials(credentials),
        None => provider,
    };
    Ok(Arc::new(provider))
}

/// Build a self-service client.
///
/// # Errors
///
/// Returns [`SettingsError`] when the region, pool id or client id is
/// missing, or the endpoint is invalid.
pub fn build_user_client(settings: &ProviderSettings) -> Result<UserClient, SettingsError> {
    let user_pool_id = settings.user_pool_id()?;
    let client_id = settings.client_id()?;
    let provider = build_provider(settings, None)?;
    Ok(UserClient::new(provider, user_pool_id, client_id).with_error_policy(settings.error_policy()))
}

/// Build an administrative client. The client id, when configured, enables
/// [`AdminClient::admin_sign_in`].
///
/// # Errors
///
/// Returns [`SettingsError`] when the region, pool id or either half of the
/// access-key pair is missing, or the endpoint is invalid.
pub fn build_admin_client(settings: &ProviderSettings) -> Result<AdminClient, SettingsError> {
    let user_pool_id = settings.user_pool_id()?;
    let credentials = settings.credentials()?;
    let provider = build_provider(settings, Some(credentials))?;
    let client =
        AdminClient::new(provider, user_pool_id).with_error_policy(settings.error_policy());
    Ok(match settings.client_id() {
        Ok(client_id) => client.with_client_id(client_id),
        Err(_) => client,
    })
}

#[cfg(test)]
mod tests {
    //! Coverage for settings validation during client construction.

    use super::*;
    use crate::domain::ErrorPolicy;
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    #[fixture]
    fn settings() -> ProviderSettings {
        ProviderSettings {
            region: Some("eu-west-1".to_owned()),
            user_pool_id: Some("eu-west-1_pool".to_owned()),
            client_id: Some("client-1".to_owned()),
            access_key_id: Some("AKID".to_owned()),
            secret_access_key: Some(Zeroizing::new("secret".to_owned())),
            wrap_errors: false,
            ..ProviderSettings::default()
        }
    }

    #[rstest]
    fn user_client_carries_pool_client_and_policy(settings: ProviderSettings) {
        let client = build_user_client(&settings).expect("client builds");
        assert_eq!(client.user_pool_id(), "eu-west-1_pool");
        assert_eq!(client.client_id(), "client-1");
        assert_eq!(client.error_policy(), ErrorPolicy::PassThrough);
    }

    #[rstest]
    #[case::pool("user_pool_id")]
    #[case::client("client_id")]
    #[case::region("region")]
    fn user_client_requires_pool_client_and_region(
        mut settings: ProviderSettings,
        #[case] field: &'static str,
    ) {
        match field {
            "user_pool_id" => settings.user_pool_id = None,
            "client_id" => settings.client_id = None,
            _ => settings.region = None,
        }
        assert_eq!(
            build_user_client(&settings).err(),
            Some(SettingsError::Missing { field })
        );
    }

    #[rstest]
    fn user_client_does_not_need_credentials(mut settings: ProviderSettings) {
        settings.access_key_id = None;
        settings.secret_access_key = None;
        assert!(build_user_client(&settings).is_ok());
    }

    #[rstest]
    fn admin_client_requires_credentials(mut settings: ProviderSettings) {
        settings.secret_access_key = None;
        assert_eq!(
            build_admin_client(&settings).err(),
            Some(SettingsError::Missing {
                field: "secret_access_key"
            })
        );
    }

    #[rstest]
    fn admin_client_builds_without_client_id(mut settings: ProviderSettings) {
        settings.client_id = None;
        let client = build_admin_client(&settings).expect("client builds");
        assert_eq!(client.user_pool_id(), "eu-west-1_pool");
    }
}
