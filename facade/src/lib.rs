//! Typed facade over a managed user-pool identity provider.
//!
//! The crate exposes two clients: [`facade::UserClient`] for self-service
//! operations and [`facade::AdminClient`] for privileged pool management.
//! Both translate attribute names between the provider's flat namespace and
//! application keys, validate provider responses into typed records and
//! surface failures under a per-client error policy.
//!
//! Layout:
//! - `domain`: attribute mapping, records, parameters, errors and the
//!   `IdentityProvider` port.
//! - `facade`: the clients, provider wire records and the response mapper.
//! - `outbound`: the HTTP adapter implementing the port.
//! - `config` / `builders`: settings and client wiring.

pub mod builders;
pub mod config;
pub mod domain;
pub mod facade;
pub mod outbound;

#[cfg(test)]
mod test_support;

pub use builders::{build_admin_client, build_user_client};
pub use config::{ProviderSettings, SettingsError};
pub use facade::{AdminClient, UserClient};
