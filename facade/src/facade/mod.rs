//! Client facades over the identity provider.
//!
//! [`UserClient`] exposes self-service operations scoped by an application
//! client; [`AdminClient`] exposes privileged, pool-scoped operations. Both
//! share one call path that applies the configured error policy, and both
//! map provider records through [`mapping`].

mod admin;
mod call;
pub mod mapping;
mod user;
pub mod wire;

pub use self::admin::AdminClient;
pub use self::user::UserClient;
