//! User-pool outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `IdentityProvider` port speaking the provider's JSON 1.1 protocol.

mod dto;
mod http_provider;
mod signing;

pub use http_provider::{HttpIdentityProvider, regional_endpoint};
pub use signing::StaticCredentials;
