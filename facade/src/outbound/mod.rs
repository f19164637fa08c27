//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain payloads and the wire. They
//! contain no business logic.

pub mod user_pool;
