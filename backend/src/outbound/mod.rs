//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **backend**: reqwest client for the external backend API, plus base URL
//!   resolution
//! - **gateway**: `GatewayApi` implementations used by the resource stores
//! - **cache**: in-memory store behind the read-through query cache
//! - **multipart**: reqwest encoding of structured forms, shared by both
//!   HTTP clients
//!
//! Adapters are thin translators between domain types and transport details.
//! They contain no business logic.

pub mod backend;
pub mod cache;
pub mod gateway;
mod multipart;
