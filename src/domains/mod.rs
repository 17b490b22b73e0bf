//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the
//! gateway.

pub mod schemas;
pub mod tools;
