//! Adapters for the domain ports.

pub mod graphql;
pub mod in_memory;
pub mod session;
