//! Domain types and the ports the application depends on.

pub mod configuration;
pub mod customization;
pub mod function;
pub mod ports;
