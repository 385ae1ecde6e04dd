//! Application layer: the checkout rule and the admin page logic.
//!
//! `run` is a pure function of the checkout input. `CustomizationService` orchestrates
//! the injected ports for the configuration pages.

pub mod customization;
pub mod run;
