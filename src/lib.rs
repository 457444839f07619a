//! stratdeck: trading strategy dashboard.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`cli`] module wires them
//! together for the binary.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
