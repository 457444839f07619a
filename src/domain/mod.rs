//! Core domain types and logic.

pub mod aggregate;
pub mod catalog;
pub mod chart;
pub mod config_validation;
pub mod correlation;
pub mod disclaimer;
pub mod error;
pub mod filter;
pub mod format;
pub mod notification;
pub mod portfolio;
pub mod profile;
pub mod session;
pub mod strategy;
pub mod watchlist;
