//! Port traits at the seams between the domain and its adapters.

pub mod catalog_port;
pub mod config_port;
pub mod session_port;
