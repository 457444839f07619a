//! Configuration access port trait.

/// Read-only view over sectioned key/value configuration.
///
/// Numbers are read as strings so callers can reject malformed values
/// instead of silently falling back to a default.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
