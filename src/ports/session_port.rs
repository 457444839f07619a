//! Session-scoped string flags.

pub trait SessionFlagPort {
    fn get_flag(&self, key: &str) -> Option<String>;
    fn set_flag(&mut self, key: &str, value: &str);
}
