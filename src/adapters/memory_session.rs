//! In-memory session flag store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ports::session_port::SessionFlagPort;

/// Flags for one viewer. The web adapter round-trips this through the
/// cookie session; the CLI keeps one for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySessionFlags {
    flags: BTreeMap<String, String>,
}

impl MemorySessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl SessionFlagPort for MemorySessionFlags {
    fn get_flag(&self, key: &str) -> Option<String> {
        self.flags.get(key).cloned()
    }

    fn set_flag(&mut self, key: &str, value: &str) {
        self.flags.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::disclaimer::{self, DISCLAIMER_FLAG};

    #[test]
    fn set_then_get() {
        let mut flags = MemorySessionFlags::new();
        assert!(flags.is_empty());
        flags.set_flag("a", "1");
        flags.set_flag("a", "2");
        assert_eq!(flags.get_flag("a").as_deref(), Some("2"));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get_flag("b"), None);
    }

    #[test]
    fn disclaimer_round_trip() {
        let mut flags = MemorySessionFlags::new();
        assert!(disclaimer::is_pending(&flags));
        disclaimer::acknowledge(&mut flags);
        assert!(!disclaimer::is_pending(&flags));
        assert_eq!(flags.get_flag(DISCLAIMER_FLAG).as_deref(), Some("true"));
    }
}
