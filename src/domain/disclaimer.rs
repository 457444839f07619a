//! One-time demo disclaimer, tracked by a session flag.

use crate::ports::session_port::SessionFlagPort;

pub const DISCLAIMER_FLAG: &str = "demoModalShown";
pub const DISCLAIMER_TITLE: &str = "Welcome to the Demo";
pub const DISCLAIMER_BODY: &str = "This is a demonstration version of the Financial Trading \
Dashboard. All data displayed is for illustrative purposes only and should not be considered \
real financial information.";
pub const ACKNOWLEDGE_LABEL: &str = "Acknowledge";

/// An absent or empty flag means the viewer has not acknowledged yet.
pub fn should_show(flag: Option<&str>) -> bool {
    flag.is_none_or(str::is_empty)
}

pub fn is_pending(store: &dyn SessionFlagPort) -> bool {
    should_show(store.get_flag(DISCLAIMER_FLAG).as_deref())
}

pub fn acknowledge(store: &mut dyn SessionFlagPort) {
    store.set_flag(DISCLAIMER_FLAG, "true");
    tracing::debug!(flag = DISCLAIMER_FLAG, "disclaimer acknowledged");
}
