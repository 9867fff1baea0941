//! Emergency alert: one high-severity notice to the desk.

use tracing::instrument;

use crate::{
    base::types::{EmergencyNotice, Severity},
    service::portal::PortalClient,
};

use super::{Notice, Outcome, Tone, attempt};

/// Note sent when the emergency button is used without further detail.
pub const DEFAULT_NOTE: &str = "Web emergency button used";

pub const NOTIFYING: &str = "Notifying emergency desk...";
pub const FORWARDED: &str = "Emergency has been logged and forwarded to the desk.";
pub const DEMO_FORWARDED: &str = "Demo: emergency would be logged here. Connect backend to enable.";

/// Status shown while the desk is being notified.
pub fn pending_notice() -> Notice {
    Notice::new(NOTIFYING, Tone::Alert)
}

/// Notify the emergency desk with a high-severity notice.
#[instrument(skip(portal))]
pub async fn notify_emergency(portal: &PortalClient, note: Option<&str>) -> Outcome<Notice> {
    let note = note.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NOTE);
    let notice = EmergencyNotice {
        severity: Severity::High,
        note: note.to_string(),
    };

    attempt("Emergency desk", portal.notify_emergency(&notice), |_| Notice::new(FORWARDED, Tone::Alert), || Notice::new(DEMO_FORWARDED, Tone::Alert)).await
}
