// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for user-visible failures and confirmations.
//!
//! Only user-initiated actions surface here (a failed or completed
//! deletion). Background failures such as seen reports or roster refreshes
//! are absorbed by the session and only reach the diagnostics log.
//!
//! - Errors stay until dismissed; other severities expire on tick
//! - At most three toasts are visible, the rest are queued

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
