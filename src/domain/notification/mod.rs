pub mod entity;
pub use entity::{
    Notification, NotificationId, NotificationKind, NotificationPhase, CLOSING_DURATION,
    DISPLAY_DURATION,
};
