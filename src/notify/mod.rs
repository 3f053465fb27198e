//! Notification bus: timed, dismissible status messages.

pub mod bus;

pub use bus::{
    Channel, Millis, Notification, NotificationBus, NotificationId, NotificationKind, Phase,
    ENTER_DELAY_MS, EXIT_DELAY_MS,
};
