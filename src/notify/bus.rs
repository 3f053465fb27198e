//! Timed, dismissible user notifications.
//!
//! Every notification goes through the same lifecycle:
//!
//! ```text
//! raise ──▶ Entering ──(+10ms)──▶ Visible ──dismiss / expiry──▶ Hidden ──(+300ms)──▶ removed
//! ```
//!
//! The bus never reads a clock. Callers pass `now` in milliseconds, and the host
//! calls [`NotificationBus::advance`] when the deadline reported by
//! [`NotificationBus::next_deadline`] is reached.

use serde::{Deserialize, Serialize};

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// Delay between creation and the entry becoming visible.
pub const ENTER_DELAY_MS: Millis = 10;

/// Grace period between hiding an entry and removing it.
pub const EXIT_DELAY_MS: Millis = 300;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    /// Errors are shown in their own, more prominent channel.
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::Error => Channel::Alert,
            Self::Success | Self::Info | Self::Warning => Channel::Toast,
        }
    }
}

/// Placement group for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Top-center stack for errors.
    Alert,
    /// Bottom-corner stack for success, info and warning.
    Toast,
}

/// Unique notification token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(u64);

#[cfg(test)]
impl NotificationId {
    pub(crate) const fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

/// Display phase of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Hidden { since: Millis },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    /// Auto-dismiss delay; `0` means the user has to dismiss it.
    pub duration_ms: Millis,
    pub created_at: Millis,
    pub phase: Phase,
}

impl Notification {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible)
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.phase, Phase::Hidden { .. })
    }

    /// When the entry auto-dismisses, if it ever does.
    #[must_use]
    pub const fn expires_at(&self) -> Option<Millis> {
        if self.duration_ms == 0 {
            None
        } else {
            Some(self.created_at.saturating_add(self.duration_ms))
        }
    }

    fn next_deadline(&self, exit_delay: Millis, enter_delay: Millis) -> Option<Millis> {
        match self.phase {
            Phase::Entering => Some(self.created_at.saturating_add(enter_delay)),
            Phase::Visible => self.expires_at(),
            Phase::Hidden { since } => Some(since.saturating_add(exit_delay)),
        }
    }
}

/// Ordered queue of notifications.
///
/// Shared by every component that reports outcomes; it is passed to them
/// explicitly as `&mut NotificationBus`.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    entries: Vec<Notification>,
    next_id: u64,
    enter_delay_ms: Millis,
    exit_delay_ms: Millis,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_delays(ENTER_DELAY_MS, EXIT_DELAY_MS)
    }

    #[must_use]
    pub const fn with_delays(enter_delay_ms: Millis, exit_delay_ms: Millis) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            enter_delay_ms,
            exit_delay_ms,
        }
    }

    /// Appends a notification and returns its id.
    pub fn raise(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration_ms: Millis,
        now: Millis,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let message = message.into();
        tracing::debug!(id = id.0, kind = ?kind, duration_ms, message = %message, "notification raised");

        self.entries.push(Notification {
            id,
            kind,
            message,
            duration_ms,
            created_at: now,
            phase: Phase::Entering,
        });
        id
    }

    /// Starts the exit phase of a notification.
    ///
    /// The entry stays in the queue, hidden, until `now + exit delay`. Returns
    /// `false` if the id is unknown or already hidden.
    pub fn dismiss(&mut self, id: NotificationId, now: Millis) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if entry.is_hidden() {
            return false;
        }

        entry.phase = Phase::Hidden { since: now };
        tracing::debug!(id = id.0, "notification dismissed");
        true
    }

    /// Applies every phase change due at or before `now`.
    ///
    /// Returns the ids removed by this call, oldest first.
    pub fn advance(&mut self, now: Millis) -> Vec<NotificationId> {
        let enter_delay = self.enter_delay_ms;
        let exit_delay = self.exit_delay_ms;

        for entry in &mut self.entries {
            if entry.phase == Phase::Entering && now >= entry.created_at.saturating_add(enter_delay) {
                entry.phase = Phase::Visible;
            }
            if !entry.is_hidden() {
                if let Some(expiry) = entry.expires_at().filter(|at| now >= *at) {
                    entry.phase = Phase::Hidden { since: expiry };
                }
            }
        }

        let mut removed = Vec::new();
        self.entries.retain(|entry| match entry.phase {
            Phase::Hidden { since } if now >= since.saturating_add(exit_delay) => {
                removed.push(entry.id);
                false
            }
            _ => true,
        });

        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "notifications removed");
        }
        removed
    }

    /// Earliest time at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries
            .iter()
            .filter_map(|n| n.next_deadline(self.exit_delay_ms, self.enter_delay_ms))
            .min()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// All entries in creation order, including entering and hidden ones.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Entries of one channel, in creation order.
    pub fn in_channel(&self, channel: Channel) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(move |n| n.kind.channel() == channel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_becomes_visible_one_tick_after_creation() {
        let mut bus = NotificationBus::new();
        let id = bus.raise(NotificationKind::Info, "hello", 0, 1_000);

        assert_eq!(bus.get(id).unwrap().phase, Phase::Entering);
        bus.advance(1_005);
        assert_eq!(bus.get(id).unwrap().phase, Phase::Entering);
        bus.advance(1_010);
        assert!(bus.get(id).unwrap().is_visible());
    }

    #[test]
    fn auto_dismiss_hides_then_removes() {
        let mut bus = NotificationBus::new();
        let id = bus.raise(NotificationKind::Success, "loaded", 3_000, 0);
        bus.advance(10);

        bus.advance(2_999);
        assert!(bus.get(id).unwrap().is_visible());

        bus.advance(3_000);
        assert_eq!(bus.get(id).unwrap().phase, Phase::Hidden { since: 3_000 });

        assert!(bus.advance(3_299).is_empty());
        assert_eq!(bus.advance(3_300), vec![id]);
        assert!(bus.is_empty());
    }

    #[test]
    fn zero_duration_waits_for_manual_dismissal() {
        let mut bus = NotificationBus::new();
        let id = bus.raise(NotificationKind::Error, "fatal", 0, 0);

        bus.advance(1_000_000);
        assert!(bus.get(id).unwrap().is_visible());

        assert!(bus.dismiss(id, 1_000_000));
        assert!(!bus.dismiss(id, 1_000_001));
        assert_eq!(bus.advance(1_000_300), vec![id]);
    }

    #[test]
    fn early_dismissal_beats_the_timer() {
        let mut bus = NotificationBus::new();
        let id = bus.raise(NotificationKind::Info, "short", 3_000, 0);

        bus.dismiss(id, 500);
        assert_eq!(bus.advance(800), vec![id]);
        assert_eq!(bus.next_deadline(), None);
    }

    #[test]
    fn removal_is_fifo_for_equal_durations() {
        let mut bus = NotificationBus::new();
        let first = bus.raise(NotificationKind::Info, "a", 2_000, 0);
        let second = bus.raise(NotificationKind::Info, "b", 2_000, 0);

        assert_eq!(bus.advance(2_300), vec![first, second]);
    }

    #[test]
    fn next_deadline_tracks_the_earliest_phase_change() {
        let mut bus = NotificationBus::new();
        assert_eq!(bus.next_deadline(), None);

        bus.raise(NotificationKind::Info, "a", 2_000, 100);
        assert_eq!(bus.next_deadline(), Some(110));

        bus.advance(110);
        assert_eq!(bus.next_deadline(), Some(2_100));

        bus.advance(2_100);
        assert_eq!(bus.next_deadline(), Some(2_400));
    }

    #[test]
    fn errors_use_the_alert_channel() {
        let mut bus = NotificationBus::new();
        bus.raise(NotificationKind::Error, "e", 0, 0);
        bus.raise(NotificationKind::Warning, "w", 0, 0);
        bus.raise(NotificationKind::Success, "s", 0, 0);

        assert_eq!(bus.in_channel(Channel::Alert).count(), 1);
        let toasts: Vec<&str> = bus.in_channel(Channel::Toast).map(|n| n.message.as_str()).collect();
        assert_eq!(toasts, vec!["w", "s"]);
    }
}
