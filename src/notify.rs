use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[cfg(test)]
impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    expires_at: Instant,
}

/// Notifications currently on screen. Each one disappears after the same
/// fixed lifetime.
#[derive(Debug)]
pub struct Toasts {
    ttl: Duration,
    active: Vec<Toast>,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.active.push(Toast {
            notification,
            expires_at: now + self.ttl,
        });
    }

    /// Drops expired toasts and returns the remaining ones, oldest first.
    pub fn visible(&mut self, now: Instant) -> &[Toast] {
        self.active.retain(|toast| toast.expires_at > now);
        &self.active
    }

    /// Time until the next toast expires, so the UI can schedule a repaint.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.active
            .iter()
            .map(|toast| toast.expires_at.saturating_duration_since(now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, Severity, Toasts};
    use std::time::{Duration, Instant};

    #[test]
    fn toasts_expire_after_their_lifetime() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let start = Instant::now();

        toasts.push(Notification::success("Friend request sent!"), start);
        toasts.push(
            Notification::error("Failed to load stories"),
            start + Duration::from_secs(1),
        );

        let visible = toasts.visible(start + Duration::from_secs(3));
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].notification.severity, Severity::Error);

        let visible = toasts.visible(start + Duration::from_secs(4));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.message, "Failed to load stories");

        assert!(toasts.visible(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn next_expiry_reports_the_soonest_toast() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let start = Instant::now();
        assert!(toasts.next_expiry(start).is_none());

        toasts.push(Notification::success("one"), start);
        toasts.push(Notification::success("two"), start + Duration::from_secs(2));

        assert_eq!(
            toasts.next_expiry(start + Duration::from_secs(1)),
            Some(Duration::from_secs(3))
        );
    }
}
