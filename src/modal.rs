use crate::signal::{Signal, SignalBus, Subscription};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Login,
    Register,
    AddProject,
    ShareStory,
}

impl ModalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::AddProject => "add-project",
            Self::ShareStory => "share-story",
        }
    }
}

/// The dialog a coordinator currently wants shown. `None` means closed, so an
/// open request always names a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalRequest {
    kind: Option<ModalKind>,
}

impl ModalRequest {
    pub fn kind(&self) -> Option<ModalKind> {
        self.kind
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.kind.is_some()
    }
}

/// One mounted view of the modal request state. Every coordinator listens on
/// the bus, so a broadcast open request reaches hosts that share no parent
/// with the requester.
#[derive(Debug)]
pub struct ModalCoordinator {
    request: ModalRequest,
    bus: SignalBus,
    subscription: Subscription,
    switch_delay: Duration,
    pending_switch: Option<(ModalKind, Instant)>,
}

impl ModalCoordinator {
    pub fn new(bus: &SignalBus, switch_delay: Duration) -> Self {
        Self {
            request: ModalRequest::default(),
            bus: bus.clone(),
            subscription: bus.subscribe(),
            switch_delay,
            pending_switch: None,
        }
    }

    pub fn request(&self) -> ModalRequest {
        self.request
    }

    pub fn is_showing(&self, kind: ModalKind) -> bool {
        self.request.kind == Some(kind)
    }

    pub fn open(&mut self, kind: ModalKind) {
        tracing::debug!(kind = kind.as_str(), "modal opened");
        self.request.kind = Some(kind);
    }

    pub fn close(&mut self) {
        self.request.kind = None;
    }

    /// Closes the current dialog and, once the switch delay has elapsed,
    /// broadcasts an open request for `kind` (see [`Self::poll`]).
    pub fn switch_to(&mut self, kind: ModalKind, now: Instant) {
        self.close();
        self.pending_switch = Some((kind, now + self.switch_delay));
    }

    pub fn has_pending_switch(&self) -> bool {
        self.pending_switch.is_some()
    }

    /// Fires a due switch and applies every open request seen on the bus.
    /// Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        if let Some((kind, due)) = self.pending_switch {
            if now >= due {
                self.pending_switch = None;
                self.bus.open_modal(kind);
            }
        }

        for signal in self.subscription.drain() {
            if let Signal::OpenModal(kind) = signal {
                self.open(kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ModalCoordinator, ModalKind};
    use crate::signal::{Resource, SignalBus};
    use std::time::{Duration, Instant};

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn open_then_close_leaves_the_request_closed() {
        let bus = SignalBus::default();
        let mut modal = ModalCoordinator::new(&bus, DELAY);

        modal.open(ModalKind::Login);
        assert!(modal.request().is_open());
        assert_eq!(modal.request().kind(), Some(ModalKind::Login));

        modal.close();
        assert!(!modal.request().is_open());
        assert_eq!(modal.request().kind(), None);
    }

    #[test]
    fn broadcast_opens_every_mounted_coordinator() {
        let bus = SignalBus::default();
        let mut root = ModalCoordinator::new(&bus, DELAY);
        let mut dashboard = ModalCoordinator::new(&bus, DELAY);

        bus.open_modal(ModalKind::Register);
        let now = Instant::now();
        root.poll(now);
        dashboard.poll(now);

        assert!(root.is_showing(ModalKind::Register));
        assert!(dashboard.is_showing(ModalKind::Register));
    }

    #[test]
    fn refresh_signals_do_not_touch_modal_state() {
        let bus = SignalBus::default();
        let mut modal = ModalCoordinator::new(&bus, DELAY);

        bus.refresh(Resource::Projects);
        modal.poll(Instant::now());

        assert!(!modal.request().is_open());
    }

    #[test]
    fn switch_closes_first_and_reopens_after_the_delay() {
        let bus = SignalBus::default();
        let mut modal = ModalCoordinator::new(&bus, DELAY);
        let start = Instant::now();

        modal.open(ModalKind::Login);
        modal.switch_to(ModalKind::Register, start);
        assert!(!modal.request().is_open());

        modal.poll(start + Duration::from_millis(50));
        assert!(!modal.request().is_open());
        assert!(modal.has_pending_switch());

        modal.poll(start + DELAY);
        assert!(modal.is_showing(ModalKind::Register));
        assert!(!modal.has_pending_switch());
    }

    #[test]
    fn dropping_a_coordinator_releases_its_subscription() {
        let bus = SignalBus::default();
        let modal = ModalCoordinator::new(&bus, DELAY);
        assert_eq!(bus.subscriber_count(), 1);

        drop(modal);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
