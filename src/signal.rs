//! In-process publish/subscribe bus used to coordinate components that hold no
//! reference to each other: opening a modal mounted elsewhere in the tree, or
//! telling a feed to re-fetch after a mutation.

use crate::modal::ModalKind;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

const DEFAULT_CAPACITY: usize = 64;

/// Feeds that can be asked to re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Developers,
    Projects,
    Stories,
    Friends,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    OpenModal(ModalKind),
    Refresh(Resource),
}

#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<Signal>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Delivers `signal` to every live subscriber and returns how many there
    /// were.
    pub fn publish(&self, signal: Signal) -> usize {
        match self.tx.send(signal.clone()) {
            Ok(count) => {
                tracing::debug!(?signal, subscribers = count, "signal published");
                count
            }
            Err(_) => {
                tracing::debug!(?signal, "signal published with no subscribers");
                0
            }
        }
    }

    pub fn open_modal(&self, kind: ModalKind) -> usize {
        self.publish(Signal::OpenModal(kind))
    }

    pub fn refresh(&self, resource: Resource) -> usize {
        self.publish(Signal::Refresh(resource))
    }

    /// Subscribes to signals published from now on. Dropping the returned
    /// handle unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<Signal>,
}

impl Subscription {
    /// Returns every signal received since the last call without blocking.
    pub fn drain(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(signal) => signals.push(signal),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "signal subscriber lagged; skipping missed signals");
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::{Resource, Signal, SignalBus};
    use crate::modal::ModalKind;

    #[test]
    fn every_subscriber_observes_a_broadcast() {
        let bus = SignalBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        assert_eq!(bus.open_modal(ModalKind::Login), 2);

        assert_eq!(first.drain(), vec![Signal::OpenModal(ModalKind::Login)]);
        assert_eq!(second.drain(), vec![Signal::OpenModal(ModalKind::Login)]);
        assert!(first.drain().is_empty());
    }

    #[test]
    fn dropping_a_subscription_unsubscribes() {
        let bus = SignalBus::default();
        let subscription = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.refresh(Resource::Stories), 0);
    }

    #[test]
    fn late_subscribers_miss_earlier_signals() {
        let bus = SignalBus::default();
        bus.refresh(Resource::Projects);

        let mut late = bus.subscribe();
        assert!(late.drain().is_empty());
    }

    #[test]
    fn lagged_subscriber_keeps_the_newest_signals() {
        let bus = SignalBus::new(2);
        let mut subscription = bus.subscribe();

        bus.refresh(Resource::Developers);
        bus.refresh(Resource::Projects);
        bus.refresh(Resource::Stories);

        assert_eq!(
            subscription.drain(),
            vec![
                Signal::Refresh(Resource::Projects),
                Signal::Refresh(Resource::Stories)
            ]
        );
    }
}
