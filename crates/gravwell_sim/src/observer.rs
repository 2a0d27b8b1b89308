use bevy::log::debug;
use crossbeam_channel::Sender;
use gravwell_core::DrawableId;
use gravwell_physics::Body;

/// Told about every permanent removal and the replacement that follows it.
/// `on_remove` for the old body always comes right before `on_add` for the new one.
pub trait MembershipObserver: Send + Sync {
    fn on_remove(&mut self, body: &Body);
    fn on_add(&mut self, body: &Body);
}

/// Key returned by `ObserverRegistry::add`, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

/// Registered membership observers, notified in registration order
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(ObserverHandle, Box<dyn MembershipObserver>)>,
    next_handle: u64,
}

impl ObserverRegistry {
    pub fn add(&mut self, observer: Box<dyn MembershipObserver>) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        self.observers.push((handle, observer));
        handle
    }

    /// O(n) in the number of observers; there are only ever a handful
    pub fn remove(&mut self, handle: ObserverHandle) -> Option<Box<dyn MembershipObserver>> {
        let index = self.observers.iter().position(|(h, _)| *h == handle)?;
        Some(self.observers.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_replaced(&mut self, removed: &Body, added: &Body) {
        for (_, observer) in &mut self.observers {
            observer.on_remove(removed);
            observer.on_add(added);
        }
    }

    pub fn notify_removed(&mut self, removed: &Body) {
        for (_, observer) in &mut self.observers {
            observer.on_remove(removed);
        }
    }

    pub fn notify_added(&mut self, added: &Body) {
        for (_, observer) in &mut self.observers {
            observer.on_add(added);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}

/// A membership notification reduced to the drawable it concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Removed(DrawableId),
    Added(DrawableId),
}

/// Forwards notifications over a channel so a renderer can drain them on its
/// own schedule, in order
pub struct ChannelObserver {
    sender: Sender<MembershipChange>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<MembershipChange>) -> Self {
        Self { sender }
    }
}

impl MembershipObserver for ChannelObserver {
    fn on_remove(&mut self, body: &Body) {
        if self.sender.send(MembershipChange::Removed(body.drawable())).is_err() {
            debug!("Membership feed closed, removal of {:?} not sent", body.drawable());
        }
    }

    fn on_add(&mut self, body: &Body) {
        if self.sender.send(MembershipChange::Added(body.drawable())).is_err() {
            debug!("Membership feed closed, addition of {:?} not sent", body.drawable());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use gravwell_physics::DrawableTable;

    #[test]
    fn test_registry_add_remove() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut registry = ObserverRegistry::default();
        let a = registry.add(Box::new(ChannelObserver::new(tx.clone())));
        let b = registry.add(Box::new(ChannelObserver::new(tx)));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        let mut store = DrawableTable::new();
        let old = Body::attractor(&mut store, Vec3::ZERO);
        let new = Body::attractor(&mut store, Vec3::X);
        registry.notify_replaced(&old, &new);
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                MembershipChange::Removed(old.drawable()),
                MembershipChange::Added(new.drawable()),
                MembershipChange::Removed(old.drawable()),
                MembershipChange::Added(new.drawable()),
            ]
        );

        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        registry.notify_added(&new);
        registry.notify_removed(&old);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                MembershipChange::Added(new.drawable()),
                MembershipChange::Removed(old.drawable()),
            ]
        );
    }

    #[test]
    fn test_closed_feed_is_tolerated() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut observer = ChannelObserver::new(tx);
        let mut store = DrawableTable::new();
        let body = Body::attractor(&mut store, Vec3::ZERO);
        observer.on_remove(&body);
        observer.on_add(&body);
    }
}
