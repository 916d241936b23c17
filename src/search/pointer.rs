//! Global pointer/focus activation bus
//!
//! Components that need to react to activations outside their own bounds
//! subscribe here. A subscription is a [`ListenerHandle`]; dropping the
//! handle deregisters the listener, so teardown cannot leak it.

use tokio::sync::broadcast;
use tracing::warn;

/// Default number of buffered activations per listener
pub const DEFAULT_BUS_CAPACITY: usize = 32;

/// Kind of activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    Click,
    Focus,
}

/// A pointer or focus activation somewhere in the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub kind: ActivationKind,
    pub x: f64,
    pub y: f64,
}

impl Activation {
    pub fn click(x: f64, y: f64) -> Self {
        Self {
            kind: ActivationKind::Click,
            x,
            y,
        }
    }

    pub fn focus(x: f64, y: f64) -> Self {
        Self {
            kind: ActivationKind::Focus,
            x,
            y,
        }
    }
}

/// Axis-aligned rectangle occupied by a component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside, edges included
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Broadcast bus for window-wide activations
#[derive(Debug, Clone)]
pub struct PointerBus {
    sender: broadcast::Sender<Activation>,
}

impl Default for PointerBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Deliver an activation to every registered listener
    ///
    /// Returns the number of listeners that received it.
    pub fn publish(&self, activation: Activation) -> usize {
        self.sender.send(activation).unwrap_or(0)
    }

    /// Register a listener
    pub fn subscribe(&self) -> ListenerHandle {
        ListenerHandle {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Registered listener; deregisters on drop
#[derive(Debug)]
pub struct ListenerHandle {
    receiver: broadcast::Receiver<Activation>,
}

impl ListenerHandle {
    /// Take every activation delivered since the last drain
    pub fn drain(&mut self) -> Vec<Activation> {
        let mut activations = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(activation) => activations.push(activation),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Activation listener lagged, {} activations skipped", skipped);
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        activations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(10.0, 10.0, 100.0, 40.0);
        assert!(bounds.contains(10.0, 10.0));
        assert!(bounds.contains(110.0, 50.0));
        assert!(bounds.contains(50.0, 30.0));
        assert!(!bounds.contains(9.9, 30.0));
        assert!(!bounds.contains(50.0, 50.1));
    }

    #[test]
    fn test_subscription_lifecycle() {
        let bus = PointerBus::new();
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.publish(Activation::click(0.0, 0.0)), 0);

        let mut handle = bus.subscribe();
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.publish(Activation::click(1.0, 2.0)), 1);
        assert_eq!(handle.drain(), vec![Activation::click(1.0, 2.0)]);
        assert!(handle.drain().is_empty());

        drop(handle);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_lagged_listener_keeps_latest() {
        let bus = PointerBus::with_capacity(2);
        let mut handle = bus.subscribe();
        for i in 0..5 {
            bus.publish(Activation::focus(i as f64, 0.0));
        }
        let drained = handle.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained.last(), Some(&Activation::focus(4.0, 0.0)));
    }
}
