//! # Page Events
//!
//! One-off happenings the host may want to react to outside the per-frame
//! snapshot: analytics, focus management, accessibility announcements.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ LandingPage │─────>│  bounded    │─────>│    Host     │
//! │ (callbacks) │      │  channel    │      │ (per frame) │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Sending never blocks the event thread; a full channel drops the event.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use vitrine_motion::{ElementId, NavVisibility};

use crate::preloader::PreloaderPhase;

/// Events emitted by a mounted page.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// The page finished mounting.
    Mounted,
    /// The preloader moved to a new phase.
    Preloader(PreloaderPhase),
    /// The navigation bar slid in or out.
    Navigation(NavVisibility),
    /// An element became visible for the first time.
    Revealed {
        /// Element that became visible.
        element: ElementId,
        /// Delay before its entrance transition starts.
        delay: Duration,
    },
    /// The contact address was copied.
    EmailCopied,
    /// The clipboard rejected the contact address.
    EmailCopyFailed {
        /// Host-reported reason.
        reason: String,
    },
    /// The "copied" confirmation expired.
    CopyFeedbackReset,
    /// The mobile menu opened or closed.
    MenuToggled {
        /// New state.
        open: bool,
    },
    /// An animated document scroll started.
    ScrollStarted {
        /// Offset being scrolled to.
        target: f32,
    },
    /// The page was torn down.
    Unmounted,
}

/// Event bus between the page and its host.
///
/// Pre-allocates a bounded channel so a host that stops draining cannot
/// grow memory.
pub struct EventBus {
    sender: Sender<PageEvent>,
    receiver: Receiver<PageEvent>,
}

impl EventBus {
    /// Default channel capacity.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a bus holding at most `capacity` undrained events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender and receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<PageEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: PageEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::debug!(?event, "page event channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<PageEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<PageEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event.
    #[inline]
    pub fn try_recv(&self) -> Option<PageEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// True if any event is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_roundtrip() {
        let (sender, receiver) = EventBus::create_pair(8);

        assert!(sender.send(PageEvent::Mounted));
        assert!(sender.send(PageEvent::MenuToggled { open: true }));
        assert_eq!(receiver.pending_count(), 2);

        let events = receiver.drain();
        assert_eq!(events, vec![PageEvent::Mounted, PageEvent::MenuToggled { open: true }]);
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(1);
        assert!(sender.send(PageEvent::EmailCopied));
        assert!(!sender.send(PageEvent::CopyFeedbackReset));
        assert_eq!(receiver.try_recv(), Some(PageEvent::EmailCopied));
        assert_eq!(receiver.try_recv(), None);
    }

    #[test]
    fn test_disconnected_receiver() {
        let sender = {
            let bus = EventBus::new(4);
            bus.sender()
        };
        assert!(!sender.send(PageEvent::Unmounted));
    }
}
