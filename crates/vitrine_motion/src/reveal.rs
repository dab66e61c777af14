//! # Reveal On Scroll
//!
//! Fire-once visibility trigger.
//!
//! ```text
//!   observe(el) ──> PENDING ──first visible──> REVEALED (event fires once)
//!                      │                          │
//!                 unobserve(el)             later visibility changes
//!                      ▼                          ▼
//!                  RELEASED                    ignored
//! ```
//!
//! Once an element reveals, only its boolean is kept. Options and any other
//! per-element bookkeeping are dropped with the pending entry.
//!
//! A host without an intersection capability gets FAIL-OPEN behaviour:
//! every observed element reveals immediately instead of never.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::RevealConfig;
use crate::geometry::Rect;
use crate::signal::{EventDriven, Signal, Subscription};

/// Host identifier of an observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-element observation options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible, in `[0, 1]`.
    pub threshold_ratio: f32,
    /// Pixels added around the viewport (negative shrinks it).
    pub root_margin_px: f32,
    /// Delay the renderer should wait before starting the transition.
    pub delay: Duration,
}

impl RevealOptions {
    /// Options from configured defaults, without delay.
    #[must_use]
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            threshold_ratio: config.threshold_ratio,
            root_margin_px: config.root_margin_px,
            delay: Duration::ZERO,
        }
    }

    /// Same options with a transition delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}

/// One intersection notification from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Element the notification is about.
    pub element: ElementId,
    /// Visible fraction of the element, in `[0, 1]`.
    pub intersection_ratio: f32,
    /// Whether the element touches the (margin-adjusted) viewport.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Computes an entry from layout rectangles.
    #[must_use]
    pub fn measure(element: ElementId, bounds: Rect, viewport: Rect, root_margin_px: f32) -> Self {
        match bounds.visible_ratio(&viewport.expand(root_margin_px)) {
            Some(ratio) => Self {
                element,
                intersection_ratio: ratio,
                is_intersecting: true,
            },
            None => Self {
                element,
                intersection_ratio: 0.0,
                is_intersecting: false,
            },
        }
    }
}

/// Whether the host can deliver intersection notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverSupport {
    /// Notifications arrive through [`ViewportRevealTrigger::on_intersection`].
    #[default]
    Native,
    /// No notifications will ever arrive; reveal everything immediately.
    Unavailable,
}

/// Reveal bookkeeping for one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    /// True once the element has revealed. Never reverts.
    pub has_revealed: bool,
}

/// Fired once per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealEvent {
    /// Element that became visible.
    pub element: ElementId,
    /// Transition delay requested at observe time.
    pub delay: Duration,
}

/// Result of [`ViewportRevealTrigger::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// Now waiting for the element's first visibility.
    Watching,
    /// Already waiting; the call changed nothing.
    AlreadyWatching,
    /// Already revealed; the call changed nothing.
    AlreadyRevealed,
    /// The host has no observer capability, so the element revealed at once.
    RevealedImmediately,
}

struct RevealRegistry {
    support: ObserverSupport,
    pending: HashMap<ElementId, RevealOptions>,
    revealed: HashSet<ElementId>,
}

#[derive(Clone)]
struct RevealCore {
    state: Arc<Mutex<RevealRegistry>>,
    events: Signal<RevealEvent>,
}

impl RevealCore {
    fn on_intersection(&self, entry: &IntersectionEntry) -> bool {
        let event = {
            let mut state = self.state.lock();
            let Some(options) = state.pending.get(&entry.element).copied() else {
                return false;
            };
            let visible = entry.is_intersecting
                && entry.intersection_ratio.is_finite()
                && entry.intersection_ratio >= options.threshold_ratio;
            if !visible {
                return false;
            }
            state.pending.remove(&entry.element);
            state.revealed.insert(entry.element);
            RevealEvent {
                element: entry.element,
                delay: options.delay,
            }
        };
        tracing::debug!(element = %event.element, "element revealed");
        self.events.emit(&event);
        true
    }
}

/// Watches elements and fires a one-shot event on first visibility.
pub struct ViewportRevealTrigger {
    core: RevealCore,
    input: Option<Subscription>,
}

impl ViewportRevealTrigger {
    /// Creates a trigger for a host with the given capability.
    #[must_use]
    pub fn new(support: ObserverSupport) -> Self {
        if support == ObserverSupport::Unavailable {
            tracing::warn!("no intersection observer, reveals fail open");
        }
        Self {
            core: RevealCore {
                state: Arc::new(Mutex::new(RevealRegistry {
                    support,
                    pending: HashMap::new(),
                    revealed: HashSet::new(),
                })),
                events: Signal::new(),
            },
            input: None,
        }
    }

    /// Starts watching `element`.
    pub fn observe(&self, element: ElementId, options: RevealOptions) -> ObserveOutcome {
        let event = {
            let mut state = self.core.state.lock();
            if state.revealed.contains(&element) {
                return ObserveOutcome::AlreadyRevealed;
            }
            if state.pending.contains_key(&element) {
                return ObserveOutcome::AlreadyWatching;
            }
            if state.support == ObserverSupport::Native {
                state.pending.insert(element, options);
                tracing::debug!(element = %element, "element observed");
                return ObserveOutcome::Watching;
            }
            state.revealed.insert(element);
            RevealEvent {
                element,
                delay: options.delay,
            }
        };
        tracing::debug!(element = %element, "element revealed without observer");
        self.core.events.emit(&event);
        ObserveOutcome::RevealedImmediately
    }

    /// Stops watching an element that has not revealed yet.
    ///
    /// Returns false when it was not pending.
    pub fn unobserve(&self, element: ElementId) -> bool {
        let released = self.core.state.lock().pending.remove(&element).is_some();
        if released {
            tracing::debug!(element = %element, "element released before reveal");
        }
        released
    }

    /// Feeds one intersection notification; true if it revealed the element.
    pub fn on_intersection(&self, entry: &IntersectionEntry) -> bool {
        self.core.on_intersection(entry)
    }

    /// Measures `bounds` against `viewport` with the element's own root
    /// margin and feeds the result; true if it revealed the element.
    pub fn check_bounds(&self, element: ElementId, bounds: Rect, viewport: Rect) -> bool {
        let margin = match self.core.state.lock().pending.get(&element) {
            Some(options) => options.root_margin_px,
            None => return false,
        };
        let entry = IntersectionEntry::measure(element, bounds, viewport, margin);
        self.core.on_intersection(&entry)
    }

    /// Reveal state of an element; unknown elements have not revealed.
    #[must_use]
    pub fn reveal_state(&self, element: ElementId) -> RevealState {
        RevealState {
            has_revealed: self.core.state.lock().revealed.contains(&element),
        }
    }

    /// True while the element is waiting for visibility.
    #[must_use]
    pub fn is_pending(&self, element: ElementId) -> bool {
        self.core.state.lock().pending.contains_key(&element)
    }

    /// Elements still waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.core.state.lock().pending.len()
    }

    /// Observes reveal events.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&RevealEvent) + Send + 'static,
    {
        self.core.events.subscribe(callback)
    }
}

impl Default for ViewportRevealTrigger {
    fn default() -> Self {
        Self::new(ObserverSupport::Native)
    }
}

impl EventDriven for ViewportRevealTrigger {
    type Input = IntersectionEntry;

    fn start(&mut self, source: &Signal<IntersectionEntry>) {
        if self.input.is_some() {
            return;
        }
        let core = self.core.clone();
        self.input = Some(source.subscribe(move |entry: &IntersectionEntry| {
            core.on_intersection(entry);
        }));
    }

    fn stop(&mut self) {
        if let Some(mut input) = self.input.take() {
            input.unsubscribe();
        }
    }

    fn is_running(&self) -> bool {
        self.input.is_some()
    }
}
