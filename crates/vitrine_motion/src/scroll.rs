//! # Scroll Progress
//!
//! Normalized progress of an element through the viewport, and the linear
//! maps that turn it into parallax offsets.
//!
//! ## Convention
//!
//! ```text
//!  progress 0.0                          progress 1.0
//!  ┌──────────┐ viewport top             ┌──────────┐ ┌────┐ element bottom
//!  │          │                          │          │ └────┘
//!  │          │                          │          │
//!  └──────────┘ viewport bottom          └──────────┘
//!  ┌────┐       element top
//!  └────┘
//! ```
//!
//! 0 when the element's top edge sits on the viewport's bottom edge, 1 when
//! its bottom edge sits on the viewport's top edge. [`ScrollOffsets`]
//! generalize this as a pair of (element fraction, viewport fraction)
//! crossings.
//!
//! Progress is LAZY: a scroll sample only records the offset. The value is
//! recomputed when somebody asks for it, or eagerly while somebody
//! subscribes.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::Rect;
use crate::signal::{EventDriven, Signal, Subscription};

/// One host scroll or resize notification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSample {
    /// Document scroll offset.
    pub scroll_y: f32,
    /// Current viewport height.
    pub viewport_height: f32,
}

impl ScrollSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            viewport_height,
        }
    }
}

/// A crossing: `target` fraction of the element meets `container` fraction
/// of the viewport (0 = top edge, 1 = bottom edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEdge {
    /// Point on the element.
    pub target: f32,
    /// Point on the viewport.
    pub container: f32,
}

impl ScrollEdge {
    /// Creates a crossing.
    #[must_use]
    pub const fn new(target: f32, container: f32) -> Self {
        Self { target, container }
    }
}

/// The crossings that define progress 0 and progress 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffsets {
    /// Crossing at progress 0.
    pub start: ScrollEdge,
    /// Crossing at progress 1.
    pub end: ScrollEdge,
}

impl ScrollOffsets {
    /// Element top meets viewport bottom, until element bottom meets viewport top.
    pub const ENTER_TO_EXIT: Self = Self {
        start: ScrollEdge::new(0.0, 1.0),
        end: ScrollEdge::new(1.0, 0.0),
    };

    /// Element top meets viewport bottom, until element top meets viewport top.
    pub const ENTER_TO_TOP: Self = Self {
        start: ScrollEdge::new(0.0, 1.0),
        end: ScrollEdge::new(0.0, 0.0),
    };
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self::ENTER_TO_EXIT
    }
}

/// An element's box relative to the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollRegion {
    /// Element top relative to the viewport top.
    pub element_top: f32,
    /// Element height.
    pub element_height: f32,
    /// Viewport height.
    pub viewport_height: f32,
}

impl ScrollRegion {
    /// Progress under the default enter-to-exit convention.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress_with(&ScrollOffsets::ENTER_TO_EXIT)
    }

    /// Progress in `[0, 1]` under `offsets`.
    ///
    /// Malformed geometry (non-finite values, an element without height, an
    /// empty viewport) and degenerate offsets yield 0.
    #[must_use]
    pub fn progress_with(&self, offsets: &ScrollOffsets) -> f32 {
        let Self {
            element_top: top,
            element_height: height,
            viewport_height: viewport,
        } = *self;
        if !(top.is_finite() && height.is_finite() && viewport.is_finite()) {
            return 0.0;
        }
        if height <= 0.0 || viewport <= 0.0 {
            return 0.0;
        }

        // Distance the document must still scroll before the start crossing.
        let until_start = top + offsets.start.target * height - offsets.start.container * viewport;
        let span = (offsets.end.target - offsets.start.target) * height
            - (offsets.end.container - offsets.start.container) * viewport;
        if !span.is_finite() || span <= f32::EPSILON {
            return 0.0;
        }
        let progress = -until_start / span;
        if progress <= 0.0 {
            0.0
        } else {
            progress.min(1.0)
        }
    }
}

/// Linear map of `progress` (clamped to `[0, 1]`) onto `[out_min, out_max]`.
#[must_use]
pub fn map_range(progress: f32, out_min: f32, out_max: f32) -> f32 {
    let t = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
    out_min + (out_max - out_min) * t
}

/// CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Pixels.
    Px,
    /// Percent of the element's own size.
    Percent,
}

/// A value with a CSS unit; displays as `"-10%"` or `"24px"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// Numeric value.
    pub value: f32,
    /// Unit.
    pub unit: Unit,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Px => "px",
            Unit::Percent => "%",
        };
        write!(f, "{}{}", self.value, suffix)
    }
}

/// Output domain for [`map_range`] with a unit attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthRange {
    /// Value at progress 0.
    pub from: f32,
    /// Value at progress 1.
    pub to: f32,
    /// Unit of both ends.
    pub unit: Unit,
}

impl LengthRange {
    /// The page's image parallax: `-10%` to `10%`.
    pub const PARALLAX: Self = Self {
        from: -10.0,
        to: 10.0,
        unit: Unit::Percent,
    };

    /// Maps progress into the range.
    #[must_use]
    pub fn at(&self, progress: f32) -> Length {
        Length {
            value: map_range(progress, self.from, self.to),
            unit: self.unit,
        }
    }
}

/// Document-space bounds of a tracked element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementBounds {
    /// Element top in document coordinates.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

impl ElementBounds {
    /// Creates bounds.
    #[must_use]
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

impl From<Rect> for ElementBounds {
    fn from(rect: Rect) -> Self {
        Self {
            top: rect.y,
            height: rect.height,
        }
    }
}

struct MapperState {
    bounds: Option<ElementBounds>,
    offsets: ScrollOffsets,
    scroll_y: f32,
    viewport_height: f32,
    cached: Option<f32>,
    recomputes: u64,
}

impl MapperState {
    fn region(&self) -> Option<ScrollRegion> {
        self.bounds.map(|b| ScrollRegion {
            element_top: b.top - self.scroll_y,
            element_height: b.height,
            viewport_height: self.viewport_height,
        })
    }

    fn progress(&mut self) -> f32 {
        if let Some(cached) = self.cached {
            return cached;
        }
        let progress = self.region().map_or(0.0, |r| r.progress_with(&self.offsets));
        self.recomputes += 1;
        self.cached = Some(progress);
        progress
    }

    fn record(&mut self, sample: ScrollSample) {
        if sample.scroll_y != self.scroll_y || sample.viewport_height != self.viewport_height {
            self.scroll_y = sample.scroll_y;
            self.viewport_height = sample.viewport_height;
            self.cached = None;
        }
    }
}

#[derive(Clone)]
struct MapperCore {
    state: Arc<Mutex<MapperState>>,
    changes: Signal<f32>,
}

impl MapperCore {
    fn on_scroll(&self, sample: ScrollSample) {
        let changed = {
            let mut state = self.state.lock();
            let before = state.cached;
            state.record(sample);
            if state.cached.is_some() || !self.changes.is_observed() {
                None
            } else {
                let now = state.progress();
                (before != Some(now)).then_some(now)
            }
        };
        if let Some(progress) = changed {
            self.changes.emit(&progress);
        }
    }
}

/// Tracks one element's transit through the viewport.
pub struct ScrollProgressMapper {
    core: MapperCore,
    input: Option<Subscription>,
}

impl ScrollProgressMapper {
    /// Creates a mapper with no element attached.
    #[must_use]
    pub fn new(offsets: ScrollOffsets) -> Self {
        Self {
            core: MapperCore {
                state: Arc::new(Mutex::new(MapperState {
                    bounds: None,
                    offsets,
                    scroll_y: 0.0,
                    viewport_height: 0.0,
                    cached: None,
                    recomputes: 0,
                })),
                changes: Signal::new(),
            },
            input: None,
        }
    }

    /// Registers (or replaces) the tracked element's bounds.
    ///
    /// Returns false when the bounds were already attached unchanged.
    pub fn attach(&self, bounds: impl Into<ElementBounds>) -> bool {
        let bounds = bounds.into();
        let mut state = self.core.state.lock();
        if state.bounds == Some(bounds) {
            return false;
        }
        state.bounds = Some(bounds);
        state.cached = None;
        tracing::debug!(top = bounds.top, height = bounds.height, "scroll element attached");
        true
    }

    /// Forgets the tracked element. Returns false if none was attached.
    pub fn detach(&self) -> bool {
        let mut state = self.core.state.lock();
        state.cached = None;
        state.bounds.take().is_some()
    }

    /// True while an element is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.core.state.lock().bounds.is_some()
    }

    /// Records a scroll/resize sample.
    pub fn on_scroll(&self, sample: ScrollSample) {
        self.core.on_scroll(sample);
    }

    /// Progress for the current scroll offset at `viewport_height`.
    #[must_use]
    pub fn compute_progress(&self, viewport_height: f32) -> f32 {
        let mut state = self.core.state.lock();
        let sample = ScrollSample::new(state.scroll_y, viewport_height);
        state.record(sample);
        state.progress()
    }

    /// Progress for the last recorded sample, recomputed only if stale.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.core.state.lock().progress()
    }

    /// The element's box relative to the viewport, if attached.
    #[must_use]
    pub fn region(&self) -> Option<ScrollRegion> {
        self.core.state.lock().region()
    }

    /// How many times progress was actually computed.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.core.state.lock().recomputes
    }

    /// Maps current progress onto `[out_min, out_max]`.
    #[must_use]
    pub fn map(&self, out_min: f32, out_max: f32) -> f32 {
        map_range(self.progress(), out_min, out_max)
    }

    /// Observes progress changes; while observed, samples compute eagerly.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&f32) + Send + 'static,
    {
        self.core.changes.subscribe(callback)
    }
}

impl Default for ScrollProgressMapper {
    fn default() -> Self {
        Self::new(ScrollOffsets::default())
    }
}

impl EventDriven for ScrollProgressMapper {
    type Input = ScrollSample;

    fn start(&mut self, source: &Signal<ScrollSample>) {
        if self.input.is_some() {
            return;
        }
        let core = self.core.clone();
        self.input = Some(source.subscribe(move |sample: &ScrollSample| core.on_scroll(*sample)));
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

/// A scroll-driven offset: progress mapped through a [`LengthRange`].
pub struct Parallax {
    mapper: ScrollProgressMapper,
    range: LengthRange,
}

impl Parallax {
    /// Parallax for an element with the page's `-10% → 10%` range.
    #[must_use]
    pub fn new(bounds: impl Into<ElementBounds>) -> Self {
        Self::with_range(bounds, LengthRange::PARALLAX)
    }

    /// Parallax with a custom output range.
    #[must_use]
    pub fn with_range(bounds: impl Into<ElementBounds>, range: LengthRange) -> Self {
        let mapper = ScrollProgressMapper::default();
        mapper.attach(bounds);
        Self { mapper, range }
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> Length {
        self.range.at(self.mapper.progress())
    }

    /// The underlying mapper.
    #[must_use]
    pub fn mapper(&self) -> &ScrollProgressMapper {
        &self.mapper
    }

    /// The underlying mapper, for starting and stopping it.
    pub fn mapper_mut(&mut self) -> &mut ScrollProgressMapper {
        &mut self.mapper
    }
}
