//! # Landing Page
//!
//! Mounts the motion primitives against the page's regions and publishes one
//! [`PageFrame`] per frame for the renderer.
//!
//! ```text
//!  PageHost.pointer ──> PointerFollower ──────────────┐
//!  PageHost.scroll ───> DirectionalScrollController ──┤
//!                  ├──> Parallax (per image) ─────────┤
//!                  └──> viewport + scroll-to takeover ┤
//!  PageHost.intersections ──> ViewportRevealTrigger ──┼──> PageState ──> PageFrame
//!  PageHost.ticker ──> page clock (preloader, tweens, timers)
//! ```
//!
//! Primitives never share state with each other; each one writes only its
//! own slice of the page state from its own callback.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vitrine_motion::{
    CursorPosition, DirectionalScrollController, Easing, ElementBounds, ElementId, EventDriven,
    Length, NavVisibility, Parallax, PointerFollower, Rect, RevealOptions, ScrollSample, Signal,
    Subscription, TickControl, TickHandle, Tween, ViewportRevealTrigger,
};

use crate::ambient::{AmbientScene, AmbientValue, Marquee};
use crate::config::{LandingConfig, PageSettings};
use crate::error::PageResult;
use crate::events::{EventBus, EventReceiver, EventSender, PageEvent};
use crate::feedback::{Clipboard, CopyFeedback};
use crate::host::PageHost;
use crate::menu::{nav_links, MobileMenu, NavLink};
use crate::preloader::{Preloader, PreloaderPhase};
use crate::smooth_scroll::SmoothScroller;
use crate::stagger::ListItemReveal;

/// Navigation bar offset while hidden, in percent of its height.
pub const NAV_HIDDEN_PERCENT: f32 = -120.0;
/// Navigation slide duration in seconds.
pub const NAV_SLIDE_S: f32 = 0.5;
/// Text starts this far below its final position, in percent of its height.
pub const TEXT_HIDDEN_PERCENT: f32 = 100.0;
/// Text reveal duration in seconds.
pub const TEXT_REVEAL_S: f32 = 0.8;

/// Preloader values for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreloaderFrame {
    /// Lifecycle phase.
    pub phase: PreloaderPhase,
    /// Vertical offset in percent (0 = covering the page).
    pub offset_percent: f32,
    /// Progress bar segment width.
    pub bar_px: f32,
}

/// One text block's reveal offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    /// Element being revealed.
    pub element: ElementId,
    /// Vertical offset in percent of its height (0 = in place).
    pub offset_percent: f32,
    /// True once its reveal event fired.
    pub revealed: bool,
}

/// One staggered list entry's entrance values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListItemFrame {
    /// Element being revealed.
    pub element: ElementId,
    /// Horizontal offset in pixels (0 = in place).
    pub x_px: f32,
    /// Opacity (0-1).
    pub opacity: f32,
    /// True once its reveal event fired.
    pub revealed: bool,
}

/// Every bound value for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    /// Page clock.
    pub elapsed: Duration,
    /// Cursor dot (raw) and ring (filtered).
    pub cursor: CursorPosition,
    /// Navigation flag.
    pub nav_hidden: bool,
    /// Navigation bar offset in percent of its height.
    pub nav_offset_percent: f32,
    /// Preloader curtain.
    pub preloader: PreloaderFrame,
    /// Marquee offset in percent of its width.
    pub marquee_offset_percent: f32,
    /// Ambient loop values.
    pub ambient: Vec<AmbientValue>,
    /// Image parallax offsets, in registration order.
    pub parallax: Vec<Length>,
    /// Text reveal offsets, in registration order.
    pub text: Vec<TextFrame>,
    /// Staggered list entries, in registration order.
    pub list: Vec<ListItemFrame>,
    /// Copy confirmation flag.
    pub copied: bool,
    /// Mobile menu flag.
    pub menu_open: bool,
    /// Document offset the host should apply this frame.
    pub scroll_to: Option<f32>,
}

struct TextReveal {
    element: ElementId,
    tween: Tween,
    revealed: bool,
}

/// Mutable page state shared by the primitive callbacks and the page clock.
struct PageState {
    clock: Duration,
    cursor: CursorPosition,
    preloader: Preloader,
    nav_offset: Tween,
    text: Vec<TextReveal>,
    list: Vec<ListItemReveal>,
    copy: CopyFeedback,
    menu: MobileMenu,
    scroller: SmoothScroller,
    scroll_to: Option<f32>,
    /// Latest document sample from the host.
    document: ScrollSample,
}

impl PageState {
    fn new(settings: &PageSettings, document: ScrollSample) -> Self {
        Self {
            clock: Duration::ZERO,
            cursor: CursorPosition::default(),
            preloader: Preloader::from_settings(settings),
            nav_offset: Tween::new(0.0, Easing::NAV).with_duration(NAV_SLIDE_S),
            text: Vec::new(),
            list: Vec::new(),
            copy: CopyFeedback::new(Duration::from_millis(settings.copy_reset_ms)),
            menu: MobileMenu::new(nav_links(&settings.menu_items)),
            scroller: SmoothScroller::new(Duration::from_millis(settings.scroll_to_ms)),
            scroll_to: None,
            document,
        }
    }

    /// One fixed step of page time.
    fn step(&mut self, step: Duration, events: &EventSender) {
        let dt = step.as_secs_f32();
        self.clock += step;
        if let Some(phase) = self.preloader.advance(dt) {
            events.send(PageEvent::Preloader(phase));
        }
        self.nav_offset.update(dt);
        for text in &mut self.text {
            text.tween.update(dt);
        }
        for item in &mut self.list {
            item.step(dt);
        }
        if self.copy.advance(step) {
            events.send(PageEvent::CopyFeedbackReset);
        }
        self.scroll_to = self.scroller.advance(dt);
    }

    fn on_document(&mut self, sample: ScrollSample) {
        self.document = sample;
        if self.scroller.on_document_scroll(sample.scroll_y) {
            self.scroll_to = None;
        }
    }

    fn is_registered(&self, element: ElementId) -> bool {
        self.text.iter().any(|t| t.element == element)
            || self.list.iter().any(|i| i.element() == element)
    }

    fn reveal(&mut self, element: ElementId, delay: Duration) {
        if let Some(text) = self.text.iter_mut().find(|t| t.element == element) {
            text.revealed = true;
            text.tween.set_target_after(0.0, delay.as_secs_f32());
        }
        if let Some(item) = self.list.iter_mut().find(|i| i.element() == element) {
            item.reveal(delay);
        }
    }
}

/// A mounted landing page.
pub struct LandingPage {
    settings: PageSettings,
    state: Arc<Mutex<PageState>>,
    cursor: PointerFollower,
    nav: DirectionalScrollController,
    reveal: ViewportRevealTrigger,
    reveal_options: RevealOptions,
    parallax: Vec<Parallax>,
    marquee: Marquee,
    ambient: AmbientScene,
    clipboard: Box<dyn Clipboard>,
    scroll: Signal<ScrollSample>,
    events: EventSender,
    receiver: EventReceiver,
    subscriptions: Vec<Subscription>,
    clock: Option<TickHandle>,
}

impl LandingPage {
    /// Validates `config` and mounts every primitive against `host`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found; nothing is mounted
    /// in that case.
    pub fn mount(
        host: &PageHost,
        config: &LandingConfig,
        clipboard: Box<dyn Clipboard>,
    ) -> PageResult<Self> {
        config.validate()?;
        let settings = config.page.clone();
        let ambient = AmbientScene::landing()?;
        let (events, receiver) = EventBus::create_pair(EventBus::DEFAULT_CAPACITY);
        let document = ScrollSample::new(0.0, host.viewport_height());
        let state = Arc::new(Mutex::new(PageState::new(&settings, document)));
        let mut subscriptions = Vec::new();

        let sink = Arc::clone(&state);
        subscriptions.push(host.scroll.subscribe(move |sample: &ScrollSample| {
            sink.lock().on_document(*sample);
        }));

        let mut cursor = PointerFollower::new(config.motion.spring, host.ticker.clone());
        let sink = Arc::clone(&state);
        subscriptions.push(cursor.subscribe(move |position| sink.lock().cursor = *position));
        cursor.start(&host.pointer);

        let mut nav = DirectionalScrollController::from_config(&config.motion.nav);
        let sink = Arc::clone(&state);
        let sender = events.clone();
        subscriptions.push(nav.subscribe(move |visibility| {
            let target = if visibility.is_hidden() { NAV_HIDDEN_PERCENT } else { 0.0 };
            sink.lock().nav_offset.set_target(target);
            sender.send(PageEvent::Navigation(*visibility));
        }));
        nav.start(&host.scroll);

        let mut reveal = ViewportRevealTrigger::new(host.observer_support);
        let sink = Arc::clone(&state);
        let sender = events.clone();
        subscriptions.push(reveal.subscribe(move |event| {
            sink.lock().reveal(event.element, event.delay);
            sender.send(PageEvent::Revealed {
                element: event.element,
                delay: event.delay,
            });
        }));
        reveal.start(&host.intersections);

        let step = host.ticker.step_duration();
        let sink = Arc::clone(&state);
        let sender = events.clone();
        let clock = host.ticker.schedule(move |_tick| {
            sink.lock().step(step, &sender);
            TickControl::Continue
        });

        events.send(PageEvent::Mounted);
        tracing::info!(
            preloader_ms = settings.preloader_delay_ms,
            nav_items = settings.nav_items.len(),
            "landing page mounted"
        );

        Ok(Self {
            marquee: Marquee::new(settings.marquee_period_s),
            settings,
            state,
            cursor,
            nav,
            reveal,
            reveal_options: RevealOptions::from_config(&config.motion.reveal),
            parallax: Vec::new(),
            ambient,
            clipboard,
            scroll: host.scroll.clone(),
            events,
            receiver,
            subscriptions,
            clock: Some(clock),
        })
    }

    /// True until [`LandingPage::unmount`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.clock.is_some()
    }

    /// Page settings in effect.
    #[must_use]
    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Receiver for one-off page events.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.receiver.clone()
    }

    /// Desktop navigation links.
    #[must_use]
    pub fn nav_links(&self) -> Vec<NavLink> {
        nav_links(&self.settings.nav_items)
    }

    /// Registers a text block that slides in once visible.
    pub fn add_text_reveal(&self, element: ElementId, delay: Duration) {
        {
            let mut state = self.state.lock();
            if state.is_registered(element) {
                return;
            }
            state.text.push(TextReveal {
                element,
                tween: Tween::new(TEXT_HIDDEN_PERCENT, Easing::EXPO_OUT).with_duration(TEXT_REVEAL_S),
                revealed: false,
            });
        }
        // May reveal synchronously, which locks the state again.
        self.reveal.observe(element, self.reveal_options.with_delay(delay));
    }

    /// Registers a list whose entries slide in one stagger step apart.
    pub fn add_staggered(&self, elements: &[ElementId]) {
        let stagger = Duration::from_millis(self.settings.stagger_ms);
        for (i, element) in elements.iter().enumerate() {
            {
                let mut state = self.state.lock();
                if state.is_registered(*element) {
                    continue;
                }
                state.list.push(ListItemReveal::new(*element));
            }
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            let options = self.reveal_options.with_delay(stagger.saturating_mul(index));
            self.reveal.observe(*element, options);
        }
    }

    /// Feeds layout rectangles for hosts without intersection notifications.
    pub fn check_reveal(&self, element: ElementId, bounds: Rect, viewport: Rect) -> bool {
        self.reveal.check_bounds(element, bounds, viewport)
    }

    /// Registers an image with scroll parallax; returns its index.
    pub fn add_parallax(&mut self, bounds: impl Into<ElementBounds>) -> usize {
        let mut parallax = Parallax::new(bounds);
        let document = self.state.lock().document;
        parallax.mapper().on_scroll(document);
        if self.is_mounted() {
            parallax.mapper_mut().start(&self.scroll);
        }
        self.parallax.push(parallax);
        self.parallax.len() - 1
    }

    /// Copies the contact address and shows the confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::Clipboard`] when the host refuses; the
    /// confirmation stays off.
    pub fn copy_email(&mut self) -> PageResult<()> {
        let result = self
            .state
            .lock()
            .copy
            .copy(self.clipboard.as_mut(), &self.settings.email);
        match &result {
            Ok(()) => self.events.send(PageEvent::EmailCopied),
            Err(err) => self.events.send(PageEvent::EmailCopyFailed {
                reason: err.to_string(),
            }),
        };
        result
    }

    /// Opens or closes the mobile menu; returns the new state.
    pub fn toggle_menu(&self) -> bool {
        let open = self.state.lock().menu.toggle();
        self.events.send(PageEvent::MenuToggled { open });
        open
    }

    /// Follows a mobile menu link, closing the menu.
    pub fn follow_menu_link(&self, index: usize) -> Option<NavLink> {
        let (link, closed) = {
            let mut state = self.state.lock();
            let was_open = state.menu.is_open();
            let link = state.menu.follow(index).cloned();
            (link, was_open && !state.menu.is_open())
        };
        if closed {
            self.events.send(PageEvent::MenuToggled { open: false });
        }
        link
    }

    /// Starts an animated scroll from `current_y` to the bottom of a
    /// document `document_height` tall, at the latest viewport height.
    ///
    /// The animation stops as soon as the document is scrolled anywhere
    /// other than the offsets it hands out.
    pub fn scroll_to_footer(&self, current_y: f32, document_height: f32) -> bool {
        let (started, target) = {
            let mut state = self.state.lock();
            let target = (document_height - state.document.viewport_height).max(0.0);
            (state.scroller.scroll_to(current_y, target), target)
        };
        if started {
            self.events.send(PageEvent::ScrollStarted { target });
        }
        started
    }

    /// Current navigation visibility.
    #[must_use]
    pub fn nav_visibility(&self) -> NavVisibility {
        self.nav.visibility()
    }

    /// Snapshot of every bound value.
    #[must_use]
    pub fn frame(&self) -> PageFrame {
        let state = self.state.lock();
        let seconds = state.clock.as_secs_f32();
        PageFrame {
            elapsed: state.clock,
            cursor: state.cursor,
            nav_hidden: self.nav.is_hidden(),
            nav_offset_percent: state.nav_offset.value(),
            preloader: PreloaderFrame {
                phase: state.preloader.phase(),
                offset_percent: state.preloader.offset_percent(),
                bar_px: state.preloader.bar_px(),
            },
            marquee_offset_percent: self.marquee.offset_percent(seconds),
            ambient: self.ambient.sample(seconds),
            parallax: self.parallax.iter().map(Parallax::offset).collect(),
            text: state
                .text
                .iter()
                .map(|t| TextFrame {
                    element: t.element,
                    offset_percent: t.tween.value(),
                    revealed: t.revealed,
                })
                .collect(),
            list: state
                .list
                .iter()
                .map(|i| ListItemFrame {
                    element: i.element(),
                    x_px: i.x_px(),
                    opacity: i.opacity(),
                    revealed: i.is_revealed(),
                })
                .collect(),
            copied: state.copy.is_copied(),
            menu_open: state.menu.is_open(),
            scroll_to: state.scroll_to,
        }
    }

    /// Tears the page down: every source subscription and frame client is
    /// released. Idempotent.
    pub fn unmount(&mut self) {
        let Some(mut clock) = self.clock.take() else {
            return;
        };
        clock.cancel();
        self.cursor.stop();
        self.nav.stop();
        self.reveal.stop();
        for parallax in &mut self.parallax {
            parallax.mapper_mut().stop();
        }
        self.subscriptions.clear();
        self.events.send(PageEvent::Unmounted);
        tracing::info!("landing page unmounted");
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::MemoryClipboard;
    use crate::stagger::ITEM_OFFSET_PX;
    use vitrine_motion::{IntersectionEntry, TickerConfig};

    const FRAME: Duration = Duration::from_nanos(16_666_667);

    fn mount() -> (PageHost, LandingPage) {
        let host = PageHost::new(&TickerConfig::default(), 800.0);
        let page = LandingPage::mount(
            &host,
            &LandingConfig::default(),
            Box::new(MemoryClipboard::default()),
        )
        .unwrap();
        (host, page)
    }

    fn frames(host: &PageHost, count: usize) {
        for _ in 0..count {
            host.frame(FRAME);
        }
    }

    #[test]
    fn test_mount_emits_and_starts_covered() {
        let (_host, page) = mount();
        assert_eq!(page.events().try_recv(), Some(PageEvent::Mounted));

        let frame = page.frame();
        assert_eq!(frame.preloader.phase, PreloaderPhase::Showing);
        assert_eq!(frame.nav_offset_percent, 0.0);
        assert!(!frame.copied);
        assert!(!frame.menu_open);
    }

    #[test]
    fn test_nav_bar_slides_out_and_back() {
        let (host, page) = mount();
        host.scroll_to(300.0);
        frames(&host, 40);
        assert_eq!(page.frame().nav_offset_percent, NAV_HIDDEN_PERCENT);
        assert!(page.frame().nav_hidden);

        host.scroll_to(290.0);
        frames(&host, 40);
        assert_eq!(page.frame().nav_offset_percent, 0.0);
    }

    #[test]
    fn test_text_reveals_after_its_delay() {
        let (host, page) = mount();
        let element = ElementId(3);
        page.add_text_reveal(element, Duration::from_millis(200));

        host.intersect(IntersectionEntry {
            element,
            intersection_ratio: 0.2,
            is_intersecting: true,
        });
        frames(&host, 6);
        let text = page.frame().text[0];
        assert!(text.revealed);
        assert_eq!(text.offset_percent, TEXT_HIDDEN_PERCENT);

        frames(&host, 60);
        assert_eq!(page.frame().text[0].offset_percent, 0.0);
    }

    #[test]
    fn test_fail_open_reveals_on_registration() {
        let host = PageHost::new(&TickerConfig::default(), 800.0).without_observer();
        let page = LandingPage::mount(
            &host,
            &LandingConfig::default(),
            Box::new(MemoryClipboard::default()),
        )
        .unwrap();
        page.add_text_reveal(ElementId(1), Duration::ZERO);
        assert!(page.frame().text[0].revealed);
    }

    #[test]
    fn test_staggered_delays() {
        let (_host, page) = mount();
        let receiver = page.events();
        receiver.drain();
        page.add_staggered(&[ElementId(1), ElementId(2), ElementId(3)]);
        for id in 1..=3 {
            page.check_reveal(
                ElementId(id),
                Rect::new(0.0, 100.0, 10.0, 10.0),
                Rect::viewport(1280.0, 800.0),
            );
        }

        let delays: Vec<Duration> = receiver
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                PageEvent::Revealed { delay, .. } => Some(delay),
                _ => None,
            })
            .collect();
        assert_eq!(
            delays,
            vec![Duration::ZERO, Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[test]
    fn test_staggered_entries_slide_and_fade() {
        let (host, page) = mount();
        page.add_staggered(&[ElementId(1), ElementId(2)]);
        let first = page.frame().list[0];
        assert_eq!((first.x_px, first.opacity), (ITEM_OFFSET_PX, 0.0));

        for id in [1, 2] {
            host.intersect(IntersectionEntry {
                element: ElementId(id),
                intersection_ratio: 0.5,
                is_intersecting: true,
            });
        }
        frames(&host, 3);
        let list = page.frame().list;
        assert!(list[0].x_px < ITEM_OFFSET_PX && list[0].opacity > 0.0);
        assert_eq!((list[1].x_px, list[1].opacity), (ITEM_OFFSET_PX, 0.0));

        frames(&host, 90);
        let frame = page.frame();
        assert!(frame
            .list
            .iter()
            .all(|i| i.revealed && i.x_px == 0.0 && i.opacity == 1.0));
        assert!(frame.text.is_empty());
    }

    #[test]
    fn test_copy_feedback_resets() {
        let (host, mut page) = mount();
        page.copy_email().unwrap();
        assert!(page.frame().copied);

        frames(&host, 140);
        assert!(page.frame().copied);
        frames(&host, 20);
        assert!(!page.frame().copied);
    }

    #[test]
    fn test_refused_copy_reports() {
        let host = PageHost::new(&TickerConfig::default(), 800.0);
        let mut page = LandingPage::mount(
            &host,
            &LandingConfig::default(),
            Box::new(MemoryClipboard::refusing()),
        )
        .unwrap();
        assert!(page.copy_email().is_err());
        assert!(!page.frame().copied);
        assert!(page
            .events()
            .drain()
            .iter()
            .any(|e| matches!(e, PageEvent::EmailCopyFailed { .. })));
    }

    #[test]
    fn test_parallax_follows_scroll() {
        let (host, mut page) = mount();
        let index = page.add_parallax(ElementBounds::new(1000.0, 400.0));
        assert_eq!(page.frame().parallax[index].value, -10.0);

        host.scroll_to(800.0);
        let middle = page.frame().parallax[index].value;
        assert!(middle > -10.0 && middle < 10.0);

        host.scroll_to(5000.0);
        assert_eq!(page.frame().parallax[index].value, 10.0);
    }

    #[test]
    fn test_scroll_to_footer_offsets() {
        let (host, page) = mount();
        assert!(page.scroll_to_footer(0.0, 4800.0));
        let mut last = None;
        for _ in 0..90 {
            host.frame(FRAME);
            if let Some(y) = page.frame().scroll_to {
                last = Some(y);
            }
        }
        assert_eq!(last, Some(4000.0));
        assert_eq!(page.frame().scroll_to, None);
    }

    #[test]
    fn test_footer_target_follows_resize() {
        let (mut host, page) = mount();
        let events = page.events();
        host.resize(0.0, 1000.0);

        assert!(page.scroll_to_footer(0.0, 4800.0));
        assert!(events
            .drain()
            .contains(&PageEvent::ScrollStarted { target: 3800.0 }));
        let mut last = None;
        for _ in 0..90 {
            host.frame(FRAME);
            last = page.frame().scroll_to.or(last);
        }
        assert_eq!(last, Some(3800.0));
    }

    #[test]
    fn test_parallax_seeded_from_latest_sample() {
        let (mut host, mut page) = mount();
        host.resize(600.0, 1200.0);
        let index = page.add_parallax(ElementBounds::new(1000.0, 400.0));

        let expected = Parallax::new(ElementBounds::new(1000.0, 400.0));
        expected.mapper().on_scroll(ScrollSample::new(600.0, 1200.0));
        assert_eq!(page.frame().parallax[index], expected.offset());
    }

    #[test]
    fn test_manual_scroll_stops_footer_scroll() {
        let (host, page) = mount();
        assert!(page.scroll_to_footer(0.0, 4800.0));
        for _ in 0..10 {
            host.frame(FRAME);
            if let Some(y) = page.frame().scroll_to {
                host.scroll_to(y);
            }
        }
        assert!(page.frame().scroll_to.is_some());

        host.scroll_to(0.0);
        assert_eq!(page.frame().scroll_to, None);
        frames(&host, 5);
        assert_eq!(page.frame().scroll_to, None);
    }

    #[test]
    fn test_menu_link_closes_menu() {
        let (_host, page) = mount();
        assert!(page.toggle_menu());
        let link = page.follow_menu_link(2).unwrap();
        assert_eq!(link.anchor, "atuacao");
        assert!(!page.frame().menu_open);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let (host, mut page) = mount();
        page.add_parallax(ElementBounds::new(1000.0, 400.0));
        page.unmount();
        page.unmount();

        assert!(!page.is_mounted());
        assert_eq!(host.pointer.listener_count(), 0);
        assert_eq!(host.scroll.listener_count(), 0);
        assert_eq!(host.intersections.listener_count(), 0);
        assert!(host.ticker.is_idle());

        let before = page.frame();
        host.pointer_move(500.0, 500.0, 9);
        host.scroll_to(900.0);
        frames(&host, 10);
        assert_eq!(page.frame(), before);
    }
}
