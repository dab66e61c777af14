//! Integration test for a full landing page visit.

use std::time::Duration;

use vitrine_motion::{ElementBounds, ElementId, IntersectionEntry, NavVisibility, Vec2};
use vitrine_page::{
    LandingConfig, LandingPage, MemoryClipboard, PageEvent, PageHost, PreloaderPhase,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn run(host: &PageHost, frames: usize) {
    for _ in 0..frames {
        host.frame(FRAME);
    }
}

fn mount_with(config: &LandingConfig) -> (PageHost, LandingPage) {
    let host = PageHost::new(&config.motion.ticker, 800.0);
    let page = LandingPage::mount(&host, config, Box::new(MemoryClipboard::default())).unwrap();
    (host, page)
}

#[test]
fn test_visit_from_preloader_to_footer() {
    let (host, mut page) = mount_with(&LandingConfig::default());
    let events = page.events();

    // Preloader holds for two seconds, then slides out in 0.8s.
    run(&host, 110);
    assert_eq!(page.frame().preloader.phase, PreloaderPhase::Showing);
    run(&host, 120);
    let frame = page.frame();
    assert_eq!(frame.preloader.phase, PreloaderPhase::Done);
    assert_eq!(frame.preloader.offset_percent, -100.0);

    // Cursor: dot is immediate, ring catches up within 2 seconds.
    host.pointer_move(100.0, 100.0, 1);
    assert_eq!(page.frame().cursor.raw, Vec2::new(100.0, 100.0));
    run(&host, 120);
    let ring = page.frame().cursor.filtered;
    assert!((ring.x - 100.0).abs() <= 1.0 && (ring.y - 100.0).abs() <= 1.0, "{ring:?}");

    // Navigation hides past the threshold, shows on any upward scroll.
    for y in [0.0, 50.0, 100.0, 160.0] {
        host.scroll_to(y);
    }
    assert_eq!(page.nav_visibility(), NavVisibility::Hidden);
    host.scroll_to(140.0);
    assert_eq!(page.nav_visibility(), NavVisibility::Visible);

    page.copy_email().unwrap();
    assert!(page.scroll_to_footer(140.0, 4000.0));
    run(&host, 70);
    assert_eq!(page.frame().scroll_to, None);

    let log = events.drain();
    let preloader: Vec<PreloaderPhase> = log
        .iter()
        .filter_map(|e| match e {
            PageEvent::Preloader(phase) => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(preloader, vec![PreloaderPhase::Exiting, PreloaderPhase::Done]);
    assert!(log.contains(&PageEvent::Navigation(NavVisibility::Hidden)));
    assert!(log.contains(&PageEvent::EmailCopied));
    assert!(log.contains(&PageEvent::ScrollStarted { target: 3200.0 }));
}

#[test]
fn test_reveals_fire_once_per_element() {
    let (host, page) = mount_with(&LandingConfig::default());
    let events = page.events();
    page.add_staggered(&[ElementId(10), ElementId(11)]);

    for _ in 0..3 {
        for id in [10, 11] {
            host.intersect(IntersectionEntry {
                element: ElementId(id),
                intersection_ratio: 1.0,
                is_intersecting: true,
            });
            host.intersect(IntersectionEntry {
                element: ElementId(id),
                intersection_ratio: 0.0,
                is_intersecting: false,
            });
        }
    }
    run(&host, 90);

    let revealed = events
        .drain()
        .into_iter()
        .filter(|e| matches!(e, PageEvent::Revealed { .. }))
        .count();
    assert_eq!(revealed, 2);
    assert!(page
        .frame()
        .list
        .iter()
        .all(|i| i.revealed && i.x_px == 0.0 && i.opacity == 1.0));
}

#[test]
fn test_footer_scroll_yields_to_user() {
    let (host, page) = mount_with(&LandingConfig::default());
    let mut applied = 0;
    assert!(page.scroll_to_footer(0.0, 4000.0));
    for _ in 0..20 {
        host.frame(FRAME);
        if let Some(y) = page.frame().scroll_to {
            host.scroll_to(y);
            applied += 1;
        }
    }
    assert_eq!(applied, 20);

    // Wheel back to the top mid-animation.
    host.scroll_to(0.0);
    run(&host, 60);
    assert_eq!(page.frame().scroll_to, None);
}

#[test]
fn test_config_file_drives_page() {
    let path = std::env::temp_dir().join(format!("vitrine_page_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        [nav]
        threshold_px = 40.0

        [page]
        preloader_delay_ms = 500
        marquee_period_s = 10.0
        "#,
    )
    .unwrap();
    let config = LandingConfig::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let (host, page) = mount_with(&config);
    host.scroll_to(50.0);
    assert_eq!(page.nav_visibility(), NavVisibility::Hidden);

    run(&host, 60);
    let frame = page.frame();
    assert_ne!(frame.preloader.phase, PreloaderPhase::Showing);
    assert!((frame.marquee_offset_percent - -5.0).abs() < 0.1);
}

#[test]
fn test_dropping_page_releases_host() {
    let (host, mut page) = mount_with(&LandingConfig::default());
    page.add_parallax(ElementBounds::new(1200.0, 600.0));
    host.pointer_move(10.0, 10.0, 0);
    run(&host, 5);

    drop(page);
    assert_eq!(host.pointer.listener_count(), 0);
    assert_eq!(host.scroll.listener_count(), 0);
    assert_eq!(host.intersections.listener_count(), 0);
    assert!(host.ticker.is_idle());
}
