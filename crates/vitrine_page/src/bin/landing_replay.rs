//! # Landing Replay
//!
//! Drives a mounted landing page through a scripted visit and prints what
//! the renderer would have been told.
//!
//! Usage: landing_replay [config.toml] [--verbose]

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use vitrine_motion::{ElementBounds, ElementId, IntersectionEntry};
use vitrine_page::{LandingConfig, LandingPage, MemoryClipboard, PageEvent, PageHost};

const FRAME: Duration = Duration::from_nanos(16_666_667);
const VIEWPORT_HEIGHT: f32 = 900.0;
const DOCUMENT_HEIGHT: f32 = 5400.0;
const SECONDS: usize = 8;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = args.iter().find(|a| !a.starts_with("--"));

    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         VITRINE LANDING REPLAY                                   ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = match config_path {
        Some(path) => match LandingConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(err) => {
                println!("Error: {err}");
                std::process::exit(1);
            }
        },
        None => LandingConfig::default(),
    };

    let host = PageHost::new(&config.motion.ticker, VIEWPORT_HEIGHT);
    let mut page = match LandingPage::mount(&host, &config, Box::new(MemoryClipboard::default())) {
        Ok(page) => page,
        Err(err) => {
            println!("Error: could not mount page: {err}");
            std::process::exit(1);
        }
    };
    let events = page.events();

    let headline = [ElementId(1), ElementId(2)];
    for (i, element) in headline.iter().enumerate() {
        page.add_text_reveal(*element, Duration::from_millis(150 * i as u64));
    }
    let credentials = [ElementId(10), ElementId(11), ElementId(12), ElementId(13)];
    page.add_staggered(&credentials);
    let hero_image = page.add_parallax(ElementBounds::new(1400.0, 700.0));

    let total_frames = SECONDS * 60;
    let mut scroll_y = 0.0_f32;
    let mut applied_scrolls = 0usize;
    for frame in 0..total_frames {
        let t = frame as f32 / 60.0;
        host.pointer_move(640.0 + 200.0 * t.cos(), 450.0 + 120.0 * t.sin(), (t * 1000.0) as i64);

        // Read for three seconds, scroll down, then flick back up.
        if (180..300).contains(&frame) {
            scroll_y += 12.0;
            host.scroll_to(scroll_y);
        } else if frame == 300 {
            scroll_y -= 40.0;
            host.scroll_to(scroll_y);
        }
        if frame == 200 {
            for element in headline.into_iter().chain(credentials) {
                host.intersect(IntersectionEntry {
                    element,
                    intersection_ratio: 0.6,
                    is_intersecting: true,
                });
            }
        }
        if frame == 320 {
            if let Err(err) = page.copy_email() {
                println!("copy failed: {err}");
            }
        }
        if frame == 360 {
            page.scroll_to_footer(scroll_y, DOCUMENT_HEIGHT);
        }

        host.frame(FRAME);
        let snapshot = page.frame();
        if let Some(y) = snapshot.scroll_to {
            scroll_y = y;
            host.scroll_to(y);
            applied_scrolls += 1;
        }

        if verbose && frame % 60 == 0 {
            println!(
                "  t={:>4.1}s ring=({:>6.1},{:>6.1}) nav={:>6.1}% preloader={:?} marquee={:>6.2}%",
                t,
                snapshot.cursor.filtered.x,
                snapshot.cursor.filtered.y,
                snapshot.nav_offset_percent,
                snapshot.preloader.phase,
                snapshot.marquee_offset_percent,
            );
        }
    }

    let last = page.frame();
    let stats = host.ticker.stats();
    let log = events.drain();

    println!();
    println!("┌─ SESSION ────────────────────────────────────────────────────────┐");
    println!("│ Frames:             {}", stats.frames);
    println!("│ Fixed steps:        {} ({} dropped)", stats.steps, stats.dropped_steps);
    println!("│ Final scroll:       {scroll_y:.0}px ({applied_scrolls} animated offsets)");
    println!("│ Cursor ring:        ({:.1}, {:.1})", last.cursor.filtered.x, last.cursor.filtered.y);
    println!("│ Navigation:         {:?}", page.nav_visibility());
    println!("│ Preloader:          {:?}", last.preloader.phase);
    println!("│ Hero parallax:      {}", last.parallax[hero_image]);
    println!("│ Copied flag:        {}", last.copied);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("Events ({}):", log.len());
    for event in &log {
        match event {
            PageEvent::Revealed { element, delay } => {
                println!("  - revealed {element} after {}ms", delay.as_millis());
            }
            other => println!("  - {other:?}"),
        }
    }

    page.unmount();
    println!();
    println!("✓ Page unmounted, ticker idle: {}", host.ticker.is_idle());
}
