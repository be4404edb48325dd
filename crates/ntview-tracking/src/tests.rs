//! Reading tracker scenarios against an in-memory page.
//!
//! The page is 800x600 with a 4000px document. The article starts at
//! y=1000 and is 2000px tall, so its middle is at 2000 and its end at 3000.
//! The viewport bottom is `scroll_y + 600`.

use super::*;
use ntview_common::{BoundingRect, ElementId, Event, EventBus, NtviewError, Position, ReaderKind};
use ntview_config::{NtviewConfig, SiteProfile};
use ntview_viewport::fake::FakeSurface;
use ntview_viewport::ManualClock;

fn article_page() -> FakeSurface {
    FakeSurface::new(800.0, 600.0)
        .with_scroll_height(4000.0)
        .with_meta("og:type", "article")
        .with_title("Hoe lees je een artikel?")
        .with_element("article", BoundingRect::from_xywh(0.0, 1000.0, 800.0, 2000.0))
}

fn attach(surface: &FakeSurface) -> (ManualClock, ReadingTracker<ManualClock>) {
    let clock = ManualClock::new();
    let tracker = ReadingTracker::attach(surface, &NtviewConfig::default(), clock.clone())
        .expect("article page");
    (clock, tracker)
}

fn positions(tracker: &mut ReadingTracker<ManualClock>) -> Vec<Position> {
    tracker.drain_events().iter().map(|e| e.position).collect()
}

#[test]
fn non_article_pages_are_not_tracked() {
    let surface = FakeSurface::new(800.0, 600.0).with_meta("og:type", "website");
    let tracker = ReadingTracker::attach(&surface, &NtviewConfig::default(), ManualClock::new());
    assert!(tracker.is_none());

    let surface = FakeSurface::new(800.0, 600.0);
    let tracker = ReadingTracker::attach(&surface, &NtviewConfig::default(), ManualClock::new());
    assert!(tracker.is_none());
}

#[test]
fn disabled_tracking_is_not_attached() {
    let mut config = NtviewConfig::default();
    config.tracking.enabled = false;
    let tracker = ReadingTracker::attach(&article_page(), &config, ManualClock::new());
    assert!(tracker.is_none());
}

#[test]
fn attach_records_article_loaded() {
    let surface = article_page();
    let (_, mut tracker) = attach(&surface);
    let events = tracker.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].position, Position::ArticleLoaded);
    assert_eq!(events[0].kind, ReaderKind::Reading);
    assert_eq!(events[0].article, "Hoe lees je een artikel?");
    assert_eq!(events[0].time, None);
    assert_eq!(&events[0].visit, tracker.visit());
}

#[test]
fn milestones_in_order_with_elapsed_times() {
    let mut surface = article_page();
    let (clock, mut tracker) = attach(&surface);
    tracker.drain_events();

    // Above the article: nothing yet.
    assert_eq!(tracker.evaluate(&surface).unwrap(), 0);

    clock.advance_ms(5_000);
    surface.scroll_to(500.0);
    assert_eq!(tracker.evaluate(&surface).unwrap(), 1);
    let start = tracker.drain_events().remove(0);
    assert_eq!(start.position, Position::ContentStart);
    assert_eq!(start.time, Some(5.0));

    clock.advance_ms(5_250);
    surface.scroll_to(1400.0);
    tracker.evaluate(&surface).unwrap();
    let middle = tracker.drain_events().remove(0);
    assert_eq!(middle.position, Position::ContentMiddle);
    assert_eq!(middle.kind, ReaderKind::Scanner);
    assert_eq!(middle.time, Some(5.25));
    assert_eq!(middle.total, Some(10.25));

    clock.advance_ms(40_000);
    surface.scroll_to(2400.0);
    tracker.evaluate(&surface).unwrap();
    let end = tracker.drain_events().remove(0);
    assert_eq!(end.position, Position::ContentBottom);
    assert_eq!(end.kind, ReaderKind::Reader);
    assert_eq!(end.time, Some(45.25));
    assert_eq!(end.total, Some(50.25));

    clock.advance_ms(1_000);
    surface.scroll_to(3400.0);
    tracker.evaluate(&surface).unwrap();
    let page = tracker.drain_events().remove(0);
    assert_eq!(page.position, Position::PageBottom);
    assert_eq!(page.kind, ReaderKind::Reading);
    assert_eq!(page.time, Some(51.25));
    assert_eq!(page.active, Some(46.25));
    assert_eq!(page.total, None);

    assert!(tracker.is_complete());
}

#[test]
fn each_milestone_is_recorded_once() {
    let mut surface = article_page();
    let (clock, mut tracker) = attach(&surface);
    tracker.drain_events();

    surface.scroll_to(1400.0);
    tracker.evaluate(&surface).unwrap();
    surface.scroll_to(0.0);
    clock.advance_ms(1_000);
    tracker.evaluate(&surface).unwrap();
    surface.scroll_to(1400.0);
    tracker.evaluate(&surface).unwrap();

    assert_eq!(
        positions(&mut tracker),
        vec![Position::ContentStart, Position::ContentMiddle]
    );
}

#[test]
fn jumping_to_the_bottom_records_everything_in_order() {
    let mut surface = article_page();
    let (clock, mut tracker) = attach(&surface);
    tracker.drain_events();

    clock.advance_ms(2_000);
    surface.scroll_to(3400.0);
    assert_eq!(tracker.evaluate(&surface).unwrap(), 4);

    let events = tracker.drain_events();
    let order: Vec<Position> = events.iter().map(|e| e.position).collect();
    assert_eq!(
        order,
        vec![
            Position::ContentStart,
            Position::ContentMiddle,
            Position::ContentBottom,
            Position::PageBottom,
        ]
    );
    // Measured from the content start, which happened in the same evaluation.
    assert_eq!(events[1].time, Some(0.0));
    assert_eq!(events[1].kind, ReaderKind::Scanner);
    assert_eq!(events[3].time, Some(2.0));
    assert_eq!(events[3].active, Some(0.0));
    assert_eq!(tracker.evaluate(&surface).unwrap(), 0);
}

#[test]
fn page_bottom_time_is_measured_from_load() {
    let mut surface = article_page();
    let (clock, mut tracker) = attach(&surface);
    tracker.drain_events();

    clock.advance_ms(5_000);
    surface.scroll_to(500.0);
    tracker.evaluate(&surface).unwrap();

    clock.advance_ms(10_000);
    surface.scroll_to(3400.0);
    tracker.evaluate(&surface).unwrap();

    let events = tracker.drain_events();
    let page = events
        .iter()
        .find(|e| e.position == Position::PageBottom)
        .expect("page bottom recorded");
    assert_eq!(page.time, Some(15.0));
    assert_eq!(page.active, Some(10.0));
    assert!(events
        .iter()
        .filter(|e| e.position != Position::PageBottom)
        .all(|e| e.active.is_none()));
}

#[test]
fn viewport_bottom_exactly_at_article_top_has_not_started() {
    let mut surface = article_page();
    let (_, mut tracker) = attach(&surface);
    surface.scroll_to(400.0);
    tracker.evaluate(&surface).unwrap();
    assert!(!tracker.reached(Position::ContentStart));
    surface.scroll_to(401.0);
    tracker.evaluate(&surface).unwrap();
    assert!(tracker.reached(Position::ContentStart));
}

#[test]
fn polling_waits_for_scrolling_to_settle() {
    let mut surface = article_page();
    let (clock, mut tracker) = attach(&surface);
    tracker.drain_events();

    surface.scroll_to(500.0);
    tracker.on_scroll();
    clock.advance_ms(50);
    assert_eq!(tracker.poll(&surface).unwrap(), 0);
    tracker.on_scroll();
    clock.advance_ms(99);
    assert_eq!(tracker.poll(&surface).unwrap(), 0);
    clock.advance_ms(1);
    assert_eq!(tracker.poll(&surface).unwrap(), 1);
    assert_eq!(tracker.next_deadline(), None);
    assert_eq!(positions(&mut tracker), vec![Position::ContentStart]);
}

#[test]
fn complete_tracker_ignores_scrolling() {
    let mut surface = article_page();
    let (_, mut tracker) = attach(&surface);
    surface.scroll_to(3400.0);
    tracker.evaluate(&surface).unwrap();
    tracker.on_scroll();
    assert_eq!(tracker.next_deadline(), None);
}

#[test]
fn site_profile_chooses_the_article_element() {
    let surface = article_page()
        .with_host("localhost")
        .with_element("blog-post", BoundingRect::from_xywh(0.0, 100.0, 800.0, 300.0));
    let mut config = NtviewConfig::default();
    config.sites.push(SiteProfile {
        host: "localhost".into(),
        article: Some("blog-post".into()),
        ..Default::default()
    });

    let mut tracker = ReadingTracker::attach(&surface, &config, ManualClock::new()).unwrap();
    assert_eq!(tracker.article(), &ElementId::from("blog-post"));
    tracker.evaluate(&surface).unwrap();
    assert!(tracker.reached(Position::ContentBottom));
    assert!(!tracker.reached(Position::PageBottom));
}

#[test]
fn missing_article_element_is_an_error() {
    let mut surface = article_page();
    let (_, mut tracker) = attach(&surface);
    surface.remove("article");
    let err = tracker.evaluate(&surface).unwrap_err();
    assert!(matches!(err, NtviewError::InvalidArgument(_)));
}

#[test]
fn thresholds_come_from_config() {
    let mut surface = article_page();
    let mut config = NtviewConfig::default();
    config.tracking.middle_scanner_secs = 2.0;
    let clock = ManualClock::new();
    let mut tracker = ReadingTracker::attach(&surface, &config, clock.clone()).unwrap();

    surface.scroll_to(500.0);
    tracker.evaluate(&surface).unwrap();
    clock.advance_ms(3_000);
    surface.scroll_to(1400.0);
    tracker.evaluate(&surface).unwrap();

    let middle = tracker
        .drain_events()
        .into_iter()
        .find(|e| e.position == Position::ContentMiddle)
        .unwrap();
    assert_eq!(middle.kind, ReaderKind::Reader);
}

#[test]
fn seconds_round_to_milliseconds() {
    use std::time::Duration;
    assert_eq!(seconds(Duration::from_micros(1_234_567)), 1.235);
    assert_eq!(seconds(Duration::from_millis(15_000)), 15.0);
}

#[test]
fn classify_boundary_is_a_reader() {
    assert_eq!(classify(14.999, 15.0), ReaderKind::Scanner);
    assert_eq!(classify(15.0, 15.0), ReaderKind::Reader);
}

#[tokio::test]
async fn milestones_are_published_on_the_bus() {
    let mut surface = article_page();
    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let (_, tracker) = attach(&surface);
    let mut tracker = tracker.with_events(bus);

    surface.scroll_to(500.0);
    tracker.evaluate(&surface).unwrap();

    let loaded = rx.recv().await.unwrap();
    assert!(matches!(
        loaded,
        Event::Reading(ref e) if e.position == Position::ArticleLoaded
    ));
    let started = rx.recv().await.unwrap();
    let json = serde_json::to_string(&started).unwrap();
    assert!(json.contains("\"position\":\"ContentStart\""));
}
