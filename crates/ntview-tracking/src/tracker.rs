use std::collections::HashSet;
use std::time::Instant;

use ntview_common::{ElementId, Event, EventBus, Position, ReaderKind, ReadingEvent, Result, VisitId};
use ntview_config::{NtviewConfig, TrackingConfig};
use ntview_viewport::{Clock, Debouncer, Surface, SystemClock};
use tracing::{debug, info};

use crate::milestones::{classify, seconds, PagePosition};

/// Records reading milestones for one article page view.
///
/// Scroll events restart a debounce timer (`tracking.poll_delay_ms`);
/// once it settles the page position is evaluated and any newly reached
/// milestones are recorded. Each milestone is recorded at most once.
pub struct ReadingTracker<C: Clock = SystemClock> {
    clock: C,
    config: TrackingConfig,
    visit: VisitId,
    article: ElementId,
    title: String,
    debouncer: Debouncer,
    loaded_at: Instant,
    started_at: Option<Instant>,
    reached: HashSet<Position>,
    outbox: Vec<ReadingEvent>,
    events: Option<EventBus>,
}

impl<C: Clock> ReadingTracker<C> {
    /// Start tracking if `surface` shows an article page.
    ///
    /// Returns `None` when tracking is disabled or the page-type meta
    /// property does not mark an article. Otherwise the load time is taken
    /// from `clock` and `ArticleLoaded` is recorded.
    pub fn attach<S: Surface + ?Sized>(surface: &S, config: &NtviewConfig, clock: C) -> Option<Self> {
        let tracking = &config.tracking;
        if !tracking.enabled {
            return None;
        }
        let page_type = surface.meta_property(&tracking.page_type_property);
        if page_type.as_deref() != Some(tracking.page_type.as_str()) {
            debug!(page_type = ?page_type, "not an article page, reading tracker not attached");
            return None;
        }

        let host = surface.host();
        let loaded_at = clock.now();
        let mut tracker = Self {
            clock,
            config: tracking.clone(),
            visit: VisitId::new(),
            article: config.article_for_host(host.as_deref()),
            title: surface.title(),
            debouncer: Debouncer::new(tracking.poll_delay()),
            loaded_at,
            started_at: None,
            reached: HashSet::new(),
            outbox: Vec::new(),
            events: None,
        };
        tracker.record(Position::ArticleLoaded, ReaderKind::Reading, None, None, None);
        Some(tracker)
    }

    /// Publish every milestone on `bus`. Milestones recorded before the bus
    /// was attached are published right away.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        for event in &self.outbox {
            bus.publish(Event::Reading(event.clone()));
        }
        self.events = Some(bus);
        self
    }

    pub fn visit(&self) -> &VisitId {
        &self.visit
    }

    pub fn article(&self) -> &ElementId {
        &self.article
    }

    pub fn reached(&self, position: Position) -> bool {
        self.reached.contains(&position)
    }

    /// Every milestone has been recorded; further evaluation is a no-op.
    pub fn is_complete(&self) -> bool {
        [
            Position::ContentStart,
            Position::ContentMiddle,
            Position::ContentBottom,
            Position::PageBottom,
        ]
        .iter()
        .all(|p| self.reached(*p))
    }

    pub fn on_scroll(&mut self) {
        if !self.is_complete() {
            self.debouncer.trigger(self.clock.now());
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Evaluate the page position if scrolling has settled. Returns the
    /// number of milestones recorded.
    pub fn poll<S: Surface + ?Sized>(&mut self, surface: &S) -> Result<usize> {
        if self.debouncer.poll(self.clock.now()) {
            self.evaluate(surface)
        } else {
            Ok(0)
        }
    }

    /// Evaluate the page position now. Returns the number of milestones
    /// recorded. Fails if the article element cannot be measured.
    pub fn evaluate<S: Surface + ?Sized>(&mut self, surface: &S) -> Result<usize> {
        if self.is_complete() {
            return Ok(0);
        }
        let pos = PagePosition::measure(surface, &self.article)?;
        let now = self.clock.now();
        let before = self.reached.len();
        let since_load = seconds(now - self.loaded_at);

        if !self.reached(Position::ContentStart) && pos.bottom > pos.article_start {
            self.started_at = Some(now);
            self.record(Position::ContentStart, ReaderKind::Reading, Some(since_load), None, None);
        }

        let since_start = seconds(now - self.started_at.unwrap_or(self.loaded_at));

        if !self.reached(Position::ContentMiddle) && pos.bottom >= pos.article_middle {
            let kind = classify(since_start, self.config.middle_scanner_secs);
            self.record(Position::ContentMiddle, kind, Some(since_start), Some(since_load), None);
        }

        if !self.reached(Position::ContentBottom) && pos.bottom >= pos.article_end {
            let kind = classify(since_start, self.config.end_scanner_secs);
            self.record(Position::ContentBottom, kind, Some(since_start), Some(since_load), None);
        }

        if !self.reached(Position::PageBottom) && pos.bottom >= pos.height {
            self.record(
                Position::PageBottom,
                ReaderKind::Reading,
                Some(since_load),
                None,
                Some(since_start),
            );
        }

        Ok(self.reached.len() - before)
    }

    /// Take every milestone recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<ReadingEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn record(
        &mut self,
        position: Position,
        kind: ReaderKind,
        time: Option<f64>,
        total: Option<f64>,
        active: Option<f64>,
    ) {
        if position != Position::ArticleLoaded {
            self.reached.insert(position);
        }
        let event = ReadingEvent {
            visit: self.visit.clone(),
            article: self.title.clone(),
            kind,
            position,
            time,
            total,
            active,
        };
        info!(
            visit = %self.visit,
            position = ?position,
            kind = ?kind,
            time = ?time,
            total = ?total,
            active = ?active,
            "reading milestone"
        );
        if let Some(bus) = &self.events {
            bus.publish(Event::Reading(event.clone()));
        }
        self.outbox.push(event);
    }
}
