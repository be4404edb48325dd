use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::VisitId;
use crate::types::ElementId;

/// Where in the page a reading milestone was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    ArticleLoaded,
    ContentStart,
    ContentMiddle,
    ContentBottom,
    PageBottom,
}

/// How the visitor is reading, judged from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReaderKind {
    /// Unclassified progress (load, start, page end).
    Reading,
    /// Reached the milestone faster than the threshold.
    Scanner,
    /// Took at least the threshold to get there.
    Reader,
}

/// One reading-progress milestone. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingEvent {
    pub visit: VisitId,
    pub article: String,
    pub kind: ReaderKind,
    pub position: Position,
    /// Elapsed time the milestone is measured by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Total time on the page when the milestone was reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Time spent since the content started, for the page-end milestone
    /// whose `time` is already measured from load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    Reading(ReadingEvent),
    ElementVisible(ElementId),
    #[serde(other)]
    Unknown,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(position: Position) -> ReadingEvent {
        ReadingEvent {
            visit: VisitId::new(),
            article: "Hello".into(),
            kind: ReaderKind::Reading,
            position,
            time: Some(1.5),
            total: None,
            active: None,
        }
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::ElementVisible(ElementId::from("footer")));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::ElementVisible(id) if id.as_str() == "footer"));
    }

    #[tokio::test]
    async fn cloned_bus_shares_subscribers() {
        let bus = EventBus::new(16);
        let other = bus.clone();
        let mut rx = bus.subscribe();

        assert_eq!(other.publish(Event::Reading(milestone(Position::ContentStart))), 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            Event::Reading(ReadingEvent { position: Position::ContentStart, .. })
        ));
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Unknown), 0);
    }

    #[test]
    fn reading_event_serialization_omits_missing_times() {
        let mut ev = milestone(Position::ArticleLoaded);
        ev.time = None;
        let json = serde_json::to_string(&Event::Reading(ev)).unwrap();
        assert!(json.contains("\"type\":\"Reading\""));
        assert!(json.contains("\"position\":\"ArticleLoaded\""));
        assert!(!json.contains("\"time\""));
        assert!(!json.contains("\"total\""));
        assert!(!json.contains("\"active\""));
    }

    #[test]
    fn page_bottom_serializes_active_time() {
        let mut ev = milestone(Position::PageBottom);
        ev.time = Some(51.25);
        ev.active = Some(46.25);
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"time\":51.25"));
        assert!(json.contains("\"active\":46.25"));

        let back: ReadingEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn unknown_event_type_deserializes() {
        let ev: Event = serde_json::from_str(r#"{"type":"Mystery"}"#).unwrap();
        assert!(matches!(ev, Event::Unknown));
    }
}
