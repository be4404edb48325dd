//! Viewport containment queries and scroll-driven visibility watchers.
//!
//! Everything here runs against an injected [`Surface`] (the rendering
//! environment) and [`Clock`], so the same code drives a live page or an
//! in-memory [`fake::FakeSurface`]:
//! - [`Viewport`] answers "is this element inside the container on these
//!   edges, with these offsets"
//! - [`Debouncer`] is the trailing-edge debounce state machine
//! - [`WatchRegistry`] fires a callback once per element the first time it
//!   is found fully visible after scrolling settles
//! - [`stream::debounce_stream`] drives a settle callback from an async
//!   scroll signal channel

pub mod clock;
pub mod debounce;
pub mod fake;
pub mod predicate;
pub mod stream;
pub mod surface;
pub mod watch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{DebounceState, Debouncer};
pub use predicate::Viewport;
pub use stream::{debounce_stream, Flow, ScrollSignal, StreamEnd};
pub use surface::{NodeKind, Surface};
pub use watch::{WatchOutcome, WatchRegistry};
