//! Fire a callback once per element, the first time it is fully visible.
//!
//! The registry owns one latch per watched identifier. A target already
//! visible at registration fires immediately; otherwise a listener is
//! armed and re-checked each time scrolling settles for the debounce
//! delay. When the check passes the latch is set, exactly one callback
//! runs, and every listener for that identifier is detached.


use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use ntview_common::{ElementId, Event, EventBus, Result};
use ntview_config::{NtviewConfig, ViewportSettings};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::debounce::Debouncer;
use crate::predicate::Viewport;
use crate::surface::{NodeKind, Surface};

/// Default quiet period after the last scroll event.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(20);

type Callback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The target was visible at registration; the callback already ran.
    Fired,
    /// A listener is waiting for scrolling to reveal the target.
    Armed,
    /// The identifier fired before; the callback was dropped unrun.
    AlreadyFired,
    /// The identifier does not resolve to an element. Nothing was armed.
    Unresolved,
}

impl WatchOutcome {
    /// False only when the target could not be resolved.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, WatchOutcome::Unresolved)
    }
}

struct Listener {
    debouncer: Debouncer,
    callback: Callback,
}

#[derive(Default)]
struct WatchEntry {
    fired: bool,
    listeners: Vec<Listener>,
}

pub struct WatchRegistry<C: Clock = SystemClock> {
    clock: C,
    delay: Duration,
    defaults: ViewportSettings,
    entries: BTreeMap<ElementId, WatchEntry>,
    events: Option<EventBus>,
}

impl WatchRegistry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for WatchRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> WatchRegistry<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            delay: DEFAULT_DEBOUNCE,
            defaults: ViewportSettings::default(),
            entries: BTreeMap::new(),
            events: None,
        }
    }

    /// Debounce delay and containment defaults from `config`, with the
    /// site profile for `host` applied.
    pub fn from_config(config: &NtviewConfig, host: Option<&str>, clock: C) -> Self {
        Self::with_clock(clock)
            .with_delay(config.watch.debounce())
            .with_defaults(config.settings_for_host(host))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_defaults(mut self, defaults: ViewportSettings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Publish `Event::ElementVisible` on `bus` whenever a target fires.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `callback` once, the first time `target` is fully visible.
    ///
    /// A target that does not resolve gives `Unresolved`, not an error.
    /// Malformed inline settings on the target fail the registration.
    pub fn watch<S, F>(
        &mut self,
        surface: &S,
        target: impl Into<ElementId>,
        callback: F,
    ) -> Result<WatchOutcome>
    where
        S: Surface + ?Sized,
        F: FnOnce() + 'static,
    {
        let id = target.into();
        if surface.node_kind(&id) != Some(NodeKind::Element) {
            debug!(target = %id, "watch target does not resolve");
            return Ok(WatchOutcome::Unresolved);
        }
        if self.is_fired(&id) {
            return Ok(WatchOutcome::AlreadyFired);
        }

        if self.check(surface, &id)? {
            let entry = self.entries.entry(id.clone()).or_default();
            entry.fired = true;
            entry.listeners.clear();
            self.fire(&id, Box::new(callback));
            return Ok(WatchOutcome::Fired);
        }

        self.entries
            .entry(id.clone())
            .or_default()
            .listeners
            .push(Listener {
                debouncer: Debouncer::new(self.delay),
                callback: Box::new(callback),
            });
        debug!(target = %id, "watch listener armed");
        Ok(WatchOutcome::Armed)
    }

    /// A scroll event happened: restart every armed listener's quiet period.
    pub fn on_scroll(&mut self) {
        let now = self.clock.now();
        for listener in self.entries.values_mut().flat_map(|e| e.listeners.iter_mut()) {
            listener.debouncer.trigger(now);
        }
    }

    /// Check every listener whose quiet period has elapsed. Returns the
    /// targets that fired, in identifier order.
    pub fn poll<S: Surface + ?Sized>(&mut self, surface: &S) -> Vec<ElementId> {
        let now = self.clock.now();
        let due: Vec<(ElementId, usize)> = self
            .entries
            .iter_mut()
            .filter_map(|(id, entry)| {
                let first_due = entry
                    .listeners
                    .iter_mut()
                    .enumerate()
                    .map(|(i, l)| (i, l.debouncer.poll(now)))
                    .fold(None, |found, (i, is_due)| found.or(is_due.then_some(i)));
                first_due.map(|i| (id.clone(), i))
            })
            .collect();

        due.into_iter()
            .filter(|(id, i)| self.try_fire(surface, id, *i))
            .map(|(id, _)| id)
            .collect()
    }

    /// Check every armed target now, ignoring debounce timers. For hosts
    /// that debounce scroll events themselves.
    pub fn settle<S: Surface + ?Sized>(&mut self, surface: &S) -> Vec<ElementId> {
        let armed: Vec<ElementId> = self
            .entries
            .iter_mut()
            .filter(|(_, e)| !e.listeners.is_empty())
            .map(|(id, e)| {
                e.listeners.iter_mut().for_each(|l| l.debouncer.cancel());
                id.clone()
            })
            .collect();

        armed
            .into_iter()
            .filter(|id| self.try_fire(surface, id, 0))
            .collect()
    }

    /// Earliest pending debounce deadline, for scheduling the next poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .values()
            .flat_map(|e| e.listeners.iter())
            .filter_map(|l| l.debouncer.deadline())
            .min()
    }

    pub fn is_fired(&self, id: &ElementId) -> bool {
        self.entries.get(id).is_some_and(|e| e.fired)
    }

    pub fn is_armed(&self, id: &ElementId) -> bool {
        self.entries.get(id).is_some_and(|e| !e.listeners.is_empty())
    }

    /// Total armed listeners across all targets.
    pub fn listener_count(&self) -> usize {
        self.entries.values().map(|e| e.listeners.len()).sum()
    }

    /// Detach every listener for `id` without firing. A target that already
    /// fired keeps its latch. Returns whether any listener was detached.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        let had_listeners = !entry.listeners.is_empty();
        entry.listeners.clear();
        if !entry.fired {
            self.entries.remove(id);
        }
        if had_listeners {
            debug!(target = %id, "watch listeners removed");
        }
        had_listeners
    }

    fn check<S: Surface + ?Sized>(&self, surface: &S, id: &ElementId) -> Result<bool> {
        Viewport::with_defaults(surface, &self.defaults).is_within(id, ViewportSettings::default())
    }

    /// Check `id` and, if visible, fire listener `index` and detach the rest.
    fn try_fire<S: Surface + ?Sized>(&mut self, surface: &S, id: &ElementId, index: usize) -> bool {
        match self.check(surface, id) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                warn!(target = %id, "visibility check failed: {e}");
                return false;
            }
        }
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if entry.fired || index >= entry.listeners.len() {
            return false;
        }
        let listener = entry.listeners.swap_remove(index);
        entry.listeners.clear();
        entry.fired = true;
        self.fire(id, listener.callback);
        true
    }

    fn fire(&self, id: &ElementId, callback: Callback) {
        debug!(target = %id, "watch target visible, firing");
        callback();
        if let Some(bus) = &self.events {
            bus.publish(Event::ElementVisible(id.clone()));
        }
    }
}
