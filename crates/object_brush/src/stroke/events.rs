//! Event types and sinks for observing strokes.
//!
//! [`crate::stroke::StrokeEngine::place_with_events`] and
//! [`crate::stroke::StrokeEngine::erase_with_events`] report every attempt,
//! placement and removal to an [`EventSink`]. Editors use this to drive status
//! bars or message buses; tests use [`VecSink`] to inspect what happened.
use crate::math::InstanceTransform;

/// Which kind of stroke produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    Paint,
    Erase,
}

/// Describes events emitted by stroke operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeEvent<O> {
    /// Emitted when a paint or erase stroke begins.
    StrokeStarted {
        mode: StrokeMode,
        /// Number of ray attempts the stroke will make.
        attempts: usize,
    },

    /// A jittered ray did not hit the surface.
    AttemptMissed { attempt: usize },

    /// A jittered ray hit an instance painted earlier and was skipped.
    AttemptBlocked { attempt: usize, object: O },

    /// A new instance was created.
    InstancePlaced {
        object: O,
        transform: InstanceTransform,
    },

    /// A tracked instance was destroyed by an erase stroke or "remove all".
    InstanceErased { object: O },

    /// Non-fatal condition, e.g. a brush without a template.
    Warning { context: String, message: String },
}

/// A generic event sink that accepts [`StrokeEvent`]s.
pub trait EventSink<O> {
    fn send(&mut self, event: StrokeEvent<O>);

    /// Whether the sink cares about events at all. Producers skip building
    /// events for sinks that return false.
    fn is_active(&self) -> bool {
        true
    }
}

/// A no-op event sink.
impl<O> EventSink<O> for () {
    #[inline]
    fn send(&mut self, _event: StrokeEvent<O>) {}

    #[inline]
    fn is_active(&self) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<O, F> EventSink<O> for FnSink<F>
where
    F: FnMut(StrokeEvent<O>),
{
    #[inline]
    fn send(&mut self, event: StrokeEvent<O>) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Debug)]
pub struct VecSink<O> {
    events: Vec<StrokeEvent<O>>,
}

impl<O> Default for VecSink<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> VecSink<O> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<StrokeEvent<O>> {
        self.events
    }

    pub fn as_slice(&self) -> &[StrokeEvent<O>] {
        &self.events
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, StrokeEvent<O>> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<O> EventSink<O> for VecSink<O> {
    #[inline]
    fn send(&mut self, event: StrokeEvent<O>) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_sink_is_inactive() {
        let sink = ();
        assert!(!EventSink::<u32>::is_active(&sink));
    }

    #[test]
    fn vec_sink_collects_and_drains() {
        let mut sink = VecSink::<u32>::new();
        sink.send(StrokeEvent::AttemptMissed { attempt: 0 });
        sink.send(StrokeEvent::InstanceErased { object: 4 });
        assert_eq!(sink.len(), 2);
        let drained: Vec<_> = sink.drain().collect();
        assert_eq!(drained[1], StrokeEvent::InstanceErased { object: 4 });
        assert!(sink.is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event: StrokeEvent<u32>| {
            count += 1;
        });
        sink.send(StrokeEvent::Warning {
            context: "ctx".into(),
            message: "msg".into(),
        });
        assert_eq!(count, 1);
    }
}
