use bevy::prelude::*;
use object_brush::prelude::{EventSink, StrokeEvent};

/// Bevy message carrying a [`StrokeEvent`] for a painted entity.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct BrushStrokeMessage {
    pub event: StrokeEvent<Entity>,
}

/// Event sink that writes stroke events as [`BrushStrokeMessage`]s.
pub(crate) struct MessageSink<'a, 'w> {
    writer: &'a mut MessageWriter<'w, BrushStrokeMessage>,
}

impl<'a, 'w> MessageSink<'a, 'w> {
    pub(crate) fn new(writer: &'a mut MessageWriter<'w, BrushStrokeMessage>) -> Self {
        Self { writer }
    }
}

impl EventSink<Entity> for MessageSink<'_, '_> {
    #[inline]
    fn send(&mut self, event: StrokeEvent<Entity>) {
        self.writer.write(BrushStrokeMessage { event });
    }
}

/// Opens the brush tool. A new catalog is created; instances painted before
/// the last close stay tracked.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct OpenObjectBrush;

/// Closes the brush tool, dropping its catalog.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CloseObjectBrush;

/// Undoes the most recent brush creation that still exists.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct UndoBrushStroke;

/// Stops tracking painted instances; they stay in the scene but can no longer be erased.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ApplyPaintedInstances;

/// Despawns every instance the brush still tracks.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RemoveAllPaintedInstances;
