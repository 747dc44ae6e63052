//! Paint and erase strokes: the engine, its results and its events.
pub mod engine;
pub mod events;

pub use engine::{instance_rotation, EraseResult, PlaceResult, Placement, StrokeEngine};
pub use events::{EventSink, FnSink, StrokeEvent, StrokeMode, VecSink};
