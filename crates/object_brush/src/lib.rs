#![forbid(unsafe_code)]
//! object_brush: paint, randomize and erase object instances on 3D surfaces.
//!
//! Modules:
//! - brush: brush parameters, defaults and the catalog with its active selection
//! - stroke: the stroke engine (paint/erase), results and events
//! - session: one catalog plus one engine, with pointer dispatch and the brush cursor
//! - host: capability trait the hosting editor implements (raycast, spawn, destroy, undo)
//!
//! The crate is engine-agnostic; see `bevy_object_brush` for a Bevy host.
pub mod brush;
pub mod error;
pub mod host;
pub mod input;
pub mod math;
pub mod session;
pub mod stroke;

#[cfg(test)]
pub(crate) mod testing;

/// Convenient re-exports for common types. Import with `use object_brush::prelude::*;`.
pub mod prelude {
    pub use crate::brush::{
        BrushCatalog, BrushDefaults, BrushDefinition, BrushId, PreviewSource, RandomRotationAxes,
        ScaleRange,
    };
    pub use crate::error::{Error, Result};
    pub use crate::host::SceneHost;
    pub use crate::input::{PointerButton, PointerEvent, PointerPhase, ToolMode};
    pub use crate::math::{InstanceTransform, Ray, SurfaceHit};
    pub use crate::session::{BrushCursor, BrushSession};
    pub use crate::stroke::{
        EraseResult, EventSink, FnSink, PlaceResult, Placement, StrokeEngine, StrokeEvent,
        StrokeMode, VecSink,
    };
}
