//! Brush definitions and the catalog that holds them.
pub mod catalog;
pub mod definition;
pub mod preview;

pub use catalog::{BrushCatalog, BrushId};
pub use definition::{
    BrushDefaults, BrushDefinition, RandomRotationAxes, ScaleRange, MAX_ATTEMPTS_PER_STROKE,
};
pub use preview::PreviewSource;
