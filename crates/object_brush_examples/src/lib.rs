#![forbid(unsafe_code)]

mod rendering;
mod terrain;

pub use rendering::{init_tracing, render_instances_to_png, RenderConfig};
pub use terrain::{HeightfieldScene, PlacedInstance};
