//! Pointer events as delivered by the host editor's scene view.
use crate::math::Ray;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
    Move,
}

impl PointerPhase {
    /// Whether the brush reacts to this phase.
    pub fn is_stroke(&self) -> bool {
        matches!(self, PointerPhase::Down | PointerPhase::Drag)
    }
}

/// Pointer button. Primary paints, secondary erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(u16),
}

/// Editor tool mode at the time of the event.
///
/// While the host is in free navigation (`View`), pointer input belongs to the
/// camera and the brush ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    View,
    #[default]
    Edit,
}

/// A pointer event already projected into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub button: PointerButton,
    /// World-space ray through the pointer position.
    pub ray: Ray,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, button: PointerButton, ray: Ray) -> Self {
        Self { phase, button, ray }
    }

    pub fn down(button: PointerButton, ray: Ray) -> Self {
        Self::new(PointerPhase::Down, button, ray)
    }

    pub fn drag(button: PointerButton, ray: Ray) -> Self {
        Self::new(PointerPhase::Drag, button, ray)
    }
}
