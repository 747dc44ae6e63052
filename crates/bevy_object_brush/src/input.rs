use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use object_brush::prelude::{PointerButton, PointerEvent, PointerPhase, Ray, ToolMode};

use crate::events::{BrushStrokeMessage, CloseObjectBrush, MessageSink, OpenObjectBrush};
use crate::host::BrushSceneHost;
use crate::{BrushRng, ObjectBrushSettings, ObjectBrushTool};

/// Marks the camera whose viewport the brush paints through. Exactly one
/// camera should carry it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BrushCamera;

/// Tool mode of the hosting editor. In `View` the mouse drives the camera
/// and the brush ignores it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorToolMode {
    View,
    #[default]
    Edit,
}

impl From<EditorToolMode> for ToolMode {
    fn from(mode: EditorToolMode) -> Self {
        match mode {
            EditorToolMode::View => ToolMode::View,
            EditorToolMode::Edit => ToolMode::Edit,
        }
    }
}

/// World-space ray through the cursor of the primary window, with the
/// cursor position it was built from.
pub(crate) fn pointer_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<BrushCamera>>,
) -> Option<(Vec2, Ray)> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;

    let viewport_cursor = match camera.logical_viewport_rect() {
        Some(rect) => cursor - rect.min,
        None => cursor,
    };
    let ray = camera
        .viewport_to_world(camera_transform, viewport_cursor)
        .ok()?;
    Some((cursor, Ray::new(ray.origin, *ray.direction)))
}

/// Turns mouse input into brush strokes.
///
/// A press starts a stroke; holding the button while the cursor moves
/// continues it. Presses that changed the scene are cleared so other
/// systems do not also act on them.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_with_pointer(
    mut mouse: ResMut<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<BrushCamera>>,
    settings: Res<ObjectBrushSettings>,
    mode: Res<EditorToolMode>,
    tool: Option<ResMut<ObjectBrushTool>>,
    mut host: BrushSceneHost,
    mut rng: ResMut<BrushRng>,
    mut writer: MessageWriter<BrushStrokeMessage>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let Some(mut tool) = tool else {
        *last_cursor = None;
        return;
    };
    let Some((cursor, ray)) = pointer_ray(&windows, &cameras) else {
        *last_cursor = None;
        return;
    };
    let moved = last_cursor.is_some_and(|last| last != cursor);
    *last_cursor = Some(cursor);

    let mut sink = MessageSink::new(&mut writer);
    let buttons = [
        (settings.paint_button, PointerButton::Primary),
        (settings.erase_button, PointerButton::Secondary),
    ];
    for (button, pointer_button) in buttons {
        let phase = if mouse.just_pressed(button) {
            PointerPhase::Down
        } else if moved && mouse.pressed(button) {
            PointerPhase::Drag
        } else {
            continue;
        };
        let event = PointerEvent::new(phase, pointer_button, ray);
        let consumed = tool.session_mut().handle_pointer(
            &mut host,
            &event,
            (*mode).into(),
            &mut rng.0,
            &mut sink,
        );
        if consumed {
            mouse.clear_just_pressed(button);
        }
    }
}

/// Opens or closes the tool when the configured key is pressed.
pub(crate) fn toggle_with_key(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<ObjectBrushSettings>,
    tool: Option<Res<ObjectBrushTool>>,
    mut commands: Commands,
) {
    let Some(key) = settings.toggle_key else {
        return;
    };
    if !keys.just_pressed(key) {
        return;
    }
    if tool.is_some() {
        commands.trigger(CloseObjectBrush);
    } else {
        commands.trigger(OpenObjectBrush);
    }
}
