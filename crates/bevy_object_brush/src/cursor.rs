use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::host::BrushSceneHost;
use crate::input::{pointer_ray, BrushCamera};
use crate::{ObjectBrushSettings, ObjectBrushTool};

/// Draws the active brush's footprint and the surface normal under the cursor.
pub(crate) fn draw_brush_cursor(
    mut gizmos: Gizmos,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<BrushCamera>>,
    settings: Res<ObjectBrushSettings>,
    tool: Option<Res<ObjectBrushTool>>,
    mut host: BrushSceneHost,
) {
    if !settings.show_cursor {
        return;
    }
    let Some(tool) = tool else {
        return;
    };
    let Some((_, ray)) = pointer_ray(&windows, &cameras) else {
        return;
    };
    let Some(cursor) = tool.session().cursor(&mut host, &ray) else {
        return;
    };

    let normal = Dir3::new(cursor.normal).unwrap_or(Dir3::Y);
    // Gizmo circles lie in the XY plane.
    let facing = Quat::from_rotation_arc(Vec3::Z, *normal);
    gizmos.circle(
        Isometry3d::new(cursor.center, facing),
        cursor.radius,
        settings.cursor_color,
    );
    gizmos.line(
        cursor.center,
        cursor.center + *normal * settings.normal_length,
        settings.normal_color,
    );
}
