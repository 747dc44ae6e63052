use std::collections::HashMap;

use glam::Vec3;
use object_brush::prelude::*;
use object_brush_examples::{init_tracing, HeightfieldScene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn down_ray(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 50.0, z), Vec3::NEG_Y)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut scene = HeightfieldScene::rolling_hills(30.0);
    let mut rng = StdRng::seed_from_u64(7);

    // Every brush added to this session starts with a 4 unit radius.
    let defaults = BrushDefaults::new().with_radius(4.0).with_density(1.5);
    let mut session: BrushSession<String, u64> = BrushSession::try_with_defaults(defaults)?;

    let bush = session.catalog_mut().add("bush".to_owned());
    let stone = session.catalog_mut().add("stone".to_owned());
    session
        .catalog_mut()
        .get_mut(stone)
        .ok_or_else(|| anyhow::anyhow!("stone brush missing"))?
        .set_align_to_surface(true);

    // Stand-in thumbnails keyed by template.
    let thumbnails: HashMap<String, &str> =
        HashMap::from([("bush".to_owned(), "bush.png"), ("stone".to_owned(), "stone.png")]);
    for (id, preview) in session.catalog().previews(&thumbnails) {
        info!("Brush {id}: preview {:?}", preview);
    }

    let mut sink = FnSink::new(|event: StrokeEvent<u64>| match event {
        StrokeEvent::StrokeStarted { mode, attempts } => {
            info!("{mode:?} stroke with {attempts} attempts")
        }
        StrokeEvent::InstanceErased { object } => info!("erased {object}"),
        StrokeEvent::Warning { context, message } => info!("warning in {context}: {message}"),
        _ => {}
    });

    // Navigating the view: the brush ignores the click.
    let click = PointerEvent::down(PointerButton::Primary, down_ray(0.0, 0.0));
    let consumed = session.handle_pointer(&mut scene, &click, ToolMode::View, &mut rng, &mut sink);
    info!("Click in view mode consumed: {consumed}");

    // Nothing is active yet either.
    let consumed = session.handle_pointer(&mut scene, &click, ToolMode::Edit, &mut rng, &mut sink);
    info!("Click without active brush consumed: {consumed}");

    session.catalog_mut().set_active(bush)?;
    for x in [-10.0, -5.0, 0.0, 5.0, 10.0] {
        let drag = PointerEvent::drag(PointerButton::Primary, down_ray(x, 0.0));
        session.handle_pointer(&mut scene, &drag, ToolMode::Edit, &mut rng, &mut sink);
    }

    session.catalog_mut().set_active(stone)?;
    let click = PointerEvent::down(PointerButton::Primary, down_ray(0.0, 10.0));
    session.handle_pointer(&mut scene, &click, ToolMode::Edit, &mut rng, &mut sink);
    info!(
        "{} instances tracked after painting.",
        session.engine().len()
    );

    // The host's undo reverts the last creation; the engine forgets it too.
    if let Some((id, label)) = scene.undo_last() {
        session.engine_mut().forget(id);
        info!("Undo: {label}");
    }

    if let Some(cursor) = session.cursor(&mut scene, &down_ray(0.0, 0.0)) {
        info!(
            "Cursor at {:.2} facing {:.2} with radius {}",
            cursor.center, cursor.normal, cursor.radius
        );
    }

    // Right-drag erases with the active brush's radius.
    let erase = PointerEvent::drag(PointerButton::Secondary, down_ray(0.0, 0.0));
    session.handle_pointer(&mut scene, &erase, ToolMode::Edit, &mut rng, &mut sink);

    // Closing keeps the tracked set; the reopened session starts with an empty catalog.
    let engine = session.close();
    let mut session: BrushSession<String, u64> = BrushSession::reopen(engine);
    info!(
        "Reopened with {} brushes and {} tracked instances.",
        session.catalog().len(),
        session.engine().len()
    );

    let released = session.engine_mut().apply_permanently();
    info!(
        "Applied {released} instances; {} remain in the scene.",
        scene.instance_count()
    );
    Ok(())
}
