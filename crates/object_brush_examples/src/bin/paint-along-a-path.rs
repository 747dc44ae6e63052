use glam::Vec3;
use object_brush::prelude::*;
use object_brush_examples::{init_tracing, render_instances_to_png, HeightfieldScene, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn down_ray(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 50.0, z), Vec3::NEG_Y)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut scene = HeightfieldScene::rolling_hills(50.0).with_instance_radius(0.4);
    let mut rng = StdRng::seed_from_u64(2025);

    // Trees: sparse, upright, random heading.
    let mut trees = BrushDefinition::new(Some("tree".to_owned()));
    trees.set_density(0.4)?;
    trees.set_radius(8.0)?;
    trees.set_scale_range(0.8, 1.6)?;
    trees.set_rotation(RandomRotationAxes::Y);

    // Rocks: dense, follow the slope, tumble on every axis.
    let mut rocks = BrushDefinition::new(Some("rock".to_owned()));
    rocks.set_density(2.0)?;
    rocks.set_radius(3.0)?;
    rocks.set_scale_range(0.2, 0.6)?;
    rocks.set_align_to_surface(true);
    rocks.set_rotation(RandomRotationAxes::ALL);

    let mut engine: StrokeEngine<u64> = StrokeEngine::new();

    // A drag from one corner to the other, one stroke per step.
    for step in 0..40 {
        let t = step as f32 / 39.0;
        let x = -40.0 + 80.0 * t;
        let z = 25.0 * (t * std::f32::consts::TAU).sin();
        engine.place(&mut scene, &down_ray(x, z), &trees, &mut rng);
        engine.place(&mut scene, &down_ray(x, z - 6.0), &rocks, &mut rng);
    }
    info!(
        "Painted {} instances ({} tracked, {} undo entries).",
        scene.instance_count(),
        engine.len(),
        scene.undo_log().len()
    );

    // Clear a glade in the middle.
    let mut eraser = BrushDefinition::<String>::new(None);
    eraser.set_radius(12.0)?;
    let erased = engine.erase(&mut scene, &down_ray(0.0, 0.0), &eraser);
    info!("Erased {} instances around {:?}.", erased.removed.len(), erased.center);

    render_instances_to_png(&scene, &RenderConfig::default(), "paint_along_a_path.png")?;
    info!("Wrote paint_along_a_path.png");
    Ok(())
}
