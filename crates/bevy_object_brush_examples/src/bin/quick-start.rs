use bevy::prelude::*;
use bevy_object_brush::prelude::*;

/// Brushes created at startup, selectable with the number keys.
#[derive(Resource, Default)]
struct Brushes(Vec<BrushId>);

fn main() {
    App::new()
        .insert_resource(ObjectBrushSettings::default().with_toggle_key(KeyCode::KeyB))
        .init_resource::<Brushes>()
        .add_plugins(DefaultPlugins)
        .add_plugins(ObjectBrushPlugin)
        .add_systems(Startup, (setup_scene, fill_catalog).chain())
        .add_systems(Update, (editor_shortcuts, log_stroke_messages))
        .run();
}

/// A scene holding a single mesh, used as a paintable prop.
fn prop_scene(mesh: Handle<Mesh>, material: Handle<StandardMaterial>, lift: f32) -> Scene {
    let mut world = World::new();
    world.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, lift, 0.0),
    ));
    Scene::new(world)
}

/// Spawns ground, light and camera, then opens the brush tool.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scenes: ResMut<Assets<Scene>>,
) {
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60.0, 60.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));
    commands.spawn((
        Name::new("Hill"),
        Mesh3d(meshes.add(Sphere::new(6.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.55, 0.3))),
        Transform::from_xyz(8.0, -2.0, -6.0),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 35.0, 35.0).looking_at(Vec3::ZERO, Vec3::Y),
        BrushCamera,
    ));

    let rock = scenes.add(prop_scene(
        meshes.add(Sphere::new(0.5)),
        materials.add(Color::srgb(0.55, 0.55, 0.6)),
        0.25,
    ));
    let tree = scenes.add(prop_scene(
        meshes.add(Cone::new(0.6, 2.0)),
        materials.add(Color::srgb(0.1, 0.4, 0.15)),
        1.0,
    ));
    commands.insert_resource(PropScenes { rock, tree });

    commands.trigger(OpenObjectBrush);
}

#[derive(Resource)]
struct PropScenes {
    rock: Handle<Scene>,
    tree: Handle<Scene>,
}

/// Adds one brush per prop and activates the first.
fn fill_catalog(
    mut tool: ResMut<ObjectBrushTool>,
    props: Res<PropScenes>,
    mut brushes: ResMut<Brushes>,
) -> bevy::ecs::error::Result {
    let catalog = tool.catalog_mut();

    let trees = catalog.add(BrushTemplate::new(props.tree.clone(), "Tree"));
    if let Some(brush) = catalog.get_mut(trees) {
        brush.set_density(0.4)?;
        brush.set_radius(6.0)?;
        brush.set_scale_range(0.8, 1.4)?;
    }

    let rocks = catalog.add(BrushTemplate::new(props.rock.clone(), "Rock"));
    if let Some(brush) = catalog.get_mut(rocks) {
        brush.set_density(1.5)?;
        brush.set_radius(3.0)?;
        brush.set_scale_range(0.3, 0.9)?;
        brush.set_align_to_surface(true);
        brush.set_rotation(RandomRotationAxes::ALL);
    }

    catalog.set_active(trees)?;
    brushes.0 = vec![trees, rocks];
    info!("Left mouse paints, right mouse erases. 1/2 pick a brush, Tab toggles view mode,");
    info!("Z undoes, Enter applies, Delete removes all, B closes or reopens the tool.");
    Ok(())
}

fn editor_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut mode: ResMut<EditorToolMode>,
    tool: Option<ResMut<ObjectBrushTool>>,
    brushes: Res<Brushes>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        *mode = match *mode {
            EditorToolMode::View => EditorToolMode::Edit,
            EditorToolMode::Edit => EditorToolMode::View,
        };
        info!("Editor mode: {:?}", *mode);
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        commands.trigger(UndoBrushStroke);
    }
    if keys.just_pressed(KeyCode::Enter) {
        commands.trigger(ApplyPaintedInstances);
    }
    if keys.just_pressed(KeyCode::Delete) {
        commands.trigger(RemoveAllPaintedInstances);
    }

    let Some(mut tool) = tool else {
        return;
    };
    for (key, index) in [(KeyCode::Digit1, 0), (KeyCode::Digit2, 1)] {
        let Some(&id) = brushes.0.get(index) else {
            continue;
        };
        if keys.just_pressed(key) && tool.catalog_mut().set_active(id).is_ok() {
            info!("Active brush: {id}");
        }
    }
}

fn log_stroke_messages(mut messages: MessageReader<BrushStrokeMessage>) {
    for message in messages.read() {
        match &message.event {
            StrokeEvent::StrokeStarted { mode, attempts } => {
                debug!("{mode:?} stroke, {attempts} attempts")
            }
            StrokeEvent::InstanceErased { object } => debug!("Erased {object}"),
            StrokeEvent::Warning { context, message } => warn!("{context}: {message}"),
            _ => {}
        }
    }
}
