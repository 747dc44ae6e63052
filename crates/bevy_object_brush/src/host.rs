use bevy::ecs::system::SystemParam;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use object_brush::prelude::{InstanceTransform, Ray, SceneHost, SurfaceHit};

use crate::history::BrushHistory;

/// Marker for entities spawned by the object brush.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PaintedInstance;

/// A paintable object: the scene to spawn and the name shown in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrushTemplate {
    pub scene: Handle<Scene>,
    pub name: String,
}

impl BrushTemplate {
    pub fn new(scene: Handle<Scene>, name: impl Into<String>) -> Self {
        Self {
            scene,
            name: name.into(),
        }
    }
}

/// [`SceneHost`] backed by the Bevy world.
///
/// Rays are cast against meshes. A hit on any descendant of a painted
/// instance resolves to the instance root, so strokes never stack new
/// objects on top of ones the brush already placed.
#[derive(SystemParam)]
pub struct BrushSceneHost<'w, 's> {
    ray_cast: MeshRayCast<'w, 's>,
    pub(crate) commands: Commands<'w, 's>,
    transforms: Query<'w, 's, &'static GlobalTransform>,
    parents: Query<'w, 's, &'static ChildOf>,
    painted: Query<'w, 's, (), With<PaintedInstance>>,
    pub(crate) history: ResMut<'w, BrushHistory>,
}

impl BrushSceneHost<'_, '_> {
    fn painted_root(&self, entity: Entity) -> Entity {
        let mut current = entity;
        loop {
            if self.painted.contains(current) {
                return current;
            }
            match self.parents.get(current) {
                Ok(child_of) => current = child_of.parent(),
                Err(_) => return entity,
            }
        }
    }

    pub(crate) fn exists(&mut self, entity: Entity) -> bool {
        self.commands.get_entity(entity).is_ok()
    }
}

impl SceneHost for BrushSceneHost<'_, '_> {
    type Object = Entity;
    type Template = BrushTemplate;

    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<Entity>> {
        let direction = Dir3::new(ray.direction).ok()?;
        let settings = MeshRayCastSettings::default().with_visibility(RayCastVisibility::Any);
        let (entity, point, normal) = self
            .ray_cast
            .cast_ray(Ray3d::new(ray.origin, direction), &settings)
            .first()
            .map(|(entity, hit)| (*entity, hit.point, hit.normal))?;
        Some(SurfaceHit::new(point, normal, self.painted_root(entity)))
    }

    fn instantiate(
        &mut self,
        template: &BrushTemplate,
        transform: &InstanceTransform,
    ) -> Option<Entity> {
        let entity = self
            .commands
            .spawn((
                Name::new(template.name.clone()),
                SceneRoot(template.scene.clone()),
                Transform {
                    translation: transform.translation,
                    rotation: transform.rotation,
                    scale: transform.scale_vec(),
                },
                PaintedInstance,
            ))
            .id();
        Some(entity)
    }

    fn destroy(&mut self, object: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(object) {
            entity.despawn();
        }
    }

    fn position(&self, object: Entity) -> Option<Vec3> {
        // Instances spawned this frame have no GlobalTransform yet.
        self.transforms.get(object).ok().map(GlobalTransform::translation)
    }

    fn register_creation(&mut self, object: Entity, label: &str) {
        self.history.record(object, label);
    }

    fn template_name(&self, template: &BrushTemplate) -> String {
        template.name.clone()
    }
}
