use std::collections::BTreeMap;

use glam::Vec3;
use object_brush::prelude::*;

/// Object id reported for hits on the terrain itself.
pub const TERRAIN: u64 = 0;

const MARCH_STEP: f32 = 0.25;
const MAX_DISTANCE: f32 = 500.0;
const BISECT_STEPS: usize = 16;

/// An instance placed in a [`HeightfieldScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    pub name: String,
    pub transform: InstanceTransform,
}

/// Headless scene: a square heightfield plus spherical instances resting on it.
///
/// Rays march over the terrain and are tested against every instance, so a
/// stroke can hit previously painted objects just like in an editor.
pub struct HeightfieldScene {
    height: Box<dyn Fn(f32, f32) -> f32>,
    half_extent: f32,
    instance_radius: f32,
    instances: BTreeMap<u64, PlacedInstance>,
    next_id: u64,
    undo: Vec<(u64, String)>,
}

impl HeightfieldScene {
    /// Terrain covering `[-half_extent, half_extent]` on x and z.
    pub fn new(half_extent: f32, height: impl Fn(f32, f32) -> f32 + 'static) -> Self {
        Self {
            height: Box::new(height),
            half_extent,
            instance_radius: 0.5,
            instances: BTreeMap::new(),
            next_id: TERRAIN + 1,
            undo: Vec::new(),
        }
    }

    pub fn flat(half_extent: f32) -> Self {
        Self::new(half_extent, |_, _| 0.0)
    }

    pub fn rolling_hills(half_extent: f32) -> Self {
        Self::new(half_extent, |x, z| {
            2.0 * (x * 0.15).sin() * (z * 0.1).cos() + 0.5 * (z * 0.3 + x * 0.05).sin()
        })
    }

    /// Radius of an instance at scale 1, used for ray hits.
    pub fn with_instance_radius(mut self, radius: f32) -> Self {
        self.instance_radius = radius;
        self
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn instance_radius(&self) -> f32 {
        self.instance_radius
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        (self.height)(x, z)
    }

    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let e = 0.01;
        let dx = (self.height_at(x + e, z) - self.height_at(x - e, z)) / (2.0 * e);
        let dz = (self.height_at(x, z + e) - self.height_at(x, z - e)) / (2.0 * e);
        Vec3::new(-dx, 1.0, -dz).normalize()
    }

    pub fn instances(&self) -> impl Iterator<Item = (u64, &PlacedInstance)> {
        self.instances.iter().map(|(&id, instance)| (id, instance))
    }

    pub fn instance(&self, id: u64) -> Option<&PlacedInstance> {
        self.instances.get(&id)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Creations registered for undo, oldest first.
    pub fn undo_log(&self) -> &[(u64, String)] {
        &self.undo
    }

    /// Undoes the most recent creation. Returns the removed id and its label.
    pub fn undo_last(&mut self) -> Option<(u64, String)> {
        let (id, label) = self.undo.pop()?;
        self.instances.remove(&id);
        Some((id, label))
    }

    fn inside(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_extent && point.z.abs() <= self.half_extent
    }

    fn clearance(&self, point: Vec3) -> f32 {
        point.y - self.height_at(point.x, point.z)
    }

    fn hit_terrain(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut prev_t = 0.0;
        let mut prev_above = self.clearance(origin) > 0.0;
        let mut t = MARCH_STEP;
        while t <= MAX_DISTANCE {
            let point = origin + dir * t;
            let above = self.clearance(point) > 0.0;
            if prev_above && !above && self.inside(point) {
                let (mut lo, mut hi) = (prev_t, t);
                for _ in 0..BISECT_STEPS {
                    let mid = 0.5 * (lo + hi);
                    if self.clearance(origin + dir * mid) > 0.0 {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                return Some(hi);
            }
            prev_t = t;
            prev_above = above;
            t += MARCH_STEP;
        }
        None
    }

    fn hit_instance(&self, origin: Vec3, dir: Vec3) -> Option<(f32, u64, Vec3)> {
        let mut best: Option<(f32, u64, Vec3)> = None;
        for (&id, instance) in &self.instances {
            let center = instance.transform.translation;
            let radius = self.instance_radius * instance.transform.scale;
            let oc = origin - center;
            let b = oc.dot(dir);
            let c = oc.length_squared() - radius * radius;
            let disc = b * b - c;
            if disc < 0.0 {
                continue;
            }
            let t = -b - disc.sqrt();
            if t < 0.0 {
                continue;
            }
            if best.is_none_or(|(best_t, _, _)| t < best_t) {
                best = Some((t, id, center));
            }
        }
        best
    }
}

impl SceneHost for HeightfieldScene {
    type Object = u64;
    type Template = String;

    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<u64>> {
        let dir = ray.direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        let terrain = self.hit_terrain(ray.origin, dir);
        let instance = self.hit_instance(ray.origin, dir);

        match (terrain, instance) {
            (_, Some((t, id, center))) if terrain.is_none_or(|terrain_t| t <= terrain_t) => {
                let point = ray.origin + dir * t;
                Some(SurfaceHit::new(point, (point - center).normalize_or_zero(), id))
            }
            (Some(t), _) => {
                let point = ray.origin + dir * t;
                Some(SurfaceHit::new(point, self.normal_at(point.x, point.z), TERRAIN))
            }
            _ => None,
        }
    }

    fn instantiate(&mut self, template: &String, transform: &InstanceTransform) -> Option<u64> {
        let id = self.next_id;
        self.next_id += 1;
        self.instances.insert(
            id,
            PlacedInstance {
                name: template.clone(),
                transform: *transform,
            },
        );
        Some(id)
    }

    fn destroy(&mut self, object: u64) {
        self.instances.remove(&object);
    }

    fn position(&self, object: u64) -> Option<Vec3> {
        self.instances.get(&object).map(|i| i.transform.translation)
    }

    fn register_creation(&mut self, object: u64, label: &str) {
        self.undo.push((object, label.to_owned()));
    }

    fn template_name(&self, template: &String) -> String {
        template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downward_ray_lands_on_the_terrain() {
        let mut scene = HeightfieldScene::rolling_hills(50.0);
        let ray = Ray::new(Vec3::new(3.0, 20.0, -4.0), Vec3::NEG_Y);
        let hit = scene.raycast(&ray).expect("terrain below");
        assert_eq!(hit.object, TERRAIN);
        assert!((hit.point.y - scene.height_at(3.0, -4.0)).abs() < 1e-3);
        assert!(hit.normal.y > 0.0);
    }

    #[test]
    fn rays_outside_the_terrain_miss() {
        let mut scene = HeightfieldScene::flat(10.0);
        let ray = Ray::new(Vec3::new(30.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(scene.raycast(&ray).is_none());
    }

    #[test]
    fn instances_occlude_the_terrain() {
        let mut scene = HeightfieldScene::flat(10.0);
        let id = scene
            .instantiate(&"rock".to_owned(), &InstanceTransform::default())
            .unwrap();
        let hit = scene
            .raycast(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        assert_eq!(hit.object, id);
        assert!((hit.point.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn undo_removes_latest_creation() {
        let mut scene = HeightfieldScene::flat(10.0);
        let id = scene
            .instantiate(&"rock".to_owned(), &InstanceTransform::default())
            .unwrap();
        scene.register_creation(id, "Created rock with brush");
        assert_eq!(scene.undo_last(), Some((id, "Created rock with brush".to_owned())));
        assert_eq!(scene.instance_count(), 0);
        assert!(scene.undo_last().is_none());
    }
}
