//! In-memory scene used by unit tests.
use std::collections::HashMap;

use glam::Vec3;

use crate::host::SceneHost;
use crate::math::{InstanceTransform, Ray, SurfaceHit};

/// Object id of the ground surface.
pub(crate) const GROUND: u32 = 0;

/// Downward ray starting 10 units above `point`.
pub(crate) fn down_ray_at(point: Vec3) -> Ray {
    Ray::new(point + Vec3::Y * 10.0, Vec3::NEG_Y)
}

enum Surface {
    None,
    /// Horizontal plane `y = height`.
    Plane { height: f32 },
    /// Every ray hits this point.
    Fixed { point: Vec3, normal: Vec3 },
}

pub(crate) struct FakeScene {
    surface: Surface,
    objects: HashMap<u32, Vec3>,
    next_id: u32,
    /// When set, spawned objects are spheres of this radius that rays can hit.
    solid_radius: Option<f32>,
    /// When set, `instantiate` always returns `None`.
    decline: bool,
    undo: Vec<(u32, String)>,
}

impl FakeScene {
    fn with_surface(surface: Surface) -> Self {
        Self {
            surface,
            objects: HashMap::new(),
            next_id: GROUND + 1,
            solid_radius: None,
            decline: false,
            undo: Vec::new(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::with_surface(Surface::None)
    }

    pub(crate) fn ground_plane() -> Self {
        Self::with_surface(Surface::Plane { height: 0.0 })
    }

    pub(crate) fn fixed_hit(point: Vec3, normal: Vec3) -> Self {
        Self::with_surface(Surface::Fixed { point, normal })
    }

    pub(crate) fn with_solid_instances(mut self, radius: f32) -> Self {
        self.solid_radius = Some(radius);
        self
    }

    pub(crate) fn declining_instantiation(mut self) -> Self {
        self.decline = true;
        self
    }

    pub(crate) fn spawn_at(&mut self, position: Vec3) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, position);
        id
    }

    pub(crate) fn destroy_externally(&mut self, object: u32) {
        self.objects.remove(&object);
    }

    pub(crate) fn exists(&self, object: u32) -> bool {
        self.objects.contains_key(&object)
    }

    pub(crate) fn instance_count(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn undo_labels(&self) -> Vec<String> {
        self.undo.iter().map(|(_, label)| label.clone()).collect()
    }

    fn hit_instance(&self, ray: &Ray, radius: f32) -> Option<SurfaceHit<u32>> {
        let dir = ray.direction.normalize_or_zero();
        let mut best: Option<(f32, u32, Vec3)> = None;
        for (&id, &center) in &self.objects {
            let oc = ray.origin - center;
            let b = oc.dot(dir);
            let c = oc.length_squared() - radius * radius;
            let disc = b * b - c;
            if disc < 0.0 {
                continue;
            }
            let sqrt = disc.sqrt();
            let t = if -b - sqrt >= 0.0 { -b - sqrt } else { -b + sqrt };
            if t < 0.0 {
                continue;
            }
            if best.is_none_or(|(bt, _, _)| t < bt) {
                best = Some((t, id, center));
            }
        }
        best.map(|(t, id, center)| {
            let point = ray.origin + dir * t;
            SurfaceHit::new(point, (point - center).normalize_or_zero(), id)
        })
    }
}

impl SceneHost for FakeScene {
    type Object = u32;
    type Template = &'static str;

    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<u32>> {
        // Instances rest on the surface, so they are always in front of it.
        if let Some(radius) = self.solid_radius {
            if let Some(hit) = self.hit_instance(ray, radius) {
                return Some(hit);
            }
        }
        match self.surface {
            Surface::None => None,
            Surface::Fixed { point, normal } => Some(SurfaceHit::new(point, normal, GROUND)),
            Surface::Plane { height } => {
                if ray.direction.y.abs() < f32::EPSILON {
                    return None;
                }
                let t = (height - ray.origin.y) / ray.direction.y;
                (t >= 0.0).then(|| SurfaceHit::new(ray.at(t), Vec3::Y, GROUND))
            }
        }
    }

    fn instantiate(&mut self, _template: &&'static str, transform: &InstanceTransform) -> Option<u32> {
        if self.decline {
            return None;
        }
        Some(self.spawn_at(transform.translation))
    }

    fn destroy(&mut self, object: u32) {
        self.objects.remove(&object);
    }

    fn position(&self, object: u32) -> Option<Vec3> {
        self.objects.get(&object).copied()
    }

    fn register_creation(&mut self, object: u32, label: &str) {
        self.undo.push((object, label.to_owned()));
    }

    fn template_name(&self, template: &&'static str) -> String {
        (*template).to_owned()
    }
}
