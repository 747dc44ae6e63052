use std::collections::HashMap;
use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;
use object_brush::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn down_ray_at(point: Vec3) -> Ray {
    Ray::new(point + Vec3::Y * 10.0, Vec3::NEG_Y)
}

/// Flat ground at `y = 0` that records spawned instances by id.
#[derive(Default)]
pub struct PlaneScene {
    pub objects: HashMap<u64, Vec3>,
    next_id: u64,
}

impl SceneHost for PlaneScene {
    type Object = u64;
    type Template = ();

    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<u64>> {
        if ray.direction.y >= 0.0 {
            return None;
        }
        let t = -ray.origin.y / ray.direction.y;
        Some(SurfaceHit::new(ray.at(t), Vec3::Y, 0))
    }

    fn instantiate(&mut self, _template: &(), transform: &InstanceTransform) -> Option<u64> {
        self.next_id += 1;
        self.objects.insert(self.next_id, transform.translation);
        Some(self.next_id)
    }

    fn destroy(&mut self, object: u64) {
        self.objects.remove(&object);
    }

    fn position(&self, object: u64) -> Option<Vec3> {
        self.objects.get(&object).copied()
    }

    fn register_creation(&mut self, _object: u64, _label: &str) {}
}
