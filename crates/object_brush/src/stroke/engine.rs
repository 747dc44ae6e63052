//! Paint and erase strokes over the set of instances painted this session.
use std::collections::HashSet;
use std::hash::Hash;

use glam::{EulerRot, Quat, Vec3};
use rand::RngCore;
use tracing::{debug, info};

use crate::brush::{BrushDefinition, RandomRotationAxes};
use crate::host::{creation_label, SceneHost};
use crate::math::{sample_below, InstanceTransform, Ray};
use crate::stroke::events::{EventSink, StrokeEvent, StrokeMode};

const FULL_TURN_DEGREES: f32 = 360.0;

/// One instance created by a paint stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<O> {
    /// Host handle of the created object.
    pub object: O,
    /// Transform the object was created with.
    pub transform: InstanceTransform,
}

/// Outcome of [`StrokeEngine::place`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult<O> {
    /// Instances created by this stroke, in attempt order.
    pub placements: Vec<Placement<O>>,
    /// Ray attempts made.
    pub attempts: usize,
    /// Attempts whose ray missed the surface.
    pub missed: usize,
    /// Attempts that hit an instance painted earlier.
    pub blocked: usize,
    /// Attempts the host refused to instantiate.
    pub declined: usize,
}

impl<O> Default for PlaceResult<O> {
    fn default() -> Self {
        Self {
            placements: Vec::new(),
            attempts: 0,
            missed: 0,
            blocked: 0,
            declined: 0,
        }
    }
}

impl<O: Copy> PlaceResult<O> {
    /// Whether at least one instance was created. Hosts use this to mark the input event consumed.
    pub fn placed_any(&self) -> bool {
        !self.placements.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = O> + '_ {
        self.placements.iter().map(|p| p.object)
    }
}

/// Outcome of [`StrokeEngine::erase`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct EraseResult<O> {
    /// Surface point the erase radius was centred on, if the ray hit.
    pub center: Option<Vec3>,
    /// Instances destroyed by this stroke.
    pub removed: Vec<O>,
}

impl<O> Default for EraseResult<O> {
    fn default() -> Self {
        Self {
            center: None,
            removed: Vec::new(),
        }
    }
}

impl<O> EraseResult<O> {
    pub fn removed_any(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Paints and erases instances, tracking every instance it created.
///
/// The engine only tracks membership; the objects themselves belong to the
/// host scene. Tracked instances can be erased by later strokes until they are
/// released with [`StrokeEngine::apply_permanently`].
#[derive(Debug, Clone)]
pub struct StrokeEngine<O> {
    instances: HashSet<O>,
}

impl<O> Default for StrokeEngine<O> {
    fn default() -> Self {
        Self {
            instances: HashSet::new(),
        }
    }
}

impl<O: Copy + Eq + Hash> StrokeEngine<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints with `brush` around the surface point under `ray`.
    pub fn place<H, R>(
        &mut self,
        host: &mut H,
        ray: &Ray,
        brush: &BrushDefinition<H::Template>,
        rng: &mut R,
    ) -> PlaceResult<O>
    where
        H: SceneHost<Object = O> + ?Sized,
        R: RngCore,
    {
        self.place_with_events(host, ray, brush, rng, &mut ())
    }

    /// Like [`StrokeEngine::place`], reporting progress to `sink`.
    ///
    /// Each of the `brush.attempts_per_stroke()` attempts moves the ray origin
    /// by a random offset in `[0, radius)` on every axis and resolves the moved
    /// ray again, so attempts may land on different surfaces or miss entirely.
    pub fn place_with_events<H, R>(
        &mut self,
        host: &mut H,
        ray: &Ray,
        brush: &BrushDefinition<H::Template>,
        rng: &mut R,
        sink: &mut dyn EventSink<O>,
    ) -> PlaceResult<O>
    where
        H: SceneHost<Object = O> + ?Sized,
        R: RngCore,
    {
        let rng: &mut dyn RngCore = rng;

        let Some(template) = brush.template() else {
            debug!("Brush has no template; nothing to paint.");
            if sink.is_active() {
                sink.send(StrokeEvent::Warning {
                    context: "paint".into(),
                    message: "Brush has no template".into(),
                });
            }
            return PlaceResult::default();
        };

        let attempts = brush.attempts_per_stroke();
        if sink.is_active() {
            sink.send(StrokeEvent::StrokeStarted {
                mode: StrokeMode::Paint,
                attempts,
            });
        }

        let label = creation_label(&host.template_name(template));
        let radius = brush.radius();
        let mut result = PlaceResult {
            attempts,
            ..PlaceResult::default()
        };

        for attempt in 0..attempts {
            let jitter = Vec3::new(
                sample_below(radius, rng),
                sample_below(radius, rng),
                sample_below(radius, rng),
            );
            let Some(hit) = host.raycast(&ray.offset_origin(jitter)) else {
                result.missed += 1;
                if sink.is_active() {
                    sink.send(StrokeEvent::AttemptMissed { attempt });
                }
                continue;
            };

            if self.instances.contains(&hit.object) {
                result.blocked += 1;
                if sink.is_active() {
                    sink.send(StrokeEvent::AttemptBlocked {
                        attempt,
                        object: hit.object,
                    });
                }
                continue;
            }

            let transform = InstanceTransform {
                translation: hit.point + brush.pivot_offset(),
                rotation: instance_rotation(
                    hit.normal,
                    brush.align_to_surface(),
                    brush.rotation(),
                    rng,
                ),
                scale: brush.scale_range().sample(rng),
            };

            let Some(object) = host.instantiate(template, &transform) else {
                debug!("Host declined to instantiate attempt {}.", attempt);
                result.declined += 1;
                continue;
            };
            host.register_creation(object, &label);
            self.instances.insert(object);

            if sink.is_active() {
                sink.send(StrokeEvent::InstancePlaced { object, transform });
            }
            result.placements.push(Placement { object, transform });
        }

        debug!(
            "Paint stroke: {} placed, {} missed, {} blocked, {} declined of {} attempts.",
            result.placements.len(),
            result.missed,
            result.blocked,
            result.declined,
            attempts
        );
        result
    }

    /// Destroys every tracked instance within `brush.radius()` of the surface point under `ray`.
    pub fn erase<H, T>(&mut self, host: &mut H, ray: &Ray, brush: &BrushDefinition<T>) -> EraseResult<O>
    where
        H: SceneHost<Object = O> + ?Sized,
    {
        self.erase_with_events(host, ray, brush, &mut ())
    }

    /// Like [`StrokeEngine::erase`], reporting progress to `sink`.
    ///
    /// The ray is resolved once without jitter. Instances the host can no
    /// longer locate are skipped and stay tracked.
    pub fn erase_with_events<H, T>(
        &mut self,
        host: &mut H,
        ray: &Ray,
        brush: &BrushDefinition<T>,
        sink: &mut dyn EventSink<O>,
    ) -> EraseResult<O>
    where
        H: SceneHost<Object = O> + ?Sized,
    {
        if sink.is_active() {
            sink.send(StrokeEvent::StrokeStarted {
                mode: StrokeMode::Erase,
                attempts: 1,
            });
        }

        let Some(hit) = host.raycast(ray) else {
            if sink.is_active() {
                sink.send(StrokeEvent::AttemptMissed { attempt: 0 });
            }
            return EraseResult::default();
        };

        let radius = brush.radius();
        let marked: Vec<O> = self
            .instances
            .iter()
            .copied()
            .filter(|object| {
                host.position(*object)
                    .is_some_and(|position| position.distance(hit.point) < radius)
            })
            .collect();

        for object in &marked {
            self.instances.remove(object);
            host.destroy(*object);
            if sink.is_active() {
                sink.send(StrokeEvent::InstanceErased { object: *object });
            }
        }

        debug!("Erase stroke removed {} instances.", marked.len());
        EraseResult {
            center: Some(hit.point),
            removed: marked,
        }
    }

    /// Stops tracking every instance without destroying it. The instances
    /// become ordinary scene content that erase strokes no longer touch.
    ///
    /// Returns how many instances were released.
    pub fn apply_permanently(&mut self) -> usize {
        let released = self.instances.len();
        self.instances.clear();
        info!("Applied {} painted instances permanently.", released);
        released
    }

    /// Destroys every tracked instance and empties the set.
    pub fn remove_all<H>(&mut self, host: &mut H) -> usize
    where
        H: SceneHost<Object = O> + ?Sized,
    {
        self.remove_all_with_events(host, &mut ())
    }

    pub fn remove_all_with_events<H>(&mut self, host: &mut H, sink: &mut dyn EventSink<O>) -> usize
    where
        H: SceneHost<Object = O> + ?Sized,
    {
        let removed = self.instances.len();
        for object in self.instances.drain() {
            host.destroy(object);
            if sink.is_active() {
                sink.send(StrokeEvent::InstanceErased { object });
            }
        }
        info!("Removed all {} painted instances.", removed);
        removed
    }

    /// Stops tracking `object`, e.g. after the host undid its creation.
    pub fn forget(&mut self, object: O) -> bool {
        self.instances.remove(&object)
    }

    /// Starts tracking an object created outside a paint stroke, e.g. by a host redo.
    pub fn adopt(&mut self, object: O) -> bool {
        self.instances.insert(object)
    }

    pub fn contains(&self, object: O) -> bool {
        self.instances.contains(&object)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Tracked instances in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = O> + '_ {
        self.instances.iter().copied()
    }
}

/// Rotation of a new instance: optional surface alignment, then random local
/// rotation on the flagged axes.
///
/// Alignment is the shortest rotation taking +Y onto `normal`. The random
/// angles are applied in the instance's local frame in Z, X, Y order; axes
/// that are not flagged keep their post-alignment orientation.
pub fn instance_rotation(
    normal: Vec3,
    align_to_surface: bool,
    axes: RandomRotationAxes,
    rng: &mut dyn RngCore,
) -> Quat {
    let mut rotation = Quat::IDENTITY;
    if align_to_surface {
        let normal = normal.normalize_or_zero();
        if normal != Vec3::ZERO {
            rotation = Quat::from_rotation_arc(Vec3::Y, normal);
        }
    }

    if !axes.any() {
        return rotation;
    }

    let mut angle = |enabled: bool| {
        if enabled {
            sample_below(FULL_TURN_DEGREES, rng).to_radians()
        } else {
            0.0
        }
    };
    let x = angle(axes.x);
    let y = angle(axes.y);
    let z = angle(axes.z);

    rotation * Quat::from_euler(EulerRot::YXZ, y, x, z)
}
