//! Capabilities the stroke engine borrows from the hosting editor.
//!
//! The engine never owns scene objects. It asks the host to resolve rays against
//! the scene surface, to create and destroy objects, to report where an object
//! currently is, and to record each creation in the editor's undo history.
use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec3;

use crate::math::{InstanceTransform, Ray, SurfaceHit};

/// Scene access required by [`crate::stroke::StrokeEngine`].
pub trait SceneHost {
    /// Handle of a scene object, e.g. an entity id.
    type Object: Copy + Eq + Hash + Debug;
    /// Handle of an object template (prefab, scene asset, ...).
    type Template;

    /// Resolves `ray` against the scene surface.
    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<Self::Object>>;

    /// Creates a copy of `template` with the given transform.
    ///
    /// Returns `None` if the host could not create the object; the attempt is then skipped.
    fn instantiate(
        &mut self,
        template: &Self::Template,
        transform: &InstanceTransform,
    ) -> Option<Self::Object>;

    /// Destroys a previously created object.
    fn destroy(&mut self, object: Self::Object);

    /// Current world position of `object`, or `None` if it no longer exists.
    fn position(&self, object: Self::Object) -> Option<Vec3>;

    /// Records the creation of `object` as a single undoable action.
    fn register_creation(&mut self, object: Self::Object, label: &str);

    /// Human readable template name used in undo labels.
    fn template_name(&self, _template: &Self::Template) -> String {
        "object".to_owned()
    }
}

impl<H: SceneHost + ?Sized> SceneHost for &mut H {
    type Object = H::Object;
    type Template = H::Template;

    fn raycast(&mut self, ray: &Ray) -> Option<SurfaceHit<Self::Object>> {
        (**self).raycast(ray)
    }

    fn instantiate(
        &mut self,
        template: &Self::Template,
        transform: &InstanceTransform,
    ) -> Option<Self::Object> {
        (**self).instantiate(template, transform)
    }

    fn destroy(&mut self, object: Self::Object) {
        (**self).destroy(object)
    }

    fn position(&self, object: Self::Object) -> Option<Vec3> {
        (**self).position(object)
    }

    fn register_creation(&mut self, object: Self::Object, label: &str) {
        (**self).register_creation(object, label)
    }

    fn template_name(&self, template: &Self::Template) -> String {
        (**self).template_name(template)
    }
}

/// Undo label recorded for one painted instance.
pub(crate) fn creation_label(name: &str) -> String {
    format!("Created {name} with brush")
}
