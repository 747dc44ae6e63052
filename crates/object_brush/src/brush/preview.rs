//! Template preview lookup, used by editor UIs to draw brush thumbnails.
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Host service that renders or caches a thumbnail for a template.
pub trait PreviewSource<T> {
    type Image;

    /// Returns the preview for `template`, or `None` if none is available yet.
    fn preview(&self, template: &T) -> Option<Self::Image>;
}

impl<T, I, S> PreviewSource<T> for HashMap<T, I, S>
where
    T: Eq + Hash,
    I: Clone,
    S: BuildHasher,
{
    type Image = I;

    fn preview(&self, template: &T) -> Option<I> {
        self.get(template).cloned()
    }
}
