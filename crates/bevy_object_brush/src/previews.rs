use std::collections::HashMap;

use bevy::prelude::*;
use object_brush::prelude::PreviewSource;

use crate::host::BrushTemplate;

/// Thumbnails for brush templates, keyed by scene asset.
///
/// Editors fill this with rendered or hand-made images; templates without an
/// entry have no preview.
#[derive(Resource, Debug, Clone, Default)]
pub struct BrushPreviews {
    images: HashMap<AssetId<Scene>, Handle<Image>>,
}

impl BrushPreviews {
    pub fn insert(&mut self, scene: impl Into<AssetId<Scene>>, image: Handle<Image>) {
        self.images.insert(scene.into(), image);
    }

    pub fn remove(&mut self, scene: impl Into<AssetId<Scene>>) -> Option<Handle<Image>> {
        self.images.remove(&scene.into())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl PreviewSource<BrushTemplate> for BrushPreviews {
    type Image = Handle<Image>;

    fn preview(&self, template: &BrushTemplate) -> Option<Handle<Image>> {
        self.images.get(&template.scene.id()).cloned()
    }
}
