//! Ordered brush collection with a single active selection.
use std::fmt;

use crate::brush::definition::{BrushDefaults, BrushDefinition};
use crate::brush::preview::PreviewSource;
use crate::error::{Error, Result};

/// Catalog-issued identifier of a brush. Ids are never reused within one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrushId(u64);

impl BrushId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered collection of brushes.
///
/// The active selection, when set, always names a brush that is still in the
/// catalog: removing the active brush or clearing the catalog resets it.
#[derive(Debug, Clone)]
pub struct BrushCatalog<T> {
    brushes: Vec<(BrushId, BrushDefinition<T>)>,
    active: Option<BrushId>,
    next_id: u64,
    defaults: BrushDefaults,
}

impl<T> Default for BrushCatalog<T> {
    fn default() -> Self {
        Self {
            brushes: Vec::new(),
            active: None,
            next_id: 0,
            defaults: BrushDefaults::default(),
        }
    }
}

impl<T> BrushCatalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog whose new brushes start from `defaults`.
    pub fn try_with_defaults(defaults: BrushDefaults) -> Result<Self> {
        defaults.validate()?;
        Ok(Self {
            defaults,
            ..Self::default()
        })
    }

    pub fn defaults(&self) -> &BrushDefaults {
        &self.defaults
    }

    /// Appends a brush for `template` with the catalog defaults. The active
    /// selection is left untouched.
    pub fn add(&mut self, template: T) -> BrushId {
        self.push(BrushDefinition::with_defaults(Some(template), &self.defaults))
    }

    /// Appends an already configured brush.
    pub fn push(&mut self, brush: BrushDefinition<T>) -> BrushId {
        let id = BrushId(self.next_id);
        self.next_id += 1;
        self.brushes.push((id, brush));
        id
    }

    /// Removes the brush, clearing the active selection if it was active.
    /// Returns `None` when the brush is not in the catalog.
    pub fn remove(&mut self, id: BrushId) -> Option<BrushDefinition<T>> {
        let index = self.brushes.iter().position(|(bid, _)| *bid == id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        Some(self.brushes.remove(index).1)
    }

    /// Removes every brush and clears the active selection.
    pub fn clear(&mut self) {
        self.brushes.clear();
        self.active = None;
    }

    /// Selects `id` as the active brush.
    pub fn set_active(&mut self, id: BrushId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::UnknownBrush(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<BrushId> {
        self.active
    }

    pub fn active(&self) -> Option<&BrushDefinition<T>> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut BrushDefinition<T>> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn get(&self, id: BrushId) -> Option<&BrushDefinition<T>> {
        self.brushes
            .iter()
            .find(|(bid, _)| *bid == id)
            .map(|(_, brush)| brush)
    }

    pub fn get_mut(&mut self, id: BrushId) -> Option<&mut BrushDefinition<T>> {
        self.brushes
            .iter_mut()
            .find(|(bid, _)| *bid == id)
            .map(|(_, brush)| brush)
    }

    pub fn contains(&self, id: BrushId) -> bool {
        self.brushes.iter().any(|(bid, _)| *bid == id)
    }

    /// Brushes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BrushId, &BrushDefinition<T>)> {
        self.brushes.iter().map(|(id, brush)| (*id, brush))
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Pairs each brush with its template's preview, in catalog order.
    ///
    /// Brushes without a template, or whose preview the host cannot provide,
    /// get `None`.
    pub fn previews<P>(&self, source: &P) -> Vec<(BrushId, Option<P::Image>)>
    where
        P: PreviewSource<T> + ?Sized,
    {
        self.brushes
            .iter()
            .map(|(id, brush)| (*id, brush.template().and_then(|t| source.preview(t))))
            .collect()
    }
}
