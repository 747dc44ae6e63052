//! The editing session: one brush catalog and one stroke engine.
//!
//! A session lives as long as the brush tool is open. Closing it drops the
//! catalog and the active selection but hands the stroke engine back, so
//! instances painted before closing stay erasable after the tool is reopened
//! with [`BrushSession::reopen`].
use std::hash::Hash;

use glam::Vec3;
use rand::RngCore;
use tracing::debug;

use crate::brush::{BrushCatalog, BrushDefaults};
use crate::error::Result;
use crate::host::SceneHost;
use crate::input::{PointerButton, PointerEvent, ToolMode};
use crate::math::Ray;
use crate::stroke::{EventSink, StrokeEngine};

/// Footprint of the active brush on the surface under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushCursor {
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct BrushSession<T, O> {
    catalog: BrushCatalog<T>,
    engine: StrokeEngine<O>,
}

impl<T, O> Default for BrushSession<T, O> {
    fn default() -> Self {
        Self {
            catalog: BrushCatalog::default(),
            engine: StrokeEngine::default(),
        }
    }
}

impl<T, O: Copy + Eq + Hash> BrushSession<T, O> {
    /// Opens a fresh session with an empty catalog and nothing tracked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session whose catalog uses `defaults` for new brushes.
    pub fn try_with_defaults(defaults: BrushDefaults) -> Result<Self> {
        Ok(Self {
            catalog: BrushCatalog::try_with_defaults(defaults)?,
            engine: StrokeEngine::default(),
        })
    }

    /// Opens a session that keeps tracking the instances of a closed one.
    pub fn reopen(engine: StrokeEngine<O>) -> Self {
        Self {
            catalog: BrushCatalog::default(),
            engine,
        }
    }

    /// Replaces the session's engine, e.g. with one returned by [`BrushSession::close`].
    pub fn with_engine(mut self, engine: StrokeEngine<O>) -> Self {
        self.engine = engine;
        self
    }

    /// Closes the session, returning the engine with its tracked instances.
    pub fn close(self) -> StrokeEngine<O> {
        debug!(
            "Closing brush session: {} brushes dropped, {} instances still tracked.",
            self.catalog.len(),
            self.engine.len()
        );
        self.engine
    }

    pub fn catalog(&self) -> &BrushCatalog<T> {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut BrushCatalog<T> {
        &mut self.catalog
    }

    pub fn engine(&self) -> &StrokeEngine<O> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StrokeEngine<O> {
        &mut self.engine
    }

    /// Runs a paint or erase stroke for a pointer event.
    ///
    /// Down and drag events paint with the primary button and erase with the
    /// secondary one, using the active brush. Events arriving while the host
    /// is in [`ToolMode::View`], other phases and other buttons are ignored.
    ///
    /// Returns whether the event changed the scene; hosts mark such events as consumed.
    pub fn handle_pointer<H, R>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        mode: ToolMode,
        rng: &mut R,
        sink: &mut dyn EventSink<O>,
    ) -> bool
    where
        H: SceneHost<Object = O, Template = T> + ?Sized,
        R: RngCore,
    {
        if mode == ToolMode::View || !event.phase.is_stroke() {
            return false;
        }
        let Some(brush) = self.catalog.active() else {
            return false;
        };

        match event.button {
            PointerButton::Primary => self
                .engine
                .place_with_events(host, &event.ray, brush, rng, sink)
                .placed_any(),
            PointerButton::Secondary => self
                .engine
                .erase_with_events(host, &event.ray, brush, sink)
                .removed_any(),
            PointerButton::Other(_) => false,
        }
    }

    /// Resolves the pointer ray for drawing the active brush's footprint.
    pub fn cursor<H>(&self, host: &mut H, ray: &Ray) -> Option<BrushCursor>
    where
        H: SceneHost<Object = O> + ?Sized,
    {
        let brush = self.catalog.active()?;
        let hit = host.raycast(ray)?;
        Some(BrushCursor {
            center: hit.point,
            normal: hit.normal,
            radius: brush.radius(),
        })
    }
}
