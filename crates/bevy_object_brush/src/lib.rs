//! Bevy plugin for object_brush: paint, randomize and erase scene instances
//! with the mouse.
//!
//! Open the tool by triggering [`OpenObjectBrush`], then fill its catalog
//! through the [`ObjectBrushTool`] resource and pick an active brush. The
//! paint button paints, the erase button erases, and the brush footprint is
//! drawn with gizmos under the cursor.
#![forbid(unsafe_code)]

use bevy::prelude::*;
pub use events::{
    ApplyPaintedInstances, BrushStrokeMessage, CloseObjectBrush, OpenObjectBrush,
    RemoveAllPaintedInstances, UndoBrushStroke,
};
pub use history::{BrushHistory, HistoryEntry};
pub use host::{BrushSceneHost, BrushTemplate, PaintedInstance};
pub use input::{BrushCamera, EditorToolMode};
use object_brush::prelude::*;
pub use previews::BrushPreviews;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::events::MessageSink;

mod cursor;
mod events;
mod history;
mod host;
mod input;
mod previews;

/// Convenient re-exports for common types. Import with `use bevy_object_brush::prelude::*;`.
pub mod prelude {
    pub use object_brush::prelude::*;

    pub use crate::events::{
        ApplyPaintedInstances, BrushStrokeMessage, CloseObjectBrush, OpenObjectBrush,
        RemoveAllPaintedInstances, UndoBrushStroke,
    };
    pub use crate::history::{BrushHistory, HistoryEntry};
    pub use crate::host::{BrushSceneHost, BrushTemplate, PaintedInstance};
    pub use crate::input::{BrushCamera, EditorToolMode};
    pub use crate::previews::BrushPreviews;
    pub use crate::{ObjectBrushPlugin, ObjectBrushSettings, ObjectBrushTool, ParkedStrokes};
}

/// Bevy plugin providing the brush resources, events, messages and systems.
///
/// Insert [`ObjectBrushSettings`] before adding the plugin to change the
/// defaults, including the RNG seed.
pub struct ObjectBrushPlugin;

/// Input bindings, cursor styling and brush defaults.
#[derive(Resource, Debug, Clone)]
pub struct ObjectBrushSettings {
    pub paint_button: MouseButton,
    pub erase_button: MouseButton,
    /// Key that opens and closes the tool, if any.
    pub toggle_key: Option<KeyCode>,
    pub show_cursor: bool,
    pub cursor_color: Color,
    pub normal_color: Color,
    pub normal_length: f32,
    /// Defaults for brushes added to the catalog.
    pub defaults: BrushDefaults,
    pub seed: u64,
}

impl Default for ObjectBrushSettings {
    fn default() -> Self {
        Self {
            paint_button: MouseButton::Left,
            erase_button: MouseButton::Right,
            toggle_key: None,
            show_cursor: true,
            cursor_color: Color::srgba(0.2, 0.8, 1.0, 0.8),
            normal_color: Color::WHITE,
            normal_length: 5.0,
            defaults: BrushDefaults::default(),
            seed: 0x0B1E_C7B2,
        }
    }
}

impl ObjectBrushSettings {
    pub fn with_paint_button(mut self, button: MouseButton) -> Self {
        self.paint_button = button;
        self
    }

    pub fn with_erase_button(mut self, button: MouseButton) -> Self {
        self.erase_button = button;
        self
    }

    pub fn with_toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = Some(key);
        self
    }

    pub fn with_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    pub fn with_defaults(mut self, defaults: BrushDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// The open brush tool. Present only between [`OpenObjectBrush`] and
/// [`CloseObjectBrush`].
#[derive(Resource, Debug)]
pub struct ObjectBrushTool {
    session: BrushSession<BrushTemplate, Entity>,
}

impl ObjectBrushTool {
    pub fn session(&self) -> &BrushSession<BrushTemplate, Entity> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut BrushSession<BrushTemplate, Entity> {
        &mut self.session
    }

    pub fn catalog(&self) -> &BrushCatalog<BrushTemplate> {
        self.session.catalog()
    }

    pub fn catalog_mut(&mut self) -> &mut BrushCatalog<BrushTemplate> {
        self.session.catalog_mut()
    }

    /// Instances painted and still erasable.
    pub fn tracked(&self) -> &StrokeEngine<Entity> {
        self.session.engine()
    }
}

/// Instances painted before the tool was closed, kept for the next open.
#[derive(Resource, Debug, Default)]
pub struct ParkedStrokes(pub Option<StrokeEngine<Entity>>);

#[derive(Resource)]
struct BrushRng(StdRng);

impl FromWorld for BrushRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<ObjectBrushSettings>()
            .map_or(ObjectBrushSettings::default().seed, |settings| settings.seed);
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Plugin for ObjectBrushPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BrushStrokeMessage>()
            .init_resource::<ObjectBrushSettings>()
            .init_resource::<EditorToolMode>()
            .init_resource::<BrushHistory>()
            .init_resource::<ParkedStrokes>()
            .init_resource::<BrushPreviews>()
            .init_resource::<BrushRng>()
            .add_systems(
                Update,
                (
                    input::toggle_with_key,
                    input::paint_with_pointer,
                    cursor::draw_brush_cursor,
                )
                    .chain(),
            )
            .add_observer(open_tool)
            .add_observer(close_tool)
            .add_observer(undo_last_creation)
            .add_observer(apply_painted)
            .add_observer(remove_all_painted);
    }
}

/// Engine tracking painted instances, whether or not the tool is open.
fn tracked_strokes<'a>(
    tool: Option<&'a mut ObjectBrushTool>,
    parked: &'a mut ParkedStrokes,
) -> &'a mut StrokeEngine<Entity> {
    match tool {
        Some(tool) => tool.session.engine_mut(),
        None => parked.0.get_or_insert_with(StrokeEngine::default),
    }
}

fn open_tool(
    _open: On<OpenObjectBrush>,
    mut commands: Commands,
    tool: Option<Res<ObjectBrushTool>>,
    mut parked: ResMut<ParkedStrokes>,
    settings: Res<ObjectBrushSettings>,
) {
    if tool.is_some() {
        return;
    }
    let engine = parked.0.take().unwrap_or_default();
    let session = match BrushSession::try_with_defaults(settings.defaults.clone()) {
        Ok(session) => session.with_engine(engine),
        Err(err) => {
            warn!("Object brush defaults invalid, using built-in defaults: {err}");
            BrushSession::reopen(engine)
        }
    };
    info!(
        "Object brush opened ({} instances tracked)",
        session.engine().len()
    );
    commands.insert_resource(ObjectBrushTool { session });
}

fn close_tool(
    _close: On<CloseObjectBrush>,
    mut commands: Commands,
    tool: Option<ResMut<ObjectBrushTool>>,
    mut parked: ResMut<ParkedStrokes>,
) {
    let Some(mut tool) = tool else {
        return;
    };
    let session = std::mem::take(&mut tool.session);
    parked.0 = Some(session.close());
    commands.remove_resource::<ObjectBrushTool>();
    info!("Object brush closed");
}

fn undo_last_creation(
    _undo: On<UndoBrushStroke>,
    mut host: BrushSceneHost,
    mut tool: Option<ResMut<ObjectBrushTool>>,
    mut parked: ResMut<ParkedStrokes>,
) {
    // Entries whose entity was erased or despawned since are skipped.
    while let Some(entry) = host.history.pop() {
        if !host.exists(entry.entity) {
            continue;
        }
        tracked_strokes(tool.as_deref_mut(), &mut parked).forget(entry.entity);
        host.destroy(entry.entity);
        debug!("Undid '{}' ({:?})", entry.label, entry.entity);
        return;
    }
}

fn apply_painted(
    _apply: On<ApplyPaintedInstances>,
    mut tool: Option<ResMut<ObjectBrushTool>>,
    mut parked: ResMut<ParkedStrokes>,
) {
    tracked_strokes(tool.as_deref_mut(), &mut parked).apply_permanently();
}

fn remove_all_painted(
    _remove: On<RemoveAllPaintedInstances>,
    mut host: BrushSceneHost,
    mut tool: Option<ResMut<ObjectBrushTool>>,
    mut parked: ResMut<ParkedStrokes>,
    mut writer: MessageWriter<BrushStrokeMessage>,
) {
    let mut sink = MessageSink::new(&mut writer);
    tracked_strokes(tool.as_deref_mut(), &mut parked).remove_all_with_events(&mut host, &mut sink);
}
