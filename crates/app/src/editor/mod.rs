//! 3D editor interaction layer.
//!
//! Turns pointer gestures into store actions and derives what each object
//! should look like. Selection and hover live in the objects store; the drag
//! preview and canvas notices are local to the session and never persisted.
//!
//! A drag is two-phase: pointer movement only updates the local preview,
//! and releasing the pointer commits the final position with a single
//! `update` call.

pub mod notice;
pub mod properties;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use scenedesk_core::{CreateSceneObject, ObjectSize, SceneObjectPatch, Vector3};
use scenedesk_events::{ChangeKind, EventBus, StoreEvent, StoreKind};
use tokio_util::sync::CancellationToken;

use crate::stores::{load_if_empty, lock, DesignersStore, ObjectsState, ObjectsStore};

pub use notice::{Notice, NoticeBoard, DEFAULT_NOTICE_DURATION};
pub use properties::{PropertiesPanel, PropertiesView};

/// Color given to objects created by double-clicking the ground.
pub const DEFAULT_OBJECT_COLOR: &str = "#22c55e";

/// Display color of the hovered object.
pub const HOVER_COLOR: &str = "#38bdf8";

/// Display color of the selected object.
pub const SELECTED_COLOR: &str = "#eab308";

/// Shown when the ground is double-clicked with no designer chosen.
pub const NO_DESIGNER_NOTICE: &str = "Select a designer before adding objects.";

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// A discrete pointer interaction on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    PointerEnter(String),
    PointerLeave(String),
    Click(String),
    ClearSelection,
    /// Double-click on the ground plane at a scene point. Non-finite
    /// points are ignored.
    GroundDoubleClick(Vector3),
    /// Intermediate pointer movement while dragging the selected object.
    /// Non-finite points are ignored.
    DragMove { id: String, position: Vector3 },
    /// Pointer released at the end of a drag.
    DragRelease { id: String },
}

/// What happened to a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Applied,
    /// Not applicable in the current state (e.g. dragging an unselected
    /// object); nothing changed.
    Ignored,
    /// Refused with a user-facing notice.
    Rejected(String),
}

/// Per-object interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Hovered,
    Selected,
    /// Selected and being dragged.
    Dragging,
}

/// Everything a renderer needs to draw one object.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedObject {
    pub id: String,
    /// Stored position, or the drag preview while one exists.
    pub position: Vector3,
    /// Box edge length.
    pub scale: f64,
    pub color: String,
    pub state: InteractionState,
}

#[derive(Debug, Clone, PartialEq)]
struct DragPreview {
    object_id: String,
    position: Vector3,
    /// Released and waiting for the commit to resolve.
    committing: bool,
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

/// Editor state for one mounted canvas.
pub struct EditorSession {
    designers: Arc<DesignersStore>,
    objects: Arc<ObjectsStore>,
    event_bus: Arc<EventBus>,
    drag: Mutex<Option<DragPreview>>,
    notices: Arc<NoticeBoard>,
    cancel: CancellationToken,
}

impl EditorSession {
    pub fn new(
        designers: Arc<DesignersStore>,
        objects: Arc<ObjectsStore>,
        event_bus: Arc<EventBus>,
        notice_duration: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            designers,
            objects,
            event_bus,
            drag: Mutex::new(None),
            notices: Arc::new(NoticeBoard::new(notice_duration)),
            cancel,
        }
    }

    /// Fetch whichever collections are still empty.
    pub async fn mount(&self) {
        load_if_empty(&self.designers, &self.objects).await;
    }

    /// Pick the designer new objects are attributed to. An empty id clears
    /// the choice.
    pub fn choose_designer(&self, id: Option<String>) {
        self.designers.set_selected(id.filter(|id| !id.is_empty()));
    }

    pub fn properties(&self) -> PropertiesPanel {
        PropertiesPanel::new(Arc::clone(&self.designers), Arc::clone(&self.objects))
    }

    /// Visible canvas notice, if any.
    pub fn notice(&self) -> Option<String> {
        self.notices.active().map(|n| n.message)
    }

    /// Dispatch a gesture.
    pub async fn handle(&self, gesture: Gesture) -> GestureOutcome {
        match gesture {
            Gesture::PointerEnter(id) => {
                self.objects.set_hovered(Some(id));
                GestureOutcome::Applied
            }
            Gesture::PointerLeave(id) => {
                if self.objects.hovered_id().as_deref() == Some(id.as_str()) {
                    self.objects.set_hovered(None);
                    GestureOutcome::Applied
                } else {
                    GestureOutcome::Ignored
                }
            }
            Gesture::Click(id) => {
                self.discard_drag_unless(Some(id.as_str()));
                self.objects.set_selected(Some(id));
                GestureOutcome::Applied
            }
            Gesture::ClearSelection => {
                self.discard_drag_unless(None);
                self.objects.set_selected(None);
                GestureOutcome::Applied
            }
            Gesture::GroundDoubleClick(point) => self.create_at(point).await,
            Gesture::DragMove { id, position } => self.drag_to(id, position),
            Gesture::DragRelease { id } => self.release(&id).await,
        }
    }

    /// Interaction state of one object.
    pub fn state_of(&self, id: &str) -> InteractionState {
        let state = self.objects.snapshot();
        let preview = lock(&self.drag).clone();
        classify(&state, preview.as_ref(), id)
    }

    /// Render descriptors for every object, in collection order.
    pub fn scene(&self) -> Vec<RenderedObject> {
        let state = self.objects.snapshot();
        let preview = lock(&self.drag).clone();

        state
            .objects
            .iter()
            .map(|object| {
                let interaction = classify(&state, preview.as_ref(), &object.id);
                let position = match &preview {
                    Some(p) if p.object_id == object.id => p.position,
                    _ => object.position,
                };
                let color = match interaction {
                    InteractionState::Selected | InteractionState::Dragging => SELECTED_COLOR,
                    InteractionState::Hovered => HOVER_COLOR,
                    InteractionState::Idle => object.color.as_str(),
                };

                RenderedObject {
                    id: object.id.clone(),
                    position,
                    scale: object.size.scale(),
                    color: color.to_string(),
                    state: interaction,
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Gesture handlers
    // -----------------------------------------------------------------------

    async fn create_at(&self, point: Vector3) -> GestureOutcome {
        if !point.is_finite() {
            tracing::debug!(?point, "Ground double-click at a non-finite point ignored");
            return GestureOutcome::Ignored;
        }
        let Some(designer_id) = self.designers.selected_id() else {
            tracing::debug!("Ground double-click without a designer; rejected");
            self.show_notice(NO_DESIGNER_NOTICE);
            return GestureOutcome::Rejected(NO_DESIGNER_NOTICE.to_string());
        };

        let input = CreateSceneObject {
            name: format!("Object {}", self.objects.len() + 1),
            designer_id,
            color: DEFAULT_OBJECT_COLOR.to_string(),
            position: point,
            size: ObjectSize::Normal,
        };
        tracing::debug!(name = %input.name, ?point, "Creating object from ground double-click");
        self.objects.create(input).await;
        GestureOutcome::Applied
    }

    fn drag_to(&self, id: String, position: Vector3) -> GestureOutcome {
        if self.objects.selected_id().as_deref() != Some(id.as_str()) {
            tracing::trace!(object_id = %id, "Drag on unselected object ignored");
            return GestureOutcome::Ignored;
        }
        if !position.is_finite() {
            tracing::debug!(object_id = %id, ?position, "Non-finite drag point ignored");
            return GestureOutcome::Ignored;
        }
        *lock(&self.drag) = Some(DragPreview {
            object_id: id.clone(),
            position,
            committing: false,
        });
        self.emit(ChangeKind::Preview, Some(&id));
        GestureOutcome::Applied
    }

    async fn release(&self, id: &str) -> GestureOutcome {
        let position = {
            let mut drag = lock(&self.drag);
            match drag.as_mut() {
                Some(preview) if preview.object_id == id && !preview.committing => {
                    preview.committing = true;
                    preview.position
                }
                _ => return GestureOutcome::Ignored,
            }
        };

        self.objects
            .update(id, SceneObjectPatch::position(position))
            .await;

        // Drop the preview unless a newer drag replaced it meanwhile.
        {
            let mut drag = lock(&self.drag);
            if drag
                .as_ref()
                .is_some_and(|p| p.object_id == id && p.committing && p.position == position)
            {
                *drag = None;
            }
        }
        self.emit(ChangeKind::Preview, Some(id));
        GestureOutcome::Applied
    }

    /// Drop an uncommitted drag preview unless it belongs to `keep`.
    fn discard_drag_unless(&self, keep: Option<&str>) {
        let mut drag = lock(&self.drag);
        let stale = drag
            .as_ref()
            .is_some_and(|p| !p.committing && Some(p.object_id.as_str()) != keep);
        if stale {
            tracing::debug!("Uncommitted drag preview discarded");
            *drag = None;
        }
    }

    fn show_notice(&self, message: &str) {
        let seq = self.notices.show(message);
        self.emit(ChangeKind::Notice, None);

        // Auto-dismiss; the expiry check in `notice()` covers callers
        // outside a runtime.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let notices = Arc::clone(&self.notices);
            let bus = Arc::clone(&self.event_bus);
            let cancel = self.cancel.clone();
            let duration = notices.duration();
            handle.spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(duration) => {
                        if notices.dismiss(seq) {
                            bus.publish(StoreEvent::new(StoreKind::Editor, ChangeKind::Notice));
                        }
                    }
                }
            });
        }
    }

    fn emit(&self, change: ChangeKind, entity_id: Option<&str>) {
        let event = StoreEvent::new(StoreKind::Editor, change);
        let event = match entity_id {
            Some(id) => event.with_entity(id),
            None => event,
        };
        self.event_bus.publish(event);
    }
}

/// Selection wins over hover; a live (uncommitted) preview marks a drag.
fn classify(state: &ObjectsState, preview: Option<&DragPreview>, id: &str) -> InteractionState {
    if state.selected_object_id.as_deref() == Some(id) {
        match preview {
            Some(p) if p.object_id == id && !p.committing => InteractionState::Dragging,
            _ => InteractionState::Selected,
        }
    } else if state.hovered_object_id.as_deref() == Some(id) {
        InteractionState::Hovered
    } else {
        InteractionState::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
