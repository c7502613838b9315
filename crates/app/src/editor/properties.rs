//! Properties panel bound to the selected object.
//!
//! Every edit issues one `update` immediately; nothing is buffered.

use std::sync::Arc;

use scenedesk_core::ids::short_id;
use scenedesk_core::model::Axis;
use scenedesk_core::{ObjectSize, SceneObjectPatch, Vector3};

use crate::stores::{DesignersStore, ObjectsStore};
use crate::views::{designer_options, DesignerOption};

/// Field values shown for the selected object.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesView {
    pub id: String,
    /// First six characters of the id, shown beside the title.
    pub short_id: String,
    pub name: String,
    pub designer_id: String,
    pub size: ObjectSize,
    pub color: String,
    pub position: Vector3,
    /// Position fields as displayed, two decimals each.
    pub position_fields: [(Axis, String); 3],
}

/// Editing surface for the selected object.
pub struct PropertiesPanel {
    designers: Arc<DesignersStore>,
    objects: Arc<ObjectsStore>,
}

impl PropertiesPanel {
    pub fn new(designers: Arc<DesignersStore>, objects: Arc<ObjectsStore>) -> Self {
        Self { designers, objects }
    }

    /// `None` when nothing is selected.
    pub fn view(&self) -> Option<PropertiesView> {
        let object = self.objects.selected()?;
        let position_fields =
            Axis::ALL.map(|axis| (axis, format!("{:.2}", object.position.axis(axis))));
        Some(PropertiesView {
            short_id: short_id(&object.id).to_string(),
            id: object.id,
            name: object.name,
            designer_id: object.designer_id,
            size: object.size,
            color: object.color,
            position: object.position,
            position_fields,
        })
    }

    /// Choices for the designer select.
    pub fn designer_options(&self) -> Vec<DesignerOption> {
        designer_options(&self.designers.designers())
    }

    /// Choices for the size select: `(value, label)`.
    pub fn size_options(&self) -> Vec<(&'static str, &'static str)> {
        ObjectSize::ALL
            .iter()
            .map(|size| (size.name(), size.label()))
            .collect()
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.apply(SceneObjectPatch::name(name)).await;
    }

    pub async fn set_designer(&self, designer_id: impl Into<String>) {
        self.apply(SceneObjectPatch::designer(designer_id)).await;
    }

    pub async fn set_size(&self, size: ObjectSize) {
        self.apply(SceneObjectPatch::size(size)).await;
    }

    pub async fn set_color(&self, color: impl Into<String>) {
        self.apply(SceneObjectPatch::color(color)).await;
    }

    /// Replace one axis of the position from raw field text. Input that is
    /// not a number becomes `0`.
    pub async fn set_position_axis(&self, axis: Axis, raw: &str) {
        let Some(object) = self.objects.selected() else {
            return;
        };
        let position = object.position.with_axis(axis, coerce_number(raw));
        self.objects
            .update(&object.id, SceneObjectPatch::position(position))
            .await;
    }

    pub fn clear_selection(&self) {
        self.objects.set_selected(None);
    }

    async fn apply(&self, patch: SceneObjectPatch) {
        let Some(id) = self.objects.selected_id() else {
            tracing::trace!("Property edit with no selection ignored");
            return;
        };
        self.objects.update(&id, patch).await;
    }
}

/// Parse the longest numeric prefix of `raw`, falling back to `0`.
///
/// `"1.5"` → 1.5, `"2.5cm"` → 2.5, `"abc"` → 0, `""` → 0.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let mut ends: Vec<usize> = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();
    ends.reverse();
    ends.into_iter()
        .filter_map(|end| trimmed[..end].parse::<f64>().ok())
        .find(|value| value.is_finite())
        .unwrap_or(0.0)
}
