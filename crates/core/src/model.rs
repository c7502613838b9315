//! Designer and scene-object records, their creation inputs and patches.
//!
//! Records serialize with camelCase keys so the persisted JSON layout stays
//! readable by the browser build of the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Designer
// ---------------------------------------------------------------------------

/// A designer who owns scene objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designer {
    pub id: String,
    pub full_name: String,
    /// `HH:MM-HH:MM`, 24-hour clock.
    pub working_hours: String,
}

/// DTO for creating a designer. The id is assigned by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesigner {
    pub full_name: String,
    pub working_hours: String,
}

impl CreateDesigner {
    /// Attach an id, producing the stored record.
    pub fn into_designer(self, id: String) -> Designer {
        Designer {
            id,
            full_name: self.full_name,
            working_hours: self.working_hours,
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in scene space. Range is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Return a copy with one axis replaced.
    pub fn with_axis(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
            Axis::Z => Self { z: value, ..self },
        }
    }

    /// False when any coordinate is NaN or infinite. Such values have no
    /// JSON encoding and cannot be stored.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// One of the three position axes edited in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

// ---------------------------------------------------------------------------
// ObjectSize
// ---------------------------------------------------------------------------

/// Discrete box size of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl ObjectSize {
    pub const ALL: [ObjectSize; 3] = [Self::Small, Self::Normal, Self::Large];

    /// Parse from the serialized name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "small" => Ok(Self::Small),
            "normal" => Ok(Self::Normal),
            "large" => Ok(Self::Large),
            other => Err(CoreError::Validation(format!(
                "Unknown object size '{other}'. Must be one of: small, normal, large"
            ))),
        }
    }

    /// Serialized name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Normal => "Normal",
            Self::Large => "Large",
        }
    }

    /// Edge length of the rendered box.
    pub fn scale(self) -> f64 {
        match self {
            Self::Small => 0.5,
            Self::Normal => 1.0,
            Self::Large => 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// SceneObject
// ---------------------------------------------------------------------------

/// A box placed in the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: String,
    pub name: String,
    /// Not referentially enforced; may point at a designer that no longer
    /// exists.
    pub designer_id: String,
    /// Hex color, e.g. `#22c55e`.
    pub color: String,
    pub position: Vector3,
    pub size: ObjectSize,
}

impl SceneObject {
    /// Shallow merge: every field set on `patch` overrides, the rest is kept.
    pub fn apply(&mut self, patch: &SceneObjectPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(designer_id) = &patch.designer_id {
            self.designer_id.clone_from(designer_id);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
    }

    /// Consuming variant of [`apply`](Self::apply).
    pub fn merged(mut self, patch: &SceneObjectPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// DTO for creating a scene object. The id is assigned by the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSceneObject {
    pub name: String,
    pub designer_id: String,
    pub color: String,
    pub position: Vector3,
    pub size: ObjectSize,
}

impl CreateSceneObject {
    pub fn into_object(self, id: String) -> SceneObject {
        SceneObject {
            id,
            name: self.name,
            designer_id: self.designer_id,
            color: self.color,
            position: self.position,
            size: self.size,
        }
    }
}

/// DTO for updating an existing scene object. All fields are optional;
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ObjectSize>,
}

impl SceneObjectPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn designer(designer_id: impl Into<String>) -> Self {
        Self {
            designer_id: Some(designer_id.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn position(position: Vector3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn size(size: ObjectSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designer_id.is_none()
            && self.color.is_none()
            && self.position.is_none()
            && self.size.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
