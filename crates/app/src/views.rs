//! View models consumed by the presentational layer.

use std::collections::HashMap;

use scenedesk_core::validation::{DesignerForm, FormErrors};
use scenedesk_core::{Designer, SceneObject};
use serde::Serialize;

use crate::stores::DesignersStore;

/// One row of the designers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerRow {
    pub id: String,
    pub full_name: String,
    pub working_hours: String,
    /// Objects whose `designer_id` equals this row's id.
    pub attached_objects_count: usize,
}

/// Table rows in designer order. Objects pointing at unknown designers are
/// not counted anywhere.
pub fn designer_rows(designers: &[Designer], objects: &[SceneObject]) -> Vec<DesignerRow> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for object in objects {
        *counts.entry(object.designer_id.as_str()).or_default() += 1;
    }

    designers
        .iter()
        .map(|d| DesignerRow {
            id: d.id.clone(),
            full_name: d.full_name.clone(),
            working_hours: d.working_hours.clone(),
            attached_objects_count: counts.get(d.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Entry of a designer select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignerOption {
    pub value: String,
    pub label: String,
}

/// `"Full Name (HH:MM-HH:MM)"` labels keyed by designer id.
pub fn designer_options(designers: &[Designer]) -> Vec<DesignerOption> {
    designers
        .iter()
        .map(|d| DesignerOption {
            value: d.id.clone(),
            label: format!("{} ({})", d.full_name, d.working_hours),
        })
        .collect()
}

/// Validate the "Add new designer" form and create the designer.
///
/// A rejected form returns its field errors without touching the store.
/// Once validation passes, API failures land in the store's `error`.
pub async fn submit_designer_form(
    store: &DesignersStore,
    form: &DesignerForm,
) -> Result<(), FormErrors> {
    let input = form.parse()?;
    store.create(input).await;
    Ok(())
}
