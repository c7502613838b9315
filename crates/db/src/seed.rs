//! Default records written on first use.

use scenedesk_core::Designer;

/// The three designers present before anyone has created one.
pub fn default_designers() -> Vec<Designer> {
    [
        ("d1", "Alice Cooper", "09:00-17:00"),
        ("d2", "Bob Smith", "10:00-18:00"),
        ("d3", "Clara Johnson", "08:30-16:30"),
    ]
    .into_iter()
    .map(|(id, full_name, working_hours)| Designer {
        id: id.to_string(),
        full_name: full_name.to_string(),
        working_hours: working_hours.to_string(),
    })
    .collect()
}
