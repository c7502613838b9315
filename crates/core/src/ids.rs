//! Identifier generation.
//!
//! Ids are opaque to consumers: callers compare them, never parse them.

/// Prefix for designer ids.
pub const DESIGNER_PREFIX: &str = "designer";

/// Prefix for scene object ids.
pub const OBJECT_PREFIX: &str = "obj";

/// Generate a fresh collision-resistant id of the form `<prefix>_<uuid>`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Leading characters of an id shown next to the properties panel title.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(6) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
