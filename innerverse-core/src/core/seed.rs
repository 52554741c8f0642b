//! Built-in categories seeded into a fresh journal.

use crate::Category;
use chrono::{DateTime, Utc};

/// Ids of the built-in categories the app never offers to delete.
pub const PROTECTED_CATEGORY_IDS: [&str; 3] = ["1", "2", "3"];

/// `(id, name, icon, color)` for every built-in category, in display order.
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("1", "Daily Reflections", "book-outline", "#3B82F6"),
    ("2", "Gratitude", "heart-outline", "#10B981"),
    ("3", "Goals & Dreams", "target-outline", "#F59E0B"),
    ("4", "Challenges", "fitness-outline", "#EF4444"),
    ("5", "Ideas & Creativity", "bulb-outline", "#8B5CF6"),
    ("7", "Health & Wellness", "medical-outline", "#06B6D4"),
    ("8", "Learning", "school-outline", "#84CC16"),
];

/// Returns the built-in categories, all empty and stamped with `now`.
pub fn default_categories(now: DateTime<Utc>) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, icon, color)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            icon: (*icon).to_string(),
            color: (*color).to_string(),
            count: 0,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Whether `id` names a built-in category the presentation layer must not delete.
///
/// The store does not enforce this; `delete_category` removes any id.
pub fn is_protected_category(id: &str) -> bool {
    PROTECTED_CATEGORY_IDS.contains(&id)
}
