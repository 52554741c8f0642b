//! User preferences persisted alongside the journal.

use serde::{Deserialize, Serialize};

/// Text size used across the journal screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub is_dark_mode: bool,
    pub notifications: bool,
    pub biometric: bool,
    /// Daily reminder time as `HH:MM`.
    pub reminder_time: String,
    pub auto_lock: bool,
    pub font_size: FontSize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            is_dark_mode: true,
            notifications: true,
            biometric: false,
            reminder_time: "21:00".to_string(),
            auto_lock: true,
            font_size: FontSize::Medium,
        }
    }
}

/// A shallow partial update to [`AppSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biometric: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_lock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

impl AppSettings {
    /// Overwrites every field present in `patch`. Returns whether anything changed.
    pub(crate) fn merge(&mut self, patch: &SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(v) = patch.is_dark_mode {
            self.is_dark_mode = v;
        }
        if let Some(v) = patch.notifications {
            self.notifications = v;
        }
        if let Some(v) = patch.biometric {
            self.biometric = v;
        }
        if let Some(v) = &patch.reminder_time {
            self.reminder_time = v.clone();
        }
        if let Some(v) = patch.auto_lock {
            self.auto_lock = v;
        }
        if let Some(v) = patch.font_size {
            self.font_size = v;
        }
        *self != before
    }
}
