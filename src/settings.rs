use serde::Serialize;

use crate::models::{NotificationPrefs, SessionUser};
use crate::storage::{NOTIFICATIONS_KEY, Storage, StorageError};
use crate::utils;

/// Notification preference toggles backed by the `notifications` key.
///
/// Defaults apply until the first toggle is made; only then is the object
/// written out.
pub struct SettingsStore<'a, S: Storage> {
    storage: &'a S,
    prefs: NotificationPrefs,
}

impl<'a, S: Storage> SettingsStore<'a, S> {
    pub fn new(storage: &'a S) -> Result<Self, StorageError> {
        let prefs = storage.get_json(NOTIFICATIONS_KEY)?.unwrap_or_default();
        Ok(Self { storage, prefs })
    }

    pub fn prefs(&self) -> &NotificationPrefs {
        &self.prefs
    }

    /// Set one toggle by its kebab-case name and persist the whole object.
    /// Unknown names are rejected with `false` and nothing is written.
    pub fn set_pref(&mut self, key: &str, value: bool) -> Result<bool, StorageError> {
        match key {
            "email-alerts" => self.prefs.email_alerts = value,
            "push-notifications" => self.prefs.push_notifications = value,
            "weekly-digest" => self.prefs.weekly_digest = value,
            "marketing-emails" => self.prefs.marketing_emails = value,
            _ => return Ok(false),
        }
        self.storage.set_json(NOTIFICATIONS_KEY, &self.prefs)?;
        Ok(true)
    }

    /// Render the exportable account data document as pretty JSON
    pub fn export(&self, profile: Option<&SessionUser>) -> Result<String, StorageError> {
        let export = DataExport {
            profile,
            notifications: &self.prefs,
            export_date: utils::now_iso8601(),
        };
        serde_json::to_string_pretty(&export).map_err(|source| StorageError::Encode {
            key: "export".to_string(),
            source,
        })
    }
}

/// Everything the "Export data" action writes out
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataExport<'a> {
    profile: Option<&'a SessionUser>,
    notifications: &'a NotificationPrefs,
    export_date: String,
}
