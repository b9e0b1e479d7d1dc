use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils;

/// A registered account as kept in the persisted account registry.
///
/// Field names serialize in camelCase. Only a salted argon2 hash of the
/// password is kept, never the password itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: String, // ISO 8601
}

impl Account {
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: utils::next_id(),
            email,
            password_hash,
            name,
            profile_picture: None,
            created_at: utils::now_iso8601(),
        }
    }

    /// Denormalized copy of this account with the credential stripped
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            profile_picture: self.profile_picture.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// The currently authenticated user: an account copy without credentials.
/// This is what gets persisted under the current-session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: String,
}

/// The mutable subset of profile fields. Email and password are not
/// representable here and therefore cannot be smuggled through an update.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_picture.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::InProgress => "in-progress",
            MilestoneStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MilestoneStatus::Pending),
            "in-progress" => Ok(MilestoneStatus::InProgress),
            "completed" => Ok(MilestoneStatus::Completed),
            other => Err(format!(
                "Unknown status '{}' (expected pending, in-progress or completed)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "Unknown priority '{}' (expected low, medium or high)",
                other
            )),
        }
    }
}

/// One planned unit of work in the roadmap. Position in the roadmap list is
/// the milestone's display order; the struct itself carries no order field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String, // YYYY-MM-DD
    pub status: MilestoneStatus,
    pub priority: Priority,
}

impl Milestone {
    /// New milestones always start out pending
    pub fn new(title: String, description: String, due_date: String, priority: Priority) -> Self {
        Self {
            id: utils::next_id(),
            title,
            description,
            due_date,
            status: MilestoneStatus::Pending,
            priority,
        }
    }
}

/// Notification toggles, persisted as one object on every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    pub email_alerts: bool,
    pub push_notifications: bool,
    pub weekly_digest: bool,
    pub marketing_emails: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email_alerts: true,
            push_notifications: true,
            weekly_digest: false,
            marketing_emails: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", s)
    }
}

/// One generated startup idea from the built-in catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupIdea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub industry: String,
    pub rating: f32,
    pub target_market: String,
    pub revenue_model: String,
    pub key_features: Vec<String>,
    pub views: u32,
    pub market_potential: String,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_milestones_start_pending() {
        let m = Milestone::new(
            "Design".to_string(),
            String::new(),
            "2024-05-01".to_string(),
            Priority::Low,
        );
        assert_eq!(m.status, MilestoneStatus::Pending);
        assert!(!m.id.is_empty());
    }

    #[test]
    fn session_user_never_carries_the_credential() {
        let account = Account::new(
            "a@x.com".to_string(),
            "$argon2id$fake".to_string(),
            "Ann".to_string(),
        );
        let user = account.to_session_user();
        let json = serde_json::to_string(&user).expect("serializable");
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
        assert_eq!(user.id, account.id);
    }

    #[test]
    fn status_round_trips_through_kebab_case() {
        let json = serde_json::to_string(&MilestoneStatus::InProgress).expect("serializable");
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(
            "in-progress".parse::<MilestoneStatus>(),
            Ok(MilestoneStatus::InProgress)
        );
        assert!("done".parse::<MilestoneStatus>().is_err());
    }

    #[test]
    fn milestone_json_uses_camel_case_field_names() {
        let m = Milestone::new(
            "Beta Testing".to_string(),
            "Launch beta".to_string(),
            "2024-04-30".to_string(),
            Priority::High,
        );
        let json = serde_json::to_string(&m).expect("serializable");
        assert!(json.contains("\"dueDate\":\"2024-04-30\""));
        assert!(json.contains("\"priority\":\"high\""));
    }
}
