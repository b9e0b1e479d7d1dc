use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::auth::{AuthError, SessionStore};
use crate::config::Config;
use crate::ideas::{INDUSTRIES, IdeaCatalog};
use crate::metrics;
use crate::models::{MilestoneStatus, Priority, ProfileUpdate};
use crate::roadmap::RoadmapStore;
use crate::settings::SettingsStore;
use crate::storage::{Storage, StorageError};
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "startupnest")]
#[command(about = "StartupNest - plan your startup: account, idea catalog and milestone roadmap")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Register {
        /// Account email
        email: String,
        /// Account password (at least 8 characters)
        password: String,
        /// Display name
        name: String,
    },
    /// Log in with an existing account
    Login {
        email: String,
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the currently logged-in account
    Whoami,
    /// Update profile fields of the logged-in account
    UpdateProfile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New profile picture (path or URL)
        #[arg(long)]
        picture: Option<String>,
    },
    /// Add a milestone to the end of the roadmap
    AddMilestone {
        /// Milestone title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Priority: low, medium or high (defaults to the configured priority)
        #[arg(long)]
        priority: Option<String>,
    },
    /// List the roadmap with progress counts
    Milestones,
    /// Set a milestone's status: pending, in-progress or completed
    SetStatus {
        /// Milestone id
        id: String,
        /// New status
        status: String,
    },
    /// Remove a milestone from the roadmap
    DeleteMilestone {
        /// Milestone id
        id: String,
    },
    /// Move a milestone to a new position (1-based, as shown by `milestones`)
    MoveMilestone {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },
    /// Seed an empty roadmap with the starter plan
    InitRoadmap,
    /// Browse the idea catalog
    Ideas {
        /// Substring to match against idea titles and descriptions
        #[arg(long, default_value = "")]
        search: String,
        /// Industry filter (use "All" for everything)
        #[arg(long, default_value = "All")]
        industry: String,
        /// Present the catalog in a fresh order
        #[arg(long)]
        shuffle: bool,
    },
    /// Like (or unlike) an idea by id
    LikeIdea {
        /// Idea id
        id: String,
    },
    /// Show notification preferences
    Prefs,
    /// Set one notification preference
    SetPref {
        /// One of: email-alerts, push-notifications, weekly-digest, marketing-emails
        key: String,
        /// true or false
        value: bool,
    },
    /// Show analytics metrics
    Metrics,
    /// Export profile and preferences as JSON
    Export {
        /// Output file (defaults to startupnest-data.json)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Same shape check the login form performed: something@something.tld,
/// no whitespace anywhere
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), CliError> {
    if !is_valid_email(email) {
        return Err(CliError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    if password.len() < 8 {
        return Err(CliError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    Ok(())
}

/// Handle the register command
pub fn handle_register<S: Storage>(
    email: String,
    password: String,
    name: String,
    storage: &S,
) -> Result<(), CliError> {
    check_credentials(&email, &password)?;

    let mut sessions = SessionStore::new(storage)?;
    match sessions.register(&email, &password, &name)? {
        Some(user) => println!("Welcome to StartupNest, {}! Logged in as {}", user.name, user.email),
        None => println!("An account with email '{}' already exists", email),
    }

    Ok(())
}

/// Handle the login command
pub fn handle_login<S: Storage>(
    email: String,
    password: String,
    storage: &S,
) -> Result<(), CliError> {
    check_credentials(&email, &password)?;

    let mut sessions = SessionStore::new(storage)?;
    match sessions.login(&email, &password)? {
        Some(user) => println!("Logged in as {} ({})", user.name, user.email),
        None => println!("Invalid email or password"),
    }

    Ok(())
}

/// Handle the logout command
pub fn handle_logout<S: Storage>(storage: &S) -> Result<(), CliError> {
    let mut sessions = SessionStore::new(storage)?;
    let was_authenticated = sessions.is_authenticated();
    sessions.logout()?;

    if was_authenticated {
        println!("Logged out");
    } else {
        println!("No active session");
    }

    Ok(())
}

/// Handle the whoami command
pub fn handle_whoami<S: Storage>(storage: &S) -> Result<(), CliError> {
    let sessions = SessionStore::new(storage)?;
    match sessions.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("  id:      {}", user.id);
            println!("  since:   {}", user.created_at);
            if let Some(picture) = &user.profile_picture {
                println!("  picture: {}", picture);
            }
        }
        None => println!("Not logged in"),
    }

    Ok(())
}

/// Handle the update-profile command
pub fn handle_update_profile<S: Storage>(
    name: Option<String>,
    picture: Option<String>,
    storage: &S,
) -> Result<(), CliError> {
    let update = ProfileUpdate {
        name,
        profile_picture: picture,
    };
    if update.is_empty() {
        return Err(CliError::Validation(
            "Nothing to update: pass --name and/or --picture".to_string(),
        ));
    }

    let mut sessions = SessionStore::new(storage)?;
    if sessions.update_profile(&update)? {
        println!("Profile updated");
    } else {
        println!("Not logged in");
    }

    Ok(())
}

/// Handle the add-milestone command
pub fn handle_add_milestone<S: Storage>(
    title: String,
    due: String,
    description: String,
    priority: Option<String>,
    config: &Config,
    storage: &S,
) -> Result<(), CliError> {
    // Validate date format before it enters the roadmap
    parse_date(&due).map_err(|e| {
        CliError::DateParseError(format!("Invalid date format '{}': {}", due, e))
    })?;

    let priority_str = priority.unwrap_or_else(|| config.default_priority.clone());
    let priority = priority_str
        .parse::<Priority>()
        .map_err(CliError::Validation)?;

    let mut roadmap = RoadmapStore::new(storage)?;
    match roadmap.add(&title, &description, &due, priority)? {
        Some(milestone) => println!("Milestone added (ID: {})", milestone.id),
        None => println!("Title and due date must not be empty"),
    }

    Ok(())
}

/// Handle the milestones command
pub fn handle_list_milestones<S: Storage>(storage: &S) -> Result<(), CliError> {
    let roadmap = RoadmapStore::new(storage)?;

    if roadmap.is_empty() {
        println!("The roadmap is empty. Add a milestone or run `init-roadmap` to seed the starter plan.");
        return Ok(());
    }

    let counts = roadmap.status_counts();
    println!(
        "Roadmap: {} completed, {} in progress, {} pending",
        counts.completed, counts.in_progress, counts.pending
    );
    println!();

    for (position, milestone) in roadmap.milestones().iter().enumerate() {
        println!(
            "#{} [{}] {} (due {}, {} priority, ID: {})",
            position + 1,
            milestone.status,
            milestone.title,
            milestone.due_date,
            milestone.priority,
            milestone.id
        );
        if !milestone.description.is_empty() {
            println!("    {}", milestone.description);
        }
    }

    Ok(())
}

/// Handle the set-status command
pub fn handle_set_status<S: Storage>(
    id: String,
    status: String,
    storage: &S,
) -> Result<(), CliError> {
    let status = status
        .parse::<MilestoneStatus>()
        .map_err(CliError::Validation)?;

    let mut roadmap = RoadmapStore::new(storage)?;
    if roadmap.update_status(&id, status)? {
        println!("Milestone {} is now {}", id, status);
    } else {
        println!("No milestone with ID {}", id);
    }

    Ok(())
}

/// Handle the delete-milestone command
pub fn handle_delete_milestone<S: Storage>(id: String, storage: &S) -> Result<(), CliError> {
    let mut roadmap = RoadmapStore::new(storage)?;
    if roadmap.delete(&id)? {
        println!("Milestone {} deleted", id);
    } else {
        println!("No milestone with ID {}", id);
    }

    Ok(())
}

/// Handle the move-milestone command (positions are 1-based, as displayed)
pub fn handle_move_milestone<S: Storage>(
    from: usize,
    to: usize,
    storage: &S,
) -> Result<(), CliError> {
    if from == 0 || to == 0 {
        return Err(CliError::Validation(
            "Positions are 1-based; use the numbers shown by `milestones`".to_string(),
        ));
    }

    let mut roadmap = RoadmapStore::new(storage)?;
    if roadmap.move_milestone(from - 1, to - 1)? {
        println!("Moved milestone from position {} to {}", from, to);
    } else {
        println!(
            "Position out of range: the roadmap has {} milestone(s)",
            roadmap.len()
        );
    }

    Ok(())
}

/// Handle the init-roadmap command
pub fn handle_init_roadmap<S: Storage>(storage: &S) -> Result<(), CliError> {
    let mut roadmap = RoadmapStore::new(storage)?;
    if roadmap.init_starter()? {
        println!("Seeded the roadmap with the {}-milestone starter plan", roadmap.len());
    } else {
        println!("The roadmap already has milestones; leaving it untouched");
    }

    Ok(())
}

/// Handle the ideas command
pub fn handle_ideas<S: Storage>(
    search: String,
    industry: String,
    shuffle: bool,
    storage: &S,
) -> Result<(), CliError> {
    if !INDUSTRIES.contains(&industry.as_str()) {
        return Err(CliError::Validation(format!(
            "Unknown industry '{}' (choose one of: {})",
            industry,
            INDUSTRIES.join(", ")
        )));
    }

    let mut catalog = IdeaCatalog::new(storage)?;
    if shuffle {
        catalog.shuffle();
    }

    let matches = catalog.filtered(&search, &industry);
    if matches.is_empty() {
        println!("No ideas found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    for idea in &matches {
        let liked = if catalog.is_liked(&idea.id) { " ♥" } else { "" };
        println!(
            "[{}] {}{} — {} (rating {}, {} difficulty, {} market potential, {} views)",
            idea.id, idea.title, liked, idea.industry, idea.rating, idea.difficulty,
            idea.market_potential, idea.views
        );
        println!("    {}", idea.description);
        println!("    Target market: {}", idea.target_market);
        println!("    Revenue model: {}", idea.revenue_model);
        for feature in &idea.key_features {
            println!("      • {}", feature);
        }
    }

    println!();
    println!(
        "{} idea(s) shown, {} liked",
        matches.len(),
        catalog.liked().len()
    );

    Ok(())
}

/// Handle the like-idea command
pub fn handle_like_idea<S: Storage>(id: String, storage: &S) -> Result<(), CliError> {
    let mut catalog = IdeaCatalog::new(storage)?;
    if !catalog.ideas().iter().any(|idea| idea.id == id) {
        println!("No idea with ID {}", id);
        return Ok(());
    }

    if catalog.toggle_like(&id)? {
        println!("Liked idea {}", id);
    } else {
        println!("Unliked idea {}", id);
    }

    Ok(())
}

/// Handle the prefs command
pub fn handle_prefs<S: Storage>(storage: &S) -> Result<(), CliError> {
    let settings = SettingsStore::new(storage)?;
    let prefs = settings.prefs();

    println!("email-alerts:       {}", prefs.email_alerts);
    println!("push-notifications: {}", prefs.push_notifications);
    println!("weekly-digest:      {}", prefs.weekly_digest);
    println!("marketing-emails:   {}", prefs.marketing_emails);

    Ok(())
}

/// Handle the set-pref command
pub fn handle_set_pref<S: Storage>(key: String, value: bool, storage: &S) -> Result<(), CliError> {
    let mut settings = SettingsStore::new(storage)?;
    if settings.set_pref(&key, value)? {
        println!("{} set to {}", key, value);
    } else {
        return Err(CliError::Validation(format!(
            "Unknown preference '{}' (one of: email-alerts, push-notifications, weekly-digest, marketing-emails)",
            key
        )));
    }

    Ok(())
}

/// Handle the metrics command
pub fn handle_metrics() -> Result<(), CliError> {
    for metric in metrics::headline_metrics() {
        println!("{:<13} {:>7}  ({})", metric.title, metric.value, metric.change);
    }
    println!();

    let growth = metrics::user_growth();
    println!(
        "User growth (last 6 months): {} new users, peak in {}",
        growth.total_new_users(),
        growth.peak_month().unwrap_or("-")
    );
    for ((month, new_users), active) in growth
        .months
        .iter()
        .zip(&growth.new_users)
        .zip(&growth.active_users)
    {
        println!("  {}: {} new, {} active", month, new_users, active);
    }
    println!();

    let views = metrics::weekly_idea_views();
    println!("Idea views this month: {}", views.total());
    for (week, count) in views.weeks.iter().zip(&views.views) {
        println!("  {}: {}", week, count);
    }
    println!();

    println!("Industry distribution:");
    for (industry, pct) in metrics::industry_distribution() {
        println!("  {:<12} {:>3}%", industry, pct);
    }

    Ok(())
}

/// Handle the export command
pub fn handle_export<S: Storage>(output: Option<String>, storage: &S) -> Result<(), CliError> {
    let sessions = SessionStore::new(storage)?;
    let settings = SettingsStore::new(storage)?;

    let json = settings.export(sessions.current_user())?;
    let path = output.unwrap_or_else(|| "startupnest-data.json".to_string());
    std::fs::write(&path, json)?;
    println!("Exported data to {}", path);

    Ok(())
}

/// Default action when no subcommand is given: a dashboard-style summary
pub fn handle_overview<S: Storage>(storage: &S) -> Result<(), CliError> {
    let sessions = SessionStore::new(storage)?;
    match sessions.current_user() {
        Some(user) => println!("Logged in as {} ({})", user.name, user.email),
        None => println!("Not logged in - `register` or `login` to get started"),
    }

    let roadmap = RoadmapStore::new(storage)?;
    let counts = roadmap.status_counts();
    println!(
        "Roadmap: {} milestone(s) - {} completed, {} in progress, {} pending",
        roadmap.len(),
        counts.completed,
        counts.in_progress,
        counts.pending
    );

    let catalog = IdeaCatalog::new(storage)?;
    println!(
        "Idea catalog: {} idea(s), {} liked",
        catalog.ideas().len(),
        catalog.liked().len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_check_matches_the_login_form() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));

        assert!(!is_valid_email("ax.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@xcom"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@x.com "));
        assert!(!is_valid_email("a@@x.com"));
    }

    #[test]
    fn short_passwords_are_rejected_before_hitting_the_store() {
        let err = check_credentials("a@x.com", "short").expect_err("too short");
        assert!(matches!(err, CliError::Validation(_)));
        assert!(check_credentials("a@x.com", "pw123456").is_ok());
    }
}
