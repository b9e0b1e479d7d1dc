pub mod auth;
pub mod cli;
pub mod config;
pub mod ideas;
pub mod metrics;
pub mod models;
pub mod roadmap;
pub mod settings;
pub mod storage;
pub mod utils;

pub use auth::SessionStore;
pub use config::Config;
pub use ideas::IdeaCatalog;
pub use models::{Account, Milestone, MilestoneStatus, Priority, SessionUser};
pub use roadmap::RoadmapStore;
pub use settings::SettingsStore;
pub use storage::{MemoryStorage, SqliteStorage, Storage};
pub use utils::Profile;
