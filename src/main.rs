use clap::Parser;
use color_eyre::Result;
use startupnest::{
    Config, Profile, SqliteStorage,
    cli::{self, Cli, Commands},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Log to stderr; silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Open the key-value storage backing every store
    let db_path = config.get_database_path();
    let storage = SqliteStorage::open(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    // Dispatch to the appropriate command handler
    match cli.command {
        None => cli::handle_overview(&storage)?,
        Some(Commands::Register {
            email,
            password,
            name,
        }) => cli::handle_register(email, password, name, &storage)?,
        Some(Commands::Login { email, password }) => {
            cli::handle_login(email, password, &storage)?
        }
        Some(Commands::Logout) => cli::handle_logout(&storage)?,
        Some(Commands::Whoami) => cli::handle_whoami(&storage)?,
        Some(Commands::UpdateProfile { name, picture }) => {
            cli::handle_update_profile(name, picture, &storage)?
        }
        Some(Commands::AddMilestone {
            title,
            due,
            description,
            priority,
        }) => cli::handle_add_milestone(title, due, description, priority, &config, &storage)?,
        Some(Commands::Milestones) => cli::handle_list_milestones(&storage)?,
        Some(Commands::SetStatus { id, status }) => cli::handle_set_status(id, status, &storage)?,
        Some(Commands::DeleteMilestone { id }) => cli::handle_delete_milestone(id, &storage)?,
        Some(Commands::MoveMilestone { from, to }) => {
            cli::handle_move_milestone(from, to, &storage)?
        }
        Some(Commands::InitRoadmap) => cli::handle_init_roadmap(&storage)?,
        Some(Commands::Ideas {
            search,
            industry,
            shuffle,
        }) => cli::handle_ideas(search, industry, shuffle, &storage)?,
        Some(Commands::LikeIdea { id }) => cli::handle_like_idea(id, &storage)?,
        Some(Commands::Prefs) => cli::handle_prefs(&storage)?,
        Some(Commands::SetPref { key, value }) => cli::handle_set_pref(key, value, &storage)?,
        Some(Commands::Metrics) => cli::handle_metrics()?,
        Some(Commands::Export { output }) => cli::handle_export(output, &storage)?,
    }

    Ok(())
}
