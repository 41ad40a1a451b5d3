//! # dieta: Command-Line Client
//!
//! Every subcommand maps to one `DietaApi` call and prints the response
//! envelope as pretty JSON.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Startup                                       │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,dieta=debug,sqlx=warn; override with RUST_LOG       │
//! │                                                                         │
//! │  2. Resolve Configuration (config.rs) ────────────────────────────────► │
//! │     • --db, DIETA_DB_PATH, or the platform data directory               │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, foreign keys on                             │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  4. Dispatch Subcommand ──────────────────────────────────────────────► │
//! │     • 2xx: body on stdout, exit 0                                       │
//! │     • 4xx/5xx: body on stderr, exit 1                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```bash
//! dieta diet create '{"goal": "perder peso"}'
//! dieta meal create '{"meal_type": "almoço", "quantity": 300, "foods": ["arroz"], "diet_id": 1}'
//! dieta meal list --diet 1
//! dieta diet delete 1
//! ```

mod config;

use clap::{Args, Parser, Subcommand};
use dieta_db::{Database, DbConfig};
use dieta_service::{ApiResponse, DietaApi};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "dieta")]
#[command(about = "Manage diets, meals and exercises", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (overrides DIETA_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Diet operations
    #[command(subcommand)]
    Diet(DietCommand),

    /// Meal operations
    #[command(subcommand)]
    Meal(MealCommand),

    /// Exercise operations
    #[command(subcommand)]
    Exercise(ExerciseCommand),

    /// Database connectivity and migration status
    Health,
}

#[derive(Subcommand)]
enum DietCommand {
    /// List diets with their meal and exercise counts
    List,
    /// Show one diet with its meals and exercises
    Get { id: i64 },
    /// Create a diet from a JSON payload
    Create { payload: String },
    /// Update the fields present in a JSON payload
    Update { id: i64, payload: String },
    /// Delete a diet and everything attached to it
    Delete { id: i64 },
    /// Attach an existing meal (moving it from any other diet)
    AddMeal { diet_id: i64, meal_id: i64 },
    /// Attach an existing exercise (moving it from any other diet)
    AddExercise { diet_id: i64, exercise_id: i64 },
}

#[derive(Subcommand)]
enum MealCommand {
    List(ListArgs),
    Get { id: i64 },
    Create { payload: String },
    Update { id: i64, payload: String },
    Delete { id: i64 },
    /// Append a food unless it is already listed
    AddFood { id: i64, food: String },
    /// Remove every occurrence of a food
    RemoveFood { id: i64, food: String },
}

#[derive(Subcommand)]
enum ExerciseCommand {
    List(ListArgs),
    Get { id: i64 },
    Create { payload: String },
    Update { id: i64, payload: String },
    Delete { id: i64 },
}

#[derive(Args)]
struct ListArgs {
    /// Only entries attached to this diet
    #[arg(long)]
    diet: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.db)?;
    info!(path = %config.database_path.display(), "Database path determined");

    let db = Database::new(
        DbConfig::new(config.database_path.clone()).max_connections(config.max_connections),
    )
    .await?;
    let api = DietaApi::new(db.clone());

    let response = dispatch(&api, cli.command).await;
    db.close().await;

    emit(&response)
}

async fn dispatch(api: &DietaApi, command: Commands) -> ApiResponse {
    match command {
        Commands::Diet(cmd) => match cmd {
            DietCommand::List => api.list_diets().await,
            DietCommand::Get { id } => api.get_diet(id).await,
            DietCommand::Create { payload } => api.create_diet(&payload).await,
            DietCommand::Update { id, payload } => api.update_diet(id, &payload).await,
            DietCommand::Delete { id } => api.delete_diet(id).await,
            DietCommand::AddMeal { diet_id, meal_id } => api.add_meal(diet_id, meal_id).await,
            DietCommand::AddExercise {
                diet_id,
                exercise_id,
            } => api.add_exercise(diet_id, exercise_id).await,
        },
        Commands::Meal(cmd) => match cmd {
            MealCommand::List(args) => api.list_meals(args.diet).await,
            MealCommand::Get { id } => api.get_meal(id).await,
            MealCommand::Create { payload } => api.create_meal(&payload).await,
            MealCommand::Update { id, payload } => api.update_meal(id, &payload).await,
            MealCommand::Delete { id } => api.delete_meal(id).await,
            MealCommand::AddFood { id, food } => api.add_food(id, &food).await,
            MealCommand::RemoveFood { id, food } => api.remove_food(id, &food).await,
        },
        Commands::Exercise(cmd) => match cmd {
            ExerciseCommand::List(args) => api.list_exercises(args.diet).await,
            ExerciseCommand::Get { id } => api.get_exercise(id).await,
            ExerciseCommand::Create { payload } => api.create_exercise(&payload).await,
            ExerciseCommand::Update { id, payload } => api.update_exercise(id, &payload).await,
            ExerciseCommand::Delete { id } => api.delete_exercise(id).await,
        },
        Commands::Health => api.health().await,
    }
}

/// Prints the envelope and picks the exit code.
fn emit(response: &ApiResponse) -> anyhow::Result<ExitCode> {
    let rendered = serde_json::to_string_pretty(&response.body)?;
    debug!(status = response.status, "Request finished");

    if response.is_success() {
        println!("{}", rendered);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", rendered);
        Ok(ExitCode::FAILURE)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dieta=trace` - Show trace for dieta crates only
/// - Default: INFO level, DEBUG for dieta crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dieta=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
