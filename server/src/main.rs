use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_authn::issue_token;
use platform_db::{DbPool, SeaOrmStore};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{HrModule, store::EmployeeDirectory};
use server::{
    config::AppConfig,
    graphql::{self, GraphqlData},
    http::{self, AppState, ServeConfig},
    seed,
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "staff-server", version, about = "Staff suite: shifts, overtime and payroll")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert one approved demo employee per position.
    Seed,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
    /// Issue a bearer token for an existing employee (development only).
    #[command(name = "token:issue")]
    TokenIssue {
        #[arg(long)]
        employee: Uuid,
        #[arg(long, default_value_t = platform_authn::DEFAULT_TOKEN_TTL_MINUTES)]
        ttl_minutes: i64,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env("staff-server"))?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, Arc::new(AppConfig::load()?)).await,
        Command::Migrate(action) => {
            let config = AppConfig::load()?;
            match action {
                MigrateCommand::Up => migrate_up(&config).await,
                MigrateCommand::Down => migrate_down(&config).await,
            }
        }
        Command::Seed => run_seed(&AppConfig::load()?).await,
        Command::SchemaPrint { output } => schema_print(output),
        Command::TokenIssue {
            employee,
            ttl_minutes,
        } => token_issue(&AppConfig::load()?, employee, ttl_minutes).await,
    }
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let sdl = graphql::schema_sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema snapshot written");
        }
        None => println!("{sdl}"),
    }
    Ok(())
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    config
        .database
        .connect()
        .await
        .context("failed to connect to DATABASE_URL")
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool(&config).await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let schema = graphql::build_schema(GraphqlData {
        hr: HrModule::new(SeaOrmStore::new(pool.clone())),
        payroll_currency: config.payroll_currency.clone(),
    });
    let state = AppState {
        pool,
        schema,
        config,
    };
    http::serve(cmd.into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        bail!(
            "pending migrations detected; run `cargo run -p server -- migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    ensure_migrations(&pool, false).await?;
    let hr = HrModule::new(SeaOrmStore::new(pool));
    for employee in seed::seed_demo(&hr).await? {
        println!("{}\t{}\t{}", employee.id, employee.position, employee.store_id);
    }
    Ok(())
}

async fn token_issue(config: &AppConfig, employee_id: Uuid, ttl_minutes: i64) -> Result<()> {
    let pool = setup_pool(config).await?;
    let store = SeaOrmStore::new(pool);
    let employee = store
        .employee(employee_id)
        .await?
        .with_context(|| format!("employee {employee_id} not found"))?;
    let auth = config.auth.clone().with_ttl_minutes(ttl_minutes);
    let token = issue_token(employee.id, &auth)?;
    info!(employee_id = %employee.id, position = %employee.position, "token issued");
    println!("{token}");
    Ok(())
}
