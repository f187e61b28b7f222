use clap::{Parser, ValueEnum};
use migration::sea_orm::Database;
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Codebreaker database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL (postgres or sqlite file)
    #[arg(
        short,
        long,
        env = "CODEBREAKER_DB_URL",
        default_value = "sqlite://codebreaker.db?mode=rwc"
    )]
    url: String,
}

fn is_memory_url(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if is_memory_url(&args.url) {
        eprintln!("In-memory SQLite databases are not supported for CLI operations:");
        eprintln!("each run would migrate a fresh database that disappears on exit.");
        eprintln!("Pass a postgres URL or a sqlite file URL instead.");
        std::process::exit(2);
    }

    let db = match Database::connect(&args.url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Could not connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
