use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use studentfeed_cli::seeder::{self, SeedConfig};
use studentfeed_config::{JwtConfig, ServerConfig, StorageBackend};
use studentfeed_db::{PgPool, Store};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "studentfeed-cli")]
#[command(about = "Studentfeed CLI - Administrative tools for Studentfeed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Print a bearer token for an existing student
    IssueToken {
        /// Id of the student the token is issued for
        #[arg(short = 's', long)]
        student_id: Uuid,
    },
    /// Seed the database with fake students, posts and comments
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "10")]
        students: usize,

        /// Number of posts per student
        #[arg(short = 'p', long, default_value = "3")]
        posts: usize,

        /// Number of comments per post
        #[arg(short = 'c', long, default_value = "2")]
        comments: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => handle_migrate().await,
        Commands::IssueToken { student_id } => handle_issue_token(student_id).await,
        Commands::Seed {
            students,
            posts,
            comments,
        } => handle_seed(students, posts, comments).await,
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

async fn connect() -> PgPool {
    let config = ServerConfig::from_env().unwrap_or_else(|e| fail("Invalid configuration", e));

    if config.storage != StorageBackend::Postgres {
        fail(
            "Invalid configuration",
            "the CLI only operates on the postgres storage backend",
        );
    }
    let Some(database_url) = config.database_url else {
        fail("Invalid configuration", "DATABASE_URL must be set");
    };

    studentfeed_db::init_db_pool(&database_url, config.max_connections)
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e))
}

async fn handle_migrate() {
    let pool = connect().await;

    match studentfeed_db::run_migrations(&pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error applying migrations", e),
    }
}

async fn handle_issue_token(student_id: Uuid) {
    let jwt_config = JwtConfig::from_env().unwrap_or_else(|e| fail("Invalid configuration", e));
    let store = Store::postgres(connect().await);

    match store.students.find_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => fail("Error issuing token", "Student not found"),
        Err(e) => fail("Error issuing token", e),
    }

    match studentfeed_auth::issue_token(student_id, &jwt_config) {
        Ok(token) => println!("{}", token),
        Err(e) => fail("Error issuing token", e.error),
    }
}

async fn handle_seed(students: usize, posts: usize, comments: usize) {
    let store = Store::postgres(connect().await);
    let config = SeedConfig::new(students)
        .with_posts(posts)
        .with_comments(comments);

    if let Err(e) = seeder::seed_all(&store, config).await {
        fail("Error seeding database", e);
    }
}
