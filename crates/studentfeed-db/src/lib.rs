//! # Studentfeed DB
//!
//! Database pool, migrations and repositories for the Studentfeed API.
//!
//! The HTTP layer talks to a [`Store`], a bundle of repository trait objects.
//! [`Store::postgres`] backs them with a PostgreSQL pool; [`Store::in_memory`]
//! backs them with a process-local [`MemoryStore`] that enforces the same
//! constraints, which is what the test suite uses.
//!
//! # Example
//!
//! ```ignore
//! use studentfeed_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

use std::fmt;
use std::sync::Arc;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{
    AccountRepository, CommentRepository, StudentPostRepository, StudentRepository,
};
pub use sqlx::PgPool;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool.
///
/// The pool is cheaply cloneable and should be created once at startup.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// The repositories used by request handlers.
#[derive(Clone)]
pub struct Store {
    pub students: Arc<dyn StudentRepository>,
    pub posts: Arc<dyn StudentPostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(PgStore::new(pool))
    }

    pub fn in_memory() -> Self {
        Self::from_backend(MemoryStore::new())
    }

    fn from_backend<B>(backend: B) -> Self
    where
        B: StudentRepository
            + StudentPostRepository
            + CommentRepository
            + AccountRepository
            + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            students: backend.clone(),
            posts: backend.clone(),
            comments: backend.clone(),
            accounts: backend,
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
