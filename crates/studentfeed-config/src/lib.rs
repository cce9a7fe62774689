//! # Studentfeed Config
//!
//! Configuration types for the Studentfeed API, loaded from environment
//! variables and validated once at startup.
//!
//! - [`jwt`]: Token signing configuration (`JWT_SECRET` is required)
//! - [`cors`]: CORS configuration
//! - [`server`]: Listener address, storage backend and database settings
//!
//! Every type has a `from_env()` constructor and a `from_vars(lookup)`
//! constructor that takes the variable lookup as a closure.
//!
//! # Example
//!
//! ```ignore
//! use studentfeed_config::AppConfig;
//!
//! let config = AppConfig::from_env()?; // fails if JWT_SECRET is unset
//! ```

pub mod cors;
pub mod error;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::{ServerConfig, StorageBackend};

/// Everything the server binary needs to start.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }
}
