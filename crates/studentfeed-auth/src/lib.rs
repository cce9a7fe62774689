//! # Studentfeed Auth
//!
//! The token service for the Studentfeed API.
//!
//! - [`claims`]: The JWT claim structure (`sub`, `iat`, `exp`)
//! - [`jwt`]: Token issuing and verification
//!
//! # Example
//!
//! ```ignore
//! use studentfeed_auth::{issue_token, verify_token};
//! use studentfeed_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(student_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{INVALID_TOKEN, issue_token, verify_token};
