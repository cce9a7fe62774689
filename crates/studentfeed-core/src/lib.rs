//! # Studentfeed Core
//!
//! Core types, errors, and utilities for the Studentfeed API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{status, data}` / `{status, message}` response envelope
//! - [`ids`]: Path identifier parsing
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use studentfeed_core::{AppError, ApiResponse, parse_id};
//!
//! let id = parse_id(&raw, "id")?;
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let body = ApiResponse::success(student);
//! ```

pub mod errors;
pub mod ids;
pub mod password;
pub mod response;

pub use errors::AppError;
pub use ids::parse_id;
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, ErrorResponse, MessageResponse, ResponseStatus};
