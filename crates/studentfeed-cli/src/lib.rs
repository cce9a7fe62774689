//! # Studentfeed CLI
//!
//! Database seeding utilities for Studentfeed testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use studentfeed_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 students with default posts and comments
//! seed_all(&store, config).await?;
//! ```

pub mod seeder;
