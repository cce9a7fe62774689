//! Fake-data seeding.
//!
//! Seeding goes through the [`Store`] repositories rather than raw SQL, so it
//! runs against either backend and honours the same constraints as the API.

mod posts;
mod students;

use std::time::Instant;

use studentfeed_db::Store;

pub use posts::{generate_comments, generate_posts, seed_comments, seed_posts};
pub use students::{generate_students, seed_students};

/// Password given to every seeded account.
pub const SEED_PASSWORD: &str = "password123";

/// How much data [`seed_all`] creates.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub students: usize,
    pub posts_per_student: usize,
    pub comments_per_post: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 10,
            posts_per_student: 3,
            comments_per_post: 2,
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn with_posts(mut self, posts_per_student: usize) -> Self {
        self.posts_per_student = posts_per_student;
        self
    }

    pub fn with_comments(mut self, comments_per_post: usize) -> Self {
        self.comments_per_post = comments_per_post;
        self
    }
}

/// Counts of inserted rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub posts: usize,
    pub comments: usize,
}

pub async fn seed_all(
    store: &Store,
    config: SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    let students = seed_students(store, config.students).await?;
    let posts = seed_posts(store, &students, config.posts_per_student).await?;
    let comments = seed_comments(store, &posts, config.comments_per_post).await?;

    let summary = SeedSummary {
        students: students.len(),
        posts: posts.len(),
        comments,
    };

    println!(
        "\n✅ Seeded {} students, {} posts, {} comments in {:?}",
        summary.students,
        summary.posts,
        summary.comments,
        start_time.elapsed()
    );
    println!("   Every seeded student can log in with password '{SEED_PASSWORD}'");

    Ok(summary)
}
