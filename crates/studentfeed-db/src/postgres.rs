//! PostgreSQL implementation of the repositories.
//!
//! Queries use the runtime-checked `sqlx::query_as` API. The post `comments`
//! back-reference is a `UUID[]` column. A comment insert appends to it in the
//! same statement and a removal is a single `array_remove`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_models::{
    Comment, NewComment, NewStudent, NewStudentPost, PostAuthor, Student, StudentChanges,
    StudentCredentials, StudentPost, StudentPostChanges,
};

use crate::error::StoreResult;
use crate::repository::{
    AccountRepository, CommentRepository, StudentPostRepository, StudentRepository,
};

const STUDENT_COLUMNS: &str = "id, name, email, age, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, post_id, author, content, created_at, updated_at";

/// Columns of a post joined with its author. `p` must expose the
/// `student_posts` columns and `s` the `students` columns.
const POST_PROJECTION: &str = r#"
    p.id, p.title, p.content, p.comment_ids, p.created_at, p.updated_at,
    s.id AS student_id, s.name AS student_name, s.email AS student_email
"#;

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    comment_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    student_id: Uuid,
    student_name: String,
    student_email: String,
}

impl From<PostRow> for StudentPost {
    fn from(row: PostRow) -> Self {
        StudentPost {
            id: row.id,
            student: PostAuthor {
                id: row.student_id,
                name: row.student_name,
                email: row.student_email,
            },
            title: row.title,
            content: row.content,
            comments: row.comment_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    student: Student,
    password_hash: String,
}

/// All four repositories over one connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStore {
    #[instrument(skip(self))]
    async fn find(&self) -> StoreResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self, student), fields(email = %student.email))]
    async fn create(&self, student: NewStudent) -> StoreResult<Student> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (id, name, email, age)
            VALUES ($1, $2, $3, $4)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                age = COALESCE($4, age),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.age)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StudentPostRepository for PgStore {
    #[instrument(skip(self))]
    async fn find(&self) -> StoreResult<Vec<StudentPost>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_PROJECTION}
            FROM student_posts p
            JOIN students s ON s.id = p.student_id
            ORDER BY p.created_at DESC, p.id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StudentPost::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<StudentPost>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_PROJECTION}
            FROM student_posts p
            JOIN students s ON s.id = p.student_id
            WHERE p.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StudentPost::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_posts WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self, post), fields(student_id = %post.student_id))]
    async fn create(&self, post: NewStudentPost) -> StoreResult<StudentPost> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            WITH p AS (
                INSERT INTO student_posts (id, student_id, title, content)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {POST_PROJECTION}
            FROM p
            JOIN students s ON s.id = p.student_id
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(post.student_id)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: StudentPostChanges,
    ) -> StoreResult<Option<StudentPost>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            WITH p AS (
                UPDATE student_posts
                SET title = $2, content = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_PROJECTION}
            FROM p
            JOIN students s ON s.id = p.student_id
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StudentPost::from))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM student_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn pull_comment(&self, post_id: Uuid, comment_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE student_posts SET comment_ids = array_remove(comment_ids, $2) WHERE id = $1",
        )
        .bind(post_id)
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at, id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: NewComment) -> StoreResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            WITH c AS (
                INSERT INTO comments (id, post_id, author, content)
                VALUES ($1, $2, $3, $4)
                RETURNING {COMMENT_COLUMNS}
            ), p AS (
                UPDATE student_posts
                SET comment_ids = array_append(comment_ids, $1)
                WHERE id = $2
            )
            SELECT {COMMENT_COLUMNS} FROM c
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(comment.post_id)
        .bind(&comment.author)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "DELETE FROM comments WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }
}

#[async_trait]
impl AccountRepository for PgStore {
    #[instrument(skip(self, student, password_hash), fields(email = %student.email))]
    async fn register(&self, student: NewStudent, password_hash: String) -> StoreResult<Student> {
        let mut tx = self.pool.begin().await?;

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (id, name, email, age)
            VALUES ($1, $2, $3, $4)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.age)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO accounts (student_id, password_hash) VALUES ($1, $2)")
            .bind(student.id)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, email: &str) -> StoreResult<Option<StudentCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT s.id, s.name, s.email, s.age, s.created_at, s.updated_at, a.password_hash
            FROM accounts a
            JOIN students s ON s.id = a.student_id
            WHERE s.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| StudentCredentials {
            student: row.student,
            password_hash: row.password_hash,
        }))
    }
}
