//! Repository traits, one per entity.
//!
//! Controllers and services only see these traits, so the HTTP layer does
//! not know whether PostgreSQL or the in-memory store is behind them.

use async_trait::async_trait;
use uuid::Uuid;

use studentfeed_models::{
    Comment, NewComment, NewStudent, NewStudentPost, Student, StudentChanges, StudentCredentials,
    StudentPost, StudentPostChanges,
};

use crate::error::StoreResult;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students, oldest first.
    async fn find(&self) -> StoreResult<Vec<Student>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Student>>;

    /// Fails with `UniqueViolation` if the email is taken.
    async fn create(&self, student: NewStudent) -> StoreResult<Student>;

    /// Returns `None` if no student has this id.
    async fn update_by_id(&self, id: Uuid, changes: StudentChanges)
    -> StoreResult<Option<Student>>;

    /// Returns `false` if nothing was deleted. Cascades to the student's
    /// account, posts and the comments on those posts.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait StudentPostRepository: Send + Sync {
    /// All posts with their author expanded, newest first.
    async fn find(&self) -> StoreResult<Vec<StudentPost>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<StudentPost>>;

    async fn exists(&self, id: Uuid) -> StoreResult<bool>;

    /// Fails with `ForeignKeyViolation` if the author does not exist.
    async fn create(&self, post: NewStudentPost) -> StoreResult<StudentPost>;

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: StudentPostChanges,
    ) -> StoreResult<Option<StudentPost>>;

    /// Returns `false` if nothing was deleted. Cascades to the post's comments.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;

    /// Removes `comment_id` from the post's `comments` in one atomic update.
    /// Returns `false` if the post does not exist.
    async fn pull_comment(&self, post_id: Uuid, comment_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>>;

    /// Inserts the comment and appends its id to the post's `comments` as one
    /// atomic write. Fails with `ForeignKeyViolation` if the post does not exist.
    async fn create(&self, comment: NewComment) -> StoreResult<Comment>;

    /// Returns the deleted comment, or `None` if there was none.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a student and its login credentials atomically.
    async fn register(&self, student: NewStudent, password_hash: String) -> StoreResult<Student>;

    async fn find_credentials(&self, email: &str) -> StoreResult<Option<StudentCredentials>>;
}
