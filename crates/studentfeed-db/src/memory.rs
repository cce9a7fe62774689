//! In-memory implementation of the repositories.
//!
//! Mirrors the PostgreSQL schema's constraints (unique email, foreign keys,
//! cascading deletes) so that the HTTP layer behaves the same against either
//! backend. Used by the test suite and by `STORAGE_BACKEND=memory`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use studentfeed_models::{
    Comment, NewComment, NewStudent, NewStudentPost, PostAuthor, Student, StudentChanges,
    StudentCredentials, StudentPost, StudentPostChanges,
};

use crate::error::{StoreError, StoreResult};
use crate::repository::{
    AccountRepository, CommentRepository, StudentPostRepository, StudentRepository,
};

const STUDENTS_EMAIL_KEY: &str = "students_email_key";
const POSTS_STUDENT_FKEY: &str = "student_posts_student_id_fkey";
const COMMENTS_POST_FKEY: &str = "comments_post_id_fkey";

#[derive(Debug, Clone)]
struct PostRecord {
    id: Uuid,
    student_id: Uuid,
    title: String,
    content: String,
    comment_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Rows in insertion order.
#[derive(Debug, Default)]
struct Collections {
    students: Vec<Student>,
    posts: Vec<PostRecord>,
    comments: Vec<Comment>,
    accounts: HashMap<Uuid, String>,
}

impl Collections {
    fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn post_mut(&mut self, id: Uuid) -> Option<&mut PostRecord> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.students
            .iter()
            .any(|s| s.email == email && Some(s.id) != except)
    }

    fn insert_student(&mut self, new: NewStudent) -> StoreResult<Student> {
        if self.email_taken(&new.email, None) {
            return Err(StoreError::UniqueViolation(STUDENTS_EMAIL_KEY.to_string()));
        }

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            age: new.age,
            created_at: now,
            updated_at: now,
        };
        self.students.push(student.clone());
        Ok(student)
    }

    fn expand(&self, record: &PostRecord) -> Option<StudentPost> {
        let author = self.student(record.student_id)?;
        Some(StudentPost {
            id: record.id,
            student: PostAuthor {
                id: author.id,
                name: author.name.clone(),
                email: author.email.clone(),
            },
            title: record.title.clone(),
            content: record.content.clone(),
            comments: record.comment_ids.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    fn remove_posts_where(&mut self, predicate: impl Fn(&PostRecord) -> bool) {
        let removed: Vec<Uuid> = self
            .posts
            .iter()
            .filter(|p| predicate(p))
            .map(|p| p.id)
            .collect();
        self.posts.retain(|p| !removed.contains(&p.id));
        self.comments.retain(|c| !removed.contains(&c.post_id));
    }
}

/// All four repositories over one shared, lock-guarded set of collections.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find(&self) -> StoreResult<Vec<Student>> {
        Ok(self.inner.read().await.students.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Student>> {
        Ok(self.inner.read().await.student(id).cloned())
    }

    async fn create(&self, student: NewStudent) -> StoreResult<Student> {
        self.inner.write().await.insert_student(student)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> StoreResult<Option<Student>> {
        let mut data = self.inner.write().await;

        if let Some(email) = &changes.email {
            if data.email_taken(email, Some(id)) {
                return Err(StoreError::UniqueViolation(STUDENTS_EMAIL_KEY.to_string()));
            }
        }

        let Some(student) = data.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        changes.apply_to(student);
        student.updated_at = Utc::now();

        Ok(Some(student.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut data = self.inner.write().await;

        let before = data.students.len();
        data.students.retain(|s| s.id != id);
        if data.students.len() == before {
            return Ok(false);
        }

        data.accounts.remove(&id);
        data.remove_posts_where(|p| p.student_id == id);
        Ok(true)
    }
}

#[async_trait]
impl StudentPostRepository for MemoryStore {
    async fn find(&self) -> StoreResult<Vec<StudentPost>> {
        let data = self.inner.read().await;

        // Reverse insertion order first so that the stable sort keeps the
        // newest post ahead of others with an identical timestamp.
        let mut posts: Vec<StudentPost> = data
            .posts
            .iter()
            .rev()
            .filter_map(|p| data.expand(p))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<StudentPost>> {
        let data = self.inner.read().await;
        Ok(data
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| data.expand(p)))
    }

    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.read().await.posts.iter().any(|p| p.id == id))
    }

    async fn create(&self, post: NewStudentPost) -> StoreResult<StudentPost> {
        let mut data = self.inner.write().await;

        if data.student(post.student_id).is_none() {
            return Err(StoreError::ForeignKeyViolation(POSTS_STUDENT_FKEY.to_string()));
        }

        let now = Utc::now();
        let record = PostRecord {
            id: Uuid::new_v4(),
            student_id: post.student_id,
            title: post.title,
            content: post.content,
            comment_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        data.posts.push(record.clone());

        data.expand(&record)
            .ok_or_else(|| StoreError::ForeignKeyViolation(POSTS_STUDENT_FKEY.to_string()))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: StudentPostChanges,
    ) -> StoreResult<Option<StudentPost>> {
        let mut data = self.inner.write().await;

        let Some(record) = data.post_mut(id) else {
            return Ok(None);
        };
        record.title = changes.title;
        record.content = changes.content;
        record.updated_at = Utc::now();
        let record = record.clone();

        Ok(data.expand(&record))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut data = self.inner.write().await;

        if !data.posts.iter().any(|p| p.id == id) {
            return Ok(false);
        }
        data.remove_posts_where(|p| p.id == id);
        Ok(true)
    }

    async fn pull_comment(&self, post_id: Uuid, comment_id: Uuid) -> StoreResult<bool> {
        let mut data = self.inner.write().await;

        let Some(record) = data.post_mut(post_id) else {
            return Ok(false);
        };
        record.comment_ids.retain(|id| *id != comment_id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>> {
        let data = self.inner.read().await;
        Ok(data
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut data = self.inner.write().await;

        let Some(record) = data.post_mut(comment.post_id) else {
            return Err(StoreError::ForeignKeyViolation(COMMENTS_POST_FKEY.to_string()));
        };

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            author: comment.author,
            content: comment.content,
            created_at: now,
            updated_at: now,
        };
        record.comment_ids.push(comment.id);
        data.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let mut data = self.inner.write().await;

        let position = data.comments.iter().position(|c| c.id == id);
        Ok(position.map(|index| data.comments.remove(index)))
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn register(&self, student: NewStudent, password_hash: String) -> StoreResult<Student> {
        let mut data = self.inner.write().await;

        let student = data.insert_student(student)?;
        data.accounts.insert(student.id, password_hash);
        Ok(student)
    }

    async fn find_credentials(&self, email: &str) -> StoreResult<Option<StudentCredentials>> {
        let data = self.inner.read().await;

        let Some(student) = data.students.iter().find(|s| s.email == email) else {
            return Ok(None);
        };
        Ok(data
            .accounts
            .get(&student.id)
            .map(|password_hash| StudentCredentials {
                student: student.clone(),
                password_hash: password_hash.clone(),
            }))
    }
}
